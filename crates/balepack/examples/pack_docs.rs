#![allow(clippy::expect_used, clippy::panic)]

//! Pack a document tree into size-capped zip archives.
//!
//! Usage:
//!   cargo run --example pack_docs -p balepack -- <root> <output-dir>

use balepack::{Packer, PackerConfig};

fn main() {
    let mut args = std::env::args().skip(1);
    let (Some(root), Some(output)) = (args.next(), args.next()) else {
        eprintln!("usage: pack_docs <root> <output-dir>");
        std::process::exit(2);
    };

    let config = PackerConfig::new(root, output);
    let packer = Packer::new(config).expect("invalid configuration");

    let report = packer.pack().expect("pack failed");

    println!(
        "run {}: {} archives, {} entries ({} bytes), {} skipped",
        report.run_id,
        report.archives.len(),
        report.total_entries_written(),
        report.total_entry_bytes(),
        report.total_skipped()
    );

    for archive in &report.archives {
        println!(
            "  {} ({} entries)",
            archive.path.display(),
            archive.entries_written
        );
        for skipped in &archive.skipped {
            println!("    skipped {}: {}", skipped.path.display(), skipped.error);
        }
    }

    for err in &report.inaccessible {
        println!("  inaccessible {}: {}", err.path.display(), err.source);
    }
}
