//! Run identifiers
//!
//! A run identifier is an opaque 10-character token (uppercase letters and
//! digits) grouping every archive produced by one execution.

use rand::RngExt;
use serde::{Deserialize, Serialize};
use std::fmt;

const RUN_ID_LEN: usize = 10;
const RUN_ID_CHARSET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

/// Opaque token grouping the archives of one pack run
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RunId(String);

impl RunId {
    /// Generate a fresh random run identifier
    pub fn generate() -> Self {
        let mut rng = rand::rng();
        let id = (0..RUN_ID_LEN)
            .map(|_| RUN_ID_CHARSET[rng.random_range(0..RUN_ID_CHARSET.len())] as char)
            .collect();
        Self(id)
    }

    /// The identifier as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RunId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_shape() {
        let id = RunId::generate();
        assert_eq!(id.as_str().len(), RUN_ID_LEN);
        assert!(
            id.as_str()
                .bytes()
                .all(|b| RUN_ID_CHARSET.contains(&b))
        );
    }

    #[test]
    fn test_generate_is_not_constant() {
        let ids: std::collections::HashSet<String> = (0..16)
            .map(|_| RunId::generate().as_str().to_string())
            .collect();
        assert!(ids.len() > 1);
    }

    #[test]
    fn test_display_matches_as_str() {
        let id = RunId::generate();
        assert_eq!(id.to_string(), id.as_str());
    }
}
