//! Side designation for the two manifests being compared

use serde::{Deserialize, Serialize};
use std::fmt;

/// Which input a manifest or component belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    /// First manifest (the client list by default)
    Left,
    /// Second manifest (the server list by default)
    Right,
}

impl Side {
    /// Returns the default display label ("client" or "server")
    pub fn default_label(&self) -> &'static str {
        match self {
            Side::Left => "client",
            Side::Right => "server",
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Left => write!(f, "left"),
            Side::Right => write!(f, "right"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_and_labels() {
        assert_eq!(Side::Left.to_string(), "left");
        assert_eq!(Side::Right.default_label(), "server");
    }

    #[test]
    fn test_serde_lowercase() {
        assert_eq!(serde_json::to_string(&Side::Left).unwrap(), "\"left\"");
        let side: Side = serde_json::from_str("\"right\"").unwrap();
        assert_eq!(side, Side::Right);
    }
}
