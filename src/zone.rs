use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ToolError;

/// A room the assistant controls. The set is closed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Zone {
    LivingRoom,
    Bedroom,
    Kitchen,
    Bathroom,
    Office,
}

impl Zone {
    pub const COUNT: usize = 5;

    /// Every zone, in declaration order.
    pub const ALL: [Zone; Self::COUNT] = [
        Zone::LivingRoom,
        Zone::Bedroom,
        Zone::Kitchen,
        Zone::Bathroom,
        Zone::Office,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::LivingRoom => "living_room",
            Self::Bedroom => "bedroom",
            Self::Kitchen => "kitchen",
            Self::Bathroom => "bathroom",
            Self::Office => "office",
        }
    }

    /// Temperature a zone starts at, in degrees.
    pub fn default_temperature(self) -> i64 {
        match self {
            Self::LivingRoom => 22,
            Self::Bedroom => 20,
            Self::Kitchen => 24,
            Self::Bathroom => 23,
            Self::Office => 21,
        }
    }

    pub(crate) fn index(self) -> usize {
        self as usize
    }

    /// Canonical identifiers, for schema enums.
    pub fn identifiers() -> Vec<&'static str> {
        Self::ALL.iter().map(|z| z.as_str()).collect()
    }
}

/// Exact, case-sensitive match against the canonical identifiers.
/// No trimming or fuzzy matching.
pub fn parse_zone(raw: &str) -> Result<Zone, ToolError> {
    Zone::ALL
        .into_iter()
        .find(|z| z.as_str() == raw)
        .ok_or_else(|| ToolError::InvalidZone(raw.to_string()))
}

impl FromStr for Zone {
    type Err = ToolError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_zone(s)
    }
}

impl fmt::Display for Zone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_every_canonical_identifier() {
        for zone in Zone::ALL {
            assert_eq!(parse_zone(zone.as_str()).unwrap(), zone);
        }
    }

    #[test]
    fn rejects_unknown_zone() {
        let err = parse_zone("garage").unwrap_err();
        assert!(matches!(err, ToolError::InvalidZone(ref z) if z == "garage"));
    }

    #[test]
    fn match_is_case_sensitive_and_exact() {
        assert!(parse_zone("Kitchen").is_err());
        assert!(parse_zone(" kitchen").is_err());
        assert!(parse_zone("living room").is_err());
        assert!(parse_zone("").is_err());
    }

    #[test]
    fn serde_uses_canonical_identifiers() {
        let json = serde_json::to_string(&Zone::LivingRoom).unwrap();
        assert_eq!(json, "\"living_room\"");
        let zone: Zone = serde_json::from_str("\"office\"").unwrap();
        assert_eq!(zone, Zone::Office);
    }

    #[test]
    fn index_follows_declaration_order() {
        for (i, zone) in Zone::ALL.iter().enumerate() {
            assert_eq!(zone.index(), i);
        }
    }
}
