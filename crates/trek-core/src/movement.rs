//! The closed set of locomotion modes.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// How an entity moves.
///
/// Serialized in lowercase (`"walking"`, `"running"`, ...) which is also the
/// form used in trajectory exports.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MovementType {
    /// Ground locomotion at normal pace. The default.
    #[default]
    Walking,
    /// Ground locomotion at speed.
    Running,
    /// Airborne locomotion.
    Flying,
    /// Locomotion through water.
    Swimming,
    /// Anchored in place: may rotate but never translate.
    Stationary,
}

impl MovementType {
    /// Every variant, in declaration order.
    pub const ALL: [MovementType; 5] = [
        MovementType::Walking,
        MovementType::Running,
        MovementType::Flying,
        MovementType::Swimming,
        MovementType::Stationary,
    ];

    /// Whether this mode permits `move_to` style translation.
    pub fn can_translate(self) -> bool {
        !matches!(self, MovementType::Stationary)
    }

    /// Lowercase wire name.
    pub fn as_str(self) -> &'static str {
        match self {
            MovementType::Walking => "walking",
            MovementType::Running => "running",
            MovementType::Flying => "flying",
            MovementType::Swimming => "swimming",
            MovementType::Stationary => "stationary",
        }
    }
}

impl fmt::Display for MovementType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned by [`MovementType::from_str`] for an unrecognized name.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParseMovementTypeError {
    /// The rejected input.
    pub input: String,
}

impl fmt::Display for ParseMovementTypeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown movement type '{}'", self.input)
    }
}

impl std::error::Error for ParseMovementTypeError {}

impl FromStr for MovementType {
    type Err = ParseMovementTypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        MovementType::ALL
            .into_iter()
            .find(|m| m.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| ParseMovementTypeError { input: s.to_owned() })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_stationary_cannot_translate() {
        let translating: Vec<_> = MovementType::ALL
            .into_iter()
            .filter(|m| m.can_translate())
            .collect();
        assert_eq!(
            translating,
            vec![
                MovementType::Walking,
                MovementType::Running,
                MovementType::Flying,
                MovementType::Swimming,
            ]
        );
    }

    #[test]
    fn parse_round_trips_names() {
        for m in MovementType::ALL {
            assert_eq!(m.as_str().parse::<MovementType>(), Ok(m));
        }
        assert_eq!("Flying".parse::<MovementType>(), Ok(MovementType::Flying));
        assert!("teleporting".parse::<MovementType>().is_err());
    }

    #[test]
    fn serde_uses_lowercase() {
        let json = serde_json::to_string(&MovementType::Swimming).unwrap();
        assert_eq!(json, "\"swimming\"");
    }
}
