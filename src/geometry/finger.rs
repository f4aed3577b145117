use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use strum_macros::{Display, EnumIter, EnumString};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, EnumString, Display)]
pub enum Hand {
    #[strum(serialize = "L")]
    Left,
    #[strum(serialize = "R")]
    Right,
}

impl Hand {
    pub fn other(self) -> Hand {
        match self {
            Hand::Left => Hand::Right,
            Hand::Right => Hand::Left,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, EnumString, Display)]
pub enum Digit {
    #[strum(serialize = "T")]
    Thumb,
    #[strum(serialize = "I")]
    Index,
    #[strum(serialize = "M")]
    Middle,
    #[strum(serialize = "R")]
    Ring,
    #[strum(serialize = "P")]
    Pinky,
}

/// Finger that should press a key, written `[LR][TIMRP]` in layout files
/// (`LM` is the left middle finger).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Finger {
    pub hand: Hand,
    pub digit: Digit,
}

impl Finger {
    pub fn new(hand: Hand, digit: Digit) -> Self {
        Self { hand, digit }
    }
}

impl fmt::Display for Finger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.hand, self.digit)
    }
}

impl FromStr for Finger {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        match (chars.next(), chars.next(), chars.next()) {
            (Some(h), Some(d), None) => {
                let hand = Hand::from_str(&h.to_string())
                    .map_err(|_| format!("Unknown hand '{}' in finger '{}'", h, s))?;
                let digit = Digit::from_str(&d.to_string())
                    .map_err(|_| format!("Unknown digit '{}' in finger '{}'", d, s))?;
                Ok(Finger { hand, digit })
            }
            _ => Err(format!("Finger '{}' must be two letters like 'LM'", s)),
        }
    }
}

impl Serialize for Finger {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Finger {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Layout files write `""` for "no finger"; treat it like an absent value.
pub(crate) fn deserialize_optional<'de, D>(deserializer: D) -> Result<Option<Finger>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    match raw.as_deref() {
        None | Some("") => Ok(None),
        Some(s) => s.parse().map(Some).map_err(serde::de::Error::custom),
    }
}
