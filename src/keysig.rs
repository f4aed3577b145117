use crate::error::SignatureError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{BitOr, BitOrAssign};
use std::str::FromStr;

/// Platform identifier of a physical key (X11 hardware keycode on the XO).
pub type ScanCode = u16;

/// Bitset of the modifiers that change what a key produces.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Modifiers(u8);

impl Modifiers {
    pub const NONE: Modifiers = Modifiers(0);
    pub const SHIFT: Modifiers = Modifiers(1 << 0);
    pub const ALTGR: Modifiers = Modifiers(1 << 1);

    const ALL: u8 = Self::SHIFT.0 | Self::ALTGR.0;

    /// Builds a set from raw bits, dropping bits that are not SHIFT or ALTGR.
    pub const fn from_bits_truncate(bits: u8) -> Self {
        Modifiers(bits & Self::ALL)
    }

    pub const fn bits(self) -> u8 {
        self.0
    }

    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub const fn contains(self, other: Modifiers) -> bool {
        self.0 & other.0 == other.0
    }

    pub const fn without(self, other: Modifiers) -> Self {
        Modifiers(self.0 & !other.0)
    }

    /// Number of modifiers held. Used to rank candidate keys for a letter.
    pub const fn count(self) -> u32 {
        self.0.count_ones()
    }
}

impl BitOr for Modifiers {
    type Output = Modifiers;

    fn bitor(self, rhs: Self) -> Self::Output {
        Modifiers(self.0 | rhs.0)
    }
}

impl BitOrAssign for Modifiers {
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

impl fmt::Display for Modifiers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.contains(Self::SHIFT), self.contains(Self::ALTGR)) {
            (false, false) => write!(f, "-"),
            (true, false) => write!(f, "shift"),
            (false, true) => write!(f, "altgr"),
            (true, true) => write!(f, "shift+altgr"),
        }
    }
}

/// `(scan code, modifiers, input group)`: the key of a LetterMap entry.
///
/// The textual form is `scan<N>[ shift][ altgr][ group<G>]`, where the group
/// suffix is omitted for group 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct KeySignature {
    pub scan_code: ScanCode,
    pub modifiers: Modifiers,
    pub group: u8,
}

impl KeySignature {
    pub fn new(scan_code: ScanCode, modifiers: Modifiers, group: u8) -> Self {
        Self {
            scan_code,
            modifiers,
            group,
        }
    }
}

impl fmt::Display for KeySignature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "scan{}", self.scan_code)?;
        if self.modifiers.contains(Modifiers::SHIFT) {
            write!(f, " shift")?;
        }
        if self.modifiers.contains(Modifiers::ALTGR) {
            write!(f, " altgr")?;
        }
        if self.group != 0 {
            write!(f, " group{}", self.group)?;
        }
        Ok(())
    }
}

fn parse_decimal<T: FromStr>(sig: &str, digits: &str) -> Result<T, SignatureError> {
    let bad = || SignatureError::BadNumber {
        sig: sig.to_string(),
        value: digits.to_string(),
    };
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(bad());
    }
    digits.parse().map_err(|_| bad())
}

impl FromStr for KeySignature {
    type Err = SignatureError;

    fn from_str(sig: &str) -> Result<Self, Self::Err> {
        let mut tokens = sig.split(' ').peekable();

        let scan_code = match tokens.next().and_then(|t| t.strip_prefix("scan")) {
            Some(digits) => parse_decimal(sig, digits)?,
            None => return Err(SignatureError::MissingScan(sig.to_string())),
        };

        let mut modifiers = Modifiers::NONE;
        if tokens.peek() == Some(&"shift") {
            tokens.next();
            modifiers |= Modifiers::SHIFT;
        }
        if tokens.peek() == Some(&"altgr") {
            tokens.next();
            modifiers |= Modifiers::ALTGR;
        }

        let mut group = 0;
        if let Some(digits) = tokens.peek().and_then(|t| t.strip_prefix("group")) {
            group = parse_decimal(sig, digits)?;
            tokens.next();
        }

        if let Some(token) = tokens.next() {
            return Err(SignatureError::UnexpectedToken {
                sig: sig.to_string(),
                token: token.to_string(),
            });
        }

        Ok(KeySignature {
            scan_code,
            modifiers,
            group,
        })
    }
}
