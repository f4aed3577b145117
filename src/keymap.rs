use crate::keysig::{KeySignature, Modifiers, ScanCode};
use crate::lettermap::LetterMap;
use serde::{Deserialize, Serialize};

/// One way the platform can produce a character: press `scan_code` in input
/// `group` at shift `level`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeymapEntry {
    pub scan_code: ScanCode,
    pub group: u8,
    pub level: u8,
}

/// Query side of the OS keymap.
pub trait PlatformKeymap {
    /// Every key/group/level that generates `letter`, in platform order.
    fn entries_for_char(&self, letter: char) -> Vec<KeymapEntry>;

    /// The character `scan` produces with `modifiers` held in `group`.
    fn translate(&self, _scan: ScanCode, _modifiers: Modifiers, _group: u8) -> Option<char> {
        None
    }
}

/// Keymap with no entries. Resolution then relies on the letter map alone.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoKeymap;

impl PlatformKeymap for NoKeymap {
    fn entries_for_char(&self, _letter: char) -> Vec<KeymapEntry> {
        Vec::new()
    }
}

/// Which modifiers each bit of a platform shift level stands for.
///
/// The XO default (bit 0 = SHIFT, bit 1 = ALTGR) was found by experiment on
/// that keyboard; other hardware may need a different table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelModifiers {
    pub bits: [Modifiers; 8],
}

impl Default for LevelModifiers {
    fn default() -> Self {
        Self::from_bits(0, 1)
    }
}

impl LevelModifiers {
    /// Table with SHIFT on `shift_bit` and ALTGR on `altgr_bit`.
    /// Bits outside `0..8` are ignored.
    pub fn from_bits(shift_bit: u8, altgr_bit: u8) -> Self {
        let mut bits = [Modifiers::NONE; 8];
        if let Some(slot) = bits.get_mut(shift_bit as usize) {
            *slot |= Modifiers::SHIFT;
        }
        if let Some(slot) = bits.get_mut(altgr_bit as usize) {
            *slot |= Modifiers::ALTGR;
        }
        Self { bits }
    }

    pub fn to_modifiers(&self, level: u8) -> Modifiers {
        self.bits
            .iter()
            .enumerate()
            .filter(|(bit, _)| level & (1 << bit) != 0)
            .fold(Modifiers::NONE, |acc, (_, m)| acc | *m)
    }

    /// Inverse of `to_modifiers`: the lowest level whose bits give `modifiers`.
    pub fn to_level(&self, modifiers: Modifiers) -> Option<u8> {
        (0..=u8::MAX).find(|&level| self.to_modifiers(level) == modifiers)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Row {
    entry: KeymapEntry,
    letter: char,
}

/// In-memory keymap built from explicit rows.
#[derive(Debug, Clone, Default)]
pub struct StaticKeymap {
    rows: Vec<Row>,
    levels: LevelModifiers,
}

impl StaticKeymap {
    pub fn new(levels: LevelModifiers) -> Self {
        Self {
            rows: Vec::new(),
            levels,
        }
    }

    pub fn add(&mut self, scan_code: ScanCode, group: u8, level: u8, letter: char) -> &mut Self {
        self.rows.push(Row {
            entry: KeymapEntry {
                scan_code,
                group,
                level,
            },
            letter,
        });
        self
    }

    /// Replays a recorded letter map as a platform keymap.
    /// Signatures whose modifiers have no level in `levels` are skipped.
    pub fn from_letter_map(map: &LetterMap, levels: LevelModifiers) -> Self {
        let mut keymap = Self::new(levels);
        for (sig, letter) in map.sorted() {
            if let Some(level) = levels.to_level(sig.modifiers) {
                keymap.add(sig.scan_code, sig.group, level, letter);
            }
        }
        keymap
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

impl PlatformKeymap for StaticKeymap {
    fn entries_for_char(&self, letter: char) -> Vec<KeymapEntry> {
        self.rows
            .iter()
            .filter(|r| r.letter == letter)
            .map(|r| r.entry)
            .collect()
    }

    fn translate(&self, scan: ScanCode, modifiers: Modifiers, group: u8) -> Option<char> {
        let wanted = KeySignature::new(scan, modifiers, group);
        self.rows
            .iter()
            .find(|r| {
                KeySignature::new(
                    r.entry.scan_code,
                    self.levels.to_modifiers(r.entry.level),
                    r.entry.group,
                ) == wanted
            })
            .map(|r| r.letter)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn xo_levels() {
        let levels = LevelModifiers::default();
        assert_eq!(levels.to_modifiers(0), Modifiers::NONE);
        assert_eq!(levels.to_modifiers(1), Modifiers::SHIFT);
        assert_eq!(levels.to_modifiers(2), Modifiers::ALTGR);
        assert_eq!(levels.to_modifiers(3), Modifiers::SHIFT | Modifiers::ALTGR);
    }

    #[test]
    fn swapped_levels() {
        let levels = LevelModifiers::from_bits(1, 0);
        assert_eq!(levels.to_modifiers(1), Modifiers::ALTGR);
        assert_eq!(levels.to_level(Modifiers::SHIFT), Some(2));
    }

    #[test]
    fn translate_uses_level_table() {
        let mut keymap = StaticKeymap::new(LevelModifiers::default());
        keymap.add(38, 0, 0, 'a').add(38, 0, 1, 'A');
        assert_eq!(keymap.translate(38, Modifiers::SHIFT, 0), Some('A'));
        assert_eq!(keymap.translate(38, Modifiers::ALTGR, 0), None);
    }
}
