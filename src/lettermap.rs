use crate::error::{TkResult, TurtleError};
use crate::keysig::KeySignature;
use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::Path;
use tracing::{debug, info};

/// Recorded table of which character each `(scan, modifiers, group)` produces.
///
/// Entries are only ever added: once a signature has a character, later
/// observations of the same signature are ignored.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LetterMap {
    entries: HashMap<KeySignature, char>,
}

impl LetterMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, sig: &KeySignature) -> Option<char> {
        self.entries.get(sig).copied()
    }

    pub fn contains(&self, sig: &KeySignature) -> bool {
        self.entries.contains_key(sig)
    }

    /// Stores `letter` for `sig` unless the signature is already mapped.
    /// Returns true if the map changed.
    pub fn record(&mut self, sig: KeySignature, letter: char) -> bool {
        use std::collections::hash_map::Entry;
        match self.entries.entry(sig) {
            Entry::Vacant(e) => {
                e.insert(letter);
                true
            }
            Entry::Occupied(_) => false,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&KeySignature, &char)> {
        self.entries.iter()
    }

    /// Entries ordered by signature.
    pub fn sorted(&self) -> Vec<(KeySignature, char)> {
        let mut out: Vec<_> = self.entries.iter().map(|(s, c)| (*s, *c)).collect();
        out.sort();
        out
    }

    /// The signature producing `letter` with the fewest modifiers held.
    /// Equal candidates resolve to the lowest signature.
    pub fn best_for_char(&self, letter: char) -> Option<KeySignature> {
        self.best_for_char_where(letter, |_| true)
    }

    /// Like `best_for_char`, restricted to signatures `accept` allows.
    pub fn best_for_char_where<F>(&self, letter: char, accept: F) -> Option<KeySignature>
    where
        F: Fn(&KeySignature) -> bool,
    {
        self.entries
            .iter()
            .filter(|(sig, c)| **c == letter && accept(*sig))
            .map(|(sig, _)| *sig)
            .min_by_key(|sig| (sig.modifiers.count(), *sig))
    }

    pub fn from_json_str(content: &str) -> TkResult<Self> {
        let raw: BTreeMap<String, String> = serde_json::from_str(content)?;

        let mut map = LetterMap::new();
        for (sig_str, letter) in raw {
            let sig: KeySignature = sig_str.parse()?;

            let mut chars = letter.chars();
            let c = match (chars.next(), chars.next()) {
                (Some(c), None) => c,
                _ => {
                    return Err(TurtleError::Validation(format!(
                        "Letter for '{}' must be a single character, got {:?}",
                        sig_str, letter
                    )))
                }
            };

            if !map.record(sig, c) {
                debug!("Duplicate letter map entry for '{}' ignored", sig_str);
            }
        }
        Ok(map)
    }

    pub fn load_from_file<P: AsRef<Path>>(path: P) -> TkResult<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)?;
        let map = Self::from_json_str(&content)?;
        info!("Loaded {} letters from {:?}", map.len(), path);
        Ok(map)
    }

    /// Pretty JSON with keys sorted, non-ASCII letters written as-is.
    pub fn to_json_string(&self) -> TkResult<String> {
        let raw: BTreeMap<String, String> = self
            .entries
            .iter()
            .map(|(sig, c)| (sig.to_string(), c.to_string()))
            .collect();
        Ok(serde_json::to_string_pretty(&raw)?)
    }

    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> TkResult<()> {
        let path = path.as_ref();
        fs::write(path, self.to_json_string()?)?;
        info!("Saved {} letters to {:?}", self.len(), path);
        Ok(())
    }
}

impl FromIterator<(KeySignature, char)> for LetterMap {
    fn from_iter<I: IntoIterator<Item = (KeySignature, char)>>(iter: I) -> Self {
        let mut map = LetterMap::new();
        for (sig, c) in iter {
            map.record(sig, c);
        }
        map
    }
}
