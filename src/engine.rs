use crate::geometry::{Finger, GroupLayout, LayoutDescription, ResolvedProps};
use crate::keymap::{LevelModifiers, PlatformKeymap};
use crate::keysig::{KeySignature, Modifiers, ScanCode};
use crate::lettermap::LetterMap;
use std::collections::HashMap;
use tracing::{debug, trace};

/// Unicode pilcrow used by lessons as a visible stand-in for a line break.
pub const PARAGRAPH_CHAR: char = '\u{b6}';

/// Label of the key that newlines and paragraphs resolve to.
pub const ENTER_LABEL: &str = "enter";

/// A key after property inheritance and positioning, in layout coordinates.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedKey {
    pub props: ResolvedProps,
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub pressed: bool,
    pub group_index: usize,
    pub key_index: usize,
}

impl ResolvedKey {
    pub fn scan_code(&self) -> ScanCode {
        self.props.key_scan
    }

    pub fn label(&self) -> &str {
        &self.props.key_label
    }

    pub fn finger(&self) -> Option<Finger> {
        self.props.key_finger
    }

    pub fn hand_image(&self) -> &str {
        &self.props.key_hand_image
    }
}

/// Answer to "how do I type this character?".
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KeyHint<'a> {
    pub key: &'a ResolvedKey,
    pub modifiers: Modifiers,
    pub group: u8,
}

/// Resolves a layout description into positioned keys and maps between keys
/// and the characters they produce.
///
/// Lookups never fail: a key, label or character the engine cannot place is
/// reported as `None`.
#[derive(Debug, Clone, Default)]
pub struct KeyboardEngine {
    keys: Vec<ResolvedKey>,
    scan_index: HashMap<ScanCode, usize>,
    group_count: usize,
    letters: LetterMap,
    levels: LevelModifiers,
}

impl KeyboardEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_letter_map(letters: LetterMap) -> Self {
        Self {
            letters,
            ..Self::default()
        }
    }

    pub fn with_levels(mut self, levels: LevelModifiers) -> Self {
        self.levels = levels;
        self
    }

    pub fn set_layout(&mut self, layout: &LayoutDescription) {
        self.build_key_list(layout);
        self.layout_keys();
        debug!(
            "Layout '{}': {} keys in {} groups, {} scan codes",
            layout.props.layout_name.as_deref().unwrap_or(""),
            self.keys.len(),
            self.group_count,
            self.scan_index.len()
        );
    }

    fn build_key_list(&mut self, layout: &LayoutDescription) {
        self.keys.clear();
        self.scan_index.clear();
        self.group_count = layout.groups.len();

        for (group_index, group) in layout.groups.iter().enumerate() {
            for (key_index, key) in group.keys.iter().enumerate() {
                let props = ResolvedProps::inherit(&key.props, &group.props, &layout.props);

                if props.key_scan != 0 {
                    // Later keys win on duplicate scan codes.
                    self.scan_index.insert(props.key_scan, self.keys.len());
                }

                self.keys.push(ResolvedKey {
                    x: props.key_x,
                    y: props.key_y,
                    width: props.key_width,
                    height: props.key_height,
                    pressed: props.key_pressed,
                    group_index,
                    key_index,
                    props,
                });
            }
        }
    }

    // Relies on self.keys being ordered by (group_index, key_index).
    fn layout_keys(&mut self) {
        let mut cursor = (0.0f32, 0.0f32);
        let mut cur_group = None;

        for k in &mut self.keys {
            if cur_group != Some(k.group_index) {
                cur_group = Some(k.group_index);
                cursor = (k.props.group_x, k.props.group_y);
            }

            match &k.props.group_layout {
                GroupLayout::Horizontal => {
                    k.x = cursor.0;
                    k.y = cursor.1;
                    cursor.0 += k.width + k.props.key_gap;
                }
                GroupLayout::Vertical => {
                    k.x = cursor.0;
                    k.y = cursor.1;
                    cursor.1 += k.height + k.props.key_gap;
                }
                GroupLayout::Custom => {
                    k.x = cursor.0 + k.props.key_x;
                    k.y = cursor.1 + k.props.key_y;
                }
                GroupLayout::Other(name) => {
                    trace!("Unknown group layout '{}', key left at group origin", name);
                    k.x = cursor.0;
                    k.y = cursor.1;
                }
            }
        }
    }

    pub fn keys(&self) -> &[ResolvedKey] {
        &self.keys
    }

    pub fn group_count(&self) -> usize {
        self.group_count
    }

    pub fn levels(&self) -> &LevelModifiers {
        &self.levels
    }

    pub fn letter_map(&self) -> &LetterMap {
        &self.letters
    }

    pub fn letter_map_mut(&mut self) -> &mut LetterMap {
        &mut self.letters
    }

    pub fn key_for_scan(&self, scan: ScanCode) -> Option<&ResolvedKey> {
        self.scan_index.get(&scan).map(|&i| &self.keys[i])
    }

    pub fn find_key_by_label(&self, label: &str) -> Option<&ResolvedKey> {
        self.keys.iter().find(|k| k.props.key_label == label)
    }

    pub fn resolve_key_for_signature(&self, sig: &KeySignature) -> Option<&ResolvedKey> {
        self.key_for_scan(sig.scan_code)
    }

    /// Which key, modifiers and input group produce `letter`.
    ///
    /// Newline and the paragraph mark always map to the `enter` key. Otherwise
    /// the letter map is consulted first (fewest modifiers wins), then the
    /// platform keymap.
    pub fn key_for_char<K: PlatformKeymap + ?Sized>(
        &self,
        letter: char,
        keymap: &K,
    ) -> Option<KeyHint<'_>> {
        if letter == '\n' || letter == PARAGRAPH_CHAR {
            return self.find_key_by_label(ENTER_LABEL).map(|key| KeyHint {
                key,
                modifiers: Modifiers::NONE,
                group: 0,
            });
        }

        let best = self
            .letters
            .best_for_char_where(letter, |sig| self.scan_index.contains_key(&sig.scan_code));
        if let Some(sig) = best {
            if let Some(key) = self.key_for_scan(sig.scan_code) {
                return Some(KeyHint {
                    key,
                    modifiers: sig.modifiers,
                    group: sig.group,
                });
            }
        }

        keymap.entries_for_char(letter).into_iter().find_map(|e| {
            self.key_for_scan(e.scan_code).map(|key| KeyHint {
                key,
                modifiers: self.levels.to_modifiers(e.level),
                group: e.group,
            })
        })
    }

    /// The character `key` produces, according to the letter map only.
    pub fn char_for_key(&self, key: &ResolvedKey, modifiers: Modifiers, group: u8) -> Option<char> {
        self.letters
            .get(&KeySignature::new(key.scan_code(), modifiers, group))
    }

    /// Text to show on `key`: its label, else the recorded letter, else what
    /// the platform keymap says. Empty when nothing is known.
    pub fn key_text<K: PlatformKeymap + ?Sized>(
        &self,
        key: &ResolvedKey,
        modifiers: Modifiers,
        group: u8,
        keymap: &K,
    ) -> String {
        if !key.label().is_empty() {
            return key.label().to_string();
        }
        self.char_for_key(key, modifiers, group)
            .or_else(|| keymap.translate(key.scan_code(), modifiers, group))
            .map(String::from)
            .unwrap_or_default()
    }

    /// Learns `letter` for the signature unless it is already known.
    pub fn record_observed(
        &mut self,
        scan: ScanCode,
        modifiers: Modifiers,
        group: u8,
        letter: char,
    ) -> bool {
        let sig = KeySignature::new(scan, modifiers, group);
        let learned = self.letters.record(sig, letter);
        if learned {
            debug!("Learned {:?} for '{}'", letter, sig);
        }
        learned
    }

    /// Marks the key with `scan` as pressed or released. Unknown scan codes
    /// are ignored. Returns true if a key changed.
    pub fn set_pressed(&mut self, scan: ScanCode, pressed: bool) -> bool {
        match self.scan_index.get(&scan) {
            Some(&i) if self.keys[i].pressed != pressed => {
                self.keys[i].pressed = pressed;
                true
            }
            _ => false,
        }
    }
}
