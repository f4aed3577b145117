use crate::engine::KeyboardEngine;
use crate::geometry::{Finger, Hand};
use crate::keymap::PlatformKeymap;
use crate::keysig::Modifiers;
use serde::{Deserialize, Serialize};

/// Image names for the hand overlay.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HandImages {
    pub left_home: String,
    pub right_home: String,
    pub left_shift: String,
    pub right_shift: String,
}

impl Default for HandImages {
    fn default() -> Self {
        Self {
            left_home: "OLPC_Lhand_HOMEROW.svg".to_string(),
            right_home: "OLPC_Rhand_HOMEROW.svg".to_string(),
            left_shift: "OLPC_Lhand_SHIFT.svg".to_string(),
            right_shift: "OLPC_Rhand_SHIFT.svg".to_string(),
        }
    }
}

/// What each hand should show while the learner looks for the next letter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HandHint {
    pub left_image: String,
    pub right_image: String,
    pub finger: Option<Finger>,
    pub modifiers: Modifiers,
}

impl HandHint {
    pub fn resting(images: &HandImages) -> Self {
        Self {
            left_image: images.left_home.clone(),
            right_image: images.right_home.clone(),
            finger: None,
            modifiers: Modifiers::NONE,
        }
    }

    /// Hands at rest, except the finger for `letter`, and the other hand on
    /// SHIFT when the letter needs it.
    pub fn for_letter<K: PlatformKeymap + ?Sized>(
        engine: &KeyboardEngine,
        letter: char,
        keymap: &K,
        images: &HandImages,
    ) -> Self {
        let mut hint = Self::resting(images);

        let Some(found) = engine.key_for_char(letter, keymap) else {
            return hint;
        };
        hint.modifiers = found.modifiers;

        let Some(finger) = found.key.finger() else {
            return hint;
        };
        hint.finger = Some(finger);

        if !found.key.hand_image().is_empty() {
            match finger.hand {
                Hand::Left => hint.left_image = found.key.hand_image().to_string(),
                Hand::Right => hint.right_image = found.key.hand_image().to_string(),
            }
        }

        // TODO: show something for ALTGR once there are hand images for it.
        if found.modifiers.contains(Modifiers::SHIFT) {
            match finger.hand.other() {
                Hand::Left => hint.left_image = images.left_shift.clone(),
                Hand::Right => hint.right_image = images.right_shift.clone(),
            }
        }

        hint
    }
}
