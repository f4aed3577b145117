use crate::engine::KeyboardEngine;
use crate::keysig::{Modifiers, ScanCode};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyEventKind {
    Press,
    Release,
}

/// A raw key event as delivered by the input layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyEvent {
    pub scan_code: ScanCode,
    pub kind: KeyEventKind,
    /// Modifiers the platform reported on the event.
    pub modifiers: Modifiers,
    pub group: u8,
    /// Character the event produced, if any.
    pub text: Option<char>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TrackOutcome {
    /// Live modifiers or group changed; key captions need redrawing.
    pub state_changed: bool,
    /// A new letter was added to the letter map.
    pub learned: bool,
    /// The pressed flag of a key changed.
    pub key_changed: bool,
}

/// Follows press/release events to keep the live modifier state and input
/// group, and teaches the engine's letter map what each key produced.
///
/// Platforms report the modifiers held *before* the event, so pressing SHIFT
/// itself does not show up until the next event. The tracker folds the
/// configured modifier keys in as they go down and up.
#[derive(Debug, Clone)]
pub struct KeyTracker {
    shift_scans: Vec<ScanCode>,
    altgr_scans: Vec<ScanCode>,
    modifiers: Modifiers,
    group: u8,
}

impl Default for KeyTracker {
    fn default() -> Self {
        Self::new(vec![50, 62], vec![92])
    }
}

impl KeyTracker {
    pub fn new(shift_scans: Vec<ScanCode>, altgr_scans: Vec<ScanCode>) -> Self {
        Self {
            shift_scans,
            altgr_scans,
            modifiers: Modifiers::NONE,
            group: 0,
        }
    }

    pub fn modifiers(&self) -> Modifiers {
        self.modifiers
    }

    pub fn group(&self) -> u8 {
        self.group
    }

    fn effective_modifiers(&self, event: &KeyEvent) -> Modifiers {
        let mut state = event.modifiers;
        let pressed = event.kind == KeyEventKind::Press;

        for (scans, bit) in [
            (&self.shift_scans, Modifiers::SHIFT),
            (&self.altgr_scans, Modifiers::ALTGR),
        ] {
            if scans.contains(&event.scan_code) {
                state = if pressed {
                    state | bit
                } else {
                    state.without(bit)
                };
            }
        }
        state
    }

    pub fn handle(&mut self, engine: &mut KeyboardEngine, event: &KeyEvent) -> TrackOutcome {
        let mut outcome = TrackOutcome {
            key_changed: engine.set_pressed(event.scan_code, event.kind == KeyEventKind::Press),
            ..Default::default()
        };

        let state = self.effective_modifiers(event);
        if state != self.modifiers || event.group != self.group {
            self.modifiers = state;
            self.group = event.group;
            outcome.state_changed = true;
        }

        if let Some(letter) = event.text {
            outcome.learned = engine.record_observed(event.scan_code, state, event.group, letter);
        }

        outcome
    }
}
