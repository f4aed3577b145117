mod common;

use common::{base_layout, group, key, mini_keyboard};
use rstest::rstest;
use turtlekeys::engine::PARAGRAPH_CHAR;
use turtlekeys::keymap::{LevelModifiers, NoKeymap, StaticKeymap};
use turtlekeys::{KeySignature, KeyboardEngine, LetterMap, Modifiers};

fn sig(text: &str) -> KeySignature {
    text.parse().unwrap()
}

fn letters(pairs: &[(&str, char)]) -> LetterMap {
    pairs.iter().map(|(s, c)| (sig(s), *c)).collect()
}

fn engine_with(map: LetterMap) -> KeyboardEngine {
    let mut engine = KeyboardEngine::with_letter_map(map);
    engine.set_layout(&mini_keyboard());
    engine
}

#[rstest]
#[case('\n')]
#[case(PARAGRAPH_CHAR)]
fn test_line_breaks_go_to_enter(#[case] letter: char) {
    // A recorded mapping for the same character must not win over enter.
    let engine = engine_with(letters(&[("scan38 shift", letter)]));
    let hint = engine.key_for_char(letter, &NoKeymap).unwrap();

    assert_eq!(hint.key.scan_code(), 36);
    assert_eq!(hint.modifiers, Modifiers::NONE);
    assert_eq!(hint.group, 0);
}

#[test]
fn test_line_break_without_enter_key_is_absent() {
    let mut engine = KeyboardEngine::new();
    engine.set_layout(&base_layout(vec![group("horizontal", 0.0, 0.0, vec![key(38)])]));
    assert!(engine.key_for_char('\n', &NoKeymap).is_none());
}

#[test]
fn test_fewest_modifiers_wins() {
    let mut engine = KeyboardEngine::with_letter_map(letters(&[
        ("scan5 shift", 'a'),
        ("scan5", 'a'),
        ("scan6 shift altgr", 'a'),
    ]));
    engine.set_layout(&base_layout(vec![group(
        "horizontal",
        0.0,
        0.0,
        vec![key(5), key(6)],
    )]));

    let hint = engine.key_for_char('a', &NoKeymap).unwrap();
    assert_eq!(hint.key.scan_code(), 5);
    assert_eq!(hint.modifiers, Modifiers::NONE);
}

#[test]
fn test_equal_modifier_counts_pick_lowest_signature() {
    let engine = engine_with(letters(&[("scan39 altgr", 'x'), ("scan38 shift", 'x')]));
    let hint = engine.key_for_char('x', &NoKeymap).unwrap();
    assert_eq!(hint.key.scan_code(), 38);
    assert_eq!(hint.modifiers, Modifiers::SHIFT);
}

#[test]
fn test_letters_on_missing_keys_are_skipped() {
    let engine = engine_with(letters(&[("scan200", 'q'), ("scan39 shift", 'q')]));
    let hint = engine.key_for_char('q', &NoKeymap).unwrap();
    assert_eq!(hint.key.scan_code(), 39);
    assert_eq!(hint.modifiers, Modifiers::SHIFT);
}

#[test]
fn test_group_is_carried_through() {
    let engine = engine_with(letters(&[("scan38 group1", 'ф')]));
    let hint = engine.key_for_char('ф', &NoKeymap).unwrap();
    assert_eq!(hint.group, 1);
}

#[test]
fn test_unknown_character_is_absent() {
    let engine = engine_with(LetterMap::new());
    assert!(engine.key_for_char('z', &NoKeymap).is_none());
    assert!(engine.find_key_by_label("nonexistent").is_none());
}

#[rstest]
#[case(0, Modifiers::NONE)]
#[case(1, Modifiers::SHIFT)]
#[case(2, Modifiers::ALTGR)]
#[case(3, Modifiers::SHIFT | Modifiers::ALTGR)]
fn test_keymap_fallback_maps_levels(#[case] level: u8, #[case] modifiers: Modifiers) {
    let engine = engine_with(LetterMap::new());
    let mut keymap = StaticKeymap::new(LevelModifiers::default());
    keymap.add(39, 0, level, 'é');

    let hint = engine.key_for_char('é', &keymap).unwrap();
    assert_eq!(hint.key.scan_code(), 39);
    assert_eq!(hint.modifiers, modifiers);
}

#[test]
fn test_keymap_fallback_uses_configured_levels() {
    let levels = LevelModifiers::from_bits(1, 0);
    let mut engine = KeyboardEngine::with_letter_map(LetterMap::new()).with_levels(levels);
    engine.set_layout(&mini_keyboard());

    let mut keymap = StaticKeymap::new(levels);
    keymap.add(38, 0, 1, 'å');

    let hint = engine.key_for_char('å', &keymap).unwrap();
    assert_eq!(hint.modifiers, Modifiers::ALTGR);
}

#[test]
fn test_keymap_entries_off_the_layout_are_passed_over() {
    let engine = engine_with(LetterMap::new());
    let mut keymap = StaticKeymap::new(LevelModifiers::default());
    keymap.add(120, 0, 0, 'k').add(39, 0, 1, 'k');

    let hint = engine.key_for_char('k', &keymap).unwrap();
    assert_eq!(hint.key.scan_code(), 39);
}

#[test]
fn test_letter_map_beats_keymap() {
    let engine = engine_with(letters(&[("scan38 shift", 'A')]));
    let mut keymap = StaticKeymap::new(LevelModifiers::default());
    keymap.add(39, 0, 0, 'A');

    let hint = engine.key_for_char('A', &keymap).unwrap();
    assert_eq!(hint.key.scan_code(), 38);
}

#[test]
fn test_first_observation_is_kept() {
    let mut engine = engine_with(LetterMap::new());
    assert!(engine.record_observed(38, Modifiers::NONE, 0, 'a'));
    assert!(!engine.record_observed(38, Modifiers::NONE, 0, 'b'));
    assert!(engine.record_observed(38, Modifiers::SHIFT, 0, 'A'));

    let a = engine.key_for_scan(38).unwrap().clone();
    assert_eq!(engine.char_for_key(&a, Modifiers::NONE, 0), Some('a'));
    assert_eq!(engine.char_for_key(&a, Modifiers::SHIFT, 0), Some('A'));
    assert_eq!(engine.char_for_key(&a, Modifiers::ALTGR, 0), None);
    assert_eq!(engine.char_for_key(&a, Modifiers::NONE, 1), None);
}

#[test]
fn test_key_text_prefers_label_then_letter_then_keymap() {
    let engine = engine_with(letters(&[("scan38", 'a')]));
    let mut keymap = StaticKeymap::new(LevelModifiers::default());
    keymap.add(39, 0, 1, 'S');

    let enter = engine.key_for_scan(36).unwrap();
    let a = engine.key_for_scan(38).unwrap();
    let s = engine.key_for_scan(39).unwrap();

    assert_eq!(engine.key_text(enter, Modifiers::SHIFT, 0, &keymap), "enter");
    assert_eq!(engine.key_text(a, Modifiers::NONE, 0, &keymap), "a");
    assert_eq!(engine.key_text(s, Modifiers::SHIFT, 0, &keymap), "S");
    assert_eq!(engine.key_text(s, Modifiers::NONE, 0, &keymap), "");
}

#[test]
fn test_resolve_key_for_signature_ignores_modifiers() {
    let engine = engine_with(LetterMap::new());
    let plain = engine.resolve_key_for_signature(&sig("scan39")).unwrap();
    let shifted = engine
        .resolve_key_for_signature(&sig("scan39 shift altgr group2"))
        .unwrap();

    assert_eq!(plain, shifted);
    assert!(engine.resolve_key_for_signature(&sig("scan7")).is_none());
}

#[test]
fn test_duplicate_scan_codes_resolve_to_the_later_key() {
    let mut engine = KeyboardEngine::new();
    engine.set_layout(&base_layout(vec![
        group("horizontal", 0.0, 0.0, vec![key(3)]),
        group("horizontal", 0.0, 40.0, vec![key(3)]),
    ]));

    assert_eq!(engine.keys().len(), 2);
    let k = engine.key_for_scan(3).unwrap();
    assert_eq!((k.group_index, k.y), (1, 40.0));
}
