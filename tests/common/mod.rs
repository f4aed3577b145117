#![allow(dead_code)]

use turtlekeys::geometry::{GroupDescription, KeyDescription, KeyProps, LayoutDescription};
use turtlekeys::keysig::ScanCode;

pub fn key(scan: ScanCode) -> KeyDescription {
    KeyDescription::with_scan(scan)
}

pub fn labelled(scan: ScanCode, label: &str) -> KeyDescription {
    let mut k = KeyDescription::with_label(label);
    k.props.key_scan = Some(scan);
    k
}

pub fn group(layout: &str, x: f32, y: f32, keys: Vec<KeyDescription>) -> GroupDescription {
    GroupDescription {
        props: KeyProps {
            group_layout: Some(layout.to_string().into()),
            group_x: Some(x),
            group_y: Some(y),
            ..Default::default()
        },
        keys,
    }
}

/// 10x10 keys with a gap of 2, no groups yet.
pub fn base_layout(groups: Vec<GroupDescription>) -> LayoutDescription {
    LayoutDescription {
        props: KeyProps {
            layout_name: Some("test".to_string()),
            layout_width: Some(200.0),
            layout_height: Some(100.0),
            key_width: Some(10.0),
            key_height: Some(10.0),
            key_gap: Some(2.0),
            ..Default::default()
        },
        groups,
    }
}

/// A small keyboard: a row of letters, an enter key and a shift key.
///
/// Scan codes follow the XO: 38 = a, 39 = s, 36 = enter, 50 = left shift.
pub fn mini_keyboard() -> LayoutDescription {
    base_layout(vec![
        group("horizontal", 0.0, 0.0, vec![key(38), key(39), labelled(36, "enter")]),
        group("horizontal", 0.0, 20.0, vec![labelled(50, "shift")]),
    ])
}
