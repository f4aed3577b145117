use comfy_table::presets::ASCII_FULL;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};
use turtlekeys::engine::KeyboardEngine;
use turtlekeys::hands::HandHint;
use turtlekeys::keymap::PlatformKeymap;
use turtlekeys::keysig::{KeySignature, Modifiers};
use turtlekeys::screen::ScreenKey;

fn new_table() -> Table {
    let mut table = Table::new();
    table
        .load_preset(ASCII_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);
    table
}

fn right_align(table: &mut Table, cols: std::ops::RangeInclusive<usize>) {
    for i in cols {
        if let Some(col) = table.column_mut(i) {
            col.set_cell_alignment(CellAlignment::Right);
        }
    }
}

fn show_char(c: char) -> String {
    match c {
        '\n' => "\\n".to_string(),
        ' ' => "space".to_string(),
        c => c.to_string(),
    }
}

pub fn print_key_table<K: PlatformKeymap>(
    engine: &KeyboardEngine,
    keymap: &K,
    modifiers: Modifiers,
    group: u8,
    screen: Option<&[ScreenKey]>,
) {
    let mut table = new_table();
    table.add_row(vec![
        Cell::new("Group").add_attribute(Attribute::Bold),
        Cell::new("#"),
        Cell::new("Scan"),
        Cell::new("Text").fg(Color::Cyan),
        Cell::new("Finger"),
        Cell::new("X"),
        Cell::new("Y"),
        Cell::new("W"),
        Cell::new("H"),
    ]);
    right_align(&mut table, 1..=8);

    for (i, k) in engine.keys().iter().enumerate() {
        let text = engine.key_text(k, modifiers, group, keymap);
        let finger = k.finger().map(|f| f.to_string()).unwrap_or_default();
        let scan = if k.scan_code() == 0 {
            "-".to_string()
        } else {
            k.scan_code().to_string()
        };

        let (x, y, w, h) = match screen.and_then(|s| s.get(i)) {
            Some(sk) => (
                sk.x.to_string(),
                sk.y.to_string(),
                sk.width.to_string(),
                sk.height.to_string(),
            ),
            None => (
                format!("{:.0}", k.x),
                format!("{:.0}", k.y),
                format!("{:.0}", k.width),
                format!("{:.0}", k.height),
            ),
        };

        table.add_row(vec![
            Cell::new(&k.props.group_name).add_attribute(Attribute::Bold),
            Cell::new(k.key_index),
            Cell::new(scan),
            Cell::new(text).fg(Color::Cyan),
            Cell::new(finger),
            Cell::new(x),
            Cell::new(y),
            Cell::new(w),
            Cell::new(h),
        ]);
    }
    println!("{}", table);
}

pub fn print_hints(rows: &[(char, Option<(KeySignature, String)>, HandHint)]) {
    let mut table = new_table();
    table.add_row(vec![
        Cell::new("Char").add_attribute(Attribute::Bold),
        Cell::new("Signature").fg(Color::Cyan),
        Cell::new("Key"),
        Cell::new("Finger"),
        Cell::new("Left hand"),
        Cell::new("Right hand"),
    ]);

    for (c, found, hint) in rows {
        let (sig, label) = match found {
            Some((sig, label)) => (sig.to_string(), label.clone()),
            None => ("-".to_string(), String::new()),
        };
        let sig_cell = if found.is_some() {
            Cell::new(sig).fg(Color::Cyan)
        } else {
            Cell::new(sig).fg(Color::Red)
        };

        table.add_row(vec![
            Cell::new(show_char(*c)).add_attribute(Attribute::Bold),
            sig_cell,
            Cell::new(label),
            Cell::new(hint.finger.map(|f| f.to_string()).unwrap_or_default()),
            Cell::new(&hint.left_image),
            Cell::new(&hint.right_image),
        ]);
    }
    println!("{}", table);
}

pub fn print_letters(engine: &KeyboardEngine) {
    let mut table = new_table();
    table.add_row(vec![
        Cell::new("Signature").add_attribute(Attribute::Bold),
        Cell::new("Letter").fg(Color::Cyan),
        Cell::new("Group"),
        Cell::new("#"),
    ]);
    right_align(&mut table, 3..=3);

    let mut unplaced = 0;
    for (sig, c) in engine.letter_map().sorted() {
        let (group, index) = match engine.resolve_key_for_signature(&sig) {
            Some(k) => (k.props.group_name.clone(), k.key_index.to_string()),
            None => {
                unplaced += 1;
                ("-".to_string(), "-".to_string())
            }
        };
        table.add_row(vec![
            Cell::new(sig.to_string()).add_attribute(Attribute::Bold),
            Cell::new(show_char(c)).fg(Color::Cyan),
            Cell::new(group),
            Cell::new(index),
        ]);
    }
    println!("{}", table);
    println!(
        "{} letters, {} on keys missing from the layout",
        engine.letter_map().len(),
        unplaced
    );
}
