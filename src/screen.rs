use crate::engine::ResolvedKey;
use crate::error::TkResult;
use crate::keysig::ScanCode;
use serde::Serialize;
use std::io;

/// A key's rectangle in screen pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ScreenKey {
    pub group_index: usize,
    pub key_index: usize,
    pub scan_code: ScanCode,
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl ScreenKey {
    pub fn contains(&self, px: i32, py: i32) -> bool {
        px >= self.x && px < self.x + self.width && py >= self.y && py < self.y + self.height
    }
}

fn ratio(screen: u32, layout: f32) -> f32 {
    if layout > 0.0 {
        screen as f32 / layout
    } else {
        0.0
    }
}

/// Scales layout coordinates to a `width` x `height` image, truncating to
/// whole pixels. Each key uses its own inherited layout dimensions.
pub fn scale_key(key: &ResolvedKey, width: u32, height: u32) -> ScreenKey {
    let sx = ratio(width, key.props.layout_width);
    let sy = ratio(height, key.props.layout_height);
    ScreenKey {
        group_index: key.group_index,
        key_index: key.key_index,
        scan_code: key.scan_code(),
        x: (key.x * sx) as i32,
        y: (key.y * sy) as i32,
        width: (key.width * sx) as i32,
        height: (key.height * sy) as i32,
    }
}

pub fn scale_keys(keys: &[ResolvedKey], width: u32, height: u32) -> Vec<ScreenKey> {
    keys.iter().map(|k| scale_key(k, width, height)).collect()
}

/// The key under a screen point, if any.
pub fn hit_test(keys: &[ScreenKey], px: i32, py: i32) -> Option<&ScreenKey> {
    keys.iter().find(|k| k.contains(px, py))
}

/// Writes one CSV row per key, with a header.
pub fn write_csv<W: io::Write>(keys: &[ScreenKey], writer: W) -> TkResult<()> {
    let mut wtr = csv::Writer::from_writer(writer);
    for key in keys {
        wtr.serialize(key)?;
    }
    wtr.flush()?;
    Ok(())
}
