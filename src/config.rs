use crate::error::{TkResult, TurtleError};
use crate::keymap::LevelModifiers;
use crate::keysig::ScanCode;
use crate::tracker::KeyTracker;
use clap::{parser::ValueSource, ArgMatches, Args};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

#[derive(Args, Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Scan codes of the SHIFT keys, comma separated.
    #[arg(long, default_value = "50,62")]
    pub shift_scans: String,

    /// Scan codes of the ALTGR keys, comma separated.
    #[arg(long, default_value = "92")]
    pub altgr_scans: String,

    /// Bit of the platform shift level that means SHIFT.
    #[arg(long, default_value_t = 0)]
    pub level_shift_bit: u8,

    /// Bit of the platform shift level that means ALTGR.
    #[arg(long, default_value_t = 1)]
    pub level_altgr_bit: u8,

    #[arg(long, default_value_t = 800)]
    pub screen_width: u32,
    #[arg(long, default_value_t = 400)]
    pub screen_height: u32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            shift_scans: "50,62".to_string(),
            altgr_scans: "92".to_string(),
            level_shift_bit: 0,
            level_altgr_bit: 1,
            screen_width: 800,
            screen_height: 400,
        }
    }
}

impl EngineConfig {
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> TkResult<Self> {
        let content = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }

    pub fn get_shift_scans(&self) -> TkResult<Vec<ScanCode>> {
        parse_scan_list(&self.shift_scans, "shift_scans")
    }

    pub fn get_altgr_scans(&self) -> TkResult<Vec<ScanCode>> {
        parse_scan_list(&self.altgr_scans, "altgr_scans")
    }

    pub fn levels(&self) -> TkResult<LevelModifiers> {
        if self.level_shift_bit >= 8 || self.level_altgr_bit >= 8 {
            return Err(TurtleError::Config(format!(
                "Level bits must be below 8 (shift={}, altgr={})",
                self.level_shift_bit, self.level_altgr_bit
            )));
        }
        if self.level_shift_bit == self.level_altgr_bit {
            return Err(TurtleError::Config(
                "SHIFT and ALTGR cannot share a level bit".to_string(),
            ));
        }
        Ok(LevelModifiers::from_bits(
            self.level_shift_bit,
            self.level_altgr_bit,
        ))
    }

    pub fn tracker(&self) -> TkResult<KeyTracker> {
        Ok(KeyTracker::new(
            self.get_shift_scans()?,
            self.get_altgr_scans()?,
        ))
    }

    /// Copies values the user typed on the command line over this config.
    pub fn merge_from_cli(&mut self, cli: &EngineConfig, matches: &ArgMatches) {
        macro_rules! update_if_present {
            ($field:ident, $arg_name:expr) => {
                if matches.value_source($arg_name) == Some(ValueSource::CommandLine) {
                    self.$field = cli.$field.clone();
                }
            };
        }

        update_if_present!(shift_scans, "shift_scans");
        update_if_present!(altgr_scans, "altgr_scans");
        update_if_present!(level_shift_bit, "level_shift_bit");
        update_if_present!(level_altgr_bit, "level_altgr_bit");
        update_if_present!(screen_width, "screen_width");
        update_if_present!(screen_height, "screen_height");
    }
}

fn parse_scan_list(s: &str, name: &str) -> TkResult<Vec<ScanCode>> {
    s.split(',')
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .map(|p| {
            p.parse::<ScanCode>().map_err(|_| {
                TurtleError::Config(format!("Invalid scan code '{}' in {}", p, name))
            })
        })
        .collect()
}
