pub mod finger;
pub mod props;

pub use self::finger::{Digit, Finger, Hand};
pub use self::props::{KeyProps, PropertyName, PropertyValue, ResolvedProps};

use crate::error::TkResult;
use crate::keysig::ScanCode;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::Path;
use std::str::FromStr;

const OLPC_LAYOUT_JSON: &str = include_str!("../data/layouts/olpc.json");

/// How a group places its keys.
///
/// Unrecognized names are kept verbatim in `Other` so that a typo in a layout
/// file leaves the group's keys at the group origin instead of failing the load.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum GroupLayout {
    Horizontal,
    Vertical,
    #[default]
    Custom,
    Other(String),
}

impl GroupLayout {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Horizontal => "horizontal",
            Self::Vertical => "vertical",
            Self::Custom => "custom",
            Self::Other(name) => name,
        }
    }
}

impl fmt::Display for GroupLayout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for GroupLayout {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "horizontal" => Self::Horizontal,
            "vertical" => Self::Vertical,
            "custom" => Self::Custom,
            other => Self::Other(other.to_string()),
        })
    }
}

impl From<String> for GroupLayout {
    fn from(s: String) -> Self {
        match s.parse() {
            Ok(layout) => layout,
            Err(never) => match never {},
        }
    }
}

impl From<GroupLayout> for String {
    fn from(layout: GroupLayout) -> Self {
        layout.as_str().to_string()
    }
}

/// A single key record. Every property is optional and falls back to the
/// owning group, then the layout, then the property default.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct KeyDescription {
    #[serde(flatten)]
    pub props: KeyProps,
}

impl KeyDescription {
    pub fn with_scan(scan: ScanCode) -> Self {
        Self {
            props: KeyProps {
                key_scan: Some(scan),
                ..Default::default()
            },
        }
    }

    pub fn with_label(label: &str) -> Self {
        Self {
            props: KeyProps {
                key_label: Some(label.to_string()),
                ..Default::default()
            },
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GroupDescription {
    #[serde(flatten)]
    pub props: KeyProps,
    #[serde(default)]
    pub keys: Vec<KeyDescription>,
}

/// Declarative keyboard description: Layout -> Groups -> Keys.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LayoutDescription {
    #[serde(flatten)]
    pub props: KeyProps,
    #[serde(default)]
    pub groups: Vec<GroupDescription>,
}

impl LayoutDescription {
    pub fn from_json_str(content: &str) -> TkResult<Self> {
        Ok(serde_json::from_str(content)?)
    }

    pub fn load_from_file<P: AsRef<Path>>(path: P) -> TkResult<Self> {
        let content = fs::read_to_string(path)?;
        Self::from_json_str(&content)
    }

    pub fn key_count(&self) -> usize {
        self.groups.iter().map(|g| g.keys.len()).sum()
    }
}

/// The XO-1 membrane keyboard, shipped with the crate.
pub fn olpc_layout() -> LayoutDescription {
    match LayoutDescription::from_json_str(OLPC_LAYOUT_JSON) {
        Ok(layout) => layout,
        Err(e) => panic!("embedded OLPC layout is corrupt: {}", e),
    }
}
