use super::finger::{self, Finger};
use super::GroupLayout;
use crate::keysig::ScanCode;
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter, EnumString};

// Defaults applied when neither the key, its group, nor the layout sets a property.
pub const DEFAULT_LAYOUT_WIDTH: f32 = 100.0;
pub const DEFAULT_LAYOUT_HEIGHT: f32 = 100.0;

/// Every property a layout file may set, at any of the three levels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, EnumString, Display)]
#[strum(serialize_all = "kebab-case")]
pub enum PropertyName {
    LayoutName,
    LayoutWidth,
    LayoutHeight,
    GroupName,
    GroupX,
    GroupY,
    GroupLayout,
    KeyX,
    KeyY,
    KeyWidth,
    KeyHeight,
    KeyGap,
    KeyScan,
    KeyLabel,
    KeyHandImage,
    KeyFinger,
    KeyPressed,
}

#[derive(Debug, Clone, PartialEq)]
pub enum PropertyValue {
    Text(String),
    Number(f32),
    Layout(GroupLayout),
    Scan(ScanCode),
    Finger(Option<Finger>),
    Flag(bool),
}

impl PropertyName {
    pub fn default_value(self) -> PropertyValue {
        use PropertyValue as V;
        match self {
            Self::LayoutWidth => V::Number(DEFAULT_LAYOUT_WIDTH),
            Self::LayoutHeight => V::Number(DEFAULT_LAYOUT_HEIGHT),
            Self::GroupX
            | Self::GroupY
            | Self::KeyX
            | Self::KeyY
            | Self::KeyWidth
            | Self::KeyHeight
            | Self::KeyGap => V::Number(0.0),
            Self::LayoutName | Self::GroupName | Self::KeyLabel | Self::KeyHandImage => {
                V::Text(String::new())
            }
            Self::GroupLayout => V::Layout(GroupLayout::Custom),
            Self::KeyScan => V::Scan(0),
            Self::KeyFinger => V::Finger(None),
            Self::KeyPressed => V::Flag(false),
        }
    }
}

/// The property bag carried by layouts, groups and keys alike.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct KeyProps {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub layout_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub layout_width: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub layout_height: Option<f32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group_x: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group_y: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group_layout: Option<GroupLayout>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key_x: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key_y: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key_width: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key_height: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key_gap: Option<f32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key_scan: Option<ScanCode>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key_label: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key_hand_image: Option<String>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "finger::deserialize_optional"
    )]
    pub key_finger: Option<Finger>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key_pressed: Option<bool>,
}

impl KeyProps {
    /// The explicitly set value of `name`, if any.
    pub fn get(&self, name: PropertyName) -> Option<PropertyValue> {
        use PropertyValue as V;
        match name {
            PropertyName::LayoutName => self.layout_name.clone().map(V::Text),
            PropertyName::LayoutWidth => self.layout_width.map(V::Number),
            PropertyName::LayoutHeight => self.layout_height.map(V::Number),
            PropertyName::GroupName => self.group_name.clone().map(V::Text),
            PropertyName::GroupX => self.group_x.map(V::Number),
            PropertyName::GroupY => self.group_y.map(V::Number),
            PropertyName::GroupLayout => self.group_layout.clone().map(V::Layout),
            PropertyName::KeyX => self.key_x.map(V::Number),
            PropertyName::KeyY => self.key_y.map(V::Number),
            PropertyName::KeyWidth => self.key_width.map(V::Number),
            PropertyName::KeyHeight => self.key_height.map(V::Number),
            PropertyName::KeyGap => self.key_gap.map(V::Number),
            PropertyName::KeyScan => self.key_scan.map(V::Scan),
            PropertyName::KeyLabel => self.key_label.clone().map(V::Text),
            PropertyName::KeyHandImage => self.key_hand_image.clone().map(V::Text),
            PropertyName::KeyFinger => self.key_finger.map(|f| V::Finger(Some(f))),
            PropertyName::KeyPressed => self.key_pressed.map(V::Flag),
        }
    }
}

/// Effective property values of one key after inheritance.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedProps {
    pub layout_name: String,
    pub layout_width: f32,
    pub layout_height: f32,
    pub group_name: String,
    pub group_x: f32,
    pub group_y: f32,
    pub group_layout: GroupLayout,
    pub key_x: f32,
    pub key_y: f32,
    pub key_width: f32,
    pub key_height: f32,
    pub key_gap: f32,
    pub key_scan: ScanCode,
    pub key_label: String,
    pub key_hand_image: String,
    pub key_finger: Option<Finger>,
    pub key_pressed: bool,
}

impl Default for ResolvedProps {
    fn default() -> Self {
        Self::inherit(&KeyProps::default(), &KeyProps::default(), &KeyProps::default())
    }
}

impl ResolvedProps {
    /// Key value, else group value, else layout value, else the default.
    pub fn inherit(key: &KeyProps, group: &KeyProps, layout: &KeyProps) -> Self {
        macro_rules! cascade {
            ($field:ident, $default:expr) => {
                key.$field
                    .clone()
                    .or_else(|| group.$field.clone())
                    .or_else(|| layout.$field.clone())
                    .unwrap_or($default)
            };
        }

        Self {
            layout_name: cascade!(layout_name, String::new()),
            layout_width: cascade!(layout_width, DEFAULT_LAYOUT_WIDTH),
            layout_height: cascade!(layout_height, DEFAULT_LAYOUT_HEIGHT),
            group_name: cascade!(group_name, String::new()),
            group_x: cascade!(group_x, 0.0),
            group_y: cascade!(group_y, 0.0),
            group_layout: cascade!(group_layout, GroupLayout::Custom),
            key_x: cascade!(key_x, 0.0),
            key_y: cascade!(key_y, 0.0),
            key_width: cascade!(key_width, 0.0),
            key_height: cascade!(key_height, 0.0),
            key_gap: cascade!(key_gap, 0.0),
            key_scan: cascade!(key_scan, 0),
            key_label: cascade!(key_label, String::new()),
            key_hand_image: cascade!(key_hand_image, String::new()),
            key_finger: key.key_finger.or(group.key_finger).or(layout.key_finger),
            key_pressed: cascade!(key_pressed, false),
        }
    }

    pub fn get(&self, name: PropertyName) -> PropertyValue {
        use PropertyValue as V;
        match name {
            PropertyName::LayoutName => V::Text(self.layout_name.clone()),
            PropertyName::LayoutWidth => V::Number(self.layout_width),
            PropertyName::LayoutHeight => V::Number(self.layout_height),
            PropertyName::GroupName => V::Text(self.group_name.clone()),
            PropertyName::GroupX => V::Number(self.group_x),
            PropertyName::GroupY => V::Number(self.group_y),
            PropertyName::GroupLayout => V::Layout(self.group_layout.clone()),
            PropertyName::KeyX => V::Number(self.key_x),
            PropertyName::KeyY => V::Number(self.key_y),
            PropertyName::KeyWidth => V::Number(self.key_width),
            PropertyName::KeyHeight => V::Number(self.key_height),
            PropertyName::KeyGap => V::Number(self.key_gap),
            PropertyName::KeyScan => V::Scan(self.key_scan),
            PropertyName::KeyLabel => V::Text(self.key_label.clone()),
            PropertyName::KeyHandImage => V::Text(self.key_hand_image.clone()),
            PropertyName::KeyFinger => V::Finger(self.key_finger),
            PropertyName::KeyPressed => V::Flag(self.key_pressed),
        }
    }
}
