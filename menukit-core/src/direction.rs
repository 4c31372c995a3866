// SPDX-License-Identifier: MIT OR Apache-2.0
use serde::Deserialize;

/// The axis a menu container lays its items out on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    /// Items flow left to right (or right to left). Menubars use this.
    Horizontal,
    /// Items flow top to bottom. Popup menus use this.
    #[default]
    Vertical,
}

impl Orientation {
    /// Returns if the orientation is horizontal.
    pub fn is_horizontal(&self) -> bool {
        matches!(self, Orientation::Horizontal)
    }

    /// The value for `aria-orientation`.
    pub fn as_str(&self) -> &'static str {
        match self {
            Orientation::Horizontal => "horizontal",
            Orientation::Vertical => "vertical",
        }
    }
}

/// Reading direction of the surrounding application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextDirection {
    /// Left-to-right.
    #[default]
    Ltr,
    /// Right-to-left.
    Rtl,
}

impl TextDirection {
    /// Returns if this direction is right-to-left.
    pub fn is_rtl(&self) -> bool {
        matches!(self, TextDirection::Rtl)
    }
}
