use serde::{Deserialize, Serialize};

use crate::error::XrCommonError;

/// Colors cycled through when a chart has no explicit color scheme
pub const DEFAULT_PALETTE: [&str; 6] = ["red", "green", "blue", "yellow", "magenta", "cyan"];

/// Check that a string is a CSS color (named, hex, rgb(), hsl(), ...)
pub fn validate_color(color: &str) -> Result<(), XrCommonError> {
    csscolorparser::parse(color)
        .map(|_| ())
        .map_err(|err| XrCommonError::InvalidColor(color.to_string(), err))
}

/// A finite, non-empty list of colors indexed cyclically.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<String>", into = "Vec<String>")]
pub struct ColorPalette {
    colors: Vec<String>,
}

impl ColorPalette {
    pub fn try_new(colors: Vec<String>) -> Result<Self, XrCommonError> {
        if colors.is_empty() {
            return Err(XrCommonError::EmptyPalette);
        }
        for color in &colors {
            validate_color(color)?;
        }
        Ok(Self { colors })
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    /// Color for the n-th item, wrapping around the palette
    pub fn color_at(&self, index: usize) -> &str {
        &self.colors[index % self.colors.len()]
    }

    pub fn colors(&self) -> &[String] {
        &self.colors
    }
}

impl Default for ColorPalette {
    fn default() -> Self {
        Self {
            colors: DEFAULT_PALETTE.iter().map(|c| c.to_string()).collect(),
        }
    }
}

impl TryFrom<Vec<String>> for ColorPalette {
    type Error = XrCommonError;

    fn try_from(value: Vec<String>) -> Result<Self, Self::Error> {
        Self::try_new(value)
    }
}

impl From<ColorPalette> for Vec<String> {
    fn from(value: ColorPalette) -> Self {
        value.colors
    }
}
