//! Global style directives: palette, fonts, rule colours and page geometry.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// A named colour in the RGB model (0–255 per channel).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColorDef {
    pub name: String,
    pub rgb: (u8, u8, u8),
}

impl ColorDef {
    pub fn rgb(name: impl Into<String>, r: u8, g: u8, b: u8) -> Self {
        Self {
            name: name.into(),
            rgb: (r, g, b),
        }
    }
}

/// Page margins. Values are TeX dimensions (`"2.5cm"`), passed through as-is.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Geometry {
    pub top: String,
    pub bottom: String,
    pub left: String,
    pub right: String,
    /// Distance between the header area and the body.
    pub headsep: String,
}

/// Document-wide style. Colour fields refer to names in `palette`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StyleSheet {
    pub palette: Vec<ColorDef>,
    pub main_font: Option<String>,
    pub section_color: Option<String>,
    /// Subtitle colour.
    pub accent_color: Option<String>,
    pub table_rule_color: Option<String>,
    /// Background of `Column::Label` cells.
    pub label_column_color: Option<String>,
    pub row_stretch: f32,
    pub zero_parindent: bool,
    pub geometry: Option<Geometry>,
    /// Drawn faded across the top of every page.
    pub header_image: Option<PathBuf>,
}

impl Default for StyleSheet {
    fn default() -> Self {
        Self {
            palette: Vec::new(),
            main_font: None,
            section_color: None,
            accent_color: None,
            table_rule_color: None,
            label_column_color: None,
            row_stretch: 1.0,
            zero_parindent: false,
            geometry: None,
            header_image: None,
        }
    }
}

impl StyleSheet {
    #[allow(dead_code)]
    pub fn color(&self, name: &str) -> Option<&ColorDef> {
        self.palette.iter().find(|c| c.name == name)
    }
}
