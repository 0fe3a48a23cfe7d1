use crate::report::style::{Color, PageSize, ReportStyle, TableStyle};
use crate::utils::error::{ReportError, Result};
use crate::utils::validation::{validate_hex_color, validate_non_empty_string, validate_range};
use regex::{Captures, Regex};
use serde::Deserialize;
use std::path::Path;
use std::sync::OnceLock;

/// Optional report style overrides, read from TOML. Absent keys keep the
/// default look.
///
/// ```toml
/// [document]
/// title = "Q3 Sales"
/// page_size = "a4"
///
/// [table]
/// header_background = "#1F3A5F"
/// body_font_size = 9
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StyleConfig {
    #[serde(default)]
    pub document: DocumentSection,
    #[serde(default)]
    pub table: TableSection,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DocumentSection {
    pub title: Option<String>,
    pub page_size: Option<String>,
    pub margin: Option<f32>,
    pub title_font_size: Option<f32>,
    pub heading_font_size: Option<f32>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TableSection {
    pub header_background: Option<String>,
    pub header_text: Option<String>,
    pub body_background: Option<String>,
    pub body_text: Option<String>,
    pub grid_color: Option<String>,
    pub grid_width: Option<f32>,
    pub header_font_size: Option<f32>,
    pub raw_header_font_size: Option<f32>,
    pub body_font_size: Option<f32>,
    pub header_bottom_padding: Option<f32>,
    pub cell_padding: Option<f32>,
    pub min_column_width: Option<f32>,
    pub repeat_header: Option<bool>,
}

impl StyleConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed = substitute_env_vars(content);
        toml::from_str(&processed).map_err(|e| ReportError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Validates the overrides and merges them over the default style.
    pub fn into_style(self) -> Result<ReportStyle> {
        let defaults = ReportStyle::default();
        let document = self.document;
        let table = self.table;

        let title = match document.title {
            Some(title) => {
                validate_non_empty_string("document.title", &title)?;
                title
            }
            None => defaults.title.clone(),
        };

        let page_size = match document.page_size {
            Some(name) => PageSize::from_name(&name).ok_or_else(|| {
                ReportError::InvalidConfigValueError {
                    field: "document.page_size".to_string(),
                    value: name.clone(),
                    reason: "Supported page sizes: letter, a4".to_string(),
                }
            })?,
            None => defaults.page_size,
        };

        let margin = size_or("document.margin", document.margin, defaults.margin, 0.0, 144.0)?;
        let title_font_size = size_or(
            "document.title_font_size",
            document.title_font_size,
            defaults.title_font_size,
            6.0,
            72.0,
        )?;
        let heading_font_size = size_or(
            "document.heading_font_size",
            document.heading_font_size,
            defaults.heading_font_size,
            6.0,
            48.0,
        )?;

        let base = &defaults.table;
        let table_style = TableStyle {
            header_background: color_or(
                "table.header_background",
                table.header_background.as_deref(),
                base.header_background,
            )?,
            header_text: color_or(
                "table.header_text",
                table.header_text.as_deref(),
                base.header_text,
            )?,
            body_background: color_or(
                "table.body_background",
                table.body_background.as_deref(),
                base.body_background,
            )?,
            body_text: color_or("table.body_text", table.body_text.as_deref(), base.body_text)?,
            grid_color: color_or("table.grid_color", table.grid_color.as_deref(), base.grid_color)?,
            grid_width: size_or("table.grid_width", table.grid_width, base.grid_width, 0.0, 5.0)?,
            header_font_size: size_or(
                "table.header_font_size",
                table.header_font_size,
                base.header_font_size,
                4.0,
                36.0,
            )?,
            body_font_size: size_or(
                "table.body_font_size",
                table.body_font_size,
                base.body_font_size,
                4.0,
                36.0,
            )?,
            header_bottom_padding: size_or(
                "table.header_bottom_padding",
                table.header_bottom_padding,
                base.header_bottom_padding,
                0.0,
                36.0,
            )?,
            cell_padding: size_or(
                "table.cell_padding",
                table.cell_padding,
                base.cell_padding,
                0.0,
                36.0,
            )?,
            min_column_width: size_or(
                "table.min_column_width",
                table.min_column_width,
                base.min_column_width,
                0.0,
                288.0,
            )?,
            repeat_header: table.repeat_header.unwrap_or(base.repeat_header),
        };
        let raw_header_font_size = size_or(
            "table.raw_header_font_size",
            table.raw_header_font_size,
            defaults.raw_table.header_font_size,
            4.0,
            36.0,
        )?;

        Ok(ReportStyle {
            title,
            page_size,
            margin,
            title_font_size,
            heading_font_size,
            raw_table: table_style.with_header_font_size(raw_header_font_size),
            table: table_style,
            ..defaults
        })
    }
}

fn size_or(field: &str, value: Option<f32>, default: f32, min: f32, max: f32) -> Result<f32> {
    match value {
        Some(value) => {
            validate_range(field, value, min, max)?;
            Ok(value)
        }
        None => Ok(default),
    }
}

fn color_or(field: &str, value: Option<&str>, default: Color) -> Result<Color> {
    match value {
        Some(value) => {
            validate_hex_color(field, value)?;
            Color::from_hex(value).ok_or_else(|| ReportError::InvalidConfigValueError {
                field: field.to_string(),
                value: value.to_string(),
                reason: "Expected a color in #RRGGBB form".to_string(),
            })
        }
        None => Ok(default),
    }
}

/// Replaces `${VAR}` with the environment value; unknown variables are left as written.
fn substitute_env_vars(content: &str) -> String {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    let re = PATTERN.get_or_init(|| Regex::new(r"\$\{([^}]+)\}").expect("valid env var regex"));

    re.replace_all(content, |caps: &Captures| {
        let var_name = &caps[1];
        std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
    })
    .into_owned()
}
