/// An sRGB color with 8-bit channels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const BLACK: Color = Color::rgb(0x00, 0x00, 0x00);
    pub const GREY: Color = Color::rgb(0x80, 0x80, 0x80);
    pub const WHITE_SMOKE: Color = Color::rgb(0xF5, 0xF5, 0xF5);
    pub const BEIGE: Color = Color::rgb(0xF5, 0xF5, 0xDC);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parses `#RRGGBB` (the leading `#` is optional).
    pub fn from_hex(value: &str) -> Option<Self> {
        let hex = value.trim().trim_start_matches('#');
        if hex.len() != 6 || !hex.is_ascii() {
            return None;
        }
        let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
        Some(Self::rgb(channel(0)?, channel(2)?, channel(4)?))
    }

    /// Channels scaled to `0.0..=1.0`.
    pub fn to_unit(self) -> (f32, f32, f32) {
        (
            f32::from(self.r) / 255.0,
            f32::from(self.g) / 255.0,
            f32::from(self.b) / 255.0,
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageSize {
    Letter,
    A4,
}

impl PageSize {
    /// Width and height in points.
    pub fn dimensions(self) -> (f32, f32) {
        match self {
            PageSize::Letter => (612.0, 792.0),
            PageSize::A4 => (595.28, 841.89),
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "letter" => Some(PageSize::Letter),
            "a4" => Some(PageSize::A4),
            _ => None,
        }
    }
}

/// Presentation shared by every table in the report.
#[derive(Debug, Clone, PartialEq)]
pub struct TableStyle {
    pub header_background: Color,
    pub header_text: Color,
    pub body_background: Color,
    pub body_text: Color,
    pub grid_color: Color,
    pub grid_width: f32,
    pub header_font_size: f32,
    pub body_font_size: f32,
    pub header_bottom_padding: f32,
    pub cell_padding: f32,
    pub min_column_width: f32,
    /// Repeat the header row at the top of each continuation page.
    pub repeat_header: bool,
}

impl Default for TableStyle {
    fn default() -> Self {
        Self {
            header_background: Color::GREY,
            header_text: Color::WHITE_SMOKE,
            body_background: Color::BEIGE,
            body_text: Color::BLACK,
            grid_color: Color::BLACK,
            grid_width: 1.0,
            header_font_size: 14.0,
            body_font_size: 10.0,
            header_bottom_padding: 12.0,
            cell_padding: 6.0,
            min_column_width: 72.0,
            repeat_header: true,
        }
    }
}

impl TableStyle {
    pub fn with_header_font_size(&self, size: f32) -> Self {
        Self {
            header_font_size: size,
            ..self.clone()
        }
    }
}

/// Everything the layout needs to know about presentation. Built once, read-only.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportStyle {
    pub title: String,
    pub page_size: PageSize,
    pub margin: f32,
    pub title_font_size: f32,
    pub title_space_after: f32,
    pub heading_font_size: f32,
    pub text_color: Color,
    pub table: TableStyle,
    pub raw_table: TableStyle,
}

impl Default for ReportStyle {
    fn default() -> Self {
        let table = TableStyle::default();
        Self {
            title: "Sales Data Analysis Report".to_string(),
            page_size: PageSize::Letter,
            margin: 72.0,
            title_font_size: 18.0,
            title_space_after: 30.0,
            heading_font_size: 14.0,
            text_color: Color::BLACK,
            raw_table: table.with_header_font_size(12.0),
            table,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_from_hex() {
        assert_eq!(Color::from_hex("#808080"), Some(Color::GREY));
        assert_eq!(Color::from_hex("f5f5dc"), Some(Color::BEIGE));
        assert_eq!(Color::from_hex("#12345"), None);
        assert_eq!(Color::from_hex("#zzzzzz"), None);
    }

    #[test]
    fn test_default_style_matches_report_look() {
        let style = ReportStyle::default();
        assert_eq!(style.page_size.dimensions(), (612.0, 792.0));
        assert_eq!(style.table.header_font_size, 14.0);
        assert_eq!(style.raw_table.header_font_size, 12.0);
        assert_eq!(style.raw_table.header_background, style.table.header_background);
    }
}
