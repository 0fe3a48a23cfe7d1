//! Flows report blocks onto fixed-size pages.
//!
//! Coordinates are PDF points with the origin at the bottom-left corner of
//! the page. The output is a plain [`Document`] that any backend can paint.

use super::metrics::text_width;
use super::style::{Color, ReportStyle, TableStyle};

const LEADING: f32 = 1.2;
const CELL_VERTICAL_PADDING: f32 = 3.0;
const HEADING_SPACE_AFTER: f32 = 6.0;
/// Baseline offset above the bottom padding, roughly the descender depth.
const DESCENT: f32 = 0.2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FontFace {
    Regular,
    Bold,
}

#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    FillRect {
        x: f32,
        y: f32,
        width: f32,
        height: f32,
        color: Color,
    },
    StrokeRect {
        x: f32,
        y: f32,
        width: f32,
        height: f32,
        color: Color,
        line_width: f32,
    },
    Text {
        text: String,
        x: f32,
        y: f32,
        size: f32,
        font: FontFace,
        color: Color,
    },
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Page {
    pub ops: Vec<DrawOp>,
}

impl Page {
    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.ops.iter().filter_map(|op| match op {
            DrawOp::Text { text, .. } => Some(text.as_str()),
            _ => None,
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    pub width: f32,
    pub height: f32,
    pub pages: Vec<Page>,
}

impl Document {
    /// All text runs in paint order, page by page.
    pub fn text_lines(&self) -> Vec<&str> {
        self.pages.iter().flat_map(|page| page.texts()).collect()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Block<'a> {
    Title(String),
    Heading(String),
    Spacer(f32),
    /// Row 0 is drawn as the header row.
    Table {
        rows: Vec<Vec<String>>,
        style: &'a TableStyle,
    },
}

pub struct LayoutEngine<'a> {
    style: &'a ReportStyle,
    width: f32,
    height: f32,
    pages: Vec<Page>,
    current: Page,
    cursor: f32,
}

impl<'a> LayoutEngine<'a> {
    pub fn new(style: &'a ReportStyle) -> Self {
        let (width, height) = style.page_size.dimensions();
        Self {
            style,
            width,
            height,
            pages: Vec::new(),
            current: Page::default(),
            cursor: height - style.margin,
        }
    }

    fn frame_top(&self) -> f32 {
        self.height - self.style.margin
    }

    fn frame_bottom(&self) -> f32 {
        self.style.margin
    }

    fn frame_width(&self) -> f32 {
        self.width - 2.0 * self.style.margin
    }

    fn remaining(&self) -> f32 {
        self.cursor - self.frame_bottom()
    }

    fn at_page_top(&self) -> bool {
        self.cursor >= self.frame_top()
    }

    fn new_page(&mut self) {
        self.pages.push(std::mem::take(&mut self.current));
        self.cursor = self.frame_top();
        tracing::trace!("Starting page {}", self.pages.len() + 1);
    }

    /// Breaks the page unless `height` fits, or unless we are already at the top.
    fn ensure_space(&mut self, height: f32) {
        if self.remaining() < height && !self.at_page_top() {
            self.new_page();
        }
    }

    pub fn place_all(&mut self, blocks: &[Block<'_>]) {
        for (i, block) in blocks.iter().enumerate() {
            if let Block::Heading(_) = block {
                let keep = self.keep_with_next(&blocks[i + 1..]);
                self.ensure_space(self.heading_height() + keep);
            }
            self.place(block);
        }
    }

    /// Space for the spacers and first two rows of the table following a heading.
    fn keep_with_next(&self, rest: &[Block<'_>]) -> f32 {
        let mut keep = 0.0_f32;
        for block in rest {
            match block {
                Block::Spacer(height) => keep += *height,
                Block::Table { rows, style } => {
                    return keep
                        + rows
                            .iter()
                            .take(2)
                            .enumerate()
                            .map(|(r, _)| row_height(style, r == 0))
                            .sum::<f32>();
                }
                _ => break,
            }
        }
        0.0
    }

    fn heading_height(&self) -> f32 {
        self.style.heading_font_size * LEADING + HEADING_SPACE_AFTER
    }

    pub fn place(&mut self, block: &Block<'_>) {
        match block {
            Block::Title(text) => self.place_title(text),
            Block::Heading(text) => self.place_heading(text),
            Block::Spacer(height) => {
                if !self.at_page_top() {
                    self.cursor -= *height;
                    if self.cursor < self.frame_bottom() {
                        self.new_page();
                    }
                }
            }
            Block::Table { rows, style } => self.place_table(rows, style),
        }
    }

    fn place_title(&mut self, text: &str) {
        let size = self.style.title_font_size;
        self.ensure_space(size * LEADING);
        let x = self.style.margin
            + (self.frame_width() - text_width(text, size, FontFace::Bold)).max(0.0) / 2.0;
        self.push_text(text, x, self.cursor - size, size, FontFace::Bold, self.style.text_color);
        self.cursor -= size * LEADING + self.style.title_space_after;
    }

    fn place_heading(&mut self, text: &str) {
        let size = self.style.heading_font_size;
        self.ensure_space(size * LEADING);
        self.push_text(
            text,
            self.style.margin,
            self.cursor - size,
            size,
            FontFace::Bold,
            self.style.text_color,
        );
        self.cursor -= self.heading_height();
    }

    fn place_table(&mut self, rows: &[Vec<String>], style: &TableStyle) {
        let Some((header, body)) = rows.split_first() else {
            return;
        };
        let widths = column_widths(rows, style, self.frame_width());
        if widths.is_empty() {
            return;
        }
        let x = self.style.margin + (self.frame_width() - widths.iter().sum::<f32>()) / 2.0;

        let header_height = row_height(style, true);
        let body_height = row_height(style, false);
        let lead = header_height + if body.is_empty() { 0.0 } else { body_height };
        self.ensure_space(lead);

        self.draw_row(header, &widths, x, style, true);
        for row in body {
            if self.remaining() < body_height {
                self.new_page();
                if style.repeat_header {
                    self.draw_row(header, &widths, x, style, true);
                }
            }
            self.draw_row(row, &widths, x, style, false);
        }
    }

    fn draw_row(&mut self, cells: &[String], widths: &[f32], x: f32, style: &TableStyle, header: bool) {
        let height = row_height(style, header);
        let bottom = self.cursor - height;
        let (background, color, size, face, bottom_padding) = if header {
            (
                style.header_background,
                style.header_text,
                style.header_font_size,
                FontFace::Bold,
                style.header_bottom_padding,
            )
        } else {
            (
                style.body_background,
                style.body_text,
                style.body_font_size,
                FontFace::Regular,
                CELL_VERTICAL_PADDING,
            )
        };

        let mut left = x;
        for (i, width) in widths.iter().copied().enumerate() {
            let text = cells.get(i).map(String::as_str).unwrap_or_default();
            self.current.ops.push(DrawOp::FillRect {
                x: left,
                y: bottom,
                width,
                height,
                color: background,
            });
            self.current.ops.push(DrawOp::StrokeRect {
                x: left,
                y: bottom,
                width,
                height,
                color: style.grid_color,
                line_width: style.grid_width,
            });

            if !text.is_empty() {
                let available = (width - 2.0 * style.cell_padding).max(1.0);
                let natural = text_width(text, size, face);
                // shrink rather than spill into the neighbouring cell
                let fitted = if natural > available {
                    size * available / natural
                } else {
                    size
                };
                let text_x = left + (width - text_width(text, fitted, face)) / 2.0;
                let baseline = bottom + bottom_padding + fitted * DESCENT;
                self.push_text(text, text_x, baseline, fitted, face, color);
            }
            left += width;
        }

        self.cursor = bottom;
    }

    fn push_text(&mut self, text: &str, x: f32, y: f32, size: f32, font: FontFace, color: Color) {
        self.current.ops.push(DrawOp::Text {
            text: text.to_string(),
            x,
            y,
            size,
            font,
            color,
        });
    }

    pub fn finish(mut self) -> Document {
        self.pages.push(self.current);
        Document {
            width: self.width,
            height: self.height,
            pages: self.pages,
        }
    }
}

fn row_height(style: &TableStyle, header: bool) -> f32 {
    if header {
        style.header_font_size * LEADING + CELL_VERTICAL_PADDING + style.header_bottom_padding
    } else {
        style.body_font_size * LEADING + 2.0 * CELL_VERTICAL_PADDING
    }
}

/// Content-sized column widths, never below the style minimum, scaled down
/// together when the table would not fit the frame.
fn column_widths(rows: &[Vec<String>], style: &TableStyle, frame_width: f32) -> Vec<f32> {
    let columns = rows.iter().map(Vec::len).max().unwrap_or(0);
    let mut widths = vec![style.min_column_width; columns];

    for (r, row) in rows.iter().enumerate() {
        let (size, face) = if r == 0 {
            (style.header_font_size, FontFace::Bold)
        } else {
            (style.body_font_size, FontFace::Regular)
        };
        for (c, cell) in row.iter().enumerate() {
            let needed = text_width(cell, size, face) + 2.0 * style.cell_padding;
            widths[c] = widths[c].max(needed);
        }
    }

    let total: f32 = widths.iter().sum();
    if total > frame_width && total > 0.0 {
        let scale = frame_width / total;
        widths.iter_mut().for_each(|w| *w *= scale);
    }
    widths
}
