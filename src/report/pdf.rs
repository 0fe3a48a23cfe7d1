use super::layout::{Document, DrawOp, FontFace, Page};
use super::style::Color;
use crate::utils::error::{ReportError, Result};
use printpdf::path::PaintMode;
use printpdf::{
    BuiltinFont, Color as PdfColor, IndirectFontRef, Mm, PdfDocument, PdfLayerReference, Rect,
    Rgb,
};

const MM_PER_PT: f32 = 25.4 / 72.0;
const LAYER_NAME: &str = "Report";

fn mm(points: f32) -> Mm {
    Mm(points * MM_PER_PT)
}

fn render_error(err: impl std::fmt::Debug) -> ReportError {
    ReportError::RenderError {
        message: format!("{:?}", err),
    }
}

fn pdf_color(color: Color) -> PdfColor {
    let (r, g, b) = color.to_unit();
    PdfColor::Rgb(Rgb::new(r, g, b, None))
}

struct Fonts {
    regular: IndirectFontRef,
    bold: IndirectFontRef,
}

impl Fonts {
    fn get(&self, face: FontFace) -> &IndirectFontRef {
        match face {
            FontFace::Regular => &self.regular,
            FontFace::Bold => &self.bold,
        }
    }
}

/// Serializes a laid-out document to PDF bytes using the built-in Helvetica faces.
pub fn render_pdf(document: &Document, title: &str) -> Result<Vec<u8>> {
    let (width, height) = (mm(document.width), mm(document.height));
    let (pdf, first_page, first_layer) = PdfDocument::new(title, width, height, LAYER_NAME);

    let fonts = Fonts {
        regular: pdf
            .add_builtin_font(BuiltinFont::Helvetica)
            .map_err(render_error)?,
        bold: pdf
            .add_builtin_font(BuiltinFont::HelveticaBold)
            .map_err(render_error)?,
    };

    for (index, page) in document.pages.iter().enumerate() {
        let layer = if index == 0 {
            pdf.get_page(first_page).get_layer(first_layer)
        } else {
            let (page_index, layer_index) = pdf.add_page(width, height, LAYER_NAME);
            pdf.get_page(page_index).get_layer(layer_index)
        };
        paint_page(&layer, page, &fonts);
    }

    tracing::debug!("Serializing {} page(s)", document.pages.len());
    pdf.save_to_bytes().map_err(render_error)
}

fn paint_page(layer: &PdfLayerReference, page: &Page, fonts: &Fonts) {
    for op in &page.ops {
        match op {
            DrawOp::FillRect {
                x,
                y,
                width,
                height,
                color,
            } => {
                layer.set_fill_color(pdf_color(*color));
                layer.add_rect(
                    Rect::new(mm(*x), mm(*y), mm(x + width), mm(y + height))
                        .with_mode(PaintMode::Fill),
                );
            }
            DrawOp::StrokeRect {
                x,
                y,
                width,
                height,
                color,
                line_width,
            } => {
                layer.set_outline_color(pdf_color(*color));
                layer.set_outline_thickness(*line_width);
                layer.add_rect(
                    Rect::new(mm(*x), mm(*y), mm(x + width), mm(y + height))
                        .with_mode(PaintMode::Stroke),
                );
            }
            DrawOp::Text {
                text,
                x,
                y,
                size,
                font,
                color,
            } => {
                layer.set_fill_color(pdf_color(*color));
                layer.use_text(text.as_str(), *size, mm(*x), mm(*y), fonts.get(*font));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::layout::{Block, LayoutEngine};
    use crate::report::style::ReportStyle;

    #[test]
    fn test_render_pdf_serializes_multi_page_document() {
        let style = ReportStyle::default();
        let mut rows = vec![vec!["Product".to_string(), "Units Sold".to_string()]];
        rows.extend((0..150).map(|i| vec![format!("Item {i}"), "1".to_string()]));

        let mut engine = LayoutEngine::new(&style);
        engine.place(&Block::Title(style.title.clone()));
        engine.place(&Block::Table {
            rows,
            style: &style.table,
        });
        let document = engine.finish();
        assert!(document.pages.len() > 1);

        let bytes = render_pdf(&document, &style.title).unwrap();
        assert!(bytes.starts_with(b"%PDF"));
    }
}
