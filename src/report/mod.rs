pub mod layout;
pub mod metrics;
pub mod pdf;
pub mod style;

use crate::domain::model::Analysis;
use layout::{Block, Document, LayoutEngine};
use style::ReportStyle;

pub const SUMMARY_HEADING: &str = "Summary Statistics";
pub const BREAKDOWN_HEADING: &str = "Product Sales Breakdown";
pub const RAW_DATA_HEADING: &str = "Raw Data";

const SECTION_GAP: f32 = 24.0;
const HEADING_GAP: f32 = 12.0;

pub fn format_currency(value: f64) -> String {
    format!("${:.2}", value)
}

pub fn summary_rows(analysis: &Analysis) -> Vec<Vec<String>> {
    vec![
        vec![
            "Total Sales".to_string(),
            format_currency(analysis.total_sales),
        ],
        vec![
            "Average Price per Unit".to_string(),
            format_currency(analysis.average_price),
        ],
        vec![
            "Total Quantity Sold".to_string(),
            analysis.total_quantity.to_string(),
        ],
    ]
}

pub fn breakdown_rows(analysis: &Analysis) -> Vec<Vec<String>> {
    let mut rows = vec![vec!["Product".to_string(), "Units Sold".to_string()]];
    rows.extend(
        analysis
            .category_counts
            .iter()
            .map(|c| vec![c.product.clone(), c.count.to_string()]),
    );
    rows
}

pub fn raw_rows(analysis: &Analysis) -> Vec<Vec<String>> {
    let table = &analysis.table;
    let mut rows = Vec::with_capacity(table.len() + 1);
    rows.push(table.headers().to_vec());
    rows.extend(table.records().iter().map(|r| table.display_row(r)));
    rows
}

/// Lays out the title, summary, breakdown and raw-data sections, in that order.
pub fn build_document(analysis: &Analysis, style: &ReportStyle) -> Document {
    let blocks = vec![
        Block::Title(style.title.clone()),
        Block::Spacer(HEADING_GAP),
        Block::Heading(SUMMARY_HEADING.to_string()),
        Block::Spacer(HEADING_GAP),
        Block::Table {
            rows: summary_rows(analysis),
            style: &style.table,
        },
        Block::Spacer(SECTION_GAP),
        Block::Heading(BREAKDOWN_HEADING.to_string()),
        Block::Spacer(HEADING_GAP),
        Block::Table {
            rows: breakdown_rows(analysis),
            style: &style.table,
        },
        Block::Spacer(SECTION_GAP),
        Block::Heading(RAW_DATA_HEADING.to_string()),
        Block::Spacer(HEADING_GAP),
        Block::Table {
            rows: raw_rows(analysis),
            style: &style.raw_table,
        },
    ];

    let mut engine = LayoutEngine::new(style);
    engine.place_all(&blocks);
    let document = engine.finish();
    tracing::debug!("Report laid out on {} page(s)", document.pages.len());
    document
}
