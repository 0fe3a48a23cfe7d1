use crate::domain::model::{
    Analysis, CategoryCount, ColumnIndex, RecordTable, SalesRecord, PRICE_COLUMN, PRODUCT_COLUMN,
    QUANTITY_COLUMN,
};
use crate::utils::error::AnalysisError;
use std::collections::HashMap;

type AnalysisResult<T> = std::result::Result<T, AnalysisError>;

/// Parses comma-separated bytes into a record table.
///
/// The header row must name `Product`, `Quantity` and `Price`; other columns
/// are carried through untouched. Every data row must have as many cells as
/// the header.
pub fn load_table(data: &[u8]) -> AnalysisResult<RecordTable> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(data);

    let headers: Vec<String> = reader.headers()?.iter().map(str::to_string).collect();
    let columns = ColumnIndex {
        product: find_column(&headers, PRODUCT_COLUMN)?,
        quantity: find_column(&headers, QUANTITY_COLUMN)?,
        price: find_column(&headers, PRICE_COLUMN)?,
    };
    tracing::debug!("Header columns: {:?}", headers);

    let mut records = Vec::new();
    for row in reader.records() {
        let row = row?;
        let line = row.position().map_or(0, |p| p.line());

        let product = row.get(columns.product).unwrap_or_default().to_string();
        let quantity = parse_cell(&row, columns.quantity, QUANTITY_COLUMN, line, |s| {
            s.parse::<i64>().ok()
        })?;
        let price = parse_cell(&row, columns.price, PRICE_COLUMN, line, |s| {
            s.parse::<f64>().ok().filter(|p| p.is_finite())
        })?;

        records.push(SalesRecord {
            product,
            quantity,
            price,
            fields: row.iter().map(str::to_string).collect(),
        });
    }

    Ok(RecordTable::new(headers, columns, records))
}

fn find_column(headers: &[String], name: &str) -> AnalysisResult<usize> {
    headers
        .iter()
        .position(|h| h == name)
        .ok_or_else(|| AnalysisError::MissingColumn {
            column: name.to_string(),
        })
}

fn parse_cell<T>(
    row: &csv::StringRecord,
    index: usize,
    column: &str,
    line: u64,
    parse: impl Fn(&str) -> Option<T>,
) -> AnalysisResult<T> {
    let raw = row.get(index).unwrap_or_default();
    parse(raw).ok_or_else(|| AnalysisError::InvalidValue {
        column: column.to_string(),
        value: raw.to_string(),
        line,
    })
}

/// Computes the aggregate figures for a loaded table.
///
/// Totals that leave the representable range are reported as an
/// [`AnalysisError::TotalOutOfRange`] rather than wrapping.
pub fn analyze(table: RecordTable) -> AnalysisResult<Analysis> {
    let records = table.records();

    let total_quantity = records
        .iter()
        .try_fold(0_i64, |acc, r| acc.checked_add(r.quantity))
        .ok_or_else(|| AnalysisError::TotalOutOfRange {
            total: "Total Quantity".to_string(),
        })?;
    let total_sales: f64 = records.iter().map(|r| r.quantity as f64 * r.price).sum();
    if !total_sales.is_finite() {
        return Err(AnalysisError::TotalOutOfRange {
            total: "Total Sales".to_string(),
        });
    }
    let average_price = if records.is_empty() {
        tracing::warn!("Input has no data rows, reporting an average price of 0");
        0.0
    } else {
        records.iter().map(|r| r.price).sum::<f64>() / records.len() as f64
    };

    Ok(Analysis {
        total_sales,
        average_price,
        total_quantity,
        category_counts: count_categories(records),
        table,
    })
}

fn count_categories(records: &[SalesRecord]) -> Vec<CategoryCount> {
    let mut counts: Vec<CategoryCount> = Vec::new();
    let mut slots: HashMap<&str, usize> = HashMap::new();

    for record in records {
        match slots.get(record.product.as_str()) {
            Some(&slot) => counts[slot].count += 1,
            None => {
                slots.insert(record.product.as_str(), counts.len());
                counts.push(CategoryCount {
                    product: record.product.clone(),
                    count: 1,
                });
            }
        }
    }

    // stable: equal counts stay in first-appearance order
    counts.sort_by(|a, b| b.count.cmp(&a.count));
    counts
}
