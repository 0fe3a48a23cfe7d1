pub const PRODUCT_COLUMN: &str = "Product";
pub const QUANTITY_COLUMN: &str = "Quantity";
pub const PRICE_COLUMN: &str = "Price";

/// Positions of the required columns within the header row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnIndex {
    pub product: usize,
    pub quantity: usize,
    pub price: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SalesRecord {
    pub product: String,
    pub quantity: i64,
    pub price: f64,
    /// Every cell of the row, trimmed, in header order.
    pub fields: Vec<String>,
}

/// The parsed input file. Immutable once loaded.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordTable {
    headers: Vec<String>,
    columns: ColumnIndex,
    records: Vec<SalesRecord>,
}

impl RecordTable {
    pub fn new(headers: Vec<String>, columns: ColumnIndex, records: Vec<SalesRecord>) -> Self {
        Self {
            headers,
            columns,
            records,
        }
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn records(&self) -> &[SalesRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Cell texts of a record, typed columns in their natural text form.
    pub fn display_row(&self, record: &SalesRecord) -> Vec<String> {
        (0..self.headers.len())
            .map(|i| {
                if i == self.columns.product {
                    record.product.clone()
                } else if i == self.columns.quantity {
                    record.quantity.to_string()
                } else if i == self.columns.price {
                    format_decimal(record.price)
                } else {
                    record.fields.get(i).cloned().unwrap_or_default()
                }
            })
            .collect()
    }

    /// Aligned text rendering of the first `rows` records, for the console.
    pub fn preview(&self, rows: usize) -> String {
        let mut lines: Vec<Vec<String>> = Vec::with_capacity(rows.min(self.len()) + 1);
        let mut header = vec![String::new()];
        header.extend(self.headers.iter().cloned());
        lines.push(header);
        for (i, record) in self.records.iter().take(rows).enumerate() {
            let mut line = vec![i.to_string()];
            line.extend(self.display_row(record));
            lines.push(line);
        }

        let columns = lines[0].len();
        let widths: Vec<usize> = (0..columns)
            .map(|c| {
                lines
                    .iter()
                    .map(|line| line.get(c).map_or(0, |cell| cell.chars().count()))
                    .max()
                    .unwrap_or(0)
            })
            .collect();

        lines
            .iter()
            .map(|line| {
                line.iter()
                    .zip(&widths)
                    .enumerate()
                    .map(|(c, (cell, width))| {
                        if c == 0 {
                            format!("{:<width$}", cell, width = width)
                        } else {
                            format!("{:>width$}", cell, width = width)
                        }
                    })
                    .collect::<Vec<_>>()
                    .join("  ")
                    .trim_end()
                    .to_string()
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Shortest round-trip text with at least one fractional digit (`4.5`, `10.0`).
pub fn format_decimal(value: f64) -> String {
    let text = value.to_string();
    if value.is_finite() && !text.contains(['.', 'e', 'E']) {
        format!("{}.0", text)
    } else {
        text
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryCount {
    pub product: String,
    pub count: usize,
}

/// Aggregate figures derived from a record table.
#[derive(Debug, Clone, PartialEq)]
pub struct Analysis {
    pub total_sales: f64,
    /// Unweighted mean of the unit price column.
    pub average_price: f64,
    pub total_quantity: i64,
    /// Ordered by descending count; ties keep first-appearance order.
    pub category_counts: Vec<CategoryCount>,
    pub table: RecordTable,
}
