use anyhow::Result;
use sales_report::core::analyzer::{analyze, load_table};
use sales_report::core::ConfigProvider;
use sales_report::report::{build_document, BREAKDOWN_HEADING, RAW_DATA_HEADING, SUMMARY_HEADING};
use sales_report::{
    AnalysisErrorKind, LocalStorage, ReportEngine, ReportStyle, RunOutcome, SalesReportPipeline,
    StyleConfig,
};
use std::path::Path;
use tempfile::TempDir;

const SAMPLE_CSV: &str = "Product,Quantity,Price\nWidget,2,9.99\nWidget,1,9.99\nGadget,5,4.50\n";

struct Paths {
    input: String,
    output: String,
}

impl Paths {
    fn new(input: &str, output: &str) -> Self {
        Self {
            input: input.to_string(),
            output: output.to_string(),
        }
    }
}

impl ConfigProvider for Paths {
    fn input_path(&self) -> &str {
        &self.input
    }

    fn output_path(&self) -> &str {
        &self.output
    }

    fn preview_rows(&self) -> usize {
        5
    }
}

fn extract_pdf_text(path: &Path) -> Result<String> {
    let pdf = lopdf::Document::load_mem(&std::fs::read(path)?)?;
    let pages: Vec<u32> = pdf.get_pages().keys().copied().collect();
    Ok(pdf.extract_text(&pages)?)
}

fn run_in(dir: &Path, style: ReportStyle) -> Result<RunOutcome> {
    let pipeline = SalesReportPipeline::with_style(
        LocalStorage::new(dir),
        Paths::new("sales_data.csv", "sales_report.pdf"),
        style,
    );
    let mut engine = ReportEngine::new(pipeline);
    Ok(engine.run()?)
}

#[test]
fn test_end_to_end_report_generation() -> Result<()> {
    let temp_dir = TempDir::new()?;
    std::fs::write(temp_dir.path().join("sales_data.csv"), SAMPLE_CSV)?;

    let outcome = run_in(temp_dir.path(), ReportStyle::default())?;

    match outcome {
        RunOutcome::Generated(path) => assert_eq!(path, "sales_report.pdf"),
        other => panic!("unexpected outcome: {other:?}"),
    }
    let pdf = std::fs::read(temp_dir.path().join("sales_report.pdf"))?;
    assert!(pdf.starts_with(b"%PDF"));
    Ok(())
}

#[test]
fn test_missing_input_writes_nothing() -> Result<()> {
    let temp_dir = TempDir::new()?;

    let outcome = run_in(temp_dir.path(), ReportStyle::default())?;

    match outcome {
        RunOutcome::AnalysisFailed(e) => assert_eq!(e.kind(), AnalysisErrorKind::FileNotFound),
        other => panic!("unexpected outcome: {other:?}"),
    }
    assert!(!temp_dir.path().join("sales_report.pdf").exists());
    Ok(())
}

#[test]
fn test_invalid_table_writes_nothing() -> Result<()> {
    let temp_dir = TempDir::new()?;
    std::fs::write(
        temp_dir.path().join("sales_data.csv"),
        "Product,Units,Price\nWidget,2,9.99\n",
    )?;

    let outcome = run_in(temp_dir.path(), ReportStyle::default())?;

    match outcome {
        RunOutcome::AnalysisFailed(e) => assert_eq!(e.kind(), AnalysisErrorKind::MissingColumn),
        other => panic!("unexpected outcome: {other:?}"),
    }
    assert!(!temp_dir.path().join("sales_report.pdf").exists());
    Ok(())
}

#[test]
fn test_output_into_nested_directory() -> Result<()> {
    let temp_dir = TempDir::new()?;
    std::fs::write(temp_dir.path().join("in.csv"), SAMPLE_CSV)?;

    let pipeline = SalesReportPipeline::new(
        LocalStorage::new(temp_dir.path()),
        Paths::new("in.csv", "reports/q1/sales.pdf"),
    );
    let outcome = ReportEngine::new(pipeline).run()?;

    assert!(matches!(outcome, RunOutcome::Generated(_)));
    assert!(temp_dir.path().join("reports/q1/sales.pdf").exists());
    Ok(())
}

#[test]
fn test_styled_report_from_toml_file() -> Result<()> {
    let temp_dir = TempDir::new()?;
    std::fs::write(temp_dir.path().join("sales_data.csv"), SAMPLE_CSV)?;
    let style_path = temp_dir.path().join("style.toml");
    std::fs::write(
        &style_path,
        "[document]\ntitle = \"Widget Co. Sales\"\npage_size = \"a4\"\n",
    )?;

    let style = StyleConfig::from_file(&style_path)?.into_style()?;
    let outcome = run_in(temp_dir.path(), style)?;

    assert!(matches!(outcome, RunOutcome::Generated(_)));
    Ok(())
}

#[test]
fn test_bundled_sample_data() -> Result<()> {
    let sample = Path::new(env!("CARGO_MANIFEST_DIR")).join("data/sales_data.csv");
    let analysis = analyze(load_table(&std::fs::read(sample)?)?)?;

    assert_eq!(analysis.table.len(), 8);
    assert_eq!(analysis.total_quantity, 28);
    assert_eq!(analysis.category_counts[0].product, "Widget");
    assert_eq!(analysis.category_counts[0].count, 3);
    let counted: usize = analysis.category_counts.iter().map(|c| c.count).sum();
    assert_eq!(counted, analysis.table.len());
    Ok(())
}

#[test]
fn test_report_text_is_stable_across_runs() -> Result<()> {
    let mut csv = String::from("Region,Product,Quantity,Price\n");
    for i in 0..300 {
        csv.push_str(&format!("R{},P{},{},{}.99\n", i % 4, i % 13, i % 6 + 1, i % 20));
    }
    let style = ReportStyle::default();

    let first = build_document(&analyze(load_table(csv.as_bytes())?)?, &style);
    let second = build_document(&analyze(load_table(csv.as_bytes())?)?, &style);
    assert_eq!(first.text_lines(), second.text_lines());

    let lines = first.text_lines();
    let find = |needle: &str| lines.iter().position(|l| *l == needle).unwrap();
    assert!(find(&style.title) < find(SUMMARY_HEADING));
    assert!(find(SUMMARY_HEADING) < find(BREAKDOWN_HEADING));
    assert!(find(BREAKDOWN_HEADING) < find(RAW_DATA_HEADING));
    // one Region cell per raw-data row
    assert_eq!(lines.iter().filter(|l| l.starts_with('R') && l.len() == 2).count(), 300);
    Ok(())
}

#[test]
fn test_written_pdf_text_is_stable_and_ordered() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let mut csv = String::from("Product,Quantity,Price\n");
    for i in 0..400 {
        csv.push_str(&format!("SKU{},{},{}.25\n", i, i % 9 + 1, i % 30));
    }
    std::fs::write(temp_dir.path().join("sales_data.csv"), csv)?;
    let output = temp_dir.path().join("sales_report.pdf");

    run_in(temp_dir.path(), ReportStyle::default())?;
    let first = extract_pdf_text(&output)?;
    run_in(temp_dir.path(), ReportStyle::default())?;
    let second = extract_pdf_text(&output)?;
    assert_eq!(first, second);

    let at = |needle: &str| {
        first
            .find(needle)
            .unwrap_or_else(|| panic!("{needle:?} missing from the PDF text"))
    };
    assert!(at(&ReportStyle::default().title) < at(SUMMARY_HEADING));
    assert!(at(SUMMARY_HEADING) < at(BREAKDOWN_HEADING));
    assert!(at(BREAKDOWN_HEADING) < at(RAW_DATA_HEADING));
    // the breakdown lists SKU399 too, so look for its last occurrence
    assert!(first.rfind("SKU399").is_some_and(|last| last > at(RAW_DATA_HEADING)));
    assert!(first.contains("$"));
    Ok(())
}
