use anyhow::Context;
use clap::Parser;
use sales_report::utils::{logger, validation::Validate};
use sales_report::{
    CliConfig, LocalStorage, ReportEngine, ReportStyle, RunOutcome, SalesReportPipeline,
    StyleConfig,
};

fn main() -> anyhow::Result<()> {
    let config = CliConfig::parse();

    if config.json_logs {
        logger::init_json_logger(config.verbose);
    } else {
        logger::init_cli_logger(config.verbose);
    }
    tracing::debug!("CLI config: {:?}", config);

    if let Err(e) = config.validate() {
        tracing::error!("Configuration validation failed: {}", e);
        eprintln!("{}", e);
        eprintln!("Suggestion: {}", e.recovery_suggestion());
        std::process::exit(1);
    }

    let style = match &config.style {
        Some(path) => StyleConfig::from_file(path)
            .and_then(StyleConfig::into_style)
            .with_context(|| format!("failed to load style from {}", path))?,
        None => ReportStyle::default(),
    };

    let monitor_enabled = config.monitor;
    let pipeline = SalesReportPipeline::with_style(LocalStorage::default(), config, style);
    let mut engine = ReportEngine::new_with_monitoring(pipeline, monitor_enabled);

    match engine.run().context("report rendering failed")? {
        RunOutcome::Generated(_) => {}
        RunOutcome::AnalysisFailed(e) => {
            println!("Failed to analyze data.");
            tracing::info!("Suggestion: {}", e.recovery_suggestion());
        }
    }

    Ok(())
}
