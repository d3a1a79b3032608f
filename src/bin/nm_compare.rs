use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use neuromorpho_compare::app::Pipeline;
use neuromorpho_compare::config::ConfigLoader;
use neuromorpho_compare::domain::Metric;
use neuromorpho_compare::error::MorphoError;
use neuromorpho_compare::neuromorpho::NeuroMorphoHttpClient;
use neuromorpho_compare::output::JsonOutput;

#[derive(Parser)]
#[command(name = "nm-compare")]
#[command(about = "Pairwise strain comparison over NeuroMorpho neuron morphometrics")]
#[command(version, author)]
struct Cli {
    /// Path to nm-compare.json (defaults are used when the file is absent)
    #[arg(long)]
    config: Option<String>,

    /// Maximum number of pages to retrieve
    #[arg(long)]
    max_pages: Option<usize>,

    /// Records per page
    #[arg(long)]
    page_size: Option<usize>,

    /// Remote collection endpoint
    #[arg(long)]
    base_url: Option<String>,

    /// Restrict the run to these metrics (repeatable)
    #[arg(long = "metric", value_enum)]
    metrics: Vec<Metric>,
}

fn main() -> ExitCode {
    if let Err(report) = run() {
        eprintln!("{report:?}");
        if let Some(error) = report.downcast_ref::<MorphoError>() {
            return ExitCode::from(map_exit_code(error));
        }
        return ExitCode::from(1);
    }
    ExitCode::SUCCESS
}

fn map_exit_code(error: &MorphoError) -> u8 {
    match error {
        MorphoError::ConfigRead(_) | MorphoError::ConfigParse(_) => 2,
        MorphoError::ClientBuild(_) => 3,
        _ => 1,
    }
}

fn run() -> miette::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let mut config = ConfigLoader::resolve(cli.config.as_deref())?;
    if let Some(max_pages) = cli.max_pages {
        config.max_pages = max_pages;
    }
    if let Some(page_size) = cli.page_size {
        config.page_size = page_size;
    }
    if let Some(base_url) = cli.base_url {
        config.base_url = base_url;
    }
    if !cli.metrics.is_empty() {
        config.metrics.retain(|plan| cli.metrics.contains(&plan.metric));
    }

    let client = NeuroMorphoHttpClient::new(config.base_url.clone())?;
    let report = Pipeline::new(client).run(&config);
    JsonOutput::print_report(&report)?;
    Ok(())
}
