use std::{path::PathBuf, time::Duration};

use clap::{Args, ValueEnum};
use indicatif::{ProgressBar, ProgressStyle};
use jiff::Timestamp;
use shuttle_dispatch::{
    config::DispatchConfig, dispatcher::Dispatcher, views::visit_kind::VisitKind,
};
use shuttle_route_optimization::{
    credentials::ServiceAccountCredentials,
    route_optimization_client::{ClientParams, RouteOptimizationClient},
};
use tracing::info;

use crate::{
    file_utils::read_request,
    parsers,
    table::{summary_table, visits_table},
};

#[derive(Clone, Copy, ValueEnum)]
pub enum OutputFormat {
    Table,
    Json,
}

#[derive(Args)]
pub struct OptimizeArgs {
    /// The request file to optimize
    #[arg(short, long)]
    input: PathBuf,

    /// Visits listed in the detailed view
    #[arg(long, value_parser = parsers::parse_visit_kind, default_value = "dropoff")]
    visits: VisitKind,

    #[arg(short, long, value_enum, default_value_t = OutputFormat::Table)]
    format: OutputFormat,

    /// Start of the default time window (e.g. "2025-06-10T08:00:00Z"), now when absent
    #[arg(short, long)]
    start: Option<Timestamp>,

    /// Writes the full JSON response to this file
    #[arg(short, long)]
    output: Option<PathBuf>,
}

pub async fn run(args: OptimizeArgs) -> Result<(), anyhow::Error> {
    info!("Optimizing {:?}", args.input);

    let request = read_request(&args.input)?;

    let client = RouteOptimizationClient::new(
        ServiceAccountCredentials::from_env()?,
        ClientParams::from_env()?,
    )?;
    let dispatcher = Dispatcher::new(DispatchConfig::from_env()?, client);

    let bar = ProgressBar::new_spinner();
    bar.enable_steady_tick(Duration::from_millis(120));
    bar.set_style(ProgressStyle::default_spinner().template("{spinner} {msg} ({elapsed})")?);
    bar.set_message("Waiting for the route optimizer");

    let result = dispatcher
        .optimize_at(request, args.visits, args.start.unwrap_or_else(Timestamp::now))
        .await;

    bar.finish_and_clear();

    let response = result?;

    if let Some(output) = &args.output {
        std::fs::write(output, serde_json::to_string_pretty(&response)?)?;
        info!("Response written to {:?}", output);
    }

    match args.format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&response)?),
        OutputFormat::Table => {
            println!("{}", summary_table(&response.summary));
            println!("{}", visits_table(&response.detailed_visits));
        }
    }

    info!(
        routes = response.summary.total_routes,
        skipped = response.skipped_shipments.len(),
        "Optimization done"
    );

    Ok(())
}
