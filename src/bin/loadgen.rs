use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

use clap::Parser;

use io_relay::bench::plan::parse_duration;
use io_relay::bench::report::Thresholds;
use io_relay::bench::{self, LoadPlan, Report, Stage, Target};
use io_relay::config::ObservabilityConfig;
use io_relay::observability;

#[derive(Parser)]
#[command(name = "loadgen")]
#[command(about = "Drive staged concurrent traffic at the api and summarize latency", long_about = None)]
struct Cli {
    /// Target as name=url; repeat to compare endpoints (first is the baseline)
    #[arg(short, long = "target", default_value = "api=http://localhost:8081/call")]
    targets: Vec<Target>,

    /// Stage as duration:users (e.g. 30s:100); repeat to run several in order
    #[arg(short, long = "stage", default_value = "10s:10")]
    stages: Vec<Stage>,

    /// Pause after each iteration over all targets
    #[arg(long, default_value = "1s", value_parser = parse_duration)]
    think_time: Duration,

    /// Calls slower than this count as failures
    #[arg(long, default_value = "2000ms", value_parser = parse_duration)]
    slo: Duration,

    /// Fail when overall p95 latency reaches this many milliseconds
    #[arg(long, default_value_t = 3000.0)]
    p95_limit_ms: f64,

    /// Fail when any target's success rate is at or below this fraction
    #[arg(long, default_value_t = 0.95)]
    min_success_rate: f64,

    /// Also write the report as JSON to this file
    #[arg(long)]
    summary_json: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info")]
    log_level: String,
}

#[tokio::main]
async fn main() -> Result<ExitCode, Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    observability::logging::init(&ObservabilityConfig {
        log_level: cli.log_level.clone(),
        ..ObservabilityConfig::default()
    });

    let plan = LoadPlan {
        targets: cli.targets,
        stages: cli.stages,
        think_time: cli.think_time,
        slo: cli.slo,
    };
    tracing::info!(
        targets = plan.targets.len(),
        stages = plan.stages.len(),
        peak_users = plan.peak_users(),
        duration = ?plan.total_duration(),
        "Load test starting"
    );

    let client = reqwest::Client::builder()
        .no_proxy()
        .build()
        .map_err(bench::BenchError::from)?;
    let outcome = bench::run(&plan, client).await;

    let report = Report::build(
        &plan,
        &outcome,
        Thresholds {
            p95_limit_ms: cli.p95_limit_ms,
            min_success_rate: cli.min_success_rate,
        },
    );
    println!("{}", report.render_text());

    if let Some(path) = &cli.summary_json {
        report.write_json(path)?;
        tracing::info!(path = %path.display(), "Summary written");
    }

    Ok(if report.passed() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}
