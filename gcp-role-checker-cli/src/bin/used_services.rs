//! gcp-used-services: list the Google APIs that appear in a project's audit
//! logs over a time window.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use gcp_role_checker_analysis::render::render_used_services;
use gcp_role_checker_analysis::source::DEFAULT_GCLOUD_BINARY;
use gcp_role_checker_analysis::{GcloudConfig, GcloudSource, RoleCheckerService, TimeWindow};

#[path = "../logging.rs"]
mod logging;

#[derive(Parser, Debug)]
#[command(
    name = "gcp-used-services",
    version,
    about = "List services used by a GCP project, from its Cloud Logging entries"
)]
struct Cli {
    /// Google Cloud project id
    #[arg(value_name = "PROJECT_ID")]
    project_id: String,

    /// Window start, RFC 3339 (e.g. 2023-07-01T00:00:00Z)
    #[arg(long)]
    start: String,

    /// Window end, RFC 3339 (e.g. 2023-07-30T23:59:59Z)
    #[arg(long)]
    end: String,

    /// gcloud executable
    #[arg(long, env = "GCP_ROLE_CHECKER_GCLOUD", default_value = DEFAULT_GCLOUD_BINARY)]
    gcloud: PathBuf,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn run(cli: &Cli) -> Result<()> {
    let window = TimeWindow::parse(&cli.start, &cli.end)?;

    let service = RoleCheckerService::new(GcloudSource::new(GcloudConfig::new(&cli.gcloud)));
    let services = service
        .audit_used_services(&cli.project_id, &window)
        .with_context(|| format!("Failed to read used services for project {}", cli.project_id))?;

    print!("{}", render_used_services(&services));
    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    logging::init_logging(cli.verbose);

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}
