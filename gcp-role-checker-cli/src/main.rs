//! gcp-role-checker: least-privilege report for the service accounts of one
//! Google Cloud project.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use gcp_role_checker_analysis::source::DEFAULT_GCLOUD_BINARY;
use gcp_role_checker_analysis::{
    render_report, FileSource, GcloudConfig, GcloudSource, LeastPrivilegeRules, PolicySource,
    ProjectReport, RoleCheckerService,
};
use log::debug;

mod logging;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    /// Line-oriented report
    Text,
    /// The full report as pretty-printed JSON
    Json,
}

#[derive(Parser, Debug)]
#[command(
    name = "gcp-role-checker",
    version,
    about = "Report service accounts holding basic, admin, or serviceAccountUser roles in a GCP project"
)]
struct Cli {
    /// Google Cloud project id
    #[arg(value_name = "PROJECT_ID")]
    project_id: String,

    /// Service account email whose roles are listed (prefix match; omit to list every service account)
    #[arg(long, env = "GCP_ROLE_CHECKER_ACCOUNT")]
    account: Option<String>,

    /// Role to check instead of the default `roles/<PROJECT_ID>.admin` placeholder
    #[arg(long, env = "GCP_ROLE_CHECKER_ADMIN_ROLE")]
    admin_role: Option<String>,

    /// Read the policy from an exported JSON document instead of calling gcloud
    #[arg(long, value_name = "PATH")]
    policy_file: Option<PathBuf>,

    /// gcloud executable
    #[arg(long, env = "GCP_ROLE_CHECKER_GCLOUD", default_value = DEFAULT_GCLOUD_BINARY)]
    gcloud: PathBuf,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn check<S: PolicySource>(source: S, cli: &Cli, rules: &LeastPrivilegeRules) -> Result<ProjectReport> {
    RoleCheckerService::new(source)
        .check_project(
            &cli.project_id,
            rules,
            cli.account.as_deref().unwrap_or_default(),
        )
        .with_context(|| format!("Failed to check project {}", cli.project_id))
}

fn run(cli: &Cli) -> Result<()> {
    let mut rules = LeastPrivilegeRules::for_project(&cli.project_id);
    if let Some(role) = &cli.admin_role {
        rules = rules.with_admin_role(role);
    }

    let report = match &cli.policy_file {
        Some(path) => {
            debug!("Using policy file {}", path.display());
            check(FileSource::new(path), cli, &rules)?
        }
        None => check(
            GcloudSource::new(GcloudConfig::new(&cli.gcloud)),
            cli,
            &rules,
        )?,
    };

    match cli.format {
        OutputFormat::Text => print!("{}", render_report(&report)),
        OutputFormat::Json => println!(
            "{}",
            serde_json::to_string_pretty(&report).context("Failed to serialize report")?
        ),
    }
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
