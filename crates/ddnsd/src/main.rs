// # ddnsd - DDNS Updater
//
// This binary is a THIN integration layer: all decision logic lives in
// ddns-core.
//
// The ddnsd binary is responsible for:
// 1. Parsing the command line
// 2. Loading the configuration file
// 3. Initializing logging and the runtime
// 4. Wiring the resolver, echo-service source and update client into the engine
// 5. Running one pass and mapping the outcome to an exit code
//
// It is meant to be triggered periodically by a scheduler (cron, systemd
// timer); it keeps no state between runs.
//
// ## Configuration
//
// A JSON file, `config.json` by default:
//
// ```json
// {
//     "Username": "myhost.nsupdate.info",
//     "Password": "secret",
//     "Hostname": "myhost.nsupdate.info"
// }
// ```
//
// ## Example
//
// ```bash
// ddnsd --config /etc/ddns/config.json
// RUST_LOG=debug ddnsd --dry-run
// ```

use anyhow::Result;
use clap::Parser;
use ddns_core::{DdnsConfig, DdnsEngine, RunReport};
use ddns_dns_resolver::DnsPublishedSource;
use ddns_ip_http::HttpIpSource;
use ddns_provider_nsupdate::NsUpdateClient;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

/// Exit codes for different termination scenarios
///
/// - 0: Run completed
/// - 1: Configuration or startup error
/// - 2: Runtime error (lookup or update failed)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DdnsExitCode {
    /// Run completed (updated or nothing to do)
    Success = 0,
    /// Configuration error or startup failure
    ConfigError = 1,
    /// Runtime error
    RuntimeError = 2,
}

impl From<DdnsExitCode> for ExitCode {
    fn from(code: DdnsExitCode) -> Self {
        ExitCode::from(code as u8)
    }
}

/// Keep a hostname's A and AAAA records pointed at this host
#[derive(Parser, Debug)]
#[command(name = "ddnsd")]
#[command(version)]
#[command(about = "Dynamic DNS updater for nsupdate.info", long_about = None)]
struct Args {
    /// Path to configuration file
    #[arg(short, long, default_value = "config.json")]
    config: PathBuf,

    /// Log level (trace, debug, info, warn, error), overridden by RUST_LOG
    #[arg(long, default_value = "info")]
    log_level: String,

    /// Look up addresses and report, without calling the update service
    #[arg(long)]
    dry_run: bool,
}

fn main() -> ExitCode {
    let args = Args::parse();

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&args.log_level)),
        )
        .init();

    // Load configuration before any network activity
    let config = match DdnsConfig::load(&args.config) {
        Ok(cfg) => cfg,
        Err(e) => {
            error!("{}", e);
            return exit_code(&Err(e.into())).into();
        }
    };

    info!("Checking {}", config.hostname);

    // Everything runs sequentially, one thread is enough
    let rt = match tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
    {
        Ok(runtime) => runtime,
        Err(e) => {
            error!("Failed to create tokio runtime: {}", e);
            return DdnsExitCode::ConfigError.into();
        }
    };

    let result = rt.block_on(run(&config, args.dry_run));
    match &result {
        Ok(report) => print_summary(report),
        Err(e) => error!("{:#}", e),
    }

    exit_code(&result).into()
}

/// Map the outcome of a run to the process exit code
///
/// Configuration errors map to `ConfigError` wherever they surface, every
/// other failure to `RuntimeError`.
fn exit_code(result: &Result<RunReport>) -> DdnsExitCode {
    match result {
        Ok(_) => DdnsExitCode::Success,
        Err(e)
            if e
                .downcast_ref::<ddns_core::Error>()
                .is_some_and(ddns_core::Error::is_config) =>
        {
            DdnsExitCode::ConfigError
        }
        Err(_) => DdnsExitCode::RuntimeError,
    }
}

/// Wire the components and run one pass
async fn run(config: &DdnsConfig, dry_run: bool) -> Result<RunReport> {
    let engine = DdnsEngine::new(
        Box::new(DnsPublishedSource::from_endpoints(&config.endpoints)),
        Box::new(HttpIpSource::from_endpoints(&config.endpoints)),
        Box::new(NsUpdateClient::from_config(config)),
        config,
    )?
    .with_dry_run(dry_run);

    if dry_run {
        info!("Dry run: the update service will not be contacted");
    }

    Ok(engine.run_once().await?)
}

fn print_summary(report: &RunReport) {
    for line in summary_lines(report) {
        println!("{}", line);
    }
}

/// User-facing lines describing a completed run
fn summary_lines(report: &RunReport) -> Vec<String> {
    if report.is_noop() {
        return vec![format!(
            "No update required, IPs are [{}, {}]",
            report.addresses.v4.actual, report.addresses.v6.actual
        )];
    }

    if report.dry_run {
        return report
            .pending()
            .into_iter()
            .map(|version| {
                let state = report.addresses.get(version);
                format!(
                    "{} would be updated: {:?} -> {:?}",
                    version, state.published, state.actual
                )
            })
            .collect();
    }

    report
        .updates
        .iter()
        .map(|(version, outcome)| format!("{}: {}", version, outcome))
        .collect()
}
