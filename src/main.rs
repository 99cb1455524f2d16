//! pv-savings entry point: CLI wiring around the estimator.

mod cli;

use std::process;

use tracing::{error, info, warn};

use pv_savings::config::EstimatorConfig;
use pv_savings::io::export::export_monthly_csv;
use pv_savings::model::estimate;
use pv_savings::report::EstimateReport;
use pv_savings::telemetry::init_tracing;

fn main() {
    init_tracing();

    let cli = match cli::parse_args() {
        Ok(opts) => opts,
        Err(e) => {
            eprintln!("error: {e}");
            cli::print_usage();
            process::exit(1);
        }
    };

    // --scenario takes priority, then --preset, then the baseline
    let loaded = match (&cli.scenario, &cli.preset) {
        (Some(path), _) => EstimatorConfig::from_toml_file(path),
        (None, Some(name)) => EstimatorConfig::from_preset(name),
        (None, None) => Ok(EstimatorConfig::baseline()),
    };
    let base = match loaded {
        Ok(cfg) => cfg,
        Err(e) => {
            error!("{e}");
            process::exit(1);
        }
    };

    if !cli.overrides.is_empty() {
        info!(overrides = ?cli.overrides, "applying overrides");
    }
    let config = cli.overrides.apply(&base);
    for issue in config.validate() {
        warn!(field = %issue.field, "questionable input: {}", issue.message);
    }

    let result = estimate(&config);
    let report = EstimateReport::from(&result);

    if cli.json {
        match report.to_json_pretty() {
            Ok(body) => println!("{body}"),
            Err(e) => {
                error!("failed to serialize report: {e}");
                process::exit(1);
            }
        }
    } else {
        println!("{report}");
    }

    if let Some(ref path) = cli.monthly_out {
        if let Err(e) = export_monthly_csv(&result.solar.monthly, path) {
            error!("failed to write CSV: {e}");
            process::exit(1);
        }
        info!(path = %path.display(), "monthly diagnostics written");
    }

    #[cfg(feature = "api")]
    if cli.serve {
        use std::net::SocketAddr;
        use std::sync::Arc;

        use pv_savings::api::{AppState, serve};

        let mut state = AppState::new(config);
        if let Some(dir) = cli.public_dir {
            state.frontend_path = dir.join("index.html");
        }
        if let Some(dir) = cli.assets_dir {
            state.assets_dir = dir;
        }
        let addr = SocketAddr::from(([0, 0, 0, 0], cli.port));
        let rt = tokio::runtime::Runtime::new().unwrap_or_else(|e| {
            error!("failed to create tokio runtime: {e}");
            process::exit(1);
        });
        if let Err(e) = rt.block_on(serve(Arc::new(state), addr)) {
            error!(%addr, "server error: {e}");
            process::exit(1);
        }
    }
}
