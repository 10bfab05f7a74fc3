//! Service entry point — CLI wiring and config-driven server start.

use std::net::SocketAddr;
use std::path::Path;
use std::process;
use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use merit_dispatch::api::{self, AppState};
use merit_dispatch::config::{AppConfig, CO2_ENV_VAR};
use merit_dispatch::plan::{self, PlanError, PlanRequest};

/// Parsed CLI arguments.
struct CliArgs {
    config_path: Option<String>,
    port_override: Option<u16>,
    co2_override: Option<bool>,
    plan_path: Option<String>,
}

fn print_help() {
    eprintln!("merit-dispatch — merit-order production plan API");
    eprintln!();
    eprintln!("Usage: merit-dispatch [OPTIONS]");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --config <path>   Load service config from TOML file");
    eprintln!("  --port <u16>      Override the server port (default: 3000)");
    eprintln!("  --co2             Include CO2 allowance cost in fuel cost");
    eprintln!("  --plan <path>     One-shot: plan the JSON request in <path> and exit");
    eprintln!("  --help            Show this help message");
    eprintln!();
    eprintln!("The {CO2_ENV_VAR} environment variable (true/false/1/0) also toggles");
    eprintln!("CO2 pricing; --co2 takes precedence.");
}

fn parse_args() -> CliArgs {
    let args: Vec<String> = std::env::args().collect();
    let mut cli = CliArgs {
        config_path: None,
        port_override: None,
        co2_override: None,
        plan_path: None,
    };

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--help" | "-h" => {
                print_help();
                process::exit(0);
            }
            "--config" => {
                i += 1;
                if i >= args.len() {
                    eprintln!("error: --config requires a path argument");
                    process::exit(1);
                }
                cli.config_path = Some(args[i].clone());
            }
            "--port" => {
                i += 1;
                if i >= args.len() {
                    eprintln!("error: --port requires a u16 argument");
                    process::exit(1);
                }
                if let Ok(p) = args[i].parse::<u16>() {
                    cli.port_override = Some(p);
                } else {
                    eprintln!("error: --port value \"{}\" is not a valid u16", args[i]);
                    process::exit(1);
                }
            }
            "--co2" => {
                cli.co2_override = Some(true);
            }
            "--plan" => {
                i += 1;
                if i >= args.len() {
                    eprintln!("error: --plan requires a path argument");
                    process::exit(1);
                }
                cli.plan_path = Some(args[i].clone());
            }
            other => {
                eprintln!("error: unknown argument \"{other}\"");
                print_help();
                process::exit(1);
            }
        }
        i += 1;
    }

    cli
}

/// Resolves the effective configuration: defaults, then TOML file, then
/// the CO2 environment variable, then CLI overrides.
fn resolve_config(cli: &CliArgs) -> AppConfig {
    let mut config = if let Some(ref path) = cli.config_path {
        match AppConfig::from_toml_file(Path::new(path)) {
            Ok(cfg) => cfg,
            Err(e) => {
                eprintln!("{e}");
                process::exit(1);
            }
        }
    } else {
        AppConfig::default()
    };

    let co2_env = std::env::var(CO2_ENV_VAR).ok();
    if let Err(e) = config.apply_co2_env(co2_env.as_deref()) {
        eprintln!("{e}");
        process::exit(1);
    }

    if let Some(port) = cli.port_override {
        config.server.port = port;
    }
    if let Some(co2) = cli.co2_override {
        config.planner.include_co2 = co2;
    }

    let errors = config.validate();
    if !errors.is_empty() {
        for e in &errors {
            eprintln!("{e}");
        }
        process::exit(1);
    }

    config
}

/// Plans a single request read from a JSON file and prints the result.
fn run_one_shot(path: &str, include_co2: bool) {
    let content = match std::fs::read_to_string(path) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("error: cannot read \"{path}\": {e}");
            process::exit(1);
        }
    };
    let request: PlanRequest = match serde_json::from_str(&content) {
        Ok(r) => r,
        Err(e) => {
            eprintln!("error: invalid plan request: {e}");
            process::exit(1);
        }
    };

    match plan::production_plan(&request, include_co2) {
        Ok(assignments) => match serde_json::to_string_pretty(&assignments) {
            Ok(out) => println!("{out}"),
            Err(e) => {
                eprintln!("error: failed to serialize plan: {e}");
                process::exit(1);
            }
        },
        Err(PlanError::UnmetDemand { remaining, .. }) => {
            eprintln!("error: target load could not be reached, {remaining} MWh unmet");
            process::exit(1);
        }
        Err(e) => {
            eprintln!("error: {e}");
            process::exit(1);
        }
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = parse_args();
    let config = resolve_config(&cli);

    if let Some(ref path) = cli.plan_path {
        run_one_shot(path, config.planner.include_co2);
        return;
    }

    let state = Arc::new(AppState {
        include_co2: config.planner.include_co2,
    });
    let addr = SocketAddr::from(([0, 0, 0, 0], config.server.port));
    let rt = tokio::runtime::Runtime::new().unwrap_or_else(|e| {
        eprintln!("error: failed to create tokio runtime: {e}");
        process::exit(1);
    });
    rt.block_on(api::serve(state, addr));
}
