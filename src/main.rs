mod args;

use clap::Parser;
use colored::Colorize;

use cinedb_cli::{catalog, run_report, CliError, Config, ParamValue, PostgresStore, Session};

use crate::args::Args;

fn main() {
    let args = Args::parse();

    if args.verbose {
        tracing_subscriber::fmt()
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("cinedb_cli=debug")),
            )
            .with_writer(std::io::stderr)
            .init();
    }

    if let Err(e) = run(args) {
        eprintln!("{}", format!("Error: {}", e).red());
        std::process::exit(1);
    }
}

fn run(args: Args) -> cinedb_cli::Result<()> {
    let config = Config::load(&args.config)?;

    if args.no_color || !config.resolved_ui().color {
        colored::control::set_override(false);
    }

    let mut conn = config.resolved_connection();
    if let Some(host) = args.host {
        conn.host = host;
    }
    if let Some(port) = args.port {
        conn.port = port;
    }
    if let Some(dbname) = args.dbname {
        conn.dbname = dbname;
    }
    if let Some(user) = args.user {
        conn.user = user;
    }
    if let Some(password) = args.password {
        conn.password = Some(password);
    }

    let mut store = PostgresStore::connect(&conn.connection_string())
        .map_err(|e| CliError::Connection(e.to_string()))?;

    match args.report {
        Some(name) => {
            let params = parse_cli_params(&name, &args.params)?;
            let output = run_report(&mut store, &name, &params)?;
            println!("{}", output);
            Ok(())
        }
        None => Session::new(Box::new(store))?.run(),
    }
}

/// Parse `--param` values against the report's declared parameter kinds.
fn parse_cli_params(report: &str, raw: &[String]) -> cinedb_cli::Result<Vec<ParamValue>> {
    let spec = catalog::find(report).ok_or_else(|| CliError::UnknownReport(report.to_string()))?;

    if raw.len() != spec.params.len() {
        return Err(CliError::ParameterCountMismatch {
            report: spec.name,
            expected: spec.params.len(),
            actual: raw.len(),
        });
    }

    raw.iter()
        .zip(spec.params)
        .map(|(value, decl)| decl.kind.parse(value))
        .collect()
}
