use anyhow::Context;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

use route_file::config::{Command, Config};
use route_file::{RouteDraft, RouteFileError, RouteRecord};

fn main() -> ExitCode {
    match run() {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            if let Some(route_err) = e.downcast_ref::<RouteFileError>() {
                eprintln!("{}", route_err.user_message());
            }
            ExitCode::FAILURE
        }
    }
}

fn run() -> anyhow::Result<ExitCode> {
    let config = Config::load()?;

    // RUST_LOG wins over the configured level; logs go to stderr
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.log_level.as_str().to_lowercase()));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    match &config.command {
        Command::Parse { file, .. } => {
            let path = routes_path(file, &config);
            let routes = read_routes(&path)?;
            let json = if config.pretty {
                serde_json::to_string_pretty(&routes)?
            } else {
                serde_json::to_string(&routes)?
            };
            println!("{}", json);
        }
        Command::Format { input, output } => {
            let data = std::fs::read_to_string(input)
                .with_context(|| format!("Failed to read {}", input.display()))?;
            let drafts: Vec<RouteDraft> = serde_json::from_str(&data)
                .with_context(|| format!("Failed to decode routes from {}", input.display()))?;

            let target = output
                .as_ref()
                .map(|p| p.display().to_string())
                .unwrap_or_default();
            let contents = route_file::format(&target, &drafts)?;

            match output {
                Some(path) => {
                    std::fs::write(path, contents)
                        .with_context(|| format!("Failed to write {}", path.display()))?;
                    tracing::info!("Wrote {} route(s) to {}", drafts.len(), path.display());
                }
                None => print!("{}", contents),
            }
        }
        Command::Check { file } => {
            let path = routes_path(file, &config);
            let routes = read_routes(&path)?;
            let name = path.display().to_string();
            let formatted = route_file::format(&name, &routes)?;
            let reparsed = route_file::parse(&name, &formatted)?;

            if reparsed != routes {
                tracing::error!("{} does not survive a round trip", name);
                println!("{}: round trip changed the routes", name);
                return Ok(ExitCode::FAILURE);
            }
            println!("{}: {} route(s) OK", name, routes.len());
        }
    }

    Ok(ExitCode::SUCCESS)
}

fn routes_path(file: &Option<PathBuf>, config: &Config) -> PathBuf {
    file.clone().unwrap_or_else(|| config.routes_path.clone())
}

fn read_routes(path: &Path) -> anyhow::Result<Vec<RouteRecord>> {
    tracing::info!("Reading routes from {}", path.display());
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let routes = route_file::parse(&path.display().to_string(), &text)?;
    Ok(routes)
}
