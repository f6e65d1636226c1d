//! Command-line front end for the rail network engine.
//!
//! ```text
//! rail-network [--data PATH] [--config PATH] <command>
//!
//!   stats
//!   route FROM TO [--via A,B] [--algorithm dijkstra|astar|bfs] [--objective time|price]
//!   mst [--algorithm prim|kruskal] [--objective time|price] [--steps]
//!   hubs [K]
//!   analysis
//! ```
//!
//! Results go to stdout as pretty JSON, logs to stderr (filtered by `RAIL_LOG`).

use std::{path::PathBuf, process::ExitCode};

use serde::Serialize;
use thiserror::Error;
use tracing::{error, info};
use tracing_subscriber::{EnvFilter, fmt};

use rail_network::{
    EngineConfig, MstAlgorithm, NetworkBuilder, Objective, PathAlgorithm, RailError, RailGraph,
    analyze,
    centrality::top_hubs_with,
    config::ConfigError,
    dataset::{DatasetSource, EmbeddedSource, JsonFileSource, SourceError, load_network},
    minimum_spanning_tree,
    routing::{dual_objective_with, route_through_waypoints},
    spanning::{NoTrace, mst_kruskal_traced, mst_prim_traced},
};

const USAGE: &str = "Usage: rail-network [--data PATH] [--config PATH] <command>
  stats
  route FROM TO [--via A,B] [--algorithm dijkstra|astar|bfs] [--objective time|price]
  mst [--algorithm prim|kruskal] [--objective time|price] [--steps]
  hubs [K]
  analysis";

#[derive(Debug, Error)]
enum CliError {
    #[error("{0}")]
    Usage(String),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Source(#[from] SourceError),
    #[error(transparent)]
    Query(#[from] RailError),
    #[error("failed to encode output: {0}")]
    Output(#[from] serde_json::Error),
    #[error("failed to start runtime: {0}")]
    Runtime(#[from] std::io::Error),
}

#[derive(Debug, Clone, PartialEq)]
enum Command {
    Stats,
    Route {
        from: String,
        to: String,
        via: Vec<String>,
        algorithm: Option<PathAlgorithm>,
        objective: Objective,
    },
    Mst {
        algorithm: MstAlgorithm,
        objective: Objective,
        steps: bool,
    },
    Hubs(Option<usize>),
    Analysis,
    Help,
}

#[derive(Debug, Clone, PartialEq)]
struct Cli {
    data: Option<PathBuf>,
    config: Option<PathBuf>,
    command: Command,
}

fn main() -> ExitCode {
    let filter = EnvFilter::try_from_env("RAIL_LOG")
        .unwrap_or_else(|_| EnvFilter::new("rail_network=info"));
    fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .compact()
        .init();

    let result = parse_args(std::env::args().skip(1)).and_then(run);
    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(CliError::Usage(message)) => {
            eprintln!("{message}\n{USAGE}");
            ExitCode::from(2)
        }
        Err(err) => {
            error!("{err}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), CliError> {
    if cli.command == Command::Help {
        println!("{USAGE}");
        return Ok(());
    }

    let config = match &cli.config {
        Some(path) => EngineConfig::from_file(path)?,
        None => EngineConfig::default(),
    };
    let mut source: Box<dyn DatasetSource> = match &cli.data {
        Some(path) => Box::new(JsonFileSource::new(path)),
        None => Box::new(EmbeddedSource),
    };
    let builder = NetworkBuilder::new(config.build.clone());

    let rt = tokio::runtime::Runtime::new()?;
    let graph = rt.block_on(load_network(source.as_mut(), &builder))?;
    info!(
        cities = graph.city_count(),
        links = graph.link_count(),
        "network loaded"
    );

    execute(&graph, &config, cli.command)
}

fn execute(graph: &RailGraph, config: &EngineConfig, command: Command) -> Result<(), CliError> {
    match command {
        Command::Stats => print(&graph.stats()),
        Command::Route {
            from,
            to,
            via,
            algorithm,
            objective,
        } => {
            if via.is_empty() {
                let mut routing = config.routing.clone();
                if let Some(algorithm) = algorithm {
                    routing.algorithm = algorithm;
                }
                print(&dual_objective_with(graph, &from, &to, &routing)?)
            } else {
                print(&route_through_waypoints(graph, &from, via.as_slice(), &to, objective)?)
            }
        }
        Command::Mst {
            algorithm,
            objective,
            steps,
        } => {
            if steps {
                print(&minimum_spanning_tree(graph, algorithm, objective))
            } else {
                let tree = match algorithm {
                    MstAlgorithm::Prim => mst_prim_traced(graph, objective, &mut NoTrace),
                    MstAlgorithm::Kruskal => mst_kruskal_traced(graph, objective, &mut NoTrace),
                };
                print(&tree)
            }
        }
        Command::Hubs(k) => {
            let k = k.unwrap_or(config.analysis.hub_count);
            print(&top_hubs_with(graph, k, &config.analysis))
        }
        Command::Analysis => print(&analyze(graph, &config.analysis)),
        Command::Help => Ok(()),
    }
}

fn print<T: Serialize>(value: &T) -> Result<(), CliError> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn parse_args(args: impl IntoIterator<Item = String>) -> Result<Cli, CliError> {
    let mut data = None;
    let mut config = None;
    let mut positional = Vec::new();
    let mut via = Vec::new();
    let mut algorithm = None;
    let mut objective = None;
    let mut steps = false;

    let mut args = args.into_iter();
    while let Some(arg) = args.next() {
        let mut value = |flag: &str| {
            args.next()
                .ok_or_else(|| CliError::Usage(format!("{flag} needs a value")))
        };
        match arg.as_str() {
            "--data" => data = Some(PathBuf::from(value("--data")?)),
            "--config" => config = Some(PathBuf::from(value("--config")?)),
            "--via" => {
                via = value("--via")?
                    .split(',')
                    .map(str::trim)
                    .filter(|stop| !stop.is_empty())
                    .map(String::from)
                    .collect()
            }
            "--algorithm" => algorithm = Some(value("--algorithm")?),
            "--objective" => {
                let name = value("--objective")?;
                objective = Some(
                    Objective::from_str(&name)
                        .ok_or_else(|| CliError::Usage(format!("unknown objective '{name}'")))?,
                );
            }
            "--steps" => steps = true,
            "--help" | "-h" => positional.insert(0, "help".to_string()),
            flag if flag.starts_with("--") => {
                return Err(CliError::Usage(format!("unknown argument '{flag}'")));
            }
            other => positional.push(other.to_string()),
        }
    }

    let mut positional = positional.into_iter();
    let command = match positional.next().as_deref() {
        None | Some("help") => Command::Help,
        Some("stats") => Command::Stats,
        Some("analysis") => Command::Analysis,
        Some("hubs") => {
            let k = positional
                .next()
                .map(|k| {
                    k.parse()
                        .map_err(|_| CliError::Usage(format!("hub count must be a number, got '{k}'")))
                })
                .transpose()?;
            Command::Hubs(k)
        }
        Some("route") => {
            let (Some(from), Some(to)) = (positional.next(), positional.next()) else {
                return Err(CliError::Usage("route needs FROM and TO".to_string()));
            };
            let algorithm = algorithm
                .map(|name| {
                    PathAlgorithm::from_str(&name)
                        .ok_or_else(|| CliError::Usage(format!("unknown path algorithm '{name}'")))
                })
                .transpose()?;
            Command::Route {
                from,
                to,
                via,
                algorithm,
                objective: objective.unwrap_or(Objective::Time),
            }
        }
        Some("mst") => {
            let algorithm = match algorithm {
                Some(name) => MstAlgorithm::from_str(&name)
                    .ok_or_else(|| CliError::Usage(format!("unknown tree algorithm '{name}'")))?,
                None => MstAlgorithm::default(),
            };
            Command::Mst {
                algorithm,
                objective: objective.unwrap_or(Objective::Time),
                steps,
            }
        }
        Some(other) => return Err(CliError::Usage(format!("unknown command '{other}'"))),
    };

    Ok(Cli {
        data,
        config,
        command,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(line: &str) -> Result<Cli, CliError> {
        parse_args(line.split_whitespace().map(String::from))
    }

    #[test]
    fn test_parse_route() {
        let cli = parse("--data net.json route beijing guangzhou --via wuhan,changsha --objective price")
            .unwrap();
        assert_eq!(cli.data, Some(PathBuf::from("net.json")));
        assert_eq!(
            cli.command,
            Command::Route {
                from: "beijing".into(),
                to: "guangzhou".into(),
                via: vec!["wuhan".into(), "changsha".into()],
                algorithm: None,
                objective: Objective::Price,
            }
        );

        let cli = parse("route a b --algorithm astar").unwrap();
        assert!(matches!(
            cli.command,
            Command::Route {
                algorithm: Some(PathAlgorithm::AStar),
                ..
            }
        ));
    }

    #[test]
    fn test_parse_mst_and_hubs() {
        let cli = parse("mst --algorithm kruskal --steps").unwrap();
        assert_eq!(
            cli.command,
            Command::Mst {
                algorithm: MstAlgorithm::Kruskal,
                objective: Objective::Time,
                steps: true,
            }
        );
        assert_eq!(parse("hubs 3").unwrap().command, Command::Hubs(Some(3)));
        assert_eq!(parse("hubs").unwrap().command, Command::Hubs(None));
        assert_eq!(parse("").unwrap().command, Command::Help);
    }

    #[test]
    fn test_parse_errors() {
        for line in [
            "route beijing",
            "mst --algorithm boruvka",
            "route a b --algorithm dfs",
            "hubs many",
            "teleport",
            "stats --verbose",
            "--data",
        ] {
            assert!(matches!(parse(line), Err(CliError::Usage(_))), "{line}");
        }
    }

    #[test]
    fn test_execute_on_embedded_network() {
        let rt = tokio::runtime::Runtime::new().unwrap();
        let graph = rt
            .block_on(load_network(&mut EmbeddedSource, &NetworkBuilder::default()))
            .unwrap();
        let config = EngineConfig::default();

        assert!(execute(&graph, &config, Command::Stats).is_ok());
        assert!(execute(&graph, &config, Command::Hubs(Some(3))).is_ok());
        let unknown = Command::Route {
            from: "beijing".into(),
            to: "atlantis".into(),
            via: Vec::new(),
            algorithm: None,
            objective: Objective::Time,
        };
        assert!(matches!(
            execute(&graph, &config, unknown),
            Err(CliError::Query(RailError::UnknownNode(_)))
        ));
    }
}
