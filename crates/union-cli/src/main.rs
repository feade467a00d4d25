//! union-chess - inspect and play union chess positions from the command line.

mod config;
mod output;

use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use config::Config;
use output::{DivideJson, MovesJson, PerftJson, PlayJson, PlayedJson, StepJson};
use std::path::PathBuf;
use std::str::FromStr;
use tracing::{debug, info};
use tracing_subscriber::filter::LevelFilter;
use union_engine::movegen::perft::perft_divide;
use union_engine::Game;

#[derive(Parser)]
#[command(name = "union-chess")]
#[command(about = "Union chess move generator and position tool")]
struct Cli {
    /// Print results as JSON
    #[arg(long, global = true)]
    json: bool,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Configuration file (default: nearest union-chess.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the legal moves for the side to move
    Moves {
        /// Game-state line to start from
        #[arg(short, long)]
        position: Option<String>,
    },
    /// Play moves in order and print the resulting position
    Play {
        /// Moves such as "e2e4" or "a1->a5->c6"
        #[arg(required = true)]
        moves: Vec<String>,
        /// Game-state line to start from
        #[arg(short, long)]
        position: Option<String>,
    },
    /// Count leaf nodes of the legal move tree
    Perft {
        /// Search depth in plies
        depth: u32,
        /// Game-state line to start from
        #[arg(short, long)]
        position: Option<String>,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = match &cli.config {
        Some(path) => Config::load_from(path)
            .with_context(|| format!("loading {}", path.display()))?,
        None => Config::load()?,
    };

    tracing_subscriber::fmt()
        .with_max_level(log_level(cli.verbose, &config.log_level)?)
        .with_writer(std::io::stderr)
        .init();
    debug!(?config, "configuration loaded");

    match cli.command {
        Commands::Moves { position } => {
            let game = start(position.as_deref(), &config)?;
            let moves: Vec<String> = game.legal_moves().iter().map(|m| m.to_string()).collect();
            if cli.json {
                let json = MovesJson {
                    position: game.to_position_string(),
                    side: game.side_to_move().to_string(),
                    moves,
                };
                println!("{}", serde_json::to_string_pretty(&json)?);
            } else {
                for m in &moves {
                    println!("{}", m);
                }
                println!("\n{} legal moves", moves.len());
            }
        }
        Commands::Play { moves, position } => {
            let mut game = start(position.as_deref(), &config)?;
            let mut played = Vec::with_capacity(moves.len());
            for text in &moves {
                let steps = game
                    .make_move_str(text)
                    .with_context(|| format!("playing {}", text))?;
                info!(mv = %text, "played");
                played.push((text.clone(), steps));
            }

            if cli.json {
                let json = PlayJson {
                    moves: played
                        .iter()
                        .map(|(mov, steps)| PlayedJson {
                            mov: mov.clone(),
                            steps: steps.iter().map(StepJson::from).collect(),
                        })
                        .collect(),
                    position: game.to_position_string(),
                };
                println!("{}", serde_json::to_string_pretty(&json)?);
            } else {
                for (mov, steps) in &played {
                    println!("{}", mov);
                    for step in steps {
                        println!("  {}", step);
                    }
                }
                println!("{}", game.to_position_string());
            }
        }
        Commands::Perft { depth, position } => {
            if depth == 0 {
                bail!("depth must be at least 1");
            }
            let game = start(position.as_deref(), &config)?;
            let divide = perft_divide(game.board(), game.side_to_move(), game.context(), depth);
            let nodes: u64 = divide.iter().map(|(_, n)| n).sum();

            if cli.json {
                let json = PerftJson {
                    depth,
                    nodes,
                    divide: divide
                        .into_iter()
                        .map(|(mov, nodes)| DivideJson { mov, nodes })
                        .collect(),
                };
                println!("{}", serde_json::to_string_pretty(&json)?);
            } else {
                for (mov, count) in &divide {
                    println!("{}: {}", mov, count);
                }
                println!("\nNodes searched: {}", nodes);
            }
        }
    }

    Ok(())
}

/// Builds the game for a subcommand from `--position` or the configured start.
fn start(position: Option<&str>, config: &Config) -> anyhow::Result<Game> {
    let line = position.unwrap_or(config.start_position.as_str());
    Game::from_position_string(line).with_context(|| format!("invalid position: {}", line))
}

/// Picks the log level: `-v` flags win over the configured level.
fn log_level(verbose: u8, configured: &str) -> anyhow::Result<LevelFilter> {
    Ok(match verbose {
        0 => LevelFilter::from_str(configured)
            .with_context(|| format!("invalid log level: {}", configured))?,
        1 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    })
}
