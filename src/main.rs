use std::io;
use std::net::SocketAddr;
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use naval_battle::cli::{Console, ConsoleOutcome};
use naval_battle::{init_logging, GameConfig, Seat, Session, Strategy, DEFAULT_FLEET, DEFAULT_GRID_SIZE};
use rand::rngs::SmallRng;
use rand::SeedableRng;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Args, Clone, Debug)]
struct GameArgs {
    #[arg(long, default_value_t = DEFAULT_GRID_SIZE, help = "Grid side length (at least 5)")]
    grid_size: usize,
    #[arg(long, value_delimiter = ',', default_values_t = DEFAULT_FLEET.to_vec(), help = "Ship sizes, e.g. --fleet 5,4,3,3,2")]
    fleet: Vec<usize>,
    #[arg(long, help = "Fix RNG seed for reproducible games (e.g., --seed 12345)")]
    seed: Option<u64>,
    #[arg(long, help = "Resume a saved game instead of starting a new one")]
    load: Option<PathBuf>,
}

impl GameArgs {
    fn config(&self) -> anyhow::Result<GameConfig> {
        GameConfig::new(self.grid_size, self.fleet.clone()).map_err(|e| anyhow::anyhow!(e))
    }

    fn rng(&self) -> SmallRng {
        match self.seed {
            Some(s) => SmallRng::seed_from_u64(s),
            None => {
                let mut seed_rng = rand::rng();
                SmallRng::from_rng(&mut seed_rng)
            }
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Play on this terminal, hot-seat or against the computer.
    Play {
        #[command(flatten)]
        game: GameArgs,
        #[arg(long, help = "Let the computer take the second seat")]
        vs_ai: bool,
        #[arg(long, default_value = "Player 1")]
        name: String,
        #[arg(long, help = "Name used by `save` without a path (saves/<name>.save)")]
        save_name: Option<String>,
    },
    /// Serve a game over HTTP; both fleets are placed at random.
    Serve {
        #[command(flatten)]
        game: GameArgs,
        #[arg(long, default_value = "127.0.0.1:8080")]
        bind: SocketAddr,
    },
}

fn open_session(args: &GameArgs, seats: &[Seat]) -> anyhow::Result<Session> {
    match &args.load {
        Some(path) => {
            let session = Session::load(path)?;
            println!("Resumed game {} ({})", session.game().id(), session.phase());
            Ok(session)
        }
        None => Session::new(&args.config()?, seats).map_err(|e| anyhow::anyhow!(e)),
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_logging();
    let cli = Cli::parse();

    match cli.command {
        Commands::Play {
            game,
            vs_ai,
            name,
            save_name,
        } => {
            if let Some(s) = game.seed {
                println!("Using fixed seed: {} (game will be reproducible)", s);
            }
            let second = if vs_ai {
                Seat::automated("Computer", Strategy::Probability)
            } else {
                Seat::human("Player 2")
            };
            let session = open_session(&game, &[Seat::human(name), second])?;
            let stdin = io::stdin();
            let mut console = Console::new(session, stdin.lock(), io::stdout(), game.rng());
            if let Some(save_name) = save_name {
                console = console.with_save_name(save_name);
            }
            match console.run()? {
                ConsoleOutcome::Finished { .. } => {}
                ConsoleOutcome::Quit => println!("Bye."),
            }
        }
        Commands::Serve { game, bind } => {
            let mut rng = game.rng();
            let mut session = open_session(&game, &[Seat::human("Player 1"), Seat::human("Player 2")])?;
            if game.load.is_none() {
                session.begin_placement().map_err(|e| anyhow::anyhow!(e))?;
                while !session.all_fleets_ready() {
                    session
                        .auto_place_fleet(&mut rng)
                        .map_err(|e| anyhow::anyhow!(e))?;
                }
                session.finish_placement().map_err(|e| anyhow::anyhow!(e))?;
            }
            println!("Serving on http://{}/api", bind);
            naval_battle::http::serve(session, bind).await?;
        }
    }
    Ok(())
}
