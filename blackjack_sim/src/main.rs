use blackjack_lib::{Console, StdConsole};
use blackjack_sim::{BlackjackGame, BlackjackGameConfig, BlackjackGameError};
use clap::Parser;

/// Plays blackjack at the console, any number of players against one dealer dealing from a six deck shoe.
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// Number of players, asked for at the start of the game when omitted
    #[arg(short, long, value_parser = clap::value_parser!(u32).range(1..))]
    players: Option<u32>,

    /// Seed for the shoe's shuffles, so a game can be replayed
    #[arg(short, long)]
    seed: Option<u64>,

    /// Print a JSON report after every round
    #[arg(long)]
    json: bool,
}

fn run(args: Args) -> Result<(), BlackjackGameError> {
    let mut builder = BlackjackGameConfig::new();
    builder.json_reports(args.json);
    if let Some(n) = args.players {
        builder.num_players(n);
    }
    if let Some(seed) = args.seed {
        builder.seed(seed);
    }
    let config = builder.build();

    let mut console = StdConsole::stdio();
    console.display("Welcome to Blackjack!")?;
    let mut game = BlackjackGame::new(config, console)?;
    game.play()?;
    Ok(())
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let args = Args::parse();
    log::debug!("starting with {:?}", args);

    if let Err(e) = run(args) {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
