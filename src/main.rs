#[cfg(not(feature = "std"))]
fn main() {}

#[cfg(feature = "std")]
use clap::{Parser, Subcommand, ValueEnum};
#[cfg(feature = "std")]
use rand::rngs::SmallRng;
#[cfg(feature = "std")]
use rand::SeedableRng;
#[cfg(feature = "std")]
use seabattle::{cli, init_logging, Match, MatchConfig, TurnPolicy};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
#[cfg(feature = "std")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
#[cfg(feature = "std")]
enum PolicyArg {
    /// A hit lets the attacker fire again.
    HitKeepsTurn,
    /// Players alternate after every shot.
    Alternate,
}

#[cfg(feature = "std")]
impl From<PolicyArg> for TurnPolicy {
    fn from(arg: PolicyArg) -> Self {
        match arg {
            PolicyArg::HitKeepsTurn => TurnPolicy::HitKeepsTurn,
            PolicyArg::Alternate => TurnPolicy::Alternate,
        }
    }
}

#[derive(Subcommand)]
#[cfg(feature = "std")]
enum Commands {
    /// Two players take turns on this terminal.
    Play {
        #[arg(long, help = "Fix RNG seed for reproducible fleets (e.g., --seed 12345)")]
        seed: Option<u64>,
        #[arg(long, value_enum, default_value_t = PolicyArg::HitKeepsTurn)]
        policy: PolicyArg,
    },
    /// Replay a list of shots and print a JSON report.
    Script {
        #[arg(long, value_delimiter = ',', required = true, help = "Shots in order, e.g. A1,B7,J10")]
        moves: Vec<String>,
        #[arg(long, help = "Fix RNG seed for reproducible fleets (e.g., --seed 12345)")]
        seed: Option<u64>,
        #[arg(long, value_enum, default_value_t = PolicyArg::HitKeepsTurn)]
        policy: PolicyArg,
    },
}

#[cfg(feature = "std")]
fn seeded_rng(seed: Option<u64>) -> SmallRng {
    match seed {
        Some(s) => {
            log::info!("using fixed seed {} (fleets are reproducible)", s);
            SmallRng::seed_from_u64(s)
        }
        None => SmallRng::from_rng(&mut rand::rng()),
    }
}

#[cfg(feature = "std")]
fn main() -> anyhow::Result<()> {
    init_logging();
    let cli = Cli::parse();

    match cli.command {
        Commands::Play { seed, policy } => {
            let mut rng = seeded_rng(seed);
            let mut game = Match::with_config(&mut rng, MatchConfig::with_policy(policy.into()))
                .map_err(|e| anyhow::anyhow!(e))?;
            let stdin = std::io::stdin();
            if cli::run_hotseat(&mut game, stdin.lock())?.is_none() {
                println!("Match abandoned.");
            }
        }
        Commands::Script {
            moves,
            seed,
            policy,
        } => {
            let mut rng = seeded_rng(seed);
            let mut game = Match::with_config(&mut rng, MatchConfig::with_policy(policy.into()))
                .map_err(|e| anyhow::anyhow!(e))?;
            let report = cli::run_script(&mut game, moves.as_slice())?;
            println!("{}", serde_json::to_string(&report)?);
        }
    }
    Ok(())
}
