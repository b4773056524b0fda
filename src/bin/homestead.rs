//! Apply actions to a saved game from the command line. This plays the part of
//! the game service: it hosts the store, and answers the commands sent by the
//! widgets.

use anyhow::{bail, Context, Result};
use homestead::{
    game::{ComposterName, ComposterWidget},
    persist,
    utils::get_timestamp,
    Command, CommandBus, FertilisePlotAction, GameState, Store,
};
use serde_json::json;
use std::{path::PathBuf, str::FromStr};
use structopt::StructOpt;
use tracing_subscriber::EnvFilter;

#[derive(Debug, StructOpt)]
#[structopt(name = "homestead", about = "Apply farm actions to a saved game.")]
struct CliOptions {
    /// The game state file.
    #[structopt(long, parse(from_os_str), default_value = "./.homestead/state.json")]
    state: PathBuf,

    /// A JSON crop catalog to use instead of the built-in crops.
    #[structopt(long, parse(from_os_str))]
    crops: Option<PathBuf>,

    /// The time to apply actions at, in milliseconds since the epoch. Defaults
    /// to now.
    #[structopt(long)]
    now: Option<i64>,

    #[structopt(subcommand)]
    command: CliCommand,
}

#[derive(Debug, StructOpt)]
enum CliCommand {
    /// Print the game state.
    Show,
    /// Spread fertiliser on a plot.
    Fertilise {
        plot_id: String,
        fertiliser: String,
        #[structopt(long, default_value = "0")]
        expansion_index: u32,
        /// Print the new state instead of saving it.
        #[structopt(long)]
        dry_run: bool,
    },
    /// Look at or operate a composter, e.g. `composter "Compost Bin" start`.
    Composter {
        name: ComposterName,
        #[structopt(default_value = "status", possible_values = &["status", "start", "collect"])]
        action: ComposterAction,
    },
}

#[derive(Debug)]
enum ComposterAction {
    Status,
    Start,
    Collect,
}

impl FromStr for ComposterAction {
    type Err = anyhow::Error;

    fn from_str(value: &str) -> Result<Self> {
        match value {
            "status" => Ok(ComposterAction::Status),
            "start" => Ok(ComposterAction::Start),
            "collect" => Ok(ComposterAction::Collect),
            _ => bail!("Unknown composter action {:?}", value),
        }
    }
}

fn print_state(state: &GameState) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(state)?);
    Ok(())
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli_options = CliOptions::from_args();
    let state = persist::load_state(&cli_options.state)?;
    let mut store = match cli_options.crops {
        Some(ref path) => Store::with_crops(state, Box::new(persist::load_crops(path)?)),
        None => Store::new(state),
    };
    let now = cli_options.now.unwrap_or_else(get_timestamp);

    match cli_options.command {
        CliCommand::Show => print_state(&store.state())?,
        CliCommand::Fertilise {
            plot_id,
            fertiliser,
            expansion_index,
            dry_run,
        } => {
            let action = FertilisePlotAction {
                plot_id,
                expansion_index,
                fertiliser: Some(fertiliser),
            };
            store
                .dispatch_at(action.into(), now)
                .context("Failed to fertilise the plot")?;

            if dry_run {
                print_state(&store.state())?;
            } else {
                persist::save_state(&cli_options.state, &store.state())?;
            }
        }
        CliCommand::Composter { name, action } => {
            let (bus, mut receiver) = CommandBus::new();
            let widget = ComposterWidget::new(name, bus);
            let state = store.state();

            match action {
                ComposterAction::Status => {
                    let status = json!({
                        "composter": name,
                        "status": widget.status(state.clone(), now),
                        "progress": widget.progress(state.clone(), now),
                        "nextRenderAt": widget.next_render_at(state, now),
                    });
                    println!("{}", serde_json::to_string_pretty(&status)?);
                }
                ComposterAction::Start => widget.start(state)?,
                ComposterAction::Collect => widget.collect(state)?,
            }

            // Composting itself is run by the game server, so everything but
            // saving is passed along as JSON.
            while let Ok(command) = receiver.try_recv() {
                match command {
                    Command::Save => persist::save_state(&cli_options.state, &store.state())?,
                    other => println!("{}", serde_json::to_string(&other)?),
                }
            }
        }
    }

    Ok(())
}
