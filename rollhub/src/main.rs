mod cmds;

use anyhow::Result;
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "rollhub")]
#[command(version = "0.1.0")]
#[command(about = "Rollhub sequencer registry CLI", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    #[command(alias = "add_rollapp")]
    AddRollapp(cmds::add_rollapp::Opts),

    #[command(alias = "register_sequencer")]
    RegisterSequencer(cmds::register_sequencer::Opts),

    #[command(alias = "show_sequencer")]
    ShowSequencer(cmds::show_sequencer::Opts),

    #[command(alias = "show_roster")]
    ShowRoster(cmds::show_roster::Opts),

    #[command(alias = "list_sequencers")]
    ListSequencers(cmds::list_sequencers::Opts),
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    match &cli.command {
        Commands::AddRollapp(opts) => cmds::add_rollapp::run(opts).await?,
        Commands::RegisterSequencer(opts) => cmds::register_sequencer::run(opts).await?,
        Commands::ShowSequencer(opts) => cmds::show_sequencer::run(opts).await?,
        Commands::ShowRoster(opts) => cmds::show_roster::run(opts).await?,
        Commands::ListSequencers(opts) => cmds::list_sequencers::run(opts).await?,
    }

    Ok(())
}
