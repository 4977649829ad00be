use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;

use rollhub_registry_datastore::models::Sequencer;

#[derive(Debug, Parser)]
pub struct Opts {
    #[clap(long)]
    datastore_dir: Option<PathBuf>,

    /// Restrict the listing to one rollapp.
    #[clap(long)]
    rollapp_id: Option<String>,
}

pub async fn run(opts: &Opts) -> Result<()> {
    let datastore = super::open_datastore(&opts.datastore_dir)?;

    let sequencers = match &opts.rollapp_id {
        Some(rollapp_id) => Sequencer::find_all_by_rollapp(&datastore, rollapp_id).await?,
        None => Sequencer::find_all(&datastore).await?,
    };

    if sequencers.is_empty() {
        println!("No sequencers registered");
        return Ok(());
    }

    for sequencer in &sequencers {
        println!("{} rollapp={}", sequencer.sequencer_address, sequencer.rollapp_id);
    }

    Ok(())
}
