use anyhow::{anyhow, Result};
use clap::Parser;
use std::path::PathBuf;

use rollhub_registry_datastore::models::{Scheduler, Sequencer};
use rollhub_registry_datastore::Model;

#[derive(Debug, Parser)]
pub struct Opts {
    #[clap(long)]
    datastore_dir: Option<PathBuf>,

    #[clap(long)]
    sequencer_address: String,
}

pub async fn run(opts: &Opts) -> Result<()> {
    let datastore = super::open_datastore(&opts.datastore_dir)?;

    let sequencer = Sequencer::find_by_address(&datastore, &opts.sequencer_address)
        .await?
        .ok_or_else(|| anyhow!("sequencer {} is not registered", opts.sequencer_address))?;

    let mut obj = sequencer.to_json_object();
    if let Some(scheduler) = Scheduler::find_by_address(&datastore, &opts.sequencer_address).await? {
        obj["status"] = serde_json::to_value(scheduler.status)?;
    }

    println!("{}", serde_json::to_string_pretty(&obj)?);

    Ok(())
}
