use anyhow::{anyhow, Result};
use clap::Parser;
use std::path::PathBuf;

use rollhub_registry_datastore::models::{Scheduler, SequencerRoster};

#[derive(Debug, Parser)]
pub struct Opts {
    #[clap(long)]
    datastore_dir: Option<PathBuf>,

    #[clap(long)]
    rollapp_id: String,
}

pub async fn run(opts: &Opts) -> Result<()> {
    let datastore = super::open_datastore(&opts.datastore_dir)?;

    let roster = SequencerRoster::find_by_rollapp(&datastore, &opts.rollapp_id)
        .await?
        .ok_or_else(|| anyhow!("rollapp {} has no registered sequencers", opts.rollapp_id))?;

    println!("Roster for rollapp {}:", roster.rollapp_id);
    for address in &roster.addresses {
        match Scheduler::find_by_address(&datastore, address).await? {
            Some(scheduler) => println!("  {} ({})", address, scheduler.status),
            None => println!("  {} (no scheduler record)", address),
        }
    }

    Ok(())
}
