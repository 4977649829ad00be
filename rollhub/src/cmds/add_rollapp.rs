use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;

use rollhub_registry_datastore::models::Rollapp;
use rollhub_registry_datastore::Model;

/// Seed a rollapp record the way the rollapp management module would.
/// The registry itself never writes rollapp configuration.
#[derive(Debug, Parser)]
pub struct Opts {
    #[clap(long)]
    datastore_dir: Option<PathBuf>,

    #[clap(long)]
    rollapp_id: String,

    #[clap(long, default_value_t = 0)]
    max_sequencers: u64,

    /// May be passed multiple times; an empty list means open admission.
    #[clap(long = "permissioned-address")]
    permissioned_addresses: Vec<String>,
}

pub async fn run(opts: &Opts) -> Result<()> {
    let datastore = super::open_datastore(&opts.datastore_dir)?;

    if Rollapp::find_by_id(&datastore, &opts.rollapp_id).await?.is_some() {
        return Err(anyhow::anyhow!("rollapp {} already exists", opts.rollapp_id));
    }

    let rollapp = Rollapp {
        rollapp_id: opts.rollapp_id.clone(),
        max_sequencers: opts.max_sequencers,
        permissioned_addresses: opts.permissioned_addresses.clone(),
    };
    rollapp.save(&datastore).await?;

    println!("Added rollapp {}", rollapp.rollapp_id);
    println!("  max sequencers: {}", rollapp.max_sequencers);
    if rollapp.is_open_admission() {
        println!("  admission: open");
    } else {
        println!(
            "  admission: permissioned ({} addresses)",
            rollapp.permissioned_addresses.len()
        );
    }

    Ok(())
}
