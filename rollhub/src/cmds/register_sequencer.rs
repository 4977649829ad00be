use anyhow::{anyhow, Result};
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;

use rollhub_registry::{MsgRegisterSequencer, RegistrationService};
use rollhub_registry_datastore::models::{Description, Scheduler};
use rollhub_utils::public_key::KeyEnvelope;

#[derive(Debug, Parser)]
pub struct Opts {
    #[clap(long)]
    datastore_dir: Option<PathBuf>,

    #[clap(long)]
    creator: String,

    #[clap(long)]
    sequencer_address: String,

    #[clap(long, default_value = "ed25519")]
    key_type: String,

    /// Base64 key material.
    #[clap(long)]
    public_key: String,

    #[clap(long)]
    rollapp_id: String,

    #[clap(long, default_value = "")]
    moniker: String,

    #[clap(long, default_value = "")]
    website: String,

    #[clap(long, default_value = "")]
    security_contact: String,

    #[clap(long, default_value = "")]
    details: String,
}

pub async fn run(opts: &Opts) -> Result<()> {
    let datastore = Arc::new(super::open_datastore(&opts.datastore_dir)?);
    let service = RegistrationService::create(datastore.clone());

    let msg = MsgRegisterSequencer {
        creator: opts.creator.clone(),
        sequencer_address: opts.sequencer_address.clone(),
        pubkey: KeyEnvelope::new(&opts.key_type, &opts.public_key),
        description: Description {
            moniker: opts.moniker.clone(),
            website: opts.website.clone(),
            security_contact: opts.security_contact.clone(),
            details: opts.details.clone(),
        },
        rollapp_id: opts.rollapp_id.clone(),
    };

    let sequencer = service.register_sequencer(msg).await?;
    let scheduler = Scheduler::find_by_address(&datastore, &sequencer.sequencer_address)
        .await?
        .ok_or_else(|| anyhow!("scheduler record missing after registration"))?;

    println!(
        "Registered sequencer {} for rollapp {}",
        sequencer.sequencer_address, sequencer.rollapp_id
    );
    println!("  role: {}", scheduler.status);

    Ok(())
}
