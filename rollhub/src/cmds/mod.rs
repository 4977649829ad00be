pub mod add_rollapp;
pub mod list_sequencers;
pub mod register_sequencer;
pub mod show_roster;
pub mod show_sequencer;

use anyhow::{Context, Result};
use std::path::PathBuf;

use rollhub_registry_datastore::RegistryDatastore;

pub(crate) fn open_datastore(dir: &Option<PathBuf>) -> Result<RegistryDatastore> {
    let dir = match dir {
        Some(dir) => dir.clone(),
        None => dirs::data_local_dir()
            .context("Could not resolve a local data directory; pass --datastore-dir")?
            .join("rollhub")
            .join("registry"),
    };
    std::fs::create_dir_all(&dir).context("Failed to create datastore directory")?;
    RegistryDatastore::create_in_directory(&dir).context("Failed to open registry datastore")
}
