use anyhow::Result;
use lazy_static::lazy_static;
use serde_json::{self, Value};
use std::collections::HashMap;

use rollhub_registry_datastore::models::Rollapp;
use rollhub_registry_datastore::{Model, RegistryDatastore};
use rollhub_utils::public_key::KeyEnvelope;

pub const FIXTURES_JSON: &str = include_str!("../fixtures.json");

lazy_static! {
    pub static ref FIXTURES: HashMap<String, Value> = {
        serde_json::from_str(FIXTURES_JSON).expect("Failed to parse static fixtures.json")
    };
}

/// A named devnet identity: a sequencer address with its public key
/// envelope.
#[derive(Debug, Clone, serde::Deserialize)]
pub struct Identity {
    pub id: String,
    pub key_type: String,
    pub public_key: String,
}

impl Identity {
    pub fn key_envelope(&self) -> KeyEnvelope {
        KeyEnvelope::new(&self.key_type, &self.public_key)
    }
}

pub struct Devnet;

impl Devnet {
    pub fn new() -> Self {
        Self
    }

    pub fn get_identities(&self, count: Option<usize>) -> Result<Vec<Identity>> {
        let count = count.unwrap_or_else(|| FIXTURES.len());

        if count > FIXTURES.len() {
            return Err(anyhow::anyhow!("not enough fixture identities"));
        }

        let mut result = Vec::with_capacity(count);
        for fixture in FIXTURES.values().take(count) {
            result.push(serde_json::from_value(fixture.clone())?);
        }

        Ok(result)
    }

    pub fn get_identity_by_index(&self, index: usize) -> Result<Identity> {
        if index >= FIXTURES.len() {
            return Err(anyhow::anyhow!("not enough fixture identities"));
        }

        let fixture = FIXTURES
            .values()
            .nth(index)
            .ok_or_else(|| anyhow::anyhow!("Invalid index"))?;

        Ok(serde_json::from_value(fixture.clone())?)
    }

    pub fn get_addresses(&self, count: Option<usize>) -> Result<Vec<String>> {
        let identities = self.get_identities(count)?;
        Ok(identities.into_iter().map(|identity| identity.id).collect())
    }

    /// Plant a rollapp record the way the rollapp management module would.
    pub async fn seed_rollapp(
        &self,
        datastore: &RegistryDatastore,
        rollapp_id: &str,
        max_sequencers: u64,
        permissioned_addresses: Vec<String>,
    ) -> Result<Rollapp> {
        let rollapp = Rollapp {
            rollapp_id: rollapp_id.to_string(),
            max_sequencers,
            permissioned_addresses,
        };
        rollapp.save(datastore).await?;
        Ok(rollapp)
    }
}

impl Default for Devnet {
    fn default() -> Self {
        Self::new()
    }
}
