use crate::model::Model;
use crate::models::description::Description;
use crate::{Error, RegistryDatastore};
use anyhow::{anyhow, Context, Result};
use rollhub_utils::public_key::KeyEnvelope;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A registered block-sequencing participant. Created exactly once per
/// address; the registry never updates or deletes these records.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Sequencer {
    pub creator: String,
    pub sequencer_address: String,
    pub pubkey: KeyEnvelope,
    pub description: Description,
    pub rollapp_id: String,
}

impl Model for Sequencer {
    const ID_PATH: &'static str = "/registry/sequencer/${sequencer_address}";
    const FIELDS: &'static [&'static str] = &[
        "creator",
        "sequencer_address",
        "pubkey",
        "description",
        "rollapp_id",
    ];
    const FIELD_DEFAULTS: &'static [(&'static str, serde_json::Value)] = &[];

    fn create_from_json(mut obj: serde_json::Value) -> crate::Result<Self> {
        if !obj.get("description").is_some() {
            obj["description"] = serde_json::json!({
                "moniker": "",
                "website": "",
                "security_contact": "",
                "details": "",
            });
        }

        if !obj.get("sequencer_address").is_some() {
            return Err(Error::MissingField {
                model: "Sequencer",
                field: "sequencer_address",
            });
        }
        if !obj.get("rollapp_id").is_some() {
            return Err(Error::MissingField {
                model: "Sequencer",
                field: "rollapp_id",
            });
        }

        Ok(serde_json::from_value(obj)?)
    }

    fn set_field(&mut self, field: &str, value: serde_json::Value) {
        match field {
            "creator" => self.creator = value.as_str().unwrap_or_default().to_string(),
            "sequencer_address" => {
                self.sequencer_address = value.as_str().unwrap_or_default().to_string()
            }
            "pubkey" => self.pubkey = serde_json::from_value(value).unwrap(),
            "description" => self.description = serde_json::from_value(value).unwrap_or_default(),
            "rollapp_id" => self.rollapp_id = value.as_str().unwrap_or_default().to_string(),
            _ => {}
        }
    }

    fn get_id_keys(&self) -> HashMap<String, String> {
        let mut keys = HashMap::new();
        keys.insert(
            "sequencer_address".to_string(),
            self.sequencer_address.clone(),
        );
        keys
    }
}

impl Sequencer {
    pub fn create_from_json(obj: serde_json::Value) -> crate::Result<Self> {
        <Self as Model>::create_from_json(obj)
    }

    pub async fn find_by_address(
        datastore: &RegistryDatastore,
        sequencer_address: &str,
    ) -> Result<Option<Self>> {
        let mut keys = HashMap::new();
        keys.insert(
            "sequencer_address".to_string(),
            sequencer_address.to_string(),
        );
        Self::find_one(datastore, keys)
            .await
            .context("Failed to look up sequencer")
    }

    pub async fn find_all(datastore: &RegistryDatastore) -> Result<Vec<Self>> {
        let prefix = "/registry/sequencer";
        let mut sequencers = Vec::new();

        let iterator = datastore.iterator(prefix);
        for result in iterator {
            let (key, _) = result?;
            let key_str = String::from_utf8(key.to_vec())?;
            let sequencer_address = key_str
                .split(&format!("{}/", prefix))
                .nth(1)
                .ok_or_else(|| anyhow!("Invalid key format: {}", key_str))?;

            let mut keys = HashMap::new();
            keys.insert(
                "sequencer_address".to_string(),
                sequencer_address.to_string(),
            );

            if let Some(sequencer) = Self::find_one(datastore, keys).await? {
                sequencers.push(sequencer);
            }
        }

        Ok(sequencers)
    }

    pub async fn find_all_by_rollapp(
        datastore: &RegistryDatastore,
        rollapp_id: &str,
    ) -> Result<Vec<Self>> {
        let sequencers = Self::find_all(datastore).await?;
        Ok(sequencers
            .into_iter()
            .filter(|sequencer| sequencer.rollapp_id == rollapp_id)
            .collect())
    }
}

pub mod prelude {
    pub use super::Sequencer;
    pub use crate::Model;
    pub use crate::RegistryDatastore;
}
