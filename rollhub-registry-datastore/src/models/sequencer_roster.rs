use crate::model::Model;
use crate::{Error, RegistryDatastore};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Per-rollapp ordered set of registered sequencer addresses.
///
/// Holds `len(addresses) <= rollapp.max_sequencers` across every mutation
/// the registry performs. The registry only ever appends; removal belongs
/// elsewhere.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct SequencerRoster {
    pub rollapp_id: String,
    pub addresses: Vec<String>,
}

impl Model for SequencerRoster {
    const ID_PATH: &'static str = "/registry/roster/${rollapp_id}";
    const FIELDS: &'static [&'static str] = &["rollapp_id", "addresses"];
    const FIELD_DEFAULTS: &'static [(&'static str, serde_json::Value)] =
        &[("addresses", serde_json::json!([]))];

    fn create_from_json(mut obj: serde_json::Value) -> crate::Result<Self> {
        for (field, default_value) in Self::FIELD_DEFAULTS {
            if !obj.get(*field).is_some() {
                obj[*field] = default_value.clone();
            }
        }

        if !obj.get("rollapp_id").is_some() {
            return Err(Error::MissingField {
                model: "SequencerRoster",
                field: "rollapp_id",
            });
        }

        Ok(serde_json::from_value(obj)?)
    }

    fn set_field(&mut self, field: &str, value: serde_json::Value) {
        match field {
            "rollapp_id" => self.rollapp_id = value.as_str().unwrap_or_default().to_string(),
            "addresses" => self.addresses = serde_json::from_value(value).unwrap_or_default(),
            _ => {}
        }
    }

    fn get_id_keys(&self) -> HashMap<String, String> {
        let mut keys = HashMap::new();
        keys.insert("rollapp_id".to_string(), self.rollapp_id.clone());
        keys
    }
}

impl SequencerRoster {
    pub fn new(rollapp_id: &str) -> Self {
        Self {
            rollapp_id: rollapp_id.to_string(),
            addresses: Vec::new(),
        }
    }

    pub fn create_from_json(obj: serde_json::Value) -> crate::Result<Self> {
        <Self as Model>::create_from_json(obj)
    }

    pub async fn find_by_rollapp(
        datastore: &RegistryDatastore,
        rollapp_id: &str,
    ) -> Result<Option<Self>> {
        let mut keys = HashMap::new();
        keys.insert("rollapp_id".to_string(), rollapp_id.to_string());
        Self::find_one(datastore, keys)
            .await
            .context("Failed to look up sequencer roster")
    }

    pub fn add_address(&mut self, sequencer_address: String) {
        self.addresses.push(sequencer_address);
    }
}
