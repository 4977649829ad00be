use crate::model::Model;
use crate::{Error, RegistryDatastore};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Rollapp namespace configuration. Owned and written by the rollapp
/// management module; the sequencer registry only reads it.
///
/// An empty `permissioned_addresses` list means open admission.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Rollapp {
    pub rollapp_id: String,
    pub max_sequencers: u64,
    pub permissioned_addresses: Vec<String>,
}

impl Model for Rollapp {
    const ID_PATH: &'static str = "/registry/rollapp/${rollapp_id}";
    const FIELDS: &'static [&'static str] =
        &["rollapp_id", "max_sequencers", "permissioned_addresses"];
    const FIELD_DEFAULTS: &'static [(&'static str, serde_json::Value)] =
        &[("permissioned_addresses", serde_json::json!([]))];

    fn create_from_json(mut obj: serde_json::Value) -> crate::Result<Self> {
        for (field, default_value) in Self::FIELD_DEFAULTS {
            if !obj.get(*field).is_some() {
                obj[*field] = default_value.clone();
            }
        }

        if !obj.get("max_sequencers").is_some() {
            obj["max_sequencers"] = serde_json::json!(0);
        }

        if !obj.get("rollapp_id").is_some() {
            return Err(Error::MissingField {
                model: "Rollapp",
                field: "rollapp_id",
            });
        }

        Ok(serde_json::from_value(obj)?)
    }

    fn set_field(&mut self, field: &str, value: serde_json::Value) {
        match field {
            "rollapp_id" => self.rollapp_id = value.as_str().unwrap_or_default().to_string(),
            "max_sequencers" => self.max_sequencers = value.as_u64().unwrap_or_default(),
            "permissioned_addresses" => {
                self.permissioned_addresses = serde_json::from_value(value).unwrap_or_default()
            }
            _ => {}
        }
    }

    fn get_id_keys(&self) -> HashMap<String, String> {
        let mut keys = HashMap::new();
        keys.insert("rollapp_id".to_string(), self.rollapp_id.clone());
        keys
    }
}

impl Rollapp {
    pub fn create_from_json(obj: serde_json::Value) -> crate::Result<Self> {
        <Self as Model>::create_from_json(obj)
    }

    pub async fn find_by_id(
        datastore: &RegistryDatastore,
        rollapp_id: &str,
    ) -> Result<Option<Self>> {
        let mut keys = HashMap::new();
        keys.insert("rollapp_id".to_string(), rollapp_id.to_string());
        Self::find_one(datastore, keys)
            .await
            .context("Failed to look up rollapp")
    }

    pub fn is_open_admission(&self) -> bool {
        self.permissioned_addresses.is_empty()
    }

    pub fn permits(&self, sequencer_address: &str) -> bool {
        self.is_open_admission()
            || self
                .permissioned_addresses
                .iter()
                .any(|address| address == sequencer_address)
    }
}

pub mod prelude {
    pub use super::Rollapp;
    pub use crate::Model;
    pub use crate::RegistryDatastore;
}
