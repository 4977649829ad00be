use crate::model::Model;
use crate::{Error, RegistryDatastore};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Role assigned to a sequencer at registration time. The first sequencer
/// registered for a rollapp becomes the proposer; every later one starts
/// inactive. Role changes after registration belong to the rotation
/// mechanism, not the registry.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SequencerStatus {
    Proposer,
    Inactive,
}

impl fmt::Display for SequencerStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SequencerStatus::Proposer => write!(f, "proposer"),
            SequencerStatus::Inactive => write!(f, "inactive"),
        }
    }
}

/// Per-sequencer role record.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Scheduler {
    pub sequencer_address: String,
    pub status: SequencerStatus,
}

impl Model for Scheduler {
    const ID_PATH: &'static str = "/registry/scheduler/${sequencer_address}";
    const FIELDS: &'static [&'static str] = &["sequencer_address", "status"];
    const FIELD_DEFAULTS: &'static [(&'static str, serde_json::Value)] = &[];

    fn create_from_json(mut obj: serde_json::Value) -> crate::Result<Self> {
        if !obj.get("status").is_some() {
            obj["status"] = serde_json::json!("inactive");
        }

        if !obj.get("sequencer_address").is_some() {
            return Err(Error::MissingField {
                model: "Scheduler",
                field: "sequencer_address",
            });
        }

        Ok(serde_json::from_value(obj)?)
    }

    fn set_field(&mut self, field: &str, value: serde_json::Value) {
        match field {
            "sequencer_address" => {
                self.sequencer_address = value.as_str().unwrap_or_default().to_string()
            }
            "status" => self.status = serde_json::from_value(value).unwrap(),
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

impl Scheduler {
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
            .context("Failed to look up scheduler record")
    }
}
