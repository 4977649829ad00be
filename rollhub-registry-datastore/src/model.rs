use crate::{Error, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::registry_datastore::{AtomicBatch, RegistryDatastore};

/// A keyed JSON record persisted in the registry datastore.
///
/// `ID_PATH` is a key template with `${key}` placeholders filled from
/// [`Model::get_id_keys`]. Records round-trip through JSON and can either
/// be written immediately with [`Model::save`] or staged into an
/// [`AtomicBatch`] for an all-or-nothing commit.
#[async_trait]
pub trait Model: Sized + Serialize + for<'de> Deserialize<'de> {
    const ID_PATH: &'static str;
    const FIELDS: &'static [&'static str];
    const FIELD_DEFAULTS: &'static [(&'static str, serde_json::Value)];

    fn create_from_json(obj: serde_json::Value) -> Result<Self>;

    fn set_field(&mut self, field: &str, value: serde_json::Value);

    fn get_id_keys(&self) -> HashMap<String, String>;

    fn from_json_string(json: &str) -> Result<Self> {
        let obj: serde_json::Value = serde_json::from_str(json)?;
        Self::create_from_json(obj)
    }

    fn to_json_string(&self) -> String {
        serde_json::to_string(self).unwrap()
    }

    fn to_json_object(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap()
    }

    fn get_id_for(keys: &HashMap<String, String>) -> String {
        let mut id = String::from(Self::ID_PATH);
        for (key, value) in keys {
            id = id.replace(&format!("${{{}}}", key), value);
        }
        id
    }

    fn get_key_names() -> Vec<String> {
        let re = regex::Regex::new(r"\$\{(\w+)\}").unwrap();
        re.captures_iter(Self::ID_PATH)
            .map(|cap| cap[1].to_string())
            .collect()
    }

    fn get_id(&self) -> String {
        let keys = self.get_id_keys();
        Self::get_id_for(&keys)
    }

    async fn save(&self, datastore: &RegistryDatastore) -> Result<()> {
        let json = self.to_json_string();
        datastore.put(&self.get_id(), json.as_bytes()).await
    }

    /// Stage this record into a batch instead of writing it immediately.
    fn stage(&self, batch: &mut AtomicBatch) {
        batch.put(&self.get_id(), self.to_json_string().as_bytes());
    }

    async fn find_one(
        datastore: &RegistryDatastore,
        keys: HashMap<String, String>,
    ) -> Result<Option<Self>> {
        let key = Self::get_id_for(&keys);
        match datastore.get_string(&key).await? {
            Some(value) => Ok(Some(Self::from_json_string(&value)?)),
            None => Ok(None),
        }
    }

    async fn reload(&mut self, datastore: &RegistryDatastore) -> Result<()> {
        let keys = self.get_id_keys();
        if let Some(obj) = Self::find_one(datastore, keys).await? {
            *self = obj;
            Ok(())
        } else {
            Err(Error::KeyNotFound(self.get_id()))
        }
    }

    async fn delete(&self, datastore: &RegistryDatastore) -> Result<()> {
        datastore.delete(&self.get_id()).await
    }
}
