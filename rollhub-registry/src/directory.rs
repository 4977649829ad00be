use anyhow::Result;
use async_trait::async_trait;
use std::sync::Arc;

use rollhub_registry_datastore::models::Rollapp;
use rollhub_registry_datastore::RegistryDatastore;

/// Read-only lookup of rollapp namespace configuration.
///
/// Rollapp records are owned by the rollapp management module; the
/// registry consumes this interface and never writes through it. A missing
/// rollapp is an expected outcome, not an error.
#[async_trait]
pub trait RollappDirectory: Send + Sync {
    async fn lookup(&self, rollapp_id: &str) -> Result<Option<Rollapp>>;
}

/// Directory backed by the registry datastore.
pub struct DatastoreRollappDirectory {
    datastore: Arc<RegistryDatastore>,
}

impl DatastoreRollappDirectory {
    pub fn new(datastore: Arc<RegistryDatastore>) -> Self {
        Self { datastore }
    }
}

#[async_trait]
impl RollappDirectory for DatastoreRollappDirectory {
    async fn lookup(&self, rollapp_id: &str) -> Result<Option<Rollapp>> {
        Rollapp::find_by_id(&self.datastore, rollapp_id).await
    }
}
