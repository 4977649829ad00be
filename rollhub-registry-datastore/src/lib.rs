mod error;
mod model;
pub mod models;
mod registry_datastore;

pub use error::Error;
pub use model::Model;
pub use registry_datastore::{AtomicBatch, RegistryDatastore};

pub type Result<T> = std::result::Result<T, Error>;
