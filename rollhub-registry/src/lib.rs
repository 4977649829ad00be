pub mod directory;
pub mod error;
pub mod messages;
pub mod service;

pub use directory::{DatastoreRollappDirectory, RollappDirectory};
pub use error::RegistrationError;
pub use messages::MsgRegisterSequencer;
pub use service::RegistrationService;
