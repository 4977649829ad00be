use rollhub_registry_datastore::models::Description;
use rollhub_utils::public_key::KeyEnvelope;
use serde::{Deserialize, Serialize};

/// Request to register a new sequencer for a rollapp.
///
/// Address well-formedness and request authentication are the caller's
/// responsibility; the registration service performs domain validation
/// only.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct MsgRegisterSequencer {
    pub creator: String,
    pub sequencer_address: String,
    pub pubkey: KeyEnvelope,
    pub description: Description,
    pub rollapp_id: String,
}
