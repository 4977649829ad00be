use rollhub_registry_datastore::models::description::DescriptionLengthError;
use rollhub_utils::public_key::KeyError;
use thiserror::Error;

/// Terminal registration failures. Every variant aborts the operation
/// before any store write is committed; retrying the same request yields
/// the same outcome.
#[derive(Debug, Error)]
pub enum RegistrationError {
    #[error("sequencer {sequencer_address} is already registered")]
    SequencerAlreadyExists { sequencer_address: String },

    #[error("rollapp {rollapp_id} does not exist")]
    UnknownRollapp { rollapp_id: String },

    #[error("sequencer {sequencer_address} is not permissioned for rollapp {rollapp_id}")]
    SequencerNotPermissioned {
        sequencer_address: String,
        rollapp_id: String,
    },

    #[error("rollapp {rollapp_id} already has the maximum of {max} sequencers")]
    MaxSequencersLimit { rollapp_id: String, max: u64 },

    /// A roster larger than the configured capacity means roster
    /// maintenance broke an invariant somewhere; this is not the ordinary
    /// capacity-reached rejection.
    #[error("rollapp {rollapp_id} cannot have more than {max} sequencers but got {current}")]
    RosterOverCapacity {
        rollapp_id: String,
        max: u64,
        current: usize,
    },

    #[error(transparent)]
    InvalidPublicKeyType(#[from] KeyError),

    #[error(transparent)]
    DescriptionTooLong(#[from] DescriptionLengthError),

    #[error("store access failed: {0}")]
    Store(#[from] anyhow::Error),

    #[error("datastore error: {0}")]
    Datastore(#[from] rollhub_registry_datastore::Error),
}
