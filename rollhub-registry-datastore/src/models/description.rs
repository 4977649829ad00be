use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const MAX_MONIKER_LENGTH: usize = 70;
pub const MAX_WEBSITE_LENGTH: usize = 140;
pub const MAX_SECURITY_CONTACT_LENGTH: usize = 140;
pub const MAX_DETAILS_LENGTH: usize = 280;

/// Field length violation reported by [`Description::ensure_length`].
#[derive(Debug, Error)]
#[error("description {field} length {length} exceeds maximum {max}")]
pub struct DescriptionLengthError {
    pub field: &'static str,
    pub length: usize,
    pub max: usize,
}

/// Operator-supplied sequencer metadata. Every field is length-bounded.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
pub struct Description {
    pub moniker: String,
    pub website: String,
    pub security_contact: String,
    pub details: String,
}

impl Description {
    pub fn ensure_length(&self) -> Result<(), DescriptionLengthError> {
        Self::ensure_field("moniker", &self.moniker, MAX_MONIKER_LENGTH)?;
        Self::ensure_field("website", &self.website, MAX_WEBSITE_LENGTH)?;
        Self::ensure_field(
            "security_contact",
            &self.security_contact,
            MAX_SECURITY_CONTACT_LENGTH,
        )?;
        Self::ensure_field("details", &self.details, MAX_DETAILS_LENGTH)?;
        Ok(())
    }

    fn ensure_field(
        field: &'static str,
        value: &str,
        max: usize,
    ) -> Result<(), DescriptionLengthError> {
        if value.len() > max {
            return Err(DescriptionLengthError {
                field,
                length: value.len(),
                max,
            });
        }
        Ok(())
    }
}
