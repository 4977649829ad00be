use log::debug;
use std::sync::Arc;

use rollhub_registry_datastore::models::{Scheduler, Sequencer, SequencerRoster, SequencerStatus};
use rollhub_registry_datastore::{AtomicBatch, Model, RegistryDatastore};

use crate::directory::{DatastoreRollappDirectory, RollappDirectory};
use crate::error::RegistrationError;
use crate::messages::MsgRegisterSequencer;

/// Orchestrates sequencer admission for rollapps.
///
/// One registration request runs to completion on its own: reads first,
/// then every validation, and only then a single atomic commit of the
/// sequencer, roster, and scheduler records. A failure at any step leaves
/// the datastore exactly as it was.
pub struct RegistrationService {
    datastore: Arc<RegistryDatastore>,
    directory: Arc<dyn RollappDirectory>,
}

impl RegistrationService {
    pub fn new(datastore: Arc<RegistryDatastore>, directory: Arc<dyn RollappDirectory>) -> Self {
        Self {
            datastore,
            directory,
        }
    }

    /// Wire the service over a single datastore, using it both for the
    /// registry stores and as the rollapp directory.
    pub fn create(datastore: Arc<RegistryDatastore>) -> Self {
        let directory = Arc::new(DatastoreRollappDirectory::new(datastore.clone()));
        Self::new(datastore, directory)
    }

    pub async fn register_sequencer(
        &self,
        msg: MsgRegisterSequencer,
    ) -> Result<Sequencer, RegistrationError> {
        // one registration per address, ever; duplicates are never merged
        if Sequencer::find_by_address(&self.datastore, &msg.sequencer_address)
            .await?
            .is_some()
        {
            return Err(RegistrationError::SequencerAlreadyExists {
                sequencer_address: msg.sequencer_address,
            });
        }

        // admission rules come from the rollapp record
        let rollapp = self
            .directory
            .lookup(&msg.rollapp_id)
            .await?
            .ok_or_else(|| RegistrationError::UnknownRollapp {
                rollapp_id: msg.rollapp_id.clone(),
            })?;

        // a non-empty allow-list means only permissioned sequencers join
        if !rollapp.permits(&msg.sequencer_address) {
            return Err(RegistrationError::SequencerNotPermissioned {
                sequencer_address: msg.sequencer_address,
                rollapp_id: msg.rollapp_id,
            });
        }

        let (roster, status) =
            match SequencerRoster::find_by_rollapp(&self.datastore, &msg.rollapp_id).await? {
                Some(mut roster) => {
                    let current = roster.addresses.len();
                    let max = rollapp.max_sequencers;
                    if current > max as usize {
                        return Err(RegistrationError::RosterOverCapacity {
                            rollapp_id: msg.rollapp_id,
                            max,
                            current,
                        });
                    }
                    if current == max as usize {
                        return Err(RegistrationError::MaxSequencersLimit {
                            rollapp_id: msg.rollapp_id,
                            max,
                        });
                    }
                    // not the first sequencer, starts inactive
                    roster.add_address(msg.sequencer_address.clone());
                    (roster, SequencerStatus::Inactive)
                }
                None => {
                    // first sequencer of this rollapp becomes the proposer
                    let mut roster = SequencerRoster::new(&msg.rollapp_id);
                    roster.add_address(msg.sequencer_address.clone());
                    (roster, SequencerStatus::Proposer)
                }
            };

        msg.pubkey.decode()?;
        msg.description.ensure_length()?;

        let scheduler = Scheduler {
            sequencer_address: msg.sequencer_address.clone(),
            status,
        };
        let sequencer = Sequencer {
            creator: msg.creator,
            sequencer_address: msg.sequencer_address,
            pubkey: msg.pubkey,
            description: msg.description,
            rollapp_id: msg.rollapp_id,
        };

        let mut batch = AtomicBatch::new();
        roster.stage(&mut batch);
        scheduler.stage(&mut batch);
        sequencer.stage(&mut batch);
        self.datastore.commit(batch).await?;

        debug!(
            "registered sequencer {} for rollapp {} as {}",
            sequencer.sequencer_address, sequencer.rollapp_id, scheduler.status
        );

        Ok(sequencer)
    }
}
