use anyhow::Result;
use std::sync::Arc;

use rollhub_registry::{MsgRegisterSequencer, RegistrationError, RegistrationService};
use rollhub_registry_datastore::models::{
    Description, Scheduler, Sequencer, SequencerRoster, SequencerStatus,
};
use rollhub_registry_datastore::RegistryDatastore;
use rollhub_registry_devnet::{Devnet, Identity};
use rollhub_utils::public_key::KeyEnvelope;

struct Harness {
    datastore: Arc<RegistryDatastore>,
    service: RegistrationService,
    identities: Vec<Identity>,
}

fn harness() -> Result<Harness> {
    let datastore = Arc::new(RegistryDatastore::create_in_memory()?);
    let service = RegistrationService::create(datastore.clone());
    let identities = Devnet::new().get_identities(None)?;
    Ok(Harness {
        datastore,
        service,
        identities,
    })
}

fn msg_for(identity: &Identity, rollapp_id: &str) -> MsgRegisterSequencer {
    MsgRegisterSequencer {
        creator: identity.id.clone(),
        sequencer_address: identity.id.clone(),
        pubkey: identity.key_envelope(),
        description: Description::default(),
        rollapp_id: rollapp_id.to_string(),
    }
}

async fn assert_no_trace_of(datastore: &RegistryDatastore, address: &str) -> Result<()> {
    assert!(Sequencer::find_by_address(datastore, address).await?.is_none());
    assert!(Scheduler::find_by_address(datastore, address).await?.is_none());
    Ok(())
}

// Scenario A: open rollapp with capacity 2; first registrant becomes the
// proposer, the second starts inactive, the third bounces off the limit.
#[tokio::test]
async fn test_first_is_proposer_then_inactive_then_limit() -> Result<()> {
    let h = harness()?;
    let devnet = Devnet::new();
    devnet.seed_rollapp(&h.datastore, "roll_1", 2, vec![]).await?;

    let seq1 = &h.identities[0];
    let created = h.service.register_sequencer(msg_for(seq1, "roll_1")).await?;
    assert_eq!(created.sequencer_address, seq1.id);

    let roster = SequencerRoster::find_by_rollapp(&h.datastore, "roll_1").await?.unwrap();
    assert_eq!(roster.addresses, vec![seq1.id.clone()]);
    let scheduler = Scheduler::find_by_address(&h.datastore, &seq1.id).await?.unwrap();
    assert_eq!(scheduler.status, SequencerStatus::Proposer);

    let seq2 = &h.identities[1];
    h.service.register_sequencer(msg_for(seq2, "roll_1")).await?;

    let roster = SequencerRoster::find_by_rollapp(&h.datastore, "roll_1").await?.unwrap();
    assert_eq!(roster.addresses, vec![seq1.id.clone(), seq2.id.clone()]);
    let scheduler = Scheduler::find_by_address(&h.datastore, &seq2.id).await?.unwrap();
    assert_eq!(scheduler.status, SequencerStatus::Inactive);

    let seq3 = &h.identities[2];
    let err = h.service.register_sequencer(msg_for(seq3, "roll_1")).await.unwrap_err();
    assert!(matches!(
        err,
        RegistrationError::MaxSequencersLimit { max: 2, .. }
    ));

    // roster unchanged, no partial writes for the rejected registrant
    let roster = SequencerRoster::find_by_rollapp(&h.datastore, "roll_1").await?.unwrap();
    assert_eq!(roster.addresses.len(), 2);
    assert_no_trace_of(&h.datastore, &seq3.id).await?;
    Ok(())
}

// Scenario B: permissioned rollapp admits only allow-listed addresses.
#[tokio::test]
async fn test_permission_gate() -> Result<()> {
    let h = harness()?;
    let devnet = Devnet::new();
    let allowed = &h.identities[0];
    let outsider = &h.identities[1];
    devnet
        .seed_rollapp(&h.datastore, "roll_2", 5, vec![allowed.id.clone()])
        .await?;

    let err = h
        .service
        .register_sequencer(msg_for(outsider, "roll_2"))
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        RegistrationError::SequencerNotPermissioned { .. }
    ));
    assert_no_trace_of(&h.datastore, &outsider.id).await?;
    assert!(SequencerRoster::find_by_rollapp(&h.datastore, "roll_2").await?.is_none());

    h.service.register_sequencer(msg_for(allowed, "roll_2")).await?;
    let scheduler = Scheduler::find_by_address(&h.datastore, &allowed.id).await?.unwrap();
    assert_eq!(scheduler.status, SequencerStatus::Proposer);
    Ok(())
}

// Scenario C: registering against a rollapp that does not exist.
#[tokio::test]
async fn test_unknown_rollapp() -> Result<()> {
    let h = harness()?;

    let seq = &h.identities[0];
    let err = h.service.register_sequencer(msg_for(seq, "roll_9")).await.unwrap_err();
    match err {
        RegistrationError::UnknownRollapp { rollapp_id } => assert_eq!(rollapp_id, "roll_9"),
        other => panic!("unexpected error: {other}"),
    }
    assert_no_trace_of(&h.datastore, &seq.id).await?;
    assert!(SequencerRoster::find_by_rollapp(&h.datastore, "roll_9").await?.is_none());
    Ok(())
}

// Scenario D: an address registers once, anywhere.
#[tokio::test]
async fn test_duplicate_address_rejected() -> Result<()> {
    let h = harness()?;
    let devnet = Devnet::new();
    devnet.seed_rollapp(&h.datastore, "roll_1", 3, vec![]).await?;
    devnet.seed_rollapp(&h.datastore, "roll_2", 3, vec![]).await?;

    let seq = &h.identities[0];
    h.service.register_sequencer(msg_for(seq, "roll_1")).await?;

    // same rollapp
    let err = h.service.register_sequencer(msg_for(seq, "roll_1")).await.unwrap_err();
    assert!(matches!(
        err,
        RegistrationError::SequencerAlreadyExists { .. }
    ));

    // different rollapp, different ancillary fields
    let mut msg = msg_for(seq, "roll_2");
    msg.description.moniker = "second attempt".to_string();
    let err = h.service.register_sequencer(msg).await.unwrap_err();
    assert!(matches!(
        err,
        RegistrationError::SequencerAlreadyExists { .. }
    ));

    let roster = SequencerRoster::find_by_rollapp(&h.datastore, "roll_1").await?.unwrap();
    assert_eq!(roster.addresses.len(), 1);
    assert!(SequencerRoster::find_by_rollapp(&h.datastore, "roll_2").await?.is_none());
    Ok(())
}

#[tokio::test]
async fn test_invalid_public_key_type_is_atomic() -> Result<()> {
    let h = harness()?;
    let devnet = Devnet::new();
    devnet.seed_rollapp(&h.datastore, "roll_1", 3, vec![]).await?;

    let seq1 = &h.identities[0];
    h.service.register_sequencer(msg_for(seq1, "roll_1")).await?;

    let seq2 = &h.identities[1];
    let mut msg = msg_for(seq2, "roll_1");
    msg.pubkey = KeyEnvelope::new("sr25519", &msg.pubkey.key);
    let err = h.service.register_sequencer(msg).await.unwrap_err();
    assert!(matches!(
        err,
        RegistrationError::InvalidPublicKeyType(_)
    ));
    assert!(err.to_string().contains("sr25519"));

    // the roster mutation computed before the key check must not leak out
    let roster = SequencerRoster::find_by_rollapp(&h.datastore, "roll_1").await?.unwrap();
    assert_eq!(roster.addresses, vec![seq1.id.clone()]);
    assert_no_trace_of(&h.datastore, &seq2.id).await?;
    Ok(())
}

#[tokio::test]
async fn test_oversized_description_is_atomic() -> Result<()> {
    let h = harness()?;
    let devnet = Devnet::new();
    devnet.seed_rollapp(&h.datastore, "roll_1", 3, vec![]).await?;

    let seq = &h.identities[0];
    let mut msg = msg_for(seq, "roll_1");
    msg.description.details = "d".repeat(281);
    let err = h.service.register_sequencer(msg).await.unwrap_err();
    assert!(matches!(err, RegistrationError::DescriptionTooLong(_)));

    // this would have been the first sequencer; no roster may exist
    assert!(SequencerRoster::find_by_rollapp(&h.datastore, "roll_1").await?.is_none());
    assert_no_trace_of(&h.datastore, &seq.id).await?;
    Ok(())
}

// A roster already beyond its configured capacity is an invariant breach,
// reported distinctly from the ordinary capacity-reached rejection.
#[tokio::test]
async fn test_over_capacity_roster_is_an_inconsistency() -> Result<()> {
    use rollhub_registry_datastore::Model;

    let h = harness()?;
    let devnet = Devnet::new();
    devnet.seed_rollapp(&h.datastore, "roll_1", 2, vec![]).await?;

    let mut roster = SequencerRoster::new("roll_1");
    roster.add_address(h.identities[0].id.clone());
    roster.add_address(h.identities[1].id.clone());
    roster.add_address(h.identities[2].id.clone());
    roster.save(&h.datastore).await?;

    let seq = &h.identities[3];
    let err = h.service.register_sequencer(msg_for(seq, "roll_1")).await.unwrap_err();
    match err {
        RegistrationError::RosterOverCapacity {
            rollapp_id,
            max,
            current,
        } => {
            assert_eq!(rollapp_id, "roll_1");
            assert_eq!(max, 2);
            assert_eq!(current, 3);
        }
        other => panic!("unexpected error: {other}"),
    }
    Ok(())
}

// A zero-capacity rollapp still admits its first sequencer: the
// roster-creation branch performs no capacity comparison. The next attempt
// observes the breach.
#[tokio::test]
async fn test_zero_capacity_first_registration() -> Result<()> {
    let h = harness()?;
    let devnet = Devnet::new();
    devnet.seed_rollapp(&h.datastore, "roll_0", 0, vec![]).await?;

    let seq1 = &h.identities[0];
    h.service.register_sequencer(msg_for(seq1, "roll_0")).await?;
    let scheduler = Scheduler::find_by_address(&h.datastore, &seq1.id).await?.unwrap();
    assert_eq!(scheduler.status, SequencerStatus::Proposer);

    let seq2 = &h.identities[1];
    let err = h.service.register_sequencer(msg_for(seq2, "roll_0")).await.unwrap_err();
    assert!(matches!(
        err,
        RegistrationError::RosterOverCapacity { current: 1, .. }
    ));
    Ok(())
}

// The stored record carries everything the request supplied.
#[tokio::test]
async fn test_created_record_round_trips() -> Result<()> {
    let h = harness()?;
    let devnet = Devnet::new();
    devnet.seed_rollapp(&h.datastore, "roll_1", 2, vec![]).await?;

    let seq = &h.identities[0];
    let mut msg = msg_for(seq, "roll_1");
    msg.description = Description {
        moniker: "alder".to_string(),
        website: "https://alder.example".to_string(),
        security_contact: "security@alder.example".to_string(),
        details: "devnet sequencer".to_string(),
    };
    let created = h.service.register_sequencer(msg.clone()).await?;

    let stored = Sequencer::find_by_address(&h.datastore, &seq.id).await?.unwrap();
    assert_eq!(stored, created);
    assert_eq!(stored.creator, msg.creator);
    assert_eq!(stored.pubkey, msg.pubkey);
    assert_eq!(stored.description, msg.description);
    assert_eq!(stored.rollapp_id, "roll_1");
    Ok(())
}
