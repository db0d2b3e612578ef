//! Behavioral properties of the attestation registry.
//!
//! Exercises the write-once rule, commitment soundness, counter
//! consistency and proof idempotence against the in-memory store.

use obscura_core::{
    commitment_digest, AttestationRecord, AttestationRegistry, MemoryAttestationStore, OwnerId,
    RegistryError, Word,
};

const LEDGER_TIME: u64 = 1_720_000_000_000;

fn registry() -> AttestationRegistry<MemoryAttestationStore> {
    AttestationRegistry::new(MemoryAttestationStore::new())
}

fn word(byte: u8) -> Word {
    Word::from_bytes([byte; 32])
}

fn owner(byte: u8) -> OwnerId {
    OwnerId::from_bytes([byte; 20])
}

#[tokio::test]
async fn register_then_lookup_reflects_record() {
    // Scenario A: register 0xAA..AA with H(0xAA..AA ‖ 0x11..11) from addr1.
    let registry = registry();
    let hash = word(0xAA);
    let commitment = commitment_digest(&hash, &word(0x11));

    registry
        .register(hash, commitment, owner(1), LEDGER_TIME)
        .await
        .expect("fresh hash registers");

    assert!(registry.is_verified(&hash).await.unwrap());
    assert_eq!(registry.get_owner_of(&hash).await.unwrap(), owner(1));
    assert_eq!(registry.photo_count().await.unwrap(), 1);

    let record = registry.get_attestation(&hash).await.unwrap();
    assert_eq!(record.verified_at, LEDGER_TIME);
    assert_eq!(record.commitment, commitment);
}

#[tokio::test]
async fn write_once_rejects_any_second_registration() {
    // Scenario B: a second register for the same hash fails from any owner
    // with any commitment, and the stored record is untouched.
    let registry = registry();
    let hash = word(0xAA);
    let commitment = commitment_digest(&hash, &word(0x11));

    registry
        .register(hash, commitment, owner(1), LEDGER_TIME)
        .await
        .unwrap();

    for (attempt_commitment, attempt_owner) in [
        (word(0x00), owner(1)),
        (commitment, owner(1)),
        (word(0xDD), owner(9)),
    ] {
        let err = registry
            .register(hash, attempt_commitment, attempt_owner, LEDGER_TIME + 1)
            .await
            .unwrap_err();
        assert!(matches!(err, RegistryError::AlreadyRegistered(h) if h == hash));
    }

    let record = registry.get_attestation(&hash).await.unwrap();
    assert_eq!(record.verified_at, LEDGER_TIME);
    assert_eq!(record.owner, owner(1));
    assert_eq!(record.commitment, commitment);
    assert_eq!(registry.photo_count().await.unwrap(), 1);
}

#[tokio::test]
async fn proof_accepts_the_secret_and_rejects_guesses() {
    // Scenario C: the original secret proves, another value does not, and
    // neither call moves the counters.
    let registry = registry();
    let hash = word(0xAA);
    let secret = word(0x11);

    registry
        .register(hash, commitment_digest(&hash, &secret), owner(1), LEDGER_TIME)
        .await
        .unwrap();

    assert!(registry.verify_proof(&hash, &secret).await.unwrap());
    assert!(!registry.verify_proof(&hash, &word(0x22)).await.unwrap());
    assert_eq!(registry.photo_count().await.unwrap(), 1);
}

#[tokio::test]
async fn absent_hash_reads_as_zeros() {
    // Scenario D: an unregistered hash reads as the zero tuple.
    let registry = registry();
    let hash = word(0xFF);

    let record = registry.get_attestation(&hash).await.unwrap();
    assert_eq!(record, AttestationRecord::absent());
    assert_eq!(record.verified_at, 0);
    assert_eq!(record.owner, OwnerId::ZERO);
    assert_eq!(record.commitment, Word::ZERO);
    assert!(!registry.is_verified(&hash).await.unwrap());
}

#[tokio::test]
async fn commitment_soundness_over_many_bindings() {
    // verify_proof(h, s) is true iff a record exists for h and
    // H(h ‖ s) matches the stored commitment.
    let registry = registry();
    let secrets: Vec<Word> = (1u8..=8).map(word).collect();

    for (i, secret) in secrets.iter().enumerate() {
        let hash = word(0x10 + i as u8);
        registry
            .register(
                hash,
                commitment_digest(&hash, secret),
                owner(1),
                LEDGER_TIME + i as u64,
            )
            .await
            .unwrap();
    }

    for (i, secret) in secrets.iter().enumerate() {
        let hash = word(0x10 + i as u8);
        for (j, candidate) in secrets.iter().enumerate() {
            let expected = i == j;
            assert_eq!(
                registry.verify_proof(&hash, candidate).await.unwrap(),
                expected,
                "hash {} against secret {}",
                hash,
                candidate
            );
        }
    }

    // Secrets used as hashes are unregistered: always false.
    assert!(!registry
        .verify_proof(&secrets[0], &secrets[0])
        .await
        .unwrap());
}

#[tokio::test]
async fn counters_match_the_population() {
    let registry = registry();

    // owner(1) registers three hashes, owner(2) registers two.
    for byte in [0x01, 0x02, 0x03] {
        let hash = word(byte);
        registry
            .register(hash, commitment_digest(&hash, &word(0x11)), owner(1), LEDGER_TIME)
            .await
            .unwrap();
    }
    for byte in [0x04, 0x05] {
        let hash = word(byte);
        registry
            .register(hash, commitment_digest(&hash, &word(0x11)), owner(2), LEDGER_TIME)
            .await
            .unwrap();
    }

    assert_eq!(registry.photo_count().await.unwrap(), 5);
    assert_eq!(registry.owner_photo_count(&owner(1)).await.unwrap(), 3);
    assert_eq!(registry.owner_photo_count(&owner(2)).await.unwrap(), 2);
    assert_eq!(registry.owner_photo_count(&owner(3)).await.unwrap(), 0);

    // Failed duplicates and proof checks leave every counter in place.
    let _ = registry
        .register(word(0x01), word(0xEE), owner(3), LEDGER_TIME)
        .await;
    let _ = registry.verify_proof(&word(0x01), &word(0x11)).await;

    assert_eq!(registry.photo_count().await.unwrap(), 5);
    assert_eq!(registry.owner_photo_count(&owner(3)).await.unwrap(), 0);
}

#[tokio::test]
async fn proof_checks_are_idempotent() {
    let registry = registry();
    let hash = word(0xAA);
    let secret = word(0x11);

    registry
        .register(hash, commitment_digest(&hash, &secret), owner(1), LEDGER_TIME)
        .await
        .unwrap();

    let before = registry.get_attestation(&hash).await.unwrap();

    for _ in 0..10 {
        assert!(registry.verify_proof(&hash, &secret).await.unwrap());
        assert!(!registry.verify_proof(&hash, &word(0x22)).await.unwrap());
    }

    // Byte-identical record before and after.
    assert_eq!(registry.get_attestation(&hash).await.unwrap(), before);
}
