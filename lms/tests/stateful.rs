//! Key state handling: persisting, restoring and sharing LMS private keys.

use lms_signature::lms::{LmsSha256M32H5, SharedSigningKey, Signature, SigningKey, VerifyingKey};
use lms_signature::ots::LmsOtsSha256N32W1;
use lms_signature::signature::{Keypair, Signer, SignerMut, Verifier};
use lms_signature::Error;
use std::collections::HashSet;
use std::sync::Arc;

// W1 keeps the 32 leaf tree cheap to rebuild on every reload
type Mode = LmsSha256M32H5<LmsOtsSha256N32W1>;

const ID: [u8; 16] = [0x5a; 16];
const SEED: [u8; 32] = [0xa5; 32];

fn fresh() -> SigningKey<Mode> {
    SigningKey::new_from_seed(ID, &SEED).unwrap()
}

#[test]
fn reload_after_every_signature() {
    let mut stored = fresh().to_bytes();
    let pk = fresh().public();
    let mut leaves = HashSet::new();

    for i in 0..32u32 {
        let mut sk = SigningKey::<Mode>::try_from(stored.as_slice()).unwrap();
        assert_eq!(sk.q(), i);
        let msg = i.to_be_bytes();
        let sig: Signature<Mode> = sk.try_sign(&msg).unwrap();
        stored = sk.to_bytes();

        assert!(pk.verify(&msg, &sig).is_ok());
        assert!(leaves.insert(sig.q()));
    }

    let mut sk = SigningKey::<Mode>::try_from(stored.as_slice()).unwrap();
    assert!(sk.is_exhausted());
    assert_eq!(sk.remaining(), 0);
    assert_eq!(
        sk.try_sign_with_randomizer(b"one more", None).err(),
        Some(Error::KeyExhausted)
    );
    // a refused signature leaves the stored state alone
    assert_eq!(sk.to_bytes(), stored);
}

#[test]
fn serialization_is_stable() {
    let mut sk = fresh();
    let _: Signature<Mode> = sk.try_sign(b"advance").unwrap();

    let bytes = sk.to_bytes();
    assert_eq!(bytes.len(), 4 + 4 + 4 + 16 + 32);
    assert_eq!(&bytes[8..12], &1u32.to_be_bytes());

    let reloaded = SigningKey::<Mode>::try_from(bytes.as_slice()).unwrap();
    assert_eq!(reloaded, sk);
    assert_eq!(reloaded.to_bytes(), bytes);
}

#[test]
fn lazy_tree() {
    let mut sk = fresh();
    let _: Signature<Mode> = sk.try_sign(b"advance").unwrap();
    let bytes = sk.to_bytes();

    let mut lazy = SigningKey::<Mode>::from_bytes_without_tree(&bytes).unwrap();
    assert_eq!(lazy.q(), 1);
    assert_eq!(lazy.public(), sk.public());

    let mut precomputed = SigningKey::<Mode>::from_bytes_without_tree(&bytes).unwrap();
    precomputed.precompute();

    let a: Signature<Mode> = lazy.try_sign(b"same").unwrap();
    let b: Signature<Mode> = precomputed.try_sign(b"same").unwrap();
    assert_eq!(a, b);
    assert!(sk.public().verify(b"same", &a).is_ok());
}

#[test]
fn same_seed_same_key() {
    let a = fresh();
    let b = fresh();
    assert_eq!(a.public(), b.public());
    assert_eq!(a.verifying_key(), a.public());

    let other = SigningKey::<Mode>::new_from_seed([0x5b; 16], &SEED).unwrap();
    assert_ne!(a.public(), other.public());
}

#[test]
fn public_key_survives_encoding() {
    let pk = fresh().public();
    let bytes: Vec<u8> = pk.clone().into();
    assert_eq!(&bytes[..4], &5u32.to_be_bytes());
    assert_eq!(&bytes[4..8], &1u32.to_be_bytes());
    assert_eq!(&bytes[8..24], &ID);
    assert_eq!(VerifyingKey::<Mode>::try_from(bytes.as_slice()), Ok(pk));
}

#[test]
fn shared_key_across_threads() {
    let sk = fresh();
    let pk = sk.public();
    let shared = Arc::new(SharedSigningKey::from(sk));

    let handles: Vec<_> = (0..8u8)
        .map(|t| {
            let shared = Arc::clone(&shared);
            std::thread::spawn(move || {
                (0..4)
                    .map(|i| {
                        let msg = [t, i];
                        let sig: Signature<Mode> = shared.try_sign(&msg).unwrap();
                        (msg, sig)
                    })
                    .collect::<Vec<_>>()
            })
        })
        .collect();

    let mut leaves = HashSet::new();
    for handle in handles {
        for (msg, sig) in handle.join().unwrap() {
            assert!(pk.verify(&msg, &sig).is_ok());
            assert!(leaves.insert(sig.q()));
        }
    }
    assert_eq!(leaves.len(), 32);

    let shared = Arc::into_inner(shared).unwrap();
    assert!(shared.is_exhausted());
    let sk = shared.into_signing_key();
    assert_eq!(sk.q(), 32);
    assert!(sk.is_exhausted());
}
