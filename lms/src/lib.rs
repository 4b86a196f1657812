//! LMS in Rust
//!
//! This is a strongly typed implementation of Leighton-Micali signatures
//! (RFC 8554), including the SHA-256/192 parameter sets of NIST SP 800-208.
//! You can find the private key, public key, and signature struct
//! documentations in their respective modules. See [lms] for anything LMS
//! related and [ots] for anything LM-OTS related.
//!
//! LMS is a *stateful* scheme: every signature consumes a leaf of the
//! private key's tree and a leaf must never be used twice. [`lms::SigningKey`]
//! advances its counter before it signs; persisting the updated key is left
//! to the caller.
//!
//! ```
//! use lms_signature::lms::{LmsSha256M32H5, SigningKey};
//! use lms_signature::ots::LmsOtsSha256N32W8;
//! use lms_signature::signature::{SignerMut, Verifier};
//!
//! type Mode = LmsSha256M32H5<LmsOtsSha256N32W8>;
//!
//! let mut sk = SigningKey::<Mode>::new_from_seed([0x42; 16], &[0x17; 32])?;
//! let pk = sk.public();
//!
//! let sig: lms_signature::lms::Signature<Mode> = sk.try_sign(b"hello")?;
//! assert_eq!(sk.q(), 1);
//! pk.verify(b"hello", &sig)?;
//!
//! // keys and signatures whose parameter sets are only known at run time
//! lms_signature::verify(&pk.to_bytes(), b"hello", &sig.to_bytes())?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod error;
pub mod hasher;
pub mod lms;
pub mod ots;
pub mod registry;

mod dispatch;

pub(crate) mod constants;
pub mod types;

pub use dispatch::verify;
pub use error::Error;
pub use hasher::Sha256_192;
pub use registry::{LmotsAlgorithm, LmsAlgorithm};
pub use signature;
