//! Error types

/// Errors returned by key generation, signing, parsing and verification.
#[derive(Clone, Copy, Debug, Eq, PartialEq, thiserror::Error)]
pub enum Error {
    /// The typecode does not name any LMS or LM-OTS parameter set known to
    /// this crate.
    #[error("unsupported parameter set: typecode 0x{0:08x}")]
    UnsupportedParameter(u32),
    /// The typecode is known, but does not match the parameter set that was
    /// requested.
    #[error("wrong algorithm: expected typecode 0x{expected:08x}, got 0x{got:08x}")]
    WrongAlgorithm {
        /// Typecode of the requested parameter set.
        expected: u32,
        /// Typecode found in the input.
        got: u32,
    },
    /// The LMS and LM-OTS parameter sets do not use the same hash output size.
    #[error("incompatible parameter sets: lms 0x{lms:08x}, lmots 0x{lmots:08x}")]
    IncompatibleParameters {
        /// LMS typecode.
        lms: u32,
        /// LM-OTS typecode.
        lmots: u32,
    },
    /// Every leaf of the tree has already been used to sign.
    #[error("private key has been exhausted")]
    KeyExhausted,
    /// The public key root is too short or has the wrong length.
    #[error("invalid public key")]
    InvalidPublicKey,
    /// The signature does not have the length implied by its typecodes.
    #[error("invalid signature length: expected {expected}, got {got}")]
    InvalidSignatureLength {
        /// Length implied by the parameter set.
        expected: usize,
        /// Length of the input.
        got: usize,
    },
    /// The signature is structurally invalid, e.g. its leaf index is out of
    /// range for the tree height.
    #[error("invalid signature encoding")]
    InvalidSignatureEncoding,
    /// The serialized private key is truncated, has trailing bytes, or holds
    /// an out of range counter.
    #[error("invalid private key encoding")]
    InvalidPrivateKeyEncoding,
    /// The seed has the wrong length for the parameter set.
    #[error("invalid seed length: expected {expected}, got {got}")]
    InvalidSeedLength {
        /// `M`, the node size of the parameter set.
        expected: usize,
        /// Length of the provided seed.
        got: usize,
    },
    /// The randomizer `C` has the wrong length for the LM-OTS parameter set.
    #[error("invalid randomizer length: expected {expected}, got {got}")]
    InvalidRandomizerLength {
        /// `n`, the hash size of the LM-OTS parameter set.
        expected: usize,
        /// Length of the provided randomizer.
        got: usize,
    },
    /// The one-time key for a leaf could not be derived.
    #[error("failed to derive LM-OTS key pair")]
    OtsDerivationFailed,
    /// The signature did not verify under the public key.
    #[error("signature verification failed")]
    VerificationFailed,
}

impl From<Error> for signature::Error {
    fn from(_: Error) -> Self {
        signature::Error::new()
    }
}
