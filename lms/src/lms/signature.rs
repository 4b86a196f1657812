//! Contains the [Signature] type

use crate::error::Error;
use crate::lms::LmsMode;
use crate::ots::modes::LmsOtsMode;
use crate::ots::Signature as OtsSignature;
use crate::registry::{LmotsAlgorithm, LmsAlgorithm};
use crate::types::{read_u32, Typecode};
use digest::Output;
use signature::SignatureEncoding;

/// Opaque struct representing a LMS signature
pub struct Signature<Mode: LmsMode> {
    pub(crate) q: u32,
    pub(crate) lmots_sig: OtsSignature<Mode::OtsMode>,
    pub(crate) path: Vec<Output<Mode::Hasher>>,
}

// manual implementation is required to not require bounds on Mode
impl<Mode: LmsMode> Clone for Signature<Mode> {
    fn clone(&self) -> Self {
        Self {
            q: self.q,
            lmots_sig: self.lmots_sig.clone(),
            path: self.path.clone(),
        }
    }
}

// manual implementation is required to not require bounds on Mode
impl<Mode: LmsMode> PartialEq for Signature<Mode> {
    fn eq(&self, other: &Self) -> bool {
        self.q == other.q && self.lmots_sig == other.lmots_sig && self.path == other.path
    }
}

impl<Mode: LmsMode> Eq for Signature<Mode> {}

impl<Mode: LmsMode> core::fmt::Debug for Signature<Mode> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Signature")
            .field("typecode", &Mode::TYPECODE)
            .field("q", &self.q)
            .field("lmots_sig", &self.lmots_sig)
            .finish_non_exhaustive()
    }
}

impl<Mode: LmsMode> Signature<Mode> {
    /// The leaf index used to produce the signature.
    pub fn q(&self) -> u32 {
        self.q
    }

    /// The embedded LM-OTS signature.
    pub fn lmots_signature(&self) -> &OtsSignature<Mode::OtsMode> {
        &self.lmots_sig
    }

    /// The authentication path, leaf level first.
    pub fn path(&self) -> &[Output<Mode::Hasher>] {
        &self.path
    }

    /// Returns `u32str(q) || lmots_signature || u32str(type) || path[0] || ... || path[h-1]`.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut sig = Vec::with_capacity(Mode::SIG_LEN);
        sig.extend_from_slice(&self.q.to_be_bytes());
        sig.extend_from_slice(&self.lmots_sig.to_bytes());
        sig.extend_from_slice(&Mode::TYPECODE.to_be_bytes());
        for node in &self.path {
            sig.extend_from_slice(node);
        }
        sig
    }
}

impl<Mode: LmsMode> SignatureEncoding for Signature<Mode> {
    type Repr = Vec<u8>;
}

impl<Mode: LmsMode> From<Signature<Mode>> for Vec<u8> {
    fn from(val: Signature<Mode>) -> Self {
        val.to_bytes()
    }
}

/// Tries to parse a [Signature] from an exact slice
impl<Mode: LmsMode> TryFrom<&[u8]> for Signature<Mode> {
    type Error = Error;

    fn try_from(sig: &[u8]) -> Result<Self, Self::Error> {
        // Follows the validations in algorithm 6a of RFC 8554
        let bad_len = Error::InvalidSignatureLength {
            expected: Mode::SIG_LEN,
            got: sig.len(),
        };

        // 6a.2.a: Get q
        let q = read_u32(sig).ok_or(bad_len)?;

        // 6a.2.b-d: the LM-OTS typecode must be known and match the mode
        let otstype = read_u32(&sig[4..]).ok_or(bad_len)?;
        LmotsAlgorithm::lookup(otstype)?;
        if otstype != <Mode::OtsMode as Typecode>::TYPECODE {
            return Err(Error::WrongAlgorithm {
                expected: <Mode::OtsMode as Typecode>::TYPECODE,
                got: otstype,
            });
        }

        // 6a.2.e-g: the LMS typecode follows the LM-OTS signature
        let ots_end = 4 + Mode::OtsMode::SIG_LEN;
        let sigtype = sig.get(ots_end..).and_then(read_u32).ok_or(bad_len)?;
        LmsAlgorithm::lookup(sigtype)?;
        if sigtype != Mode::TYPECODE {
            return Err(Error::WrongAlgorithm {
                expected: Mode::TYPECODE,
                got: sigtype,
            });
        }

        // 6a.2.i: If q >= 2^H, return INVALID.
        if q >= Mode::LEAVES {
            return Err(Error::InvalidSignatureEncoding);
        }

        // 6a.2.j: the path must have exactly h nodes
        if sig.len() != Mode::SIG_LEN {
            return Err(bad_len);
        }

        let lmots_sig = OtsSignature::<Mode::OtsMode>::try_from(&sig[4..ots_end])?;
        let path = sig[ots_end + 4..]
            .chunks_exact(Mode::M)
            .map(Output::<Mode::Hasher>::try_from)
            .collect::<Result<Vec<_>, _>>()
            .map_err(|_| Error::InvalidSignatureEncoding)?;

        Ok(Self { q, lmots_sig, path })
    }
}

impl<Mode: LmsMode> TryFrom<Vec<u8>> for Signature<Mode> {
    type Error = Error;

    fn try_from(sig: Vec<u8>) -> Result<Self, Self::Error> {
        Self::try_from(sig.as_slice())
    }
}
