//! Contains the [`VerifyingKey`] type

use crate::constants::ID_LEN;
use crate::error::Error;
use crate::ots::modes::LmsOtsMode;
use crate::ots::signature::Signature;
use crate::registry::LmotsAlgorithm;
use crate::types::{read_u32, Identifier};
use digest::Output;
use subtle::ConstantTimeEq;

/// Opaque struct representing a LM-OTS public key
pub struct VerifyingKey<Mode: LmsOtsMode> {
    pub(crate) q: u32,
    pub(crate) id: Identifier,
    pub(crate) k: Output<Mode::Hasher>,
}

// manual impls because Mode is neither Clone nor Debug
impl<Mode: LmsOtsMode> Clone for VerifyingKey<Mode> {
    fn clone(&self) -> Self {
        Self {
            q: self.q,
            id: self.id,
            k: self.k.clone(),
        }
    }
}

impl<Mode: LmsOtsMode> core::fmt::Debug for VerifyingKey<Mode> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("VerifyingKey")
            .field("q", &self.q)
            .field("id", &self.id)
            .field("k", &self.k.as_slice())
            .finish()
    }
}

impl<Mode: LmsOtsMode> PartialEq for VerifyingKey<Mode> {
    fn eq(&self, other: &Self) -> bool {
        self.q == other.q
            && self.id == other.id
            && bool::from(self.k.as_slice().ct_eq(other.k.as_slice()))
    }
}

impl<Mode: LmsOtsMode> Eq for VerifyingKey<Mode> {}

impl<Mode: LmsOtsMode> VerifyingKey<Mode> {
    /// The leaf index of the key.
    pub fn q(&self) -> u32 {
        self.q
    }

    /// The 16 byte identifier of the key.
    pub fn id(&self) -> &Identifier {
        &self.id
    }

    /// The public value `K`.
    pub fn k(&self) -> &[u8] {
        &self.k
    }

    /// Returns `u32str(type) || I || u32str(q) || K`.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(4 + ID_LEN + 4 + Mode::N);
        bytes.extend_from_slice(&Mode::TYPECODE.to_be_bytes());
        bytes.extend_from_slice(&self.id);
        bytes.extend_from_slice(&self.q.to_be_bytes());
        bytes.extend_from_slice(&self.k);
        bytes
    }
}

impl<Mode: LmsOtsMode> signature::Verifier<Signature<Mode>> for VerifyingKey<Mode> {
    // algorithm 4a of https://datatracker.ietf.org/doc/html/rfc8554#section-4.6
    fn verify(&self, msg: &[u8], signature: &Signature<Mode>) -> Result<(), signature::Error> {
        let kc = signature.recover_pubkey(self.id, self.q, msg);
        if bool::from(self.k.as_slice().ct_eq(kc.k.as_slice())) {
            Ok(())
        } else {
            Err(Error::VerificationFailed.into())
        }
    }
}

impl<Mode: LmsOtsMode> From<VerifyingKey<Mode>> for Vec<u8> {
    fn from(pk: VerifyingKey<Mode>) -> Self {
        pk.to_bytes()
    }
}

/// Tries to parse a [`VerifyingKey`] from an exact slice
impl<'a, Mode: LmsOtsMode> TryFrom<&'a [u8]> for VerifyingKey<Mode> {
    type Error = Error;

    fn try_from(pk: &'a [u8]) -> Result<Self, Self::Error> {
        let alg = read_u32(pk).ok_or(Error::InvalidPublicKey)?;
        LmotsAlgorithm::lookup(alg)?;
        if alg != Mode::TYPECODE {
            return Err(Error::WrongAlgorithm {
                expected: Mode::TYPECODE,
                got: alg,
            });
        }

        let rest = &pk[4..];
        if rest.len() != ID_LEN + 4 + Mode::N {
            return Err(Error::InvalidPublicKey);
        }
        let (id, rest) = rest.split_at(ID_LEN);
        let (q, k) = rest.split_at(4);

        Ok(Self {
            q: read_u32(q).ok_or(Error::InvalidPublicKey)?,
            id: id.try_into().map_err(|_| Error::InvalidPublicKey)?,
            k: Output::<Mode::Hasher>::try_from(k).map_err(|_| Error::InvalidPublicKey)?,
        })
    }
}
