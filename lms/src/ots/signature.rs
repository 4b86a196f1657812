//! Contains the [`Signature`] type

use crate::constants::{D_MESG, D_PBLC};
use crate::error::Error;
use crate::ots::modes::{chain, LmsOtsMode};
use crate::ots::public::VerifyingKey;
use crate::registry::LmotsAlgorithm;
use crate::types::{read_u32, Identifier};
use digest::{Digest, Output};

/// Opaque struct representing a LM-OTS signature
pub struct Signature<Mode: LmsOtsMode> {
    pub(crate) c: Output<Mode::Hasher>,
    pub(crate) y: Vec<Output<Mode::Hasher>>,
}

impl<Mode: LmsOtsMode> Clone for Signature<Mode> {
    fn clone(&self) -> Self {
        Self {
            c: self.c.clone(),
            y: self.y.clone(),
        }
    }
}

impl<Mode: LmsOtsMode> core::fmt::Debug for Signature<Mode> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Signature")
            .field("typecode", &Mode::TYPECODE)
            .field("c", &self.c.as_slice())
            .field("y", &self.y.len())
            .finish()
    }
}

impl<Mode: LmsOtsMode> PartialEq for Signature<Mode> {
    fn eq(&self, other: &Self) -> bool {
        self.c == other.c && self.y == other.y
    }
}

impl<Mode: LmsOtsMode> Eq for Signature<Mode> {}

impl<Mode: LmsOtsMode> Signature<Mode> {
    /// The randomizer `C`.
    pub fn c(&self) -> &[u8] {
        &self.c
    }

    /// The chain values `y[0..p]`.
    pub fn y(&self) -> &[Output<Mode::Hasher>] {
        &self.y
    }

    /// Computes the candidate public key `Kc` that this signature commits to
    /// for message `msg`, key identifier `id` and leaf `q` (RFC 8554
    /// Algorithm 4b). The signature verifies iff `Kc` equals the real `K`.
    pub fn recover_pubkey(&self, id: Identifier, q: u32, msg: &[u8]) -> VerifyingKey<Mode> {
        let q_hash = Mode::Hasher::new()
            .chain_update(id)
            .chain_update(q.to_be_bytes())
            .chain_update(D_MESG)
            .chain_update(&self.c)
            .chain_update(msg)
            .finalize();

        let top = (1usize << Mode::W) - 1;
        let mut hasher = Mode::Hasher::new()
            .chain_update(id)
            .chain_update(q.to_be_bytes())
            .chain_update(D_PBLC);

        for (i, (a, y)) in Mode::expand(&q_hash).into_iter().zip(&self.y).enumerate() {
            let mut tmp = y.clone();
            chain::<Mode>(&id, q, i as u16, a as usize, top, &mut tmp);
            Digest::update(&mut hasher, &tmp);
        }

        VerifyingKey {
            q,
            id,
            k: hasher.finalize(),
        }
    }

    /// Returns `u32str(type) || C || y[0] || ... || y[p-1]`.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(Mode::SIG_LEN);
        bytes.extend_from_slice(&Mode::TYPECODE.to_be_bytes());
        bytes.extend_from_slice(&self.c);
        for y in &self.y {
            bytes.extend_from_slice(y);
        }
        bytes
    }
}

impl<Mode: LmsOtsMode> From<Signature<Mode>> for Vec<u8> {
    fn from(sig: Signature<Mode>) -> Self {
        sig.to_bytes()
    }
}

/// Tries to parse a [`Signature`] from an exact slice
impl<'a, Mode: LmsOtsMode> TryFrom<&'a [u8]> for Signature<Mode> {
    type Error = Error;

    fn try_from(sig: &'a [u8]) -> Result<Self, Self::Error> {
        let too_short = Error::InvalidSignatureLength {
            expected: Mode::SIG_LEN,
            got: sig.len(),
        };

        let alg = read_u32(sig).ok_or(too_short)?;
        LmotsAlgorithm::lookup(alg)?;
        if alg != Mode::TYPECODE {
            return Err(Error::WrongAlgorithm {
                expected: Mode::TYPECODE,
                got: alg,
            });
        }
        if sig.len() != Mode::SIG_LEN {
            return Err(too_short);
        }

        let mut nodes = sig[4..]
            .chunks_exact(Mode::N)
            .map(Output::<Mode::Hasher>::try_from);
        let c = nodes
            .next()
            .ok_or(Error::InvalidSignatureEncoding)?
            .map_err(|_| Error::InvalidSignatureEncoding)?;
        let y = nodes
            .collect::<Result<Vec<_>, _>>()
            .map_err(|_| Error::InvalidSignatureEncoding)?;

        Ok(Self { c, y })
    }
}
