//! Contains the [`SigningKey`] type

use crate::constants::{D_MESG, D_PBLC, D_SEED};
use crate::error::Error;
use crate::ots::modes::{chain, LmsOtsMode};
use crate::ots::public::VerifyingKey;
use crate::ots::signature::Signature;
use crate::types::Identifier;
use digest::{Digest, Output};
use rand_core::CryptoRng;
use signature::Keypair;
use zeroize::Zeroize;

/// Opaque struct representing a LM-OTS private key.
///
/// A one-time key can sign exactly once: [`SigningKey::sign`] consumes it.
pub struct SigningKey<Mode: LmsOtsMode> {
    pub(crate) q: u32,
    pub(crate) id: Identifier,
    x: Vec<Output<Mode::Hasher>>,
}

impl<Mode: LmsOtsMode> SigningKey<Mode> {
    /// Derives the private key of leaf `q` from the tree `SEED` using the
    /// pseudorandom key generation of RFC 8554 Appendix A:
    /// `x_q[i] = H(I || u32str(q) || u16str(i) || u8str(0xFF) || SEED)`.
    ///
    /// Fails with [`Error::OtsDerivationFailed`] if `seed` is not `N` bytes.
    pub fn new_from_seed(q: u32, id: Identifier, seed: &[u8]) -> Result<Self, Error> {
        if seed.len() != Mode::N {
            return Err(Error::OtsDerivationFailed);
        }
        Ok(Self::derive(q, id, seed))
    }

    /// Creates a private key for leaf `q` from a fresh random seed.
    pub fn new<R: CryptoRng + ?Sized>(q: u32, id: Identifier, rng: &mut R) -> Self {
        let mut seed = Output::<Mode::Hasher>::default();
        rng.fill_bytes(&mut seed);
        let sk = Self::derive(q, id, &seed);
        seed.zeroize();
        sk
    }

    /// Same as [`SigningKey::new_from_seed`] for a seed whose length is
    /// already known to be `N`.
    pub(crate) fn derive(q: u32, id: Identifier, seed: &[u8]) -> Self {
        debug_assert_eq!(seed.len(), Mode::N);
        let x = (0..Mode::P)
            .map(|i| {
                Mode::Hasher::new()
                    .chain_update(id)
                    .chain_update(q.to_be_bytes())
                    .chain_update((i as u16).to_be_bytes())
                    .chain_update([D_SEED])
                    .chain_update(seed)
                    .finalize()
            })
            .collect();
        Self { q, id, x }
    }

    /// Computes the public key `K = H(I || u32str(q) || u16str(D_PBLC) || y[0] || ... || y[p-1])`
    /// where every `y[i]` is the end of a full hash chain.
    pub fn public(&self) -> VerifyingKey<Mode> {
        let top = (1usize << Mode::W) - 1;
        let mut hasher = Mode::Hasher::new()
            .chain_update(self.id)
            .chain_update(self.q.to_be_bytes())
            .chain_update(D_PBLC);

        for (i, x) in self.x.iter().enumerate() {
            let mut tmp = x.clone();
            chain::<Mode>(&self.id, self.q, i as u16, 0, top, &mut tmp);
            Digest::update(&mut hasher, &tmp);
            tmp.zeroize();
        }

        VerifyingKey {
            q: self.q,
            id: self.id,
            k: hasher.finalize(),
        }
    }

    /// Signs `msg` with the randomizer `c` (RFC 8554 Algorithm 3).
    pub fn sign(self, msg: &[u8], c: Output<Mode::Hasher>) -> Signature<Mode> {
        let q_hash = Mode::Hasher::new()
            .chain_update(self.id)
            .chain_update(self.q.to_be_bytes())
            .chain_update(D_MESG)
            .chain_update(&c)
            .chain_update(msg)
            .finalize();

        let y = Mode::expand(&q_hash)
            .into_iter()
            .zip(self.x.iter())
            .enumerate()
            .map(|(i, (a, x))| {
                let mut tmp = x.clone();
                chain::<Mode>(&self.id, self.q, i as u16, 0, a as usize, &mut tmp);
                tmp
            })
            .collect();

        Signature { c, y }
    }

    /// The leaf index this key belongs to.
    pub fn q(&self) -> u32 {
        self.q
    }
}

impl<Mode: LmsOtsMode> Drop for SigningKey<Mode> {
    fn drop(&mut self) {
        self.x.zeroize();
    }
}

impl<Mode: LmsOtsMode> core::fmt::Debug for SigningKey<Mode> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("SigningKey")
            .field("q", &self.q)
            .field("id", &self.id)
            .finish_non_exhaustive()
    }
}

impl<Mode: LmsOtsMode> Keypair for SigningKey<Mode> {
    type VerifyingKey = VerifyingKey<Mode>;

    fn verifying_key(&self) -> Self::VerifyingKey {
        self.public()
    }
}
