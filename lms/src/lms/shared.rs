//! Contains the [`SharedSigningKey`] type

use crate::error::Error;
use crate::lms::modes::LmsMode;
use crate::lms::private::{parse_randomizer, sign_leaf, SigningKey};
use crate::lms::public::VerifyingKey;
use crate::lms::signature::Signature;
use crate::lms::tree::AuthTree;
use crate::types::Identifier;
use digest::Output;
use signature::{Keypair, Signer};
use std::sync::atomic::{AtomicU32, Ordering};
use zeroize::Zeroize;

/// An LMS private key that can sign from several threads at once.
///
/// The tree is built once and never changes. Leaves are handed out by an
/// atomic counter, so concurrent signers always get distinct leaves, and the
/// LM-OTS work happens without holding any lock.
///
/// Like [`SigningKey`], the leaf counter must be persisted by the caller if
/// the key outlives the process; see [`SharedSigningKey::q`].
pub struct SharedSigningKey<Mode: LmsMode> {
    q: AtomicU32,
    id: Identifier,
    seed: Output<Mode::Hasher>,
    tree: AuthTree<Mode>,
}

impl<Mode: LmsMode> SharedSigningKey<Mode> {
    /// The index of the next leaf that will be handed out.
    pub fn q(&self) -> u32 {
        self.q.load(Ordering::Acquire)
    }

    /// The number of signatures this key can still produce.
    pub fn remaining(&self) -> u32 {
        Mode::LEAVES - self.q()
    }

    /// Whether every leaf has been used.
    pub fn is_exhausted(&self) -> bool {
        self.q() >= Mode::LEAVES
    }

    /// The public key, whose value is the root of the tree.
    pub fn public(&self) -> VerifyingKey<Mode> {
        VerifyingKey::new(self.id, self.tree.root().clone())
    }

    fn reserve(&self) -> Result<u32, Error> {
        let q = self
            .q
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, |q| {
                (q < Mode::LEAVES).then_some(q + 1)
            })
            .map_err(|_| {
                tracing::warn!(lms = Mode::TYPECODE, "refusing to sign with an exhausted LMS key");
                Error::KeyExhausted
            })?;
        if q + 1 == Mode::LEAVES {
            tracing::warn!(lms = Mode::TYPECODE, "LMS key is now exhausted");
        }
        Ok(q)
    }

    /// Signs `msg` with the next unused leaf, see
    /// [`SigningKey::try_sign_with_randomizer`].
    pub fn try_sign_with_randomizer(
        &self,
        msg: &[u8],
        randomizer: Option<&[u8]>,
    ) -> Result<Signature<Mode>, Error> {
        let c = randomizer.map(parse_randomizer::<Mode>).transpose()?;
        let q = self.reserve()?;
        Ok(sign_leaf(&self.id, &self.seed, &self.tree, q, msg, c))
    }

    /// Turns this key back into a [`SigningKey`] at the current counter.
    pub fn into_signing_key(mut self) -> SigningKey<Mode> {
        let q = *self.q.get_mut();
        let tree = self.tree.take();
        SigningKey::from_parts(q, self.id, self.seed.clone(), Some(tree))
    }
}

impl<Mode: LmsMode> From<SigningKey<Mode>> for SharedSigningKey<Mode> {
    fn from(mut sk: SigningKey<Mode>) -> Self {
        let tree = sk.take_tree();
        Self {
            q: AtomicU32::new(sk.q()),
            id: *sk.id(),
            seed: sk.seed().clone(),
            tree,
        }
    }
}

impl<Mode: LmsMode> Drop for SharedSigningKey<Mode> {
    fn drop(&mut self) {
        self.seed.zeroize();
    }
}

impl<Mode: LmsMode> core::fmt::Debug for SharedSigningKey<Mode> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("SharedSigningKey")
            .field("typecode", &Mode::TYPECODE)
            .field("q", &self.q())
            .field("id", &self.id)
            .finish_non_exhaustive()
    }
}

impl<Mode: LmsMode> Signer<Signature<Mode>> for SharedSigningKey<Mode> {
    fn try_sign(&self, msg: &[u8]) -> Result<Signature<Mode>, signature::Error> {
        Ok(self.try_sign_with_randomizer(msg, None)?)
    }
}

impl<Mode: LmsMode> Keypair for SharedSigningKey<Mode> {
    type VerifyingKey = VerifyingKey<Mode>;

    fn verifying_key(&self) -> Self::VerifyingKey {
        self.public()
    }
}
