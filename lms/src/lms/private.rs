//! Contains the [`SigningKey`] type

use crate::constants::{D_C_INDEX, D_SEED, ID_LEN};
use crate::error::Error;
use crate::lms::modes::LmsMode;
use crate::lms::public::VerifyingKey;
use crate::lms::signature::Signature;
use crate::lms::tree::AuthTree;
use crate::ots;
use crate::registry::{LmotsAlgorithm, LmsAlgorithm};
use crate::types::{read_u32, Identifier, Typecode};
use digest::{Digest, Output};
use rand_core::{CryptoRng, TryCryptoRng};
use signature::{Keypair, RandomizedSignerMut, SignerMut};
use std::sync::OnceLock;
use subtle::ConstantTimeEq;
use zeroize::{Zeroize, Zeroizing};

/// Opaque struct representing a stateful LMS private key.
///
/// Every signature consumes one leaf of the tree, so a key can produce at
/// most `2^h` signatures. The leaf counter `q` only ever moves forward;
/// callers that persist keys must store the key again after every signature
/// and before the signature is released, otherwise a restored key will reuse
/// leaves.
///
/// The key is deliberately not [`Clone`]: two copies of the same key would
/// sign with the same leaves.
pub struct SigningKey<Mode: LmsMode> {
    q: u32,
    id: Identifier,
    seed: Output<Mode::Hasher>,
    tree: OnceLock<AuthTree<Mode>>,
}

impl<Mode: LmsMode> SigningKey<Mode> {
    /// Generates a fresh key with a random identifier and seed.
    pub fn new<R: CryptoRng + ?Sized>(rng: &mut R) -> Self {
        let mut id = [0u8; ID_LEN];
        rng.fill_bytes(&mut id);
        let mut seed = Output::<Mode::Hasher>::default();
        rng.fill_bytes(&mut seed);

        tracing::debug!(
            lms = Mode::TYPECODE,
            lmots = <Mode::OtsMode as Typecode>::TYPECODE,
            "generating LMS key"
        );
        Self::from_parts(0, id, seed, None)
    }

    /// Deterministically derives the key with identifier `id` from an `M`
    /// byte `seed`. The same inputs always yield the same key.
    pub fn new_from_seed(id: Identifier, seed: &[u8]) -> Result<Self, Error> {
        let seed = Output::<Mode::Hasher>::try_from(seed).map_err(|_| Error::InvalidSeedLength {
            expected: Mode::M,
            got: seed.len(),
        })?;
        Ok(Self::from_parts(0, id, seed, None))
    }

    pub(crate) fn from_parts(
        q: u32,
        id: Identifier,
        seed: Output<Mode::Hasher>,
        tree: Option<AuthTree<Mode>>,
    ) -> Self {
        let tree = match tree {
            Some(tree) => OnceLock::from(tree),
            None => OnceLock::from(AuthTree::generate(&id, &seed)),
        };
        Self { q, id, seed, tree }
    }

    /// Parses a serialized key without building its tree. The tree is built
    /// by [`SigningKey::precompute`] or on first use, which is expensive for
    /// tall trees.
    ///
    /// The counter `q` found in `bytes` is trusted as is.
    pub fn from_bytes_without_tree(bytes: &[u8]) -> Result<Self, Error> {
        let (q, id, seed) = parse_private_key::<Mode>(bytes)?;
        tracing::debug!(q, lms = Mode::TYPECODE, "loaded LMS key without tree");
        Ok(Self {
            q,
            id,
            seed,
            tree: OnceLock::new(),
        })
    }

    /// Builds the cached Merkle tree if it is not there yet.
    pub fn precompute(&self) {
        self.tree();
    }

    pub(crate) fn tree(&self) -> &AuthTree<Mode> {
        self.tree.get_or_init(|| AuthTree::generate(&self.id, &self.seed))
    }

    pub(crate) fn take_tree(&mut self) -> AuthTree<Mode> {
        match self.tree.take() {
            Some(tree) => tree,
            None => AuthTree::generate(&self.id, &self.seed),
        }
    }

    pub(crate) fn seed(&self) -> &Output<Mode::Hasher> {
        &self.seed
    }

    /// The index of the next leaf to be used.
    pub fn q(&self) -> u32 {
        self.q
    }

    /// The 16 byte identifier of the key.
    pub fn id(&self) -> &Identifier {
        &self.id
    }

    /// The number of signatures this key can still produce.
    pub fn remaining(&self) -> u32 {
        Mode::LEAVES - self.q
    }

    /// Whether every leaf has been used.
    pub fn is_exhausted(&self) -> bool {
        self.q >= Mode::LEAVES
    }

    /// The public key, whose value is the root of the tree.
    pub fn public(&self) -> VerifyingKey<Mode> {
        VerifyingKey::new(self.id, self.tree().root().clone())
    }

    /// Signs `msg` with the next unused leaf.
    ///
    /// `randomizer` is the value `C` of the LM-OTS signature and must be `N`
    /// bytes long. When it is `None`, `C` is derived from the seed and the
    /// leaf index, which makes signing deterministic.
    ///
    /// The leaf is consumed before any signing work happens, so a failure
    /// can never cause the same leaf to be used twice.
    pub fn try_sign_with_randomizer(
        &mut self,
        msg: &[u8],
        randomizer: Option<&[u8]>,
    ) -> Result<Signature<Mode>, Error> {
        let c = randomizer.map(parse_randomizer::<Mode>).transpose()?;
        let q = self.reserve()?;
        Ok(sign_leaf(&self.id, &self.seed, self.tree(), q, msg, c))
    }

    fn reserve(&mut self) -> Result<u32, Error> {
        if self.is_exhausted() {
            tracing::warn!(lms = Mode::TYPECODE, "refusing to sign with an exhausted LMS key");
            return Err(Error::KeyExhausted);
        }
        let q = self.q;
        self.q += 1;
        if self.is_exhausted() {
            tracing::warn!(lms = Mode::TYPECODE, "LMS key is now exhausted");
        }
        Ok(q)
    }

    /// Returns `u32str(type) || u32str(otstype) || u32str(q) || I || SEED`.
    pub fn to_bytes(&self) -> Zeroizing<Vec<u8>> {
        let mut bytes = Zeroizing::new(Vec::with_capacity(Mode::PRIVATE_KEY_LEN));
        bytes.extend_from_slice(&Mode::TYPECODE.to_be_bytes());
        bytes.extend_from_slice(&<Mode::OtsMode as Typecode>::TYPECODE.to_be_bytes());
        bytes.extend_from_slice(&self.q.to_be_bytes());
        bytes.extend_from_slice(&self.id);
        bytes.extend_from_slice(&self.seed);
        bytes
    }
}

/// Validates a caller supplied randomizer `C`.
pub(crate) fn parse_randomizer<Mode: LmsMode>(c: &[u8]) -> Result<Output<Mode::Hasher>, Error> {
    Output::<Mode::Hasher>::try_from(c).map_err(|_| Error::InvalidRandomizerLength {
        expected: Mode::M,
        got: c.len(),
    })
}

/// `C = H(I || u32str(q) || u16str(0xFFFD) || u8str(0xFF) || SEED)`
fn derive_randomizer<Mode: LmsMode>(
    id: &Identifier,
    seed: &[u8],
    q: u32,
) -> Output<Mode::Hasher> {
    Mode::Hasher::new()
        .chain_update(id)
        .chain_update(q.to_be_bytes())
        .chain_update(D_C_INDEX)
        .chain_update([D_SEED])
        .chain_update(seed)
        .finalize()
}

/// Signs `msg` with leaf `q`, which the caller has already reserved.
pub(crate) fn sign_leaf<Mode: LmsMode>(
    id: &Identifier,
    seed: &Output<Mode::Hasher>,
    tree: &AuthTree<Mode>,
    q: u32,
    msg: &[u8],
    c: Option<Output<Mode::Hasher>>,
) -> Signature<Mode> {
    let c = c.unwrap_or_else(|| derive_randomizer::<Mode>(id, seed, q));
    let lmots_sig = ots::SigningKey::<Mode::OtsMode>::derive(q, *id, seed).sign(msg, c);
    Signature {
        q,
        lmots_sig,
        path: tree.auth_path(q),
    }
}

fn parse_private_key<Mode: LmsMode>(
    bytes: &[u8],
) -> Result<(u32, Identifier, Output<Mode::Hasher>), Error> {
    let lms_type = read_u32(bytes).ok_or(Error::InvalidPrivateKeyEncoding)?;
    let ots_type = bytes
        .get(4..)
        .and_then(read_u32)
        .ok_or(Error::InvalidPrivateKeyEncoding)?;

    LmsAlgorithm::lookup(lms_type)?;
    if lms_type != Mode::TYPECODE {
        return Err(Error::WrongAlgorithm {
            expected: Mode::TYPECODE,
            got: lms_type,
        });
    }
    LmotsAlgorithm::lookup(ots_type)?;
    if ots_type != <Mode::OtsMode as Typecode>::TYPECODE {
        return Err(Error::WrongAlgorithm {
            expected: <Mode::OtsMode as Typecode>::TYPECODE,
            got: ots_type,
        });
    }

    if bytes.len() != Mode::PRIVATE_KEY_LEN {
        return Err(Error::InvalidPrivateKeyEncoding);
    }
    let q = read_u32(&bytes[8..]).ok_or(Error::InvalidPrivateKeyEncoding)?;
    if q > Mode::LEAVES {
        return Err(Error::InvalidPrivateKeyEncoding);
    }
    let (id, seed) = bytes[12..].split_at(ID_LEN);
    let id = id.try_into().map_err(|_| Error::InvalidPrivateKeyEncoding)?;
    let seed =
        Output::<Mode::Hasher>::try_from(seed).map_err(|_| Error::InvalidPrivateKeyEncoding)?;
    Ok((q, id, seed))
}

/// Parses a serialized key and rebuilds its tree.
///
/// The counter `q` found in `bytes` is trusted as is.
impl<Mode: LmsMode> TryFrom<&[u8]> for SigningKey<Mode> {
    type Error = Error;

    fn try_from(bytes: &[u8]) -> Result<Self, Self::Error> {
        let (q, id, seed) = parse_private_key::<Mode>(bytes)?;
        tracing::debug!(q, lms = Mode::TYPECODE, "loaded LMS key");
        Ok(Self::from_parts(q, id, seed, None))
    }
}

impl<Mode: LmsMode> Drop for SigningKey<Mode> {
    fn drop(&mut self) {
        self.seed.zeroize();
    }
}

impl<Mode: LmsMode> core::fmt::Debug for SigningKey<Mode> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("SigningKey")
            .field("typecode", &Mode::TYPECODE)
            .field("q", &self.q)
            .field("id", &self.id)
            .finish_non_exhaustive()
    }
}

impl<Mode: LmsMode> PartialEq for SigningKey<Mode> {
    fn eq(&self, other: &Self) -> bool {
        self.q == other.q
            && self.id == other.id
            && bool::from(self.seed.as_slice().ct_eq(other.seed.as_slice()))
    }
}

impl<Mode: LmsMode> SignerMut<Signature<Mode>> for SigningKey<Mode> {
    fn try_sign(&mut self, msg: &[u8]) -> Result<Signature<Mode>, signature::Error> {
        Ok(self.try_sign_with_randomizer(msg, None)?)
    }
}

impl<Mode: LmsMode> RandomizedSignerMut<Signature<Mode>> for SigningKey<Mode> {
    fn try_sign_with_rng<R: TryCryptoRng + ?Sized>(
        &mut self,
        rng: &mut R,
        msg: &[u8],
    ) -> Result<Signature<Mode>, signature::Error> {
        let mut c = Output::<Mode::Hasher>::default();
        rng.try_fill_bytes(&mut c).map_err(|_| signature::Error::new())?;
        Ok(self.try_sign_with_randomizer(msg, Some(&c))?)
    }
}

impl<Mode: LmsMode> Keypair for SigningKey<Mode> {
    type VerifyingKey = VerifyingKey<Mode>;

    fn verifying_key(&self) -> Self::VerifyingKey {
        self.public()
    }
}
