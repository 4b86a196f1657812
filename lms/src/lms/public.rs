//! Contains the [`VerifyingKey`] type

use crate::constants::ID_LEN;
use crate::error::Error;
use crate::lms::modes::LmsMode;
use crate::lms::signature::Signature;
use crate::lms::tree::{interior_hash, leaf_hash};
use crate::registry::{LmotsAlgorithm, LmsAlgorithm};
use crate::types::{read_u32, Identifier, Typecode};
use digest::Output;
use signature::Verifier;
use subtle::ConstantTimeEq;

/// Opaque struct representing a LMS public key
pub struct VerifyingKey<Mode: LmsMode> {
    pub(crate) id: Identifier,
    pub(crate) k: Output<Mode::Hasher>,
}

impl<Mode: LmsMode> Clone for VerifyingKey<Mode> {
    fn clone(&self) -> Self {
        Self {
            id: self.id,
            k: self.k.clone(),
        }
    }
}

impl<Mode: LmsMode> core::fmt::Debug for VerifyingKey<Mode> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("VerifyingKey")
            .field("typecode", &Mode::TYPECODE)
            .field("id", &self.id)
            .field("k", &self.k.as_slice())
            .finish()
    }
}

impl<Mode: LmsMode> PartialEq for VerifyingKey<Mode> {
    fn eq(&self, other: &Self) -> bool {
        let id = self.id[..].ct_eq(&other.id[..]);
        let k = self.k.as_slice().ct_eq(other.k.as_slice());
        bool::from(id & k)
    }
}

impl<Mode: LmsMode> Eq for VerifyingKey<Mode> {}

impl<Mode: LmsMode> VerifyingKey<Mode> {
    pub(crate) fn new(id: Identifier, k: Output<Mode::Hasher>) -> Self {
        Self { id, k }
    }

    /// Builds a public key from its identifier and tree root.
    ///
    /// Fails with [`Error::InvalidPublicKey`] unless `root` is exactly `M`
    /// bytes long.
    pub fn from_tree_root(id: Identifier, root: &[u8]) -> Result<Self, Error> {
        if root.len() < 8 {
            return Err(Error::InvalidPublicKey);
        }
        let k = Output::<Mode::Hasher>::try_from(root).map_err(|_| Error::InvalidPublicKey)?;
        Ok(Self { id, k })
    }

    /// Returns the 16-byte identifier of the public key
    pub fn id(&self) -> &Identifier {
        &self.id
    }

    /// Returns the M-byte tree root `K`
    pub fn k(&self) -> &[u8] {
        &self.k
    }

    /// Returns `u32str(type) || u32str(otstype) || I || K`.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(Mode::PUBLIC_KEY_LEN);
        bytes.extend_from_slice(&Mode::TYPECODE.to_be_bytes());
        bytes.extend_from_slice(&<Mode::OtsMode as Typecode>::TYPECODE.to_be_bytes());
        bytes.extend_from_slice(&self.id);
        bytes.extend_from_slice(&self.k);
        bytes
    }

    /// Algorithm 6a of RFC 8554. The typecodes of `signature` are enforced
    /// by its type.
    pub(crate) fn check(&self, msg: &[u8], signature: &Signature<Mode>) -> Result<(), Error> {
        if signature.q >= Mode::LEAVES || signature.path.len() != Mode::H {
            return Err(Error::InvalidSignatureEncoding);
        }

        // Compute the LMS Public Key Candidate Tc from the signature,
        //    message, identifier, pubtype, and ots_typecode, using
        //    Algorithm 6a.
        let key_candidate = signature
            .lmots_sig
            .recover_pubkey(self.id, signature.q, msg);

        let mut node_num = signature.q + Mode::LEAVES;
        let mut tmp = leaf_hash::<Mode>(&self.id, node_num, key_candidate.k());

        for node in &signature.path {
            tmp = if node_num % 2 == 1 {
                // Tc = H(I || u32str(node_num/2) || u16str(D_INTR) || path[i] || tmp)
                interior_hash::<Mode>(&self.id, node_num / 2, node, &tmp)
            } else {
                // Tc = H(I || u32str(node_num/2) || u16str(D_INTR) || tmp || path[i])
                interior_hash::<Mode>(&self.id, node_num / 2, &tmp, node)
            };
            node_num /= 2;
        }

        if bool::from(self.k.as_slice().ct_eq(tmp.as_slice())) {
            Ok(())
        } else {
            Err(Error::VerificationFailed)
        }
    }
}

impl<Mode: LmsMode> Verifier<Signature<Mode>> for VerifyingKey<Mode> {
    fn verify(&self, msg: &[u8], signature: &Signature<Mode>) -> Result<(), signature::Error> {
        Ok(self.check(msg, signature)?)
    }
}

/// Converts a [`VerifyingKey`] into its byte representation
impl<Mode: LmsMode> From<VerifyingKey<Mode>> for Vec<u8> {
    fn from(pk: VerifyingKey<Mode>) -> Self {
        pk.to_bytes()
    }
}

/// Tries to parse a [`VerifyingKey`] from an exact slice
impl<'a, Mode: LmsMode> TryFrom<&'a [u8]> for VerifyingKey<Mode> {
    type Error = Error;

    fn try_from(pk: &'a [u8]) -> Result<Self, Self::Error> {
        let alg = read_u32(pk).ok_or(Error::InvalidPublicKey)?;
        let otstype = pk
            .get(4..)
            .and_then(read_u32)
            .ok_or(Error::InvalidPublicKey)?;

        LmsAlgorithm::lookup(alg)?;
        if alg != Mode::TYPECODE {
            return Err(Error::WrongAlgorithm {
                expected: Mode::TYPECODE,
                got: alg,
            });
        }
        LmotsAlgorithm::lookup(otstype)?;
        if otstype != <Mode::OtsMode as Typecode>::TYPECODE {
            return Err(Error::WrongAlgorithm {
                expected: <Mode::OtsMode as Typecode>::TYPECODE,
                got: otstype,
            });
        }

        if pk.len() != Mode::PUBLIC_KEY_LEN {
            return Err(Error::InvalidPublicKey);
        }

        // pk is now guaranteed to be of the form u32(type) || u32(otstype) || ID || K
        let (id, k) = pk[8..].split_at(ID_LEN);
        let id = id.try_into().map_err(|_| Error::InvalidPublicKey)?;
        Self::from_tree_root(id, k)
    }
}
