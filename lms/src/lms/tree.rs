//! The Merkle tree over the LM-OTS public keys of a private key
//!
//! Nodes are numbered as in RFC 8554 section 5.3: the root is node 1, node
//! `r` has children `2r` and `2r + 1`, and leaf `i` is node `2^h + i`. The
//! tree is stored as a dense array indexed by node number, with slot 0 unused.

use crate::constants::{D_INTR, D_LEAF};
use crate::lms::modes::LmsMode;
use crate::ots;
use crate::types::Identifier;
use digest::{Digest, Output};

/// `H(I || u32str(r) || u16str(D_LEAF) || OTS_PUB_HASH[r - 2^h])`
pub(crate) fn leaf_hash<Mode: LmsMode>(
    id: &Identifier,
    r: u32,
    k: &[u8],
) -> Output<Mode::Hasher> {
    Mode::Hasher::new()
        .chain_update(id)
        .chain_update(r.to_be_bytes())
        .chain_update(D_LEAF)
        .chain_update(k)
        .finalize()
}

/// `H(I || u32str(r) || u16str(D_INTR) || left || right)`
pub(crate) fn interior_hash<Mode: LmsMode>(
    id: &Identifier,
    r: u32,
    left: &[u8],
    right: &[u8],
) -> Output<Mode::Hasher> {
    Mode::Hasher::new()
        .chain_update(id)
        .chain_update(r.to_be_bytes())
        .chain_update(D_INTR)
        .chain_update(left)
        .chain_update(right)
        .finalize()
}

/// Hash of leaf `q`, derived from the `M` byte tree seed.
fn derive_leaf<Mode: LmsMode>(id: &Identifier, seed: &[u8], q: u32) -> Output<Mode::Hasher> {
    let ots_pk = ots::SigningKey::<Mode::OtsMode>::derive(q, *id, seed).public();
    leaf_hash::<Mode>(id, q + Mode::LEAVES, ots_pk.k())
}

/// Every node of an LMS tree.
pub(crate) struct AuthTree<Mode: LmsMode> {
    nodes: Vec<Output<Mode::Hasher>>,
}

impl<Mode: LmsMode> AuthTree<Mode> {
    /// Moves the nodes out, leaving an empty tree behind.
    pub(crate) fn take(&mut self) -> Self {
        Self {
            nodes: core::mem::take(&mut self.nodes),
        }
    }

    /// Builds the whole tree for the key `(id, seed)`.
    ///
    /// Each leaf is folded into its ancestors as soon as it is known to be a
    /// right child, so the tree is completed in a single left to right pass.
    #[cfg(not(feature = "rayon"))]
    pub(crate) fn generate(id: &Identifier, seed: &Output<Mode::Hasher>) -> Self {
        tracing::debug!(height = Mode::H, typecode = Mode::TYPECODE, "building LMS tree");

        let leaves = Mode::LEAVES;
        let mut nodes = vec![Output::<Mode::Hasher>::default(); 2 * leaves as usize];
        for q in 0..leaves {
            let mut r = q + leaves;
            nodes[r as usize] = derive_leaf::<Mode>(id, seed, q);
            while r > 1 && r % 2 == 1 {
                let parent = r / 2;
                nodes[parent as usize] = interior_hash::<Mode>(
                    id,
                    parent,
                    &nodes[r as usize - 1],
                    &nodes[r as usize],
                );
                r = parent;
            }
        }
        Self { nodes }
    }

    /// Builds the whole tree for the key `(id, seed)`.
    ///
    /// The leaves, which dominate the cost, are derived in parallel. Each
    /// level of interior nodes is then computed in parallel from the level
    /// below it.
    #[cfg(feature = "rayon")]
    pub(crate) fn generate(id: &Identifier, seed: &Output<Mode::Hasher>) -> Self {
        use rayon::prelude::*;

        tracing::debug!(
            height = Mode::H,
            typecode = Mode::TYPECODE,
            threads = rayon::current_num_threads(),
            "building LMS tree"
        );

        // levels travel between threads as flat bytes, `Output<_>` of a
        // generic hasher is not known to be `Send`
        let m = Mode::M;
        let leaves = Mode::LEAVES;
        let seed = seed.as_slice();
        let mut level = (0..leaves)
            .into_par_iter()
            .flat_map_iter(|q| derive_leaf::<Mode>(id, seed, q).to_vec())
            .collect::<Vec<u8>>();

        let mut nodes = vec![Output::<Mode::Hasher>::default(); 2 * leaves as usize];
        let mut first = leaves;
        loop {
            for (node, bytes) in nodes[first as usize..2 * first as usize]
                .iter_mut()
                .zip(level.chunks_exact(m))
            {
                node.copy_from_slice(bytes);
            }
            if first == 1 {
                break;
            }
            first /= 2;
            level = level
                .par_chunks_exact(2 * m)
                .enumerate()
                .flat_map_iter(|(j, pair)| {
                    let (left, right) = pair.split_at(m);
                    interior_hash::<Mode>(id, first + j as u32, left, right).to_vec()
                })
                .collect();
        }
        Self { nodes }
    }

    /// The root `T[1]`, which is the public key value `K`.
    pub(crate) fn root(&self) -> &Output<Mode::Hasher> {
        &self.nodes[1]
    }

    /// Node `r` of the tree, `1 <= r < 2^(h+1)`.
    pub(crate) fn node(&self, r: u32) -> &Output<Mode::Hasher> {
        &self.nodes[r as usize]
    }

    /// The authentication path of leaf `q`: the sibling of every node on the
    /// way from the leaf to the root, leaf level first.
    pub(crate) fn auth_path(&self, q: u32) -> Vec<Output<Mode::Hasher>> {
        debug_assert!(q < Mode::LEAVES);
        let r = q + Mode::LEAVES;
        (0..Mode::H)
            .map(|level| self.node((r >> level) ^ 1).clone())
            .collect()
    }
}
