//! All types related to LMS

use crate::constants::ID_LEN;

/// Anything that has a corresponding `lmots_algorithm_type` or
/// `lms_algorithm_type` will implement this trait.
pub trait Typecode {
    /// The associated enum value for the algorithm type.
    const TYPECODE: u32;
}

/// The 16 byte identifier I from the LM-OTS algorithm.
pub type Identifier = [u8; ID_LEN];

/// Reads a big-endian `u32` from the first four bytes of `bytes`, or `None`
/// if there are fewer than four.
pub(crate) fn read_u32(bytes: &[u8]) -> Option<u32> {
    let head: [u8; 4] = bytes.get(..4)?.try_into().ok()?;
    Some(u32::from_be_bytes(head))
}
