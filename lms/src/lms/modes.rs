//! LMS modes
use crate::hasher::Sha256_192;
use crate::ots::modes::LmsOtsMode;
use crate::types::Typecode;
use digest::{Digest, OutputSizeUser};
use sha2::Sha256;
use std::marker::PhantomData;
use typenum::Unsigned;

/// The basic trait that must be implemented for any valid LMS mode
pub trait LmsMode: Typecode {
    /// The underlying hash function
    type Hasher: Digest;
    /// The underlying LM-OTS mode, which must use the same hash function
    type OtsMode: LmsOtsMode<Hasher = Self::Hasher>;
    /// The length of the hash function output as a [usize]
    const M: usize;
    /// `h` as a [usize]
    const H: usize;
    /// The number of leaves as a [u32], computed as `2^h`
    const LEAVES: u32;
    /// Length of a serialized public key
    const PUBLIC_KEY_LEN: usize = 24 + Self::M;
    /// Length of a serialized private key
    const PRIVATE_KEY_LEN: usize = 28 + Self::M;
    /// Length of a serialized signature
    const SIG_LEN: usize = 8 + Self::OtsMode::SIG_LEN + Self::H * Self::M;
}

#[derive(Debug)]
pub struct LmsModeInternal<OtsMode, Hasher, const H: usize, const TC: u32> {
    _ots_mode: PhantomData<OtsMode>,
    _hasher: PhantomData<Hasher>,
}

impl<OtsMode, Hasher, const H: usize, const TC: u32> LmsMode
    for LmsModeInternal<OtsMode, Hasher, H, TC>
where
    Hasher: Digest,
    OtsMode: LmsOtsMode<Hasher = Hasher>,
{
    type OtsMode = OtsMode;
    type Hasher = Hasher;
    const M: usize = <Hasher as OutputSizeUser>::OutputSize::USIZE;
    const H: usize = H;
    const LEAVES: u32 = 1 << H; // precomputed as 2 to the H power
}

impl<OtsMode, Hasher, const H: usize, const TC: u32> Typecode
    for LmsModeInternal<OtsMode, Hasher, H, TC>
{
    const TYPECODE: u32 = TC;
}

/// LMS_SHA256_M32_H5
pub type LmsSha256M32H5<OtsMode> = LmsModeInternal<OtsMode, Sha256, 5, 5>;
/// LMS_SHA256_M32_H10
pub type LmsSha256M32H10<OtsMode> = LmsModeInternal<OtsMode, Sha256, 10, 6>;
/// LMS_SHA256_M32_H15
pub type LmsSha256M32H15<OtsMode> = LmsModeInternal<OtsMode, Sha256, 15, 7>;
/// LMS_SHA256_M32_H20
pub type LmsSha256M32H20<OtsMode> = LmsModeInternal<OtsMode, Sha256, 20, 8>;
/// LMS_SHA256_M32_H25
pub type LmsSha256M32H25<OtsMode> = LmsModeInternal<OtsMode, Sha256, 25, 9>;
/// LMS_SHA256_M24_H5
pub type LmsSha256M24H5<OtsMode> = LmsModeInternal<OtsMode, Sha256_192, 5, 0x0a>;
/// LMS_SHA256_M24_H10
pub type LmsSha256M24H10<OtsMode> = LmsModeInternal<OtsMode, Sha256_192, 10, 0x0b>;
/// LMS_SHA256_M24_H15
pub type LmsSha256M24H15<OtsMode> = LmsModeInternal<OtsMode, Sha256_192, 15, 0x0c>;
/// LMS_SHA256_M24_H20
pub type LmsSha256M24H20<OtsMode> = LmsModeInternal<OtsMode, Sha256_192, 20, 0x0d>;
/// LMS_SHA256_M24_H25
pub type LmsSha256M24H25<OtsMode> = LmsModeInternal<OtsMode, Sha256_192, 25, 0x0e>;
