//! Run time lookup of LMS and LM-OTS parameter sets by typecode
//!
//! The typed modes in [`crate::lms`] and [`crate::ots`] fix a parameter set at
//! compile time. Serialized keys and signatures carry their typecodes, so
//! parsing code also needs to map a `u32` back to a parameter set and tell
//! an unknown typecode apart from a known but unexpected one. The table is
//! fixed at compile time and never mutated.

use crate::error::Error;

/// LMS parameter sets (`lms_algorithm_type`).
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum LmsAlgorithm {
    /// `LMS_SHA256_M32_H5`
    LmsSha256M32H5,
    /// `LMS_SHA256_M32_H10`
    LmsSha256M32H10,
    /// `LMS_SHA256_M32_H15`
    LmsSha256M32H15,
    /// `LMS_SHA256_M32_H20`
    LmsSha256M32H20,
    /// `LMS_SHA256_M32_H25`
    LmsSha256M32H25,
    /// `LMS_SHA256_M24_H5`
    LmsSha256M24H5,
    /// `LMS_SHA256_M24_H10`
    LmsSha256M24H10,
    /// `LMS_SHA256_M24_H15`
    LmsSha256M24H15,
    /// `LMS_SHA256_M24_H20`
    LmsSha256M24H20,
    /// `LMS_SHA256_M24_H25`
    LmsSha256M24H25,
}

impl LmsAlgorithm {
    /// Every supported LMS parameter set.
    pub const ALL: [Self; 10] = [
        Self::LmsSha256M32H5,
        Self::LmsSha256M32H10,
        Self::LmsSha256M32H15,
        Self::LmsSha256M32H20,
        Self::LmsSha256M32H25,
        Self::LmsSha256M24H5,
        Self::LmsSha256M24H10,
        Self::LmsSha256M24H15,
        Self::LmsSha256M24H20,
        Self::LmsSha256M24H25,
    ];

    /// Resolves a typecode, failing with [`Error::UnsupportedParameter`] if
    /// it is not known.
    pub fn lookup(typecode: u32) -> Result<Self, Error> {
        Self::ALL
            .into_iter()
            .find(|alg| alg.typecode() == typecode)
            .ok_or(Error::UnsupportedParameter(typecode))
    }

    /// The `lms_algorithm_type` value.
    pub const fn typecode(self) -> u32 {
        match self {
            Self::LmsSha256M32H5 => 0x05,
            Self::LmsSha256M32H10 => 0x06,
            Self::LmsSha256M32H15 => 0x07,
            Self::LmsSha256M32H20 => 0x08,
            Self::LmsSha256M32H25 => 0x09,
            Self::LmsSha256M24H5 => 0x0a,
            Self::LmsSha256M24H10 => 0x0b,
            Self::LmsSha256M24H15 => 0x0c,
            Self::LmsSha256M24H20 => 0x0d,
            Self::LmsSha256M24H25 => 0x0e,
        }
    }

    /// Tree height `h`.
    pub const fn height(self) -> usize {
        match self {
            Self::LmsSha256M32H5 | Self::LmsSha256M24H5 => 5,
            Self::LmsSha256M32H10 | Self::LmsSha256M24H10 => 10,
            Self::LmsSha256M32H15 | Self::LmsSha256M24H15 => 15,
            Self::LmsSha256M32H20 | Self::LmsSha256M24H20 => 20,
            Self::LmsSha256M32H25 | Self::LmsSha256M24H25 => 25,
        }
    }

    /// Size `m` of a tree node in bytes.
    pub const fn m(self) -> usize {
        match self {
            Self::LmsSha256M32H5
            | Self::LmsSha256M32H10
            | Self::LmsSha256M32H15
            | Self::LmsSha256M32H20
            | Self::LmsSha256M32H25 => 32,
            _ => 24,
        }
    }

    /// Number of leaves, `2^h`.
    pub const fn leaves(self) -> u32 {
        1 << self.height()
    }

    /// Length of an LMS signature using this parameter set with `lmots`.
    pub const fn signature_len(self, lmots: LmotsAlgorithm) -> usize {
        8 + lmots.signature_len() + self.height() * self.m()
    }

    /// Length of a serialized public key.
    pub const fn public_key_len(self) -> usize {
        24 + self.m()
    }
}

impl TryFrom<u32> for LmsAlgorithm {
    type Error = Error;

    fn try_from(typecode: u32) -> Result<Self, Self::Error> {
        Self::lookup(typecode)
    }
}

/// LM-OTS parameter sets (`lmots_algorithm_type`).
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum LmotsAlgorithm {
    /// `LMOTS_SHA256_N32_W1`
    LmsOtsSha256N32W1,
    /// `LMOTS_SHA256_N32_W2`
    LmsOtsSha256N32W2,
    /// `LMOTS_SHA256_N32_W4`
    LmsOtsSha256N32W4,
    /// `LMOTS_SHA256_N32_W8`
    LmsOtsSha256N32W8,
    /// `LMOTS_SHA256_N24_W1`
    LmsOtsSha256N24W1,
    /// `LMOTS_SHA256_N24_W2`
    LmsOtsSha256N24W2,
    /// `LMOTS_SHA256_N24_W4`
    LmsOtsSha256N24W4,
    /// `LMOTS_SHA256_N24_W8`
    LmsOtsSha256N24W8,
}

impl LmotsAlgorithm {
    /// Every supported LM-OTS parameter set.
    pub const ALL: [Self; 8] = [
        Self::LmsOtsSha256N32W1,
        Self::LmsOtsSha256N32W2,
        Self::LmsOtsSha256N32W4,
        Self::LmsOtsSha256N32W8,
        Self::LmsOtsSha256N24W1,
        Self::LmsOtsSha256N24W2,
        Self::LmsOtsSha256N24W4,
        Self::LmsOtsSha256N24W8,
    ];

    /// Resolves a typecode, failing with [`Error::UnsupportedParameter`] if
    /// it is not known.
    pub fn lookup(typecode: u32) -> Result<Self, Error> {
        Self::ALL
            .into_iter()
            .find(|alg| alg.typecode() == typecode)
            .ok_or(Error::UnsupportedParameter(typecode))
    }

    /// The `lmots_algorithm_type` value.
    pub const fn typecode(self) -> u32 {
        match self {
            Self::LmsOtsSha256N32W1 => 0x01,
            Self::LmsOtsSha256N32W2 => 0x02,
            Self::LmsOtsSha256N32W4 => 0x03,
            Self::LmsOtsSha256N32W8 => 0x04,
            Self::LmsOtsSha256N24W1 => 0x05,
            Self::LmsOtsSha256N24W2 => 0x06,
            Self::LmsOtsSha256N24W4 => 0x07,
            Self::LmsOtsSha256N24W8 => 0x08,
        }
    }

    /// Hash output size `n` in bytes.
    pub const fn n(self) -> usize {
        match self {
            Self::LmsOtsSha256N32W1
            | Self::LmsOtsSha256N32W2
            | Self::LmsOtsSha256N32W4
            | Self::LmsOtsSha256N32W8 => 32,
            _ => 24,
        }
    }

    /// Winternitz parameter `w`.
    pub const fn w(self) -> usize {
        match self {
            Self::LmsOtsSha256N32W1 | Self::LmsOtsSha256N24W1 => 1,
            Self::LmsOtsSha256N32W2 | Self::LmsOtsSha256N24W2 => 2,
            Self::LmsOtsSha256N32W4 | Self::LmsOtsSha256N24W4 => 4,
            Self::LmsOtsSha256N32W8 | Self::LmsOtsSha256N24W8 => 8,
        }
    }

    /// Number of `w`-bit fields covering the message hash.
    const fn u(self) -> usize {
        (8 * self.n()).div_ceil(self.w())
    }

    /// Number of `w`-bit fields covering the checksum.
    const fn v(self) -> usize {
        ((((1 << self.w()) - 1) * self.u()).ilog2() as usize / self.w()) + 1
    }

    /// Number of hash chains `p`.
    pub const fn p(self) -> usize {
        self.u() + self.v()
    }

    /// Left shift applied to the checksum.
    pub const fn ls(self) -> usize {
        16 - self.v() * self.w()
    }

    /// Length of an LM-OTS signature, including its typecode.
    pub const fn signature_len(self) -> usize {
        4 + self.n() * (self.p() + 1)
    }
}

impl TryFrom<u32> for LmotsAlgorithm {
    type Error = Error;

    fn try_from(typecode: u32) -> Result<Self, Self::Error> {
        Self::lookup(typecode)
    }
}
