//! Hash functions used by the parameter sets
//!
//! RFC 8554 only defines SHA-256. NIST SP 800-208 adds parameter sets that
//! use SHA-256 truncated to 192 bits, which is provided here as
//! [`Sha256_192`].

use digest::{FixedOutput, HashMarker, Output, OutputSizeUser, Update};
use sha2::Sha256;
use typenum::U24;

/// SHA-256/192: the first 24 bytes of a SHA-256 digest.
#[allow(non_camel_case_types)]
#[derive(Clone, Default)]
pub struct Sha256_192 {
    inner: Sha256,
}

impl core::fmt::Debug for Sha256_192 {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str("Sha256_192 { ... }")
    }
}

impl HashMarker for Sha256_192 {}

impl OutputSizeUser for Sha256_192 {
    type OutputSize = U24;
}

impl Update for Sha256_192 {
    fn update(&mut self, data: &[u8]) {
        Update::update(&mut self.inner, data);
    }
}

impl FixedOutput for Sha256_192 {
    fn finalize_into(self, out: &mut Output<Self>) {
        let full = FixedOutput::finalize_fixed(self.inner);
        let n = out.len();
        out.copy_from_slice(&full[..n]);
    }
}
