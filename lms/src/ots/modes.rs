use crate::hasher::Sha256_192;
use crate::ots::util::coefs;
use crate::types::{Identifier, Typecode};
use digest::{Digest, Output, OutputSizeUser};
use sha2::Sha256;
use static_assertions::const_assert_eq;
use std::marker::PhantomData;
use typenum::Unsigned;

/// The basic trait that must be implemented by any OTS mode.
pub trait LmsOtsMode: Typecode {
    /// The underlying hash function
    type Hasher: Digest;
    /// The length of the hash function output as a [usize]
    const N: usize;
    /// The Winternitz window, which should be a value that divides 8
    const W: usize;
    /// The number of `W` bit fields required to contain the hash of the message
    const U: usize; // internal value calculated as https://datatracker.ietf.org/doc/html/rfc8554#appendix-B
    /// The number of `W` bit fields required to contain the checksum
    const V: usize; // see above
    /// Computed as `U` + `V`
    const P: usize;
    /// The left shift required to get the checksum bits
    const LS: usize;
    /// The total length of the signature
    const SIG_LEN: usize;

    /// Expands a message hash into its `P` Winternitz coefficients:
    /// `Coefs(Q, w, U) || Coefs(Cksm(Q), w, V)` (RFC 8554 section 4.4).
    fn expand(message: &Output<Self::Hasher>) -> Vec<u8> {
        let mut arr = Vec::with_capacity(Self::P);
        arr.extend(coefs(message, Self::W).take(Self::U));

        // Every coefficient is "negated" against 2^w - 1, so raising any
        // coefficient of the message lowers the checksum.
        let max = (1u16 << Self::W) - 1;
        let cksum = arr.iter().map(|&x| max - u16::from(x)).sum::<u16>() << Self::LS;

        arr.extend(coefs(&cksum.to_be_bytes(), Self::W).take(Self::V));
        arr
    }
}

/// Runs hash chain `i` of the one-time key `(id, q)` over `tmp`, for the chain
/// steps `from..to`:
/// `tmp = H(I || u32str(q) || u16str(i) || u8str(j) || tmp)`.
pub(crate) fn chain<Mode: LmsOtsMode>(
    id: &Identifier,
    q: u32,
    i: u16,
    from: usize,
    to: usize,
    tmp: &mut Output<Mode::Hasher>,
) {
    let q = q.to_be_bytes();
    let i = i.to_be_bytes();
    for j in from..to {
        // `to` never exceeds 2^w - 1 <= 255
        let j = [j as u8];
        Mode::Hasher::new()
            .chain_update(id)
            .chain_update(q)
            .chain_update(i)
            .chain_update(j)
            .chain_update(&*tmp)
            .finalize_into(tmp);
    }
}

#[derive(Debug)]
pub struct LmsOtsModeInternal<Hasher: Digest, const W: usize, const TC: u32> {
    _hasher: PhantomData<Hasher>,
}

impl<Hasher: Digest, const W: usize, const TC: u32> Typecode
    for LmsOtsModeInternal<Hasher, W, TC>
{
    const TYPECODE: u32 = TC;
}

/// `N` is taken from the output size of the given digest, as specified by
/// https://datatracker.ietf.org/doc/html/rfc8554#section-4.1, and every other
/// constant is derived from `N` and `W` following Appendix B.
impl<Hasher: Digest, const W: usize, const TC: u32> LmsOtsMode
    for LmsOtsModeInternal<Hasher, W, TC>
{
    type Hasher = Hasher;
    const N: usize = <Hasher as OutputSizeUser>::OutputSize::USIZE;
    const W: usize = W;
    const U: usize = (8 * Self::N).div_ceil(W);
    const V: usize = ((((1 << W) - 1) * Self::U).ilog2() as usize / W) + 1;
    const P: usize = Self::U + Self::V;
    const LS: usize = 16 - Self::V * W;
    const SIG_LEN: usize = 4 + Self::N * (Self::P + 1);
}

/// `LMOTS_SHA256_N32_W1`
pub type LmsOtsSha256N32W1 = LmsOtsModeInternal<Sha256, 1, 1>;
/// `LMOTS_SHA256_N32_W2`
pub type LmsOtsSha256N32W2 = LmsOtsModeInternal<Sha256, 2, 2>;
/// `LMOTS_SHA256_N32_W4`
pub type LmsOtsSha256N32W4 = LmsOtsModeInternal<Sha256, 4, 3>;
/// `LMOTS_SHA256_N32_W8`
pub type LmsOtsSha256N32W8 = LmsOtsModeInternal<Sha256, 8, 4>;
/// `LMOTS_SHA256_N24_W1`
pub type LmsOtsSha256N24W1 = LmsOtsModeInternal<Sha256_192, 1, 5>;
/// `LMOTS_SHA256_N24_W2`
pub type LmsOtsSha256N24W2 = LmsOtsModeInternal<Sha256_192, 2, 6>;
/// `LMOTS_SHA256_N24_W4`
pub type LmsOtsSha256N24W4 = LmsOtsModeInternal<Sha256_192, 4, 7>;
/// `LMOTS_SHA256_N24_W8`
pub type LmsOtsSha256N24W8 = LmsOtsModeInternal<Sha256_192, 8, 8>;

// make sure the derived constants agree with the published tables
const_assert_eq!(LmsOtsSha256N32W1::N, 32);
const_assert_eq!(LmsOtsSha256N32W1::P, 265);
const_assert_eq!(LmsOtsSha256N32W1::LS, 7);
const_assert_eq!(LmsOtsSha256N32W1::SIG_LEN, 8516);

const_assert_eq!(LmsOtsSha256N32W2::P, 133);
const_assert_eq!(LmsOtsSha256N32W2::LS, 6);
const_assert_eq!(LmsOtsSha256N32W2::SIG_LEN, 4292);

const_assert_eq!(LmsOtsSha256N32W4::P, 67);
const_assert_eq!(LmsOtsSha256N32W4::LS, 4);
const_assert_eq!(LmsOtsSha256N32W4::SIG_LEN, 2180);

const_assert_eq!(LmsOtsSha256N32W8::P, 34);
const_assert_eq!(LmsOtsSha256N32W8::LS, 0);
const_assert_eq!(LmsOtsSha256N32W8::SIG_LEN, 1124);

const_assert_eq!(LmsOtsSha256N24W1::N, 24);
const_assert_eq!(LmsOtsSha256N24W1::P, 200);
const_assert_eq!(LmsOtsSha256N24W1::LS, 8);

const_assert_eq!(LmsOtsSha256N24W2::P, 101);
const_assert_eq!(LmsOtsSha256N24W4::P, 51);
const_assert_eq!(LmsOtsSha256N24W8::P, 26);
const_assert_eq!(LmsOtsSha256N24W8::SIG_LEN, 652);
