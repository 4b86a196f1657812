//! Everything related to LM-OTS

pub(crate) mod modes;
mod private;
mod public;
pub mod signature;
mod util;

pub use modes::{
    LmsOtsMode, LmsOtsModeInternal, LmsOtsSha256N24W1, LmsOtsSha256N24W2, LmsOtsSha256N24W4,
    LmsOtsSha256N24W8, LmsOtsSha256N32W1, LmsOtsSha256N32W2, LmsOtsSha256N32W4,
    LmsOtsSha256N32W8,
};
pub use private::SigningKey;
pub use public::VerifyingKey;
pub use signature::Signature;

#[cfg(test)]
mod tests {
    use crate::constants::{D_LEAF, ID_LEN};
    use crate::ots::modes::*;
    use crate::ots::private::SigningKey;
    use digest::{Digest, Output};
    use getrandom::SysRng;
    use hex_literal::hex;
    use rand_core::UnwrapErr;
    use signature::Verifier;

    // tests that a signature signed with a private key verifies under
    // its public key, and not under the key of another leaf
    fn test_sign<Mode: LmsOtsMode>() {
        let mut rng = UnwrapErr(SysRng);
        let sk = SigningKey::<Mode>::new(0, [0xcc; ID_LEN], &mut rng);
        let pk = sk.public();
        let msg = "this is a test message".as_bytes();

        let sig = sk.sign(msg, Output::<Mode::Hasher>::default());
        assert!(pk.verify(msg, &sig).is_ok());
        assert!(pk.verify(b"another message", &sig).is_err());

        let mut wrong_leaf = pk;
        wrong_leaf.q = 1;
        assert!(wrong_leaf.verify(msg, &sig).is_err());
    }

    macro_rules! generate_ots_tests {
        ($($mode:ident),+ $(,)?) => {
            $(
                paste::paste! {
                    #[test]
                    fn [<test_signverify_ $mode:snake>]() {
                        test_sign::<$mode>();
                    }
                }
            )+
        };
    }

    generate_ots_tests! {
        LmsOtsSha256N32W1,
        LmsOtsSha256N32W2,
        LmsOtsSha256N32W4,
        LmsOtsSha256N32W8,
        LmsOtsSha256N24W1,
        LmsOtsSha256N24W2,
        LmsOtsSha256N24W4,
        LmsOtsSha256N24W8,
    }

    const SEED: [u8; 32] = hex!("a1c4696e2608035a886100d05cd99945eb3370731884a8235e2fb3d4d71f2547");
    const ID: [u8; ID_LEN] = hex!("215f83b7ccb9acbcd08db97b0d04dc2b");

    #[test]
    /// Test Case 2, Appendix F. LMS level 2. https://datatracker.ietf.org/doc/html/rfc8554#appendix-F
    fn test_sign_kat1() {
        let q = 4;
        let y0 = hex!("11b3649023696f85150b189e50c00e98850ac343a77b3638319c347d7310269d");
        let sk = SigningKey::<LmsOtsSha256N32W8>::new_from_seed(q, ID, &SEED).unwrap();

        let c = hex!("0eb1ed54a2460d512388cad533138d240534e97b1e82d33bd927d201dfc24ebb");
        let msg = "The enumeration in the Constitution, of certain rights, shall not be construed to deny or disparage others retained by the people.\n".as_bytes();
        let sig = sk.sign(msg, c.into());

        assert_eq!(sig.c.as_slice(), &c);
        assert_eq!(sig.y[0].as_slice(), &y0);
    }

    #[test]
    // Tests that the public key generated from a given seed matches the expected value.
    fn test_keygen_kat() {
        let q = 5;
        // Test Case 2, Appendix F. final signature. path[0]
        // https://datatracker.ietf.org/doc/html/rfc8554#appendix-F
        let k = hex!("4de1f6965bdabc676c5a4dc7c35f97f82cb0e31c68d04f1dad96314ff09e6b3d");

        let pk = SigningKey::<LmsOtsSha256N32W8>::new_from_seed(q, ID, &SEED)
            .unwrap()
            .public();
        // H(I||u32str(r)||u16str(D_LEAF)||OTS_PUB_HASH[r-2^h])
        let x = <LmsOtsSha256N32W8 as LmsOtsMode>::Hasher::new()
            .chain_update(pk.id)
            .chain_update((pk.q + (1 << 5)).to_be_bytes())
            .chain_update(D_LEAF)
            .chain_update(pk.k)
            .finalize();
        assert_eq!(&x[..], &k[..]);
    }
}
