//! Verification of serialized keys and signatures whose parameter sets are
//! only known at run time

use crate::error::Error;
use crate::lms::{
    LmsMode, LmsSha256M24H10, LmsSha256M24H15, LmsSha256M24H20, LmsSha256M24H25, LmsSha256M24H5,
    LmsSha256M32H10, LmsSha256M32H15, LmsSha256M32H20, LmsSha256M32H25, LmsSha256M32H5,
    Signature, VerifyingKey,
};
use crate::ots::{
    LmsOtsSha256N24W1, LmsOtsSha256N24W2, LmsOtsSha256N24W4, LmsOtsSha256N24W8,
    LmsOtsSha256N32W1, LmsOtsSha256N32W2, LmsOtsSha256N32W4, LmsOtsSha256N32W8,
};
use crate::registry::{LmotsAlgorithm, LmsAlgorithm};
use crate::types::read_u32;

fn verify_typed<Mode: LmsMode>(
    public_key: &[u8],
    msg: &[u8],
    signature: &[u8],
) -> Result<(), Error> {
    let pk = VerifyingKey::<Mode>::try_from(public_key)?;
    let sig = Signature::<Mode>::try_from(signature)?;
    pk.check(msg, &sig)
}

// Emits one branch per (LMS, LM-OTS) pair of the two lists. The enum
// variants share their names with the typed mode aliases.
macro_rules! dispatch {
    ($lms:ident, $lmots:ident, $args:tt; [$($l:ident),+ $(,)?] x $ots:tt) => {
        $( dispatch!(@row $lms, $lmots, $args; $l x $ots); )+
    };
    (@row $lms:ident, $lmots:ident, ($pk:expr, $msg:expr, $sig:expr); $l:ident x [$($o:ident),+ $(,)?]) => {
        $(
            if $lms == LmsAlgorithm::$l && $lmots == LmotsAlgorithm::$o {
                return verify_typed::<$l<$o>>($pk, $msg, $sig);
            }
        )+
    };
}

/// Verifies `signature` on `msg` under `public_key`, taking the parameter
/// sets from the typecodes in the serialized public key.
///
/// Fails with [`Error::UnsupportedParameter`] for unknown typecodes,
/// [`Error::IncompatibleParameters`] when the LMS and LM-OTS parameter sets
/// use different hash sizes, with the parsing errors of [`VerifyingKey`] and
/// [`Signature`], and with [`Error::VerificationFailed`] when the signature
/// is well formed but does not verify.
pub fn verify(public_key: &[u8], msg: &[u8], signature: &[u8]) -> Result<(), Error> {
    let lms = read_u32(public_key).ok_or(Error::InvalidPublicKey)?;
    let lmots = public_key
        .get(4..)
        .and_then(read_u32)
        .ok_or(Error::InvalidPublicKey)?;
    let lms = LmsAlgorithm::lookup(lms)?;
    let lmots = LmotsAlgorithm::lookup(lmots)?;

    dispatch!(lms, lmots, (public_key, msg, signature);
        [LmsSha256M32H5, LmsSha256M32H10, LmsSha256M32H15, LmsSha256M32H20, LmsSha256M32H25]
        x [LmsOtsSha256N32W1, LmsOtsSha256N32W2, LmsOtsSha256N32W4, LmsOtsSha256N32W8]);
    dispatch!(lms, lmots, (public_key, msg, signature);
        [LmsSha256M24H5, LmsSha256M24H10, LmsSha256M24H15, LmsSha256M24H20, LmsSha256M24H25]
        x [LmsOtsSha256N24W1, LmsOtsSha256N24W2, LmsOtsSha256N24W4, LmsOtsSha256N24W8]);

    tracing::debug!(
        lms = lms.typecode(),
        lmots = lmots.typecode(),
        "rejecting mismatched parameter sets"
    );
    Err(Error::IncompatibleParameters {
        lms: lms.typecode(),
        lmots: lmots.typecode(),
    })
}

#[cfg(test)]
mod tests {
    use super::verify;
    use crate::error::Error;
    use crate::lms::{LmsMode, LmsSha256M24H5, LmsSha256M32H5, Signature, SigningKey};
    use crate::ots::{
        LmsOtsSha256N24W1, LmsOtsSha256N24W2, LmsOtsSha256N24W4, LmsOtsSha256N24W8,
        LmsOtsSha256N32W1, LmsOtsSha256N32W2, LmsOtsSha256N32W4, LmsOtsSha256N32W8,
    };
    use signature::SignerMut;

    fn sign_and_dispatch<Mode: LmsMode>(seed: &[u8]) {
        let mut sk = SigningKey::<Mode>::new_from_seed([0x3c; 16], seed).unwrap();
        let pk = sk.public().to_bytes();
        let sig: Signature<Mode> = sk.try_sign(b"every pair").unwrap();
        let sig = sig.to_bytes();
        assert_eq!(verify(&pk, b"every pair", &sig), Ok(()));
        assert_eq!(
            verify(&pk, b"every pear", &sig),
            Err(Error::VerificationFailed)
        );
    }

    macro_rules! dispatch_tests {
        ($($l:ident<$o:ident> with $m:literal),+ $(,)?) => {
            paste::paste! {
                $(
                    #[test]
                    fn [<dispatches_ $l:snake _ $o:snake>]() {
                        sign_and_dispatch::<$l<$o>>(&[0x5d; $m]);
                    }
                )+
            }
        };
    }

    dispatch_tests!(
        LmsSha256M32H5<LmsOtsSha256N32W1> with 32,
        LmsSha256M32H5<LmsOtsSha256N32W2> with 32,
        LmsSha256M32H5<LmsOtsSha256N32W4> with 32,
        LmsSha256M32H5<LmsOtsSha256N32W8> with 32,
        LmsSha256M24H5<LmsOtsSha256N24W1> with 24,
        LmsSha256M24H5<LmsOtsSha256N24W2> with 24,
        LmsSha256M24H5<LmsOtsSha256N24W4> with 24,
        LmsSha256M24H5<LmsOtsSha256N24W8> with 24,
    );

    #[test]
    fn dispatches_on_typecodes() {
        let mut sk =
            SigningKey::<LmsSha256M24H5<LmsOtsSha256N24W8>>::new_from_seed([9; 16], &[8; 24])
                .unwrap();
        let pk = sk.public().to_bytes();
        let sig: Signature<_> = sk.try_sign(b"run time").unwrap();
        let sig = sig.to_bytes();

        assert_eq!(verify(&pk, b"run time", &sig), Ok(()));
        assert_eq!(
            verify(&pk, b"another time", &sig),
            Err(Error::VerificationFailed)
        );
    }

    #[test]
    fn rejects_mixed_hash_sizes() {
        let mut pk = SigningKey::<LmsSha256M32H5<LmsOtsSha256N32W8>>::new_from_seed(
            [1; 16],
            &[2; 32],
        )
        .unwrap()
        .public()
        .to_bytes();
        // LMOTS_SHA256_N24_W8
        pk[4..8].copy_from_slice(&8u32.to_be_bytes());
        assert_eq!(
            verify(&pk, b"msg", &[]),
            Err(Error::IncompatibleParameters { lms: 5, lmots: 8 })
        );
    }

    #[test]
    fn rejects_unknown_and_truncated_keys() {
        assert_eq!(verify(&[0, 0, 0, 5], b"msg", &[]), Err(Error::InvalidPublicKey));
        assert_eq!(
            verify(&[0, 0, 0, 0x42, 0, 0, 0, 4], b"msg", &[]),
            Err(Error::UnsupportedParameter(0x42))
        );
    }
}
