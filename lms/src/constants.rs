//! Constants as defined in RFC 8554

/// The length of the identifier `I`
pub const ID_LEN: usize = 16;

/// `D_PBLC`
pub const D_PBLC: [u8; 2] = [0x80, 0x80];
/// `D_MESG`
pub const D_MESG: [u8; 2] = [0x81, 0x81];
/// `D_LEAF`
pub const D_LEAF: [u8; 2] = [0x82, 0x82];
/// `D_INTR`
pub const D_INTR: [u8; 2] = [0x83, 0x83];

/// Index used when deriving the randomizer `C` from `SEED`, as done by the
/// reference implementation of RFC 8554 Appendix A.
pub const D_C_INDEX: [u8; 2] = [0xff, 0xfd];
/// Byte that separates the derivation of `x_q[i]` and `C` from the chains
/// (Appendix A of RFC 8554).
pub const D_SEED: u8 = 0xff;
