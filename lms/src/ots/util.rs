/// Returns an iterator over the `w`-bit Winternitz coefficients of the input
/// bytes, most significant bits first.
///
/// This is `coef(S, i, w)` of RFC 8554 section 3.1.3 evaluated for
/// `i = 0, 1, ...`. `w` must divide 8.
pub(crate) fn coefs(bytes: &[u8], w: usize) -> impl Iterator<Item = u8> + '_ {
    debug_assert!(matches!(w, 1 | 2 | 4 | 8));
    let mask = ((1u16 << w) - 1) as u8;
    let per_byte = 8 / w;
    bytes
        .iter()
        .flat_map(move |&byte| (0..per_byte).map(move |i| (byte >> (8 - w * (i + 1))) & mask))
}
