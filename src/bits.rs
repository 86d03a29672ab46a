//! Bit-level utilities: decimal/binary expansion, BPSK mapping, and the CRC
//! append/verify pair used to protect the information bits carried through
//! the trellis.
//!
//! The CRC here is not a fixed-width compile-time family; the polynomial and
//! width are runtime parameters supplied by [`crate::config::RunConfig`], so
//! the long-division sweep below works directly on bit vectors rather than a
//! compile-time-sized shift register.

/// MSB-first bit expansion of `value` to a fixed `width`, preserving leading
/// zeros.
///
/// # Panics
///
/// Panics in debug builds if `value` doesn't fit in `width` bits.
pub fn dec_to_binary(value: u32, width: usize) -> Vec<u8> {
    debug_assert!(width >= 32 || value >> width == 0);

    (0..width)
        .map(|i| ((value >> (width - 1 - i)) & 1) as u8)
        .collect()
}

/// Map a single bit to its BPSK symbol: `0 -> +1`, `1 -> -1`.
pub fn bpsk(bit: u8) -> i32 {
    debug_assert!(bit <= 1);
    1 - 2 * bit as i32
}

/// Map each bit of an MSB-first bit sequence to its BPSK symbol.
pub fn bpsk_vec(bits: &[u8]) -> Vec<i32> {
    bits.iter().map(|&b| bpsk(b)).collect()
}

/// Append a CRC to `message`.
///
/// `crc_width` is the degree of the polynomial plus one (so the appended
/// remainder is `crc_width - 1` bits long); `crc_poly` holds the polynomial
/// as a `crc_width`-bit pattern (implicit leading 1 included).
///
/// Returns a new buffer of length `message.len() + crc_width - 1`: the
/// original message bits followed by the computed CRC remainder.
pub fn crc_append(message: &[u8], crc_poly: u32, crc_width: usize) -> Vec<u8> {
    let poly = dec_to_binary(crc_poly, crc_width);
    let mut buf = message.to_vec();
    buf.resize(message.len() + crc_width - 1, 0);

    for i in 0..message.len() {
        if buf[i] == 1 {
            for (offset, &p) in poly.iter().enumerate() {
                buf[i + offset] ^= p;
            }
        }
    }

    buf
}

/// Verify a message (information bits followed by its CRC remainder)
/// against the same polynomial used by [`crc_append`].
///
/// Returns `true` iff the XOR-division sweep over the full buffer leaves an
/// all-zero remainder.
pub fn crc_check(message: &[u8], crc_poly: u32, crc_width: usize) -> bool {
    let poly = dec_to_binary(crc_poly, crc_width);
    let mut buf = message.to_vec();

    let divisible_len = buf.len().saturating_sub(crc_width - 1);
    for i in 0..divisible_len {
        if buf[i] == 1 {
            for (offset, &p) in poly.iter().enumerate() {
                buf[i + offset] ^= p;
            }
        }
    }

    buf.iter().all(|&b| b == 0)
}
