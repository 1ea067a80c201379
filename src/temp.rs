//! DS1620 temperature encoding: a 9-bit two's-complement count of
//! half-degree-Celsius units, bit 8 carrying the sign.

const NEGATIVE_MASK: i16 = 0xFF00u16 as i16;

/// Decode a raw 9-bit register value to whole degrees Celsius.
///
/// Sign-extends bit 8 across the word, then arithmetically shifts right by
/// one; the shift truncates toward negative infinity, matching the chip's
/// two's-complement encoding.
pub fn decode_celsius(raw: i16) -> i16 {
    let mut temp = raw;
    if temp & NEGATIVE_MASK != 0 {
        temp |= NEGATIVE_MASK;
    }
    temp >> 1
}

/// Encode whole degrees Celsius into the chip's half-degree units (the
/// inverse of [`decode_celsius`] for the representable range).
pub fn encode_celsius(celsius: i16) -> u16 {
    (celsius << 1) as u16
}

/// Whole-degree Celsius to whole-degree Fahrenheit, truncating toward zero.
pub fn celsius_to_fahrenheit(celsius: i16) -> i16 {
    (9 * celsius + 160) / 5
}
