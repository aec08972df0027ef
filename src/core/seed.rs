//! Seed Derivation
//!
//! Maps an observed client address string to the 32-bit seed that drives the
//! rest of the pipeline. Dotted-quad IPv4 packs big-endian; everything else
//! (IPv6 literals, malformed text) falls back to 32-bit FNV-1a.

/// FNV-1a 32-bit offset basis.
pub const FNV_OFFSET_BASIS: u32 = 2_166_136_261;

/// FNV-1a 32-bit prime.
pub const FNV_PRIME: u32 = 16_777_619;

/// Derive the pipeline seed from an address string.
///
/// Total over every input: there is no error path.
///
/// ```
/// use crystal_id::core::seed::derive_seed;
///
/// assert_eq!(derive_seed("0.0.0.1"), 1);
/// assert_eq!(derive_seed(" [255.255.255.255] "), u32::MAX);
/// ```
pub fn derive_seed(address: &str) -> u32 {
    let cleaned = clean_address(address);

    if cleaned.contains('.') {
        if let Some(packed) = parse_ipv4(cleaned) {
            return packed;
        }
    }

    fnv1a_32(cleaned)
}

/// Strip surrounding whitespace and one pair of IPv6 brackets.
pub fn clean_address(address: &str) -> &str {
    let trimmed = address.trim();
    let trimmed = trimmed.strip_prefix('[').unwrap_or(trimmed);
    let trimmed = trimmed.strip_suffix(']').unwrap_or(trimmed);
    trimmed.trim()
}

/// Parse a strict dotted-quad and pack it big-endian.
///
/// Each of the four parts must be a non-empty run of ASCII digits in [0, 255].
pub fn parse_ipv4(text: &str) -> Option<u32> {
    let mut packed: u32 = 0;
    let mut parts = 0;

    for part in text.split('.') {
        parts += 1;
        if parts > 4 || part.is_empty() || !part.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        // Leading zeros are accepted; overlong digit runs are rejected by the bound
        let octet: u32 = part.parse().ok()?;
        if octet > 255 {
            return None;
        }
        packed = (packed << 8) | octet;
    }

    (parts == 4).then_some(packed)
}

/// 32-bit FNV-1a over the UTF-16 code units of `text`.
#[inline]
pub fn fnv1a_32(text: &str) -> u32 {
    text.encode_utf16().fold(FNV_OFFSET_BASIS, |h, unit| {
        (h ^ unit as u32).wrapping_mul(FNV_PRIME)
    })
}

// =============================================================================
// TESTS
// =============================================================================
