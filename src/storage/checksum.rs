//! CRC32 checksums for persisted document lines
//!
//! Every line of a collection file is prefixed with the CRC32 (IEEE) of the
//! serialized document bytes that follow it. Reads recompute and compare.

use crc32fast::Hasher;

/// Width of the hex-encoded checksum prefix.
pub const CHECKSUM_HEX_LEN: usize = 8;

/// Computes the CRC32 of a serialized document.
pub fn compute_checksum(data: &[u8]) -> u32 {
    let mut hasher = Hasher::new();
    hasher.update(data);
    hasher.finalize()
}

/// Returns true when `data` still hashes to `expected`.
pub fn verify_checksum(data: &[u8], expected: u32) -> bool {
    compute_checksum(data) == expected
}

/// Renders a checksum as a fixed-width lowercase hex prefix.
pub fn format_checksum(checksum: u32) -> String {
    format!("{:08x}", checksum)
}

/// Parses a fixed-width hex prefix produced by [`format_checksum`].
pub fn parse_checksum(prefix: &str) -> Option<u32> {
    if prefix.len() != CHECKSUM_HEX_LEN || !prefix.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }
    u32::from_str_radix(prefix, 16).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_checksum_detects_flipped_byte() {
        let mut line = br#"{"email":"ada@example.com"}"#.to_vec();
        let stored = compute_checksum(&line);
        line[3] ^= 0x01;
        assert!(!verify_checksum(&line, stored));
    }

    #[test]
    fn test_prefix_is_fixed_width() {
        assert_eq!(format_checksum(0x1f), "0000001f");
        assert_eq!(parse_checksum("0000001f"), Some(0x1f));
    }

    #[test]
    fn test_parse_rejects_bad_prefix() {
        assert_eq!(parse_checksum("1f"), None);
        assert_eq!(parse_checksum("zzzzzzzz"), None);
        assert_eq!(parse_checksum("+000001f"), None);
        assert_eq!(parse_checksum("-000001f"), None);
    }
}
