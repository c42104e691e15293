//! Core data types: block hashes and checkpoint entries.
//!
//! Hashes are stored in the same byte order as their hex rendering, so the
//! string compiled into a checkpoint table is exactly what `Display` prints.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::HashParseError;

/// A 32-byte block hash.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Hash256(pub [u8; 32]);

impl Hash256 {
    /// The zero hash (32 zero bytes).
    pub const ZERO: Self = Self([0u8; 32]);

    /// Create a Hash256 from a byte array.
    pub const fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// Return the underlying bytes.
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Check if this is the zero hash.
    pub fn is_zero(&self) -> bool {
        self.0 == [0u8; 32]
    }

    /// Decode a hash from hex at compile time.
    ///
    /// Accepts 64 hex digits with an optional `0x` prefix. Intended for
    /// compiled-in tables: used in a `const` item, malformed input is a
    /// compile error rather than a runtime failure.
    ///
    /// # Panics
    ///
    /// Panics on a wrong length or a non-hex digit. Use [`str::parse`] for
    /// untrusted input.
    ///
    /// # Examples
    ///
    /// ```
    /// use keel_core::types::Hash256;
    /// const H: Hash256 = Hash256::from_hex_const(
    ///     "0x00000000000000000000000000000000000000000000000000000000000000ff",
    /// );
    /// assert_eq!(H.as_bytes()[31], 0xff);
    /// ```
    pub const fn from_hex_const(s: &str) -> Self {
        let bytes = s.as_bytes();
        let offset = if bytes.len() >= 2 && bytes[0] == b'0' && (bytes[1] == b'x' || bytes[1] == b'X') {
            2
        } else {
            0
        };
        assert!(bytes.len() == offset + 64, "hash must be 64 hex digits");

        let mut out = [0u8; 32];
        let mut i = 0;
        while i < 32 {
            let hi = hex_nibble(bytes[offset + 2 * i]);
            let lo = hex_nibble(bytes[offset + 2 * i + 1]);
            out[i] = (hi << 4) | lo;
            i += 1;
        }
        Self(out)
    }
}

const fn hex_nibble(c: u8) -> u8 {
    match c {
        b'0'..=b'9' => c - b'0',
        b'a'..=b'f' => c - b'a' + 10,
        b'A'..=b'F' => c - b'A' + 10,
        _ => panic!("invalid hex digit in hash"),
    }
}

impl fmt::Display for Hash256 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for byte in &self.0 {
            write!(f, "{byte:02x}")?;
        }
        Ok(())
    }
}

impl fmt::Debug for Hash256 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Hash256({self})")
    }
}

impl FromStr for Hash256 {
    type Err = HashParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let digits = s
            .strip_prefix("0x")
            .or_else(|| s.strip_prefix("0X"))
            .unwrap_or(s);
        if digits.len() != 64 {
            return Err(HashParseError::InvalidLength(digits.len()));
        }
        let mut out = [0u8; 32];
        hex::decode_to_slice(digits, &mut out)
            .map_err(|e| HashParseError::InvalidHex(e.to_string()))?;
        Ok(Self(out))
    }
}

impl From<[u8; 32]> for Hash256 {
    fn from(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }
}

impl AsRef<[u8]> for Hash256 {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl Serialize for Hash256 {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Hash256 {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// A block the release authors verified as canonical at a given height.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Checkpoint {
    /// Block height.
    pub height: u64,
    /// Expected block hash at `height`.
    pub hash: Hash256,
}

impl Checkpoint {
    pub const fn new(height: u64, hash: Hash256) -> Self {
        Self { height, hash }
    }
}

impl fmt::Display for Checkpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.height, self.hash)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "bbd01e417e370842498a91038fd40da95f4a6166a231a3bed3c4671207bd8296";

    #[test]
    fn parse_and_display_agree() {
        let hash: Hash256 = SAMPLE.parse().unwrap();
        assert_eq!(hash.to_string(), SAMPLE);
        assert_eq!(hash.as_bytes()[0], 0xbb);
        assert_eq!(hash.as_bytes()[31], 0x96);
    }

    #[test]
    fn parse_accepts_0x_prefix() {
        let plain: Hash256 = SAMPLE.parse().unwrap();
        let prefixed: Hash256 = format!("0x{SAMPLE}").parse().unwrap();
        assert_eq!(plain, prefixed);
    }

    #[test]
    fn parse_rejects_wrong_length() {
        assert_eq!(
            "abcd".parse::<Hash256>(),
            Err(HashParseError::InvalidLength(4))
        );
        let long = format!("{SAMPLE}00");
        assert_eq!(
            long.parse::<Hash256>(),
            Err(HashParseError::InvalidLength(66))
        );
    }

    #[test]
    fn parse_rejects_non_hex() {
        let bad = "zz".repeat(32);
        assert!(matches!(
            bad.parse::<Hash256>(),
            Err(HashParseError::InvalidHex(_))
        ));
    }

    #[test]
    fn const_decoder_matches_runtime_parser() {
        const H: Hash256 = Hash256::from_hex_const(
            "0xBBD01E417E370842498A91038FD40DA95F4A6166A231A3BED3C4671207BD8296",
        );
        assert_eq!(H, SAMPLE.parse().unwrap());
    }

    #[test]
    #[should_panic(expected = "64 hex digits")]
    fn const_decoder_panics_on_short_input() {
        let _ = Hash256::from_hex_const("abcd");
    }

    #[test]
    fn serde_uses_hex_strings() {
        let cp = Checkpoint::new(25, SAMPLE.parse().unwrap());
        let json = serde_json::to_string(&cp).unwrap();
        assert_eq!(json, format!(r#"{{"height":25,"hash":"{SAMPLE}"}}"#));
        let back: Checkpoint = serde_json::from_str(&json).unwrap();
        assert_eq!(back, cp);
    }

    #[test]
    fn debug_is_readable() {
        let dbg = format!("{:?}", Hash256::ZERO);
        assert_eq!(dbg, format!("Hash256({})", "0".repeat(64)));
        assert!(Hash256::ZERO.is_zero());
    }
}
