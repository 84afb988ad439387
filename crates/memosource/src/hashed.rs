//! In-memory source mapping strings to their standard hash code

use crate::source::ValueSource;

/// Standard 32-bit string hash
///
/// `s[0]*31^(n-1) + s[1]*31^(n-2) + ... + s[n-1]` over UTF-16 code units,
/// with wrapping signed arithmetic. The empty string hashes to 0.
pub fn string_hash(s: &str) -> i32 {
    s.encode_utf16()
        .fold(0i32, |h, unit| h.wrapping_mul(31).wrapping_add(unit as i32))
}

/// Deterministic source: the value for a key is its [`string_hash`]
#[derive(Debug, Default)]
pub struct HashedSource {
    queries: u64,
}

impl HashedSource {
    /// Create a source with a zeroed invocation counter
    pub fn new() -> Self {
        Self::default()
    }
}

impl ValueSource<String, i32> for HashedSource {
    fn fetch(&mut self, key: &String) -> i32 {
        self.queries += 1;
        string_hash(key)
    }

    fn invocations(&self) -> u64 {
        self.queries
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_hashes() {
        assert_eq!(string_hash(""), 0);
        assert_eq!(string_hash("1"), 49);
        assert_eq!(string_hash("123"), 48690);
        assert_eq!(string_hash("hello"), 99162322);
        assert_eq!(string_hash("bye"), 98030);
    }

    #[test]
    fn test_hash_wraps() {
        // 31-fold overflow of i32 on long inputs must not panic
        let long = "z".repeat(64);
        let _ = string_hash(&long);
        assert_eq!(string_hash("polygenelubricants"), i32::MIN);
    }

    #[test]
    fn test_hash_uses_utf16_units() {
        // U+1F600 is a surrogate pair: 0xD83D, 0xDE00
        assert_eq!(string_hash("\u{1F600}"), 0xD83D * 31 + 0xDE00);
        assert_eq!(string_hash("é"), 0xE9);
    }

    #[test]
    fn test_fetch_counts_calls() {
        let mut source = HashedSource::new();
        assert_eq!(source.invocations(), 0);

        assert_eq!(source.fetch(&"hello".to_string()), string_hash("hello"));
        assert_eq!(source.invocations(), 1);

        source.fetch(&"world".to_string());
        source.fetch(&"hello".to_string());
        assert_eq!(source.invocations(), 3);

        let other = HashedSource::new();
        assert_eq!(other.invocations(), 0);
    }
}
