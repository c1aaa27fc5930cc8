use crate::Generator;
use burrow_core::ShortCode;

const ALPHABET: &[u8; 62] = b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";
const BASE: u64 = ALPHABET.len() as u64;

/// Encodes the count as a positional base-62 numeral.
///
/// `0 -> "a"`, `61 -> "9"`, `62 -> "ba"`. Keys grow by one character every
/// time the store size crosses a power of 62, so the first 62 entries get
/// single-character keys, the first 3844 at most two.
#[derive(Debug, Clone, Copy, Default)]
pub struct Base62Generator;

impl Base62Generator {
    /// Encodes `n` without wrapping it into a [`ShortCode`].
    pub fn encode(mut n: u64) -> String {
        // u64::MAX needs 11 digits in base 62.
        let mut buf = [0u8; 11];
        let mut i = buf.len();
        loop {
            i -= 1;
            buf[i] = ALPHABET[(n % BASE) as usize];
            n /= BASE;
            if n == 0 {
                break;
            }
        }
        buf[i..].iter().map(|&b| b as char).collect()
    }
}

impl Generator for Base62Generator {
    fn generate(&self, count: u64) -> ShortCode {
        ShortCode::new_unchecked(Self::encode(count))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_digit_keys() {
        assert_eq!(Base62Generator.generate(0).as_str(), "a");
        assert_eq!(Base62Generator.generate(1).as_str(), "b");
        assert_eq!(Base62Generator.generate(26).as_str(), "A");
        assert_eq!(Base62Generator.generate(52).as_str(), "0");
        assert_eq!(Base62Generator.generate(61).as_str(), "9");
    }

    #[test]
    fn carries_into_next_position() {
        assert_eq!(Base62Generator.generate(62).as_str(), "ba");
        assert_eq!(Base62Generator.generate(63).as_str(), "bb");
        assert_eq!(Base62Generator.generate(62 * 62 - 1).as_str(), "99");
        assert_eq!(Base62Generator.generate(62 * 62).as_str(), "baa");
    }

    #[test]
    fn max_value_fits() {
        let key = Base62Generator::encode(u64::MAX);
        assert_eq!(key.len(), 11);
        assert_eq!(key, "v8QrKbgkrIp");
    }

    #[test]
    fn same_count_same_key() {
        let generator = Base62Generator;
        assert_eq!(generator.generate(4242), generator.generate(4242));
    }
}
