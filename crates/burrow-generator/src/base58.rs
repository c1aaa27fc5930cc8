use crate::Generator;
use burrow_core::ShortCode;

/// Encodes the count with the Bitcoin base58 alphabet.
///
/// The alphabet leaves out `0`, `O`, `I` and `l`, which makes keys easier
/// to read back over the phone. Leading zero bytes of the count are
/// stripped before encoding so that small counts give short keys.
#[derive(Debug, Clone, Copy, Default)]
pub struct Base58Generator;

impl Generator for Base58Generator {
    fn generate(&self, count: u64) -> ShortCode {
        let bytes = count.to_be_bytes();
        let start = bytes
            .iter()
            .position(|&b| b != 0)
            .unwrap_or(bytes.len() - 1);
        ShortCode::new_unchecked(bs58::encode(&bytes[start..]).into_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_is_a_single_character() {
        assert_eq!(Base58Generator.generate(0).as_str(), "1");
    }

    #[test]
    fn small_counts() {
        assert_eq!(Base58Generator.generate(1).as_str(), "2");
        assert_eq!(Base58Generator.generate(57).as_str(), "z");
        assert_eq!(Base58Generator.generate(58).as_str(), "21");
    }

    #[test]
    fn keys_avoid_ambiguous_characters() {
        for n in 0..5_000 {
            let key = Base58Generator.generate(n);
            assert!(!key.as_str().contains(&['0', 'O', 'I', 'l'][..]), "{key}");
        }
    }
}
