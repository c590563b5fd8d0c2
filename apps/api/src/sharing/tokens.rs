use rand::Rng;

/// URL-safe alphabet for share tokens (base64url characters).
const ALPHABET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789-_";
/// 43 characters over a 64-symbol alphabet: 258 bits of entropy.
const TOKEN_LEN: usize = 43;

/// Generates a random access token for a share link.
pub fn generate_access_token() -> String {
    let mut rng = rand::thread_rng();
    (0..TOKEN_LEN)
        .map(|_| ALPHABET[rng.gen_range(0..ALPHABET.len())] as char)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn token_has_expected_length_and_charset() {
        let token = generate_access_token();
        assert_eq!(token.len(), TOKEN_LEN);
        assert!(token.bytes().all(|b| ALPHABET.contains(&b)));
    }

    #[test]
    fn tokens_are_unique_across_calls() {
        let a = generate_access_token();
        let b = generate_access_token();
        assert_ne!(a, b);
    }
}
