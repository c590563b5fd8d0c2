use base64::engine::general_purpose::STANDARD;
use base64::{DecodeError, Engine};

/// Base64 text is decoded in slices of this many characters so a large audio
/// payload never goes through one giant single-shot conversion.
pub const CHUNK_SIZE: usize = 32 * 1024;

/// Decodes a base64 payload in bounded chunks and concatenates the results.
///
/// Chunk boundaries are aligned to 4-character base64 groups, so each slice
/// decodes independently and the concatenation reproduces the original byte
/// sequence exactly, whatever chunk size is chosen.
pub fn decode_chunked(input: &str, chunk_size: usize) -> Result<Vec<u8>, DecodeError> {
    let chunk_size = (chunk_size.max(4) / 4) * 4;

    let input = input.trim();
    let mut out = Vec::with_capacity(input.len() / 4 * 3);
    for piece in input.as_bytes().chunks(chunk_size) {
        out.extend(STANDARD.decode(piece)?);
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_for_any_chunk_size() {
        let original: Vec<u8> = (0..=255u8).cycle().take(10_000).collect();
        let encoded = STANDARD.encode(&original);
        for chunk_size in [1, 4, 7, 64, 1024, CHUNK_SIZE, encoded.len() + 1] {
            let decoded = decode_chunked(&encoded, chunk_size).unwrap();
            assert_eq!(decoded, original, "chunk_size={chunk_size}");
        }
    }

    #[test]
    fn matches_single_shot_decode() {
        let encoded = STANDARD.encode(b"hello interview audio");
        assert_eq!(
            decode_chunked(&encoded, 8).unwrap(),
            STANDARD.decode(&encoded).unwrap()
        );
    }

    #[test]
    fn empty_payload_decodes_to_empty_buffer() {
        assert_eq!(decode_chunked("", CHUNK_SIZE).unwrap(), Vec::<u8>::new());
    }

    #[test]
    fn padding_only_in_final_chunk_is_handled() {
        // "c3Vy" "ZQ==" — the padded group lands in the second chunk
        let encoded = STANDARD.encode(b"sure");
        assert_eq!(decode_chunked(&encoded, 4).unwrap(), b"sure");
    }

    #[test]
    fn invalid_base64_is_rejected() {
        assert!(decode_chunked("not base64!!", 4).is_err());
    }
}
