use base64::engine::general_purpose::STANDARD;
use base64::Engine;

/// Input bytes per encoding step. A multiple of 3, so no padding appears
/// mid-stream and the output equals a one-shot encode.
const CHUNK: usize = 3 * 0x2000;

/// Base64-encode `bytes` in fixed-size chunks into one preallocated string
pub fn encode_chunked(bytes: &[u8]) -> String {
    let mut out = String::with_capacity(bytes.len().div_ceil(3) * 4);
    for chunk in bytes.chunks(CHUNK) {
        STANDARD.encode_string(chunk, &mut out);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_small_input() {
        assert_eq!(encode_chunked(b""), "");
        assert_eq!(encode_chunked(b"x"), "eA==");
        assert_eq!(encode_chunked(b"hello"), "aGVsbG8=");
    }

    #[test]
    fn test_multi_chunk_matches_one_shot() {
        let data: Vec<u8> = (0..(CHUNK * 3 + 7)).map(|i| (i % 251) as u8).collect();
        assert_eq!(encode_chunked(&data), STANDARD.encode(&data));
    }
}
