//! Content-type detection from file bytes.
//!
//! The extension is never consulted. Binary formats are recognised by their
//! magic numbers; anything else that decodes as UTF-8 without control bytes is
//! treated as plain text.

/// Fallback type for empty or unrecognised content.
pub const OCTET_STREAM: &str = "application/octet-stream";

/// Type reported for UTF-8 text.
pub const TEXT_PLAIN: &str = "text/plain; charset=utf-8";

/// Only the first 512 bytes are inspected.
const SNIFF_LEN: usize = 512;

/// Detect the MIME type of `data`.
#[must_use]
pub fn detect_content_type(data: &[u8]) -> &'static str {
    if data.is_empty() {
        return OCTET_STREAM;
    }

    let head = &data[..data.len().min(SNIFF_LEN)];

    if let Some(kind) = infer::get(head) {
        return kind.mime_type();
    }

    if looks_like_text(head) {
        TEXT_PLAIN
    } else {
        OCTET_STREAM
    }
}

fn looks_like_text(head: &[u8]) -> bool {
    let text = match std::str::from_utf8(head) {
        Ok(text) => text,
        // Truncation at SNIFF_LEN may split a multi-byte sequence.
        Err(e) if e.error_len().is_none() => {
            match std::str::from_utf8(&head[..e.valid_up_to()]) {
                Ok(text) => text,
                Err(_) => return false,
            }
        }
        Err(_) => return false,
    };

    !text
        .chars()
        .any(|c| c.is_control() && !matches!(c, '\n' | '\r' | '\t' | '\x0c'))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rstest::rstest;

    #[test]
    fn test_empty_is_octet_stream() {
        assert_eq!(detect_content_type(b""), OCTET_STREAM);
    }

    #[rstest]
    #[case::hello(b"hello".as_slice(), TEXT_PLAIN)]
    #[case::multiline(b"line one\nline two\r\n\ttabbed".as_slice(), TEXT_PLAIN)]
    #[case::utf8("привет, мир".as_bytes(), TEXT_PLAIN)]
    #[case::png(b"\x89PNG\r\n\x1a\n\0\0\0\rIHDR".as_slice(), "image/png")]
    #[case::pdf(b"%PDF-1.7\n%\xe2\xe3\xcf\xd3".as_slice(), "application/pdf")]
    #[case::gzip(b"\x1f\x8b\x08\0\0\0\0\0".as_slice(), "application/gzip")]
    #[case::nul_bytes(b"abc\0def".as_slice(), OCTET_STREAM)]
    #[case::invalid_utf8(b"\xff\xfe\xfd garbage".as_slice(), OCTET_STREAM)]
    fn test_detect_content_type(#[case] data: &[u8], #[case] expected: &str) {
        assert_eq!(detect_content_type(data), expected);
    }

    #[test]
    fn test_multibyte_split_at_sniff_boundary() {
        let mut data = vec![b'a'; SNIFF_LEN - 1];
        data.extend_from_slice("ж".as_bytes());
        assert_eq!(detect_content_type(&data), TEXT_PLAIN);
    }

    proptest! {
        #[test]
        fn prop_detection_never_panics(data in proptest::collection::vec(any::<u8>(), 0..2048)) {
            let ct = detect_content_type(&data);
            prop_assert!(!ct.is_empty());
        }

        #[test]
        fn prop_printable_ascii_is_text(s in "[ -~]{1,600}") {
            prop_assume!(infer::get(s.as_bytes()).is_none());
            prop_assert_eq!(detect_content_type(s.as_bytes()), TEXT_PLAIN);
        }
    }
}
