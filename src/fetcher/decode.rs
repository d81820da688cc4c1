//! Turning a fetched body into UTF-8 text.
//!
//! Russian news sites still serve windows-1251 now and then, so the encoding is
//! taken from the Content-Type header, then from a `<meta>` tag in the first
//! 4KB, and finally guessed.

use crate::fetcher::errors::FetchError;
use encoding_rs::Encoding;
use regex::Regex;
use std::sync::LazyLock;

const SNIFF_LEN: usize = 4096;

static CHARSET_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"(?i)charset\s*=\s*["']?([^"'\s;]+)"#).unwrap());

static META_CHARSET_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"(?i)<meta\s+[^>]*?charset\s*=\s*["']?([^"'\s/>]+)"#).unwrap());

pub fn decode_body(content_type: &str, body: &[u8]) -> Result<String, FetchError> {
    let encoding = detect_encoding(content_type, body);
    let (decoded, _encoding, had_errors) = encoding.decode(body);

    if had_errors {
        return Err(FetchError::Charset(format!(
            "failed to decode content as {}",
            encoding.name()
        )));
    }

    Ok(decoded.into_owned())
}

pub fn detect_encoding(content_type: &str, body: &[u8]) -> &'static Encoding {
    if let Some(encoding) = label_from(&CHARSET_REGEX, content_type) {
        return encoding;
    }

    let sniff = &body[..body.len().min(SNIFF_LEN)];
    let head = String::from_utf8_lossy(sniff);

    // Covers both <meta charset> and the http-equiv content attribute.
    if let Some(encoding) = label_from(&META_CHARSET_REGEX, &head) {
        return encoding;
    }

    let mut detector = chardetng::EncodingDetector::new();
    detector.feed(sniff, sniff.len() == body.len());
    detector.guess(None, true)
}

fn label_from(regex: &Regex, haystack: &str) -> Option<&'static Encoding> {
    let label = regex.captures(haystack)?.get(1)?;
    Encoding::for_label(label.as_str().trim().to_lowercase().as_bytes())
}
