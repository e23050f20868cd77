// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Percent-encoding for form submissions

use percent_encoding::{percent_encode, AsciiSet, NON_ALPHANUMERIC};

/// Everything except ASCII letters, digits and `-_()` is escaped.
const FORM_VALUE: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'(')
    .remove(b')');

/// Percent-encode a string byte by byte, with upper-case hex digits.
pub fn escape(input: &str) -> String {
    percent_encode(input.as_bytes(), FORM_VALUE).to_string()
}

/// Append `key=value` to a form body, separated from earlier pairs by `&`.
pub fn append_key_value(output: &mut String, key: &str, value: &str) {
    if !output.is_empty() {
        output.push('&');
    }
    output.push_str(&escape(key));
    output.push('=');
    output.push_str(&escape(value));
}

#[cfg(test)]
mod tests {
    use super::*;
    use percent_encoding::percent_decode_str;

    #[test]
    fn test_unreserved_passthrough() {
        assert_eq!(escape("AZaz09-_()"), "AZaz09-_()");
    }

    #[test]
    fn test_reserved_escaped() {
        assert_eq!(escape("two words"), "two%20words");
        assert_eq!(escape("a.b~c"), "a%2Eb%7Ec");
        assert_eq!(escape("x=1&y"), "x%3D1%26y");
        assert_eq!(escape("æ"), "%C3%A6");
    }

    #[test]
    fn test_round_trip() {
        for input in ["", "plain", "100% sure?", "line\nbreak", "ünïcödé ☃", "%2F"] {
            let escaped = escape(input);
            assert!(escaped
                .bytes()
                .all(|b| b.is_ascii_alphanumeric() || b"-_()%".contains(&b)));
            assert_eq!(percent_decode_str(&escaped).decode_utf8().unwrap(), input);
        }
    }

    #[test]
    fn test_append_key_value() {
        let mut body = String::new();
        append_key_value(&mut body, "a", "1");
        append_key_value(&mut body, "b", "two words");
        assert_eq!(body, "a=1&b=two%20words");
    }
}
