use crate::Error;

/// Lowercase hex, two digits per byte.
pub fn encode(bytes: &[u8]) -> String {
    ::hex::encode(bytes)
}

/// Removes surrounding and embedded whitespace.
pub fn clean(text: &str) -> String {
    text.chars().filter(|c| !c.is_whitespace()).collect()
}

/// Converts hex text into bytes.
///
/// Whitespace anywhere in `text` is ignored and digits are case-insensitive. Digits are
/// consumed in pairs; when the digit count is odd the last digit forms a byte on its own,
/// so `"abc"` yields `[0xab, 0x0c]`.
pub fn decode(text: &str) -> std::result::Result<Vec<u8>, Error> {
    let clean = clean(text);
    if clean.is_empty() {
        return Err(Error::EmptyHex);
    }
    let invalid = clean.chars().enumerate().find(|(_, c)| !c.is_ascii_hexdigit());
    if let Some((position, found)) = invalid {
        return Err(Error::InvalidHexDigit { position, found });
    }
    // only ASCII digits are left, so byte offsets equal digit positions
    let paired = clean.len() - clean.len() % 2;
    let mut bytes = ::hex::decode(&clean[..paired])?;
    if let Some(lone) = clean[paired..].chars().next().and_then(|c| c.to_digit(16)) {
        bytes.push(lone as u8);
    }
    Ok(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encode_is_lowercase_and_padded() {
        assert_eq!(encode(&[0x01, 0xAB, 0x00, 0xff]), "01ab00ff");
        assert_eq!(encode(&[]), "");
    }

    #[test]
    fn decode_ignores_case_and_whitespace() {
        assert_eq!(
            decode("  01 A0\n0a\tFf ").unwrap(),
            vec![0x01, 0xa0, 0x0a, 0xff]
        );
    }

    #[test]
    fn decode_odd_digit_count() {
        assert_eq!(decode("abc").unwrap(), vec![0xab, 0x0c]);
        assert_eq!(decode("7").unwrap(), vec![0x07]);
        assert_eq!(decode("01 0F f").unwrap(), vec![0x01, 0x0f, 0x0f]);
    }

    #[test]
    fn decode_rejects_empty() {
        assert_eq!(decode(""), Err(Error::EmptyHex));
        assert_eq!(decode(" \n\t "), Err(Error::EmptyHex));
    }

    #[test]
    fn decode_rejects_non_hex() {
        assert_eq!(
            decode("01 0g"),
            Err(Error::InvalidHexDigit {
                position: 3,
                found: 'g'
            })
        );
        assert!(decode("0x01").is_err());
        // non-ASCII digits are rejected before slicing
        assert_eq!(
            decode("0é"),
            Err(Error::InvalidHexDigit {
                position: 1,
                found: 'é'
            })
        );
    }

    #[test]
    fn encode_then_decode() {
        let bytes = [0x01, 0x03, 0x12, 0x01, 0xa0];
        assert_eq!(decode(&encode(&bytes)).unwrap(), bytes);
    }
}
