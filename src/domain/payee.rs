use crate::error::{Result, ShopError};
use std::fmt;

const MOBILE_COUNTRY_PREFIX: &str = "0066";

/// The kind of account a payee identifier refers to, judged from its raw shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PayeeKind {
    /// 10-digit local mobile number with a leading zero.
    Mobile,
    /// 13-digit national ID or tax ID.
    NationalId,
    /// 15-digit e-wallet ID.
    EWallet,
    /// Anything else. Passed through untouched.
    Other,
}

/// A payee identifier after stripping spaces and hyphens and normalizing mobiles.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PayeeId {
    value: String,
    kind: PayeeKind,
}

impl PayeeId {
    /// Best-effort normalization. Rejects only identifiers that are empty after
    /// stripping or that carry non-ASCII characters.
    pub fn parse(raw: &str) -> Result<Self> {
        let stripped = strip(raw);
        if stripped.is_empty() {
            return Err(ShopError::EmptyIdentifier);
        }
        if !stripped.is_ascii() {
            return Err(ShopError::MalformedIdentifier(format!(
                "'{}' contains non-ASCII characters",
                raw
            )));
        }
        let kind = classify(&stripped);
        Ok(Self {
            value: normalize_stripped(stripped),
            kind,
        })
    }

    /// Like [`PayeeId::parse`] but rejects identifiers of unknown shape.
    pub fn parse_strict(raw: &str) -> Result<Self> {
        let id = Self::parse(raw)?;
        if id.kind == PayeeKind::Other {
            return Err(ShopError::MalformedIdentifier(raw.to_string()));
        }
        Ok(id)
    }

    pub fn as_str(&self) -> &str {
        &self.value
    }

    pub fn kind(&self) -> PayeeKind {
        self.kind
    }
}

impl fmt::Display for PayeeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.value)
    }
}

/// Strips spaces and hyphens, then rewrites a 10-digit `0…` mobile number to
/// `0066` followed by its last 9 digits. Other inputs come back stripped only.
pub fn normalize(raw: &str) -> String {
    normalize_stripped(strip(raw))
}

fn strip(raw: &str) -> String {
    raw.chars()
        .filter(|c| !c.is_whitespace() && *c != '-')
        .collect()
}

fn normalize_stripped(stripped: String) -> String {
    if is_local_mobile(&stripped) {
        format!("{}{}", MOBILE_COUNTRY_PREFIX, &stripped[1..])
    } else {
        stripped
    }
}

fn is_local_mobile(s: &str) -> bool {
    s.chars().count() == 10 && s.starts_with('0')
}

fn classify(stripped: &str) -> PayeeKind {
    let all_digits = stripped.chars().all(|c| c.is_ascii_digit());
    match stripped.len() {
        10 if all_digits && stripped.starts_with('0') => PayeeKind::Mobile,
        13 if all_digits => PayeeKind::NationalId,
        15 if all_digits => PayeeKind::EWallet,
        _ => PayeeKind::Other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mobile_is_normalized() {
        assert_eq!(normalize("0812345678"), "0066812345678");
        let id = PayeeId::parse("0812345678").unwrap();
        assert_eq!(id.as_str(), "0066812345678");
        assert_eq!(id.kind(), PayeeKind::Mobile);
    }

    #[test]
    fn test_separators_are_stripped() {
        assert_eq!(normalize("081-234-5678"), "0066812345678");
        assert_eq!(normalize("081 234 5678"), "0066812345678");
    }

    #[test]
    fn test_other_lengths_pass_through() {
        assert_eq!(normalize("1234567890123456"), "1234567890123456");
        assert_eq!(normalize("081234567"), "081234567");
        assert_eq!(normalize("1-2345-67890-12-3"), "1234567890123");
    }

    #[test]
    fn test_ten_chars_with_leading_zero_is_rewritten_even_if_not_numeric() {
        // The rewrite only looks at length and the leading zero.
        assert_eq!(normalize("0abcdefghi"), "0066abcdefghi");
        assert_eq!(PayeeId::parse("0abcdefghi").unwrap().kind(), PayeeKind::Other);
    }

    #[test]
    fn test_kinds() {
        assert_eq!(
            PayeeId::parse("1234567890123").unwrap().kind(),
            PayeeKind::NationalId
        );
        assert_eq!(
            PayeeId::parse("123456789012345").unwrap().kind(),
            PayeeKind::EWallet
        );
    }

    #[test]
    fn test_non_ascii_identifier_rejected() {
        assert!(matches!(
            PayeeId::parse("ร้านฟิว"),
            Err(ShopError::MalformedIdentifier(_))
        ));
        assert!(matches!(
            PayeeId::parse("081-234-567８"),
            Err(ShopError::MalformedIdentifier(_))
        ));
    }

    #[test]
    fn test_empty_identifier() {
        assert!(matches!(PayeeId::parse(""), Err(ShopError::EmptyIdentifier)));
        assert!(matches!(
            PayeeId::parse(" - - "),
            Err(ShopError::EmptyIdentifier)
        ));
    }

    #[test]
    fn test_strict_rejects_unknown_shape() {
        assert!(matches!(
            PayeeId::parse_strict("1234567890123456"),
            Err(ShopError::MalformedIdentifier(_))
        ));
        assert!(PayeeId::parse_strict("081-234-5678").is_ok());
    }
}
