use crate::error::{Result, ShopError};
use std::fmt;

/// A single tag-length-value field of a payment payload.
///
/// The length prefix is derived from the value, so a constructed field always
/// satisfies `length == value.chars().count()`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    tag: &'static str,
    value: String,
}

impl Field {
    pub const MAX_VALUE_LEN: usize = 99;

    pub fn new(tag: &'static str, value: impl Into<String>) -> Result<Self> {
        let value = value.into();
        let len = value.chars().count();
        if len > Self::MAX_VALUE_LEN {
            return Err(ShopError::FieldTooLong {
                tag: tag.to_string(),
                len,
            });
        }
        Ok(Self { tag, value })
    }

    /// Wraps nested fields into one field, as used by the merchant account block.
    pub fn nested(tag: &'static str, fields: &[Field]) -> Result<Self> {
        Self::new(tag, serialize(fields))
    }

    pub fn tag(&self) -> &str {
        self.tag
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn len(&self) -> usize {
        self.value.chars().count()
    }

    pub fn is_empty(&self) -> bool {
        self.value.is_empty()
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{:02}{}", self.tag, self.len(), self.value)
    }
}

/// Concatenates fields in the given order.
pub fn serialize(fields: &[Field]) -> String {
    fields.iter().map(ToString::to_string).collect()
}

/// A field read back from a payload. Tags are owned since they come from input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawField {
    pub tag: String,
    pub value: String,
}

/// Splits `input` into consecutive TLV fields.
pub fn parse(input: &str) -> Result<Vec<RawField>> {
    let chars: Vec<char> = input.chars().collect();
    let mut fields = Vec::new();
    let mut pos = 0;

    while pos < chars.len() {
        if pos + 4 > chars.len() {
            return Err(ShopError::MalformedPayload(format!(
                "truncated field header at offset {}",
                pos
            )));
        }
        let tag: String = chars[pos..pos + 2].iter().collect();
        let len_text: String = chars[pos + 2..pos + 4].iter().collect();
        if !len_text.chars().all(|c| c.is_ascii_digit()) {
            return Err(ShopError::MalformedPayload(format!(
                "non-numeric length '{}' for tag {}",
                len_text, tag
            )));
        }
        let len: usize = len_text
            .parse()
            .map_err(|_| ShopError::MalformedPayload(format!("bad length for tag {}", tag)))?;
        let start = pos + 4;
        let end = start + len;
        if end > chars.len() {
            return Err(ShopError::MalformedPayload(format!(
                "tag {} declares {} characters but only {} remain",
                tag,
                len,
                chars.len() - start
            )));
        }
        fields.push(RawField {
            tag,
            value: chars[start..end].iter().collect(),
        });
        pos = end;
    }

    Ok(fields)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_length_prefix_is_zero_padded() {
        let field = Field::new("58", "TH").unwrap();
        assert_eq!(field.to_string(), "5802TH");
    }

    #[test]
    fn test_field_too_long() {
        let value = "9".repeat(100);
        assert!(matches!(
            Field::new("29", value),
            Err(ShopError::FieldTooLong { len: 100, .. })
        ));
        assert!(Field::new("29", "9".repeat(99)).is_ok());
    }

    #[test]
    fn test_nested_field() {
        let inner = vec![
            Field::new("00", "A000000677010111").unwrap(),
            Field::new("01", "0066812345678").unwrap(),
        ];
        let outer = Field::nested("29", &inner).unwrap();
        assert_eq!(
            outer.to_string(),
            "29370016A00000067701011101130066812345678"
        );
    }

    #[test]
    fn test_parse_fields() {
        let fields = parse("000201010211").unwrap();
        assert_eq!(fields.len(), 2);
        assert_eq!(fields[1].tag, "01");
        assert_eq!(fields[1].value, "11");
    }

    #[test]
    fn test_parse_truncated_value() {
        assert!(matches!(
            parse("0005AB"),
            Err(ShopError::MalformedPayload(_))
        ));
    }

    #[test]
    fn test_parse_bad_length() {
        assert!(matches!(
            parse("00x1A"),
            Err(ShopError::MalformedPayload(_))
        ));
    }
}
