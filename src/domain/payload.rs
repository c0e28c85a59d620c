use super::amount::PaymentAmount;
use super::crc::checksum_hex;
use super::payee::{PayeeId, PayeeKind};
use super::tlv::{self, Field, RawField};
use crate::error::{Result, ShopError};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub const TAG_FORMAT_INDICATOR: &str = "00";
pub const TAG_POINT_OF_INITIATION: &str = "01";
pub const TAG_MERCHANT_ACCOUNT: &str = "29";
pub const TAG_COUNTRY: &str = "58";
pub const TAG_CURRENCY: &str = "53";
pub const TAG_AMOUNT: &str = "54";
pub const TAG_CHECKSUM: &str = "63";

pub const SUB_TAG_APPLICATION_ID: &str = "00";
/// Every payee identifier, whatever its kind, sits under this sub-tag.
pub const SUB_TAG_PAYEE: &str = "01";

const FORMAT_INDICATOR: &str = "01";
const POINT_OF_INITIATION: &str = "11";
const APPLICATION_ID: &str = "A000000677010111";
const COUNTRY_CODE: &str = "TH";
const CURRENCY_CODE: &str = "764";
/// Checksum tag plus its fixed length, covered by the checksum itself.
const CHECKSUM_MARKER: &str = "6304";
const CHECKSUM_LEN: usize = 4;

/// How much validation the encoder applies to its inputs.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum EncodeMode {
    /// Byte-compatible with the shop's original receipts: negative amounts are
    /// formatted as-is.
    Legacy,
    /// Rejects invalid amounts, passes unknown identifier shapes through.
    #[default]
    Standard,
    /// Rejects invalid amounts and unknown identifier shapes.
    Strict,
}

impl fmt::Display for EncodeMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            EncodeMode::Legacy => "legacy",
            EncodeMode::Standard => "standard",
            EncodeMode::Strict => "strict",
        };
        f.write_str(name)
    }
}

/// A complete payment payload: all fields followed by `6304` and the CRC.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Payload(String);

impl Payload {
    /// Builds the payload for `payee` and an optional `amount`.
    ///
    /// Field order is fixed: format indicator, point of initiation, merchant
    /// account, country, currency, then the amount when present.
    pub fn encode(payee: &str, amount: Option<Decimal>, mode: EncodeMode) -> Result<Self> {
        let payee = match mode {
            EncodeMode::Strict => PayeeId::parse_strict(payee)?,
            EncodeMode::Legacy | EncodeMode::Standard => PayeeId::parse(payee)?,
        };
        if payee.kind() == PayeeKind::Other {
            tracing::warn!(payee = %payee, "payee identifier has an unrecognized shape, passing it through");
        }

        let amount = amount
            .map(|value| match mode {
                EncodeMode::Legacy => {
                    let amount = PaymentAmount::new_unchecked(value)?;
                    if amount.is_negative() {
                        tracing::warn!(%amount, "formatting negative amount in legacy mode");
                    }
                    Ok(amount)
                }
                EncodeMode::Standard | EncodeMode::Strict => PaymentAmount::new(value),
            })
            .transpose()?;

        Self::from_parts(&payee, amount.as_ref())
    }

    fn from_parts(payee: &PayeeId, amount: Option<&PaymentAmount>) -> Result<Self> {
        let merchant = Field::nested(
            TAG_MERCHANT_ACCOUNT,
            &[
                Field::new(SUB_TAG_APPLICATION_ID, APPLICATION_ID)?,
                Field::new(SUB_TAG_PAYEE, payee.as_str())?,
            ],
        )?;

        let mut fields = vec![
            Field::new(TAG_FORMAT_INDICATOR, FORMAT_INDICATOR)?,
            Field::new(TAG_POINT_OF_INITIATION, POINT_OF_INITIATION)?,
            merchant,
            Field::new(TAG_COUNTRY, COUNTRY_CODE)?,
            Field::new(TAG_CURRENCY, CURRENCY_CODE)?,
        ];
        if let Some(amount) = amount {
            fields.push(Field::new(TAG_AMOUNT, amount.to_string())?);
        }

        let mut text = tlv::serialize(&fields);
        text.push_str(CHECKSUM_MARKER);
        let checksum = checksum_hex(&text);
        text.push_str(&checksum);
        Ok(Self(text))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }

    /// The trailing 4 hex digits.
    pub fn checksum(&self) -> &str {
        &self.0[self.0.len() - CHECKSUM_LEN..]
    }
}

impl fmt::Display for Payload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Payload {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Recomputes the CRC over everything but the last 4 characters and compares.
pub fn verify_checksum(text: &str) -> Result<()> {
    if !text.is_ascii() || text.len() < CHECKSUM_MARKER.len() + CHECKSUM_LEN {
        return Err(ShopError::MalformedPayload(
            "payload too short or not ASCII".to_string(),
        ));
    }
    let (body, found) = text.split_at(text.len() - CHECKSUM_LEN);
    if !body.ends_with(CHECKSUM_MARKER) {
        return Err(ShopError::MalformedPayload(format!(
            "payload does not end with checksum field {}",
            CHECKSUM_MARKER
        )));
    }
    let computed = checksum_hex(body);
    if !found.eq_ignore_ascii_case(&computed) {
        return Err(ShopError::ChecksumMismatch {
            found: found.to_string(),
            computed,
        });
    }
    Ok(())
}

/// A payload read back into its parts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedPayload {
    pub fields: Vec<RawField>,
    pub payee_sub_tag: String,
    pub payee: String,
    pub amount: Option<Decimal>,
    pub checksum: String,
}

impl DecodedPayload {
    /// Looks up a top-level field by tag.
    pub fn field(&self, tag: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|f| f.tag == tag)
            .map(|f| f.value.as_str())
    }
}

impl FromStr for DecodedPayload {
    type Err = ShopError;

    fn from_str(text: &str) -> Result<Self> {
        let text = text.trim();
        verify_checksum(text)?;

        let fields = tlv::parse(text)?;
        match fields.last() {
            Some(last) if last.tag == TAG_CHECKSUM => {}
            _ => {
                return Err(ShopError::MalformedPayload(
                    "checksum is not the last field".to_string(),
                ));
            }
        }

        let merchant = fields
            .iter()
            .find(|f| f.tag == TAG_MERCHANT_ACCOUNT)
            .ok_or_else(|| ShopError::MalformedPayload("missing merchant account".to_string()))?;
        let account = tlv::parse(&merchant.value)?
            .into_iter()
            .find(|f| f.tag != SUB_TAG_APPLICATION_ID)
            .ok_or_else(|| ShopError::MalformedPayload("missing payee sub-field".to_string()))?;

        let amount = fields
            .iter()
            .find(|f| f.tag == TAG_AMOUNT)
            .map(|f| {
                Decimal::from_str(&f.value).map_err(|_| {
                    ShopError::MalformedPayload(format!("amount '{}' is not a number", f.value))
                })
            })
            .transpose()?;

        let checksum = text[text.len() - CHECKSUM_LEN..].to_string();

        Ok(Self {
            fields,
            payee_sub_tag: account.tag,
            payee: account.value,
            amount,
            checksum,
        })
    }
}
