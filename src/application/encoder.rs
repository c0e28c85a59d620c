use crate::config::EncoderConfig;
use crate::domain::amount::parse_decimal;
use crate::domain::payload::{DecodedPayload, EncodeMode, Payload};
use crate::error::Result;
use rust_decimal::Decimal;

/// Builds and checks payment payloads under a fixed validation mode.
///
/// Stateless apart from its configuration, so one instance can be shared
/// freely between tasks.
#[derive(Debug, Clone, Copy, Default)]
pub struct PaymentEncoder {
    config: EncoderConfig,
}

impl PaymentEncoder {
    pub fn new(config: EncoderConfig) -> Self {
        Self { config }
    }

    pub fn mode(&self) -> EncodeMode {
        self.config.mode
    }

    /// Encodes a payload for `payee`, optionally fixing the amount.
    pub fn encode(&self, payee: &str, amount: Option<Decimal>) -> Result<Payload> {
        let payload = Payload::encode(payee, amount, self.config.mode)?;
        tracing::debug!(
            mode = %self.config.mode,
            checksum = payload.checksum(),
            "encoded payment payload"
        );
        Ok(payload)
    }

    /// Same as [`PaymentEncoder::encode`] with the amount given as text.
    pub fn encode_text(&self, payee: &str, amount: Option<&str>) -> Result<Payload> {
        let amount = amount.map(parse_decimal).transpose()?;
        self.encode(payee, amount)
    }

    /// Parses a payload and validates its checksum.
    pub fn verify(&self, payload: &str) -> Result<DecodedPayload> {
        let decoded: DecodedPayload = payload.parse()?;
        tracing::debug!(payee = %decoded.payee, "verified payment payload");
        Ok(decoded)
    }
}
