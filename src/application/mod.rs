//! Application layer orchestrating the domain rules.
//!
//! `PaymentEncoder` wraps payload encoding with a configured validation mode,
//! and `Dashboard` answers the shop's read-side questions through a
//! `SheetStore`.

pub mod dashboard;
pub mod encoder;
