//! Domain layer: payment payload rules, shop ledger records and the storage port.

pub mod amount;
pub mod crc;
pub mod ledger;
pub mod payee;
pub mod payload;
pub mod ports;
pub mod tlv;
