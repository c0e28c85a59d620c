//! Adapters between the domain and the outside world: CSV sheets and
//! reports, and terminal QR rendering.

pub mod csv;
pub mod qr;
