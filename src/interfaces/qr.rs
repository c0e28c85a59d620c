use crate::error::{Result, ShopError};
use qrcode::QrCode;
use qrcode::render::unicode;

/// Renders a payload as a scannable QR code made of unicode half blocks.
pub fn render_terminal(payload: &str) -> Result<String> {
    let code = QrCode::new(payload.as_bytes())
        .map_err(|e| ShopError::InternalError(Box::new(std::io::Error::other(e.to_string()))))?;
    Ok(code
        .render::<unicode::Dense1x2>()
        .quiet_zone(true)
        .build())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_payload() {
        let image = render_terminal(
            "00020101021129370016A000000677010111011300668123456785802TH530376463045D82",
        )
        .unwrap();
        assert!(image.lines().count() > 10);
    }
}
