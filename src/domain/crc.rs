//! CRC-16/CCITT-FALSE as required by the payment QR checksum field.

const POLYNOMIAL: u16 = 0x1021;
const INITIAL: u16 = 0xFFFF;

/// Computes CRC-16/CCITT-FALSE (poly 0x1021, init 0xFFFF, MSB first, no final XOR).
pub fn crc16_ccitt_false(data: &[u8]) -> u16 {
    data.iter().fold(INITIAL, |crc, &byte| {
        let mut crc = crc ^ (u16::from(byte) << 8);
        for _ in 0..8 {
            crc = if crc & 0x8000 != 0 {
                (crc << 1) ^ POLYNOMIAL
            } else {
                crc << 1
            };
        }
        crc
    })
}

/// The checksum rendered as 4 uppercase, zero-padded hex digits.
pub fn checksum_hex(data: &str) -> String {
    format!("{:04X}", crc16_ccitt_false(data.as_bytes()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_check_value() {
        assert_eq!(crc16_ccitt_false(b"123456789"), 0x29B1);
    }

    #[test]
    fn test_empty_input_is_initial_value() {
        assert_eq!(crc16_ccitt_false(b""), 0xFFFF);
    }

    #[test]
    fn test_hex_is_zero_padded_uppercase() {
        let hex = checksum_hex("00020101021129370016A000000677010111011300668123456785802TH53037646304");
        assert_eq!(hex, "5D82");
        assert_eq!(hex.len(), 4);
    }
}
