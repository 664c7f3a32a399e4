//! QR module matrix, encoded once at startup.

use alloc::{
    vec,
    vec::Vec,
};
use core::fmt;

use qrcodegen_no_heap::{
    DataTooLong,
    QrCode,
    QrCodeEcc,
    Version,
};

/// Payload does not fit in the largest QR version.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PayloadTooLong;

impl fmt::Display for PayloadTooLong {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("QR payload too long")
    }
}

impl From<DataTooLong> for PayloadTooLong {
    fn from(_: DataTooLong) -> Self {
        PayloadTooLong
    }
}

/// Square grid of QR modules, `true` for dark.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QrMatrix {
    size: usize,
    modules: Vec<bool>,
}

impl QrMatrix {
    pub fn encode(text: &str) -> Result<Self, PayloadTooLong> {
        let mut scratch = vec![0u8; Version::MAX.buffer_len()];
        let mut out = vec![0u8; Version::MAX.buffer_len()];
        let code = QrCode::encode_text(
            text,
            &mut scratch,
            &mut out,
            QrCodeEcc::Low,
            Version::MIN,
            Version::MAX,
            None,
            true,
        )?;

        let size = code.size() as usize;
        let mut modules = Vec::with_capacity(size * size);
        for y in 0..size as i32 {
            for x in 0..size as i32 {
                modules.push(code.get_module(x, y));
            }
        }
        Ok(Self { size, modules })
    }

    /// Modules per side.
    pub fn size(&self) -> usize {
        self.size
    }

    pub fn module(&self, x: usize, y: usize) -> bool {
        x < self.size && self.modules.get(y * self.size + x).copied().unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_payload() {
        let qr = QrMatrix::encode("https://example.com").unwrap();
        assert_eq!(qr.size(), 25);
        // Finder pattern in the top-left corner.
        assert!(qr.module(0, 0));
        assert!(qr.module(6, 6));
        assert!(!qr.module(1, 1));
        assert!(qr.module(2, 2));
        assert!(!qr.module(7, 0));
    }

    #[test]
    fn test_out_of_range() {
        let qr = QrMatrix::encode("x").unwrap();
        assert_eq!(qr.size(), 21);
        assert!(!qr.module(21, 0));
        assert!(!qr.module(0, 21));
    }

    #[test]
    fn test_payload_too_long() {
        let text = "x".repeat(4000);
        assert_eq!(QrMatrix::encode(&text), Err(PayloadTooLong));
    }
}
