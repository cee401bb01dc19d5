//! Payload validator service
//!
//! Confirms a candidate byte range is a genuine instance of its claimed
//! kind. Structural shortcuts are used where a format has them; otherwise a
//! full decode through the `image` crate is the oracle.

use crate::domain::entities::AssetKind;
use memchr::memmem;

const PNG_PREFIX: &[u8] = &[0x89, 0x50, 0x4E, 0x47];
const PNG_IHDR: &[u8] = b"IHDR";
const PNG_IHDR_OFFSET: usize = 12;
const JPEG_PREFIX: &[u8] = &[0xFF, 0xD8, 0xFF];
const JPEG_EOI: &[u8] = &[0xFF, 0xD9];
const PDF_EOF: &[u8] = b"%%EOF";
const PDF_TRAILER_WINDOW: usize = 1024;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationResult {
    Valid,
    MissingHeaderChunk,
    MissingEndMarker,
    Undecodable,
    MissingTrailer,
}

impl ValidationResult {
    pub fn is_valid(&self) -> bool {
        matches!(self, ValidationResult::Valid)
    }

    pub fn reason(&self) -> &'static str {
        match self {
            ValidationResult::Valid => "valid",
            ValidationResult::MissingHeaderChunk => "PNG header chunk not at expected offset",
            ValidationResult::MissingEndMarker => "JPEG end-of-image marker absent",
            ValidationResult::Undecodable => "not decodable as an image",
            ValidationResult::MissingTrailer => "end-of-file trailer absent from tail",
        }
    }
}

/// Checks candidate payloads against per-kind structural contracts
#[derive(Debug, Clone, Copy, Default)]
pub struct PayloadValidator;

impl PayloadValidator {
    pub fn new() -> Self {
        Self
    }

    /// Convenience wrapper returning only the verdict
    pub fn validate(&self, data: &[u8], kind: AssetKind) -> bool {
        self.check(data, kind).is_valid()
    }

    pub fn check(&self, data: &[u8], kind: AssetKind) -> ValidationResult {
        match kind {
            AssetKind::Image => check_image(data),
            AssetKind::Vector => check_vector(data),
            // No structural contract exists for opaque blobs
            AssetKind::Data => ValidationResult::Valid,
        }
    }
}

fn check_image(data: &[u8]) -> ValidationResult {
    if data.starts_with(PNG_PREFIX) {
        let header = data.get(PNG_IHDR_OFFSET..PNG_IHDR_OFFSET + PNG_IHDR.len());
        return if header == Some(PNG_IHDR) {
            ValidationResult::Valid
        } else {
            ValidationResult::MissingHeaderChunk
        };
    }

    if data.starts_with(JPEG_PREFIX) && memmem::find(data, JPEG_EOI).is_none() {
        return ValidationResult::MissingEndMarker;
    }

    if is_decodable(data) {
        ValidationResult::Valid
    } else {
        ValidationResult::Undecodable
    }
}

fn check_vector(data: &[u8]) -> ValidationResult {
    let tail = &data[data.len().saturating_sub(PDF_TRAILER_WINDOW)..];
    if memmem::find(tail, PDF_EOF).is_some() {
        ValidationResult::Valid
    } else {
        ValidationResult::MissingTrailer
    }
}

fn is_decodable(data: &[u8]) -> bool {
    image::load_from_memory(data).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ImageFormat, RgbImage};
    use std::io::Cursor;

    fn encoded(format: ImageFormat) -> Vec<u8> {
        let img = RgbImage::from_fn(24, 24, |x, y| {
            image::Rgb([(x * 10) as u8, (y * 10) as u8, 90])
        });
        let mut out = Vec::new();
        img.write_to(&mut Cursor::new(&mut out), format).unwrap();
        out
    }

    #[test]
    fn test_png_requires_ihdr_at_offset() {
        let validator = PayloadValidator::new();
        let png = encoded(ImageFormat::Png);
        assert_eq!(validator.check(&png, AssetKind::Image), ValidationResult::Valid);

        let mut broken = png.clone();
        broken[12..16].copy_from_slice(b"XXXX");
        assert_eq!(
            validator.check(&broken, AssetKind::Image),
            ValidationResult::MissingHeaderChunk
        );
    }

    #[test]
    fn test_jpeg_requires_decodable_bytes() {
        let validator = PayloadValidator::new();
        let jpeg = encoded(ImageFormat::Jpeg);
        assert!(validator.validate(&jpeg, AssetKind::Image));

        let mut garbage = vec![0xFF, 0xD8, 0xFF, 0xE0];
        garbage.extend_from_slice(&[0x42; 300]);
        garbage.extend_from_slice(&[0xFF, 0xD9]);
        assert_eq!(
            validator.check(&garbage, AssetKind::Image),
            ValidationResult::Undecodable
        );
    }

    #[test]
    fn test_jpeg_without_end_marker() {
        let validator = PayloadValidator::new();
        let mut truncated = vec![0xFF, 0xD8, 0xFF, 0xE0];
        truncated.extend_from_slice(&[0x42; 300]);
        assert_eq!(
            validator.check(&truncated, AssetKind::Image),
            ValidationResult::MissingEndMarker
        );
    }

    #[test]
    fn test_vector_trailer_window() {
        let validator = PayloadValidator::new();
        let mut pdf = b"%PDF-1.4\n".to_vec();
        pdf.extend_from_slice(b"%%EOF");
        pdf.extend_from_slice(&[b' '; 100]);
        assert!(validator.validate(&pdf, AssetKind::Vector));

        let mut far = b"%PDF-1.4\n%%EOF".to_vec();
        far.extend_from_slice(&[b' '; 2000]);
        assert!(!validator.validate(&far, AssetKind::Vector));
    }

    #[test]
    fn test_data_always_valid() {
        assert!(PayloadValidator::new().validate(&[], AssetKind::Data));
    }
}
