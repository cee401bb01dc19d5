//! Boundary resolver service
//!
//! Determines where an embedded payload ends, given where its signature
//! starts. Every search is confined to `[start, start + cap)` so a scan pass
//! over malformed input stays bounded.

use super::signature_catalog::SignatureCatalog;
use crate::domain::entities::{EndStrategy, SignatureSpec};
use memchr::memmem;

/// `IEND` chunk type followed by its fixed CRC
pub const PNG_END_CHUNK: &[u8] = &[0x49, 0x45, 0x4E, 0x44, 0xAE, 0x42, 0x60, 0x82];
const PNG_RESYNC_MAGIC: &[u8] = &[0x89, 0x50, 0x4E, 0x47];
const PNG_RESYNC_LOOKAHEAD: usize = 1000;
const JPEG_EOI: &[u8] = &[0xFF, 0xD9];
const JPEG_MIN_LOOKAHEAD: usize = 100;
const GIF_SCREEN_DESCRIPTOR_END: usize = 13;
const GIF_EXTENSION: u8 = 0x21;
const GIF_IMAGE_DESCRIPTOR: u8 = 0x2C;
const GIF_TRAILER: u8 = 0x3B;

/// Resolves payload end offsets using format-specific end markers
#[derive(Debug, Clone, Copy)]
pub struct BoundaryResolver<'a> {
    catalog: &'a SignatureCatalog,
}

impl<'a> BoundaryResolver<'a> {
    pub fn new(catalog: &'a SignatureCatalog) -> Self {
        Self { catalog }
    }

    /// Returns the exclusive end offset of the payload starting at `start`.
    ///
    /// For any `start < data.len()` the result lies in `start + 1..=data.len()`.
    pub fn resolve(&self, start: usize, spec: &SignatureSpec, data: &[u8]) -> usize {
        let cap_end = start.saturating_add(spec.max_size()).min(data.len());

        let end = match spec.end_strategy() {
            EndStrategy::PngEndChunk => png_end(start, cap_end, data),
            EndStrategy::JpegEndOfImage => self.jpeg_end(start, cap_end, data),
            EndStrategy::GifBlocks => gif_end(&data[start..cap_end]).map(|len| start + len),
            EndStrategy::Trailer(trailer) => {
                find_in(data, start, cap_end, trailer).map(|pos| pos + trailer.len())
            }
            EndStrategy::FixedWindow(_) => None,
        };

        end.unwrap_or(cap_end).max(start + 1)
    }

    /// Accepts the first end-of-image marker that is followed by end of buffer,
    /// padding (`00`/`FF`) or another known signature.
    ///
    /// On densely packed JPEGs this can stop a few bytes early or late; the
    /// validator's decode probe is what ultimately rejects a bad cut.
    fn jpeg_end(&self, start: usize, cap_end: usize, data: &[u8]) -> Option<usize> {
        let mut pos = start + JPEG_MIN_LOOKAHEAD;
        while let Some(hit) = find_in(data, pos, cap_end, JPEG_EOI) {
            let after = hit + JPEG_EOI.len();
            if after >= data.len()
                || data[after] == 0x00
                || data[after] == 0xFF
                || self.catalog.starts_signature(&data[after..])
            {
                return Some(after);
            }
            pos = after;
        }
        None
    }
}

fn png_end(start: usize, cap_end: usize, data: &[u8]) -> Option<usize> {
    if let Some(pos) = find_in(data, start, cap_end, PNG_END_CHUNK) {
        return Some(pos + PNG_END_CHUNK.len());
    }
    // No end chunk: stop where the next PNG begins
    find_in(data, start + PNG_RESYNC_LOOKAHEAD, cap_end, PNG_RESYNC_MAGIC)
}

/// Length of the GIF at the start of `gif`, found by walking its blocks.
///
/// A bare `00 3B` search is not enough: the pair occurs freely inside colour
/// tables and LZW sub-blocks. Returns `None` when the structure runs past
/// the slice or hits an unknown block.
fn gif_end(gif: &[u8]) -> Option<usize> {
    let mut pos = skip_color_table(GIF_SCREEN_DESCRIPTOR_END, *gif.get(10)?);
    loop {
        match *gif.get(pos)? {
            GIF_TRAILER => return Some(pos + 1),
            // Introducer and label, then data sub-blocks
            GIF_EXTENSION => pos = skip_sub_blocks(gif, pos + 2)?,
            GIF_IMAGE_DESCRIPTOR => {
                let flags = *gif.get(pos + 9)?;
                pos = skip_color_table(pos + 10, flags);
                // LZW minimum code size precedes the image data
                pos = skip_sub_blocks(gif, pos + 1)?;
            }
            _ => return None,
        }
    }
}

fn skip_color_table(pos: usize, flags: u8) -> usize {
    if flags & 0x80 != 0 {
        pos + (3 << ((flags & 0x07) + 1))
    } else {
        pos
    }
}

fn skip_sub_blocks(gif: &[u8], mut pos: usize) -> Option<usize> {
    loop {
        let len = *gif.get(pos)? as usize;
        pos += 1 + len;
        if len == 0 {
            return Some(pos);
        }
    }
}

fn find_in(data: &[u8], from: usize, to: usize, needle: &[u8]) -> Option<usize> {
    if from >= to {
        return None;
    }
    memmem::find(&data[from..to], needle).map(|pos| from + pos)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::AssetKind;
    use crate::domain::services::signature_catalog::{PDF_EOF, PNG_MAGIC};

    fn spec_for(catalog: &SignatureCatalog, ext: &str) -> SignatureSpec {
        *catalog
            .signatures()
            .iter()
            .find(|s| s.extension() == ext)
            .unwrap()
    }

    #[test]
    fn test_png_end_chunk_inclusive() {
        let catalog = SignatureCatalog::standard();
        let resolver = BoundaryResolver::new(&catalog);
        let mut data = vec![0u8; 10];
        data.extend_from_slice(PNG_MAGIC);
        data.extend_from_slice(&[0x11; 40]);
        data.extend_from_slice(&[0, 0, 0, 0]);
        data.extend_from_slice(PNG_END_CHUNK);
        data.extend_from_slice(&[0x22; 30]);

        let end = resolver.resolve(10, &spec_for(&catalog, "png"), &data);
        assert_eq!(end, 10 + 8 + 40 + 4 + 8);
    }

    #[test]
    fn test_png_resyncs_on_next_magic() {
        let catalog = SignatureCatalog::standard();
        let resolver = BoundaryResolver::new(&catalog);
        let mut data = PNG_MAGIC.to_vec();
        data.resize(1500, 0x33);
        data.extend_from_slice(PNG_MAGIC);
        data.resize(2000, 0x33);

        let end = resolver.resolve(0, &spec_for(&catalog, "png"), &data);
        assert_eq!(end, 1500);
    }

    #[test]
    fn test_png_falls_back_to_buffer_end() {
        let catalog = SignatureCatalog::standard();
        let resolver = BoundaryResolver::new(&catalog);
        let mut data = PNG_MAGIC.to_vec();
        data.resize(600, 0x44);

        assert_eq!(resolver.resolve(0, &spec_for(&catalog, "png"), &data), 600);
    }

    #[test]
    fn test_jpeg_skips_marker_followed_by_data() {
        let catalog = SignatureCatalog::standard();
        let resolver = BoundaryResolver::new(&catalog);
        let mut data = vec![0xFF, 0xD8, 0xFF, 0xE0];
        data.resize(150, 0x55);
        // Spurious marker: followed by 0x12
        data.extend_from_slice(&[0xFF, 0xD9, 0x12]);
        data.resize(200, 0x55);
        data.extend_from_slice(&[0xFF, 0xD9, 0x00, 0x00]);

        let end = resolver.resolve(0, &spec_for(&catalog, "jpg"), &data);
        assert_eq!(end, 202);
    }

    #[test]
    fn test_jpeg_ignores_marker_inside_lookahead() {
        let catalog = SignatureCatalog::standard();
        let resolver = BoundaryResolver::new(&catalog);
        let mut data = vec![0xFF, 0xD8, 0xFF, 0xE0, 0xFF, 0xD9, 0x00];
        data.resize(300, 0x66);

        let end = resolver.resolve(0, &spec_for(&catalog, "jpg"), &data);
        assert_eq!(end, 300);
    }

    #[test]
    fn test_jpeg_accepts_marker_before_next_signature() {
        let catalog = SignatureCatalog::standard();
        let resolver = BoundaryResolver::new(&catalog);
        let mut data = vec![0xFF, 0xD8, 0xFF, 0xE0];
        data.resize(120, 0x77);
        data.extend_from_slice(&[0xFF, 0xD9]);
        data.extend_from_slice(b"%PDF-1.7");
        data.resize(400, 0x77);

        let end = resolver.resolve(0, &spec_for(&catalog, "jpg"), &data);
        assert_eq!(end, 122);
    }

    #[test]
    fn test_pdf_trailer() {
        let catalog = SignatureCatalog::standard();
        let resolver = BoundaryResolver::new(&catalog);
        let mut data = b"%PDF-1.4\n".to_vec();
        data.resize(200, b' ');
        data.extend_from_slice(PDF_EOF);
        data.extend_from_slice(b"\ntrailing");

        let spec = spec_for(&catalog, "pdf");
        assert_eq!(spec.kind(), AssetKind::Vector);
        assert_eq!(resolver.resolve(0, &spec, &data), 205);
    }

    #[test]
    fn test_data_fixed_window() {
        let catalog = SignatureCatalog::standard();
        let resolver = BoundaryResolver::new(&catalog);
        let mut data = b"bplist00".to_vec();
        data.resize(5000, 0);

        assert_eq!(resolver.resolve(0, &spec_for(&catalog, "plist"), &data), 1024);
        assert_eq!(resolver.resolve(4500, &spec_for(&catalog, "plist"), &data), 5000);
    }

    /// GIF89a with a global colour table and one image, both full of `00 3B` pairs
    fn gif_with_false_trailers() -> Vec<u8> {
        let mut gif = b"GIF89a".to_vec();
        gif.extend_from_slice(&[2, 0, 2, 0, 0x80, 0, 0]);
        gif.extend_from_slice(&[0x00, 0x3B, 0x00, 0x3B, 0x00, 0x3B]);
        gif.extend_from_slice(&[0x21, 0xF9, 4, 0, 0, 0, 0, 0]);
        gif.extend_from_slice(&[0x2C, 0, 0, 0, 0, 2, 0, 2, 0, 0]);
        gif.extend_from_slice(&[2, 4, 0x00, 0x3B, 0x00, 0x3B, 0]);
        gif.push(0x3B);
        gif
    }

    #[test]
    fn test_gif_walks_blocks_past_false_trailers() {
        let catalog = SignatureCatalog::standard();
        let resolver = BoundaryResolver::new(&catalog);
        let gif = gif_with_false_trailers();
        let mut data = vec![0u8; 5];
        data.extend_from_slice(&gif);
        data.extend_from_slice(&[0x00, 0x3B, 0x11, 0x22]);

        let end = resolver.resolve(5, &spec_for(&catalog, "gif"), &data);
        assert_eq!(end, 5 + gif.len());
    }

    #[test]
    fn test_gif_truncated_falls_back_to_cap() {
        let catalog = SignatureCatalog::standard();
        let resolver = BoundaryResolver::new(&catalog);
        let gif = gif_with_false_trailers();
        let data = &gif[..gif.len() - 3];

        let end = resolver.resolve(0, &spec_for(&catalog, "gif"), data);
        assert_eq!(end, data.len());
    }

    #[test]
    fn test_end_always_after_start() {
        let catalog = SignatureCatalog::standard();
        let resolver = BoundaryResolver::new(&catalog);
        let data = [0x89u8];
        assert_eq!(resolver.resolve(0, &spec_for(&catalog, "png"), &data), 1);
    }
}
