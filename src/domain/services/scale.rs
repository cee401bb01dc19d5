//! Scale inferer service
//!
//! Catalogs often keep density hints as plain-text tokens near a payload
//! rather than inside it. This looks for `@3x` / `@2x` in a symmetric window
//! around a candidate's start offset.

use crate::domain::entities::Scale;
use memchr::memmem;

pub const SCALE_WINDOW: usize = 200;

const MARKERS: [(&[u8], Scale); 2] = [(b"@3x", Scale::THREE), (b"@2x", Scale::TWO)];

#[derive(Debug, Clone, Copy, Default)]
pub struct ScaleInferer;

impl ScaleInferer {
    pub fn new() -> Self {
        Self
    }

    /// Returns the strongest scale marker within `SCALE_WINDOW` bytes of `offset`,
    /// defaulting to `@1x`
    pub fn infer(&self, offset: usize, data: &[u8]) -> Scale {
        let start = offset.saturating_sub(SCALE_WINDOW).min(data.len());
        let end = offset.saturating_add(SCALE_WINDOW).min(data.len());
        let window = &data[start..end];

        MARKERS
            .iter()
            .find(|(marker, _)| memmem::find(window, marker).is_some())
            .map(|(_, scale)| *scale)
            .unwrap_or_default()
    }
}
