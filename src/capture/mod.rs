//! Transcodes raw browser screenshots into the persisted proof format.
//!
//! CDP capture hands back PNG bytes; proofs are stored as JPEG at a minimum
//! quality of 90. Encoding failures are surfaced to the driver, which keeps
//! the execution-confirmed verdict and simply omits the image fields; the
//! verdict never depends on imaging success.

use image::codecs::jpeg::JpegEncoder;
use crate::errors::XsProofError;

/// Lowest acceptable JPEG quality for proof images.
pub const QUALITY_FLOOR: u8 = 90;

/// Quality used for the default encode, leaving margin above the floor.
pub const DEFAULT_QUALITY: u8 = 95;

/// Re-encode a captured raster screenshot as JPEG. Requests below the
/// quality floor are raised to it.
pub fn encode_jpeg(raw: &[u8], quality: u8) -> Result<Vec<u8>, XsProofError> {
    let img = image::load_from_memory(raw)
        .map_err(|e| XsProofError::Encoding(format!("Failed to decode capture: {}", e)))?;

    let mut out = Vec::new();
    let encoder = JpegEncoder::new_with_quality(&mut out, quality.max(QUALITY_FLOOR));
    img.write_with_encoder(encoder)
        .map_err(|e| XsProofError::Encoding(format!("JPEG encode failed: {}", e)))?;

    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn sample_png() -> Vec<u8> {
        let img = image::DynamicImage::ImageRgb8(image::RgbImage::new(8, 8));
        let mut buf = Vec::new();
        img.write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
            .unwrap();
        buf
    }

    #[test]
    fn encodes_png_capture_to_jpeg() {
        let jpeg = encode_jpeg(&sample_png(), DEFAULT_QUALITY).unwrap();
        // JPEG SOI marker
        assert_eq!(&jpeg[..2], &[0xFF, 0xD8]);
    }

    #[test]
    fn garbage_input_fails_closed() {
        let err = encode_jpeg(b"not an image", DEFAULT_QUALITY).unwrap_err();
        assert!(matches!(err, XsProofError::Encoding(_)));
    }

    #[test]
    fn quality_below_floor_still_encodes() {
        // The floor is enforced inside the encoder; a low request must not error.
        let jpeg = encode_jpeg(&sample_png(), 10).unwrap();
        assert_eq!(&jpeg[..2], &[0xFF, 0xD8]);
    }
}
