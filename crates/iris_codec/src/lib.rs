use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use iris_core::{DecodedImage, Error, Result};
use tracing::debug;

/// Decodes a data-URI image payload (`data:<mime>;base64,<bytes>`) into a
/// color-normalized image. The prefix up to and including the first comma is
/// stripped and discarded; the declared mime type is not trusted, the actual
/// bytes decide the format.
pub fn decode_data_uri(payload: &str) -> Result<DecodedImage> {
    let (_, encoded) = payload.split_once(',').ok_or_else(|| {
        Error::MalformedPayload("missing ',' separator in data URI".to_string())
    })?;
    if encoded.is_empty() {
        return Err(Error::MalformedPayload("empty image payload".to_string()));
    }
    let bytes = STANDARD
        .decode(encoded)
        .map_err(|e| Error::MalformedPayload(format!("invalid base64: {}", e)))?;
    decode_bytes(&bytes)
}

/// Parses raw image bytes and normalizes them to RGB8. The inference engine
/// requires a fixed 3-channel layout, so alpha is dropped and grayscale or
/// palette sources are expanded. No resizing or recompression happens here.
pub fn decode_bytes(bytes: &[u8]) -> Result<DecodedImage> {
    let source = image::load_from_memory(bytes)
        .map_err(|e| Error::InvalidImage(e.to_string()))?;
    let rgb = source.to_rgb8();
    let (width, height) = rgb.dimensions();
    debug!("decoded image: {}x{}", width, height);
    Ok(DecodedImage {
        width,
        height,
        pixels: rgb.into_raw(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{DynamicImage, ImageBuffer, ImageFormat, Luma, Rgb, Rgba};
    use std::io::Cursor;

    fn encode(image: DynamicImage, format: ImageFormat) -> Vec<u8> {
        let mut out = Cursor::new(Vec::new());
        image.write_to(&mut out, format).unwrap();
        out.into_inner()
    }

    fn data_uri(mime: &str, bytes: &[u8]) -> String {
        format!("data:{};base64,{}", mime, STANDARD.encode(bytes))
    }

    #[test]
    fn rgba_png_loses_its_alpha_channel() {
        let source = ImageBuffer::from_pixel(4, 3, Rgba([10u8, 20, 30, 128]));
        let bytes = encode(DynamicImage::ImageRgba8(source), ImageFormat::Png);
        let decoded = decode_data_uri(&data_uri("image/png", &bytes)).unwrap();
        assert_eq!(decoded.width, 4);
        assert_eq!(decoded.height, 3);
        assert_eq!(decoded.pixels.len(), 4 * 3 * 3);
        assert_eq!(&decoded.pixels[..3], &[10, 20, 30]);
    }

    #[test]
    fn grayscale_png_expands_to_three_channels() {
        let source = ImageBuffer::from_pixel(2, 2, Luma([100u8]));
        let bytes = encode(DynamicImage::ImageLuma8(source), ImageFormat::Png);
        let decoded = decode_data_uri(&data_uri("image/png", &bytes)).unwrap();
        assert_eq!(decoded.pixels.len(), 2 * 2 * 3);
        assert!(decoded.pixels.iter().all(|&p| p == 100));
    }

    #[test]
    fn jpeg_decodes_at_native_resolution() {
        let source = ImageBuffer::from_pixel(16, 9, Rgb([200u8, 50, 50]));
        let bytes = encode(DynamicImage::ImageRgb8(source), ImageFormat::Jpeg);
        let decoded = decode_data_uri(&data_uri("image/jpeg", &bytes)).unwrap();
        assert_eq!(decoded.width, 16);
        assert_eq!(decoded.height, 9);
        assert_eq!(decoded.pixels.len(), 16 * 9 * 3);
    }

    #[test]
    fn missing_comma_is_a_malformed_payload() {
        let err = decode_data_uri("not-a-data-uri").unwrap_err();
        assert!(matches!(err, Error::MalformedPayload(_)));
    }

    #[test]
    fn invalid_base64_is_a_malformed_payload() {
        let err = decode_data_uri("data:image/png;base64,!!not-base64!!").unwrap_err();
        assert!(matches!(err, Error::MalformedPayload(_)));
    }

    #[test]
    fn empty_payload_is_a_malformed_payload() {
        let err = decode_data_uri("data:image/png;base64,").unwrap_err();
        assert!(matches!(err, Error::MalformedPayload(_)));
    }

    #[test]
    fn garbage_bytes_are_an_invalid_image() {
        let err = decode_data_uri(&data_uri("image/png", b"these are not pixels")).unwrap_err();
        assert!(matches!(err, Error::InvalidImage(_)));
    }
}
