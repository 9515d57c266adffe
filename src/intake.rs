//! Reference image intake and format conversion.

use std::io::Cursor;

use tracing::debug;

use crate::constants::{JPEG_DOWNLOAD_QUALITY, MAX_UPLOAD_BYTES};
use crate::error::SceneForgeError;

/// A self-describing uploaded image: media type plus raw payload.
#[derive(Clone, Debug)]
pub struct EncodedImage {
    /// Media type reported for the payload, eg `image/png`
    pub media_type: String,
    /// Raw image bytes
    pub bytes: Vec<u8>,
}

impl EncodedImage {
    /// Accepts one uploaded file. Non-image payloads and oversized or empty
    /// uploads are rejected before anything else looks at them.
    pub fn ingest(media_type: &str, bytes: Vec<u8>) -> Result<Self, SceneForgeError> {
        if !media_type.starts_with("image/") {
            debug!("Rejecting upload with media type {}", media_type);
            return Err(SceneForgeError::Validation(
                "Uploaded file is not an image.".to_string(),
            ));
        }
        if bytes.is_empty() {
            return Err(SceneForgeError::Validation(
                "Uploaded image is empty.".to_string(),
            ));
        }
        if bytes.len() > MAX_UPLOAD_BYTES {
            return Err(SceneForgeError::Validation(
                "Uploaded image is too large.".to_string(),
            ));
        }
        Ok(Self {
            media_type: media_type.to_string(),
            bytes,
        })
    }
}

/// The validated set of reference images for one synthesis request.
///
/// Construction requires the two mandatory slots, and `in_role_order`
/// fixes the positional contract: person, outfit, then companion. The
/// generation model has no other way to tell the roles apart.
#[derive(Clone, Debug)]
pub struct SceneImages {
    /// Image 1: the person whose face, skin and body must be preserved
    pub person: EncodedImage,
    /// Image 2: the outfit that replaces the person's clothing
    pub outfit: EncodedImage,
    /// Image 3, optional: the companion character
    pub companion: Option<EncodedImage>,
}

impl SceneImages {
    /// Images in the fixed role order the prompt refers to them by.
    pub fn in_role_order(&self) -> Vec<&EncodedImage> {
        let mut ordered = vec![&self.person, &self.outfit];
        if let Some(companion) = &self.companion {
            ordered.push(companion);
        }
        ordered
    }

    /// Whether a companion image is attached.
    pub fn has_companion(&self) -> bool {
        self.companion.is_some()
    }
}

/// Re-encodes a generated PNG as an opaque JPEG.
///
/// JPEG has no alpha channel, so the source is composited over an opaque
/// white background before encoding at the fixed download quality.
pub fn to_opaque_jpeg(bytes: &[u8]) -> Result<Vec<u8>, SceneForgeError> {
    let reader = image::ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()
        .map_err(|err| SceneForgeError::Rendering(err.to_string()))?;
    let decoded = reader.decode().map_err(|err| {
        debug!("Failed to decode generated image: {}", err);
        SceneForgeError::Rendering(err.to_string())
    })?;

    let rgba = decoded.to_rgba8();
    let mut background = image::RgbaImage::from_pixel(
        rgba.width(),
        rgba.height(),
        image::Rgba([255, 255, 255, 255]),
    );
    image::imageops::overlay(&mut background, &rgba, 0, 0);
    let flattened = image::DynamicImage::ImageRgba8(background).to_rgb8();

    let mut output = Vec::new();
    let mut encoder =
        image::codecs::jpeg::JpegEncoder::new_with_quality(&mut output, JPEG_DOWNLOAD_QUALITY);
    encoder.encode_image(&flattened)?;
    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn png_bytes(image: image::RgbaImage) -> Vec<u8> {
        let mut bytes = Vec::new();
        image::DynamicImage::ImageRgba8(image)
            .write_to(&mut Cursor::new(&mut bytes), image::ImageFormat::Png)
            .expect("encode png fixture");
        bytes
    }

    #[test]
    fn ingest_rejects_non_image_media_types() {
        assert!(EncodedImage::ingest("text/plain", vec![1, 2, 3]).is_err());
        assert!(EncodedImage::ingest("application/pdf", vec![1, 2, 3]).is_err());
        assert!(EncodedImage::ingest("image/png", Vec::new()).is_err());
        assert!(EncodedImage::ingest("image/png", vec![1, 2, 3]).is_ok());
    }

    #[test]
    fn role_order_is_person_outfit_companion() {
        let person = EncodedImage::ingest("image/png", vec![1]).expect("person");
        let outfit = EncodedImage::ingest("image/jpeg", vec![2]).expect("outfit");
        let companion = EncodedImage::ingest("image/png", vec![3]).expect("companion");

        let without = SceneImages {
            person: person.clone(),
            outfit: outfit.clone(),
            companion: None,
        };
        assert_eq!(without.in_role_order().len(), 2);
        assert!(!without.has_companion());

        let with = SceneImages {
            person,
            outfit,
            companion: Some(companion),
        };
        let ordered = with.in_role_order();
        assert_eq!(ordered.len(), 3);
        assert_eq!(ordered[0].bytes, vec![1]);
        assert_eq!(ordered[1].bytes, vec![2]);
        assert_eq!(ordered[2].bytes, vec![3]);
    }

    #[test]
    fn transparent_png_becomes_opaque_white_jpeg() {
        let transparent = image::RgbaImage::from_pixel(8, 8, image::Rgba([255, 0, 0, 0]));
        let jpeg = to_opaque_jpeg(&png_bytes(transparent)).expect("convert to jpeg");

        let decoded = image::ImageReader::new(Cursor::new(&jpeg))
            .with_guessed_format()
            .expect("guess format")
            .decode()
            .expect("decode jpeg");
        assert!(!decoded.color().has_alpha());

        let rgb = decoded.to_rgb8();
        let pixel = rgb.get_pixel(4, 4);
        for channel in pixel.0 {
            assert!(channel > 250, "expected near-white, got {:?}", pixel);
        }
    }

    #[test]
    fn opaque_png_converts_cleanly() {
        let opaque = image::RgbaImage::from_pixel(8, 8, image::Rgba([0, 0, 0, 255]));
        let jpeg = to_opaque_jpeg(&png_bytes(opaque)).expect("convert to jpeg");
        let format = image::guess_format(&jpeg).expect("guess format");
        assert_eq!(format, image::ImageFormat::Jpeg);
    }

    #[test]
    fn garbage_bytes_are_a_rendering_error() {
        let result = to_opaque_jpeg(b"This is not an image.");
        assert!(matches!(result, Err(SceneForgeError::Rendering(_))));
    }
}
