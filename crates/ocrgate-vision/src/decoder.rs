//! 업로드 이미지 디코딩.
//!
//! `image` crate가 지원하는 컨테이너(JPEG, PNG, BMP, WebP, GIF 첫 프레임 등)를
//! 3채널 RGB 픽셀 버퍼로 변환한다. 팔레트/그레이스케일은 RGB로 확장되고
//! 알파 채널은 버려진다(불투명 처리).

use image::{ImageReader, Limits};
use ocrgate_core::config::DecodeConfig;
use ocrgate_core::error::CoreError;
use ocrgate_core::models::pixel_buffer::PixelBuffer;
use std::io::Cursor;
use tracing::debug;

/// 디코딩 한도 (픽셀 단위 최대 너비/높이)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecodeLimits {
    pub max_width: u32,
    pub max_height: u32,
}

impl Default for DecodeLimits {
    fn default() -> Self {
        DecodeConfig::default().into()
    }
}

impl From<DecodeConfig> for DecodeLimits {
    fn from(config: DecodeConfig) -> Self {
        Self {
            max_width: config.max_width,
            max_height: config.max_height,
        }
    }
}

/// 기본 한도로 디코딩
pub fn decode_image(bytes: &[u8]) -> Result<PixelBuffer, CoreError> {
    decode_image_with_limits(bytes, DecodeLimits::default())
}

/// 한도를 적용해 디코딩
///
/// 빈 입력, 인식할 수 없는 형식, 손상/잘린 데이터, 한도 초과, 면적 0 이미지는
/// 모두 `CoreError::Decode`.
pub fn decode_image_with_limits(
    bytes: &[u8],
    limits: DecodeLimits,
) -> Result<PixelBuffer, CoreError> {
    if bytes.is_empty() {
        return Err(CoreError::Decode("빈 업로드".to_string()));
    }

    let mut reader = ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()
        .map_err(|e| CoreError::Decode(format!("형식 판별 실패: {e}")))?;

    let format = reader
        .format()
        .ok_or_else(|| CoreError::Decode("지원하지 않는 이미지 형식".to_string()))?;

    let mut image_limits = Limits::default();
    image_limits.max_image_width = Some(limits.max_width);
    image_limits.max_image_height = Some(limits.max_height);
    reader.limits(image_limits);

    let image = reader
        .decode()
        .map_err(|e| CoreError::Decode(format!("{format:?} 디코딩 실패: {e}")))?;

    let (width, height) = (image.width(), image.height());
    debug!(?format, width, height, color = ?image.color(), "이미지 디코딩");

    let rgb = image.into_rgb8();
    PixelBuffer::new(width, height, rgb.into_raw())
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{DynamicImage, ImageFormat, Rgb, RgbImage, Rgba, RgbaImage};

    fn encode(image: &DynamicImage, format: ImageFormat) -> Vec<u8> {
        let mut bytes = Vec::new();
        image.write_to(&mut Cursor::new(&mut bytes), format).unwrap();
        bytes
    }

    fn rgb_image(w: u32, h: u32) -> DynamicImage {
        DynamicImage::ImageRgb8(RgbImage::from_pixel(w, h, Rgb([10, 20, 30])))
    }

    fn rgba_image(w: u32, h: u32, alpha: u8) -> DynamicImage {
        DynamicImage::ImageRgba8(RgbaImage::from_pixel(w, h, Rgba([200, 100, 50, alpha])))
    }

    #[test]
    fn png_dimensions_preserved() {
        let bytes = encode(&rgb_image(37, 11), ImageFormat::Png);
        let buf = decode_image(&bytes).unwrap();
        assert_eq!((buf.width(), buf.height()), (37, 11));
        assert_eq!(buf.data().len(), 37 * 11 * 3);
        assert_eq!(buf.pixel(0, 0), Some([10, 20, 30]));
    }

    #[test]
    fn jpeg_dimensions_preserved() {
        let bytes = encode(&rgb_image(64, 48), ImageFormat::Jpeg);
        let buf = decode_image(&bytes).unwrap();
        assert_eq!((buf.width(), buf.height()), (64, 48));
    }

    #[test]
    fn bmp_gif_webp_decode() {
        let bmp = encode(&rgb_image(5, 7), ImageFormat::Bmp);
        let gif = encode(&rgba_image(9, 3, 255), ImageFormat::Gif);
        let webp = encode(&rgba_image(4, 4, 255), ImageFormat::WebP);

        assert_eq!(decode_image(&bmp).unwrap().width(), 5);
        assert_eq!(decode_image(&gif).unwrap().height(), 3);
        assert_eq!(decode_image(&webp).unwrap().width(), 4);
    }

    #[test]
    fn alpha_is_dropped() {
        let bytes = encode(&rgba_image(2, 2, 0), ImageFormat::Png);
        let buf = decode_image(&bytes).unwrap();
        // 완전 투명 픽셀도 색상값 그대로 불투명 RGB로
        assert_eq!(buf.pixel(1, 1), Some([200, 100, 50]));
        assert_eq!(buf.data().len(), 2 * 2 * 3);
    }

    #[test]
    fn grayscale_expands_to_rgb() {
        let gray = DynamicImage::ImageLuma8(image::GrayImage::from_pixel(3, 3, image::Luma([77])));
        let bytes = encode(&gray, ImageFormat::Png);
        let buf = decode_image(&bytes).unwrap();
        assert_eq!(buf.pixel(2, 2), Some([77, 77, 77]));
    }

    #[test]
    fn empty_bytes_rejected() {
        assert!(matches!(decode_image(&[]), Err(CoreError::Decode(_))));
    }

    #[test]
    fn random_bytes_rejected() {
        let garbage: Vec<u8> = (0..512u32).map(|i| (i * 31 % 251) as u8).collect();
        assert!(matches!(decode_image(&garbage), Err(CoreError::Decode(_))));
    }

    #[test]
    fn truncated_png_rejected() {
        let bytes = encode(&rgb_image(32, 32), ImageFormat::Png);
        let truncated = &bytes[..40];
        assert!(matches!(decode_image(truncated), Err(CoreError::Decode(_))));
    }

    #[test]
    fn oversized_image_rejected() {
        let bytes = encode(&rgb_image(64, 8), ImageFormat::Png);
        let limits = DecodeLimits {
            max_width: 32,
            max_height: 32,
        };
        let result = decode_image_with_limits(&bytes, limits);
        assert!(matches!(result, Err(CoreError::Decode(_))));
    }
}
