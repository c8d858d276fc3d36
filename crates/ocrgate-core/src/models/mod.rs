//! OCRGATE 도메인 모델.
//!
//! 요청 한 건의 데이터 흐름을 따라 정의된다:
//! 업로드 바이트 → [`pixel_buffer::PixelBuffer`] → [`detection::RawDetection`]
//! → [`geometry::BoundingBox`] → [`response::OcrResponse`].

pub mod detection;
pub mod geometry;
pub mod pixel_buffer;
pub mod response;
