//! # ocrgate-vision
//!
//! 요청 처리 파이프라인의 이미지/좌표 단계와 엔진 어댑터.
//!
//! - [`decoder`]: 업로드 바이트 → RGB 픽셀 버퍼
//! - [`normalizer`]: 원시 다각형 → 축 정렬 바운딩 박스
//! - [`assembler`]: 박스 목록 → `{"boxes": [...]}` 응답
//! - [`pipeline`]: 위 단계와 엔진 호출 오케스트레이션
//! - [`stub`], `tesseract`: `TextDetector` 구현체
//! - [`serialized`], [`timeout`]: 엔진 호출 정책 래퍼

pub mod assembler;
pub mod decoder;
pub mod normalizer;
pub mod pipeline;
pub mod serialized;
pub mod stub;
#[cfg(feature = "tesseract")]
pub mod tesseract;
pub mod timeout;
