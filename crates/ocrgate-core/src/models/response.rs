//! `/ocr` 응답 엔벨로프.

use serde::{Deserialize, Serialize};

use super::geometry::BoundingBox;

/// 요청 1건의 결과: `{"boxes": [...]}`.
///
/// 순서와 개수는 엔진 검출 순서를 그대로 따른다.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OcrResponse {
    pub boxes: Vec<BoundingBox>,
}

impl OcrResponse {
    pub fn len(&self) -> usize {
        self.boxes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.boxes.is_empty()
    }
}
