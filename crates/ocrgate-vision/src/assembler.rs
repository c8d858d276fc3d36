//! 응답 조립.

use ocrgate_core::models::geometry::BoundingBox;
use ocrgate_core::models::response::OcrResponse;

/// 박스 목록을 응답 엔벨로프로 감싼다.
///
/// 정렬, 중복 제거, 필터링(빈 텍스트/면적 0 포함)을 하지 않는다.
pub fn assemble(boxes: Vec<BoundingBox>) -> OcrResponse {
    OcrResponse { boxes }
}
