//! OCRGATE 핵심 에러 타입.
//!
//! 요청 처리 실패는 두 부류뿐이다: 업로드 디코딩 실패(클라이언트 원인)와
//! OCR 엔진 실패(서버 원인). 나머지 변형은 시작/설정 단계에서만 발생한다.

use thiserror::Error;

/// 코어 레이어 에러.
#[derive(Debug, Error)]
pub enum CoreError {
    /// 업로드 바이트를 이미지로 해석할 수 없음 (빈 입력, 손상, 미지원 형식, 면적 0)
    #[error("이미지 디코딩 실패: {0}")]
    Decode(String),

    /// OCR 엔진이 유효한 픽셀 버퍼 처리에 실패
    #[error("OCR 엔진 에러: {0}")]
    Engine(String),

    /// OCR 엔진 호출 타임아웃
    #[error("OCR 엔진 타임아웃: {timeout_ms}ms 초과")]
    EngineTimeout {
        /// 초과된 타임아웃 시간 (밀리초)
        timeout_ms: u64,
    },

    /// 설정값 오류
    #[error("설정 에러: {0}")]
    Config(String),

    /// I/O 에러
    #[error("I/O 에러: {0}")]
    Io(#[from] std::io::Error),

    /// JSON 직렬화/역직렬화 실패
    #[error("직렬화 에러: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// 에러 분류: HTTP 상태 매핑에 사용
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// 클라이언트 원인 (4xx)
    Decode,
    /// 엔진 원인 (5xx)
    Engine,
    /// 그 외 내부 오류 (5xx)
    Other,
}

impl CoreError {
    /// 에러 분류 반환
    pub fn kind(&self) -> ErrorKind {
        match self {
            CoreError::Decode(_) => ErrorKind::Decode,
            CoreError::Engine(_) | CoreError::EngineTimeout { .. } => ErrorKind::Engine,
            CoreError::Config(_) | CoreError::Io(_) | CoreError::Serialization(_) => {
                ErrorKind::Other
            }
        }
    }
}
