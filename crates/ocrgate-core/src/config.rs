//! 애플리케이션 설정 구조체.
//!
//! 웹 서버, OCR 엔진 선택, 디코딩 한도를 정의한다.
//! `ConfigManager`가 JSON 파일에서 로드하고, CLI 인자가 그 위에 덮어쓴다.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::models::detection::RawDetection;

/// 최상위 애플리케이션 설정
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// 웹 서버 설정
    #[serde(default)]
    pub web: WebConfig,
    /// OCR 엔진 설정
    #[serde(default)]
    pub engine: EngineConfig,
    /// 이미지 디코딩 한도
    #[serde(default)]
    pub decode: DecodeConfig,
}

impl AppConfig {
    /// 기본 설정 생성
    pub fn default_config() -> Self {
        Self::default()
    }
}

// ============================================================
// 웹 서버 설정
// ============================================================

fn default_web_port() -> u16 {
    8866
}

fn default_max_upload_bytes() -> usize {
    20 * 1024 * 1024
}

/// 웹 서버 설정
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WebConfig {
    /// 서버 포트 (기본: 8866)
    #[serde(default = "default_web_port")]
    pub port: u16,
    /// 외부 접근 허용 여부 (false: 127.0.0.1 only)
    #[serde(default)]
    pub allow_external: bool,
    /// 업로드 본문 최대 크기 (기본: 20 MiB)
    #[serde(default = "default_max_upload_bytes")]
    pub max_upload_bytes: usize,
}

impl Default for WebConfig {
    fn default() -> Self {
        Self {
            port: default_web_port(),
            allow_external: false,
            max_upload_bytes: default_max_upload_bytes(),
        }
    }
}

// ============================================================
// OCR 엔진 설정
// ============================================================

/// OCR 엔진 종류
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EngineKind {
    /// 고정 결과를 반환하는 결정적 스텁
    #[default]
    Stub,
    /// 내장 Tesseract (`tesseract` feature 필요)
    Tesseract,
    /// 외부 OCR 서버 HTTP 호출
    Remote,
}

/// OCR 엔진 설정
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EngineConfig {
    /// 사용할 엔진
    #[serde(default)]
    pub kind: EngineKind,
    /// 요청당 엔진 호출 타임아웃 (밀리초, None이면 무제한)
    #[serde(default)]
    pub timeout_ms: Option<u64>,
    /// 엔진 호출 강제 직렬화 (동시 호출 1건으로 제한)
    #[serde(default)]
    pub serialize_calls: bool,
    #[serde(default)]
    pub tesseract: TesseractConfig,
    #[serde(default)]
    pub remote: RemoteEngineConfig,
    #[serde(default)]
    pub stub: StubEngineConfig,
}

fn default_tesseract_language() -> String {
    "eng".to_string()
}

/// Tesseract 설정
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TesseractConfig {
    /// tessdata 경로 (None이면 시스템 기본값)
    #[serde(default)]
    pub tessdata_path: Option<PathBuf>,
    /// 인식 언어 (기본: "eng")
    #[serde(default = "default_tesseract_language")]
    pub language: String,
}

impl Default for TesseractConfig {
    fn default() -> Self {
        Self {
            tessdata_path: None,
            language: default_tesseract_language(),
        }
    }
}

fn default_remote_endpoint() -> String {
    "http://127.0.0.1:8000/ocr/raw".to_string()
}

fn default_remote_timeout_secs() -> u64 {
    60
}

/// 외부 OCR 서버 설정
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RemoteEngineConfig {
    /// 엔진 엔드포인트 URL
    #[serde(default = "default_remote_endpoint")]
    pub endpoint: String,
    /// HTTP 요청 타임아웃 (초)
    #[serde(default = "default_remote_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for RemoteEngineConfig {
    fn default() -> Self {
        Self {
            endpoint: default_remote_endpoint(),
            timeout_secs: default_remote_timeout_secs(),
        }
    }
}

/// 스텁 엔진 설정: 데모/테스트용 고정 검출 목록
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StubEngineConfig {
    #[serde(default)]
    pub detections: Vec<RawDetection>,
}

// ============================================================
// 디코딩 한도
// ============================================================

fn default_max_dimension() -> u32 {
    16_384
}

/// 이미지 디코딩 한도: 초과 시 디코딩 에러
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct DecodeConfig {
    #[serde(default = "default_max_dimension")]
    pub max_width: u32,
    #[serde(default = "default_max_dimension")]
    pub max_height: u32,
}

impl Default for DecodeConfig {
    fn default() -> Self {
        Self {
            max_width: default_max_dimension(),
            max_height: default_max_dimension(),
        }
    }
}
