//! # ocrgate-network
//!
//! 외부 OCR 엔진 서버를 `TextDetector` 포트로 감싸는 네트워크 어댑터.

pub mod remote_engine;
