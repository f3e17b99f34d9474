//! 银行卡扫描器

use std::sync::{Mutex, MutexGuard};

use flutter_rust_bridge::frb;
use log::info;

use crate::api::models::scan::{CardDetails, RecognizedText, ScanApiError, ScanUpdate};
use crate::core::card::{CardTypeClassifier, DigitString};
use crate::core::frame::{Candidate, ObservationFrame};
use crate::core::recognizers::CardNumberRecognizer;
use crate::core::session::{ExtractionSession, SessionConfig};

/// 银行卡扫描器 - 多帧稳定卡号、有效期、持卡人姓名
///
/// ```dart
/// final scanner = CardScanner.create(firstNameHint: "John", lastNameHint: "Smith");
/// final update = await scanner.processFrame(frameNumber: n, timestampMs: t, observations: texts);
/// if (scanner.isFinished) stopCamera(scanner.details);
/// ```
#[frb(opaque)]
pub struct CardScanner {
    session: Mutex<ExtractionSession>,
}

impl CardScanner {
    /// 创建扫描器（默认按 30fps 计算窗口）
    #[frb(sync)]
    pub fn create(first_name_hint: String, last_name_hint: String) -> Self {
        let config = SessionConfig::default().with_name_hints(first_name_hint, last_name_hint);
        info!("💳 CardScanner: created");
        Self::from_config(config)
    }

    /// 从 JSON 配置创建扫描器，缺省字段取默认值
    #[frb(sync)]
    pub fn create_with_config(config_json: String) -> Result<Self, ScanApiError> {
        let config = SessionConfig::from_json(&config_json)?;
        info!("💳 CardScanner: created from config");
        Ok(Self::from_config(config))
    }

    fn from_config(config: SessionConfig) -> Self {
        Self {
            session: Mutex::new(ExtractionSession::with_config(config)),
        }
    }

    /// 处理一帧 OCR 结果（帧号必须递增）
    #[frb]
    pub fn process_frame(
        &self,
        frame_number: u64,
        timestamp_ms: u64,
        observations: Vec<RecognizedText>,
    ) -> Result<ScanUpdate, ScanApiError> {
        let candidates: Vec<Candidate> = observations.into_iter().map(Candidate::from).collect();
        let frame = ObservationFrame::new(frame_number, timestamp_ms, candidates);

        let event = self.lock().ingest_frame(&frame)?;
        Ok(event.into())
    }

    /// 获取已确认的字段
    #[frb(sync, getter)]
    pub fn details(&self) -> CardDetails {
        self.lock().result().into()
    }

    /// 扫描是否已结束
    #[frb(sync, getter)]
    pub fn is_finished(&self) -> bool {
        self.lock().is_completed()
    }

    fn lock(&self) -> MutexGuard<'_, ExtractionSession> {
        // a panic mid-ingest leaves the session usable; keep serving it
        self.session.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl Drop for CardScanner {
    fn drop(&mut self) {
        info!("🗑️ CardScanner: released");
    }
}

/// 校验卡号：卡组织格式 + Luhn 校验
#[flutter_rust_bridge::frb(sync)]
pub fn validate_card_number(number: String) -> bool {
    CardNumberRecognizer::new()
        .extract_from_candidate(&number)
        .is_some()
}

/// 根据输入中的卡号前缀推断卡组织（不做校验）
#[flutter_rust_bridge::frb(sync)]
pub fn card_brand_for_input(text: String) -> Option<String> {
    CardTypeClassifier::new()
        .classify_partial(&text)
        .map(|group| group.as_str().to_string())
}

/// 卡号脱敏，例如 `**** 0366`
#[flutter_rust_bridge::frb(sync)]
pub fn mask_card_number(number: String) -> String {
    DigitString::from_text(&number).masked()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn texts(items: &[&str]) -> Vec<RecognizedText> {
        items
            .iter()
            .map(|t| RecognizedText {
                text: t.to_string(),
                region: None,
            })
            .collect()
    }

    #[test]
    fn test_scanner_number_with_hint_name() {
        let scanner = CardScanner::create("John".to_string(), "Smith".to_string());
        let frame = texts(&["4532 0151 1283 0366", "VALID THRU 12/27", "JOHN SMITH"]);

        for n in 1..=2 {
            let update = scanner.process_frame(n, n * 33, frame.clone()).expect("in order");
            assert!(matches!(update, ScanUpdate::Progress { .. }));
        }
        let update = scanner.process_frame(3, 99, frame).expect("in order");

        match update {
            ScanUpdate::Finished(details) => {
                assert_eq!(details.number.as_deref(), Some("4532015112830366"));
                assert_eq!(details.brand.as_deref(), Some("VISA"));
                assert_eq!(details.expiry.as_deref(), Some("12/27"));
                assert_eq!(details.holder_name.as_deref(), Some("JOHN SMITH"));
            }
            other => panic!("expected finished, got {:?}", other),
        }
        assert!(scanner.is_finished());
    }

    #[test]
    fn test_scanner_rejects_stale_frame() {
        let scanner = CardScanner::create(String::new(), String::new());
        scanner.process_frame(10, 0, texts(&["12/27"])).expect("first frame");

        let err = scanner.process_frame(9, 0, texts(&["12/27"])).unwrap_err();
        assert_eq!(err.error_type, "OutOfOrderFrame");
        assert!(!scanner.is_finished());
    }

    #[test]
    fn test_create_with_bad_config() {
        let err = CardScanner::create_with_config(r#"{"max_observations": 0}"#.to_string())
            .err()
            .expect("invalid config");
        assert_eq!(err.error_type, "InvalidConfig");

        let scanner = CardScanner::create_with_config("{}".to_string()).expect("defaults");
        assert_eq!(scanner.details(), CardDetails::default());
    }

    #[test]
    fn test_validate_card_number() {
        assert!(validate_card_number("4532 0151 1283 0366".to_string()));
        assert!(!validate_card_number("4532 0151 1283 0367".to_string()));
        assert!(!validate_card_number(String::new()));
    }

    #[test]
    fn test_card_brand_for_input() {
        assert_eq!(card_brand_for_input("4532 01".to_string()).as_deref(), Some("VISA"));
        assert_eq!(card_brand_for_input(String::new()), None);
    }

    #[test]
    fn test_mask_card_number() {
        assert_eq!(mask_card_number("4532 0151 1283 0366".to_string()), "**** 0366");
    }
}
