//! 扫描会话 - 逐帧驱动各字段识别器，按字段做多帧稳定，并决定何时结束
//!
//! 流程：
//! 1. 单条文字识别 - 每条 OCR 文字交给字段识别器
//! 2. 全文兜底 - 单条无命中时再看整帧文本
//! 3. 多帧稳定 - 每个字段一个 tracker，达到阈值即确认
//! 4. 状态机 - 卡号确认后，其余字段齐全或超出观察上限即结束

pub mod config;
pub mod event;
pub mod state_machine;

pub use config::SessionConfig;
pub use event::{CardField, ScanResult, SessionEvent};
pub use state_machine::SessionStatus;

use log::{debug, info, warn};

use crate::core::card::{CardTypeClassifier, DigitString};
use crate::core::error::ScanError;
use crate::core::frame::{Candidate, ObservationFrame};
use crate::core::geometry::Region;
use crate::core::recognizers::{
    CardHolderNameRecognizer, CardNumberRecognizer, ExpiryDateRecognizer, FieldRecognizer,
    HeuristicNameTagger, NameTagger,
};
use crate::core::tracker::StabilizationTracker;

/// Recognizer, tracker and confirmed value for one card field.
struct FieldSlot {
    field: CardField,
    recognizer: Box<dyn FieldRecognizer>,
    tracker: StabilizationTracker,
    confirmed: Option<String>,
    region: Option<Region>,
}

impl FieldSlot {
    fn new(field: CardField, recognizer: Box<dyn FieldRecognizer>, config: &SessionConfig) -> Self {
        Self {
            field,
            recognizer,
            tracker: StabilizationTracker::with_config(config.tracker),
            confirmed: None,
            region: None,
        }
    }

    /// Runs one frame through this field. Returns true if the field became
    /// confirmed on this frame.
    fn scan(&mut self, candidates: &[Candidate], full_text: &str) -> bool {
        if self.confirmed.is_some() {
            return false;
        }

        let mut hits: Vec<Candidate> = candidates
            .iter()
            .filter_map(|c| {
                self.recognizer
                    .extract_candidate(&c.text)
                    .map(|text| Candidate { text, region: c.region })
            })
            .collect();
        if hits.is_empty() {
            if let Some(text) = self.recognizer.extract_full_text(full_text) {
                hits.push(Candidate { text, region: None });
            }
        }
        if !hits.is_empty() {
            debug!("{} hits this frame: {}", self.field, hits.len());
        }

        self.tracker.log_frame(&hits);

        match self.tracker.get_stable() {
            Some(stable) => {
                self.tracker.reset(&stable.text);
                self.region = stable.region;
                self.confirmed = Some(stable.text);
                true
            }
            None => false,
        }
    }
}

/// 单次扫描会话，一张卡对应一个实例
pub struct ExtractionSession {
    config: SessionConfig,
    classifier: CardTypeClassifier,
    number: FieldSlot,
    expiry: FieldSlot,
    holder: FieldSlot,
    observation_count: u32,
    last_frame_number: Option<u64>,
    status: SessionStatus,
}

impl ExtractionSession {
    pub fn new() -> Self {
        Self::with_config(SessionConfig::default())
    }

    pub fn with_config(config: SessionConfig) -> Self {
        Self::with_tagger(config, Box::new(HeuristicNameTagger::new()))
    }

    pub fn with_tagger(config: SessionConfig, tagger: Box<dyn NameTagger>) -> Self {
        let holder_recognizer = CardHolderNameRecognizer::with_tagger(tagger)
            .with_hints(config.first_name_hint.clone(), config.last_name_hint.clone());

        info!(
            "🔍 ExtractionSession: created (threshold {}, stale after {} frames, cap {} observations)",
            config.tracker.stable_threshold, config.tracker.stale_after_frames, config.max_observations
        );

        Self {
            number: FieldSlot::new(CardField::Number, Box::new(CardNumberRecognizer::new()), &config),
            expiry: FieldSlot::new(CardField::Expiry, Box::new(ExpiryDateRecognizer::new()), &config),
            holder: FieldSlot::new(CardField::HolderName, Box::new(holder_recognizer), &config),
            classifier: CardTypeClassifier::new(),
            observation_count: 0,
            last_frame_number: None,
            status: SessionStatus::new(),
            config,
        }
    }

    /// Processes one frame of OCR output. Frames must be fed in arrival
    /// order; after completion this returns the finished event unchanged.
    pub fn ingest(&mut self, candidates: &[Candidate], full_text: &str) -> SessionEvent {
        if let SessionStatus::Completed(result) = &self.status {
            warn!("⚠️ ingest after completion ignored");
            return SessionEvent::Finished(result.clone());
        }

        let mut newly_confirmed = Vec::new();
        for slot in [&mut self.number, &mut self.expiry, &mut self.holder] {
            if slot.scan(candidates, full_text) {
                newly_confirmed.push(slot.field);
            }
        }
        self.log_confirmations(&newly_confirmed);

        self.observation_count += 1;

        let result = self.result();
        self.status = self
            .status
            .transition(&result, self.observation_count, &self.config);

        match &self.status {
            SessionStatus::Completed(result) => {
                info!(
                    "✅ scan finished after {} observations (number {}, expiry {}, holder {})",
                    self.observation_count,
                    result.number.is_some(),
                    result.expiry.is_some(),
                    result.holder_name.is_some()
                );
                SessionEvent::Finished(result.clone())
            }
            SessionStatus::Scanning => SessionEvent::Progress { newly_confirmed },
        }
    }

    /// Like [`ingest`](Self::ingest), but rejects frames whose number does not
    /// increase. A rejected frame leaves the session untouched.
    pub fn ingest_frame(&mut self, frame: &ObservationFrame) -> Result<SessionEvent, ScanError> {
        if let SessionStatus::Completed(result) = &self.status {
            warn!(
                "⚠️ frame {} arrived after completion, ignored",
                frame.frame_number
            );
            return Ok(SessionEvent::Finished(result.clone()));
        }

        if let Some(last) = self.last_frame_number {
            if frame.frame_number <= last {
                warn!(
                    "⚠️ out-of-order frame {} (last ingested {}), dropped",
                    frame.frame_number, last
                );
                return Err(ScanError::OutOfOrderFrame {
                    last,
                    received: frame.frame_number,
                });
            }
        }
        self.last_frame_number = Some(frame.frame_number);
        debug!(
            "frame {} @ {}ms: {} candidates",
            frame.frame_number,
            frame.timestamp_ms,
            frame.candidates.len()
        );

        Ok(self.ingest(&frame.candidates, &frame.full_text))
    }

    fn log_confirmations(&self, fields: &[CardField]) {
        for field in fields {
            match field {
                CardField::Number => {
                    let masked = self
                        .number
                        .confirmed
                        .as_deref()
                        .map(|n| DigitString::from_text(n).masked())
                        .unwrap_or_default();
                    info!("🔒 number confirmed: {}", masked);
                }
                other => info!("🔒 {} confirmed", other),
            }
        }
    }

    /// Snapshot of everything confirmed so far.
    pub fn result(&self) -> ScanResult {
        let brand = self
            .number
            .confirmed
            .as_deref()
            .and_then(|n| self.classifier.classify(&DigitString::from_text(n)));

        ScanResult {
            number: self.number.confirmed.clone(),
            brand,
            expiry: self.expiry.confirmed.clone(),
            holder_name: self.holder.confirmed.clone(),
            number_region: self.number.region,
            expiry_region: self.expiry.region,
        }
    }

    pub fn status(&self) -> &SessionStatus {
        &self.status
    }

    pub fn is_completed(&self) -> bool {
        self.status.is_completed()
    }

    pub fn observation_count(&self) -> u32 {
        self.observation_count
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }
}

impl Default for ExtractionSession {
    fn default() -> Self {
        Self::new()
    }
}
