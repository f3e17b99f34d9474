//! 字段识别器 - 从 OCR 原始文字中提取卡号、有效期、持卡人候选
//!
//! 识别器本身不跨帧保存状态，多帧稳定由 tracker 负责。

pub mod expiry;
pub mod holder;
pub mod number;
pub mod tagger;

pub use expiry::ExpiryDateRecognizer;
pub use holder::CardHolderNameRecognizer;
pub use number::CardNumberRecognizer;
pub use tagger::{HeuristicNameTagger, MockNameTagger, NameTag, NameTagger, TaggedSpan};

/// Extraction capabilities a field recognizer may offer.
///
/// `extract_candidate` looks at a single OCR text unit; `extract_full_text`
/// looks at the whole frame transcript and is only consulted when no
/// candidate produced a hit.
pub trait FieldRecognizer: Send + Sync {
    fn extract_candidate(&self, _text: &str) -> Option<String> {
        None
    }

    fn extract_full_text(&self, _text: &str) -> Option<String> {
        None
    }
}
