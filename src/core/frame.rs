use super::geometry::Region;

/// One recognized text unit for the current frame, as reported by the OCR engine.
#[derive(Debug, Clone, PartialEq)]
pub struct Candidate {
    pub text: String,
    pub region: Option<Region>,
}

impl Candidate {
    pub fn new(text: impl Into<String>, region: Option<Region>) -> Self {
        Self {
            text: text.into(),
            region: region.map(|r| r.normalized()),
        }
    }

    pub fn text_only(text: impl Into<String>) -> Self {
        Self::new(text, None)
    }
}

/// All observations produced by one OCR pass over a video frame.
#[derive(Debug, Clone)]
pub struct ObservationFrame {
    pub frame_number: u64,
    pub timestamp_ms: u64,
    pub candidates: Vec<Candidate>,
    /// Space-joined transcript of every candidate in the frame.
    pub full_text: String,
}

impl ObservationFrame {
    pub fn new(frame_number: u64, timestamp_ms: u64, candidates: Vec<Candidate>) -> Self {
        let full_text = candidates
            .iter()
            .map(|c| c.text.as_str())
            .collect::<Vec<_>>()
            .join(" ");
        Self {
            frame_number,
            timestamp_ms,
            candidates,
            full_text,
        }
    }

    pub fn with_full_text(mut self, full_text: impl Into<String>) -> Self {
        self.full_text = full_text.into();
        self
    }

    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty() && self.full_text.trim().is_empty()
    }
}
