use serde::Serialize;
use std::fmt;

use crate::core::card::CardGroup;
use crate::core::geometry::Region;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CardField {
    Number,
    Expiry,
    HolderName,
}

impl CardField {
    pub fn as_str(&self) -> &'static str {
        match self {
            CardField::Number => "number",
            CardField::Expiry => "expiry",
            CardField::HolderName => "holder_name",
        }
    }
}

impl fmt::Display for CardField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Fields confirmed so far. Unconfirmed fields stay `None`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ScanResult {
    pub number: Option<String>,
    pub brand: Option<CardGroup>,
    pub expiry: Option<String>,
    pub holder_name: Option<String>,
    /// Stabilized location of the number, for the locked highlight.
    pub number_region: Option<Region>,
    pub expiry_region: Option<Region>,
}

impl ScanResult {
    /// Every field confirmed.
    pub fn is_complete(&self) -> bool {
        self.number.is_some() && self.expiry.is_some() && self.holder_name.is_some()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum SessionEvent {
    /// Still scanning; carries the fields that became confirmed on this frame.
    Progress { newly_confirmed: Vec<CardField> },
    /// Terminal. The capture stream should be stopped.
    Finished(ScanResult),
}

impl SessionEvent {
    pub fn is_finished(&self) -> bool {
        matches!(self, SessionEvent::Finished(_))
    }
}
