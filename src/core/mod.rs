pub mod card;
pub mod error;
pub mod frame;
pub mod geometry;
pub mod recognizers;
pub mod session;
pub mod tracker;

pub use card::{CardGroup, CardTypeClassifier, DigitString};
pub use error::ScanError;
pub use frame::{Candidate, ObservationFrame};
pub use geometry::Region;
pub use session::{CardField, ExtractionSession, ScanResult, SessionConfig, SessionEvent};
pub use tracker::{StabilizationTracker, TrackerConfig};
