//! 多帧稳定器 - 统计候选出现次数，过期淘汰，达到阈值即视为稳定

use log::debug;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::frame::Candidate;
use super::geometry::Region;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrackerConfig {
    /// Entries not seen for more than this many frames are purged (~1s at 30fps).
    pub stale_after_frames: u64,
    /// Sightings needed before a value is reported as stable.
    pub stable_threshold: u32,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            stale_after_frames: 30,
            stable_threshold: 3,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrackedEntry {
    pub last_seen_frame: u64,
    pub occurrence_count: u32,
    pub region: Option<Region>,
}

pub struct StabilizationTracker {
    config: TrackerConfig,
    frame_index: u64,
    entries: BTreeMap<String, TrackedEntry>,
    best_string: String,
    best_count: u32,
    best_region: Option<Region>,
}

impl StabilizationTracker {
    pub fn new() -> Self {
        Self::with_config(TrackerConfig::default())
    }

    pub fn with_config(config: TrackerConfig) -> Self {
        Self {
            config,
            frame_index: 0,
            entries: BTreeMap::new(),
            best_string: String::new(),
            best_count: 0,
            best_region: None,
        }
    }

    /// Records one frame's worth of candidates, purges stale entries and
    /// refreshes the best entry. Must be called exactly once per frame, even
    /// when the frame produced no candidates.
    pub fn log_frame(&mut self, candidates: &[Candidate]) {
        for candidate in candidates.iter().filter(|c| !c.text.is_empty()) {
            let frame_index = self.frame_index;
            match self.entries.get_mut(&candidate.text) {
                Some(entry) => {
                    entry.last_seen_frame = frame_index;
                    entry.occurrence_count += 1;
                    entry.region = candidate.region;
                }
                None => {
                    self.entries.insert(
                        candidate.text.clone(),
                        TrackedEntry {
                            last_seen_frame: frame_index,
                            occurrence_count: 1,
                            region: candidate.region,
                        },
                    );
                }
            }
        }

        self.purge_stale();
        self.refresh_best();

        debug!(
            "tracker frame {}: {} live entries, best count {}",
            self.frame_index,
            self.entries.len(),
            self.best_count
        );
        self.frame_index += 1;
    }

    fn purge_stale(&mut self) {
        let frame_index = self.frame_index;
        let window = self.config.stale_after_frames;
        self.entries
            .retain(|_, entry| frame_index.saturating_sub(entry.last_seen_frame) <= window);
    }

    fn refresh_best(&mut self) {
        // The previous best may have been purged, or seen again this frame.
        match self.entries.get(&self.best_string) {
            Some(entry) if self.best_count > 0 => {
                self.best_count = entry.occurrence_count;
                self.best_region = entry.region;
            }
            _ => {
                self.best_string.clear();
                self.best_count = 0;
                self.best_region = None;
            }
        }

        // strictly greater: ties keep the current best
        for (text, entry) in &self.entries {
            if entry.occurrence_count > self.best_count {
                self.best_count = entry.occurrence_count;
                self.best_string.clone_from(text);
                self.best_region = entry.region;
            }
        }
    }

    /// The best entry once it has been seen often enough.
    pub fn get_stable(&self) -> Option<Candidate> {
        if self.best_count >= self.config.stable_threshold && !self.best_string.is_empty() {
            Some(Candidate {
                text: self.best_string.clone(),
                region: self.best_region,
            })
        } else {
            None
        }
    }

    /// Live entry with the most sightings, stable or not.
    pub fn highest_count_string(&self) -> Option<&str> {
        self.entries
            .iter()
            .max_by_key(|(_, entry)| entry.occurrence_count)
            .map(|(text, _)| text.as_str())
    }

    /// Forgets `text` (usually the value that was just confirmed) and clears
    /// the best slot so it cannot leak into later frames.
    pub fn reset(&mut self, text: &str) {
        self.entries.remove(text);
        self.best_string.clear();
        self.best_count = 0;
        self.best_region = None;
    }

    pub fn entry(&self, text: &str) -> Option<&TrackedEntry> {
        self.entries.get(text)
    }

    pub fn frame_index(&self) -> u64 {
        self.frame_index
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for StabilizationTracker {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seen(text: &str) -> Vec<Candidate> {
        vec![Candidate::text_only(text)]
    }

    #[test]
    fn test_needs_three_sightings() {
        let mut tracker = StabilizationTracker::new();

        tracker.log_frame(&seen("4532015112830366"));
        tracker.log_frame(&seen("4532015112830366"));
        assert!(tracker.get_stable().is_none());

        tracker.log_frame(&seen("4532015112830366"));
        let stable = tracker.get_stable().expect("stable after third frame");
        assert_eq!(stable.text, "4532015112830366");
    }

    #[test]
    fn test_early_sighting_ages_out() {
        let mut tracker = StabilizationTracker::new();

        tracker.log_frame(&seen("08/27"));
        for i in 0..35 {
            tracker.log_frame(&seen(&format!("noise-{}", i)));
        }
        assert!(tracker.entry("08/27").is_none());

        tracker.log_frame(&seen("08/27"));
        tracker.log_frame(&seen("08/27"));
        assert!(tracker.get_stable().is_none());
        assert_eq!(tracker.entry("08/27").map(|e| e.occurrence_count), Some(2));
    }

    #[test]
    fn test_entry_survives_inside_window() {
        let mut tracker = StabilizationTracker::new();

        tracker.log_frame(&seen("08/27"));
        for _ in 0..30 {
            tracker.log_frame(&[]);
        }
        assert!(tracker.entry("08/27").is_some());

        tracker.log_frame(&[]);
        assert!(tracker.entry("08/27").is_none());
    }

    #[test]
    fn test_region_follows_latest_sighting() {
        let mut tracker = StabilizationTracker::new();
        let first = Region::new(0.1, 0.4, 0.5, 0.1);
        let last = Region::new(0.12, 0.41, 0.5, 0.1);

        tracker.log_frame(&[Candidate::new("08/27", Some(first))]);
        tracker.log_frame(&[Candidate::new("08/27", Some(first))]);
        tracker.log_frame(&[Candidate::new("08/27", Some(last))]);

        let stable = tracker.get_stable().expect("stable");
        assert_eq!(stable.region, Some(last));
    }

    #[test]
    fn test_tie_keeps_previous_best() {
        let mut tracker = StabilizationTracker::with_config(TrackerConfig {
            stable_threshold: 2,
            ..Default::default()
        });

        tracker.log_frame(&seen("ZZZ"));
        tracker.log_frame(&[Candidate::text_only("ZZZ"), Candidate::text_only("AAA")]);
        tracker.log_frame(&seen("AAA"));

        assert_eq!(tracker.get_stable().map(|c| c.text), Some("ZZZ".to_string()));
    }

    #[test]
    fn test_empty_text_is_ignored() {
        let mut tracker = StabilizationTracker::new();
        tracker.log_frame(&seen(""));
        assert!(tracker.is_empty());
        assert_eq!(tracker.frame_index(), 1);
    }

    #[test]
    fn test_reset_clears_best() {
        let mut tracker = StabilizationTracker::new();
        for _ in 0..3 {
            tracker.log_frame(&[Candidate::text_only("JOHN SMITH"), Candidate::text_only("JOHN")]);
        }
        assert!(tracker.get_stable().is_some());

        tracker.reset("JOHN SMITH");
        assert!(tracker.get_stable().is_none());
        assert!(tracker.entry("JOHN SMITH").is_none());
        assert_eq!(tracker.highest_count_string(), Some("JOHN"));

        // the remaining entry becomes best on the next frame
        tracker.log_frame(&[]);
        assert_eq!(tracker.get_stable().map(|c| c.text), Some("JOHN".to_string()));
    }

    #[test]
    fn test_stale_best_does_not_leak() {
        let mut tracker = StabilizationTracker::with_config(TrackerConfig {
            stale_after_frames: 2,
            stable_threshold: 3,
        });

        tracker.log_frame(&seen("OLD"));
        tracker.log_frame(&seen("OLD"));
        for _ in 0..3 {
            tracker.log_frame(&[]);
        }
        assert!(tracker.entry("OLD").is_none());

        tracker.log_frame(&seen("NEW"));
        assert!(tracker.get_stable().is_none());
        assert_eq!(tracker.highest_count_string(), Some("NEW"));
    }
}
