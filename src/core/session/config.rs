use serde::Deserialize;

use crate::core::error::ScanError;
use crate::core::tracker::TrackerConfig;

/// 会话配置，默认值按 30fps 相机计算
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    pub tracker: TrackerConfig,
    /// Once the number is confirmed, give up on the other fields after this
    /// many observations.
    pub max_observations: u32,
    pub first_name_hint: String,
    pub last_name_hint: String,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            tracker: TrackerConfig::default(),
            max_observations: 50,
            first_name_hint: String::new(),
            last_name_hint: String::new(),
        }
    }
}

impl SessionConfig {
    /// Rescales the frame-counted windows for a capture running at `fps`.
    /// The defaults assume 30fps.
    pub fn for_frame_rate(fps: u32) -> Self {
        let fps = fps.max(1);
        Self {
            tracker: TrackerConfig {
                stale_after_frames: u64::from(fps),
                ..TrackerConfig::default()
            },
            max_observations: (fps * 5 / 3).max(1),
            ..Self::default()
        }
    }

    pub fn with_name_hints(mut self, first_name: impl Into<String>, last_name: impl Into<String>) -> Self {
        self.first_name_hint = first_name.into();
        self.last_name_hint = last_name.into();
        self
    }

    pub fn from_json(json: &str) -> Result<Self, ScanError> {
        let config: SessionConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ScanError> {
        if self.tracker.stable_threshold == 0 {
            return Err(ScanError::InvalidConfig(
                "tracker.stable_threshold must be at least 1".to_string(),
            ));
        }
        if self.tracker.stale_after_frames == 0 {
            return Err(ScanError::InvalidConfig(
                "tracker.stale_after_frames must be at least 1".to_string(),
            ));
        }
        if self.max_observations == 0 {
            return Err(ScanError::InvalidConfig(
                "max_observations must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}
