use super::config::SessionConfig;
use super::event::ScanResult;

/// 扫描状态机：Scanning -> Completed
#[derive(Debug, Clone, PartialEq)]
pub enum SessionStatus {
    Scanning,
    Completed(ScanResult),
}

impl SessionStatus {
    pub fn new() -> Self {
        SessionStatus::Scanning
    }

    /// Scanning ends once the number is known and either every other field
    /// is known too or the observation cap has been passed. `Completed` is
    /// terminal.
    pub fn transition(
        &self,
        result: &ScanResult,
        observation_count: u32,
        config: &SessionConfig,
    ) -> SessionStatus {
        match self {
            SessionStatus::Completed(_) => self.clone(),
            SessionStatus::Scanning => {
                let out_of_budget = observation_count > config.max_observations;
                if result.is_complete() || (result.number.is_some() && out_of_budget) {
                    SessionStatus::Completed(result.clone())
                } else {
                    SessionStatus::Scanning
                }
            }
        }
    }

    pub fn is_completed(&self) -> bool {
        matches!(self, SessionStatus::Completed(_))
    }
}

impl Default for SessionStatus {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn number_only() -> ScanResult {
        ScanResult {
            number: Some("4532015112830366".to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn test_needs_number() {
        let config = SessionConfig::default();
        let result = ScanResult {
            expiry: Some("12/27".to_string()),
            holder_name: Some("JOHN SMITH".to_string()),
            ..Default::default()
        };
        let status = SessionStatus::new().transition(&result, 500, &config);
        assert_eq!(status, SessionStatus::Scanning);
    }

    #[test]
    fn test_all_fields_complete() {
        let config = SessionConfig::default();
        let result = ScanResult {
            expiry: Some("12/27".to_string()),
            holder_name: Some("JOHN SMITH".to_string()),
            ..number_only()
        };
        let status = SessionStatus::new().transition(&result, 3, &config);
        assert!(status.is_completed());
    }

    #[test]
    fn test_observation_cap() {
        let config = SessionConfig::default();
        let scanning = SessionStatus::new();
        assert!(!scanning.transition(&number_only(), 50, &config).is_completed());
        assert!(scanning.transition(&number_only(), 51, &config).is_completed());
    }

    #[test]
    fn test_completed_is_terminal() {
        let config = SessionConfig::default();
        let done = SessionStatus::Completed(number_only());
        let next = done.transition(&ScanResult::default(), 0, &config);
        assert_eq!(next, done);
    }
}
