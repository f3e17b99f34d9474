use serde::{Deserialize, Serialize};

use crate::core::error::ScanError;
use crate::core::frame::Candidate;
use crate::core::geometry::Region;
use crate::core::session::{ScanResult, SessionEvent};

/// 归一化矩形，原点在左上角，取值范围 [0, 1]
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScanRegion {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl From<ScanRegion> for Region {
    fn from(r: ScanRegion) -> Self {
        Region::new(r.x, r.y, r.width, r.height)
    }
}

impl From<Region> for ScanRegion {
    fn from(r: Region) -> Self {
        Self {
            x: r.x,
            y: r.y,
            width: r.width,
            height: r.height,
        }
    }
}

/// 平台 OCR 识别出的一段文字
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecognizedText {
    pub text: String,
    pub region: Option<ScanRegion>,
}

impl From<RecognizedText> for Candidate {
    fn from(t: RecognizedText) -> Self {
        Candidate::new(t.text, t.region.map(Region::from))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CardDetails {
    pub number: Option<String>,
    /// 卡组织标识（大写），例如 `VISA`
    pub brand: Option<String>,
    pub expiry: Option<String>,
    pub holder_name: Option<String>,
    pub number_region: Option<ScanRegion>,
}

impl From<ScanResult> for CardDetails {
    fn from(r: ScanResult) -> Self {
        Self {
            number: r.number,
            brand: r.brand.map(|b| b.as_str().to_string()),
            expiry: r.expiry,
            holder_name: r.holder_name,
            number_region: r.number_region.map(ScanRegion::from),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ScanUpdate {
    /// 本帧新确认的字段名（`number`、`expiry`、`holder_name`）
    Progress { newly_confirmed: Vec<String> },
    /// 扫描结束，可以关闭相机
    Finished(CardDetails),
}

impl From<SessionEvent> for ScanUpdate {
    fn from(event: SessionEvent) -> Self {
        match event {
            SessionEvent::Progress { newly_confirmed } => ScanUpdate::Progress {
                newly_confirmed: newly_confirmed
                    .iter()
                    .map(|f| f.as_str().to_string())
                    .collect(),
            },
            SessionEvent::Finished(result) => ScanUpdate::Finished(result.into()),
        }
    }
}

/// 银行卡扫描 API 错误类型，FRB 友好的设计
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanApiError {
    pub error_type: String,
    pub message: String,
}

impl From<ScanError> for ScanApiError {
    fn from(e: ScanError) -> Self {
        let error_type = match &e {
            ScanError::InvalidConfig(_) => "InvalidConfig",
            ScanError::ConfigFormat(_) => "ConfigFormat",
            ScanError::OutOfOrderFrame { .. } => "OutOfOrderFrame",
        };
        Self {
            error_type: error_type.to_string(),
            message: e.to_string(),
        }
    }
}

impl std::fmt::Display for ScanApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.error_type, self.message)
    }
}

impl std::error::Error for ScanApiError {}
