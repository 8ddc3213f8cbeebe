//! Construction site images and the result of their automated analysis

use std::fmt::Display;

use crate::id::RecordId;

pub type ImageId = RecordId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum AnalysisStatus {
    Processing,
    Completed,
    Failed,
}

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ImageSummary {
    pub id: ImageId,
    pub name: String,
    #[serde(default)]
    pub url: String,
    #[serde(alias = "status")]
    pub ai_analysis_status: AnalysisStatus,
    /// Display value such as "85%" or "N/A"
    #[serde(default)]
    pub progress: Option<String>,
    #[serde(default)]
    pub upload_date: String,
}

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ImageDetail {
    pub id: ImageId,
    pub name: String,
    #[serde(default)]
    pub url: String,
    pub ai_analysis_status: AnalysisStatus,
    #[serde(default)]
    pub upload_date: String,
    /// JSON document encoded as a string by the backend, see
    /// [`ImageDetail::detected_elements`]
    #[serde(default)]
    pub detected_elements_json: Option<String>,
    #[serde(default)]
    pub verified_progress_percentage: Option<u8>,
    #[serde(default)]
    pub project_id: Option<RecordId>,
}

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct DetectedElement {
    #[serde(alias = "type")]
    pub label: String,
    pub confidence: f32,
    #[serde(default)]
    pub bbox: Option<[u32; 4]>,
}

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct DetectedElements {
    pub elements: Vec<DetectedElement>,
    #[serde(default)]
    pub overall_assessment: Option<String>,
}

impl ImageDetail {
    /// Decodes the analysis result, `None` until the analysis has produced one
    pub fn detected_elements(&self) -> Result<Option<DetectedElements>, serde_json::Error> {
        self.detected_elements_json
            .as_deref()
            .map(serde_json::from_str)
            .transpose()
    }

    pub fn progress_display(&self) -> String {
        match self.verified_progress_percentage {
            Some(percentage) => format!("{percentage}%"),
            None => "N/A".to_string(),
        }
    }
}

impl From<&ImageDetail> for ImageSummary {
    fn from(value: &ImageDetail) -> Self {
        Self {
            id: value.id,
            name: value.name.clone(),
            url: value.url.clone(),
            ai_analysis_status: value.ai_analysis_status,
            progress: Some(value.progress_display()),
            upload_date: value.upload_date.clone(),
        }
    }
}

impl Display for AnalysisStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AnalysisStatus::Processing => write!(f, "Processing"),
            AnalysisStatus::Completed => write!(f, "Completed"),
            AnalysisStatus::Failed => write!(f, "Failed"),
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn detail(elements_json: Option<&str>) -> ImageDetail {
        ImageDetail {
            id: 1.into(),
            name: "site.jpg".into(),
            url: String::new(),
            ai_analysis_status: AnalysisStatus::Completed,
            upload_date: "2025-07-01".into(),
            detected_elements_json: elements_json.map(str::to_string),
            verified_progress_percentage: None,
            project_id: None,
        }
    }

    #[test]
    fn elements_accept_type_or_label() {
        let raw = json!({
            "elements": [
                {"type": "wall", "confidence": 0.95},
                {"label": "Roof Truss", "confidence": 0.92, "bbox": [250, 100, 400, 250]}
            ],
            "overall_assessment": "Good progress on structural elements."
        })
        .to_string();

        let elements = detail(Some(&raw)).detected_elements().unwrap().unwrap();

        assert_eq!(elements.elements[0].label, "wall");
        assert_eq!(elements.elements[1].bbox, Some([250, 100, 400, 250]));
    }

    #[test]
    fn no_analysis_yet() {
        assert!(detail(None).detected_elements().unwrap().is_none());
        assert_eq!(detail(None).progress_display(), "N/A");
    }

    #[test]
    fn malformed_analysis_is_an_error() {
        assert!(detail(Some("{not json")).detected_elements().is_err());
    }
}
