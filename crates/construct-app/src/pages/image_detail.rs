use construct_client_core::DataApi;
use construct_shared::{
    errors::FetchError,
    images::{AnalysisStatus, ImageDetail, ImageId},
    route::{NavigateTo, Route},
};
use tracing::warn;

use super::{
    data_state::{PageData, Phase},
    DisplayablePage, Screen,
};
use crate::DataShared;

#[derive(Debug)]
pub struct UiImageDetail {
    raw_id: String,
    image: PageData<Option<ImageDetail>>,
}

impl UiImageDetail {
    pub fn new(raw_id: &str) -> Self {
        Self {
            raw_id: raw_id.to_string(),
            image: Default::default(),
        }
    }
}

impl DisplayablePage for UiImageDetail {
    fn title_base() -> &'static str {
        "Image Details"
    }

    fn update<A: DataApi>(&mut self, data_shared: &mut DataShared<A>) -> Option<NavigateTo> {
        let session = data_shared.client.session();
        let id = self.raw_id.parse::<ImageId>();
        self.image.sync(&session, |token| {
            let id = id.map_err(|_| FetchError::InvalidId("Image"))?;
            Ok(data_shared.api.get_image(token, id, data_shared.wake_fn()))
        });
        self.image.poll();
        None
    }

    fn screen(&self) -> Screen {
        let mut screen = Screen::new(Self::title_base());
        match self.image.phase() {
            Phase::Loading => {
                screen.line("Loading image details...");
            }
            Phase::Error(e) => {
                screen.error(e);
            }
            Phase::Ready(None) => {
                screen.line("Image not found.");
            }
            Phase::Ready(Some(image)) => describe_image(&mut screen, image),
        }
        screen.action("Back to Images", Route::UploadImage);
        screen
    }

    fn is_busy(&self) -> bool {
        self.image.is_busy()
    }
}

fn describe_image(screen: &mut Screen, image: &ImageDetail) {
    screen.heading = format!("Image: {}", image.name);
    screen
        .line(format!("URL: {}", image.url))
        .line(format!("Uploaded on: {}", image.upload_date))
        .line(format!("AI Analysis Status: {}", image.ai_analysis_status));
    if let Some(project_id) = image.project_id {
        screen.line(format!("Project: #{project_id}"));
    }
    if image.ai_analysis_status != AnalysisStatus::Completed {
        screen
            .line("AI analysis is still in progress...")
            .line("Please check back in a few moments.");
        return;
    }
    screen.line(format!(
        "Verified Progress Percentage: {}",
        image.progress_display()
    ));
    let analysis = match image.detected_elements() {
        Ok(analysis) => analysis,
        Err(e) => {
            warn!(?e, id = %image.id, "detected elements could not be decoded");
            screen.line("Detected elements could not be read.");
            return;
        }
    };
    screen.line("Detected Elements:");
    let elements = analysis.as_ref().map(|a| a.elements.as_slice()).unwrap_or_default();
    if elements.is_empty() {
        screen.line("  No specific elements detected.");
    }
    for element in elements {
        let bbox = element
            .bbox
            .map(|[x1, y1, x2, y2]| format!(" at [{x1}, {y1}, {x2}, {y2}]"))
            .unwrap_or_default();
        screen.line(format!(
            "  {} (Confidence: {:.1}%){bbox}",
            element.label,
            element.confidence * 100.0
        ));
    }
    if let Some(assessment) = analysis.and_then(|a| a.overall_assessment) {
        screen
            .line("Overall Assessment:")
            .line(format!("  {assessment}"));
    }
}
