use construct_client_core::DataApi;
use construct_shared::{
    errors::FetchError,
    images::{ImageDetail, ImageSummary},
    req_args::api::UploadImageReqArgs,
    route::{NavigateTo, Route},
};
use tracing::info;

use super::{
    data_state::{PageData, Phase},
    DisplayablePage, Screen,
};
use crate::DataShared;

/// Upload form together with the list of images already uploaded
#[derive(Debug, Default)]
pub struct UiUploadImage {
    images: PageData<Vec<ImageSummary>>,
    selection: Option<(String, Vec<u8>)>,
    upload: PageData<ImageDetail>,
    is_upload_attempted: bool,
    success_msg: Option<String>,
}

impl UiUploadImage {
    /// Replaces the selected file, `None` clears it
    pub fn select(&mut self, selection: Option<(String, Vec<u8>)>) {
        self.selection = selection;
        self.success_msg = None;
    }

    pub fn upload<A: DataApi>(&mut self, data_shared: &DataShared<A>) {
        if self.upload.is_busy() {
            info!("upload already in progress, ignoring");
            return;
        }
        self.is_upload_attempted = true;
        self.success_msg = None;
        let args = match UploadImageReqArgs::try_new(self.selection.clone()) {
            Ok(args) => args,
            Err(e) => {
                self.upload.fail(e.into());
                return;
            }
        };
        let Some(token) = data_shared.client.token() else {
            self.upload.fail(FetchError::MissingToken);
            return;
        };
        let rx = data_shared
            .api
            .upload_image(&token, args, data_shared.wake_fn());
        self.upload.start(rx);
    }

    fn on_uploaded(&mut self) {
        let Phase::Ready(created) = self.upload.phase() else {
            return;
        };
        info!(id = %created.id, "image uploaded");
        self.success_msg = Some(format!(
            "Image \"{}\" uploaded successfully! Analysis status: {}.",
            created.name, created.ai_analysis_status
        ));
        let summary = ImageSummary::from(created);
        if let Some(images) = self.images.data_mut() {
            images.insert(0, summary);
        }
        self.selection = None;
    }
}

impl DisplayablePage for UiUploadImage {
    fn title_base() -> &'static str {
        "Upload New Image for Verification"
    }

    fn update<A: DataApi>(&mut self, data_shared: &mut DataShared<A>) -> Option<NavigateTo> {
        let session = data_shared.client.session();
        self.images.sync(&session, |token| {
            Ok(data_shared.api.list_images(token, data_shared.wake_fn()))
        });
        self.images.poll();
        if self.upload.poll() {
            self.on_uploaded();
        }
        None
    }

    fn screen(&self) -> Screen {
        let mut screen = Screen::new(Self::title_base());
        match &self.selection {
            Some((name, bytes)) => screen.line(format!("Selected: {name} ({} bytes)", bytes.len())),
            None => screen.line("No file selected."),
        };
        if self.is_upload_attempted {
            match self.upload.phase() {
                Phase::Loading => {
                    screen.line("Uploading...");
                }
                Phase::Error(e) => {
                    screen.error(e);
                }
                Phase::Ready(_) => {}
            }
        }
        if let Some(msg) = &self.success_msg {
            screen.line(msg.as_str());
        }

        screen.line("Your Uploaded Images");
        match self.images.phase() {
            Phase::Loading => {
                screen.line("  Loading images...");
            }
            Phase::Error(e) => {
                screen.line(format!("  Failed to load uploaded images. {e}"));
            }
            Phase::Ready(images) if images.is_empty() => {
                screen.line("  No images uploaded yet.");
            }
            Phase::Ready(images) => {
                for image in images {
                    screen
                        .line(format!(
                            "  {} | {} | Progress: {} | {}",
                            image.name,
                            image.ai_analysis_status,
                            image.progress.as_deref().unwrap_or("N/A"),
                            image.upload_date
                        ))
                        .action(
                            format!("View Image {}", image.name),
                            Route::ImageDetail(image.id.to_string()),
                        );
                }
            }
        }
        screen.action("Back to Dashboard", Route::Dashboard);
        screen
    }

    fn is_busy(&self) -> bool {
        self.images.is_busy() || self.upload.is_busy()
    }
}
