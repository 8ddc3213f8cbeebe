use construct_shared::{
    const_config::path::{PATH_API_IMAGE, PATH_API_IMAGES, PATH_API_IMAGE_UPLOAD},
    images::{ImageDetail, ImageId, ImageSummary},
    req_args::api::UploadImageReqArgs,
    token::AuthToken,
};
use futures::channel::oneshot;
use reqwest::multipart::{Form, Part};

use crate::{
    client::{process_json_body, send_result, UiCallBack, DUMMY_ARGUMENT},
    data_api::FetchReceiver,
    Client,
};

impl Client {
    #[tracing::instrument(skip(token, ui_notify))]
    pub fn get_list_images<F: UiCallBack>(
        &self,
        token: &AuthToken,
        ui_notify: F,
    ) -> FetchReceiver<Vec<ImageSummary>> {
        self.send_request_expect_json(
            &PATH_API_IMAGES,
            PATH_API_IMAGES.path,
            token,
            &DUMMY_ARGUMENT,
            ui_notify,
        )
    }

    #[tracing::instrument(skip(token, ui_notify))]
    pub fn get_image_detail<F: UiCallBack>(
        &self,
        token: &AuthToken,
        id: ImageId,
        ui_notify: F,
    ) -> FetchReceiver<Option<ImageDetail>> {
        let path = PATH_API_IMAGE.path_with_id(id);
        self.send_request_expect_optional_json(&PATH_API_IMAGE, &path, token, ui_notify)
    }

    /// Sends the file as the `image` part of a multipart form
    #[tracing::instrument(skip(token, ui_notify))]
    pub fn create_image<F: UiCallBack>(
        &self,
        token: &AuthToken,
        args: UploadImageReqArgs,
        ui_notify: F,
    ) -> FetchReceiver<ImageDetail> {
        let (tx, rx) = oneshot::channel();
        let UploadImageReqArgs { file_name, bytes } = args;
        let form = Form::new().part(
            UploadImageReqArgs::FORM_FIELD,
            Part::bytes(bytes).file_name(file_name),
        );
        let request = self
            .request_builder(&PATH_API_IMAGE_UPLOAD, PATH_API_IMAGE_UPLOAD.path, Some(token))
            .multipart(form);
        let on_done = move |resp: reqwest::Result<reqwest::Response>| async move {
            let msg = process_json_body(resp).await;
            send_result(tx, msg);
            ui_notify();
        };
        reqwest_cross::fetch(request, on_done);
        rx
    }
}
