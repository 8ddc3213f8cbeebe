//! Where the view controllers get their records from

use construct_shared::{
    errors::FetchError,
    images::{ImageDetail, ImageId, ImageSummary},
    payments::{PaymentDetail, PaymentId, PaymentInitiated, PaymentSummary},
    req_args::api::{InitiatePaymentReqArgs, UploadImageReqArgs},
    token::AuthToken,
};
use futures::channel::oneshot;

use crate::{Client, UiCallBack};

pub type FetchReceiver<T> = oneshot::Receiver<Result<T, FetchError>>;

/// Source of payment and image records
///
/// Each call resolves exactly once through the returned receiver and then
/// calls `ui_notify`. Lookups by id answer `None` when the record does not
/// exist.
pub trait DataApi: Clone + Send + 'static {
    fn list_payments<F: UiCallBack>(
        &self,
        token: &AuthToken,
        ui_notify: F,
    ) -> FetchReceiver<Vec<PaymentSummary>>;

    fn get_payment<F: UiCallBack>(
        &self,
        token: &AuthToken,
        id: PaymentId,
        ui_notify: F,
    ) -> FetchReceiver<Option<PaymentDetail>>;

    fn initiate_payment<F: UiCallBack>(
        &self,
        token: &AuthToken,
        args: &InitiatePaymentReqArgs,
        ui_notify: F,
    ) -> FetchReceiver<PaymentInitiated>;

    fn list_images<F: UiCallBack>(
        &self,
        token: &AuthToken,
        ui_notify: F,
    ) -> FetchReceiver<Vec<ImageSummary>>;

    fn get_image<F: UiCallBack>(
        &self,
        token: &AuthToken,
        id: ImageId,
        ui_notify: F,
    ) -> FetchReceiver<Option<ImageDetail>>;

    fn upload_image<F: UiCallBack>(
        &self,
        token: &AuthToken,
        args: UploadImageReqArgs,
        ui_notify: F,
    ) -> FetchReceiver<ImageDetail>;
}

impl DataApi for Client {
    fn list_payments<F: UiCallBack>(
        &self,
        token: &AuthToken,
        ui_notify: F,
    ) -> FetchReceiver<Vec<PaymentSummary>> {
        self.get_list_payments(token, ui_notify)
    }

    fn get_payment<F: UiCallBack>(
        &self,
        token: &AuthToken,
        id: PaymentId,
        ui_notify: F,
    ) -> FetchReceiver<Option<PaymentDetail>> {
        self.get_payment_detail(token, id, ui_notify)
    }

    fn initiate_payment<F: UiCallBack>(
        &self,
        token: &AuthToken,
        args: &InitiatePaymentReqArgs,
        ui_notify: F,
    ) -> FetchReceiver<PaymentInitiated> {
        self.create_payment(token, args, ui_notify)
    }

    fn list_images<F: UiCallBack>(
        &self,
        token: &AuthToken,
        ui_notify: F,
    ) -> FetchReceiver<Vec<ImageSummary>> {
        self.get_list_images(token, ui_notify)
    }

    fn get_image<F: UiCallBack>(
        &self,
        token: &AuthToken,
        id: ImageId,
        ui_notify: F,
    ) -> FetchReceiver<Option<ImageDetail>> {
        self.get_image_detail(token, id, ui_notify)
    }

    fn upload_image<F: UiCallBack>(
        &self,
        token: &AuthToken,
        args: UploadImageReqArgs,
        ui_notify: F,
    ) -> FetchReceiver<ImageDetail> {
        self.create_image(token, args, ui_notify)
    }
}
