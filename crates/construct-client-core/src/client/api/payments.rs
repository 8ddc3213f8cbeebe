use construct_shared::{
    const_config::path::{PATH_API_PAYMENT, PATH_API_PAYMENTS, PATH_API_PAYMENT_CREATE},
    payments::{PaymentDetail, PaymentId, PaymentInitiated, PaymentSummary},
    req_args::api::InitiatePaymentReqArgs,
    token::AuthToken,
};

use crate::{
    client::{UiCallBack, DUMMY_ARGUMENT},
    data_api::FetchReceiver,
    Client,
};

impl Client {
    #[tracing::instrument(skip(token, ui_notify))]
    pub fn get_list_payments<F: UiCallBack>(
        &self,
        token: &AuthToken,
        ui_notify: F,
    ) -> FetchReceiver<Vec<PaymentSummary>> {
        self.send_request_expect_json(
            &PATH_API_PAYMENTS,
            PATH_API_PAYMENTS.path,
            token,
            &DUMMY_ARGUMENT,
            ui_notify,
        )
    }

    #[tracing::instrument(skip(token, ui_notify))]
    pub fn get_payment_detail<F: UiCallBack>(
        &self,
        token: &AuthToken,
        id: PaymentId,
        ui_notify: F,
    ) -> FetchReceiver<Option<PaymentDetail>> {
        let path = PATH_API_PAYMENT.path_with_id(id);
        self.send_request_expect_optional_json(&PATH_API_PAYMENT, &path, token, ui_notify)
    }

    #[tracing::instrument(skip(token, ui_notify))]
    pub fn create_payment<F: UiCallBack>(
        &self,
        token: &AuthToken,
        args: &InitiatePaymentReqArgs,
        ui_notify: F,
    ) -> FetchReceiver<PaymentInitiated> {
        self.send_request_expect_json(
            &PATH_API_PAYMENT_CREATE,
            PATH_API_PAYMENT_CREATE.path,
            token,
            args,
            ui_notify,
        )
    }
}
