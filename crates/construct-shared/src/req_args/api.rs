use std::fmt::Debug;

use crate::{errors::ValidationError, payments::PaymentMethod};

/// Body of `POST /api/payments/`
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct InitiatePaymentReqArgs {
    pub amount: f64,
    #[serde(rename = "payment_method")]
    pub method: PaymentMethod,
}

impl InitiatePaymentReqArgs {
    /// Validates the raw form input
    pub fn try_new(amount: &str, method: Option<PaymentMethod>) -> Result<Self, ValidationError> {
        let amount: f64 = amount
            .trim()
            .parse()
            .map_err(|_| ValidationError::InvalidAmount)?;
        if !amount.is_finite() || amount <= 0.0 {
            return Err(ValidationError::InvalidAmount);
        }
        let method = method.ok_or(ValidationError::MissingPaymentMethod)?;
        Ok(Self { amount, method })
    }
}

/// Multipart body of `POST /api/images/`
#[derive(Clone, PartialEq, Eq)]
pub struct UploadImageReqArgs {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

impl UploadImageReqArgs {
    pub const FORM_FIELD: &'static str = "image";

    pub fn try_new(selection: Option<(String, Vec<u8>)>) -> Result<Self, ValidationError> {
        let (file_name, bytes) = selection.ok_or(ValidationError::MissingImage)?;
        Ok(Self { file_name, bytes })
    }
}

impl Debug for UploadImageReqArgs {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UploadImageReqArgs")
            .field("file_name", &self.file_name)
            .field("len", &self.bytes.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case::empty("")]
    #[case::text("abc")]
    #[case::zero("0")]
    #[case::negative("-5")]
    #[case::not_finite("inf")]
    #[case::nan("NaN")]
    fn invalid_amounts(#[case] amount: &str) {
        assert_eq!(
            InitiatePaymentReqArgs::try_new(amount, Some(PaymentMethod::CreditCard)).unwrap_err(),
            ValidationError::InvalidAmount
        );
    }

    #[test]
    fn amount_checked_before_method() {
        assert_eq!(
            InitiatePaymentReqArgs::try_new("x", None).unwrap_err(),
            ValidationError::InvalidAmount
        );
    }

    #[test]
    fn method_required() {
        assert_eq!(
            InitiatePaymentReqArgs::try_new("10", None).unwrap_err(),
            ValidationError::MissingPaymentMethod
        );
    }

    #[test]
    fn body_uses_backend_field_names() {
        let args = InitiatePaymentReqArgs::try_new(" 15000.50 ", Some(PaymentMethod::BankTransfer))
            .unwrap();
        let body = serde_json::to_value(&args).unwrap();
        assert_eq!(
            body,
            serde_json::json!({"amount": 15000.5, "payment_method": "Bank Transfer"})
        );
    }

    #[test]
    fn upload_requires_selection() {
        assert_eq!(
            UploadImageReqArgs::try_new(None).unwrap_err(),
            ValidationError::MissingImage
        );
    }
}
