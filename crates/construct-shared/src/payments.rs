//! Payment records as returned by the backend
//!
//! Field names follow the backend serializers, aliases cover the older names
//! still produced by some deployments. Unknown fields are ignored.

use serde_aux::field_attributes::deserialize_number_from_string;
use std::fmt::Display;

use crate::id::RecordId;

pub type PaymentId = RecordId;

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(from = "String", into = "String")]
pub enum PaymentStatus {
    Completed,
    Pending,
    Failed,
    /// Any status the client does not know about, kept as sent
    Other(String),
}

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    serde::Serialize,
    serde::Deserialize,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
)]
pub enum PaymentMethod {
    #[serde(rename = "Credit Card")]
    #[strum(serialize = "Credit Card")]
    CreditCard,
    #[serde(rename = "Debit Card")]
    #[strum(serialize = "Debit Card")]
    DebitCard,
    #[serde(rename = "Bank Transfer")]
    #[strum(serialize = "Bank Transfer")]
    BankTransfer,
    #[serde(rename = "Mobile Money")]
    #[strum(serialize = "Mobile Money")]
    MobileMoney,
}

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct PaymentSummary {
    pub id: PaymentId,
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub amount: f64,
    #[serde(alias = "payment_method", default)]
    pub method: String,
    pub status: PaymentStatus,
    #[serde(alias = "payment_date", default)]
    pub date: String,
    #[serde(alias = "paystackRef", alias = "paystack_reference", default)]
    pub reference: Option<String>,
}

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Transaction {
    pub id: RecordId,
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub amount: f64,
    #[serde(alias = "transaction_date", default)]
    pub date: String,
    pub status: String,
    #[serde(default)]
    pub charge_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ProjectRef {
    pub id: RecordId,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct UserRef {
    pub id: RecordId,
    pub username: String,
}

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct PaymentDetail {
    pub id: PaymentId,
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub amount: f64,
    #[serde(alias = "payment_method", default)]
    pub method: String,
    pub status: PaymentStatus,
    #[serde(alias = "payment_date", default)]
    pub date: String,
    #[serde(default)]
    pub description: String,
    #[serde(alias = "paystack_reference", alias = "paystackRef", default)]
    pub reference: Option<String>,
    #[serde(default)]
    pub currency: Option<String>,
    #[serde(default)]
    pub transactions: Vec<Transaction>,
    #[serde(default)]
    pub project: Option<ProjectRef>,
    #[serde(default)]
    pub user: Option<UserRef>,
}

/// Answer to a payment initiation
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct PaymentInitiated {
    pub id: PaymentId,
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub amount: f64,
    #[serde(alias = "payment_method", default)]
    pub method: String,
    pub status: PaymentStatus,
    #[serde(alias = "payment_date", default)]
    pub date: String,
    /// Where the user completes the payment, not every backend provides it
    #[serde(alias = "paystack_authorization_url", default)]
    pub authorization_url: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

impl From<String> for PaymentStatus {
    fn from(value: String) -> Self {
        match value.as_str() {
            "Completed" => Self::Completed,
            "Pending" => Self::Pending,
            "Failed" => Self::Failed,
            _ => Self::Other(value),
        }
    }
}

impl From<PaymentStatus> for String {
    fn from(value: PaymentStatus) -> Self {
        value.to_string()
    }
}

impl Display for PaymentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PaymentStatus::Completed => write!(f, "Completed"),
            PaymentStatus::Pending => write!(f, "Pending"),
            PaymentStatus::Failed => write!(f, "Failed"),
            PaymentStatus::Other(status) => write!(f, "{status}"),
        }
    }
}

impl PaymentStatus {
    /// Returns `true` if the payment status is [`Pending`].
    ///
    /// [`Pending`]: PaymentStatus::Pending
    #[must_use]
    pub fn is_pending(&self) -> bool {
        matches!(self, Self::Pending)
    }
}

impl From<&PaymentDetail> for PaymentSummary {
    fn from(value: &PaymentDetail) -> Self {
        Self {
            id: value.id,
            amount: value.amount,
            method: value.method.clone(),
            status: value.status.clone(),
            date: value.date.clone(),
            reference: value.reference.clone(),
        }
    }
}

impl From<&PaymentInitiated> for PaymentSummary {
    fn from(value: &PaymentInitiated) -> Self {
        Self {
            id: value.id,
            amount: value.amount,
            method: value.method.clone(),
            status: value.status.clone(),
            date: value.date.clone(),
            reference: None,
        }
    }
}
