use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "snake_case")]
#[sqlx(rename_all = "snake_case")]
pub enum CheckoutStep {
    Receiver,
    Payment,
    Confirmation,
}

impl CheckoutStep {
    pub fn number(&self) -> u8 {
        match self {
            CheckoutStep::Receiver => 1,
            CheckoutStep::Payment => 2,
            CheckoutStep::Confirmation => 3,
        }
    }

    pub fn from_number(step: u8) -> Option<Self> {
        match step {
            1 => Some(CheckoutStep::Receiver),
            2 => Some(CheckoutStep::Payment),
            3 => Some(CheckoutStep::Confirmation),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "snake_case")]
#[sqlx(rename_all = "snake_case")]
pub enum PaymentMethod {
    CreditCard,
    Pix,
    Boleto,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "snake_case")]
#[sqlx(rename_all = "snake_case")]
pub enum CheckoutStatus {
    Initial,
    Processing,
    Succeeded,
    Pending,
    Failed,
}

#[derive(Debug, Serialize, Deserialize, FromRow, Clone, Default, PartialEq, Eq)]
#[serde(default)]
pub struct ReceiverData {
    pub full_name: String,
    pub email: String,
    pub confirm_email: String,
}

#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct PaymentData {
    pub method: PaymentMethod,
    pub pix_qr_code_url: Option<String>,
    pub pix_code: Option<String>,
    pub pix_expires_at: Option<DateTime<Utc>>,
}

impl Default for PaymentData {
    fn default() -> Self {
        Self {
            method: PaymentMethod::CreditCard,
            pix_qr_code_url: None,
            pix_code: None,
            pix_expires_at: None,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct CheckoutSession {
    pub id: String,
    pub event_id: String,
    pub ticket_type: String,
    pub quantity: i32,
    pub unit_price: f64,
    #[sqlx(flatten)]
    pub receiver: ReceiverData,
    #[sqlx(flatten)]
    pub payment: PaymentData,
    pub qr_generated: bool,
    pub step: CheckoutStep,
    pub status: CheckoutStatus,
    pub attendee_id: Option<String>,
    /// Row version; every save must match it and bumps it.
    #[serde(skip)]
    pub version: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl CheckoutSession {
    pub fn new(event_id: String, ticket_type: String, quantity: i32, unit_price: f64) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4().to_string(),
            event_id,
            ticket_type,
            quantity,
            unit_price,
            receiver: ReceiverData::default(),
            payment: PaymentData::default(),
            qr_generated: false,
            step: CheckoutStep::Receiver,
            status: CheckoutStatus::Initial,
            attendee_id: None,
            version: 0,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn total(&self) -> f64 {
        self.unit_price * f64::from(self.quantity)
    }
}

/// What a payment submission did to the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentOutcome {
    /// First PIX submission: a QR code was generated, still on the payment step.
    QrGenerated,
    /// Moved to confirmation with the payment awaiting PIX settlement.
    AwaitingPix,
    /// Moved to (or stayed on) confirmation with the payment settled.
    Completed,
}
