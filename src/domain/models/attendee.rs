use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc};
use sqlx::FromRow;
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "snake_case")]
#[sqlx(rename_all = "snake_case")]
pub enum PaymentStatus {
    Paid,
    Pending,
    Cancelled,
}

impl PaymentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentStatus::Paid => "paid",
            PaymentStatus::Pending => "pending",
            PaymentStatus::Cancelled => "cancelled",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            PaymentStatus::Paid => "Paid",
            PaymentStatus::Pending => "Pending",
            PaymentStatus::Cancelled => "Cancelled",
        }
    }
}

impl fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PaymentStatus {
    type Err = String;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw {
            "paid" => Ok(PaymentStatus::Paid),
            "pending" => Ok(PaymentStatus::Pending),
            "cancelled" => Ok(PaymentStatus::Cancelled),
            other => Err(format!("unknown payment status '{}'", other)),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct Attendee {
    pub id: String,
    pub event_id: String,
    pub full_name: String,
    pub email: String,
    pub ticket_type: String,
    pub ticket_price: f64,
    pub payment_status: PaymentStatus,
    pub purchase_date: DateTime<Utc>,
}

pub struct NewAttendeeParams {
    pub event_id: String,
    pub full_name: String,
    pub email: String,
    pub ticket_type: String,
    pub ticket_price: f64,
    pub payment_status: PaymentStatus,
}

impl Attendee {
    pub fn new(params: NewAttendeeParams) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            event_id: params.event_id,
            full_name: params.full_name,
            email: params.email,
            ticket_type: params.ticket_type,
            ticket_price: params.ticket_price,
            payment_status: params.payment_status,
            purchase_date: Utc::now(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct AttendeeFormInput {
    #[serde(default)]
    pub full_name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub ticket_type: String,
    #[serde(default)]
    pub ticket_price: f64,
    pub payment_status: Option<PaymentStatus>,
    pub purchase_date: Option<DateTime<Utc>>,
}
