use std::sync::Arc;
use chrono::{DateTime, Duration, Utc};
use rand::{distributions::Alphanumeric, Rng};
use tracing::info;
use crate::domain::{
    models::{
        attendee::{Attendee, NewAttendeeParams, PaymentStatus},
        checkout::{CheckoutSession, CheckoutStatus, CheckoutStep, PaymentMethod, PaymentOutcome, ReceiverData},
        event::{Event, EventStatus},
    },
    ports::{CheckoutRepository, EventRepository},
    services::{analytics::DEFAULT_TICKET_PRICE, forms::validate_receiver},
};
use crate::error::AppError;

const PIX_CODE_LEN: usize = 32;
const PIX_QR_BASE_URL: &str = "https://pix.example.com/qr/";
pub const DEFAULT_TICKET_TYPE: &str = "General";

/// Seats left for new registrations; `None` when the event is unlimited.
pub fn remaining_capacity(event: &Event) -> Option<i32> {
    event.attendee_limit.map(|limit| (limit - event.registered_attendees).max(0))
}

pub fn open_checkout(event: &Event, ticket_type: Option<String>, quantity: i32) -> Result<CheckoutSession, AppError> {
    if quantity < 1 {
        return Err(AppError::Validation("Quantity must be at least 1".into()));
    }
    if event.status != EventStatus::Active {
        return Err(AppError::Conflict("Event is not open for sales".into()));
    }
    if !event.accepting_registrations {
        return Err(AppError::Conflict("Event is not accepting registrations".into()));
    }
    if let Some(left) = remaining_capacity(event) && left < quantity {
        return Err(AppError::Conflict(format!("Only {} tickets left", left)));
    }

    let ticket_type = ticket_type
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty())
        .unwrap_or_else(|| DEFAULT_TICKET_TYPE.to_string());
    let unit_price = event.ticket_price.unwrap_or(DEFAULT_TICKET_PRICE);

    Ok(CheckoutSession::new(event.id.clone(), ticket_type, quantity, unit_price))
}

fn require_step(session: &CheckoutSession, step: CheckoutStep) -> Result<(), AppError> {
    if session.step != step {
        return Err(AppError::Conflict(format!(
            "Checkout is on step {}, expected step {}",
            session.step.number(),
            step.number()
        )));
    }
    Ok(())
}

/// Step 1 -> 2.
pub fn submit_receiver(session: &mut CheckoutSession, receiver: ReceiverData, now: DateTime<Utc>) -> Result<(), AppError> {
    require_step(session, CheckoutStep::Receiver)?;
    validate_receiver(&receiver)?;

    session.receiver = ReceiverData {
        full_name: receiver.full_name.trim().to_string(),
        email: receiver.email.trim().to_string(),
        confirm_email: receiver.confirm_email.trim().to_string(),
    };
    session.step = CheckoutStep::Payment;
    session.updated_at = now;
    Ok(())
}

/// Switching method drops any QR generated for the previous choice.
pub fn select_method(session: &mut CheckoutSession, method: PaymentMethod, now: DateTime<Utc>) -> Result<(), AppError> {
    require_step(session, CheckoutStep::Payment)?;
    if session.payment.method != method {
        session.payment.method = method;
        clear_pix(session);
    }
    session.updated_at = now;
    Ok(())
}

fn clear_pix(session: &mut CheckoutSession) {
    session.payment.pix_code = None;
    session.payment.pix_qr_code_url = None;
    session.payment.pix_expires_at = None;
    session.qr_generated = false;
    session.status = CheckoutStatus::Initial;
}

fn generate_pix_code() -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(PIX_CODE_LEN)
        .map(char::from)
        .collect()
}

/// Card and boleto settle at once. PIX takes two submissions: the first
/// generates the QR, the second moves on with the payment still pending.
pub fn submit_payment(session: &mut CheckoutSession, now: DateTime<Utc>, pix_expiry_minutes: i64) -> Result<PaymentOutcome, AppError> {
    require_step(session, CheckoutStep::Payment)?;
    session.updated_at = now;

    match session.payment.method {
        PaymentMethod::CreditCard | PaymentMethod::Boleto => {
            session.status = CheckoutStatus::Succeeded;
            session.step = CheckoutStep::Confirmation;
            Ok(PaymentOutcome::Completed)
        }
        PaymentMethod::Pix if !session.qr_generated => {
            let code = generate_pix_code();
            session.payment.pix_qr_code_url = Some(format!("{}{}.png", PIX_QR_BASE_URL, code));
            session.payment.pix_code = Some(code);
            session.payment.pix_expires_at = Some(now + Duration::minutes(pix_expiry_minutes));
            session.qr_generated = true;
            session.status = CheckoutStatus::Processing;
            Ok(PaymentOutcome::QrGenerated)
        }
        PaymentMethod::Pix => {
            session.status = CheckoutStatus::Pending;
            session.step = CheckoutStep::Confirmation;
            Ok(PaymentOutcome::AwaitingPix)
        }
    }
}

/// Simulated PIX settlement. Valid once a QR exists on step 2, or for a
/// pending payment already on step 3.
pub fn confirm_pix(session: &mut CheckoutSession, now: DateTime<Utc>) -> Result<PaymentOutcome, AppError> {
    if session.payment.method != PaymentMethod::Pix {
        return Err(AppError::Conflict("Checkout is not paying with PIX".into()));
    }
    let ready = match session.step {
        CheckoutStep::Payment => session.qr_generated,
        CheckoutStep::Confirmation => session.status == CheckoutStatus::Pending,
        CheckoutStep::Receiver => false,
    };
    if !ready {
        return Err(AppError::Conflict("No PIX payment awaiting confirmation".into()));
    }

    session.status = CheckoutStatus::Succeeded;
    session.step = CheckoutStep::Confirmation;
    session.updated_at = now;
    Ok(PaymentOutcome::Completed)
}

/// Back-navigation only; forward moves go through the step actions.
pub fn go_to_step(session: &mut CheckoutSession, step: CheckoutStep, now: DateTime<Utc>) -> Result<(), AppError> {
    if step == session.step {
        return Ok(());
    }
    if step > session.step {
        return Err(AppError::Conflict("Cannot skip ahead; complete the current step first".into()));
    }
    if session.attendee_id.is_some() {
        return Err(AppError::Conflict("Checkout is already confirmed".into()));
    }
    if step == CheckoutStep::Receiver {
        clear_pix(session);
    }
    session.step = step;
    session.updated_at = now;
    Ok(())
}

/// The attendee a confirmed checkout registers for its receiver.
pub fn attendee_for(session: &CheckoutSession) -> Attendee {
    let payment_status = match session.status {
        CheckoutStatus::Succeeded => PaymentStatus::Paid,
        _ => PaymentStatus::Pending,
    };
    Attendee::new(NewAttendeeParams {
        event_id: session.event_id.clone(),
        full_name: session.receiver.full_name.clone(),
        email: session.receiver.email.clone(),
        ticket_type: session.ticket_type.clone(),
        ticket_price: session.total(),
        payment_status,
    })
}

pub struct CheckoutService {
    events: Arc<dyn EventRepository>,
    checkouts: Arc<dyn CheckoutRepository>,
    pix_expiry_minutes: i64,
}

impl CheckoutService {
    pub fn new(events: Arc<dyn EventRepository>, checkouts: Arc<dyn CheckoutRepository>, pix_expiry_minutes: i64) -> Self {
        Self { events, checkouts, pix_expiry_minutes }
    }

    pub async fn open(&self, event_id: &str, ticket_type: Option<String>, quantity: i32) -> Result<CheckoutSession, AppError> {
        let event = self.events.find_by_id(event_id).await?
            .ok_or_else(|| AppError::NotFound("Event not found".into()))?;
        let session = open_checkout(&event, ticket_type, quantity)?;
        let created = self.checkouts.create(&session).await?;
        info!(checkout_id = %created.id, event_id = %event.id, quantity, "checkout opened");
        Ok(created)
    }

    pub async fn get(&self, id: &str) -> Result<CheckoutSession, AppError> {
        self.checkouts.find_by_id(id).await?
            .ok_or_else(|| AppError::NotFound("Checkout not found".into()))
    }

    pub async fn submit_receiver(&self, id: &str, receiver: ReceiverData) -> Result<CheckoutSession, AppError> {
        let mut session = self.get(id).await?;
        submit_receiver(&mut session, receiver, Utc::now())?;
        self.checkouts.update(&session).await
    }

    pub async fn select_method(&self, id: &str, method: PaymentMethod) -> Result<CheckoutSession, AppError> {
        let mut session = self.get(id).await?;
        select_method(&mut session, method, Utc::now())?;
        self.checkouts.update(&session).await
    }

    pub async fn submit_payment(&self, id: &str) -> Result<(CheckoutSession, PaymentOutcome), AppError> {
        let mut session = self.get(id).await?;
        let outcome = submit_payment(&mut session, Utc::now(), self.pix_expiry_minutes)?;
        let saved = self.persist(session).await?;
        info!(checkout_id = %saved.id, ?outcome, "payment submitted");
        Ok((saved, outcome))
    }

    pub async fn confirm_pix(&self, id: &str) -> Result<CheckoutSession, AppError> {
        let mut session = self.get(id).await?;
        confirm_pix(&mut session, Utc::now())?;
        let saved = self.persist(session).await?;
        info!(checkout_id = %saved.id, "pix payment confirmed");
        Ok(saved)
    }

    pub async fn go_to_step(&self, id: &str, step: CheckoutStep) -> Result<CheckoutSession, AppError> {
        let mut session = self.get(id).await?;
        go_to_step(&mut session, step, Utc::now())?;
        self.checkouts.update(&session).await
    }

    /// Registers the attendee on first arrival at confirmation, settles it on
    /// a later PIX confirmation, otherwise just saves the session.
    async fn persist(&self, mut session: CheckoutSession) -> Result<CheckoutSession, AppError> {
        if session.step != CheckoutStep::Confirmation {
            return self.checkouts.update(&session).await;
        }
        match session.attendee_id.clone() {
            None => {
                let attendee = attendee_for(&session);
                session.attendee_id = Some(attendee.id.clone());
                let saved = self.checkouts.register_attendee(&session, &attendee).await?;
                info!(checkout_id = %saved.id, attendee_id = %attendee.id, status = %attendee.payment_status, "attendee registered");
                Ok(saved)
            }
            Some(attendee_id) if session.status == CheckoutStatus::Succeeded => {
                self.checkouts.settle_attendee(&session, &attendee_id).await
            }
            Some(_) => self.checkouts.update(&session).await,
        }
    }
}
