use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use std::sync::Arc;
use crate::api::dtos::{
    requests::{GoToStepRequest, OpenCheckoutRequest, SelectPaymentMethodRequest},
    responses::{CheckoutResponse, PaymentResponse},
};
use crate::api::extractors::payload::AppJson;
use crate::domain::models::checkout::{CheckoutStep, ReceiverData};
use crate::error::AppError;
use crate::state::AppState;

pub async fn open_checkout(
    State(state): State<Arc<AppState>>,
    AppJson(payload): AppJson<OpenCheckoutRequest>,
) -> Result<impl IntoResponse, AppError> {
    let session = state
        .checkout_service
        .open(&payload.event_id, payload.ticket_type, payload.quantity.unwrap_or(1))
        .await?;
    Ok((StatusCode::CREATED, Json(CheckoutResponse::from(session))))
}

pub async fn get_checkout(
    State(state): State<Arc<AppState>>,
    Path(checkout_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let session = state.checkout_service.get(&checkout_id).await?;
    Ok(Json(CheckoutResponse::from(session)))
}

pub async fn submit_receiver(
    State(state): State<Arc<AppState>>,
    Path(checkout_id): Path<String>,
    AppJson(payload): AppJson<ReceiverData>,
) -> Result<impl IntoResponse, AppError> {
    let session = state.checkout_service.submit_receiver(&checkout_id, payload).await?;
    Ok(Json(CheckoutResponse::from(session)))
}

pub async fn select_payment_method(
    State(state): State<Arc<AppState>>,
    Path(checkout_id): Path<String>,
    AppJson(payload): AppJson<SelectPaymentMethodRequest>,
) -> Result<impl IntoResponse, AppError> {
    let session = state.checkout_service.select_method(&checkout_id, payload.method).await?;
    Ok(Json(CheckoutResponse::from(session)))
}

pub async fn submit_payment(
    State(state): State<Arc<AppState>>,
    Path(checkout_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let (session, outcome) = state.checkout_service.submit_payment(&checkout_id).await?;
    Ok(Json(PaymentResponse { outcome, checkout: session.into() }))
}

pub async fn confirm_pix(
    State(state): State<Arc<AppState>>,
    Path(checkout_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let session = state.checkout_service.confirm_pix(&checkout_id).await?;
    Ok(Json(CheckoutResponse::from(session)))
}

pub async fn go_to_step(
    State(state): State<Arc<AppState>>,
    Path(checkout_id): Path<String>,
    AppJson(payload): AppJson<GoToStepRequest>,
) -> Result<impl IntoResponse, AppError> {
    let step = CheckoutStep::from_number(payload.step)
        .ok_or_else(|| AppError::Validation("Step must be 1, 2 or 3".into()))?;
    let session = state.checkout_service.go_to_step(&checkout_id, step).await?;
    Ok(Json(CheckoutResponse::from(session)))
}
