// src/handlers/leads.rs

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};

use crate::{
    common::error::{ApiError, AppError},
    config::AppState,
    handlers::properties::SuccessResponse,
    middleware::i18n::Locale,
    models::lead::LeadPayload,
};

// POST /api/leads
#[utoipa::path(
    post,
    path = "/api/leads",
    tag = "Leads",
    request_body = LeadPayload,
    responses(
        (status = 200, description = "Interesse enviado à imobiliária", body = SuccessResponse),
        (status = 400, description = "Campos obrigatórios: nome, email e imovel_id"),
        (status = 500, description = "Falha no envio do e-mail")
    )
)]
pub async fn create_lead(
    State(app_state): State<AppState>,
    locale: Locale,
    payload: Result<Json<LeadPayload>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {

    let Json(payload) = payload
        .map_err(|e| AppError::from(e).to_api_error(&locale, &app_state.i18n_store))?;

    // A validação acontece dentro do serviço, antes de notificar.
    app_state
        .lead_service
        .submit(payload)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    let message = app_state.i18n_store.translate(&locale.0, "lead_sent");
    Ok((StatusCode::OK, Json(SuccessResponse { success: true, message: Some(message) })))
}
