// src/common/error.rs

use std::collections::HashMap;

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::{common::i18n::I18nStore, middleware::i18n::Locale};

// Nosso tipo de erro de domínio. Não sabe nada de HTTP nem de idioma;
// a tradução para a resposta acontece em `to_api_error`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Erro de validação")]
    ValidationError(#[from] validator::ValidationErrors),

    #[error("ID inválido: '{0}'")]
    InvalidId(String),

    #[error("Imóvel {0} não encontrado")]
    PropertyNotFound(u64),

    #[error("Filtro '{field}' inválido: '{value}'")]
    InvalidFilter { field: &'static str, value: String },

    #[error("Corpo da requisição inválido: {0}")]
    InvalidPayload(#[from] JsonRejection),

    // Falhas de leitura/escrita do arquivo imoveis.json
    #[error("Erro de I/O no arquivo de dados: {0}")]
    StorageError(#[from] std::io::Error),

    #[error("Documento de dados inválido: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Falha ao enviar notificação: {0}")]
    NotificationError(String),

    #[error("Não há id disponível após {0}")]
    IdExhausted(u64),
}

// O erro "pronto para o cliente": status + mensagem já traduzida.
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
    pub details: Option<HashMap<String, Vec<String>>>,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
            details: None,
        }
    }
}

impl AppError {
    pub fn to_api_error(&self, locale: &Locale, i18n: &I18nStore) -> ApiError {
        let t = |key: &str| i18n.translate(&locale.0, key);

        match self {
            // Retorna todos os detalhes da validação, campo a campo.
            AppError::ValidationError(errors) => {
                let mut details = HashMap::new();
                for (field, field_errors) in errors.field_errors() {
                    let messages: Vec<String> = field_errors
                        .iter()
                        .map(|e| match &e.message {
                            Some(m) => m.to_string(),
                            None => e.code.to_string(),
                        })
                        .collect();
                    details.insert(field.to_string(), messages);
                }
                ApiError {
                    status: StatusCode::BAD_REQUEST,
                    message: t("validation_error"),
                    details: Some(details),
                }
            }
            AppError::InvalidId(_) => ApiError::new(StatusCode::BAD_REQUEST, t("invalid_id")),
            AppError::PropertyNotFound(_) => {
                ApiError::new(StatusCode::NOT_FOUND, t("property_not_found"))
            }
            AppError::InvalidFilter { field, .. } => ApiError::new(
                StatusCode::BAD_REQUEST,
                format!("{}: {}", t("invalid_filter"), field),
            ),
            AppError::InvalidPayload(rejection) => {
                tracing::warn!("Payload rejeitado: {}", rejection.body_text());
                ApiError::new(StatusCode::BAD_REQUEST, t("invalid_payload"))
            }
            AppError::NotificationError(_) => {
                tracing::error!("Erro ao enviar e-mail: {}", self);
                ApiError::new(StatusCode::INTERNAL_SERVER_ERROR, t("request_failed"))
            }

            // Os erros de armazenamento (I/O, JSON) viram 500.
            // O `tracing` loga a mensagem detalhada; o cliente só vê a genérica.
            e => {
                tracing::error!("Erro Interno do Servidor: {} ({:?})", e, e);
                ApiError::new(StatusCode::INTERNAL_SERVER_ERROR, t("internal_error"))
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = match self.details {
            Some(details) => json!({ "error": self.message, "details": details }),
            None => json!({ "error": self.message }),
        };
        (self.status, Json(body)).into_response()
    }
}
