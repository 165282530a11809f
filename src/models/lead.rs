// src/models/lead.rs

use chrono::{DateTime, Utc};
use serde::Deserialize;
use utoipa::ToSchema;
use validator::Validate;

use crate::common::{error::AppError, serde_utils};

// Formulário "Tenho interesse" da página de detalhes do imóvel.
// Os nomes dos campos são os que o frontend já envia.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct LeadPayload {
    #[serde(default, deserialize_with = "serde_utils::optional_u64")]
    #[validate(
        required(message = "O campo 'imovel_id' é obrigatório."),
        range(min = 1, message = "O campo 'imovel_id' deve ser um id de imóvel válido.")
    )]
    #[schema(example = 1)]
    pub imovel_id: Option<u64>,

    #[schema(example = "casa")]
    pub imovel_tipo: Option<String>,

    #[schema(example = "Centro")]
    pub imovel_bairro: Option<String>,

    #[schema(example = "Muriaé")]
    pub imovel_cidade: Option<String>,

    #[validate(
        required(message = "O campo 'nome' é obrigatório."),
        length(min = 1, message = "O nome é obrigatório.")
    )]
    #[schema(example = "Maria Silva")]
    pub nome: Option<String>,

    #[validate(
        required(message = "O campo 'email' é obrigatório."),
        email(message = "O e-mail fornecido é inválido.")
    )]
    #[schema(example = "maria@exemplo.com")]
    pub email: Option<String>,

    #[schema(example = "(32) 99999-8888")]
    pub telefone: Option<String>,

    pub mensagem: Option<String>,
}

/// Um lead já validado, pronto para ser notificado.
#[derive(Debug, Clone, PartialEq)]
pub struct Lead {
    pub imovel_id: u64,
    pub imovel_tipo: String,
    pub imovel_bairro: String,
    pub imovel_cidade: String,
    pub nome: String,
    pub email: String,
    pub telefone: Option<String>,
    pub mensagem: Option<String>,
    pub received_at: DateTime<Utc>,
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

impl LeadPayload {
    pub fn into_lead(self) -> Result<Lead, AppError> {
        self.validate()?;

        Ok(Lead {
            imovel_id: self.imovel_id.unwrap_or_default(),
            imovel_tipo: self.imovel_tipo.unwrap_or_default(),
            imovel_bairro: self.imovel_bairro.unwrap_or_default(),
            imovel_cidade: self.imovel_cidade.unwrap_or_default(),
            nome: self.nome.unwrap_or_default(),
            email: self.email.unwrap_or_default(),
            telefone: non_blank(self.telefone),
            mensagem: non_blank(self.mensagem),
            received_at: Utc::now(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn payload(json: &str) -> LeadPayload {
        serde_json::from_str(json).expect("JSON de teste inválido")
    }

    #[test]
    fn valid_payload_becomes_a_lead() {
        let lead = payload(
            r#"{"imovel_id": "3", "imovel_tipo": "casa", "nome": "Ana",
                "email": "ana@exemplo.com", "telefone": ""}"#,
        )
        .into_lead()
        .unwrap();

        assert_eq!(lead.imovel_id, 3);
        assert_eq!(lead.imovel_tipo, "casa");
        assert_eq!(lead.telefone, None);
        assert_eq!(lead.imovel_bairro, "");
    }

    #[test]
    fn missing_required_fields_are_reported_per_field() {
        let err = payload(r#"{"email": "not-an-email"}"#).into_lead().unwrap_err();

        let errors = match err {
            AppError::ValidationError(errors) => errors,
            other => panic!("esperado erro de validação, veio {other:?}"),
        };
        let fields = errors.field_errors();
        assert!(fields.contains_key("nome"));
        assert!(fields.contains_key("email"));
        assert!(fields.contains_key("imovel_id"));
    }

    #[test]
    fn zero_property_id_is_rejected() {
        let err = payload(r#"{"imovel_id": 0, "nome": "Ana", "email": "ana@exemplo.com"}"#)
            .into_lead()
            .unwrap_err();

        let errors = match err {
            AppError::ValidationError(errors) => errors,
            other => panic!("esperado erro de validação, veio {other:?}"),
        };
        let fields = errors.field_errors();
        assert_eq!(fields.len(), 1);
        assert!(fields.contains_key("imovel_id"));
    }
}
