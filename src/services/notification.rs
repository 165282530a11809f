// src/services/notification.rs

use async_trait::async_trait;
use serde_json::json;

use crate::{common::error::AppError, models::lead::Lead};

pub const RESEND_ENDPOINT: &str = "https://api.resend.com/emails";

// Quem é avisado quando chega um lead. O repositório de imóveis não
// participa disso.
#[async_trait]
pub trait LeadNotifier: Send + Sync {
    async fn notify(&self, lead: &Lead) -> Result<(), AppError>;
}

// ---
// Envio real de e-mail via API do Resend
// ---
#[derive(Clone)]
pub struct ResendNotifier {
    client: reqwest::Client,
    endpoint: String,
    api_key: String,
    from: String,
    to: Vec<String>,
}

impl ResendNotifier {
    pub fn new(api_key: String, from: String, to: Vec<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint: RESEND_ENDPOINT.to_string(),
            api_key,
            from,
            to,
        }
    }

    /// Mesmo envio, para outro endereço (testes ou um proxy).
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }
}

#[async_trait]
impl LeadNotifier for ResendNotifier {
    async fn notify(&self, lead: &Lead) -> Result<(), AppError> {
        let body = json!({
            "from": self.from,
            "to": self.to,
            "subject": subject(lead),
            "html": render_html(lead),
        });

        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| AppError::NotificationError(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            return Err(AppError::NotificationError(format!(
                "Resend respondeu {}: {}",
                status, detail
            )));
        }

        tracing::info!(imovel_id = lead.imovel_id, "📧 E-mail de lead enviado");
        Ok(())
    }
}

// ---
// Sem chave de API: apenas registra o lead no log
// ---
#[derive(Debug, Clone, Default)]
pub struct LogNotifier;

#[async_trait]
impl LeadNotifier for LogNotifier {
    async fn notify(&self, lead: &Lead) -> Result<(), AppError> {
        tracing::info!(
            imovel_id = lead.imovel_id,
            nome = %lead.nome,
            email = %lead.email,
            telefone = lead.telefone.as_deref().unwrap_or("-"),
            "📨 Novo lead recebido (envio de e-mail desativado)"
        );
        Ok(())
    }
}

pub fn subject(lead: &Lead) -> String {
    format!("🏡 Novo Interesse: {} em {}", lead.imovel_tipo, lead.imovel_bairro)
}

fn escape_html(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

fn info_box(label: &str, value: &str) -> String {
    format!(
        r#"<div class="info-box"><div class="label">{}</div><div class="value">{}</div></div>"#,
        label, value
    )
}

/// Corpo HTML do e-mail. Todo texto vindo do formulário é escapado.
pub fn render_html(lead: &Lead) -> String {
    let email = escape_html(&lead.email);
    let mut boxes = vec![
        info_box("Nome Completo", &escape_html(&lead.nome)),
        info_box("E-mail", &format!(r#"<a href="mailto:{0}">{0}</a>"#, email)),
    ];
    if let Some(telefone) = &lead.telefone {
        let telefone = escape_html(telefone);
        boxes.push(info_box("Telefone", &format!(r#"<a href="tel:{0}">{0}</a>"#, telefone)));
    }
    if let Some(mensagem) = &lead.mensagem {
        boxes.push(info_box("Mensagem", &escape_html(mensagem)));
    }

    format!(
        r#"<!DOCTYPE html>
<html>
  <body style="font-family: Arial, sans-serif; color: #333;">
    <h1>🏡 Novo Lead Recebido!</h1>
    <p>Um cliente demonstrou interesse em um imóvel</p>
    <div class="imovel-info">
      <h2>Imóvel de Interesse</h2>
      <p><strong>Tipo:</strong> {tipo}</p>
      <p><strong>Localização:</strong> {bairro}, {cidade}</p>
      <p><strong>ID:</strong> #{id}</p>
    </div>
    <h3>📋 Dados do Cliente</h3>
    {boxes}
    <p>Este e-mail foi enviado automaticamente pelo sistema da imobiliária</p>
    <p>Data: {data}</p>
  </body>
</html>"#,
        tipo = escape_html(&lead.imovel_tipo),
        bairro = escape_html(&lead.imovel_bairro),
        cidade = escape_html(&lead.imovel_cidade),
        id = lead.imovel_id,
        boxes = boxes.join("\n    "),
        data = lead.received_at.format("%d/%m/%Y às %H:%M:%S"),
    )
}
