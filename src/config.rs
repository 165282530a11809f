// src/config.rs

use std::{env, path::PathBuf, sync::Arc};

use anyhow::Context;

use crate::{
    common::i18n::I18nStore,
    db::JsonFileRepository,
    services::{
        notification::{LeadNotifier, LogNotifier, ResendNotifier},
        LeadService, PropertyService,
    },
};

const DEFAULT_DATA_DIR: &str = "data";
const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";
const DEFAULT_LEAD_FROM: &str = "Imobiliária <onboarding@resend.dev>";

// Configurações lidas do ambiente (.env)
#[derive(Debug, Clone)]
pub struct Config {
    pub data_dir: PathBuf,
    pub bind_addr: String,
    pub resend_api_key: Option<String>,
    pub lead_email_from: String,
    pub lead_email_to: Vec<String>,
}

fn optional_var(name: &str) -> Option<String> {
    env::var(name).ok().filter(|v| !v.trim().is_empty())
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let config = Self {
            data_dir: optional_var("DATA_DIR")
                .unwrap_or_else(|| DEFAULT_DATA_DIR.to_string())
                .into(),
            bind_addr: optional_var("BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string()),
            resend_api_key: optional_var("RESEND_API_KEY"),
            lead_email_from: optional_var("LEAD_EMAIL_FROM")
                .unwrap_or_else(|| DEFAULT_LEAD_FROM.to_string()),
            lead_email_to: optional_var("LEAD_EMAIL_TO")
                .map(|v| v.split(',').map(|s| s.trim().to_string()).filter(|s| !s.is_empty()).collect())
                .unwrap_or_default(),
        };

        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> anyhow::Result<()> {
        if self.resend_api_key.is_some() && self.lead_email_to.is_empty() {
            anyhow::bail!("LEAD_EMAIL_TO deve ser definido quando RESEND_API_KEY estiver presente");
        }
        Ok(())
    }
}

#[derive(Clone)]
pub struct AppState {
    pub property_service: PropertyService,
    pub lead_service: LeadService,
    pub i18n_store: Arc<I18nStore>,
}

impl AppState {
    pub fn new(config: &Config) -> anyhow::Result<Self> {
        config.validate().context("Configuração inválida")?;

        // --- Monta o gráfico de dependências ---
        let repo = JsonFileRepository::new(config.data_dir.clone());
        tracing::info!("✅ Dados dos imóveis em {}", repo.file_path().display());

        let notifier: Arc<dyn LeadNotifier> = match &config.resend_api_key {
            Some(api_key) => {
                tracing::info!("📧 Envio de leads por e-mail (Resend) ativado");
                Arc::new(ResendNotifier::new(
                    api_key.clone(),
                    config.lead_email_from.clone(),
                    config.lead_email_to.clone(),
                ))
            }
            None => {
                tracing::warn!("RESEND_API_KEY ausente: leads serão apenas registrados no log");
                Arc::new(LogNotifier)
            }
        };

        Ok(Self::from_parts(
            PropertyService::new(Arc::new(repo)),
            LeadService::new(notifier),
        ))
    }

    pub fn from_parts(property_service: PropertyService, lead_service: LeadService) -> Self {
        Self {
            property_service,
            lead_service,
            i18n_store: Arc::new(I18nStore::new()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> Config {
        Config {
            data_dir: "data".into(),
            bind_addr: DEFAULT_BIND_ADDR.into(),
            resend_api_key: None,
            lead_email_from: DEFAULT_LEAD_FROM.into(),
            lead_email_to: Vec::new(),
        }
    }

    #[test]
    fn api_key_requires_a_recipient() {
        let mut cfg = config();
        assert!(cfg.validate().is_ok());

        cfg.resend_api_key = Some("re_123".into());
        assert!(cfg.validate().is_err());
        assert!(AppState::new(&cfg).is_err());

        cfg.lead_email_to = vec!["contato@imobiliaria.com".into()];
        assert!(cfg.validate().is_ok());
    }
}
