// src/db/property_repo.rs

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::{common::error::AppError, models::property::Property};

const DATA_FILE_NAME: &str = "imoveis.json";

// O repositório é a única porta de acesso aos dados dos imóveis.
// Cada mutação é uma "unidade de trabalho" completa: `load` do documento
// inteiro, alteração em memória, `save` do documento inteiro.
// Não há lock: com dois escritores simultâneos, o último a salvar vence.
#[async_trait]
pub trait PropertyRepository: Send + Sync {
    async fn load(&self) -> Result<Vec<Property>, AppError>;

    async fn save(&self, properties: &[Property]) -> Result<(), AppError>;
}

// Formato do arquivo: { "imoveis": [ ... ] }
#[derive(Debug, Default, Serialize, Deserialize)]
struct PropertyDocument {
    imoveis: Vec<Property>,
}

#[derive(Debug, Clone)]
pub struct JsonFileRepository {
    data_dir: PathBuf,
    file_path: PathBuf,
}

impl JsonFileRepository {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        let data_dir = data_dir.into();
        let file_path = data_dir.join(DATA_FILE_NAME);
        Self { data_dir, file_path }
    }

    pub fn file_path(&self) -> &Path {
        &self.file_path
    }

    /// Cria a pasta e o arquivo (com a coleção vazia) se ainda não existirem.
    async fn ensure_data_file(&self) -> Result<(), AppError> {
        if !tokio::fs::try_exists(&self.data_dir).await? {
            tokio::fs::create_dir_all(&self.data_dir).await?;
            tracing::info!("📁 Pasta {} criada", self.data_dir.display());
        }

        if !tokio::fs::try_exists(&self.file_path).await? {
            self.write_document(&PropertyDocument::default()).await?;
            tracing::info!("📄 Arquivo {} criado", self.file_path.display());
        }

        Ok(())
    }

    async fn write_document(&self, document: &PropertyDocument) -> Result<(), AppError> {
        let json = serde_json::to_string_pretty(document)?;
        tokio::fs::write(&self.file_path, json).await?;
        Ok(())
    }
}

#[async_trait]
impl PropertyRepository for JsonFileRepository {
    async fn load(&self) -> Result<Vec<Property>, AppError> {
        self.ensure_data_file().await?;

        let raw = tokio::fs::read_to_string(&self.file_path).await?;
        let document: PropertyDocument = serde_json::from_str(&raw)?;
        Ok(document.imoveis)
    }

    async fn save(&self, properties: &[Property]) -> Result<(), AppError> {
        self.ensure_data_file().await?;

        // Reescreve o documento inteiro; não existe escrita incremental.
        let document = PropertyDocument { imoveis: properties.to_vec() };
        self.write_document(&document).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::property::NewProperty;
    use chrono::Utc;
    use tempfile::tempdir;

    fn sample(id: u64) -> Property {
        NewProperty {
            tipo: "casa".into(),
            transacao: "venda".into(),
            cidade: "Muriaé".into(),
            bairro: "Centro".into(),
            preco: 250000.0,
            ..Default::default()
        }
        .into_property(id, 0, Utc::now())
    }

    #[tokio::test]
    async fn first_access_creates_directory_and_empty_document() {
        let dir = tempdir().unwrap();
        let repo = JsonFileRepository::new(dir.path().join("data"));

        assert!(repo.load().await.unwrap().is_empty());

        let raw = std::fs::read_to_string(repo.file_path()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(value, serde_json::json!({ "imoveis": [] }));
    }

    #[tokio::test]
    async fn save_rewrites_the_whole_document() {
        let dir = tempdir().unwrap();
        let repo = JsonFileRepository::new(dir.path());

        repo.save(&[sample(1), sample(2)]).await.unwrap();
        repo.save(&[sample(2)]).await.unwrap();

        let loaded = repo.load().await.unwrap();
        assert_eq!(loaded.iter().map(|p| p.id).collect::<Vec<_>>(), vec![2]);
    }

    #[tokio::test]
    async fn document_is_pretty_printed_with_camel_case_timestamp() {
        let dir = tempdir().unwrap();
        let repo = JsonFileRepository::new(dir.path());
        repo.save(&[sample(1)]).await.unwrap();

        let raw = std::fs::read_to_string(repo.file_path()).unwrap();
        assert!(raw.starts_with("{\n  \"imoveis\": ["));
        assert!(raw.contains("\"createdAt\""));
        assert!(raw.contains("\"vagas_garagem\""));
    }

    #[tokio::test]
    async fn corrupt_document_is_an_error() {
        let dir = tempdir().unwrap();
        let repo = JsonFileRepository::new(dir.path());
        std::fs::write(repo.file_path(), "{ not json").unwrap();

        let err = repo.load().await.unwrap_err();
        assert!(matches!(err, AppError::SerializationError(_)));
    }
}
