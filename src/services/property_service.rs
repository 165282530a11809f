// src/services/property_service.rs

use std::sync::Arc;

use chrono::Utc;

use crate::{
    common::error::AppError,
    db::PropertyRepository,
    models::property::{
        NewProperty, OrderEntry, Property, PropertyFilter, PropertyPatch, PropertyStats,
    },
};

#[derive(Clone)]
pub struct PropertyService {
    repo: Arc<dyn PropertyRepository>,
}

impl PropertyService {
    pub fn new(repo: Arc<dyn PropertyRepository>) -> Self {
        Self { repo }
    }

    // ---
    // Leituras: falham "suave". Se o arquivo não puder ser lido, logamos
    // e devolvemos a coleção vazia em vez de derrubar a página.
    // ---

    /// Todos os imóveis, na ordem em que estão gravados.
    pub async fn list(&self) -> Vec<Property> {
        match self.repo.load().await {
            Ok(properties) => properties,
            Err(e) => {
                tracing::error!("Erro ao ler imóveis: {}", e);
                Vec::new()
            }
        }
    }

    pub async fn get_by_id(&self, id: u64) -> Option<Property> {
        self.list().await.into_iter().find(|p| p.id == id)
    }

    pub async fn filter(&self, criteria: &PropertyFilter) -> Vec<Property> {
        let mut properties = self.list().await;
        properties.retain(|p| criteria.matches(p));
        properties
    }

    pub async fn stats(&self) -> PropertyStats {
        PropertyStats::from_properties(self.list().await)
    }

    // ---
    // Escritas: leitura estrita. Um documento corrompido é erro; nunca
    // sobrescrevemos o arquivo a partir de uma leitura que falhou.
    // ---

    pub async fn add(&self, new_property: NewProperty) -> Result<Property, AppError> {
        let mut properties = self.repo.load().await?;

        let id = match properties.iter().map(|p| p.id).max() {
            Some(max) => max.checked_add(1).ok_or(AppError::IdExhausted(max))?,
            None => 1,
        };
        let ordem = properties.len() as i64;
        let property = new_property.into_property(id, ordem, Utc::now());

        properties.push(property.clone());
        self.repo.save(&properties).await?;

        tracing::info!(id, codigo = %property.codigo, "🏠 Imóvel cadastrado");
        Ok(property)
    }

    /// `Ok(None)` quando o id não existe.
    pub async fn update(&self, id: u64, patch: PropertyPatch) -> Result<Option<Property>, AppError> {
        let mut properties = self.repo.load().await?;

        let Some(property) = properties.iter_mut().find(|p| p.id == id) else {
            return Ok(None);
        };
        patch.apply_to(property);
        let updated = property.clone();

        self.repo.save(&properties).await?;
        Ok(Some(updated))
    }

    /// `Ok(false)` quando nenhum imóvel tinha esse id.
    pub async fn delete(&self, id: u64) -> Result<bool, AppError> {
        let mut properties = self.repo.load().await?;
        let before = properties.len();

        properties.retain(|p| p.id != id);
        if properties.len() == before {
            return Ok(false);
        }

        self.repo.save(&properties).await?;
        tracing::info!(id, "🗑️ Imóvel removido");
        Ok(true)
    }

    pub async fn increment_views(&self, id: u64) -> Result<bool, AppError> {
        let mut properties = self.repo.load().await?;

        let Some(property) = properties.iter_mut().find(|p| p.id == id) else {
            return Ok(false);
        };
        property.visualizacoes += 1;

        self.repo.save(&properties).await?;
        Ok(true)
    }

    /// Sobrescreve apenas o campo `ordem` dos ids informados (ids
    /// inexistentes são ignorados) e grava uma única vez.
    /// Retorna `false` só quando a leitura ou a gravação falham.
    pub async fn reorder(&self, entries: &[OrderEntry]) -> bool {
        let result: Result<(), AppError> = async {
            let mut properties = self.repo.load().await?;

            for entry in entries {
                if let Some(property) = properties.iter_mut().find(|p| p.id == entry.id) {
                    property.ordem = entry.ordem;
                }
            }

            self.repo.save(&properties).await
        }
        .await;

        match result {
            Ok(()) => true,
            Err(e) => {
                tracing::error!("Erro ao atualizar ordem: {}", e);
                false
            }
        }
    }
}
