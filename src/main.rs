//src/main.rs

use axum::{
    routing::{get, post, put},
    Router,
};
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

mod common;
mod config;
mod db;
mod docs;
mod handlers;
mod middleware;
mod models;
mod services;

use crate::config::{AppState, Config};

fn build_router(app_state: AppState) -> Router {
    // Rotas do catálogo e do painel administrativo
    let property_routes: Router<AppState> = Router::new()
        .route("/api/imoveis"
               ,get(handlers::properties::list_properties)
               .post(handlers::properties::create_property)
        )
        .route("/api/imoveis/estatisticas"
               ,get(handlers::properties::get_stats)
        )
        .route("/api/imoveis/ordem"
               ,put(handlers::properties::reorder_properties)
        )
        .route("/api/imoveis/{id}"
               ,get(handlers::properties::get_property)
               .put(handlers::properties::update_property)
               .delete(handlers::properties::delete_property)
        )
        .route("/api/imoveis/{id}/visualizar"
               ,post(handlers::properties::register_view)
        );

    // Combina tudo no router principal
    Router::new()
        .route("/api/health", get(|| async { "OK" }))
        .merge(property_routes)
        .route("/api/leads", post(handlers::leads::create_lead))
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", docs::ApiDoc::openapi()))
        .with_state(app_state)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Logger: nível controlado por RUST_LOG (padrão: info)
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .compact()
        .init();

    // Se a configuração falhar, a aplicação não deve iniciar.
    let config = Config::from_env()?;
    let app_state = AppState::new(&config)?;

    let app = build_router(app_state);

    // Inicia o servidor
    let listener = TcpListener::bind(&config.bind_addr).await?;
    tracing::info!("🚀 Servidor escutando em {}", listener.local_addr()?);
    axum::serve(listener, app).await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        db::JsonFileRepository,
        services::{notification::LogNotifier, LeadService, PropertyService},
    };
    use std::sync::Arc;

    #[test]
    fn router_builds_without_route_conflicts() {
        let dir = tempfile::tempdir().unwrap();
        let state = AppState::from_parts(
            PropertyService::new(Arc::new(JsonFileRepository::new(dir.path()))),
            LeadService::new(Arc::new(LogNotifier)),
        );
        let _router = build_router(state);
    }
}
