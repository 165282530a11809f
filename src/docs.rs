// src/docs.rs

use utoipa::OpenApi;

use crate::handlers;
use crate::models;

#[derive(OpenApi)]
#[openapi(
    paths(
        // --- Imóveis ---
        handlers::properties::list_properties,
        handlers::properties::create_property,
        handlers::properties::get_property,
        handlers::properties::update_property,
        handlers::properties::delete_property,
        handlers::properties::register_view,
        handlers::properties::reorder_properties,
        handlers::properties::get_stats,

        // --- Leads ---
        handlers::leads::create_lead,
    ),
    components(
        schemas(
            // --- Imóveis ---
            models::property::Property,
            models::property::OrderEntry,
            models::property::PropertyStats,

            // --- Payloads / Respostas ---
            handlers::properties::CreatePropertyPayload,
            handlers::properties::UpdatePropertyPayload,
            handlers::properties::ReorderPayload,
            handlers::properties::PropertyListResponse,
            handlers::properties::PropertyResponse,
            handlers::properties::PropertySavedResponse,
            handlers::properties::SuccessResponse,

            // --- Leads ---
            models::lead::LeadPayload,
        )
    ),
    tags(
        (name = "Imóveis", description = "Catálogo, busca, cadastro e destaques"),
        (name = "Leads", description = "Formulário de interesse em um imóvel")
    )
)]
pub struct ApiDoc;
