// src/handlers/properties.rs

use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::{
    common::{
        error::{ApiError, AppError},
        serde_utils,
    },
    config::AppState,
    middleware::i18n::Locale,
    models::property::{
        NewProperty, OrderEntry, Property, PropertyFilter, PropertyPatch, PropertyStats,
        RoomFilter, SortOrder,
    },
};

// ---
// Helpers de entrada
// ---

fn parse_id(raw: &str) -> Result<u64, AppError> {
    raw.trim()
        .parse::<u64>()
        .map_err(|_| AppError::InvalidId(raw.to_string()))
}

// Parâmetro de busca vazio ("?cidade=") conta como ausente.
fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

fn parse_price(field: &'static str, value: Option<String>) -> Result<Option<f64>, AppError> {
    non_blank(value)
        .map(|v| match v.trim().parse::<f64>() {
            Ok(n) if n.is_finite() => Ok(n),
            _ => Err(AppError::InvalidFilter { field, value: v }),
        })
        .transpose()
}

// ---
// Query: listagem / busca
// ---
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListPropertiesQuery {
    /// Tipo de transação (venda, aluguel, temporada)
    pub transacao: Option<String>,
    /// Categoria do imóvel (casa, apartamento, ...)
    pub tipo: Option<String>,
    /// Trecho do nome da cidade (sem diferenciar maiúsculas)
    pub cidade: Option<String>,
    /// Trecho do nome do bairro (sem diferenciar maiúsculas)
    pub bairro: Option<String>,
    /// Número exato de quartos, ou "5+" para cinco ou mais
    pub quartos: Option<String>,
    #[serde(rename = "precoMin")]
    pub preco_min: Option<String>,
    #[serde(rename = "precoMax")]
    pub preco_max: Option<String>,
    /// destaque | recente | menor-preco | maior-preco | mais-quartos
    pub ordenacao: Option<String>,
}

impl ListPropertiesQuery {
    fn into_criteria(self) -> Result<(PropertyFilter, SortOrder), AppError> {
        let quartos = non_blank(self.quartos)
            .map(|v| {
                v.parse::<RoomFilter>()
                    .map_err(|_| AppError::InvalidFilter { field: "quartos", value: v })
            })
            .transpose()?;

        let sort = non_blank(self.ordenacao)
            .map(|v| {
                v.parse::<SortOrder>()
                    .map_err(|_| AppError::InvalidFilter { field: "ordenacao", value: v })
            })
            .transpose()?
            .unwrap_or_default();

        let filter = PropertyFilter {
            transacao: non_blank(self.transacao),
            tipo: non_blank(self.tipo),
            cidade: non_blank(self.cidade),
            bairro: non_blank(self.bairro),
            quartos,
            preco_min: parse_price("precoMin", self.preco_min)?,
            preco_max: parse_price("precoMax", self.preco_max)?,
        };

        Ok((filter, sort))
    }
}

// ---
// Respostas
// ---
#[derive(Debug, Serialize, ToSchema)]
pub struct PropertyListResponse {
    pub imoveis: Vec<Property>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct PropertyResponse {
    pub imovel: Property,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct PropertySavedResponse {
    pub success: bool,
    pub imovel: Property,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct SuccessResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

// GET /api/imoveis
#[utoipa::path(
    get,
    path = "/api/imoveis",
    tag = "Imóveis",
    params(ListPropertiesQuery),
    responses(
        (status = 200, description = "Imóveis que atendem aos filtros", body = PropertyListResponse),
        (status = 400, description = "Filtro inválido")
    )
)]
pub async fn list_properties(
    State(app_state): State<AppState>,
    locale: Locale,
    Query(query): Query<ListPropertiesQuery>,
) -> Result<impl IntoResponse, ApiError> {

    let (filter, sort) = query
        .into_criteria()
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    let service = &app_state.property_service;
    let mut imoveis = if filter.is_empty() {
        service.list().await
    } else {
        service.filter(&filter).await
    };
    sort.sort(&mut imoveis);

    Ok((StatusCode::OK, Json(PropertyListResponse { imoveis })))
}

// ---
// Payload: CreateProperty
// ---
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreatePropertyPayload {
    #[validate(
        required(message = "O campo 'tipo' é obrigatório."),
        length(min = 1, message = "O campo 'tipo' é obrigatório.")
    )]
    #[schema(example = "casa")]
    pub tipo: Option<String>,

    #[validate(
        required(message = "O campo 'transacao' é obrigatório."),
        length(min = 1, message = "O campo 'transacao' é obrigatório.")
    )]
    #[schema(example = "venda")]
    pub transacao: Option<String>,

    #[validate(
        required(message = "O campo 'cidade' é obrigatório."),
        length(min = 1, message = "O campo 'cidade' é obrigatório.")
    )]
    #[schema(example = "Muriaé")]
    pub cidade: Option<String>,

    #[validate(
        required(message = "O campo 'bairro' é obrigatório."),
        length(min = 1, message = "O campo 'bairro' é obrigatório.")
    )]
    #[schema(example = "Centro")]
    pub bairro: Option<String>,

    pub rua: Option<String>,

    #[serde(default, deserialize_with = "serde_utils::optional_u32")]
    #[schema(example = 3)]
    pub quartos: Option<u32>,

    #[serde(default, deserialize_with = "serde_utils::optional_u32")]
    pub banheiro: Option<u32>,

    #[serde(default, deserialize_with = "serde_utils::optional_u32")]
    pub vagas_garagem: Option<u32>,

    /// Se vazio, o servidor gera `IM` + id (IM0001)
    pub codigo: Option<String>,

    #[serde(default, deserialize_with = "serde_utils::optional_f64")]
    #[validate(
        required(message = "O campo 'preco' é obrigatório."),
        range(exclusive_min = 0.0, message = "O preço deve ser maior que zero.")
    )]
    #[schema(example = 250000.0)]
    pub preco: Option<f64>,

    pub descricao: Option<String>,

    /// URLs já enviadas ao CDN de imagens
    pub images: Option<Vec<String>>,
}

impl CreatePropertyPayload {
    fn into_new_property(self) -> NewProperty {
        NewProperty {
            tipo: self.tipo.unwrap_or_default(),
            transacao: self.transacao.unwrap_or_default(),
            cidade: self.cidade.unwrap_or_default(),
            bairro: self.bairro.unwrap_or_default(),
            rua: self.rua.unwrap_or_default(),
            quartos: self.quartos.unwrap_or_default(),
            banheiro: self.banheiro.unwrap_or_default(),
            vagas_garagem: self.vagas_garagem.unwrap_or_default(),
            codigo: self.codigo,
            preco: self.preco.unwrap_or_default(),
            descricao: self.descricao,
            images: self.images.unwrap_or_default(),
        }
    }
}

// POST /api/imoveis
#[utoipa::path(
    post,
    path = "/api/imoveis",
    tag = "Imóveis",
    request_body = CreatePropertyPayload,
    responses(
        (status = 201, description = "Imóvel cadastrado", body = PropertySavedResponse),
        (status = 400, description = "Campos obrigatórios faltando")
    )
)]
pub async fn create_property(
    State(app_state): State<AppState>,
    locale: Locale,
    payload: Result<Json<CreatePropertyPayload>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {

    let Json(payload) = payload
        .map_err(|e| AppError::from(e).to_api_error(&locale, &app_state.i18n_store))?;

    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale, &app_state.i18n_store))?;

    let imovel = app_state
        .property_service
        .add(payload.into_new_property())
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::CREATED, Json(PropertySavedResponse { success: true, imovel })))
}

// GET /api/imoveis/{id}
#[utoipa::path(
    get,
    path = "/api/imoveis/{id}",
    tag = "Imóveis",
    params(("id" = u64, Path, description = "ID do imóvel")),
    responses(
        (status = 200, description = "Imóvel encontrado", body = PropertyResponse),
        (status = 400, description = "ID inválido"),
        (status = 404, description = "Imóvel não encontrado")
    )
)]
pub async fn get_property(
    State(app_state): State<AppState>,
    locale: Locale,
    Path(raw_id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {

    let id = parse_id(&raw_id).map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    let imovel = app_state
        .property_service
        .get_by_id(id)
        .await
        .ok_or_else(|| AppError::PropertyNotFound(id).to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(PropertyResponse { imovel })))
}

// ---
// Payload: UpdateProperty (todos os campos opcionais)
// ---
#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
pub struct UpdatePropertyPayload {
    #[validate(length(min = 1, message = "O campo 'tipo' não pode ser vazio."))]
    pub tipo: Option<String>,

    #[validate(length(min = 1, message = "O campo 'transacao' não pode ser vazio."))]
    pub transacao: Option<String>,

    #[validate(length(min = 1, message = "O campo 'cidade' não pode ser vazio."))]
    pub cidade: Option<String>,

    #[validate(length(min = 1, message = "O campo 'bairro' não pode ser vazio."))]
    pub bairro: Option<String>,

    pub rua: Option<String>,

    #[serde(default, deserialize_with = "serde_utils::optional_u32")]
    pub quartos: Option<u32>,

    #[serde(default, deserialize_with = "serde_utils::optional_u32")]
    pub banheiro: Option<u32>,

    #[serde(default, deserialize_with = "serde_utils::optional_u32")]
    pub vagas_garagem: Option<u32>,

    pub codigo: Option<String>,

    #[serde(default, deserialize_with = "serde_utils::optional_f64")]
    #[validate(range(exclusive_min = 0.0, message = "O preço deve ser maior que zero."))]
    pub preco: Option<f64>,

    pub descricao: Option<String>,

    pub images: Option<Vec<String>>,

    #[serde(default, deserialize_with = "serde_utils::optional_u64")]
    pub visualizacoes: Option<u64>,

    #[serde(default, deserialize_with = "serde_utils::optional_i64")]
    pub ordem: Option<i64>,
}

impl From<UpdatePropertyPayload> for PropertyPatch {
    fn from(p: UpdatePropertyPayload) -> Self {
        PropertyPatch {
            tipo: p.tipo,
            transacao: p.transacao,
            cidade: p.cidade,
            bairro: p.bairro,
            rua: p.rua,
            quartos: p.quartos,
            banheiro: p.banheiro,
            vagas_garagem: p.vagas_garagem,
            codigo: p.codigo,
            preco: p.preco,
            descricao: p.descricao,
            images: p.images,
            visualizacoes: p.visualizacoes,
            ordem: p.ordem,
        }
    }
}

// PUT /api/imoveis/{id}
#[utoipa::path(
    put,
    path = "/api/imoveis/{id}",
    tag = "Imóveis",
    params(("id" = u64, Path, description = "ID do imóvel")),
    request_body = UpdatePropertyPayload,
    responses(
        (status = 200, description = "Imóvel atualizado", body = PropertySavedResponse),
        (status = 400, description = "ID ou dados inválidos"),
        (status = 404, description = "Imóvel não encontrado")
    )
)]
pub async fn update_property(
    State(app_state): State<AppState>,
    locale: Locale,
    Path(raw_id): Path<String>,
    payload: Result<Json<UpdatePropertyPayload>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {

    let id = parse_id(&raw_id).map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    let Json(payload) = payload
        .map_err(|e| AppError::from(e).to_api_error(&locale, &app_state.i18n_store))?;

    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale, &app_state.i18n_store))?;

    let imovel = app_state
        .property_service
        .update(id, payload.into())
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?
        .ok_or_else(|| AppError::PropertyNotFound(id).to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(PropertySavedResponse { success: true, imovel })))
}

// DELETE /api/imoveis/{id}
#[utoipa::path(
    delete,
    path = "/api/imoveis/{id}",
    tag = "Imóveis",
    params(("id" = u64, Path, description = "ID do imóvel")),
    responses(
        (status = 200, description = "Imóvel removido", body = SuccessResponse),
        (status = 404, description = "Imóvel não encontrado")
    )
)]
pub async fn delete_property(
    State(app_state): State<AppState>,
    locale: Locale,
    Path(raw_id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {

    let id = parse_id(&raw_id).map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    let deleted = app_state
        .property_service
        .delete(id)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    if !deleted {
        return Err(AppError::PropertyNotFound(id).to_api_error(&locale, &app_state.i18n_store));
    }

    let message = app_state.i18n_store.translate(&locale.0, "property_deleted");
    Ok((StatusCode::OK, Json(SuccessResponse { success: true, message: Some(message) })))
}

// POST /api/imoveis/{id}/visualizar
#[utoipa::path(
    post,
    path = "/api/imoveis/{id}/visualizar",
    tag = "Imóveis",
    params(("id" = u64, Path, description = "ID do imóvel")),
    responses(
        (status = 200, description = "Visualização registrada", body = SuccessResponse),
        (status = 404, description = "Imóvel não encontrado")
    )
)]
pub async fn register_view(
    State(app_state): State<AppState>,
    locale: Locale,
    Path(raw_id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {

    let id = parse_id(&raw_id).map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    let found = app_state
        .property_service
        .increment_views(id)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    if !found {
        return Err(AppError::PropertyNotFound(id).to_api_error(&locale, &app_state.i18n_store));
    }

    Ok((StatusCode::OK, Json(SuccessResponse { success: true, message: None })))
}

// ---
// Payload: Reorder (tela de destaques)
// ---
#[derive(Debug, Deserialize, ToSchema)]
pub struct ReorderPayload {
    pub ordens: Vec<OrderEntry>,
}

// PUT /api/imoveis/ordem
#[utoipa::path(
    put,
    path = "/api/imoveis/ordem",
    tag = "Imóveis",
    request_body = ReorderPayload,
    responses(
        (status = 200, description = "Ordem de destaque salva", body = SuccessResponse),
        (status = 500, description = "Erro ao gravar a nova ordem")
    )
)]
pub async fn reorder_properties(
    State(app_state): State<AppState>,
    locale: Locale,
    payload: Result<Json<ReorderPayload>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {

    let Json(payload) = payload
        .map_err(|e| AppError::from(e).to_api_error(&locale, &app_state.i18n_store))?;

    if !app_state.property_service.reorder(&payload.ordens).await {
        let message = app_state.i18n_store.translate(&locale.0, "reorder_failed");
        return Err(ApiError::new(StatusCode::INTERNAL_SERVER_ERROR, message));
    }

    Ok((StatusCode::OK, Json(SuccessResponse { success: true, message: None })))
}

// GET /api/imoveis/estatisticas
#[utoipa::path(
    get,
    path = "/api/imoveis/estatisticas",
    tag = "Imóveis",
    responses(
        (status = 200, description = "Visualizações por imóvel (mais vistos primeiro)", body = PropertyStats)
    )
)]
pub async fn get_stats(State(app_state): State<AppState>) -> impl IntoResponse {
    let stats = app_state.property_service.stats().await;
    (StatusCode::OK, Json(stats))
}
