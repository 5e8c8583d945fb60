//! JSON endpoints exposing the derivations to a rendering tier

use axum::{extract::State, http::StatusCode, routing::{get, post}, Json, Router};
use serde::{Deserialize, Serialize};
use validator::Validate;
use crate::config::AppConfig;
use crate::domain::actions::{PendingAction, PendingLog};
use crate::domain::aggregates::{CartSnapshot, CartSummary, DisplayedCart, DisplayedVariant, LineControls, ProductCard};
use crate::domain::services::{parse_tags, reconcile_cart, reconcile_variant, Metafield, ProductDetails, TagSummary};
use crate::{Product, ProductVariant};

#[derive(Clone)] pub struct AppState { pub config: AppConfig }

type ApiResult<T> = Result<Json<T>, (StatusCode, String)>;

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(|| async { Json(serde_json::json!({"status": "healthy", "service": "storefront-core"})) }))
        .route("/api/v1/products/tags", post(derive_tags))
        .route("/api/v1/products/card", post(product_card))
        .route("/api/v1/products/details", post(product_details))
        .route("/api/v1/cart/projection", post(project_cart))
        .route("/api/v1/variants/projection", post(project_variant))
        .with_state(state)
}

#[derive(Debug, Deserialize, Validate)]
pub struct TagsRequest {
    #[serde(default)]
    #[validate(length(max = 250))]
    pub tags: Vec<String>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct DetailsRequest {
    #[serde(default)]
    #[validate(length(max = 250))]
    pub metafields: Vec<Metafield>,
}

#[derive(Debug, Deserialize)]
pub struct CartProjectionRequest {
    pub confirmed: CartSnapshot,
    #[serde(default)]
    pub pending: Vec<PendingAction>,
}

#[derive(Debug, Serialize)]
pub struct CartView {
    #[serde(flatten)]
    pub cart: DisplayedCart,
    pub summary: CartSummary,
    pub controls: Vec<LineControls>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct VariantProjectionRequest {
    #[serde(default)]
    pub confirmed: Option<ProductVariant>,
    #[serde(default)]
    #[validate(length(max = 250))]
    pub candidates: Vec<ProductVariant>,
    #[serde(default)]
    pub pending: Vec<PendingAction>,
}

async fn derive_tags(Json(r): Json<TagsRequest>) -> ApiResult<TagSummary> {
    r.validate().map_err(|e| (StatusCode::UNPROCESSABLE_ENTITY, e.to_string()))?;
    Ok(Json(parse_tags(&r.tags)))
}

async fn product_card(State(s): State<AppState>, Json(p): Json<Product>) -> Json<ProductCard> {
    Json(p.card(s.config.spec_preview_limit))
}

async fn product_details(Json(r): Json<DetailsRequest>) -> ApiResult<ProductDetails> {
    r.validate().map_err(|e| (StatusCode::UNPROCESSABLE_ENTITY, e.to_string()))?;
    Ok(Json(ProductDetails::from_metafields(&r.metafields)))
}

async fn project_cart(State(s): State<AppState>, Json(r): Json<CartProjectionRequest>) -> ApiResult<CartView> {
    let pending = pending_log(r.pending, &s.config)?;
    let cart = reconcile_cart(&r.confirmed, &pending);
    tracing::debug!(cart = %cart.id, pending = pending.len(), optimistic = cart.is_optimistic, "cart projected");
    let summary = cart.summary();
    let controls = cart.lines.iter().map(LineControls::for_line).collect();
    Ok(Json(CartView { cart, summary, controls }))
}

async fn project_variant(State(s): State<AppState>, Json(r): Json<VariantProjectionRequest>) -> ApiResult<Option<DisplayedVariant>> {
    r.validate().map_err(|e| (StatusCode::UNPROCESSABLE_ENTITY, e.to_string()))?;
    let pending = pending_log(r.pending, &s.config)?;
    Ok(Json(reconcile_variant(r.confirmed.as_ref(), &r.candidates, &pending)))
}

fn pending_log(actions: Vec<PendingAction>, config: &AppConfig) -> Result<PendingLog, (StatusCode, String)> {
    if actions.len() > config.max_pending_actions {
        return Err((
            StatusCode::UNPROCESSABLE_ENTITY,
            format!("{} pending actions exceeds limit of {}", actions.len(), config.max_pending_actions),
        ));
    }
    Ok(PendingLog::from_actions(actions))
}
