use crate::catalog::{Product, PRODUCTS};
use crate::errors::AppError;
use crate::funnel::{FunnelState, Objective};
use crate::models::{
    AddItemRequest, CartView, CheckoutRequest, CheckoutResponse, FunnelEventRequest, FunnelView,
    QuantityRequest, RemoveItemRequest,
};
use crate::payment::{self, valid_phone};
use crate::state::AppState;
use crate::storage::persist_cart;
use crate::ui::{render_funnel, render_store};
use axum::{
    extract::{Query, State},
    response::Html,
    Json,
};
use serde::Deserialize;
use tracing::info;

pub async fn store_page() -> Html<String> {
    Html(render_store())
}

#[derive(Debug, Deserialize)]
pub struct FunnelQuery {
    pub objetivo: Option<String>,
}

/// Campaign links carry `?objetivo=...`; a recognised value seeds the state
/// past the objective step.
pub async fn funnel_page(Query(query): Query<FunnelQuery>) -> Html<String> {
    let objective = query.objetivo.as_deref().and_then(Objective::from_query);
    let view = FunnelView::from_state(FunnelState::with_objective(objective));
    let initial = serde_json::to_string(&view).unwrap_or_else(|_| "null".to_string());
    Html(render_funnel(&initial))
}

pub async fn get_products() -> Json<&'static [Product]> {
    Json(&PRODUCTS[..])
}

pub async fn get_cart(State(state): State<AppState>) -> Json<CartView> {
    let cart = state.cart.lock().await;
    Json(cart.view())
}

pub async fn cart_add(
    State(state): State<AppState>,
    Json(payload): Json<AddItemRequest>,
) -> Result<Json<CartView>, AppError> {
    let mut cart = state.cart.lock().await;
    cart.add(payload.product_id).map_err(AppError::bad_request)?;
    persist_cart(&state.cart_path, &cart).await?;
    Ok(Json(cart.view()))
}

pub async fn cart_quantity(
    State(state): State<AppState>,
    Json(payload): Json<QuantityRequest>,
) -> Result<Json<CartView>, AppError> {
    let mut cart = state.cart.lock().await;
    cart.set_quantity(payload.product_id, payload.quantity);
    persist_cart(&state.cart_path, &cart).await?;
    Ok(Json(cart.view()))
}

pub async fn cart_remove(
    State(state): State<AppState>,
    Json(payload): Json<RemoveItemRequest>,
) -> Result<Json<CartView>, AppError> {
    let mut cart = state.cart.lock().await;
    cart.remove(payload.product_id);
    persist_cart(&state.cart_path, &cart).await?;
    Ok(Json(cart.view()))
}

/// One payment round trip. Failures come back in-band with `success: false`
/// so the page can re-enable the submit button and toast the message.
pub async fn checkout(
    State(state): State<AppState>,
    Json(payload): Json<CheckoutRequest>,
) -> Result<Json<CheckoutResponse>, AppError> {
    let phone = payload.phone_number.trim();
    if !valid_phone(phone) {
        return Ok(Json(CheckoutResponse {
            success: false,
            message: "Por favor, insira um número de telefone válido (9 dígitos)".to_string(),
            order_reference: None,
        }));
    }

    let mut cart = state.cart.lock().await;
    if cart.is_empty() {
        return Ok(Json(CheckoutResponse {
            success: false,
            message: "O carrinho está vazio.".to_string(),
            order_reference: None,
        }));
    }

    let total = cart.total();
    let reference = payment::order_reference();
    let outcome = state.payment.initiate(total, phone, &reference).await;

    if outcome.success {
        cart.clear();
        persist_cart(&state.cart_path, &cart).await?;
        info!("payment initiated: {reference} ({total} MT)");
        Ok(Json(CheckoutResponse {
            success: true,
            message: outcome.message,
            order_reference: Some(reference),
        }))
    } else {
        Ok(Json(CheckoutResponse {
            success: false,
            message: outcome.message,
            order_reference: Some(reference),
        }))
    }
}

/// Stateless funnel update: apply the event to the state the page sent and
/// return the rendered view. Validation failures are 400s with the message.
pub async fn funnel_event(
    Json(payload): Json<FunnelEventRequest>,
) -> Result<Json<FunnelView>, AppError> {
    let mut state = payload.state;
    state.apply(payload.event).map_err(AppError::bad_request)?;
    Ok(Json(FunnelView::from_state(state)))
}
