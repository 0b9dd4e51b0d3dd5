use crate::handlers;
use crate::state::AppState;
use axum::{routing::{get, post}, Router};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::store_page))
        .route("/funil", get(handlers::funnel_page))
        .route("/api/products", get(handlers::get_products))
        .route("/api/cart", get(handlers::get_cart))
        .route("/api/cart/add", post(handlers::cart_add))
        .route("/api/cart/quantity", post(handlers::cart_quantity))
        .route("/api/cart/remove", post(handlers::cart_remove))
        .route("/api/checkout", post(handlers::checkout))
        .route("/api/funil/event", post(handlers::funnel_event))
        .with_state(state)
}
