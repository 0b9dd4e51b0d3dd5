use std::{env, net::SocketAddr};
use studio_web::{load_cart, resolve_cart_path, router, AppState, PaymentClient};
use tokio::fs;
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("info".parse()?))
        .init();

    let cart_path = resolve_cart_path();
    if let Some(parent) = cart_path.parent() {
        fs::create_dir_all(parent).await?;
    }

    let cart = load_cart(&cart_path).await;
    let payment = PaymentClient::from_env();
    if payment.is_mock() {
        info!("PAYMENT_API_URL not set, payments run in mock mode");
    }

    let state = AppState::new(cart_path, cart, payment);
    let app = router(state);

    let port = env::var("PORT")
        .ok()
        .and_then(|value| value.parse::<u16>().ok())
        .unwrap_or(8080);
    let addr = SocketAddr::from(([0, 0, 0, 0], port));

    info!("listening on http://{addr}");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
