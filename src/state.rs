use crate::cart::Cart;
use crate::payment::PaymentClient;
use std::{path::PathBuf, sync::Arc};
use tokio::sync::Mutex;

/// Shared server state: the persisted cart plus the payment client. Funnel
/// state is per-page and never lands here.
#[derive(Clone)]
pub struct AppState {
    pub cart_path: PathBuf,
    pub cart: Arc<Mutex<Cart>>,
    pub payment: PaymentClient,
}

impl AppState {
    pub fn new(cart_path: PathBuf, cart: Cart, payment: PaymentClient) -> Self {
        Self {
            cart_path,
            cart: Arc::new(Mutex::new(cart)),
            payment,
        }
    }
}
