pub mod app;
pub mod cart;
pub mod catalog;
pub mod errors;
pub mod funnel;
pub mod handlers;
pub mod models;
pub mod payment;
pub mod storage;
pub mod ui;
pub mod state;

pub use app::router;
pub use payment::PaymentClient;
pub use state::AppState;
pub use storage::{load_cart, resolve_cart_path};
