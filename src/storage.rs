use crate::cart::Cart;
use crate::errors::AppError;
use std::{env, path::Path, path::PathBuf};
use tokio::fs;
use tracing::error;

/// The cart file plays the role the browser's local storage played: one
/// serialized cart, rewritten after every mutation.
pub fn resolve_cart_path() -> PathBuf {
    match env::var("CART_DATA_PATH") {
        Ok(path) => PathBuf::from(path),
        Err(_) => PathBuf::from("data/cart.json"),
    }
}

/// A missing or corrupt file degrades to an empty cart.
pub async fn load_cart(path: &Path) -> Cart {
    match fs::read(path).await {
        Ok(bytes) => match serde_json::from_slice(&bytes) {
            Ok(cart) => cart,
            Err(err) => {
                error!("failed to parse cart file: {err}");
                Cart::default()
            }
        },
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => Cart::default(),
        Err(err) => {
            error!("failed to read cart file: {err}");
            Cart::default()
        }
    }
}

pub async fn persist_cart(path: &Path, cart: &Cart) -> Result<(), AppError> {
    let payload = serde_json::to_vec_pretty(cart).map_err(AppError::internal)?;
    fs::write(path, payload).await.map_err(AppError::internal)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_path(tag: &str) -> PathBuf {
        let nanos = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap()
            .as_nanos();
        let mut path = std::env::temp_dir();
        path.push(format!("studio_web_{tag}_{}_{nanos}.json", std::process::id()));
        path
    }

    #[tokio::test]
    async fn persisted_cart_reloads_identically() {
        let path = temp_path("roundtrip");
        let mut cart = Cart::default();
        cart.add(1).unwrap();
        cart.add(1).unwrap();
        cart.add(4).unwrap();

        persist_cart(&path, &cart).await.unwrap();
        let reloaded = load_cart(&path).await;
        assert_eq!(reloaded, cart);

        let _ = fs::remove_file(&path).await;
    }

    #[tokio::test]
    async fn missing_or_corrupt_file_loads_empty() {
        let missing = temp_path("missing");
        assert!(load_cart(&missing).await.is_empty());

        let corrupt = temp_path("corrupt");
        fs::write(&corrupt, b"{not json").await.unwrap();
        assert!(load_cart(&corrupt).await.is_empty());
        let _ = fs::remove_file(&corrupt).await;
    }
}
