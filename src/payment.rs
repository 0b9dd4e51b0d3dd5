use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::env;
use std::time::Duration;
use tracing::{error, info};

/// Country prefix prepended to the 9-digit subscriber number before the
/// gateway call.
const PHONE_PREFIX: &str = "258";
const PAYMENT_PATH: &str = "/api/payment";

/// Exactly 9 ASCII digits, the national mobile number format.
pub fn valid_phone(digits: &str) -> bool {
    digits.len() == 9 && digits.bytes().all(|b| b.is_ascii_digit())
}

/// `ORD-` plus the current unix millis in upper-case base36.
pub fn order_reference() -> String {
    let millis = Utc::now().timestamp_millis().max(0) as u64;
    format!("ORD-{}", to_base36(millis))
}

fn to_base36(mut value: u64) -> String {
    const DIGITS: &[u8; 36] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ";
    if value == 0 {
        return "0".to_string();
    }
    let mut out = Vec::new();
    while value > 0 {
        out.push(DIGITS[(value % 36) as usize]);
        value /= 36;
    }
    out.reverse();
    String::from_utf8(out).unwrap_or_default()
}

#[derive(Debug, Serialize)]
struct GatewayRequest {
    amount: u64,
    phone_number: String,
    order_reference: String,
}

#[derive(Debug, Deserialize)]
struct GatewayResponse {
    success: bool,
    #[serde(default)]
    message: String,
}

/// What the checkout handler reports back to the page. Failures are carried
/// in-band; the storefront shows them as a transient toast.
#[derive(Debug, Clone)]
pub struct PaymentOutcome {
    pub success: bool,
    pub message: String,
}

/// Client for the payment-initiation gateway. Without a configured base URL
/// it runs in mock mode and accepts every payment, mirroring the upstream
/// service's behaviour when no gateway credentials are present.
#[derive(Clone)]
pub struct PaymentClient {
    base_url: Option<String>,
    http: reqwest::Client,
}

impl PaymentClient {
    pub fn new(base_url: Option<String>) -> Self {
        Self {
            base_url: base_url.filter(|url| !url.trim().is_empty()),
            http: reqwest::Client::builder()
                .timeout(Duration::from_secs(10))
                .build()
                .unwrap_or_default(),
        }
    }

    pub fn from_env() -> Self {
        Self::new(env::var("PAYMENT_API_URL").ok())
    }

    pub fn is_mock(&self) -> bool {
        self.base_url.is_none()
    }

    /// One POST, one response, no retries. Transport and decode errors come
    /// back as a failed outcome so the UI always stays interactive.
    pub async fn initiate(&self, amount: u64, phone: &str, reference: &str) -> PaymentOutcome {
        let Some(base_url) = &self.base_url else {
            info!("mock payment accepted: {reference} ({amount} MT)");
            return PaymentOutcome {
                success: true,
                message: "Pagamento iniciado! Confirme no seu telefone.".to_string(),
            };
        };

        let request = GatewayRequest {
            amount,
            phone_number: format!("{PHONE_PREFIX}{phone}"),
            order_reference: reference.to_string(),
        };
        let url = format!("{}{PAYMENT_PATH}", base_url.trim_end_matches('/'));

        let response = match self.http.post(&url).json(&request).send().await {
            Ok(response) => response,
            Err(err) => {
                error!("payment request failed: {err}");
                return PaymentOutcome {
                    success: false,
                    message: "Erro de conexão. Tente novamente.".to_string(),
                };
            }
        };

        match response.json::<GatewayResponse>().await {
            Ok(body) if body.success => PaymentOutcome {
                success: true,
                message: if body.message.is_empty() {
                    "Pagamento iniciado! Confirme no seu telefone.".to_string()
                } else {
                    body.message
                },
            },
            Ok(body) => PaymentOutcome {
                success: false,
                message: if body.message.is_empty() {
                    "Erro ao processar pagamento. Tente novamente.".to_string()
                } else {
                    body.message
                },
            },
            Err(err) => {
                error!("payment response was not valid JSON: {err}");
                PaymentOutcome {
                    success: false,
                    message: "Erro ao processar pagamento. Tente novamente.".to_string(),
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nine_digit_numeric_phone_passes() {
        assert!(valid_phone("841234567"));
        assert!(valid_phone("000000000"));
    }

    #[test]
    fn other_lengths_or_non_digits_fail() {
        assert!(!valid_phone(""));
        assert!(!valid_phone("84123456"));
        assert!(!valid_phone("8412345678"));
        assert!(!valid_phone("84123456x"));
        assert!(!valid_phone("84 123456"));
        assert!(!valid_phone("８４１２３４５６７"));
    }

    #[test]
    fn base36_matches_js_tostring() {
        assert_eq!(to_base36(0), "0");
        assert_eq!(to_base36(35), "Z");
        assert_eq!(to_base36(36), "10");
        // (1700000000000).toString(36) === 'loyw3v28'
        assert_eq!(to_base36(1_700_000_000_000), "LOYW3V28");
    }

    #[test]
    fn order_reference_shape() {
        let reference = order_reference();
        assert!(reference.starts_with("ORD-"));
        assert!(reference[4..]
            .bytes()
            .all(|b| b.is_ascii_digit() || b.is_ascii_uppercase()));
    }

    #[tokio::test]
    async fn mock_mode_accepts_payment_without_network() {
        let client = PaymentClient::new(None);
        assert!(client.is_mock());
        let outcome = client.initiate(1580, "841234567", "ORD-TEST").await;
        assert!(outcome.success);
        assert!(outcome.message.contains("Pagamento iniciado"));
    }

    #[tokio::test]
    async fn unreachable_gateway_reports_connection_error() {
        let client = PaymentClient::new(Some("http://127.0.0.1:1".to_string()));
        assert!(!client.is_mock());
        let outcome = client.initiate(100, "841234567", "ORD-TEST").await;
        assert!(!outcome.success);
        assert_eq!(outcome.message, "Erro de conexão. Tente novamente.");
    }
}
