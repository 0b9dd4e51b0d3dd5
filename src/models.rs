use crate::funnel::{FunnelEvent, FunnelState, SummaryLine};
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
pub struct AddItemRequest {
    pub product_id: u32,
}

#[derive(Debug, Deserialize)]
pub struct QuantityRequest {
    pub product_id: u32,
    pub quantity: i64,
}

#[derive(Debug, Deserialize)]
pub struct RemoveItemRequest {
    pub product_id: u32,
}

#[derive(Debug, Serialize)]
pub struct CartLineView {
    pub product_id: u32,
    pub name: &'static str,
    pub glyph: &'static str,
    pub price: u64,
    pub price_display: String,
    pub quantity: u64,
    pub line_total: u64,
    pub line_total_display: String,
}

#[derive(Debug, Serialize)]
pub struct CartView {
    pub items: Vec<CartLineView>,
    pub item_count: u64,
    pub total: u64,
    pub total_display: String,
}

#[derive(Debug, Deserialize)]
pub struct CheckoutRequest {
    pub phone_number: String,
}

#[derive(Debug, Serialize)]
pub struct CheckoutResponse {
    pub success: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order_reference: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct FunnelEventRequest {
    pub state: FunnelState,
    pub event: FunnelEvent,
}

/// Update/render contract for the funnel page: the new state plus everything
/// the page needs to draw the current step.
#[derive(Debug, Serialize)]
pub struct FunnelView {
    pub state: FunnelState,
    pub step: u8,
    pub total_steps: u8,
    pub progress_percent: u8,
    pub total: u64,
    pub total_display: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<Vec<SummaryLine>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub whatsapp_url: Option<String>,
}

impl FunnelView {
    pub fn from_state(state: FunnelState) -> Self {
        let summary = (state.step >= crate::funnel::SUMMARY_STEP).then(|| state.summary());
        let whatsapp_url =
            (state.step == crate::funnel::WHATSAPP_STEP).then(|| state.whatsapp_url());
        let total = state.total();
        Self {
            step: state.step,
            total_steps: crate::funnel::TOTAL_STEPS,
            progress_percent: (u16::from(state.step) * 100 / u16::from(crate::funnel::TOTAL_STEPS))
                as u8,
            total,
            total_display: crate::catalog::format_mt(total),
            summary,
            whatsapp_url,
            state,
        }
    }
}
