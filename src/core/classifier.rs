// Threshold classification

use super::types::PriceStatus;

/// Classify a price against the `[low, high]` band.
///
/// Both boundaries are NORMAL. Only the three arguments affect the result.
pub fn classify(price: f64, low: f64, high: f64) -> PriceStatus {
    if price < low {
        PriceStatus::Low
    } else if price > high {
        PriceStatus::High
    } else {
        PriceStatus::Normal
    }
}
