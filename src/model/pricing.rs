use std::result::Result as DefaultResult;

use crate::api::web::dto::{DeliveryPricingDto, DeliveryPricingErrorDto};
use crate::constant::{delivery_pricing_default as dft, PAISE_PER_RUPEE};

/// delivery-fee ladder of the shop, thresholds and fees are whole rupees,
/// maintained as a single global row by back-office staff
#[derive(Debug, Clone, PartialEq)]
pub struct DeliveryPricingModel {
    pub free_delivery_threshold: u32,
    pub reduced_delivery_threshold: u32,
    pub reduced_delivery_fee: u32,
    pub base_delivery_fee: u32,
}

impl Default for DeliveryPricingModel {
    fn default() -> Self {
        Self {
            free_delivery_threshold: dft::FREE_DELIVERY_THRESHOLD,
            reduced_delivery_threshold: dft::REDUCED_DELIVERY_THRESHOLD,
            reduced_delivery_fee: dft::REDUCED_DELIVERY_FEE,
            base_delivery_fee: dft::BASE_DELIVERY_FEE,
        }
    }
}

impl TryFrom<DeliveryPricingDto> for DeliveryPricingModel {
    type Error = DeliveryPricingErrorDto;
    fn try_from(value: DeliveryPricingDto) -> DefaultResult<Self, Self::Error> {
        if value.reduced_delivery_threshold > value.free_delivery_threshold {
            Err(DeliveryPricingErrorDto {
                detail: "reduced-threshold-exceeds-free-threshold".to_string(),
            })
        } else {
            Ok(Self {
                free_delivery_threshold: value.free_delivery_threshold,
                reduced_delivery_threshold: value.reduced_delivery_threshold,
                reduced_delivery_fee: value.reduced_delivery_fee,
                base_delivery_fee: value.base_delivery_fee,
            })
        }
    }
}

impl From<DeliveryPricingModel> for DeliveryPricingDto {
    fn from(value: DeliveryPricingModel) -> DeliveryPricingDto {
        DeliveryPricingDto {
            free_delivery_threshold: value.free_delivery_threshold,
            reduced_delivery_threshold: value.reduced_delivery_threshold,
            reduced_delivery_fee: value.reduced_delivery_fee,
            base_delivery_fee: value.base_delivery_fee,
        }
    }
}

impl DeliveryPricingModel {
    /// same ladder is published to the storefront client for display, the
    /// figure computed here is the one that gets billed
    pub fn delivery_charge_rupees(&self, subtotal_rupees: u64, has_free_delivery_item: bool) -> u32 {
        if has_free_delivery_item {
            0
        } else if subtotal_rupees >= self.free_delivery_threshold as u64 {
            0
        } else if subtotal_rupees >= self.reduced_delivery_threshold as u64 {
            self.reduced_delivery_fee
        } else {
            self.base_delivery_fee
        }
    }

    pub fn delivery_charge_paise(&self, subtotal_rupees: u64, has_free_delivery_item: bool) -> u64 {
        (self.delivery_charge_rupees(subtotal_rupees, has_free_delivery_item) as u64)
            * PAISE_PER_RUPEE
    }
} // end of impl DeliveryPricingModel

/// total GST of one order line in paise, `base_paise` is unit price
/// multiplied by quantity, the rate comes from the product category
pub fn line_gst_total_paise(base_paise: u64, gst_rate_pct: u32) -> u64 {
    base_paise * (gst_rate_pct as u64) / 100
}

/// split a GST amount into central / state halves, the two halves always
/// sum exactly to the given amount
pub fn split_gst_paise(gst_total_paise: u64) -> (u64, u64) {
    let cgst = gst_total_paise / 2;
    let sgst = gst_total_paise - cgst;
    (cgst, sgst)
}
