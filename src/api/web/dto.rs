use serde::{Deserialize, Serialize};

use crate::model::{OrderLineModel, OrderModel};

// wire format of this API keeps the camel-case field names the legacy
// storefront client already depends on

#[derive(Deserialize, Serialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutCustomerDto {
    pub name: String,
    pub phone: String,
    pub email: String,
    pub address_line: String,
    pub city: String,
    pub state: String,
    pub pincode: String,
}

#[derive(Deserialize, Serialize, Clone)]
pub struct OrderLineReqDto {
    pub id: String,
    pub quantity: u32,
}

#[derive(Deserialize, Serialize)]
pub struct OrderCreateReqDto {
    pub customer: CheckoutCustomerDto,
    pub items: Vec<OrderLineReqDto>,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum ContactFieldErrorReason {
    Empty,
    TooShort,
    TooLong,
    InvalidPattern,
}

#[derive(Debug, Serialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutContactErrorDto {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<ContactFieldErrorReason>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<ContactFieldErrorReason>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<ContactFieldErrorReason>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address_line: Option<ContactFieldErrorReason>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<ContactFieldErrorReason>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<ContactFieldErrorReason>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pincode: Option<ContactFieldErrorReason>,
}

impl CheckoutContactErrorDto {
    pub fn any_field(&self) -> bool {
        self.name.is_some()
            || self.phone.is_some()
            || self.email.is_some()
            || self.address_line.is_some()
            || self.city.is_some()
            || self.state.is_some()
            || self.pincode.is_some()
    }
}

#[derive(Debug, Serialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum OrderLineErrorReason {
    NotExist,
    Unavailable,
    QuantityLimit,
}

#[derive(Debug, Serialize)]
pub struct OrderLineQtyLimitDto {
    pub min_: u32,
    pub max_: u32,
    pub given: u32,
}

#[derive(Debug, Serialize)]
pub struct OrderLineErrorDto {
    pub id: String,
    pub reason: OrderLineErrorReason,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub qty_limit: Option<OrderLineQtyLimitDto>,
}

#[derive(Debug, Serialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct OrderCreateRespErrorDto {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer: Option<CheckoutContactErrorDto>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub items: Option<Vec<OrderLineErrorDto>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nonfield: Option<String>,
}

// amounts below are all in paise, the settlement currency's minor unit
#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderCreateRespOkDto {
    pub gateway_order_id: String,
    pub amount: u64,
    pub currency: String,
    pub key_id: String,
    pub internal_order_id: String,
    pub subtotal: u64,
    pub cgst_total: u64,
    pub sgst_total: u64,
    pub delivery_charge: u64,
    pub total: u64,
}

#[derive(Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentVerifyReqDto {
    pub gateway_order_id: String,
    pub gateway_payment_id: String,
    pub gateway_signature: String,
    pub internal_order_id: String,
}

#[derive(Serialize, Deserialize)]
pub struct CustomerSnippetDto {
    pub name: String,
    pub email: String,
    pub phone: String,
}

#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentVerifyRespDto {
    pub success: bool,
    pub order_id: String,
    pub status: String,
    pub customer: CustomerSnippetDto,
}

#[derive(Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderCancelReqDto {
    pub internal_order_id: String,
}

#[derive(Serialize, Deserialize)]
pub struct SimpleSuccessRespDto {
    pub success: bool,
}

#[derive(Deserialize, Serialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct DeliveryPricingDto {
    pub free_delivery_threshold: u32,
    pub reduced_delivery_threshold: u32,
    pub reduced_delivery_fee: u32,
    pub base_delivery_fee: u32,
}

#[derive(Debug)]
pub struct DeliveryPricingErrorDto {
    pub detail: String,
}

#[derive(Deserialize, Serialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct OrderTimingDto {
    pub start_hour: u32,
    pub end_hour: u32,
}

#[derive(Debug)]
pub struct OrderTimingErrorDto {
    pub detail: String,
}

#[derive(Deserialize, Serialize)]
pub struct OrderStatusEditReqDto {
    pub status: String,
}

#[derive(Deserialize, Serialize)]
pub struct TrackOrdersReqDto {
    pub phone: String,
    pub email: String,
}

#[derive(Debug, Serialize, Default)]
pub struct TrackOrdersErrorDto {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<ContactFieldErrorReason>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<ContactFieldErrorReason>,
}

#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackedOrderLineDto {
    pub product_id: String,
    pub name: String,
    pub price: u32,
    pub quantity: u32,
    pub weight_grams: u32,
    pub gst_rate: u32,
}

#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackedOrderDto {
    pub id: String,
    pub status: String,
    pub subtotal: u64,
    pub cgst_total: u64,
    pub sgst_total: u64,
    pub delivery_charge: u64,
    pub total: u64,
    pub created_at: String,
    pub items: Vec<TrackedOrderLineDto>,
}

#[derive(Serialize, Deserialize)]
pub struct TrackOrdersRespDto {
    pub orders: Vec<TrackedOrderDto>,
}

#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentHealthChecksDto {
    pub key_id_present: bool,
    pub secret_present: bool,
}

#[derive(Serialize, Deserialize)]
pub struct PaymentHealthRespDto {
    pub ok: bool,
    pub service: String,
    pub checks: PaymentHealthChecksDto,
    pub missing: Vec<String>,
    pub timestamp: String,
}

#[derive(Serialize, Deserialize)]
pub struct ErrorRespDto {
    pub error: String,
}

impl From<&OrderLineModel> for TrackedOrderLineDto {
    fn from(value: &OrderLineModel) -> Self {
        Self {
            product_id: value.product_id.clone(),
            name: value.name.clone(),
            price: value.unit_price_rupees,
            quantity: value.quantity,
            weight_grams: value.weight_grams,
            gst_rate: value.gst_rate_pct,
        }
    }
}

impl From<&OrderModel> for TrackedOrderDto {
    fn from(value: &OrderModel) -> Self {
        Self {
            id: value.id.clone(),
            status: value.status.as_str().to_string(),
            subtotal: value.subtotal_paise,
            cgst_total: value.cgst_total_paise,
            sgst_total: value.sgst_total_paise,
            delivery_charge: value.delivery_paise,
            total: value.total_paise,
            created_at: value.create_time.to_rfc3339(),
            items: value.lines.iter().map(TrackedOrderLineDto::from).collect(),
        }
    }
}
