/// catalog snapshot the checkout flow relies on, unit price is whole
/// rupees, the GST rate is inherited from the product's category.
/// free-delivery eligibility is a first-class attribute here, not a
/// display badge
#[derive(Debug, Clone)]
pub struct ProductModel {
    pub id: String,
    pub name: String,
    pub price_rupees: u32,
    pub weight_grams: u32,
    pub gst_rate_pct: u32,
    pub available: bool,
    pub free_delivery: bool,
}
