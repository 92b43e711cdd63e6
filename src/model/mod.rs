mod order;
mod pricing;
mod product;
mod timing;

pub use order::{
    normalize_tracking_phone, CheckoutContactModel, CustomerModel, OrderLineModel, OrderModel,
    OrderStatus, OrderStatusParseError, ShipAddressModel,
};
pub use pricing::{line_gst_total_paise, split_gst_paise, DeliveryPricingModel};
pub use product::ProductModel;
pub use timing::OrderTimingModel;

pub(crate) use order::{check_email, check_mobile_number};
