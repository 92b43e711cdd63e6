mod checkout;
pub mod dto;
mod health;
mod order;
mod settings;

use std::collections::HashMap;

use actix_http::Method;
use actix_web::Route;

use crate::constant::api::web as WebConst;

use checkout::{cancel_order, create_order, verify_payment};
use health::payment_health;
use order::{edit_order_status, track_customer_orders};
use settings::{edit_delivery_pricing, edit_order_timing, read_delivery_pricing, read_order_timing};

pub struct AppRouteTable {
    pub version: String,
    pub entries: HashMap<String, Route>,
} // note, figure out how multiple versions of API endpoints may co-exist

impl AppRouteTable {
    pub fn get(ver_req: &str) -> Self {
        let (version, entries) = match ver_req {
            "0.1.0" => (format!("v{ver_req}"), Self::v0_1_0_entries()),
            _others => (String::new(), HashMap::new()),
        };
        Self { version, entries }
    }
    fn v0_1_0_entries() -> HashMap<String, Route> {
        let data = [
            (
                WebConst::CREATE_CHECKOUT_ORDER.to_string(),
                Route::new().method(Method::POST).to(create_order),
            ),
            (
                WebConst::VERIFY_CHECKOUT_PAYMENT.to_string(),
                Route::new().method(Method::POST).to(verify_payment),
            ),
            (
                WebConst::CANCEL_CHECKOUT_ORDER.to_string(),
                Route::new().method(Method::POST).to(cancel_order),
            ),
            (
                WebConst::READ_DELIVERY_PRICING.to_string(),
                Route::new().method(Method::GET).to(read_delivery_pricing),
            ),
            (
                WebConst::EDIT_DELIVERY_PRICING.to_string(),
                Route::new().method(Method::PUT).to(edit_delivery_pricing),
            ),
            (
                WebConst::READ_ORDER_TIMING.to_string(),
                Route::new().method(Method::GET).to(read_order_timing),
            ),
            (
                WebConst::EDIT_ORDER_TIMING.to_string(),
                Route::new().method(Method::PUT).to(edit_order_timing),
            ),
            (
                WebConst::EDIT_ORDER_STATUS.to_string(),
                Route::new().method(Method::PATCH).to(edit_order_status),
            ),
            (
                WebConst::TRACK_CUSTOMER_ORDERS.to_string(),
                Route::new().method(Method::POST).to(track_customer_orders),
            ),
            (
                WebConst::PAYMENT_HEALTH.to_string(),
                Route::new().method(Method::GET).to(payment_health),
            ),
        ];
        HashMap::from(data)
    }
} // end of impl AppRouteTable
