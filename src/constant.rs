pub mod env_vars {
    pub const SYS_BASEPATH: &str = "SYS_BASE_PATH";
    pub const SERVICE_BASEPATH: &str = "SERVICE_BASE_PATH";
    // relative path starting from the service home folder
    pub const CFG_FILEPATH: &str = "CONFIG_FILE_PATH";
    pub const GATEWAY_KEY_ID: &str = "RAZORPAY_KEY_ID";
    pub const GATEWAY_KEY_SECRET: &str = "RAZORPAY_KEY_SECRET";
    pub const ENFORCE_ORDER_TIMING: &str = "ENFORCE_ORDER_TIMING";
    pub const EXPECTED_LABELS: [&str; 6] = [
        SYS_BASEPATH,
        SERVICE_BASEPATH,
        CFG_FILEPATH,
        GATEWAY_KEY_ID,
        GATEWAY_KEY_SECRET,
        ENFORCE_ORDER_TIMING,
    ];
}

pub mod app_meta {
    pub const LABEL: &str = "storefront";
    pub const MACHINE_CODE: u8 = 1;
    // TODO, machine code to each deployed instance
}

pub mod api {
    pub mod web {
        use crate::WebApiHdlrLabel;

        pub const CREATE_CHECKOUT_ORDER: WebApiHdlrLabel = "create_checkout_order";
        pub const VERIFY_CHECKOUT_PAYMENT: WebApiHdlrLabel = "verify_checkout_payment";
        pub const CANCEL_CHECKOUT_ORDER: WebApiHdlrLabel = "cancel_checkout_order";
        pub const READ_DELIVERY_PRICING: WebApiHdlrLabel = "read_delivery_pricing";
        pub const EDIT_DELIVERY_PRICING: WebApiHdlrLabel = "edit_delivery_pricing";
        pub const READ_ORDER_TIMING: WebApiHdlrLabel = "read_order_timing";
        pub const EDIT_ORDER_TIMING: WebApiHdlrLabel = "edit_order_timing";
        pub const EDIT_ORDER_STATUS: WebApiHdlrLabel = "edit_order_status";
        pub const TRACK_CUSTOMER_ORDERS: WebApiHdlrLabel = "track_customer_orders";
        pub const PAYMENT_HEALTH: WebApiHdlrLabel = "payment_health";
    }
}

pub mod hard_limit {
    pub const MAX_ORDER_LINE_QUANTITY: u32 = 50;
    pub const MIN_ORDER_LINE_QUANTITY: u32 = 1;
    pub const MAX_TRACKED_ORDERS_RETURNED: usize = 30;
    pub const MAX_ITEMS_PER_INMEM_TABLE: u32 = 2200;
}

pub mod delivery_pricing_default {
    pub const FREE_DELIVERY_THRESHOLD: u32 = 499;
    pub const REDUCED_DELIVERY_THRESHOLD: u32 = 299;
    pub const REDUCED_DELIVERY_FEE: u32 = 30;
    pub const BASE_DELIVERY_FEE: u32 = 50;
}

pub mod order_timing_default {
    pub const START_HOUR: u32 = 9;
    pub const END_HOUR: u32 = 21;
}

// the shop always settles in Indian rupee, amounts sent to the payment
// gateway are in paise
pub const CURRENCY_LABEL: &str = "INR";
pub const PAISE_PER_RUPEE: u64 = 100;

// IST is a fixed offset from UTC, +05:30, no daylight saving
pub const IST_UTC_OFFSET_SECS: i32 = 5 * 3600 + 1800;

pub const HTTP_CONTENT_TYPE_JSON: &str = "application/json";

pub mod logging {
    use serde::Deserialize;

    #[allow(clippy::upper_case_acronyms)]
    #[derive(Deserialize, Clone)]
    pub enum Level {
        TRACE,
        DEBUG,
        INFO,
        WARNING,
        ERROR,
        FATAL,
    }

    #[allow(clippy::upper_case_acronyms)]
    #[derive(Deserialize)]
    #[serde(rename_all = "lowercase")]
    pub enum Destination {
        CONSOLE,
        LOCALFS,
    }
}
