use std::result::Result as DefaultResult;
use std::str::FromStr;

use chrono::{DateTime, FixedOffset};
use regex::Regex;
use uuid::{Builder, NoContext, Timestamp, Uuid};

use crate::api::web::dto::{
    CheckoutContactErrorDto, CheckoutCustomerDto, ContactFieldErrorReason,
};
use crate::constant::PAISE_PER_RUPEE;
use crate::model::pricing::{line_gst_total_paise, split_gst_paise};
use crate::model::ProductModel;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OrderStatus {
    Pending,
    Paid,
    Failed,
    Processing,
    Delivered,
    Refunded,
}

pub struct OrderStatusParseError(pub String);

impl OrderStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "PENDING",
            Self::Paid => "PAID",
            Self::Failed => "FAILED",
            Self::Processing => "PROCESSING",
            Self::Delivered => "DELIVERED",
            Self::Refunded => "REFUNDED",
        }
    }
}
impl FromStr for OrderStatus {
    type Err = OrderStatusParseError;
    fn from_str(s: &str) -> DefaultResult<Self, Self::Err> {
        match s {
            "PENDING" => Ok(Self::Pending),
            "PAID" => Ok(Self::Paid),
            "FAILED" => Ok(Self::Failed),
            "PROCESSING" => Ok(Self::Processing),
            "DELIVERED" => Ok(Self::Delivered),
            "REFUNDED" => Ok(Self::Refunded),
            _others => Err(OrderStatusParseError(s.to_string())),
        }
    }
}

/// a customer row is created fresh on every checkout, no dedup / merge
#[derive(Debug, Clone, PartialEq)]
pub struct CustomerModel {
    pub name: String,
    pub phone: String,
    pub email: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ShipAddressModel {
    pub address_line: String,
    pub city: String,
    pub state: String,
    pub pincode: String,
}

/// price figures are snapshotted off the catalog record at checkout time
/// so later catalog edits never change a placed order
#[derive(Debug, Clone, PartialEq)]
pub struct OrderLineModel {
    pub product_id: String,
    pub name: String,
    pub unit_price_rupees: u32,
    pub quantity: u32,
    pub weight_grams: u32,
    pub gst_rate_pct: u32,
    pub cgst_paise: u64,
    pub sgst_paise: u64,
}

impl OrderLineModel {
    pub fn from_resolved(product: &ProductModel, quantity: u32) -> Self {
        let base = Self::base_paise_of(product.price_rupees, quantity);
        let gst_total = line_gst_total_paise(base, product.gst_rate_pct);
        let (cgst_paise, sgst_paise) = split_gst_paise(gst_total);
        Self {
            product_id: product.id.clone(),
            name: product.name.clone(),
            unit_price_rupees: product.price_rupees,
            quantity,
            weight_grams: product.weight_grams,
            gst_rate_pct: product.gst_rate_pct,
            cgst_paise,
            sgst_paise,
        }
    }

    fn base_paise_of(price_rupees: u32, quantity: u32) -> u64 {
        (price_rupees as u64) * (quantity as u64) * PAISE_PER_RUPEE
    }

    pub fn base_paise(&self) -> u64 {
        Self::base_paise_of(self.unit_price_rupees, self.quantity)
    }
} // end of impl OrderLineModel

#[derive(Debug, Clone)]
pub struct OrderModel {
    pub id: String,
    pub gateway_order_id: String,
    pub gateway_payment_id: Option<String>,
    pub status: OrderStatus,
    pub subtotal_paise: u64,
    pub cgst_total_paise: u64,
    pub sgst_total_paise: u64,
    pub delivery_paise: u64,
    pub total_paise: u64,
    pub customer: CustomerModel,
    pub address: ShipAddressModel,
    pub lines: Vec<OrderLineModel>,
    pub create_time: DateTime<FixedOffset>,
}

impl OrderModel {
    /// totals are always re-derived from the resolved lines, never taken
    /// from anything a client submitted
    #[allow(clippy::too_many_arguments)]
    pub fn assemble(
        id: String,
        gateway_order_id: String,
        customer: CustomerModel,
        address: ShipAddressModel,
        lines: Vec<OrderLineModel>,
        delivery_paise: u64,
        create_time: DateTime<FixedOffset>,
    ) -> Self {
        let subtotal_paise: u64 = lines.iter().map(OrderLineModel::base_paise).sum();
        let cgst_total_paise: u64 = lines.iter().map(|l| l.cgst_paise).sum();
        let sgst_total_paise: u64 = lines.iter().map(|l| l.sgst_paise).sum();
        let total_paise = subtotal_paise + cgst_total_paise + sgst_total_paise + delivery_paise;
        Self {
            id,
            gateway_order_id,
            gateway_payment_id: None,
            status: OrderStatus::Pending,
            subtotal_paise,
            cgst_total_paise,
            sgst_total_paise,
            delivery_paise,
            total_paise,
            customer,
            address,
            lines,
            create_time,
        }
    } // end of fn assemble

    pub fn generate_order_id(machine_code: u8) -> String {
        // utility for generating top-level identifier to each order
        let oid = generate_custom_uid(machine_code);
        let bs = oid.into_bytes();
        bs.into_iter()
            .map(|b| format!("{:02x}", b))
            .collect::<Vec<String>>()
            .join("")
    }
} // end of impl OrderModel

fn generate_custom_uid(machine_code: u8) -> Uuid {
    // UUIDv7 is for single-node application. This shop may be scaled to
    // multi-node environment later, UUIDv8 allows custom ID layout, so few
    // bits of the ID can be assigned to represent each machine/node ID,
    // rest of that should be timestamp with random byte sequence
    let ts_ctx = NoContext;
    let (secs, nano) = Timestamp::now(ts_ctx).to_unix();
    let millis = (secs * 1000).saturating_add((nano as u64) / 1_000_000);
    let mut node_id = rand::random::<[u8; 10]>();
    node_id[0] = machine_code;
    let builder = Builder::from_unix_timestamp_millis(millis, &node_id);
    builder.into_uuid()
}

#[derive(Debug)]
pub struct CheckoutContactModel {
    pub customer: CustomerModel,
    pub address: ShipAddressModel,
}

impl TryFrom<CheckoutCustomerDto> for CheckoutContactModel {
    type Error = CheckoutContactErrorDto;

    fn try_from(value: CheckoutCustomerDto) -> DefaultResult<Self, Self::Error> {
        let name = value.name.trim().to_string();
        let phone = normalize_phone_digits(value.phone.as_str());
        let email = value.email.trim().to_lowercase();
        let error = CheckoutContactErrorDto {
            name: check_person_name(name.as_str()),
            phone: check_mobile_number(phone.as_str()),
            email: check_email(email.as_str()),
            address_line: check_length(value.address_line.as_str(), 10, 200),
            city: check_length(value.city.as_str(), 2, 50),
            state: check_length(value.state.as_str(), 2, 50),
            pincode: check_pincode(value.pincode.as_str()),
        };
        if error.any_field() {
            Err(error)
        } else {
            Ok(Self {
                customer: CustomerModel { name, phone, email },
                address: ShipAddressModel {
                    address_line: value.address_line,
                    city: value.city,
                    state: value.state,
                    pincode: value.pincode,
                },
            })
        }
    } // end of fn try_from
}

pub(crate) fn normalize_phone_digits(raw: &str) -> String {
    raw.chars().filter(|c| c.is_ascii_digit()).collect()
}

/// order-tracking input tolerates the country prefix and extra separator
/// characters which the checkout form would have stripped already
pub fn normalize_tracking_phone(raw: &str) -> String {
    let digits = normalize_phone_digits(raw);
    if digits.len() == 12 && digits.starts_with("91") {
        digits[2..].to_string()
    } else if digits.len() > 10 {
        digits[digits.len() - 10..].to_string()
    } else {
        digits
    }
}

fn check_person_name(value: &str) -> Option<ContactFieldErrorReason> {
    if value.is_empty() {
        Some(ContactFieldErrorReason::Empty)
    } else if value.len() < 2 {
        Some(ContactFieldErrorReason::TooShort)
    } else if value.len() > 80 {
        Some(ContactFieldErrorReason::TooLong)
    } else {
        match_whole(value, r"^[a-zA-Z\s'.]+$")
    }
}

pub(crate) fn check_mobile_number(value: &str) -> Option<ContactFieldErrorReason> {
    if value.is_empty() {
        Some(ContactFieldErrorReason::Empty)
    } else {
        // 10-digit Indian mobile number
        match_whole(value, r"^[6-9][0-9]{9}$")
    }
}

pub(crate) fn check_email(value: &str) -> Option<ContactFieldErrorReason> {
    if value.is_empty() {
        Some(ContactFieldErrorReason::Empty)
    } else if value.len() > 120 {
        Some(ContactFieldErrorReason::TooLong)
    } else {
        match_whole(value, r"^[^@\s]+@[^@\s]+\.[^@\s]+$")
    }
}

fn check_pincode(value: &str) -> Option<ContactFieldErrorReason> {
    if value.is_empty() {
        Some(ContactFieldErrorReason::Empty)
    } else {
        // 6-digit Indian postal code, leading digit never zero
        match_whole(value, r"^[1-9][0-9]{5}$")
    }
}

fn check_length(value: &str, min_: usize, max_: usize) -> Option<ContactFieldErrorReason> {
    if value.is_empty() {
        Some(ContactFieldErrorReason::Empty)
    } else if value.len() < min_ {
        Some(ContactFieldErrorReason::TooShort)
    } else if value.len() > max_ {
        Some(ContactFieldErrorReason::TooLong)
    } else {
        None
    }
}

fn match_whole(value: &str, pattern: &str) -> Option<ContactFieldErrorReason> {
    let re = Regex::new(pattern).unwrap();
    if let Some(m) = re.find(value) {
        if m.start() == 0 && m.end() == value.len() {
            None // given data should match the pattern exactly once
        } else {
            Some(ContactFieldErrorReason::InvalidPattern)
        }
    } else {
        Some(ContactFieldErrorReason::InvalidPattern)
    }
}
