use serde::{Deserialize, Serialize};

// wire types of the gateway order API, field names follow the remote
// service documentation, not this crate's conventions

#[derive(Serialize)]
pub(super) struct GatewayOrderNotes {
    pub customer_name: String,
    pub customer_phone: String,
    pub customer_email: String,
}

#[derive(Serialize)]
pub(super) struct CreateGatewayOrder {
    pub amount: u64,
    pub currency: String,
    pub receipt: String,
    pub notes: GatewayOrderNotes,
}

#[derive(Deserialize)]
pub(super) struct GatewayOrder {
    pub id: String,
    pub amount: u64,
    pub currency: String,
}
