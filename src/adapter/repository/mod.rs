use std::boxed::Box;
use std::result::Result as DefaultResult;
use std::sync::Arc;

use async_trait::async_trait;

use crate::error::{AppError, AppErrorCode};
use crate::model::{
    DeliveryPricingModel, OrderModel, OrderStatus, OrderTimingModel, ProductModel,
};
use crate::AppDataStoreContext;

mod in_mem;
// make in-memory repo types visible for testing purpose
pub use in_mem::order::OrderInMemRepo;
pub use in_mem::product::ProductInMemRepo;
pub use in_mem::settings::ShopSettingsInMemRepo;

/// outcome of the only status transition the payment-verification flow is
/// allowed to perform
#[derive(Debug)]
pub enum OrderPaidOutcome {
    Transitioned(OrderModel),
    AlreadyPaid(OrderModel),
    Refused(OrderStatus),
}

// the repository instance may be used across an await, the future created
// by app callers has to be able to pass to different threads, it is the
// reason to add `Send` and `Sync` as super-traits
#[async_trait]
pub trait AbsShopSettingsRepo: Sync + Send {
    async fn fetch_delivery_pricing(&self) -> DefaultResult<DeliveryPricingModel, AppError>;
    async fn save_delivery_pricing(
        &self,
        ms: DeliveryPricingModel,
    ) -> DefaultResult<(), AppError>;
    async fn fetch_order_timing(&self) -> DefaultResult<OrderTimingModel, AppError>;
    async fn save_order_timing(&self, ms: OrderTimingModel) -> DefaultResult<(), AppError>;
}

#[async_trait]
pub trait AbsProductRepo: Sync + Send {
    /// returns only the records found, callers detect the missing ones
    async fn fetch_many(&self, ids: &[String]) -> DefaultResult<Vec<ProductModel>, AppError>;
    async fn save(&self, items: Vec<ProductModel>) -> DefaultResult<(), AppError>;
}

#[async_trait]
pub trait AbsOrderRepo: Sync + Send {
    /// customer, order header and all its lines go into the store in one
    /// atomic write, a partially visible order must never exist
    async fn create_order(&self, order: &OrderModel) -> DefaultResult<(), AppError>;

    async fn fetch_order(&self, oid: &str) -> DefaultResult<Option<OrderModel>, AppError>;

    /// transition PENDING -> PAID and attach the gateway payment id, in a
    /// single guarded update. Safe to call repeatedly for the same payment.
    async fn mark_paid_once(
        &self,
        oid: &str,
        gateway_payment_id: &str,
    ) -> DefaultResult<OrderPaidOutcome, AppError>;

    /// flip PENDING -> FAILED only while no payment id is attached,
    /// returns whether the flip happened
    async fn cancel_if_unpaid(&self, oid: &str) -> DefaultResult<bool, AppError>;

    /// back-office status override, no transition validation beyond
    /// existence of the order
    async fn update_status(
        &self,
        oid: &str,
        new_status: OrderStatus,
    ) -> DefaultResult<(), AppError>;

    async fn fetch_by_customer_contact(
        &self,
        phone: &str,
        email: &str,
        limit: usize,
    ) -> DefaultResult<Vec<OrderModel>, AppError>;
} // end of trait AbsOrderRepo

pub async fn app_repo_shop_settings(
    ds: Arc<AppDataStoreContext>,
) -> DefaultResult<Box<dyn AbsShopSettingsRepo>, AppError> {
    if let Some(m) = ds.in_mem.as_ref() {
        let obj = ShopSettingsInMemRepo::new(m.clone()).await?;
        Ok(Box::new(obj))
    } else {
        Err(AppError {
            code: AppErrorCode::MissingDataStore,
            detail: Some("unknown-type".to_string()),
        })
    }
}

pub async fn app_repo_product(
    ds: Arc<AppDataStoreContext>,
) -> DefaultResult<Box<dyn AbsProductRepo>, AppError> {
    if let Some(m) = ds.in_mem.as_ref() {
        let obj = ProductInMemRepo::new(m.clone()).await?;
        Ok(Box::new(obj))
    } else {
        Err(AppError {
            code: AppErrorCode::MissingDataStore,
            detail: Some("unknown-type".to_string()),
        })
    }
}

pub async fn app_repo_order(
    ds: Arc<AppDataStoreContext>,
) -> DefaultResult<Box<dyn AbsOrderRepo>, AppError> {
    if let Some(m) = &ds.in_mem {
        let obj = OrderInMemRepo::new(m.clone()).await?;
        Ok(Box::new(obj))
    } else {
        Err(AppError {
            code: AppErrorCode::MissingDataStore,
            detail: Some("unknown-type".to_string()),
        })
    }
}
