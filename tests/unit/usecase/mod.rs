mod create_order;
mod edit_order_status;
mod track_orders;
mod verify_payment;

use std::boxed::Box;
use std::result::Result;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{FixedOffset, TimeZone};

use storefront::adapter::notify::{AbstractNotifyQueue, OrderNotifySnapshot};
use storefront::adapter::processor::{
    AbstractPaymentGateway, AppGatewayKeyStatus, AppProcessorError, GatewayOrderCreateArgs,
    GatewayOrderModel,
};
use storefront::adapter::repository::{
    AbsOrderRepo, AbsProductRepo, AbsShopSettingsRepo, OrderPaidOutcome,
};
use storefront::error::AppError;
use storefront::model::{
    CheckoutContactModel, DeliveryPricingModel, OrderLineModel, OrderModel, OrderStatus,
    OrderTimingModel, ProductModel,
};

use super::model::order::{ut_product, ut_valid_customer_dto};

#[derive(Default)]
pub(crate) struct MockOrderRepo {
    pub(crate) _create_result: Mutex<Option<Result<(), AppError>>>,
    pub(crate) _created: Mutex<Option<OrderModel>>,
    pub(crate) _fetch_result: Mutex<Option<Result<Option<OrderModel>, AppError>>>,
    pub(crate) _mark_paid_result: Mutex<Option<Result<OrderPaidOutcome, AppError>>>,
    pub(crate) _cancel_result: Mutex<Option<Result<bool, AppError>>>,
    pub(crate) _update_status_result: Mutex<Option<Result<(), AppError>>>,
    pub(crate) _fetch_by_contact_result: Mutex<Option<Result<Vec<OrderModel>, AppError>>>,
}

#[async_trait]
impl AbsOrderRepo for MockOrderRepo {
    async fn create_order(&self, order: &OrderModel) -> Result<(), AppError> {
        let mut captured = self._created.lock().unwrap();
        *captured = Some(order.clone());
        let mut g = self._create_result.lock().unwrap();
        g.take().unwrap()
    }
    async fn fetch_order(&self, _oid: &str) -> Result<Option<OrderModel>, AppError> {
        let mut g = self._fetch_result.lock().unwrap();
        g.take().unwrap()
    }
    async fn mark_paid_once(
        &self,
        _oid: &str,
        _gateway_payment_id: &str,
    ) -> Result<OrderPaidOutcome, AppError> {
        let mut g = self._mark_paid_result.lock().unwrap();
        g.take().unwrap()
    }
    async fn cancel_if_unpaid(&self, _oid: &str) -> Result<bool, AppError> {
        let mut g = self._cancel_result.lock().unwrap();
        g.take().unwrap()
    }
    async fn update_status(&self, _oid: &str, _new_status: OrderStatus) -> Result<(), AppError> {
        let mut g = self._update_status_result.lock().unwrap();
        g.take().unwrap()
    }
    async fn fetch_by_customer_contact(
        &self,
        _phone: &str,
        _email: &str,
        _limit: usize,
    ) -> Result<Vec<OrderModel>, AppError> {
        let mut g = self._fetch_by_contact_result.lock().unwrap();
        g.take().unwrap()
    }
} // end of impl MockOrderRepo

#[derive(Default)]
pub(crate) struct MockProductRepo {
    pub(crate) _fetch_result: Mutex<Option<Result<Vec<ProductModel>, AppError>>>,
}

#[async_trait]
impl AbsProductRepo for MockProductRepo {
    async fn fetch_many(&self, _ids: &[String]) -> Result<Vec<ProductModel>, AppError> {
        let mut g = self._fetch_result.lock().unwrap();
        g.take().unwrap()
    }
    async fn save(&self, _items: Vec<ProductModel>) -> Result<(), AppError> {
        Ok(())
    }
}

#[derive(Default)]
pub(crate) struct MockSettingsRepo {
    pub(crate) _pricing_result: Mutex<Option<Result<DeliveryPricingModel, AppError>>>,
    pub(crate) _timing_result: Mutex<Option<Result<OrderTimingModel, AppError>>>,
    pub(crate) _saved_pricing: Mutex<Option<DeliveryPricingModel>>,
    pub(crate) _saved_timing: Mutex<Option<OrderTimingModel>>,
}

#[async_trait]
impl AbsShopSettingsRepo for MockSettingsRepo {
    async fn fetch_delivery_pricing(&self) -> Result<DeliveryPricingModel, AppError> {
        let mut g = self._pricing_result.lock().unwrap();
        g.take().unwrap()
    }
    async fn save_delivery_pricing(&self, ms: DeliveryPricingModel) -> Result<(), AppError> {
        let mut g = self._saved_pricing.lock().unwrap();
        *g = Some(ms);
        Ok(())
    }
    async fn fetch_order_timing(&self) -> Result<OrderTimingModel, AppError> {
        let mut g = self._timing_result.lock().unwrap();
        g.take().unwrap()
    }
    async fn save_order_timing(&self, ms: OrderTimingModel) -> Result<(), AppError> {
        let mut g = self._saved_timing.lock().unwrap();
        *g = Some(ms);
        Ok(())
    }
} // end of impl MockSettingsRepo

#[derive(Default)]
pub(crate) struct MockPaymentGateway {
    pub(crate) _create_result: Mutex<Option<Result<GatewayOrderModel, AppProcessorError>>>,
    pub(crate) _verify_result: Mutex<Option<Result<bool, AppProcessorError>>>,
    pub(crate) _key_id_result: Mutex<Option<Result<String, AppProcessorError>>>,
}

#[async_trait]
impl AbstractPaymentGateway for MockPaymentGateway {
    async fn create_gateway_order(
        &self,
        _args: GatewayOrderCreateArgs,
    ) -> Result<GatewayOrderModel, AppProcessorError> {
        let mut g = self._create_result.lock().unwrap();
        g.take().unwrap()
    }
    fn verify_payment_signature(
        &self,
        _gateway_order_id: &str,
        _gateway_payment_id: &str,
        _signature_hex: &str,
    ) -> Result<bool, AppProcessorError> {
        let mut g = self._verify_result.lock().unwrap();
        g.take().unwrap()
    }
    fn publishable_key_id(&self) -> Result<String, AppProcessorError> {
        let mut g = self._key_id_result.lock().unwrap();
        g.take().unwrap()
    }
    fn key_status(&self) -> AppGatewayKeyStatus {
        AppGatewayKeyStatus {
            key_id_present: true,
            secret_present: true,
            missing: Vec::new(),
        }
    }
} // end of impl MockPaymentGateway

pub(crate) struct MockNotifyQueue {
    pub(crate) submitted: Arc<Mutex<Vec<String>>>,
}

impl AbstractNotifyQueue for MockNotifyQueue {
    fn submit(&self, snapshot: OrderNotifySnapshot) {
        let mut g = self.submitted.lock().unwrap();
        g.push(snapshot.order_id);
    }
}

pub(crate) fn ut_pending_order(oid: &str, gateway_oid: &str) -> OrderModel {
    let contact = CheckoutContactModel::try_from(ut_valid_customer_dto()).unwrap();
    let lines = vec![
        OrderLineModel::from_resolved(&ut_product("laddu", 100, 5, false), 2),
        OrderLineModel::from_resolved(&ut_product("kaju-katli", 200, 18, false), 1),
    ];
    let timenow = FixedOffset::east_opt(19800)
        .unwrap()
        .with_ymd_and_hms(2025, 3, 14, 11, 30, 0)
        .unwrap();
    OrderModel::assemble(
        oid.to_string(),
        gateway_oid.to_string(),
        contact.customer,
        contact.address,
        lines,
        3000,
        timenow,
    )
}

pub(crate) fn ut_paid_order(oid: &str, gateway_oid: &str, payment_id: &str) -> OrderModel {
    let mut m = ut_pending_order(oid, gateway_oid);
    m.status = OrderStatus::Paid;
    m.gateway_payment_id = Some(payment_id.to_string());
    m
}
