use std::boxed::Box;
use std::collections::HashMap;
use std::result::Result as DefaultResult;
use std::sync::Arc;

use chrono::{Local as LocalTime, Utc};

use crate::adapter::processor::{
    AbstractPaymentGateway, AppProcessorError, AppProcessorErrorReason, GatewayOrderCreateArgs,
};
use crate::adapter::repository::{AbsOrderRepo, AbsProductRepo, AbsShopSettingsRepo};
use crate::api::web::dto::{
    OrderCreateReqDto, OrderCreateRespErrorDto, OrderCreateRespOkDto, OrderLineErrorDto,
    OrderLineErrorReason, OrderLineQtyLimitDto, OrderLineReqDto,
};
use crate::constant::{app_meta, hard_limit, CURRENCY_LABEL};
use crate::error::{AppError, AppErrorCode};
use crate::logging::{app_log_event, AppLogContext, AppLogLevel};
use crate::model::{
    CheckoutContactModel, OrderLineModel, OrderModel, ProductModel,
};

pub enum CreateOrderUcError {
    ShopClosed(String),
    ReqContent(OrderCreateRespErrorDto),
    ServerMisconfig(Vec<String>),
    Server(Vec<AppError>),
}

impl From<AppProcessorError> for CreateOrderUcError {
    fn from(value: AppProcessorError) -> Self {
        match value.reason {
            AppProcessorErrorReason::MissingCredential(missing) => Self::ServerMisconfig(missing),
            _others => Self::Server(vec![AppError {
                code: AppErrorCode::GatewayRemoteUnavail,
                detail: Some(format!("{:?}", _others)),
            }]),
        }
    }
}

pub struct CreateOrderUseCase {
    pub repo_order: Box<dyn AbsOrderRepo>,
    pub repo_product: Box<dyn AbsProductRepo>,
    pub repo_settings: Box<dyn AbsShopSettingsRepo>,
    pub gateway: Arc<Box<dyn AbstractPaymentGateway>>,
    pub timing_enforced: bool,
    pub logctx: Arc<AppLogContext>,
}

impl CreateOrderUseCase {
    pub async fn execute(
        self,
        req: OrderCreateReqDto,
    ) -> DefaultResult<OrderCreateRespOkDto, CreateOrderUcError> {
        self.check_order_window().await?;
        let contact = Self::validate_contact(req.customer)?;
        Self::validate_line_shape(&req.items)?;
        let resolved = self.resolve_products(&req.items).await?;
        let lines = req
            .items
            .iter()
            .map(|d| {
                let p = resolved.get(d.id.as_str()).unwrap();
                OrderLineModel::from_resolved(p, d.quantity)
            })
            .collect::<Vec<_>>();
        let has_free_delivery_item = resolved.values().any(|p| p.free_delivery);
        // thresholds of the fee ladder are whole rupees
        let subtotal_rupees: u64 = lines
            .iter()
            .map(|l| (l.unit_price_rupees as u64) * (l.quantity as u64))
            .sum();
        let pricing = self
            .repo_settings
            .fetch_delivery_pricing()
            .await
            .map_err(|e| CreateOrderUcError::Server(vec![e]))?;
        let delivery_paise = pricing.delivery_charge_paise(subtotal_rupees, has_free_delivery_item);

        let key_id = self.gateway.publishable_key_id()?;
        let oid = OrderModel::generate_order_id(app_meta::MACHINE_CODE);
        let timenow = LocalTime::now().fixed_offset();
        let mut order = OrderModel::assemble(
            oid,
            String::new(),
            contact.customer,
            contact.address,
            lines,
            delivery_paise,
            timenow,
        );
        let gw_order = self
            .gateway
            .create_gateway_order(GatewayOrderCreateArgs {
                amount_paise: order.total_paise,
                currency: CURRENCY_LABEL.to_string(),
                receipt: format!("rl_{}", Utc::now().timestamp_millis()),
                customer_name: order.customer.name.clone(),
                customer_phone: order.customer.phone.clone(),
                customer_email: order.customer.email.clone(),
            })
            .await?;
        order.gateway_order_id = gw_order.id.clone();
        if let Err(e) = self.repo_order.create_order(&order).await {
            let logctx_p = &self.logctx;
            app_log_event!(logctx_p, AppLogLevel::ERROR, "repo-fail-save: {e}");
            return Err(CreateOrderUcError::Server(vec![e]));
        }
        Ok(OrderCreateRespOkDto {
            gateway_order_id: gw_order.id,
            amount: order.total_paise,
            currency: CURRENCY_LABEL.to_string(),
            key_id,
            internal_order_id: order.id,
            subtotal: order.subtotal_paise,
            cgst_total: order.cgst_total_paise,
            sgst_total: order.sgst_total_paise,
            delivery_charge: order.delivery_paise,
            total: order.total_paise,
        })
    } // end of fn execute

    async fn check_order_window(&self) -> DefaultResult<(), CreateOrderUcError> {
        if !self.timing_enforced {
            return Ok(());
        }
        let timing = self
            .repo_settings
            .fetch_order_timing()
            .await
            .map_err(|e| CreateOrderUcError::Server(vec![e]))?;
        if timing.accepts(Utc::now()) {
            Ok(())
        } else {
            // distinct from a validation failure, the shop is closed
            let msg = format!(
                "Sorry, we are receiving orders only between {}.",
                timing.window_label()
            );
            Err(CreateOrderUcError::ShopClosed(msg))
        }
    }

    fn validate_contact(
        data: crate::api::web::dto::CheckoutCustomerDto,
    ) -> DefaultResult<CheckoutContactModel, CreateOrderUcError> {
        CheckoutContactModel::try_from(data).map_err(|e| {
            CreateOrderUcError::ReqContent(OrderCreateRespErrorDto {
                customer: Some(e),
                items: None,
                nonfield: None,
            })
        })
    }

    fn validate_line_shape(data: &[OrderLineReqDto]) -> DefaultResult<(), CreateOrderUcError> {
        if data.is_empty() {
            return Err(CreateOrderUcError::ReqContent(OrderCreateRespErrorDto {
                customer: None,
                items: None,
                nonfield: Some("cart-is-empty".to_string()),
            }));
        }
        let errors = data
            .iter()
            .filter(|d| {
                d.quantity < hard_limit::MIN_ORDER_LINE_QUANTITY
                    || d.quantity > hard_limit::MAX_ORDER_LINE_QUANTITY
            })
            .map(|d| OrderLineErrorDto {
                id: d.id.clone(),
                reason: OrderLineErrorReason::QuantityLimit,
                qty_limit: Some(OrderLineQtyLimitDto {
                    min_: hard_limit::MIN_ORDER_LINE_QUANTITY,
                    max_: hard_limit::MAX_ORDER_LINE_QUANTITY,
                    given: d.quantity,
                }),
            })
            .collect::<Vec<_>>();
        if errors.is_empty() {
            Ok(())
        } else {
            Err(CreateOrderUcError::ReqContent(OrderCreateRespErrorDto {
                customer: None,
                items: Some(errors),
                nonfield: None,
            }))
        }
    } // end of fn validate_line_shape

    async fn resolve_products(
        &self,
        data: &[OrderLineReqDto],
    ) -> DefaultResult<HashMap<String, ProductModel>, CreateOrderUcError> {
        let ids = data.iter().map(|d| d.id.clone()).collect::<Vec<String>>();
        let found = self
            .repo_product
            .fetch_many(&ids)
            .await
            .map_err(|e| CreateOrderUcError::Server(vec![e]))?;
        let found = found
            .into_iter()
            .map(|p| (p.id.clone(), p))
            .collect::<HashMap<String, ProductModel>>();
        // one missing or unavailable product fails the whole request, a
        // partial order must never reach the gateway
        let errors = data
            .iter()
            .filter_map(|d| match found.get(d.id.as_str()) {
                None => Some(OrderLineErrorDto {
                    id: d.id.clone(),
                    reason: OrderLineErrorReason::NotExist,
                    qty_limit: None,
                }),
                Some(p) if !p.available => Some(OrderLineErrorDto {
                    id: d.id.clone(),
                    reason: OrderLineErrorReason::Unavailable,
                    qty_limit: None,
                }),
                Some(_p) => None,
            })
            .collect::<Vec<_>>();
        if errors.is_empty() {
            Ok(found)
        } else {
            Err(CreateOrderUcError::ReqContent(OrderCreateRespErrorDto {
                customer: None,
                items: Some(errors),
                nonfield: None,
            }))
        }
    } // end of fn resolve_products
} // end of impl CreateOrderUseCase
