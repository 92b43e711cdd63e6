use std::boxed::Box;
use std::result::Result as DefaultResult;
use std::sync::Arc;

use crate::adapter::notify::{AbstractNotifyQueue, OrderNotifySnapshot};
use crate::adapter::processor::{
    AbstractPaymentGateway, AppProcessorError, AppProcessorErrorReason,
};
use crate::adapter::repository::{AbsOrderRepo, OrderPaidOutcome};
use crate::api::web::dto::{CustomerSnippetDto, PaymentVerifyReqDto, PaymentVerifyRespDto};
use crate::error::{AppError, AppErrorCode};
use crate::logging::{app_log_event, AppLogContext, AppLogLevel};
use crate::model::OrderModel;

pub enum PaymentVerifyUcError {
    InvalidPayload(String),
    SignatureMismatch,
    OrderNotExist,
    GatewayOrderMismatch,
    NotPayable(String),
    ServerMisconfig(Vec<String>),
    Server(AppError),
}

impl From<AppProcessorError> for PaymentVerifyUcError {
    fn from(value: AppProcessorError) -> Self {
        match value.reason {
            AppProcessorErrorReason::MissingCredential(missing) => Self::ServerMisconfig(missing),
            _others => Self::Server(AppError {
                code: AppErrorCode::CryptoFailure,
                detail: Some(format!("{:?}", _others)),
            }),
        }
    }
}
impl From<AppError> for PaymentVerifyUcError {
    fn from(value: AppError) -> Self {
        match &value.code {
            AppErrorCode::OrderNotExist => Self::OrderNotExist,
            _others => Self::Server(value),
        }
    }
}

pub struct PaymentVerifyUseCase {
    pub repo_order: Box<dyn AbsOrderRepo>,
    pub gateway: Arc<Box<dyn AbstractPaymentGateway>>,
    pub notify_queue: Arc<Box<dyn AbstractNotifyQueue>>,
    pub logctx: Arc<AppLogContext>,
}

impl PaymentVerifyUseCase {
    pub async fn execute(
        self,
        req: PaymentVerifyReqDto,
    ) -> DefaultResult<PaymentVerifyRespDto, PaymentVerifyUcError> {
        Self::validate_shape(&req)?;
        // the signature has to hold before anything is even looked up, a
        // forged confirmation learns nothing about which orders exist
        let sig_ok = self.gateway.verify_payment_signature(
            req.gateway_order_id.as_str(),
            req.gateway_payment_id.as_str(),
            req.gateway_signature.as_str(),
        )?;
        if !sig_ok {
            return Err(PaymentVerifyUcError::SignatureMismatch);
        }
        let oid = req.internal_order_id.as_str();
        let stored = self
            .repo_order
            .fetch_order(oid)
            .await
            .map_err(PaymentVerifyUcError::from)?
            .ok_or(PaymentVerifyUcError::OrderNotExist)?;
        if stored.gateway_order_id != req.gateway_order_id {
            return Err(PaymentVerifyUcError::GatewayOrderMismatch);
        }
        if stored.status == crate::model::OrderStatus::Paid {
            // settled earlier, repeating the call changes nothing and
            // does not notify again
            return Ok(Self::success_resp(&stored));
        }
        let outcome = self
            .repo_order
            .mark_paid_once(oid, req.gateway_payment_id.as_str())
            .await
            .map_err(PaymentVerifyUcError::from)?;
        match outcome {
            OrderPaidOutcome::Transitioned(m) => {
                self.notify_queue.submit(OrderNotifySnapshot::from(&m));
                Ok(Self::success_resp(&m))
            }
            OrderPaidOutcome::AlreadyPaid(m) => Ok(Self::success_resp(&m)),
            OrderPaidOutcome::Refused(status) => {
                let logctx_p = &self.logctx;
                // cancellation raced a late payment, keep the record in
                // the log, nothing reconciles it in this flow
                app_log_event!(
                    logctx_p,
                    AppLogLevel::WARNING,
                    "paid-transition-refused, order:{}, status:{}, gateway-payment:{}",
                    oid,
                    status.as_str(),
                    req.gateway_payment_id.as_str()
                );
                Err(PaymentVerifyUcError::NotPayable(
                    status.as_str().to_string(),
                ))
            }
        }
    } // end of fn execute

    fn validate_shape(req: &PaymentVerifyReqDto) -> DefaultResult<(), PaymentVerifyUcError> {
        if !req.gateway_order_id.starts_with("order_") {
            Err(PaymentVerifyUcError::InvalidPayload(
                "invalid-gateway-order-id".to_string(),
            ))
        } else if !req.gateway_payment_id.starts_with("pay_") {
            Err(PaymentVerifyUcError::InvalidPayload(
                "invalid-gateway-payment-id".to_string(),
            ))
        } else if req.gateway_signature.len() < 64 {
            Err(PaymentVerifyUcError::InvalidPayload(
                "invalid-signature-length".to_string(),
            ))
        } else if req.internal_order_id.is_empty() {
            Err(PaymentVerifyUcError::InvalidPayload(
                "internal-order-id-required".to_string(),
            ))
        } else {
            Ok(())
        }
    }

    fn success_resp(m: &OrderModel) -> PaymentVerifyRespDto {
        PaymentVerifyRespDto {
            success: true,
            order_id: m.id.clone(),
            status: m.status.as_str().to_string(),
            customer: CustomerSnippetDto {
                name: m.customer.name.clone(),
                email: m.customer.email.clone(),
                phone: m.customer.phone.clone(),
            },
        }
    }
} // end of impl PaymentVerifyUseCase
