mod base_client;
mod razorpay;

use std::boxed::Box;
use std::marker::{Send, Sync};
use std::result::Result;
use std::sync::Arc;

use async_trait::async_trait;

use crate::config::AppGatewayCfg;
use crate::confidentiality::AbstractConfidentiality;
use crate::logging::AppLogContext;

pub use self::base_client::{BaseClientError, BaseClientErrorReason};
use self::razorpay::{AbstRazorpayContext, AppRazorpayCtx, MockRazorpayCtx};

pub struct GatewayOrderCreateArgs {
    pub amount_paise: u64,
    pub currency: String,
    pub receipt: String,
    pub customer_name: String,
    pub customer_phone: String,
    pub customer_email: String,
}

pub struct GatewayOrderModel {
    pub id: String,
    pub amount_paise: u64,
    pub currency: String,
}

pub struct AppGatewayKeyStatus {
    pub key_id_present: bool,
    pub secret_present: bool,
    pub missing: Vec<String>,
}

#[derive(Debug)]
pub enum AppProcessorErrorReason {
    InvalidConfig,
    MissingCredential(Vec<String>),
    CredentialCorrupted,
    LowLvlNet(BaseClientError),
}

#[derive(Debug)]
pub enum AppProcessorFnLabel {
    TryBuild,
    CreateGatewayOrder,
    VerifySignature,
    PublishableKey,
}

#[derive(Debug)]
pub struct AppProcessorError {
    pub reason: AppProcessorErrorReason,
    pub fn_label: AppProcessorFnLabel,
}

impl From<BaseClientError> for AppProcessorErrorReason {
    fn from(value: BaseClientError) -> Self {
        Self::LowLvlNet(value)
    }
}

#[async_trait]
pub trait AbstractPaymentGateway: Send + Sync {
    async fn create_gateway_order(
        &self,
        args: GatewayOrderCreateArgs,
    ) -> Result<GatewayOrderModel, AppProcessorError>;

    fn verify_payment_signature(
        &self,
        gateway_order_id: &str,
        gateway_payment_id: &str,
        signature_hex: &str,
    ) -> Result<bool, AppProcessorError>;

    fn publishable_key_id(&self) -> Result<String, AppProcessorError>;

    fn key_status(&self) -> AppGatewayKeyStatus;
}

struct AppProcessorContext {
    _razorpay: Box<dyn AbstRazorpayContext>,
    _logctx: Arc<AppLogContext>,
}

impl AppProcessorContext {
    fn new(
        cfg: &AppGatewayCfg,
        cfdntl: Arc<Box<dyn AbstractConfidentiality>>,
        _logctx: Arc<AppLogContext>,
    ) -> Result<Self, AppProcessorError> {
        let result = match cfg {
            AppGatewayCfg::dev {
                name,
                host,
                port,
                confidential_key_id,
                confidential_key_secret,
            } => {
                if name.to_lowercase() == "razorpay" {
                    AppRazorpayCtx::try_build(
                        host.as_str(),
                        *port,
                        confidential_key_id.as_str(),
                        confidential_key_secret.as_str(),
                        cfdntl,
                        _logctx.clone(),
                    )
                    .map(|c| Box::new(c) as Box<dyn AbstRazorpayContext>)
                } else {
                    Err(AppProcessorErrorReason::InvalidConfig)
                }
            }
            AppGatewayCfg::test {
                name,
                confidential_key_id,
                confidential_key_secret,
            } => {
                if name.to_lowercase() == "razorpay" {
                    Ok(MockRazorpayCtx::build(
                        confidential_key_id.as_str(),
                        confidential_key_secret.as_str(),
                        cfdntl,
                    ))
                } else {
                    Err(AppProcessorErrorReason::InvalidConfig)
                }
            }
        };
        match result {
            Ok(_razorpay) => Ok(Self { _razorpay, _logctx }),
            Err(reason) => Err(AppProcessorError {
                reason,
                fn_label: AppProcessorFnLabel::TryBuild,
            }),
        }
    } // end of fn new
} // end of impl AppProcessorContext

#[async_trait]
impl AbstractPaymentGateway for AppProcessorContext {
    async fn create_gateway_order(
        &self,
        args: GatewayOrderCreateArgs,
    ) -> Result<GatewayOrderModel, AppProcessorError> {
        self._razorpay
            .create_order(&args)
            .await
            .map_err(|reason| AppProcessorError {
                reason,
                fn_label: AppProcessorFnLabel::CreateGatewayOrder,
            })
    }

    fn verify_payment_signature(
        &self,
        gateway_order_id: &str,
        gateway_payment_id: &str,
        signature_hex: &str,
    ) -> Result<bool, AppProcessorError> {
        self._razorpay
            .verify_signature(gateway_order_id, gateway_payment_id, signature_hex)
            .map_err(|reason| AppProcessorError {
                reason,
                fn_label: AppProcessorFnLabel::VerifySignature,
            })
    }

    fn publishable_key_id(&self) -> Result<String, AppProcessorError> {
        self._razorpay
            .publishable_key_id()
            .map_err(|reason| AppProcessorError {
                reason,
                fn_label: AppProcessorFnLabel::PublishableKey,
            })
    }

    fn key_status(&self) -> AppGatewayKeyStatus {
        self._razorpay.key_status()
    }
} // end of impl AbstractPaymentGateway for AppProcessorContext

pub(crate) fn app_processor_context(
    cfg: &AppGatewayCfg,
    cfdntl: Arc<Box<dyn AbstractConfidentiality>>,
    logctx: Arc<AppLogContext>,
) -> Result<Box<dyn AbstractPaymentGateway>, AppProcessorError> {
    let proc = AppProcessorContext::new(cfg, cfdntl, logctx)?;
    Ok(Box::new(proc))
}
