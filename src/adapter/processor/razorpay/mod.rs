mod client;
mod mock;
mod resources;

use std::boxed::Box;
use std::sync::Arc;

use async_trait::async_trait;
use hmac::{Hmac, Mac};
use hyper::Method;
use sha2::Sha256;
use tokio_native_tls::{native_tls, TlsConnector as TlsConnectorWrapper};

use crate::confidentiality::AbstractConfidentiality;
use crate::logging::{app_log_event, AppLogContext, AppLogLevel};

use self::client::AppRazorpayClient;
use self::resources::{CreateGatewayOrder, GatewayOrder, GatewayOrderNotes};
use super::{
    AppGatewayKeyStatus, AppProcessorErrorReason, BaseClientError, GatewayOrderCreateArgs,
    GatewayOrderModel,
};

pub(super) use mock::MockRazorpayCtx;

#[async_trait]
pub(crate) trait AbstRazorpayContext: Send + Sync {
    async fn create_order(
        &self,
        args: &GatewayOrderCreateArgs,
    ) -> Result<GatewayOrderModel, AppProcessorErrorReason>;

    fn verify_signature(
        &self,
        gateway_order_id: &str,
        gateway_payment_id: &str,
        signature_hex: &str,
    ) -> Result<bool, AppProcessorErrorReason>;

    fn publishable_key_id(&self) -> Result<String, AppProcessorErrorReason>;

    fn key_status(&self) -> AppGatewayKeyStatus;
}

/// recompute HMAC-SHA256 over `orderId|paymentId` with the gateway key
/// secret, compare against the hex signature the client relayed. The
/// comparison runs in constant time, a malformed or wrong-length
/// signature simply fails verification.
pub(super) fn verify_hmac_signature(
    key_secret: &str,
    gateway_order_id: &str,
    gateway_payment_id: &str,
    signature_hex: &str,
) -> Result<bool, AppProcessorErrorReason> {
    let payload = format!("{gateway_order_id}|{gateway_payment_id}");
    let mut mac = Hmac::<Sha256>::new_from_slice(key_secret.as_bytes())
        .map_err(|_e| AppProcessorErrorReason::CredentialCorrupted)?;
    mac.update(payload.as_bytes());
    let sig_bytes = match hex::decode(signature_hex) {
        Ok(v) => v,
        Err(_e) => return Ok(false),
    };
    if sig_bytes.len() != 32 {
        return Ok(false); // length of a SHA-256 digest, checked before comparing
    }
    Ok(mac.verify_slice(&sig_bytes).is_ok())
} // end of fn verify_hmac_signature

pub(super) struct AppRazorpayCtx {
    host: String,
    port: u16,
    secure_connector: TlsConnectorWrapper,
    key_id: Option<String>,
    key_secret: Option<String>,
    missing: Vec<String>,
    logctx: Arc<AppLogContext>,
}

impl AppRazorpayCtx {
    pub(super) fn try_build(
        host: &str,
        port: u16,
        key_id_label: &str,
        key_secret_label: &str,
        cfdntl: Arc<Box<dyn AbstractConfidentiality>>,
        logctx: Arc<AppLogContext>,
    ) -> Result<Self, AppProcessorErrorReason> {
        // a missing credential must not abort process start, the health
        // endpoint keeps reporting it while checkout calls fail clearly
        let mut missing = Vec::new();
        let key_id = cfdntl
            .try_get_payload(key_id_label)
            .map_err(|_e| missing.push(key_id_label.to_string()))
            .ok();
        let key_secret = cfdntl
            .try_get_payload(key_secret_label)
            .map_err(|_e| missing.push(key_secret_label.to_string()))
            .ok();
        if !missing.is_empty() {
            app_log_event!(
                logctx,
                AppLogLevel::WARNING,
                "gateway credentials missing: {:?}",
                missing
            );
        }
        let secure_connector = {
            let mut builder = native_tls::TlsConnector::builder();
            builder.min_protocol_version(Some(native_tls::Protocol::Tlsv12));
            let c = builder
                .build()
                .map_err(|e| BaseClientError { reason: e.into() })
                .map_err(AppProcessorErrorReason::from)?;
            c.into()
        };
        Ok(Self {
            host: host.to_string(),
            port,
            secure_connector,
            key_id,
            key_secret,
            missing,
            logctx,
        })
    } // end of fn try_build

    fn credential_pair(&self) -> Result<(&str, &str), AppProcessorErrorReason> {
        match (self.key_id.as_ref(), self.key_secret.as_ref()) {
            (Some(kid), Some(sec)) => Ok((kid.as_str(), sec.as_str())),
            _others => Err(AppProcessorErrorReason::MissingCredential(
                self.missing.clone(),
            )),
        }
    }
} // end of impl AppRazorpayCtx

#[async_trait]
impl AbstRazorpayContext for AppRazorpayCtx {
    async fn create_order(
        &self,
        args: &GatewayOrderCreateArgs,
    ) -> Result<GatewayOrderModel, AppProcessorErrorReason> {
        let (key_id, key_secret) = self.credential_pair()?;
        let body_obj = CreateGatewayOrder {
            amount: args.amount_paise,
            currency: args.currency.clone(),
            receipt: args.receipt.clone(),
            notes: GatewayOrderNotes {
                customer_name: args.customer_name.clone(),
                customer_phone: args.customer_phone.clone(),
                customer_email: args.customer_email.clone(),
            },
        };
        let mut _client = AppRazorpayClient::try_build(
            self.logctx.clone(),
            &self.secure_connector,
            self.host.clone(),
            self.port,
            key_id,
            key_secret,
        )
        .await
        .map_err(AppProcessorErrorReason::from)?;
        let resp = _client
            .execute_json::<GatewayOrder, CreateGatewayOrder>("/orders", Method::POST, &body_obj)
            .await
            .map_err(AppProcessorErrorReason::from)?;
        Ok(GatewayOrderModel {
            id: resp.id,
            amount_paise: resp.amount,
            currency: resp.currency,
        })
    } // end of fn create_order

    fn verify_signature(
        &self,
        gateway_order_id: &str,
        gateway_payment_id: &str,
        signature_hex: &str,
    ) -> Result<bool, AppProcessorErrorReason> {
        let (_key_id, key_secret) = self.credential_pair()?;
        verify_hmac_signature(
            key_secret,
            gateway_order_id,
            gateway_payment_id,
            signature_hex,
        )
    }

    fn publishable_key_id(&self) -> Result<String, AppProcessorErrorReason> {
        self.key_id
            .clone()
            .ok_or(AppProcessorErrorReason::MissingCredential(
                self.missing.clone(),
            ))
    }

    fn key_status(&self) -> AppGatewayKeyStatus {
        AppGatewayKeyStatus {
            key_id_present: self.key_id.is_some(),
            secret_present: self.key_secret.is_some(),
            missing: self.missing.clone(),
        }
    }
} // end of impl AbstRazorpayContext for AppRazorpayCtx
