use std::boxed::Box;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::confidentiality::AbstractConfidentiality;

use super::super::{
    AppGatewayKeyStatus, AppProcessorErrorReason, GatewayOrderCreateArgs, GatewayOrderModel,
};
use super::{verify_hmac_signature, AbstRazorpayContext};

const MOCK_KEY_ID: &str = "rzp_test_mockkey";
const MOCK_KEY_SECRET: &str = "mock-gateway-secret";

/// gateway stand-in for development / test configurations, no network
/// involved, signature verification still runs the real HMAC so callers
/// can exercise the whole verify flow
pub(crate) struct MockRazorpayCtx {
    key_id: String,
    key_secret: String,
    serial: Mutex<u32>,
}

impl MockRazorpayCtx {
    pub(crate) fn build(
        key_id_label: &str,
        key_secret_label: &str,
        cfdntl: Arc<Box<dyn AbstractConfidentiality>>,
    ) -> Box<dyn AbstRazorpayContext> {
        let key_id = cfdntl
            .try_get_payload(key_id_label)
            .unwrap_or_else(|_e| MOCK_KEY_ID.to_string());
        let key_secret = cfdntl
            .try_get_payload(key_secret_label)
            .unwrap_or_else(|_e| MOCK_KEY_SECRET.to_string());
        Box::new(Self {
            key_id,
            key_secret,
            serial: Mutex::new(0),
        })
    }
}

#[async_trait]
impl AbstRazorpayContext for MockRazorpayCtx {
    async fn create_order(
        &self,
        args: &GatewayOrderCreateArgs,
    ) -> Result<GatewayOrderModel, AppProcessorErrorReason> {
        let serial = {
            let mut g = self.serial.lock().unwrap();
            *g += 1;
            *g
        };
        Ok(GatewayOrderModel {
            id: format!("order_mock{serial:08}"),
            amount_paise: args.amount_paise,
            currency: args.currency.clone(),
        })
    }

    fn verify_signature(
        &self,
        gateway_order_id: &str,
        gateway_payment_id: &str,
        signature_hex: &str,
    ) -> Result<bool, AppProcessorErrorReason> {
        verify_hmac_signature(
            self.key_secret.as_str(),
            gateway_order_id,
            gateway_payment_id,
            signature_hex,
        )
    }

    fn publishable_key_id(&self) -> Result<String, AppProcessorErrorReason> {
        Ok(self.key_id.clone())
    }

    fn key_status(&self) -> AppGatewayKeyStatus {
        AppGatewayKeyStatus {
            key_id_present: true,
            secret_present: true,
            missing: Vec::new(),
        }
    }
} // end of impl AbstRazorpayContext for MockRazorpayCtx
