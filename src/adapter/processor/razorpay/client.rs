use std::sync::Arc;

use base64::engine::general_purpose::STANDARD as b64engine;
use base64::Engine;
use hyper::header::{HeaderValue, ACCEPT, AUTHORIZATION, CONTENT_TYPE};
use hyper::Method;
use serde::de::DeserializeOwned;
use serde::ser::Serialize;
use tokio_native_tls::TlsConnector;

use crate::logging::AppLogContext;

use super::super::base_client::{BaseClient, BaseClientError, BaseClientErrorReason};

const API_VERSION: &str = "v1";

pub(super) struct AppRazorpayClient {
    auth_header: String,
    _base_client: BaseClient,
}

impl AppRazorpayClient {
    pub(super) async fn try_build(
        logctx: Arc<AppLogContext>,
        secure_connector: &TlsConnector,
        host: String,
        port: u16,
        key_id: &str,
        key_secret: &str,
    ) -> Result<Self, BaseClientError> {
        let _base_client = BaseClient::try_build(logctx, secure_connector, host, port).await?;
        // the gateway authenticates REST calls with the key pair in a
        // basic-auth header
        let token = b64engine.encode(format!("{key_id}:{key_secret}"));
        Ok(Self {
            auth_header: format!("Basic {token}"),
            _base_client,
        })
    }

    pub(super) async fn execute_json<D, S>(
        &mut self,
        resource_path: &str,
        method: Method,
        body_obj: &S,
    ) -> Result<D, BaseClientError>
    where
        D: DeserializeOwned + Send + 'static,
        S: Serialize + Send + 'static,
    {
        let raw_body = serde_json::to_vec(body_obj).map_err(|e| BaseClientError {
            reason: BaseClientErrorReason::SerialiseFailure(e.to_string()),
        })?;
        let headers = vec![
            (
                AUTHORIZATION,
                HeaderValue::from_str(self.auth_header.as_str()).map_err(|_e| {
                    BaseClientError {
                        reason: BaseClientErrorReason::HttpRequest(
                            "auth-header-parse-fail".to_string(),
                        ),
                    }
                })?,
            ),
            (ACCEPT, HeaderValue::from_static("application/json")),
            (CONTENT_TYPE, HeaderValue::from_static("application/json")),
        ];
        let uri = "/".to_string() + API_VERSION + resource_path;
        let (raw_resp, status) = self
            ._base_client
            .execute(uri.as_str(), method, raw_body, headers)
            .await?;
        if status.is_success() {
            serde_json::from_slice::<D>(&raw_resp).map_err(|e| BaseClientError {
                reason: BaseClientErrorReason::DeserialiseFailure(e.to_string(), status.as_u16()),
            })
        } else {
            let detail = String::from_utf8_lossy(&raw_resp).to_string();
            Err(BaseClientError {
                reason: BaseClientErrorReason::DeserialiseFailure(detail, status.as_u16()),
            })
        }
    } // end of fn execute_json
} // end of impl AppRazorpayClient
