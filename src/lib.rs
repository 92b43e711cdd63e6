pub mod adapter;
pub mod api;
pub mod confidentiality;
pub mod constant;
pub mod error;
pub mod logging;
pub mod model;
pub mod network;
pub mod usecase;

mod config;
pub use config::{
    ApiServerCfg, AppBasepathCfg, AppConfig, AppDataStoreCfg, AppGatewayCfg, AppInMemoryDbCfg,
    AppLogHandlerCfg, AppLoggerCfg, AppLoggingCfg, WebApiListenCfg, WebApiRouteCfg,
};

use std::result::Result;
use std::sync::Arc;

use crate::adapter::datastore::{self, AbstInMemoryDStore};
use crate::adapter::notify::{app_notify_context, AbstractNotifyQueue};
use crate::adapter::processor::{
    app_processor_context, AbstractPaymentGateway, AppProcessorError,
};
use crate::confidentiality::AbstractConfidentiality;
use crate::logging::AppLogContext;

type WebApiPath = String;
type WebApiHdlrLabel = &'static str;
pub(crate) type AppLogAlias = String;

pub struct AppDataStoreContext {
    pub in_mem: Option<Arc<Box<dyn AbstInMemoryDStore>>>,
}

#[derive(Debug)]
pub enum ShrStateInitProgress {
    DataStore,
    ExternalGateway,
}

#[derive(Debug)]
pub struct ShrStateInitError {
    pub progress: ShrStateInitProgress,
}

impl From<AppProcessorError> for ShrStateInitError {
    fn from(_value: AppProcessorError) -> Self {
        Self {
            progress: ShrStateInitProgress::ExternalGateway,
        }
    }
}

// global state shared by all workers
pub struct AppSharedState {
    _config: Arc<AppConfig>,
    _log_ctx: Arc<AppLogContext>,
    _dstore: Arc<AppDataStoreContext>,
    _gateway: Arc<Box<dyn AbstractPaymentGateway>>,
    _notify_queue: Arc<Box<dyn AbstractNotifyQueue>>,
}

impl AppSharedState {
    pub fn new(
        cfg: AppConfig,
        log: AppLogContext,
        confidential: Box<dyn AbstractConfidentiality>,
    ) -> Result<Self, ShrStateInitError> {
        let confidential = Arc::new(confidential);
        let log = Arc::new(log);
        let in_mem = datastore::build_context(&cfg.api_server.data_store);
        let in_mem = in_mem.map(Arc::new).ok_or(ShrStateInitError {
            progress: ShrStateInitProgress::DataStore,
        })?;
        let ds_ctx = Arc::new(AppDataStoreContext {
            in_mem: Some(in_mem),
        });
        let gateway =
            app_processor_context(&cfg.api_server.gateway, confidential, log.clone())?;
        let notify_queue = app_notify_context(log.clone());
        Ok(Self {
            _config: Arc::new(cfg),
            _log_ctx: log,
            _dstore: ds_ctx,
            _gateway: Arc::new(gateway),
            _notify_queue: Arc::new(notify_queue),
        })
    } // end of fn new

    pub fn config(&self) -> &Arc<AppConfig> {
        &self._config
    }

    pub fn log_context(&self) -> &Arc<AppLogContext> {
        &self._log_ctx
    }

    pub fn datastore(&self) -> Arc<AppDataStoreContext> {
        self._dstore.clone()
    }

    pub fn gateway(&self) -> Arc<Box<dyn AbstractPaymentGateway>> {
        self._gateway.clone()
    }

    pub fn notify_queue(&self) -> Arc<Box<dyn AbstractNotifyQueue>> {
        self._notify_queue.clone()
    }
} // end of impl AppSharedState

impl Clone for AppSharedState {
    fn clone(&self) -> Self {
        Self {
            _config: self._config.clone(),
            _log_ctx: self._log_ctx.clone(),
            _dstore: self._dstore.clone(),
            _gateway: self._gateway.clone(),
            _notify_queue: self._notify_queue.clone(),
        }
    }
}
