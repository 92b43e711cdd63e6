mod dto;
mod model;
mod repository;
mod usecase;

use std::sync::Arc;

use storefront::adapter::datastore::{AbstInMemoryDStore, AppInMemoryDStore};
use storefront::constant::logging::{Destination, Level};
use storefront::logging::AppLogContext;
use storefront::{AppBasepathCfg, AppInMemoryDbCfg, AppLogHandlerCfg, AppLoggingCfg};

pub(crate) const EXAMPLE_REL_PATH: &str = "tests/unit/examples/";

pub(crate) fn ut_setup_log_context() -> Arc<AppLogContext> {
    let basepath = AppBasepathCfg {
        system: ".".to_string(),
        service: ".".to_string(),
    };
    let cfg = AppLoggingCfg {
        handlers: vec![AppLogHandlerCfg {
            min_level: Level::INFO,
            destination: Destination::CONSOLE,
            alias: "console".to_string(),
            path: None,
        }],
        loggers: vec![],
    };
    Arc::new(AppLogContext::new(&basepath, &cfg))
}

pub(crate) fn ut_setup_dstore(max_items: u32) -> Arc<Box<dyn AbstInMemoryDStore>> {
    let cfg = AppInMemoryDbCfg {
        alias: "utest".to_string(),
        max_items,
    };
    let obj: Box<dyn AbstInMemoryDStore> = Box::new(AppInMemoryDStore::new(&cfg));
    Arc::new(obj)
}
