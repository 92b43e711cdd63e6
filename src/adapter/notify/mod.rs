use std::boxed::Box;
use std::sync::Arc;

use async_trait::async_trait;
use futures_util::future::join_all;

use crate::logging::{app_log_event, AppLogContext, AppLogLevel};
use crate::model::{CustomerModel, OrderModel};

/// the slice of an order that post-purchase notifications need, detached
/// from the repository so the fan-out owns its own copy
#[derive(Clone)]
pub struct OrderNotifySnapshot {
    pub order_id: String,
    pub status: String,
    pub customer: CustomerModel,
    pub total_paise: u64,
}

impl From<&OrderModel> for OrderNotifySnapshot {
    fn from(value: &OrderModel) -> Self {
        Self {
            order_id: value.id.clone(),
            status: value.status.as_str().to_string(),
            customer: value.customer.clone(),
            total_paise: value.total_paise,
        }
    }
}

#[derive(Debug)]
pub struct AppNotifyError {
    pub sink_label: &'static str,
    pub detail: String,
}

#[async_trait]
pub trait AbstractNotifySink: Send + Sync {
    fn label(&self) -> &'static str;
    async fn deliver(&self, snapshot: &OrderNotifySnapshot) -> Result<(), AppNotifyError>;
}

/// runs every sink concurrently, one sink failing never affects the
/// others, failures end up in the server log only
pub struct AppNotifyFanout {
    sinks: Vec<Box<dyn AbstractNotifySink>>,
    logctx: Arc<AppLogContext>,
}

impl AppNotifyFanout {
    pub fn new(sinks: Vec<Box<dyn AbstractNotifySink>>, logctx: Arc<AppLogContext>) -> Self {
        Self { sinks, logctx }
    }

    pub async fn dispatch(&self, snapshot: OrderNotifySnapshot) {
        let logctx_p = &self.logctx;
        let iter = self.sinks.iter().map(|sink| sink.deliver(&snapshot));
        let results = join_all(iter).await;
        let num_failed = results
            .into_iter()
            .filter_map(|r| r.err())
            .map(|e| {
                app_log_event!(
                    logctx_p,
                    AppLogLevel::WARNING,
                    "notify-sink-failed, sink:{}, order:{}, detail:{}",
                    e.sink_label,
                    snapshot.order_id.as_str(),
                    e.detail.as_str()
                );
            })
            .count();
        app_log_event!(
            logctx_p,
            AppLogLevel::DEBUG,
            "notify-fanout-done, order:{}, failed:{}",
            snapshot.order_id.as_str(),
            num_failed
        );
    } // end of fn dispatch
} // end of impl AppNotifyFanout

/// submission side of the fan-out, handlers hand a snapshot over and
/// return immediately, the caller's response never waits for delivery
pub trait AbstractNotifyQueue: Send + Sync {
    fn submit(&self, snapshot: OrderNotifySnapshot);
}

pub struct AppBackgroundNotifyQueue {
    fanout: Arc<AppNotifyFanout>,
}

impl AppBackgroundNotifyQueue {
    pub fn new(fanout: Arc<AppNotifyFanout>) -> Self {
        Self { fanout }
    }
}

impl AbstractNotifyQueue for AppBackgroundNotifyQueue {
    fn submit(&self, snapshot: OrderNotifySnapshot) {
        let fanout = self.fanout.clone();
        let _handle = tokio::spawn(async move {
            fanout.dispatch(snapshot).await;
        });
    }
}

// actual delivery channels (mail provider, messaging API) belong to a
// separate service, the sinks here record the dispatch intent so staff
// can trace every fan-out in the log
struct CustomerEmailSink {
    logctx: Arc<AppLogContext>,
}
struct AdminAlertSink {
    logctx: Arc<AppLogContext>,
}

#[async_trait]
impl AbstractNotifySink for CustomerEmailSink {
    fn label(&self) -> &'static str {
        "customer-email"
    }
    async fn deliver(&self, snapshot: &OrderNotifySnapshot) -> Result<(), AppNotifyError> {
        let logctx_p = &self.logctx;
        app_log_event!(
            logctx_p,
            AppLogLevel::INFO,
            "order-confirmation, order:{}, email:{}, total-paise:{}",
            snapshot.order_id.as_str(),
            snapshot.customer.email.as_str(),
            snapshot.total_paise
        );
        Ok(())
    }
}

#[async_trait]
impl AbstractNotifySink for AdminAlertSink {
    fn label(&self) -> &'static str {
        "admin-alert"
    }
    async fn deliver(&self, snapshot: &OrderNotifySnapshot) -> Result<(), AppNotifyError> {
        let logctx_p = &self.logctx;
        app_log_event!(
            logctx_p,
            AppLogLevel::INFO,
            "new-paid-order, order:{}, customer:{}, total-paise:{}",
            snapshot.order_id.as_str(),
            snapshot.customer.name.as_str(),
            snapshot.total_paise
        );
        Ok(())
    }
}

pub(crate) fn app_notify_context(logctx: Arc<AppLogContext>) -> Box<dyn AbstractNotifyQueue> {
    let sinks: Vec<Box<dyn AbstractNotifySink>> = vec![
        Box::new(CustomerEmailSink {
            logctx: logctx.clone(),
        }),
        Box::new(AdminAlertSink {
            logctx: logctx.clone(),
        }),
    ];
    let fanout = Arc::new(AppNotifyFanout::new(sinks, logctx));
    Box::new(AppBackgroundNotifyQueue { fanout })
}
