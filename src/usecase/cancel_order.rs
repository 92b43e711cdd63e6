use std::boxed::Box;
use std::result::Result as DefaultResult;
use std::sync::Arc;

use crate::adapter::repository::AbsOrderRepo;
use crate::error::AppError;
use crate::logging::{app_log_event, AppLogContext, AppLogLevel};

pub struct CancelOrderUseCase {
    pub repo_order: Box<dyn AbsOrderRepo>,
    pub logctx: Arc<AppLogContext>,
}

impl CancelOrderUseCase {
    /// best-effort, an order that is paid, already failed, or unknown is
    /// simply left untouched. Returns whether the flip happened.
    pub async fn execute(self, internal_order_id: String) -> DefaultResult<bool, AppError> {
        let flipped = self
            .repo_order
            .cancel_if_unpaid(internal_order_id.as_str())
            .await?;
        let logctx_p = &self.logctx;
        app_log_event!(
            logctx_p,
            AppLogLevel::INFO,
            "cancel-order, order:{}, flipped:{}",
            internal_order_id.as_str(),
            flipped
        );
        Ok(flipped)
    }
}
