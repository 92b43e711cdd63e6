use std::boxed::Box;
use std::result::Result as DefaultResult;
use std::str::FromStr;
use std::sync::Arc;

use crate::adapter::repository::AbsOrderRepo;
use crate::api::web::dto::OrderStatusEditReqDto;
use crate::error::{AppError, AppErrorCode};
use crate::logging::{app_log_event, AppLogContext, AppLogLevel};
use crate::model::OrderStatus;

pub enum EditOrderStatusUcError {
    InvalidStatus(String),
    OrderNotExist,
    Server(AppError),
}

/// back-office override, staff may set any status on an existing order,
/// e.g. moving a paid order to PROCESSING or DELIVERED
pub struct EditOrderStatusUseCase {
    pub repo_order: Box<dyn AbsOrderRepo>,
    pub logctx: Arc<AppLogContext>,
}

impl EditOrderStatusUseCase {
    pub async fn execute(
        self,
        oid: String,
        data: OrderStatusEditReqDto,
    ) -> DefaultResult<(), EditOrderStatusUcError> {
        let new_status = OrderStatus::from_str(data.status.as_str())
            .map_err(|e| EditOrderStatusUcError::InvalidStatus(e.0))?;
        let result = self
            .repo_order
            .update_status(oid.as_str(), new_status.clone())
            .await;
        match result {
            Ok(()) => {
                let logctx_p = &self.logctx;
                app_log_event!(
                    logctx_p,
                    AppLogLevel::INFO,
                    "order-status-edited, order:{}, status:{}",
                    oid.as_str(),
                    new_status.as_str()
                );
                Ok(())
            }
            Err(e) => {
                if e.code == AppErrorCode::OrderNotExist {
                    Err(EditOrderStatusUcError::OrderNotExist)
                } else {
                    Err(EditOrderStatusUcError::Server(e))
                }
            }
        }
    } // end of fn execute
} // end of impl EditOrderStatusUseCase
