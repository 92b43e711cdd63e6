use std::boxed::Box;
use std::result::Result as DefaultResult;

use crate::adapter::repository::AbsOrderRepo;
use crate::api::web::dto::{
    TrackOrdersErrorDto, TrackOrdersReqDto, TrackOrdersRespDto, TrackedOrderDto,
};
use crate::constant::hard_limit;
use crate::error::AppError;
use crate::model::{check_email, check_mobile_number, normalize_tracking_phone};

pub enum TrackOrdersUcError {
    ReqContent(TrackOrdersErrorDto),
    Server(AppError),
}

pub struct TrackOrdersUseCase {
    pub repo_order: Box<dyn AbsOrderRepo>,
}

impl TrackOrdersUseCase {
    pub async fn execute(
        self,
        req: TrackOrdersReqDto,
    ) -> DefaultResult<TrackOrdersRespDto, TrackOrdersUcError> {
        let phone = normalize_tracking_phone(req.phone.as_str());
        let email = req.email.trim().to_lowercase();
        let error = TrackOrdersErrorDto {
            phone: check_mobile_number(phone.as_str()),
            email: check_email(email.as_str()),
        };
        if error.phone.is_some() || error.email.is_some() {
            return Err(TrackOrdersUcError::ReqContent(error));
        }
        let found = self
            .repo_order
            .fetch_by_customer_contact(
                phone.as_str(),
                email.as_str(),
                hard_limit::MAX_TRACKED_ORDERS_RETURNED,
            )
            .await
            .map_err(TrackOrdersUcError::Server)?;
        let orders = found.iter().map(TrackedOrderDto::from).collect();
        Ok(TrackOrdersRespDto { orders })
    } // end of fn execute
} // end of impl TrackOrdersUseCase
