use std::boxed::Box;
use std::result::Result as DefaultResult;

use crate::adapter::repository::AbsShopSettingsRepo;
use crate::api::web::dto::{
    DeliveryPricingDto, DeliveryPricingErrorDto, OrderTimingDto, OrderTimingErrorDto,
};
use crate::error::AppError;
use crate::model::{DeliveryPricingModel, OrderTimingModel};

pub struct ReadDeliveryPricingUseCase {
    pub repo: Box<dyn AbsShopSettingsRepo>,
}

impl ReadDeliveryPricingUseCase {
    pub async fn execute(self) -> DefaultResult<DeliveryPricingDto, AppError> {
        let ms = self.repo.fetch_delivery_pricing().await?;
        Ok(ms.into())
    }
}

pub enum EditDeliveryPricingUcError {
    ReqContent(DeliveryPricingErrorDto),
    Server(AppError),
}

pub struct EditDeliveryPricingUseCase {
    pub repo: Box<dyn AbsShopSettingsRepo>,
}

impl EditDeliveryPricingUseCase {
    pub async fn execute(
        self,
        data: DeliveryPricingDto,
    ) -> DefaultResult<DeliveryPricingDto, EditDeliveryPricingUcError> {
        let ms =
            DeliveryPricingModel::try_from(data).map_err(EditDeliveryPricingUcError::ReqContent)?;
        self.repo
            .save_delivery_pricing(ms.clone())
            .await
            .map_err(EditDeliveryPricingUcError::Server)?;
        Ok(ms.into())
    }
}

pub struct ReadOrderTimingUseCase {
    pub repo: Box<dyn AbsShopSettingsRepo>,
}

impl ReadOrderTimingUseCase {
    pub async fn execute(self) -> DefaultResult<OrderTimingDto, AppError> {
        let ms = self.repo.fetch_order_timing().await?;
        Ok(ms.into())
    }
}

pub enum EditOrderTimingUcError {
    ReqContent(OrderTimingErrorDto),
    Server(AppError),
}

pub struct EditOrderTimingUseCase {
    pub repo: Box<dyn AbsShopSettingsRepo>,
}

impl EditOrderTimingUseCase {
    pub async fn execute(
        self,
        data: OrderTimingDto,
    ) -> DefaultResult<OrderTimingDto, EditOrderTimingUcError> {
        let ms = OrderTimingModel::try_from(data).map_err(EditOrderTimingUcError::ReqContent)?;
        self.repo
            .save_order_timing(ms.clone())
            .await
            .map_err(EditOrderTimingUcError::Server)?;
        Ok(ms.into())
    }
}
