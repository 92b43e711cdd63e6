use std::boxed::Box;
use std::collections::HashMap;
use std::result::Result as DefaultResult;
use std::sync::Arc;

use async_trait::async_trait;

use crate::adapter::datastore::{AbstInMemoryDStore, AppInMemFetchKeys, AppInMemUpdateData};
use crate::error::{AppError, AppErrorCode};
use crate::model::{DeliveryPricingModel, OrderTimingModel};

use super::super::AbsShopSettingsRepo;

const TABLE_LABEL: &str = "shop_settings";
const PKEY_DELIVERY_PRICING: &str = "delivery-pricing";
const PKEY_ORDER_TIMING: &str = "order-timing";

#[rustfmt::skip]
enum PricingColIdx {FreeThreshold, ReducedThreshold, ReducedFee, BaseFee, TotNumColumns}

impl From<PricingColIdx> for usize {
    fn from(value: PricingColIdx) -> usize {
        match value {
            PricingColIdx::FreeThreshold => 0,
            PricingColIdx::ReducedThreshold => 1,
            PricingColIdx::ReducedFee => 2,
            PricingColIdx::BaseFee => 3,
            PricingColIdx::TotNumColumns => 4,
        }
    }
}

pub struct ShopSettingsInMemRepo {
    datastore: Arc<Box<dyn AbstInMemoryDStore>>,
}

impl ShopSettingsInMemRepo {
    pub async fn new(m: Arc<Box<dyn AbstInMemoryDStore>>) -> DefaultResult<Self, AppError> {
        m.create_table(TABLE_LABEL).await?;
        Ok(Self { datastore: m })
    }

    fn parse_col(row: &[String], idx: usize) -> DefaultResult<u32, AppError> {
        row.get(idx)
            .and_then(|c| c.parse::<u32>().ok())
            .ok_or(AppError {
                code: AppErrorCode::DataCorruption,
                detail: Some(format!("{TABLE_LABEL}, column: {idx}")),
            })
    }

    async fn fetch_row(&self, pkey: &str) -> DefaultResult<Option<Vec<String>>, AppError> {
        let mut info: AppInMemFetchKeys = HashMap::new();
        info.insert(TABLE_LABEL.to_string(), vec![pkey.to_string()]);
        let mut result = self.datastore.fetch(info).await?;
        let rows = result.remove(TABLE_LABEL).unwrap_or_default();
        Ok(rows.into_iter().next().map(|(_k, row)| row))
    }

    async fn save_row(&self, pkey: &str, row: Vec<String>) -> DefaultResult<(), AppError> {
        let rows = HashMap::from([(pkey.to_string(), row)]);
        let mut data: AppInMemUpdateData = HashMap::new();
        data.insert(TABLE_LABEL.to_string(), rows);
        let _num = self.datastore.save(data).await?;
        Ok(())
    }
} // end of impl ShopSettingsInMemRepo

#[async_trait]
impl AbsShopSettingsRepo for ShopSettingsInMemRepo {
    async fn fetch_delivery_pricing(&self) -> DefaultResult<DeliveryPricingModel, AppError> {
        match self.fetch_row(PKEY_DELIVERY_PRICING).await? {
            Some(row) => Ok(DeliveryPricingModel {
                free_delivery_threshold: Self::parse_col(&row, PricingColIdx::FreeThreshold.into())?,
                reduced_delivery_threshold: Self::parse_col(
                    &row,
                    PricingColIdx::ReducedThreshold.into(),
                )?,
                reduced_delivery_fee: Self::parse_col(&row, PricingColIdx::ReducedFee.into())?,
                base_delivery_fee: Self::parse_col(&row, PricingColIdx::BaseFee.into())?,
            }),
            // the singleton row is created lazily, defaults apply until
            // back-office staff save it the first time
            None => Ok(DeliveryPricingModel::default()),
        }
    }

    async fn save_delivery_pricing(&self, ms: DeliveryPricingModel) -> DefaultResult<(), AppError> {
        let mut row = vec![String::new(); PricingColIdx::TotNumColumns.into()];
        row[usize::from(PricingColIdx::FreeThreshold)] = ms.free_delivery_threshold.to_string();
        row[usize::from(PricingColIdx::ReducedThreshold)] =
            ms.reduced_delivery_threshold.to_string();
        row[usize::from(PricingColIdx::ReducedFee)] = ms.reduced_delivery_fee.to_string();
        row[usize::from(PricingColIdx::BaseFee)] = ms.base_delivery_fee.to_string();
        self.save_row(PKEY_DELIVERY_PRICING, row).await
    }

    async fn fetch_order_timing(&self) -> DefaultResult<OrderTimingModel, AppError> {
        match self.fetch_row(PKEY_ORDER_TIMING).await? {
            Some(row) => Ok(OrderTimingModel {
                start_hour: Self::parse_col(&row, 0)?,
                end_hour: Self::parse_col(&row, 1)?,
            }),
            None => Ok(OrderTimingModel::default()),
        }
    }

    async fn save_order_timing(&self, ms: OrderTimingModel) -> DefaultResult<(), AppError> {
        let row = vec![ms.start_hour.to_string(), ms.end_hour.to_string()];
        self.save_row(PKEY_ORDER_TIMING, row).await
    }
} // end of impl AbsShopSettingsRepo for ShopSettingsInMemRepo
