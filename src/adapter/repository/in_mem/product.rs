use std::boxed::Box;
use std::collections::HashMap;
use std::result::Result as DefaultResult;
use std::sync::Arc;

use async_trait::async_trait;

use crate::adapter::datastore::{
    AbstInMemoryDStore, AppInMemFetchKeys, AppInMemFetchedSingleRow, AppInMemUpdateData,
};
use crate::error::{AppError, AppErrorCode};
use crate::model::ProductModel;

use super::super::AbsProductRepo;

const TABLE_LABEL: &str = "product";

#[rustfmt::skip]
enum InMemColIdx {Name, PriceRupees, WeightGrams, GstRatePct, Available, FreeDelivery, TotNumColumns}

impl From<InMemColIdx> for usize {
    fn from(value: InMemColIdx) -> usize {
        match value {
            InMemColIdx::Name => 0,
            InMemColIdx::PriceRupees => 1,
            InMemColIdx::WeightGrams => 2,
            InMemColIdx::GstRatePct => 3,
            InMemColIdx::Available => 4,
            InMemColIdx::FreeDelivery => 5,
            InMemColIdx::TotNumColumns => 6,
        }
    }
}

fn to_inmem_row(m: &ProductModel) -> AppInMemFetchedSingleRow {
    let mut row = vec![String::new(); InMemColIdx::TotNumColumns.into()];
    row[usize::from(InMemColIdx::Name)] = m.name.clone();
    row[usize::from(InMemColIdx::PriceRupees)] = m.price_rupees.to_string();
    row[usize::from(InMemColIdx::WeightGrams)] = m.weight_grams.to_string();
    row[usize::from(InMemColIdx::GstRatePct)] = m.gst_rate_pct.to_string();
    row[usize::from(InMemColIdx::Available)] = (m.available as u8).to_string();
    row[usize::from(InMemColIdx::FreeDelivery)] = (m.free_delivery as u8).to_string();
    row
}

fn _data_corruption(id: &str, idx: usize) -> AppError {
    AppError {
        code: AppErrorCode::DataCorruption,
        detail: Some(format!("{TABLE_LABEL}, id: {id}, column: {idx}")),
    }
}

fn _col_u32(id: &str, row: &[String], idx: usize) -> DefaultResult<u32, AppError> {
    row.get(idx)
        .and_then(|c| c.parse::<u32>().ok())
        .ok_or_else(|| _data_corruption(id, idx))
}

fn _col_bool(id: &str, row: &[String], idx: usize) -> DefaultResult<bool, AppError> {
    row.get(idx)
        .and_then(|c| c.parse::<u8>().ok())
        .map(|v| v != 0)
        .ok_or_else(|| _data_corruption(id, idx))
}

fn from_inmem_row(id: String, row: AppInMemFetchedSingleRow) -> DefaultResult<ProductModel, AppError> {
    let name = row
        .get(usize::from(InMemColIdx::Name))
        .cloned()
        .ok_or_else(|| _data_corruption(id.as_str(), InMemColIdx::Name.into()))?;
    let price_rupees = _col_u32(id.as_str(), &row, InMemColIdx::PriceRupees.into())?;
    let weight_grams = _col_u32(id.as_str(), &row, InMemColIdx::WeightGrams.into())?;
    let gst_rate_pct = _col_u32(id.as_str(), &row, InMemColIdx::GstRatePct.into())?;
    let available = _col_bool(id.as_str(), &row, InMemColIdx::Available.into())?;
    let free_delivery = _col_bool(id.as_str(), &row, InMemColIdx::FreeDelivery.into())?;
    Ok(ProductModel {
        id,
        name,
        price_rupees,
        weight_grams,
        gst_rate_pct,
        available,
        free_delivery,
    })
} // end of fn from_inmem_row

pub struct ProductInMemRepo {
    datastore: Arc<Box<dyn AbstInMemoryDStore>>,
}

impl ProductInMemRepo {
    pub async fn new(m: Arc<Box<dyn AbstInMemoryDStore>>) -> DefaultResult<Self, AppError> {
        m.create_table(TABLE_LABEL).await?;
        Ok(Self { datastore: m })
    }
}

#[async_trait]
impl AbsProductRepo for ProductInMemRepo {
    async fn fetch_many(&self, ids: &[String]) -> DefaultResult<Vec<ProductModel>, AppError> {
        let mut info: AppInMemFetchKeys = HashMap::new();
        info.insert(TABLE_LABEL.to_string(), ids.to_vec());
        let mut raw = self.datastore.fetch(info).await?;
        let rows = raw.remove(TABLE_LABEL).unwrap_or_default();
        let mut out = Vec::with_capacity(rows.len());
        for (id, row) in rows {
            out.push(from_inmem_row(id, row)?);
        }
        Ok(out)
    }

    async fn save(&self, items: Vec<ProductModel>) -> DefaultResult<(), AppError> {
        let rows = items
            .iter()
            .map(|m| (m.id.clone(), to_inmem_row(m)))
            .collect::<HashMap<String, AppInMemFetchedSingleRow>>();
        let mut data: AppInMemUpdateData = HashMap::new();
        data.insert(TABLE_LABEL.to_string(), rows);
        let _num = self.datastore.save(data).await?;
        Ok(())
    }
} // end of impl AbsProductRepo for ProductInMemRepo
