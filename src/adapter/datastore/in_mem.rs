use std::collections::HashMap;
use std::result::Result as DefaultResult;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::{Mutex, OwnedMutexGuard};

use crate::config::AppInMemoryDbCfg;
use crate::error::{AppError, AppErrorCode};

// simple implementation of in-memory data storage, standing in for the
// relational store behind the deployed site.

// application callers are responsible to maintain the structure of each
// row in each table. Each element of a row is stringified regardless of
// its original type (integer, boolean, timestamp)
type InnerRow = Vec<String>;
type InnerTable = HashMap<String, InnerRow>;
type AllTable = HashMap<String, InnerTable>;
pub type AppInMemUpdateData = AllTable;
pub type AppInMemDeleteInfo = InnerTable; // list of IDs per table
pub type AppInMemFetchKeys = InnerTable; // list of IDs per table
pub type AppInMemFetchedData = AllTable;
pub type AppInMemFetchedSingleTable = InnerTable;
pub type AppInMemFetchedSingleRow = InnerRow;

/// holder of the store-wide lock, callers hand it back through
/// `save_release()` so a read-modify-write cycle is never interleaved
/// with another writer. This is the compare-and-set substitute the
/// status transitions rely on.
pub struct AppInMemDstoreLock {
    guard: OwnedMutexGuard<AllTable>,
}

pub trait AbsDStoreFilterKeyOp: Send + Sync {
    fn filter(&self, k: &String, v: &Vec<String>) -> bool;
}

#[async_trait]
pub trait AbstInMemoryDStore: Send + Sync {
    async fn create_table(&self, label: &str) -> DefaultResult<(), AppError>;
    async fn save(&self, data: AppInMemUpdateData) -> DefaultResult<usize, AppError>;
    async fn delete(&self, info: AppInMemDeleteInfo) -> DefaultResult<usize, AppError>;
    async fn fetch(&self, keys: AppInMemFetchKeys) -> DefaultResult<AppInMemFetchedData, AppError>;
    async fn fetch_acquire(
        &self,
        keys: AppInMemFetchKeys,
    ) -> DefaultResult<(AppInMemFetchedData, AppInMemDstoreLock), AppError>;
    fn save_release(
        &self,
        data: AppInMemUpdateData,
        lock: AppInMemDstoreLock,
    ) -> DefaultResult<usize, AppError>;
    async fn filter_keys(
        &self,
        table: String,
        op: &dyn AbsDStoreFilterKeyOp,
    ) -> DefaultResult<Vec<String>, AppError>;
}

pub struct AppInMemoryDStore {
    max_items_per_table: u32,
    table_map: Arc<Mutex<AllTable>>,
}

impl AppInMemoryDStore {
    pub fn new(cfg: &AppInMemoryDbCfg) -> Self {
        let t_map = HashMap::new();
        let t_map = Arc::new(Mutex::new(t_map));
        Self {
            table_map: t_map,
            max_items_per_table: cfg.max_items,
        }
    }

    fn _check_capacity(&self, _map: &AllTable) -> DefaultResult<(), AppError> {
        let mut invalid = _map
            .iter()
            .filter(|(_, table)| self.max_items_per_table as usize <= table.len());
        if let Some((label, _)) = invalid.next() {
            let msg = format!("{}, {}, {}", module_path!(), line!(), label);
            Err(AppError {
                detail: Some(msg),
                code: AppErrorCode::ExceedingMaxLimit,
            })
        } else {
            Ok(())
        }
    }

    fn _check_table_existence(
        _map: &AllTable,
        keys: Vec<&String>,
    ) -> DefaultResult<(), AppError> {
        let mut invalid = keys.iter().filter(|label| !_map.contains_key(label.as_str()));
        if let Some(d) = invalid.next() {
            Err(AppError {
                detail: Some(d.to_string()),
                code: AppErrorCode::DataTableNotExist,
            })
        } else {
            Ok(())
        }
    }

    fn _save_into(&self, _map: &mut AllTable, _data: AppInMemUpdateData) -> DefaultResult<usize, AppError> {
        let unchecked_labels = _data.keys().collect::<Vec<&String>>();
        Self::_check_table_existence(_map, unchecked_labels)?;
        self._check_capacity(_map)?;
        let tot_cnt = _data
            .into_iter()
            .map(|(label, d_grp)| {
                let table = _map.get_mut(label.as_str()).unwrap();
                d_grp
                    .into_iter()
                    .map(|(id, row)| {
                        table.insert(id, row);
                    })
                    .count()
            })
            .sum();
        self._check_capacity(_map)?;
        Ok(tot_cnt)
    }

    fn _fetch_from(_map: &AllTable, _info: AppInMemFetchKeys) -> DefaultResult<AppInMemFetchedData, AppError> {
        let unchecked_labels = _info.keys().collect::<Vec<&String>>();
        Self::_check_table_existence(_map, unchecked_labels)?;
        let rs_a = _info
            .iter()
            .map(|(label, ids)| {
                let table = _map.get(label.as_str()).unwrap();
                let rs_t = ids
                    .iter()
                    .filter(|id| table.contains_key(id.as_str()))
                    .map(|id| {
                        let row = table.get(id).unwrap();
                        (id.clone(), row.clone())
                    })
                    .collect::<Vec<(String, InnerRow)>>();
                let rs_t = HashMap::from_iter(rs_t);
                (label.clone(), rs_t)
            })
            .collect::<Vec<(String, InnerTable)>>();
        let rs_a = HashMap::from_iter(rs_a);
        Ok(rs_a)
    }
} // end of impl AppInMemoryDStore

#[async_trait]
impl AbstInMemoryDStore for AppInMemoryDStore {
    async fn create_table(&self, label: &str) -> DefaultResult<(), AppError> {
        let mut _map = self.table_map.lock().await;
        if !_map.contains_key(label) {
            let newtable = HashMap::new();
            _map.insert(label.to_string(), newtable);
        }
        Ok(())
    }

    async fn save(&self, _data: AppInMemUpdateData) -> DefaultResult<usize, AppError> {
        let mut _map = self.table_map.lock().await;
        self._save_into(&mut _map, _data)
    }

    async fn delete(&self, _info: AppInMemDeleteInfo) -> DefaultResult<usize, AppError> {
        let mut _map = self.table_map.lock().await;
        let unchecked_labels = _info.keys().collect::<Vec<&String>>();
        Self::_check_table_existence(&_map, unchecked_labels)?;
        let tot_cnt = _info
            .iter()
            .map(|(label, ids)| {
                let table = _map.get_mut(label.as_str()).unwrap();
                ids.iter()
                    .map(|id| {
                        table.remove(id);
                    })
                    .count()
            })
            .sum();
        Ok(tot_cnt)
    }

    async fn fetch(&self, _info: AppInMemFetchKeys) -> DefaultResult<AppInMemFetchedData, AppError> {
        let _map = self.table_map.lock().await;
        Self::_fetch_from(&_map, _info)
    }

    async fn fetch_acquire(
        &self,
        _info: AppInMemFetchKeys,
    ) -> DefaultResult<(AppInMemFetchedData, AppInMemDstoreLock), AppError> {
        let guard = self.table_map.clone().lock_owned().await;
        let data = Self::_fetch_from(&guard, _info)?;
        Ok((data, AppInMemDstoreLock { guard }))
    }

    fn save_release(
        &self,
        data: AppInMemUpdateData,
        mut lock: AppInMemDstoreLock,
    ) -> DefaultResult<usize, AppError> {
        let out = self._save_into(&mut lock.guard, data);
        drop(lock); // the guard is released right here regardless of the result
        out
    }

    async fn filter_keys(
        &self,
        table: String,
        op: &dyn AbsDStoreFilterKeyOp,
    ) -> DefaultResult<Vec<String>, AppError> {
        let _map = self.table_map.lock().await;
        Self::_check_table_existence(&_map, vec![&table])?;
        let t = _map.get(table.as_str()).unwrap();
        let out = t
            .iter()
            .filter(|(k, v)| op.filter(k, v))
            .map(|(k, _v)| k.clone())
            .collect::<Vec<String>>();
        Ok(out)
    }
} // end of impl AbstInMemoryDStore for AppInMemoryDStore
