use std::boxed::Box;
use std::collections::HashMap;
use std::result::Result as DefaultResult;
use std::str::FromStr;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::DateTime;

use crate::adapter::datastore::{
    AbsDStoreFilterKeyOp, AbstInMemoryDStore, AppInMemFetchKeys, AppInMemFetchedSingleRow,
    AppInMemUpdateData,
};
use crate::error::{AppError, AppErrorCode};
use crate::model::{
    CustomerModel, OrderLineModel, OrderModel, OrderStatus, ShipAddressModel,
};

use super::super::{AbsOrderRepo, OrderPaidOutcome};

mod _toplvl {
    pub(super) const TABLE_LABEL: &str = "order_toplvl";
    // a missing payment id is stored as an empty string, no order line
    // column may legally be empty otherwise
    #[rustfmt::skip]
    pub(super) enum InMemColIdx {
        GatewayOrderId, GatewayPaymentId, Status, Subtotal, CgstTotal,
        SgstTotal, Delivery, Total, CreateTime, NumLines, TotNumColumns,
    }
    impl From<InMemColIdx> for usize {
        fn from(value: InMemColIdx) -> usize {
            match value {
                InMemColIdx::GatewayOrderId => 0,
                InMemColIdx::GatewayPaymentId => 1,
                InMemColIdx::Status => 2,
                InMemColIdx::Subtotal => 3,
                InMemColIdx::CgstTotal => 4,
                InMemColIdx::SgstTotal => 5,
                InMemColIdx::Delivery => 6,
                InMemColIdx::Total => 7,
                InMemColIdx::CreateTime => 8,
                InMemColIdx::NumLines => 9,
                InMemColIdx::TotNumColumns => 10,
            }
        }
    }
}

mod _customer {
    pub(super) const TABLE_LABEL: &str = "order_customer";
    #[rustfmt::skip]
    pub(super) enum InMemColIdx {Name, Phone, Email, TotNumColumns}
    impl From<InMemColIdx> for usize {
        fn from(value: InMemColIdx) -> usize {
            match value {
                InMemColIdx::Name => 0,
                InMemColIdx::Phone => 1,
                InMemColIdx::Email => 2,
                InMemColIdx::TotNumColumns => 3,
            }
        }
    }
}

mod _shipaddr {
    pub(super) const TABLE_LABEL: &str = "order_shipaddr";
    #[rustfmt::skip]
    pub(super) enum InMemColIdx {AddressLine, City, State, Pincode, TotNumColumns}
    impl From<InMemColIdx> for usize {
        fn from(value: InMemColIdx) -> usize {
            match value {
                InMemColIdx::AddressLine => 0,
                InMemColIdx::City => 1,
                InMemColIdx::State => 2,
                InMemColIdx::Pincode => 3,
                InMemColIdx::TotNumColumns => 4,
            }
        }
    }
}

mod _line {
    pub(super) const TABLE_LABEL: &str = "order_line";
    #[rustfmt::skip]
    pub(super) enum InMemColIdx {
        ProductId, Name, UnitPrice, Quantity, WeightGrams,
        GstRatePct, CgstPaise, SgstPaise, TotNumColumns,
    }
    impl From<InMemColIdx> for usize {
        fn from(value: InMemColIdx) -> usize {
            match value {
                InMemColIdx::ProductId => 0,
                InMemColIdx::Name => 1,
                InMemColIdx::UnitPrice => 2,
                InMemColIdx::Quantity => 3,
                InMemColIdx::WeightGrams => 4,
                InMemColIdx::GstRatePct => 5,
                InMemColIdx::CgstPaise => 6,
                InMemColIdx::SgstPaise => 7,
                InMemColIdx::TotNumColumns => 8,
            }
        }
    }
    pub(super) fn line_pkey(oid: &str, seq: usize) -> String {
        format!("{oid}-{seq}")
    }
}

struct ContactMatchOp {
    phone: String,
    email: String,
}

impl AbsDStoreFilterKeyOp for ContactMatchOp {
    fn filter(&self, _k: &String, v: &Vec<String>) -> bool {
        let phone_got = v.get(usize::from(_customer::InMemColIdx::Phone));
        let email_got = v.get(usize::from(_customer::InMemColIdx::Email));
        phone_got.map(|s| s.as_str()) == Some(self.phone.as_str())
            && email_got.map(|s| s.as_str()) == Some(self.email.as_str())
    }
}

fn _data_corruption(table: &str, oid: &str, column: usize) -> AppError {
    AppError {
        code: AppErrorCode::DataCorruption,
        detail: Some(format!("{table}, id: {oid}, column: {column}")),
    }
}

fn _col_str(
    table: &str,
    oid: &str,
    row: &[String],
    idx: usize,
) -> DefaultResult<String, AppError> {
    row.get(idx)
        .cloned()
        .ok_or_else(|| _data_corruption(table, oid, idx))
}

fn _col_u64(table: &str, oid: &str, row: &[String], idx: usize) -> DefaultResult<u64, AppError> {
    row.get(idx)
        .and_then(|c| c.parse::<u64>().ok())
        .ok_or_else(|| _data_corruption(table, oid, idx))
}

fn _col_u32(table: &str, oid: &str, row: &[String], idx: usize) -> DefaultResult<u32, AppError> {
    row.get(idx)
        .and_then(|c| c.parse::<u32>().ok())
        .ok_or_else(|| _data_corruption(table, oid, idx))
}

fn _toplvl_row(m: &OrderModel) -> AppInMemFetchedSingleRow {
    use _toplvl::InMemColIdx;
    let mut row = vec![String::new(); InMemColIdx::TotNumColumns.into()];
    row[usize::from(InMemColIdx::GatewayOrderId)] = m.gateway_order_id.clone();
    row[usize::from(InMemColIdx::GatewayPaymentId)] =
        m.gateway_payment_id.clone().unwrap_or_default();
    row[usize::from(InMemColIdx::Status)] = m.status.as_str().to_string();
    row[usize::from(InMemColIdx::Subtotal)] = m.subtotal_paise.to_string();
    row[usize::from(InMemColIdx::CgstTotal)] = m.cgst_total_paise.to_string();
    row[usize::from(InMemColIdx::SgstTotal)] = m.sgst_total_paise.to_string();
    row[usize::from(InMemColIdx::Delivery)] = m.delivery_paise.to_string();
    row[usize::from(InMemColIdx::Total)] = m.total_paise.to_string();
    row[usize::from(InMemColIdx::CreateTime)] = m.create_time.to_rfc3339();
    row[usize::from(InMemColIdx::NumLines)] = m.lines.len().to_string();
    row
}

fn _line_row(l: &OrderLineModel) -> AppInMemFetchedSingleRow {
    use _line::InMemColIdx;
    let mut row = vec![String::new(); InMemColIdx::TotNumColumns.into()];
    row[usize::from(InMemColIdx::ProductId)] = l.product_id.clone();
    row[usize::from(InMemColIdx::Name)] = l.name.clone();
    row[usize::from(InMemColIdx::UnitPrice)] = l.unit_price_rupees.to_string();
    row[usize::from(InMemColIdx::Quantity)] = l.quantity.to_string();
    row[usize::from(InMemColIdx::WeightGrams)] = l.weight_grams.to_string();
    row[usize::from(InMemColIdx::GstRatePct)] = l.gst_rate_pct.to_string();
    row[usize::from(InMemColIdx::CgstPaise)] = l.cgst_paise.to_string();
    row[usize::from(InMemColIdx::SgstPaise)] = l.sgst_paise.to_string();
    row
}

pub struct OrderInMemRepo {
    datastore: Arc<Box<dyn AbstInMemoryDStore>>,
}

impl OrderInMemRepo {
    pub async fn new(m: Arc<Box<dyn AbstInMemoryDStore>>) -> DefaultResult<Self, AppError> {
        m.create_table(_toplvl::TABLE_LABEL).await?;
        m.create_table(_customer::TABLE_LABEL).await?;
        m.create_table(_shipaddr::TABLE_LABEL).await?;
        m.create_table(_line::TABLE_LABEL).await?;
        Ok(Self { datastore: m })
    }

    fn _toplvl_fetch_keys(oid: &str) -> AppInMemFetchKeys {
        let mut info: AppInMemFetchKeys = HashMap::new();
        info.insert(_toplvl::TABLE_LABEL.to_string(), vec![oid.to_string()]);
        info
    }

    async fn _assemble(
        &self,
        oid: &str,
        toplvl_row: AppInMemFetchedSingleRow,
    ) -> DefaultResult<OrderModel, AppError> {
        use _toplvl::InMemColIdx as TopIdx;
        let t = _toplvl::TABLE_LABEL;
        let num_lines = _col_u64(t, oid, &toplvl_row, TopIdx::NumLines.into())? as usize;
        let line_keys = (0..num_lines)
            .map(|seq| _line::line_pkey(oid, seq))
            .collect::<Vec<String>>();
        let mut info: AppInMemFetchKeys = HashMap::new();
        info.insert(_customer::TABLE_LABEL.to_string(), vec![oid.to_string()]);
        info.insert(_shipaddr::TABLE_LABEL.to_string(), vec![oid.to_string()]);
        info.insert(_line::TABLE_LABEL.to_string(), line_keys.clone());
        let mut raw = self.datastore.fetch(info).await?;

        let customer = {
            use _customer::InMemColIdx as Idx;
            let t = _customer::TABLE_LABEL;
            let row = raw
                .remove(t)
                .and_then(|mut tbl| tbl.remove(oid))
                .ok_or_else(|| _data_corruption(t, oid, 0))?;
            CustomerModel {
                name: _col_str(t, oid, &row, Idx::Name.into())?,
                phone: _col_str(t, oid, &row, Idx::Phone.into())?,
                email: _col_str(t, oid, &row, Idx::Email.into())?,
            }
        };
        let address = {
            use _shipaddr::InMemColIdx as Idx;
            let t = _shipaddr::TABLE_LABEL;
            let row = raw
                .remove(t)
                .and_then(|mut tbl| tbl.remove(oid))
                .ok_or_else(|| _data_corruption(t, oid, 0))?;
            ShipAddressModel {
                address_line: _col_str(t, oid, &row, Idx::AddressLine.into())?,
                city: _col_str(t, oid, &row, Idx::City.into())?,
                state: _col_str(t, oid, &row, Idx::State.into())?,
                pincode: _col_str(t, oid, &row, Idx::Pincode.into())?,
            }
        };
        let lines = {
            use _line::InMemColIdx as Idx;
            let t = _line::TABLE_LABEL;
            let mut tbl = raw.remove(t).unwrap_or_default();
            let mut out = Vec::with_capacity(num_lines);
            for key in line_keys.iter() {
                let row = tbl
                    .remove(key)
                    .ok_or_else(|| _data_corruption(t, oid, 0))?;
                out.push(OrderLineModel {
                    product_id: _col_str(t, oid, &row, Idx::ProductId.into())?,
                    name: _col_str(t, oid, &row, Idx::Name.into())?,
                    unit_price_rupees: _col_u32(t, oid, &row, Idx::UnitPrice.into())?,
                    quantity: _col_u32(t, oid, &row, Idx::Quantity.into())?,
                    weight_grams: _col_u32(t, oid, &row, Idx::WeightGrams.into())?,
                    gst_rate_pct: _col_u32(t, oid, &row, Idx::GstRatePct.into())?,
                    cgst_paise: _col_u64(t, oid, &row, Idx::CgstPaise.into())?,
                    sgst_paise: _col_u64(t, oid, &row, Idx::SgstPaise.into())?,
                });
            }
            out
        };
        let status_serial = _col_str(t, oid, &toplvl_row, TopIdx::Status.into())?;
        let status = OrderStatus::from_str(status_serial.as_str())
            .map_err(|_e| _data_corruption(t, oid, TopIdx::Status.into()))?;
        let create_time_serial = _col_str(t, oid, &toplvl_row, TopIdx::CreateTime.into())?;
        let create_time = DateTime::parse_from_rfc3339(create_time_serial.as_str())
            .map_err(|_e| _data_corruption(t, oid, TopIdx::CreateTime.into()))?;
        let payment_serial = _col_str(t, oid, &toplvl_row, TopIdx::GatewayPaymentId.into())?;
        let gateway_payment_id = if payment_serial.is_empty() {
            None
        } else {
            Some(payment_serial)
        };
        Ok(OrderModel {
            id: oid.to_string(),
            gateway_order_id: _col_str(t, oid, &toplvl_row, TopIdx::GatewayOrderId.into())?,
            gateway_payment_id,
            status,
            subtotal_paise: _col_u64(t, oid, &toplvl_row, TopIdx::Subtotal.into())?,
            cgst_total_paise: _col_u64(t, oid, &toplvl_row, TopIdx::CgstTotal.into())?,
            sgst_total_paise: _col_u64(t, oid, &toplvl_row, TopIdx::SgstTotal.into())?,
            delivery_paise: _col_u64(t, oid, &toplvl_row, TopIdx::Delivery.into())?,
            total_paise: _col_u64(t, oid, &toplvl_row, TopIdx::Total.into())?,
            customer,
            address,
            lines,
            create_time,
        })
    } // end of fn _assemble
} // end of impl OrderInMemRepo

#[async_trait]
impl AbsOrderRepo for OrderInMemRepo {
    async fn create_order(&self, order: &OrderModel) -> DefaultResult<(), AppError> {
        let oid = order.id.as_str();
        let mut data: AppInMemUpdateData = HashMap::new();
        data.insert(
            _toplvl::TABLE_LABEL.to_string(),
            HashMap::from([(oid.to_string(), _toplvl_row(order))]),
        );
        {
            use _customer::InMemColIdx as Idx;
            let mut row = vec![String::new(); Idx::TotNumColumns.into()];
            row[usize::from(Idx::Name)] = order.customer.name.clone();
            row[usize::from(Idx::Phone)] = order.customer.phone.clone();
            row[usize::from(Idx::Email)] = order.customer.email.clone();
            data.insert(
                _customer::TABLE_LABEL.to_string(),
                HashMap::from([(oid.to_string(), row)]),
            );
        }
        {
            use _shipaddr::InMemColIdx as Idx;
            let mut row = vec![String::new(); Idx::TotNumColumns.into()];
            row[usize::from(Idx::AddressLine)] = order.address.address_line.clone();
            row[usize::from(Idx::City)] = order.address.city.clone();
            row[usize::from(Idx::State)] = order.address.state.clone();
            row[usize::from(Idx::Pincode)] = order.address.pincode.clone();
            data.insert(
                _shipaddr::TABLE_LABEL.to_string(),
                HashMap::from([(oid.to_string(), row)]),
            );
        }
        let line_rows = order
            .lines
            .iter()
            .enumerate()
            .map(|(seq, l)| (_line::line_pkey(oid, seq), _line_row(l)))
            .collect::<HashMap<String, AppInMemFetchedSingleRow>>();
        data.insert(_line::TABLE_LABEL.to_string(), line_rows);
        // all tables go into the store in one call, the datastore holds a
        // single lock across the whole write
        let _num = self.datastore.save(data).await?;
        Ok(())
    } // end of fn create_order

    async fn fetch_order(&self, oid: &str) -> DefaultResult<Option<OrderModel>, AppError> {
        let info = Self::_toplvl_fetch_keys(oid);
        let mut raw = self.datastore.fetch(info).await?;
        let row_opt = raw
            .remove(_toplvl::TABLE_LABEL)
            .and_then(|mut tbl| tbl.remove(oid));
        match row_opt {
            Some(row) => Ok(Some(self._assemble(oid, row).await?)),
            None => Ok(None),
        }
    }

    async fn mark_paid_once(
        &self,
        oid: &str,
        gateway_payment_id: &str,
    ) -> DefaultResult<OrderPaidOutcome, AppError> {
        use _toplvl::InMemColIdx as Idx;
        let t = _toplvl::TABLE_LABEL;
        let info = Self::_toplvl_fetch_keys(oid);
        let (mut raw, lock) = self.datastore.fetch_acquire(info).await?;
        let row_opt = raw.remove(t).and_then(|mut tbl| tbl.remove(oid));
        let mut row = match row_opt {
            Some(v) => v,
            None => {
                drop(lock);
                return Err(AppError {
                    code: AppErrorCode::OrderNotExist,
                    detail: Some(oid.to_string()),
                });
            }
        };
        let status_serial = _col_str(t, oid, &row, Idx::Status.into())?;
        let status = OrderStatus::from_str(status_serial.as_str())
            .map_err(|_e| _data_corruption(t, oid, Idx::Status.into()))?;
        match status {
            OrderStatus::Paid => {
                drop(lock);
                let m = self.fetch_order(oid).await?.ok_or(AppError {
                    code: AppErrorCode::OrderNotExist,
                    detail: Some(oid.to_string()),
                })?;
                Ok(OrderPaidOutcome::AlreadyPaid(m))
            }
            OrderStatus::Pending => {
                row[usize::from(Idx::Status)] = OrderStatus::Paid.as_str().to_string();
                row[usize::from(Idx::GatewayPaymentId)] = gateway_payment_id.to_string();
                let mut data: AppInMemUpdateData = HashMap::new();
                data.insert(t.to_string(), HashMap::from([(oid.to_string(), row)]));
                let _num = self.datastore.save_release(data, lock)?;
                let m = self.fetch_order(oid).await?.ok_or(AppError {
                    code: AppErrorCode::OrderNotExist,
                    detail: Some(oid.to_string()),
                })?;
                Ok(OrderPaidOutcome::Transitioned(m))
            }
            _others => {
                drop(lock);
                Ok(OrderPaidOutcome::Refused(_others))
            }
        }
    } // end of fn mark_paid_once

    async fn cancel_if_unpaid(&self, oid: &str) -> DefaultResult<bool, AppError> {
        use _toplvl::InMemColIdx as Idx;
        let t = _toplvl::TABLE_LABEL;
        let info = Self::_toplvl_fetch_keys(oid);
        let (mut raw, lock) = self.datastore.fetch_acquire(info).await?;
        let row_opt = raw.remove(t).and_then(|mut tbl| tbl.remove(oid));
        let mut row = match row_opt {
            Some(v) => v,
            None => {
                drop(lock);
                return Ok(false); // nothing to cancel, the ack stays best-effort
            }
        };
        let status_serial = _col_str(t, oid, &row, Idx::Status.into())?;
        let payment_serial = _col_str(t, oid, &row, Idx::GatewayPaymentId.into())?;
        let flip = status_serial == OrderStatus::Pending.as_str() && payment_serial.is_empty();
        if flip {
            row[usize::from(Idx::Status)] = OrderStatus::Failed.as_str().to_string();
            let mut data: AppInMemUpdateData = HashMap::new();
            data.insert(t.to_string(), HashMap::from([(oid.to_string(), row)]));
            let _num = self.datastore.save_release(data, lock)?;
        } else {
            drop(lock);
        }
        Ok(flip)
    } // end of fn cancel_if_unpaid

    async fn update_status(
        &self,
        oid: &str,
        new_status: OrderStatus,
    ) -> DefaultResult<(), AppError> {
        use _toplvl::InMemColIdx as Idx;
        let t = _toplvl::TABLE_LABEL;
        let info = Self::_toplvl_fetch_keys(oid);
        let (mut raw, lock) = self.datastore.fetch_acquire(info).await?;
        let row_opt = raw.remove(t).and_then(|mut tbl| tbl.remove(oid));
        let mut row = match row_opt {
            Some(v) => v,
            None => {
                drop(lock);
                return Err(AppError {
                    code: AppErrorCode::OrderNotExist,
                    detail: Some(oid.to_string()),
                });
            }
        };
        row[usize::from(Idx::Status)] = new_status.as_str().to_string();
        let mut data: AppInMemUpdateData = HashMap::new();
        data.insert(t.to_string(), HashMap::from([(oid.to_string(), row)]));
        let _num = self.datastore.save_release(data, lock)?;
        Ok(())
    }

    async fn fetch_by_customer_contact(
        &self,
        phone: &str,
        email: &str,
        limit: usize,
    ) -> DefaultResult<Vec<OrderModel>, AppError> {
        let op = ContactMatchOp {
            phone: phone.to_string(),
            email: email.to_string(),
        };
        let oids = self
            .datastore
            .filter_keys(_customer::TABLE_LABEL.to_string(), &op)
            .await?;
        let mut out = Vec::with_capacity(oids.len());
        for oid in oids {
            if let Some(m) = self.fetch_order(oid.as_str()).await? {
                out.push(m);
            }
        }
        out.sort_by(|a, b| b.create_time.cmp(&a.create_time));
        out.truncate(limit);
        Ok(out)
    }
} // end of impl AbsOrderRepo for OrderInMemRepo
