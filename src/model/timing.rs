use std::result::Result as DefaultResult;

use chrono::{DateTime, FixedOffset, Timelike, Utc};

use crate::api::web::dto::{OrderTimingDto, OrderTimingErrorDto};
use crate::constant::{order_timing_default as dft, IST_UTC_OFFSET_SECS};

/// daily order-acceptance window in IST, `end_hour == 24` means end of
/// the day, a window with `start_hour > end_hour` wraps past midnight
#[derive(Debug, Clone, PartialEq)]
pub struct OrderTimingModel {
    pub start_hour: u32,
    pub end_hour: u32,
}

impl Default for OrderTimingModel {
    fn default() -> Self {
        Self {
            start_hour: dft::START_HOUR,
            end_hour: dft::END_HOUR,
        }
    }
}

impl TryFrom<OrderTimingDto> for OrderTimingModel {
    type Error = OrderTimingErrorDto;
    fn try_from(value: OrderTimingDto) -> DefaultResult<Self, Self::Error> {
        let start_hour = value.start_hour;
        let mut end_hour = value.end_hour;
        if start_hour > 23 {
            return Err(OrderTimingErrorDto {
                detail: format!("start-hour-out-of-range: {start_hour}"),
            });
        }
        if end_hour > 24 {
            return Err(OrderTimingErrorDto {
                detail: format!("end-hour-out-of-range: {end_hour}"),
            });
        }
        // staff entering midnight as zero actually mean end of the day
        if end_hour == 0 && start_hour > 0 {
            end_hour = 24;
        }
        if start_hour == end_hour {
            Err(OrderTimingErrorDto {
                detail: "start-and-end-hour-equal".to_string(),
            })
        } else {
            Ok(Self {
                start_hour,
                end_hour,
            })
        }
    } // end of fn try_from
}

impl From<OrderTimingModel> for OrderTimingDto {
    fn from(value: OrderTimingModel) -> OrderTimingDto {
        OrderTimingDto {
            start_hour: value.start_hour,
            end_hour: value.end_hour,
        }
    }
}

impl OrderTimingModel {
    pub fn accepts(&self, now: DateTime<Utc>) -> bool {
        let ist = FixedOffset::east_opt(IST_UTC_OFFSET_SECS).unwrap();
        let hour_ist = now.with_timezone(&ist).hour();
        if self.start_hour < self.end_hour {
            hour_ist >= self.start_hour && hour_ist < self.end_hour
        } else {
            hour_ist >= self.start_hour || hour_ist < self.end_hour
        }
    }

    /// label shown to customers when the shop refuses a new order
    pub fn window_label(&self) -> String {
        format!(
            "{} to {} (IST)",
            Self::hour_label(self.start_hour),
            Self::hour_label(self.end_hour)
        )
    }

    fn hour_label(hour: u32) -> String {
        let h = hour % 24;
        let h12 = if h % 12 == 0 { 12 } else { h % 12 };
        let period = if h >= 12 { "PM" } else { "AM" };
        format!("{h12}:00 {period}")
    }
} // end of impl OrderTimingModel
