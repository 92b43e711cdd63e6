mod cancel_order;
mod create_order;
mod edit_order_status;
mod edit_settings;
mod track_orders;
mod verify_payment;

pub use cancel_order::CancelOrderUseCase;
pub use create_order::{CreateOrderUcError, CreateOrderUseCase};
pub use edit_order_status::{EditOrderStatusUcError, EditOrderStatusUseCase};
pub use edit_settings::{
    EditDeliveryPricingUcError, EditDeliveryPricingUseCase, EditOrderTimingUcError,
    EditOrderTimingUseCase, ReadDeliveryPricingUseCase, ReadOrderTimingUseCase,
};
pub use track_orders::{TrackOrdersUcError, TrackOrdersUseCase};
pub use verify_payment::{PaymentVerifyUcError, PaymentVerifyUseCase};
