use std::boxed::Box;
use std::sync::{Arc, Mutex};

use chrono::{FixedOffset, Timelike, Utc};

use storefront::adapter::processor::{
    AbstractPaymentGateway, AppProcessorError, AppProcessorErrorReason, AppProcessorFnLabel,
    BaseClientError, BaseClientErrorReason, GatewayOrderModel,
};
use storefront::api::web::dto::{
    OrderCreateReqDto, OrderLineErrorReason, OrderLineReqDto,
};
use storefront::constant::IST_UTC_OFFSET_SECS;
use storefront::model::{DeliveryPricingModel, OrderTimingModel};
use storefront::usecase::{CreateOrderUcError, CreateOrderUseCase};

use super::super::model::order::{ut_product, ut_valid_customer_dto};
use super::super::ut_setup_log_context;
use super::{MockOrderRepo, MockPaymentGateway, MockProductRepo, MockSettingsRepo};

fn ut_req(items: Vec<(&str, u32)>) -> OrderCreateReqDto {
    OrderCreateReqDto {
        customer: ut_valid_customer_dto(),
        items: items
            .into_iter()
            .map(|(id, quantity)| OrderLineReqDto {
                id: id.to_string(),
                quantity,
            })
            .collect(),
    }
}

fn ut_gateway_ok(amount: u64) -> MockPaymentGateway {
    MockPaymentGateway {
        _create_result: Mutex::new(Some(Ok(GatewayOrderModel {
            id: "order_ut9001".to_string(),
            amount_paise: amount,
            currency: "INR".to_string(),
        }))),
        _verify_result: Mutex::new(None),
        _key_id_result: Mutex::new(Some(Ok("rzp_test_utest".to_string()))),
    }
}

fn ut_usecase(
    repo_order: MockOrderRepo,
    repo_product: MockProductRepo,
    repo_settings: MockSettingsRepo,
    gateway: MockPaymentGateway,
    timing_enforced: bool,
) -> CreateOrderUseCase {
    CreateOrderUseCase {
        repo_order: Box::new(repo_order),
        repo_product: Box::new(repo_product),
        repo_settings: Box::new(repo_settings),
        gateway: Arc::new(Box::new(gateway) as Box<dyn AbstractPaymentGateway>),
        timing_enforced,
        logctx: ut_setup_log_context(),
    }
}

#[tokio::test]
async fn create_ok_amounts_recomputed() {
    let repo_order = MockOrderRepo {
        _create_result: Mutex::new(Some(Ok(()))),
        ..Default::default()
    };
    let repo_product = MockProductRepo {
        _fetch_result: Mutex::new(Some(Ok(vec![
            ut_product("laddu", 100, 5, false),
            ut_product("kaju-katli", 200, 18, false),
        ]))),
    };
    let repo_settings = MockSettingsRepo {
        _pricing_result: Mutex::new(Some(Ok(DeliveryPricingModel::default()))),
        ..Default::default()
    };
    let uc = ut_usecase(
        repo_order,
        repo_product,
        repo_settings,
        ut_gateway_ok(48_300),
        false,
    );
    let req = ut_req(vec![("laddu", 2), ("kaju-katli", 1)]);
    let resp = uc.execute(req).await.ok().unwrap();
    // subtotal 400 rupees, gst 2300 + 2300 paise, reduced delivery fee 30
    assert_eq!(resp.subtotal, 40_000);
    assert_eq!(resp.cgst_total, 2300);
    assert_eq!(resp.sgst_total, 2300);
    assert_eq!(resp.delivery_charge, 3000);
    assert_eq!(resp.total, 47_600);
    assert_eq!(resp.amount, resp.total);
    assert_eq!(resp.currency.as_str(), "INR");
    assert_eq!(resp.gateway_order_id.as_str(), "order_ut9001");
    assert_eq!(resp.key_id.as_str(), "rzp_test_utest");
    assert_eq!(resp.internal_order_id.len(), 32);
}

#[tokio::test]
async fn create_free_delivery_item_waives_fee() {
    let repo_order = MockOrderRepo {
        _create_result: Mutex::new(Some(Ok(()))),
        ..Default::default()
    };
    let repo_product = MockProductRepo {
        _fetch_result: Mutex::new(Some(Ok(vec![ut_product("laddu", 100, 5, true)]))),
    };
    let repo_settings = MockSettingsRepo {
        _pricing_result: Mutex::new(Some(Ok(DeliveryPricingModel::default()))),
        ..Default::default()
    };
    let uc = ut_usecase(
        repo_order,
        repo_product,
        repo_settings,
        ut_gateway_ok(0),
        false,
    );
    let resp = uc.execute(ut_req(vec![("laddu", 1)])).await.ok().unwrap();
    assert_eq!(resp.delivery_charge, 0);
    assert_eq!(resp.subtotal, 10_000);
}

#[tokio::test]
async fn create_rejected_outside_window() {
    // pick a one-hour window which provably excludes the current instant
    let ist = FixedOffset::east_opt(IST_UTC_OFFSET_SECS).unwrap();
    let hour_now = Utc::now().with_timezone(&ist).hour();
    let closed_window = OrderTimingModel {
        start_hour: (hour_now + 1) % 24,
        end_hour: (hour_now + 2) % 24,
    };
    let repo_settings = MockSettingsRepo {
        _timing_result: Mutex::new(Some(Ok(closed_window))),
        ..Default::default()
    };
    let uc = ut_usecase(
        MockOrderRepo::default(),
        MockProductRepo::default(),
        repo_settings,
        MockPaymentGateway::default(),
        true,
    );
    let result = uc.execute(ut_req(vec![("laddu", 1)])).await;
    if let Err(CreateOrderUcError::ShopClosed(msg)) = result {
        assert!(msg.contains("(IST)"));
    } else {
        panic!("expected shop-closed rejection");
    }
}

#[tokio::test]
async fn create_rejected_empty_cart() {
    let uc = ut_usecase(
        MockOrderRepo::default(),
        MockProductRepo::default(),
        MockSettingsRepo::default(),
        MockPaymentGateway::default(),
        false,
    );
    let result = uc.execute(ut_req(vec![])).await;
    if let Err(CreateOrderUcError::ReqContent(e)) = result {
        assert!(e.nonfield.is_some());
    } else {
        panic!("expected request-content rejection");
    }
}

#[tokio::test]
async fn create_rejected_quantity_bounds() {
    let uc = ut_usecase(
        MockOrderRepo::default(),
        MockProductRepo::default(),
        MockSettingsRepo::default(),
        MockPaymentGateway::default(),
        false,
    );
    let result = uc.execute(ut_req(vec![("laddu", 0), ("barfi", 51)])).await;
    if let Err(CreateOrderUcError::ReqContent(e)) = result {
        let items = e.items.unwrap();
        assert_eq!(items.len(), 2);
        assert!(items
            .iter()
            .all(|i| i.reason == OrderLineErrorReason::QuantityLimit));
        let limits = items[0].qty_limit.as_ref().unwrap();
        assert_eq!((limits.min_, limits.max_), (1, 50));
    } else {
        panic!("expected request-content rejection");
    }
}

#[tokio::test]
async fn create_rejected_invalid_contact() {
    let uc = ut_usecase(
        MockOrderRepo::default(),
        MockProductRepo::default(),
        MockSettingsRepo::default(),
        MockPaymentGateway::default(),
        false,
    );
    let mut req = ut_req(vec![("laddu", 1)]);
    req.customer.pincode = "12".to_string();
    let result = uc.execute(req).await;
    if let Err(CreateOrderUcError::ReqContent(e)) = result {
        assert!(e.customer.unwrap().pincode.is_some());
    } else {
        panic!("expected request-content rejection");
    }
}

#[tokio::test]
async fn create_rejected_missing_and_unavailable_product() {
    let mut sold_out = ut_product("soan-papdi", 90, 18, false);
    sold_out.available = false;
    let repo_product = MockProductRepo {
        _fetch_result: Mutex::new(Some(Ok(vec![sold_out]))),
    };
    let uc = ut_usecase(
        MockOrderRepo::default(),
        repo_product,
        MockSettingsRepo::default(),
        MockPaymentGateway::default(),
        false,
    );
    let result = uc
        .execute(ut_req(vec![("soan-papdi", 1), ("no-such-sweet", 2)]))
        .await;
    if let Err(CreateOrderUcError::ReqContent(e)) = result {
        let items = e.items.unwrap();
        assert_eq!(items.len(), 2);
        let sold_out_err = items
            .iter()
            .find(|i| i.id.as_str() == "soan-papdi")
            .unwrap();
        assert_eq!(sold_out_err.reason, OrderLineErrorReason::Unavailable);
        let missing_err = items
            .iter()
            .find(|i| i.id.as_str() == "no-such-sweet")
            .unwrap();
        assert_eq!(missing_err.reason, OrderLineErrorReason::NotExist);
    } else {
        panic!("expected request-content rejection");
    }
}

#[tokio::test]
async fn create_gateway_unreachable_is_server_error() {
    let gateway = MockPaymentGateway {
        _create_result: Mutex::new(Some(Err(AppProcessorError {
            reason: AppProcessorErrorReason::LowLvlNet(BaseClientError {
                reason: BaseClientErrorReason::Tls("ut-tls-down".to_string()),
            }),
            fn_label: AppProcessorFnLabel::CreateGatewayOrder,
        }))),
        _verify_result: Mutex::new(None),
        _key_id_result: Mutex::new(Some(Ok("rzp_test_utest".to_string()))),
    };
    let repo_product = MockProductRepo {
        _fetch_result: Mutex::new(Some(Ok(vec![ut_product("laddu", 100, 5, false)]))),
    };
    let repo_settings = MockSettingsRepo {
        _pricing_result: Mutex::new(Some(Ok(DeliveryPricingModel::default()))),
        ..Default::default()
    };
    let uc = ut_usecase(
        MockOrderRepo::default(),
        repo_product,
        repo_settings,
        gateway,
        false,
    );
    let result = uc.execute(ut_req(vec![("laddu", 1)])).await;
    assert!(matches!(result, Err(CreateOrderUcError::Server(_))));
}

#[tokio::test]
async fn create_missing_credential_is_misconfig() {
    let gateway = MockPaymentGateway {
        _create_result: Mutex::new(None),
        _verify_result: Mutex::new(None),
        _key_id_result: Mutex::new(Some(Err(AppProcessorError {
            reason: AppProcessorErrorReason::MissingCredential(vec![
                "RAZORPAY_KEY_ID".to_string()
            ]),
            fn_label: AppProcessorFnLabel::PublishableKey,
        }))),
    };
    let repo_product = MockProductRepo {
        _fetch_result: Mutex::new(Some(Ok(vec![ut_product("laddu", 100, 5, false)]))),
    };
    let repo_settings = MockSettingsRepo {
        _pricing_result: Mutex::new(Some(Ok(DeliveryPricingModel::default()))),
        ..Default::default()
    };
    let uc = ut_usecase(
        MockOrderRepo::default(),
        repo_product,
        repo_settings,
        gateway,
        false,
    );
    let result = uc.execute(ut_req(vec![("laddu", 1)])).await;
    if let Err(CreateOrderUcError::ServerMisconfig(missing)) = result {
        assert_eq!(missing, vec!["RAZORPAY_KEY_ID".to_string()]);
    } else {
        panic!("expected misconfiguration error");
    }
}

#[tokio::test]
async fn create_persist_failure_is_server_error() {
    use storefront::error::{AppError, AppErrorCode};
    let repo_order = MockOrderRepo {
        _create_result: Mutex::new(Some(Err(AppError {
            code: AppErrorCode::AcquireLockFailure,
            detail: Some("ut".to_string()),
        }))),
        ..Default::default()
    };
    let repo_product = MockProductRepo {
        _fetch_result: Mutex::new(Some(Ok(vec![ut_product("laddu", 100, 5, false)]))),
    };
    let repo_settings = MockSettingsRepo {
        _pricing_result: Mutex::new(Some(Ok(DeliveryPricingModel::default()))),
        ..Default::default()
    };
    let uc = ut_usecase(
        repo_order,
        repo_product,
        repo_settings,
        ut_gateway_ok(11_000),
        false,
    );
    let result = uc.execute(ut_req(vec![("laddu", 1)])).await;
    assert!(matches!(result, Err(CreateOrderUcError::Server(_))));
}
