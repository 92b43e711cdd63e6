use std::boxed::Box;
use std::sync::{Arc, Mutex};

use storefront::adapter::notify::AbstractNotifyQueue;
use storefront::adapter::processor::AbstractPaymentGateway;
use storefront::adapter::repository::OrderPaidOutcome;
use storefront::api::web::dto::PaymentVerifyReqDto;
use storefront::error::{AppError, AppErrorCode};
use storefront::model::OrderStatus;
use storefront::usecase::{PaymentVerifyUcError, PaymentVerifyUseCase};

use super::super::ut_setup_log_context;
use super::{
    ut_paid_order, ut_pending_order, MockNotifyQueue, MockOrderRepo, MockPaymentGateway,
};

const UT_OID: &str = "a3f0019bd2c845e0a3f0019bd2c845e0";
const UT_GW_OID: &str = "order_ut9001";
const UT_GW_PAY: &str = "pay_ut7001";

fn ut_req() -> PaymentVerifyReqDto {
    PaymentVerifyReqDto {
        gateway_order_id: UT_GW_OID.to_string(),
        gateway_payment_id: UT_GW_PAY.to_string(),
        gateway_signature: "ab".repeat(32),
        internal_order_id: UT_OID.to_string(),
    }
}

fn ut_gateway_verify(result: bool) -> MockPaymentGateway {
    MockPaymentGateway {
        _verify_result: Mutex::new(Some(Ok(result))),
        ..Default::default()
    }
}

fn ut_usecase(
    repo_order: MockOrderRepo,
    gateway: MockPaymentGateway,
) -> (PaymentVerifyUseCase, Arc<Mutex<Vec<String>>>) {
    let submitted = Arc::new(Mutex::new(Vec::new()));
    let queue = MockNotifyQueue {
        submitted: submitted.clone(),
    };
    let uc = PaymentVerifyUseCase {
        repo_order: Box::new(repo_order),
        gateway: Arc::new(Box::new(gateway) as Box<dyn AbstractPaymentGateway>),
        notify_queue: Arc::new(Box::new(queue) as Box<dyn AbstractNotifyQueue>),
        logctx: ut_setup_log_context(),
    };
    (uc, submitted)
}

#[tokio::test]
async fn verify_ok_transitions_and_notifies_once() {
    let repo = MockOrderRepo {
        _fetch_result: Mutex::new(Some(Ok(Some(ut_pending_order(UT_OID, UT_GW_OID))))),
        _mark_paid_result: Mutex::new(Some(Ok(OrderPaidOutcome::Transitioned(ut_paid_order(
            UT_OID, UT_GW_OID, UT_GW_PAY,
        ))))),
        ..Default::default()
    };
    let (uc, submitted) = ut_usecase(repo, ut_gateway_verify(true));
    let resp = uc.execute(ut_req()).await.ok().unwrap();
    assert!(resp.success);
    assert_eq!(resp.order_id.as_str(), UT_OID);
    assert_eq!(resp.status.as_str(), "PAID");
    assert_eq!(resp.customer.phone.as_str(), "9876543210");
    let g = submitted.lock().unwrap();
    assert_eq!(g.as_slice(), &[UT_OID.to_string()]);
}

#[tokio::test]
async fn verify_repeat_call_idempotent_no_second_notify() {
    // order already PAID, the mark-paid slot is left unset on purpose, a
    // second state mutation would panic the mock
    let repo = MockOrderRepo {
        _fetch_result: Mutex::new(Some(Ok(Some(ut_paid_order(UT_OID, UT_GW_OID, UT_GW_PAY))))),
        ..Default::default()
    };
    let (uc, submitted) = ut_usecase(repo, ut_gateway_verify(true));
    let resp = uc.execute(ut_req()).await.ok().unwrap();
    assert!(resp.success);
    assert_eq!(resp.status.as_str(), "PAID");
    assert!(submitted.lock().unwrap().is_empty());
}

#[tokio::test]
async fn verify_concurrent_settle_race_still_succeeds() {
    let repo = MockOrderRepo {
        _fetch_result: Mutex::new(Some(Ok(Some(ut_pending_order(UT_OID, UT_GW_OID))))),
        _mark_paid_result: Mutex::new(Some(Ok(OrderPaidOutcome::AlreadyPaid(ut_paid_order(
            UT_OID, UT_GW_OID, UT_GW_PAY,
        ))))),
        ..Default::default()
    };
    let (uc, submitted) = ut_usecase(repo, ut_gateway_verify(true));
    let resp = uc.execute(ut_req()).await.ok().unwrap();
    assert!(resp.success);
    // the competing request already fanned the notification out
    assert!(submitted.lock().unwrap().is_empty());
}

#[tokio::test]
async fn verify_signature_mismatch_touches_nothing() {
    // every repository slot is unset, any access would panic the mock
    let (uc, submitted) = ut_usecase(MockOrderRepo::default(), ut_gateway_verify(false));
    let result = uc.execute(ut_req()).await;
    assert!(matches!(result, Err(PaymentVerifyUcError::SignatureMismatch)));
    assert!(submitted.lock().unwrap().is_empty());
}

#[tokio::test]
async fn verify_fails_regardless_of_order_existence() {
    // same mismatch outcome for an order id nobody ever created
    let (uc, _submitted) = ut_usecase(MockOrderRepo::default(), ut_gateway_verify(false));
    let mut req = ut_req();
    req.internal_order_id = "ffffffffffffffffffffffffffffffff".to_string();
    let result = uc.execute(req).await;
    assert!(matches!(result, Err(PaymentVerifyUcError::SignatureMismatch)));
}

#[tokio::test]
async fn verify_malformed_payload_rejected_early() {
    let cases = [
        ("bogus_123", UT_GW_PAY, "ab".repeat(32)),
        (UT_GW_OID, "nope_456", "ab".repeat(32)),
        (UT_GW_OID, UT_GW_PAY, "ab".repeat(10)), // too short
    ];
    for (gw_oid, gw_pay, sig) in cases {
        let (uc, _submitted) = ut_usecase(MockOrderRepo::default(), MockPaymentGateway::default());
        let req = PaymentVerifyReqDto {
            gateway_order_id: gw_oid.to_string(),
            gateway_payment_id: gw_pay.to_string(),
            gateway_signature: sig,
            internal_order_id: UT_OID.to_string(),
        };
        let result = uc.execute(req).await;
        assert!(matches!(result, Err(PaymentVerifyUcError::InvalidPayload(_))));
    }
}

#[tokio::test]
async fn verify_order_not_found() {
    let repo = MockOrderRepo {
        _fetch_result: Mutex::new(Some(Ok(None))),
        ..Default::default()
    };
    let (uc, _submitted) = ut_usecase(repo, ut_gateway_verify(true));
    let result = uc.execute(ut_req()).await;
    assert!(matches!(result, Err(PaymentVerifyUcError::OrderNotExist)));
}

#[tokio::test]
async fn verify_gateway_order_mismatch() {
    let repo = MockOrderRepo {
        _fetch_result: Mutex::new(Some(Ok(Some(ut_pending_order(
            UT_OID,
            "order_ut_other", // stored under a different gateway session
        ))))),
        ..Default::default()
    };
    let (uc, submitted) = ut_usecase(repo, ut_gateway_verify(true));
    let result = uc.execute(ut_req()).await;
    assert!(matches!(
        result,
        Err(PaymentVerifyUcError::GatewayOrderMismatch)
    ));
    assert!(submitted.lock().unwrap().is_empty());
}

#[tokio::test]
async fn verify_refused_after_cancellation() {
    let repo = MockOrderRepo {
        _fetch_result: Mutex::new(Some(Ok(Some(ut_pending_order(UT_OID, UT_GW_OID))))),
        _mark_paid_result: Mutex::new(Some(Ok(OrderPaidOutcome::Refused(OrderStatus::Failed)))),
        ..Default::default()
    };
    let (uc, submitted) = ut_usecase(repo, ut_gateway_verify(true));
    let result = uc.execute(ut_req()).await;
    if let Err(PaymentVerifyUcError::NotPayable(status)) = result {
        assert_eq!(status.as_str(), "FAILED");
    } else {
        panic!("expected not-payable rejection");
    }
    assert!(submitted.lock().unwrap().is_empty());
}

#[tokio::test]
async fn verify_repo_failure_is_server_error() {
    let repo = MockOrderRepo {
        _fetch_result: Mutex::new(Some(Err(AppError {
            code: AppErrorCode::AcquireLockFailure,
            detail: Some("ut".to_string()),
        }))),
        ..Default::default()
    };
    let (uc, _submitted) = ut_usecase(repo, ut_gateway_verify(true));
    let result = uc.execute(ut_req()).await;
    assert!(matches!(result, Err(PaymentVerifyUcError::Server(_))));
}
