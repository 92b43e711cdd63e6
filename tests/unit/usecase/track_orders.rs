use std::boxed::Box;
use std::sync::Mutex;

use storefront::api::web::dto::TrackOrdersReqDto;
use storefront::usecase::{TrackOrdersUcError, TrackOrdersUseCase};

use super::{ut_paid_order, ut_pending_order, MockOrderRepo};

#[tokio::test]
async fn track_ok_maps_orders() {
    let repo = MockOrderRepo {
        _fetch_by_contact_result: Mutex::new(Some(Ok(vec![
            ut_paid_order("b100", "order_ut1", "pay_ut1"),
            ut_pending_order("b101", "order_ut2"),
        ]))),
        ..Default::default()
    };
    let uc = TrackOrdersUseCase {
        repo_order: Box::new(repo),
    };
    let req = TrackOrdersReqDto {
        phone: "+91 98765 43210".to_string(),
        email: " Asha.Rani@example.com".to_string(),
    };
    let resp = uc.execute(req).await.ok().unwrap();
    assert_eq!(resp.orders.len(), 2);
    assert_eq!(resp.orders[0].id.as_str(), "b100");
    assert_eq!(resp.orders[0].status.as_str(), "PAID");
    assert_eq!(resp.orders[0].items.len(), 2);
    assert_eq!(resp.orders[0].items[0].price, 100);
    assert_eq!(resp.orders[1].status.as_str(), "PENDING");
}

#[tokio::test]
async fn track_rejects_bad_phone() {
    let uc = TrackOrdersUseCase {
        repo_order: Box::new(MockOrderRepo::default()),
    };
    let req = TrackOrdersReqDto {
        phone: "12345".to_string(),
        email: "asha.rani@example.com".to_string(),
    };
    let result = uc.execute(req).await;
    if let Err(TrackOrdersUcError::ReqContent(e)) = result {
        assert!(e.phone.is_some());
        assert!(e.email.is_none());
    } else {
        panic!("expected request-content rejection");
    }
}

#[tokio::test]
async fn track_rejects_bad_email() {
    let uc = TrackOrdersUseCase {
        repo_order: Box::new(MockOrderRepo::default()),
    };
    let req = TrackOrdersReqDto {
        phone: "9876543210".to_string(),
        email: "not an email".to_string(),
    };
    let result = uc.execute(req).await;
    if let Err(TrackOrdersUcError::ReqContent(e)) = result {
        assert!(e.email.is_some());
    } else {
        panic!("expected request-content rejection");
    }
}
