use std::boxed::Box;
use std::sync::Mutex;

use storefront::api::web::dto::OrderStatusEditReqDto;
use storefront::error::{AppError, AppErrorCode};
use storefront::usecase::{EditOrderStatusUcError, EditOrderStatusUseCase};

use super::super::ut_setup_log_context;
use super::MockOrderRepo;

fn ut_usecase(repo: MockOrderRepo) -> EditOrderStatusUseCase {
    EditOrderStatusUseCase {
        repo_order: Box::new(repo),
        logctx: ut_setup_log_context(),
    }
}

#[tokio::test]
async fn status_override_ok() {
    let repo = MockOrderRepo {
        _update_status_result: Mutex::new(Some(Ok(()))),
        ..Default::default()
    };
    let uc = ut_usecase(repo);
    let req = OrderStatusEditReqDto {
        status: "DELIVERED".to_string(),
    };
    let result = uc.execute("ut-order-1".to_string(), req).await;
    assert!(result.is_ok());
}

#[tokio::test]
async fn status_unknown_label_rejected() {
    // the repository slot stays unset, parsing must fail first
    let uc = ut_usecase(MockOrderRepo::default());
    let req = OrderStatusEditReqDto {
        status: "SHIPPED_MAYBE".to_string(),
    };
    let result = uc.execute("ut-order-2".to_string(), req).await;
    if let Err(EditOrderStatusUcError::InvalidStatus(given)) = result {
        assert_eq!(given.as_str(), "SHIPPED_MAYBE");
    } else {
        panic!("expected invalid-status rejection");
    }
}

#[tokio::test]
async fn status_missing_order() {
    let repo = MockOrderRepo {
        _update_status_result: Mutex::new(Some(Err(AppError {
            code: AppErrorCode::OrderNotExist,
            detail: Some("ut-order-3".to_string()),
        }))),
        ..Default::default()
    };
    let uc = ut_usecase(repo);
    let req = OrderStatusEditReqDto {
        status: "REFUNDED".to_string(),
    };
    let result = uc.execute("ut-order-3".to_string(), req).await;
    assert!(matches!(result, Err(EditOrderStatusUcError::OrderNotExist)));
}
