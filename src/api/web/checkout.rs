use actix_web::http::header::ContentType;
use actix_web::web::{Data as WebData, Json as ExtJson};
use actix_web::{HttpResponse, Result as ActixResult};

use super::dto::{
    ErrorRespDto, OrderCancelReqDto, OrderCreateReqDto, PaymentVerifyReqDto, SimpleSuccessRespDto,
};
use crate::adapter::repository::{app_repo_order, app_repo_product, app_repo_shop_settings};
use crate::logging::{app_log_event, AppLogLevel};
use crate::usecase::{
    CancelOrderUseCase, CreateOrderUcError, CreateOrderUseCase, PaymentVerifyUcError,
    PaymentVerifyUseCase,
};
use crate::AppSharedState;

fn _resp_error_json(error: String) -> Vec<u8> {
    serde_json::to_vec(&ErrorRespDto { error }).unwrap()
}

fn _resp_misconfig(missing: Vec<String>) -> HttpResponse {
    // explicitly distinguished from a generic internal failure, operators
    // search for this exact phrase
    let msg = format!(
        "server misconfigured, missing gateway credentials: {}",
        missing.join(", ")
    );
    HttpResponse::InternalServerError()
        .append_header(ContentType::json())
        .body(_resp_error_json(msg))
}

fn _resp_internal() -> HttpResponse {
    HttpResponse::InternalServerError()
        .append_header(ContentType::json())
        .body(r#"{"reason":"internal-error"}"#)
}

pub(super) async fn create_order(
    req_body: ExtJson<OrderCreateReqDto>,
    shr_state: WebData<AppSharedState>,
) -> ActixResult<HttpResponse> {
    let logctx = shr_state.log_context().clone();
    let logctx_p = &logctx;
    let ds = shr_state.datastore();
    let results = (
        app_repo_order(ds.clone()).await,
        app_repo_product(ds.clone()).await,
        app_repo_shop_settings(ds).await,
    );
    let (repo_order, repo_product, repo_settings) = match results {
        (Ok(o), Ok(p), Ok(s)) => (o, p, s),
        _others => {
            app_log_event!(logctx_p, AppLogLevel::ERROR, "repo-init-error");
            return Ok(_resp_internal());
        }
    };
    let uc = CreateOrderUseCase {
        repo_order,
        repo_product,
        repo_settings,
        gateway: shr_state.gateway(),
        timing_enforced: shr_state.config().order_timing_enforced,
        logctx: logctx.clone(),
    };
    let resp = match uc.execute(req_body.into_inner()).await {
        Ok(v) => {
            let body = serde_json::to_vec(&v).unwrap();
            HttpResponse::Created()
                .append_header(ContentType::json())
                .body(body)
        }
        Err(uce) => match uce {
            CreateOrderUcError::ShopClosed(msg) => HttpResponse::Forbidden()
                .append_header(ContentType::json())
                .body(_resp_error_json(msg)),
            CreateOrderUcError::ReqContent(e) => {
                let body = serde_json::to_vec(&e).unwrap();
                HttpResponse::BadRequest()
                    .append_header(ContentType::json())
                    .body(body)
            }
            CreateOrderUcError::ServerMisconfig(missing) => _resp_misconfig(missing),
            CreateOrderUcError::Server(errors) => {
                let msg = errors
                    .into_iter()
                    .map(|e| format!("{:?}", e))
                    .collect::<Vec<_>>()
                    .join(", ");
                app_log_event!(logctx_p, AppLogLevel::ERROR, "{msg}");
                _resp_internal()
            }
        },
    };
    Ok(resp)
} // end of fn create_order

pub(super) async fn verify_payment(
    req_body: ExtJson<PaymentVerifyReqDto>,
    shr_state: WebData<AppSharedState>,
) -> ActixResult<HttpResponse> {
    let logctx = shr_state.log_context().clone();
    let logctx_p = &logctx;
    let repo_order = match app_repo_order(shr_state.datastore()).await {
        Ok(v) => v,
        Err(e) => {
            app_log_event!(logctx_p, AppLogLevel::ERROR, "repo-init-error {:?}", e);
            return Ok(_resp_internal());
        }
    };
    let uc = PaymentVerifyUseCase {
        repo_order,
        gateway: shr_state.gateway(),
        notify_queue: shr_state.notify_queue(),
        logctx: logctx.clone(),
    };
    let resp = match uc.execute(req_body.into_inner()).await {
        Ok(v) => {
            let body = serde_json::to_vec(&v).unwrap();
            HttpResponse::Ok()
                .append_header(ContentType::json())
                .body(body)
        }
        Err(uce) => match uce {
            PaymentVerifyUcError::InvalidPayload(detail) => HttpResponse::BadRequest()
                .append_header(ContentType::json())
                .body(_resp_error_json(detail)),
            PaymentVerifyUcError::SignatureMismatch => HttpResponse::BadRequest()
                .append_header(ContentType::json())
                .body(_resp_error_json(
                    "Invalid payment signature. Payment verification failed.".to_string(),
                )),
            PaymentVerifyUcError::OrderNotExist => HttpResponse::NotFound()
                .append_header(ContentType::json())
                .body(_resp_error_json("Order not found".to_string())),
            PaymentVerifyUcError::GatewayOrderMismatch => HttpResponse::BadRequest()
                .append_header(ContentType::json())
                .body(_resp_error_json(
                    "Gateway order does not belong to this order".to_string(),
                )),
            PaymentVerifyUcError::NotPayable(status) => HttpResponse::Conflict()
                .append_header(ContentType::json())
                .body(_resp_error_json(format!(
                    "Order is not payable in status {status}"
                ))),
            PaymentVerifyUcError::ServerMisconfig(missing) => _resp_misconfig(missing),
            PaymentVerifyUcError::Server(e) => {
                app_log_event!(logctx_p, AppLogLevel::ERROR, "{:?}", e);
                _resp_internal()
            }
        },
    };
    Ok(resp)
} // end of fn verify_payment

pub(super) async fn cancel_order(
    req_body: ExtJson<OrderCancelReqDto>,
    shr_state: WebData<AppSharedState>,
) -> ActixResult<HttpResponse> {
    let logctx = shr_state.log_context().clone();
    let logctx_p = &logctx;
    let req = req_body.into_inner();
    if req.internal_order_id.is_empty() {
        let resp = HttpResponse::BadRequest()
            .append_header(ContentType::json())
            .body(_resp_error_json("Internal order ID required".to_string()));
        return Ok(resp);
    }
    let repo_order = match app_repo_order(shr_state.datastore()).await {
        Ok(v) => v,
        Err(e) => {
            app_log_event!(logctx_p, AppLogLevel::ERROR, "repo-init-error {:?}", e);
            return Ok(_resp_internal());
        }
    };
    let uc = CancelOrderUseCase {
        repo_order,
        logctx: logctx.clone(),
    };
    let resp = match uc.execute(req.internal_order_id).await {
        // acknowledged whether or not a flip happened
        Ok(_flipped) => {
            let body = serde_json::to_vec(&SimpleSuccessRespDto { success: true }).unwrap();
            HttpResponse::Ok()
                .append_header(ContentType::json())
                .body(body)
        }
        Err(e) => {
            app_log_event!(logctx_p, AppLogLevel::ERROR, "{:?}", e);
            _resp_internal()
        }
    };
    Ok(resp)
} // end of fn cancel_order
