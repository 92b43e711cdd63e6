use actix_web::http::header::ContentType;
use actix_web::web::{Data as WebData, Json as ExtJson, Path as ExtPath};
use actix_web::{HttpResponse, Result as ActixResult};

use super::dto::{ErrorRespDto, OrderStatusEditReqDto, TrackOrdersReqDto};
use crate::adapter::repository::app_repo_order;
use crate::logging::{app_log_event, AppLogLevel};
use crate::usecase::{
    EditOrderStatusUcError, EditOrderStatusUseCase, TrackOrdersUcError, TrackOrdersUseCase,
};
use crate::AppSharedState;

fn _resp_error_json(error: String) -> Vec<u8> {
    serde_json::to_vec(&ErrorRespDto { error }).unwrap()
}

fn _resp_internal() -> HttpResponse {
    HttpResponse::InternalServerError()
        .append_header(ContentType::json())
        .body(r#"{"reason":"internal-error"}"#)
}

pub(super) async fn track_customer_orders(
    req_body: ExtJson<TrackOrdersReqDto>,
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
    let uc = TrackOrdersUseCase { repo_order };
    let resp = match uc.execute(req_body.into_inner()).await {
        Ok(v) => {
            let body = serde_json::to_vec(&v).unwrap();
            HttpResponse::Ok()
                .append_header(ContentType::json())
                .body(body)
        }
        Err(uce) => match uce {
            TrackOrdersUcError::ReqContent(e) => {
                let body = serde_json::to_vec(&e).unwrap();
                HttpResponse::BadRequest()
                    .append_header(ContentType::json())
                    .body(body)
            }
            TrackOrdersUcError::Server(e) => {
                app_log_event!(logctx_p, AppLogLevel::ERROR, "{:?}", e);
                _resp_internal()
            }
        },
    };
    Ok(resp)
} // end of fn track_customer_orders

pub(super) async fn edit_order_status(
    path: ExtPath<String>,
    req_body: ExtJson<OrderStatusEditReqDto>,
    shr_state: WebData<AppSharedState>,
) -> ActixResult<HttpResponse> {
    let oid = path.into_inner();
    let logctx = shr_state.log_context().clone();
    let logctx_p = &logctx;
    let repo_order = match app_repo_order(shr_state.datastore()).await {
        Ok(v) => v,
        Err(e) => {
            app_log_event!(logctx_p, AppLogLevel::ERROR, "repo-init-error {:?}", e);
            return Ok(_resp_internal());
        }
    };
    let uc = EditOrderStatusUseCase {
        repo_order,
        logctx: logctx.clone(),
    };
    let resp = match uc.execute(oid, req_body.into_inner()).await {
        Ok(()) => HttpResponse::Ok()
            .append_header(ContentType::json())
            .body("{}"),
        Err(uce) => match uce {
            EditOrderStatusUcError::InvalidStatus(given) => HttpResponse::BadRequest()
                .append_header(ContentType::json())
                .body(_resp_error_json(format!("unknown status: {given}"))),
            EditOrderStatusUcError::OrderNotExist => HttpResponse::NotFound()
                .append_header(ContentType::json())
                .body(_resp_error_json("Order not found".to_string())),
            EditOrderStatusUcError::Server(e) => {
                app_log_event!(logctx_p, AppLogLevel::ERROR, "{:?}", e);
                _resp_internal()
            }
        },
    };
    Ok(resp)
} // end of fn edit_order_status
