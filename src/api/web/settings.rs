use actix_web::http::header::ContentType;
use actix_web::web::{Data as WebData, Json as ExtJson};
use actix_web::{HttpResponse, Result as ActixResult};

use super::dto::{DeliveryPricingDto, ErrorRespDto, OrderTimingDto};
use crate::adapter::repository::app_repo_shop_settings;
use crate::logging::{app_log_event, AppLogLevel};
use crate::usecase::{
    EditDeliveryPricingUcError, EditDeliveryPricingUseCase, EditOrderTimingUcError,
    EditOrderTimingUseCase, ReadDeliveryPricingUseCase, ReadOrderTimingUseCase,
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

pub(super) async fn read_delivery_pricing(
    shr_state: WebData<AppSharedState>,
) -> ActixResult<HttpResponse> {
    let logctx = shr_state.log_context().clone();
    let logctx_p = &logctx;
    let repo = match app_repo_shop_settings(shr_state.datastore()).await {
        Ok(v) => v,
        Err(e) => {
            app_log_event!(logctx_p, AppLogLevel::ERROR, "repo-init-error {:?}", e);
            return Ok(_resp_internal());
        }
    };
    let uc = ReadDeliveryPricingUseCase { repo };
    let resp = match uc.execute().await {
        Ok(v) => {
            let body = serde_json::to_vec(&v).unwrap();
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
}

pub(super) async fn edit_delivery_pricing(
    req_body: ExtJson<DeliveryPricingDto>,
    shr_state: WebData<AppSharedState>,
) -> ActixResult<HttpResponse> {
    let logctx = shr_state.log_context().clone();
    let logctx_p = &logctx;
    let repo = match app_repo_shop_settings(shr_state.datastore()).await {
        Ok(v) => v,
        Err(e) => {
            app_log_event!(logctx_p, AppLogLevel::ERROR, "repo-init-error {:?}", e);
            return Ok(_resp_internal());
        }
    };
    let uc = EditDeliveryPricingUseCase { repo };
    let resp = match uc.execute(req_body.into_inner()).await {
        Ok(v) => {
            let body = serde_json::to_vec(&v).unwrap();
            HttpResponse::Ok()
                .append_header(ContentType::json())
                .body(body)
        }
        Err(uce) => match uce {
            EditDeliveryPricingUcError::ReqContent(e) => HttpResponse::BadRequest()
                .append_header(ContentType::json())
                .body(_resp_error_json(e.detail)),
            EditDeliveryPricingUcError::Server(e) => {
                app_log_event!(logctx_p, AppLogLevel::ERROR, "{:?}", e);
                _resp_internal()
            }
        },
    };
    Ok(resp)
} // end of fn edit_delivery_pricing

pub(super) async fn read_order_timing(
    shr_state: WebData<AppSharedState>,
) -> ActixResult<HttpResponse> {
    let logctx = shr_state.log_context().clone();
    let logctx_p = &logctx;
    let repo = match app_repo_shop_settings(shr_state.datastore()).await {
        Ok(v) => v,
        Err(e) => {
            app_log_event!(logctx_p, AppLogLevel::ERROR, "repo-init-error {:?}", e);
            return Ok(_resp_internal());
        }
    };
    let uc = ReadOrderTimingUseCase { repo };
    let resp = match uc.execute().await {
        Ok(v) => {
            let body = serde_json::to_vec(&v).unwrap();
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
}

pub(super) async fn edit_order_timing(
    req_body: ExtJson<OrderTimingDto>,
    shr_state: WebData<AppSharedState>,
) -> ActixResult<HttpResponse> {
    let logctx = shr_state.log_context().clone();
    let logctx_p = &logctx;
    let repo = match app_repo_shop_settings(shr_state.datastore()).await {
        Ok(v) => v,
        Err(e) => {
            app_log_event!(logctx_p, AppLogLevel::ERROR, "repo-init-error {:?}", e);
            return Ok(_resp_internal());
        }
    };
    let uc = EditOrderTimingUseCase { repo };
    let resp = match uc.execute(req_body.into_inner()).await {
        Ok(v) => {
            let body = serde_json::to_vec(&v).unwrap();
            HttpResponse::Ok()
                .append_header(ContentType::json())
                .body(body)
        }
        Err(uce) => match uce {
            EditOrderTimingUcError::ReqContent(e) => HttpResponse::BadRequest()
                .append_header(ContentType::json())
                .body(_resp_error_json(e.detail)),
            EditOrderTimingUcError::Server(e) => {
                app_log_event!(logctx_p, AppLogLevel::ERROR, "{:?}", e);
                _resp_internal()
            }
        },
    };
    Ok(resp)
} // end of fn edit_order_timing
