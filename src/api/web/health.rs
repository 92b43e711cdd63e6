use actix_web::http::header::ContentType;
use actix_web::web::Data as WebData;
use actix_web::{HttpResponse, Result as ActixResult};
use chrono::Local as LocalTime;

use super::dto::{PaymentHealthChecksDto, PaymentHealthRespDto};
use crate::AppSharedState;

/// deployment probe, answers whether the gateway key pair made it into
/// the environment. The secret itself never leaves the process.
pub(super) async fn payment_health(shr_state: WebData<AppSharedState>) -> ActixResult<HttpResponse> {
    let status = shr_state.gateway().key_status();
    let ok = status.key_id_present && status.secret_present;
    let payload = PaymentHealthRespDto {
        ok,
        service: "payment".to_string(),
        checks: PaymentHealthChecksDto {
            key_id_present: status.key_id_present,
            secret_present: status.secret_present,
        },
        missing: status.missing,
        timestamp: LocalTime::now().to_rfc3339(),
    };
    let body = serde_json::to_vec(&payload).unwrap();
    let resp = if ok {
        HttpResponse::Ok()
            .append_header(ContentType::json())
            .body(body)
    } else {
        HttpResponse::ServiceUnavailable()
            .append_header(ContentType::json())
            .body(body)
    };
    Ok(resp)
}
