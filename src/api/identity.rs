use crate::middleware::auth::CallerIdentity;
use actix_web::{web, HttpResponse, Responder};
use std::collections::HashMap;

/// Caller ids plus an echo of the request's input fields. Reserved id
/// keys always win over echoed input of the same name.
pub fn identity_payload(
    caller: &CallerIdentity,
    input: &HashMap<String, String>,
) -> serde_json::Value {
    let mut payload = serde_json::json!({
        "openid": caller.open_id,
        "appid": caller.app_id,
        "unionid": caller.union_id,
    });

    if let Some(object) = payload.as_object_mut() {
        for (key, value) in input {
            object
                .entry(key.clone())
                .or_insert_with(|| serde_json::Value::String(value.clone()));
        }
    }

    payload
}

#[utoipa::path(
    get,
    path = "/api/identity",
    tag = "Identity",
    responses(
        (status = 200, description = "Platform-resolved caller ids plus an echo of the query input"),
        (status = 401, description = "Missing caller identity headers")
    )
)]
pub async fn resolve_identity(
    caller: web::ReqData<CallerIdentity>,
    query: web::Query<HashMap<String, String>>,
) -> impl Responder {
    HttpResponse::Ok().json(identity_payload(&caller, &query))
}
