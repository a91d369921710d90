use crate::utils::error::AppError;
use serde::{Deserialize, Serialize};
use std::env;

/// Printed-text recognition endpoint of the platform API.
const OCR_ENDPOINT: &str = "https://api.weixin.qq.com/cv/ocr/printedtext";
/// Exchanges a cloud storage file id for a short-lived download URL.
const TEMP_URL_ENDPOINT: &str = "https://api.weixin.qq.com/tcb/batchdownloadfile";

const TEMP_URL_MAX_AGE_SECS: i64 = 7200;

#[derive(Debug, Deserialize, Serialize, utoipa::ToSchema)]
pub struct OcrRequest {
    #[serde(default)]
    pub file_id: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct OcrResponse {
    pub success: bool,
    pub text: String,
    pub raw: serde_json::Value,
}

/// Joins the `items[].text` lines of a provider response body.
pub fn recognized_text(body: &serde_json::Value) -> String {
    body.get("items")
        .and_then(|items| items.as_array())
        .map(|items| {
            items
                .iter()
                .filter_map(|item| item.get("text").and_then(|t| t.as_str()))
                .collect::<Vec<&str>>()
                .join("\n")
        })
        .unwrap_or_default()
}

fn access_token() -> Result<String, AppError> {
    env::var("WX_ACCESS_TOKEN")
        .map_err(|_| AppError::Upstream("WX_ACCESS_TOKEN is not configured".into()))
}

/// Signed temp URLs routinely carry their own query string, so both
/// parameters go through reqwest's query serializer, which percent-encodes
/// them instead of splicing raw text into the URL.
fn ocr_request(
    client: &reqwest::Client,
    token: &str,
    image_url: &str,
) -> reqwest::RequestBuilder {
    client
        .post(OCR_ENDPOINT)
        .query(&[("access_token", token), ("img_url", image_url)])
}

fn temp_url_request(
    client: &reqwest::Client,
    token: &str,
    cloud_env: &str,
    file_id: &str,
) -> reqwest::RequestBuilder {
    client
        .post(TEMP_URL_ENDPOINT)
        .query(&[("access_token", token)])
        .json(&serde_json::json!({
            "env": cloud_env,
            "file_list": [{ "fileid": file_id, "max_age": TEMP_URL_MAX_AGE_SECS }],
        }))
}

/// Exchanges a cloud file id for a temporary download URL.
async fn resolve_temp_url(file_id: &str) -> Result<String, AppError> {
    let cloud_env = env::var("CLOUD_ENV_ID")
        .map_err(|_| AppError::Upstream("CLOUD_ENV_ID is not configured".into()))?;
    let token = access_token()?;

    let client = reqwest::Client::new();
    let response = temp_url_request(&client, &token, &cloud_env, file_id)
        .send()
        .await
        .map_err(|e| AppError::Upstream(format!("Temp URL exchange failed: {}", e)))?;

    let payload: serde_json::Value = response
        .json()
        .await
        .map_err(|e| AppError::Upstream(format!("Invalid temp URL response: {}", e)))?;

    let errcode = payload.get("errcode").and_then(|v| v.as_i64()).unwrap_or(0);
    if errcode != 0 {
        let errmsg = payload
            .get("errmsg")
            .and_then(|v| v.as_str())
            .unwrap_or("unknown error");
        return Err(AppError::Upstream(format!(
            "Temp URL exchange error {}: {}",
            errcode, errmsg
        )));
    }

    payload
        .get("file_list")
        .and_then(|l| l.as_array())
        .and_then(|l| l.first())
        .and_then(|f| f.get("download_url"))
        .and_then(|u| u.as_str())
        .filter(|u| !u.is_empty())
        .map(|u| u.to_string())
        .ok_or_else(|| AppError::Upstream("No download URL for file id".into()))
}

/// Runs printed-text recognition. A `file_id` is first exchanged for a
/// temporary URL; an `image_url` is submitted directly.
pub async fn extract_text(request: &OcrRequest) -> Result<OcrResponse, AppError> {
    let image_url = match (&request.file_id, &request.image_url) {
        (Some(file_id), _) if !file_id.is_empty() => resolve_temp_url(file_id).await?,
        (_, Some(image_url)) if !image_url.is_empty() => image_url.clone(),
        _ => {
            return Err(AppError::Validation(
                "file_id or image_url is required".into(),
            ))
        }
    };

    let token = access_token()?;

    let client = reqwest::Client::new();
    let response = ocr_request(&client, &token, &image_url)
        .send()
        .await
        .map_err(|e| AppError::Upstream(format!("OCR request failed: {}", e)))?;

    let payload: serde_json::Value = response
        .json()
        .await
        .map_err(|e| AppError::Upstream(format!("Invalid OCR response: {}", e)))?;

    let errcode = payload.get("errcode").and_then(|v| v.as_i64()).unwrap_or(0);
    if errcode != 0 {
        let errmsg = payload
            .get("errmsg")
            .and_then(|v| v.as_str())
            .unwrap_or("unknown error");
        return Err(AppError::Upstream(format!(
            "OCR provider error {}: {}",
            errcode, errmsg
        )));
    }

    Ok(OcrResponse {
        success: true,
        text: recognized_text(&payload),
        raw: payload,
    })
}
