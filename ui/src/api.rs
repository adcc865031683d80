//! REST client for the dashboard backend

use async_trait::async_trait;
use gloo_net::http::{Request, Response};
use gymdash::forms::{FetchError, FieldValue, FormValues, Page, PageFetcher, PageQuery, SelectOption};
use serde_json::{json, Map, Value};

use crate::types::*;

const API_BASE: &str = "/api";

/// Page source of paginated selects, backed by `GET /api/{resource}`
#[derive(Clone, Copy, Debug, Default)]
pub struct RestFetcher;

#[async_trait(?Send)]
impl PageFetcher for RestFetcher {
    async fn fetch(&self, query: PageQuery) -> Result<Page, FetchError> {
        let url = list_url(&query);
        let response = Request::get(&url)
            .send()
            .await
            .map_err(|e| FetchError::Network(e.to_string()))?;

        if !response.ok() {
            return Err(FetchError::Status {
                status: response.status(),
                message: error_text(response).await,
            });
        }

        let list: ListResponse = response
            .json()
            .await
            .map_err(|e| FetchError::Decode(e.to_string()))?;

        Ok(Page {
            items: list.data.iter().filter_map(option_from_record).collect(),
            total: list.total,
            has_more: list.has_more,
        })
    }
}

fn list_url(query: &PageQuery) -> String {
    let mut url = format!(
        "{}/{}?page={}&limit={}",
        API_BASE, query.resource, query.page, query.page_size
    );
    if !query.search.is_empty() {
        url.push_str("&search=");
        url.push_str(&urlencoding::encode(&query.search));
    }
    url
}

/// Map a backend record to a select option.
///
/// Records carry their id as `_id` or `id` and a display name under one of
/// `name`, `title` or `nameEn`; records with neither id nor name are skipped.
pub fn option_from_record(record: &Value) -> Option<SelectOption> {
    let value = ["_id", "id"]
        .iter()
        .find_map(|k| record.get(*k))
        .map(scalar_text)?;
    let label = ["name", "title", "nameEn"]
        .iter()
        .find_map(|k| record.get(*k).and_then(Value::as_str))
        .map(String::from)
        .unwrap_or_else(|| value.clone());
    Some(SelectOption::new(value, label))
}

fn scalar_text(v: &Value) -> String {
    match v {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// JSON body for a record; images travel inline as data URLs
pub fn record_body(values: &FormValues) -> Value {
    let mut body = Map::new();
    for (name, value) in values {
        let encoded = match value {
            FieldValue::File(file) => json!({
                "name": file.name,
                "mimeType": file.mime_type,
                "size": file.size,
                "dataUrl": file.data_url(),
            }),
            other => serde_json::to_value(other).unwrap_or(Value::Null),
        };
        body.insert(name.clone(), encoded);
    }
    Value::Object(body)
}

/// Create a record
pub async fn create_record(resource: &str, values: &FormValues) -> Result<(), String> {
    let url = format!("{}/{}", API_BASE, resource);
    let response = Request::post(&url)
        .json(&record_body(values))
        .map_err(|e| format!("Failed to serialize body: {}", e))?
        .send()
        .await
        .map_err(|e| format!("Request failed: {}", e))?;
    write_result(response).await
}

/// Update an existing record
pub async fn update_record(resource: &str, id: &str, values: &FormValues) -> Result<(), String> {
    let url = format!("{}/{}/{}", API_BASE, resource, urlencoding::encode(id));
    let response = Request::put(&url)
        .json(&record_body(values))
        .map_err(|e| format!("Failed to serialize body: {}", e))?
        .send()
        .await
        .map_err(|e| format!("Request failed: {}", e))?;
    write_result(response).await
}

/// Fetch one record as form values, for edit screens
pub async fn get_record(resource: &str, id: &str) -> Result<FormValues, String> {
    let url = format!("{}/{}/{}", API_BASE, resource, urlencoding::encode(id));
    let response = Request::get(&url)
        .send()
        .await
        .map_err(|e| format!("Request failed: {}", e))?;

    if !response.ok() {
        return Err(error_text(response).await);
    }

    let api_response: ApiResponse<FormValues> = response
        .json()
        .await
        .map_err(|e| format!("Failed to parse response: {}", e))?;

    if api_response.success {
        api_response.data.ok_or_else(|| "No data in response".to_string())
    } else {
        Err(api_response.error.unwrap_or_else(|| "Unknown error".to_string()))
    }
}

async fn write_result(response: Response) -> Result<(), String> {
    if !response.ok() {
        return Err(error_text(response).await);
    }

    let api_response: ApiResponse<Value> = response
        .json()
        .await
        .map_err(|e| format!("Failed to parse response: {}", e))?;

    if api_response.success {
        Ok(())
    } else {
        Err(api_response.error.unwrap_or_else(|| "Unknown error".to_string()))
    }
}

async fn error_text(response: Response) -> String {
    let status = response.status();
    response
        .json::<ErrorBody>()
        .await
        .ok()
        .and_then(ErrorBody::text)
        .unwrap_or_else(|| format!("HTTP {}", status))
}
