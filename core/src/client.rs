//! Stateless HTTP request builder and response parser for the inventory API.
//!
//! # Design
//! `InventoryClient` holds only a `base_url`. Each operation is split into a
//! `build_*` method that produces an `HttpRequest` and a `parse_*` method
//! that consumes an `HttpResponse`. Mutations are form-encoded, never JSON;
//! the backend reads `name` and `price` as form fields.

use serde::de::DeserializeOwned;
use serde_json::Value;
use url::form_urlencoded;

use crate::error::RemoteError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::types::{AveragePrice, AveragePriceBody, Medicine, MedicineInput, MedicineList, Operation};

const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

/// Synchronous, stateless client for the inventory API.
#[derive(Debug, Clone)]
pub struct InventoryClient {
    base_url: String,
}

impl InventoryClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn build_list_medicines(&self) -> HttpRequest {
        self.read_request("/medicines")
    }

    pub fn build_average_price(&self) -> HttpRequest {
        self.read_request("/average_price")
    }

    pub fn build_create_medicine(&self, input: &MedicineInput) -> HttpRequest {
        self.form_request(HttpMethod::Post, "/create", &input.form_fields())
    }

    /// Overwrites the price of the medicine named `input.name`.
    pub fn build_update_medicine(&self, input: &MedicineInput) -> HttpRequest {
        self.form_request(HttpMethod::Post, "/update", &input.form_fields())
    }

    pub fn build_delete_medicine(&self, name: &str) -> HttpRequest {
        self.form_request(HttpMethod::Delete, "/delete", &[("name", name.to_string())])
    }

    pub fn parse_list_medicines(&self, response: HttpResponse) -> Result<Vec<Medicine>, RemoteError> {
        let list: MedicineList = decode(Operation::ListMedicines, response)?;
        Ok(list.medicines)
    }

    pub fn parse_average_price(&self, response: HttpResponse) -> Result<AveragePrice, RemoteError> {
        let body: AveragePriceBody = decode(Operation::AveragePrice, response)?;
        Ok(body.average_price)
    }

    pub fn parse_create_medicine(&self, response: HttpResponse) -> Result<(), RemoteError> {
        acknowledge(Operation::CreateMedicine, response)
    }

    pub fn parse_update_medicine(&self, response: HttpResponse) -> Result<(), RemoteError> {
        acknowledge(Operation::UpdateMedicine, response)
    }

    pub fn parse_delete_medicine(&self, response: HttpResponse) -> Result<(), RemoteError> {
        acknowledge(Operation::DeleteMedicine, response)
    }

    /// Parse the response to a mutation. Read operations have their own
    /// typed parsers and are only checked for success here.
    pub fn parse_mutation(&self, operation: Operation, response: HttpResponse) -> Result<(), RemoteError> {
        acknowledge(operation, response)
    }

    fn read_request(&self, path: &str) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Get,
            path: format!("{}{path}", self.base_url),
            headers: Vec::new(),
            body: None,
        }
    }

    fn form_request(&self, method: HttpMethod, path: &str, fields: &[(&str, String)]) -> HttpRequest {
        let body = form_urlencoded::Serializer::new(String::new())
            .extend_pairs(fields.iter().map(|(key, value)| (*key, value.as_str())))
            .finish();
        HttpRequest {
            method,
            path: format!("{}{path}", self.base_url),
            headers: vec![("content-type".to_string(), FORM_CONTENT_TYPE.to_string())],
            body: Some(body),
        }
    }
}

/// Map non-success status codes to a `RemoteError`.
fn check_status(operation: Operation, response: &HttpResponse) -> Result<(), RemoteError> {
    if response.is_success() {
        return Ok(());
    }
    Err(RemoteError::from_response(operation, response.status, &response.body))
}

fn decode<T: DeserializeOwned>(operation: Operation, response: HttpResponse) -> Result<T, RemoteError> {
    check_status(operation, &response)?;
    serde_json::from_str(&response.body)
        .map_err(|_| RemoteError::from_response(operation, response.status, &response.body))
}

/// Mutations carry no payload on success. The backend also reports some
/// failures as a 2xx body shaped `{"status": "error", "message": ...}`.
fn acknowledge(operation: Operation, response: HttpResponse) -> Result<(), RemoteError> {
    check_status(operation, &response)?;
    let reported_error = serde_json::from_str::<Value>(&response.body)
        .ok()
        .is_some_and(|body| body.get("status").and_then(Value::as_str) == Some("error"));
    if reported_error {
        return Err(RemoteError::from_response(operation, response.status, &response.body));
    }
    Ok(())
}
