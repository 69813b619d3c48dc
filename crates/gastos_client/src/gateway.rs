use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response};
use rust_decimal::Decimal;
use serde::{de::DeserializeOwned, Deserialize};
use shared::{
    domain::{Expense, ExpenseId, ExpensePayload},
    error::ProblemDetails,
};
use tracing::debug;
use url::Url;

use crate::error::GatewayError;

const EXPENSES_PATH: &str = "api/Gastos";

/// Remote CRUD surface for expense records.
///
/// Every call is a single request/response exchange. Failures are returned
/// as-is, nothing is retried.
#[async_trait]
pub trait ExpenseGateway: Send + Sync {
    async fn list_all(&self) -> Result<Vec<Expense>, GatewayError>;
    async fn fetch_total(&self) -> Result<Decimal, GatewayError>;
    async fn create(&self, record: &ExpensePayload) -> Result<Expense, GatewayError>;
    async fn update(
        &self,
        id: ExpenseId,
        record: &ExpensePayload,
    ) -> Result<Expense, GatewayError>;
    async fn remove(&self, id: ExpenseId) -> Result<(), GatewayError>;
}

#[derive(Debug, Deserialize)]
#[serde(transparent)]
struct TotalResponse(#[serde(with = "rust_decimal::serde::float")] Decimal);

pub struct HttpExpenseGateway {
    http: Client,
    base_url: Url,
}

impl HttpExpenseGateway {
    pub fn new(base_url: Url) -> Self {
        Self::with_client(Client::new(), base_url)
    }

    pub fn with_client(http: Client, mut base_url: Url) -> Self {
        // Relative joins drop the last path segment unless it ends in '/'.
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }
        Self { http, base_url }
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn endpoint(&self, suffix: Option<&str>) -> Result<Url, GatewayError> {
        let path = match suffix {
            Some(suffix) => format!("{EXPENSES_PATH}/{suffix}"),
            None => EXPENSES_PATH.to_string(),
        };
        self.base_url
            .join(&path)
            .map_err(|err| GatewayError::Request(err.to_string()))
    }

    async fn execute(&self, request: RequestBuilder) -> Result<Response, GatewayError> {
        let response = request.send().await.map_err(GatewayError::from_transport)?;
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.bytes().await.unwrap_or_default();
        let message = ProblemDetails::from_body(&body)
            .and_then(|problem| problem.summary().map(str::to_owned));
        debug!(status = status.as_u16(), ?message, "expense api request failed");
        Err(GatewayError::Server {
            status: status.as_u16(),
            message,
        })
    }

    async fn read_json<T: DeserializeOwned>(response: Response) -> Result<T, GatewayError> {
        response
            .json()
            .await
            .map_err(|err| GatewayError::Decode(err.to_string()))
    }
}

#[async_trait]
impl ExpenseGateway for HttpExpenseGateway {
    async fn list_all(&self) -> Result<Vec<Expense>, GatewayError> {
        let url = self.endpoint(None)?;
        debug!(method = "GET", path = url.path(), "expense api request");
        let response = self.execute(self.http.get(url)).await?;
        Self::read_json(response).await
    }

    async fn fetch_total(&self) -> Result<Decimal, GatewayError> {
        let url = self.endpoint(Some("total"))?;
        debug!(method = "GET", path = url.path(), "expense api request");
        let response = self.execute(self.http.get(url)).await?;
        let TotalResponse(total) = Self::read_json::<TotalResponse>(response).await?;
        Ok(total)
    }

    async fn create(&self, record: &ExpensePayload) -> Result<Expense, GatewayError> {
        let url = self.endpoint(None)?;
        debug!(method = "POST", path = url.path(), "expense api request");
        let body = ExpensePayload {
            id: None,
            ..record.clone()
        };
        let response = self.execute(self.http.post(url).json(&body)).await?;
        Self::read_json(response).await
    }

    async fn update(
        &self,
        id: ExpenseId,
        record: &ExpensePayload,
    ) -> Result<Expense, GatewayError> {
        let url = self.endpoint(Some(&id.to_string()))?;
        debug!(method = "PUT", path = url.path(), "expense api request");
        let body = record.clone().with_id(id);
        let response = self.execute(self.http.put(url).json(&body)).await?;

        // Some deployments answer PUT with 204 and no body.
        let bytes = response
            .bytes()
            .await
            .map_err(|err| GatewayError::Decode(err.to_string()))?;
        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(body.into_expense(id));
        }
        serde_json::from_slice(&bytes).map_err(|err| GatewayError::Decode(err.to_string()))
    }

    async fn remove(&self, id: ExpenseId) -> Result<(), GatewayError> {
        let url = self.endpoint(Some(&id.to_string()))?;
        debug!(method = "DELETE", path = url.path(), "expense api request");
        self.execute(self.http.delete(url)).await?;
        Ok(())
    }
}

#[cfg(test)]
#[path = "tests/gateway_tests.rs"]
mod tests;
