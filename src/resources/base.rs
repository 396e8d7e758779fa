//! Verb helpers shared by every resource.

use crate::client::Hashgrid;
use crate::error::Result;
use reqwest::Method;
use serde::Serialize;
use serde_json::Value;

/// Thin wrapper issuing verb-specific requests through a [`Hashgrid`] client.
#[derive(Debug, Clone)]
pub struct BaseResource {
    client: Hashgrid,
}

impl BaseResource {
    /// Wrap a client.
    pub fn new(client: Hashgrid) -> Self {
        BaseResource { client }
    }

    /// The wrapped client.
    pub fn client(&self) -> &Hashgrid {
        &self.client
    }

    /// `GET endpoint?query`
    pub async fn get(&self, endpoint: &str, query: &[(&str, String)]) -> Result<Value> {
        self.client.request(Method::GET, endpoint, query, None).await
    }

    /// `POST endpoint` with a JSON body
    pub async fn post<B: Serialize + ?Sized>(&self, endpoint: &str, body: &B) -> Result<Value> {
        self.send_json(Method::POST, endpoint, body).await
    }

    /// `PUT endpoint` with a JSON body
    pub async fn put<B: Serialize + ?Sized>(&self, endpoint: &str, body: &B) -> Result<Value> {
        self.send_json(Method::PUT, endpoint, body).await
    }

    /// `PATCH endpoint` with a JSON body
    pub async fn patch<B: Serialize + ?Sized>(&self, endpoint: &str, body: &B) -> Result<Value> {
        self.send_json(Method::PATCH, endpoint, body).await
    }

    /// `DELETE endpoint`
    pub async fn delete(&self, endpoint: &str) -> Result<Value> {
        self.client.request(Method::DELETE, endpoint, &[], None).await
    }

    async fn send_json<B: Serialize + ?Sized>(
        &self,
        method: Method,
        endpoint: &str,
        body: &B,
    ) -> Result<Value> {
        let body = serde_json::to_value(body)?;
        self.client.request(method, endpoint, &[], Some(body)).await
    }
}
