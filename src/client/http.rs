use reqwest::{header, StatusCode};
use serde::{de::DeserializeOwned, Serialize};
use std::marker::PhantomData;
use tracing::debug;

use super::ClientError;
use crate::types::DocumentId;

/// Result of a single-record call: the returned document, or the non-success
/// status the server answered with. Non-success is not an error here; the
/// page controllers decide what it means.
#[derive(Debug, Clone, PartialEq)]
pub enum Fetched<T> {
    Found(T),
    Rejected(StatusCode),
}

/// HTTP client for one resource (`{base}/category`, `{base}/product`)
pub struct ResourceClient<T> {
    http: reqwest::Client,
    base_url: String,
    resource: &'static str,
    _phantom: PhantomData<T>,
}

impl<T> Clone for ResourceClient<T> {
    fn clone(&self) -> Self {
        Self {
            http: self.http.clone(),
            base_url: self.base_url.clone(),
            resource: self.resource,
            _phantom: PhantomData,
        }
    }
}

impl<T: DeserializeOwned + Serialize> ResourceClient<T> {
    pub fn new(http: reqwest::Client, base_url: &str, resource: &'static str) -> Result<Self, ClientError> {
        let parsed = url::Url::parse(base_url)
            .map_err(|_| ClientError::InvalidBaseUrl(base_url.to_string()))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(ClientError::InvalidBaseUrl(base_url.to_string()));
        }
        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            resource,
            _phantom: PhantomData,
        })
    }

    pub fn resource(&self) -> &'static str {
        self.resource
    }

    fn collection_url(&self) -> String {
        format!("{}/{}", self.base_url, self.resource)
    }

    fn record_url(&self, id: DocumentId) -> String {
        format!("{}/{}/{}", self.base_url, self.resource, id)
    }

    /// GET /{resource}
    pub async fn list(&self) -> Result<Vec<T>, ClientError> {
        let response = self.http.get(self.collection_url()).send().await?;
        if !response.status().is_success() {
            return Err(ClientError::ListFailed {
                resource: self.resource,
                status: response.status(),
            });
        }
        Ok(response.json().await?)
    }

    /// GET /{resource}/{id}, bypassing any intermediate cache
    pub async fn fetch(&self, id: DocumentId) -> Result<Fetched<T>, ClientError> {
        let request = self
            .http
            .get(self.record_url(id))
            .header(header::CACHE_CONTROL, "no-store");
        Self::read(request).await
    }

    /// POST /{resource}
    pub async fn create<D: Serialize>(&self, draft: &D) -> Result<Fetched<T>, ClientError> {
        Self::read(self.http.post(self.collection_url()).json(draft)).await
    }

    /// PUT /{resource} with the whole record, id included
    pub async fn replace(&self, doc: &T) -> Result<Fetched<T>, ClientError> {
        Self::read(self.http.put(self.collection_url()).json(doc)).await
    }

    /// DELETE /{resource}/{id}
    pub async fn delete(&self, id: DocumentId) -> Result<Fetched<T>, ClientError> {
        Self::read(self.http.delete(self.record_url(id))).await
    }

    async fn read(request: reqwest::RequestBuilder) -> Result<Fetched<T>, ClientError> {
        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            debug!("{} {} -> {}", response.url().path(), status.as_u16(), status);
            return Ok(Fetched::Rejected(status));
        }
        Ok(Fetched::Found(response.json().await?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::models::Category;

    #[test]
    fn builds_resource_urls() {
        let client: ResourceClient<Category> =
            ResourceClient::new(reqwest::Client::new(), "http://localhost:3000/api/", "category").unwrap();
        assert_eq!(client.collection_url(), "http://localhost:3000/api/category");

        let id = DocumentId::generate();
        assert_eq!(client.record_url(id), format!("http://localhost:3000/api/category/{}", id));
    }

    #[test]
    fn rejects_non_http_base_urls() {
        let bad = ResourceClient::<Category>::new(reqwest::Client::new(), "ftp://example.com", "category");
        assert!(matches!(bad, Err(ClientError::InvalidBaseUrl(_))));
        let bad = ResourceClient::<Category>::new(reqwest::Client::new(), "localhost", "category");
        assert!(matches!(bad, Err(ClientError::InvalidBaseUrl(_))));
    }
}
