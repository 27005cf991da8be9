//! Internal HTTP client that performs the raw exchanges with a GNS3 server.

use crate::core::domain::{
    error::{Gns3Error, Gns3Result, ServerError},
    model::gns3_connection::Gns3Connection,
};
use reqwest::{Client, Method, header::CONTENT_TYPE};
use serde::{Serialize, de::DeserializeOwned};
use std::time::Instant;
use tracing::{debug, instrument};

/// Internal HTTP client bound to one GNS3 connection.
///
/// A fresh `reqwest::Client` is built for every request with the
/// connection's timeout, and every request carries a JSON content type.
/// [`ApiClient::request`] returns the raw status and body; the typed
/// helpers on top of it turn non-2xx answers into [`ServerError`]s and
/// decode success bodies.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiClient {
    connection: Gns3Connection,
}

impl ApiClient {
    pub fn new(connection: Gns3Connection) -> Self {
        Self { connection }
    }

    /// Returns a reference to the underlying connection details.
    pub fn connection(&self) -> &Gns3Connection {
        &self.connection
    }

    /// Executes one HTTP request and returns the raw status code and body.
    ///
    /// The status code is not interpreted here.
    ///
    /// # Errors
    /// Returns `Gns3Error::Connection` if the server cannot be reached, the
    /// request times out, or the body cannot be read.
    #[instrument(level = "debug", skip(self, body))]
    pub async fn request(
        &self,
        method: Method,
        url: &str,
        body: Option<&[u8]>,
    ) -> Gns3Result<(u16, Vec<u8>)> {
        let timeout = self.connection.timeout();
        let http_client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| Gns3Error::Connection(e.to_string()))?;

        let mut req_builder = http_client
            .request(method, url)
            .header(CONTENT_TYPE, "application/json");
        if let Some(body) = body {
            req_builder = req_builder.body(body.to_vec());
        }

        let started = Instant::now();
        let response = req_builder.send().await.map_err(|e| {
            if e.is_timeout() {
                Gns3Error::Connection(format!("Request timed out after {:?}", timeout))
            } else {
                Gns3Error::Connection(format!("HTTP request failed: {}", e))
            }
        })?;

        let status = response.status().as_u16();
        let content = response
            .bytes()
            .await
            .map_err(|e| Gns3Error::Connection(format!("Failed to read response body: {}", e)))?;

        debug!(
            status,
            bytes = content.len(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "request completed"
        );
        Ok((status, content.to_vec()))
    }

    /// Performs a GET request and decodes the JSON response.
    pub async fn get<T>(&self, url: &str) -> Gns3Result<T>
    where
        T: DeserializeOwned,
    {
        self.execute(Method::GET, url, None::<&()>).await
    }

    /// Performs a POST request with a JSON body and decodes the JSON response.
    pub async fn post<B, T>(&self, url: &str, body: &B) -> Gns3Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.execute(Method::POST, url, Some(body)).await
    }

    /// Performs a PUT request with a JSON body and decodes the JSON response.
    pub async fn put<B, T>(&self, url: &str, body: &B) -> Gns3Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.execute(Method::PUT, url, Some(body)).await
    }

    /// Performs a DELETE request. Any response body is ignored on success.
    pub async fn delete(&self, url: &str) -> Gns3Result<()> {
        self.send(Method::DELETE, url, None::<&()>).await
    }

    /// Performs a request whose success response carries nothing of interest.
    pub async fn send<B>(&self, method: Method, url: &str, body: Option<&B>) -> Gns3Result<()>
    where
        B: Serialize + ?Sized,
    {
        let payload = encode(body)?;
        let (status, content) = self.request(method, url, payload.as_deref()).await?;
        check_status(status, &content)
    }

    /// Core request execution: encode, send, check the status, decode.
    async fn execute<B, T>(&self, method: Method, url: &str, body: Option<&B>) -> Gns3Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let payload = encode(body)?;
        let (status, content) = self.request(method, url, payload.as_deref()).await?;
        check_status(status, &content)?;

        serde_json::from_slice(&content)
            .map_err(|e| Gns3Error::Decode(format!("Failed to parse response: {}", e)))
    }
}

fn encode<B>(body: Option<&B>) -> Gns3Result<Option<Vec<u8>>>
where
    B: Serialize + ?Sized,
{
    body.map(|b| serde_json::to_vec(b))
        .transpose()
        .map_err(|e| Gns3Error::Encode(e.to_string()))
}

/// Maps a non-2xx status to the server error decoded from the body.
pub(crate) fn check_status(status: u16, content: &[u8]) -> Gns3Result<()> {
    if (200..300).contains(&status) {
        Ok(())
    } else {
        Err(ServerError::from_response(status, content).into())
    }
}
