use async_trait::async_trait;
use reqwest::{RequestBuilder, Response};
use url::Url;

use business::domain::errors::TransportError;
use business::domain::product::gateway::ProductGateway;
use business::domain::product::model::{Product, ProductFields};

use crate::client::RestClient;
use crate::dto::{ProductPayload, ProductRecord};

/// JSON over HTTP implementation of the remote store transport.
pub struct ProductGatewayHttp {
    client: RestClient,
}

impl ProductGatewayHttp {
    pub fn new(client: RestClient) -> Self {
        Self { client }
    }

    /// Sends the request and turns every non-2xx answer into a transport error.
    async fn send(request: RequestBuilder) -> Result<Response, TransportError> {
        let response = request.send().await.map_err(|e| {
            tracing::warn!(error = %e, "Request to product service failed");
            TransportError::Network(e.to_string())
        })?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!(status = status.as_u16(), url = %response.url(), "Product service rejected request");
            return Err(TransportError::Status {
                status: status.as_u16(),
            });
        }
        Ok(response)
    }

    async fn decode_product(response: Response) -> Result<Product, TransportError> {
        response
            .json::<ProductRecord>()
            .await
            .map_err(|e| TransportError::Decode(e.to_string()))?
            .into_domain()
    }
}

#[async_trait]
impl ProductGateway for ProductGatewayHttp {
    async fn fetch_all(&self, url: &Url) -> Result<Vec<Product>, TransportError> {
        let response = Self::send(self.client.client.get(url.clone())).await?;

        let records = response
            .json::<Vec<ProductRecord>>()
            .await
            .map_err(|e| TransportError::Decode(e.to_string()))?;

        records.into_iter().map(ProductRecord::into_domain).collect()
    }

    async fn post(&self, url: &Url, fields: &ProductFields) -> Result<Product, TransportError> {
        let request = self
            .client
            .client
            .post(url.clone())
            .json(&ProductPayload::from(fields));

        Self::decode_product(Self::send(request).await?).await
    }

    async fn patch(&self, url: &Url, fields: &ProductFields) -> Result<Product, TransportError> {
        let request = self
            .client
            .client
            .patch(url.clone())
            .json(&ProductPayload::from(fields));

        Self::decode_product(Self::send(request).await?).await
    }

    async fn delete(&self, url: &Url) -> Result<(), TransportError> {
        Self::send(self.client.client.delete(url.clone())).await?;
        Ok(())
    }
}
