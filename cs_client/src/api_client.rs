//! HTTP client for the storefront REST backend.

use crate::logging::{log_api_failure, log_api_request};
use anyhow::{Context, Result};
use async_trait::async_trait;
use car_store::api::{ApiError, ApiResult, StoreApi};
use car_store::catalog::{Car, CarInput, CatalogFilter};
use car_store::favorites::{AddFavoriteRequest, FavoriteCount, FavoriteWithCar};
use car_store::reviews::{ReviewInput, ReviewsResponse};
use car_store::session::{AuthResponse, LoginRequest, RegisterRequest};
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderValue};
use reqwest::{Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use std::time::{Duration, Instant};

/// Headers sent with every request
///
/// Always JSON; adds a bearer `Authorization` header when a token is given.
pub fn build_headers(token: Option<&str>) -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

    if let Some(token) = token {
        match HeaderValue::from_str(&format!("Bearer {token}")) {
            Ok(value) => {
                headers.insert(AUTHORIZATION, value);
            }
            Err(_) => tracing::warn!("Stored token is not a valid header value, sending without it"),
        }
    }
    headers
}

/// API client for communicating with the storefront backend
#[derive(Debug, Clone)]
pub struct ApiClient {
    base_url: String,
    client: reqwest::Client,
}

impl ApiClient {
    /// Create a new API client
    ///
    /// # Arguments
    ///
    /// * `base_url` - Backend root including the `/api` prefix
    /// * `timeout` - Per-request timeout, `None` for no limit
    pub fn new(base_url: &str, timeout: Option<Duration>) -> Result<Self> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().context("Failed to build HTTP client")?;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn request(&self, method: Method, path: &str, token: Option<&str>) -> RequestBuilder {
        self.client
            .request(method, format!("{}{}", self.base_url, path))
            .headers(build_headers(token))
    }

    /// Send a request, mapping transport failures and non-2xx statuses
    async fn send(&self, request: RequestBuilder) -> ApiResult<Response> {
        let request = request
            .build()
            .map_err(|e| ApiError::Network(e.to_string()))?;
        let method = request.method().to_string();
        let path = request.url().path().to_string();

        let started = Instant::now();
        let result = self.client.execute(request).await;
        let duration_ms = started.elapsed().as_millis() as u64;

        let response = match result {
            Ok(response) => response,
            Err(e) => {
                log_api_failure(&method, &path, duration_ms, &e.to_string());
                return Err(ApiError::Network(e.to_string()));
            }
        };

        let status = response.status();
        log_api_request(&method, &path, status.as_u16(), duration_ms);
        if status.is_success() {
            return Ok(response);
        }

        let body = response
            .text()
            .await
            .unwrap_or_else(|e| format!("Failed to read error response: {}", e));
        Err(ApiError::from_status(status.as_u16(), &body))
    }

    async fn send_json<T: DeserializeOwned>(&self, request: RequestBuilder) -> ApiResult<T> {
        let response = self.send(request).await?;
        let bytes = response
            .bytes()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;
        serde_json::from_slice(&bytes).map_err(|e| ApiError::Decode(e.to_string()))
    }

    /// Send a request whose response body is ignored
    async fn send_empty(&self, request: RequestBuilder) -> ApiResult<()> {
        self.send(request).await.map(|_| ())
    }
}

#[async_trait]
impl StoreApi for ApiClient {
    async fn login(&self, request: &LoginRequest) -> ApiResult<AuthResponse> {
        self.send_json(self.request(Method::POST, "/auth/login", None).json(request))
            .await
    }

    async fn register(&self, request: &RegisterRequest) -> ApiResult<AuthResponse> {
        self.send_json(
            self.request(Method::POST, "/auth/register", None)
                .json(request),
        )
        .await
    }

    async fn list_cars(&self, filter: &CatalogFilter) -> ApiResult<Vec<Car>> {
        let request = self
            .request(Method::GET, "/cars", None)
            .query(&filter.query_pairs());
        // Some backends send `null` for an empty collection
        let cars: Option<Vec<Car>> = self.send_json(request).await?;
        Ok(cars.unwrap_or_default())
    }

    async fn get_car(&self, id: &str) -> ApiResult<Car> {
        self.send_json(self.request(Method::GET, &format!("/cars/{id}"), None))
            .await
    }

    async fn create_car(&self, token: &str, car: &CarInput) -> ApiResult<()> {
        self.send_empty(self.request(Method::POST, "/cars", Some(token)).json(car))
            .await
    }

    async fn update_car(&self, token: &str, id: &str, car: &CarInput) -> ApiResult<()> {
        self.send_empty(
            self.request(Method::PUT, &format!("/cars/{id}"), Some(token))
                .json(car),
        )
        .await
    }

    async fn delete_car(&self, token: &str, id: &str) -> ApiResult<()> {
        self.send_empty(self.request(Method::DELETE, &format!("/cars/{id}"), Some(token)))
            .await
    }

    async fn list_favorites(&self, token: &str) -> ApiResult<Vec<FavoriteWithCar>> {
        let favorites: Option<Vec<FavoriteWithCar>> = self
            .send_json(self.request(Method::GET, "/favorites", Some(token)))
            .await?;
        Ok(favorites.unwrap_or_default())
    }

    async fn add_favorite(&self, token: &str, car_id: &str) -> ApiResult<()> {
        let body = AddFavoriteRequest {
            car_id: car_id.to_string(),
        };
        self.send_empty(
            self.request(Method::POST, "/favorites", Some(token))
                .json(&body),
        )
        .await
    }

    async fn remove_favorite(&self, token: &str, car_id: &str) -> ApiResult<()> {
        self.send_empty(self.request(
            Method::DELETE,
            &format!("/favorites/{car_id}"),
            Some(token),
        ))
        .await
    }

    async fn favorites_count(&self, token: &str) -> ApiResult<u64> {
        let count: FavoriteCount = self
            .send_json(self.request(Method::GET, "/favorites/count", Some(token)))
            .await?;
        Ok(count.count)
    }

    async fn list_reviews(&self, car_id: &str) -> ApiResult<ReviewsResponse> {
        self.send_json(self.request(Method::GET, &format!("/cars/{car_id}/reviews"), None))
            .await
    }

    async fn create_review(
        &self,
        token: &str,
        car_id: &str,
        review: &ReviewInput,
    ) -> ApiResult<()> {
        self.send_empty(
            self.request(Method::POST, &format!("/cars/{car_id}/reviews"), Some(token))
                .json(review),
        )
        .await
    }

    async fn update_review(
        &self,
        token: &str,
        review_id: &str,
        review: &ReviewInput,
    ) -> ApiResult<()> {
        self.send_empty(
            self.request(Method::PUT, &format!("/reviews/{review_id}"), Some(token))
                .json(review),
        )
        .await
    }

    async fn delete_review(&self, token: &str, review_id: &str) -> ApiResult<()> {
        self.send_empty(self.request(
            Method::DELETE,
            &format!("/reviews/{review_id}"),
            Some(token),
        ))
        .await
    }
}
