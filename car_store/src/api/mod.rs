//! Backend contract.
//!
//! [`StoreApi`] is the seam between the client core and the REST backend.
//! The binary plugs in an HTTP implementation; tests plug in an in-memory one.
//! Write operations take the bearer token explicitly so the controller decides
//! when a session is required.

pub mod errors;

pub use errors::{ApiError, ApiResult};

use crate::catalog::{Car, CatalogFilter, CarInput};
use crate::favorites::FavoriteWithCar;
use crate::reviews::{ReviewInput, ReviewsResponse};
use crate::session::{AuthResponse, LoginRequest, RegisterRequest};
use async_trait::async_trait;

/// Operations the storefront backend exposes
#[async_trait]
pub trait StoreApi: Send + Sync {
    /// `POST /auth/login`
    async fn login(&self, request: &LoginRequest) -> ApiResult<AuthResponse>;

    /// `POST /auth/register`
    async fn register(&self, request: &RegisterRequest) -> ApiResult<AuthResponse>;

    /// `GET /cars` with the filter's query parameters
    ///
    /// The price range is not sent; callers apply it locally.
    async fn list_cars(&self, filter: &CatalogFilter) -> ApiResult<Vec<Car>>;

    /// `GET /cars/{id}`
    async fn get_car(&self, id: &str) -> ApiResult<Car>;

    /// `POST /cars`
    async fn create_car(&self, token: &str, car: &CarInput) -> ApiResult<()>;

    /// `PUT /cars/{id}` with a full replacement record
    async fn update_car(&self, token: &str, id: &str, car: &CarInput) -> ApiResult<()>;

    /// `DELETE /cars/{id}`
    async fn delete_car(&self, token: &str, id: &str) -> ApiResult<()>;

    /// `GET /favorites`
    async fn list_favorites(&self, token: &str) -> ApiResult<Vec<FavoriteWithCar>>;

    /// `POST /favorites`
    async fn add_favorite(&self, token: &str, car_id: &str) -> ApiResult<()>;

    /// `DELETE /favorites/{car_id}`
    async fn remove_favorite(&self, token: &str, car_id: &str) -> ApiResult<()>;

    /// `GET /favorites/count`
    async fn favorites_count(&self, token: &str) -> ApiResult<u64>;

    /// `GET /cars/{id}/reviews`
    async fn list_reviews(&self, car_id: &str) -> ApiResult<ReviewsResponse>;

    /// `POST /cars/{id}/reviews`
    async fn create_review(&self, token: &str, car_id: &str, review: &ReviewInput)
    -> ApiResult<()>;

    /// `PUT /reviews/{id}`
    async fn update_review(
        &self,
        token: &str,
        review_id: &str,
        review: &ReviewInput,
    ) -> ApiResult<()>;

    /// `DELETE /reviews/{id}`
    async fn delete_review(&self, token: &str, review_id: &str) -> ApiResult<()>;
}
