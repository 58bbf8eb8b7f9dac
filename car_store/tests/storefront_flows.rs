//! Integration tests for storefront controller flows.
//!
//! Runs the controller against an in-memory backend that records every call.

use async_trait::async_trait;
use car_store::api::{ApiError, ApiResult, StoreApi};
use car_store::catalog::{Car, CarInput, CatalogFilter};
use car_store::favorites::FavoriteWithCar;
use car_store::reviews::{Rating, Review, ReviewInput, ReviewsResponse};
use car_store::session::guard::{LOGIN_REQUIRED, SESSION_EXPIRED};
use car_store::session::{AuthResponse, LoginRequest, RegisterRequest, UserSummary};
use car_store::storage::{
    GARAGE_KEY, KeyValueStore, MemoryStore, StorageError, StorageResult, TOKEN_KEY,
};
use car_store::view::{self, GarageButton, ListView, ReviewsView};
use car_store::{AlertKind, CatalogLoad, Page, StoreError, Storefront};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tokio::sync::{Notify, oneshot};

// ============================================================================
// In-memory backend
// ============================================================================

#[derive(Default)]
struct MockApi {
    cars: Mutex<Vec<Car>>,
    favorites: Mutex<Vec<(String, String)>>,
    reviews: Mutex<Vec<Review>>,
    calls: Mutex<Vec<String>>,
    next_id: AtomicUsize,
    expired: AtomicBool,
    favorites_down: AtomicBool,
    create_rejection: Mutex<Option<ApiError>>,
    slow_gate: Mutex<Option<oneshot::Receiver<()>>>,
    slow_entered: Notify,
}

impl MockApi {
    fn with_cars(cars: Vec<Car>) -> Arc<Self> {
        let api = Self::default();
        *api.cars.lock().unwrap() = cars;
        Arc::new(api)
    }

    fn record(&self, call: impl Into<String>) {
        self.calls.lock().unwrap().push(call.into());
    }

    fn calls_starting_with(&self, prefix: &str) -> Vec<String> {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .filter(|c| c.starts_with(prefix))
            .cloned()
            .collect()
    }

    fn next_id(&self, prefix: &str) -> String {
        format!("{prefix}{}", self.next_id.fetch_add(1, Ordering::SeqCst))
    }

    /// Tokens are `token-<user id>`
    fn user_for(&self, token: &str) -> ApiResult<String> {
        if self.expired.load(Ordering::SeqCst) {
            return Err(ApiError::Unauthorized);
        }
        token
            .strip_prefix("token-")
            .map(str::to_string)
            .ok_or(ApiError::Unauthorized)
    }

    fn auth(username: &str) -> AuthResponse {
        AuthResponse {
            token: format!("token-{username}"),
            user: UserSummary {
                id: username.to_string(),
                username: username.to_string(),
            },
        }
    }
}

fn car_from_input(id: String, input: &CarInput) -> Car {
    Car {
        id,
        make: input.make.clone(),
        model: input.model.clone(),
        year: input.year,
        price: input.price,
        mileage: input.mileage.unwrap_or_default(),
        body_type: input.body_type.clone(),
        fuel_type: input.fuel_type.clone(),
        transmission: input.transmission.clone(),
        color: input.color.clone(),
        horsepower: input.horsepower.unwrap_or_default(),
        engine_size: input.engine_size.unwrap_or_default(),
        description: input.description.clone(),
        image_url: input.image_url.clone(),
        created_at: None,
        updated_at: None,
    }
}

#[async_trait]
impl StoreApi for MockApi {
    async fn login(&self, request: &LoginRequest) -> ApiResult<AuthResponse> {
        self.record(format!("login {}", request.username));
        if request.password != "secret" {
            return Err(ApiError::Unauthorized);
        }
        Ok(Self::auth(&request.username))
    }

    async fn register(&self, request: &RegisterRequest) -> ApiResult<AuthResponse> {
        self.record(format!("register {}", request.username));
        Ok(Self::auth(&request.username))
    }

    async fn list_cars(&self, filter: &CatalogFilter) -> ApiResult<Vec<Car>> {
        self.record("list_cars");
        if filter.make.as_deref() == Some("Slow") {
            let gate = self.slow_gate.lock().unwrap().take();
            self.slow_entered.notify_one();
            if let Some(gate) = gate {
                let _ = gate.await;
            }
            return Ok(vec![self.cars.lock().unwrap()[0].clone()]);
        }
        let server_side = CatalogFilter {
            min_price: None,
            max_price: None,
            ..filter.clone()
        };
        Ok(server_side.apply(self.cars.lock().unwrap().clone()))
    }

    async fn get_car(&self, id: &str) -> ApiResult<Car> {
        self.record(format!("get_car {id}"));
        self.cars
            .lock()
            .unwrap()
            .iter()
            .find(|c| c.id == id)
            .cloned()
            .ok_or_else(|| ApiError::from_status(404, "Car not found"))
    }

    async fn create_car(&self, token: &str, car: &CarInput) -> ApiResult<()> {
        self.record("create_car");
        self.user_for(token)?;
        if let Some(err) = self.create_rejection.lock().unwrap().clone() {
            return Err(err);
        }
        let id = self.next_id("car-");
        self.cars.lock().unwrap().push(car_from_input(id, car));
        Ok(())
    }

    async fn update_car(&self, token: &str, id: &str, car: &CarInput) -> ApiResult<()> {
        self.record(format!("update_car {id}"));
        self.user_for(token)?;
        let mut cars = self.cars.lock().unwrap();
        let slot = cars
            .iter_mut()
            .find(|c| c.id == id)
            .ok_or_else(|| ApiError::from_status(404, "Car not found"))?;
        *slot = car_from_input(id.to_string(), car);
        Ok(())
    }

    async fn delete_car(&self, token: &str, id: &str) -> ApiResult<()> {
        self.record(format!("delete_car {id}"));
        self.user_for(token)?;
        self.cars.lock().unwrap().retain(|c| c.id != id);
        self.favorites.lock().unwrap().retain(|(_, car_id)| car_id != id);
        Ok(())
    }

    async fn list_favorites(&self, token: &str) -> ApiResult<Vec<FavoriteWithCar>> {
        self.record("list_favorites");
        let user = self.user_for(token)?;
        let cars = self.cars.lock().unwrap();
        Ok(self
            .favorites
            .lock()
            .unwrap()
            .iter()
            .filter(|(owner, _)| *owner == user)
            .filter_map(|(_, car_id)| cars.iter().find(|c| c.id == *car_id))
            .map(|car| FavoriteWithCar {
                id: format!("fav-{}", car.id),
                user_id: user.clone(),
                car_id: car.id.clone(),
                car: car.clone(),
                created_at: None,
            })
            .collect())
    }

    async fn add_favorite(&self, token: &str, car_id: &str) -> ApiResult<()> {
        self.record(format!("add_favorite {car_id}"));
        let user = self.user_for(token)?;
        if self.favorites_down.load(Ordering::SeqCst) {
            return Err(ApiError::from_status(500, "database unavailable"));
        }
        self.favorites
            .lock()
            .unwrap()
            .push((user, car_id.to_string()));
        Ok(())
    }

    async fn remove_favorite(&self, token: &str, car_id: &str) -> ApiResult<()> {
        self.record(format!("remove_favorite {car_id}"));
        let user = self.user_for(token)?;
        if self.favorites_down.load(Ordering::SeqCst) {
            return Err(ApiError::from_status(500, "database unavailable"));
        }
        self.favorites
            .lock()
            .unwrap()
            .retain(|(owner, id)| !(*owner == user && id == car_id));
        Ok(())
    }

    async fn favorites_count(&self, token: &str) -> ApiResult<u64> {
        self.record("favorites_count");
        let user = self.user_for(token)?;
        Ok(self
            .favorites
            .lock()
            .unwrap()
            .iter()
            .filter(|(owner, _)| *owner == user)
            .count() as u64)
    }

    async fn list_reviews(&self, car_id: &str) -> ApiResult<ReviewsResponse> {
        self.record(format!("list_reviews {car_id}"));
        let reviews: Vec<Review> = self
            .reviews
            .lock()
            .unwrap()
            .iter()
            .filter(|r| r.car_id == car_id)
            .cloned()
            .collect();
        Ok(ReviewsResponse {
            total_reviews: Some(reviews.len() as u64),
            reviews,
            average_rating: None,
        })
    }

    async fn create_review(
        &self,
        token: &str,
        car_id: &str,
        review: &ReviewInput,
    ) -> ApiResult<()> {
        self.record(format!("create_review {car_id}"));
        let user = self.user_for(token)?;
        let id = self.next_id("review-");
        self.reviews.lock().unwrap().push(Review {
            id,
            car_id: car_id.to_string(),
            user_id: user.clone(),
            username: user,
            rating: review.rating,
            comment: review.comment.clone(),
            created_at: None,
            updated_at: None,
        });
        Ok(())
    }

    async fn update_review(
        &self,
        token: &str,
        review_id: &str,
        review: &ReviewInput,
    ) -> ApiResult<()> {
        self.record(format!("update_review {review_id}"));
        self.user_for(token)?;
        let mut reviews = self.reviews.lock().unwrap();
        if let Some(existing) = reviews.iter_mut().find(|r| r.id == review_id) {
            existing.rating = review.rating;
            existing.comment = review.comment.clone();
        }
        Ok(())
    }

    async fn delete_review(&self, token: &str, review_id: &str) -> ApiResult<()> {
        self.record(format!("delete_review {review_id}"));
        self.user_for(token)?;
        self.reviews.lock().unwrap().retain(|r| r.id != review_id);
        Ok(())
    }
}

/// Store that refuses to write the garage
#[derive(Default)]
struct ReadOnlyGarageStore {
    inner: MemoryStore,
}

impl KeyValueStore for ReadOnlyGarageStore {
    fn get(&self, key: &str) -> StorageResult<Option<String>> {
        self.inner.get(key)
    }

    fn set(&self, key: &str, value: &str) -> StorageResult<()> {
        if key == GARAGE_KEY {
            return Err(StorageError::Io(std::io::Error::other("read-only")));
        }
        self.inner.set(key, value)
    }

    fn remove(&self, key: &str) -> StorageResult<()> {
        self.inner.remove(key)
    }
}

// ============================================================================
// Helpers
// ============================================================================

fn car(id: &str, make: &str, price: f64) -> Car {
    serde_json::from_value(serde_json::json!({
        "id": id,
        "make": make,
        "model": "Model",
        "year": 2019,
        "price": price,
        "fuel_type": "petrol",
        "transmission": "automatic"
    }))
    .unwrap()
}

fn default_cars() -> Vec<Car> {
    vec![
        car("c1", "Toyota", 5000.0),
        car("c2", "Toyota", 15000.0),
        car("c3", "BMW", 25000.0),
    ]
}

fn setup() -> (Storefront, Arc<MockApi>, Arc<MemoryStore>) {
    let api = MockApi::with_cars(default_cars());
    let store = Arc::new(MemoryStore::new());
    let storefront = Storefront::new(api.clone(), store.clone());
    (storefront, api, store)
}

async fn logged_in(username: &str) -> (Storefront, Arc<MockApi>, Arc<MemoryStore>) {
    let (storefront, api, store) = setup();
    storefront.login(username, "secret").await.unwrap();
    storefront.reload_catalog().await.unwrap();
    storefront.take_alerts().await;
    (storefront, api, store)
}

fn fill_form_values() -> [(&'static str, &'static str); 4] {
    [
        ("make", "Lexus"),
        ("model", "RX"),
        ("year", "2022"),
        ("price", "52000"),
    ]
}

// ============================================================================
// Session
// ============================================================================

#[tokio::test]
async fn test_login_persists_session_and_shows_catalog() {
    let (storefront, _api, store) = setup();
    storefront.show_page(Page::Garage).await.unwrap();

    storefront.login("aliya", "secret").await.unwrap();

    let state = storefront.snapshot().await;
    assert_eq!(state.page, Page::Catalog);
    assert_eq!(state.viewer().unwrap().username, "aliya");
    assert_eq!(store.get(TOKEN_KEY).unwrap().as_deref(), Some("token-aliya"));
    assert_eq!(state.favorites.count, Some(0));
}

#[tokio::test]
async fn test_bad_login_alerts() {
    let (storefront, _api, store) = setup();

    let result = storefront.login("aliya", "wrong").await;

    assert!(matches!(result, Err(StoreError::Api(ApiError::Unauthorized))));
    let alerts = storefront.take_alerts().await;
    assert_eq!(alerts[0].message, "Login failed");
    assert!(store.get(TOKEN_KEY).unwrap().is_none());
}

#[tokio::test]
async fn test_register_requires_every_field() {
    let (storefront, api, _store) = setup();

    let result = storefront.register("serik", "", "pw").await;

    assert!(matches!(result, Err(StoreError::Form(_))));
    assert!(api.calls_starting_with("register").is_empty());

    storefront
        .register("serik", "serik@example.com", "pw")
        .await
        .unwrap();
    assert!(storefront.snapshot().await.is_logged_in());
}

#[tokio::test]
async fn test_logout_clears_session() {
    let (storefront, _api, store) = logged_in("aliya").await;

    storefront.logout().await;

    assert!(!storefront.snapshot().await.is_logged_in());
    assert!(store.get(TOKEN_KEY).unwrap().is_none());
}

#[tokio::test]
async fn test_action_without_session_redirects_to_login() {
    let (storefront, api, _store) = setup();
    storefront.reload_catalog().await.unwrap();

    let result = storefront.toggle_favorite("c1").await;

    assert!(matches!(result, Err(StoreError::NotLoggedIn)));
    let state = storefront.snapshot().await;
    assert_eq!(state.page, Page::Login);
    assert_eq!(state.alerts()[0].message, LOGIN_REQUIRED);
    assert!(api.calls_starting_with("add_favorite").is_empty());
}

#[tokio::test]
async fn test_background_401_clears_session_without_navigation() {
    let (storefront, api, _store) = logged_in("aliya").await;
    storefront.show_page(Page::Garage).await.unwrap();
    api.expired.store(true, Ordering::SeqCst);

    let result = storefront.load_favorites_count().await;

    assert!(result.unwrap_err().is_session_expired());
    let state = storefront.snapshot().await;
    assert!(!state.is_logged_in());
    assert_eq!(state.page, Page::Garage);
    assert!(state.alerts().is_empty());
}

#[tokio::test]
async fn test_foreground_401_on_add_car_navigates_to_login() {
    let (storefront, api, store) = logged_in("aliya").await;
    storefront.show_page(Page::AddCar).await.unwrap();
    for (field, value) in fill_form_values() {
        storefront.update_form(field, value).await.unwrap();
    }
    api.expired.store(true, Ordering::SeqCst);

    let result = storefront.submit_new_car().await;

    assert!(result.unwrap_err().is_session_expired());
    let state = storefront.snapshot().await;
    assert_eq!(state.page, Page::Login);
    assert_eq!(state.alerts()[0].message, SESSION_EXPIRED);
    assert!(store.get(TOKEN_KEY).unwrap().is_none());
}

// ============================================================================
// Catalog
// ============================================================================

#[tokio::test]
async fn test_price_filter_is_applied_locally() {
    let (storefront, _api, _store) = setup();
    let filter = CatalogFilter::new().with_price_range(Some(10000.0), Some(20000.0));

    let outcome = storefront.load_catalog(filter).await.unwrap();

    assert_eq!(outcome, CatalogLoad::Applied(1));
    let state = storefront.snapshot().await;
    assert_eq!(state.catalog.items[0].id, "c2");
}

#[tokio::test]
async fn test_attribute_filter_and_reset() {
    let (storefront, _api, _store) = setup();

    let outcome = storefront
        .load_catalog(CatalogFilter::new().with_make("BMW"))
        .await
        .unwrap();
    assert_eq!(outcome, CatalogLoad::Applied(1));

    let outcome = storefront.reset_filters().await.unwrap();
    assert_eq!(outcome, CatalogLoad::Applied(3));
    assert!(storefront.snapshot().await.catalog.filter.is_empty());
}

#[tokio::test]
async fn test_empty_catalog_renders_empty_state() {
    let (storefront, _api, _store) = setup();

    storefront
        .load_catalog(CatalogFilter::new().with_make("Tesla"))
        .await
        .unwrap();

    let state = storefront.snapshot().await;
    assert_eq!(view::render_catalog(&state), ListView::Empty("No cars found"));
}

#[tokio::test]
async fn test_slow_catalog_response_is_discarded() {
    let (storefront, api, _store) = setup();
    let (release, gate) = oneshot::channel();
    *api.slow_gate.lock().unwrap() = Some(gate);

    let slow = {
        let storefront = storefront.clone();
        tokio::spawn(async move {
            storefront
                .load_catalog(CatalogFilter::new().with_make("Slow"))
                .await
        })
    };
    api.slow_entered.notified().await;

    let fast = storefront
        .load_catalog(CatalogFilter::new().with_make("BMW"))
        .await
        .unwrap();
    assert_eq!(fast, CatalogLoad::Applied(1));

    release.send(()).unwrap();
    let slow = slow.await.unwrap().unwrap();
    assert_eq!(slow, CatalogLoad::Stale);

    let state = storefront.snapshot().await;
    assert_eq!(state.catalog.items.len(), 1);
    assert_eq!(state.catalog.items[0].id, "c3");
}

// ============================================================================
// Garage
// ============================================================================

#[tokio::test]
async fn test_repeated_garage_adds_keep_one_entry() {
    let (storefront, _api, store) = setup();
    storefront.reload_catalog().await.unwrap();

    assert!(storefront.add_to_garage("c1").await.unwrap());
    assert!(!storefront.add_to_garage("c1").await.unwrap());
    assert!(!storefront.add_to_garage("c1").await.unwrap());

    let state = storefront.snapshot().await;
    assert_eq!(state.garage.count(), 1);
    let cards = view::render_catalog(&state);
    assert_eq!(cards.items()[0].garage.label(), "In Garage");

    let raw = store.get(GARAGE_KEY).unwrap().unwrap();
    assert_eq!(serde_json::from_str::<Vec<Car>>(&raw).unwrap().len(), 1);
}

#[tokio::test]
async fn test_unknown_car_cannot_enter_garage() {
    let (storefront, _api, _store) = setup();
    storefront.reload_catalog().await.unwrap();

    let result = storefront.add_to_garage("nope").await;
    assert!(matches!(result, Err(StoreError::UnknownCar(id)) if id == "nope"));

    let alerts = storefront.take_alerts().await;
    assert_eq!(alerts.len(), 1);
    assert_eq!(alerts[0].kind, AlertKind::Error);
    assert_eq!(alerts[0].message, "Car not found");
}

#[tokio::test]
async fn test_garage_write_failure_keeps_memory_and_storage_in_step() {
    let api = MockApi::with_cars(default_cars());
    let store = Arc::new(ReadOnlyGarageStore::default());
    let storefront = Storefront::new(api, store.clone());
    storefront.reload_catalog().await.unwrap();

    let result = storefront.add_to_garage("c1").await;

    assert!(matches!(result, Err(StoreError::Storage(_))));
    let mut state = storefront.snapshot().await;
    assert!(state.garage.is_empty());
    assert_eq!(store.get(GARAGE_KEY).unwrap(), None);
    let cards = view::render_catalog(&state);
    assert!(
        cards
            .items()
            .iter()
            .all(|card| card.garage == GarageButton::AddToGarage)
    );
    let alerts = state.take_alerts();
    assert_eq!(alerts[0].kind, AlertKind::Error);
    assert_eq!(alerts[0].message, "Failed to save garage");
}

#[tokio::test]
async fn test_removing_absent_garage_entry_is_noop() {
    let (storefront, _api, store) = setup();
    storefront.reload_catalog().await.unwrap();
    storefront.add_to_garage("c2").await.unwrap();
    let before = store.get(GARAGE_KEY).unwrap();

    assert!(!storefront.remove_from_garage("c9").await.unwrap());

    assert_eq!(store.get(GARAGE_KEY).unwrap(), before);
    assert_eq!(storefront.snapshot().await.garage.ids(), vec!["c2"]);
}

#[tokio::test]
async fn test_deleting_car_removes_it_from_garage() {
    let (storefront, api, store) = logged_in("aliya").await;
    storefront.add_to_garage("c1").await.unwrap();
    storefront.add_to_garage("c2").await.unwrap();

    let cancelled = storefront.delete_car("c1", false).await;
    assert!(matches!(cancelled, Err(StoreError::Cancelled)));
    assert!(api.calls_starting_with("delete_car").is_empty());

    storefront.delete_car("c1", true).await.unwrap();

    let state = storefront.snapshot().await;
    assert_eq!(state.garage.ids(), vec!["c2"]);
    assert!(state.catalog.find("c1").is_none());
    let raw = store.get(GARAGE_KEY).unwrap().unwrap();
    assert!(!raw.contains("\"c1\""));
}

// ============================================================================
// Favorites
// ============================================================================

#[tokio::test]
async fn test_toggle_twice_restores_state() {
    let (storefront, api, _store) = logged_in("aliya").await;

    assert!(storefront.toggle_favorite("c2").await.unwrap());
    let state = storefront.snapshot().await;
    assert_eq!(view::render_catalog(&state).items()[1].favorite, Some(true));
    assert_eq!(state.favorites.count, Some(1));

    assert!(!storefront.toggle_favorite("c2").await.unwrap());
    let state = storefront.snapshot().await;
    assert_eq!(view::render_catalog(&state).items()[1].favorite, Some(false));
    assert_eq!(state.favorites.count, Some(0));

    assert_eq!(api.calls_starting_with("add_favorite"), vec!["add_favorite c2"]);
    assert_eq!(
        api.calls_starting_with("remove_favorite"),
        vec!["remove_favorite c2"]
    );
}

#[tokio::test]
async fn test_toggle_failure_keeps_button_and_alerts() {
    let (storefront, api, _store) = logged_in("aliya").await;
    api.favorites_down.store(true, Ordering::SeqCst);

    let result = storefront.toggle_favorite("c1").await;

    assert!(matches!(result, Err(StoreError::Api(ApiError::Rejected { status: 500, .. }))));
    let state = storefront.snapshot().await;
    assert!(!state.favorites.is_favorite("c1"));
    assert!(state.is_logged_in());
    assert_eq!(state.page, Page::Catalog);
    assert_eq!(state.alerts()[0].message, "Failed to update favorites");
}

#[tokio::test]
async fn test_toggle_401_navigates_to_login() {
    let (storefront, api, _store) = logged_in("aliya").await;
    api.expired.store(true, Ordering::SeqCst);

    let result = storefront.toggle_favorite("c1").await;

    assert!(result.unwrap_err().is_session_expired());
    let state = storefront.snapshot().await;
    assert_eq!(state.page, Page::Login);
    assert_eq!(state.alerts()[0].message, SESSION_EXPIRED);
}

#[tokio::test]
async fn test_favorites_page_reloads_after_toggle() {
    let (storefront, api, _store) = logged_in("aliya").await;
    storefront.toggle_favorite("c1").await.unwrap();
    storefront.toggle_favorite("c3").await.unwrap();

    storefront.show_page(Page::Favorites).await.unwrap();
    assert_eq!(storefront.snapshot().await.favorites.entries().len(), 2);

    storefront.toggle_favorite("c1").await.unwrap();

    let state = storefront.snapshot().await;
    let cards = view::render_favorites(&state);
    assert_eq!(cards.items().len(), 1);
    assert_eq!(cards.items()[0].id, "c3");
    assert_eq!(api.calls_starting_with("list_favorites").len(), 2);
}

#[tokio::test]
async fn test_empty_favorites_page() {
    let (storefront, _api, _store) = logged_in("aliya").await;

    storefront.show_page(Page::Favorites).await.unwrap();

    let state = storefront.snapshot().await;
    assert_eq!(state.page, Page::Favorites);
    assert_eq!(
        view::render_favorites(&state),
        ListView::Empty("No favorites yet. Add some cars to your favorites!")
    );
}

#[tokio::test]
async fn test_favorites_count_skipped_without_session() {
    let (storefront, api, _store) = setup();

    assert_eq!(storefront.load_favorites_count().await.unwrap(), None);
    assert!(api.calls_starting_with("favorites_count").is_empty());
}

// ============================================================================
// Reviews
// ============================================================================

#[tokio::test]
async fn test_review_lifecycle() {
    let (storefront, api, _store) = logged_in("aliya").await;
    let five = Rating::new(5).unwrap();
    let three = Rating::new(3).unwrap();

    storefront.open_reviews("c1").await.unwrap();
    let state = storefront.snapshot().await;
    let ReviewsView::Loaded { empty_message, .. } = view::render_reviews(&state) else {
        panic!("expected loaded reviews");
    };
    assert!(empty_message.is_some());

    storefront.submit_review("c1", five, "Great car").await.unwrap();
    let state = storefront.snapshot().await;
    let review_id = state.reviews.data().unwrap().reviews[0].id.clone();

    storefront.begin_edit_review(&review_id).await.unwrap();
    storefront.update_review(three, "Decent car").await.unwrap();

    let state = storefront.snapshot().await;
    let data = state.reviews.data().unwrap();
    assert_eq!(data.reviews[0].comment, "Decent car");
    assert_eq!(data.summary().unwrap().average_label(), "3.0 / 5");
    assert!(state.reviews.editing().is_none());

    assert!(matches!(
        storefront.delete_review(&review_id, false).await,
        Err(StoreError::Cancelled)
    ));
    storefront.delete_review(&review_id, true).await.unwrap();

    let state = storefront.snapshot().await;
    assert!(state.reviews.data().unwrap().reviews.is_empty());
    assert_eq!(api.calls_starting_with("list_reviews").len(), 4);
}

#[tokio::test]
async fn test_only_author_can_edit_review() {
    let (storefront, api, _store) = logged_in("aliya").await;
    api.reviews.lock().unwrap().push(Review {
        id: "r-other".into(),
        car_id: "c1".into(),
        user_id: "serik".into(),
        username: "serik".into(),
        rating: Rating::new(4).unwrap(),
        comment: "Mine".into(),
        created_at: None,
        updated_at: None,
    });
    storefront.open_reviews("c1").await.unwrap();

    assert!(matches!(
        storefront.begin_edit_review("r-other").await,
        Err(StoreError::ReviewNotEditable)
    ));
    assert!(matches!(
        storefront.delete_review("r-other", true).await,
        Err(StoreError::ReviewNotEditable)
    ));
    assert!(api.calls_starting_with("delete_review").is_empty());

    let alerts = storefront.take_alerts().await;
    assert_eq!(alerts.len(), 2);
    assert!(alerts.iter().all(|a| a.kind == AlertKind::Error));
}

#[tokio::test]
async fn test_saving_without_an_edit_in_progress_alerts() {
    let (storefront, api, _store) = logged_in("aliya").await;
    storefront.open_reviews("c1").await.unwrap();

    let result = storefront
        .update_review(Rating::new(2).unwrap(), "Changed my mind")
        .await;

    assert!(matches!(result, Err(StoreError::ReviewNotEditable)));
    assert!(api.calls_starting_with("update_review").is_empty());
    assert_eq!(
        storefront.take_alerts().await[0].message,
        "No review is being edited"
    );
}

#[tokio::test]
async fn test_blank_review_comment_is_rejected() {
    let (storefront, api, _store) = logged_in("aliya").await;
    storefront.open_reviews("c1").await.unwrap();

    let result = storefront
        .submit_review("c1", Rating::new(4).unwrap(), "   ")
        .await;

    assert!(matches!(result, Err(StoreError::Form(_))));
    assert!(api.calls_starting_with("create_review").is_empty());
}

// ============================================================================
// Car forms
// ============================================================================

#[tokio::test]
async fn test_add_car_success() {
    let (storefront, _api, _store) = logged_in("aliya").await;
    storefront.show_page(Page::AddCar).await.unwrap();
    for (field, value) in fill_form_values() {
        storefront.update_form(field, value).await.unwrap();
    }

    storefront.submit_new_car().await.unwrap();

    let mut state = storefront.snapshot().await;
    assert_eq!(state.page, Page::Catalog);
    assert!(state.form.is_blank());
    assert_eq!(state.catalog.items.len(), 4);
    let alerts = state.take_alerts();
    assert_eq!(alerts[0].kind, AlertKind::Info);
    assert_eq!(alerts[0].message, "Car added successfully!");
}

#[tokio::test]
async fn test_add_car_rejection_shows_server_text() {
    let (storefront, api, _store) = logged_in("aliya").await;
    *api.create_rejection.lock().unwrap() = Some(ApiError::from_status(400, "Invalid year"));
    for (field, value) in fill_form_values() {
        storefront.update_form(field, value).await.unwrap();
    }

    let result = storefront.submit_new_car().await;

    assert!(result.is_err());
    let alerts = storefront.take_alerts().await;
    assert_eq!(alerts[0].message, "Error: Invalid year");
    assert!(!storefront.snapshot().await.form.is_blank());
}

#[tokio::test]
async fn test_add_car_invalid_form_skips_backend() {
    let (storefront, api, _store) = logged_in("aliya").await;
    storefront.update_form("make", "Lexus").await.unwrap();

    let result = storefront.submit_new_car().await;

    assert!(matches!(result, Err(StoreError::Form(_))));
    assert!(api.calls_starting_with("create_car").is_empty());
}

#[tokio::test]
async fn test_unknown_form_field_alerts() {
    let (storefront, _api, _store) = logged_in("aliya").await;

    assert!(storefront.update_form("wheels", "4").await.is_err());

    let alerts = storefront.take_alerts().await;
    assert_eq!(alerts.len(), 1);
    assert_eq!(alerts[0].message, "Unknown field: wheels");
}

#[tokio::test]
async fn test_deleting_favorite_car_refreshes_favorites() {
    let (storefront, api, _store) = logged_in("aliya").await;
    storefront.toggle_favorite("c1").await.unwrap();
    storefront.toggle_favorite("c3").await.unwrap();
    storefront.show_page(Page::Favorites).await.unwrap();
    assert_eq!(storefront.snapshot().await.favorites.count, Some(2));

    storefront.delete_car("c1", true).await.unwrap();

    let state = storefront.snapshot().await;
    assert_eq!(state.favorites.count, Some(1));
    assert!(!state.favorites.is_favorite("c1"));
    let cards = view::render_favorites(&state);
    assert_eq!(cards.items().len(), 1);
    assert_eq!(cards.items()[0].id, "c3");
    assert_eq!(api.calls_starting_with("list_favorites").len(), 2);
}

#[tokio::test]
async fn test_edit_car_prefills_and_replaces() {
    let (storefront, api, _store) = logged_in("aliya").await;

    storefront.show_page(Page::EditCar("c2".into())).await.unwrap();
    let state = storefront.snapshot().await;
    assert_eq!(state.page, Page::EditCar("c2".into()));
    assert_eq!(state.form.make, "Toyota");
    assert_eq!(state.form.price, "15000");

    storefront.update_form("price", "14000").await.unwrap();
    storefront.submit_car_edit("c2").await.unwrap();

    let state = storefront.snapshot().await;
    assert_eq!(state.catalog.find("c2").unwrap().price, 14000.0);
    assert_eq!(api.calls_starting_with("update_car"), vec!["update_car c2"]);
}

#[tokio::test]
async fn test_submit_form_follows_current_page() {
    let (storefront, api, _store) = logged_in("aliya").await;

    let result = storefront.submit_form().await;
    assert!(matches!(result, Err(StoreError::Cancelled)));
    assert!(api.calls_starting_with("create_car").is_empty());
    storefront.take_alerts().await;

    storefront.show_page(Page::EditCar("c3".into())).await.unwrap();
    storefront.update_form("price", "24000").await.unwrap();
    storefront.submit_form().await.unwrap();

    assert_eq!(api.calls_starting_with("update_car"), vec!["update_car c3"]);
    assert_eq!(storefront.snapshot().await.page, Page::Catalog);
}

#[tokio::test]
async fn test_panel_review_needs_open_panel() {
    let (storefront, api, _store) = logged_in("aliya").await;
    let rating = Rating::new(4).unwrap();

    let result = storefront.submit_panel_review(rating, "Comfortable").await;
    assert!(matches!(result, Err(StoreError::ReviewsClosed)));
    let alerts = storefront.take_alerts().await;
    assert_eq!(alerts[0].message, "Open a car's reviews first");
    assert!(api.calls_starting_with("create_review").is_empty());

    storefront.open_reviews("c1").await.unwrap();
    storefront.submit_panel_review(rating, "Comfortable").await.unwrap();

    let state = storefront.snapshot().await;
    assert_eq!(state.reviews.data().unwrap().reviews.len(), 1);
    assert_eq!(api.calls_starting_with("list_reviews c1").len(), 2);
}
