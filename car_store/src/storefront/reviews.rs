//! Reviews operations.
//!
//! Every mutation re-fetches the whole list for the car.

use super::{StoreError, StoreResult, Storefront};
use crate::forms::FormError;
use crate::reviews::{Rating, ReviewInput};
use log::{debug, warn};

const NOT_YOUR_REVIEW: &str = "You can only change your own reviews";

impl Storefront {
    /// Open the reviews panel for a car and load it
    pub async fn open_reviews(&self, car_id: &str) -> StoreResult<()> {
        self.state.lock().await.reviews.open(car_id);
        self.fetch_reviews(car_id).await
    }

    /// Reload the open panel. Does nothing when it is closed.
    pub async fn reload_reviews(&self) -> StoreResult<()> {
        let reloading = self.state.lock().await.reviews.reload();
        match reloading {
            Some(car_id) => self.fetch_reviews(&car_id).await,
            None => Ok(()),
        }
    }

    pub async fn close_reviews(&self) {
        self.state.lock().await.reviews.close();
    }

    async fn fetch_reviews(&self, car_id: &str) -> StoreResult<()> {
        let result = self.api.list_reviews(car_id).await;

        let mut state = self.state.lock().await;
        match result {
            Ok(data) => {
                if !state.reviews.loaded(car_id, data) {
                    debug!("Dropping reviews for {}, panel moved on", car_id);
                }
                Ok(())
            }
            Err(e) => {
                warn!("Failed to load reviews for {}: {}", car_id, e);
                state.reviews.failed(car_id, e.to_string());
                Err(e.into())
            }
        }
    }

    /// Post a new review for `car_id`
    pub async fn submit_review(&self, car_id: &str, rating: Rating, comment: &str) -> StoreResult<()> {
        let token = self.require_session().await?;
        let review = self.review_input(rating, comment).await?;

        if let Err(e) = self.api.create_review(&token, car_id, &review).await {
            return Err(self.report_rejection(e, "Failed to submit review").await);
        }
        self.open_reviews(car_id).await
    }

    /// Post a new review for the car whose panel is open
    pub async fn submit_panel_review(&self, rating: Rating, comment: &str) -> StoreResult<()> {
        let car_id = self
            .state
            .lock()
            .await
            .reviews
            .car_id()
            .map(str::to_string);
        let Some(car_id) = car_id else {
            self.state
                .lock()
                .await
                .alert_error("Open a car's reviews first");
            return Err(StoreError::ReviewsClosed);
        };
        self.submit_review(&car_id, rating, comment).await
    }

    /// Put one of the viewer's reviews into edit mode
    ///
    /// # Errors
    ///
    /// * `StoreError::ReviewNotEditable` - Not loaded, or not the viewer's
    pub async fn begin_edit_review(&self, review_id: &str) -> StoreResult<()> {
        let mut state = self.state.lock().await;
        let viewer = state.viewer().cloned();
        if state.reviews.begin_edit(review_id, viewer.as_ref()) {
            Ok(())
        } else {
            state.alert_error(NOT_YOUR_REVIEW);
            Err(StoreError::ReviewNotEditable)
        }
    }

    pub async fn cancel_edit_review(&self) {
        self.state.lock().await.reviews.cancel_edit();
    }

    /// Save the review currently in edit mode
    pub async fn update_review(&self, rating: Rating, comment: &str) -> StoreResult<()> {
        let review_id = self
            .state
            .lock()
            .await
            .reviews
            .editing()
            .map(|(id, _)| id.to_string());
        let Some(review_id) = review_id else {
            self.state
                .lock()
                .await
                .alert_error("No review is being edited");
            return Err(StoreError::ReviewNotEditable);
        };
        let token = self.require_session().await?;
        let review = self.review_input(rating, comment).await?;

        if let Err(e) = self.api.update_review(&token, &review_id, &review).await {
            return Err(self.report(e, "Failed to update review").await);
        }
        self.reload_reviews().await
    }

    /// Delete one of the viewer's reviews
    ///
    /// `confirmed` must reflect an explicit yes to the delete prompt.
    pub async fn delete_review(&self, review_id: &str, confirmed: bool) -> StoreResult<()> {
        if !confirmed {
            return Err(StoreError::Cancelled);
        }
        let token = self.require_session().await?;
        {
            let mut state = self.state.lock().await;
            let authored = state
                .reviews
                .data()
                .and_then(|data| data.find(review_id))
                .is_some_and(|review| review.can_modify(state.viewer()));
            if !authored {
                state.alert_error(NOT_YOUR_REVIEW);
                return Err(StoreError::ReviewNotEditable);
            }
        }

        if let Err(e) = self.api.delete_review(&token, review_id).await {
            return Err(self.report(e, "Failed to delete review").await);
        }
        self.reload_reviews().await
    }

    async fn review_input(&self, rating: Rating, comment: &str) -> StoreResult<ReviewInput> {
        let comment = comment.trim();
        if comment.is_empty() {
            let error = FormError::Missing("comment");
            self.state.lock().await.alert_error(error.to_string());
            return Err(error.into());
        }
        Ok(ReviewInput {
            rating,
            comment: comment.to_string(),
        })
    }
}
