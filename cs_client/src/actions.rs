//! Runs parsed commands against the storefront.

use crate::commands::Command;
use car_store::{CatalogLoad, Page, StoreResult, Storefront};
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::{self, MissedTickBehavior};
use tracing::debug;

/// What the front end should do after a command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    ShowHelp,
    Quit,
}

/// Run one command
///
/// Confirmation must already have been asked for; an unconfirmed delete
/// comes back as `StoreError::Cancelled`.
///
/// # Errors
///
/// Whatever the storefront operation returns. The user has already been
/// alerted by the time an error comes back.
pub async fn execute(storefront: &Storefront, command: Command) -> StoreResult<Flow> {
    debug!(?command, "Executing command");

    match command {
        Command::Help => return Ok(Flow::ShowHelp),
        Command::Quit => return Ok(Flow::Quit),
        Command::Show(page) => storefront.show_page(page).await?,
        Command::Edit(car_id) => storefront.show_page(Page::EditCar(car_id)).await?,
        Command::Login { username, password } => storefront.login(&username, &password).await?,
        Command::Register {
            username,
            email,
            password,
        } => storefront.register(&username, &email, &password).await?,
        Command::Logout => storefront.logout().await,
        Command::Filter(filter) => log_load(storefront.load_catalog(filter).await?),
        Command::ResetFilters => log_load(storefront.reset_filters().await?),
        Command::Refresh => log_load(storefront.reload_catalog().await?),
        Command::GarageAdd(car_id) => {
            storefront.add_to_garage(&car_id).await?;
        }
        Command::GarageRemove(car_id) => {
            storefront.remove_from_garage(&car_id).await?;
        }
        Command::ToggleFavorite(car_id) => {
            storefront.toggle_favorite(&car_id).await?;
        }
        Command::OpenReviews(car_id) => storefront.open_reviews(&car_id).await?,
        Command::CloseReviews => storefront.close_reviews().await,
        Command::PostReview { rating, comment } => {
            storefront.submit_panel_review(rating, &comment).await?
        }
        Command::EditReview(review_id) => storefront.begin_edit_review(&review_id).await?,
        Command::SaveReview { rating, comment } => {
            storefront.update_review(rating, &comment).await?
        }
        Command::CancelReview => storefront.cancel_edit_review().await,
        Command::DeleteReview {
            review_id,
            confirmed,
        } => storefront.delete_review(&review_id, confirmed).await?,
        Command::SetField { field, value } => storefront.update_form(&field, &value).await?,
        Command::Submit => storefront.submit_form().await?,
        Command::DeleteCar { car_id, confirmed } => {
            storefront.delete_car(&car_id, confirmed).await?
        }
    }
    Ok(Flow::Continue)
}

fn log_load(load: CatalogLoad) {
    if load == CatalogLoad::Stale {
        debug!("Catalog response superseded by a newer request");
    }
}

/// Keep the favorites badge fresh while the client runs
///
/// Runs until the returned handle is aborted. Ticks without a session do
/// nothing; failures are logged by the storefront.
pub fn spawn_favorites_refresh(storefront: Storefront, period: Duration) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = time::interval(period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        // The first tick completes immediately and start() already fetched
        ticker.tick().await;
        loop {
            ticker.tick().await;
            if let Ok(Some(count)) = storefront.load_favorites_count().await {
                debug!(count, "Favorites badge refreshed");
            }
        }
    })
}
