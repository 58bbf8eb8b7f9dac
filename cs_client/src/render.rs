//! Plain-text rendering of view models.
//!
//! Both front ends draw from these lines: the line-mode client prints them,
//! the TUI puts them in list widgets.

use car_store::forms::CarForm;
use car_store::view::{
    self, CarCard, GarageButton, GarageCard, ListView, NavBar, ReviewsView,
};
use car_store::{AppState, Page};

/// Header line: page, badges and greeting
pub fn nav_line(nav: &NavBar) -> String {
    let favorites = match nav.favorites_count {
        Some(count) => format!("  Favorites ({count})"),
        None => String::new(),
    };
    let user = nav
        .greeting
        .clone()
        .unwrap_or_else(|| "Not logged in (login USERNAME PASSWORD | register ...)".to_string());
    format!(
        "[{}]  Garage ({}){}  {}",
        nav.page, nav.garage_count, favorites, user
    )
}

/// Lines for the current page body
pub fn page_lines(state: &AppState) -> Vec<String> {
    match &state.page {
        Page::Catalog => {
            let mut lines = vec![filter_line(state)];
            lines.extend(list_lines(view::render_catalog(state), car_card_lines));
            lines
        }
        Page::Garage => list_lines(view::render_garage(state), garage_card_lines),
        Page::Favorites => list_lines(view::render_favorites(state), car_card_lines),
        Page::AddCar => form_lines("Add a car", &state.form),
        Page::EditCar(id) => form_lines(&format!("Edit car {id}"), &state.form),
        Page::Login => vec![
            "login USERNAME PASSWORD".to_string(),
            "register USERNAME EMAIL PASSWORD".to_string(),
        ],
    }
}

/// Lines for the reviews panel, empty when it is closed
pub fn reviews_lines(reviews: &ReviewsView) -> Vec<String> {
    match reviews {
        ReviewsView::Hidden => Vec::new(),
        ReviewsView::Loading => vec!["Loading reviews...".to_string()],
        ReviewsView::Failed(message) => vec![message.clone()],
        ReviewsView::Loaded {
            car_id,
            summary,
            rows,
            empty_message,
            can_post,
            ..
        } => {
            let mut lines = vec![format!("Reviews for {car_id}")];
            if let Some(summary) = summary {
                lines.push(format!(
                    "{} {} ({} reviews)",
                    summary.stars, summary.average, summary.count
                ));
            }
            if let Some(message) = empty_message {
                lines.push((*message).to_string());
            }
            for row in rows {
                let date = row.date.as_deref().unwrap_or("");
                lines.push(format!("{} {} {} [{}]", row.stars, row.author, date, row.id));
                match &row.draft {
                    Some(draft) => lines.push(format!(
                        "  editing: {} \"{}\" (review save RATING COMMENT | review cancel)",
                        draft.rating, draft.comment
                    )),
                    None => lines.push(format!("  {}", row.comment)),
                }
                if row.can_modify && row.draft.is_none() {
                    lines.push(format!("  review edit {0} | review delete {0}", row.id));
                }
            }
            if *can_post {
                lines.push("Post: review RATING(1-5) COMMENT".to_string());
            } else {
                lines.push("Log in to leave a review".to_string());
            }
            lines
        }
    }
}

fn filter_line(state: &AppState) -> String {
    let filter = &state.catalog.filter;
    if filter.is_empty() {
        return "Filter: none".to_string();
    }

    let mut parts = Vec::new();
    for (key, value) in filter.query_pairs() {
        parts.push(format!("{key}={value}"));
    }
    if let Some(min) = filter.min_price {
        parts.push(format!("min={}", view::format_price(min)));
    }
    if let Some(max) = filter.max_price {
        parts.push(format!("max={}", view::format_price(max)));
    }
    format!("Filter: {}", parts.join(" "))
}

fn list_lines<T>(list: ListView<T>, card: fn(&T) -> Vec<String>) -> Vec<String> {
    match list {
        ListView::Loading => vec!["Loading...".to_string()],
        ListView::Empty(message) => vec![message.to_string()],
        ListView::Failed(message) => vec![message],
        ListView::Items(items) => items.iter().flat_map(card).collect(),
    }
}

fn car_card_lines(card: &CarCard) -> Vec<String> {
    let garage = match card.garage {
        GarageButton::AddToGarage => "[garage add]",
        GarageButton::InGarage => "[in garage]",
    };
    let favorite = match card.favorite {
        Some(true) => " ♥",
        Some(false) => " ♡",
        None => "",
    };
    vec![
        format!(
            "{} ({}) {} [{}] {}{}",
            card.title, card.year, card.price, card.id, garage, favorite
        ),
        format!("  {}", card.specs.join(" | ")),
        format!("  {}", card.description),
    ]
}

fn garage_card_lines(card: &GarageCard) -> Vec<String> {
    vec![
        format!("{} ({}) {} [{}]", card.title, card.year, card.price, card.id),
        format!("  {}", card.specs.join(" | ")),
    ]
}

fn form_lines(title: &str, form: &CarForm) -> Vec<String> {
    let mut lines = vec![format!("{title} (set FIELD VALUE, then submit)")];
    for field in CarForm::FIELDS {
        let value = form.field(field).unwrap_or("");
        lines.push(format!("  {field:<13} {value}"));
    }
    lines
}
