//! Text command parsing shared by the line-mode and TUI front ends.

use car_store::catalog::{CarId, CatalogFilter};
use car_store::reviews::Rating;
use car_store::storefront::{DELETE_CAR_PROMPT, DELETE_REVIEW_PROMPT};
use car_store::Page;
use std::fmt;

/// A parsed user command
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Switch to a page
    Show(Page),
    /// Open the edit page for a car
    Edit(CarId),
    Login {
        username: String,
        password: String,
    },
    Register {
        username: String,
        email: String,
        password: String,
    },
    Logout,
    /// Replace the catalog filter and reload
    Filter(CatalogFilter),
    ResetFilters,
    /// Re-fetch the catalog with the current filter
    Refresh,
    GarageAdd(CarId),
    GarageRemove(CarId),
    ToggleFavorite(CarId),
    OpenReviews(CarId),
    CloseReviews,
    /// Review the car whose panel is open
    PostReview {
        rating: Rating,
        comment: String,
    },
    EditReview(String),
    SaveReview {
        rating: Rating,
        comment: String,
    },
    CancelReview,
    DeleteReview {
        review_id: String,
        confirmed: bool,
    },
    /// Set one field of the add/edit form
    SetField {
        field: String,
        value: String,
    },
    /// Submit the add/edit form
    Submit,
    DeleteCar {
        car_id: CarId,
        confirmed: bool,
    },
    Help,
    Quit,
}

impl Command {
    /// Prompt to show before running an unconfirmed destructive command
    pub fn confirmation(&self) -> Option<&'static str> {
        match self {
            Self::DeleteReview {
                confirmed: false, ..
            } => Some(DELETE_REVIEW_PROMPT),
            Self::DeleteCar {
                confirmed: false, ..
            } => Some(DELETE_CAR_PROMPT),
            _ => None,
        }
    }

    /// Mark a destructive command as confirmed
    pub fn confirmed(self) -> Self {
        match self {
            Self::DeleteReview { review_id, .. } => Self::DeleteReview {
                review_id,
                confirmed: true,
            },
            Self::DeleteCar { car_id, .. } => Self::DeleteCar {
                car_id,
                confirmed: true,
            },
            other => other,
        }
    }
}

/// Errors that can occur during command parsing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// A required argument is missing.
    MissingArgument(&'static str),
    /// Rating is not an integer from 1 to 5.
    InvalidRating(String),
    /// Price bound is not a number.
    InvalidPrice(String),
    /// Filter key is not one of the known criteria.
    UnknownFilter(String),
    /// Unrecognized command.
    UnrecognizedCommand(String),
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingArgument(usage) => write!(f, "Missing argument. Usage: '{}'", usage),
            Self::InvalidRating(value) => write!(
                f,
                "Invalid rating '{}'. Must be a whole number from 1 to 5 (e.g., 'review 5 Great car')",
                value
            ),
            Self::InvalidPrice(value) => write!(
                f,
                "Invalid price '{}'. Must be a number (e.g., 'filter min=10000')",
                value
            ),
            Self::UnknownFilter(key) => write!(
                f,
                "Unknown filter '{}'. Use make, body, fuel, trans, min or max",
                key
            ),
            Self::UnrecognizedCommand(cmd) => write!(
                f,
                "Unrecognized command '{}'. Type 'help' to see available commands",
                cmd
            ),
        }
    }
}

impl std::error::Error for ParseError {}

/// Parse a command string into a [`Command`].
///
/// # Arguments
///
/// * `input` - The raw command string from user input
///
/// # Returns
///
/// * `Ok(Command)` - Successfully parsed command
/// * `Err(ParseError)` - Parse error with descriptive message
///
/// # Examples
///
/// ```
/// use cs_client::commands::{Command, parse_command};
/// use car_store::Page;
///
/// assert_eq!(parse_command("garage"), Ok(Command::Show(Page::Garage)));
/// assert_eq!(parse_command("fav c1"), Ok(Command::ToggleFavorite("c1".into())));
/// assert!(parse_command("review 9 meh").is_err());
/// ```
pub fn parse_command(input: &str) -> Result<Command, ParseError> {
    let trimmed = input.trim();

    // Single-word commands first
    match trimmed {
        "catalog" | "home" => return Ok(Command::Show(Page::Catalog)),
        "garage" => return Ok(Command::Show(Page::Garage)),
        "add" => return Ok(Command::Show(Page::AddCar)),
        "favorites" | "favs" => return Ok(Command::Show(Page::Favorites)),
        "login" => return Ok(Command::Show(Page::Login)),
        "logout" => return Ok(Command::Logout),
        "reset" => return Ok(Command::ResetFilters),
        "refresh" => return Ok(Command::Refresh),
        "submit" => return Ok(Command::Submit),
        "help" => return Ok(Command::Help),
        "quit" | "exit" => return Ok(Command::Quit),
        _ => {}
    }

    let (head, rest) = split_word(trimmed);
    match head {
        "login" => parse_login(rest),
        "register" => parse_register(rest),
        "filter" => parse_filter(rest),
        "garage" => parse_garage(rest),
        "fav" => required_word(rest, "fav CAR_ID").map(Command::ToggleFavorite),
        "edit" => required_word(rest, "edit CAR_ID").map(Command::Edit),
        "delete" => parse_delete_car(rest),
        "reviews" => parse_reviews(rest),
        "review" => parse_review(rest),
        "set" => parse_set(rest),
        _ => Err(ParseError::UnrecognizedCommand(trimmed.to_string())),
    }
}

/// Split off the first whitespace-separated word
fn split_word(input: &str) -> (&str, &str) {
    let input = input.trim_start();
    match input.split_once(char::is_whitespace) {
        Some((head, rest)) => (head, rest.trim_start()),
        None => (input, ""),
    }
}

fn required_word(input: &str, usage: &'static str) -> Result<String, ParseError> {
    let (word, _) = split_word(input);
    if word.is_empty() {
        Err(ParseError::MissingArgument(usage))
    } else {
        Ok(word.to_string())
    }
}

/// Trailing `-y` or `--yes` pre-confirms a destructive command
fn has_yes_flag(input: &str) -> bool {
    input
        .split_ascii_whitespace()
        .skip(1)
        .any(|word| word == "-y" || word == "--yes")
}

/// "login USERNAME PASSWORD"
fn parse_login(rest: &str) -> Result<Command, ParseError> {
    let parts: Vec<&str> = rest.split_ascii_whitespace().collect();
    match parts.as_slice() {
        [username, password] => Ok(Command::Login {
            username: username.to_string(),
            password: password.to_string(),
        }),
        _ => Err(ParseError::MissingArgument("login USERNAME PASSWORD")),
    }
}

/// "register USERNAME EMAIL PASSWORD"
fn parse_register(rest: &str) -> Result<Command, ParseError> {
    let parts: Vec<&str> = rest.split_ascii_whitespace().collect();
    match parts.as_slice() {
        [username, email, password] => Ok(Command::Register {
            username: username.to_string(),
            email: email.to_string(),
            password: password.to_string(),
        }),
        _ => Err(ParseError::MissingArgument("register USERNAME EMAIL PASSWORD")),
    }
}

/// "filter make=Toyota body=sedan fuel=petrol trans=automatic min=1000 max=20000"
fn parse_filter(rest: &str) -> Result<Command, ParseError> {
    if rest.is_empty() {
        return Err(ParseError::MissingArgument("filter KEY=VALUE ..."));
    }

    let mut filter = CatalogFilter::new();
    for pair in rest.split_ascii_whitespace() {
        let (key, value) = pair
            .split_once('=')
            .ok_or_else(|| ParseError::UnknownFilter(pair.to_string()))?;
        filter = match key {
            "make" => filter.with_make(value),
            "body" | "body_type" => filter.with_body_type(value),
            "fuel" | "fuel_type" => filter.with_fuel_type(value),
            "trans" | "transmission" => filter.with_transmission(value),
            "min" | "min_price" => {
                let min = parse_price(value)?;
                let max = filter.max_price;
                filter.with_price_range(min, max)
            }
            "max" | "max_price" => {
                let max = parse_price(value)?;
                let min = filter.min_price;
                filter.with_price_range(min, max)
            }
            _ => return Err(ParseError::UnknownFilter(key.to_string())),
        };
    }
    Ok(Command::Filter(filter))
}

/// Blank bounds mean unbounded
fn parse_price(value: &str) -> Result<Option<f64>, ParseError> {
    if value.is_empty() {
        return Ok(None);
    }
    match value.parse::<f64>() {
        Ok(price) if price.is_finite() => Ok(Some(price)),
        _ => Err(ParseError::InvalidPrice(value.to_string())),
    }
}

/// "garage add CAR_ID" or "garage remove CAR_ID"
fn parse_garage(rest: &str) -> Result<Command, ParseError> {
    let (action, rest) = split_word(rest);
    match action {
        "add" => required_word(rest, "garage add CAR_ID").map(Command::GarageAdd),
        "remove" | "rm" => required_word(rest, "garage remove CAR_ID").map(Command::GarageRemove),
        _ => Err(ParseError::MissingArgument("garage add|remove CAR_ID")),
    }
}

/// "delete CAR_ID [--yes]"
fn parse_delete_car(rest: &str) -> Result<Command, ParseError> {
    let car_id = required_word(rest, "delete CAR_ID")?;
    Ok(Command::DeleteCar {
        car_id,
        confirmed: has_yes_flag(rest),
    })
}

/// "reviews CAR_ID" or "reviews close"
fn parse_reviews(rest: &str) -> Result<Command, ParseError> {
    match required_word(rest, "reviews CAR_ID")?.as_str() {
        "close" => Ok(Command::CloseReviews),
        car_id => Ok(Command::OpenReviews(car_id.to_string())),
    }
}

/// "review RATING COMMENT", "review edit ID", "review save RATING COMMENT",
/// "review cancel", "review delete ID [--yes]"
fn parse_review(rest: &str) -> Result<Command, ParseError> {
    let (action, args) = split_word(rest);
    match action {
        "" => Err(ParseError::MissingArgument("review RATING COMMENT")),
        "edit" => required_word(args, "review edit REVIEW_ID").map(Command::EditReview),
        "cancel" => Ok(Command::CancelReview),
        "delete" => {
            let review_id = required_word(args, "review delete REVIEW_ID")?;
            Ok(Command::DeleteReview {
                review_id,
                confirmed: has_yes_flag(args),
            })
        }
        "save" => {
            let (rating, comment) = parse_rating_and_comment(args)?;
            Ok(Command::SaveReview { rating, comment })
        }
        _ => {
            let (rating, comment) = parse_rating_and_comment(rest)?;
            Ok(Command::PostReview { rating, comment })
        }
    }
}

/// The comment is left as typed; blank comments are rejected later with a
/// form error.
fn parse_rating_and_comment(input: &str) -> Result<(Rating, String), ParseError> {
    let (value, comment) = split_word(input);
    if value.is_empty() {
        return Err(ParseError::MissingArgument("review RATING COMMENT"));
    }
    let rating = value
        .parse::<u8>()
        .ok()
        .and_then(|v| Rating::new(v).ok())
        .ok_or_else(|| ParseError::InvalidRating(value.to_string()))?;
    Ok((rating, comment.to_string()))
}

/// "set FIELD VALUE..." where the value keeps its inner spaces
fn parse_set(rest: &str) -> Result<Command, ParseError> {
    let (field, value) = split_word(rest);
    if field.is_empty() {
        return Err(ParseError::MissingArgument("set FIELD VALUE"));
    }
    Ok(Command::SetField {
        field: field.to_string(),
        value: value.trim_end().to_string(),
    })
}
