//! Car data models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// Car identifier. Opaque to the client; older backends send integers.
pub type CarId = String;

/// A car listing as returned by the backend
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Car {
    #[serde(deserialize_with = "deserialize_id")]
    pub id: CarId,
    pub make: String,
    pub model: String,
    pub year: i32,
    pub price: f64,
    #[serde(default)]
    pub mileage: i64,
    #[serde(default)]
    pub body_type: String,
    #[serde(default)]
    pub fuel_type: String,
    #[serde(default)]
    pub transmission: String,
    #[serde(default)]
    pub color: String,
    #[serde(default)]
    pub horsepower: i32,
    #[serde(default)]
    pub engine_size: f64,
    #[serde(default)]
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Car {
    /// "Make Model" heading
    pub fn title(&self) -> String {
        format!("{} {}", self.make, self.model)
    }
}

/// Field set posted when creating a car or sent as a full replacement on edit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CarInput {
    pub make: String,
    pub model: String,
    pub year: i32,
    pub price: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mileage: Option<i64>,
    pub body_type: String,
    pub fuel_type: String,
    pub transmission: String,
    pub color: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub horsepower: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub engine_size: Option<f64>,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

/// Accept either a string or an integer identifier
pub(crate) fn deserialize_id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum IdRepr {
        Text(String),
        Number(i64),
    }

    Ok(match IdRepr::deserialize(deserializer)? {
        IdRepr::Text(s) => s,
        IdRepr::Number(n) => n.to_string(),
    })
}
