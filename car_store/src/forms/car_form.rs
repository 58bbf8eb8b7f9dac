//! Car add/edit form.

use super::errors::{FormError, FormResult};
use crate::catalog::{Car, CarInput};
use std::str::FromStr;

/// Raw text of the car form
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CarForm {
    pub make: String,
    pub model: String,
    pub year: String,
    pub price: String,
    pub mileage: String,
    pub body_type: String,
    pub fuel_type: String,
    pub transmission: String,
    pub color: String,
    pub horsepower: String,
    pub engine_size: String,
    pub description: String,
    pub image_url: String,
}

impl CarForm {
    /// Field names accepted by [`CarForm::set_field`], in display order
    pub const FIELDS: [&'static str; 13] = [
        "make",
        "model",
        "year",
        "price",
        "mileage",
        "body_type",
        "fuel_type",
        "transmission",
        "color",
        "horsepower",
        "engine_size",
        "description",
        "image_url",
    ];

    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-populate the form from a car snapshot
    pub fn from_car(car: &Car) -> Self {
        Self {
            make: car.make.clone(),
            model: car.model.clone(),
            year: car.year.to_string(),
            price: car.price.to_string(),
            mileage: car.mileage.to_string(),
            body_type: car.body_type.clone(),
            fuel_type: car.fuel_type.clone(),
            transmission: car.transmission.clone(),
            color: car.color.clone(),
            horsepower: car.horsepower.to_string(),
            engine_size: car.engine_size.to_string(),
            description: car.description.clone(),
            image_url: car.image_url.clone().unwrap_or_default(),
        }
    }

    /// Clear every field
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn is_blank(&self) -> bool {
        *self == Self::default()
    }

    /// Set a field by name
    ///
    /// # Arguments
    ///
    /// * `name` - One of [`CarForm::FIELDS`]
    /// * `value` - Raw text, stored as typed
    pub fn set_field(&mut self, name: &str, value: &str) -> FormResult<()> {
        *self.field_mut(name)? = value.to_string();
        Ok(())
    }

    /// Read a field by name
    pub fn field(&self, name: &str) -> Option<&str> {
        let value = match name {
            "make" => &self.make,
            "model" => &self.model,
            "year" => &self.year,
            "price" => &self.price,
            "mileage" => &self.mileage,
            "body_type" => &self.body_type,
            "fuel_type" => &self.fuel_type,
            "transmission" => &self.transmission,
            "color" => &self.color,
            "horsepower" => &self.horsepower,
            "engine_size" => &self.engine_size,
            "description" => &self.description,
            "image_url" => &self.image_url,
            _ => return None,
        };
        Some(value)
    }

    fn field_mut(&mut self, name: &str) -> FormResult<&mut String> {
        let value = match name {
            "make" => &mut self.make,
            "model" => &mut self.model,
            "year" => &mut self.year,
            "price" => &mut self.price,
            "mileage" => &mut self.mileage,
            "body_type" => &mut self.body_type,
            "fuel_type" => &mut self.fuel_type,
            "transmission" => &mut self.transmission,
            "color" => &mut self.color,
            "horsepower" => &mut self.horsepower,
            "engine_size" => &mut self.engine_size,
            "description" => &mut self.description,
            "image_url" => &mut self.image_url,
            _ => return Err(FormError::UnknownField(name.to_string())),
        };
        Ok(value)
    }

    /// Coerce the form into a request body
    ///
    /// Make, model, year and price are required. Blank optional numbers are
    /// omitted from the request.
    ///
    /// # Errors
    ///
    /// * `FormError::Missing` - A required field is blank
    /// * `FormError::InvalidNumber` - A numeric field does not parse
    pub fn to_input(&self) -> FormResult<CarInput> {
        let make = required("make", &self.make)?;
        let model = required("model", &self.model)?;
        let year = parse_number::<i32>("year", &self.year)?.ok_or(FormError::Missing("year"))?;
        let price = parse_decimal("price", &self.price)?.ok_or(FormError::Missing("price"))?;

        Ok(CarInput {
            make,
            model,
            year,
            price,
            mileage: parse_number("mileage", &self.mileage)?,
            body_type: self.body_type.trim().to_string(),
            fuel_type: self.fuel_type.trim().to_string(),
            transmission: self.transmission.trim().to_string(),
            color: self.color.trim().to_string(),
            horsepower: parse_number("horsepower", &self.horsepower)?,
            engine_size: parse_decimal("engine_size", &self.engine_size)?,
            description: self.description.trim().to_string(),
            image_url: Some(self.image_url.trim())
                .filter(|url| !url.is_empty())
                .map(str::to_string),
        })
    }
}

fn required(field: &'static str, value: &str) -> FormResult<String> {
    let value = value.trim();
    if value.is_empty() {
        return Err(FormError::Missing(field));
    }
    Ok(value.to_string())
}

fn parse_number<T: FromStr>(field: &'static str, value: &str) -> FormResult<Option<T>> {
    let value = value.trim();
    if value.is_empty() {
        return Ok(None);
    }
    value
        .parse()
        .map(Some)
        .map_err(|_| FormError::InvalidNumber {
            field,
            value: value.to_string(),
        })
}

fn parse_decimal(field: &'static str, value: &str) -> FormResult<Option<f64>> {
    match parse_number::<f64>(field, value)? {
        Some(number) if !number.is_finite() => Err(FormError::InvalidNumber {
            field,
            value: value.trim().to_string(),
        }),
        parsed => Ok(parsed),
    }
}
