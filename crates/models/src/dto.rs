//! Data-transfer shapes used at the service boundary.
//!
//! Empty strings and `None` mean "not supplied": `patch` leaves those fields alone,
//! full replacement resets them to their defaults.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{beer, customer, errors::ModelError};

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct BeerDto {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<Uuid>,
    pub beer_name: String,
    pub beer_style: String,
    pub upc: String,
    pub price: Option<Decimal>,
    pub quantity_on_hand: Option<i32>,
    pub created_date: Option<DateTime<Utc>>,
    pub last_modified_date: Option<DateTime<Utc>>,
}

impl BeerDto {
    pub fn new(
        beer_name: impl Into<String>,
        beer_style: impl Into<String>,
        upc: impl Into<String>,
        price: Decimal,
        quantity_on_hand: i32,
    ) -> Self {
        Self {
            beer_name: beer_name.into(),
            beer_style: beer_style.into(),
            upc: upc.into(),
            price: Some(price),
            quantity_on_hand: Some(quantity_on_hand),
            ..Self::default()
        }
    }

    /// Only the name set; everything else "not supplied".
    pub fn named(beer_name: impl Into<String>) -> Self {
        Self { beer_name: beer_name.into(), ..Self::default() }
    }

    /// Rules for a complete document (save, full update).
    pub fn validate(&self) -> Result<(), ModelError> {
        beer::validate_beer_name(&self.beer_name)?;
        self.validate_supplied()
    }

    /// Upper limits and signs of the fields actually present (patch).
    pub fn validate_supplied(&self) -> Result<(), ModelError> {
        beer::validate_beer_name_max(&self.beer_name)?;
        beer::validate_beer_style(&self.beer_style)?;
        beer::validate_upc(&self.upc)?;
        if let Some(price) = self.price {
            beer::validate_price(price)?;
        }
        if let Some(qty) = self.quantity_on_hand {
            beer::validate_quantity_on_hand(qty)?;
        }
        Ok(())
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CustomerDto {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<Uuid>,
    pub customer_name: String,
    pub created_date: Option<DateTime<Utc>>,
    pub last_modified_date: Option<DateTime<Utc>>,
}

impl CustomerDto {
    pub fn new(customer_name: impl Into<String>) -> Self {
        Self { customer_name: customer_name.into(), ..Self::default() }
    }

    pub fn validate(&self) -> Result<(), ModelError> {
        customer::validate_customer_name(&self.customer_name)
    }

    pub fn validate_supplied(&self) -> Result<(), ModelError> {
        customer::validate_customer_name_max(&self.customer_name)
    }
}
