use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use crate::errors::ModelError;

/// Persisted beer record. A nil `id` means "not yet stored".
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "beer")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub beer_name: String,
    pub beer_style: String,
    pub upc: String,
    #[sea_orm(column_type = "Decimal(Some((19, 2)))")]
    pub price: Decimal,
    pub quantity_on_hand: i32,
    pub created_date: Option<DateTimeUtc>,
    pub last_modified_date: Option<DateTimeUtc>,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match *self {}
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn new(
        beer_name: impl Into<String>,
        beer_style: impl Into<String>,
        upc: impl Into<String>,
        price: Decimal,
        quantity_on_hand: i32,
    ) -> Self {
        Self {
            id: Uuid::nil(),
            beer_name: beer_name.into(),
            beer_style: beer_style.into(),
            upc: upc.into(),
            price,
            quantity_on_hand,
            created_date: None,
            last_modified_date: None,
        }
    }
}

pub const NAME_MIN: usize = 3;
pub const NAME_MAX: usize = 255;
pub const STYLE_MAX: usize = 255;
pub const UPC_MAX: usize = 25;

pub fn validate_beer_name(name: &str) -> Result<(), ModelError> {
    if name.trim().is_empty() {
        return Err(ModelError::Validation("beerName required".into()));
    }
    let len = name.chars().count();
    if !(NAME_MIN..=NAME_MAX).contains(&len) {
        return Err(ModelError::Validation(format!("beerName must be {NAME_MIN}..={NAME_MAX} characters")));
    }
    Ok(())
}

/// Upper bound only; patches may shorten a name below `NAME_MIN`.
pub fn validate_beer_name_max(name: &str) -> Result<(), ModelError> {
    if name.chars().count() > NAME_MAX {
        return Err(ModelError::Validation(format!("beerName must be at most {NAME_MAX} characters")));
    }
    Ok(())
}

pub fn validate_beer_style(style: &str) -> Result<(), ModelError> {
    if style.chars().count() > STYLE_MAX {
        return Err(ModelError::Validation(format!("beerStyle must be at most {STYLE_MAX} characters")));
    }
    Ok(())
}

pub fn validate_upc(upc: &str) -> Result<(), ModelError> {
    if upc.chars().count() > UPC_MAX {
        return Err(ModelError::Validation(format!("upc must be at most {UPC_MAX} characters")));
    }
    Ok(())
}

pub fn validate_price(price: Decimal) -> Result<(), ModelError> {
    if price < Decimal::ZERO {
        return Err(ModelError::Validation("price must not be negative".into()));
    }
    Ok(())
}

pub fn validate_quantity_on_hand(qty: i32) -> Result<(), ModelError> {
    if qty < 0 {
        return Err(ModelError::Validation("quantityOnHand must not be negative".into()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn name_bounds() {
        assert!(validate_beer_name("Galaxy Cat").is_ok());
        assert!(validate_beer_name("   ").is_err());
        assert!(validate_beer_name("ab").is_err());
        assert!(validate_beer_name(&"x".repeat(NAME_MAX + 1)).is_err());
        assert!(validate_beer_name_max("X").is_ok());
        assert!(validate_beer_name_max(&"x".repeat(NAME_MAX + 1)).is_err());
    }

    #[test]
    fn upc_and_style_limits() {
        assert!(validate_upc("12356").is_ok());
        assert!(validate_upc(&"1".repeat(UPC_MAX + 1)).is_err());
        assert!(validate_beer_style("").is_ok());
        assert!(validate_beer_style(&"s".repeat(STYLE_MAX + 1)).is_err());
    }

    #[test]
    fn numbers_must_not_be_negative() {
        assert!(validate_price(Decimal::new(1299, 2)).is_ok());
        assert!(validate_price(Decimal::ZERO).is_ok());
        assert!(validate_price(Decimal::new(-1, 2)).is_err());
        assert!(validate_quantity_on_hand(0).is_ok());
        assert!(validate_quantity_on_hand(-3).is_err());
    }

    #[test]
    fn new_record_has_no_identity() {
        let beer = Model::new("Crank", "Pale Ale", "12356222", Decimal::new(1199, 2), 392);
        assert!(beer.id.is_nil());
        assert!(beer.created_date.is_none());
        assert!(beer.last_modified_date.is_none());
    }
}
