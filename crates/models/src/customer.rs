use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use crate::errors::ModelError;

/// Persisted customer record. A nil `id` means "not yet stored".
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "customer")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub customer_name: String,
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
    pub fn new(customer_name: impl Into<String>) -> Self {
        Self {
            id: Uuid::nil(),
            customer_name: customer_name.into(),
            created_date: None,
            last_modified_date: None,
        }
    }
}

pub const NAME_MIN: usize = 3;
pub const NAME_MAX: usize = 255;

pub fn validate_customer_name(name: &str) -> Result<(), ModelError> {
    if name.trim().is_empty() {
        return Err(ModelError::Validation("customerName required".into()));
    }
    let len = name.chars().count();
    if !(NAME_MIN..=NAME_MAX).contains(&len) {
        return Err(ModelError::Validation(format!("customerName must be {NAME_MIN}..={NAME_MAX} characters")));
    }
    Ok(())
}

pub fn validate_customer_name_max(name: &str) -> Result<(), ModelError> {
    if name.chars().count() > NAME_MAX {
        return Err(ModelError::Validation(format!("customerName must be at most {NAME_MAX} characters")));
    }
    Ok(())
}
