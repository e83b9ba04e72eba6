//! The record contract shared by every entity kind the CRUD service handles.
//!
//! Each kind decides what "replace" and "patch" mean for its own fields;
//! identity and timestamps are handled uniformly by the service.

use chrono::{DateTime, Utc};
use models::{beer, customer, errors::ModelError, BeerDto, CustomerDto};
use uuid::Uuid;

pub trait Document: Clone + Send + Sync + 'static {
    type Dto: Clone + Send + Sync + 'static;

    /// Entity name used in logs and `NotFound` messages.
    const KIND: &'static str;

    fn id(&self) -> Uuid;
    fn assign_id(&mut self, id: Uuid);
    /// Field matched by `find_first_by_name`.
    fn name(&self) -> &str;

    fn created_date(&self) -> Option<DateTime<Utc>>;
    fn set_created_date(&mut self, at: Option<DateTime<Utc>>);
    fn last_modified_date(&self) -> Option<DateTime<Utc>>;
    fn set_last_modified_date(&mut self, at: Option<DateTime<Utc>>);

    fn into_dto(self) -> Self::Dto;
    fn from_dto(dto: Self::Dto) -> Self;
    /// Identifier carried by a DTO; a nil UUID counts as absent.
    fn dto_id(dto: &Self::Dto) -> Option<Uuid>;

    fn validate(dto: &Self::Dto) -> Result<(), ModelError>;
    fn validate_patch(dto: &Self::Dto) -> Result<(), ModelError>;

    /// Overwrite every domain field; unsupplied values become defaults.
    fn replace_fields(&mut self, dto: &Self::Dto);
    /// Overwrite supplied fields only. Returns whether anything changed.
    fn patch_fields(&mut self, dto: &Self::Dto) -> bool;
}

fn patch_text(field: &mut String, value: &str) -> bool {
    if value.is_empty() || field == value {
        return false;
    }
    *field = value.to_string();
    true
}

fn patch_value<T: PartialEq + Copy>(field: &mut T, value: Option<T>) -> bool {
    match value {
        Some(v) if *field != v => {
            *field = v;
            true
        }
        _ => false,
    }
}

impl Document for beer::Model {
    type Dto = BeerDto;
    const KIND: &'static str = "beer";

    fn id(&self) -> Uuid { self.id }
    fn assign_id(&mut self, id: Uuid) { self.id = id; }
    fn name(&self) -> &str { &self.beer_name }

    fn created_date(&self) -> Option<DateTime<Utc>> { self.created_date }
    fn set_created_date(&mut self, at: Option<DateTime<Utc>>) { self.created_date = at; }
    fn last_modified_date(&self) -> Option<DateTime<Utc>> { self.last_modified_date }
    fn set_last_modified_date(&mut self, at: Option<DateTime<Utc>>) { self.last_modified_date = at; }

    fn into_dto(self) -> BeerDto { self.into() }
    fn from_dto(dto: BeerDto) -> Self { dto.into() }
    fn dto_id(dto: &BeerDto) -> Option<Uuid> { dto.id.filter(|id| !id.is_nil()) }

    fn validate(dto: &BeerDto) -> Result<(), ModelError> { dto.validate() }
    fn validate_patch(dto: &BeerDto) -> Result<(), ModelError> { dto.validate_supplied() }

    fn replace_fields(&mut self, dto: &BeerDto) {
        self.beer_name = dto.beer_name.clone();
        self.beer_style = dto.beer_style.clone();
        self.upc = dto.upc.clone();
        self.price = dto.price.unwrap_or_default();
        self.quantity_on_hand = dto.quantity_on_hand.unwrap_or_default();
    }

    fn patch_fields(&mut self, dto: &BeerDto) -> bool {
        // non-short-circuiting: every supplied field must be applied
        patch_text(&mut self.beer_name, &dto.beer_name)
            | patch_text(&mut self.beer_style, &dto.beer_style)
            | patch_text(&mut self.upc, &dto.upc)
            | patch_value(&mut self.price, dto.price)
            | patch_value(&mut self.quantity_on_hand, dto.quantity_on_hand)
    }
}

impl Document for customer::Model {
    type Dto = CustomerDto;
    const KIND: &'static str = "customer";

    fn id(&self) -> Uuid { self.id }
    fn assign_id(&mut self, id: Uuid) { self.id = id; }
    fn name(&self) -> &str { &self.customer_name }

    fn created_date(&self) -> Option<DateTime<Utc>> { self.created_date }
    fn set_created_date(&mut self, at: Option<DateTime<Utc>>) { self.created_date = at; }
    fn last_modified_date(&self) -> Option<DateTime<Utc>> { self.last_modified_date }
    fn set_last_modified_date(&mut self, at: Option<DateTime<Utc>>) { self.last_modified_date = at; }

    fn into_dto(self) -> CustomerDto { self.into() }
    fn from_dto(dto: CustomerDto) -> Self { dto.into() }
    fn dto_id(dto: &CustomerDto) -> Option<Uuid> { dto.id.filter(|id| !id.is_nil()) }

    fn validate(dto: &CustomerDto) -> Result<(), ModelError> { dto.validate() }
    fn validate_patch(dto: &CustomerDto) -> Result<(), ModelError> { dto.validate_supplied() }

    fn replace_fields(&mut self, dto: &CustomerDto) {
        self.customer_name = dto.customer_name.clone();
    }

    fn patch_fields(&mut self, dto: &CustomerDto) -> bool {
        patch_text(&mut self.customer_name, &dto.customer_name)
    }
}
