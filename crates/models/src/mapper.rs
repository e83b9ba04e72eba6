//! Record <-> DTO mapping. Pure structural copies; no validation happens here.

use uuid::Uuid;

use crate::{beer, customer, dto::{BeerDto, CustomerDto}};

fn non_nil(id: Uuid) -> Option<Uuid> {
    (!id.is_nil()).then_some(id)
}

impl From<beer::Model> for BeerDto {
    fn from(m: beer::Model) -> Self {
        Self {
            id: non_nil(m.id),
            beer_name: m.beer_name,
            beer_style: m.beer_style,
            upc: m.upc,
            price: Some(m.price),
            quantity_on_hand: Some(m.quantity_on_hand),
            created_date: m.created_date,
            last_modified_date: m.last_modified_date,
        }
    }
}

impl From<BeerDto> for beer::Model {
    fn from(d: BeerDto) -> Self {
        Self {
            id: d.id.unwrap_or_else(Uuid::nil),
            beer_name: d.beer_name,
            beer_style: d.beer_style,
            upc: d.upc,
            price: d.price.unwrap_or_default(),
            quantity_on_hand: d.quantity_on_hand.unwrap_or_default(),
            created_date: d.created_date,
            last_modified_date: d.last_modified_date,
        }
    }
}

impl From<customer::Model> for CustomerDto {
    fn from(m: customer::Model) -> Self {
        Self {
            id: non_nil(m.id),
            customer_name: m.customer_name,
            created_date: m.created_date,
            last_modified_date: m.last_modified_date,
        }
    }
}

impl From<CustomerDto> for customer::Model {
    fn from(d: CustomerDto) -> Self {
        Self {
            id: d.id.unwrap_or_else(Uuid::nil),
            customer_name: d.customer_name,
            created_date: d.created_date,
            last_modified_date: d.last_modified_date,
        }
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;

    use super::*;
    use crate::clock;

    fn stored_beer() -> beer::Model {
        let now = clock::now();
        beer::Model {
            id: Uuid::new_v4(),
            created_date: Some(now),
            last_modified_date: Some(now),
            ..beer::Model::new("Sunshine City", "IPA", "12356", Decimal::new(1399, 2), 144)
        }
    }

    #[test]
    fn record_survives_dto_round_trip() {
        let record = stored_beer();
        let back = beer::Model::from(BeerDto::from(record.clone()));
        assert_eq!(back, record);
    }

    #[test]
    fn dto_without_id_maps_to_nil_id() {
        let record = beer::Model::from(BeerDto::named("Galaxy Cat"));
        assert!(record.id.is_nil());
        assert_eq!(record.price, Decimal::ZERO);
        assert_eq!(record.quantity_on_hand, 0);
        assert!(BeerDto::from(record).id.is_none());
    }

    #[test]
    fn customer_round_trip() {
        let record = customer::Model { id: Uuid::new_v4(), ..customer::Model::new("Pepe") };
        let dto = CustomerDto::from(record.clone());
        assert_eq!(dto.id, Some(record.id));
        assert_eq!(customer::Model::from(dto), record);
    }
}
