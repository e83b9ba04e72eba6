use service::{CrudService, DynBeerService, DynCustomerService, Stores};

/// Shared handler state; cloning only bumps the store reference counts.
#[derive(Clone)]
pub struct AppState {
    pub beers: DynBeerService,
    pub customers: DynCustomerService,
}

impl AppState {
    pub fn new(stores: &Stores) -> Self {
        Self {
            beers: CrudService::new(stores.beers.clone()),
            customers: CrudService::new(stores.customers.clone()),
        }
    }
}
