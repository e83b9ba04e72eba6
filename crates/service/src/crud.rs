use std::{marker::PhantomData, sync::Arc};

use futures_util::stream::{BoxStream, StreamExt, TryStreamExt};
use models::{beer, clock, customer, BeerDto};
use tracing::{debug, info, instrument};
use uuid::Uuid;

use crate::{
    document::Document,
    errors::ServiceError,
    repository::{BeerRepository, CustomerRepository, DocumentRepository},
};

/// Application service exposing the CRUD contract for one entity kind.
///
/// Stateless apart from the injected store handle; clones share that handle, so one
/// instance can serve any number of concurrent tasks. No locking happens here:
/// concurrent writes to the same id are last-write-wins at the store.
pub struct CrudService<D, R: ?Sized> {
    repo: Arc<R>,
    _doc: PhantomData<fn() -> D>,
}

pub type BeerService<R> = CrudService<beer::Model, R>;
pub type CustomerService<R> = CrudService<customer::Model, R>;

/// Services over runtime-selected backends.
pub type DynBeerService = BeerService<dyn BeerRepository>;
pub type DynCustomerService = CustomerService<dyn CustomerRepository>;

impl<D, R: ?Sized> Clone for CrudService<D, R> {
    fn clone(&self) -> Self {
        Self { repo: Arc::clone(&self.repo), _doc: PhantomData }
    }
}

impl<D, R> CrudService<D, R>
where
    D: Document,
    R: DocumentRepository<D> + ?Sized,
{
    pub fn new(repo: Arc<R>) -> Self { Self { repo, _doc: PhantomData } }

    pub fn repository(&self) -> &Arc<R> { &self.repo }

    /// Every document in store order. Nothing is read until the stream is polled.
    pub fn list_all(&self) -> BoxStream<'_, Result<D::Dto, ServiceError>> {
        self.repo.stream_all().map_ok(D::into_dto).boxed()
    }

    /// Insert when the DTO has no id, otherwise overwrite the existing document.
    #[instrument(skip_all, fields(kind = D::KIND))]
    pub async fn save(&self, dto: D::Dto) -> Result<D::Dto, ServiceError> {
        D::validate(&dto)?;
        match D::dto_id(&dto) {
            None => {
                let mut doc = D::from_dto(dto);
                doc.assign_id(Uuid::nil());
                let now = clock::now();
                doc.set_created_date(Some(now));
                doc.set_last_modified_date(Some(now));
                let saved = self.repo.save(doc).await?;
                info!(id = %saved.id(), "created");
                Ok(saved.into_dto())
            }
            Some(id) => {
                let existing = self.require(id).await?;
                let mut doc = D::from_dto(dto);
                doc.set_created_date(existing.created_date().or(doc.created_date()));
                doc.set_last_modified_date(Some(clock::advance(existing.last_modified_date())));
                let saved = self.repo.save(doc).await?;
                info!(%id, "overwritten");
                Ok(saved.into_dto())
            }
        }
    }

    /// `Ok(None)` when absent; absence is not an error.
    #[instrument(skip(self), fields(kind = D::KIND))]
    pub async fn get_by_id(&self, id: Uuid) -> Result<Option<D::Dto>, ServiceError> {
        Ok(self.repo.find_by_id(id).await?.map(D::into_dto))
    }

    /// Full replacement: fields the DTO leaves unset are reset to their defaults.
    #[instrument(skip(self, dto), fields(kind = D::KIND))]
    pub async fn update_by_id(&self, id: Uuid, dto: D::Dto) -> Result<D::Dto, ServiceError> {
        D::validate(&dto)?;
        let mut doc = self.require(id).await?;
        doc.replace_fields(&dto);
        doc.set_last_modified_date(Some(clock::advance(doc.last_modified_date())));
        let saved = self.repo.save(doc).await?;
        info!("updated");
        Ok(saved.into_dto())
    }

    /// Partial update: only supplied fields are written. An ineffective patch performs no write.
    #[instrument(skip(self, dto), fields(kind = D::KIND))]
    pub async fn patch_by_id(&self, id: Uuid, dto: D::Dto) -> Result<D::Dto, ServiceError> {
        D::validate_patch(&dto)?;
        let mut doc = self.require(id).await?;
        if !doc.patch_fields(&dto) {
            debug!("patch changed nothing");
            return Ok(doc.into_dto());
        }
        doc.set_last_modified_date(Some(clock::advance(doc.last_modified_date())));
        let saved = self.repo.save(doc).await?;
        info!("patched");
        Ok(saved.into_dto())
    }

    /// Idempotent: deleting an unknown id succeeds.
    #[instrument(skip(self), fields(kind = D::KIND))]
    pub async fn delete_by_id(&self, id: Uuid) -> Result<(), ServiceError> {
        let existed = self.repo.delete_by_id(id).await?;
        info!(existed, "deleted");
        Ok(())
    }

    #[instrument(skip(self), fields(kind = D::KIND))]
    pub async fn find_first_by_name(&self, name: &str) -> Result<Option<D::Dto>, ServiceError> {
        Ok(self.repo.find_first_by_name(name).await?.map(D::into_dto))
    }

    pub async fn count(&self) -> Result<u64, ServiceError> {
        self.repo.count().await
    }

    async fn require(&self, id: Uuid) -> Result<D, ServiceError> {
        self.repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| ServiceError::not_found(D::KIND))
    }
}

impl<R> CrudService<beer::Model, R>
where
    R: BeerRepository + ?Sized,
{
    /// Beers whose style matches exactly, in store order.
    pub fn find_by_style(&self, style: impl Into<String>) -> BoxStream<'_, Result<BeerDto, ServiceError>> {
        self.repo.stream_by_style(style.into()).map_ok(BeerDto::from).boxed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::JsonDocumentStore;
    use models::CustomerDto;
    use rust_decimal::Decimal;

    fn beer_service() -> BeerService<JsonDocumentStore<beer::Model>> {
        CrudService::new(JsonDocumentStore::in_memory())
    }

    fn customer_service() -> CustomerService<JsonDocumentStore<customer::Model>> {
        CrudService::new(JsonDocumentStore::in_memory())
    }

    fn galaxy_cat() -> BeerDto {
        BeerDto::new("Galaxy Cat", "Pale Ale", "12356", Decimal::new(1299, 2), 122)
    }

    #[tokio::test]
    async fn save_new_assigns_id_and_equal_timestamps() -> Result<(), anyhow::Error> {
        let svc = beer_service();
        let saved = svc.save(galaxy_cat()).await?;

        let id = saved.id.expect("id assigned");
        assert!(!id.is_nil());
        assert!(saved.created_date.is_some());
        assert_eq!(saved.created_date, saved.last_modified_date);

        let found = svc.find_first_by_name("Galaxy Cat").await?.expect("found by name");
        assert_eq!(found.id, Some(id));
        Ok(())
    }

    #[tokio::test]
    async fn save_then_get_returns_same_fields() -> Result<(), anyhow::Error> {
        let svc = beer_service();
        let input = galaxy_cat();
        let saved = svc.save(input.clone()).await?;
        let fetched = svc.get_by_id(saved.id.expect("id")).await?.expect("present");

        assert_eq!(fetched, saved);
        let stripped = BeerDto { id: None, created_date: None, last_modified_date: None, ..fetched };
        assert_eq!(stripped, input);
        Ok(())
    }

    #[tokio::test]
    async fn save_with_id_overwrites_and_keeps_created_date() -> Result<(), anyhow::Error> {
        let svc = customer_service();
        let saved = svc.save(CustomerDto::new("Space Dust")).await?;

        let mut changed = saved.clone();
        changed.customer_name = "New Customer Name".into();
        changed.created_date = None;
        let updated = svc.save(changed).await?;

        assert_eq!(updated.id, saved.id);
        assert_eq!(updated.created_date, saved.created_date);
        assert!(updated.last_modified_date > saved.last_modified_date);

        let fetched = svc.get_by_id(saved.id.expect("id")).await?.expect("present");
        assert_eq!(fetched.customer_name, "New Customer Name");
        assert_eq!(svc.count().await?, 1);
        Ok(())
    }

    #[tokio::test]
    async fn save_with_unknown_id_is_not_found() {
        let svc = customer_service();
        let dto = CustomerDto { id: Some(Uuid::new_v4()), ..CustomerDto::new("Ghost") };
        assert!(matches!(svc.save(dto).await, Err(ServiceError::NotFound(_))));
        assert_eq!(svc.count().await.expect("count"), 0);
    }

    #[tokio::test]
    async fn save_rejects_missing_name() {
        let svc = beer_service();
        let dto = BeerDto { beer_name: String::new(), ..galaxy_cat() };
        assert!(matches!(svc.save(dto).await, Err(ServiceError::Validation(_))));
    }

    #[tokio::test]
    async fn get_unknown_id_is_empty_not_error() -> Result<(), anyhow::Error> {
        let svc = beer_service();
        assert!(svc.get_by_id(Uuid::new_v4()).await?.is_none());
        Ok(())
    }

    #[tokio::test]
    async fn update_replaces_every_field() -> Result<(), anyhow::Error> {
        let svc = beer_service();
        let saved = svc.save(galaxy_cat()).await?;
        let id = saved.id.expect("id");

        let updated = svc.update_by_id(id, BeerDto::named("New Name")).await?;
        assert_eq!(updated.id, Some(id));

        let fetched = svc.get_by_id(id).await?.expect("present");
        assert_eq!(fetched.beer_name, "New Name");
        assert_eq!(fetched.price, Some(Decimal::ZERO));
        assert_eq!(fetched.quantity_on_hand, Some(0));
        assert_eq!(fetched.beer_style, "");
        assert_eq!(fetched.created_date, saved.created_date);
        assert!(fetched.last_modified_date > saved.last_modified_date);
        Ok(())
    }

    #[tokio::test]
    async fn update_unknown_id_is_not_found() {
        let svc = beer_service();
        let res = svc.update_by_id(Uuid::new_v4(), BeerDto::named("New Name")).await;
        assert!(matches!(res, Err(ServiceError::NotFound(_))));
    }

    #[tokio::test]
    async fn patch_changes_only_supplied_fields() -> Result<(), anyhow::Error> {
        let svc = beer_service();
        let saved = svc.save(galaxy_cat()).await?;
        let id = saved.id.expect("id");

        let patched = svc.patch_by_id(id, BeerDto::named("New Name")).await?;
        assert!(patched.last_modified_date > saved.last_modified_date);

        let fetched = svc.get_by_id(id).await?.expect("present");
        assert_eq!(fetched.beer_name, "New Name");
        assert_eq!(fetched.price, Some(Decimal::new(1299, 2)));
        assert_eq!(fetched.beer_style, "Pale Ale");
        assert_eq!(fetched.upc, "12356");
        assert_eq!(fetched.quantity_on_hand, Some(122));
        assert_eq!(fetched.created_date, saved.created_date);
        Ok(())
    }

    #[tokio::test]
    async fn patch_accepts_short_name_and_rejects_overlong() -> Result<(), anyhow::Error> {
        let svc = beer_service();
        let saved = svc.save(galaxy_cat()).await?;
        let id = saved.id.expect("id");

        svc.patch_by_id(id, BeerDto::named("X")).await?;
        let fetched = svc.get_by_id(id).await?.expect("present");
        assert_eq!(fetched.beer_name, "X");
        assert_eq!(fetched.price, Some(Decimal::new(1299, 2)));
        assert_eq!(fetched.beer_style, "Pale Ale");

        let res = svc.patch_by_id(id, BeerDto::named("x".repeat(256))).await;
        assert!(matches!(res, Err(ServiceError::Validation(_))));
        Ok(())
    }

    #[tokio::test]
    async fn ineffective_patch_keeps_last_modified() -> Result<(), anyhow::Error> {
        let svc = beer_service();
        let saved = svc.save(galaxy_cat()).await?;
        let id = saved.id.expect("id");

        let same = svc.patch_by_id(id, BeerDto::named("Galaxy Cat")).await?;
        assert_eq!(same.last_modified_date, saved.last_modified_date);
        let empty = svc.patch_by_id(id, BeerDto::default()).await?;
        assert_eq!(empty, saved);
        Ok(())
    }

    #[tokio::test]
    async fn patch_unknown_id_is_not_found() {
        let svc = customer_service();
        let res = svc.patch_by_id(Uuid::new_v4(), CustomerDto::new("Nobody")).await;
        assert!(matches!(res, Err(ServiceError::NotFound(_))));
    }

    #[tokio::test]
    async fn delete_is_idempotent() -> Result<(), anyhow::Error> {
        let svc = customer_service();
        let saved = svc.save(CustomerDto::new("Space Dust")).await?;
        let id = saved.id.expect("id");

        svc.delete_by_id(id).await?;
        assert!(svc.get_by_id(id).await?.is_none());
        svc.delete_by_id(id).await?;
        svc.delete_by_id(Uuid::new_v4()).await?;
        Ok(())
    }

    #[tokio::test]
    async fn list_all_and_style_filter() -> Result<(), anyhow::Error> {
        let svc = beer_service();
        svc.save(galaxy_cat()).await?;
        svc.save(BeerDto::new("Sunshine City", "IPA", "12356", Decimal::new(1399, 2), 144)).await?;

        let all: Vec<BeerDto> = svc.list_all().try_collect().await?;
        assert_eq!(all.len(), 2);
        assert!(all.iter().all(|b| b.id.is_some()));

        let ipas: Vec<BeerDto> = svc.find_by_style("IPA").try_collect().await?;
        assert_eq!(ipas.len(), 1);
        assert_eq!(ipas[0].beer_name, "Sunshine City");
        Ok(())
    }

    #[tokio::test]
    async fn dyn_service_shares_store_across_tasks() -> Result<(), anyhow::Error> {
        let repo: Arc<dyn CustomerRepository> = JsonDocumentStore::<customer::Model>::in_memory();
        let svc: DynCustomerService = CrudService::new(repo);

        let mut handles = Vec::new();
        for i in 0..8 {
            let svc = svc.clone();
            handles.push(tokio::spawn(async move { svc.save(CustomerDto::new(format!("Customer {i}"))).await }));
        }
        for h in handles {
            h.await??;
        }
        assert_eq!(svc.count().await?, 8);
        Ok(())
    }
}
