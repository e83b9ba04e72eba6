use std::{path::PathBuf, sync::Arc};

use async_trait::async_trait;
use futures_util::stream::{self, BoxStream, StreamExt};
use indexmap::IndexMap;
use models::beer;
use serde::{de::DeserializeOwned, Serialize};
use tokio::{fs, sync::RwLock};
use tracing::{debug, info};
use uuid::Uuid;

use crate::{
    document::Document,
    errors::ServiceError,
    repository::{BeerRepository, DocumentRepository},
};

/// Insertion-ordered document collection keyed by id.
///
/// With a file path every write rewrites the file as a JSON array while the write lock
/// is held. Writes are applied to a copy that replaces the live map only after the file
/// write succeeds, so a failed write leaves both memory and file unchanged. Without a
/// path the collection lives in memory only.
pub struct JsonDocumentStore<D> {
    inner: RwLock<IndexMap<Uuid, D>>,
    file_path: Option<PathBuf>,
}

impl<D> JsonDocumentStore<D>
where
    D: Document + Serialize + DeserializeOwned,
{
    pub fn in_memory() -> Arc<Self> {
        Arc::new(Self { inner: RwLock::new(IndexMap::new()), file_path: None })
    }

    /// Open the collection at `path`. Creates the file with an empty array if missing.
    pub async fn open<P: Into<PathBuf>>(path: P) -> Result<Arc<Self>, ServiceError> {
        let file_path = path.into();
        if let Some(parent) = file_path.parent() {
            fs::create_dir_all(parent).await.map_err(ServiceError::store)?;
        }

        let docs: Vec<D> = match fs::read(&file_path).await {
            Ok(bytes) if bytes.is_empty() => Vec::new(),
            Ok(bytes) => serde_json::from_slice(&bytes).map_err(ServiceError::store)?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                fs::write(&file_path, b"[]").await.map_err(ServiceError::store)?;
                Vec::new()
            }
            Err(e) => return Err(ServiceError::store(e)),
        };
        info!(kind = D::KIND, path = %file_path.display(), count = docs.len(), "document collection opened");

        let map = docs.into_iter().map(|d| (d.id(), d)).collect();
        Ok(Arc::new(Self { inner: RwLock::new(map), file_path: Some(file_path) }))
    }

    async fn persist(&self, map: &IndexMap<Uuid, D>) -> Result<(), ServiceError> {
        let Some(path) = &self.file_path else { return Ok(()) };
        let docs: Vec<&D> = map.values().collect();
        let data = serde_json::to_vec_pretty(&docs).map_err(ServiceError::store)?;
        fs::write(path, data).await.map_err(ServiceError::store)?;
        Ok(())
    }

    /// Point-in-time copy of every document, in insertion order.
    pub async fn snapshot(&self) -> Vec<D> {
        let map = self.inner.read().await;
        map.values().cloned().collect()
    }
}

#[async_trait]
impl<D> DocumentRepository<D> for JsonDocumentStore<D>
where
    D: Document + Serialize + DeserializeOwned,
{
    async fn save(&self, mut doc: D) -> Result<D, ServiceError> {
        if doc.id().is_nil() {
            doc.assign_id(Uuid::new_v4());
        }
        let mut map = self.inner.write().await;
        let mut next = map.clone();
        next.insert(doc.id(), doc.clone());
        self.persist(&next).await?;
        *map = next;
        debug!(kind = D::KIND, id = %doc.id(), "document stored");
        Ok(doc)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<D>, ServiceError> {
        let map = self.inner.read().await;
        Ok(map.get(&id).cloned())
    }

    fn stream_all(&self) -> BoxStream<'_, Result<D, ServiceError>> {
        stream::once(self.snapshot())
            .flat_map(|docs| stream::iter(docs.into_iter().map(Ok)))
            .boxed()
    }

    async fn find_first_by_name(&self, name: &str) -> Result<Option<D>, ServiceError> {
        let map = self.inner.read().await;
        Ok(map.values().find(|d| d.name() == name).cloned())
    }

    async fn delete_by_id(&self, id: Uuid) -> Result<bool, ServiceError> {
        let mut map = self.inner.write().await;
        if !map.contains_key(&id) {
            return Ok(false);
        }
        let mut next = map.clone();
        next.shift_remove(&id);
        self.persist(&next).await?;
        *map = next;
        Ok(true)
    }

    async fn delete_all(&self) -> Result<u64, ServiceError> {
        let mut map = self.inner.write().await;
        let removed = map.len() as u64;
        self.persist(&IndexMap::new()).await?;
        map.clear();
        Ok(removed)
    }

    async fn count(&self) -> Result<u64, ServiceError> {
        Ok(self.inner.read().await.len() as u64)
    }
}

impl BeerRepository for JsonDocumentStore<beer::Model> {
    fn stream_by_style(&self, style: String) -> BoxStream<'_, Result<beer::Model, ServiceError>> {
        stream::once(self.snapshot())
            .flat_map(move |docs| {
                let matching: Vec<_> = docs.into_iter().filter(|b| b.beer_style == style).collect();
                stream::iter(matching.into_iter().map(Ok))
            })
            .boxed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures_util::TryStreamExt;
    use models::customer;
    use rust_decimal::Decimal;

    #[tokio::test]
    async fn document_store_crud_persists() -> Result<(), anyhow::Error> {
        let tmp = std::env::temp_dir().join(format!("document_store_{}.json", Uuid::new_v4()));
        let store = JsonDocumentStore::<customer::Model>::open(&tmp).await?;

        // initially empty
        assert_eq!(store.count().await?, 0);

        let miguel = store.save(customer::Model::new("Miguel")).await?;
        let pepe = store.save(customer::Model::new("Pepe")).await?;
        assert!(!miguel.id.is_nil());
        assert_ne!(miguel.id, pepe.id);

        // replace keeps the position
        let mut renamed = miguel.clone();
        renamed.customer_name = "Miguel Angel".into();
        store.save(renamed).await?;

        assert!(store.delete_by_id(pepe.id).await?);
        assert!(!store.delete_by_id(pepe.id).await?);

        // reload from disk
        let reloaded = JsonDocumentStore::<customer::Model>::open(&tmp).await?;
        let docs = reloaded.snapshot().await;
        assert_eq!(docs.len(), 1);
        assert_eq!(docs[0].id, miguel.id);
        assert_eq!(docs[0].customer_name, "Miguel Angel");

        let _ = tokio::fs::remove_file(&tmp).await;
        Ok(())
    }

    #[tokio::test]
    async fn failed_write_leaves_collection_unchanged() -> Result<(), anyhow::Error> {
        let tmp = std::env::temp_dir().join(format!("document_store_{}.json", Uuid::new_v4()));
        let store = JsonDocumentStore::<customer::Model>::open(&tmp).await?;
        let maria = store.save(customer::Model::new("Maria")).await?;

        // a directory at the file path makes every write fail
        tokio::fs::remove_file(&tmp).await?;
        tokio::fs::create_dir(&tmp).await?;

        let res = store.save(customer::Model::new("Ghost")).await;
        assert!(matches!(res, Err(ServiceError::StoreUnavailable(_))));
        assert_eq!(store.count().await?, 1);
        assert!(store.find_first_by_name("Ghost").await?.is_none());

        assert!(store.delete_by_id(maria.id).await.is_err());
        assert!(store.delete_all().await.is_err());
        assert_eq!(store.find_by_id(maria.id).await?.map(|c| c.customer_name), Some("Maria".to_string()));

        let _ = tokio::fs::remove_dir_all(&tmp).await;
        Ok(())
    }

    #[tokio::test]
    async fn stream_is_lazy_and_in_insertion_order() -> Result<(), anyhow::Error> {
        let store = JsonDocumentStore::<customer::Model>::in_memory();
        for name in ["Miguel", "Pepe", "Maria"] {
            store.save(customer::Model::new(name)).await?;
        }

        let stream = store.stream_all();
        // written after the stream was created but before it was polled
        store.save(customer::Model::new("Late")).await?;
        let names: Vec<String> = stream.map_ok(|c| c.customer_name).try_collect().await?;
        assert_eq!(names, ["Miguel", "Pepe", "Maria", "Late"]);
        Ok(())
    }

    #[tokio::test]
    async fn first_by_name_is_exact_and_ordered() -> Result<(), anyhow::Error> {
        let store = JsonDocumentStore::<customer::Model>::in_memory();
        let first = store.save(customer::Model::new("Maria")).await?;
        store.save(customer::Model::new("Maria")).await?;

        assert_eq!(store.find_first_by_name("Maria").await?.map(|c| c.id), Some(first.id));
        assert!(store.find_first_by_name("maria").await?.is_none());
        Ok(())
    }

    #[tokio::test]
    async fn style_filter() -> Result<(), anyhow::Error> {
        let store = JsonDocumentStore::<beer::Model>::in_memory();
        store.save(beer::Model::new("Galaxy Cat", "Pale Ale", "12356", Decimal::new(1299, 2), 122)).await?;
        store.save(beer::Model::new("Sunshine City", "IPA", "12356", Decimal::new(1399, 2), 144)).await?;

        let ipas: Vec<beer::Model> = store.stream_by_style("IPA".into()).try_collect().await?;
        assert_eq!(ipas.len(), 1);
        assert_eq!(ipas[0].beer_name, "Sunshine City");
        Ok(())
    }

    #[test]
    fn delete_all_clears_collection() {
        tokio_test::block_on(async {
            let store = JsonDocumentStore::<customer::Model>::in_memory();
            store.save(customer::Model::new("Pepe")).await.expect("save");
            assert_eq!(store.delete_all().await.expect("delete"), 1);
            assert_eq!(store.count().await.expect("count"), 0);
        });
    }
}
