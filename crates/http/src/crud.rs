use std::marker::PhantomData;

use async_trait::async_trait;
use cms_kernel::models::Id;
use cms_kernel::{Identified, Pagination, Resource};
use reqwest::Method;

use crate::client::ApiClient;
use crate::error::ApiError;

/// CRUD contract shared by every resource kind.
///
/// Failures are surfaced unmodified; nothing retries. `delete` performs no
/// confirmation of its own, callers ask first.
#[async_trait]
pub trait CrudService<R: Resource>: Send + Sync {
    async fn list(&self, page: Option<Pagination>) -> Result<Vec<R::Entity>, ApiError>;

    async fn get(&self, id: Id) -> Result<R::Entity, ApiError>;

    async fn create(&self, payload: &R::Create) -> Result<R::Entity, ApiError>;

    async fn update(&self, id: Id, changes: &R::Update) -> Result<R::Entity, ApiError>;

    async fn delete(&self, id: Id) -> Result<(), ApiError>;
}

/// [`CrudService`] over HTTP for resource kind `R`.
pub struct CrudClient<R> {
    api: ApiClient,
    _kind: PhantomData<fn() -> R>,
}

impl<R: Resource> CrudClient<R> {
    pub fn new(api: ApiClient) -> Self {
        Self {
            api,
            _kind: PhantomData,
        }
    }

    pub fn api(&self) -> &ApiClient {
        &self.api
    }
}

impl<R> Clone for CrudClient<R> {
    fn clone(&self) -> Self {
        Self {
            api: self.api.clone(),
            _kind: PhantomData,
        }
    }
}

#[async_trait]
impl<R: Resource> CrudService<R> for CrudClient<R> {
    async fn list(&self, page: Option<Pagination>) -> Result<Vec<R::Entity>, ApiError> {
        let items: Vec<R::Entity> = self
            .api
            .request(Method::GET, R::PATH)
            .map(|builder| match page {
                Some(page) => builder.query(&[("skip", page.skip), ("limit", page.limit)]),
                None => builder,
            })
            .json()
            .await?;
        tracing::debug!(resource = R::NAME, count = items.len(), "listed");
        Ok(items)
    }

    async fn get(&self, id: Id) -> Result<R::Entity, ApiError> {
        self.api
            .request(Method::GET, &R::item_path(id))
            .json()
            .await
    }

    async fn create(&self, payload: &R::Create) -> Result<R::Entity, ApiError> {
        let created: R::Entity = self
            .api
            .request(Method::POST, R::PATH)
            .map(|builder| builder.json(payload))
            .json()
            .await?;
        tracing::info!(resource = R::NAME, id = created.id(), "created");
        Ok(created)
    }

    async fn update(&self, id: Id, changes: &R::Update) -> Result<R::Entity, ApiError> {
        let updated: R::Entity = self
            .api
            .request(Method::PUT, &R::item_path(id))
            .map(|builder| builder.json(changes))
            .json()
            .await?;
        tracing::info!(resource = R::NAME, id, "updated");
        Ok(updated)
    }

    async fn delete(&self, id: Id) -> Result<(), ApiError> {
        self.api
            .request(Method::DELETE, &R::item_path(id))
            .send()
            .await?;
        tracing::info!(resource = R::NAME, id, "deleted");
        Ok(())
    }
}
