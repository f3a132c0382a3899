use async_trait::async_trait;
use uuid::Uuid;

use crate::person::models::{Person, PersonFilter};
use dossier_common::error::DossierResult;

#[async_trait]
pub trait PersonRepository: Send + Sync {
    async fn get_by_id(&self, id: Uuid) -> DossierResult<Option<Person>>;
    async fn create(&self, person: Person) -> DossierResult<Person>;

    /// Overwrite every mutable field of an existing record.
    /// Fails with `NotFound` if no row matches the id.
    async fn update(&self, person: Person) -> DossierResult<Person>;

    async fn delete(&self, id: Uuid) -> DossierResult<()>;
    async fn list(&self, filter: PersonFilter) -> DossierResult<Vec<Person>>;
}
