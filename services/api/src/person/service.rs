use uuid::Uuid;

use dossier_common::error::{DossierError, DossierResult};
use dossier_db::person::models::{Person, PersonFilter};
use dossier_db::person::repositories::PersonRepository;
use dossier_enrich::{enrich, Classifier};

use crate::person::requests::PersonInput;

/// Binds the classification pipeline to the record store.
///
/// A record reaches the store only after all three demographic lookups
/// succeed; a failed lookup discards the candidate and surfaces an
/// enrichment error. Update recomputes the demographics even when the
/// submitted names match the stored ones.
#[derive(Clone)]
pub struct PersonService<R, C> {
    repo: R,
    classifier: C,
}

impl<R: PersonRepository, C: Classifier> PersonService<R, C> {
    pub fn new(repo: R, classifier: C) -> Self {
        Self { repo, classifier }
    }

    pub async fn create(&self, input: PersonInput) -> DossierResult<Person> {
        let mut person = Person {
            id: Uuid::new_v4(),
            name: input.name,
            surname: input.surname,
            patronymic: input.patronymic,
            age: 0,
            gender: String::new(),
            nationality: String::new(),
        };

        self.classify(&mut person).await?;

        tracing::info!(
            person_id = %person.id,
            name = %person.name,
            age = person.age,
            gender = %person.gender,
            nationality = %person.nationality,
            "creating person"
        );
        self.repo.create(person).await.map_err(log_store_failure)
    }

    pub async fn update(&self, id: Uuid, input: PersonInput) -> DossierResult<Person> {
        let mut person = self
            .repo
            .get_by_id(id)
            .await
            .map_err(log_store_failure)?
            .ok_or_else(|| DossierError::NotFound(format!("person not found: {id}")))?;

        person.name = input.name;
        person.surname = input.surname;
        person.patronymic = input.patronymic;

        self.classify(&mut person).await?;

        tracing::info!(person_id = %person.id, name = %person.name, "updating person");
        self.repo.update(person).await.map_err(log_store_failure)
    }

    pub async fn delete(&self, id: Uuid) -> DossierResult<()> {
        tracing::info!(person_id = %id, "deleting person");
        self.repo.delete(id).await.map_err(log_store_failure)
    }

    pub async fn list(&self, filter: PersonFilter) -> DossierResult<Vec<Person>> {
        self.repo.list(filter).await.map_err(log_store_failure)
    }

    async fn classify(&self, person: &mut Person) -> DossierResult<()> {
        enrich(&self.classifier, person).await.map_err(|e| {
            tracing::error!(
                name = %person.name,
                dimension = %e.dimension,
                error = %e,
                "classification failed"
            );
            DossierError::Enrichment(e.to_string())
        })
    }
}

/// Logs database failures at error level. `NotFound` from updating or
/// deleting a missing row passes through silently.
fn log_store_failure(err: DossierError) -> DossierError {
    if matches!(err, DossierError::Database(_)) {
        tracing::error!(error = %err, "store operation failed");
    }
    err
}
