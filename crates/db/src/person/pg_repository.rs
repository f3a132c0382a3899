use async_trait::async_trait;
use sqlx::{postgres::PgRow, PgPool, QueryBuilder, Row};
use uuid::Uuid;

use crate::person::models::{Person, PersonFilter};
use crate::person::repositories::PersonRepository;
use dossier_common::error::{DossierError, DossierResult};

#[derive(Clone)]
pub struct PgPersonRepository {
    pool: PgPool,
}

impl PgPersonRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn map_person_row(row: PgRow) -> Person {
        Person {
            id: row.get("id"),
            name: row.get("name"),
            surname: row.get("surname"),
            patronymic: row.get("patronymic"),
            age: row.get("age"),
            gender: row.get("gender"),
            nationality: row.get("nationality"),
        }
    }
}

#[async_trait]
impl PersonRepository for PgPersonRepository {
    async fn get_by_id(&self, id: Uuid) -> DossierResult<Option<Person>> {
        let row = sqlx::query(
            "select id, name, surname, patronymic, age, gender, nationality
             from persons where id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DossierError::Database(e.to_string()))?;

        Ok(row.map(Self::map_person_row))
    }

    async fn create(&self, person: Person) -> DossierResult<Person> {
        sqlx::query(
            "insert into persons (id, name, surname, patronymic, age, gender, nationality)
             values ($1, $2, $3, $4, $5, $6, $7)",
        )
        .bind(person.id)
        .bind(&person.name)
        .bind(&person.surname)
        .bind(&person.patronymic)
        .bind(person.age)
        .bind(&person.gender)
        .bind(&person.nationality)
        .execute(&self.pool)
        .await
        .map_err(|e| DossierError::Database(e.to_string()))?;

        Ok(person)
    }

    async fn update(&self, person: Person) -> DossierResult<Person> {
        let update_result = sqlx::query(
            "update persons
             set name = $1, surname = $2, patronymic = $3, age = $4, gender = $5, nationality = $6
             where id = $7",
        )
        .bind(&person.name)
        .bind(&person.surname)
        .bind(&person.patronymic)
        .bind(person.age)
        .bind(&person.gender)
        .bind(&person.nationality)
        .bind(person.id)
        .execute(&self.pool)
        .await
        .map_err(|e| DossierError::Database(e.to_string()))?;

        if update_result.rows_affected() == 0 {
            return Err(DossierError::NotFound(format!(
                "person not found: {}",
                person.id
            )));
        }

        Ok(person)
    }

    async fn delete(&self, id: Uuid) -> DossierResult<()> {
        let delete_result = sqlx::query("delete from persons where id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| DossierError::Database(e.to_string()))?;

        if delete_result.rows_affected() == 0 {
            return Err(DossierError::NotFound(format!("person not found: {id}")));
        }

        Ok(())
    }

    async fn list(&self, filter: PersonFilter) -> DossierResult<Vec<Person>> {
        let mut qb = QueryBuilder::new(
            "select id, name, surname, patronymic, age, gender, nationality from persons",
        );

        if let Some(name) = filter.name {
            qb.push(" where name = ").push_bind(name);
        }

        // Deterministic order so offset pagination returns stable pages.
        qb.push(" order by id");
        qb.push(" limit ").push_bind(filter.limit.unwrap_or(50));
        qb.push(" offset ").push_bind(filter.offset.unwrap_or(0));

        let rows = qb
            .build()
            .fetch_all(&self.pool)
            .await
            .map_err(|e| DossierError::Database(e.to_string()))?;

        Ok(rows.into_iter().map(Self::map_person_row).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{create_pool, ensure_schema};

    // ── Fixture helpers ──────────────────────────────────────────

    // All tests share one database, so every test isolates itself by
    // generating names no other test uses.

    async fn test_repo() -> Option<(PgPersonRepository, PgPool)> {
        let url = std::env::var("TEST_DATABASE_URL").ok()?;
        let pool = create_pool(&url).await.expect("db should connect");
        ensure_schema(&pool).await.expect("schema should apply");
        Some((PgPersonRepository::new(pool.clone()), pool))
    }

    fn unique_name(prefix: &str) -> String {
        format!("{prefix}-{}", Uuid::new_v4())
    }

    fn sample_person(name: &str) -> Person {
        Person {
            id: Uuid::new_v4(),
            name: name.to_owned(),
            surname: "Ustinov".to_owned(),
            patronymic: "Vasilevich".to_owned(),
            age: 30,
            gender: "male".to_owned(),
            nationality: "RU".to_owned(),
        }
    }

    async fn insert_person(pool: &PgPool, name: &str) -> Person {
        let person = sample_person(name);
        sqlx::query(
            "insert into persons (id, name, surname, patronymic, age, gender, nationality) \
             values ($1, $2, $3, $4, $5, $6, $7)",
        )
        .bind(person.id)
        .bind(&person.name)
        .bind(&person.surname)
        .bind(&person.patronymic)
        .bind(person.age)
        .bind(&person.gender)
        .bind(&person.nationality)
        .execute(pool)
        .await
        .expect("insert person");
        person
    }

    // ── create / get_by_id ───────────────────────────────────────

    #[tokio::test]
    async fn create_then_get_by_id_roundtrip() {
        let (repo, _pool) = match test_repo().await {
            Some(r) => r,
            None => return,
        };
        let person = sample_person(&unique_name("create"));
        let id = person.id;

        repo.create(person.clone()).await.expect("create should succeed");

        let fetched = repo
            .get_by_id(id)
            .await
            .expect("get should succeed")
            .expect("person should exist");

        assert_eq!(fetched.name, person.name);
        assert_eq!(fetched.surname, "Ustinov");
        assert_eq!(fetched.patronymic, "Vasilevich");
        assert_eq!(fetched.age, 30);
        assert_eq!(fetched.gender, "male");
        assert_eq!(fetched.nationality, "RU");
    }

    #[tokio::test]
    async fn get_by_id_returns_none_for_unknown_id() {
        let (repo, _pool) = match test_repo().await {
            Some(r) => r,
            None => return,
        };
        let result = repo.get_by_id(Uuid::new_v4()).await.expect("query should succeed");
        assert!(result.is_none());
    }

    // ── update ───────────────────────────────────────────────────

    #[tokio::test]
    async fn update_overwrites_all_fields() {
        let (repo, pool) = match test_repo().await {
            Some(r) => r,
            None => return,
        };
        let original = insert_person(&pool, &unique_name("update")).await;

        let changed = Person {
            id: original.id,
            name: unique_name("renamed"),
            surname: "Sergeev".to_owned(),
            patronymic: String::new(),
            age: 41,
            gender: "female".to_owned(),
            nationality: "UA".to_owned(),
        };
        repo.update(changed.clone()).await.expect("update should succeed");

        let fetched = repo
            .get_by_id(original.id)
            .await
            .expect("get should succeed")
            .expect("person should exist");

        assert_eq!(fetched.name, changed.name);
        assert_eq!(fetched.surname, "Sergeev");
        assert_eq!(fetched.patronymic, "");
        assert_eq!(fetched.age, 41);
        assert_eq!(fetched.gender, "female");
        assert_eq!(fetched.nationality, "UA");
    }

    #[tokio::test]
    async fn update_not_found_for_unknown_id() {
        let (repo, _pool) = match test_repo().await {
            Some(r) => r,
            None => return,
        };
        let result = repo.update(sample_person(&unique_name("ghost"))).await;
        assert!(matches!(result, Err(DossierError::NotFound(_))));
    }

    // ── delete ───────────────────────────────────────────────────

    #[tokio::test]
    async fn delete_removes_row() {
        let (repo, pool) = match test_repo().await {
            Some(r) => r,
            None => return,
        };
        let person = insert_person(&pool, &unique_name("delete")).await;

        repo.delete(person.id).await.expect("delete should succeed");

        let result = repo.get_by_id(person.id).await.expect("query should succeed");
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn delete_not_found_for_unknown_id() {
        let (repo, _pool) = match test_repo().await {
            Some(r) => r,
            None => return,
        };
        let result = repo.delete(Uuid::new_v4()).await;
        assert!(matches!(result, Err(DossierError::NotFound(_))));
    }

    // ── list ─────────────────────────────────────────────────────

    #[tokio::test]
    async fn list_filters_by_exact_name() {
        let (repo, pool) = match test_repo().await {
            Some(r) => r,
            None => return,
        };
        let shared = unique_name("shared");
        insert_person(&pool, &shared).await;
        insert_person(&pool, &shared).await;
        insert_person(&pool, &unique_name("other")).await;

        let filter = PersonFilter {
            name: Some(shared.clone()),
            ..Default::default()
        };
        let results = repo.list(filter).await.expect("list should succeed");

        assert_eq!(results.len(), 2);
        assert!(results.iter().all(|p| p.name == shared));
    }

    #[tokio::test]
    async fn list_returns_empty_for_unmatched_name() {
        let (repo, _pool) = match test_repo().await {
            Some(r) => r,
            None => return,
        };
        let filter = PersonFilter {
            name: Some(unique_name("nobody")),
            ..Default::default()
        };
        let results = repo.list(filter).await.expect("list should succeed");
        assert!(results.is_empty());
    }

    #[tokio::test]
    async fn list_respects_limit_and_offset() {
        let (repo, pool) = match test_repo().await {
            Some(r) => r,
            None => return,
        };
        let shared = unique_name("paged");
        for _ in 0..3 {
            insert_person(&pool, &shared).await;
        }

        let filter = PersonFilter {
            name: Some(shared.clone()),
            limit: Some(2),
            ..Default::default()
        };
        let first_page = repo.list(filter).await.expect("list should succeed");
        assert_eq!(first_page.len(), 2);

        let filter = PersonFilter {
            name: Some(shared.clone()),
            limit: Some(2),
            offset: Some(2),
        };
        let second_page = repo.list(filter).await.expect("list should succeed");
        assert_eq!(second_page.len(), 1);

        // Pages must not overlap under the stable ordering.
        assert!(first_page.iter().all(|p| p.id != second_page[0].id));
    }
}
