use std::fmt;

use async_trait::async_trait;

use crate::client::ClassifyError;
use dossier_db::person::models::Person;

/// One demographic estimate. Lookups always run in declaration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dimension {
    Age,
    Gender,
    Nationality,
}

impl Dimension {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Age => "age",
            Self::Gender => "gender",
            Self::Nationality => "nationality",
        }
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, thiserror::Error)]
#[error("classifying {dimension} failed: {source}")]
pub struct EnrichError {
    pub dimension: Dimension,
    #[source]
    pub source: ClassifyError,
}

/// Source of demographic estimates for a first name.
#[async_trait]
pub trait Classifier: Send + Sync {
    async fn age_for(&self, name: &str) -> Result<i32, ClassifyError>;
    async fn gender_for(&self, name: &str) -> Result<String, ClassifyError>;
    async fn nationality_for(&self, name: &str) -> Result<String, ClassifyError>;
}

/// Fill in `age`, `gender` and `nationality` for `person.name`.
///
/// Lookups run sequentially (age, then gender, then nationality) and
/// the first failure aborts the pass. On error the person is left
/// exactly as it was; results are only assigned once all three
/// lookups have succeeded.
pub async fn enrich<C: Classifier>(classifier: &C, person: &mut Person) -> Result<(), EnrichError> {
    let age = classifier
        .age_for(&person.name)
        .await
        .map_err(|source| EnrichError {
            dimension: Dimension::Age,
            source,
        })?;

    let gender = classifier
        .gender_for(&person.name)
        .await
        .map_err(|source| EnrichError {
            dimension: Dimension::Gender,
            source,
        })?;

    let nationality = classifier
        .nationality_for(&person.name)
        .await
        .map_err(|source| EnrichError {
            dimension: Dimension::Nationality,
            source,
        })?;

    person.age = age;
    person.gender = gender;
    person.nationality = nationality;

    Ok(())
}
