use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A person record enriched with demographic estimates.
///
/// `age`, `gender` and `nationality` are filled in from the public
/// classification APIs before the record is stored. An API that knows
/// nothing about a name yields the zero value for its field (0 age,
/// empty string), which is stored as-is.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Person {
    pub id: Uuid,
    pub name: String,
    pub surname: String,
    pub patronymic: String,
    pub age: i32,
    pub gender: String,
    pub nationality: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct PersonFilter {
    pub name: Option<String>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}
