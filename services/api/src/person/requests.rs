use serde::Deserialize;

use dossier_db::person::models::PersonFilter;

#[derive(Debug, Deserialize)]
pub struct PersonInput {
    pub name: String,
    pub surname: String,
    pub patronymic: String,
}

#[derive(Debug, Deserialize)]
pub struct ListPersonsParams {
    pub name: Option<String>,
    pub page: Option<i64>,
    pub limit: Option<i64>,
}

impl ListPersonsParams {
    /// Translate page/limit paging into the repository's limit/offset
    /// form. Out-of-range values fall back to page 1 / limit 10, a
    /// blank name filter is treated as absent, and an offset too large
    /// for an i64 saturates instead of overflowing.
    pub fn to_filter(&self) -> PersonFilter {
        let page = self.page.unwrap_or(1).max(1);
        let limit = match self.limit {
            Some(l) if l >= 1 => l,
            _ => 10,
        };

        PersonFilter {
            name: self.name.clone().filter(|n| !n.is_empty()),
            limit: Some(limit),
            offset: Some((page - 1).saturating_mul(limit)),
        }
    }
}
