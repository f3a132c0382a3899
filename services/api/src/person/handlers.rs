use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use uuid::Uuid;

use dossier_common::error::DossierError;

use crate::error::ApiError;
use crate::person::requests::{ListPersonsParams, PersonInput};
use crate::person::responses::PersonResponse;
use crate::AppState;

fn validate_input(input: &PersonInput) -> Result<(), DossierError> {
    for (field, value) in [
        ("name", &input.name),
        ("surname", &input.surname),
        ("patronymic", &input.patronymic),
    ] {
        if value.trim().is_empty() {
            return Err(DossierError::Validation(format!(
                "{field} must not be empty"
            )));
        }
    }
    Ok(())
}

pub async fn create_person(
    State(state): State<AppState>,
    body: Result<Json<PersonInput>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(input) = body?;
    validate_input(&input)?;

    let person = state.persons.create(input).await?;
    Ok((StatusCode::CREATED, Json(PersonResponse::from(person))))
}

pub async fn list_persons(
    State(state): State<AppState>,
    params: Result<Query<ListPersonsParams>, QueryRejection>,
) -> Result<Json<Vec<PersonResponse>>, ApiError> {
    let Query(params) = params?;

    let persons = state.persons.list(params.to_filter()).await?;
    Ok(Json(persons.into_iter().map(PersonResponse::from).collect()))
}

/// Full replacement of a person's names. The body is validated before
/// the record's existence is checked, so an invalid body yields 400
/// even for an unknown id.
pub async fn update_person(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    body: Result<Json<PersonInput>, JsonRejection>,
) -> Result<Json<PersonResponse>, ApiError> {
    let Json(input) = body?;
    validate_input(&input)?;

    let person = state.persons.update(id, input).await?;
    Ok(Json(PersonResponse::from(person)))
}

pub async fn delete_person(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    state.persons.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input(name: &str, surname: &str, patronymic: &str) -> PersonInput {
        PersonInput {
            name: name.to_string(),
            surname: surname.to_string(),
            patronymic: patronymic.to_string(),
        }
    }

    #[test]
    fn validate_input_accepts_filled_fields() {
        assert!(validate_input(&input("Dmitriy", "Ustinov", "Vasilevich")).is_ok());
    }

    #[test]
    fn validate_input_rejects_blank_fields() {
        let err = validate_input(&input("", "Ustinov", "Vasilevich")).unwrap_err();
        assert!(err.to_string().contains("name"), "got: {err}");

        let err = validate_input(&input("Dmitriy", "   ", "Vasilevich")).unwrap_err();
        assert!(err.to_string().contains("surname"), "got: {err}");

        let err = validate_input(&input("Dmitriy", "Ustinov", "")).unwrap_err();
        assert!(err.to_string().contains("patronymic"), "got: {err}");
    }
}
