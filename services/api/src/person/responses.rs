use serde::Serialize;
use uuid::Uuid;

use dossier_db::person::models::Person;

#[derive(Debug, Serialize)]
pub struct PersonResponse {
    pub id: Uuid,
    pub name: String,
    pub surname: String,
    pub patronymic: String,
    pub age: i32,
    pub gender: String,
    pub nationality: String,
}

impl From<Person> for PersonResponse {
    fn from(person: Person) -> Self {
        Self {
            id: person.id,
            name: person.name,
            surname: person.surname,
            patronymic: person.patronymic,
            age: person.age,
            gender: person.gender,
            nationality: person.nationality,
        }
    }
}
