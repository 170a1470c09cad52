use serde::{Deserialize, Serialize};
use serde_json::{Map, Number, Value};

use crate::consts::consts::{EntityId, SEED_PERSON_AGE, SEED_PERSON_ID, SEED_PERSON_NAME};

/// Age is a number for every person written through the API. The seed record
/// is the exception and carries its age as text.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(untagged)]
pub enum Age {
    Number(Number),
    Text(String),
}

impl From<u64> for Age {
    fn from(value: u64) -> Self {
        Age::Number(Number::from(value))
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Person {
    pub id: EntityId,
    pub name: String,
    pub age: Age,
    pub hobbies: Vec<String>,
    /// Properties of the request body outside of the schema, stored verbatim
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Person {
    pub fn new(name: String, age: Age, hobbies: Vec<String>) -> Self {
        Person {
            id: EntityId::new(),
            name,
            age,
            hobbies,
            extra: Map::new(),
        }
    }

    /// The record every fresh database starts with
    pub fn seed() -> Self {
        Person {
            id: EntityId(SEED_PERSON_ID.to_string()),
            name: SEED_PERSON_NAME.to_string(),
            age: Age::Text(SEED_PERSON_AGE.to_string()),
            hobbies: vec![],
            extra: Map::new(),
        }
    }

    pub fn new_test() -> Self {
        Person {
            id: EntityId("test".to_string()),
            name: "Full Name".to_string(),
            age: Age::from(30),
            hobbies: vec!["chess".to_string()],
            extra: Map::new(),
        }
    }
}

/// Validated contents of a create / replace body, everything but the id
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct PersonFields {
    pub name: String,
    pub age: Number,
    pub hobbies: Vec<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl PersonFields {
    pub fn into_person(self, id: EntityId) -> Person {
        Person {
            id,
            name: self.name,
            age: Age::Number(self.age),
            hobbies: self.hobbies,
            extra: self.extra,
        }
    }
}
