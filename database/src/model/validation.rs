use serde_json::{Map, Number, Value};
use thiserror::Error;

use super::person::PersonFields;

const NAME: &str = "name";
const AGE: &str = "age";
const HOBBIES: &str = "hobbies";
/// Ids are assigned by the database, a body may never carry one
const DISALLOWED_KEYS: [&str; 1] = ["id"];

/// A single broken rule of the person schema
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Violation {
    #[error("\"value\" must be of type object")]
    NotAnObject,

    #[error("\"{0}\" is required")]
    Required(&'static str),

    #[error("\"{0}\" must be a string")]
    NotAString(&'static str),

    #[error("\"{0}\" is not allowed to be empty")]
    Empty(&'static str),

    #[error("\"{0}\" must be a number")]
    NotANumber(&'static str),

    #[error("\"{0}\" must be an array")]
    NotAnArray(&'static str),

    #[error("\"{key}[{index}]\" must be a string")]
    ItemNotAString { key: &'static str, index: usize },

    #[error("\"{0}\" is not allowed")]
    NotAllowed(String),
}

/// Every rule the body broke, in the order the schema checks them
#[derive(Error, Debug, Clone, PartialEq)]
#[error("{}", .0.first().map(ToString::to_string).unwrap_or_default())]
pub struct ValidationErrors(pub Vec<Violation>);

impl ValidationErrors {
    pub fn violations(&self) -> &[Violation] {
        &self.0
    }

    /// Message of the first broken rule, this is what gets reported to a client
    pub fn first_message(&self) -> String {
        self.to_string()
    }
}

/// Checks a create / replace body against the person schema
///
/// Rules run in schema order (`name`, `age`, `hobbies`) followed by the
/// disallowed keys. Properties the schema does not know about are kept in
/// `PersonFields::extra`.
pub fn validate_person(body: Value) -> Result<PersonFields, ValidationErrors> {
    let mut object = match body {
        Value::Object(object) => object,
        _ => return Err(ValidationErrors(vec![Violation::NotAnObject])),
    };

    let mut violations = vec![];

    let name = check_name(object.remove(NAME), &mut violations);
    let age = check_age(object.remove(AGE), &mut violations);
    let hobbies = check_hobbies(object.remove(HOBBIES), &mut violations);

    for key in DISALLOWED_KEYS {
        if object.contains_key(key) {
            violations.push(Violation::NotAllowed(key.to_string()));
        }
    }

    match (name, age, hobbies) {
        (Some(name), Some(age), Some(hobbies)) if violations.is_empty() => Ok(PersonFields {
            name,
            age,
            hobbies,
            extra: object,
        }),
        _ => Err(ValidationErrors(violations)),
    }
}

fn check_name(value: Option<Value>, violations: &mut Vec<Violation>) -> Option<String> {
    match value {
        None => violations.push(Violation::Required(NAME)),
        Some(Value::String(name)) if name.is_empty() => violations.push(Violation::Empty(NAME)),
        Some(Value::String(name)) => return Some(name),
        Some(_) => violations.push(Violation::NotAString(NAME)),
    }

    None
}

fn check_age(value: Option<Value>, violations: &mut Vec<Violation>) -> Option<Number> {
    match value {
        None => violations.push(Violation::Required(AGE)),
        Some(Value::Number(age)) => return Some(age),
        Some(_) => violations.push(Violation::NotANumber(AGE)),
    }

    None
}

fn check_hobbies(value: Option<Value>, violations: &mut Vec<Violation>) -> Option<Vec<String>> {
    let items = match value {
        None => {
            violations.push(Violation::Required(HOBBIES));
            return None;
        }
        Some(Value::Array(items)) => items,
        Some(_) => {
            violations.push(Violation::NotAnArray(HOBBIES));
            return None;
        }
    };

    let mut hobbies = Vec::with_capacity(items.len());
    let before = violations.len();

    for (index, item) in items.into_iter().enumerate() {
        match item {
            Value::String(hobby) => hobbies.push(hobby),
            _ => violations.push(Violation::ItemNotAString {
                key: HOBBIES,
                index,
            }),
        }
    }

    (violations.len() == before).then_some(hobbies)
}

/// Treats an empty body as an empty object
pub fn empty_object() -> Value {
    Value::Object(Map::new())
}
