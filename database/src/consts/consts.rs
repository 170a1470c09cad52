use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

// New Type Pattern -- https://doc.rust-lang.org/rust-by-example/generics/new_types.html
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq, Hash)]
pub struct EntityId(pub String);

impl EntityId {
    /// Generates a fresh random id, used when a person is created
    pub fn new() -> EntityId {
        EntityId(Uuid::new_v4().to_string())
    }
}

impl Default for EntityId {
    fn default() -> Self {
        EntityId::new()
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// Values
pub const SEED_PERSON_ID: &str = "1";
pub const SEED_PERSON_NAME: &str = "Sam";
/// The seed age is stored as text, not as a number
pub const SEED_PERSON_AGE: &str = "26";
