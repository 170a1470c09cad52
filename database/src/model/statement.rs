use crate::consts::consts::EntityId;

use super::person::{Person, PersonFields};

#[derive(Clone, Debug)]
pub enum Statement {
    Add(Person),
    /// Overwrites every field but the id, nothing is merged
    Replace(EntityId, PersonFields),
    Remove(EntityId),
    Get(EntityId),
    /// Returns a list of Person in insertion order
    List,
}

impl Statement {
    pub fn is_mutation(&self) -> bool {
        match self {
            Statement::Add(_) | Statement::Remove(_) | Statement::Replace(_, _) => true,
            Statement::List | Statement::Get(_) => false,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum StatementResult {
    Single(Person),
    GetSingle(Option<Person>),
    List(Vec<Person>),
}
