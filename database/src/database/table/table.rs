use thiserror::Error;

use crate::{
    consts::consts::EntityId,
    model::{
        person::Person,
        statement::{Statement, StatementResult},
    },
};

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ApplyErrors {
    // CRUD - CREATE
    #[error("Cannot create, record already exists: {0}")]
    CannotCreateWhenAlreadyExists(EntityId),

    // CRUD - UPDATE
    #[error("Cannot replace, record does not exist: {0}")]
    CannotReplaceDoesNotExist(EntityId),

    // CRUD - DELETE
    #[error("Cannot delete, record does not exist: {0}")]
    CannotDeleteDoesNotExist(EntityId),
}

impl ApplyErrors {
    /// Whether the statement failed because the addressed record is absent
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            ApplyErrors::CannotReplaceDoesNotExist(_) | ApplyErrors::CannotDeleteDoesNotExist(_)
        )
    }
}

/// Ordered collection of people, earliest insert first
#[derive(Debug, Default)]
pub struct PersonTable {
    pub person_rows: Vec<Person>,
}

impl PersonTable {
    pub fn new() -> Self {
        Self {
            person_rows: Vec::new(),
        }
    }

    pub fn new_seeded() -> Self {
        Self {
            person_rows: vec![Person::seed()],
        }
    }

    pub fn len(&self) -> usize {
        self.person_rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.person_rows.is_empty()
    }

    fn position(&self, id: &EntityId) -> Option<usize> {
        self.person_rows.iter().position(|person| &person.id == id)
    }

    pub fn apply(&mut self, statement: Statement) -> Result<StatementResult, ApplyErrors> {
        let statement_result = match statement {
            Statement::Add(person) => {
                // Ids are random, a collision means the caller reused one
                if self.position(&person.id).is_some() {
                    return Err(ApplyErrors::CannotCreateWhenAlreadyExists(person.id));
                }

                self.person_rows.push(person.clone());

                StatementResult::Single(person)
            }
            Statement::Replace(id, fields) => {
                let index = self
                    .position(&id)
                    .ok_or(ApplyErrors::CannotReplaceDoesNotExist(id.clone()))?;

                let person = fields.into_person(id);
                self.person_rows[index] = person.clone();

                StatementResult::Single(person)
            }
            Statement::Remove(id) => {
                let before = self.person_rows.len();
                let mut removed = None;

                self.person_rows.retain(|person| {
                    if person.id == id {
                        removed = Some(person.clone());
                        false
                    } else {
                        true
                    }
                });

                match removed {
                    Some(person) if self.person_rows.len() != before => {
                        StatementResult::Single(person)
                    }
                    _ => return Err(ApplyErrors::CannotDeleteDoesNotExist(id)),
                }
            }
            Statement::Get(id) => StatementResult::GetSingle(
                self.person_rows.iter().find(|person| person.id == id).cloned(),
            ),
            Statement::List => StatementResult::List(self.person_rows.clone()),
        };

        Ok(statement_result)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::{Map, Number};

    use super::*;
    use crate::model::person::{Age, PersonFields};

    fn add_test_person(table: &mut PersonTable, name: &str) -> Person {
        let person = Person::new(name.to_string(), Age::from(20), vec!["chess".to_string()]);

        single(
            table
                .apply(Statement::Add(person.clone()))
                .expect("add should succeed"),
        )
    }

    fn single(result: StatementResult) -> Person {
        match result {
            StatementResult::Single(person) => person,
            other => panic!("Statement result is not of type Single: {:?}", other),
        }
    }

    fn names(table: &PersonTable) -> Vec<String> {
        table.person_rows.iter().map(|p| p.name.clone()).collect()
    }

    mod add {
        use super::*;

        #[test]
        fn add_appends_to_end() {
            // Given a seeded table
            let mut table = PersonTable::new_seeded();

            // When two people are added
            add_test_person(&mut table, "A");
            add_test_person(&mut table, "B");

            // Then they follow the seed in insertion order
            assert_eq!(names(&table), vec!["Sam", "A", "B"]);
        }

        #[test]
        fn add_with_existing_id_fails() {
            let mut table = PersonTable::new();
            let person = add_test_person(&mut table, "A");

            let result = table.apply(Statement::Add(person.clone()));

            assert_eq!(
                result,
                Err(ApplyErrors::CannotCreateWhenAlreadyExists(person.id))
            );
            assert_eq!(table.len(), 1);
        }
    }

    mod get {
        use super::*;

        #[test]
        fn get_existing() {
            let mut table = PersonTable::new();
            let person = add_test_person(&mut table, "A");

            let result = table.apply(Statement::Get(person.id.clone())).unwrap();

            assert_eq!(result, StatementResult::GetSingle(Some(person)));
        }

        #[test]
        fn get_missing_is_none() {
            let mut table = PersonTable::new_seeded();

            let result = table
                .apply(Statement::Get(EntityId("999999".to_string())))
                .unwrap();

            assert_eq!(result, StatementResult::GetSingle(None));
        }
    }

    mod replace {
        use super::*;

        #[test]
        fn replace_overwrites_every_field() {
            // Given a person with a hobby and an extra property
            let mut table = PersonTable::new();
            let mut person = Person::new("A".to_string(), Age::from(1), vec!["chess".into()]);
            person.extra.insert("city".to_string(), "Sydney".into());
            table.apply(Statement::Add(person.clone())).unwrap();

            // When it is replaced without hobbies and without the extra property
            let fields = PersonFields {
                name: "B".to_string(),
                age: Number::from(5),
                hobbies: vec![],
                extra: Map::new(),
            };
            let replaced = single(
                table
                    .apply(Statement::Replace(person.id.clone(), fields))
                    .unwrap(),
            );

            // Then nothing from the old record survives except the id
            assert_eq!(replaced.id, person.id);
            assert_eq!(replaced.name, "B");
            assert_eq!(replaced.age, Age::from(5));
            assert!(replaced.hobbies.is_empty());
            assert!(replaced.extra.is_empty());
            assert_eq!(table.person_rows, vec![replaced]);
        }

        #[test]
        fn replace_keeps_position() {
            let mut table = PersonTable::new_seeded();
            let a = add_test_person(&mut table, "A");
            add_test_person(&mut table, "B");

            let fields = PersonFields {
                name: "A2".to_string(),
                age: Number::from(5),
                hobbies: vec![],
                extra: Map::new(),
            };
            table.apply(Statement::Replace(a.id, fields)).unwrap();

            assert_eq!(names(&table), vec!["Sam", "A2", "B"]);
        }

        #[test]
        fn replace_missing_fails() {
            let mut table = PersonTable::new_seeded();
            let id = EntityId("missing".to_string());

            let fields = PersonFields {
                name: "B".to_string(),
                age: Number::from(5),
                hobbies: vec![],
                extra: Map::new(),
            };
            let result = table.apply(Statement::Replace(id.clone(), fields));

            assert_eq!(result, Err(ApplyErrors::CannotReplaceDoesNotExist(id)));
            assert_eq!(table.person_rows, vec![Person::seed()]);
        }
    }

    mod remove {
        use super::*;

        #[test]
        fn remove_preserves_order_of_the_rest() {
            // Given A, B, C
            let mut table = PersonTable::new();
            let a = add_test_person(&mut table, "A");
            add_test_person(&mut table, "B");
            add_test_person(&mut table, "C");

            // When A is removed
            let removed = table.apply(Statement::Remove(a.id.clone())).unwrap();

            // Then B and C keep their relative order
            assert_eq!(removed, StatementResult::Single(a));
            assert_eq!(names(&table), vec!["B", "C"]);
        }

        #[test]
        fn remove_twice_fails_the_second_time() {
            let mut table = PersonTable::new_seeded();
            let id = EntityId("1".to_string());

            assert!(table.apply(Statement::Remove(id.clone())).is_ok());

            let second = table.apply(Statement::Remove(id.clone()));

            assert_eq!(second, Err(ApplyErrors::CannotDeleteDoesNotExist(id)));
            assert!(second.unwrap_err().is_not_found());
            assert!(table.is_empty());
        }
    }
}
