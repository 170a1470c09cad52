use std::thread;

use flume::Receiver;

use crate::model::statement::Statement;

use super::{
    commands::{Control, DatabaseCommand, DatabaseCommandRequest, DatabaseCommandResponse},
    options::DatabaseOptions,
    request_manager::RequestManager,
    table::table::PersonTable,
};

/// Owns the person table. Once running, the table lives on a single database thread and every
/// command is applied one after the other, so a read-modify-write can never interleave with another.
pub struct Database {
    person_table: PersonTable,
    database_options: DatabaseOptions,
}

impl Database {
    pub fn new(database_options: DatabaseOptions) -> Self {
        let person_table = if database_options.seed {
            PersonTable::new_seeded()
        } else {
            PersonTable::new()
        };

        Self {
            person_table,
            database_options,
        }
    }

    pub fn new_test() -> Self {
        Self::new(DatabaseOptions::default())
    }

    /// Moves the database onto its own thread and returns a handle for talking to it
    ///
    /// The thread exits on a shutdown command, or once every request manager has been dropped.
    pub fn run(self) -> RequestManager {
        let (database_sender, database_receiver) = flume::unbounded::<DatabaseCommandRequest>();

        let request_manager =
            RequestManager::new(database_sender, self.database_options.request_timeout);

        let mut database = self;

        thread::spawn(move || database.process_commands(database_receiver));

        request_manager
    }

    fn process_commands(&mut self, database_receiver: Receiver<DatabaseCommandRequest>) {
        log::info!(
            "📀 Database started [Rows: {}, Seeded: {}]",
            self.person_table.len(),
            self.database_options.seed
        );

        // Process incoming requests from the channel
        while let Ok(DatabaseCommandRequest { command, resolver }) = database_receiver.recv() {
            log::info!("Received request: {}", command.log_format());

            let (response, shutdown) = match command {
                DatabaseCommand::Statement(statement) => {
                    (self.process_statement(statement), false)
                }
                DatabaseCommand::Control(Control::Shutdown) => (
                    DatabaseCommandResponse::control_success("Successfully shutdown database"),
                    true,
                ),
            };

            // Sends the response back to the caller, they may have stopped waiting after a timeout
            if resolver.send(response).is_err() {
                log::warn!("Caller stopped waiting before the database responded");
            }

            if shutdown {
                log::info!("Database shut down");
                return;
            }
        }

        log::info!("All request managers dropped, database stopped");
    }

    pub fn process_statement(&mut self, statement: Statement) -> DatabaseCommandResponse {
        let is_mutation = statement.is_mutation();

        match self.person_table.apply(statement) {
            Ok(result) => {
                if is_mutation {
                    log::info!("✅ Applied [Rows: {}]", self.person_table.len());
                }

                DatabaseCommandResponse::Statement(result)
            }
            Err(err) => {
                log::info!("⚠️  Not applied: {}", err);

                DatabaseCommandResponse::StatementError(err)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::{
        consts::consts::EntityId,
        database::table::table::ApplyErrors,
        model::{
            person::{Age, Person},
            statement::StatementResult,
        },
    };

    use super::*;

    mod process_statement {
        use super::*;

        #[test]
        fn fresh_database_contains_seed() {
            let mut database = Database::new_test();

            let response = database.process_statement(Statement::List);

            assert_eq!(
                response,
                DatabaseCommandResponse::Statement(StatementResult::List(vec![Person::seed()]))
            );
        }

        #[test]
        fn unseeded_database_is_empty() {
            let mut database = Database::new(DatabaseOptions::new_empty());

            let response = database.process_statement(Statement::List);

            assert_eq!(
                response,
                DatabaseCommandResponse::Statement(StatementResult::List(vec![]))
            );
        }

        #[test]
        fn add_happy_path() {
            let mut database = Database::new_test();
            let person = Person::new_test();

            let response = database.process_statement(Statement::Add(person.clone()));

            assert_eq!(
                response,
                DatabaseCommandResponse::Statement(StatementResult::Single(person))
            );
        }

        #[test]
        fn failed_statement_is_reported() {
            let mut database = Database::new_test();
            let id = EntityId("missing".to_string());

            let response = database.process_statement(Statement::Remove(id.clone()));

            assert_eq!(
                response,
                DatabaseCommandResponse::StatementError(ApplyErrors::CannotDeleteDoesNotExist(id))
            );
        }
    }

    mod running {
        use super::*;

        #[test]
        fn request_manager_round_trip() {
            let rm = Database::new(DatabaseOptions::new_empty()).run();

            let person = Person::new("A".to_string(), Age::from(3), vec![]);
            let added = rm.send_add(person.clone()).expect("Should not timeout");

            assert_eq!(added, person);
            assert_eq!(rm.send_get(person.id.clone()).unwrap(), Some(person));

            let shutdown_response = rm.send_shutdown_request().expect("Should not timeout");

            assert_eq!(shutdown_response, "Successfully shutdown database");
        }

        #[test]
        fn separate_databases_are_isolated() {
            let rm_one = Database::new_test().run();
            let rm_two = Database::new_test().run();

            rm_one.send_remove(EntityId("1".to_string())).unwrap();

            assert!(rm_one.send_list().unwrap().is_empty());
            assert_eq!(rm_two.send_list().unwrap(), vec![Person::seed()]);
        }
    }
}

pub mod test_utils {
    use std::thread::{self, JoinHandle};

    use crate::{
        database::{options::DatabaseOptions, request_manager::RequestManager},
        model::statement::Statement,
    };

    use super::Database;

    /// Fires statements at a fresh database from several threads at once
    pub fn database_test(
        worker_threads: i32,
        statements: u32,
        statement_generator: fn(i32, u32) -> Statement,
    ) -> RequestManager {
        let rm = Database::new(DatabaseOptions::new_empty()).run();

        let mut sender_threads: Vec<JoinHandle<()>> = vec![];

        for thread_id in 0..worker_threads {
            let rm = rm.clone();

            let sender_thread = thread::spawn(move || {
                for index in 0..statements {
                    let statement = statement_generator(thread_id, index);

                    rm.send_single_statement(statement)
                        .expect("Should not timeout");
                }
            });

            sender_threads.push(sender_thread);
        }

        for thread in sender_threads {
            thread.join().unwrap();
        }

        rm
    }
}
