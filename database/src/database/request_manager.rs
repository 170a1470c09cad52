use std::time::Duration;

use flume::Sender;
use thiserror::Error;

use crate::{
    consts::consts::EntityId,
    model::{
        person::{Person, PersonFields},
        statement::{Statement, StatementResult},
    },
};

use super::{
    commands::{Control, DatabaseCommand, DatabaseCommandRequest, DatabaseCommandResponse},
    table::table::ApplyErrors,
};

#[derive(Error, Debug, Clone, PartialEq)]
pub enum RequestManagerError {
    #[error("Database took too long to respond to request")]
    DatabaseTimeout,
    #[error("Database is no longer running")]
    DatabaseDisconnected,
    #[error("Statement was not applied: {0}")]
    Apply(#[from] ApplyErrors),
    #[error("Database sent a response that does not match the request")]
    UnexpectedResponse,
}

/// Goal of the request manager is to provide a simple interface for interacting with the database
///
/// The request manager provides the following APIs, sorted from easiest to use to most complex
/// 1. CRUD operations on a single person -- these are completely type safe
/// 2. Generic statement based API -- not type safe because you need to know what Statement maps to
///    which StatementResult (e.g. Statement::Add maps -> StatementResult::Single)
///
/// Every call blocks the calling thread until the database responds or the request timeout elapses.
#[derive(Clone, Debug)]
pub struct RequestManager {
    database_sender: Sender<DatabaseCommandRequest>,
    request_timeout: Duration,
}

impl RequestManager {
    pub fn new(database_sender: Sender<DatabaseCommandRequest>, request_timeout: Duration) -> Self {
        Self {
            database_sender,
            request_timeout,
        }
    }

    pub fn send_add(&self, person: Person) -> Result<Person, RequestManagerError> {
        match self.send_single_statement(Statement::Add(person))? {
            StatementResult::Single(person) => Ok(person),
            _ => Err(RequestManagerError::UnexpectedResponse),
        }
    }

    /// Replaces every field of the person other than its id
    pub fn send_replace(
        &self,
        id: EntityId,
        fields: PersonFields,
    ) -> Result<Person, RequestManagerError> {
        match self.send_single_statement(Statement::Replace(id, fields))? {
            StatementResult::Single(person) => Ok(person),
            _ => Err(RequestManagerError::UnexpectedResponse),
        }
    }

    /// Returns the removed person
    pub fn send_remove(&self, id: EntityId) -> Result<Person, RequestManagerError> {
        match self.send_single_statement(Statement::Remove(id))? {
            StatementResult::Single(person) => Ok(person),
            _ => Err(RequestManagerError::UnexpectedResponse),
        }
    }

    pub fn send_get(&self, id: EntityId) -> Result<Option<Person>, RequestManagerError> {
        match self.send_single_statement(Statement::Get(id))? {
            StatementResult::GetSingle(person) => Ok(person),
            _ => Err(RequestManagerError::UnexpectedResponse),
        }
    }

    pub fn send_list(&self) -> Result<Vec<Person>, RequestManagerError> {
        match self.send_single_statement(Statement::List)? {
            StatementResult::List(people) => Ok(people),
            _ => Err(RequestManagerError::UnexpectedResponse),
        }
    }

    /// Sends a shutdown request to the database and returns the database's response
    pub fn send_shutdown_request(&self) -> Result<String, RequestManagerError> {
        match self.send_command(DatabaseCommand::Control(Control::Shutdown))? {
            DatabaseCommandResponse::ControlSuccess(message) => Ok(message),
            _ => Err(RequestManagerError::UnexpectedResponse),
        }
    }

    /// Sends a single statement to the database and returns a single statement result
    pub fn send_single_statement(
        &self,
        statement: Statement,
    ) -> Result<StatementResult, RequestManagerError> {
        match self.send_command(DatabaseCommand::Statement(statement))? {
            DatabaseCommandResponse::Statement(result) => Ok(result),
            DatabaseCommandResponse::StatementError(err) => Err(err.into()),
            DatabaseCommandResponse::ControlSuccess(_) => {
                Err(RequestManagerError::UnexpectedResponse)
            }
        }
    }

    fn send_command(
        &self,
        command: DatabaseCommand,
    ) -> Result<DatabaseCommandResponse, RequestManagerError> {
        let (resolver, response_receiver) = oneshot::channel::<DatabaseCommandResponse>();

        // Sends the request to the database thread, the database will respond
        //  on the response_receiver once it's finished processing the request
        self.database_sender
            .send(DatabaseCommandRequest { resolver, command })
            .map_err(|_| RequestManagerError::DatabaseDisconnected)?;

        match response_receiver.recv_timeout(self.request_timeout) {
            Ok(response) => Ok(response),
            Err(oneshot::RecvTimeoutError::Timeout) => Err(RequestManagerError::DatabaseTimeout),
            Err(oneshot::RecvTimeoutError::Disconnected) => {
                Err(RequestManagerError::DatabaseDisconnected)
            }
        }
    }
}
