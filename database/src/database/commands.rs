use crate::model::statement::{Statement, StatementResult};

use super::table::table::ApplyErrors;

/// Database commands are how we interact with the database thread
///
/// The majority of interactions happen via statements (e.g. add, replace, remove, etc), but there are also
/// commands that control the database itself (e.g. shutdown).
#[derive(Debug)]
pub enum DatabaseCommand {
    /// Runs a single statement against the person table
    Statement(Statement),

    /// Commands that control the database
    Control(Control),
}

impl DatabaseCommand {
    /// Prints complex logs in a more readable format
    pub fn log_format(&self) -> String {
        match self {
            DatabaseCommand::Statement(Statement::Add(person)) => {
                format!("Add [{}]", person.id)
            }
            DatabaseCommand::Statement(Statement::Replace(id, _)) => format!("Replace [{}]", id),
            DatabaseCommand::Statement(Statement::Remove(id)) => format!("Remove [{}]", id),
            DatabaseCommand::Statement(Statement::Get(id)) => format!("Get [{}]", id),
            DatabaseCommand::Statement(Statement::List) => "List".to_string(),
            DatabaseCommand::Control(control) => format!("{:?}", control),
        }
    }
}

#[derive(Debug, PartialEq)]
pub enum Control {
    /// Stops the database thread. Commands sent before the shutdown are answered, later ones are dropped
    Shutdown,
}

#[derive(Clone, Debug, PartialEq)]
pub enum DatabaseCommandResponse {
    /// Statement was applied, carries its result
    Statement(StatementResult),
    /// Statement could not be applied, nothing was changed
    StatementError(ApplyErrors),
    /// Successfully performed the control
    ControlSuccess(String),
}

impl DatabaseCommandResponse {
    pub fn control_success(message: &str) -> Self {
        DatabaseCommandResponse::ControlSuccess(message.to_string())
    }
}

pub struct DatabaseCommandRequest {
    pub resolver: oneshot::Sender<DatabaseCommandResponse>,
    pub command: DatabaseCommand,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{consts::consts::EntityId, model::person::Person};

    #[test]
    fn log_format_is_short() {
        let person = Person::new_test();

        assert_eq!(
            DatabaseCommand::Statement(Statement::Add(person)).log_format(),
            "Add [test]"
        );
        assert_eq!(
            DatabaseCommand::Statement(Statement::Get(EntityId("1".to_string()))).log_format(),
            "Get [1]"
        );
        assert_eq!(
            DatabaseCommand::Control(Control::Shutdown).log_format(),
            "Shutdown"
        );
    }
}
