pub mod person;
pub mod statement;
pub mod validation;
