//! Command implementations

mod run;
mod schema;
mod validate;

pub use run::run;
pub use schema::schema;
pub use validate::{Submission, validate};
