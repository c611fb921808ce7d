mod tables;
mod types;
mod validation;

pub use tables::ensure_tables;
pub use types::{
    Admin, AdminLogin, InsertQuestion, InsertScore, Question, Score, ADMIN_ID, OPTION_COUNT,
    REDACTED_PASSWORD,
};
pub use validation::{FieldIssue, Validate, ValidationError};
