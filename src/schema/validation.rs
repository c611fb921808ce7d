//! Input validation rules.
//!
//! Every violated rule is collected so the caller can report all of them at
//! once. Lengths are counted in characters, not bytes.

use serde::Serialize;
use std::fmt;

use super::types::{AdminLogin, InsertQuestion, InsertScore, OPTION_COUNT};

pub const MIN_QUESTION_CHARS: usize = 5;
pub const MAX_STUDENT_NAME_CHARS: usize = 100;
pub const MAX_SCORE: i32 = 100;
pub const MAX_TOTAL_QUESTIONS: i32 = 20;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldIssue {
    pub field: String,
    pub rule: &'static str,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct ValidationError {
    pub issues: Vec<FieldIssue>,
}

impl ValidationError {
    fn push(&mut self, field: impl Into<String>, rule: &'static str, message: impl Into<String>) {
        self.issues.push(FieldIssue {
            field: field.into(),
            rule,
            message: message.into(),
        });
    }

    fn into_result(self) -> Result<(), ValidationError> {
        if self.issues.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }

    pub fn has_issue(&self, field: &str, rule: &str) -> bool {
        self.issues.iter().any(|i| i.field == field && i.rule == rule)
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self
            .issues
            .iter()
            .map(|i| format!("{}: {}", i.field, i.message))
            .collect();
        write!(f, "{}", parts.join("; "))
    }
}

impl std::error::Error for ValidationError {}

pub trait Validate {
    fn validate(&self) -> Result<(), ValidationError>;
}

impl Validate for InsertQuestion {
    fn validate(&self) -> Result<(), ValidationError> {
        let mut err = ValidationError::default();

        if self.question.chars().count() < MIN_QUESTION_CHARS {
            err.push(
                "question",
                "min_length",
                format!("Question must be at least {} characters", MIN_QUESTION_CHARS),
            );
        }

        if self.options.len() != OPTION_COUNT {
            err.push(
                "options",
                "exact_length",
                format!("Exactly {} answer options are required", OPTION_COUNT),
            );
        }

        for (i, option) in self.options.iter().enumerate() {
            if option.is_empty() {
                err.push(format!("options[{}]", i), "non_empty", "Answer option must not be empty");
            }
        }

        if !(0..OPTION_COUNT as i32).contains(&self.correct_answer) {
            err.push(
                "correctAnswer",
                "range",
                format!("Correct answer must be between 0 and {}", OPTION_COUNT - 1),
            );
        }

        err.into_result()
    }
}

impl Validate for InsertScore {
    fn validate(&self) -> Result<(), ValidationError> {
        let mut err = ValidationError::default();

        let name_chars = self.student_name.chars().count();
        if name_chars == 0 {
            err.push("studentName", "min_length", "Student name is required");
        } else if name_chars > MAX_STUDENT_NAME_CHARS {
            err.push(
                "studentName",
                "max_length",
                format!("Student name must be at most {} characters", MAX_STUDENT_NAME_CHARS),
            );
        }

        if !(0..=MAX_SCORE).contains(&self.score) {
            err.push("score", "range", format!("Score must be between 0 and {}", MAX_SCORE));
        }

        if !(1..=MAX_TOTAL_QUESTIONS).contains(&self.total_questions) {
            err.push(
                "totalQuestions",
                "range",
                format!("Total questions must be between 1 and {}", MAX_TOTAL_QUESTIONS),
            );
        }

        err.into_result()
    }
}

impl Validate for AdminLogin {
    fn validate(&self) -> Result<(), ValidationError> {
        let mut err = ValidationError::default();

        if self.username.is_empty() {
            err.push("username", "min_length", "Username is required");
        }
        if self.password.is_empty() {
            err.push("password", "min_length", "Password is required");
        }

        err.into_result()
    }
}
