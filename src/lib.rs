//! Quizbank server library
//!
//! Multiple-choice quiz backend: questions, score submissions and admin
//! maintenance over either PostgreSQL or a stateless default dataset.

pub mod api;
pub mod config;
pub mod error;
pub mod schema;
pub mod security;
pub mod storage;
