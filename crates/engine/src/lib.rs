//! Expense bookkeeping on top of a relational store.
//!
//! [`Engine`] is the persistence gateway: it owns the database handle and exposes the
//! create/read/update/delete operations over [`Expense`]. The [`validation`] module
//! turns raw request fields into the typed inputs those operations accept.
pub use error::EngineError;
pub use expenses::Expense;
pub use ops::{Engine, EngineBuilder};
pub use validation::{ExpenseChanges, NewExpense};

pub mod expenses;
pub mod validation;

mod error;
mod ops;

type ResultEngine<T> = Result<T, EngineError>;
