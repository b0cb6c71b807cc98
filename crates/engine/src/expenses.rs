//! The module contains the `Expense` type and the `expenses` table entity.
use core::fmt;

use chrono::NaiveDate;
use sea_orm::{ActiveValue, entity::prelude::*};
use serde::{Deserialize, Serialize};

use crate::validation::NewExpense;

/// A single monetary outlay.
///
/// `id` is assigned by the database on insert and never changes afterwards.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Expense {
    pub id: i32,
    pub expense_name: String,
    pub amount: f64,
    pub date: NaiveDate,
}

impl fmt::Display for Expense {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "#{} {} {:.2} ({})",
            self.id, self.expense_name, self.amount, self.date
        )
    }
}

impl From<Model> for Expense {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            expense_name: model.expense_name,
            amount: model.amount,
            date: model.date,
        }
    }
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "expenses")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub expense_name: String,
    #[sea_orm(column_type = "Double")]
    pub amount: f64,
    pub date: Date,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

/// Insert form: the id is left to the database.
impl From<&NewExpense> for ActiveModel {
    fn from(expense: &NewExpense) -> Self {
        Self {
            id: ActiveValue::NotSet,
            expense_name: ActiveValue::Set(expense.expense_name.clone()),
            amount: ActiveValue::Set(expense.amount),
            date: ActiveValue::Set(expense.date),
        }
    }
}

/// Whole-record rewrite keyed by `id`.
impl From<&Expense> for ActiveModel {
    fn from(expense: &Expense) -> Self {
        Self {
            id: ActiveValue::Unchanged(expense.id),
            expense_name: ActiveValue::Set(expense.expense_name.clone()),
            amount: ActiveValue::Set(expense.amount),
            date: ActiveValue::Set(expense.date),
        }
    }
}
