use chrono::NaiveDate;
use sea_orm::{ConnectionTrait, QueryFilter, QueryOrder, TransactionTrait, prelude::*};

use crate::{EngineError, Expense, ExpenseChanges, NewExpense, ResultEngine, expenses};

use super::{Engine, with_tx};

const NOT_FOUND: &str = "Expense not found";

impl Engine {
    /// Insert a new expense and return it with the id assigned by the database.
    pub async fn create_expense(&self, expense: NewExpense) -> ResultEngine<Expense> {
        let model = expenses::ActiveModel::from(&expense)
            .insert(&self.database)
            .await?;
        Ok(model.into())
    }

    /// Return the expense with the given id.
    pub async fn expense(&self, id: i32) -> ResultEngine<Expense> {
        find_expense(&self.database, id).await
    }

    /// Return every expense dated `date`, oldest id first.
    ///
    /// No match is an empty vector, not an error.
    pub async fn expenses_on(&self, date: NaiveDate) -> ResultEngine<Vec<Expense>> {
        let models = expenses::Entity::find()
            .filter(expenses::Column::Date.eq(date))
            .order_by_asc(expenses::Column::Id)
            .all(&self.database)
            .await?;
        Ok(models.into_iter().map(Expense::from).collect())
    }

    /// Return every stored expense, oldest id first.
    pub async fn expenses(&self) -> ResultEngine<Vec<Expense>> {
        let models = expenses::Entity::find()
            .order_by_asc(expenses::Column::Id)
            .all(&self.database)
            .await?;
        Ok(models.into_iter().map(Expense::from).collect())
    }

    /// Rewrite the whole record keyed by `expense.id`.
    pub async fn save_expense(&self, expense: &Expense) -> ResultEngine<Expense> {
        save_expense(&self.database, expense).await
    }

    /// Hard delete the record keyed by `expense.id`.
    pub async fn delete_expense(&self, expense: &Expense) -> ResultEngine<()> {
        delete_expense(&self.database, expense).await
    }

    /// Load an expense, apply `changes` and save it back.
    ///
    /// The lookup and the write share one database transaction. When `changes.date` is
    /// `None` the stored date is kept.
    pub async fn update_expense(&self, id: i32, changes: ExpenseChanges) -> ResultEngine<Expense> {
        with_tx!(self, |db_tx| {
            let mut expense = find_expense(&db_tx, id).await?;
            expense.expense_name = changes.expense_name;
            expense.amount = changes.amount;
            if let Some(date) = changes.date {
                expense.date = date;
            }
            save_expense(&db_tx, &expense).await
        })
    }

    /// Load an expense and delete it, returning the deleted record.
    pub async fn remove_expense(&self, id: i32) -> ResultEngine<Expense> {
        with_tx!(self, |db_tx| {
            let expense = find_expense(&db_tx, id).await?;
            delete_expense(&db_tx, &expense).await?;
            Ok(expense)
        })
    }
}

async fn find_expense<C: ConnectionTrait>(conn: &C, id: i32) -> ResultEngine<Expense> {
    expenses::Entity::find_by_id(id)
        .one(conn)
        .await?
        .map(Expense::from)
        .ok_or_else(|| EngineError::KeyNotFound(NOT_FOUND.to_string()))
}

async fn save_expense<C: ConnectionTrait>(conn: &C, expense: &Expense) -> ResultEngine<Expense> {
    match expenses::ActiveModel::from(expense).update(conn).await {
        Ok(model) => Ok(model.into()),
        Err(DbErr::RecordNotUpdated) => Err(EngineError::KeyNotFound(NOT_FOUND.to_string())),
        Err(err) => Err(err.into()),
    }
}

async fn delete_expense<C: ConnectionTrait>(conn: &C, expense: &Expense) -> ResultEngine<()> {
    let result = expenses::Entity::delete_by_id(expense.id).exec(conn).await?;
    if result.rows_affected == 0 {
        return Err(EngineError::KeyNotFound(NOT_FOUND.to_string()));
    }
    Ok(())
}
