//! Expenses API endpoints
//!
//! Every handler validates its whole input before touching the engine, so a rejected
//! request never reaches the database.

use api_types::{
    expense::{DailyExpenseQuery, ExpenseNew, ExpenseUpdate, ExpenseView},
    response::{Message, MessageWithData},
};
use axum::{
    Json,
    extract::{Path, Query, State, rejection::JsonRejection},
};
use chrono::{Local, NaiveDate};
use engine::{EngineError, ExpenseChanges, NewExpense, validation};

use crate::{ServerError, server::ServerState, store_failure};

fn map_expense(expense: engine::Expense) -> ExpenseView {
    ExpenseView {
        id: expense.id,
        expense_name: expense.expense_name,
        amount: expense.amount,
        date: expense.date,
    }
}

fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Resolve a lookup id. Ids that are not integers cannot match a row.
fn lookup_id(raw: &str) -> Result<i32, ServerError> {
    validation::require_id(raw)?;
    match validation::parse_id(raw) {
        Err(EngineError::InvalidId(_)) => {
            Err(EngineError::KeyNotFound("Expense not found".to_string()).into())
        }
        parsed => Ok(parsed?),
    }
}

/// Handle requests for creating a new expense
pub async fn create(
    State(state): State<ServerState>,
    payload: Result<Json<ExpenseNew>, JsonRejection>,
) -> Result<Json<MessageWithData<ExpenseView>>, ServerError> {
    let Json(payload) = payload?;
    let expense = NewExpense::validate(
        payload.expense_name.as_deref(),
        payload.amount,
        payload.date.as_deref(),
        today(),
    )?;

    let expense = state
        .engine
        .create_expense(expense)
        .await
        .map_err(store_failure("Could not create expense"))?;
    tracing::info!(id = expense.id, "expense created");

    Ok(Json(MessageWithData {
        message: "Successfully created expense".to_string(),
        data: map_expense(expense),
    }))
}

/// Handle requests for deleting an expense
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> Result<Json<Message>, ServerError> {
    let id = lookup_id(&id)?;

    state
        .engine
        .remove_expense(id)
        .await
        .map_err(store_failure("Could not delete expense"))?;
    tracing::info!(id, "expense deleted");

    Ok(Json(Message {
        message: "Expense deleted successfully".to_string(),
    }))
}

/// Handle requests listing the expenses of one day
pub async fn list_by_date(
    State(state): State<ServerState>,
    Query(query): Query<DailyExpenseQuery>,
) -> Result<Json<MessageWithData<Vec<ExpenseView>>>, ServerError> {
    let raw = query
        .date
        .as_deref()
        .map(str::trim)
        .filter(|date| !date.is_empty())
        .ok_or_else(|| ServerError::Generic("Date parameter is required".to_string()))?;
    let date = validation::parse_date(raw)?;

    let expenses = state
        .engine
        .expenses_on(date)
        .await
        .map_err(store_failure("Could not fetch expenses"))?;

    Ok(Json(MessageWithData {
        message: "Successfully fetched expenses".to_string(),
        data: expenses.into_iter().map(map_expense).collect(),
    }))
}

/// Handle requests for a single expense
pub async fn get(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> Result<Json<MessageWithData<ExpenseView>>, ServerError> {
    let id = lookup_id(&id)?;

    let expense = state
        .engine
        .expense(id)
        .await
        .map_err(store_failure("Could not fetch expense"))?;

    Ok(Json(MessageWithData {
        message: "Expense fetched successfully".to_string(),
        data: map_expense(expense),
    }))
}

/// Handle requests listing every expense
pub async fn list_all(
    State(state): State<ServerState>,
) -> Result<Json<Vec<ExpenseView>>, ServerError> {
    let expenses = state
        .engine
        .expenses()
        .await
        .map_err(store_failure("Could not fetch expenses"))?;

    Ok(Json(expenses.into_iter().map(map_expense).collect()))
}

/// Handle requests for updating an expense
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    payload: Result<Json<ExpenseUpdate>, JsonRejection>,
) -> Result<Json<MessageWithData<ExpenseView>>, ServerError> {
    let id = validation::parse_id(&id)?;
    let Json(payload) = payload?;
    let changes = ExpenseChanges::validate(
        payload.expense_name.as_deref(),
        payload.amount,
        payload.date.as_deref(),
        today(),
    )?;

    let expense = state
        .engine
        .update_expense(id, changes)
        .await
        .map_err(store_failure("Could not update expense"))?;
    tracing::info!(id, "expense updated");

    Ok(Json(MessageWithData {
        message: "Expense updated successfully".to_string(),
        data: map_expense(expense),
    }))
}
