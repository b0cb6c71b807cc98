use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

pub mod expense {
    use super::*;

    /// Request body for creating an expense.
    ///
    /// Every field is optional at the wire level so that a missing field is reported
    /// as a validation error rather than a malformed body.
    #[derive(Debug, Default, Serialize, Deserialize)]
    pub struct ExpenseNew {
        pub expense_name: Option<String>,
        pub amount: Option<f64>,
        /// `YYYY-MM-DD`
        pub date: Option<String>,
    }

    /// Request body for updating an expense. An absent `date` keeps the stored one.
    #[derive(Debug, Default, Serialize, Deserialize)]
    pub struct ExpenseUpdate {
        pub expense_name: Option<String>,
        pub amount: Option<f64>,
        /// `YYYY-MM-DD`
        pub date: Option<String>,
    }

    /// Query string of `GET /api/daily_expense`.
    #[derive(Debug, Default, Serialize, Deserialize)]
    pub struct DailyExpenseQuery {
        pub date: Option<String>,
    }

    /// An expense as returned by the API. `date` is always serialized as `YYYY-MM-DD`.
    #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
    pub struct ExpenseView {
        pub id: i32,
        pub expense_name: String,
        pub amount: f64,
        pub date: NaiveDate,
    }
}

pub mod response {
    use super::*;

    #[derive(Debug, Serialize, Deserialize)]
    pub struct Message {
        pub message: String,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct MessageWithData<T> {
        pub message: String,
        pub data: T,
    }

    /// Body of every error response.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct ErrorMessage {
        pub message: String,
        /// Parser detail, only present for malformed bodies.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        pub error: Option<String>,
    }
}
