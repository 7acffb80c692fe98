use serde::{Deserialize, Serialize};

pub mod category {
    use super::*;

    /// Reference data supplied by the backend; read-only for clients.
    #[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
    pub struct Category {
        pub id: i64,
        pub name: String,
    }
}

pub mod expense {
    use super::*;

    /// A recorded expense as the backend returns it.
    ///
    /// The id is an opaque backend string, exposed on the wire as `_id`.
    /// `create_dt` is kept as the raw ISO-8601-like string; rendering it is
    /// a presentation concern.
    #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct Expense {
        #[serde(rename = "_id")]
        pub id: String,
        pub category_name: String,
        pub establishment_name: String,
        pub amount: f64,
        pub create_dt: String,
    }

    /// Request body for registering a new expense.
    ///
    /// `amount` travels as a numeric-literal string; the backend parses it.
    #[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct ExpenseNew {
        pub category_name: String,
        pub establishment_name: String,
        pub amount: String,
    }
}
