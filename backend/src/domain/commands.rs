//! Domain-level command and result types.
//! The REST layer maps the public DTOs in the `shared` crate to these.

pub mod entries {
    use crate::domain::models::{Expense, Fund};

    /// Raw form input for a new expense; validated by the entry service.
    #[derive(Debug, Clone)]
    pub struct AddExpenseCommand {
        pub user_id: i64,
        pub category: Option<String>,
        pub amount: Option<String>,
        pub description: Option<String>,
    }

    #[derive(Debug, Clone)]
    pub struct AddFundCommand {
        pub user_id: i64,
        pub amount: Option<String>,
    }

    #[derive(Debug, Clone)]
    pub struct AddExpenseResult {
        pub expense: Expense,
        pub success_message: String,
    }

    #[derive(Debug, Clone)]
    pub struct AddFundResult {
        pub fund: Fund,
        pub success_message: String,
    }
}

pub mod accounts {
    use crate::domain::models::User;

    #[derive(Debug, Clone)]
    pub struct RegisterCommand {
        pub name: Option<String>,
        pub email: Option<String>,
        pub password: Option<String>,
    }

    #[derive(Debug, Clone)]
    pub struct LoginCommand {
        pub email: Option<String>,
        pub password: Option<String>,
    }

    /// A signed-in user and their session token
    #[derive(Debug, Clone)]
    pub struct SessionResult {
        pub token: String,
        pub user: User,
    }
}
