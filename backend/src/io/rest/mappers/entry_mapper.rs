use crate::domain::commands::entries::{AddExpenseCommand, AddFundCommand};
use crate::domain::models::{Expense as DomainExpense, Fund as DomainFund};
use shared::{AddExpenseRequest, AddFundRequest, Expense as SharedExpense, Fund as SharedFund};

pub struct EntryMapper;

impl EntryMapper {
    pub fn add_expense_command(user_id: i64, request: AddExpenseRequest) -> AddExpenseCommand {
        AddExpenseCommand {
            user_id,
            category: request.category,
            amount: request.amount,
            description: request.description,
        }
    }

    pub fn add_fund_command(user_id: i64, request: AddFundRequest) -> AddFundCommand {
        AddFundCommand {
            user_id,
            amount: request.amount,
        }
    }

    pub fn expense_to_dto(expense: DomainExpense) -> SharedExpense {
        SharedExpense {
            id: expense.id,
            user_id: expense.user_id,
            date: expense.date,
            category: expense.category,
            amount: expense.amount,
            description: expense.description,
        }
    }

    pub fn fund_to_dto(fund: DomainFund) -> SharedFund {
        SharedFund {
            id: fund.id,
            user_id: fund.user_id,
            date: fund.date,
            amount: fund.amount,
        }
    }
}
