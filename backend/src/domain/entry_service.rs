use rust_decimal::Decimal;
use std::sync::Arc;
use tracing::info;

use crate::domain::clock::Clock;
use crate::domain::commands::entries::{AddExpenseCommand, AddExpenseResult, AddFundCommand, AddFundResult};
use crate::domain::error::{TrackerResult, ValidationError};
use crate::domain::models::{money::CURRENCY_SCALE, Expense, Fund, NewExpense, NewFund};
use crate::domain::period::MonthPeriod;
use crate::storage::{DbConnection, ExpenseRepository, FundRepository};

pub const MAX_CATEGORY_LEN: usize = 50;
pub const MAX_DESCRIPTION_LEN: usize = 255;

/// Amounts are stored as DECIMAL(10,2) and must stay below this bound.
const AMOUNT_LIMIT_TEXT: &str = "100000000.00";

fn amount_limit() -> Decimal {
    Decimal::new(100_000_000, 0)
}

/// Service for recording expenses and fund deposits
#[derive(Clone)]
pub struct EntryService {
    expense_repository: ExpenseRepository,
    fund_repository: FundRepository,
    clock: Arc<dyn Clock>,
}

impl EntryService {
    pub fn new(db: DbConnection, clock: Arc<dyn Clock>) -> Self {
        Self {
            expense_repository: ExpenseRepository::new(db.clone()),
            fund_repository: FundRepository::new(db),
            clock,
        }
    }

    /// Record an expense dated today
    pub async fn add_expense(&self, command: AddExpenseCommand) -> TrackerResult<AddExpenseResult> {
        let category = non_blank(command.category.as_deref());
        let raw_amount = non_blank(command.amount.as_deref());
        let (category, raw_amount) = match (category, raw_amount) {
            (Some(category), Some(raw_amount)) => (category, raw_amount),
            _ => return Err(ValidationError::MissingCategoryOrAmount.into()),
        };

        check_length("Category", category, MAX_CATEGORY_LEN)?;
        let amount = parse_amount(raw_amount)?;
        let description = non_blank(command.description.as_deref()).map(str::to_string);
        if let Some(description) = &description {
            check_length("Description", description, MAX_DESCRIPTION_LEN)?;
        }

        let expense = self
            .expense_repository
            .store_expense(&NewExpense {
                user_id: command.user_id,
                date: self.clock.today(),
                category: category.to_string(),
                amount,
                description,
            })
            .await?;

        info!(
            "Recorded expense {} for user {}: {} {}",
            expense.id, expense.user_id, expense.category, expense.amount
        );

        Ok(AddExpenseResult {
            expense,
            success_message: "Expense added successfully".to_string(),
        })
    }

    /// Record a fund deposit dated today
    pub async fn add_fund(&self, command: AddFundCommand) -> TrackerResult<AddFundResult> {
        let raw_amount = non_blank(command.amount.as_deref()).ok_or(ValidationError::MissingAmount)?;
        let amount = parse_amount(raw_amount)?;

        let fund = self
            .fund_repository
            .store_fund(&NewFund {
                user_id: command.user_id,
                date: self.clock.today(),
                amount,
            })
            .await?;

        info!("Recorded fund {} for user {}: {}", fund.id, fund.user_id, fund.amount);

        Ok(AddFundResult {
            fund,
            success_message: "Fund added successfully".to_string(),
        })
    }

    /// This month's expenses, newest first
    pub async fn current_month_expenses(&self, user_id: i64) -> TrackerResult<Vec<Expense>> {
        let period = MonthPeriod::containing(self.clock.today());
        let expenses = self
            .expense_repository
            .list_between(user_id, period.first_day(), period.last_day())
            .await?;
        Ok(expenses)
    }

    /// This month's fund deposits, newest first
    pub async fn current_month_funds(&self, user_id: i64) -> TrackerResult<Vec<Fund>> {
        let period = MonthPeriod::containing(self.clock.today());
        let funds = self
            .fund_repository
            .list_between(user_id, period.first_day(), period.last_day())
            .await?;
        Ok(funds)
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

fn check_length(field: &'static str, value: &str, max: usize) -> Result<(), ValidationError> {
    if value.chars().count() > max {
        return Err(ValidationError::TooLong { field, max });
    }
    Ok(())
}

/// Parse a user-entered amount: a positive decimal with at most two
/// fractional digits that fits DECIMAL(10,2). Returned with scale 2.
pub fn parse_amount(raw: &str) -> Result<Decimal, ValidationError> {
    let mut amount: Decimal = raw
        .trim()
        .parse()
        .map_err(|_| ValidationError::AmountNotANumber)?;

    if amount <= Decimal::ZERO {
        return Err(ValidationError::AmountNotPositive);
    }
    if amount.normalize().scale() > CURRENCY_SCALE {
        return Err(ValidationError::AmountPrecisionTooHigh);
    }
    if amount >= amount_limit() {
        return Err(ValidationError::AmountTooLarge(AMOUNT_LIMIT_TEXT));
    }

    amount = amount.normalize();
    amount.rescale(CURRENCY_SCALE);
    Ok(amount)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::clock::FixedClock;
    use crate::domain::error::TrackerError;
    use crate::storage::test_utils::{amount, create_test_user, date, insert_expense};

    async fn setup_test() -> (DbConnection, EntryService, i64) {
        let db = DbConnection::init_test().await.expect("Failed to create test database");
        let user_id = create_test_user(&db, "entries@example.com").await;
        let service = EntryService::new(db.clone(), Arc::new(FixedClock(date(2024, 3, 15))));
        (db, service, user_id)
    }

    fn expense_command(user_id: i64, category: Option<&str>, value: Option<&str>) -> AddExpenseCommand {
        AddExpenseCommand {
            user_id,
            category: category.map(str::to_string),
            amount: value.map(str::to_string),
            description: None,
        }
    }

    fn validation_error(result: TrackerResult<impl std::fmt::Debug>) -> ValidationError {
        match result {
            Err(TrackerError::Validation(e)) => e,
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_amount_accepts_plain_decimals() {
        assert_eq!(parse_amount("12.5").unwrap().to_string(), "12.50");
        assert_eq!(parse_amount(" 7 ").unwrap().to_string(), "7.00");
        assert_eq!(parse_amount("1.500").unwrap(), amount("1.50"));
        assert_eq!(parse_amount("99999999.99").unwrap(), amount("99999999.99"));
    }

    #[test]
    fn test_parse_amount_rejections() {
        assert_eq!(parse_amount("abc"), Err(ValidationError::AmountNotANumber));
        assert_eq!(parse_amount("0"), Err(ValidationError::AmountNotPositive));
        assert_eq!(parse_amount("-4.00"), Err(ValidationError::AmountNotPositive));
        assert_eq!(parse_amount("1.234"), Err(ValidationError::AmountPrecisionTooHigh));
        assert_eq!(
            parse_amount("100000000"),
            Err(ValidationError::AmountTooLarge(AMOUNT_LIMIT_TEXT))
        );
    }

    #[tokio::test]
    async fn test_add_expense_is_dated_today() {
        let (_db, service, user_id) = setup_test().await;

        let mut command = expense_command(user_id, Some(" Food "), Some("12.50"));
        command.description = Some("Lunch".to_string());
        let result = service.add_expense(command).await.unwrap();

        assert_eq!(result.success_message, "Expense added successfully");
        assert_eq!(result.expense.date, date(2024, 3, 15));
        assert_eq!(result.expense.category, "Food");
        assert_eq!(result.expense.amount, amount("12.50"));
        assert_eq!(result.expense.description.as_deref(), Some("Lunch"));
    }

    #[tokio::test]
    async fn test_add_expense_requires_category_and_amount() {
        let (_db, service, user_id) = setup_test().await;

        let missing_category = service.add_expense(expense_command(user_id, Some("  "), Some("5"))).await;
        assert_eq!(validation_error(missing_category), ValidationError::MissingCategoryOrAmount);

        let missing_amount = service.add_expense(expense_command(user_id, Some("Food"), None)).await;
        assert_eq!(validation_error(missing_amount), ValidationError::MissingCategoryOrAmount);

        let not_a_number = service.add_expense(expense_command(user_id, Some("Food"), Some("ten"))).await;
        assert_eq!(validation_error(not_a_number), ValidationError::AmountNotANumber);
        assert_eq!(ValidationError::AmountNotANumber.to_string(), "Amount must be a number");
    }

    #[tokio::test]
    async fn test_add_expense_enforces_field_lengths() {
        let (_db, service, user_id) = setup_test().await;

        let long_category = "x".repeat(MAX_CATEGORY_LEN + 1);
        let result = service
            .add_expense(expense_command(user_id, Some(&long_category), Some("5")))
            .await;
        assert_eq!(
            validation_error(result),
            ValidationError::TooLong { field: "Category", max: MAX_CATEGORY_LEN }
        );
    }

    #[tokio::test]
    async fn test_add_fund_validation_and_success() {
        let (_db, service, user_id) = setup_test().await;

        let missing = service.add_fund(AddFundCommand { user_id, amount: Some(String::new()) }).await;
        assert_eq!(validation_error(missing), ValidationError::MissingAmount);

        let result = service
            .add_fund(AddFundCommand { user_id, amount: Some("1200".to_string()) })
            .await
            .unwrap();
        assert_eq!(result.success_message, "Fund added successfully");
        assert_eq!(result.fund.amount, amount("1200.00"));
        assert_eq!(result.fund.date, date(2024, 3, 15));
    }

    #[tokio::test]
    async fn test_current_month_lists_exclude_other_months() {
        let (db, service, user_id) = setup_test().await;
        insert_expense(&db, user_id, date(2024, 2, 28), "Food", "1.00").await;
        insert_expense(&db, user_id, date(2024, 3, 1), "Food", "2.00").await;
        service
            .add_expense(expense_command(user_id, Some("Travel"), Some("3.00")))
            .await
            .unwrap();

        let expenses = service.current_month_expenses(user_id).await.unwrap();
        let categories: Vec<&str> = expenses.iter().map(|e| e.category.as_str()).collect();
        assert_eq!(categories, vec!["Travel", "Food"]);

        assert!(service.current_month_funds(user_id).await.unwrap().is_empty());
    }
}
