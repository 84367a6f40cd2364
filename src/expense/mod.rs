//! Expenses: single spending records with a name, amount and category.

mod core;
mod create_endpoint;
mod delete_endpoint;
mod edit_endpoint;
mod get_endpoint;
mod list_endpoint;

pub use self::core::{Expense, ExpenseUpdate, NewExpense, create_expense_table, get_expense};
pub use create_endpoint::{create_expense, create_expense_endpoint};
pub use delete_endpoint::{delete_expense, delete_expense_endpoint};
pub use edit_endpoint::{edit_expense_endpoint, update_expense};
pub use get_endpoint::get_expense_endpoint;
pub use list_endpoint::{ListQuery, list_expenses, list_expenses_endpoint};
