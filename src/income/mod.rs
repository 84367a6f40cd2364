//! The monthly income singleton.

mod core;
mod handlers;

pub use self::core::{
    DEFAULT_MONTHLY_INCOME, IncomeForm, MonthlyIncome, create_monthly_income_table,
    get_monthly_income, update_monthly_income,
};
pub use handlers::{get_monthly_income_endpoint, update_monthly_income_endpoint};
