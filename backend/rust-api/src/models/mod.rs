use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct TransactionRow {
    pub id: i64,
    pub user_id: Option<Uuid>,
    pub date: NaiveDate,
    pub description: String,
    pub amount: Decimal,
    pub category: String,
    pub mode: String,
    pub status: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct BudgetCategoryRow {
    pub id: i64,
    pub user_id: Option<Uuid>,
    pub name: String,
    pub budget: Decimal,
    pub spent: Decimal,
    pub color: String,
    pub icon: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct IncomeSourceRow {
    pub id: i64,
    pub user_id: Option<Uuid>,
    pub name: String,
    pub amount: Decimal,
    pub date: NaiveDate,
}

/// Body of the assistant request. Fields are optional so a missing one is reported as a
/// validation failure rather than a decode failure.
#[derive(Debug, Deserialize)]
pub struct AssistantRequest {
    pub message: Option<String>,
    pub user_id: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AssistantResponse {
    pub message: String,
    pub financial_summary: FinancialSummary,
}

#[derive(Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FinancialSummary {
    pub total_transactions: usize,
    pub available_categories: Vec<String>,
    pub budget_categories: Vec<CategorySpend>,
}

#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct CategorySpend {
    pub name: String,
    pub budget: Decimal,
    pub spent: Decimal,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SetupResponse {
    pub success: bool,
    pub message: String,
}
