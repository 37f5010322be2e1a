//! Snapshot of one user's finances as handed to the assistant model.

use crate::models::{BudgetCategoryRow, CategorySpend, FinancialSummary, IncomeSourceRow, TransactionRow};
use rust_decimal::Decimal;
use serde::Serialize;
use std::collections::BTreeMap;

/// Per-category statistics over the ledger.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TransactionPattern {
    pub count: usize,
    pub total_amount: Decimal,
    pub descriptions: Vec<String>,
    pub avg_amount: Decimal,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FinancialContext {
    pub transactions: Vec<TransactionRow>,
    pub budget_categories: Vec<BudgetCategoryRow>,
    pub income_data: Vec<IncomeSourceRow>,
    pub total_transactions: usize,
    pub total_budget_categories: usize,
}

impl FinancialContext {
    pub fn new(
        transactions: Vec<TransactionRow>,
        budget_categories: Vec<BudgetCategoryRow>,
        income_data: Vec<IncomeSourceRow>,
    ) -> Self {
        Self {
            total_transactions: transactions.len(),
            total_budget_categories: budget_categories.len(),
            transactions,
            budget_categories,
            income_data,
        }
    }

    pub fn patterns(&self) -> BTreeMap<String, TransactionPattern> {
        let mut patterns: BTreeMap<String, TransactionPattern> = BTreeMap::new();
        for tx in &self.transactions {
            let entry = patterns.entry(tx.category.clone()).or_insert_with(|| TransactionPattern {
                count: 0,
                total_amount: Decimal::ZERO,
                descriptions: Vec::new(),
                avg_amount: Decimal::ZERO,
            });
            entry.count += 1;
            entry.total_amount += tx.amount;
            entry.descriptions.push(tx.description.to_lowercase());
        }
        for pattern in patterns.values_mut() {
            pattern.avg_amount = (pattern.total_amount / Decimal::from(pattern.count)).round_dp(2);
        }
        patterns
    }

    /// Distinct transaction categories in ledger order.
    pub fn available_categories(&self) -> Vec<String> {
        let mut seen = Vec::new();
        for tx in &self.transactions {
            if !seen.contains(&tx.category) {
                seen.push(tx.category.clone());
            }
        }
        seen
    }

    pub fn summary(&self) -> FinancialSummary {
        FinancialSummary {
            total_transactions: self.total_transactions,
            available_categories: self.available_categories(),
            budget_categories: self
                .budget_categories
                .iter()
                .map(|b| CategorySpend { name: b.name.clone(), budget: b.budget, spent: b.spent })
                .collect(),
        }
    }

    pub fn system_prompt(&self) -> Result<String, serde_json::Error> {
        let patterns = serde_json::to_string_pretty(&self.patterns())?;
        let data = serde_json::to_string_pretty(self)?;
        Ok(format!(
            "You are FinPilot, an AI financial assistant for personal finance analysis and transaction categorization.

CATEGORIZATION:
- Suggest better categories from transaction descriptions and amounts
- Learn the user's spending patterns and point out recurring transactions
- Flag transactions that look miscategorized

SPENDING ANALYSIS:
1. If the user has not given them, ask for the start date (YYYY-MM-DD), the end date (YYYY-MM-DD) and the category to analyze.
2. Filter the transactions to that period and category, total the spending, compare it with the budget and look for trends or anomalies.
3. Answer with the total spent, the budget variance, categorization suggestions and personalized insights.

CATEGORIZATION CONTEXT:
- Current transaction patterns: {patterns}
- Available categories: {categories}
- Total transactions analyzed: {total_transactions}
- Budget categories: {total_budget_categories}

USER'S FINANCIAL DATA:
{data}

When asked about categorization, give specific suggestions based on descriptions and amounts.",
            patterns = patterns,
            categories = self.available_categories().join(", "),
            total_transactions = self.total_transactions,
            total_budget_categories = self.total_budget_categories,
            data = data,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    fn tx(id: i64, description: &str, amount: Decimal, category: &str) -> TransactionRow {
        TransactionRow {
            id,
            user_id: None,
            date: NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
            description: description.to_string(),
            amount,
            category: category.to_string(),
            mode: "UPI".to_string(),
            status: "completed".to_string(),
        }
    }

    fn context() -> FinancialContext {
        FinancialContext::new(
            vec![
                tx(3, "Cafe - Lunch", dec!(-200), "Food"),
                tx(2, "Salary Credit", dec!(5000), "Income"),
                tx(1, "Market - Groceries", dec!(-100), "Food"),
            ],
            vec![BudgetCategoryRow {
                id: 1,
                user_id: None,
                name: "Food".to_string(),
                budget: dec!(1000),
                spent: dec!(300),
                color: "#f97316".to_string(),
                icon: "utensils".to_string(),
            }],
            Vec::new(),
        )
    }

    #[test]
    fn patterns_group_by_category() {
        let patterns = context().patterns();
        let food = &patterns["Food"];
        assert_eq!(food.count, 2);
        assert_eq!(food.total_amount, dec!(-300));
        assert_eq!(food.avg_amount, dec!(-150));
        assert_eq!(food.descriptions, vec!["cafe - lunch", "market - groceries"]);
        assert_eq!(patterns["Income"].count, 1);
    }

    #[test]
    fn categories_keep_first_seen_order() {
        assert_eq!(context().available_categories(), vec!["Food", "Income"]);
    }

    #[test]
    fn summary_lists_budget_spend() {
        let summary = context().summary();
        assert_eq!(summary.total_transactions, 3);
        assert_eq!(summary.budget_categories.len(), 1);
        assert_eq!(summary.budget_categories[0].spent, dec!(300));
    }

    #[test]
    fn prompt_carries_counts_and_data() {
        let prompt = context().system_prompt().unwrap();
        assert!(prompt.contains("Available categories: Food, Income"));
        assert!(prompt.contains("Total transactions analyzed: 3"));
        assert!(prompt.contains("\"budgetCategories\""));
        assert!(prompt.contains("market - groceries"));
    }
}
