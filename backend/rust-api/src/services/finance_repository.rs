use crate::database::{schema, DatabasePool};
use crate::models::{BudgetCategoryRow, IncomeSourceRow, TransactionRow};
use async_trait::async_trait;
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Read access to one user's finance rows, plus schema installation.
#[async_trait]
pub trait FinanceRepository: Send + Sync {
    /// Newest first by date.
    async fn transactions(&self, user_id: Uuid) -> Result<Vec<TransactionRow>, RepositoryError>;

    async fn budget_categories(&self, user_id: Uuid) -> Result<Vec<BudgetCategoryRow>, RepositoryError>;

    async fn income_sources(&self, user_id: Uuid) -> Result<Vec<IncomeSourceRow>, RepositoryError>;

    async fn install_schema(&self) -> Result<(), RepositoryError>;
}

pub struct PgFinanceRepository {
    pool: DatabasePool,
}

impl PgFinanceRepository {
    pub fn new(pool: DatabasePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl FinanceRepository for PgFinanceRepository {
    async fn transactions(&self, user_id: Uuid) -> Result<Vec<TransactionRow>, RepositoryError> {
        let rows = sqlx::query_as::<_, TransactionRow>(
            "SELECT id, user_id, date, description, amount, category, mode, status
             FROM transactions WHERE user_id = $1 ORDER BY date DESC",
        )
        .bind(user_id)
        .fetch_all(&*self.pool)
        .await?;
        Ok(rows)
    }

    async fn budget_categories(&self, user_id: Uuid) -> Result<Vec<BudgetCategoryRow>, RepositoryError> {
        let rows = sqlx::query_as::<_, BudgetCategoryRow>(
            "SELECT id, user_id, name, budget, spent, color, icon
             FROM budget_categories WHERE user_id = $1",
        )
        .bind(user_id)
        .fetch_all(&*self.pool)
        .await?;
        Ok(rows)
    }

    async fn income_sources(&self, user_id: Uuid) -> Result<Vec<IncomeSourceRow>, RepositoryError> {
        let rows = sqlx::query_as::<_, IncomeSourceRow>(
            "SELECT id, user_id, name, amount, date FROM income_sources WHERE user_id = $1",
        )
        .bind(user_id)
        .fetch_all(&*self.pool)
        .await?;
        Ok(rows)
    }

    async fn install_schema(&self) -> Result<(), RepositoryError> {
        schema::install(&self.pool).await?;
        Ok(())
    }
}
