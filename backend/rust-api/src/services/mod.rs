pub mod completion;
pub mod finance_repository;
pub mod financial_context;

pub use completion::{CompletionClient, CompletionError, OpenAiClient};
pub use finance_repository::{FinanceRepository, PgFinanceRepository, RepositoryError};
pub use financial_context::{FinancialContext, TransactionPattern};
