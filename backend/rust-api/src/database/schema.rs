//! Finance schema: three owner-scoped tables with row-level security, and the two stored
//! functions clients call to write an income or a payment as one unit.
//!
//! Every statement is idempotent so setup can be re-run against a live database.

use sqlx::PgPool;

const TABLES: &[&str] = &[
    r#"CREATE TABLE IF NOT EXISTS budget_categories (
        id BIGSERIAL PRIMARY KEY,
        user_id UUID REFERENCES auth.users(id) ON DELETE CASCADE,
        name TEXT NOT NULL,
        budget DECIMAL(10,2) NOT NULL DEFAULT 0,
        spent DECIMAL(10,2) NOT NULL DEFAULT 0,
        color TEXT NOT NULL DEFAULT '#3B82F6',
        icon TEXT NOT NULL DEFAULT '💰',
        created_at TIMESTAMPTZ NOT NULL DEFAULT TIMEZONE('utc'::text, NOW()),
        updated_at TIMESTAMPTZ NOT NULL DEFAULT TIMEZONE('utc'::text, NOW())
    )"#,
    r#"CREATE TABLE IF NOT EXISTS income_sources (
        id BIGSERIAL PRIMARY KEY,
        user_id UUID REFERENCES auth.users(id) ON DELETE CASCADE,
        name TEXT NOT NULL,
        amount DECIMAL(10,2) NOT NULL DEFAULT 0,
        date DATE NOT NULL,
        created_at TIMESTAMPTZ NOT NULL DEFAULT TIMEZONE('utc'::text, NOW()),
        updated_at TIMESTAMPTZ NOT NULL DEFAULT TIMEZONE('utc'::text, NOW())
    )"#,
    r#"CREATE TABLE IF NOT EXISTS transactions (
        id BIGSERIAL PRIMARY KEY,
        user_id UUID REFERENCES auth.users(id) ON DELETE CASCADE,
        date DATE NOT NULL,
        description TEXT NOT NULL,
        amount DECIMAL(10,2) NOT NULL,
        category TEXT NOT NULL,
        mode TEXT NOT NULL DEFAULT 'UPI',
        status TEXT NOT NULL DEFAULT 'completed',
        created_at TIMESTAMPTZ NOT NULL DEFAULT TIMEZONE('utc'::text, NOW()),
        updated_at TIMESTAMPTZ NOT NULL DEFAULT TIMEZONE('utc'::text, NOW())
    )"#,
];

const INDEXES: &[&str] = &[
    "CREATE INDEX IF NOT EXISTS idx_budget_categories_user_id ON budget_categories(user_id)",
    "CREATE INDEX IF NOT EXISTS idx_income_sources_user_id ON income_sources(user_id)",
    "CREATE INDEX IF NOT EXISTS idx_transactions_user_id ON transactions(user_id)",
    "CREATE INDEX IF NOT EXISTS idx_transactions_date ON transactions(date)",
    "CREATE INDEX IF NOT EXISTS idx_transactions_category ON transactions(category)",
];

/// (table, noun used in policy names)
const OWNED_TABLES: &[(&str, &str)] = &[
    ("budget_categories", "budget categories"),
    ("income_sources", "income sources"),
    ("transactions", "transactions"),
];

const RECORD_INCOME: &str = r#"CREATE OR REPLACE FUNCTION record_income(
        p_user_id UUID,
        p_name TEXT,
        p_amount NUMERIC,
        p_date DATE,
        p_description TEXT,
        p_category TEXT,
        p_mode TEXT,
        p_status TEXT
    ) RETURNS JSON
    LANGUAGE plpgsql
    SECURITY INVOKER
    AS $$
    DECLARE
        v_income income_sources;
        v_transaction transactions;
    BEGIN
        INSERT INTO income_sources (user_id, name, amount, date)
        VALUES (p_user_id, p_name, p_amount, p_date)
        RETURNING * INTO v_income;

        INSERT INTO transactions (user_id, date, description, amount, category, mode, status)
        VALUES (p_user_id, p_date, p_description, p_amount, p_category, p_mode, p_status)
        RETURNING * INTO v_transaction;

        RETURN json_build_object('income', row_to_json(v_income), 'transaction', row_to_json(v_transaction));
    END;
    $$"#;

const RECORD_PAYMENT: &str = r#"CREATE OR REPLACE FUNCTION record_payment(
        p_user_id UUID,
        p_date DATE,
        p_description TEXT,
        p_amount NUMERIC,
        p_category TEXT,
        p_mode TEXT,
        p_status TEXT,
        p_budget_id BIGINT,
        p_spent_delta NUMERIC
    ) RETURNS JSON
    LANGUAGE plpgsql
    SECURITY INVOKER
    AS $$
    DECLARE
        v_transaction transactions;
        v_budget budget_categories;
    BEGIN
        INSERT INTO transactions (user_id, date, description, amount, category, mode, status)
        VALUES (p_user_id, p_date, p_description, p_amount, p_category, p_mode, p_status)
        RETURNING * INTO v_transaction;

        IF p_budget_id IS NOT NULL THEN
            UPDATE budget_categories
            SET spent = spent + p_spent_delta, updated_at = TIMEZONE('utc'::text, NOW())
            WHERE id = p_budget_id AND user_id = p_user_id
            RETURNING * INTO v_budget;
        END IF;

        RETURN json_build_object(
            'transaction', row_to_json(v_transaction),
            'budget', CASE WHEN v_budget.id IS NULL THEN NULL ELSE row_to_json(v_budget) END
        );
    END;
    $$"#;

fn policy_statements(table: &str, noun: &str) -> Vec<String> {
    let mut statements = vec![format!("ALTER TABLE {} ENABLE ROW LEVEL SECURITY", table)];
    for (verb, command, clause) in [
        ("view", "SELECT", "USING"),
        ("insert", "INSERT", "WITH CHECK"),
        ("update", "UPDATE", "USING"),
        ("delete", "DELETE", "USING"),
    ] {
        let name = format!("Users can {} their own {}", verb, noun);
        statements.push(format!("DROP POLICY IF EXISTS \"{}\" ON {}", name, table));
        statements.push(format!(
            "CREATE POLICY \"{}\" ON {} FOR {} {} (auth.uid() = user_id)",
            name, table, command, clause
        ));
    }
    statements
}

/// All setup statements in execution order.
pub fn statements() -> Vec<String> {
    let mut all: Vec<String> = TABLES.iter().map(|s| s.to_string()).collect();
    for (table, noun) in OWNED_TABLES {
        all.extend(policy_statements(table, noun));
    }
    all.extend(INDEXES.iter().map(|s| s.to_string()));
    all.push(RECORD_INCOME.to_string());
    all.push(RECORD_PAYMENT.to_string());
    all
}

/// Runs every setup statement inside one transaction; nothing is applied on failure.
pub async fn install(pool: &PgPool) -> Result<(), sqlx::Error> {
    let statements = statements();
    let mut tx = pool.begin().await?;
    for statement in &statements {
        sqlx::query(statement).execute(&mut *tx).await?;
    }
    tx.commit().await?;
    tracing::info!("Finance schema installed ({} statements)", statements.len());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_table_gets_rls_and_four_policies() {
        let all = statements();
        for (table, _) in OWNED_TABLES {
            assert!(all.contains(&format!("ALTER TABLE {} ENABLE ROW LEVEL SECURITY", table)));
            let creates = all
                .iter()
                .filter(|s| s.starts_with("CREATE POLICY") && s.contains(&format!(" ON {} ", table)))
                .count();
            assert_eq!(creates, 4, "{}", table);
        }
    }

    #[test]
    fn policies_are_dropped_before_being_created() {
        let all = statements();
        let drop = all
            .iter()
            .position(|s| s == "DROP POLICY IF EXISTS \"Users can view their own transactions\" ON transactions")
            .expect("drop statement");
        let create = all
            .iter()
            .position(|s| s.starts_with("CREATE POLICY \"Users can view their own transactions\""))
            .expect("create statement");
        assert!(drop < create);
    }

    #[test]
    fn tables_come_first_and_functions_last() {
        let all = statements();
        assert!(all[0].contains("budget_categories"));
        assert!(all[all.len() - 2].contains("FUNCTION record_income"));
        assert!(all[all.len() - 1].contains("FUNCTION record_payment"));
    }
}
