//! Initial schema: funds and transactions.
//!
//! The `ON DELETE RESTRICT` foreign key on `transactions.fund_id` is the
//! schema-level backstop for the fund deletion rule: even if a transaction
//! insert commits between the repository's reference check and its delete,
//! the delete fails instead of leaving a dangling reference.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();
        db.execute_unprepared(INITIAL_SQL).await?;
        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();
        db.execute_unprepared(
            "DROP TABLE IF EXISTS transactions CASCADE; DROP TABLE IF EXISTS funds CASCADE;",
        )
        .await?;
        Ok(())
    }
}

const INITIAL_SQL: &str = r"
-- Funds: named buckets transactions are attributed to
CREATE TABLE funds (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    name TEXT NOT NULL,
    fund_type TEXT NOT NULL CHECK (fund_type IN (
        'operasional', 'sosial', 'zakat', 'wakaf', 'qurban', 'pembangunan', 'lainnya'
    )),
    is_restricted BOOLEAN NOT NULL DEFAULT FALSE,
    is_active BOOLEAN NOT NULL DEFAULT TRUE,
    description TEXT,
    order_index INTEGER NOT NULL DEFAULT 0,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    CONSTRAINT chk_funds_name_not_empty CHECK (length(btrim(name)) > 0)
);

-- Index for display ordering
CREATE INDEX idx_funds_order ON funds(order_index, id);

-- Transactions: dated, typed, categorized monetary records
CREATE TABLE transactions (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    transaction_type TEXT NOT NULL CHECK (transaction_type IN ('income', 'expense')),
    category TEXT NOT NULL,
    amount NUMERIC(16, 0) NOT NULL CHECK (amount >= 0),
    date DATE NOT NULL,
    fund_id UUID REFERENCES funds(id) ON DELETE RESTRICT,
    description TEXT NOT NULL CHECK (length(btrim(description)) > 0),
    donor_name TEXT,
    payment_method TEXT NOT NULL CHECK (payment_method IN ('cash', 'transfer', 'qris')),
    is_anonymous BOOLEAN NOT NULL DEFAULT FALSE,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT now()
);

-- Index for period reports (most common read)
CREATE INDEX idx_transactions_date ON transactions(date);

-- Index for the fund reference check on fund deletion
CREATE INDEX idx_transactions_fund ON transactions(fund_id) WHERE fund_id IS NOT NULL;

-- Index for category breakdowns
CREATE INDEX idx_transactions_type_category ON transactions(transaction_type, category);
";
