//! Transaction repository for finance record database operations.

use chrono::{NaiveDate, Utc};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, Set, SqlErr,
};
use uuid::Uuid;

use baitulmal_core::finance::{
    Category, DateRange, FinanceError, FinanceService, NewTransaction, PaymentMethod,
    Transaction, TransactionPatch, TransactionType,
};
use baitulmal_core::fund::FundError;
use baitulmal_shared::types::PageRequest;

use crate::entities::transactions;

/// Error types for transaction store operations.
#[derive(Debug, thiserror::Error)]
pub enum TransactionStoreError {
    /// Domain validation failure.
    #[error(transparent)]
    Domain(#[from] FinanceError),

    /// Transaction not found.
    #[error("Transaction not found: {0}")]
    NotFound(Uuid),

    /// Referenced fund does not exist.
    #[error(transparent)]
    Fund(#[from] FundError),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),

    /// A stored record could not be mapped back to the domain.
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Filter options for listing transactions.
#[derive(Debug, Clone, Default)]
pub struct TransactionFilter {
    /// Filter by fund attribution.
    pub fund_id: Option<Uuid>,
    /// Filter by transaction type.
    pub transaction_type: Option<TransactionType>,
    /// Filter by category.
    pub category: Option<Category>,
    /// Filter by date range start (inclusive).
    pub date_from: Option<NaiveDate>,
    /// Filter by date range end (inclusive).
    pub date_to: Option<NaiveDate>,
}

/// Transaction repository for CRUD operations.
#[derive(Debug, Clone)]
pub struct TransactionRepository {
    db: DatabaseConnection,
}

impl TransactionRepository {
    /// Creates a new transaction repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Creates a new transaction.
    ///
    /// # Errors
    ///
    /// Returns a validation error for malformed input, `FundError::NotFound`
    /// when `fund_id` references a nonexistent fund, or a database error.
    pub async fn create_transaction(
        &self,
        input: NewTransaction,
    ) -> Result<Transaction, TransactionStoreError> {
        FinanceService::validate_new_transaction(&input)?;

        let now = Utc::now().into();
        let model = transactions::ActiveModel {
            id: Set(Uuid::new_v4()),
            transaction_type: Set(input.transaction_type.as_str().to_string()),
            category: Set(input.category.as_str().to_string()),
            amount: Set(input.amount),
            date: Set(input.date),
            fund_id: Set(input.fund_id),
            description: Set(input.description.trim().to_string()),
            donor_name: Set(input.donor_name),
            payment_method: Set(input.payment_method.as_str().to_string()),
            is_anonymous: Set(input.is_anonymous),
            created_at: Set(now),
            updated_at: Set(now),
        };

        let result = model.insert(&self.db).await;
        match result {
            Ok(inserted) => to_domain(inserted),
            Err(err) if is_fk_violation(&err) => {
                let fund_id = input.fund_id.unwrap_or_default();
                Err(FundError::NotFound(fund_id).into())
            }
            Err(err) => Err(err.into()),
        }
    }

    /// Lists transactions matching the filter, newest first, paginated.
    ///
    /// Returns the page of transactions and the total match count.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list_transactions(
        &self,
        filter: &TransactionFilter,
        page: &PageRequest,
    ) -> Result<(Vec<Transaction>, u64), TransactionStoreError> {
        let mut query = transactions::Entity::find();

        if let Some(fund_id) = filter.fund_id {
            query = query.filter(transactions::Column::FundId.eq(fund_id));
        }
        if let Some(tx_type) = filter.transaction_type {
            query = query.filter(transactions::Column::TransactionType.eq(tx_type.as_str()));
        }
        if let Some(category) = filter.category {
            query = query.filter(transactions::Column::Category.eq(category.as_str()));
        }
        if let Some(date_from) = filter.date_from {
            query = query.filter(transactions::Column::Date.gte(date_from));
        }
        if let Some(date_to) = filter.date_to {
            query = query.filter(transactions::Column::Date.lte(date_to));
        }

        let paginator = query
            .order_by_desc(transactions::Column::Date)
            .order_by_desc(transactions::Column::CreatedAt)
            .paginate(&self.db, page.limit().max(1));

        let total = paginator.num_items().await?;
        let models = paginator
            .fetch_page(u64::from(page.page.saturating_sub(1)))
            .await?;

        let items = models
            .into_iter()
            .map(to_domain)
            .collect::<Result<Vec<_>, _>>()?;
        Ok((items, total))
    }

    /// Lists every transaction within a date range, for aggregation.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list_in_range(
        &self,
        range: &DateRange,
    ) -> Result<Vec<Transaction>, TransactionStoreError> {
        let models = transactions::Entity::find()
            .filter(transactions::Column::Date.gte(range.start()))
            .filter(transactions::Column::Date.lte(range.end()))
            .order_by_asc(transactions::Column::Date)
            .all(&self.db)
            .await?;

        models.into_iter().map(to_domain).collect()
    }

    /// Gets a transaction by ID.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if no transaction has the given ID.
    pub async fn get_transaction(&self, id: Uuid) -> Result<Transaction, TransactionStoreError> {
        let model = transactions::Entity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(TransactionStoreError::NotFound(id))?;

        to_domain(model)
    }

    /// Applies a field-level partial update.
    ///
    /// The effective (type, category) pair after the merge must still
    /// match the partition.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` for an unknown ID, a validation error for
    /// malformed fields, or a database error.
    pub async fn update_transaction(
        &self,
        id: Uuid,
        patch: TransactionPatch,
    ) -> Result<Transaction, TransactionStoreError> {
        let model = transactions::Entity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(TransactionStoreError::NotFound(id))?;

        let stored = to_domain(model.clone())?;
        let effective_type = patch.transaction_type.unwrap_or(stored.transaction_type);
        let effective_category = patch.category.unwrap_or(stored.category);
        FinanceService::validate_patch(&patch, effective_type, effective_category)?;

        let mut active: transactions::ActiveModel = model.into();
        active.transaction_type = Set(effective_type.as_str().to_string());
        active.category = Set(effective_category.as_str().to_string());

        if let Some(amount) = patch.amount {
            active.amount = Set(amount);
        }
        if let Some(date) = patch.date {
            active.date = Set(date);
        }
        if let Some(fund_id) = patch.fund_id {
            active.fund_id = Set(fund_id);
        }
        if let Some(description) = patch.description {
            active.description = Set(description.trim().to_string());
        }
        if let Some(donor_name) = patch.donor_name {
            active.donor_name = Set(donor_name);
        }
        if let Some(payment_method) = patch.payment_method {
            active.payment_method = Set(payment_method.as_str().to_string());
        }
        if let Some(is_anonymous) = patch.is_anonymous {
            active.is_anonymous = Set(is_anonymous);
        }
        active.updated_at = Set(Utc::now().into());

        let result = active.update(&self.db).await;
        match result {
            Ok(updated) => to_domain(updated),
            Err(err) if is_fk_violation(&err) => {
                Err(FundError::NotFound(patch.fund_id.flatten().unwrap_or_default()).into())
            }
            Err(err) => Err(err.into()),
        }
    }

    /// Deletes a transaction.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` for an unknown ID or a database error.
    pub async fn delete_transaction(&self, id: Uuid) -> Result<(), TransactionStoreError> {
        let result = transactions::Entity::delete_by_id(id).exec(&self.db).await?;

        if result.rows_affected == 0 {
            return Err(TransactionStoreError::NotFound(id));
        }
        Ok(())
    }

    /// Whether any transaction references the given fund.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn exists_for_fund(&self, fund_id: Uuid) -> Result<bool, TransactionStoreError> {
        let count = transactions::Entity::find()
            .filter(transactions::Column::FundId.eq(fund_id))
            .count(&self.db)
            .await?;

        Ok(count > 0)
    }
}

/// Converts a database model into the domain type.
fn to_domain(model: transactions::Model) -> Result<Transaction, TransactionStoreError> {
    let transaction_type: TransactionType = model
        .transaction_type
        .parse()
        .map_err(|_| bad_column("transaction_type", &model.transaction_type))?;
    let category: Category = model
        .category
        .parse()
        .map_err(|_| bad_column("category", &model.category))?;
    let payment_method: PaymentMethod = model
        .payment_method
        .parse()
        .map_err(|_| bad_column("payment_method", &model.payment_method))?;

    Ok(Transaction {
        id: model.id,
        transaction_type,
        category,
        amount: model.amount,
        date: model.date,
        fund_id: model.fund_id,
        description: model.description,
        donor_name: model.donor_name,
        payment_method,
        is_anonymous: model.is_anonymous,
    })
}

fn bad_column(column: &str, value: &str) -> TransactionStoreError {
    TransactionStoreError::Internal(format!("bad {column}: {value}"))
}

/// Whether a database error is a foreign key constraint violation.
fn is_fk_violation(err: &DbErr) -> bool {
    matches!(err.sql_err(), Some(SqlErr::ForeignKeyConstraintViolation(_)))
}
