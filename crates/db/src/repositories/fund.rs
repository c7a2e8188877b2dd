//! Fund repository for fund database operations.
//!
//! The delete path is the one place mutation ordering matters: the
//! reference check and the delete run inside a single database transaction,
//! and the schema's `ON DELETE RESTRICT` foreign key catches the remaining
//! window where a concurrent insert commits in between.

use chrono::Utc;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, Set, SqlErr, TransactionTrait,
};
use uuid::Uuid;

use baitulmal_core::fund::{Fund, FundError, FundPatch, FundService, FundType, NewFund};

use crate::entities::{funds, transactions};

/// Error types for fund store operations.
#[derive(Debug, thiserror::Error)]
pub enum FundStoreError {
    /// Domain rule violation (validation, in-use, not found).
    #[error(transparent)]
    Domain(#[from] FundError),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),

    /// A stored record could not be mapped back to the domain.
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Fund repository for CRUD and reorder operations.
#[derive(Debug, Clone)]
pub struct FundRepository {
    db: DatabaseConnection,
}

impl FundRepository {
    /// Creates a new fund repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Creates a new fund, appended to the end of the display order.
    ///
    /// # Errors
    ///
    /// Returns an error if validation fails or the database operation fails.
    pub async fn create_fund(&self, input: NewFund) -> Result<Fund, FundStoreError> {
        FundService::validate_new_fund(&input)?;

        let last = funds::Entity::find()
            .order_by_desc(funds::Column::OrderIndex)
            .one(&self.db)
            .await?;
        let order_index = last.map_or(0, |f| f.order_index.saturating_add(1));

        let now = Utc::now().into();
        let model = funds::ActiveModel {
            id: Set(Uuid::new_v4()),
            name: Set(input.name.trim().to_string()),
            fund_type: Set(input.fund_type.as_str().to_string()),
            is_restricted: Set(input.is_restricted),
            is_active: Set(true),
            description: Set(input.description),
            order_index: Set(order_index),
            created_at: Set(now),
            updated_at: Set(now),
        };

        let inserted = model.insert(&self.db).await?;
        to_domain(inserted)
    }

    /// Lists funds in display order.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list_funds(&self, include_inactive: bool) -> Result<Vec<Fund>, FundStoreError> {
        let mut query = funds::Entity::find();
        if !include_inactive {
            query = query.filter(funds::Column::IsActive.eq(true));
        }

        let models = query
            .order_by_asc(funds::Column::OrderIndex)
            .order_by_asc(funds::Column::Id)
            .all(&self.db)
            .await?;

        models.into_iter().map(to_domain).collect()
    }

    /// Gets a fund by ID.
    ///
    /// # Errors
    ///
    /// Returns `FundError::NotFound` if no fund has the given ID.
    pub async fn get_fund(&self, id: Uuid) -> Result<Fund, FundStoreError> {
        let model = funds::Entity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(FundError::NotFound(id))?;

        to_domain(model)
    }

    /// Applies a field-level partial update.
    ///
    /// # Errors
    ///
    /// Returns an error if the fund does not exist, a patched field fails
    /// validation, or the database operation fails.
    pub async fn update_fund(&self, id: Uuid, patch: FundPatch) -> Result<Fund, FundStoreError> {
        let model = funds::Entity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(FundError::NotFound(id))?;

        let mut active: funds::ActiveModel = model.into();

        if let Some(name) = patch.name {
            FundService::validate_name(&name)?;
            active.name = Set(name.trim().to_string());
        }
        if let Some(fund_type) = patch.fund_type {
            active.fund_type = Set(fund_type.as_str().to_string());
        }
        if let Some(is_restricted) = patch.is_restricted {
            active.is_restricted = Set(is_restricted);
        }
        if let Some(is_active) = patch.is_active {
            active.is_active = Set(is_active);
        }
        if let Some(description) = patch.description {
            active.description = Set(description);
        }
        active.updated_at = Set(Utc::now().into());

        let updated = active.update(&self.db).await?;
        to_domain(updated)
    }

    /// Deletes a fund that no transaction references.
    ///
    /// The reference check and the delete are one logical unit: both run
    /// inside a single database transaction.
    ///
    /// # Errors
    ///
    /// Returns `FundError::FundInUse` if any transaction references the
    /// fund, `FundError::NotFound` if it does not exist.
    pub async fn delete_fund(&self, id: Uuid) -> Result<(), FundStoreError> {
        let txn = self.db.begin().await?;

        let fund = funds::Entity::find_by_id(id)
            .one(&txn)
            .await?
            .ok_or(FundError::NotFound(id))?;

        let references = transactions::Entity::find()
            .filter(transactions::Column::FundId.eq(id))
            .count(&txn)
            .await?;

        FundService::validate_delete(fund.id, references)?;

        let result = funds::Entity::delete_by_id(id).exec(&txn).await;
        match result {
            Ok(_) => {}
            // A transaction insert committed between the check and the
            // delete; the RESTRICT foreign key turned it into a constraint
            // violation instead of a dangling reference.
            Err(err) if is_fk_violation(&err) => {
                tracing::warn!(fund_id = %id, "Fund delete lost race against transaction insert");
                txn.rollback().await?;
                return Err(FundError::FundInUse {
                    fund_id: id,
                    references: 1,
                }
                .into());
            }
            Err(err) => return Err(err.into()),
        }

        txn.commit().await?;
        Ok(())
    }

    /// Renumbers the display order to match `ordered_ids`.
    ///
    /// Applied as one atomic batch so a concurrent reader never observes a
    /// partially renumbered sequence.
    ///
    /// # Errors
    ///
    /// Returns `FundError::NotFound` if any ID does not exist; no
    /// renumbering is applied in that case.
    pub async fn reorder_funds(&self, ordered_ids: &[Uuid]) -> Result<(), FundStoreError> {
        let txn = self.db.begin().await?;

        for (position, id) in ordered_ids.iter().enumerate() {
            let index = i32::try_from(position)
                .map_err(|_| FundStoreError::Internal("order index overflow".to_string()))?;

            let result = funds::Entity::update_many()
                .col_expr(funds::Column::OrderIndex, Expr::value(index))
                .col_expr(
                    funds::Column::UpdatedAt,
                    Expr::value(sea_orm::prelude::DateTimeWithTimeZone::from(Utc::now())),
                )
                .filter(funds::Column::Id.eq(*id))
                .exec(&txn)
                .await?;

            if result.rows_affected == 0 {
                txn.rollback().await?;
                return Err(FundError::NotFound(*id).into());
            }
        }

        txn.commit().await?;
        Ok(())
    }
}

/// Converts a database model into the domain type.
fn to_domain(model: funds::Model) -> Result<Fund, FundStoreError> {
    let fund_type: FundType = model
        .fund_type
        .parse()
        .map_err(|_| FundStoreError::Internal(format!("bad fund_type: {}", model.fund_type)))?;

    Ok(Fund {
        id: model.id,
        name: model.name,
        fund_type,
        is_restricted: model.is_restricted,
        is_active: model.is_active,
        description: model.description,
        order_index: model.order_index,
    })
}

/// Whether a database error is a foreign key constraint violation.
fn is_fk_violation(err: &DbErr) -> bool {
    matches!(err.sql_err(), Some(SqlErr::ForeignKeyConstraintViolation(_)))
}
