//! PostgreSQL Inventory Store
//!
//! Typed create/update statements per entity. The archive engine half of
//! this store lives in `infra::archive`.

use sqlx::PgPool;

use crate::domain::archive::ArchiveEntity;
use crate::domain::entity::{
    Item, ItemGroup, ItemType, Loan, NewItem, NewItemGroup, NewItemType, NewLoan, NewRequest,
    NewUserRecord, Request, User, UserProfileUpdate,
};
use crate::domain::repository::InventoryRepository;
use crate::error::{InventoryError, InventoryResult};

/// PostgreSQL inventory store
#[derive(Clone)]
pub struct PgInventoryStore {
    pool: PgPool,
}

impl PgInventoryStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub(crate) fn pool(&self) -> &PgPool {
        &self.pool
    }
}

impl InventoryRepository for PgInventoryStore {
    async fn create_item_type(&self, new: NewItemType) -> InventoryResult<ItemType> {
        let created = sqlx::query_as(
            "INSERT INTO item_types (item_type_name) VALUES ($1)
             RETURNING item_type_id, item_type_name",
        )
        .bind(&new.item_type_name)
        .fetch_one(&self.pool)
        .await?;
        Ok(created)
    }

    async fn update_item_type(&self, id: i32, new: NewItemType) -> InventoryResult<ItemType> {
        sqlx::query_as(
            "UPDATE item_types SET item_type_name = $2 WHERE item_type_id = $1
             RETURNING item_type_id, item_type_name",
        )
        .bind(id)
        .bind(&new.item_type_name)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(InventoryError::NotFound {
            kind: ItemType::KIND,
            id,
        })
    }

    async fn create_item_group(&self, new: NewItemGroup) -> InventoryResult<ItemGroup> {
        let created = sqlx::query_as(
            "INSERT INTO item_groups (item_group_name, item_type_id, price, quantity)
             VALUES ($1, $2, $3, $4)
             RETURNING item_group_id, item_group_name, item_type_id, price, quantity",
        )
        .bind(&new.item_group_name)
        .bind(new.item_type_id)
        .bind(new.price)
        .bind(new.quantity)
        .fetch_one(&self.pool)
        .await?;
        Ok(created)
    }

    async fn update_item_group(&self, id: i32, new: NewItemGroup) -> InventoryResult<ItemGroup> {
        sqlx::query_as(
            "UPDATE item_groups
             SET item_group_name = $2, item_type_id = $3, price = $4, quantity = $5
             WHERE item_group_id = $1
             RETURNING item_group_id, item_group_name, item_type_id, price, quantity",
        )
        .bind(id)
        .bind(&new.item_group_name)
        .bind(new.item_type_id)
        .bind(new.price)
        .bind(new.quantity)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(InventoryError::NotFound {
            kind: ItemGroup::KIND,
            id,
        })
    }

    async fn create_item(&self, new: NewItem) -> InventoryResult<Item> {
        let created = sqlx::query_as(
            "INSERT INTO items (item_group_id, serial_number) VALUES ($1, $2)
             RETURNING item_id, item_group_id, serial_number",
        )
        .bind(new.item_group_id)
        .bind(&new.serial_number)
        .fetch_one(&self.pool)
        .await?;
        Ok(created)
    }

    async fn update_item(&self, id: i32, new: NewItem) -> InventoryResult<Item> {
        sqlx::query_as(
            "UPDATE items SET item_group_id = $2, serial_number = $3 WHERE item_id = $1
             RETURNING item_id, item_group_id, serial_number",
        )
        .bind(id)
        .bind(new.item_group_id)
        .bind(&new.serial_number)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(InventoryError::NotFound {
            kind: Item::KIND,
            id,
        })
    }

    async fn create_user(&self, new: NewUserRecord) -> InventoryResult<User> {
        let created = sqlx::query_as(
            "INSERT INTO users
                 (user_name, first_name, last_name, role, password_hash,
                  totp_enabled, login_failed_count)
             VALUES ($1, $2, $3, $4, $5, FALSE, 0)
             RETURNING user_id, user_name, first_name, last_name, role",
        )
        .bind(&new.user_name)
        .bind(&new.first_name)
        .bind(&new.last_name)
        .bind(new.role)
        .bind(&new.password_hash)
        .fetch_one(&self.pool)
        .await?;
        Ok(created)
    }

    async fn update_user(&self, id: i32, update: UserProfileUpdate) -> InventoryResult<User> {
        sqlx::query_as(
            "UPDATE users
             SET user_name = $2, first_name = $3, last_name = $4, role = $5
             WHERE user_id = $1
             RETURNING user_id, user_name, first_name, last_name, role",
        )
        .bind(id)
        .bind(&update.user_name)
        .bind(&update.first_name)
        .bind(&update.last_name)
        .bind(update.role)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(InventoryError::NotFound {
            kind: User::KIND,
            id,
        })
    }

    async fn create_loan(&self, new: NewLoan) -> InventoryResult<Loan> {
        let created = sqlx::query_as(
            "INSERT INTO loans (item_id, borrower_id, approver_id, loan_date, return_date)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING loan_id, item_id, borrower_id, approver_id, loan_date, return_date",
        )
        .bind(new.item_id)
        .bind(new.borrower_id)
        .bind(new.approver_id)
        .bind(new.loan_date)
        .bind(new.return_date)
        .fetch_one(&self.pool)
        .await?;
        Ok(created)
    }

    async fn update_loan(&self, id: i32, new: NewLoan) -> InventoryResult<Loan> {
        sqlx::query_as(
            "UPDATE loans
             SET item_id = $2, borrower_id = $3, approver_id = $4,
                 loan_date = $5, return_date = $6
             WHERE loan_id = $1
             RETURNING loan_id, item_id, borrower_id, approver_id, loan_date, return_date",
        )
        .bind(id)
        .bind(new.item_id)
        .bind(new.borrower_id)
        .bind(new.approver_id)
        .bind(new.loan_date)
        .bind(new.return_date)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(InventoryError::NotFound {
            kind: Loan::KIND,
            id,
        })
    }

    async fn create_request(&self, new: NewRequest) -> InventoryResult<Request> {
        let created = sqlx::query_as(
            "INSERT INTO requests (item_group_id, requester_id, quantity, message, request_date)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING request_id, item_group_id, requester_id, quantity, message, request_date",
        )
        .bind(new.item_group_id)
        .bind(new.requester_id)
        .bind(new.quantity)
        .bind(&new.message)
        .bind(new.request_date)
        .fetch_one(&self.pool)
        .await?;
        Ok(created)
    }

    async fn update_request(&self, id: i32, new: NewRequest) -> InventoryResult<Request> {
        sqlx::query_as(
            "UPDATE requests
             SET item_group_id = $2, requester_id = $3, quantity = $4,
                 message = $5, request_date = $6
             WHERE request_id = $1
             RETURNING request_id, item_group_id, requester_id, quantity, message, request_date",
        )
        .bind(id)
        .bind(new.item_group_id)
        .bind(new.requester_id)
        .bind(new.quantity)
        .bind(&new.message)
        .bind(new.request_date)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(InventoryError::NotFound {
            kind: Request::KIND,
            id,
        })
    }

    async fn any_users(&self) -> InventoryResult<bool> {
        let exists: Option<i32> = sqlx::query_scalar("SELECT 1 FROM users LIMIT 1")
            .fetch_optional(&self.pool)
            .await?;
        Ok(exists.is_some())
    }
}
