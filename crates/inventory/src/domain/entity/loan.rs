//! Loan Entity
//!
//! A physical item lent to a user. `approver_id` is nullable: a loan a
//! user registered for themselves has no separate approver, and the
//! effective approver falls back to the borrower. The fallback is
//! computed when the loan is read, never stored.

use chrono::{DateTime, Utc};
use kernel::role::RoleSet;
use serde::ser::{Serialize, SerializeStruct, Serializer};

use crate::domain::archive::{ArchiveEntity, BlockingRef, EntityKind, ParentRef};

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct Loan {
    pub loan_id: i32,
    pub item_id: i32,
    pub borrower_id: i32,
    pub approver_id: Option<i32>,
    pub loan_date: DateTime<Utc>,
    pub return_date: Option<DateTime<Utc>>,
}

impl Loan {
    /// The effective approver: `approver_id` when set, else the borrower
    pub fn approved_by(&self) -> i32 {
        self.approver_id.unwrap_or(self.borrower_id)
    }
}

// Manual impl so the derived `approvedBy` field rides along with the
// raw columns.
impl Serialize for Loan {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut s = serializer.serialize_struct("Loan", 7)?;
        s.serialize_field("loanId", &self.loan_id)?;
        s.serialize_field("itemId", &self.item_id)?;
        s.serialize_field("borrowerId", &self.borrower_id)?;
        s.serialize_field("approverId", &self.approver_id)?;
        s.serialize_field("approvedBy", &self.approved_by())?;
        s.serialize_field("loanDate", &self.loan_date)?;
        s.serialize_field("returnDate", &self.return_date)?;
        s.end()
    }
}

/// Fields for creating or updating a loan
#[derive(Debug, Clone)]
pub struct NewLoan {
    pub item_id: i32,
    pub borrower_id: i32,
    pub approver_id: Option<i32>,
    pub loan_date: DateTime<Utc>,
    pub return_date: Option<DateTime<Utc>>,
}

impl ArchiveEntity for Loan {
    const KIND: EntityKind = EntityKind::Loan;
    const LIVE_TABLE: &'static str = "loans";
    const ARCHIVE_TABLE: &'static str = "archive_loans";
    const ID_COLUMN: &'static str = "loan_id";
    const COLUMNS: &'static [&'static str] = &[
        "loan_id",
        "item_id",
        "borrower_id",
        "approver_id",
        "loan_date",
        "return_date",
    ];

    const BLOCKING_REFS: &'static [BlockingRef] = &[];
    // A set approver_id is a real reference and must resolve on restore,
    // even though the column is nullable.
    const RESTORE_PARENTS: &'static [ParentRef] = &[
        ParentRef {
            fk_column: "item_id",
            parent_table: "items",
            parent_id_column: "item_id",
        },
        ParentRef {
            fk_column: "borrower_id",
            parent_table: "users",
            parent_id_column: "user_id",
        },
        ParentRef {
            fk_column: "approver_id",
            parent_table: "users",
            parent_id_column: "user_id",
        },
    ];

    const READ_ROLES: RoleSet = RoleSet::STAFF;
    const MUTATE_ROLES: RoleSet = RoleSet::STAFF;

    fn id(&self) -> i32 {
        self.loan_id
    }
}
