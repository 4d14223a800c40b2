//! Cross-module tests: descriptor tables, generated statement text, and
//! serialization shapes. Everything here runs without a database.

use chrono::{TimeZone, Utc};
use kernel::role::{Role, RoleSet};

use crate::domain::archive::{ArchiveEntity, Archived, BlockingRef};
use crate::domain::entity::{Item, ItemGroup, ItemType, Loan, Request, User};
use crate::infra::archive::sql;

#[test]
fn test_archive_statement_text() {
    assert_eq!(
        sql::insert_archive::<ItemType>(),
        "INSERT INTO archive_item_types (item_type_id, item_type_name, deleted_at, archive_note) \
         SELECT item_type_id, item_type_name, $2, $3 FROM item_types WHERE item_type_id = $1"
    );
    assert_eq!(
        sql::delete_live::<ItemType>(),
        "DELETE FROM item_types WHERE item_type_id = $1"
    );
    assert_eq!(
        sql::select_live_for_update::<Item>(),
        "SELECT item_id, item_group_id, serial_number FROM items \
         WHERE item_id = $1 FOR UPDATE"
    );
}

#[test]
fn test_restore_statement_text() {
    assert_eq!(
        sql::insert_restored::<Item>(),
        "INSERT INTO items (item_id, item_group_id, serial_number) \
         SELECT item_id, item_group_id, serial_number FROM archive_items WHERE item_id = $1"
    );
    // the sequence resync happens inside the restore transaction
    assert_eq!(
        sql::resync_sequence::<Item>(),
        "SELECT setval(pg_get_serial_sequence('items', 'item_id'), \
         (SELECT COALESCE(MAX(item_id), 1) FROM items))"
    );
    assert_eq!(
        sql::live_id_taken::<Item>(),
        "SELECT 1 FROM items WHERE item_id = $1 LIMIT 1"
    );
}

#[test]
fn test_parent_check_tolerates_null_fk() {
    // the approver edge must pass when approver_id is NULL and resolve
    // when it is set
    let approver = &Loan::RESTORE_PARENTS[2];
    assert_eq!(approver.fk_column, "approver_id");
    assert_eq!(
        sql::parent_satisfied::<Loan>(approver),
        "SELECT (a.approver_id IS NULL) OR EXISTS \
         (SELECT 1 FROM users p WHERE p.user_id = a.approver_id) \
         FROM archive_loans a WHERE a.loan_id = $1"
    );
}

#[test]
fn test_blocking_reference_edges() {
    assert_eq!(
        ItemType::BLOCKING_REFS,
        &[BlockingRef {
            table: "item_groups",
            column: "item_type_id"
        }]
    );

    let group_refs: Vec<&str> = ItemGroup::BLOCKING_REFS.iter().map(|r| r.table).collect();
    assert_eq!(group_refs, vec!["items", "requests"]);

    let user_refs: Vec<(&str, &str)> = User::BLOCKING_REFS
        .iter()
        .map(|r| (r.table, r.column))
        .collect();
    assert_eq!(
        user_refs,
        vec![
            ("loans", "borrower_id"),
            ("loans", "approver_id"),
            ("requests", "requester_id"),
        ]
    );

    // leaf kinds block nothing
    assert!(Loan::BLOCKING_REFS.is_empty());
    assert!(Request::BLOCKING_REFS.is_empty());
}

#[test]
fn test_restore_parent_edges_mirror_fks() {
    assert!(ItemType::RESTORE_PARENTS.is_empty());
    assert!(User::RESTORE_PARENTS.is_empty());

    let item_parents: Vec<&str> = Item::RESTORE_PARENTS
        .iter()
        .map(|p| p.parent_table)
        .collect();
    assert_eq!(item_parents, vec!["item_groups"]);

    let loan_parents: Vec<&str> = Loan::RESTORE_PARENTS
        .iter()
        .map(|p| p.parent_table)
        .collect();
    assert_eq!(loan_parents, vec!["items", "users", "users"]);

    let request_parents: Vec<&str> = Request::RESTORE_PARENTS
        .iter()
        .map(|p| p.parent_table)
        .collect();
    assert_eq!(request_parents, vec!["item_groups", "users"]);
}

#[test]
fn test_role_allow_lists() {
    // catalog is readable by everyone, mutable by staff
    assert_eq!(ItemType::READ_ROLES, RoleSet::ALL);
    assert_eq!(ItemGroup::READ_ROLES, RoleSet::ALL);
    assert_eq!(Item::READ_ROLES, RoleSet::ALL);
    assert_eq!(Item::MUTATE_ROLES, RoleSet::STAFF);

    // people-related kinds are staff-only reads
    assert_eq!(Loan::READ_ROLES, RoleSet::STAFF);
    assert_eq!(Request::READ_ROLES, RoleSet::STAFF);
    assert_eq!(User::READ_ROLES, RoleSet::STAFF);

    // only admins touch user records
    assert_eq!(User::MUTATE_ROLES, RoleSet::ADMIN_ONLY);
    assert!(!User::MUTATE_ROLES.contains(Role::Instruktoer));
}

#[test]
fn test_user_columns_carry_credentials() {
    // the archive engine must move the credential columns even though
    // the API representation never exposes them
    for col in [
        "password_hash",
        "totp_secret",
        "totp_enabled",
        "login_failed_count",
        "locked_until",
    ] {
        assert!(User::COLUMNS.contains(&col), "missing column {col}");
    }
}

#[test]
fn test_user_serialization_excludes_credentials() {
    let user = User {
        user_id: 1,
        user_name: "bo".to_string(),
        first_name: "Bo".to_string(),
        last_name: "Holm".to_string(),
        role: Role::Admin,
    };
    let json = serde_json::to_string(&user).unwrap();
    assert!(json.contains(r#""userName":"bo""#));
    assert!(!json.contains("password"));
    assert!(!json.contains("totp"));
}

#[test]
fn test_loan_approver_fallback() {
    let mut loan = Loan {
        loan_id: 1,
        item_id: 2,
        borrower_id: 3,
        approver_id: None,
        loan_date: Utc.with_ymd_and_hms(2026, 1, 12, 9, 0, 0).unwrap(),
        return_date: None,
    };

    // unapproved loan falls back to the borrower
    assert_eq!(loan.approved_by(), 3);

    loan.approver_id = Some(9);
    assert_eq!(loan.approved_by(), 9);

    // the raw value and the derived value both serialize
    let json = serde_json::to_value(&loan).unwrap();
    assert_eq!(json["approverId"], 9);
    assert_eq!(json["approvedBy"], 9);

    loan.approver_id = None;
    let json = serde_json::to_value(&loan).unwrap();
    assert_eq!(json["approverId"], serde_json::Value::Null);
    assert_eq!(json["approvedBy"], 3);
}

#[test]
fn test_archived_serialization_shape() {
    let archived = Archived {
        entity: ItemType {
            item_type_id: 4,
            item_type_name: "Skærm".to_string(),
        },
        deleted_at: Utc.with_ymd_and_hms(2026, 2, 1, 12, 0, 0).unwrap(),
        archive_note: "udgået model".to_string(),
    };

    let json = serde_json::to_value(&archived).unwrap();
    // entity fields flatten to the top level
    assert_eq!(json["itemTypeId"], 4);
    assert_eq!(json["itemTypeName"], "Skærm");
    assert_eq!(json["archiveNote"], "udgået model");
    assert!(json["deletedAt"].is_string());
}
