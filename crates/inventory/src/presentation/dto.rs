//! Data Transfer Objects
//!
//! Request bodies for the inventory endpoints, camelCase on the wire.
//! Responses serialize the domain entities directly.

use chrono::{DateTime, Utc};
use kernel::role::Role;
use serde::Deserialize;

use crate::application::RegisterUserInput;
use crate::domain::entity::{NewItem, NewItemGroup, NewItemType, NewLoan, NewRequest,
    UserProfileUpdate};

/// Body of an archive (DELETE) call; the note is mandatory
#[derive(Debug, Deserialize)]
pub struct ArchiveRequest {
    pub note: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemTypePayload {
    pub item_type_name: String,
}

impl From<ItemTypePayload> for NewItemType {
    fn from(p: ItemTypePayload) -> Self {
        Self {
            item_type_name: p.item_type_name,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemGroupPayload {
    pub item_group_name: String,
    pub item_type_id: i32,
    pub price: f64,
    pub quantity: i32,
}

impl From<ItemGroupPayload> for NewItemGroup {
    fn from(p: ItemGroupPayload) -> Self {
        Self {
            item_group_name: p.item_group_name,
            item_type_id: p.item_type_id,
            price: p.price,
            quantity: p.quantity,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemPayload {
    pub item_group_id: i32,
    pub serial_number: String,
}

impl From<ItemPayload> for NewItem {
    fn from(p: ItemPayload) -> Self {
        Self {
            item_group_id: p.item_group_id,
            serial_number: p.serial_number,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoanPayload {
    pub item_id: i32,
    pub borrower_id: i32,
    pub approver_id: Option<i32>,
    pub loan_date: DateTime<Utc>,
    pub return_date: Option<DateTime<Utc>>,
}

impl From<LoanPayload> for NewLoan {
    fn from(p: LoanPayload) -> Self {
        Self {
            item_id: p.item_id,
            borrower_id: p.borrower_id,
            approver_id: p.approver_id,
            loan_date: p.loan_date,
            return_date: p.return_date,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestPayload {
    pub item_group_id: i32,
    pub requester_id: i32,
    pub quantity: i32,
    pub message: Option<String>,
    pub request_date: DateTime<Utc>,
}

impl From<RequestPayload> for NewRequest {
    fn from(p: RequestPayload) -> Self {
        Self {
            item_group_id: p.item_group_id,
            requester_id: p.requester_id,
            quantity: p.quantity,
            message: p.message,
            request_date: p.request_date,
        }
    }
}

/// Creating a user carries the clear text password exactly once
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateUserPayload {
    pub user_name: String,
    pub first_name: String,
    pub last_name: String,
    pub role: Role,
    pub password: String,
}

impl From<CreateUserPayload> for RegisterUserInput {
    fn from(p: CreateUserPayload) -> Self {
        Self {
            user_name: p.user_name,
            first_name: p.first_name,
            last_name: p.last_name,
            role: p.role,
            password: p.password,
        }
    }
}

/// Updating a user touches the profile only, never the credentials
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUserPayload {
    pub user_name: String,
    pub first_name: String,
    pub last_name: String,
    pub role: Role,
}

impl From<UpdateUserPayload> for UserProfileUpdate {
    fn from(p: UpdateUserPayload) -> Self {
        Self {
            user_name: p.user_name,
            first_name: p.first_name,
            last_name: p.last_name,
            role: p.role,
        }
    }
}
