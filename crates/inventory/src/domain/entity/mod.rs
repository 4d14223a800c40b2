pub mod item;
pub mod item_group;
pub mod item_type;
pub mod loan;
pub mod request;
pub mod user;

pub use item::{Item, NewItem};
pub use item_group::{ItemGroup, NewItemGroup};
pub use item_type::{ItemType, NewItemType};
pub use loan::{Loan, NewLoan};
pub use request::{NewRequest, Request};
pub use user::{NewUserRecord, User, UserProfileUpdate};
