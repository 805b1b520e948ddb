pub mod item;
pub mod user;

pub use item::{Item, ItemCounts, ItemInput, Partition};
pub use user::User;
