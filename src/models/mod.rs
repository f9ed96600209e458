pub mod recipe;
pub mod user;

pub use user::*;
