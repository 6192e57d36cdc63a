pub mod admin;
pub mod auth;
pub mod contact;
pub mod items;
pub mod swaps;
pub mod users;
