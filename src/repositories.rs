pub mod requests;
pub mod users;
