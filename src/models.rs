pub mod requests;
pub mod stats;
pub mod users;
