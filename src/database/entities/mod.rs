pub mod areas;
pub mod orders;
pub mod tables;
pub mod user_sessions;
pub mod users;
