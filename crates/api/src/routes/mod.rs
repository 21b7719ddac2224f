pub mod applications;
pub mod assets;
pub mod auth;
pub mod awards;
pub mod clubs;
pub mod comments;
pub mod expenses;
pub mod matches;
pub mod notifications;
pub mod posts;
pub mod questions;
pub mod standings;
pub mod tournaments;
pub mod users;
