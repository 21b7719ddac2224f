pub mod db;
pub mod grouping;
pub mod models;
pub mod pagination;
pub mod repos;
pub mod standings;
