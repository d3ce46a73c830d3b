pub mod db;
pub mod errors;
pub mod tracker;
pub mod user;
