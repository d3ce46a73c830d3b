pub mod auth_gate;
pub mod errors;
pub mod openapi;
pub mod routes;
pub mod startup;
pub mod state;
pub mod validate;

pub use startup::run;
