pub mod set_service;

pub use set_service::{SetEdit, SetService};
