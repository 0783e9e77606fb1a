//! Route handlers, one module per surface

pub mod alerts;
pub mod health;
pub mod settings;
pub mod status;
