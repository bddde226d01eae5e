pub mod clock;
pub mod models;
pub mod session;
pub mod tasks;
