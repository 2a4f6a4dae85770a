pub mod models;
pub mod services;

pub use models::{Child, ChildrenError};
pub use services::children::ChildrenService;
