pub mod builder;
pub mod errors;
pub mod models;
pub mod parser;
pub mod services;
pub mod token;

pub use builder::*;
pub use errors::*;
pub use models::*;
pub use services::*;
pub use token::*;
