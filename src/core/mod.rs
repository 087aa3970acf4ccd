mod join_service;
mod user_service;


pub use join_service::*;
pub use user_service::*;
