pub mod category_service;
pub mod comment_service;
pub mod dashboard_service;
pub mod error;
pub mod policy;
pub mod ticket_service;
pub mod user_service;

pub use error::{ServiceError, ServiceResult};
pub use policy::Actor;
