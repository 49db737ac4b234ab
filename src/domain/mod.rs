pub mod entities;
pub mod errors;
pub mod value_objects;

pub use errors::DomainError;
