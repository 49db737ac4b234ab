pub mod download;
pub mod health;
pub mod upload;

pub use download::download_handler;
pub use health::health_handler;
pub use upload::upload_handler;
