mod file_name;
mod storage_key;

pub use file_name::sanitize_file_name;
pub use storage_key::StorageKey;
