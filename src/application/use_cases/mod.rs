mod download_object;
mod expire_objects;
mod upload_object;

pub use download_object::{DownloadError, DownloadObjectUseCase};
pub use expire_objects::{ExpireObjectsUseCase, SweepError, SweepOutcome};
pub use upload_object::{UploadError, UploadObjectUseCase};
