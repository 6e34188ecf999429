//! Studio-side media pipeline: capture sessions, upload coordination and
//! the image form-field boundary.

pub mod error;
pub mod field;
pub mod session;
pub mod uploader;

pub use error::{StudioError, StudioResult};
pub use field::ImageField;
pub use session::CropSession;
pub use uploader::{StoredObjectReference, Uploader};
