pub mod document;
pub mod handle;
pub mod selector;
pub mod validity;

pub use document::{Document, FormSubmission, NodeId};
pub use handle::DocumentHandle;
pub use selector::Selector;
pub use validity::ConstraintViolation;
