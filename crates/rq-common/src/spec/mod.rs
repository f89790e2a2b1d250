pub mod builder;
pub mod payload;
pub mod requirement;
pub mod validate;

pub use builder::{RangeField, RequirementBuilder};
pub use payload::SubmissionPayload;
pub use requirement::RequirementSpec;
pub use validate::{ValidationError, ValidationFailure};
