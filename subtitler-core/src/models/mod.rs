pub mod filters;
pub mod subtitle;

pub use filters::PostFilters;
pub use subtitle::{ContentKind, Subtitle};
