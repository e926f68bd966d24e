pub mod date_range;
pub mod errors;
pub mod pagination;

pub use date_range::*;
pub use errors::*;
pub use pagination::*;
