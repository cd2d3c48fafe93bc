pub mod apply;
pub mod parser;
pub mod types;

pub use apply::{is_searchable, matches_term, normalize_term};
pub use parser::parse_type_filter;
pub use types::TypeFilter;
