//! Query interpretation: what movie a question is about, and which of its
//! attributes it asks for. Both functions are pure.

mod category;
mod title;

pub use category::{CATEGORY_RULES, QueryCategory, determine_query_type};
pub use title::extract_title;
