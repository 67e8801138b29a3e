//! Pure helpers shared by the console layers

pub mod email;
pub mod sort;

pub use email::{is_email, validate_email};
pub use sort::{
    compare_number, compare_text, next_sort, sort_by_key, sort_by_score_desc, SortDirection,
    SortKey,
};
