pub mod cascade_deleter;
pub mod hierarchy;
pub mod tree_builder;

mod category_service;

pub use category_service::{parse_parent_filter, CategoryService};
