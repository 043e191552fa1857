mod category;

pub use category::{Category, CategoryFilter, ParentFilter};
