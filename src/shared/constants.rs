/// Separator between slugs in a materialized category path
pub const PATH_SEPARATOR: &str = "/";

/// Query value meaning "categories without a parent" in list filters
pub const ROOT_PARENT_FILTER: &str = "null";

/// Maximum length of a category name or slug
pub const MAX_NAME_LENGTH: u64 = 255;

/// Maximum length of a category image URL
pub const MAX_IMAGE_LENGTH: u64 = 500;

/// Deepest level a category may sit at (roots are level 0)
pub const MAX_CATEGORY_LEVEL: i32 = 63;
