use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::{Validate, ValidateUrl, ValidationError};

use crate::features::categories::models::Category;
use crate::shared::constants::{MAX_IMAGE_LENGTH, MAX_NAME_LENGTH};
use crate::shared::validation::SLUG_REGEX;

/// Empty clears the image; anything else must be a URL
fn validate_image(image: &str) -> Result<(), ValidationError> {
    if image.is_empty() || image.validate_url() {
        Ok(())
    } else {
        Err(ValidationError::new("url").with_message("image must be a valid URL".into()))
    }
}

/// `null` and the nil UUID both mean "detach to root"
fn deserialize_parent_update<'de, D>(deserializer: D) -> Result<Option<Option<Uuid>>, D::Error>
where
    D: Deserializer<'de>,
{
    let value: Option<Uuid> = Option::deserialize(deserializer)?;
    Ok(Some(value.filter(|id| !id.is_nil())))
}

// Create request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateCategoryDto {
    #[validate(length(min = 1, max = MAX_NAME_LENGTH))]
    pub name: String,

    /// Globally unique, lowercase alphanumeric with single hyphens
    #[validate(
        length(min = 1, max = MAX_NAME_LENGTH),
        regex(path = *SLUG_REGEX, message = "slug must be lowercase alphanumeric words separated by single hyphens")
    )]
    pub slug: String,

    pub description: Option<String>,

    #[validate(length(max = MAX_IMAGE_LENGTH), custom(function = "validate_image"))]
    pub image: Option<String>,

    /// Parent category; omit for a root category
    pub parent_id: Option<Uuid>,
}

/// How an update touches the parent reference
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParentChange {
    Keep,
    Detach,
    MoveTo(Uuid),
}

// Update request; absent fields are left untouched
#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateCategoryDto {
    /// An empty string overwrites the name
    #[validate(length(max = MAX_NAME_LENGTH))]
    pub name: Option<String>,

    #[validate(
        length(min = 1, max = MAX_NAME_LENGTH),
        regex(path = *SLUG_REGEX, message = "slug must be lowercase alphanumeric words separated by single hyphens")
    )]
    pub slug: Option<String>,

    pub description: Option<String>,

    #[validate(length(max = MAX_IMAGE_LENGTH), custom(function = "validate_image"))]
    pub image: Option<String>,

    /// New parent. `null` or the nil UUID detaches the category to the root level.
    #[serde(default, deserialize_with = "deserialize_parent_update")]
    #[schema(value_type = Option<Uuid>)]
    pub parent_id: Option<Option<Uuid>>,
}

impl UpdateCategoryDto {
    pub fn parent_change(&self) -> ParentChange {
        match self.parent_id {
            None => ParentChange::Keep,
            Some(None) => ParentChange::Detach,
            Some(Some(id)) => ParentChange::MoveTo(id),
        }
    }
}

/// Query params for listing categories
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListCategoriesQuery {
    /// Parent id, or `null` for root categories only
    pub parent_id: Option<String>,
    /// Depth from the root (root = 0); ignored unless it is an integer
    pub level: Option<String>,
}

/// Query params for searching categories
#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct SearchCategoriesQuery {
    /// Case-insensitive substring matched against name and description
    pub q: Option<String>,
}

/// Query params for deleting a category
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct DeleteCategoryQuery {
    /// Exactly `true` also deletes every descendant; any other value does not
    #[serde(rename = "deleteChildren")]
    pub delete_children: Option<String>,
}

impl DeleteCategoryQuery {
    pub fn cascade(&self) -> bool {
        self.delete_children.as_deref() == Some("true")
    }
}

/// Response DTO for category
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CategoryResponseDto {
    pub id: Uuid,
    pub name: String,
    pub slug: String,
    pub description: Option<String>,
    pub image: Option<String>,
    pub parent_id: Option<Uuid>,
    pub level: i32,
    pub path: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Category> for CategoryResponseDto {
    fn from(c: Category) -> Self {
        Self {
            id: c.id,
            name: c.name,
            slug: c.slug,
            description: c.description,
            image: c.image,
            parent_id: c.parent_id,
            level: c.level,
            path: c.path,
            created_at: c.created_at,
            updated_at: c.updated_at,
        }
    }
}

/// Category with its parent and direct children attached
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CategoryDetailDto {
    #[serde(flatten)]
    pub category: CategoryResponseDto,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent: Option<CategoryResponseDto>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<CategoryResponseDto>,
}

/// Response DTO for category tree (hierarchical structure)
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[schema(no_recursion)]
pub struct CategoryTreeDto {
    pub id: Uuid,
    pub name: String,
    pub slug: String,
    pub description: Option<String>,
    pub image: Option<String>,
    pub parent_id: Option<Uuid>,
    pub level: i32,
    pub path: String,
    pub children: Vec<CategoryTreeDto>,
}

impl CategoryTreeDto {
    pub fn from_parts(category: Category, children: Vec<CategoryTreeDto>) -> Self {
        Self {
            id: category.id,
            name: category.name,
            slug: category.slug,
            description: category.description,
            image: category.image,
            parent_id: category.parent_id,
            level: category.level,
            path: category.path,
            children,
        }
    }
}

/// Number of posts linked to a category
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct PostCountDto {
    pub category_id: Uuid,
    pub post_count: i64,
}
