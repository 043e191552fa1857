use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    Json,
};
use uuid::Uuid;
use validator::Validate;

use crate::core::error::{AppError, Result};
use crate::core::extractor::{AppJson, AppPath, AppQuery};
use crate::features::auth::model::AuthenticatedUser;
use crate::features::categories::dtos::{
    CategoryDetailDto, CategoryResponseDto, CategoryTreeDto, CreateCategoryDto,
    DeleteCategoryQuery, ListCategoriesQuery, PostCountDto, SearchCategoriesQuery,
    UpdateCategoryDto,
};
use crate::features::categories::services::{parse_parent_filter, CategoryService};
use crate::shared::types::ApiResponse;

/// A level that is not an integer is ignored rather than rejected
fn parse_level(raw: &str) -> Option<i32> {
    raw.trim().parse::<i32>().ok()
}

/// List categories
///
/// Flat list ordered by name. An empty `parent_id` is ignored; `null` selects root categories.
/// A non-numeric `level` is ignored.
#[utoipa::path(
    get,
    path = "/api/categories",
    params(ListCategoriesQuery),
    responses(
        (status = 200, description = "List of categories", body = ApiResponse<Vec<CategoryResponseDto>>),
        (status = 400, description = "Invalid filter")
    ),
    tag = "categories"
)]
pub async fn list_categories(
    State(service): State<Arc<CategoryService>>,
    AppQuery(query): AppQuery<ListCategoriesQuery>,
) -> Result<Json<ApiResponse<Vec<CategoryResponseDto>>>> {
    let parent = match query.parent_id.as_deref().map(str::trim) {
        None | Some("") => None,
        Some(raw) => Some(parse_parent_filter(raw)?),
    };
    let level = query.level.as_deref().and_then(parse_level);

    let categories = service.list(parent, level).await?;
    Ok(Json(ApiResponse::listing(categories)))
}

/// List root categories with their direct children
#[utoipa::path(
    get,
    path = "/api/categories/roots",
    responses(
        (status = 200, description = "Root categories", body = ApiResponse<Vec<CategoryDetailDto>>)
    ),
    tag = "categories"
)]
pub async fn list_root_categories(
    State(service): State<Arc<CategoryService>>,
) -> Result<Json<ApiResponse<Vec<CategoryDetailDto>>>> {
    let roots = service.list_roots().await?;
    Ok(Json(ApiResponse::listing(roots)))
}

/// Full category hierarchy
#[utoipa::path(
    get,
    path = "/api/categories/tree",
    responses(
        (status = 200, description = "Nested category trees", body = ApiResponse<Vec<CategoryTreeDto>>)
    ),
    tag = "categories"
)]
pub async fn get_category_tree(
    State(service): State<Arc<CategoryService>>,
) -> Result<Json<ApiResponse<Vec<CategoryTreeDto>>>> {
    let tree = service.tree().await?;
    Ok(Json(ApiResponse::listing(tree)))
}

/// Search categories by name or description
#[utoipa::path(
    get,
    path = "/api/categories/search",
    params(SearchCategoriesQuery),
    responses(
        (status = 200, description = "Matching categories", body = ApiResponse<Vec<CategoryDetailDto>>),
        (status = 400, description = "Missing search query")
    ),
    tag = "categories"
)]
pub async fn search_categories(
    State(service): State<Arc<CategoryService>>,
    AppQuery(query): AppQuery<SearchCategoriesQuery>,
) -> Result<Json<ApiResponse<Vec<CategoryDetailDto>>>> {
    let q = query.q.unwrap_or_default();
    if q.trim().is_empty() {
        return Err(AppError::Validation("search query is required".to_string()));
    }

    let matches = service.search(&q).await?;
    Ok(Json(ApiResponse::listing(matches)))
}

#[utoipa::path(
    get,
    path = "/api/categories/id/{id}",
    params(
        ("id" = Uuid, Path, description = "Category ID")
    ),
    responses(
        (status = 200, description = "Category found", body = ApiResponse<CategoryDetailDto>),
        (status = 400, description = "Malformed id"),
        (status = 404, description = "Category not found")
    ),
    tag = "categories"
)]
pub async fn get_category_by_id(
    State(service): State<Arc<CategoryService>>,
    AppPath(id): AppPath<Uuid>,
) -> Result<Json<ApiResponse<CategoryDetailDto>>> {
    let category = service.get_by_id(id).await?;
    Ok(Json(ApiResponse::success(category)))
}

#[utoipa::path(
    get,
    path = "/api/categories/{slug}",
    params(
        ("slug" = String, Path, description = "Category slug")
    ),
    responses(
        (status = 200, description = "Category found", body = ApiResponse<CategoryDetailDto>),
        (status = 404, description = "Category not found")
    ),
    tag = "categories"
)]
pub async fn get_category_by_slug(
    State(service): State<Arc<CategoryService>>,
    AppPath(slug): AppPath<String>,
) -> Result<Json<ApiResponse<CategoryDetailDto>>> {
    let category = service.get_by_slug(&slug).await?;
    Ok(Json(ApiResponse::success(category)))
}

/// Number of posts linked to a category
#[utoipa::path(
    get,
    path = "/api/categories/id/{id}/count",
    params(
        ("id" = Uuid, Path, description = "Category ID")
    ),
    responses(
        (status = 200, description = "Post count", body = ApiResponse<PostCountDto>)
    ),
    tag = "categories"
)]
pub async fn get_category_post_count(
    State(service): State<Arc<CategoryService>>,
    AppPath(id): AppPath<Uuid>,
) -> Result<Json<ApiResponse<PostCountDto>>> {
    let count = service.post_count(id).await?;
    Ok(Json(ApiResponse::success(count)))
}

#[utoipa::path(
    post,
    path = "/api/categories",
    request_body = CreateCategoryDto,
    responses(
        (status = 201, description = "Category created", body = ApiResponse<CategoryDetailDto>),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Parent category not found"),
        (status = 409, description = "Slug already taken")
    ),
    tag = "categories",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn create_category(
    user: AuthenticatedUser,
    State(service): State<Arc<CategoryService>>,
    AppJson(dto): AppJson<CreateCategoryDto>,
) -> Result<(StatusCode, Json<ApiResponse<CategoryDetailDto>>)> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let category = service.create(dto).await?;
    tracing::debug!(user = %user.sub, roles = ?user.roles, slug = %category.category.slug, "Category created via API");
    Ok((StatusCode::CREATED, Json(ApiResponse::success(category))))
}

/// Update a category
///
/// Absent fields are left untouched. Changing the slug or parent re-places every descendant.
#[utoipa::path(
    put,
    path = "/api/categories/{id}",
    params(
        ("id" = Uuid, Path, description = "Category ID")
    ),
    request_body = UpdateCategoryDto,
    responses(
        (status = 200, description = "Category updated", body = ApiResponse<CategoryDetailDto>),
        (status = 400, description = "Validation error or invalid parent"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Category or parent not found"),
        (status = 409, description = "Slug already taken")
    ),
    tag = "categories",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn update_category(
    user: AuthenticatedUser,
    State(service): State<Arc<CategoryService>>,
    AppPath(id): AppPath<Uuid>,
    AppJson(dto): AppJson<UpdateCategoryDto>,
) -> Result<Json<ApiResponse<CategoryDetailDto>>> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let category = service.update(id, dto).await?;
    tracing::debug!(user = %user.sub, roles = ?user.roles, category_id = %id, "Category updated via API");
    Ok(Json(ApiResponse::success(category)))
}

#[utoipa::path(
    delete,
    path = "/api/categories/{id}",
    params(
        ("id" = Uuid, Path, description = "Category ID"),
        DeleteCategoryQuery
    ),
    responses(
        (status = 204, description = "Category deleted"),
        (status = 400, description = "Category has children"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Category not found")
    ),
    tag = "categories",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn delete_category(
    user: AuthenticatedUser,
    State(service): State<Arc<CategoryService>>,
    AppPath(id): AppPath<Uuid>,
    AppQuery(query): AppQuery<DeleteCategoryQuery>,
) -> Result<StatusCode> {
    service.delete(id, query.cascade()).await?;
    tracing::debug!(user = %user.sub, roles = ?user.roles, category_id = %id, "Category deleted via API");
    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_level() {
        assert_eq!(parse_level("2"), Some(2));
        assert_eq!(parse_level(" 0 "), Some(0));
        assert_eq!(parse_level("-1"), Some(-1));
        assert_eq!(parse_level("two"), None);
        assert_eq!(parse_level(""), None);
    }
}
