use thiserror::Error;
use uuid::Uuid;

use crate::core::error::AppError;
use crate::features::categories::store::StoreError;

#[derive(Debug, Error)]
pub enum CategoryError {
    #[error("category not found")]
    NotFound,

    #[error("parent category {0} not found")]
    ParentNotFound(Uuid),

    #[error("category with that slug already exists")]
    DuplicateSlug,

    #[error("category cannot be its own parent")]
    SelfParent,

    #[error("category cannot be moved under one of its own descendants")]
    CyclicParent,

    #[error("category has children, cannot delete (use deleteChildren=true to force)")]
    HasChildren,

    #[error("{0}")]
    Validation(String),

    #[error("storage failure: {0}")]
    Storage(#[source] StoreError),
}

impl From<StoreError> for CategoryError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::NotFound => CategoryError::NotFound,
            StoreError::DuplicateSlug => CategoryError::DuplicateSlug,
            other => CategoryError::Storage(other),
        }
    }
}

impl From<CategoryError> for AppError {
    fn from(e: CategoryError) -> Self {
        let message = e.to_string();
        match e {
            CategoryError::NotFound | CategoryError::ParentNotFound(_) => {
                AppError::NotFound(message)
            }
            CategoryError::DuplicateSlug => AppError::Conflict(message),
            CategoryError::SelfParent | CategoryError::CyclicParent | CategoryError::HasChildren => {
                AppError::BadRequest(message)
            }
            CategoryError::Validation(_) => AppError::Validation(message),
            CategoryError::Storage(_) => AppError::Storage(message),
        }
    }
}

pub type CategoryResult<T> = std::result::Result<T, CategoryError>;
