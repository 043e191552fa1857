//! Startup seeding of an empty category table from a nested JSON document.
//!
//! ```json
//! [
//!   { "name": "Dubai", "slug": "dubai", "children": [
//!       { "name": "Beaches", "slug": "dubai-beaches", "description": "Sun and sand" }
//!   ] }
//! ]
//! ```

use serde::Deserialize;
use thiserror::Error;
use uuid::Uuid;
use validator::Validate;

use crate::features::categories::dtos::CreateCategoryDto;
use crate::features::categories::error::CategoryError;
use crate::features::categories::services::CategoryService;

#[derive(Debug, Error)]
pub enum SeedError {
    #[error("failed to read seed file: {0}")]
    Read(#[from] std::io::Error),

    #[error("failed to parse seed file: {0}")]
    Parse(#[from] serde_json::Error),

    #[error(transparent)]
    Category(#[from] CategoryError),
}

/// One node of the seed document
#[derive(Debug, Clone, Deserialize)]
pub struct SeedCategory {
    pub name: String,
    pub slug: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub children: Vec<SeedCategory>,
}

impl SeedCategory {
    fn into_dto(self, parent_id: Option<Uuid>) -> (CreateCategoryDto, Vec<SeedCategory>) {
        let dto = CreateCategoryDto {
            name: self.name,
            slug: self.slug,
            description: self.description,
            image: self.image.filter(|image| !image.is_empty()),
            parent_id,
        };
        (dto, self.children)
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SeedReport {
    pub roots: usize,
    pub children: usize,
    pub total: usize,
}

pub async fn load_seed_file(path: &str) -> Result<Vec<SeedCategory>, SeedError> {
    let raw = tokio::fs::read_to_string(path).await?;
    Ok(serde_json::from_str(&raw)?)
}

/// Create every seed node through the service, parents before children
///
/// Does nothing and returns `None` when any category already exists. A node that
/// fails to create is logged and skipped together with its subtree.
pub async fn seed_categories(
    service: &CategoryService,
    seeds: Vec<SeedCategory>,
) -> Result<Option<SeedReport>, SeedError> {
    let existing = service.count().await?;
    if existing > 0 {
        tracing::info!(existing, "Categories already present, skipping seed");
        return Ok(None);
    }

    let mut report = SeedReport::default();
    let mut pending: Vec<(SeedCategory, Option<Uuid>)> =
        seeds.into_iter().rev().map(|seed| (seed, None)).collect();

    while let Some((seed, parent_id)) = pending.pop() {
        let (dto, children) = seed.into_dto(parent_id);

        if let Err(e) = dto.validate() {
            tracing::warn!(slug = %dto.slug, "Skipping invalid seed category: {}", e);
            continue;
        }

        let slug = dto.slug.clone();
        let created = match service.create(dto).await {
            Ok(created) => created.category,
            Err(e) => {
                tracing::warn!(slug = %slug, "Failed to seed category: {}", e);
                continue;
            }
        };

        report.total += 1;
        match created.level {
            0 => report.roots += 1,
            1 => report.children += 1,
            _ => {}
        }
        tracing::debug!(path = %created.path, "Seeded category");

        pending.extend(children.into_iter().rev().map(|child| (child, Some(created.id))));
    }

    tracing::info!(
        roots = report.roots,
        children = report.children,
        total = report.total,
        "Seeded categories"
    );
    Ok(Some(report))
}
