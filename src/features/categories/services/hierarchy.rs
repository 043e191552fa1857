//! Placement of a category in the hierarchy: its `level` and materialized `path`.

use chrono::{DateTime, Utc};
use std::collections::{HashSet, VecDeque};
use uuid::Uuid;

use crate::features::categories::error::{CategoryError, CategoryResult};
use crate::features::categories::models::Category;
use crate::features::categories::store::CategoryTx;
use crate::shared::constants::{MAX_CATEGORY_LEVEL, PATH_SEPARATOR};

/// Derived position of a category
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Placement {
    pub level: i32,
    pub path: String,
}

impl Placement {
    pub fn root(slug: &str) -> Self {
        Self {
            level: 0,
            path: slug.to_string(),
        }
    }

    /// Placement directly below `parent`; falls back to the parent's slug when its
    /// path was never materialized
    pub fn under(parent: &Category, slug: &str) -> Self {
        let base = if parent.path.is_empty() {
            &parent.slug
        } else {
            &parent.path
        };
        Self {
            level: parent.level + 1,
            path: format!("{}{}{}", base, PATH_SEPARATOR, slug),
        }
    }

    pub fn apply_to(self, category: &mut Category) {
        category.level = self.level;
        category.path = self.path;
    }

    pub fn matches(&self, category: &Category) -> bool {
        self.level == category.level && self.path == category.path
    }

    fn ensure_within_max_level(&self) -> CategoryResult<()> {
        if self.level > MAX_CATEGORY_LEVEL {
            return Err(CategoryError::Validation(format!(
                "category level cannot exceed {}",
                MAX_CATEGORY_LEVEL
            )));
        }
        Ok(())
    }
}

/// Fetch the parent (if any) and compute where a category with `slug` lands under it
pub async fn compute_placement(
    tx: &mut dyn CategoryTx,
    parent_id: Option<Uuid>,
    slug: &str,
) -> CategoryResult<Placement> {
    match parent_id {
        None => Ok(Placement::root(slug)),
        Some(parent_id) => {
            let parent = tx
                .get(parent_id)
                .await?
                .ok_or(CategoryError::ParentNotFound(parent_id))?;
            let placement = Placement::under(&parent, slug);
            placement.ensure_within_max_level()?;
            Ok(placement)
        }
    }
}

/// Reject a category being set as its own direct parent
pub fn validate_reparent(category_id: Uuid, new_parent_id: Option<Uuid>) -> CategoryResult<()> {
    if new_parent_id == Some(category_id) {
        return Err(CategoryError::SelfParent);
    }
    Ok(())
}

/// Walk up from `new_parent_id` to the root and reject the move if `category_id`
/// is met on the way, i.e. the new parent is one of its descendants.
pub async fn ensure_not_descendant(
    tx: &mut dyn CategoryTx,
    category_id: Uuid,
    new_parent_id: Uuid,
) -> CategoryResult<()> {
    let mut visited = HashSet::new();
    let mut current = Some(new_parent_id);

    while let Some(id) = current {
        if id == category_id {
            return Err(CategoryError::CyclicParent);
        }
        if !visited.insert(id) {
            // Pre-existing loop above the new parent that does not involve us
            tracing::warn!(category_id = %id, "Ancestor chain loops back on itself");
            break;
        }
        current = match tx.get(id).await? {
            Some(ancestor) => ancestor.parent_id,
            None => None,
        };
    }

    Ok(())
}

/// Recompute `level`/`path` for every descendant of `root` after its own placement
/// changed. Returns how many rows were rewritten.
///
/// Fails with `Validation` when a descendant would land below `MAX_CATEGORY_LEVEL`;
/// the caller's transaction is then dropped uncommitted.
pub async fn rewrite_descendants(
    tx: &mut dyn CategoryTx,
    root: &Category,
    now: DateTime<Utc>,
) -> CategoryResult<usize> {
    let mut rewritten = 0;
    let mut visited = HashSet::from([root.id]);
    let mut queue = VecDeque::from([root.clone()]);

    while let Some(parent) = queue.pop_front() {
        for mut child in tx.children(parent.id).await? {
            if !visited.insert(child.id) {
                continue;
            }

            let placement = Placement::under(&parent, &child.slug);
            placement.ensure_within_max_level()?;
            if !placement.matches(&child) {
                placement.apply_to(&mut child);
                child.updated_at = now;
                child = tx.save(&child).await?;
                rewritten += 1;
            }
            queue.push_back(child);
        }
    }

    if rewritten > 0 {
        tracing::debug!(
            category_id = %root.id,
            rewritten,
            "Rewrote descendant placements"
        );
    }
    Ok(rewritten)
}
