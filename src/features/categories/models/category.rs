use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

/// Database model for category
///
/// `level` and `path` are derived from the parent chain at write time; children are
/// never stored and are looked up through `parent_id`.
#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct Category {
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

/// Parent constraint for a filtered scan
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParentFilter {
    /// `parent_id IS NULL`
    Root,
    /// `parent_id = id`
    Id(Uuid),
}

impl ParentFilter {
    pub fn parent_id(&self) -> Option<Uuid> {
        match self {
            ParentFilter::Root => None,
            ParentFilter::Id(id) => Some(*id),
        }
    }
}

/// Filters for a scan; present filters are ANDed, results ordered by name
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CategoryFilter {
    pub parent: Option<ParentFilter>,
    pub level: Option<i32>,
}

impl CategoryFilter {
    pub fn children_of(parent_id: Uuid) -> Self {
        Self {
            parent: Some(ParentFilter::Id(parent_id)),
            level: None,
        }
    }

    pub fn roots() -> Self {
        Self {
            parent: Some(ParentFilter::Root),
            level: None,
        }
    }

    pub fn matches(&self, category: &Category) -> bool {
        let parent_ok = self
            .parent
            .is_none_or(|p| category.parent_id == p.parent_id());
        let level_ok = self.level.is_none_or(|l| category.level == l);
        parent_ok && level_ok
    }
}
