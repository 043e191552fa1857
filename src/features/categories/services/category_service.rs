use chrono::Utc;
use std::sync::Arc;
use uuid::Uuid;

use crate::features::categories::dtos::{
    CategoryDetailDto, CategoryResponseDto, CategoryTreeDto, CreateCategoryDto, ParentChange,
    PostCountDto, UpdateCategoryDto,
};
use crate::features::categories::error::{CategoryError, CategoryResult};
use crate::features::categories::models::{Category, CategoryFilter, ParentFilter};
use crate::features::categories::services::{cascade_deleter, hierarchy, tree_builder};
use crate::features::categories::store::{CategoryStore, StoreError};
use crate::shared::constants::ROOT_PARENT_FILTER;

/// Parse a `parent_id` filter; the empty string and `null` select root categories
pub fn parse_parent_filter(raw: &str) -> CategoryResult<ParentFilter> {
    let raw = raw.trim();
    if raw.is_empty() || raw.eq_ignore_ascii_case(ROOT_PARENT_FILTER) {
        return Ok(ParentFilter::Root);
    }
    Uuid::parse_str(raw)
        .map(ParentFilter::Id)
        .map_err(|_| CategoryError::Validation(format!("Invalid parent_id '{}'", raw)))
}

/// Service for category operations
pub struct CategoryService {
    store: Arc<dyn CategoryStore>,
}

impl std::fmt::Debug for CategoryService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CategoryService")
            .field("store", &"<CategoryStore>")
            .finish()
    }
}

impl CategoryService {
    pub fn new(store: Arc<dyn CategoryStore>) -> Self {
        Self { store }
    }

    /// Create a category under an existing parent (or as a root)
    pub async fn create(&self, dto: CreateCategoryDto) -> CategoryResult<CategoryDetailDto> {
        let now = Utc::now();
        let mut tx = self.store.begin().await?;

        let placement = hierarchy::compute_placement(tx.as_mut(), dto.parent_id, &dto.slug).await?;
        let category = Category {
            id: Uuid::now_v7(),
            name: dto.name,
            slug: dto.slug,
            description: dto.description,
            image: dto.image,
            parent_id: dto.parent_id,
            level: placement.level,
            path: placement.path,
            created_at: now,
            updated_at: now,
        };

        let created = tx
            .create(&category)
            .await
            .map_err(|e| Self::write_error(e, category.parent_id))?;
        tx.commit().await?;

        tracing::info!(
            category_id = %created.id,
            path = %created.path,
            "Created category"
        );
        self.detail(created).await
    }

    /// Apply the fields present in `dto`, re-placing the category (and its
    /// descendants) when its slug or parent changes
    pub async fn update(&self, id: Uuid, dto: UpdateCategoryDto) -> CategoryResult<CategoryDetailDto> {
        let now = Utc::now();
        let parent_change = dto.parent_change();
        let mut tx = self.store.begin().await?;

        let mut category = tx.get(id).await?.ok_or(CategoryError::NotFound)?;
        let before = hierarchy::Placement {
            level: category.level,
            path: category.path.clone(),
        };
        let slug_changed = dto.slug.as_ref().is_some_and(|slug| *slug != category.slug);

        if let Some(name) = dto.name {
            category.name = name;
        }
        if let Some(slug) = dto.slug {
            category.slug = slug;
        }
        if let Some(description) = dto.description {
            category.description = Some(description);
        }
        if let Some(image) = dto.image {
            category.image = Some(image);
        }

        match parent_change {
            ParentChange::Keep => {
                if slug_changed {
                    hierarchy::compute_placement(tx.as_mut(), category.parent_id, &category.slug)
                        .await?
                        .apply_to(&mut category);
                }
            }
            ParentChange::Detach => {
                category.parent_id = None;
                hierarchy::Placement::root(&category.slug).apply_to(&mut category);
            }
            ParentChange::MoveTo(parent_id) => {
                hierarchy::validate_reparent(id, Some(parent_id))?;
                let placement =
                    hierarchy::compute_placement(tx.as_mut(), Some(parent_id), &category.slug)
                        .await?;
                hierarchy::ensure_not_descendant(tx.as_mut(), id, parent_id).await?;
                category.parent_id = Some(parent_id);
                placement.apply_to(&mut category);
            }
        }

        category.updated_at = now;
        let saved = tx
            .save(&category)
            .await
            .map_err(|e| Self::write_error(e, category.parent_id))?;

        if !before.matches(&saved) {
            let rewritten = hierarchy::rewrite_descendants(tx.as_mut(), &saved, now).await?;
            tracing::info!(
                category_id = %saved.id,
                path = %saved.path,
                descendants_rewritten = rewritten,
                "Re-placed category"
            );
        }
        tx.commit().await?;

        self.detail(saved).await
    }

    /// Get category by id with parent and direct children
    pub async fn get_by_id(&self, id: Uuid) -> CategoryResult<CategoryDetailDto> {
        let category = self
            .store
            .get(id)
            .await
            .map_err(Self::read_error)?
            .ok_or(CategoryError::NotFound)?;
        self.detail(category).await
    }

    /// Get category by slug with parent and direct children
    pub async fn get_by_slug(&self, slug: &str) -> CategoryResult<CategoryDetailDto> {
        let category = self
            .store
            .get_by_slug(slug)
            .await
            .map_err(Self::read_error)?
            .ok_or(CategoryError::NotFound)?;
        self.detail(category).await
    }

    /// Flat list, optionally filtered by parent and/or level, ordered by name
    pub async fn list(
        &self,
        parent: Option<ParentFilter>,
        level: Option<i32>,
    ) -> CategoryResult<Vec<CategoryResponseDto>> {
        let categories = self
            .store
            .scan(CategoryFilter { parent, level })
            .await
            .map_err(Self::read_error)?;
        Ok(categories.into_iter().map(Into::into).collect())
    }

    /// Root categories, each with its direct children
    pub async fn list_roots(&self) -> CategoryResult<Vec<CategoryDetailDto>> {
        let roots = self
            .store
            .scan(CategoryFilter::roots())
            .await
            .map_err(Self::read_error)?;

        let mut result = Vec::with_capacity(roots.len());
        for root in roots {
            let children = self.children_of(root.id).await?;
            result.push(CategoryDetailDto {
                category: root.into(),
                parent: None,
                children,
            });
        }
        Ok(result)
    }

    /// Whole hierarchy as nested trees
    pub async fn tree(&self) -> CategoryResult<Vec<CategoryTreeDto>> {
        let forest = tree_builder::build_forest(self.store.as_ref())
            .await
            .map_err(Self::reclassify)?;
        Ok(forest.into_nested(CategoryTreeDto::from_parts))
    }

    /// Delete a category; with `delete_children` its whole subtree goes too
    pub async fn delete(&self, id: Uuid, delete_children: bool) -> CategoryResult<()> {
        let mut tx = self.store.begin().await?;
        cascade_deleter::delete_category(tx.as_mut(), id, delete_children).await?;
        tx.commit().await?;
        Ok(())
    }

    /// Number of stored categories
    pub async fn count(&self) -> CategoryResult<usize> {
        let categories = self.store.scan_all().await.map_err(Self::read_error)?;
        Ok(categories.len())
    }

    pub async fn post_count(&self, id: Uuid) -> CategoryResult<PostCountDto> {
        let post_count = self
            .store
            .count_associations(id)
            .await
            .map_err(Self::read_error)?;
        Ok(PostCountDto {
            category_id: id,
            post_count,
        })
    }

    /// Substring search over name and description; the caller rejects empty queries
    pub async fn search(&self, query: &str) -> CategoryResult<Vec<CategoryDetailDto>> {
        let matches = self
            .store
            .search_by_pattern(query)
            .await
            .map_err(Self::read_error)?;

        let mut result = Vec::with_capacity(matches.len());
        for category in matches {
            let parent = self.parent_of(&category).await?;
            result.push(CategoryDetailDto {
                category: category.into(),
                parent,
                children: Vec::new(),
            });
        }
        Ok(result)
    }

    async fn detail(&self, category: Category) -> CategoryResult<CategoryDetailDto> {
        let parent = self.parent_of(&category).await?;
        let children = self.children_of(category.id).await?;
        Ok(CategoryDetailDto {
            category: category.into(),
            parent,
            children,
        })
    }

    async fn parent_of(&self, category: &Category) -> CategoryResult<Option<CategoryResponseDto>> {
        let Some(parent_id) = category.parent_id else {
            return Ok(None);
        };
        let parent = self.store.get(parent_id).await.map_err(Self::read_error)?;
        Ok(parent.map(Into::into))
    }

    async fn children_of(&self, id: Uuid) -> CategoryResult<Vec<CategoryResponseDto>> {
        let children = self
            .store
            .scan(CategoryFilter::children_of(id))
            .await
            .map_err(Self::read_error)?;
        Ok(children.into_iter().map(Into::into).collect())
    }

    /// A foreign-key failure on write means the parent vanished underneath us
    fn write_error(e: StoreError, parent_id: Option<Uuid>) -> CategoryError {
        match (e, parent_id) {
            (StoreError::MissingParent, Some(parent_id)) => CategoryError::ParentNotFound(parent_id),
            (e, _) => {
                tracing::error!("Failed to write category: {:?}", e);
                e.into()
            }
        }
    }

    fn read_error(e: StoreError) -> CategoryError {
        tracing::error!("Failed to read categories: {:?}", e);
        CategoryError::Storage(e)
    }

    fn reclassify(e: CategoryError) -> CategoryError {
        if let CategoryError::Storage(inner) = e {
            return Self::read_error(inner);
        }
        e
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::categories::store::InMemoryCategoryStore;
    use fake::{faker::lorem::en::Sentence, Fake};

    fn service() -> (CategoryService, InMemoryCategoryStore) {
        let store = InMemoryCategoryStore::new();
        (CategoryService::new(Arc::new(store.clone())), store)
    }

    fn create_dto(name: &str, slug: &str, parent_id: Option<Uuid>) -> CreateCategoryDto {
        CreateCategoryDto {
            name: name.to_string(),
            slug: slug.to_string(),
            description: Some(Sentence(3..6).fake()),
            image: None,
            parent_id,
        }
    }

    /// Checks level/path consistency and slug uniqueness for every stored row
    async fn assert_invariants(store: &InMemoryCategoryStore) {
        let rows = store.scan_all().await.unwrap();
        let mut slugs = std::collections::HashSet::new();
        for row in &rows {
            assert!(slugs.insert(row.slug.clone()), "duplicate slug {}", row.slug);
            assert_ne!(row.parent_id, Some(row.id));
            assert!(row.path.ends_with(&row.slug));
            match row.parent_id {
                None => {
                    assert_eq!(row.level, 0);
                    assert_eq!(row.path, row.slug);
                }
                Some(parent_id) => {
                    let parent = rows.iter().find(|r| r.id == parent_id).unwrap();
                    assert_eq!(row.level, parent.level + 1);
                    assert_eq!(row.path, format!("{}/{}", parent.path, row.slug));
                }
            }
        }
    }

    #[tokio::test]
    async fn test_create_root_and_child() {
        let (service, store) = service();

        let dubai = service
            .create(create_dto("Dubai", "dubai", None))
            .await
            .unwrap();
        assert_eq!(dubai.category.level, 0);
        assert_eq!(dubai.category.path, "dubai");

        let beaches = service
            .create(create_dto("Beaches", "beaches", Some(dubai.category.id)))
            .await
            .unwrap();
        assert_eq!(beaches.category.level, 1);
        assert_eq!(beaches.category.path, "dubai/beaches");
        assert_eq!(beaches.parent.unwrap().id, dubai.category.id);

        assert_invariants(&store).await;
    }

    #[tokio::test]
    async fn test_create_duplicate_slug_leaves_store_unchanged() {
        let (service, store) = service();
        service
            .create(create_dto("Dubai", "dubai", None))
            .await
            .unwrap();

        let err = service
            .create(create_dto("Dubai Again", "dubai", None))
            .await
            .unwrap_err();
        assert!(matches!(err, CategoryError::DuplicateSlug));

        let rows = store.scan_all().await.unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].name, "Dubai");
    }

    #[tokio::test]
    async fn test_create_with_missing_parent() {
        let (service, store) = service();
        let missing = Uuid::now_v7();

        let err = service
            .create(create_dto("Beaches", "beaches", Some(missing)))
            .await
            .unwrap_err();
        assert!(matches!(err, CategoryError::ParentNotFound(id) if id == missing));
        assert!(store.scan_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_update_without_structural_fields_keeps_placement() {
        let (service, _store) = service();
        let dubai = service
            .create(create_dto("Dubai", "dubai", None))
            .await
            .unwrap();
        let beaches = service
            .create(create_dto("Beaches", "beaches", Some(dubai.category.id)))
            .await
            .unwrap();

        let updated = service
            .update(
                beaches.category.id,
                UpdateCategoryDto {
                    name: Some("Sandy Beaches".into()),
                    description: Some(String::new()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.category.name, "Sandy Beaches");
        assert_eq!(updated.category.description.as_deref(), Some(""));
        assert_eq!(updated.category.parent_id, Some(dubai.category.id));
        assert_eq!(updated.category.level, 1);
        assert_eq!(updated.category.path, "dubai/beaches");
    }

    #[tokio::test]
    async fn test_self_parent_is_rejected_without_mutation() {
        let (service, store) = service();
        let dubai = service
            .create(create_dto("Dubai", "dubai", None))
            .await
            .unwrap();
        let beaches = service
            .create(create_dto("Beaches", "beaches", Some(dubai.category.id)))
            .await
            .unwrap();

        let err = service
            .update(
                beaches.category.id,
                UpdateCategoryDto {
                    parent_id: Some(Some(beaches.category.id)),
                    ..Default::default()
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, CategoryError::SelfParent));

        let stored = store.get(beaches.category.id).await.unwrap().unwrap();
        assert_eq!(stored.parent_id, Some(dubai.category.id));
        assert_eq!(stored.level, 1);
        assert_eq!(stored.path, "dubai/beaches");
    }

    #[tokio::test]
    async fn test_moving_under_descendant_is_rejected() {
        let (service, _store) = service();
        let a = service.create(create_dto("A", "a", None)).await.unwrap();
        let b = service
            .create(create_dto("B", "b", Some(a.category.id)))
            .await
            .unwrap();

        let err = service
            .update(
                a.category.id,
                UpdateCategoryDto {
                    parent_id: Some(Some(b.category.id)),
                    ..Default::default()
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, CategoryError::CyclicParent));
    }

    #[tokio::test]
    async fn test_reparent_and_slug_change_rewrite_descendants() {
        let (service, store) = service();
        let dubai = service
            .create(create_dto("Dubai", "dubai", None))
            .await
            .unwrap();
        let uae = service.create(create_dto("UAE", "uae", None)).await.unwrap();
        let beaches = service
            .create(create_dto("Beaches", "beaches", Some(dubai.category.id)))
            .await
            .unwrap();
        let jumeirah = service
            .create(create_dto("Jumeirah", "jumeirah", Some(beaches.category.id)))
            .await
            .unwrap();

        service
            .update(
                dubai.category.id,
                UpdateCategoryDto {
                    parent_id: Some(Some(uae.category.id)),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        let moved = store.get(jumeirah.category.id).await.unwrap().unwrap();
        assert_eq!(moved.level, 3);
        assert_eq!(moved.path, "uae/dubai/beaches/jumeirah");

        service
            .update(
                uae.category.id,
                UpdateCategoryDto {
                    slug: Some("emirates".into()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        let renamed = store.get(jumeirah.category.id).await.unwrap().unwrap();
        assert_eq!(renamed.path, "emirates/dubai/beaches/jumeirah");

        assert_invariants(&store).await;
    }

    #[tokio::test]
    async fn test_detach_to_root() {
        let (service, store) = service();
        let dubai = service
            .create(create_dto("Dubai", "dubai", None))
            .await
            .unwrap();
        let beaches = service
            .create(create_dto("Beaches", "beaches", Some(dubai.category.id)))
            .await
            .unwrap();

        let detached = service
            .update(
                beaches.category.id,
                UpdateCategoryDto {
                    parent_id: Some(None),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert!(detached.category.parent_id.is_none());
        assert_eq!(detached.category.level, 0);
        assert_eq!(detached.category.path, "beaches");
        assert_invariants(&store).await;
    }

    #[tokio::test]
    async fn test_update_slug_conflict() {
        let (service, _store) = service();
        service
            .create(create_dto("Dubai", "dubai", None))
            .await
            .unwrap();
        let uae = service.create(create_dto("UAE", "uae", None)).await.unwrap();

        let err = service
            .update(
                uae.category.id,
                UpdateCategoryDto {
                    slug: Some("dubai".into()),
                    ..Default::default()
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, CategoryError::DuplicateSlug));
    }

    #[tokio::test]
    async fn test_update_missing_category() {
        let (service, _store) = service();
        let err = service
            .update(Uuid::now_v7(), UpdateCategoryDto::default())
            .await
            .unwrap_err();
        assert!(matches!(err, CategoryError::NotFound));
    }

    #[tokio::test]
    async fn test_delete_scenarios() {
        let (service, store) = service();
        let dubai = service
            .create(create_dto("Dubai", "dubai", None))
            .await
            .unwrap();
        service
            .create(create_dto("Beaches", "beaches", Some(dubai.category.id)))
            .await
            .unwrap();

        let err = service.delete(dubai.category.id, false).await.unwrap_err();
        assert!(matches!(err, CategoryError::HasChildren));
        assert_eq!(store.scan_all().await.unwrap().len(), 2);

        service.delete(dubai.category.id, true).await.unwrap();
        assert!(store.scan_all().await.unwrap().is_empty());
        assert!(service.tree().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_tree_contains_every_category_once() {
        let (service, _store) = service();
        let b = service.create(create_dto("B", "b", None)).await.unwrap();
        let a = service.create(create_dto("A", "a", None)).await.unwrap();
        service
            .create(create_dto("Zed", "zed", Some(a.category.id)))
            .await
            .unwrap();
        service
            .create(create_dto("Mid", "mid", Some(a.category.id)))
            .await
            .unwrap();
        service
            .create(create_dto("Leaf", "leaf", Some(b.category.id)))
            .await
            .unwrap();

        let tree = service.tree().await.unwrap();
        let names: Vec<&str> = tree.iter().map(|n| n.name.as_str()).collect();
        assert_eq!(names, vec!["A", "B"]);
        let children: Vec<&str> = tree[0].children.iter().map(|n| n.name.as_str()).collect();
        assert_eq!(children, vec!["Mid", "Zed"]);

        let total: usize = tree.iter().map(|n| 1 + n.children.len()).sum();
        assert_eq!(total, 5);
    }

    #[tokio::test]
    async fn test_list_filters_and_roots() {
        let (service, _store) = service();
        let dubai = service
            .create(create_dto("Dubai", "dubai", None))
            .await
            .unwrap();
        service.create(create_dto("Abu Dhabi", "abu-dhabi", None)).await.unwrap();
        service
            .create(create_dto("Beaches", "beaches", Some(dubai.category.id)))
            .await
            .unwrap();

        let roots = service.list(Some(ParentFilter::Root), None).await.unwrap();
        assert_eq!(roots.len(), 2);
        assert_eq!(roots[0].name, "Abu Dhabi");

        let level_one = service.list(None, Some(1)).await.unwrap();
        assert_eq!(level_one.len(), 1);

        let none = service
            .list(Some(ParentFilter::Id(dubai.category.id)), Some(0))
            .await
            .unwrap();
        assert!(none.is_empty());

        let with_children = service.list_roots().await.unwrap();
        assert_eq!(with_children.len(), 2);
        assert_eq!(with_children[1].children.len(), 1);
    }

    #[tokio::test]
    async fn test_lookup_by_slug_attaches_relations() {
        let (service, _store) = service();
        let dubai = service
            .create(create_dto("Dubai", "dubai", None))
            .await
            .unwrap();
        service
            .create(create_dto("Beaches", "beaches", Some(dubai.category.id)))
            .await
            .unwrap();

        let found = service.get_by_slug("dubai").await.unwrap();
        assert!(found.parent.is_none());
        assert_eq!(found.children.len(), 1);

        assert!(matches!(
            service.get_by_slug("nowhere").await,
            Err(CategoryError::NotFound)
        ));
        assert!(matches!(
            service.get_by_id(Uuid::now_v7()).await,
            Err(CategoryError::NotFound)
        ));
    }

    #[tokio::test]
    async fn test_post_count_and_search() {
        let (service, store) = service();
        let dubai = service
            .create(create_dto("Dubai", "dubai", None))
            .await
            .unwrap();
        store
            .link_post(dubai.category.id, Uuid::now_v7())
            .await
            .unwrap();

        let count = service.post_count(dubai.category.id).await.unwrap();
        assert_eq!(count.post_count, 1);
        assert_eq!(count.category_id, dubai.category.id);

        let hits = service.search("UBAI").await.unwrap();
        assert_eq!(hits.len(), 1);
    }

    #[tokio::test]
    async fn test_move_that_pushes_descendants_too_deep_is_rolled_back() {
        let (service, store) = service();

        let mut deepest = service.create(create_dto("C0", "c0", None)).await.unwrap();
        for depth in 1..=60 {
            deepest = service
                .create(create_dto(
                    &format!("C{}", depth),
                    &format!("c{}", depth),
                    Some(deepest.category.id),
                ))
                .await
                .unwrap();
        }
        assert_eq!(deepest.category.level, 60);

        let x = service.create(create_dto("X", "x", None)).await.unwrap();
        let mut tail = x.clone();
        for depth in 1..=3 {
            tail = service
                .create(create_dto(
                    &format!("X{}", depth),
                    &format!("x{}", depth),
                    Some(tail.category.id),
                ))
                .await
                .unwrap();
        }

        let err = service
            .update(
                x.category.id,
                UpdateCategoryDto {
                    parent_id: Some(Some(deepest.category.id)),
                    ..Default::default()
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, CategoryError::Validation(_)));

        let x_after = store.get(x.category.id).await.unwrap().unwrap();
        assert!(x_after.parent_id.is_none());
        assert_eq!(x_after.level, 0);
        let tail_after = store.get(tail.category.id).await.unwrap().unwrap();
        assert_eq!(tail_after.level, 3);
        assert_eq!(tail_after.path, "x/x1/x2/x3");
        assert_invariants(&store).await;
    }

    #[tokio::test]
    async fn test_tree_stops_at_deepest_level() {
        let (service, store) = service();
        let now = Utc::now();

        let mut tx = store.begin().await.unwrap();
        let mut parent: Option<Category> = None;
        for depth in 0..200 {
            let slug = format!("n{}", depth);
            let placement = match &parent {
                Some(p) => hierarchy::Placement::under(p, &slug),
                None => hierarchy::Placement::root(&slug),
            };
            let row = Category {
                id: Uuid::now_v7(),
                name: slug.clone(),
                slug,
                description: None,
                image: None,
                parent_id: parent.as_ref().map(|p| p.id),
                level: placement.level,
                path: placement.path,
                created_at: now,
                updated_at: now,
            };
            parent = Some(tx.create(&row).await.unwrap());
        }
        tx.commit().await.unwrap();

        let tree = service.tree().await.unwrap();
        let mut depth = 0;
        let mut node = &tree[0];
        while let Some(child) = node.children.first() {
            node = child;
            depth += 1;
        }
        assert_eq!(depth, crate::shared::constants::MAX_CATEGORY_LEVEL);
        assert!(serde_json::to_string(&tree).is_ok());
    }

    #[tokio::test]
    async fn test_update_with_empty_name_overwrites_it() {
        let (service, store) = service();
        let dubai = service
            .create(create_dto("Dubai", "dubai", None))
            .await
            .unwrap();

        service
            .update(
                dubai.category.id,
                UpdateCategoryDto {
                    name: Some(String::new()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        let stored = store.get(dubai.category.id).await.unwrap().unwrap();
        assert_eq!(stored.name, "");
        assert_eq!(stored.slug, "dubai");
    }

    #[test]
    fn test_parse_parent_filter() {
        assert_eq!(parse_parent_filter("null").unwrap(), ParentFilter::Root);
        assert_eq!(parse_parent_filter("NULL").unwrap(), ParentFilter::Root);
        let id = Uuid::now_v7();
        assert_eq!(
            parse_parent_filter(&id.to_string()).unwrap(),
            ParentFilter::Id(id)
        );
        assert_eq!(parse_parent_filter("").unwrap(), ParentFilter::Root);
        assert!(matches!(
            parse_parent_filter("abc"),
            Err(CategoryError::Validation(_))
        ));
    }
}
