use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use tokio::sync::{Mutex, OwnedMutexGuard};
use uuid::Uuid;

use super::{CategoryStore, CategoryTx, StoreError, StoreResult};
use crate::features::categories::models::{Category, CategoryFilter};

/// Rows keyed by id plus the indexes kept in step with every mutation
#[derive(Debug, Default)]
struct CategoryIndex {
    rows: HashMap<Uuid, Category>,
    slugs: HashMap<String, Uuid>,
    /// Parent id (`None` for roots) to child ids, ordered by (name, id)
    children: HashMap<Option<Uuid>, Vec<Uuid>>,
    post_links: HashMap<Uuid, HashSet<Uuid>>,
}

impl CategoryIndex {
    fn attach_child(&mut self, parent_id: Option<Uuid>, id: Uuid) {
        let rows = &self.rows;
        let key = |id: &Uuid| rows.get(id).map(|c| (c.name.clone(), *id));
        let list = self.children.entry(parent_id).or_default();
        let target = key(&id);
        let pos = list
            .binary_search_by(|other| key(other).cmp(&target))
            .unwrap_or_else(|pos| pos);
        list.insert(pos, id);
    }

    fn detach_child(&mut self, parent_id: Option<Uuid>, id: Uuid) {
        if let Some(list) = self.children.get_mut(&parent_id) {
            list.retain(|child| *child != id);
            if list.is_empty() {
                self.children.remove(&parent_id);
            }
        }
    }

    fn children_of(&self, parent_id: Option<Uuid>) -> Vec<Category> {
        self.children
            .get(&parent_id)
            .map(|ids| ids.iter().filter_map(|id| self.rows.get(id)).cloned().collect())
            .unwrap_or_default()
    }

    fn check_parent(&self, category: &Category) -> StoreResult<()> {
        match category.parent_id {
            Some(parent_id) if !self.rows.contains_key(&parent_id) => {
                Err(StoreError::MissingParent)
            }
            _ => Ok(()),
        }
    }

    fn insert(&mut self, category: &Category) -> StoreResult<Category> {
        if self.slugs.contains_key(&category.slug) {
            return Err(StoreError::DuplicateSlug);
        }
        self.check_parent(category)?;

        self.rows.insert(category.id, category.clone());
        self.slugs.insert(category.slug.clone(), category.id);
        self.attach_child(category.parent_id, category.id);
        Ok(category.clone())
    }

    fn replace(&mut self, category: &Category) -> StoreResult<Category> {
        let existing = self.rows.get(&category.id).ok_or(StoreError::NotFound)?;
        let old_slug = existing.slug.clone();
        let old_parent = existing.parent_id;

        if old_slug != category.slug && self.slugs.contains_key(&category.slug) {
            return Err(StoreError::DuplicateSlug);
        }
        self.check_parent(category)?;

        self.detach_child(old_parent, category.id);
        self.slugs.remove(&old_slug);
        self.slugs.insert(category.slug.clone(), category.id);
        self.rows.insert(category.id, category.clone());
        // Re-attach even when the parent is unchanged so a rename keeps the order
        self.attach_child(category.parent_id, category.id);
        Ok(category.clone())
    }

    fn remove(&mut self, id: Uuid) -> StoreResult<()> {
        let parent_id = self.rows.get(&id).ok_or(StoreError::NotFound)?.parent_id;
        if self.children.get(&Some(id)).is_some_and(|c| !c.is_empty()) {
            return Err(StoreError::StillReferenced);
        }

        if let Some(removed) = self.rows.remove(&id) {
            self.slugs.remove(&removed.slug);
        }
        self.detach_child(parent_id, id);
        self.post_links.remove(&id);
        Ok(())
    }

    fn scan(&self, filter: CategoryFilter) -> Vec<Category> {
        match filter.parent {
            // The secondary index already yields name order
            Some(parent) => self
                .children_of(parent.parent_id())
                .into_iter()
                .filter(|c| filter.matches(c))
                .collect(),
            None => {
                let mut rows: Vec<Category> = self
                    .rows
                    .values()
                    .filter(|c| filter.matches(c))
                    .cloned()
                    .collect();
                rows.sort_by(|a, b| (&a.name, a.id).cmp(&(&b.name, b.id)));
                rows
            }
        }
    }
}

/// Process-local category store
///
/// Writers hold the index lock for the duration of their transaction and mutate it
/// in place, recording an undo entry per write. A transaction dropped without
/// commit replays those entries in reverse.
#[derive(Debug, Clone, Default)]
pub struct InMemoryCategoryStore {
    state: Arc<Mutex<CategoryIndex>>,
}

impl InMemoryCategoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record that a post belongs to a category
    #[allow(dead_code)]
    pub async fn link_post(&self, category_id: Uuid, post_id: Uuid) -> StoreResult<()> {
        let mut state = self.state.lock().await;
        if !state.rows.contains_key(&category_id) {
            return Err(StoreError::NotFound);
        }
        state
            .post_links
            .entry(category_id)
            .or_default()
            .insert(post_id);
        Ok(())
    }
}

#[async_trait]
impl CategoryStore for InMemoryCategoryStore {
    async fn begin(&self) -> StoreResult<Box<dyn CategoryTx>> {
        let guard = Arc::clone(&self.state).lock_owned().await;
        Ok(Box::new(InMemoryTx {
            guard,
            undo: Vec::new(),
            committed: false,
        }))
    }

    async fn get(&self, id: Uuid) -> StoreResult<Option<Category>> {
        Ok(self.state.lock().await.rows.get(&id).cloned())
    }

    async fn get_by_slug(&self, slug: &str) -> StoreResult<Option<Category>> {
        let state = self.state.lock().await;
        Ok(state
            .slugs
            .get(slug)
            .and_then(|id| state.rows.get(id))
            .cloned())
    }

    async fn scan(&self, filter: CategoryFilter) -> StoreResult<Vec<Category>> {
        Ok(self.state.lock().await.scan(filter))
    }

    async fn scan_all(&self) -> StoreResult<Vec<Category>> {
        let state = self.state.lock().await;
        let mut rows: Vec<Category> = state.rows.values().cloned().collect();
        rows.sort_by(|a, b| (a.level, &a.name, a.id).cmp(&(b.level, &b.name, b.id)));
        Ok(rows)
    }

    async fn search_by_pattern(&self, needle: &str) -> StoreResult<Vec<Category>> {
        let needle = needle.to_lowercase();
        let state = self.state.lock().await;
        let mut rows: Vec<Category> = state
            .rows
            .values()
            .filter(|c| {
                c.name.to_lowercase().contains(&needle)
                    || c
                        .description
                        .as_deref()
                        .is_some_and(|d| d.to_lowercase().contains(&needle))
            })
            .cloned()
            .collect();
        rows.sort_by(|a, b| (&a.name, a.id).cmp(&(&b.name, b.id)));
        Ok(rows)
    }

    async fn count_associations(&self, category_id: Uuid) -> StoreResult<i64> {
        let state = self.state.lock().await;
        Ok(state
            .post_links
            .get(&category_id)
            .map_or(0, |posts| posts.len() as i64))
    }
}

/// Inverse of one write applied inside a transaction
#[derive(Debug)]
enum Undo {
    Created(Uuid),
    Saved(Category),
    Deleted(Category, HashSet<Uuid>),
}

struct InMemoryTx {
    guard: OwnedMutexGuard<CategoryIndex>,
    undo: Vec<Undo>,
    committed: bool,
}

impl InMemoryTx {
    fn rollback(&mut self) {
        let index = &mut *self.guard;
        while let Some(entry) = self.undo.pop() {
            let restored = match &entry {
                Undo::Created(id) => index.remove(*id),
                Undo::Saved(previous) => index.replace(previous).map(|_| ()),
                Undo::Deleted(row, posts) => index.insert(row).map(|_| {
                    if !posts.is_empty() {
                        index.post_links.insert(row.id, posts.clone());
                    }
                }),
            };
            if let Err(e) = restored {
                tracing::error!("Failed to undo {:?}: {:?}", entry, e);
            }
        }
    }
}

impl Drop for InMemoryTx {
    fn drop(&mut self) {
        if !self.committed {
            self.rollback();
        }
    }
}

#[async_trait]
impl CategoryTx for InMemoryTx {
    async fn get(&mut self, id: Uuid) -> StoreResult<Option<Category>> {
        Ok(self.guard.rows.get(&id).cloned())
    }

    async fn children(&mut self, parent_id: Uuid) -> StoreResult<Vec<Category>> {
        Ok(self.guard.children_of(Some(parent_id)))
    }

    async fn create(&mut self, category: &Category) -> StoreResult<Category> {
        let created = self.guard.insert(category)?;
        self.undo.push(Undo::Created(created.id));
        Ok(created)
    }

    async fn save(&mut self, category: &Category) -> StoreResult<Category> {
        let previous = self
            .guard
            .rows
            .get(&category.id)
            .cloned()
            .ok_or(StoreError::NotFound)?;
        let saved = self.guard.replace(category)?;
        self.undo.push(Undo::Saved(previous));
        Ok(saved)
    }

    async fn delete(&mut self, id: Uuid) -> StoreResult<()> {
        let row = self.guard.rows.get(&id).cloned().ok_or(StoreError::NotFound)?;
        let posts = self.guard.post_links.get(&id).cloned().unwrap_or_default();
        self.guard.remove(id)?;
        self.undo.push(Undo::Deleted(row, posts));
        Ok(())
    }

    async fn commit(self: Box<Self>) -> StoreResult<()> {
        let mut tx = self;
        tx.committed = true;
        tx.undo.clear();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn category(name: &str, slug: &str, parent_id: Option<Uuid>) -> Category {
        let now = Utc::now();
        Category {
            id: Uuid::now_v7(),
            name: name.to_string(),
            slug: slug.to_string(),
            description: None,
            image: None,
            parent_id,
            level: if parent_id.is_some() { 1 } else { 0 },
            path: slug.to_string(),
            created_at: now,
            updated_at: now,
        }
    }

    async fn insert(store: &InMemoryCategoryStore, c: &Category) {
        let mut tx = store.begin().await.unwrap();
        tx.create(c).await.unwrap();
        tx.commit().await.unwrap();
    }

    #[tokio::test]
    async fn test_uncommitted_transaction_is_discarded() {
        let store = InMemoryCategoryStore::new();
        let dubai = category("Dubai", "dubai", None);

        {
            let mut tx = store.begin().await.unwrap();
            tx.create(&dubai).await.unwrap();
        }

        assert!(store.get(dubai.id).await.unwrap().is_none());
        assert!(store.get_by_slug("dubai").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_dropped_transaction_undoes_every_write() {
        let store = InMemoryCategoryStore::new();
        let a = category("A", "a", None);
        let b = category("B", "b", None);
        insert(&store, &a).await;
        insert(&store, &b).await;
        let mid = category("Mid", "mid", Some(a.id));
        let zeta = category("Zeta", "zeta", Some(a.id));
        insert(&store, &mid).await;
        insert(&store, &zeta).await;
        store.link_post(zeta.id, Uuid::now_v7()).await.unwrap();
        store.link_post(zeta.id, Uuid::now_v7()).await.unwrap();

        {
            let mut tx = store.begin().await.unwrap();
            tx.create(&category("Beta", "beta", Some(a.id))).await.unwrap();

            let mut moved = mid.clone();
            moved.name = "Omega".to_string();
            moved.slug = "omega".to_string();
            moved.parent_id = Some(b.id);
            tx.save(&moved).await.unwrap();

            tx.delete(zeta.id).await.unwrap();
            assert!(matches!(
                tx.create(&category("Dup", "a", None)).await.unwrap_err(),
                StoreError::DuplicateSlug
            ));
        }

        let names = |rows: Vec<Category>| rows.into_iter().map(|c| c.name).collect::<Vec<_>>();
        assert_eq!(
            names(store.scan(CategoryFilter::children_of(a.id)).await.unwrap()),
            vec!["Mid", "Zeta"]
        );
        assert!(store
            .scan(CategoryFilter::children_of(b.id))
            .await
            .unwrap()
            .is_empty());
        assert!(store.get_by_slug("beta").await.unwrap().is_none());
        assert!(store.get_by_slug("omega").await.unwrap().is_none());
        assert_eq!(store.get_by_slug("mid").await.unwrap().unwrap().id, mid.id);
        assert_eq!(store.count_associations(zeta.id).await.unwrap(), 2);
        assert_eq!(store.scan_all().await.unwrap().len(), 4);
    }

    #[tokio::test]
    async fn test_committed_writes_survive() {
        let store = InMemoryCategoryStore::new();
        let dubai = category("Dubai", "dubai", None);

        let mut tx = store.begin().await.unwrap();
        tx.create(&dubai).await.unwrap();
        let mut renamed = dubai.clone();
        renamed.name = "Dubai City".to_string();
        tx.save(&renamed).await.unwrap();
        tx.commit().await.unwrap();

        assert_eq!(store.get(dubai.id).await.unwrap().unwrap().name, "Dubai City");
    }

    #[tokio::test]
    async fn test_duplicate_slug_rejected() {
        let store = InMemoryCategoryStore::new();
        insert(&store, &category("Dubai", "dubai", None)).await;

        let mut tx = store.begin().await.unwrap();
        let err = tx
            .create(&category("Other", "dubai", None))
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::DuplicateSlug));
    }

    #[tokio::test]
    async fn test_missing_parent_rejected() {
        let store = InMemoryCategoryStore::new();
        let mut tx = store.begin().await.unwrap();
        let err = tx
            .create(&category("Orphan", "orphan", Some(Uuid::now_v7())))
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::MissingParent));
    }

    #[tokio::test]
    async fn test_child_index_follows_renames_and_moves() {
        let store = InMemoryCategoryStore::new();
        let a = category("A", "a", None);
        let b = category("B", "b", None);
        insert(&store, &a).await;
        insert(&store, &b).await;
        let zeta = category("Zeta", "zeta", Some(a.id));
        let mid = category("Mid", "mid", Some(a.id));
        insert(&store, &zeta).await;
        insert(&store, &mid).await;

        let names = |rows: Vec<Category>| rows.into_iter().map(|c| c.name).collect::<Vec<_>>();
        assert_eq!(
            names(store.scan(CategoryFilter::children_of(a.id)).await.unwrap()),
            vec!["Mid", "Zeta"]
        );

        let mut renamed = zeta.clone();
        renamed.name = "Alpha".to_string();
        let mut moved = mid.clone();
        moved.parent_id = Some(b.id);

        let mut tx = store.begin().await.unwrap();
        tx.save(&renamed).await.unwrap();
        tx.save(&moved).await.unwrap();
        tx.commit().await.unwrap();

        assert_eq!(
            names(store.scan(CategoryFilter::children_of(a.id)).await.unwrap()),
            vec!["Alpha"]
        );
        assert_eq!(
            names(store.scan(CategoryFilter::children_of(b.id)).await.unwrap()),
            vec!["Mid"]
        );
    }

    #[tokio::test]
    async fn test_delete_refuses_referenced_row() {
        let store = InMemoryCategoryStore::new();
        let parent = category("Parent", "parent", None);
        insert(&store, &parent).await;
        insert(&store, &category("Child", "child", Some(parent.id))).await;

        let mut tx = store.begin().await.unwrap();
        assert!(matches!(
            tx.delete(parent.id).await.unwrap_err(),
            StoreError::StillReferenced
        ));
        assert!(matches!(
            tx.delete(Uuid::now_v7()).await.unwrap_err(),
            StoreError::NotFound
        ));
    }

    #[tokio::test]
    async fn test_search_is_case_insensitive_over_name_and_description() {
        let store = InMemoryCategoryStore::new();
        let mut beaches = category("Beaches", "beaches", None);
        beaches.description = Some("Sandy SHORES".to_string());
        insert(&store, &beaches).await;
        insert(&store, &category("Malls", "malls", None)).await;

        assert_eq!(store.search_by_pattern("BEACH").await.unwrap().len(), 1);
        assert_eq!(store.search_by_pattern("shore").await.unwrap().len(), 1);
        assert!(store.search_by_pattern("desert").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_post_links_are_counted_and_dropped_with_row() {
        let store = InMemoryCategoryStore::new();
        let dubai = category("Dubai", "dubai", None);
        insert(&store, &dubai).await;

        store.link_post(dubai.id, Uuid::now_v7()).await.unwrap();
        store.link_post(dubai.id, Uuid::now_v7()).await.unwrap();
        assert_eq!(store.count_associations(dubai.id).await.unwrap(), 2);

        let mut tx = store.begin().await.unwrap();
        tx.delete(dubai.id).await.unwrap();
        tx.commit().await.unwrap();
        assert_eq!(store.count_associations(dubai.id).await.unwrap(), 0);
    }
}
