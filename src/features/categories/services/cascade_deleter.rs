//! Removal of a category, optionally together with its whole subtree.

use std::collections::HashSet;
use uuid::Uuid;

use crate::features::categories::error::{CategoryError, CategoryResult};
use crate::features::categories::store::CategoryTx;

/// Delete `id` inside `tx`. Without `cascade` a category that still has children is
/// refused with `HasChildren`; with it, every descendant goes first, deepest rows
/// before their parents. Returns the number of rows removed.
///
/// The caller owns the transaction, so a failure part-way leaves nothing behind
/// once it is dropped.
pub async fn delete_category(
    tx: &mut dyn CategoryTx,
    id: Uuid,
    cascade: bool,
) -> CategoryResult<usize> {
    tx.get(id).await?.ok_or(CategoryError::NotFound)?;

    let children = tx.children(id).await?;
    if children.is_empty() {
        tx.delete(id).await?;
        return Ok(1);
    }
    if !cascade {
        return Err(CategoryError::HasChildren);
    }

    // Pre-order walk with an explicit stack; reversing it yields every row after
    // all of its descendants.
    let mut visited = HashSet::from([id]);
    let mut discovered = vec![id];
    let mut stack: Vec<Uuid> = children.into_iter().rev().map(|c| c.id).collect();

    while let Some(current) = stack.pop() {
        if !visited.insert(current) {
            continue;
        }
        discovered.push(current);
        let grandchildren = tx.children(current).await?;
        stack.extend(grandchildren.into_iter().rev().map(|c| c.id));
    }

    for doomed in discovered.iter().rev() {
        tx.delete(*doomed).await?;
    }

    tracing::info!(
        category_id = %id,
        removed = discovered.len(),
        "Cascade-deleted category subtree"
    );
    Ok(discovered.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::categories::models::Category;
    use crate::features::categories::services::hierarchy::Placement;
    use crate::features::categories::store::{CategoryStore, InMemoryCategoryStore};
    use chrono::Utc;

    fn category(slug: &str, parent: Option<&Category>) -> Category {
        let now = Utc::now();
        let placement = match parent {
            Some(p) => Placement::under(p, slug),
            None => Placement::root(slug),
        };
        Category {
            id: Uuid::now_v7(),
            name: slug.to_string(),
            slug: slug.to_string(),
            description: None,
            image: None,
            parent_id: parent.map(|p| p.id),
            level: placement.level,
            path: placement.path,
            created_at: now,
            updated_at: now,
        }
    }

    /// root -> (a -> (a1, a2), b)
    async fn seeded() -> (InMemoryCategoryStore, Vec<Category>) {
        let store = InMemoryCategoryStore::new();
        let root = category("root", None);
        let a = category("a", Some(&root));
        let b = category("b", Some(&root));
        let a1 = category("a1", Some(&a));
        let a2 = category("a2", Some(&a));
        let rows = vec![root, a, b, a1, a2];

        let mut tx = store.begin().await.unwrap();
        for row in &rows {
            tx.create(row).await.unwrap();
        }
        tx.commit().await.unwrap();
        (store, rows)
    }

    #[tokio::test]
    async fn test_refuses_parent_without_cascade() {
        let (store, rows) = seeded().await;
        let mut tx = store.begin().await.unwrap();

        let err = delete_category(tx.as_mut(), rows[0].id, false)
            .await
            .unwrap_err();
        assert!(matches!(err, CategoryError::HasChildren));
        drop(tx);

        assert_eq!(store.scan_all().await.unwrap().len(), 5);
    }

    #[tokio::test]
    async fn test_leaf_deletes_regardless_of_flag() {
        let (store, rows) = seeded().await;

        for (leaf, cascade) in [(&rows[2], false), (&rows[3], true)] {
            let mut tx = store.begin().await.unwrap();
            assert_eq!(delete_category(tx.as_mut(), leaf.id, cascade).await.unwrap(), 1);
            tx.commit().await.unwrap();
        }

        assert_eq!(store.scan_all().await.unwrap().len(), 3);
    }

    #[tokio::test]
    async fn test_cascade_removes_whole_subtree() {
        let (store, rows) = seeded().await;
        let outsider = category("outsider", None);
        {
            let mut tx = store.begin().await.unwrap();
            tx.create(&outsider).await.unwrap();
            tx.commit().await.unwrap();
        }

        let mut tx = store.begin().await.unwrap();
        let removed = delete_category(tx.as_mut(), rows[0].id, true).await.unwrap();
        tx.commit().await.unwrap();

        assert_eq!(removed, 5);
        let remaining = store.scan_all().await.unwrap();
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].id, outsider.id);
    }

    #[tokio::test]
    async fn test_missing_category_is_not_found() {
        let store = InMemoryCategoryStore::new();
        let mut tx = store.begin().await.unwrap();
        assert!(matches!(
            delete_category(tx.as_mut(), Uuid::now_v7(), true).await,
            Err(CategoryError::NotFound)
        ));
    }
}
