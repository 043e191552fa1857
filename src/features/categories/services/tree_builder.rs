//! Forest assembly from a flat snapshot of category rows.

use std::collections::HashMap;
use uuid::Uuid;

use crate::features::categories::error::CategoryResult;
use crate::features::categories::models::Category;
use crate::features::categories::store::CategoryStore;
use crate::shared::constants::MAX_CATEGORY_LEVEL;

/// Arena entry; children are indices into the owning forest
#[derive(Debug, Clone)]
struct TreeNode {
    category: Category,
    children: Vec<usize>,
}

/// Categories arranged as independent trees, stored flat in an arena
#[derive(Debug, Clone, Default)]
pub struct CategoryForest {
    nodes: Vec<TreeNode>,
    roots: Vec<usize>,
}

impl CategoryForest {
    /// Two linear passes over rows ordered by (level, name): index every row, then
    /// hang each one under its parent. Sibling order follows input order.
    ///
    /// Rows whose parent is absent from the snapshot are dropped.
    pub fn build(categories: Vec<Category>) -> Self {
        let mut index: HashMap<Uuid, usize> = HashMap::with_capacity(categories.len());
        let mut nodes: Vec<TreeNode> = categories
            .into_iter()
            .enumerate()
            .map(|(i, category)| {
                index.insert(category.id, i);
                TreeNode {
                    category,
                    children: Vec::new(),
                }
            })
            .collect();

        let mut roots = Vec::new();
        for i in 0..nodes.len() {
            let parent_id = nodes[i].category.parent_id;
            match parent_id {
                None => roots.push(i),
                Some(parent_id) => match index.get(&parent_id) {
                    Some(&parent) if parent != i => nodes[parent].children.push(i),
                    _ => {
                        tracing::warn!(
                            category_id = %nodes[i].category.id,
                            parent_id = %parent_id,
                            "Dropping category whose parent is missing from snapshot"
                        );
                    }
                },
            }
        }

        Self { nodes, roots }
    }

    /// Number of nodes reachable from the roots
    pub fn reachable_len(&self) -> usize {
        let mut count = 0;
        let mut stack: Vec<usize> = self.roots.clone();
        while let Some(i) = stack.pop() {
            count += 1;
            stack.extend(&self.nodes[i].children);
        }
        count
    }

    /// Detach everything nested deeper than `max_depth` below a root
    pub fn truncate_below(&mut self, max_depth: usize) {
        let mut stack: Vec<(usize, usize)> = self.roots.iter().map(|&r| (r, 0)).collect();
        while let Some((i, depth)) = stack.pop() {
            if depth >= max_depth {
                self.nodes[i].children.clear();
                continue;
            }
            stack.extend(self.nodes[i].children.iter().map(|&c| (c, depth + 1)));
        }
    }

    /// Fold the arena into owned nested values, children before parents, without
    /// recursion. Only nodes reachable from a root are visited.
    pub fn into_nested<T>(self, mut make: impl FnMut(Category, Vec<T>) -> T) -> Vec<T> {
        let CategoryForest { nodes, roots } = self;
        let (mut categories, children): (Vec<Option<Category>>, Vec<Vec<usize>>) = nodes
            .into_iter()
            .map(|node| (Some(node.category), node.children))
            .unzip();
        let mut built: Vec<Option<T>> = std::iter::repeat_with(|| None)
            .take(categories.len())
            .collect();

        let mut stack: Vec<(usize, bool)> = roots.iter().rev().map(|&r| (r, false)).collect();
        while let Some((i, expanded)) = stack.pop() {
            if expanded {
                let kids = children[i]
                    .iter()
                    .filter_map(|&c| built[c].take())
                    .collect();
                if let Some(category) = categories[i].take() {
                    built[i] = Some(make(category, kids));
                }
            } else {
                stack.push((i, true));
                stack.extend(children[i].iter().rev().map(|&c| (c, false)));
            }
        }

        roots.iter().filter_map(|&r| built[r].take()).collect()
    }
}

/// Scan every row and assemble the forest, cut off at `MAX_CATEGORY_LEVEL`
pub async fn build_forest(store: &dyn CategoryStore) -> CategoryResult<CategoryForest> {
    let categories = store.scan_all().await?;
    let total = categories.len();
    let mut forest = CategoryForest::build(categories);

    let reachable = forest.reachable_len();
    forest.truncate_below(MAX_CATEGORY_LEVEL as usize);
    let kept = forest.reachable_len();
    if kept < reachable {
        tracing::warn!(
            dropped = reachable - kept,
            max_level = MAX_CATEGORY_LEVEL,
            "Dropping categories nested below the deepest allowed level"
        );
    }

    tracing::debug!(total, reachable = kept, "Built category forest");
    Ok(forest)
}
