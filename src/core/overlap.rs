use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use smallvec::SmallVec;

use crate::core::types::{ItemId, MarginWeights, TimelineItem};

/// One node in the containment forest.
///
/// `parent` and `children` hold arena indices, never references;
/// re-parenting is an index reassignment and cycle checks are plain
/// ancestor walks over indices.
#[derive(Debug, Clone)]
struct OverlapNode {
    id: ItemId,
    start: DateTime<Utc>,
    parent: Option<usize>,
    children: SmallVec<[usize; 4]>,
}

/// Containment forest over one layout pass's item set.
///
/// An item whose start falls inside another item's span nests under the
/// closest such container, and the resulting depth/fan-out drive the
/// stagger margins that keep overlapped blocks individually visible and
/// clickable. Rebuilt from scratch each pass and discarded afterwards.
///
/// The pair scan is O(n²) in item count. That is an accepted scaling limit
/// for the interactive item counts this engine targets (tens to low
/// hundreds), not a defect.
#[derive(Debug, Clone, Default)]
pub struct OverlapForest {
    nodes: Vec<OverlapNode>,
    index_by_id: IndexMap<ItemId, usize>,
}

impl OverlapForest {
    /// Builds the forest from items sorted ascending by start time.
    ///
    /// Parent candidates are considered in reverse chronological start
    /// order, each against every other item as a candidate child.
    #[must_use]
    pub fn build(items: &[TimelineItem]) -> Self {
        let mut forest = Self::default();

        for parent in items.iter().rev() {
            let parent_idx = forest.intern(parent);

            for child in items {
                if parent.id == child.id {
                    continue;
                }
                if child.start < parent.start || child.start >= parent.end {
                    continue;
                }

                let child_idx = forest.intern(child);
                forest.adopt(parent_idx, child_idx);
            }
        }

        forest
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Id of the node's current container, if any.
    #[must_use]
    pub fn parent_of(&self, id: &ItemId) -> Option<&ItemId> {
        let idx = *self.index_by_id.get(id)?;
        let parent = self.nodes[idx].parent?;
        Some(&self.nodes[parent].id)
    }

    /// Per-item stagger weights, in forest insertion order.
    #[must_use]
    pub fn margin_weights(&self) -> IndexMap<ItemId, MarginWeights> {
        self.index_by_id
            .iter()
            .map(|(id, &idx)| {
                let weights = MarginWeights {
                    left: self.descendant_weight(idx, 0),
                    right: self.depth(idx),
                };
                (id.clone(), weights)
            })
            .collect()
    }

    fn intern(&mut self, item: &TimelineItem) -> usize {
        if let Some(&idx) = self.index_by_id.get(&item.id) {
            return idx;
        }
        let idx = self.nodes.len();
        self.nodes.push(OverlapNode {
            id: item.id.clone(),
            start: item.start,
            parent: None,
            children: SmallVec::new(),
        });
        self.index_by_id.insert(item.id.clone(), idx);
        idx
    }

    fn adopt(&mut self, parent_idx: usize, child_idx: usize) {
        match self.nodes[child_idx].parent {
            Some(current_idx) => {
                let child_start = self.nodes[child_idx].start;
                let current_gap = (child_start - self.nodes[current_idx].start).num_minutes();
                let candidate_gap = (child_start - self.nodes[parent_idx].start).num_minutes();
                if candidate_gap < current_gap && !self.blocks_adoption(parent_idx, child_idx) {
                    self.detach(child_idx);
                    self.attach(parent_idx, child_idx);
                }
            }
            None => {
                if !self.blocks_adoption(parent_idx, child_idx) {
                    self.attach(parent_idx, child_idx);
                }
            }
        }
    }

    /// Rejecting walk over the candidate parent's ancestor chain: refuses an
    /// edge that would duplicate an existing one or close a cycle. A refused
    /// adoption leaves the child's current edge intact.
    fn blocks_adoption(&self, parent_idx: usize, child_idx: usize) -> bool {
        let child_parent = self.nodes[child_idx].parent;
        let mut cursor = Some(parent_idx);

        while let Some(idx) = cursor {
            let node = &self.nodes[idx];
            if idx == child_idx
                || node.parent == Some(child_idx)
                || child_parent == Some(idx)
                || node.children.contains(&child_idx)
            {
                return true;
            }
            cursor = node.parent;
        }

        false
    }

    fn attach(&mut self, parent_idx: usize, child_idx: usize) {
        self.nodes[child_idx].parent = Some(parent_idx);
        self.nodes[parent_idx].children.push(child_idx);
    }

    fn detach(&mut self, child_idx: usize) {
        if let Some(parent_idx) = self.nodes[child_idx].parent.take() {
            self.nodes[parent_idx].children.retain(|&idx| idx != child_idx);
        }
    }

    /// Ancestor count of `idx`. Terminates for any guarded forest.
    fn depth(&self, idx: usize) -> u32 {
        let mut depth = 0;
        let mut cursor = self.nodes[idx].parent;
        while let Some(parent_idx) = cursor {
            depth += 1;
            cursor = self.nodes[parent_idx].parent;
        }
        depth
    }

    /// DFS accumulation where every descendant adds one unit, so deeper
    /// nesting and wider fan-out both widen the left stagger.
    fn descendant_weight(&self, idx: usize, seed: u32) -> u32 {
        let mut weight = seed;
        for &child_idx in &self.nodes[idx].children {
            weight = self.descendant_weight(child_idx, weight + 1);
        }
        weight
    }
}
