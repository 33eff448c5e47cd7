//! Consistent parent-to-children index over a [`Scene`].
//!
//! Editor listings may hold stale entries: a node listed under a part whose
//! recorded parent is elsewhere. The index keeps only entries whose recorded
//! parent matches the listing owner, so traversals built on it never re-check
//! parentage.

use std::collections::{HashMap, HashSet};

use tracing::debug;

use crate::scene::{NodeId, Scene};

/// Attached children of every node, built once per conversion.
#[derive(Debug, Clone, Default)]
pub struct SceneIndex {
    roots: Vec<NodeId>,
    children: HashMap<NodeId, Vec<NodeId>>,
    skipped: usize,
}

impl SceneIndex {
    /// Builds the index for `scene`.
    pub fn build(scene: &Scene) -> Self {
        let mut index = SceneIndex::default();
        index.roots = index.filter_listing(scene, None, scene.roots());
        for (id, _) in scene.iter() {
            let attached = index.filter_listing(scene, Some(id), scene.listed_children(id));
            if !attached.is_empty() {
                index.children.insert(id, attached);
            }
        }
        index
    }

    /// Nodes attached directly to the scene root, in listing order.
    pub fn roots(&self) -> &[NodeId] {
        &self.roots
    }

    /// Nodes attached directly to `id`, in listing order.
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.children.get(&id).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Number of stale or duplicate listing entries that were dropped.
    pub fn skipped(&self) -> usize {
        self.skipped
    }

    fn filter_listing(
        &mut self,
        scene: &Scene,
        owner: Option<NodeId>,
        listing: &[NodeId],
    ) -> Vec<NodeId> {
        let mut seen = HashSet::with_capacity(listing.len());
        let mut attached = Vec::with_capacity(listing.len());
        for &child in listing {
            if scene.node(child).is_none() || scene.parent_of(child) != owner {
                debug!(
                    child = %child,
                    owner = ?owner,
                    recorded_parent = ?scene.parent_of(child),
                    "skipping stale listing entry"
                );
                self.skipped += 1;
                continue;
            }
            if !seen.insert(child) {
                debug!(child = %child, owner = ?owner, "skipping duplicate listing entry");
                self.skipped += 1;
                continue;
            }
            attached.push(child);
        }
        attached
    }
}
