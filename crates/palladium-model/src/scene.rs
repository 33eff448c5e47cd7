//! Scene graph types.
//!
//! The scene graph is the editor-side representation of a model: parts and
//! cubes carrying absolute transforms in scene-graph coordinates. Nodes live in
//! an arena addressed by [`NodeId`]. Like an editor outliner, each part keeps a
//! listing of its children and each node records its parent; the two are not
//! guaranteed to agree (see [`SceneIndex`](crate::index::SceneIndex)).

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::adapter::{sub, Vec2, Vec3, ZERO};
use crate::error::{ModelError, ModelResult};

/// Placeholder cube name meaning "no explicit name".
pub const DEFAULT_CUBE_NAME: &str = "cube";

/// Identifier of a node inside one [`Scene`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(usize);

impl NodeId {
    /// Returns the arena index of this node.
    pub fn index(self) -> usize {
        self.0
    }
}

impl std::fmt::Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Model-wide metadata carried alongside the scene graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectMeta {
    /// Texture atlas width in pixels.
    pub texture_width: u32,
    /// Texture atlas height in pixels.
    pub texture_height: u32,
}

impl ProjectMeta {
    /// Creates project metadata for a texture of the given size.
    pub fn new(texture_width: u32, texture_height: u32) -> Self {
        Self {
            texture_width,
            texture_height,
        }
    }
}

impl Default for ProjectMeta {
    /// The vanilla entity texture size, 64x32.
    fn default() -> Self {
        Self::new(64, 32)
    }
}

/// A bone: a named pivot with an absolute origin and rotation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Part {
    /// Part name, unique among its siblings.
    pub name: String,
    /// Absolute pivot position in scene-graph coordinates.
    #[serde(default)]
    pub origin: Vec3,
    /// Euler rotation in degrees, scene-graph sign convention.
    #[serde(default)]
    pub rotation: Vec3,
}

impl Part {
    /// Creates a part at the scene origin with no rotation.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            origin: ZERO,
            rotation: ZERO,
        }
    }

    /// Sets the absolute origin.
    pub fn with_origin(mut self, origin: Vec3) -> Self {
        self.origin = origin;
        self
    }

    /// Sets the rotation.
    pub fn with_rotation(mut self, rotation: Vec3) -> Self {
        self.rotation = rotation;
        self
    }
}

fn default_cube_name() -> String {
    DEFAULT_CUBE_NAME.to_string()
}

/// An axis-aligned box owned by a part.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cube {
    /// Cube name; [`DEFAULT_CUBE_NAME`] when unnamed.
    #[serde(default = "default_cube_name")]
    pub name: String,
    /// First corner, absolute scene-graph coordinates.
    pub from: Vec3,
    /// Second corner, absolute scene-graph coordinates.
    pub to: Vec3,
    /// Uniform outward offset applied to every face.
    #[serde(default)]
    pub inflate: f64,
    /// Whether the box UV layout is mirrored.
    #[serde(default)]
    pub mirror_uv: bool,
    /// Texture atlas offset of the box UV layout.
    #[serde(default)]
    pub uv_offset: Vec2,
}

impl Cube {
    /// Creates an unnamed cube spanning `from` to `to`.
    pub fn new(from: Vec3, to: Vec3) -> Self {
        Self {
            name: default_cube_name(),
            from,
            to,
            inflate: 0.0,
            mirror_uv: false,
            uv_offset: [0.0, 0.0],
        }
    }

    /// Sets the name.
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Sets the inflate amount.
    pub fn with_inflate(mut self, inflate: f64) -> Self {
        self.inflate = inflate;
        self
    }

    /// Sets the UV mirror flag.
    pub fn with_mirror_uv(mut self, mirror_uv: bool) -> Self {
        self.mirror_uv = mirror_uv;
        self
    }

    /// Sets the UV offset.
    pub fn with_uv_offset(mut self, uv_offset: Vec2) -> Self {
        self.uv_offset = uv_offset;
        self
    }

    /// Signed component-wise size, `to - from`.
    pub fn size(&self) -> Vec3 {
        sub(self.to, self.from)
    }

    /// Returns true if the cube carries the placeholder name.
    pub fn has_default_name(&self) -> bool {
        self.name == DEFAULT_CUBE_NAME
    }
}

/// Node kinds of the scene graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    /// A bone.
    Part,
    /// A box.
    Cube,
}

impl NodeKind {
    /// Returns the kind as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            NodeKind::Part => "part",
            NodeKind::Cube => "cube",
        }
    }
}

/// A scene-graph node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SceneNode {
    /// A bone.
    Part(Part),
    /// A box.
    Cube(Cube),
}

impl SceneNode {
    /// Returns the node name.
    pub fn name(&self) -> &str {
        match self {
            SceneNode::Part(part) => &part.name,
            SceneNode::Cube(cube) => &cube.name,
        }
    }

    /// Returns the node kind.
    pub fn kind(&self) -> NodeKind {
        match self {
            SceneNode::Part(_) => NodeKind::Part,
            SceneNode::Cube(_) => NodeKind::Cube,
        }
    }

    /// Returns the part, if this node is one.
    pub fn as_part(&self) -> Option<&Part> {
        match self {
            SceneNode::Part(part) => Some(part),
            SceneNode::Cube(_) => None,
        }
    }

    /// Returns the cube, if this node is one.
    pub fn as_cube(&self) -> Option<&Cube> {
        match self {
            SceneNode::Cube(cube) => Some(cube),
            SceneNode::Part(_) => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
struct Slot {
    node: SceneNode,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

/// An editor scene graph.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Scene {
    slots: Vec<Slot>,
    roots: Vec<NodeId>,
}

impl Scene {
    /// Creates an empty scene.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of nodes in the scene.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Returns true if the scene has no nodes.
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Adds a part under `parent`, or at the scene root when `parent` is `None`.
    pub fn add_part(&mut self, part: Part, parent: Option<NodeId>) -> ModelResult<NodeId> {
        if let Some(parent) = parent {
            self.require_part(parent)?;
        }
        Ok(self.push(SceneNode::Part(part), parent))
    }

    /// Adds a cube under `parent`.
    pub fn add_cube(&mut self, cube: Cube, parent: NodeId) -> ModelResult<NodeId> {
        self.require_part(parent)?;
        Ok(self.push(SceneNode::Cube(cube), Some(parent)))
    }

    /// Adds a cube at the scene root. Root cubes are not part of any bone and
    /// are ignored when compiling.
    pub fn add_root_cube(&mut self, cube: Cube) -> NodeId {
        self.push(SceneNode::Cube(cube), None)
    }

    /// Lists `child` under `parent` without changing the child's recorded
    /// parent. Editors leave such entries behind while nodes are moved.
    pub fn link_child(&mut self, parent: NodeId, child: NodeId) -> ModelResult<()> {
        self.require_part(parent)?;
        self.require(child)?;
        self.slots[parent.0].children.push(child);
        Ok(())
    }

    /// Moves `node` under `new_parent` (or to the root), updating both the
    /// recorded parent and the listings.
    pub fn move_node(&mut self, node: NodeId, new_parent: Option<NodeId>) -> ModelResult<()> {
        self.require(node)?;
        if let Some(parent) = new_parent {
            self.require_part(parent)?;
            if parent == node || self.is_ancestor(node, parent) {
                return Err(ModelError::invalid(
                    "parent",
                    format!("cannot move {} under its own descendant {}", node, parent),
                ));
            }
        }

        match self.slots[node.0].parent {
            Some(old) => self.slots[old.0].children.retain(|c| *c != node),
            None => self.roots.retain(|c| *c != node),
        }
        self.slots[node.0].parent = new_parent;
        match new_parent {
            Some(parent) => self.slots[parent.0].children.push(node),
            None => self.roots.push(node),
        }
        Ok(())
    }

    /// Returns the node with the given id.
    pub fn node(&self, id: NodeId) -> Option<&SceneNode> {
        self.slots.get(id.0).map(|slot| &slot.node)
    }

    /// Returns the part with the given id.
    pub fn part(&self, id: NodeId) -> Option<&Part> {
        self.node(id).and_then(SceneNode::as_part)
    }

    /// Returns the cube with the given id.
    pub fn cube(&self, id: NodeId) -> Option<&Cube> {
        self.node(id).and_then(SceneNode::as_cube)
    }

    /// Returns a mutable reference to the node with the given id.
    pub fn node_mut(&mut self, id: NodeId) -> Option<&mut SceneNode> {
        self.slots.get_mut(id.0).map(|slot| &mut slot.node)
    }

    /// Recorded parent of a node.
    pub fn parent_of(&self, id: NodeId) -> Option<NodeId> {
        self.slots.get(id.0).and_then(|slot| slot.parent)
    }

    /// Children listed under a node, possibly including stale entries.
    pub fn listed_children(&self, id: NodeId) -> &[NodeId] {
        self.slots
            .get(id.0)
            .map(|slot| slot.children.as_slice())
            .unwrap_or(&[])
    }

    /// Nodes listed at the scene root.
    pub fn roots(&self) -> &[NodeId] {
        &self.roots
    }

    /// Iterates all nodes in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (NodeId, &SceneNode)> {
        self.slots
            .iter()
            .enumerate()
            .map(|(idx, slot)| (NodeId(idx), &slot.node))
    }

    /// Finds an attached part by a `/`-separated name path from the root,
    /// e.g. `"body/head"`.
    pub fn find_part(&self, path: &str) -> Option<NodeId> {
        let mut candidates: &[NodeId] = &self.roots;
        let mut parent: Option<NodeId> = None;
        let mut found = None;

        for segment in path.split('/').filter(|s| !s.is_empty()) {
            let next = candidates.iter().copied().find(|id| {
                self.parent_of(*id) == parent
                    && self.part(*id).is_some_and(|part| part.name == segment)
            })?;
            found = Some(next);
            parent = Some(next);
            candidates = self.listed_children(next);
        }

        found
    }

    fn push(&mut self, node: SceneNode, parent: Option<NodeId>) -> NodeId {
        let id = NodeId(self.slots.len());
        self.slots.push(Slot {
            node,
            parent,
            children: Vec::new(),
        });
        match parent {
            Some(parent) => self.slots[parent.0].children.push(id),
            None => self.roots.push(id),
        }
        id
    }

    fn require(&self, id: NodeId) -> ModelResult<()> {
        if id.0 < self.slots.len() {
            Ok(())
        } else {
            Err(ModelError::invalid("node", format!("unknown node {}", id)))
        }
    }

    fn require_part(&self, id: NodeId) -> ModelResult<()> {
        self.require(id)?;
        if self.part(id).is_some() {
            Ok(())
        } else {
            Err(ModelError::invalid(
                "parent",
                format!("node {} is a cube and cannot own children", id),
            ))
        }
    }

    fn is_ancestor(&self, ancestor: NodeId, mut node: NodeId) -> bool {
        // Recorded parent chains are bounded by the node count.
        for _ in 0..self.slots.len() {
            match self.parent_of(node) {
                Some(parent) if parent == ancestor => return true,
                Some(parent) => node = parent,
                None => return false,
            }
        }
        false
    }
}

/// One node of a [`SceneSnapshot`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SnapshotNode {
    /// Host-assigned identifier, unique within the snapshot.
    pub id: u64,
    /// Recorded parent id.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent: Option<u64>,
    /// Listed children ids, in outliner order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<u64>,
    /// The node payload.
    pub node: SceneNode,
}

/// Persistent form of a [`Scene`] together with its project metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneSnapshot {
    /// Project metadata.
    pub meta: ProjectMeta,
    /// Ids listed at the scene root, in outliner order.
    pub roots: Vec<u64>,
    /// All nodes.
    pub nodes: Vec<SnapshotNode>,
}

impl SceneSnapshot {
    /// Captures a scene. Node ids are the scene's arena indices.
    pub fn capture(scene: &Scene, meta: ProjectMeta) -> Self {
        let to_u64 = |id: &NodeId| id.0 as u64;
        Self {
            meta,
            roots: scene.roots.iter().map(to_u64).collect(),
            nodes: scene
                .slots
                .iter()
                .enumerate()
                .map(|(idx, slot)| SnapshotNode {
                    id: idx as u64,
                    parent: slot.parent.as_ref().map(to_u64),
                    children: slot.children.iter().map(to_u64).collect(),
                    node: slot.node.clone(),
                })
                .collect(),
        }
    }

    /// Rebuilds the scene. Listings are kept as-is, stale entries included;
    /// references to unknown ids are rejected.
    pub fn restore(&self) -> ModelResult<(Scene, ProjectMeta)> {
        let mut ids: HashMap<u64, NodeId> = HashMap::with_capacity(self.nodes.len());
        for (idx, node) in self.nodes.iter().enumerate() {
            if ids.insert(node.id, NodeId(idx)).is_some() {
                return Err(ModelError::invalid(
                    format!("nodes[{}].id", idx),
                    format!("duplicate node id {}", node.id),
                ));
            }
        }

        let resolve = |raw: u64, field: String| -> ModelResult<NodeId> {
            ids.get(&raw)
                .copied()
                .ok_or_else(|| ModelError::invalid(field, format!("unknown node id {}", raw)))
        };

        let mut slots = Vec::with_capacity(self.nodes.len());
        for (idx, node) in self.nodes.iter().enumerate() {
            let parent = node
                .parent
                .map(|raw| resolve(raw, format!("nodes[{}].parent", idx)))
                .transpose()?;
            let children = node
                .children
                .iter()
                .enumerate()
                .map(|(c, raw)| resolve(*raw, format!("nodes[{}].children[{}]", idx, c)))
                .collect::<ModelResult<Vec<_>>>()?;
            if !children.is_empty() && node.node.kind() == NodeKind::Cube {
                return Err(ModelError::invalid(
                    format!("nodes[{}].children", idx),
                    format!(
                        "{} `{}` cannot own children",
                        node.node.kind().as_str(),
                        node.node.name()
                    ),
                ));
            }
            slots.push(Slot {
                node: node.node.clone(),
                parent,
                children,
            });
        }

        let roots = self
            .roots
            .iter()
            .enumerate()
            .map(|(r, raw)| resolve(*raw, format!("roots[{}]", r)))
            .collect::<ModelResult<Vec<_>>>()?;

        Ok((Scene { slots, roots }, self.meta))
    }

    /// Parses a snapshot from JSON.
    pub fn from_json(json: &str) -> ModelResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Serializes the snapshot to pretty-printed JSON.
    pub fn to_json_pretty(&self) -> ModelResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
