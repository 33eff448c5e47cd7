//! Scene graph to interchange document.
//!
//! The walk is top-down: every part is compiled against the absolute
//! interchange-space origin of its parent, so offsets come out relative.

use indexmap::IndexMap;
use tracing::{debug, trace, warn};

use crate::adapter::{flip_position, flip_rotation, is_zero, sub, Vec3, ZERO};
use crate::error::{ModelError, ModelResult};
use crate::index::SceneIndex;
use crate::interchange::{
    too_deep, InterchangeCube, InterchangePart, ModelDocument, PartPose, MAX_PART_DEPTH,
};
use crate::scene::{Cube, NodeId, Part, ProjectMeta, Scene, SceneNode};

/// Compiles a whole scene into an interchange document.
///
/// Every part attached to the scene root becomes an entry of `mesh`. Cubes
/// attached directly to the root belong to no bone and are skipped.
///
/// Fails with [`ModelError::InvalidField`] when parts are nested deeper than
/// [`MAX_PART_DEPTH`].
pub fn compile_scene(scene: &Scene, meta: ProjectMeta) -> ModelResult<ModelDocument> {
    let index = SceneIndex::build(scene);
    if index.skipped() > 0 {
        debug!(skipped = index.skipped(), "ignored stale outliner entries");
    }

    let compiler = Compiler {
        scene,
        index: &index,
    };
    let mut doc = ModelDocument::new(meta);
    for &id in index.roots() {
        match scene.node(id) {
            Some(SceneNode::Part(part)) => {
                let path = format!("mesh.{}", part.name);
                let compiled = compiler.part(id, part, ZERO, &path, 1)?;
                insert_named(&mut doc.mesh, &part.name, compiled);
            }
            Some(node) => {
                debug!(
                    kind = node.kind().as_str(),
                    name = node.name(),
                    "skipping node outside of any part"
                );
            }
            None => {}
        }
    }
    Ok(doc)
}

/// Compiles a single part subtree.
///
/// `parent_origin` is the absolute origin of the parent part in interchange
/// coordinates; use [`ZERO`] for root parts. Nesting depth is counted from
/// `id`.
pub fn compile_part(
    scene: &Scene,
    id: NodeId,
    parent_origin: Vec3,
) -> ModelResult<InterchangePart> {
    let part = scene
        .part(id)
        .ok_or_else(|| ModelError::invalid(id.to_string(), "node is not a part"))?;
    let index = SceneIndex::build(scene);
    let compiler = Compiler {
        scene,
        index: &index,
    };
    compiler.part(id, part, parent_origin, &part.name, 1)
}

/// Compiles one cube against the absolute interchange origin of its part.
pub fn compile_cube(cube: &Cube, part_origin: Vec3) -> InterchangeCube {
    let size = cube.size();
    let corner = flip_position([cube.to[0], cube.to[1], cube.from[2]]);

    InterchangeCube {
        name: (!cube.has_default_name()).then(|| cube.name.clone()),
        origin: sub(corner, part_origin),
        dimensions: size,
        texture_offset: cube.uv_offset,
        mirror: cube.mirror_uv.then_some(true),
        deformation: (cube.inflate != 0.0).then_some([cube.inflate; 3]),
    }
}

struct Compiler<'a> {
    scene: &'a Scene,
    index: &'a SceneIndex,
}

impl Compiler<'_> {
    fn part(
        &self,
        id: NodeId,
        part: &Part,
        parent_origin: Vec3,
        path: &str,
        depth: usize,
    ) -> ModelResult<InterchangePart> {
        if depth > MAX_PART_DEPTH {
            return Err(too_deep(path));
        }
        let origin = flip_position(part.origin);
        let offset = sub(origin, parent_origin);
        let rotation = flip_rotation(part.rotation);

        let pose = PartPose {
            offset: (!is_zero(offset)).then_some(offset),
            rotation: (!is_zero(rotation)).then_some(rotation),
        };
        debug!(part = %part.name, ?offset, ?rotation, "compiling part");

        let mut compiled = InterchangePart {
            part_pose: (!pose.is_empty()).then_some(pose),
            cubes: Vec::new(),
            children: IndexMap::new(),
        };

        for &child in self.index.children(id) {
            match self.scene.node(child) {
                Some(SceneNode::Cube(cube)) => {
                    trace!(part = %part.name, cube = %cube.name, "compiling cube");
                    compiled.cubes.push(compile_cube(cube, origin));
                }
                Some(SceneNode::Part(child_part)) => {
                    let child_path = format!("{}.children.{}", path, child_part.name);
                    let sub_part = self.part(child, child_part, origin, &child_path, depth + 1)?;
                    insert_named(&mut compiled.children, &child_part.name, sub_part);
                }
                None => {}
            }
        }

        Ok(compiled)
    }
}

fn insert_named(map: &mut IndexMap<String, InterchangePart>, name: &str, part: InterchangePart) {
    if map.insert(name.to_string(), part).is_some() {
        warn!(part = %name, "duplicate sibling part name, keeping the last one");
    }
}
