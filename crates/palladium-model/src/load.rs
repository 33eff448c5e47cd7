//! Interchange document to scene graph.
//!
//! Parts are created parent-before-child. Each part's absolute interchange
//! origin is the running sum of the offsets down its ancestor chain.

use tracing::{debug, trace, warn};

use crate::adapter::{add, flip_position, flip_rotation, Vec3, ZERO};
use crate::error::ModelResult;
use crate::interchange::{
    too_deep, InterchangeCube, InterchangePart, ModelDocument, MAX_PART_DEPTH,
};
use crate::scene::{Cube, NodeId, Part, ProjectMeta, Scene, DEFAULT_CUBE_NAME};

/// Loads a document into a fresh scene.
pub fn load_document(doc: &ModelDocument) -> ModelResult<(Scene, ProjectMeta)> {
    let mut scene = Scene::new();
    let meta = load_into(&mut scene, doc)?;
    Ok((scene, meta))
}

/// Loads a document into an existing scene, appending its root parts, and
/// returns the document's project metadata.
///
/// The document is validated first, so a rejected document leaves `scene`
/// untouched.
pub fn load_into(scene: &mut Scene, doc: &ModelDocument) -> ModelResult<ProjectMeta> {
    doc.validate()?;
    for (name, part) in &doc.mesh {
        load_part(scene, name, part, ZERO, None)?;
    }
    debug!(
        parts = doc.part_count(),
        cubes = doc.cube_count(),
        "loaded interchange document"
    );
    Ok(doc.meta())
}

/// Creates one part subtree under `parent`, or at the scene root.
///
/// `parent_origin` is the absolute interchange origin of the parent part;
/// use [`ZERO`] for root parts. Subtrees nested deeper than
/// [`MAX_PART_DEPTH`] are rejected.
pub fn load_part(
    scene: &mut Scene,
    name: &str,
    part: &InterchangePart,
    parent_origin: Vec3,
    parent: Option<NodeId>,
) -> ModelResult<NodeId> {
    load_subtree(scene, name, part, parent_origin, parent, 1)
}

fn load_subtree(
    scene: &mut Scene,
    name: &str,
    part: &InterchangePart,
    parent_origin: Vec3,
    parent: Option<NodeId>,
    depth: usize,
) -> ModelResult<NodeId> {
    if depth > MAX_PART_DEPTH {
        return Err(too_deep(name));
    }
    let origin = add(parent_origin, part.offset());
    let created = Part::new(name)
        .with_origin(flip_position(origin))
        .with_rotation(flip_rotation(part.rotation()));
    debug!(part = %name, ?origin, "loading part");
    let id = scene.add_part(created, parent)?;

    for cube in &part.cubes {
        scene.add_cube(load_cube(cube, origin), id)?;
    }

    for (child_name, child) in &part.children {
        load_subtree(scene, child_name, child, origin, Some(id), depth + 1)?;
    }

    Ok(id)
}

/// Rebuilds a scene-graph cube from its interchange form, given the absolute
/// interchange origin of its part.
///
/// Negation swaps which corner is the minimum along X and Y, so both corners
/// are computed explicitly instead of assuming `from <= to`.
pub fn load_cube(cube: &InterchangeCube, part_origin: Vec3) -> Cube {
    let pos = add(cube.origin, part_origin);
    let d = cube.dimensions;

    let to = flip_position([pos[0], pos[1], pos[2] + d[2]]);
    let from = flip_position([pos[0] + d[0], pos[1] + d[1], pos[2]]);

    let inflate = match cube.deformation {
        Some(deformation) => {
            if deformation[1] != deformation[0] || deformation[2] != deformation[0] {
                warn!(
                    ?deformation,
                    "non-uniform deformation, using the X component as inflate"
                );
            }
            deformation[0]
        }
        None => 0.0,
    };

    let name = cube.name.as_deref().unwrap_or(DEFAULT_CUBE_NAME);
    trace!(cube = %name, ?from, ?to, "loading cube");

    Cube::new(from, to)
        .named(name)
        .with_inflate(inflate)
        .with_mirror_uv(cube.mirror.unwrap_or(false))
        .with_uv_offset(cube.texture_offset)
}
