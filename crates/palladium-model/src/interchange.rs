//! Interchange document types.
//!
//! The interchange document is the nested JSON tree read by the Palladium
//! mod. Each part stores its pose relative to its parent and each cube its
//! geometry relative to the owning part:
//!
//! ```json
//! {
//!     "texture_width": 64,
//!     "texture_height": 32,
//!     "mesh": {
//!         "body": {
//!             "part_pose": { "offset": [0, -24, 0] },
//!             "cubes": [
//!                 { "origin": [-4, 0, -2], "dimensions": [8, 12, 4], "texture_offset": [16, 16] }
//!             ]
//!         }
//!     }
//! }
//! ```
//!
//! Optional fields are omitted on write when they hold their default value.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::adapter::{Vec2, Vec3};
use crate::error::{ModelError, ModelResult};
use crate::scene::ProjectMeta;

/// Indentation used for pretty-printed documents.
pub const INDENT: &[u8] = b"    ";

/// Deepest part nesting a document may hold, counting root parts as depth 1.
///
/// Each nested part costs two levels of JSON nesting (the part object and its
/// `children` map), so this keeps every written document well inside
/// `serde_json`'s reader limit of 128 levels.
pub const MAX_PART_DEPTH: usize = 48;

/// Error for a part nested deeper than [`MAX_PART_DEPTH`].
pub(crate) fn too_deep(path: &str) -> ModelError {
    ModelError::invalid(
        path,
        format!("parts nested deeper than {} levels", MAX_PART_DEPTH),
    )
}

/// Serializers that write integral floats as JSON integers, so `4.0` is
/// written as `4` like the mod's own exporter does.
mod number {
    use serde::ser::{SerializeTuple, Serializer};
    use serde::Serialize;

    // Largest magnitude where every integer is exactly representable in f64.
    const MAX_EXACT: f64 = 9_007_199_254_740_992.0;

    struct Compact(f64);

    impl Serialize for Compact {
        fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
            let v = self.0;
            if v.is_finite() && v.fract() == 0.0 && v.abs() < MAX_EXACT {
                serializer.serialize_i64(v as i64)
            } else {
                serializer.serialize_f64(v)
            }
        }
    }

    pub fn array<S: Serializer, const N: usize>(
        v: &[f64; N],
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_tuple(N)?;
        for c in v {
            seq.serialize_element(&Compact(*c))?;
        }
        seq.end()
    }

    pub fn optional_array<S: Serializer, const N: usize>(
        v: &Option<[f64; N]>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        match v {
            Some(v) => array(v, serializer),
            None => serializer.serialize_none(),
        }
    }
}

/// Pose of a part relative to its parent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PartPose {
    /// Pivot offset from the parent pivot, interchange axes.
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        serialize_with = "number::optional_array"
    )]
    pub offset: Option<Vec3>,
    /// Rotation, interchange sign convention.
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        serialize_with = "number::optional_array"
    )]
    pub rotation: Option<Vec3>,
}

impl PartPose {
    /// Returns true if neither offset nor rotation is present.
    pub fn is_empty(&self) -> bool {
        self.offset.is_none() && self.rotation.is_none()
    }
}

/// A cube of an interchange part.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InterchangeCube {
    /// Cube name; absent for unnamed cubes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Corner position relative to the owning part's pivot.
    #[serde(serialize_with = "number::array")]
    pub origin: Vec3,
    /// Size along each axis.
    #[serde(serialize_with = "number::array")]
    pub dimensions: Vec3,
    /// Texture atlas offset of the box UV layout.
    #[serde(serialize_with = "number::array")]
    pub texture_offset: Vec2,
    /// Present and true only for mirrored UVs.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mirror: Option<bool>,
    /// Inflation along each axis; present only when non-zero.
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        serialize_with = "number::optional_array"
    )]
    pub deformation: Option<Vec3>,
}

/// A part (bone) of an interchange document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InterchangePart {
    /// Pose relative to the parent; absent when both offset and rotation are zero.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub part_pose: Option<PartPose>,
    /// Cubes in outliner order.
    #[serde(default)]
    pub cubes: Vec<InterchangeCube>,
    /// Child parts keyed by name, in outliner order.
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub children: IndexMap<String, InterchangePart>,
}

impl InterchangePart {
    /// Offset relative to the parent, zero when absent.
    pub fn offset(&self) -> Vec3 {
        self.part_pose
            .as_ref()
            .and_then(|pose| pose.offset)
            .unwrap_or_default()
    }

    /// Rotation, zero when absent.
    pub fn rotation(&self) -> Vec3 {
        self.part_pose
            .as_ref()
            .and_then(|pose| pose.rotation)
            .unwrap_or_default()
    }

    /// Total number of parts in this subtree, including this one.
    pub fn part_count(&self) -> usize {
        1 + self.children.values().map(InterchangePart::part_count).sum::<usize>()
    }

    /// Total number of cubes in this subtree.
    pub fn cube_count(&self) -> usize {
        self.cubes.len()
            + self
                .children
                .values()
                .map(InterchangePart::cube_count)
                .sum::<usize>()
    }
}

/// A complete interchange document.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ModelDocument {
    /// Texture atlas width in pixels.
    pub texture_width: u32,
    /// Texture atlas height in pixels.
    pub texture_height: u32,
    /// Root parts keyed by name.
    pub mesh: IndexMap<String, InterchangePart>,
}

/// Wire form with every top-level field optional, so absence can be
/// reported per field instead of as a generic parse error.
#[derive(Deserialize)]
struct RawDocument {
    texture_width: Option<u32>,
    texture_height: Option<u32>,
    mesh: Option<IndexMap<String, InterchangePart>>,
}

impl ModelDocument {
    /// Creates an empty document for the given project.
    pub fn new(meta: ProjectMeta) -> Self {
        Self {
            texture_width: meta.texture_width,
            texture_height: meta.texture_height,
            mesh: IndexMap::new(),
        }
    }

    /// Project metadata carried by the document.
    pub fn meta(&self) -> ProjectMeta {
        ProjectMeta::new(self.texture_width, self.texture_height)
    }

    /// Parses a document from JSON text.
    ///
    /// A missing `texture_width`, `texture_height`, or `mesh` is reported as
    /// [`ModelError::MissingField`].
    pub fn from_json(json: &str) -> ModelResult<Self> {
        let raw: RawDocument = serde_json::from_str(json)?;
        Self::from_raw(raw)
    }

    /// Parses a document from JSON bytes.
    pub fn from_slice(bytes: &[u8]) -> ModelResult<Self> {
        let raw: RawDocument = serde_json::from_slice(bytes)?;
        Self::from_raw(raw)
    }

    fn from_raw(raw: RawDocument) -> ModelResult<Self> {
        let doc = Self {
            texture_width: raw.texture_width.ok_or(ModelError::MissingField {
                field: "texture_width",
            })?,
            texture_height: raw.texture_height.ok_or(ModelError::MissingField {
                field: "texture_height",
            })?,
            mesh: raw.mesh.ok_or(ModelError::MissingField { field: "mesh" })?,
        };
        doc.validate()?;
        Ok(doc)
    }

    /// Checks that every number is finite and no part is nested deeper than
    /// [`MAX_PART_DEPTH`].
    ///
    /// Non-finite numbers have no JSON form, so documents holding them are
    /// rejected before writing. The offending field is named by its dotted
    /// path, e.g. `mesh.body.cubes[0].dimensions[0]`.
    pub fn validate(&self) -> ModelResult<()> {
        for (name, part) in &self.mesh {
            validate_part(&format!("mesh.{}", name), part, 1)?;
        }
        Ok(())
    }

    /// Serializes the document to JSON with four-space indentation.
    pub fn to_json_pretty(&self) -> ModelResult<String> {
        self.validate()?;
        let mut buf = Vec::new();
        let formatter = serde_json::ser::PrettyFormatter::with_indent(INDENT);
        let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
        self.serialize(&mut serializer)?;
        String::from_utf8(buf)
            .map_err(|e| ModelError::Io(std::io::Error::new(std::io::ErrorKind::InvalidData, e)))
    }

    /// Serializes the document to compact JSON.
    pub fn to_json(&self) -> ModelResult<String> {
        self.validate()?;
        Ok(serde_json::to_string(self)?)
    }

    /// Total number of parts in the document.
    pub fn part_count(&self) -> usize {
        self.mesh.values().map(InterchangePart::part_count).sum()
    }

    /// Total number of cubes in the document.
    pub fn cube_count(&self) -> usize {
        self.mesh.values().map(InterchangePart::cube_count).sum()
    }
}

fn validate_part(path: &str, part: &InterchangePart, depth: usize) -> ModelResult<()> {
    if depth > MAX_PART_DEPTH {
        return Err(too_deep(path));
    }
    if let Some(pose) = &part.part_pose {
        if let Some(offset) = &pose.offset {
            finite(&format!("{}.part_pose.offset", path), offset)?;
        }
        if let Some(rotation) = &pose.rotation {
            finite(&format!("{}.part_pose.rotation", path), rotation)?;
        }
    }
    for (i, cube) in part.cubes.iter().enumerate() {
        let cube_path = format!("{}.cubes[{}]", path, i);
        finite(&format!("{}.origin", cube_path), &cube.origin)?;
        finite(&format!("{}.dimensions", cube_path), &cube.dimensions)?;
        finite(&format!("{}.texture_offset", cube_path), &cube.texture_offset)?;
        if let Some(deformation) = &cube.deformation {
            finite(&format!("{}.deformation", cube_path), deformation)?;
        }
    }
    for (name, child) in &part.children {
        validate_part(&format!("{}.children.{}", path, name), child, depth + 1)?;
    }
    Ok(())
}

fn finite(path: &str, values: &[f64]) -> ModelResult<()> {
    match values.iter().position(|v| !v.is_finite()) {
        Some(i) => Err(ModelError::invalid(
            format!("{}[{}]", path, i),
            format!("{} has no JSON representation", values[i]),
        )),
        None => Ok(()),
    }
}
