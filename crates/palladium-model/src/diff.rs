//! Structural comparison of interchange documents.
//!
//! Vectors are compared component-wise within a tolerance; everything else
//! must match exactly. Child maps are compared by key, so key order does not
//! matter, while cube lists are compared by position.

use crate::adapter::{approx_eq, Vec3};
use crate::interchange::{InterchangeCube, InterchangePart, ModelDocument};

/// Tolerance used when none is given.
pub const DEFAULT_TOLERANCE: f64 = 1e-6;

/// One structural difference between two documents.
#[derive(Debug, Clone, PartialEq)]
pub struct Difference {
    /// Dotted path of the differing field (e.g., "mesh.body.cubes\[0\].origin").
    pub path: String,
    /// Human-readable description of both sides.
    pub message: String,
}

impl std::fmt::Display for Difference {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.path, self.message)
    }
}

/// Lists the differences between `expected` and `actual`.
pub fn diff_documents(
    expected: &ModelDocument,
    actual: &ModelDocument,
    tolerance: f64,
) -> Vec<Difference> {
    let mut out = Differ {
        tolerance,
        differences: Vec::new(),
    };

    if expected.texture_width != actual.texture_width {
        out.push(
            "texture_width",
            format!("{} != {}", expected.texture_width, actual.texture_width),
        );
    }
    if expected.texture_height != actual.texture_height {
        out.push(
            "texture_height",
            format!("{} != {}", expected.texture_height, actual.texture_height),
        );
    }
    for (name, part) in &expected.mesh {
        let path = format!("mesh.{}", name);
        match actual.mesh.get(name) {
            Some(other) => out.part(&path, part, other),
            None => out.push(path, "missing"),
        }
    }
    for name in actual.mesh.keys() {
        if !expected.mesh.contains_key(name) {
            out.push(format!("mesh.{}", name), "unexpected");
        }
    }

    out.differences
}

struct Differ {
    tolerance: f64,
    differences: Vec<Difference>,
}

impl Differ {
    fn push(&mut self, path: impl Into<String>, message: impl Into<String>) {
        self.differences.push(Difference {
            path: path.into(),
            message: message.into(),
        });
    }

    fn vec3(&mut self, path: String, expected: Vec3, actual: Vec3) {
        if !approx_eq(expected, actual, self.tolerance) {
            self.push(path, format!("{:?} != {:?}", expected, actual));
        }
    }

    fn part(&mut self, path: &str, expected: &InterchangePart, actual: &InterchangePart) {
        self.vec3(format!("{}.part_pose.offset", path), expected.offset(), actual.offset());
        self.vec3(
            format!("{}.part_pose.rotation", path),
            expected.rotation(),
            actual.rotation(),
        );

        if expected.cubes.len() != actual.cubes.len() {
            self.push(
                format!("{}.cubes", path),
                format!("{} cubes != {} cubes", expected.cubes.len(), actual.cubes.len()),
            );
        }
        for (i, (a, b)) in expected.cubes.iter().zip(actual.cubes.iter()).enumerate() {
            self.cube(&format!("{}.cubes[{}]", path, i), a, b);
        }

        for (name, child) in &expected.children {
            let child_path = format!("{}.children.{}", path, name);
            match actual.children.get(name) {
                Some(other) => self.part(&child_path, child, other),
                None => self.push(child_path, "missing"),
            }
        }
        for name in actual.children.keys() {
            if !expected.children.contains_key(name) {
                self.push(format!("{}.children.{}", path, name), "unexpected");
            }
        }
    }

    fn cube(&mut self, path: &str, expected: &InterchangeCube, actual: &InterchangeCube) {
        if expected.name != actual.name {
            self.push(
                format!("{}.name", path),
                format!("{:?} != {:?}", expected.name, actual.name),
            );
        }
        self.vec3(format!("{}.origin", path), expected.origin, actual.origin);
        self.vec3(format!("{}.dimensions", path), expected.dimensions, actual.dimensions);

        let [eu, ev] = expected.texture_offset;
        let [au, av] = actual.texture_offset;
        if !approx_eq([eu, ev, 0.0], [au, av, 0.0], self.tolerance) {
            self.push(
                format!("{}.texture_offset", path),
                format!("{:?} != {:?}", expected.texture_offset, actual.texture_offset),
            );
        }

        if expected.mirror.unwrap_or(false) != actual.mirror.unwrap_or(false) {
            self.push(
                format!("{}.mirror", path),
                format!("{:?} != {:?}", expected.mirror, actual.mirror),
            );
        }
        self.vec3(
            format!("{}.deformation", path),
            expected.deformation.unwrap_or_default(),
            actual.deformation.unwrap_or_default(),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::ProjectMeta;

    fn doc(json: &str) -> ModelDocument {
        ModelDocument::from_json(json).unwrap()
    }

    #[test]
    fn test_identical_documents() {
        let a = doc(r#"{"texture_width": 64, "texture_height": 32, "mesh": {"body": {"cubes": []}}}"#);
        assert!(diff_documents(&a, &a.clone(), DEFAULT_TOLERANCE).is_empty());
    }

    #[test]
    fn test_key_order_is_ignored() {
        let a = doc(
            r#"{"texture_width": 64, "texture_height": 32, "mesh": {"a": {"cubes": []}, "b": {"cubes": []}}}"#,
        );
        let b = doc(
            r#"{"texture_width": 64, "texture_height": 32, "mesh": {"b": {"cubes": []}, "a": {"cubes": []}}}"#,
        );
        assert!(diff_documents(&a, &b, DEFAULT_TOLERANCE).is_empty());
    }

    #[test]
    fn test_reports_paths() {
        let a = doc(
            r#"{"texture_width": 64, "texture_height": 32, "mesh": {"body": {
                "part_pose": {"offset": [0, 1, 0]},
                "cubes": [{"origin": [0, 0, 0], "dimensions": [1, 1, 1], "texture_offset": [0, 0]}]
            }}}"#,
        );
        let b = doc(
            r#"{"texture_width": 32, "texture_height": 32, "mesh": {"body": {
                "part_pose": {"offset": [0, 1.5, 0]},
                "cubes": [{"origin": [0, 0, 0], "dimensions": [1, 1, 1], "texture_offset": [0, 0], "mirror": true}]
            }, "tail": {"cubes": []}}}"#,
        );
        let paths: Vec<String> = diff_documents(&a, &b, DEFAULT_TOLERANCE)
            .into_iter()
            .map(|d| d.path)
            .collect();
        assert_eq!(
            paths,
            vec![
                "texture_width",
                "mesh.body.part_pose.offset",
                "mesh.body.cubes[0].mirror",
                "mesh.tail",
            ]
        );
    }

    #[test]
    fn test_tolerance_applies() {
        let mut a = ModelDocument::new(ProjectMeta::default());
        a.mesh.insert("body".to_string(), InterchangePart::default());
        let mut b = a.clone();
        b.mesh["body"].part_pose = Some(crate::interchange::PartPose {
            offset: Some([1e-9, 0.0, 0.0]),
            rotation: None,
        });
        assert!(diff_documents(&a, &b, DEFAULT_TOLERANCE).is_empty());
        assert_eq!(diff_documents(&a, &b, 0.0).len(), 1);
    }
}
