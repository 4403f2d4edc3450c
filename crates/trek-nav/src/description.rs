//! External mesh descriptions accepted by [`NavMesh::from_description`](crate::NavMesh::from_description).

use serde::{Deserialize, Serialize};
use trek_core::Point;

/// A triangle mesh produced outside Trek (level editors, other tools).
///
/// Vertices serialize as `[x, y, z]` arrays and faces as vertex index
/// triples. When `walkable` is omitted every face is walkable.
///
/// # Examples
///
/// ```
/// use trek_nav::{MeshDescription, NavMesh};
///
/// let json = r#"{
///     "vertices": [[0,0,0],[1,0,0],[1,1,0],[0,1,0]],
///     "faces": [[0,1,2],[0,2,3]],
///     "walkable": [true, false]
/// }"#;
/// let desc: MeshDescription = serde_json::from_str(json).unwrap();
/// let mesh = NavMesh::from_description(&desc).unwrap();
/// assert_eq!(mesh.face_count(), 2);
/// assert_eq!(mesh.walkable_face_count(), 1);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct MeshDescription {
    /// Vertex positions.
    pub vertices: Vec<Point>,
    /// Triangles as vertex index triples.
    pub faces: Vec<[usize; 3]>,
    /// Optional per-face walkability mask.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub walkable: Option<Vec<bool>>,
}
