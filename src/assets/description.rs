use glam::{Mat4, Quat, Vec3};
use serde::{Deserialize, Serialize};

use crate::animation::clip::AnimationClip;
use crate::errors::{Result, SceneTreeError};
use crate::scene::transform::compose_trs;

/// Initial local transform of a node as supplied by a loader.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum NodeTransform {
    Matrix(Mat4),
    Trs {
        translation: Vec3,
        rotation: Quat,
        scale: Vec3,
    },
}

impl NodeTransform {
    pub const IDENTITY: Self = Self::Matrix(Mat4::IDENTITY);

    /// Resolves to a local matrix; TRS is composed as `T · R · S`.
    #[must_use]
    pub fn to_matrix(&self) -> Mat4 {
        match *self {
            Self::Matrix(mat) => mat,
            Self::Trs {
                translation,
                rotation,
                scale,
            } => compose_trs(translation, rotation, scale),
        }
    }

    #[must_use]
    pub fn from_translation(translation: Vec3) -> Self {
        Self::Trs {
            translation,
            rotation: Quat::IDENTITY,
            scale: Vec3::ONE,
        }
    }
}

impl Default for NodeTransform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// One entry of the flat node list a tree is built from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeDescription {
    /// Index of the parent entry (None for top-level nodes)
    pub parent: Option<usize>,
    pub name: String,
    #[serde(default)]
    pub transform: NodeTransform,
}

impl NodeDescription {
    #[must_use]
    pub fn new(parent: Option<usize>, name: impl Into<String>, transform: NodeTransform) -> Self {
        Self {
            parent,
            name: name.into(),
            transform,
        }
    }
}

/// Node entry in the glTF convention, where each node lists its children
/// instead of its parent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChildListNode {
    pub name: String,
    #[serde(default)]
    pub transform: NodeTransform,
    #[serde(default)]
    pub children: Vec<usize>,
}

/// Ordered joints deformed by one skinned mesh.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkinDescription {
    pub name: String,
    /// Joint indices; position `i` here is joint `i` in the skinning shader.
    pub joints: Vec<usize>,
}

/// Everything a loader hands over for one rigged asset.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SceneDescription {
    pub nodes: Vec<NodeDescription>,
    #[serde(default)]
    pub animations: Vec<AnimationClip>,
    #[serde(default)]
    pub skins: Vec<SkinDescription>,
}

impl SceneDescription {
    /// Converts child lists into parent links.
    ///
    /// A node listed as the child of several parents keeps the last parent
    /// that lists it.
    pub fn from_children(nodes: &[ChildListNode]) -> Result<Vec<NodeDescription>> {
        let count = nodes.len();
        let mut parents: Vec<Option<usize>> = vec![None; count];

        for (parent_idx, node) in nodes.iter().enumerate() {
            for &child_idx in &node.children {
                let slot = parents
                    .get_mut(child_idx)
                    .ok_or(SceneTreeError::JointIndexOutOfRange {
                        context: "child list",
                        index: child_idx,
                        count,
                    })?;
                if slot.is_some() {
                    log::warn!(
                        "Node '{}' is listed as a child of several parents; using '{}'",
                        nodes[child_idx].name,
                        node.name
                    );
                }
                *slot = Some(parent_idx);
            }
        }

        Ok(nodes
            .iter()
            .zip(parents)
            .map(|(node, parent)| NodeDescription::new(parent, node.name.clone(), node.transform))
            .collect())
    }
}
