use rustc_hash::FxHashMap;

use crate::animation::clock::AnimationClock;
use crate::assets::{NodeDescription, SceneDescription};
use crate::errors::{Result, SceneTreeError};
use crate::scene::node::JointNode;
use crate::settings::SceneTreeSettings;

/// Joint hierarchy with cached global and inverse-bind matrices.
///
/// # Storage
///
/// All joints live in one array, addressed by index. The synthetic root is
/// implicit: `root_first_child` heads the list of top-level joints, and each
/// joint reaches its children through `first_child` / `next_sibling`.
///
/// # Calling conventions
///
/// - Pose edits and animation sampling take `&mut self` and change this tree
/// - [`copy`](Self::copy), [`split`](Self::split),
///   [`update_transform`](Self::update_transform) and
///   [`with_faked_joints`](Self::with_faked_joints) take `&self` and return a
///   new tree, so a rest-pose tree can be kept next to derived ones
///
/// Joint indices are stable across frame updates but not across structural
/// operations, which build a new joint array.
#[derive(Debug, Default)]
pub struct SceneTree {
    pub(crate) joints: Vec<JointNode>,
    pub(crate) name_to_index: FxHashMap<String, usize>,
    /// Head of the top-level joint list (the synthetic root's first child)
    pub(crate) root_first_child: Option<usize>,
    pub(crate) built: bool,
    pub(crate) clock: AnimationClock,
    pub(crate) settings: SceneTreeSettings,
}

impl SceneTree {
    /// Creates an empty, unbuilt tree.
    #[must_use]
    pub fn new(settings: SceneTreeSettings) -> Self {
        Self {
            settings,
            ..Default::default()
        }
    }

    /// Creates and builds a tree in one step.
    pub fn from_nodes(nodes: &[NodeDescription], settings: SceneTreeSettings) -> Result<Self> {
        let mut tree = Self::new(settings);
        tree.build(nodes)?;
        Ok(tree)
    }

    /// Builds a tree from the node list of a full asset description.
    pub fn from_description(desc: &SceneDescription, settings: SceneTreeSettings) -> Result<Self> {
        Self::from_nodes(&desc.nodes, settings)
    }

    /// Builds the hierarchy from a flat node list.
    ///
    /// Children are prepended to their parent's list as they are linked, so
    /// siblings are visited in the reverse of their input order. The first
    /// global pose pass also captures every inverse-bind matrix.
    pub fn build(&mut self, nodes: &[NodeDescription]) -> Result<()> {
        if self.built {
            return Err(SceneTreeError::AlreadyBuilt);
        }
        validate(nodes)?;

        self.joints = nodes
            .iter()
            .enumerate()
            .map(|(idx, node)| JointNode::new(idx, node.parent, node.name.clone(), node.transform.to_matrix()))
            .collect();
        self.rebuild_name_map();
        self.link();
        self.update_global_pose_with_inverse();

        log::debug!("Built scene tree with {} joints", self.joints.len());
        Ok(())
    }

    /// Drops the hierarchy and the animation anchor so the tree can be built
    /// again. Settings are kept.
    pub fn reset(&mut self) {
        self.joints.clear();
        self.name_to_index.clear();
        self.root_first_child = None;
        self.built = false;
        self.clock.reset();
    }

    /// Wraps an already-indexed joint array, relinks it in array order and
    /// recomputes globals without touching inverse-bind matrices.
    pub(crate) fn assemble(joints: Vec<JointNode>, settings: SceneTreeSettings) -> Self {
        let mut tree = Self {
            joints,
            settings,
            ..Default::default()
        };
        tree.rebuild_name_map();
        tree.link();
        tree.update_global_pose();
        tree
    }

    fn rebuild_name_map(&mut self) {
        self.name_to_index.clear();
        self.name_to_index.reserve(self.joints.len());
        for joint in &self.joints {
            if let Some(prev) = self.name_to_index.insert(joint.name.clone(), joint.index) {
                log::warn!(
                    "Duplicate joint name '{}' (indices {prev} and {}); lookups resolve to the latter",
                    joint.name,
                    joint.index
                );
            }
        }
    }

    /// Links every joint under its parent in array order.
    fn link(&mut self) {
        self.root_first_child = None;
        for joint in &mut self.joints {
            joint.unlink();
        }
        for idx in 0..self.joints.len() {
            self.attach(idx);
        }
        self.built = true;
    }

    /// Prepends joint `idx` to its parent's child list.
    pub(crate) fn attach(&mut self, idx: usize) {
        let head = match self.joints[idx].parent {
            Some(parent) => &mut self.joints[parent].first_child,
            None => &mut self.root_first_child,
        };
        let previous = head.replace(idx);
        self.joints[idx].next_sibling = previous;
    }

    // ========================================================================
    // Queries
    // ========================================================================

    #[inline]
    #[must_use]
    pub fn is_built(&self) -> bool {
        self.built
    }

    #[inline]
    #[must_use]
    pub fn settings(&self) -> &SceneTreeSettings {
        &self.settings
    }

    /// Number of joints, excluding the synthetic root.
    #[inline]
    #[must_use]
    pub fn joint_count(&self) -> usize {
        self.joints.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.joints.is_empty()
    }

    #[inline]
    #[must_use]
    pub fn joints(&self) -> &[JointNode] {
        &self.joints
    }

    #[inline]
    #[must_use]
    pub fn joint(&self, index: usize) -> Option<&JointNode> {
        self.joints.get(index)
    }

    #[inline]
    #[must_use]
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.name_to_index.get(name).copied()
    }

    #[must_use]
    pub fn joint_by_name(&self, name: &str) -> Option<&JointNode> {
        self.index_of(name).map(|idx| &self.joints[idx])
    }

    /// Like [`index_of`](Self::index_of), but a miss is an error.
    pub fn require_index(&self, name: &str) -> Result<usize> {
        self.index_of(name)
            .ok_or_else(|| SceneTreeError::UnknownJoint(name.to_string()))
    }

    pub(crate) fn check_index(&self, index: usize, context: &'static str) -> Result<&JointNode> {
        self.joints
            .get(index)
            .ok_or(SceneTreeError::JointIndexOutOfRange {
                context,
                index,
                count: self.joints.len(),
            })
    }

    /// Iterates the top-level joints, most recently linked first.
    #[must_use]
    pub fn top_level(&self) -> Siblings<'_> {
        Siblings {
            joints: &self.joints,
            next: self.root_first_child,
        }
    }

    /// Iterates the children of `index`, most recently linked first.
    #[must_use]
    pub fn children(&self, index: usize) -> Siblings<'_> {
        Siblings {
            joints: &self.joints,
            next: self.joints.get(index).and_then(|j| j.first_child),
        }
    }

    /// An independent tree with identical topology and matrices.
    #[must_use]
    pub fn copy(&self) -> Self {
        Self::assemble(self.joints.clone(), self.settings)
    }
}

/// Iterator over a child/sibling list.
#[derive(Debug, Clone)]
pub struct Siblings<'a> {
    joints: &'a [JointNode],
    next: Option<usize>,
}

impl<'a> Iterator for Siblings<'a> {
    type Item = &'a JointNode;

    fn next(&mut self) -> Option<Self::Item> {
        let joint = &self.joints[self.next?];
        self.next = joint.next_sibling;
        Some(joint)
    }
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Visit {
    Pending,
    OnPath,
    Done,
}

/// Checks that every parent link is in range and that no parent chain loops.
fn validate(nodes: &[NodeDescription]) -> Result<()> {
    let count = nodes.len();
    for node in nodes {
        if let Some(parent) = node.parent.filter(|&p| p >= count) {
            return Err(SceneTreeError::InvalidParent {
                joint: node.name.clone(),
                parent,
                count,
            });
        }
    }

    let mut state = vec![Visit::Pending; count];
    let mut path = Vec::new();
    for start in 0..count {
        let mut cursor = Some(start);
        while let Some(idx) = cursor {
            match state[idx] {
                Visit::Done => break,
                Visit::OnPath => return Err(SceneTreeError::Cycle(nodes[idx].name.clone())),
                Visit::Pending => {
                    state[idx] = Visit::OnPath;
                    path.push(idx);
                    cursor = nodes[idx].parent;
                }
            }
        }
        for idx in path.drain(..) {
            state[idx] = Visit::Done;
        }
    }
    Ok(())
}
