//! Scene Tree Tests
//!
//! Tests for:
//! - Build lifecycle (build, rebuild rejection, reset)
//! - Structural validation (parent range, cycles)
//! - Skinning matrix extraction and flat buffer layouts
//! - Local pose snapshots and translation edits
//! - Keypoint queries and rotation frame conversion

use std::f32::consts::FRAC_PI_2;

use glam::{Mat4, Quat, Vec3};

use skintree::assets::{NodeDescription, NodeTransform, SkinDescription};
use skintree::errors::SceneTreeError;
use skintree::scene::SceneTree;
use skintree::settings::{MATRIX_FLOATS, MatrixLayout, SceneTreeSettings};

const EPSILON: f32 = 1e-5;

fn vec3_approx(a: Vec3, b: Vec3) -> bool {
    a.abs_diff_eq(b, EPSILON)
}

fn mat4_approx(a: &Mat4, b: &Mat4) -> bool {
    a.abs_diff_eq(*b, EPSILON)
}

fn arm_nodes() -> Vec<NodeDescription> {
    vec![
        NodeDescription::new(
            None,
            "shoulder",
            NodeTransform::Trs {
                translation: Vec3::new(0.0, 1.5, 0.0),
                rotation: Quat::from_rotation_z(FRAC_PI_2),
                scale: Vec3::ONE,
            },
        ),
        NodeDescription::new(Some(0), "elbow", NodeTransform::from_translation(Vec3::new(0.3, 0.0, 0.0))),
        NodeDescription::new(Some(1), "wrist", NodeTransform::from_translation(Vec3::new(0.25, 0.0, 0.0))),
    ]
}

fn arm() -> SceneTree {
    SceneTree::from_nodes(&arm_nodes(), SceneTreeSettings::default()).unwrap()
}

fn chunk(buf: &[f32], slot: usize) -> &[f32] {
    &buf[slot * MATRIX_FLOATS..(slot + 1) * MATRIX_FLOATS]
}

// ============================================================================
// Build Lifecycle
// ============================================================================

#[test]
fn build_twice_requires_reset() {
    let mut tree = SceneTree::new(SceneTreeSettings::default());
    assert!(!tree.is_built());
    tree.build(&arm_nodes()).unwrap();
    assert!(tree.is_built());
    assert_eq!(tree.joint_count(), 3);

    assert_eq!(tree.build(&arm_nodes()), Err(SceneTreeError::AlreadyBuilt));

    tree.reset();
    assert!(!tree.is_built());
    assert!(tree.is_empty());
    tree.build(&arm_nodes()[..2]).unwrap();
    assert_eq!(tree.joint_count(), 2);
}

#[test]
fn build_rejects_out_of_range_parent() {
    let nodes = vec![
        NodeDescription::new(None, "root", NodeTransform::IDENTITY),
        NodeDescription::new(Some(7), "orphan", NodeTransform::IDENTITY),
    ];
    let err = SceneTree::from_nodes(&nodes, SceneTreeSettings::default()).unwrap_err();
    assert_eq!(
        err,
        SceneTreeError::InvalidParent {
            joint: "orphan".to_string(),
            parent: 7,
            count: 2,
        }
    );
}

#[test]
fn build_rejects_parent_cycles() {
    let nodes = vec![
        NodeDescription::new(None, "root", NodeTransform::IDENTITY),
        NodeDescription::new(Some(3), "a", NodeTransform::IDENTITY),
        NodeDescription::new(Some(1), "b", NodeTransform::IDENTITY),
        NodeDescription::new(Some(2), "c", NodeTransform::IDENTITY),
    ];
    let err = SceneTree::from_nodes(&nodes, SceneTreeSettings::default()).unwrap_err();
    assert!(matches!(err, SceneTreeError::Cycle(_)));
}

#[test]
fn failed_build_leaves_tree_unbuilt() {
    let mut tree = SceneTree::new(SceneTreeSettings::default());
    let nodes = vec![NodeDescription::new(Some(0), "self", NodeTransform::IDENTITY)];
    assert!(tree.build(&nodes).is_err());
    assert!(!tree.is_built());
    tree.build(&arm_nodes()).unwrap();
}

#[test]
fn duplicate_names_resolve_to_last() {
    let nodes = vec![
        NodeDescription::new(None, "twin", NodeTransform::from_translation(Vec3::X)),
        NodeDescription::new(None, "twin", NodeTransform::from_translation(Vec3::Y)),
    ];
    let tree = SceneTree::from_nodes(&nodes, SceneTreeSettings::default()).unwrap();
    assert_eq!(tree.index_of("twin"), Some(1));
}

#[test]
fn missing_name_lookup_is_an_error() {
    let tree = arm();
    assert_eq!(tree.index_of("knee"), None);
    assert_eq!(
        tree.require_index("knee"),
        Err(SceneTreeError::UnknownJoint("knee".to_string()))
    );
}

// ============================================================================
// Skinning
// ============================================================================

#[test]
fn skinning_is_identity_in_bind_pose() {
    let tree = arm();
    let pose = tree.skinning_pose(&[2, 0, 1]).unwrap();
    assert_eq!(pose.len(), 3 * MATRIX_FLOATS);

    let identity = Mat4::IDENTITY.to_cols_array();
    for slot in 0..3 {
        for (a, b) in chunk(&pose, slot).iter().zip(identity) {
            assert!((a - b).abs() < EPSILON);
        }
    }
}

#[test]
fn skinning_follows_requested_order() {
    let mut tree = arm();
    tree.set_joint_translation("wrist", Vec3::new(0.5, 0.0, 0.0)).unwrap();
    tree.update_global_pose();

    let pose = tree.skinning_pose(&[2, 0]).unwrap();
    let wrist = MatrixLayout::RowMajor.read(chunk(&pose, 0));
    let shoulder = MatrixLayout::RowMajor.read(chunk(&pose, 1));

    assert!(mat4_approx(&wrist, &tree.joint(2).unwrap().skinning_matrix()));
    assert!(!mat4_approx(&wrist, &Mat4::IDENTITY));
    assert!(mat4_approx(&shoulder, &Mat4::IDENTITY));
}

#[test]
fn skinning_layouts_are_transposes() {
    let mut row = arm();
    let mut col = SceneTree::from_nodes(
        &arm_nodes(),
        SceneTreeSettings {
            matrix_layout: MatrixLayout::ColumnMajor,
            ..Default::default()
        },
    )
    .unwrap();

    for tree in [&mut row, &mut col] {
        tree.set_joint_translation("elbow", Vec3::new(0.1, 0.2, 0.3)).unwrap();
        tree.update_global_pose();
    }

    let row_pose = row.skinning_pose(&[1]).unwrap();
    let col_pose = col.skinning_pose(&[1]).unwrap();
    let expected = row.joint(1).unwrap().skinning_matrix();

    assert_eq!(col_pose, expected.to_cols_array());
    assert_eq!(row_pose, expected.transpose().to_cols_array());
}

#[test]
fn write_skinning_pose_reuses_buffer() {
    let tree = arm();
    let mut out = vec![9.0; 100];
    tree.write_skinning_pose(&[0], &mut out).unwrap();
    assert_eq!(out.len(), MATRIX_FLOATS);
}

#[test]
fn failed_skinning_write_keeps_caller_buffer() {
    let tree = arm();
    let mut out = vec![7.0; 3];
    let err = tree.write_skinning_pose(&[0, 99], &mut out).unwrap_err();
    assert!(matches!(err, SceneTreeError::JointIndexOutOfRange { index: 99, .. }));
    assert_eq!(out, [7.0, 7.0, 7.0]);
}

#[test]
fn skin_pose_rejects_unknown_joint_index() {
    let tree = arm();
    let skin = SkinDescription {
        name: "broken".to_string(),
        joints: vec![0, 5],
    };
    let err = tree.skin_pose(&skin).unwrap_err();
    assert!(matches!(err, SceneTreeError::JointIndexOutOfRange { index: 5, count: 3, .. }));
}

// ============================================================================
// Local Pose Buffers
// ============================================================================

#[test]
fn local_pose_roundtrip_restores_matrices() {
    let mut tree = arm();
    let snapshot = tree.local_pose().unwrap();
    assert_eq!(snapshot.len(), 3 * MATRIX_FLOATS);

    tree.set_joint_translation("elbow", Vec3::splat(9.0)).unwrap();
    tree.set_local_pose(&snapshot).unwrap();
    assert_eq!(tree.local_pose().unwrap(), snapshot);
}

#[test]
fn set_local_pose_checks_length() {
    let mut tree = arm();
    let err = tree.set_local_pose(&[0.0; 20]).unwrap_err();
    assert_eq!(
        err,
        SceneTreeError::BufferSizeMismatch {
            expected: 48,
            actual: 20
        }
    );
}

#[test]
fn empty_tree_has_no_pose() {
    let mut tree = SceneTree::from_nodes(&[], SceneTreeSettings::default()).unwrap();
    assert_eq!(tree.local_pose(), Err(SceneTreeError::EmptyTree));
    assert_eq!(tree.set_local_pose(&[]), Err(SceneTreeError::EmptyTree));
    assert_eq!(tree.root_translation(), None);
}

#[test]
fn external_buffer_translation_edit() {
    let tree = arm();
    let mut buffer = tree.local_pose().unwrap();
    tree.write_joint_translation("wrist", Vec3::new(1.0, 2.0, 3.0), &mut buffer)
        .unwrap();

    // Row-major: translation sits at 3, 7, 11 of the wrist block
    let wrist = chunk(&buffer, 2);
    assert_eq!([wrist[3], wrist[7], wrist[11]], [1.0, 2.0, 3.0]);

    // The tree itself is untouched
    assert!(vec3_approx(
        tree.joint_by_name("wrist").unwrap().local_matrix().w_axis.truncate(),
        Vec3::new(0.25, 0.0, 0.0)
    ));

    let mut short = vec![0.0; MATRIX_FLOATS];
    assert!(matches!(
        tree.write_joint_translation("wrist", Vec3::ZERO, &mut short),
        Err(SceneTreeError::BufferSizeMismatch { .. })
    ));
}

#[test]
fn set_joint_translation_keeps_rotation() {
    let mut tree = arm();
    tree.set_joint_translation("shoulder", Vec3::new(0.0, 2.0, 0.0)).unwrap();

    let local = *tree.joint_by_name("shoulder").unwrap().local_matrix();
    let expected = Mat4::from_rotation_translation(Quat::from_rotation_z(FRAC_PI_2), Vec3::new(0.0, 2.0, 0.0));
    assert!(mat4_approx(&local, &expected));
}

// ============================================================================
// Queries
// ============================================================================

#[test]
fn keypoints_skip_unknown_names() {
    let mut tree = arm();
    tree.set_joint_translation("shoulder", Vec3::ZERO).unwrap();

    let points = tree.global_keypoints(&["wrist", "missing", "shoulder"]);
    assert_eq!(points.len(), 2);
    // Shoulder turns +X into +Y
    assert!(vec3_approx(points[0], Vec3::new(0.0, 0.55, 0.0)));
    assert!(vec3_approx(points[1], Vec3::ZERO));
}

#[test]
fn root_translation_reads_top_level_head() {
    let tree = arm();
    assert!(vec3_approx(tree.root_translation().unwrap(), Vec3::new(0.0, 1.5, 0.0)));
}

#[test]
fn local_rotations_map_into_global_frame() {
    let tree = arm();
    // Every joint inherits the shoulder's quarter turn about Z, so a local
    // X rotation becomes a global Y rotation
    let locals = vec![Mat4::from_rotation_x(FRAC_PI_2); tree.joint_count()];
    let globals = tree.local_to_global_rotations(&locals).unwrap();

    for global in &globals {
        assert!(mat4_approx(global, &Mat4::from_rotation_y(FRAC_PI_2)));
        assert!(vec3_approx(global.w_axis.truncate(), Vec3::ZERO));
    }

    assert!(matches!(
        tree.local_to_global_rotations(&locals[..1]),
        Err(SceneTreeError::LengthMismatch { left: 1, right: 3, .. })
    ));
}
