//! Asset Description Tests
//!
//! Tests for:
//! - SceneDescription deserialization from loader JSON
//! - Child-list to parent-link conversion
//! - Building, animating and skinning a tree straight from a description
//! - Settings deserialization with defaults

use glam::{Mat4, Quat, Vec3};

use skintree::assets::{ChildListNode, NodeTransform, SceneDescription};
use skintree::errors::SceneTreeError;
use skintree::scene::SceneTree;
use skintree::settings::{MATRIX_FLOATS, MatrixLayout, ScaleChannelMode, SceneTreeSettings};

const EPSILON: f32 = 1e-5;

fn vec3_approx(a: Vec3, b: Vec3) -> bool {
    a.abs_diff_eq(b, EPSILON)
}

const RIG_JSON: &str = r#"{
    "nodes": [
        { "parent": null, "name": "root",
          "transform": { "Trs": { "translation": [0.0, 1.0, 0.0],
                                  "rotation": [0.0, 0.0, 0.0, 1.0],
                                  "scale": [1.0, 1.0, 1.0] } } },
        { "parent": 0, "name": "bone",
          "transform": { "Matrix": [1.0, 0.0, 0.0, 0.0,
                                    0.0, 1.0, 0.0, 0.0,
                                    0.0, 0.0, 1.0, 0.0,
                                    0.0, 2.0, 0.0, 1.0] } },
        { "parent": 1, "name": "tip" }
    ],
    "animations": [
        { "name": "lift", "duration": 1.0, "tracks": [
            { "meta": { "joint": 0, "target": "Translation" },
              "data": { "Vector3": { "times": [0.0, 1.0],
                                     "values": [[0.0, 1.0, 0.0], [0.0, 3.0, 0.0]] } } }
        ] }
    ],
    "skins": [ { "name": "body", "joints": [2, 1, 0] } ]
}"#;

// ============================================================================
// Loader JSON
// ============================================================================

#[test]
fn description_deserializes_from_json() {
    let desc: SceneDescription = serde_json::from_str(RIG_JSON).unwrap();
    assert_eq!(desc.nodes.len(), 3);
    assert_eq!(desc.nodes[2].transform, NodeTransform::IDENTITY);
    assert_eq!(desc.nodes[1].transform.to_matrix(), Mat4::from_translation(Vec3::new(0.0, 2.0, 0.0)));
    assert_eq!(desc.animations[0].tracks.len(), 1);
    assert_eq!(desc.skins[0].joints, [2, 1, 0]);
}

#[test]
fn description_drives_a_full_frame() {
    let desc: SceneDescription = serde_json::from_str(RIG_JSON).unwrap();
    let mut tree = SceneTree::from_description(&desc, SceneTreeSettings::default()).unwrap();

    assert!(vec3_approx(
        tree.joint_by_name("tip").unwrap().global_translation(),
        Vec3::new(0.0, 3.0, 0.0)
    ));

    tree.set_animation_frame(&desc.animations, 10.0).unwrap();
    tree.set_animation_frame(&desc.animations, 10.5).unwrap();
    tree.update_global_pose();

    // Root lifted from y=1 to y=2; every skinning matrix is a +1 Y shift
    let pose = tree.skin_pose(&desc.skins[0]).unwrap();
    assert_eq!(pose.len(), 3 * MATRIX_FLOATS);
    for slot in 0..3 {
        let m = MatrixLayout::RowMajor.read(&pose[slot * MATRIX_FLOATS..]);
        assert!(m.abs_diff_eq(Mat4::from_translation(Vec3::Y), EPSILON));
    }
}

#[test]
fn description_roundtrips_through_json() {
    let desc: SceneDescription = serde_json::from_str(RIG_JSON).unwrap();
    let text = serde_json::to_string(&desc).unwrap();
    let back: SceneDescription = serde_json::from_str(&text).unwrap();
    assert_eq!(back.nodes, desc.nodes);
    assert_eq!(back.skins, desc.skins);
}

// ============================================================================
// Child Lists
// ============================================================================

#[test]
fn child_lists_build_the_same_tree() {
    let nodes = vec![
        ChildListNode {
            name: "hand".into(),
            transform: NodeTransform::from_translation(Vec3::X),
            children: vec![1, 2],
        },
        ChildListNode {
            name: "index".into(),
            transform: NodeTransform::from_translation(Vec3::Y),
            children: vec![],
        },
        ChildListNode {
            name: "thumb".into(),
            transform: NodeTransform::Trs {
                translation: Vec3::Z,
                rotation: Quat::IDENTITY,
                scale: Vec3::ONE,
            },
            children: vec![],
        },
    ];
    let flat = SceneDescription::from_children(&nodes).unwrap();
    let tree = SceneTree::from_nodes(&flat, SceneTreeSettings::default()).unwrap();

    let names: Vec<_> = tree.children(0).map(|j| j.name().to_string()).collect();
    assert_eq!(names, ["thumb", "index"]);
    assert!(vec3_approx(
        tree.joint_by_name("thumb").unwrap().global_translation(),
        Vec3::new(1.0, 0.0, 1.0)
    ));
}

#[test]
fn child_claimed_twice_keeps_last_parent() {
    let nodes = vec![
        ChildListNode {
            name: "a".into(),
            transform: NodeTransform::IDENTITY,
            children: vec![2],
        },
        ChildListNode {
            name: "b".into(),
            transform: NodeTransform::IDENTITY,
            children: vec![2],
        },
        ChildListNode {
            name: "c".into(),
            transform: NodeTransform::IDENTITY,
            children: vec![],
        },
    ];
    let flat = SceneDescription::from_children(&nodes).unwrap();
    assert_eq!(flat[2].parent, Some(1));
}

#[test]
fn child_list_rejects_bad_index() {
    let nodes = vec![ChildListNode {
        name: "only".into(),
        transform: NodeTransform::IDENTITY,
        children: vec![3],
    }];
    assert_eq!(
        SceneDescription::from_children(&nodes).unwrap_err(),
        SceneTreeError::JointIndexOutOfRange {
            context: "child list",
            index: 3,
            count: 1,
        }
    );
}

// ============================================================================
// Settings
// ============================================================================

#[test]
fn settings_fill_missing_fields_with_defaults() {
    let settings: SceneTreeSettings = serde_json::from_str(r#"{ "matrix_layout": "ColumnMajor" }"#).unwrap();
    assert_eq!(settings.matrix_layout, MatrixLayout::ColumnMajor);
    assert_eq!(settings.scale_channels, ScaleChannelMode::Ignore);

    let settings: SceneTreeSettings = serde_json::from_str("{}").unwrap();
    assert_eq!(settings, SceneTreeSettings::default());
}
