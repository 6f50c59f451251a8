use std::f32::consts::FRAC_PI_2;

use glam::{Quat, Vec3};
use skintree::utils::HostClock;
use skintree::{
    AnimationClip, KeyframeTrack, NodeDescription, NodeTransform, SceneDescription, SceneTree,
    SceneTreeSettings, SkinDescription, Track,
};

/// Headless skinning loop.
///
/// Usage: `cargo run --example skinning [scene.json]`
///
/// Without an argument a three-bone arm with a waving clip is used.
fn main() -> anyhow::Result<()> {
    env_logger::init();

    let desc = match std::env::args().nth(1) {
        Some(path) => {
            println!("Loading scene description from: {path}");
            let text = std::fs::read_to_string(&path)?;
            serde_json::from_str(&text)?
        }
        None => demo_arm(),
    };

    println!("Joints: {}", desc.nodes.len());
    println!("Total animations found: {}", desc.animations.len());
    for clip in &desc.animations {
        println!("  clip '{}' (duration: {:.2}s, {} tracks)", clip.name, clip.duration, clip.tracks.len());
    }

    let mut tree = SceneTree::from_description(&desc, SceneTreeSettings::default())?;
    let skin = desc.skins.first().cloned().unwrap_or_else(|| SkinDescription {
        name: "all".to_string(),
        joints: (0..tree.joint_count()).collect(),
    });
    let keypoints: Vec<&str> = desc.nodes.iter().map(|n| n.name.as_str()).collect();

    let clock = HostClock::new();
    let mut pose = Vec::new();

    for frame in 0..10 {
        let now = clock.timestamp();
        tree.set_animation_frame(&desc.animations, now)?;
        tree.update_global_pose();
        tree.write_skinning_pose(&skin.joints, &mut pose)?;

        println!(
            "frame {frame:>3} t={now:.3}s: {} skinning floats",
            pose.len()
        );
        for (name, p) in keypoints.iter().zip(tree.global_keypoints(&keypoints[..])) {
            println!("    {name:<10} ({:>6.3}, {:>6.3}, {:>6.3})", p.x, p.y, p.z);
        }

        std::thread::sleep(std::time::Duration::from_millis(50));
    }

    Ok(())
}

fn demo_arm() -> SceneDescription {
    let nodes = vec![
        NodeDescription::new(None, "shoulder", NodeTransform::from_translation(Vec3::new(0.0, 1.4, 0.0))),
        NodeDescription::new(Some(0), "elbow", NodeTransform::from_translation(Vec3::new(0.3, 0.0, 0.0))),
        NodeDescription::new(Some(1), "wrist", NodeTransform::from_translation(Vec3::new(0.25, 0.0, 0.0))),
    ];

    let wave = AnimationClip::new(
        "wave",
        vec![
            Track::rotation(
                0,
                KeyframeTrack::linear(
                    vec![0.0, 0.25, 0.5],
                    vec![Quat::IDENTITY, Quat::from_rotation_z(FRAC_PI_2 * 0.5), Quat::IDENTITY],
                ),
            ),
            Track::rotation(
                1,
                KeyframeTrack::linear(
                    vec![0.0, 0.2, 0.4],
                    vec![Quat::IDENTITY, Quat::from_rotation_z(FRAC_PI_2), Quat::IDENTITY],
                ),
            ),
        ],
    );

    SceneDescription {
        nodes,
        animations: vec![wave],
        skins: vec![SkinDescription {
            name: "arm".to_string(),
            joints: vec![0, 1, 2],
        }],
    }
}
