//! Loader-facing input types
//!
//! A scene tree never parses an asset container itself. An external loader
//! turns a file into a [`SceneDescription`]: a flat node list, animation
//! clips targeting node indices, and skins listing the joints they deform.

pub mod description;

pub use description::{
    ChildListNode, NodeDescription, NodeTransform, SceneDescription, SkinDescription,
};
