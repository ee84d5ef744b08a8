//! Seam-continuous stamp decoration for six-face cube textures.
//!
//! Each face carries a base image; a surface hit composites a stamp at a
//! point and rotation, and any part of the stamp that leaves the face
//! continues onto the correct neighboring face via the cube's adjacency
//! geometry. Every placement is appended to an ordered log that fully
//! defines the decoration: replaying it from pristine bases reproduces the
//! cube bit-identically, which is also how undo works.

#![forbid(unsafe_code)]

pub mod adjacency;
pub mod assets;
pub mod canvas;
pub mod composite;
pub mod decorator;
pub mod error;
pub mod event;
pub mod log;
pub mod render;

pub use adjacency::{EdgeDir, EdgeTransform, FACE_COUNT, Face, FaceAdjacencyModel};
pub use assets::{AssetSet, AssetSources, PreparedImage, StampAsset, decode_image};
pub use canvas::TextureCanvasSet;
pub use decorator::CubeDecorator;
pub use error::{CubestampError, CubestampResult};
pub use event::{
    Command, EventTranslator, Modifiers, RandomSource, SeededRandom, SurfaceHit, ThreadRandom,
};
pub use log::{Placement, PlacementLog, SeedReport};
pub use render::{STAMP_SCALE, StampRenderer};
