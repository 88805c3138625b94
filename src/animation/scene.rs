//! The rendering seam.

use glam::{IVec3, Quat, Vec3};

/// Receives declarative updates for a rendered cube.
///
/// Implementations own meshes and materials; the core never reads
/// anything back.
pub trait SceneSink {
    /// Moves cubie `id` to a world transform.
    fn update_cubie(&mut self, id: usize, position: Vec3, rotation: Quat);

    /// Sets the material color of the sticker on cubie `id` whose
    /// outward normal, in the cubie's home frame, is `normal`.
    fn paint_sticker(&mut self, id: usize, normal: IVec3, hex: u32);
}

/// A scene that only traces what it is told.
#[derive(Debug, Default)]
pub struct LogScene {
    transforms: u64,
    paints: u64,
}

impl LogScene {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn transform_updates(&self) -> u64 {
        self.transforms
    }

    pub fn paint_updates(&self) -> u64 {
        self.paints
    }
}

impl SceneSink for LogScene {
    fn update_cubie(&mut self, id: usize, position: Vec3, rotation: Quat) {
        self.transforms += 1;
        tracing::trace!(id, ?position, ?rotation, "Cubie transform");
    }

    fn paint_sticker(&mut self, id: usize, normal: IVec3, hex: u32) {
        self.paints += 1;
        tracing::trace!(id, ?normal, hex, "Sticker painted");
    }
}
