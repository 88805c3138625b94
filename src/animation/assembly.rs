//! The 27-cubie assembly that turns are applied to.

use super::scene::SceneSink;
use crate::color::{slot_hex, FaceletColor};
use crate::facelets::{Face, FaceletState, FACE_ORDER};
use glam::{IVec3, Mat3, Quat, Vec3};

/// One of the 27 sub-cubes.
#[derive(Debug, Clone)]
pub struct Cubie {
    id: usize,
    home: IVec3,
    position: Vec3,
    rotation: Quat,
    /// Outward normals in the home frame, with the sticker color on each.
    stickers: Vec<(IVec3, Option<FaceletColor>)>,
}

impl Cubie {
    fn new(id: usize, home: IVec3) -> Self {
        let stickers = FACE_ORDER
            .iter()
            .map(|face| face.normal())
            .filter(|normal| home.dot(*normal) == 1)
            .map(|normal| (normal, None))
            .collect();
        Self {
            id,
            home,
            position: home.as_vec3(),
            rotation: Quat::IDENTITY,
            stickers,
        }
    }

    pub fn id(&self) -> usize {
        self.id
    }

    /// Lattice position in a solved, unrotated cube.
    pub fn home(&self) -> IVec3 {
        self.home
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn rotation(&self) -> Quat {
        self.rotation
    }

    pub fn stickers(&self) -> &[(IVec3, Option<FaceletColor>)] {
        &self.stickers
    }

    /// Current lattice position, rounded.
    pub fn lattice(&self) -> IVec3 {
        self.position.round().as_ivec3()
    }

    fn is_home(&self) -> bool {
        self.lattice() == self.home && self.rotation.dot(Quat::IDENTITY).abs() > 1.0 - 1e-5
    }
}

/// Snaps a rotation that is close to one of the 24 cube symmetries onto it.
fn snap_rotation(q: Quat) -> Quat {
    let x = (q * Vec3::X).round();
    let y = (q * Vec3::Y).round();
    Quat::from_mat3(&Mat3::from_cols(x, y, x.cross(y))).normalize()
}

/// All cubies with their committed transforms.
#[derive(Debug, Clone)]
pub struct Assembly {
    cubies: Vec<Cubie>,
}

impl Assembly {
    /// Unpainted assembly in the home arrangement.
    pub fn new() -> Self {
        let mut cubies = Vec::with_capacity(27);
        for x in -1..=1 {
            for y in -1..=1 {
                for z in -1..=1 {
                    cubies.push(Cubie::new(cubies.len(), IVec3::new(x, y, z)));
                }
            }
        }
        Self { cubies }
    }

    /// Paints the stickers from a captured state.
    pub fn from_state(state: &FaceletState) -> Self {
        let mut assembly = Self::new();
        for cubie in &mut assembly.cubies {
            let home = cubie.home;
            for (normal, color) in &mut cubie.stickers {
                *color = Face::from_normal(*normal)
                    .and_then(|face| face.slot_of(home).and_then(|slot| state.get(face, slot)));
            }
        }
        assembly
    }

    pub fn cubies(&self) -> &[Cubie] {
        &self.cubies
    }

    pub fn cubie(&self, id: usize) -> Option<&Cubie> {
        self.cubies.get(id)
    }

    /// Ids of cubies whose position satisfies `select`.
    pub fn select(&self, select: impl Fn(Vec3) -> bool) -> Vec<usize> {
        self.cubies
            .iter()
            .filter(|c| select(c.position))
            .map(|c| c.id)
            .collect()
    }

    /// True when every cubie sits unrotated at its home position.
    pub fn is_home(&self) -> bool {
        self.cubies.iter().all(Cubie::is_home)
    }

    /// Commits a rotation about the origin for the given cubies.
    pub(crate) fn bake(&mut self, ids: &[usize], rotation: Quat) {
        for &id in ids {
            if let Some(cubie) = self.cubies.get_mut(id) {
                cubie.position = (rotation * cubie.position).round();
                cubie.rotation = snap_rotation(rotation * cubie.rotation);
            }
        }
    }

    /// Reads the sticker layout currently shown.
    pub fn facelet_state(&self) -> FaceletState {
        let mut state = FaceletState::new();
        for cubie in &self.cubies {
            let position = cubie.lattice();
            for &(normal, color) in &cubie.stickers {
                let Some(color) = color else { continue };
                let world = (cubie.rotation * normal.as_vec3()).round().as_ivec3();
                let Some(face) = Face::from_normal(world) else { continue };
                let Some(slot) = face.slot_of(position) else { continue };
                if let Some(entry) = state.face_mut(face).get_mut(slot) {
                    *entry = Some(color);
                }
            }
        }
        state
    }

    /// Pushes every transform and sticker color to the scene.
    pub fn paint(&self, sink: &mut dyn SceneSink) {
        for cubie in &self.cubies {
            sink.update_cubie(cubie.id, cubie.position, cubie.rotation);
            for &(normal, color) in &cubie.stickers {
                sink.paint_sticker(cubie.id, normal, slot_hex(color));
            }
        }
    }
}

impl Default for Assembly {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::FRAC_PI_2;

    #[test]
    fn test_twenty_seven_cubies_fifty_four_stickers() {
        let assembly = Assembly::new();
        assert_eq!(assembly.cubies().len(), 27);
        let stickers: usize = assembly.cubies().iter().map(|c| c.stickers().len()).sum();
        assert_eq!(stickers, 54);
        assert!(assembly.is_home());
    }

    #[test]
    fn test_paint_and_read_back() {
        let state = FaceletState::solved();
        let assembly = Assembly::from_state(&state);
        assert_eq!(assembly.facelet_state(), state);
    }

    #[test]
    fn test_read_back_after_turn_is_complete() {
        let mut assembly = Assembly::from_state(&FaceletState::solved());
        let ids = assembly.select(|p| p.y > 0.5);
        assembly.bake(&ids, Quat::from_axis_angle(Vec3::Y, -FRAC_PI_2));

        let state = assembly.facelet_state();
        assert!(state.is_complete());
        assert_ne!(state, FaceletState::solved());
        for face in FACE_ORDER {
            assert!(state.center_is_valid(face));
        }
    }

    #[test]
    fn test_bake_snaps_to_lattice() {
        let mut assembly = Assembly::new();
        let ids = assembly.select(|p| p.x > 0.5);
        assert_eq!(ids.len(), 9);

        let quarter = Quat::from_axis_angle(Vec3::X, FRAC_PI_2);
        assembly.bake(&ids, quarter);
        assert!(!assembly.is_home());
        for &id in &ids {
            let cubie = assembly.cubie(id).unwrap();
            assert_eq!(cubie.position(), cubie.position().round());
        }

        for _ in 0..3 {
            assembly.bake(&ids, quarter);
        }
        assert!(assembly.is_home());
    }
}
