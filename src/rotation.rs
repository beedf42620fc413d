use crate::math::Mat4;

/// One of the six orthogonal rotation planes of 4-space.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum RotationPlane {
    Xy,
    Xz,
    Yz,
    Xw,
    Yw,
    Zw,
}

impl RotationPlane {
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "xy" => Some(Self::Xy),
            "xz" => Some(Self::Xz),
            "yz" => Some(Self::Yz),
            "xw" => Some(Self::Xw),
            "yw" => Some(Self::Yw),
            "zw" => Some(Self::Zw),
            _ => None,
        }
    }
}

/// The six plane angles, in radians. Angles are unbounded; trigonometric
/// wrapping is the only normalization applied.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct RotationState {
    pub xy: f32,
    pub xz: f32,
    pub yz: f32,
    pub xw: f32,
    pub yw: f32,
    pub zw: f32,
}

impl RotationState {
    pub fn set(&mut self, xy: f32, xz: f32, yz: f32, xw: f32, yw: f32, zw: f32) {
        *self = Self {
            xy,
            xz,
            yz,
            xw,
            yw,
            zw,
        };
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn add_angle(&mut self, plane: RotationPlane, delta: f32) {
        match plane {
            RotationPlane::Xy => self.xy += delta,
            RotationPlane::Xz => self.xz += delta,
            RotationPlane::Yz => self.yz += delta,
            RotationPlane::Xw => self.xw += delta,
            RotationPlane::Yw => self.yw += delta,
            RotationPlane::Zw => self.zw += delta,
        }
    }
}

pub fn rotate_xy(angle: f32) -> Mat4 {
    let c = angle.cos();
    let s = angle.sin();
    Mat4::new([
        [c, -s, 0.0, 0.0],
        [s, c, 0.0, 0.0],
        [0.0, 0.0, 1.0, 0.0],
        [0.0, 0.0, 0.0, 1.0],
    ])
}

pub fn rotate_xz(angle: f32) -> Mat4 {
    let c = angle.cos();
    let s = angle.sin();
    Mat4::new([
        [c, 0.0, -s, 0.0],
        [0.0, 1.0, 0.0, 0.0],
        [s, 0.0, c, 0.0],
        [0.0, 0.0, 0.0, 1.0],
    ])
}

pub fn rotate_yz(angle: f32) -> Mat4 {
    let c = angle.cos();
    let s = angle.sin();
    Mat4::new([
        [1.0, 0.0, 0.0, 0.0],
        [0.0, c, -s, 0.0],
        [0.0, s, c, 0.0],
        [0.0, 0.0, 0.0, 1.0],
    ])
}

pub fn rotate_xw(angle: f32) -> Mat4 {
    let c = angle.cos();
    let s = angle.sin();
    Mat4::new([
        [c, 0.0, 0.0, -s],
        [0.0, 1.0, 0.0, 0.0],
        [0.0, 0.0, 1.0, 0.0],
        [s, 0.0, 0.0, c],
    ])
}

pub fn rotate_yw(angle: f32) -> Mat4 {
    let c = angle.cos();
    let s = angle.sin();
    Mat4::new([
        [1.0, 0.0, 0.0, 0.0],
        [0.0, c, 0.0, -s],
        [0.0, 0.0, 1.0, 0.0],
        [0.0, s, 0.0, c],
    ])
}

pub fn rotate_zw(angle: f32) -> Mat4 {
    let c = angle.cos();
    let s = angle.sin();
    Mat4::new([
        [1.0, 0.0, 0.0, 0.0],
        [0.0, 1.0, 0.0, 0.0],
        [0.0, 0.0, c, -s],
        [0.0, 0.0, s, c],
    ])
}

/// Compose the six plane rotations into one transform. Applied to a column
/// vector, XY acts first, then XZ, YZ, XW, YW, and ZW last. The order is a
/// commitment: reordering produces a different 4D orientation.
pub fn compose(rotation: &RotationState) -> Mat4 {
    let m = rotate_zw(rotation.zw);
    let m = m * rotate_yw(rotation.yw);
    let m = m * rotate_xw(rotation.xw);
    let m = m * rotate_yz(rotation.yz);
    let m = m * rotate_xz(rotation.xz);
    m * rotate_xy(rotation.xy)
}
