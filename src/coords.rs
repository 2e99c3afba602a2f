use glam::Vec3;

/// A coordinate system used to convert from a user-facing coordinate system
/// into the standard coordinate system that meshes are built in. The standard
/// coordinate system is [`crate::coords::XYZ`].
pub trait CoordinateSystem {
  /// The user-facing coordinate type.
  type Coordinate: Clone;

  /// Converts a coordinate in this system to the standard coordinate system.
  fn to_standard(v: &Self::Coordinate) -> Vec3;

  /// Converts a standard coordinate into this system's coordinate.
  fn from_standard(v: &Vec3) -> Self::Coordinate;
}

/// The standard coordinate system, where X points right, Y points forward, and
/// Z points up. Floors are stacked along Z, and UVs are taken from the XY
/// plane.
pub struct XYZ;

impl CoordinateSystem for XYZ {
  type Coordinate = Vec3;

  fn to_standard(v: &Self::Coordinate) -> Vec3 {
    *v
  }

  fn from_standard(v: &Vec3) -> Self::Coordinate {
    *v
  }
}

/// A coordinate system where X is right, Y is up, and -Z is forward.
pub struct YUp;

impl CoordinateSystem for YUp {
  type Coordinate = Vec3;

  fn to_standard(v: &Self::Coordinate) -> Vec3 {
    Vec3::new(v.x, -v.z, v.y)
  }

  fn from_standard(v: &Vec3) -> Self::Coordinate {
    Vec3::new(v.x, v.z, -v.y)
  }
}

#[cfg(test)]
#[path = "coords_test.rs"]
mod test;
