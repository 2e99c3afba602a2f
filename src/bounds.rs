use glam::Vec3;

use crate::util::BoundingBox;

/// The culling bounds of a render mesh. These come from the bounds reported by
/// the navigation mesh rather than from the generated vertices, which is
/// correct as long as the navigation mesh bounds all of its polygons.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct RenderBounds {
  /// The local origin of the mesh that the bounds are centered on.
  pub origin: Vec3,
  /// The extent of the box in each direction from `origin`.
  pub box_extent: Vec3,
  /// The radius of the bounding sphere around `origin`.
  pub sphere_radius: f32,
}

impl RenderBounds {
  /// Computes the bounds of a mesh built from a navigation mesh of size
  /// `nav_mesh_size`, centered on `origin`.
  pub fn from_nav_mesh_size(origin: Vec3, nav_mesh_size: Vec3) -> Self {
    Self {
      origin,
      box_extent: nav_mesh_size,
      sphere_radius: nav_mesh_size.max_element(),
    }
  }

  /// The box covered by these bounds.
  pub fn to_bounding_box(&self) -> BoundingBox {
    BoundingBox::new_box(
      self.origin - self.box_extent,
      self.origin + self.box_extent,
    )
  }
}

#[cfg(test)]
#[path = "bounds_test.rs"]
mod test;
