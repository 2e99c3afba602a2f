use glam::Vec3;

use crate::{atlas::UvAtlas, coords::CoordinateSystem, floors::FloorSet};

/// The type of debug lines.
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Clone, Copy)]
pub enum LineType {
  /// The outline of the plane below the navigation mesh.
  BaseOutline,
  /// The outline of a floor-separator plane.
  FloorOutline,
}

/// The type of debug triangles.
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Clone, Copy)]
pub enum TriangleType {
  /// Part of the plane just below the navigation mesh.
  BasePlane,
  /// Part of a plane at a floor-separator height.
  FloorPlane,
}

/// Trait to "draw" the floors of a navigation mesh to. Users should implement
/// this to check where their floor heights split the navigation mesh.
pub trait DebugDrawer<CS: CoordinateSystem> {
  fn add_line(&mut self, line_type: LineType, line: [CS::Coordinate; 2]);
  fn add_triangle(
    &mut self,
    triangle_type: TriangleType,
    triangle: [CS::Coordinate; 3],
  );
}

/// How far below the navigation mesh the base plane is drawn.
const BASE_PLANE_DROP: f32 = 0.1;

/// Draws a plane covering the navigation mesh at each floor height in
/// `floors`, plus a base plane just below the navigation mesh. Only the first
/// height above the navigation mesh is drawn, as a ceiling. Nothing is drawn
/// for navigation meshes less than 1 unit tall.
pub fn draw_floor_separators<CS: CoordinateSystem>(
  atlas: &UvAtlas,
  floors: &FloorSet,
  debug_drawer: &mut impl DebugDrawer<CS>,
) {
  let size = atlas.size();
  if size.z < 1.0 {
    return;
  }

  draw_plane(
    atlas,
    -BASE_PLANE_DROP,
    LineType::BaseOutline,
    TriangleType::BasePlane,
    debug_drawer,
  );

  for &height in floors.heights() {
    if height <= 0.0 {
      continue;
    }
    draw_plane(
      atlas,
      height,
      LineType::FloorOutline,
      TriangleType::FloorPlane,
      debug_drawer,
    );
    if height > size.z {
      break;
    }
  }
}

fn draw_plane<CS: CoordinateSystem>(
  atlas: &UvAtlas,
  height: f32,
  line_type: LineType,
  triangle_type: TriangleType,
  debug_drawer: &mut impl DebugDrawer<CS>,
) {
  let size = atlas.size();
  let corner = atlas.corner() + Vec3::new(0.0, 0.0, height);
  let corners = [
    corner,
    corner + Vec3::new(size.x, 0.0, 0.0),
    corner + Vec3::new(size.x, size.y, 0.0),
    corner + Vec3::new(0.0, size.y, 0.0),
  ]
  .map(|point| CS::from_standard(&point));

  for i in 0..corners.len() {
    let j = (i + 1) % corners.len();
    debug_drawer.add_line(line_type, [corners[i].clone(), corners[j].clone()]);
  }
  debug_drawer.add_triangle(
    triangle_type,
    [corners[0].clone(), corners[1].clone(), corners[2].clone()],
  );
  debug_drawer.add_triangle(
    triangle_type,
    [corners[0].clone(), corners[2].clone(), corners[3].clone()],
  );
}

#[cfg(test)]
#[path = "debug_test.rs"]
mod test;
