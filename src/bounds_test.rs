use glam::Vec3;

use crate::util::BoundingBox;

use super::RenderBounds;

#[test]
fn extent_and_radius_come_from_nav_mesh_size() {
  for size in [
    Vec3::new(10.0, 20.0, 5.0),
    Vec3::new(3.0, 1.0, 2.0),
    Vec3::new(0.5, 0.5, 7.5),
  ] {
    let bounds = RenderBounds::from_nav_mesh_size(Vec3::ZERO, size);
    assert_eq!(bounds.box_extent, size);
    assert_eq!(bounds.sphere_radius, size.x.max(size.y).max(size.z));
  }
}

#[test]
fn box_is_centered_on_origin() {
  let bounds = RenderBounds::from_nav_mesh_size(
    Vec3::new(1.0, 2.0, 3.0),
    Vec3::new(4.0, 5.0, 6.0),
  );
  assert_eq!(
    bounds.to_bounding_box(),
    BoundingBox::new_box(Vec3::new(-3.0, -3.0, -3.0), Vec3::new(5.0, 7.0, 9.0))
  );
}
