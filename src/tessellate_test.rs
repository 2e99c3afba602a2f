use glam::Vec3;
use googletest::{expect_eq, expect_false, expect_true};

use super::{fan_triangles, is_degenerate, tessellate_polygon};

#[googletest::test]
fn fans_from_centroid() {
  assert_eq!(
    fan_triangles(4).collect::<Vec<_>>(),
    vec![[0, 1, 2], [0, 2, 3], [0, 3, 4], [0, 4, 1]]
  );
  assert_eq!(
    fan_triangles(3).collect::<Vec<_>>(),
    vec![[0, 1, 2], [0, 2, 3], [0, 3, 1]]
  );
}

#[googletest::test]
fn produces_one_triangle_per_boundary_vertex() {
  for boundary_len in 3..12 {
    let triangles = fan_triangles(boundary_len).collect::<Vec<_>>();
    expect_eq!(triangles.len(), boundary_len);
    expect_true!(triangles.iter().all(|triangle| triangle[0] == 0));
    // Every boundary edge is used exactly once.
    for i in 1..=boundary_len {
      let next = if i == boundary_len { 1 } else { i + 1 };
      expect_eq!(
        triangles.iter().filter(|t| t[1] == i && t[2] == next).count(),
        1
      );
    }
  }
}

#[googletest::test]
fn small_polygons_produce_nothing() {
  expect_eq!(fan_triangles(0).len(), 0);
  expect_eq!(fan_triangles(1).len(), 0);
  expect_eq!(fan_triangles(2).len(), 0);
}

#[googletest::test]
fn tessellates_positions() {
  let centroid = Vec3::new(0.5, 0.5, 1.0);
  let boundary = [
    Vec3::new(0.0, 0.0, 1.0),
    Vec3::new(1.0, 0.0, 1.0),
    Vec3::new(1.0, 1.0, 1.0),
    Vec3::new(0.0, 1.0, 1.0),
  ];

  assert_eq!(
    tessellate_polygon(centroid, &boundary),
    vec![
      [centroid, boundary[0], boundary[1]],
      [centroid, boundary[1], boundary[2]],
      [centroid, boundary[2], boundary[3]],
      [centroid, boundary[3], boundary[0]],
    ]
  );
}

#[googletest::test]
fn detects_degenerate_triangles() {
  expect_false!(is_degenerate([Vec3::ZERO, Vec3::X, Vec3::Y]));
  // Repeated point.
  expect_true!(is_degenerate([Vec3::ZERO, Vec3::Y, Vec3::ZERO]));
  // Collinear points.
  expect_true!(is_degenerate([Vec3::ZERO, Vec3::X, Vec3::X * 2.0]));
}
