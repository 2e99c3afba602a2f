use glam::Vec3;

/// Computes the triangle fan of a polygon with `boundary_len` boundary
/// vertices, anchored at its centroid. Triangles are given as local indices,
/// where 0 is the centroid and `i + 1` is boundary vertex `i`.
///
/// For boundary vertices `v0..vn-1`, this produces `(C, v[i-1], v[i])` for
/// each `i` in `1..n`, followed by the closing triangle `(C, v[n-1], v0)`.
/// Polygons with less than 3 boundary vertices produce no triangles.
pub fn fan_triangles(
  boundary_len: usize,
) -> impl ExactSizeIterator<Item = [usize; 3]> {
  let triangle_count = if boundary_len >= 3 { boundary_len } else { 0 };
  (0..triangle_count).map(move |i| {
    if i + 1 < boundary_len {
      [0, i + 1, i + 2]
    } else {
      [0, boundary_len, 1]
    }
  })
}

/// Fans `boundary` from `centroid`, returning the triangle positions. See
/// [`fan_triangles`].
pub fn tessellate_polygon(centroid: Vec3, boundary: &[Vec3]) -> Vec<[Vec3; 3]> {
  let local_vertex = |index: usize| {
    if index == 0 {
      centroid
    } else {
      boundary[index - 1]
    }
  };
  fan_triangles(boundary.len())
    .map(|[a, b, c]| [local_vertex(a), local_vertex(b), local_vertex(c)])
    .collect()
}

/// Determines whether the triangle has no area.
pub(crate) fn is_degenerate(triangle: [Vec3; 3]) -> bool {
  let [a, b, c] = triangle;
  (b - a).cross(c - a).length_squared() == 0.0
}

#[cfg(test)]
#[path = "tessellate_test.rs"]
mod test;
