use std::collections::HashSet;

use glam::Vec3;

/// Tracks which polygons have already been processed during a build.
/// Navigation tiles can return the same polygon from neighbouring tiles, so
/// polygons are identified by their centroid. Centroids are compared exactly,
/// without any tolerance.
#[derive(Default, Debug, Clone)]
pub struct PolygonDeduplicator {
  seen: HashSet<[u32; 3]>,
}

impl PolygonDeduplicator {
  pub fn new() -> Self {
    Self::default()
  }

  /// Records a polygon with `centroid` as processed. Returns false if a
  /// polygon with an equal centroid was already processed.
  pub fn insert(&mut self, centroid: Vec3) -> bool {
    match centroid_key(centroid) {
      Some(key) => self.seen.insert(key),
      // NaN is not equal to anything, so it can't be a duplicate.
      None => true,
    }
  }

  /// The number of unique polygons processed so far.
  pub fn len(&self) -> usize {
    self.seen.len()
  }

  pub fn is_empty(&self) -> bool {
    self.seen.is_empty()
  }

  /// Forgets all processed polygons, starting a new build.
  pub fn clear(&mut self) {
    self.seen.clear();
  }
}

/// Computes the hash key of `centroid`, such that two keys are equal exactly
/// when the centroids compare equal.
fn centroid_key(centroid: Vec3) -> Option<[u32; 3]> {
  if centroid.is_nan() {
    return None;
  }
  // Adding zero turns -0.0 into 0.0, which otherwise have different bits.
  Some((centroid + Vec3::ZERO).to_array().map(f32::to_bits))
}

#[cfg(test)]
#[path = "dedup_test.rs"]
mod test;
