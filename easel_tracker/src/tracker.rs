// Copyright 2025 the Easel Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::string::String;
use core::hash::Hash;

use hashbrown::{Equivalent, HashMap};
use kurbo::{Point, Rect};

use crate::footprint::Footprint;
use crate::pick::Trackable;

/// Keyed set of tracked shapes plus the bounding box of all of them.
///
/// Keys are opaque: the tracker hashes and compares them but never inspects
/// their content. Re-tracking a key overwrites its previous footprint.
///
/// # Type Parameters
///
/// - `K`: The key type, `String` by default.
#[derive(Clone, Debug)]
pub struct ContentTracker<K = String> {
    shapes: HashMap<K, Footprint>,
    bounds: Option<Rect>,
    revision: u64,
}

impl<K> Default for ContentTracker<K> {
    fn default() -> Self {
        Self {
            shapes: HashMap::new(),
            bounds: None,
            revision: 0,
        }
    }
}

impl<K> ContentTracker<K>
where
    K: Eq + Hash,
{
    /// Creates an empty tracker.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Tracks `key` at a single representative point.
    ///
    /// Returns `true` if the content bounds changed.
    pub fn track_shape(&mut self, key: impl Into<K>, point: Point) -> bool {
        self.upsert(key.into(), Footprint::Point(point))
    }

    /// Tracks `key` as a region spanned by two opposite corners.
    ///
    /// Returns `true` if the content bounds changed.
    pub fn track_shape_content(
        &mut self,
        key: impl Into<K>,
        top_left: Point,
        bottom_right: Point,
    ) -> bool {
        if !(is_finite(top_left) && is_finite(bottom_right)) {
            tracing::warn!(?top_left, ?bottom_right, "ignoring non-finite region");
            return false;
        }
        self.upsert(key.into(), Footprint::region(top_left, bottom_right))
    }

    /// Tracks any [`Trackable`] shape under its own key.
    ///
    /// Returns `true` if the content bounds changed.
    pub fn track<S>(&mut self, shape: &S) -> bool
    where
        S: Trackable<Key = K> + ?Sized,
    {
        self.upsert(shape.tracking_key(), shape.footprint())
    }

    /// Inserts or replaces the footprint for `key`.
    ///
    /// Non-finite footprints are rejected and leave the tracker untouched.
    /// Regions are stored with their corners in order.
    /// Returns `true` if the content bounds changed.
    pub fn upsert(&mut self, key: K, footprint: Footprint) -> bool {
        let footprint = footprint.normalized();
        if !footprint.is_finite() {
            tracing::warn!(?footprint, "ignoring non-finite footprint");
            return false;
        }
        let before = self.bounds;
        match self.shapes.insert(key, footprint) {
            Some(old) if old != footprint && self.touches_edge(old) => self.rescan(),
            _ => self.expand(footprint.bounds()),
        }
        self.commit(before)
    }

    /// Stops tracking `key`.
    ///
    /// Untracking a key that was never tracked is a no-op. Returns the
    /// removed footprint, if any.
    pub fn untrack_shape<Q>(&mut self, key: &Q) -> Option<Footprint>
    where
        Q: ?Sized + Hash + Equivalent<K>,
    {
        let removed = self.shapes.remove(key)?;
        let before = self.bounds;
        if self.touches_edge(removed) {
            self.rescan();
        }
        self.commit(before);
        Some(removed)
    }

    /// Stops tracking every shape.
    pub fn clear_tracked_shapes(&mut self) {
        let before = self.bounds;
        self.shapes.clear();
        self.bounds = None;
        self.commit(before);
    }

    /// Returns `true` once at least one shape is tracked.
    #[must_use]
    pub fn tracking_enabled(&self) -> bool {
        !self.shapes.is_empty()
    }

    /// Returns the bounding box of all tracked footprints.
    ///
    /// `None` when nothing is tracked.
    #[must_use]
    pub fn content_bounds(&self) -> Option<Rect> {
        self.bounds
    }

    /// Returns the midpoint of [`content_bounds`](Self::content_bounds).
    #[must_use]
    pub fn content_center(&self) -> Option<Point> {
        self.bounds.map(|b| b.center())
    }

    /// Returns the footprint tracked for `key`.
    #[must_use]
    pub fn get<Q>(&self, key: &Q) -> Option<Footprint>
    where
        Q: ?Sized + Hash + Equivalent<K>,
    {
        self.shapes.get(key).copied()
    }

    /// Returns `true` if `key` is tracked.
    #[must_use]
    pub fn contains<Q>(&self, key: &Q) -> bool
    where
        Q: ?Sized + Hash + Equivalent<K>,
    {
        self.shapes.contains_key(key)
    }

    /// Returns the number of tracked shapes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    /// Returns `true` if nothing is tracked.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }

    /// Iterates tracked keys and footprints in arbitrary order.
    pub fn iter(&self) -> impl Iterator<Item = (&K, Footprint)> + '_ {
        self.shapes.iter().map(|(k, fp)| (k, *fp))
    }

    /// Counter bumped every time the content bounds change.
    #[must_use]
    pub fn revision(&self) -> u64 {
        self.revision
    }

    fn expand(&mut self, r: Rect) {
        self.bounds = Some(match self.bounds {
            Some(b) => b.union(r),
            None => r,
        });
    }

    /// Whether `fp` defines at least one side of the current bounds.
    fn touches_edge(&self, fp: Footprint) -> bool {
        let Some(b) = self.bounds else {
            return false;
        };
        let r = fp.bounds();
        r.x0 <= b.x0 || r.y0 <= b.y0 || r.x1 >= b.x1 || r.y1 >= b.y1
    }

    fn rescan(&mut self) {
        tracing::debug!(shapes = self.shapes.len(), "rescanning content bounds");
        let mut it = self.shapes.values().map(Footprint::bounds);
        self.bounds = it.next().map(|first| it.fold(first, |acc, r| acc.union(r)));
    }

    fn commit(&mut self, before: Option<Rect>) -> bool {
        let changed = self.bounds != before;
        if changed {
            self.revision = self.revision.wrapping_add(1);
        }
        changed
    }
}

fn is_finite(p: Point) -> bool {
    p.x.is_finite() && p.y.is_finite()
}
