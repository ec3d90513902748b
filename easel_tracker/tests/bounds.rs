// Copyright 2025 the Easel Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Bounds correctness of `ContentTracker` under long random edit sequences.
//!
//! Every step is checked against a brute-force recomputation of the
//! componentwise extrema over the surviving shapes.

use std::collections::BTreeMap;

use easel_tracker::{ContentTracker, Footprint, HitTestMode, Trackable, pick};
use kurbo::{Point, Rect};

#[derive(Clone)]
struct Lcg(u64);

impl Lcg {
    fn next_u32(&mut self) -> u32 {
        // Numerical Recipes LCG parameters.
        self.0 = self.0.wrapping_mul(6364136223846793005).wrapping_add(1);
        (self.0 >> 32) as u32
    }

    fn below(&mut self, upper: u32) -> u32 {
        self.next_u32() % upper
    }

    fn coord(&mut self) -> f64 {
        f64::from(self.below(2001)) - 1000.0
    }
}

fn brute_force(model: &BTreeMap<u32, Footprint>) -> Option<Rect> {
    model
        .values()
        .map(Footprint::bounds)
        .reduce(|acc, r| acc.union(r))
}

#[test]
fn random_edits_keep_bounds_exact() {
    let mut rng = Lcg(0x5eed);
    let mut tracker = ContentTracker::<u32>::new();
    let mut model = BTreeMap::new();

    for step in 0..5_000 {
        let key = rng.below(64);
        match rng.below(10) {
            0..=4 => {
                let p = Point::new(rng.coord(), rng.coord());
                tracker.track_shape(key, p);
                model.insert(key, Footprint::Point(p));
            }
            5..=6 => {
                let a = Point::new(rng.coord(), rng.coord());
                let b = Point::new(rng.coord(), rng.coord());
                tracker.track_shape_content(key, a, b);
                model.insert(key, Footprint::region(a, b));
            }
            7..=8 => {
                let removed = tracker.untrack_shape(&key);
                assert_eq!(removed, model.remove(&key), "step {step}");
            }
            _ => {
                if rng.below(20) == 0 {
                    tracker.clear_tracked_shapes();
                    model.clear();
                }
            }
        }

        assert_eq!(tracker.len(), model.len(), "step {step}");
        assert_eq!(tracker.content_bounds(), brute_force(&model), "step {step}");
        assert_eq!(tracker.tracking_enabled(), !model.is_empty(), "step {step}");
    }
}

#[test]
fn revision_tracks_bounds_changes_only() {
    let mut tracker = ContentTracker::<String>::new();
    tracker.track_shape("a", Point::new(0.0, 0.0));
    tracker.track_shape("b", Point::new(10.0, 10.0));
    let rev = tracker.revision();

    // Same footprint again: nothing moves.
    assert!(!tracker.track_shape("b", Point::new(10.0, 10.0)));
    assert_eq!(tracker.revision(), rev);

    assert!(tracker.track_shape("b", Point::new(20.0, 10.0)));
    assert_eq!(tracker.revision(), rev + 1);
}

struct Sticky {
    id: &'static str,
    origin: Point,
    size: f64,
}

impl Trackable for Sticky {
    type Key = String;

    fn tracking_key(&self) -> String {
        self.id.to_owned()
    }

    fn footprint(&self) -> Footprint {
        Footprint::region(
            self.origin,
            Point::new(self.origin.x + self.size, self.origin.y + self.size),
        )
    }
}

#[test]
fn trackable_shapes_register_under_their_own_keys() {
    let notes = [
        Sticky {
            id: "n1",
            origin: Point::new(0.0, 0.0),
            size: 100.0,
        },
        Sticky {
            id: "n2",
            origin: Point::new(80.0, 80.0),
            size: 100.0,
        },
    ];

    let mut tracker = ContentTracker::new();
    for note in &notes {
        tracker.track(note);
    }

    assert_eq!(
        tracker.content_bounds(),
        Some(Rect::new(0.0, 0.0, 180.0, 180.0))
    );
    assert!(tracker.contains("n2"));

    let top = pick(&notes, Point::new(90.0, 90.0), HitTestMode::Fill);
    assert_eq!(top.map(|n| n.id), Some("n2"));
}
