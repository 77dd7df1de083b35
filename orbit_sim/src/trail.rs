//! Fading position history for each body
//!
//! Every sample starts at weight 1.0 and loses `2 * dt / decay_duration` per
//! `dt` seconds of simulated time, so it disappears after half the decay
//! duration. Samples are appended in time order and all fade at the same rate,
//! which keeps weights non-decreasing from oldest to newest. Pruning therefore
//! only ever trims the front of the queue.
//!
//! Weights are not stored per sample. The recorder keeps a running total of
//! applied decay and each sample remembers the total at the moment it was
//! recorded, so a decay call costs O(1) plus the samples it removes.
//!
//! The running total picks up rounding error as it grows, so a sample is
//! treated as expired once its weight is within [`EXPIRY_EPSILON`] of zero.

use crate::body::BodyId;
use crate::error::{Result, SimulationError};
use common::Vector3;
use std::collections::VecDeque;

/// Weights at or below this are considered fully faded
pub const EXPIRY_EPSILON: f64 = 1e-9;

/// One point of a trail as seen by a renderer
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrailSample {
    pub position: Vector3,
    /// Opacity proxy in `(0, 1]`
    pub weight: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct StoredSample {
    position: Vector3,
    decay_at_record: f64,
}

/// Samples of a single body, oldest first
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Trail {
    samples: VecDeque<StoredSample>,
}

impl Trail {
    fn push(&mut self, position: Vector3, decay_total: f64) {
        self.samples.push_back(StoredSample {
            position,
            decay_at_record: decay_total,
        });
    }

    fn prune(&mut self, decay_total: f64) -> usize {
        let mut removed = 0;
        while let Some(oldest) = self.samples.front() {
            if weight_of(oldest, decay_total) > EXPIRY_EPSILON {
                break;
            }
            self.samples.pop_front();
            removed += 1;
        }
        removed
    }
}

fn weight_of(sample: &StoredSample, decay_total: f64) -> f64 {
    1.0 - (decay_total - sample.decay_at_record)
}

/// Read-only view of one trail with its weights resolved
#[derive(Debug, Clone, Copy)]
pub struct TrailView<'a> {
    trail: &'a Trail,
    decay_total: f64,
}

impl<'a> TrailView<'a> {
    pub fn len(&self) -> usize {
        self.trail.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.trail.samples.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = TrailSample> + 'a {
        let trail: &'a Trail = self.trail;
        let decay_total = self.decay_total;
        trail.samples.iter().map(move |s| TrailSample {
            position: s.position,
            weight: weight_of(s, decay_total),
        })
    }

    pub fn latest(&self) -> Option<TrailSample> {
        self.iter().last()
    }

    pub fn to_vec(&self) -> Vec<TrailSample> {
        self.iter().collect()
    }
}

/// One trail per body, indexed by [`BodyId`]
#[derive(Debug, Clone)]
pub struct TrailRecorder {
    trails: Vec<Trail>,
    decay_total: f64,
    path_predictor: bool,
}

impl TrailRecorder {
    pub fn new(body_count: usize, path_predictor: bool) -> Self {
        Self {
            trails: vec![Trail::default(); body_count],
            decay_total: 0.0,
            path_predictor,
        }
    }

    pub fn body_count(&self) -> usize {
        self.trails.len()
    }

    pub fn is_path_predictor(&self) -> bool {
        self.path_predictor
    }

    /// Append a fresh, fully weighted sample to one body's trail.
    pub fn record(&mut self, body: BodyId, position: Vector3) -> Result<()> {
        let trail = self
            .trails
            .get_mut(body.index())
            .ok_or(SimulationError::UnknownBody(body.index()))?;
        trail.push(position, self.decay_total);
        Ok(())
    }

    /// Append one sample per body, in body order.
    pub fn record_frame(&mut self, positions: impl IntoIterator<Item = Vector3>) {
        let decay_total = self.decay_total;
        let mut recorded = 0;
        for (trail, position) in self.trails.iter_mut().zip(positions) {
            trail.push(position, decay_total);
            recorded += 1;
        }
        debug_assert_eq!(recorded, self.trails.len(), "one position per body");
    }

    /// Fade every sample by `2 * dt / decay_duration` and drop the expired ones.
    ///
    /// Does nothing in path-predictor mode. Returns the number of samples removed.
    pub fn decay(&mut self, dt: f64, decay_duration: f64) -> usize {
        if self.path_predictor {
            return 0;
        }
        self.decay_total += 2.0 * dt / decay_duration;
        let decay_total = self.decay_total;
        self.trails
            .iter_mut()
            .map(|trail| trail.prune(decay_total))
            .sum()
    }

    pub fn trail(&self, body: BodyId) -> Option<TrailView<'_>> {
        self.trails.get(body.index()).map(|trail| TrailView {
            trail,
            decay_total: self.decay_total,
        })
    }

    pub fn total_samples(&self) -> usize {
        self.trails.iter().map(|t| t.samples.len()).sum()
    }

    /// Empty every trail and forget the accumulated decay.
    pub fn clear(&mut self) {
        for trail in &mut self.trails {
            trail.samples.clear();
        }
        self.decay_total = 0.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn point(x: f64) -> Vector3 {
        Vector3::new(x, 0.0, 0.0)
    }

    #[test]
    fn new_samples_have_full_weight() {
        let mut recorder = TrailRecorder::new(2, false);
        recorder.record(BodyId(0), point(1.0)).unwrap();
        recorder.record(BodyId(0), point(2.0)).unwrap();

        let trail = recorder.trail(BodyId(0)).unwrap();
        assert_eq!(trail.len(), 2);
        assert!(trail.iter().all(|s| s.weight == 1.0));
        assert_eq!(trail.latest().unwrap().position, point(2.0));
        assert!(recorder.trail(BodyId(1)).unwrap().is_empty());
        assert!(recorder.trail(BodyId(2)).is_none());
        assert_eq!(
            recorder.record(BodyId(2), point(3.0)),
            Err(SimulationError::UnknownBody(2))
        );
        assert_eq!(recorder.total_samples(), 2);
    }

    #[test]
    fn decay_reduces_weights_by_twice_dt_over_duration() {
        let mut recorder = TrailRecorder::new(1, false);
        recorder.record(BodyId(0), point(0.0)).unwrap();
        recorder.decay(1.0, 10.0);
        recorder.record(BodyId(0), point(1.0)).unwrap();
        recorder.decay(1.0, 10.0);

        let weights: Vec<f64> = recorder
            .trail(BodyId(0))
            .unwrap()
            .iter()
            .map(|s| s.weight)
            .collect();
        assert_eq!(weights.len(), 2);
        assert_relative_eq!(weights[0], 0.6, epsilon = 1e-12);
        assert_relative_eq!(weights[1], 0.8, epsilon = 1e-12);
    }

    #[test]
    fn expired_samples_are_trimmed_from_the_front() {
        let mut recorder = TrailRecorder::new(1, false);
        // Each tick removes a quarter of the weight.
        for i in 0..10 {
            recorder.record(BodyId(0), point(i as f64)).unwrap();
            recorder.decay(1.0, 8.0);
        }

        let trail = recorder.trail(BodyId(0)).unwrap();
        assert_eq!(trail.len(), 3);
        let positions: Vec<f64> = trail.iter().map(|s| s.position.x).collect();
        assert_eq!(positions, vec![7.0, 8.0, 9.0]);
        let weights: Vec<f64> = trail.iter().map(|s| s.weight).collect();
        assert!(weights.windows(2).all(|w| w[0] <= w[1]));
        assert!(weights.iter().all(|&w| w > 0.0 && w <= 1.0));
    }

    #[test]
    fn path_predictor_keeps_everything() {
        let mut recorder = TrailRecorder::new(1, true);
        for i in 0..1000 {
            recorder.record(BodyId(0), point(i as f64)).unwrap();
            assert_eq!(recorder.decay(1.0, 1.0), 0);
        }
        let trail = recorder.trail(BodyId(0)).unwrap();
        assert_eq!(trail.len(), 1000);
        assert!(trail.iter().all(|s| s.weight == 1.0));
    }

    #[test]
    fn clear_resets_trails_and_decay() {
        let mut recorder = TrailRecorder::new(2, false);
        recorder.record(BodyId(0), point(0.0)).unwrap();
        recorder.record(BodyId(1), point(0.0)).unwrap();
        recorder.decay(0.5, 10.0);
        recorder.clear();
        assert_eq!(recorder.total_samples(), 0);

        recorder.record(BodyId(1), point(3.0)).unwrap();
        assert_eq!(recorder.trail(BodyId(1)).unwrap().latest().unwrap().weight, 1.0);
    }

    #[test]
    fn record_frame_appends_one_sample_per_body() {
        let mut recorder = TrailRecorder::new(3, false);
        recorder.record_frame([point(1.0), point(2.0), point(3.0)]);
        recorder.decay(1.0, 4.0);
        recorder.record_frame([point(4.0), point(5.0), point(6.0)]);

        let last = recorder.trail(BodyId(2)).unwrap().to_vec();
        assert_eq!(last.len(), 2);
        assert_eq!(last[0].position, point(3.0));
        assert_relative_eq!(last[0].weight, 0.5);
        assert_eq!(last[1].position, point(6.0));
        assert_eq!(recorder.total_samples(), 6);
    }

    #[test]
    fn fading_depends_on_elapsed_time_not_frame_rate() {
        // D = 2 s, so every sample lives exactly one second. The same two
        // seconds are covered by 60 frames of 1/30 s and 120 frames of 1/60 s.
        let duration = 2.0;
        let mut coarse = TrailRecorder::new(1, false);
        let mut fine = TrailRecorder::new(1, false);
        coarse.record(BodyId(0), point(0.0)).unwrap();
        fine.record(BodyId(0), point(0.0)).unwrap();

        for tick in 1..=120u32 {
            let now = tick as f64 / 60.0;
            fine.decay(1.0 / 60.0, duration);
            fine.record(BodyId(0), point(now)).unwrap();
            if tick % 2 != 0 {
                continue;
            }
            coarse.decay(1.0 / 30.0, duration);
            coarse.record(BodyId(0), point(now)).unwrap();

            // Samples recorded on even ticks exist in both runs and must
            // carry the same weight and expire together.
            let shared: Vec<TrailSample> = fine
                .trail(BodyId(0))
                .unwrap()
                .iter()
                .filter(|s| (s.position.x * 60.0).round() as u32 % 2 == 0)
                .collect();
            let coarse_samples = coarse.trail(BodyId(0)).unwrap().to_vec();
            assert_eq!(coarse_samples.len(), shared.len(), "at t = {now}");
            for (a, b) in coarse_samples.iter().zip(&shared) {
                assert_eq!(a.position, b.position);
                assert_relative_eq!(a.weight, b.weight, epsilon = 1e-12);
            }

            // The seed sample fades out exactly at t = 1 s in both runs.
            let seed_alive = |r: &TrailRecorder| {
                r.trail(BodyId(0)).unwrap().iter().next().unwrap().position == point(0.0)
            };
            assert_eq!(seed_alive(&coarse), tick < 60, "coarse at t = {now}");
            assert_eq!(seed_alive(&fine), tick < 60, "fine at t = {now}");
        }

        assert_eq!(coarse.trail(BodyId(0)).unwrap().len(), 30);
        assert_eq!(fine.trail(BodyId(0)).unwrap().len(), 60);
    }
}
