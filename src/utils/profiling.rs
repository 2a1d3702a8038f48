use std::{
    fmt,
    time::{Duration, Instant},
};

use log::{debug, log_enabled, trace, Level};

/// Timed phases of a broad-phase build.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Boxes,
    Overlaps,
    Classify,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Stage::Boxes => "boxes",
            Stage::Overlaps => "overlaps",
            Stage::Classify => "classify",
        })
    }
}

/// Timings and counts gathered by one broad-phase build.
#[derive(Debug, Default, Clone, Copy)]
pub struct DetectionProfile {
    pub box_time: Duration,
    pub overlap_time: Duration,
    pub classify_time: Duration,

    pub box_count: usize,
    pub overlap_count: usize,
    pub vertex_vertex_count: usize,
    pub edge_vertex_count: usize,
    pub edge_edge_count: usize,
    pub face_vertex_count: usize,
    pub edge_face_count: usize,
}

impl DetectionProfile {
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Runs `f` and adds its wall time to `stage`.
    pub fn time<T>(&mut self, stage: Stage, f: impl FnOnce() -> T) -> T {
        let start = Instant::now();
        let output = f();
        let elapsed = start.elapsed();
        *self.stage_time_mut(stage) += elapsed;
        trace!("broadphase {stage}: {} µs", elapsed.as_micros());
        output
    }

    pub fn stage_time(&self, stage: Stage) -> Duration {
        match stage {
            Stage::Boxes => self.box_time,
            Stage::Overlaps => self.overlap_time,
            Stage::Classify => self.classify_time,
        }
    }

    fn stage_time_mut(&mut self, stage: Stage) -> &mut Duration {
        match stage {
            Stage::Boxes => &mut self.box_time,
            Stage::Overlaps => &mut self.overlap_time,
            Stage::Classify => &mut self.classify_time,
        }
    }

    pub fn total_time(&self) -> Duration {
        self.box_time + self.overlap_time + self.classify_time
    }

    pub fn report(&self, engine: &str) {
        if !log_enabled!(Level::Debug) {
            return;
        }
        let total_us = self.total_time().as_micros().max(1) as f32;
        let share = |d: Duration| (d.as_micros() as f32 / total_us) * 100.0;

        debug!(
            "{engine}: {} boxes, {} overlaps -> vv {}, ev {}, ee {}, fv {}, ef {}",
            self.box_count,
            self.overlap_count,
            self.vertex_vertex_count,
            self.edge_vertex_count,
            self.edge_edge_count,
            self.face_vertex_count,
            self.edge_face_count
        );
        debug!(
            "{engine}: {:.3} ms total (boxes {:.1}%, overlaps {:.1}%, classify {:.1}%)",
            self.total_time().as_secs_f32() * 1000.0,
            share(self.box_time),
            share(self.overlap_time),
            share(self.classify_time)
        );
    }
}
