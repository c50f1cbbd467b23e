//! Toy robot-motion generator.
//!
//! External collaborator from the renderer's point of view: every tick it
//! perturbs the pose by a bounded random amount and the core treats the
//! result as an opaque, unvalidated pose. There is deliberately no clamping
//! to the world bounds — drifting off-map is the given behaviour.

use std::time::Duration;

use fleetmap_scene::RobotPose;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

/// Interval between motion ticks.
pub const TICK_INTERVAL: Duration = Duration::from_secs(2);

/// Pose the robot starts from on launch.
pub const START_POSE: RobotPose = RobotPose {
    x: 49_043.0,
    y: 74_172.0,
    angle: 0.0,
};

/// Maximum positional change per tick, in world units (centered on zero).
const POSITION_JITTER: f64 = 1000.0;

/// Maximum heading change per tick, in radians (centered on zero).
const HEADING_JITTER: f64 = 0.1;

/// Seedable random walk over robot poses.
#[derive(Debug)]
pub struct RobotWalk {
    rng: SmallRng,
    pose: RobotPose,
}

impl RobotWalk {
    pub fn new(start: RobotPose, seed: u64) -> Self {
        Self {
            rng: SmallRng::seed_from_u64(seed),
            pose: start,
        }
    }

    pub fn pose(&self) -> RobotPose {
        self.pose
    }

    /// Advance one tick and return the new pose.
    pub fn step(&mut self) -> RobotPose {
        self.pose.x += (self.rng.gen::<f64>() - 0.5) * POSITION_JITTER;
        self.pose.y += (self.rng.gen::<f64>() - 0.5) * POSITION_JITTER;
        self.pose.angle += (self.rng.gen::<f64>() - 0.5) * HEADING_JITTER;
        self.pose
    }
}
