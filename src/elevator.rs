//! Scripted motion: free travel, elevators carrying passengers, and cyclic
//! paths. None of these apply gravity unless driven by forces.

use tracing::debug;

use crate::api::{Obstacle, Passenger};
use crate::config::PhysicsConfig;
use crate::mover::Mover;
use crate::ramp::Ramp;
use crate::types::*;

/// Move `pos` by `*v` unless that reaches or passes `target`, in which case
/// land on it and stop the axis.
fn snap_axis(pos: f64, v: &mut f64, target: f64) -> f64 {
    let next = pos + *v;
    if (*v < 0.0 && next <= target) || (*v >= 0.0 && next >= target) {
        *v = 0.0;
        target
    } else {
        next
    }
}

impl Mover {
    fn position(&self) -> Vector2 {
        Vector2::new(self.x, self.y)
    }

    /// Constant-speed travel toward `target`; a no-op with zero speed when
    /// already there.
    fn approach(&mut self, target: Vector2, speed: f64) {
        let d = target - self.position();
        let dist = d.length();
        if dist == 0.0 {
            self.speed = Vector2::ZERO;
            return;
        }
        self.speed = d / dist * speed;
        self.x = snap_axis(self.x, &mut self.speed.x, target.x);
        self.y = snap_axis(self.y, &mut self.speed.y, target.y);
    }

    /// Move without any collision checking.
    ///
    /// `Aim::Point` stops exactly on the point, zeroing each axis's speed as it
    /// arrives. `Aim::Angle` keeps going along the heading.
    pub fn move_free(&mut self, aim: Aim, speed: f64) {
        match aim {
            Aim::Point(target) => self.approach(target, speed),
            Aim::Angle(degrees) => {
                let (sin, cos) = degrees.to_radians().sin_cos();
                self.speed = Vector2::new(cos, sin) * speed;
                self.x += self.speed.x;
                self.y += self.speed.y;
            }
        }
    }

    /// Move like an elevator, taking along every passenger standing on top.
    ///
    /// A passenger rides when it overlaps horizontally and its bottom touches
    /// this mover's top, or when the mover rises past its bottom during this
    /// tick. Riders end the tick standing on the new top.
    #[allow(clippy::too_many_arguments)]
    pub fn move_carrying(
        &mut self,
        drive: Drive,
        speed: f64,
        passengers: &mut [&mut dyn Passenger],
        obstacles: &[&dyn Obstacle],
        ramps: &[Ramp],
        ignore_collision: bool,
        config: &PhysicsConfig,
    ) {
        let start = self.position();
        let y_aim = match drive {
            Drive::Point(target) => {
                let d = target - start;
                let dist = d.length();
                if dist == 0.0 {
                    self.speed = Vector2::ZERO;
                    return;
                }
                self.y + d.y / dist * speed
            }
            Drive::Forces(forces) => {
                let accel = (config.gravity + forces + self.stored_forces) / self.mass();
                self.y + self.speed.y + accel.y
            }
        };

        let top = self.y;
        let b = self.bounds();
        let riders: Vec<usize> = passengers
            .iter()
            .enumerate()
            .filter(|(_, p)| {
                let pb = p.bounds();
                let foot = pb.bottom();
                let crossed = y_aim < top && foot < top && foot > y_aim;
                b.overlaps_x(&pb) && (near(foot, top) || crossed)
            })
            .map(|(i, _)| i)
            .collect();

        match drive {
            Drive::Point(target) => self.approach(target, speed),
            Drive::Forces(forces) if ignore_collision => self.step(forces, &[], &[], false, config),
            Drive::Forces(forces) => self.step(forces, obstacles, ramps, false, config),
        }

        let dx = self.x - start.x;
        for &i in &riders {
            let foot = passengers[i].bounds().bottom();
            passengers[i].carry(Vector2::new(dx, self.y - foot), obstacles, ramps, config);
        }
        if !riders.is_empty() {
            debug!(riders = riders.len(), dx, dy = self.y - start.y, "carried passengers");
        }
    }

    /// Patrol `points` in order, wrapping around, pausing `stop_time` ticks on
    /// each one. Call once per tick.
    ///
    /// With `passengers` the mover behaves as an elevator (collisions are not
    /// checked for the mover itself either way).
    #[allow(clippy::too_many_arguments)]
    pub fn cycle(
        &mut self,
        points: &[Vector2],
        speed: f64,
        passengers: Option<&mut [&mut dyn Passenger]>,
        obstacles: &[&dyn Obstacle],
        ramps: &[Ramp],
        stop_time: u32,
        config: &PhysicsConfig,
    ) {
        if points.is_empty() {
            return;
        }
        if self.cycle.point >= points.len() {
            self.cycle.point = 0;
        }

        if self.cycle.dwelling {
            if self.cycle.timer < stop_time {
                self.cycle.timer += 1;
                return;
            }
            self.cycle.dwelling = false;
            self.cycle.point = (self.cycle.point + 1) % points.len();
        }

        let target = points[self.cycle.point];
        match passengers {
            Some(passengers) => self.move_carrying(
                Drive::Point(target),
                speed,
                passengers,
                obstacles,
                ramps,
                true,
                config,
            ),
            None => self.move_free(Aim::Point(target), speed),
        }

        if self.speed == Vector2::ZERO {
            if stop_time == 0 {
                self.cycle.point = (self.cycle.point + 1) % points.len();
            } else {
                self.cycle.dwelling = true;
                self.cycle.timer = 0;
            }
        }
    }
}
