use crate::config::PhysicsConfig;
use crate::mover::Mover;
use crate::ramp::Ramp;
use crate::types::*;

/// Anything a mover can bump into: a bounding box plus the one-way flag.
///
/// Implemented by [`Block`](crate::Block) and by [`Mover`], so movers can
/// obstruct each other.
pub trait Obstacle {
    fn x(&self) -> f64;
    fn y(&self) -> f64;
    fn w(&self) -> f64;
    fn h(&self) -> f64;

    /// Only blocks downward landing onto its top edge when true.
    fn passable(&self) -> bool;

    fn bounds(&self) -> Rectangle {
        Rectangle::new(self.x(), self.y(), self.w(), self.h())
    }
}

/// Something an elevator can carry.
pub trait Passenger {
    fn bounds(&self) -> Rectangle;

    /// Apply the elevator's displacement for this tick.
    ///
    /// `obstacles`/`ramps` are the elevator's collision lists; movers use
    /// them so a carried body still stops at walls.
    fn carry(
        &mut self,
        delta: Vector2,
        obstacles: &[&dyn Obstacle],
        ramps: &[Ramp],
        config: &PhysicsConfig,
    );
}

/// Movement capability for game objects that embed a [`Mover`].
///
/// Implement the two accessors; the per-tick operations are provided. The
/// box is read through `mover().bounds()`, so a type may also implement
/// [`Obstacle`] or [`Passenger`] without clashing `bounds` calls.
pub trait Movement {
    fn mover(&self) -> &Mover;
    fn mover_mut(&mut self) -> &mut Mover;

    /// See [`Mover::step`].
    fn step(
        &mut self,
        forces: Vector2,
        obstacles: &[&dyn Obstacle],
        ramps: &[Ramp],
        set_speed: bool,
        config: &PhysicsConfig,
    ) {
        self.mover_mut().step(forces, obstacles, ramps, set_speed, config);
    }

    /// See [`Mover::move_free`].
    fn move_free(&mut self, aim: Aim, speed: f64) {
        self.mover_mut().move_free(aim, speed);
    }

    /// See [`Mover::move_carrying`].
    #[allow(clippy::too_many_arguments)]
    fn move_carrying(
        &mut self,
        drive: Drive,
        speed: f64,
        passengers: &mut [&mut dyn Passenger],
        obstacles: &[&dyn Obstacle],
        ramps: &[Ramp],
        ignore_collision: bool,
        config: &PhysicsConfig,
    ) {
        self.mover_mut()
            .move_carrying(drive, speed, passengers, obstacles, ramps, ignore_collision, config);
    }

    /// See [`Mover::cycle`].
    #[allow(clippy::too_many_arguments)]
    fn cycle(
        &mut self,
        points: &[Vector2],
        speed: f64,
        passengers: Option<&mut [&mut dyn Passenger]>,
        obstacles: &[&dyn Obstacle],
        ramps: &[Ramp],
        stop_time: u32,
        config: &PhysicsConfig,
    ) {
        self.mover_mut()
            .cycle(points, speed, passengers, obstacles, ramps, stop_time, config);
    }
}

impl Movement for Mover {
    fn mover(&self) -> &Mover {
        self
    }

    fn mover_mut(&mut self) -> &mut Mover {
        self
    }
}
