use tracing::{debug, trace};

use crate::api::{Obstacle, Passenger};
use crate::config::PhysicsConfig;
use crate::error::{Result, check_mass, check_size};
use crate::narrowphase::{Candidate, resolve, swept_bounds};
use crate::ramp::Ramp;
use crate::types::*;

/// Progress along a `cycle` path.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub(crate) struct CycleState {
    pub point: usize,
    pub timer: u32,
    pub dwelling: bool,
}

/// A moving body: position, size, mass, velocity and the four contact sides.
///
/// Game objects embed one and expose it through [`Movement`](crate::Movement).
/// The engine only mutates its fields; creation and lifetime belong to the
/// caller.
#[derive(Clone, Debug)]
pub struct Mover {
    pub x: f64,
    pub y: f64,
    w: f64,
    h: f64,
    mass: f64,
    pub speed: Vector2,
    prev_speed: Vector2,
    /// Per-axis speed cap (unbounded by default).
    pub max_speed: Vector2,
    /// Force applied once, on the next non-kinematic step.
    pub stored_forces: Vector2,
    /// One-way behaviour when other movers collide with this one.
    pub passable: bool,
    top: Option<Contact>,
    bottom: Option<Contact>,
    left: Option<Contact>,
    right: Option<Contact>,
    pub(crate) cycle: CycleState,
}

impl Mover {
    /// Mover with mass 1.
    ///
    /// # Panics
    /// If `w` or `h` is not strictly positive and finite.
    pub fn new(x: f64, y: f64, w: f64, h: f64) -> Self {
        Self::try_new(x, y, w, h, 1.0).unwrap_or_else(|e| panic!("{e}"))
    }

    pub fn try_new(x: f64, y: f64, w: f64, h: f64, mass: f64) -> Result<Self> {
        check_size(w, h)?;
        check_mass(mass)?;
        Ok(Self {
            x,
            y,
            w,
            h,
            mass,
            speed: Vector2::ZERO,
            prev_speed: Vector2::ZERO,
            max_speed: Vector2::splat(f64::INFINITY),
            stored_forces: Vector2::ZERO,
            passable: false,
            top: None,
            bottom: None,
            left: None,
            right: None,
            cycle: CycleState::default(),
        })
    }

    pub fn with_max_speed(mut self, max_speed: Vector2) -> Self {
        self.max_speed = max_speed;
        self
    }

    pub fn with_passable(mut self, passable: bool) -> Self {
        self.passable = passable;
        self
    }

    pub fn w(&self) -> f64 {
        self.w
    }

    pub fn h(&self) -> f64 {
        self.h
    }

    pub fn mass(&self) -> f64 {
        self.mass
    }

    pub fn bounds(&self) -> Rectangle {
        Rectangle::new(self.x, self.y, self.w, self.h)
    }

    /// Speed after forces and clamping, before collisions, of the last step.
    pub fn prev_speed(&self) -> Vector2 {
        self.prev_speed
    }

    pub fn top(&self) -> Option<Contact> {
        self.top
    }

    pub fn bottom(&self) -> Option<Contact> {
        self.bottom
    }

    pub fn left(&self) -> Option<Contact> {
        self.left
    }

    pub fn right(&self) -> Option<Contact> {
        self.right
    }

    /// Index of the point `cycle` is currently heading to.
    pub fn cycle_point(&self) -> usize {
        self.cycle.point
    }

    /// Advance one tick with collision checking.
    ///
    /// With `set_speed` the given vector becomes the speed (gravity and stored
    /// forces are ignored); otherwise it is a force added to gravity and the
    /// stored forces. Contacts are recomputed from scratch at the end and
    /// refer to positions in `obstacles` / `ramps`, so pass them in a stable
    /// order: exact ties in the limit search go to the earlier obstacle.
    pub fn step(
        &mut self,
        forces: Vector2,
        obstacles: &[&dyn Obstacle],
        ramps: &[Ramp],
        set_speed: bool,
        config: &PhysicsConfig,
    ) {
        if set_speed {
            self.speed = forces;
        } else {
            let forces = self.gather_forces(forces, ramps, config);
            self.speed += forces / self.mass;
        }
        self.limit_speed(config);
        self.prev_speed = self.speed;

        let b = self.bounds();
        let swept = swept_bounds(&b, self.speed);
        let cands: Vec<Candidate> = obstacles
            .iter()
            .enumerate()
            .filter_map(|(index, o)| {
                let bounds = o.bounds();
                swept
                    .intersects(&bounds)
                    .then(|| Candidate { index, bounds, passable: o.passable() })
            })
            .collect();
        let eligible: Vec<bool> = ramps.iter().map(|r| r.check_can_collide(&swept)).collect();

        let stop = resolve(&b, self.speed, &cands);
        if let Some(x) = stop.x {
            self.x = x;
            self.speed.x = 0.0;
        }
        if let Some(y) = stop.y {
            self.y = y;
            self.speed.y = 0.0;
        }
        if stop != Default::default() {
            trace!(candidates = cands.len(), ?stop, "obstacle stop");
        }

        self.x += self.speed.x;
        self.y += self.speed.y;

        for (i, (ramp, can_collide)) in ramps.iter().zip(eligible).enumerate() {
            ramp.check_intersection(i, self, can_collide);
        }
        self.update_contacts(obstacles, ramps, config);
    }

    fn gather_forces(
        &mut self,
        forces: Vector2,
        ramps: &[Ramp],
        config: &PhysicsConfig,
    ) -> Vector2 {
        let mut f = forces + config.gravity + self.stored_forces;
        self.stored_forces = Vector2::ZERO;

        if (f.x < 0.0 && self.left.is_some()) || (f.x > 0.0 && self.right.is_some()) {
            f.x = 0.0;
        }
        if (f.y < 0.0 && self.top.is_some()) || (f.y > 0.0 && self.bottom.is_some()) {
            f.y = 0.0;
        }

        if let Some(ramp) = self.bottom.and_then(|c| c.ramp(ramps)) {
            if ramp.ratio() > config.ramp_slip_threshold {
                let push = (ramp.ratio() - config.ramp_slip_threshold) * config.ramp_slip_force;
                f.x += if ramp.left() { -push } else { push };
            } else if ramp.is_uphill(f.x) {
                f.x *= ramp.factor();
            }
        }
        f
    }

    fn limit_speed(&mut self, config: &PhysicsConfig) {
        if self.speed.x.abs() < config.min_speed.x {
            self.speed.x = 0.0;
        }
        if self.speed.y.abs() < config.min_speed.y {
            self.speed.y = 0.0;
        }
        if self.speed.x.abs() > self.max_speed.x {
            self.speed.x = self.speed.x.signum() * self.max_speed.x;
        }
        if self.speed.y.abs() > self.max_speed.y {
            self.speed.y = self.speed.y.signum() * self.max_speed.y;
        }
    }

    fn update_contacts(
        &mut self,
        obstacles: &[&dyn Obstacle],
        ramps: &[Ramp],
        config: &PhysicsConfig,
    ) {
        let last_bottom = self.bottom;
        self.top = None;
        self.bottom = None;
        self.left = None;
        self.right = None;

        let b = self.bounds();
        for (i, o) in obstacles.iter().enumerate() {
            let ob = o.bounds();
            let solid = !o.passable();
            if self.right.is_none() && solid && near(b.right(), ob.x) && b.overlaps_y(&ob) {
                self.right = Some(Contact::Obstacle(i));
            }
            if self.left.is_none() && solid && near(b.x, ob.right()) && b.overlaps_y(&ob) {
                self.left = Some(Contact::Obstacle(i));
            }
            if self.bottom.is_none() && near(b.bottom(), ob.y) && b.overlaps_x(&ob) {
                self.bottom = Some(Contact::Obstacle(i));
            }
            if self.top.is_none() && solid && near(b.y, ob.bottom()) && b.overlaps_x(&ob) {
                self.top = Some(Contact::Obstacle(i));
            }
        }
        if self.bottom.is_some() {
            return;
        }

        self.bottom = ramps.iter().position(|r| r.contact(&b)).map(Contact::Ramp);
        if self.bottom.is_some() {
            return;
        }

        // Stay glued to the ramp we stood on when a single small step lifted
        // us off it (slope seams, walking downhill).
        if let Some(Contact::Ramp(i)) = last_bottom {
            let Some(ramp) = ramps.get(i) else { return };
            if !ramp.inverted()
                && b.overlaps_x(&ramp.bounds())
                && self.prev_speed.x.abs() <= config.ramp_contact_threshold
                && self.prev_speed.y >= 0.0
            {
                self.y = ramp.get_y(&b);
                self.bottom = last_bottom;
                debug!(ramp = i, y = self.y, "kept ramp contact");
            }
        }
    }

    #[cfg(test)]
    pub(crate) fn set_prev_speed(&mut self, v: Vector2) {
        self.prev_speed = v;
    }

    #[cfg(test)]
    pub(crate) fn set_contacts_for_test(
        &mut self,
        top: Option<Contact>,
        bottom: Option<Contact>,
        left: Option<Contact>,
        right: Option<Contact>,
    ) {
        self.top = top;
        self.bottom = bottom;
        self.left = left;
        self.right = right;
    }
}

/// Carried movers still collide, but their own motion state survives the
/// ride: only the position changes.
impl Passenger for Mover {
    fn bounds(&self) -> Rectangle {
        Mover::bounds(self)
    }

    fn carry(
        &mut self,
        delta: Vector2,
        obstacles: &[&dyn Obstacle],
        ramps: &[Ramp],
        config: &PhysicsConfig,
    ) {
        let speed = self.speed;
        let prev_speed = self.prev_speed;
        let stored_forces = self.stored_forces;
        let max_speed = self.max_speed;
        let contacts = (self.top, self.bottom, self.left, self.right);

        self.max_speed = Vector2::splat(f64::INFINITY);
        let ride = PhysicsConfig { min_speed: Vector2::ZERO, ..config.without_gravity() };
        self.step(delta, obstacles, ramps, true, &ride);

        self.speed = speed;
        self.prev_speed = prev_speed;
        self.stored_forces = stored_forces;
        self.max_speed = max_speed;
        (self.top, self.bottom, self.left, self.right) = contacts;
    }
}

impl Obstacle for Mover {
    fn x(&self) -> f64 {
        self.x
    }
    fn y(&self) -> f64 {
        self.y
    }
    fn w(&self) -> f64 {
        self.w
    }
    fn h(&self) -> f64 {
        self.h
    }
    fn passable(&self) -> bool {
        self.passable
    }
}
