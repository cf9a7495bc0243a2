use glam::DVec2;

/// Position/velocity/force vector (pixels, pixels per tick).
pub type Vector2 = DVec2;

/// Tolerance used for exact-edge contact tests.
pub const CONTACT_EPS: f64 = 1e-6;

#[inline]
pub(crate) fn near(a: f64, b: f64) -> bool {
    (a - b).abs() <= CONTACT_EPS
}

fn round_to(v: f64, digits: i32) -> f64 {
    let m = 10f64.powi(digits);
    (v * m).round() / m
}

/// Extra vector operations used by game code on top of glam.
pub trait VectorExt: Sized {
    /// Component-wise equality after rounding to `precision` decimal places.
    fn eq_to(self, other: Self, precision: i32) -> bool;
    /// Copy rotated by `radians` (positive is clockwise on a y-down screen).
    fn rotated(self, radians: f64) -> Self;
    /// Rotate in place.
    fn rotate_mut(&mut self, radians: f64);
}

impl VectorExt for Vector2 {
    fn eq_to(self, other: Self, precision: i32) -> bool {
        round_to(self.x, precision) == round_to(other.x, precision)
            && round_to(self.y, precision) == round_to(other.y, precision)
    }

    fn rotated(self, radians: f64) -> Self {
        DVec2::from_angle(radians).rotate(self)
    }

    fn rotate_mut(&mut self, radians: f64) {
        *self = self.rotated(radians);
    }
}

/// Axis-aligned box by top-left corner and size (y grows downward).
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Rectangle {
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
}

impl Rectangle {
    pub fn new(x: f64, y: f64, w: f64, h: f64) -> Self {
        Self { x, y, w, h }
    }

    /// Open-interval overlap: boxes that only share an edge do not intersect.
    pub fn intersects(&self, other: &Rectangle) -> bool {
        self.x < other.x + other.w
            && self.x + self.w > other.x
            && self.y < other.y + other.h
            && self.y + self.h > other.y
    }

    #[inline]
    pub fn right(&self) -> f64 {
        self.x + self.w
    }

    #[inline]
    pub fn bottom(&self) -> f64 {
        self.y + self.h
    }

    /// Open-interval overlap on the x axis only.
    #[inline]
    pub fn overlaps_x(&self, other: &Rectangle) -> bool {
        self.x < other.right() && self.right() > other.x
    }

    /// Open-interval overlap on the y axis only.
    #[inline]
    pub fn overlaps_y(&self, other: &Rectangle) -> bool {
        self.y < other.bottom() && self.bottom() > other.y
    }
}

/// What touched a mover on one side during its last step.
///
/// Indices refer to the obstacle slice / ramp slice passed to that step, so
/// callers must keep those lists in a stable order between ticks.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Contact {
    /// Index into the obstacle slice (a block or another mover).
    Obstacle(usize),
    /// Index into the ramp slice.
    Ramp(usize),
}

impl Contact {
    /// Resolve against the obstacle slice, if this is an obstacle contact.
    pub fn obstacle<'a, T: ?Sized>(self, obstacles: &'a [&'a T]) -> Option<&'a T> {
        match self {
            Contact::Obstacle(i) => obstacles.get(i).copied(),
            Contact::Ramp(_) => None,
        }
    }

    /// Resolve against the ramp slice, if this is a ramp contact.
    pub fn ramp<T>(self, ramps: &[T]) -> Option<&T> {
        match self {
            Contact::Ramp(i) => ramps.get(i),
            Contact::Obstacle(_) => None,
        }
    }

    pub fn is_ramp(self) -> bool {
        matches!(self, Contact::Ramp(_))
    }
}

/// Where a free (collision-less) move heads.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Aim {
    /// Move toward this point and stop exactly on it.
    Point(Vector2),
    /// Move along this heading forever (degrees, 0 = +x, clockwise).
    Angle(f64),
}

impl From<Vector2> for Aim {
    fn from(p: Vector2) -> Self {
        Aim::Point(p)
    }
}

/// How an elevator drives itself in `move_carrying`.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Drive {
    /// Constant-speed travel toward a point, no collision checks.
    Point(Vector2),
    /// Regular forced step (gravity, stored forces, obstacles, ramps).
    Forces(Vector2),
}
