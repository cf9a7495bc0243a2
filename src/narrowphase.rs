//! Limit search for one step of axis-aligned motion.
//!
//! Given a mover's box, its speed for the step and the obstacles its swept box
//! touches, decide where (if anywhere) it stops on each axis. Everything here
//! is pure; the mover applies the returned [`Stop`].
//!
//! Candidate order matters for exact ties: the first candidate that reaches a
//! given limit keeps it.

use crate::types::*;

/// An obstacle overlapping this step's swept box.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Candidate {
    /// Index in the caller's obstacle slice.
    pub index: usize,
    pub bounds: Rectangle,
    pub passable: bool,
}

/// Most restrictive stopping coordinate found so far on one axis.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct AxisLimit {
    pub value: f64,
    pub source: Option<Candidate>,
}

impl AxisLimit {
    /// Unconstrained: the limit is where the mover aims to go.
    pub fn open(aim: f64) -> Self {
        Self { value: aim, source: None }
    }

    pub fn is_set(&self) -> bool {
        self.source.is_some()
    }

    /// Take `value` if it is strictly closer along the direction of travel
    /// (`positive` = toward +x/+y). Returns whether it was taken.
    pub fn tighten(&mut self, value: f64, source: Candidate, positive: bool) -> bool {
        let closer = if positive { value < self.value } else { value > self.value };
        if closer {
            self.value = value;
            self.source = Some(source);
        }
        closer
    }
}

/// New top-left coordinates for the axes that were stopped. A stopped axis
/// also loses its speed.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Stop {
    pub x: Option<f64>,
    pub y: Option<f64>,
}

/// Box covering `b` before and after moving by `speed`.
pub fn swept_bounds(b: &Rectangle, speed: Vector2) -> Rectangle {
    Rectangle::new(
        if speed.x < 0.0 { b.x + speed.x } else { b.x },
        if speed.y < 0.0 { b.y + speed.y } else { b.y },
        b.w + speed.x.abs(),
        b.h + speed.y.abs(),
    )
}

pub fn right_limit(b: &Rectangle, speed: Vector2, cands: &[Candidate]) -> AxisLimit {
    let mut lim = AxisLimit::open(b.right() + speed.x);
    for c in cands.iter().filter(|c| !c.passable) {
        lim.tighten(c.bounds.x, *c, true);
    }
    lim
}

pub fn left_limit(b: &Rectangle, speed: Vector2, cands: &[Candidate]) -> AxisLimit {
    let mut lim = AxisLimit::open(b.x + speed.x);
    for c in cands.iter().filter(|c| !c.passable) {
        lim.tighten(c.bounds.right(), *c, false);
    }
    lim
}

/// Unlike the other three directions this accepts passable obstacles, but only
/// those whose top is at or below the mover's bottom: one-way floors.
pub fn down_limit(b: &Rectangle, speed: Vector2, cands: &[Candidate]) -> AxisLimit {
    let mut lim = AxisLimit::open(b.bottom() + speed.y);
    for c in cands.iter().filter(|c| c.bounds.y >= b.bottom()) {
        lim.tighten(c.bounds.y, *c, true);
    }
    lim
}

pub fn up_limit(b: &Rectangle, speed: Vector2, cands: &[Candidate]) -> AxisLimit {
    let mut lim = AxisLimit::open(b.y + speed.y);
    for c in cands.iter().filter(|c| !c.passable) {
        lim.tighten(c.bounds.bottom(), *c, false);
    }
    lim
}

/// Decide the stops for one step.
pub fn resolve(b: &Rectangle, speed: Vector2, cands: &[Candidate]) -> Stop {
    if cands.is_empty() {
        return Stop::default();
    }
    if speed.x == 0.0 || speed.y == 0.0 {
        resolve_orthogonal(b, speed, cands)
    } else {
        resolve_diagonal(b, speed, cands)
    }
}

fn resolve_orthogonal(b: &Rectangle, speed: Vector2, cands: &[Candidate]) -> Stop {
    let mut stop = Stop::default();
    if speed.x > 0.0 {
        let lim = right_limit(b, speed, cands);
        if b.right() + speed.x > lim.value {
            stop.x = Some(lim.value - b.w);
        }
    } else if speed.x < 0.0 {
        let lim = left_limit(b, speed, cands);
        if b.x + speed.x < lim.value {
            stop.x = Some(lim.value);
        }
    } else if speed.y > 0.0 {
        let lim = down_limit(b, speed, cands);
        if b.bottom() + speed.y > lim.value {
            stop.y = Some(lim.value - b.h);
        }
    } else if speed.y < 0.0 {
        let lim = up_limit(b, speed, cands);
        if b.y + speed.y < lim.value {
            stop.y = Some(lim.value);
        }
    }
    stop
}

/// Per-axis limits for diagonal motion, before the second-order check.
pub fn diagonal_limits(
    b: &Rectangle,
    speed: Vector2,
    cands: &[Candidate],
) -> (AxisLimit, AxisLimit) {
    let rt = speed.x > 0.0;
    let dn = speed.y > 0.0;
    let lf = !rt;
    let up = !dn;
    let mut xl = AxisLimit::open(b.x + speed.x + if rt { b.w } else { 0.0 });
    let mut yl = AxisLimit::open(b.y + speed.y + if dn { b.h } else { 0.0 });

    for c in cands {
        let o = &c.bounds;
        if c.passable {
            if dn && b.bottom() <= o.y {
                yl.tighten(o.y, *c, true);
            }
            continue;
        }
        let x_lim = if rt { o.x } else { o.right() };
        let y_lim = if dn { o.y } else { o.bottom() };

        if (rt && b.right() > x_lim) || (lf && b.x < x_lim) {
            // already within its x span, only y can stop us
            yl.tighten(y_lim, *c, dn);
        } else if (dn && b.bottom() > y_lim) || (up && b.y < y_lim) {
            xl.tighten(x_lim, *c, rt);
        } else if time_to_x(b, speed, x_lim) > time_to_y(b, speed, y_lim) {
            // the face reached last is the one actually hit
            xl.tighten(x_lim, *c, rt);
        } else {
            yl.tighten(y_lim, *c, dn);
        }
    }
    (xl, yl)
}

fn time_to_x(b: &Rectangle, speed: Vector2, x_lim: f64) -> f64 {
    (x_lim - b.x - if speed.x < 0.0 { 0.0 } else { b.w }) / speed.x
}

fn time_to_y(b: &Rectangle, speed: Vector2, y_lim: f64) -> f64 {
    (y_lim - b.y - if speed.y < 0.0 { 0.0 } else { b.h }) / speed.y
}

fn resolve_diagonal(b: &Rectangle, speed: Vector2, cands: &[Candidate]) -> Stop {
    let (xl, yl) = diagonal_limits(b, speed, cands);
    let stop_x = |v: f64| if speed.x > 0.0 { v - b.w } else { v };
    let stop_y = |v: f64| if speed.y > 0.0 { v - b.h } else { v };

    match (xl.source, yl.source) {
        (Some(xs), Some(ys)) => {
            if time_to_x(b, speed, xl.value) < time_to_y(b, speed, yl.value) {
                let nx = stop_x(xl.value);
                let rest = Rectangle::new(
                    nx,
                    if speed.y < 0.0 { b.y + speed.y } else { b.y },
                    b.w,
                    b.h + speed.y.abs(),
                );
                Stop {
                    x: Some(nx),
                    y: rest.intersects(&ys.bounds).then(|| stop_y(yl.value)),
                }
            } else {
                let ny = stop_y(yl.value);
                let rest = Rectangle::new(
                    if speed.x < 0.0 { b.x + speed.x } else { b.x },
                    ny,
                    b.w + speed.x.abs(),
                    b.h,
                );
                Stop {
                    x: rest.intersects(&xs.bounds).then(|| stop_x(xl.value)),
                    y: Some(ny),
                }
            }
        }
        (Some(_), None) => Stop { x: Some(stop_x(xl.value)), y: None },
        (None, Some(_)) => Stop { x: None, y: Some(stop_y(yl.value)) },
        (None, None) => Stop::default(),
    }
}
