//! Sloped obstacles.
//!
//! A ramp is a right triangle inscribed in its bounding rectangle. With
//! `left = true` the sloped face points left: the surface rises from the
//! bottom-left corner to the top-right one, and a mover climbs it while moving
//! right. `inverted` flips the triangle vertically, giving a ceiling whose
//! face points down.
//!
//! Queries are expressed through the corner of the querying box that rests on
//! the slope: the right corner for left ramps, the left corner otherwise; the
//! bottom corner for floors, the top corner for ceilings.

use tracing::trace;

use crate::error::{Result, check_size};
use crate::mover::Mover;
use crate::types::*;

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Ramp {
    x: f64,
    y: f64,
    w: f64,
    h: f64,
    left: bool,
    inverted: bool,
    ratio: f64,
    factor: f64,
}

impl Ramp {
    /// # Panics
    /// If `w` or `h` is not strictly positive and finite.
    pub fn new(x: f64, y: f64, w: f64, h: f64, left: bool, inverted: bool) -> Self {
        Self::try_new(x, y, w, h, left, inverted).unwrap_or_else(|e| panic!("{e}"))
    }

    pub fn try_new(x: f64, y: f64, w: f64, h: f64, left: bool, inverted: bool) -> Result<Self> {
        check_size(w, h)?;
        Ok(Self {
            x,
            y,
            w,
            h,
            left,
            inverted,
            ratio: h / w,
            factor: w / (w * w + h * h).sqrt(),
        })
    }

    pub fn x(&self) -> f64 {
        self.x
    }
    pub fn y(&self) -> f64 {
        self.y
    }
    pub fn w(&self) -> f64 {
        self.w
    }
    pub fn h(&self) -> f64 {
        self.h
    }
    pub fn left(&self) -> bool {
        self.left
    }
    pub fn inverted(&self) -> bool {
        self.inverted
    }

    /// Steepness, `h / w`.
    pub fn ratio(&self) -> f64 {
        self.ratio
    }

    /// Cosine of the incline, `w / sqrt(w² + h²)`.
    pub fn factor(&self) -> f64 {
        self.factor
    }

    pub fn bounds(&self) -> Rectangle {
        Rectangle::new(self.x, self.y, self.w, self.h)
    }

    /// Whether a horizontal force of this sign pushes up the slope.
    pub fn is_uphill(&self, dx: f64) -> bool {
        (self.left && dx > 0.0) || (!self.left && dx < 0.0)
    }

    #[inline]
    fn contact_x(&self, obj: &Rectangle) -> f64 {
        if self.left { obj.right() } else { obj.x }
    }

    /// Distance of the surface from the ramp's flat edge at column `px`,
    /// clamped to the triangle (0 at the tall side, `h` at the thin end).
    fn depth_at(&self, px: f64) -> f64 {
        let run = if self.left { self.x + self.w - px } else { px - self.x };
        run.clamp(0.0, self.w) * self.ratio
    }

    /// Surface height at column `px`.
    pub fn surface_y(&self, px: f64) -> f64 {
        let d = self.depth_at(px);
        if self.inverted { self.y + self.h - d } else { self.y + d }
    }

    /// The `y` the box must have for its contact corner to sit on the surface.
    pub fn get_y(&self, obj: &Rectangle) -> f64 {
        let s = self.surface_y(self.contact_x(obj));
        if self.inverted { s } else { s - obj.h }
    }

    /// The `x` the box must have for its contact corner to sit on the surface
    /// at its current height. Past the tall side the top is flat, so any `x`
    /// there is on the surface and the box's own `x` is returned.
    pub fn get_x(&self, obj: &Rectangle) -> f64 {
        let past_tall_side =
            if self.left { obj.right() > self.x + self.w } else { obj.x < self.x };
        if past_tall_side {
            return obj.x;
        }
        let depth = if self.inverted {
            self.y + self.h - obj.y
        } else {
            obj.bottom() - self.y
        };
        let run = depth.clamp(0.0, self.h) / self.ratio;
        if self.left {
            self.x + self.w - run - obj.w
        } else {
            self.x + run
        }
    }

    /// Resting exactly on the slope. Ceilings never report contact.
    pub fn contact(&self, obj: &Rectangle) -> bool {
        !self.inverted
            && obj.overlaps_x(&self.bounds())
            && near(obj.x, self.get_x(obj))
            && near(obj.y, self.get_y(obj))
    }

    /// Inside the solid part of the triangle.
    pub fn intersects(&self, obj: &Rectangle) -> bool {
        if !obj.overlaps_x(&self.bounds()) {
            return false;
        }
        if self.inverted {
            obj.y < self.get_y(obj) - CONTACT_EPS && obj.bottom() > self.y
        } else {
            obj.y > self.get_y(obj) + CONTACT_EPS && obj.y < self.y + self.h
        }
    }

    /// Whether this ramp may stop the motion covered by `swept` this step.
    ///
    /// The swept box must straddle the surface at its contact corner: a box
    /// leaving the surface, or one entirely beneath it (beside the tall side),
    /// is never caught.
    pub fn check_can_collide(&self, swept: &Rectangle) -> bool {
        if !swept.overlaps_x(&self.bounds()) {
            return false;
        }
        let s = self.surface_y(self.contact_x(swept));
        if self.inverted {
            swept.y < s - CONTACT_EPS && swept.bottom() > s
        } else {
            swept.bottom() > s + CONTACT_EPS && swept.y < s
        }
    }

    /// Push a mover that ended its step inside the ramp back onto the surface.
    ///
    /// `index` is this ramp's position in the step's ramp slice and
    /// `can_collide` the result of [`check_can_collide`](Self::check_can_collide)
    /// for this step.
    pub fn check_intersection(&self, index: usize, obj: &mut Mover, can_collide: bool) {
        if !can_collide {
            return;
        }
        let b = obj.bounds();
        if !self.intersects(&b) {
            return;
        }
        let prev = obj.prev_speed();
        let counter = self.is_uphill(prev.x);
        let was_resting = obj.bottom() == Some(Contact::Ramp(index));

        if self.inverted && prev.y >= 0.0 {
            // walked into a lowering ceiling: it acts as a wall
            obj.x = self.get_x(&b);
            obj.speed.x = 0.0;
            trace!(ramp = index, x = obj.x, "ceiling ramp stopped horizontal motion");
            return;
        }

        let into_surface = if self.inverted { prev.y < 0.0 } else { prev.y > 0.0 };
        if counter && into_surface && !was_resting {
            let loss = prev.y.abs() * self.ratio;
            let vx = obj.speed.x;
            obj.speed.x = vx.signum() * (vx.abs() - loss).max(0.0);
        }
        obj.y = self.get_y(&b);
        obj.speed.y = 0.0;
        trace!(ramp = index, y = obj.y, vx = obj.speed.x, "snapped onto ramp surface");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn boxed(x: f64, y: f64) -> Rectangle {
        Rectangle::new(x, y, 40.0, 40.0)
    }

    #[test]
    fn test_ratio_and_factor() {
        let r = Ramp::new(600.0, 500.0, 200.0, 100.0, true, false);
        assert_eq!(r.ratio(), 0.5);
        assert!((r.factor() - 200.0 / 50_000f64.sqrt()).abs() < 1e-12);
        assert!(Ramp::try_new(0.0, 0.0, 0.0, 10.0, true, false).is_err());
    }

    #[test]
    fn test_left_ramp_heights() {
        // rises from (600,600) to (800,500)
        let r = Ramp::new(600.0, 500.0, 200.0, 100.0, true, false);
        assert_eq!(r.get_y(&boxed(660.0, 0.0)), 500.0 + 50.0 - 40.0);
        // right edge at the tall side
        assert_eq!(r.get_y(&boxed(760.0, 0.0)), 460.0);
        // past the tall side: flat top
        assert_eq!(r.get_y(&boxed(780.0, 0.0)), 460.0);
        // before the thin end: flat base
        assert_eq!(r.get_y(&boxed(500.0, 0.0)), 560.0);
        assert_eq!(r.get_x(&boxed(0.0, 460.0)), 760.0);
        assert_eq!(r.get_x(&boxed(0.0, 510.0)), 660.0);
    }

    #[test]
    fn test_right_ramp_heights() {
        // falls from (0,500) to (200,600)
        let r = Ramp::new(0.0, 500.0, 200.0, 100.0, false, false);
        assert_eq!(r.get_y(&boxed(0.0, 0.0)), 460.0);
        assert_eq!(r.get_y(&boxed(100.0, 0.0)), 510.0);
        assert_eq!(r.get_y(&boxed(250.0, 0.0)), 560.0);
        assert_eq!(r.get_x(&boxed(0.0, 510.0)), 100.0);
        assert_eq!(r.get_x(&boxed(0.0, 400.0)), 0.0);
    }

    #[test]
    fn test_inverted_ramp_heights() {
        // ceiling: solid top-right, face from (0,0) down to (100,100)
        let r = Ramp::new(0.0, 0.0, 100.0, 100.0, true, true);
        assert_eq!(r.get_y(&Rectangle::new(10.0, 0.0, 40.0, 40.0)), 50.0);
        assert_eq!(r.get_x(&Rectangle::new(0.0, 50.0, 40.0, 40.0)), 10.0);
        assert_eq!(r.get_y(&Rectangle::new(90.0, 0.0, 40.0, 40.0)), 100.0);
        let mirrored = Ramp::new(0.0, 0.0, 100.0, 100.0, false, true);
        assert_eq!(mirrored.get_y(&Rectangle::new(60.0, 0.0, 40.0, 40.0)), 40.0);
        assert_eq!(mirrored.get_x(&Rectangle::new(0.0, 60.0, 40.0, 40.0)), 40.0);
    }

    #[test]
    fn test_contact_and_intersection() {
        let r = Ramp::new(600.0, 500.0, 200.0, 100.0, true, false);
        assert!(r.contact(&boxed(660.0, 510.0)));
        assert!(!r.contact(&boxed(660.0, 505.0)));
        assert!(!r.intersects(&boxed(660.0, 510.0)));
        assert!(r.intersects(&boxed(660.0, 520.0)));
        // below the base line is outside the triangle
        assert!(!r.intersects(&boxed(660.0, 600.0)));
        // no horizontal overlap
        assert!(!r.contact(&boxed(560.0, 560.0)));
        let ceiling = Ramp::new(600.0, 500.0, 200.0, 100.0, true, true);
        assert!(!ceiling.contact(&boxed(660.0, 510.0)));
    }

    #[test]
    fn test_can_collide_only_when_crossing_surface() {
        let r = Ramp::new(600.0, 500.0, 200.0, 100.0, true, false);
        // walking right along the floor into the ramp
        assert!(r.check_can_collide(&Rectangle::new(550.0, 560.0, 100.0, 40.0)));
        // resting on the slope, moving down it
        assert!(!r.check_can_collide(&Rectangle::new(650.0, 510.0, 50.0, 40.0)));
        // far above
        assert!(!r.check_can_collide(&Rectangle::new(650.0, 300.0, 40.0, 60.0)));
        // entirely under the base line
        assert!(!r.check_can_collide(&Rectangle::new(650.0, 610.0, 40.0, 60.0)));
        // under the slope but above the base line
        assert!(!r.check_can_collide(&Rectangle::new(700.0, 560.0, 45.0, 40.0)));
        // beside the tall side, moving into it
        let step = Ramp::new(100.0, 500.0, 100.0, 100.0, true, false);
        assert!(!step.check_can_collide(&Rectangle::new(195.0, 560.0, 45.0, 40.0)));

        let ceiling = Ramp::new(100.0, 0.0, 100.0, 100.0, true, true);
        // straddling the face
        assert!(ceiling.check_can_collide(&Rectangle::new(150.0, 60.0, 45.0, 40.0)));
        // entirely inside the solid part, above the face
        assert!(!ceiling.check_can_collide(&Rectangle::new(170.0, 0.0, 25.0, 20.0)));
    }

    #[test]
    fn test_flat_top_past_tall_side() {
        let r = Ramp::new(600.0, 500.0, 200.0, 100.0, true, false);
        let over_crest = boxed(780.0, 460.0);
        assert_eq!(r.get_x(&over_crest), 780.0);
        assert!(r.contact(&over_crest));
        assert!(!r.contact(&boxed(780.0, 455.0)));

        let mirrored = Ramp::new(0.0, 500.0, 200.0, 100.0, false, false);
        let over_crest = boxed(-20.0, 460.0);
        assert_eq!(mirrored.get_x(&over_crest), -20.0);
        assert!(mirrored.contact(&over_crest));
    }

    #[test]
    fn test_landing_into_slope_loses_horizontal_speed() {
        let r = Ramp::new(600.0, 500.0, 200.0, 100.0, true, false);
        let mut m = Mover::new(660.0, 520.0, 40.0, 40.0);
        m.speed = Vector2::new(8.0, 6.0);
        m.set_prev_speed(Vector2::new(8.0, 6.0));
        r.check_intersection(0, &mut m, true);
        assert_eq!(m.y, 510.0);
        assert_eq!(m.speed.y, 0.0);
        assert_eq!(m.speed.x, 5.0);
    }

    #[test]
    fn test_resting_mover_only_gets_height_correction() {
        let r = Ramp::new(600.0, 500.0, 200.0, 100.0, true, false);
        let mut m = Mover::new(660.0, 520.0, 40.0, 40.0);
        m.speed = Vector2::new(8.0, 6.0);
        m.set_prev_speed(Vector2::new(8.0, 6.0));
        m.set_contacts_for_test(None, Some(Contact::Ramp(3)), None, None);
        r.check_intersection(3, &mut m, true);
        assert_eq!(m.y, 510.0);
        assert_eq!(m.speed.x, 8.0);
    }

    #[test]
    fn test_not_eligible_means_untouched() {
        let r = Ramp::new(600.0, 500.0, 200.0, 100.0, true, false);
        let mut m = Mover::new(660.0, 520.0, 40.0, 40.0);
        r.check_intersection(0, &mut m, false);
        assert_eq!(m.y, 520.0);
    }

    #[test]
    fn test_ceiling_ramp_acts_as_wall_when_walking() {
        // ceiling lowering to the right
        let r = Ramp::new(100.0, 0.0, 100.0, 100.0, true, true);
        let mut m = Mover::new(150.0, 60.0, 40.0, 40.0);
        m.speed = Vector2::new(5.0, 0.0);
        m.set_prev_speed(Vector2::new(5.0, 0.0));
        r.check_intersection(0, &mut m, true);
        // top-right corner back on the face: surface y 60 at x 160
        assert_eq!(m.x, 120.0);
        assert_eq!(m.speed.x, 0.0);
        assert_eq!(m.y, 60.0);
    }

    #[test]
    fn test_ceiling_ramp_stops_rising_mover() {
        let r = Ramp::new(100.0, 0.0, 100.0, 100.0, true, true);
        let mut m = Mover::new(110.0, 30.0, 40.0, 40.0);
        m.speed = Vector2::new(0.0, -5.0);
        m.set_prev_speed(Vector2::new(0.0, -5.0));
        r.check_intersection(0, &mut m, true);
        assert_eq!(m.y, 50.0);
        assert_eq!(m.speed.y, 0.0);
    }
}
