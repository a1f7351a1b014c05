//! Brightness to dash density along a single stripe.
//!
//! A stripe covering one pixel height is divided into `steps` equal slots.
//! The intensity decides how many slots are inked, and an integer error
//! accumulator (the same one Bresenham's line algorithm uses) spreads those
//! slots evenly over the stripe. Spreading matters: packing all inked slots
//! at one end of every stripe shows up as horizontal banding on paper.

use crate::paths::StripeSegment;
use crate::settings::StripeSettings;

/// Number of inked slots for an intensity, clamped to `0..=steps`.
///
/// Uses `f64::round`, which rounds half away from zero, so 4.5 slots
/// become 5.
#[inline]
pub fn on_slot_count(intensity: f64, steps: u32) -> u32 {
    let on = (intensity * f64::from(steps)).round();
    if on >= f64::from(steps) {
        steps
    } else if on > 0.0 {
        on as u32
    } else {
        0
    }
}

/// Iterator over the indices of inked slots, in ascending order.
///
/// Created by [`on_slots`].
#[derive(Debug, Clone)]
pub struct OnSlots {
    on: u64,
    steps: u64,
    err: u64,
    next: u64,
}

impl Iterator for OnSlots {
    type Item = u32;

    fn next(&mut self) -> Option<u32> {
        while self.next < self.steps {
            let i = self.next;
            self.next += 1;
            self.err += self.on;
            if self.err >= self.steps {
                self.err -= self.steps;
                return Some(i as u32);
            }
        }
        None
    }
}

/// Mark `on` of `steps` slots as evenly as possible.
///
/// Exactly `min(on, steps)` indices are yielded, and the gaps between
/// consecutive marked slots differ by at most one.
///
/// # Example
///
/// ```
/// use crt_stripes::on_slots;
///
/// let marked: Vec<u32> = on_slots(3, 9).collect();
/// assert_eq!(marked, vec![2, 5, 8]);
/// ```
pub fn on_slots(on: u32, steps: u32) -> OnSlots {
    OnSlots {
        on: u64::from(on.min(steps)),
        steps: u64::from(steps),
        err: 0,
        next: 0,
    }
}

/// Turns a stripe extent and an intensity into dash segments.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DashDistributor {
    steps: u32,
    fill: f64,
}

impl DashDistributor {
    /// Create a distributor with `steps` slots per stripe, each inked for
    /// `fill` of its length. A step count of 0 is treated as 1.
    pub fn new(steps: u32, fill: f64) -> Self {
        Self {
            steps: steps.max(1),
            fill,
        }
    }

    pub fn from_settings(settings: &StripeSettings) -> Self {
        Self::new(settings.dash_steps, settings.dash_fill)
    }

    #[inline]
    pub fn steps(&self) -> u32 {
        self.steps
    }

    /// Append the dashes for one stripe at `x` spanning `y0..y1` to `out`.
    ///
    /// Returns the number of segments appended:
    /// - nothing when the intensity rounds to zero slots,
    /// - a single segment covering the whole extent when every slot is on,
    /// - otherwise one dash per inked slot, centered inside its slot.
    pub fn distribute(
        &self,
        x: f64,
        y0: f64,
        y1: f64,
        intensity: f64,
        out: &mut Vec<StripeSegment>,
    ) -> usize {
        if intensity.is_nan() || intensity <= 0.0 {
            return 0;
        }

        let on = on_slot_count(intensity, self.steps);
        if on == 0 {
            return 0;
        }
        if on >= self.steps {
            out.push(StripeSegment::new(x, y0, y1));
            return 1;
        }

        let slot = (y1 - y0) / f64::from(self.steps);
        let dash = slot * self.fill;
        let inset = (slot - dash) * 0.5;

        let before = out.len();
        out.extend(on_slots(on, self.steps).map(|i| {
            let y_a = y0 + f64::from(i) * slot + inset;
            StripeSegment::new(x, y_a, y_a + dash)
        }));
        out.len() - before
    }
}
