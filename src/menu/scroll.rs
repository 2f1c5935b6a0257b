/// Extra travel past the end of the text so it doesn't stop flush against the edge.
pub const SCROLL_BUFFER_PX: f64 = 20.0;
/// Upper bound on the ease-in segment.
pub const MAX_ACCELERATION_SECS: f64 = 1.0;

/// Scroll speed and the dwell limits of an active row.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct ScrollParams {
    /// Constant travel speed in pixels per second.
    pub speed: f64,
    /// A row active for less than this reverses instead of stopping at the end.
    pub min_dwell: f64,
    /// Longest a scrolling row stays active.
    pub max_dwell: f64,
}

impl Default for ScrollParams {
    fn default() -> Self {
        Self {
            speed: 10.0,
            min_dwell: 6.0,
            max_dwell: 12.0,
        }
    }
}

/// Travel direction of a scrolling row.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    /// Offset grows from 0 toward the maximum.
    Forward,
    /// Offset shrinks from the maximum toward 0.
    Backward,
}

impl Direction {
    fn flipped(self) -> Self {
        match self {
            Self::Forward => Self::Backward,
            Self::Backward => Self::Forward,
        }
    }
}

/// Which part of the motion a sample came from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ScrollPhase {
    /// Text fits, nothing moves.
    Idle,
    /// Ease-in toward full speed.
    Accel,
    /// Full speed.
    Constant,
    /// An extreme was reached before the minimum dwell; direction flipped on this sample.
    Reversing,
    /// An extreme was reached after the minimum dwell; offset stays put.
    Held,
}

/// Offset to subtract from the text origin, plus where it came from.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScrollSample {
    /// Horizontal offset in pixels, within `[0, max_scroll]`.
    pub offset: f64,
    /// Motion phase.
    pub phase: ScrollPhase,
}

impl ScrollSample {
    const IDLE: Self = Self {
        offset: 0.0,
        phase: ScrollPhase::Idle,
    };
}

#[derive(Clone, Copy, Debug, PartialEq)]
struct Geometry {
    max_scroll: f64,
    accel_time: f64,
}

#[derive(Clone, Copy, Debug, PartialEq)]
struct ScrollState {
    start: f64,
    direction: Direction,
    geometry: Option<Geometry>,
}

/// Per-row scroll state machine for text wider than its slot.
///
/// Slots are fixed at construction (one per visible row). A slot starts moving the first time it
/// is sampled after [`ScrollAnimator::activate`] or a reset, and its geometry is frozen for that
/// activation.
#[derive(Clone, Debug)]
pub struct ScrollAnimator {
    params: ScrollParams,
    slots: Box<[Option<ScrollState>]>,
}

impl ScrollAnimator {
    /// Animator with `slots` rows.
    pub fn new(params: ScrollParams, slots: usize) -> Self {
        Self {
            params,
            slots: vec![None; slots].into_boxed_slice(),
        }
    }

    /// Parameters in use.
    pub fn params(&self) -> &ScrollParams {
        &self.params
    }

    /// Number of slots.
    pub fn slot_count(&self) -> usize {
        self.slots.len()
    }

    /// Restart `slot` forward from `now`.
    pub fn activate(&mut self, slot: usize, now: f64) {
        if let Some(state) = self.slots.get_mut(slot) {
            *state = Some(ScrollState {
                start: now,
                direction: Direction::Forward,
                geometry: None,
            });
        }
    }

    /// Forget the state of one slot.
    pub fn reset(&mut self, slot: usize) {
        if let Some(state) = self.slots.get_mut(slot) {
            *state = None;
        }
    }

    /// Forget every slot.
    pub fn reset_all(&mut self) {
        self.slots.fill(None);
    }

    /// Current direction of `slot`, if it is scrolling.
    pub fn direction(&self, slot: usize) -> Option<Direction> {
        self.slots.get(slot).copied().flatten().map(|s| s.direction)
    }

    /// Offset for the active row in `slot` at virtual time `now`.
    ///
    /// `active_since` is when the row became active; it decides whether reaching an extreme
    /// reverses or holds. Content that fits the viewport always yields offset 0.
    pub fn sample(
        &mut self,
        slot: usize,
        content_width: i32,
        viewport_width: i32,
        now: f64,
        active_since: f64,
    ) -> ScrollSample {
        if content_width <= viewport_width {
            return ScrollSample::IDLE;
        }
        let params = self.params;
        let Some(entry) = self.slots.get_mut(slot) else {
            return ScrollSample::IDLE;
        };
        let state = entry.get_or_insert(ScrollState {
            start: now,
            direction: Direction::Forward,
            geometry: None,
        });
        let geo = *state.geometry.get_or_insert_with(|| {
            let max_scroll = f64::from(content_width - viewport_width) + SCROLL_BUFFER_PX;
            Geometry {
                max_scroll,
                accel_time: acceleration_time(max_scroll, params.speed),
            }
        });

        let elapsed = (now - state.start).max(0.0);
        let (distance, phase) = travelled(elapsed, geo.accel_time, params.speed);

        if distance >= geo.max_scroll {
            let extreme = match state.direction {
                Direction::Forward => geo.max_scroll,
                Direction::Backward => 0.0,
            };
            if now - active_since < params.min_dwell {
                state.direction = state.direction.flipped();
                state.start = now;
                return ScrollSample {
                    offset: extreme,
                    phase: ScrollPhase::Reversing,
                };
            }
            return ScrollSample {
                offset: extreme,
                phase: ScrollPhase::Held,
            };
        }

        let offset = match state.direction {
            Direction::Forward => distance,
            Direction::Backward => geo.max_scroll - distance,
        };
        ScrollSample {
            offset: offset.clamp(0.0, geo.max_scroll),
            phase,
        }
    }
}

/// Length of the ease-in: a quarter of the full traversal time, capped at one second.
pub fn acceleration_time(max_scroll: f64, speed: f64) -> f64 {
    if speed <= 0.0 || !speed.is_finite() {
        return 0.0;
    }
    (0.25 * max_scroll / speed).min(MAX_ACCELERATION_SECS)
}

fn travelled(elapsed: f64, accel_time: f64, speed: f64) -> (f64, ScrollPhase) {
    let speed = speed.max(0.0);
    if accel_time > 0.0 && elapsed <= accel_time {
        let current_speed = speed * elapsed / accel_time;
        (elapsed * current_speed / 2.0, ScrollPhase::Accel)
    } else {
        let accel_distance = accel_time * speed / 2.0;
        (
            accel_distance + (elapsed - accel_time) * speed,
            ScrollPhase::Constant,
        )
    }
}

#[cfg(test)]
#[path = "../../tests/unit/menu/scroll.rs"]
mod tests;
