//! Single-slot animation channel for the camera target.
//!
//! An explicit elapsed-time abstraction advanced once per tick.
//! Completion is a returned value, not a callback, so sequencing stays
//! deterministic and testable.

use serde::{Deserialize, Serialize};

/// Terminal height of the descent animation.
pub const DESCENT_END: f32 = -4.0;
/// Duration of the descent animation in seconds.
pub const DESCENT_DURATION: f32 = 11.0;
/// Terminal height of the ascent animation.
pub const ASCENT_END: f32 = 14.0;
/// Duration of the ascent animation in seconds.
pub const ASCENT_DURATION: f32 = 3.0;
/// Start delay shared by both animations.
pub const START_DELAY: f32 = 0.5;

/// Easing curve applied to normalized tween time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Easing {
    #[default]
    Linear,
    /// Sinusoidal ease-out: fast start, slow finish.
    SineOut,
    EaseIn,
    EaseOut,
    EaseInOut,
}

impl Easing {
    /// Applies the easing function to a normalized time value (0.0 to 1.0).
    pub fn apply(self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Self::Linear => t,
            Self::SineOut => (t * std::f32::consts::FRAC_PI_2).sin(),
            Self::EaseIn => t * t,
            Self::EaseOut => t * (2.0 - t),
            Self::EaseInOut => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    -1.0 + (4.0 - 2.0 * t) * t
                }
            }
        }
    }
}

/// Identifies which of the two camera-target animations is playing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TweenLabel {
    Descent,
    Ascent,
}

/// One time-based interpolation toward an end value.
///
/// The start value is sampled from the animated attribute when the delay
/// expires, matching "from current value" semantics.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Tween {
    pub label: TweenLabel,
    pub end: f32,
    pub duration: f32,
    pub delay: f32,
    pub easing: Easing,
}

impl Tween {
    /// Camera dolly descent: used at startup and after every spawn.
    pub fn descent() -> Self {
        Self {
            label: TweenLabel::Descent,
            end: DESCENT_END,
            duration: DESCENT_DURATION,
            delay: START_DELAY,
            easing: Easing::SineOut,
        }
    }

    /// Camera ascent: triggered by the spawn coordinator.
    pub fn ascent() -> Self {
        Self {
            label: TweenLabel::Ascent,
            end: ASCENT_END,
            duration: ASCENT_DURATION,
            delay: START_DELAY,
            easing: Easing::Linear,
        }
    }
}

/// Progress report from one channel advance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TweenProgress {
    /// No tween on the channel.
    Idle,
    /// The start delay has not elapsed; the value is untouched.
    Delayed,
    /// The value was interpolated this tick.
    Running,
    /// The tween reached its end value and released the channel.
    Finished(TweenLabel),
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
struct ActiveTween {
    tween: Tween,
    elapsed: f32,
    start: Option<f32>,
}

/// Holds at most one active tween for one logical channel.
///
/// Starting a tween replaces whatever was on the channel; the spawn
/// coordinator's one-shot arming guarantees normal flow never overlaps
/// ascent and descent.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct TweenChannel {
    active: Option<ActiveTween>,
}

impl TweenChannel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Puts a tween on the channel, superseding any previous one.
    pub fn start(&mut self, tween: Tween) {
        self.active = Some(ActiveTween {
            tween,
            elapsed: 0.0,
            start: None,
        });
    }

    /// Label of the currently active tween, if any.
    pub fn active_label(&self) -> Option<TweenLabel> {
        self.active.map(|a| a.tween.label)
    }

    pub fn is_active(&self) -> bool {
        self.active.is_some()
    }

    /// Advances the channel by `dt` seconds, interpolating `value` in place.
    ///
    /// On completion the value is set to the tween's end exactly and the
    /// channel is released.
    pub fn advance(&mut self, dt: f32, value: &mut f32) -> TweenProgress {
        let Some(active) = &mut self.active else {
            return TweenProgress::Idle;
        };

        active.elapsed += dt;
        let anim_time = active.elapsed - active.tween.delay;
        if anim_time <= 0.0 {
            return TweenProgress::Delayed;
        }

        let start = *active.start.get_or_insert(*value);
        let tween = active.tween;
        if anim_time >= tween.duration {
            *value = tween.end;
            self.active = None;
            return TweenProgress::Finished(tween.label);
        }

        let t = tween.easing.apply(anim_time / tween.duration);
        *value = start + (tween.end - start) * t;
        TweenProgress::Running
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::physics::PHYSICS_DT;

    fn run_until_finished(
        channel: &mut TweenChannel,
        value: &mut f32,
        max_ticks: u32,
    ) -> Option<(TweenLabel, u32)> {
        for tick in 0..max_ticks {
            if let TweenProgress::Finished(label) = channel.advance(PHYSICS_DT, value) {
                return Some((label, tick));
            }
        }
        None
    }

    #[test]
    fn test_easing_functions() {
        assert!((Easing::Linear.apply(0.5) - 0.5).abs() < 0.001);
        assert!((Easing::EaseIn.apply(0.5) - 0.25).abs() < 0.001);
        assert!((Easing::EaseOut.apply(0.5) - 0.75).abs() < 0.001);
        assert!((Easing::EaseInOut.apply(0.5) - 0.5).abs() < 0.001);
        // Sine-out is fast early, slow late.
        assert!(Easing::SineOut.apply(0.25) > 0.25);
        assert!((Easing::SineOut.apply(1.0) - 1.0).abs() < 0.001);
    }

    #[test]
    fn test_delay_holds_value() {
        let mut channel = TweenChannel::new();
        channel.start(Tween::descent());

        let mut value = 20.0;
        // 0.4s elapsed, still inside the 0.5s delay.
        for _ in 0..24 {
            assert_eq!(channel.advance(PHYSICS_DT, &mut value), TweenProgress::Delayed);
        }
        assert_eq!(value, 20.0);
    }

    #[test]
    fn test_descent_reaches_end_value() {
        // Scenario: target.y starts at 20; after the 0.5s delay plus the
        // 11s descent it must sit at -4.
        let mut channel = TweenChannel::new();
        channel.start(Tween::descent());

        let mut value = 20.0;
        let finished = run_until_finished(&mut channel, &mut value, 800);

        let (label, _) = finished.expect("descent should finish within 800 ticks");
        assert_eq!(label, TweenLabel::Descent);
        assert_eq!(value, DESCENT_END);
        assert!(!channel.is_active());
    }

    #[test]
    fn test_ascent_snaps_exactly() {
        let mut channel = TweenChannel::new();
        channel.start(Tween::ascent());

        let mut value = -3.2;
        let finished = run_until_finished(&mut channel, &mut value, 300);

        assert_eq!(finished.map(|(label, _)| label), Some(TweenLabel::Ascent));
        assert_eq!(value, ASCENT_END);
    }

    #[test]
    fn test_descent_is_monotonic_after_delay() {
        let mut channel = TweenChannel::new();
        channel.start(Tween::descent());

        let mut value = 20.0;
        let mut previous = value;
        for _ in 0..700 {
            channel.advance(PHYSICS_DT, &mut value);
            assert!(value <= previous);
            previous = value;
        }
    }

    #[test]
    fn test_start_supersedes_active_tween() {
        let mut channel = TweenChannel::new();
        channel.start(Tween::descent());
        assert_eq!(channel.active_label(), Some(TweenLabel::Descent));

        channel.start(Tween::ascent());
        assert_eq!(channel.active_label(), Some(TweenLabel::Ascent));

        let mut value = 0.0;
        let finished = run_until_finished(&mut channel, &mut value, 300);
        assert_eq!(finished.map(|(label, _)| label), Some(TweenLabel::Ascent));
    }

    #[test]
    fn test_idle_channel_leaves_value_alone() {
        let mut channel = TweenChannel::new();
        let mut value = 7.5;
        assert_eq!(channel.advance(PHYSICS_DT, &mut value), TweenProgress::Idle);
        assert_eq!(value, 7.5);
    }
}
