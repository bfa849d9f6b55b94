use std::cell::RefCell;
use std::rc::Rc;

use swipedeck_core::{FrameCallbackRegistration, FrameClock, RuntimeHandle};
use swipedeck_graphics::Point;

/// Trait for types that can be linearly interpolated.
pub trait Lerp {
    fn lerp(&self, target: &Self, fraction: f32) -> Self;
}

impl Lerp for f32 {
    fn lerp(&self, target: &Self, fraction: f32) -> Self {
        self + (target - self) * fraction
    }
}

impl Lerp for f64 {
    fn lerp(&self, target: &Self, fraction: f32) -> Self {
        self + (target - self) * fraction as f64
    }
}

impl Lerp for Point {
    fn lerp(&self, target: &Self, fraction: f32) -> Self {
        Point::new(
            self.x.lerp(&target.x, fraction),
            self.y.lerp(&target.y, fraction),
        )
    }
}

/// Trait for values that can participate in spring animations.
///
/// Springs run their physics on a scalar progress between the start and the
/// target; implementers define how that progress is measured for their shape.
pub trait SpringValue: Lerp + Clone {
    /// Current progress between start and target, 0 at start, 1 at target.
    fn spring_progress(start: &Self, target: &Self, current: &Self) -> f32;

    /// Whether current is close enough to the target to consider the spring
    /// settled.
    fn is_near(current: &Self, target: &Self, threshold: f32) -> bool;
}

impl SpringValue for f32 {
    fn spring_progress(start: &Self, target: &Self, current: &Self) -> f32 {
        if (target - start).abs() < f32::EPSILON {
            1.0
        } else {
            (current - start) / (target - start)
        }
    }

    fn is_near(current: &Self, target: &Self, threshold: f32) -> bool {
        (current - target).abs() < threshold
    }
}

impl SpringValue for Point {
    fn spring_progress(start: &Self, target: &Self, current: &Self) -> f32 {
        let span = *target - *start;
        let span_sq = span.dot(span);
        if span_sq < f32::EPSILON {
            1.0
        } else {
            (*current - *start).dot(span) / span_sq
        }
    }

    fn is_near(current: &Self, target: &Self, threshold: f32) -> bool {
        (*current - *target).magnitude() < threshold
    }
}

/// Easing functions for tween animations.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Easing {
    Linear,
    EaseIn,
    EaseOut,
    EaseInOut,
    FastOutSlowIn,
    LinearOutSlowIn,
    FastOutLinearIn,
}

impl Easing {
    /// Apply the easing function to a linear fraction [0, 1].
    pub fn transform(&self, fraction: f32) -> f32 {
        match self {
            Easing::Linear => fraction,
            Easing::EaseIn => cubic_bezier(0.42, 0.0, 1.0, 1.0, fraction),
            Easing::EaseOut => cubic_bezier(0.0, 0.0, 0.58, 1.0, fraction),
            Easing::EaseInOut => cubic_bezier(0.42, 0.0, 0.58, 1.0, fraction),
            Easing::FastOutSlowIn => cubic_bezier(0.4, 0.0, 0.2, 1.0, fraction),
            Easing::LinearOutSlowIn => cubic_bezier(0.0, 0.0, 0.2, 1.0, fraction),
            Easing::FastOutLinearIn => cubic_bezier(0.4, 0.0, 1.0, 1.0, fraction),
        }
    }
}

/// Cubic bezier curve approximation for easing.
fn cubic_bezier(x1: f32, y1: f32, x2: f32, y2: f32, fraction: f32) -> f32 {
    if fraction <= 0.0 {
        return 0.0;
    }
    if fraction >= 1.0 {
        return 1.0;
    }

    let cx = 3.0 * x1;
    let bx = 3.0 * (x2 - x1) - cx;
    let ax = 1.0 - cx - bx;

    let cy = 3.0 * y1;
    let by = 3.0 * (y2 - y1) - cy;
    let ay = 1.0 - cy - by;

    fn sample_curve(a: f32, b: f32, c: f32, t: f32) -> f32 {
        ((a * t + b) * t + c) * t
    }

    fn sample_derivative(a: f32, b: f32, c: f32, t: f32) -> f32 {
        (3.0 * a * t + 2.0 * b) * t + c
    }

    // Newton-Raphson for the parametric t matching the x fraction, clamped
    // to [0, 1].
    let mut t = fraction;
    let mut newton_success = false;
    for _ in 0..8 {
        let x = sample_curve(ax, bx, cx, t) - fraction;
        if x.abs() < 1e-6 {
            newton_success = true;
            break;
        }
        let dx = sample_derivative(ax, bx, cx, t);
        if dx.abs() < 1e-6 {
            break;
        }
        t = (t - x / dx).clamp(0.0, 1.0);
    }

    if !newton_success {
        // Binary subdivision fallback when Newton-Raphson did not converge.
        let mut t0 = 0.0;
        let mut t1 = 1.0;
        t = fraction;
        for _ in 0..16 {
            let x = sample_curve(ax, bx, cx, t);
            let delta = x - fraction;
            if delta.abs() < 1e-6 {
                break;
            }
            if delta > 0.0 {
                t1 = t;
            } else {
                t0 = t;
            }
            t = 0.5 * (t0 + t1);
        }
    }

    sample_curve(ay, by, cy, t)
}

/// Tween specification combining duration and easing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnimationSpec {
    /// Duration in milliseconds.
    pub duration_millis: u64,
    /// Easing function to apply.
    pub easing: Easing,
    /// Delay before starting in milliseconds.
    pub delay_millis: u64,
}

impl AnimationSpec {
    pub fn tween(duration_millis: u64, easing: Easing) -> Self {
        Self {
            duration_millis,
            easing,
            delay_millis: 0,
        }
    }

    pub fn linear(duration_millis: u64) -> Self {
        Self::tween(duration_millis, Easing::Linear)
    }

    pub fn with_delay(mut self, delay_millis: u64) -> Self {
        self.delay_millis = delay_millis;
        self
    }
}

impl Default for AnimationSpec {
    fn default() -> Self {
        Self::tween(300, Easing::FastOutSlowIn)
    }
}

/// Spring animation configuration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpringSpec {
    /// 1.0 = critically damped, < 1.0 = bouncy, > 1.0 = over-damped.
    pub damping_ratio: f32,
    /// Higher values = faster animation.
    pub stiffness: f32,
    /// Velocity threshold to stop the animation.
    pub velocity_threshold: f32,
    /// Position threshold to stop the animation.
    pub position_threshold: f32,
}

impl SpringSpec {
    pub fn default_spring() -> Self {
        Self {
            damping_ratio: 1.0,
            stiffness: 1500.0,
            velocity_threshold: 0.01,
            position_threshold: 0.001,
        }
    }

    pub fn bouncy() -> Self {
        Self {
            damping_ratio: 0.5,
            ..Self::default_spring()
        }
    }

    pub fn stiff() -> Self {
        Self {
            stiffness: 3000.0,
            ..Self::default_spring()
        }
    }
}

impl Default for SpringSpec {
    fn default() -> Self {
        Self::default_spring()
    }
}

/// Animation type specification.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AnimationType {
    Tween(AnimationSpec),
    Spring(SpringSpec),
}

impl Default for AnimationType {
    fn default() -> Self {
        AnimationType::Tween(AnimationSpec::default())
    }
}

/// How an animation ended, reported to its completion handler.
///
/// Interrupted completions still fire so owners can keep their bookkeeping
/// consistent when one animation supersedes another on the same value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnimationEnd {
    /// The animation reached its target.
    Finished,
    /// A newer animation or snap took over before the target was reached.
    Interrupted,
}

type EndHandler = Box<dyn FnOnce(AnimationEnd)>;

/// Generic animatable value holder driven by frame callbacks.
pub struct Animatable<T: SpringValue + 'static> {
    inner: Rc<RefCell<AnimatableInner<T>>>,
}

struct AnimatableInner<T: SpringValue + 'static> {
    clock: FrameClock,
    current: T,
    velocity: f32,
    start: T,
    target: T,
    animation_type: AnimationType,
    start_time_nanos: Option<u64>,
    registration: Option<FrameCallbackRegistration>,
    on_end: Option<EndHandler>,
}

impl<T: SpringValue + 'static> AnimatableInner<T> {
    /// Cancels any in-flight animation and hands back its completion handler.
    fn take_in_flight(&mut self) -> Option<EndHandler> {
        if let Some(registration) = self.registration.take() {
            registration.cancel();
        }
        self.start_time_nanos = None;
        self.on_end.take()
    }
}

impl<T: SpringValue + 'static> Animatable<T> {
    pub fn new(initial: T, runtime: RuntimeHandle) -> Self {
        let inner = AnimatableInner {
            clock: runtime.frame_clock(),
            current: initial.clone(),
            velocity: 0.0,
            start: initial.clone(),
            target: initial,
            animation_type: AnimationType::default(),
            start_time_nanos: None,
            registration: None,
            on_end: None,
        };
        Self {
            inner: Rc::new(RefCell::new(inner)),
        }
    }

    /// Current value.
    pub fn value(&self) -> T {
        self.inner.borrow().current.clone()
    }

    /// Current animation target.
    pub fn target(&self) -> T {
        self.inner.borrow().target.clone()
    }

    pub fn animation_type(&self) -> AnimationType {
        self.inner.borrow().animation_type
    }

    pub fn is_animating(&self) -> bool {
        self.inner.borrow().registration.is_some()
    }

    /// Animate to the target value. Any in-flight animation is interrupted
    /// and its completion handler fires with [`AnimationEnd::Interrupted`]
    /// before the new animation takes its first frame.
    pub fn animate_to(&self, target: T, animation: AnimationType) {
        self.animate_to_with(target, animation, |_| {});
    }

    /// Like [`Self::animate_to`] with a completion handler.
    pub fn animate_to_with(
        &self,
        target: T,
        animation: AnimationType,
        on_end: impl FnOnce(AnimationEnd) + 'static,
    ) {
        let interrupted = {
            let mut inner = self.inner.borrow_mut();
            let interrupted = inner.take_in_flight();
            inner.start = inner.current.clone();
            inner.target = target;
            inner.velocity = 0.0;
            inner.animation_type = animation;
            inner.on_end = Some(Box::new(on_end));
            interrupted
        };
        if let Some(handler) = interrupted {
            handler(AnimationEnd::Interrupted);
        }
        Self::schedule_frame(&self.inner);
    }

    /// Snap immediately to the target value without animating. Interrupts
    /// any in-flight animation.
    pub fn snap_to(&self, target: T) {
        let interrupted = {
            let mut inner = self.inner.borrow_mut();
            let interrupted = inner.take_in_flight();
            inner.current = target.clone();
            inner.start = target.clone();
            inner.target = target;
            inner.velocity = 0.0;
            interrupted
        };
        if let Some(handler) = interrupted {
            handler(AnimationEnd::Interrupted);
        }
    }

    fn schedule_frame(this: &Rc<RefCell<AnimatableInner<T>>>) {
        let clock = {
            let inner = this.borrow();
            if inner.registration.is_some() {
                return;
            }
            inner.clock.clone()
        };
        let weak = Rc::downgrade(this);
        let registration = clock.with_frame_nanos(move |time| {
            if let Some(strong) = weak.upgrade() {
                Self::on_frame(&strong, time);
            }
        });
        this.borrow_mut().registration = Some(registration);
    }

    fn on_frame(this: &Rc<RefCell<AnimatableInner<T>>>, frame_time_nanos: u64) {
        let mut schedule_next = false;
        let mut finished: Option<EndHandler> = None;
        {
            let mut inner = this.borrow_mut();
            inner.registration = None;

            match inner.animation_type {
                AnimationType::Tween(spec) => {
                    let start_time = inner.start_time_nanos.get_or_insert(frame_time_nanos);
                    let elapsed_nanos = frame_time_nanos.saturating_sub(*start_time);
                    let delay_nanos = spec.delay_millis * 1_000_000;

                    if elapsed_nanos < delay_nanos {
                        schedule_next = true;
                    } else {
                        let animation_elapsed = elapsed_nanos - delay_nanos;
                        let duration_nanos = (spec.duration_millis * 1_000_000).max(1);
                        let linear_progress =
                            (animation_elapsed as f32 / duration_nanos as f32).clamp(0.0, 1.0);
                        let progress = spec.easing.transform(linear_progress);

                        inner.current = inner.start.lerp(&inner.target, progress);

                        if linear_progress >= 1.0 {
                            inner.current = inner.target.clone();
                            inner.start = inner.target.clone();
                            inner.start_time_nanos = None;
                            finished = inner.on_end.take();
                        } else {
                            schedule_next = true;
                        }
                    }
                }
                AnimationType::Spring(spec) => {
                    // Springs integrate frame-to-frame; the stored timestamp
                    // is the previous frame, not the animation start.
                    let last_time = inner
                        .start_time_nanos
                        .replace(frame_time_nanos)
                        .unwrap_or(frame_time_nanos);
                    let elapsed_nanos = frame_time_nanos.saturating_sub(last_time);
                    let dt = elapsed_nanos as f32 / 1_000_000_000.0;

                    if dt == 0.0 {
                        schedule_next = true;
                    } else {
                        // Damped harmonic oscillator on scalar progress,
                        // semi-implicit Euler in fixed sub-steps for
                        // stability at irregular frame intervals.
                        let stiffness = spec.stiffness;
                        let damping = 2.0 * spec.damping_ratio * stiffness.sqrt();

                        let mut prev_time = 0.0f32;
                        let timestep: f32 = 0.016;

                        while prev_time < dt {
                            let step = timestep.min(dt - prev_time);

                            let current_progress = <T as SpringValue>::spring_progress(
                                &inner.start,
                                &inner.target,
                                &inner.current,
                            );

                            let displacement = current_progress - 1.0;
                            let spring_force = -stiffness * displacement - damping * inner.velocity;

                            inner.velocity += spring_force * step;
                            let new_progress = current_progress + inner.velocity * step;

                            inner.current = inner
                                .start
                                .lerp(&inner.target, new_progress.clamp(0.0, 2.0));

                            prev_time += step;
                        }

                        let at_rest = inner.velocity.abs() < spec.velocity_threshold;
                        let near_target = <T as SpringValue>::is_near(
                            &inner.current,
                            &inner.target,
                            spec.position_threshold,
                        );

                        if at_rest && near_target {
                            inner.current = inner.target.clone();
                            inner.start = inner.target.clone();
                            inner.start_time_nanos = None;
                            inner.velocity = 0.0;
                            finished = inner.on_end.take();
                        } else {
                            schedule_next = true;
                        }
                    }
                }
            }
        }

        if let Some(handler) = finished {
            log::trace!("animatable settled at target");
            handler(AnimationEnd::Finished);
        }
        if schedule_next {
            Self::schedule_frame(this);
        }
    }
}

impl<T: SpringValue + 'static> Clone for Animatable<T> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

#[cfg(test)]
#[path = "tests/animation_tests.rs"]
mod tests;
