//! Rotating banner: fetches slides once, then cycles them on a countdown
//! with a cross-fade between slides and manual jumps from navigation dots.
//!
//! Time only moves when the owner calls [`Rotator::advance`], so the frame
//! loop and the tests drive the same clock. Timers are plain values owned by
//! the rotator; [`Rotator::unmount`] drops them together with the pending
//! fetch and nothing can fire afterwards.

use std::sync::Arc;
use std::time::Duration;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::constants::*;
use crate::error::{FetchError, RotatorError};
use crate::pending::{Pending, Poll};
use crate::slide::Slide;
use crate::source::SlideSource;
use crate::state::RotatorState;

/// How the next slide is chosen when the countdown runs out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum AdvancePolicy {
    /// `(index + 1) % len`
    #[default]
    Sequential,
    /// Uniformly random index other than the current one
    Random,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RotatorConfig {
    pub fallback_title: String,
    pub slide_duration_secs: u32,
    pub fade_delay_ms: u64,
    pub advance_policy: AdvancePolicy,
    /// Whether clicking a dot restarts the countdown from the full duration
    pub reset_countdown_on_jump: bool,
    /// Freeze the countdown while the pointer is over the banner
    pub pause_on_hover: bool,
    /// Show the fallback title in place of a missing subtitle
    pub subtitle_fallback: bool,
}

impl Default for RotatorConfig {
    fn default() -> Self {
        Self {
            fallback_title: DEFAULT_FALLBACK_TITLE.to_string(),
            slide_duration_secs: DEFAULT_SLIDE_DURATION_SECS,
            fade_delay_ms: DEFAULT_FADE_DELAY_MS,
            advance_policy: AdvancePolicy::default(),
            reset_countdown_on_jump: false,
            pause_on_hover: false,
            subtitle_fallback: true,
        }
    }
}

impl RotatorConfig {
    pub fn fade_delay(&self) -> Duration {
        Duration::from_millis(self.fade_delay_ms)
    }

    fn duration_secs(&self) -> u32 {
        self.slide_duration_secs.max(1)
    }
}

struct Timer {
    period: Duration,
    elapsed: Duration,
}

impl Timer {
    fn new(period: Duration) -> Self {
        Self { period, elapsed: Duration::ZERO }
    }

    fn until_due(&self) -> Duration {
        self.period.saturating_sub(self.elapsed)
    }

    fn elapse(&mut self, dt: Duration) {
        self.elapsed = (self.elapsed + dt).min(self.period);
    }

    fn is_due(&self) -> bool {
        self.elapsed >= self.period
    }

    fn progress(&self) -> f32 {
        if self.period.is_zero() {
            1.0
        } else {
            (self.elapsed.as_secs_f32() / self.period.as_secs_f32()).min(1.0)
        }
    }
}

type FetchResult = Result<Vec<Slide>, FetchError>;

pub struct Rotator {
    config: RotatorConfig,
    state: RotatorState,
    slides: Vec<Slide>,
    current_index: usize,
    remaining_secs: u32,

    ticker: Option<Timer>, // repeating countdown tick
    fade: Option<Timer>,   // one-shot, runs while Transitioning
    pending: Option<Pending<FetchResult>>,

    hovered: bool,
    shown_for: Duration, // time since the current slide was presented
    completed_transitions: u64,
    rng: StdRng,
}

/// What to draw this frame.
#[derive(Debug, PartialEq)]
pub enum BannerView<'a> {
    Loading,
    Fallback { title: &'a str },
    Slide(SlideView<'a>),
    Unmounted,
}

#[derive(Debug, PartialEq)]
pub struct SlideView<'a> {
    pub slide: &'a Slide,
    pub heading: &'a str,
    pub caption: Option<&'a str>,
    pub index: usize,
    pub count: usize,
    /// Seconds left on the countdown; `None` when not rotating
    pub countdown: Option<u32>,
    pub transitioning: bool,
    pub opacity: f32,
}

impl SlideView<'_> {
    pub fn shows_navigation(&self) -> bool {
        self.count > 1
    }
}

impl Rotator {
    fn blank(config: RotatorConfig) -> Self {
        let remaining_secs = config.duration_secs();
        let shown_for = config.fade_delay();
        Self {
            config,
            state: RotatorState::Loading,
            slides: Vec::new(),
            current_index: 0,
            remaining_secs,
            ticker: None,
            fade: None,
            pending: None,
            hovered: false,
            shown_for,
            completed_transitions: 0,
            rng: StdRng::from_rng(&mut rand::rng()),
        }
    }

    /// Start loading: the fetch runs on a worker thread and the rotator
    /// reports `Loading` until a later `advance` picks up the result.
    pub fn mount(source: Arc<dyn SlideSource>, config: RotatorConfig) -> Self {
        if config.slide_duration_secs == 0 {
            warn!("Slide duration of 0 seconds, using 1");
        }
        let mut rotator = Self::blank(config);
        rotator.start_fetch(source);
        rotator
    }

    /// A rotator whose slides are already known.
    pub fn from_slides(slides: Vec<Slide>, config: RotatorConfig) -> Self {
        let mut rotator = Self::blank(config);
        rotator.apply_slides(slides);
        rotator
    }

    /// Deterministic random advance policy.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = StdRng::seed_from_u64(seed);
        self
    }

    fn start_fetch(&mut self, source: Arc<dyn SlideSource>) {
        info!("Fetching slides from {}", source.describe());
        self.pending = Some(Pending::spawn("slide-fetch", move || source.fetch()));
    }

    /// Pick up a finished fetch. Returns whether it settled on this call.
    fn poll_fetch(&mut self) -> bool {
        let Some(pending) = &self.pending else {
            return false;
        };
        let outcome = match pending.poll() {
            Poll::Waiting => return false,
            Poll::Ready(outcome) => outcome,
            Poll::Lost => Err(FetchError::WorkerLost),
        };
        self.pending = None;
        self.resolve(outcome);
        true
    }

    /// Block until the fetch settles or `timeout` passes. Returns whether the
    /// rotator has left `Loading`.
    pub fn block_until_loaded(&mut self, timeout: Duration) -> bool {
        if let Some(pending) = &self.pending {
            let outcome = match pending.wait(timeout) {
                Poll::Waiting => return false,
                Poll::Ready(outcome) => outcome,
                Poll::Lost => Err(FetchError::WorkerLost),
            };
            self.pending = None;
            self.resolve(outcome);
        }
        self.state != RotatorState::Loading
    }

    fn resolve(&mut self, outcome: FetchResult) {
        match outcome {
            Ok(slides) => self.apply_slides(slides),
            Err(e) => {
                warn!("Failed to fetch banners: {}", e);
                self.apply_slides(Vec::new());
            }
        }
    }

    fn apply_slides(&mut self, slides: Vec<Slide>) {
        info!("Loaded {} slides", slides.len());
        self.slides = slides;
        self.current_index = 0;
        self.remaining_secs = self.config.duration_secs();
        self.fade = None;
        self.shown_for = self.config.fade_delay();
        (self.state, self.ticker) = match self.slides.len() {
            0 => (RotatorState::Fallback, None),
            1 => (RotatorState::Static, None),
            _ => (RotatorState::Displaying, Some(Timer::new(TICK_INTERVAL))),
        };
    }

    /// Move the clock forward, firing every timer that falls due in order.
    pub fn advance(&mut self, dt: Duration) {
        if self.state == RotatorState::Unmounted {
            return;
        }
        // The frame that delivers the slides does not count against the first one
        if self.poll_fetch() {
            return;
        }

        let mut left = dt;
        while let Some(due) = self.next_deadline() {
            if due > left {
                break;
            }
            self.elapse(due);
            left -= due;
            self.fire_due();
        }
        self.elapse(left);
    }

    fn tick_paused(&self) -> bool {
        self.config.pause_on_hover && self.hovered
    }

    fn next_deadline(&self) -> Option<Duration> {
        let tick = self
            .ticker
            .as_ref()
            .filter(|_| !self.tick_paused())
            .map(Timer::until_due);
        let fade = self.fade.as_ref().map(Timer::until_due);
        match (tick, fade) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        }
    }

    fn elapse(&mut self, dt: Duration) {
        let paused = self.tick_paused();
        if let Some(ticker) = self.ticker.as_mut().filter(|_| !paused) {
            ticker.elapse(dt);
        }
        if let Some(fade) = self.fade.as_mut() {
            fade.elapse(dt);
        }
        self.shown_for = self.shown_for.saturating_add(dt);
    }

    fn fire_due(&mut self) {
        if self.fade.as_ref().is_some_and(Timer::is_due) {
            self.complete_transition();
        } else if let Some(ticker) = self.ticker.as_mut().filter(|t| t.is_due()) {
            ticker.elapsed = Duration::ZERO;
            self.on_tick();
        }
    }

    fn on_tick(&mut self) {
        if self.remaining_secs <= 1 {
            self.begin_transition();
        } else {
            self.remaining_secs -= 1;
        }
    }

    fn begin_transition(&mut self) {
        debug!("Fading out slide {}", self.current_index);
        self.state = RotatorState::Transitioning;
        self.remaining_secs = self.config.duration_secs();
        self.ticker = None;
        self.fade = Some(Timer::new(self.config.fade_delay()));
    }

    fn complete_transition(&mut self) {
        let next = self.next_index();
        debug!("Showing slide {} (was {})", next, self.current_index);
        self.fade = None;
        self.current_index = next;
        self.state = RotatorState::Displaying;
        self.remaining_secs = self.config.duration_secs();
        self.ticker = Some(Timer::new(TICK_INTERVAL));
        self.shown_for = Duration::ZERO;
        self.completed_transitions += 1;
    }

    fn next_index(&mut self) -> usize {
        let len = self.slides.len();
        if len < 2 {
            return 0;
        }
        match self.config.advance_policy {
            AdvancePolicy::Sequential => (self.current_index + 1) % len,
            AdvancePolicy::Random => {
                // Draw from the other len - 1 slots
                let pick = self.rng.random_range(0..len - 1);
                if pick >= self.current_index { pick + 1 } else { pick }
            }
        }
    }

    /// Show slide `index` now. A jump to another slide, or any jump during
    /// a fade, cancels the fade and restarts the tick phase. The countdown
    /// value is only reset when `reset_countdown_on_jump` is set.
    pub fn jump_to(&mut self, index: usize) -> Result<(), RotatorError> {
        if self.state == RotatorState::Unmounted {
            return Err(RotatorError::Unmounted);
        }
        if index >= self.slides.len() {
            return Err(RotatorError::IndexOutOfRange { index, len: self.slides.len() });
        }
        if !self.state.is_rotating() {
            return Ok(());
        }

        let transitioning = self.state == RotatorState::Transitioning;
        if index == self.current_index && !transitioning && !self.config.reset_countdown_on_jump {
            return Ok(());
        }

        debug!("Jumping to slide {} (was {})", index, self.current_index);
        self.fade = None;
        self.current_index = index;
        self.state = RotatorState::Displaying;
        self.ticker = Some(Timer::new(TICK_INTERVAL));
        if self.config.reset_countdown_on_jump {
            self.remaining_secs = self.config.duration_secs();
        }
        self.shown_for = self.config.fade_delay();
        Ok(())
    }

    /// Step to the following slide, wrapping after the last. Same rules as
    /// [`Rotator::jump_to`]; a no-op while there are no slides.
    pub fn next(&mut self) -> Result<(), RotatorError> {
        self.step_by(1)
    }

    /// Step to the preceding slide, wrapping before the first.
    pub fn previous(&mut self) -> Result<(), RotatorError> {
        self.step_by(-1)
    }

    fn step_by(&mut self, offset: isize) -> Result<(), RotatorError> {
        if self.state == RotatorState::Unmounted {
            return Err(RotatorError::Unmounted);
        }
        let len = self.slides.len();
        if len == 0 {
            return Ok(());
        }
        let target = (self.current_index as isize + offset).rem_euclid(len as isize) as usize;
        self.jump_to(target)
    }

    pub fn set_hovered(&mut self, hovered: bool) {
        if self.hovered != hovered && self.config.pause_on_hover {
            debug!("Countdown {}", if hovered { "paused" } else { "resumed" });
        }
        self.hovered = hovered;
    }

    /// Cancel every timer and discard the pending fetch. Idempotent.
    pub fn unmount(&mut self) {
        if self.state == RotatorState::Unmounted {
            return;
        }
        info!("Unmounting banner");
        self.state = RotatorState::Unmounted;
        self.ticker = None;
        self.fade = None;
        self.pending = None;
    }

    /// Tear down and fetch again from a new source.
    pub fn remount(&mut self, source: Arc<dyn SlideSource>) {
        self.unmount();
        let rng = std::mem::replace(&mut self.rng, StdRng::seed_from_u64(0));
        *self = Self { rng, ..Self::blank(self.config.clone()) };
        self.start_fetch(source);
    }

    pub fn state(&self) -> RotatorState {
        self.state
    }

    pub fn config(&self) -> &RotatorConfig {
        &self.config
    }

    pub fn slides(&self) -> &[Slide] {
        &self.slides
    }

    pub fn current_index(&self) -> Option<usize> {
        (!self.slides.is_empty()).then_some(self.current_index)
    }

    pub fn remaining_secs(&self) -> Option<u32> {
        self.state.is_rotating().then_some(self.remaining_secs)
    }

    pub fn is_transitioning(&self) -> bool {
        self.state == RotatorState::Transitioning
    }

    pub fn completed_transitions(&self) -> u64 {
        self.completed_transitions
    }

    /// Slide opacity: fades out across the fade window, back in after the
    /// next slide is presented.
    pub fn opacity(&self) -> f32 {
        match self.state {
            RotatorState::Transitioning => {
                1.0 - self.fade.as_ref().map_or(1.0, Timer::progress)
            }
            RotatorState::Displaying | RotatorState::Static => {
                let fade = self.config.fade_delay();
                if fade.is_zero() {
                    1.0
                } else {
                    (self.shown_for.as_secs_f32() / fade.as_secs_f32()).min(1.0)
                }
            }
            _ => 1.0,
        }
    }

    pub fn view(&self) -> BannerView<'_> {
        let fallback_title = self.config.fallback_title.as_str();
        match self.state {
            RotatorState::Loading => BannerView::Loading,
            RotatorState::Unmounted => BannerView::Unmounted,
            RotatorState::Fallback => BannerView::Fallback { title: fallback_title },
            RotatorState::Static | RotatorState::Displaying | RotatorState::Transitioning => {
                let slide = &self.slides[self.current_index];
                BannerView::Slide(SlideView {
                    slide,
                    heading: slide.heading(fallback_title),
                    caption: slide
                        .caption()
                        .or(self.config.subtitle_fallback.then_some(fallback_title)),
                    index: self.current_index,
                    count: self.slides.len(),
                    countdown: self.remaining_secs(),
                    transitioning: self.is_transitioning(),
                    opacity: self.opacity(),
                })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn slides(n: usize) -> Vec<Slide> {
        (0..n).map(|i| Slide::new(format!("{i}.jpg")).with_title(format!("Slide {i}"))).collect()
    }

    fn ms(millis: u64) -> Duration {
        Duration::from_millis(millis)
    }

    #[test]
    fn countdown_steps_down_once_per_second() {
        let mut rotator = Rotator::from_slides(slides(3), RotatorConfig::default());
        assert_eq!(rotator.remaining_secs(), Some(4));
        rotator.advance(ms(999));
        assert_eq!(rotator.remaining_secs(), Some(4));
        rotator.advance(ms(1));
        assert_eq!(rotator.remaining_secs(), Some(3));
        rotator.advance(ms(2000));
        assert_eq!(rotator.remaining_secs(), Some(1));
        assert!(!rotator.is_transitioning());
    }

    #[test]
    fn large_step_fires_timers_in_order() {
        let mut rotator = Rotator::from_slides(slides(3), RotatorConfig::default());
        // Two full cycles of 4 s countdown + 0.5 s fade
        rotator.advance(ms(9000));
        assert_eq!(rotator.completed_transitions(), 2);
        assert_eq!(rotator.current_index(), Some(2));
        assert_eq!(rotator.remaining_secs(), Some(4));
    }

    #[test]
    fn next_transition_starts_a_full_cadence_after_presentation() {
        let mut rotator = Rotator::from_slides(slides(3), RotatorConfig::default());
        rotator.advance(ms(4500));
        assert_eq!(rotator.current_index(), Some(1));
        rotator.advance(ms(3999));
        assert!(!rotator.is_transitioning());
        rotator.advance(ms(1));
        assert!(rotator.is_transitioning());
    }

    #[test]
    fn tick_is_suspended_during_fade() {
        let config = RotatorConfig { fade_delay_ms: 2500, ..RotatorConfig::default() };
        let mut rotator = Rotator::from_slides(slides(2), config);
        rotator.advance(ms(4000));
        assert!(rotator.is_transitioning());
        rotator.advance(ms(2000));
        assert!(rotator.is_transitioning());
        assert_eq!(rotator.remaining_secs(), Some(4));
        rotator.advance(ms(500));
        assert_eq!(rotator.current_index(), Some(1));
        assert_eq!(rotator.completed_transitions(), 1);
    }

    #[test]
    fn zero_fade_swaps_on_the_same_tick() {
        let config = RotatorConfig { fade_delay_ms: 0, ..RotatorConfig::default() };
        let mut rotator = Rotator::from_slides(slides(2), config);
        rotator.advance(ms(4000));
        assert_eq!(rotator.current_index(), Some(1));
        assert!(!rotator.is_transitioning());
        assert_eq!(rotator.opacity(), 1.0);
    }

    #[test]
    fn zero_duration_behaves_as_one_second() {
        let config = RotatorConfig { slide_duration_secs: 0, ..RotatorConfig::default() };
        let mut rotator = Rotator::from_slides(slides(2), config);
        assert_eq!(rotator.remaining_secs(), Some(1));
        rotator.advance(ms(1500));
        assert_eq!(rotator.current_index(), Some(1));
    }

    #[test]
    fn random_policy_never_repeats_the_current_slide() {
        let config = RotatorConfig { advance_policy: AdvancePolicy::Random, ..RotatorConfig::default() };
        let mut rotator = Rotator::from_slides(slides(4), config).with_seed(7);
        let mut seen = [false; 4];
        let mut previous = 0;
        for _ in 0..200 {
            rotator.advance(ms(4500));
            let current = rotator.current_index().unwrap();
            assert_ne!(current, previous);
            seen[current] = true;
            previous = current;
        }
        assert!(seen.iter().all(|&s| s));
    }

    #[test]
    fn random_policy_with_two_slides_alternates() {
        let config = RotatorConfig { advance_policy: AdvancePolicy::Random, ..RotatorConfig::default() };
        let mut rotator = Rotator::from_slides(slides(2), config).with_seed(1);
        for expected in [1, 0, 1, 0] {
            rotator.advance(ms(4500));
            assert_eq!(rotator.current_index(), Some(expected));
        }
    }

    #[test]
    fn opacity_fades_out_then_in() {
        let mut rotator = Rotator::from_slides(slides(2), RotatorConfig::default());
        assert_eq!(rotator.opacity(), 1.0);
        rotator.advance(ms(4250));
        assert!((rotator.opacity() - 0.5).abs() < 0.01);
        rotator.advance(ms(250));
        assert_eq!(rotator.opacity(), 0.0);
        rotator.advance(ms(250));
        assert!((rotator.opacity() - 0.5).abs() < 0.01);
        rotator.advance(ms(250));
        assert_eq!(rotator.opacity(), 1.0);
    }

    #[test]
    fn hover_pauses_countdown_only_when_enabled() {
        let config = RotatorConfig { pause_on_hover: true, ..RotatorConfig::default() };
        let mut paused = Rotator::from_slides(slides(2), config);
        paused.set_hovered(true);
        paused.advance(ms(10000));
        assert_eq!(paused.remaining_secs(), Some(4));
        paused.set_hovered(false);
        paused.advance(ms(1000));
        assert_eq!(paused.remaining_secs(), Some(3));

        let mut running = Rotator::from_slides(slides(2), RotatorConfig::default());
        running.set_hovered(true);
        running.advance(ms(1000));
        assert_eq!(running.remaining_secs(), Some(3));
    }

    #[test]
    fn hover_does_not_stall_an_active_fade() {
        let config = RotatorConfig { pause_on_hover: true, ..RotatorConfig::default() };
        let mut rotator = Rotator::from_slides(slides(2), config);
        rotator.advance(ms(4000));
        rotator.set_hovered(true);
        rotator.advance(ms(500));
        assert_eq!(rotator.current_index(), Some(1));
        rotator.advance(ms(5000));
        assert_eq!(rotator.current_index(), Some(1));
        assert_eq!(rotator.remaining_secs(), Some(4));
    }

    #[test]
    fn jump_during_fade_cancels_it() {
        let mut rotator = Rotator::from_slides(slides(3), RotatorConfig::default());
        rotator.advance(ms(4200));
        assert!(rotator.is_transitioning());
        rotator.jump_to(2).unwrap();
        assert!(!rotator.is_transitioning());
        assert_eq!(rotator.current_index(), Some(2));
        rotator.advance(ms(500));
        // The cancelled fade must not advance past the chosen slide
        assert_eq!(rotator.current_index(), Some(2));
        assert_eq!(rotator.completed_transitions(), 0);
    }

    #[test]
    fn jump_restarts_tick_phase() {
        let mut rotator = Rotator::from_slides(slides(3), RotatorConfig::default());
        rotator.advance(ms(1700));
        assert_eq!(rotator.remaining_secs(), Some(3));
        rotator.jump_to(1).unwrap();
        rotator.advance(ms(500));
        assert_eq!(rotator.remaining_secs(), Some(3));
        rotator.advance(ms(500));
        assert_eq!(rotator.remaining_secs(), Some(2));
    }

    #[test]
    fn jump_to_current_slide_is_a_no_op_without_reset() {
        let mut rotator = Rotator::from_slides(slides(3), RotatorConfig::default());
        rotator.advance(ms(1700));
        rotator.jump_to(0).unwrap();
        rotator.advance(ms(300));
        assert_eq!(rotator.remaining_secs(), Some(2));
    }

    #[test]
    fn next_wraps_after_the_last_slide() {
        let mut rotator = Rotator::from_slides(slides(3), RotatorConfig::default());
        rotator.jump_to(2).unwrap();
        rotator.next().unwrap();
        assert_eq!(rotator.current_index(), Some(0));
        rotator.next().unwrap();
        assert_eq!(rotator.current_index(), Some(1));
    }

    #[test]
    fn previous_wraps_before_the_first_slide() {
        let mut rotator = Rotator::from_slides(slides(3), RotatorConfig::default());
        rotator.previous().unwrap();
        assert_eq!(rotator.current_index(), Some(2));
        rotator.previous().unwrap();
        assert_eq!(rotator.current_index(), Some(1));
    }

    #[test]
    fn stepping_restarts_the_tick_phase_and_cancels_a_fade() {
        let mut rotator = Rotator::from_slides(slides(3), RotatorConfig::default());
        rotator.advance(ms(4200));
        assert!(rotator.is_transitioning());
        rotator.previous().unwrap();
        assert!(!rotator.is_transitioning());
        assert_eq!(rotator.current_index(), Some(2));
        rotator.advance(ms(999));
        assert_eq!(rotator.remaining_secs(), Some(4));
        rotator.advance(ms(1));
        assert_eq!(rotator.remaining_secs(), Some(3));
    }

    #[test]
    fn stepping_without_slides_is_a_no_op() {
        let mut empty = Rotator::from_slides(Vec::new(), RotatorConfig::default());
        assert_eq!(empty.next(), Ok(()));
        assert_eq!(empty.previous(), Ok(()));
        assert_eq!(empty.state(), RotatorState::Fallback);

        let mut single = Rotator::from_slides(slides(1), RotatorConfig::default());
        assert_eq!(single.next(), Ok(()));
        assert_eq!(single.current_index(), Some(0));

        single.unmount();
        assert_eq!(single.next(), Err(RotatorError::Unmounted));
    }

    #[test]
    fn missing_subtitle_uses_fallback_title_unless_disabled() {
        let bare = vec![Slide::new("a.jpg"), Slide::new("b.jpg").with_subtitle("Own caption")];
        let rotator = Rotator::from_slides(bare.clone(), RotatorConfig::default());
        let BannerView::Slide(view) = rotator.view() else {
            panic!("expected a slide view");
        };
        assert_eq!(view.caption, Some(DEFAULT_FALLBACK_TITLE));

        let config = RotatorConfig { subtitle_fallback: false, ..RotatorConfig::default() };
        let mut rotator = Rotator::from_slides(bare, config);
        let BannerView::Slide(view) = rotator.view() else {
            panic!("expected a slide view");
        };
        assert_eq!(view.caption, None);
        rotator.next().unwrap();
        let BannerView::Slide(view) = rotator.view() else {
            panic!("expected a slide view");
        };
        assert_eq!(view.caption, Some("Own caption"));
    }

    #[test]
    fn remount_fetches_again() {
        let mut rotator = Rotator::from_slides(slides(2), RotatorConfig::default());
        rotator.advance(ms(2000));
        let source: Arc<dyn SlideSource> = Arc::new(|| -> FetchResult { Ok(slides(5)) });
        rotator.remount(source);
        assert_eq!(rotator.state(), RotatorState::Loading);
        assert!(rotator.block_until_loaded(Duration::from_secs(5)));
        assert_eq!(rotator.slides().len(), 5);
        assert_eq!(rotator.current_index(), Some(0));
        assert_eq!(rotator.remaining_secs(), Some(4));
    }

    #[test]
    fn config_uses_lowercase_policy_names() {
        let config: RotatorConfig = toml::from_str("advance_policy = \"random\"").unwrap();
        assert_eq!(config.advance_policy, AdvancePolicy::Random);
        assert_eq!(config.slide_duration_secs, DEFAULT_SLIDE_DURATION_SECS);
    }
}
