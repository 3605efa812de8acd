use std::{
    io,
    time::{Duration, Instant},
};

use crossterm::event;

use super::event::TuiEvent;

/// Rendering trigger mode.
#[derive(Debug, Clone, Copy, Default)]
pub enum RenderMode {
    /// Render after state changes (tick or crossterm event).
    #[default]
    OnDirty,
    /// Render after state changes, but with minimum interval between renders.
    ///
    /// If events occur faster than the interval, they are batched into one render.
    Throttled(Duration),
}

impl RenderMode {
    /// Creates `Throttled` mode from frame rate (FPS).
    #[must_use]
    pub fn throttled_from_rate(rate: f64) -> Self {
        Self::Throttled(Duration::from_secs_f64(1.0 / rate))
    }
}

/// Event loop state.
///
/// Produces tick and render events on schedule and forwards crossterm events
/// in between. Each tick reports the time elapsed since the previous one, so
/// a slow frame yields a larger delta instead of a lost tick.
#[derive(Debug)]
pub(super) struct EventLoop {
    tick_interval: Option<Duration>,
    render_mode: RenderMode,
    last_tick: Instant,
    last_render: Instant,
    dirty: bool,
}

impl Default for EventLoop {
    fn default() -> Self {
        Self::new(Instant::now())
    }
}

impl EventLoop {
    /// Creates an event loop with ticks disabled and `OnDirty` rendering.
    ///
    /// The first tick comes one interval after `now`; the first render is
    /// due immediately.
    pub(super) fn new(now: Instant) -> Self {
        Self {
            tick_interval: None,
            render_mode: RenderMode::default(),
            last_tick: now,
            last_render: now,
            dirty: true,
        }
    }

    /// Sets the tick interval. `None` disables ticks.
    pub(super) fn set_tick_interval(&mut self, interval: Option<Duration>) {
        self.tick_interval = interval;
    }

    pub(super) fn set_render_mode(&mut self, render_mode: RenderMode) {
        self.render_mode = render_mode;
    }

    /// Returns the next event.
    ///
    /// Blocks until a tick or render is due or a crossterm event arrives.
    pub(super) fn next(&mut self) -> io::Result<TuiEvent> {
        loop {
            let now = Instant::now();
            if let Some(event) = self.due_event(now) {
                return Ok(event);
            }

            if let Some(timeout) = self.compute_timeout(now)
                && !event::poll(timeout)?
            {
                continue;
            }

            self.dirty = true;
            return Ok(TuiEvent::Crossterm(event::read()?));
        }
    }

    /// Returns the tick or render event due at `now`, if any. Ticks win.
    fn due_event(&mut self, now: Instant) -> Option<TuiEvent> {
        if let Some(tick_interval) = self.tick_interval {
            let delta = now.saturating_duration_since(self.last_tick);
            if delta >= tick_interval {
                self.last_tick = now;
                self.dirty = true;
                return Some(TuiEvent::Tick(delta));
            }
        }

        let do_render = match self.render_mode {
            RenderMode::OnDirty => self.dirty,
            RenderMode::Throttled(interval) => {
                self.dirty && now.saturating_duration_since(self.last_render) >= interval
            }
        };
        if do_render {
            self.last_render = now;
            self.dirty = false;
            return Some(TuiEvent::Render);
        }
        None
    }

    fn compute_timeout(&self, now: Instant) -> Option<Duration> {
        let next_tick_at = self.tick_interval.map(|interval| self.last_tick + interval);
        let next_render_at = match self.render_mode {
            RenderMode::OnDirty => self.dirty.then_some(now),
            RenderMode::Throttled(interval) => self.dirty.then(|| self.last_render + interval),
        };
        let next_timeout_at = [next_tick_at, next_render_at].into_iter().flatten().min()?;
        Some(next_timeout_at.saturating_duration_since(now))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const fn ms(millis: u64) -> Duration {
        Duration::from_millis(millis)
    }

    #[test]
    fn test_first_render_is_immediate() {
        let start = Instant::now();
        let mut events = EventLoop::new(start);
        assert!(matches!(events.due_event(start), Some(TuiEvent::Render)));
        assert!(events.due_event(start).is_none());
    }

    #[test]
    fn test_tick_reports_elapsed_time() {
        let start = Instant::now();
        let mut events = EventLoop::new(start);
        events.set_tick_interval(Some(ms(16)));
        events.dirty = false;

        assert!(events.due_event(start + ms(10)).is_none());
        let Some(TuiEvent::Tick(delta)) = events.due_event(start + ms(25)) else {
            panic!("tick should be due");
        };
        assert_eq!(delta, ms(25));

        let Some(TuiEvent::Tick(delta)) = events.due_event(start + ms(41)) else {
            panic!("tick should be due");
        };
        assert_eq!(delta, ms(16));
    }

    #[test]
    fn test_ticks_disabled_by_default() {
        let start = Instant::now();
        let mut events = EventLoop::new(start);
        events.dirty = false;
        assert!(events.due_event(start + Duration::from_secs(10)).is_none());
        assert_eq!(events.compute_timeout(start), None);
    }

    #[test]
    fn test_throttled_render_waits_for_interval() {
        let start = Instant::now();
        let mut events = EventLoop::new(start);
        events.set_render_mode(RenderMode::Throttled(ms(20)));

        assert!(events.due_event(start + ms(5)).is_none());
        assert_eq!(events.compute_timeout(start + ms(5)), Some(ms(15)));
        assert!(matches!(
            events.due_event(start + ms(20)),
            Some(TuiEvent::Render)
        ));
        // Nothing changed since the render.
        assert!(events.due_event(start + ms(60)).is_none());
    }

    #[test]
    fn test_timeout_targets_next_tick() {
        let start = Instant::now();
        let mut events = EventLoop::new(start);
        events.set_tick_interval(Some(ms(16)));
        events.dirty = false;
        assert_eq!(events.compute_timeout(start + ms(6)), Some(ms(10)));
    }
}
