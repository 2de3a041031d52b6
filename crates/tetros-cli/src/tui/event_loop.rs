use std::{
    io,
    time::{Duration, Instant},
};

use crossterm::event;

use crate::tui::event::TuiEvent;

/// Fixed-rate tick source that also reports when a redraw is due.
///
/// Ticks are emitted every `tick_interval`. Every tick and every terminal
/// event marks the screen dirty; a render event follows as soon as nothing
/// more urgent is pending.
#[derive(Debug)]
pub(super) struct EventLoop {
    tick_interval: Duration,
    last_tick: Instant,
    dirty: bool,
}

impl EventLoop {
    pub(super) fn new(tick_interval: Duration) -> Self {
        let now = Instant::now();
        Self {
            tick_interval,
            // First tick is due immediately.
            last_tick: now.checked_sub(tick_interval).unwrap_or(now),
            dirty: true,
        }
    }

    pub(super) fn set_tick_interval(&mut self, interval: Duration) {
        self.tick_interval = interval;
    }

    /// Blocks until the next tick, render or terminal event.
    pub(super) fn next(&mut self) -> io::Result<TuiEvent> {
        loop {
            let now = Instant::now();
            if now.duration_since(self.last_tick) >= self.tick_interval {
                self.last_tick = now;
                self.dirty = true;
                return Ok(TuiEvent::Tick);
            }

            if self.dirty {
                self.dirty = false;
                return Ok(TuiEvent::Render);
            }

            if !event::poll(self.time_to_next_tick(now))? {
                continue;
            }

            self.dirty = true;
            return Ok(event::read()?.into());
        }
    }

    fn time_to_next_tick(&self, now: Instant) -> Duration {
        (self.last_tick + self.tick_interval).saturating_duration_since(now)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_tick_is_due_immediately() {
        let events = EventLoop::new(Duration::from_millis(33));
        assert_eq!(events.time_to_next_tick(Instant::now()), Duration::ZERO);
    }

    #[test]
    fn test_wait_until_next_tick() {
        let mut events = EventLoop::new(Duration::from_millis(100));
        let now = Instant::now();
        events.last_tick = now;
        assert_eq!(events.time_to_next_tick(now), Duration::from_millis(100));
        assert_eq!(
            events.time_to_next_tick(now + Duration::from_millis(40)),
            Duration::from_millis(60)
        );
        assert_eq!(
            events.time_to_next_tick(now + Duration::from_millis(250)),
            Duration::ZERO
        );
    }
}
