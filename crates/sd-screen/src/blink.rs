//! Blink driver — alternately erase and redisplay every tracked fragment.
//!
//! One cycle is two phases. The erase phase blanks each fragment in paint
//! order, parking the cursor on the bottom line after each one; the display
//! phase paints them back the same way. Output is flushed and the driver
//! pauses for `interval` after each phase.
//!
//! The pause doubles as the stop check: it is a `recv_timeout` on a stop
//! channel, so sending `()` (or dropping the sender) ends the loop at the
//! next phase boundary instead of needing the process to be killed.

use std::io::Write;
use std::sync::mpsc::{Receiver, RecvTimeoutError};
use std::time::Duration;

use sd_term::Host;

use crate::error::Result;
use crate::screen::Screen;

/// Default pause between phases.
pub const DEFAULT_INTERVAL: Duration = Duration::from_millis(50);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Blinker {
    interval: Duration,
}

impl Default for Blinker {
    fn default() -> Self {
        Self::new(DEFAULT_INTERVAL)
    }
}

impl Blinker {
    #[must_use]
    pub const fn new(interval: Duration) -> Self {
        Self { interval }
    }

    #[must_use]
    pub const fn interval(&self) -> Duration {
        self.interval
    }

    /// Blink until `stop` receives a message or its sender is dropped.
    /// Returns the number of completed erase/display cycles.
    ///
    /// # Errors
    ///
    /// Returns an error if writing to the screen's output fails.
    pub fn run<W: Write, H: Host>(
        &self,
        screen: &mut Screen<W, H>,
        stop: &Receiver<()>,
    ) -> Result<u64> {
        tracing::debug!(interval = ?self.interval, "blink started");
        let mut cycles = 0;
        loop {
            Self::erase_phase(screen)?;
            if Self::stopped(stop, self.interval) {
                break;
            }
            Self::display_phase(screen)?;
            if Self::stopped(stop, self.interval) {
                break;
            }
            cycles += 1;
        }
        tracing::debug!(cycles, "blink stopped");
        Ok(cycles)
    }

    /// Run exactly `cycles` erase/display cycles, sleeping between phases.
    ///
    /// # Errors
    ///
    /// Returns an error if writing to the screen's output fails.
    pub fn run_cycles<W: Write, H: Host>(
        &self,
        screen: &mut Screen<W, H>,
        cycles: u64,
    ) -> Result<()> {
        for _ in 0..cycles {
            Self::erase_phase(screen)?;
            std::thread::sleep(self.interval);
            Self::display_phase(screen)?;
            std::thread::sleep(self.interval);
        }
        Ok(())
    }

    fn erase_phase<W: Write, H: Host>(screen: &mut Screen<W, H>) -> Result<()> {
        for id in screen.fragment_ids() {
            screen.erase_fragment(id)?;
            screen.reset_cursor()?;
        }
        screen.flush()
    }

    fn display_phase<W: Write, H: Host>(screen: &mut Screen<W, H>) -> Result<()> {
        for id in screen.fragment_ids() {
            screen.display_fragment(id)?;
            screen.reset_cursor()?;
        }
        screen.flush()
    }

    fn stopped(stop: &Receiver<()>, interval: Duration) -> bool {
        match stop.recv_timeout(interval) {
            Ok(()) | Err(RecvTimeoutError::Disconnected) => true,
            Err(RecvTimeoutError::Timeout) => false,
        }
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ScreenConfig;
    use crate::fragment::TextFragment;
    use std::sync::mpsc;

    fn screen() -> Screen<Vec<u8>, sd_term::FixedHost> {
        let config = ScreenConfig::new().with_size(30, 5).in_terminal(false);
        let mut s = Screen::new(Vec::new(), sd_term::FixedHost::new(100, 30), config).unwrap();
        s.add_fragments([TextFragment::new("one", 0, 0), TextFragment::new("two", 5, 2)])
            .unwrap();
        s.output_mut().clear();
        s
    }

    fn output(s: &Screen<Vec<u8>, sd_term::FixedHost>) -> String {
        String::from_utf8(s.output().clone()).unwrap()
    }

    #[test]
    fn default_interval_is_fifty_ms() {
        assert_eq!(Blinker::default().interval(), Duration::from_millis(50));
    }

    #[test]
    fn pending_stop_ends_after_erase_phase() {
        let mut s = screen();
        let (tx, rx) = mpsc::channel();
        tx.send(()).unwrap();
        let cycles = Blinker::new(Duration::from_secs(5)).run(&mut s, &rx).unwrap();
        assert_eq!(cycles, 0);
        let out = output(&s);
        assert!(!out.contains("one"));
        assert!(!out.contains("two"));
        assert!(out.contains("\x1b[1;1H"));
    }

    #[test]
    fn dropped_sender_stops() {
        let mut s = screen();
        let (tx, rx) = mpsc::channel::<()>();
        drop(tx);
        assert_eq!(Blinker::default().run(&mut s, &rx).unwrap(), 0);
    }

    #[test]
    fn stop_from_another_thread() {
        let mut s = screen();
        let (tx, rx) = mpsc::channel();
        let handle = std::thread::spawn(move || {
            std::thread::sleep(Duration::from_millis(30));
            tx.send(()).unwrap();
        });
        Blinker::new(Duration::from_millis(20)).run(&mut s, &rx).unwrap();
        handle.join().unwrap();
        // Whatever phase it stopped in, output alternates erase then display.
        let out = output(&s);
        let first_blank = out.find("   ").unwrap();
        if let Some(first_text) = out.find("one") {
            assert!(first_blank < first_text);
        }
    }

    #[test]
    fn phases_alternate_and_park_cursor() {
        let mut s = screen();
        Blinker::new(Duration::ZERO).run_cycles(&mut s, 1).unwrap();
        let out = output(&s);

        let erase_one = out.find("\x1b[1;1H").unwrap();
        let display_one = out.find("one").unwrap();
        assert!(erase_one < display_one);

        // Cursor returns to the bottom line after every fragment, both phases.
        assert_eq!(out.matches("\x1b[5;1H").count(), 4);
    }

    #[test]
    fn zero_cycles_writes_nothing() {
        let mut s = screen();
        Blinker::default().run_cycles(&mut s, 0).unwrap();
        assert!(s.output().is_empty());
    }
}
