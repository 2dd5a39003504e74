use egui::Vec2;

/// Responsive width class derived from the debounced viewport width.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum Breakpoint {
    Compact,
    Medium,
    Wide,
    Ultra,
}

impl Breakpoint {
    pub fn from_width(width: f32) -> Self {
        if width < 640.0 {
            Self::Compact
        } else if width < 1024.0 {
            Self::Medium
        } else if width < 1440.0 {
            Self::Wide
        } else {
            Self::Ultra
        }
    }
}

/// Observes the host viewport size and commits it only after it has been
/// stable for the debounce window. A plain value type driven by the caller's
/// clock, so there is nothing to tear down.
#[derive(Debug)]
pub struct ViewportMonitor {
    debounce_secs: f64,
    committed: Option<Vec2>,
    pending: Option<(Vec2, f64)>,
}

impl ViewportMonitor {
    pub fn new(debounce_secs: f64) -> Self {
        Self {
            debounce_secs,
            committed: None,
            pending: None,
        }
    }

    /// Feed the current size. Returns the committed size when a debounced
    /// change settles, at most once per settle.
    pub fn observe(&mut self, size: Vec2, now: f64) -> Option<Vec2> {
        if self.committed.is_none() {
            // First observation: commit immediately so the breakpoint is
            // available on the very first frame.
            self.committed = Some(size);
            return Some(size);
        }
        if self.committed == Some(size) {
            self.pending = None;
            return None;
        }

        match self.pending {
            Some((pending, since)) if pending == size => {
                if now - since >= self.debounce_secs {
                    self.pending = None;
                    self.committed = Some(size);
                    Some(size)
                } else {
                    None
                }
            }
            _ => {
                self.pending = Some((size, now));
                None
            }
        }
    }

    pub fn size(&self) -> Option<Vec2> {
        self.committed
    }

    pub fn breakpoint(&self) -> Option<Breakpoint> {
        self.committed.map(|s| Breakpoint::from_width(s.x))
    }
}

impl Default for ViewportMonitor {
    fn default() -> Self {
        Self::new(0.08)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use egui::vec2;

    #[test]
    fn first_observation_commits_immediately() {
        let mut monitor = ViewportMonitor::new(0.08);
        assert_eq!(monitor.observe(vec2(800.0, 600.0), 0.0), Some(vec2(800.0, 600.0)));
        assert_eq!(monitor.breakpoint(), Some(Breakpoint::Medium));
    }

    #[test]
    fn resize_commits_only_after_debounce_window() {
        let mut monitor = ViewportMonitor::new(0.08);
        monitor.observe(vec2(800.0, 600.0), 0.0);

        assert_eq!(monitor.observe(vec2(1600.0, 900.0), 0.10), None);
        assert_eq!(monitor.observe(vec2(1600.0, 900.0), 0.15), None);
        assert_eq!(
            monitor.observe(vec2(1600.0, 900.0), 0.20),
            Some(vec2(1600.0, 900.0))
        );
        assert_eq!(monitor.breakpoint(), Some(Breakpoint::Ultra));

        // Settled: no repeat commit.
        assert_eq!(monitor.observe(vec2(1600.0, 900.0), 0.30), None);
    }

    #[test]
    fn oscillating_size_restarts_the_window() {
        let mut monitor = ViewportMonitor::new(0.08);
        monitor.observe(vec2(800.0, 600.0), 0.0);

        assert_eq!(monitor.observe(vec2(900.0, 600.0), 0.10), None);
        assert_eq!(monitor.observe(vec2(950.0, 600.0), 0.15), None);
        // The 950 change restarted the clock; not yet stable at 0.20.
        assert_eq!(monitor.observe(vec2(950.0, 600.0), 0.20), None);
        assert_eq!(
            monitor.observe(vec2(950.0, 600.0), 0.24),
            Some(vec2(950.0, 600.0))
        );
    }

    #[test]
    fn breakpoints_cover_the_catalogued_widths() {
        assert_eq!(Breakpoint::from_width(320.0), Breakpoint::Compact);
        assert_eq!(Breakpoint::from_width(640.0), Breakpoint::Medium);
        assert_eq!(Breakpoint::from_width(1024.0), Breakpoint::Wide);
        assert_eq!(Breakpoint::from_width(1440.0), Breakpoint::Ultra);
    }
}
