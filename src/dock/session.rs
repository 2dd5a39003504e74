/// Single-flight bookkeeping for one pointer-driven drag.
///
/// A session starts when any drag source reports itself and ends on the first
/// frame where no source does, which covers drop targets that unmounted
/// mid-drag. At most one release action is honored per session per frame, so a
/// duplicate or late drop event is rejected instead of double-applied.
#[derive(Debug, Default)]
pub(crate) struct DragSession {
    next_id: u64,
    active: Option<ActiveSession>,
    observed_this_frame: bool,
}

#[derive(Debug)]
struct ActiveSession {
    id: u64,
    started_frame: u64,
    release_action_frame: Option<u64>,
    last_source: &'static str,
}

impl DragSession {
    pub(crate) fn begin_frame(&mut self) {
        self.observed_this_frame = false;
    }

    #[cfg(test)]
    pub(crate) fn is_active(&self) -> bool {
        self.active.is_some()
    }

    pub(crate) fn observe_active(&mut self, frame: u64, source: &'static str) {
        self.observed_this_frame = true;

        match &mut self.active {
            Some(active) => {
                active.last_source = source;
            }
            None => {
                let id = self.next_id.max(1);
                self.next_id = id.saturating_add(1);
                self.active = Some(ActiveSession {
                    id,
                    started_frame: frame,
                    release_action_frame: None,
                    last_source: source,
                });
                log::debug!("drag session {id} started (source={source})");
            }
        }
    }

    /// Claim the release of the current session. Returns `false` if another
    /// handler already claimed it this frame.
    pub(crate) fn take_release_action(&mut self, frame: u64, kind: &'static str) -> bool {
        let Some(active) = &mut self.active else {
            // A payload-only drag can be cleared before any source observed it
            // this frame; still allow the release to act.
            log::debug!("drag release {kind} with no active session");
            return true;
        };

        if active.release_action_frame == Some(frame) {
            log::debug!("drag session {} ignored duplicate release {kind}", active.id);
            return false;
        }

        active.release_action_frame = Some(frame);
        log::debug!(
            "drag session {} release {kind} (source={})",
            active.id,
            active.last_source
        );
        true
    }

    pub(crate) fn end_frame(&mut self, frame: u64) {
        if self.active.is_some() && !self.observed_this_frame {
            if let Some(ended) = self.active.take() {
                log::debug!(
                    "drag session {} ended (frames {}..{frame})",
                    ended.id,
                    ended.started_frame
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duplicate_release_in_same_frame_is_rejected() {
        let mut session = DragSession::default();
        session.begin_frame();
        session.observe_active(1, "tab");
        assert!(session.take_release_action(1, "drop"));
        assert!(!session.take_release_action(1, "drop"));
    }

    #[test]
    fn session_ends_when_no_source_observes_it() {
        let mut session = DragSession::default();
        session.begin_frame();
        session.observe_active(1, "tab");
        session.end_frame(1);
        assert!(session.is_active());

        // Next frame, nothing observes the drag: global cleanup kicks in.
        session.begin_frame();
        session.end_frame(2);
        assert!(!session.is_active());
    }

    #[test]
    fn release_without_session_is_allowed() {
        let mut session = DragSession::default();
        session.begin_frame();
        assert!(session.take_release_action(1, "drop"));
    }
}
