use leptos::ev;
use leptos::prelude::*;
use leptos_dom::helpers::{window_event_listener, WindowListenerHandle};
use wasm_bindgen::JsCast;

pub(crate) const AUTOSAVE_DELAY_MS: i32 = 1000;

/// Save bookkeeping for one editing session, independent of timers.
///
/// Nothing is saved until the user has changed something since load (`armed`).
/// Every change bumps `generation`; a debounce timer only fires a save if no
/// newer change arrived while it was waiting.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub(crate) struct SaveGate {
    armed: bool,
    pending: bool,
    generation: u64,
}

impl SaveGate {
    pub fn user_changed(&mut self) -> u64 {
        self.armed = true;
        self.pending = true;
        self.generation += 1;
        self.generation
    }

    /// Debounce timer for `generation` elapsed. True when a save should go out now.
    pub fn take_due(&mut self, generation: u64) -> bool {
        if generation != self.generation {
            return false;
        }
        self.take_pending()
    }

    /// Explicit "save now"; skips the wait but still needs a pending change.
    pub fn take_pending(&mut self) -> bool {
        if !(self.armed && self.pending) {
            return false;
        }
        self.pending = false;
        true
    }

    pub fn has_pending(&self) -> bool {
        self.pending
    }

    /// New page loaded: back to the suppressed state.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// Debounced autosave for the page editor.
///
/// Responsibilities:
/// - coalesce bursts of edits into one save after `delay_ms` of quiet
/// - suppress saves until the first user change of the session
/// - best-effort flush of a pending save on `pagehide`
#[derive(Clone, Copy)]
pub(crate) struct AutosaveController {
    gate: StoredValue<SaveGate>,
    timer_id: StoredValue<Option<i32>>,
    delay_ms: i32,
    save: Callback<()>,
    _pagehide_handle: StoredValue<Option<WindowListenerHandle>>,
}

impl AutosaveController {
    pub fn new(delay_ms: i32, save: Callback<()>) -> Self {
        let s = Self {
            gate: StoredValue::new(SaveGate::default()),
            timer_id: StoredValue::new(None),
            delay_ms,
            save,
            _pagehide_handle: StoredValue::new(None),
        };

        let s2 = s;
        let pagehide =
            window_event_listener(ev::pagehide, move |_ev: web_sys::PageTransitionEvent| {
                s2.flush_now();
            });
        s._pagehide_handle.set_value(Some(pagehide));

        s
    }

    /// Called for every user-initiated change (block edit, reorder, insert, title).
    pub fn on_user_change(&self) {
        let Some(generation) = self.gate.try_update_value(|g| g.user_changed()) else {
            return;
        };
        self.restart_timer(generation);
    }

    pub fn flush_now(&self) {
        self.clear_timer();
        let due = self
            .gate
            .try_update_value(|g| g.take_pending())
            .unwrap_or(false);
        if due {
            self.save.run(());
        }
    }

    /// Another page was loaded into the same editor.
    pub fn reset(&self) {
        self.clear_timer();
        self.gate.update_value(|g| g.reset());
    }

    pub fn has_pending(&self) -> bool {
        self.gate.with_value(|g| g.has_pending())
    }

    pub fn dispose(&self) {
        self.clear_timer();
        if let Some(Some(handle)) = self._pagehide_handle.try_update_value(|h| h.take()) {
            handle.remove();
        }
    }

    fn fire(&self, generation: u64) {
        let _ = self.timer_id.try_update_value(|t| *t = None);
        let due = self
            .gate
            .try_update_value(|g| g.take_due(generation))
            .unwrap_or(false);
        if due {
            self.save.run(());
        }
    }

    fn clear_timer(&self) {
        let Some(win) = web_sys::window() else {
            return;
        };
        if let Some(Some(tid)) = self.timer_id.try_update_value(|t| t.take()) {
            win.clear_timeout_with_handle(tid);
        }
    }

    fn restart_timer(&self, generation: u64) {
        self.clear_timer();

        let Some(win) = web_sys::window() else {
            return;
        };

        let s2 = *self;
        let cb = wasm_bindgen::closure::Closure::once_into_js(move || {
            s2.fire(generation);
        });

        let tid = win
            .set_timeout_with_callback_and_timeout_and_arguments_0(
                cb.as_ref().unchecked_ref(),
                self.delay_ms,
            )
            .unwrap_or(0);
        self.timer_id.set_value(Some(tid));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gate_suppresses_until_user_change() {
        let mut g = SaveGate::default();
        assert!(!g.has_pending());
        assert!(!g.take_pending());
        assert!(!g.take_due(0));
    }

    #[test]
    fn test_gate_only_latest_generation_fires() {
        let mut g = SaveGate::default();
        let first = g.user_changed();
        let second = g.user_changed();
        assert!(!g.take_due(first));
        assert!(g.take_due(second));
        // Already saved; a stale duplicate timer must not save again.
        assert!(!g.take_due(second));
    }

    #[test]
    fn test_gate_flush_then_timer_does_not_double_save() {
        let mut g = SaveGate::default();
        let generation = g.user_changed();
        assert!(g.take_pending());
        assert!(!g.take_due(generation));

        // Still armed: the next edit saves again.
        let next = g.user_changed();
        assert!(g.take_due(next));
    }

    #[test]
    fn test_gate_reset_disarms() {
        let mut g = SaveGate::default();
        g.user_changed();
        g.reset();
        assert!(!g.has_pending());
        assert!(!g.take_pending());
    }
}
