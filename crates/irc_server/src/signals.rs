//! Signal wiring: SIGINT/SIGTERM become an ordinary `mio` readiness event
//! registered in the same `Poll` the event loop already waits on (§5's
//! shutdown flag, made pollable instead of a signal-handler-written global).
//! SIGQUIT and SIGTSTP are registered in the same set purely so `signal_hook`
//! takes over their disposition and nothing ever fires the OS default
//! (terminate-with-core-dump and stop, respectively) — `poll_shutdown` drains
//! and discards them without treating their arrival as a shutdown request,
//! matching spec.md's "SIGQUIT and SIGTSTP are ignored" and, concretely,
//! `original_source/sources/main.cpp`'s `std::signal(SIGQUIT, SIG_IGN)`.

use mio::{Interest, Poll, Token};
use signal_hook::consts::{SIGINT, SIGQUIT, SIGTERM, SIGTSTP};
use signal_hook_mio::v0_8::Signals;

use crate::errors::FatalError;

pub struct SignalSource {
    signals: Signals,
}

impl SignalSource {
    pub fn new(poll: &mut Poll, token: Token) -> Result<Self, FatalError> {
        let mut signals = Signals::new([SIGINT, SIGTERM, SIGQUIT, SIGTSTP]).map_err(FatalError::Signal)?;
        poll.registry()
            .register(&mut signals, token, Interest::READABLE)
            .map_err(FatalError::Signal)?;
        Ok(SignalSource { signals })
    }

    /// Drains every pending signal and returns true only if SIGINT or SIGTERM
    /// was among them. SIGQUIT/SIGTSTP are drained here too, which is itself
    /// what keeps their default disposition from ever running — their
    /// presence in the batch is otherwise discarded.
    pub fn poll_shutdown(&mut self) -> bool {
        let mut shutdown = false;
        for signal in self.signals.pending() {
            if signal == SIGINT || signal == SIGTERM {
                shutdown = true;
            }
        }
        shutdown
    }
}
