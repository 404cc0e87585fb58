use thiserror::Error;

/// Two error classes survive past validation time: transport errors tear a
/// connection down as if the client had QUIT; fatal errors abort startup.
/// Protocol-level rejections (bad params, unknown nick, wrong mode, ...) are
/// not threaded through an error type at all — each handler formats and
/// queues the exact numeric `Reply` for its failure directly, the same way
/// the teacher's handlers build a reply string inline rather than bubbling a
/// generic error up to a central translator.

/// A read, write or accept failed (or the peer cleanly closed). The connection is
/// torn down exactly as a QUIT with `reason`.
#[derive(Error, Debug, Clone)]
#[error("transport error on socket: {reason}")]
pub struct TransportError {
    pub reason: String,
}

impl TransportError {
    pub fn closed() -> Self {
        TransportError {
            reason: "Connection closed".to_string(),
        }
    }

    pub fn io(err: &std::io::Error) -> Self {
        TransportError {
            reason: err.to_string(),
        }
    }
}

/// The listening socket could not be created, bound or put into listen mode.
/// Startup aborts with a diagnostic and no partially-initialised state is left.
#[derive(Error, Debug)]
pub enum FatalError {
    #[error("invalid configuration: {0}")]
    Config(String),
    #[error("failed to start listener: {0}")]
    Listener(#[source] std::io::Error),
    #[error("failed to install signal handler: {0}")]
    Signal(#[source] std::io::Error),
}
