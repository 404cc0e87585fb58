use mio::Token;

/// A client's identity is the `mio::Token` its socket is registered under in the
/// event loop's `Poll`. Tokens are stable for the life of the connection and unique
/// across the whole client set, matching the spec's "socket is unique" invariant.
pub type ClientId = Token;

/// Reserved token for the listening socket; always slot zero in the readiness set.
pub const LISTENER: Token = Token(0);
