use std::collections::{HashSet, VecDeque};

use mio::net::TcpStream;

use crate::conn_buffer::ConnBuffer;
use crate::types::ClientId;

/// Client record (component D), one per accepted connection. See §3 for the
/// authoritative contract.
pub struct Client {
    pub id: ClientId,
    pub socket: TcpStream,
    pub ip: String,
    pub nickname: String,
    pub username: String,
    pub pass_ok: bool,
    pub buffer: ConnBuffer,
    pub invites: HashSet<String>,
    pub quitting: bool,
    pub quit_reason: Option<String>,
    /// Outbound bytes not yet written; drained on write-readiness to preserve
    /// per-client ordering even when a write would otherwise block (§5).
    pub out: VecDeque<u8>,
    pub writable_interest: bool,
}

impl Client {
    pub fn new(id: ClientId, socket: TcpStream, ip: String) -> Self {
        Client {
            id,
            socket,
            ip,
            nickname: String::new(),
            username: String::new(),
            pass_ok: false,
            buffer: ConnBuffer::new(),
            invites: HashSet::new(),
            quitting: false,
            quit_reason: None,
            out: VecDeque::new(),
            writable_interest: false,
        }
    }

    /// `logged_in` is always recomputed from the three underlying fields, never
    /// stored, so it can never drift from them (§3 invariant).
    pub fn logged_in(&self) -> bool {
        self.pass_ok && !self.nickname.is_empty() && !self.username.is_empty()
    }

    /// The nickname shown in reply envelopes; unregistered clients use `*`.
    pub fn display_nick(&self) -> &str {
        if self.nickname.is_empty() {
            "*"
        } else {
            &self.nickname
        }
    }

    /// `:nick!~user@host` prefix used when this client's own action is echoed.
    pub fn prefix(&self) -> String {
        format!("{}!~{}@{}", self.display_nick(), self.username, self.ip)
    }

    pub fn queue(&mut self, line: &str) {
        self.out.extend(line.as_bytes());
        self.out.extend(b"\r\n");
        self.writable_interest = !self.out.is_empty();
    }

    pub fn mark_quitting(&mut self, reason: String) {
        self.quitting = true;
        self.quit_reason = Some(reason);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::net::{TcpListener as StdListener, TcpStream as StdStream};

    fn fake_stream() -> TcpStream {
        let listener = StdListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        let std_stream = StdStream::connect(addr).unwrap();
        std_stream.set_nonblocking(true).unwrap();
        TcpStream::from_std(std_stream)
    }

    #[test]
    fn logged_in_requires_all_three_fields() {
        let mut client = Client::new(mio::Token(1), fake_stream(), "127.0.0.1".to_string());
        assert!(!client.logged_in());
        client.pass_ok = true;
        assert!(!client.logged_in());
        client.nickname = "alice".to_string();
        assert!(!client.logged_in());
        client.username = "alice".to_string();
        assert!(client.logged_in());
    }

    #[test]
    fn display_nick_falls_back_to_star() {
        let client = Client::new(mio::Token(1), fake_stream(), "127.0.0.1".to_string());
        assert_eq!(client.display_nick(), "*");
    }

    #[test]
    fn queue_appends_crlf() {
        let mut client = Client::new(mio::Token(1), fake_stream(), "127.0.0.1".to_string());
        client.queue("hello");
        assert_eq!(client.out.iter().copied().collect::<Vec<u8>>(), b"hello\r\n");
    }
}
