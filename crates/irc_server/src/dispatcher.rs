//! Command dispatcher (component G): verb → handler, split into the two
//! tables the authoritative per-verb table names. One line in, zero or more
//! queued replies out — handlers own their own argument validation.

use log::warn;

use crate::handlers::{channel_ops, registration};
use crate::message::Message;
use crate::registry::Registry;
use crate::replies::Reply;
use crate::types::ClientId;

const REGISTRATION: &[&str] = &["PASS", "NICK", "USER", "QUIT"];
const CHANNEL_OPS: &[&str] = &["JOIN", "PART", "PRIVMSG", "TOPIC", "INVITE", "KICK", "MODE"];

/// Tokenizes `line` and routes it per §4.G's five-step algorithm. A blank line
/// (no verb) is silently ignored.
pub fn dispatch(registry: &mut Registry, id: ClientId, line: &str) {
    let Some(msg) = Message::parse(line) else {
        return;
    };

    if REGISTRATION.contains(&msg.verb.as_str()) {
        match msg.verb.as_str() {
            "PASS" => registration::handle_pass(registry, id, &msg),
            "NICK" => registration::handle_nick(registry, id, &msg),
            "USER" => registration::handle_user(registry, id, &msg),
            "QUIT" => registration::handle_quit(registry, id, &msg),
            _ => unreachable!(),
        }
        return;
    }

    let logged_in = registry.client(id).map(|c| c.logged_in()).unwrap_or(false);

    if logged_in && CHANNEL_OPS.contains(&msg.verb.as_str()) {
        match msg.verb.as_str() {
            "JOIN" => channel_ops::handle_join(registry, id, &msg),
            "PART" => channel_ops::handle_part(registry, id, &msg),
            "PRIVMSG" => channel_ops::handle_privmsg(registry, id, &msg),
            "TOPIC" => channel_ops::handle_topic(registry, id, &msg),
            "INVITE" => channel_ops::handle_invite(registry, id, &msg),
            "KICK" => channel_ops::handle_kick(registry, id, &msg),
            "MODE" => channel_ops::handle_mode(registry, id, &msg),
            _ => unreachable!(),
        }
        return;
    }

    let nick = registry.nick_of(id);
    if !logged_in {
        registry.queue_line(id, &Reply::ErrNotRegistered { nick: &nick }.format());
    } else {
        warn!("unknown command {} from {id:?}", msg.verb);
        registry.queue_line(
            id,
            &Reply::ErrUnknownCommand {
                nick: &nick,
                command: &msg.verb,
            }
            .format(),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::Client;
    use std::net::{TcpListener as StdListener, TcpStream as StdStream};

    fn fake_client(id: usize) -> Client {
        let listener = StdListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        let std_stream = StdStream::connect(addr).unwrap();
        std_stream.set_nonblocking(true).unwrap();
        let socket = mio::net::TcpStream::from_std(std_stream);
        Client::new(mio::Token(id), socket, "127.0.0.1".to_string())
    }

    #[test]
    fn unregistered_client_gets_451_for_channel_ops() {
        let mut reg = Registry::new("hunter2".to_string());
        reg.insert_client(fake_client(1));
        dispatch(&mut reg, mio::Token(1), "JOIN #dev");
        let client = reg.client(mio::Token(1)).unwrap();
        let out = String::from_utf8(client.out.iter().copied().collect()).unwrap();
        assert!(out.contains(" 451 "));
    }

    #[test]
    fn unknown_verb_for_registered_client_gets_421() {
        let mut reg = Registry::new("hunter2".to_string());
        reg.insert_client(fake_client(1));
        dispatch(&mut reg, mio::Token(1), "PASS hunter2");
        dispatch(&mut reg, mio::Token(1), "NICK alice");
        dispatch(&mut reg, mio::Token(1), "USER alice 0 * :Alice A.");
        reg.client_mut(mio::Token(1)).unwrap().out.clear();
        dispatch(&mut reg, mio::Token(1), "FROB");
        let client = reg.client(mio::Token(1)).unwrap();
        let out = String::from_utf8(client.out.iter().copied().collect()).unwrap();
        assert!(out.contains(" 421 "));
    }

    #[test]
    fn blank_line_is_ignored() {
        let mut reg = Registry::new("hunter2".to_string());
        reg.insert_client(fake_client(1));
        dispatch(&mut reg, mio::Token(1), "");
        assert!(reg.client(mio::Token(1)).unwrap().out.is_empty());
    }
}
