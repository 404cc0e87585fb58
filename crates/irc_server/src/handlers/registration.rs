//! PASS, NICK, USER, QUIT — the registration table (§4.H), invoked
//! unconditionally regardless of registration state.

use log::{info, warn};

use crate::constants::DEFAULT_LEAVE_REASON;
use crate::message::Message;
use crate::parsers::is_valid_nickname;
use crate::registry::Registry;
use crate::replies::Reply;
use crate::types::ClientId;

pub fn handle_pass(registry: &mut Registry, id: ClientId, msg: &Message) {
    let Some(password) = msg.arg(0) else {
        let nick = registry.nick_of(id);
        registry.queue_line(id, &Reply::ErrNeedMoreParams { nick: &nick, command: "PASS" }.format());
        return;
    };

    let Some(client) = registry.client(id) else { return };
    if client.pass_ok || client.logged_in() {
        let nick = registry.nick_of(id);
        registry.queue_line(id, &Reply::ErrAlreadyRegistered { nick: &nick }.format());
        return;
    }

    if password != registry.password() {
        warn!("{id:?} sent wrong password");
        let nick = registry.nick_of(id);
        registry.queue_line(id, &Reply::ErrPasswordMismatch { nick: &nick }.format());
        return;
    }

    if let Some(client) = registry.client_mut(id) {
        client.pass_ok = true;
    }
}

pub fn handle_nick(registry: &mut Registry, id: ClientId, msg: &Message) {
    let Some(new_nick) = msg.arg(0) else {
        let nick = registry.nick_of(id);
        registry.queue_line(id, &Reply::ErrNoNicknameGiven { nick: &nick }.format());
        return;
    };

    if !is_valid_nickname(new_nick) {
        let nick = registry.nick_of(id);
        registry.queue_line(id, &Reply::ErrErroneousNickname { nick: &nick, attempted: new_nick }.format());
        return;
    }

    if registry.nickname_in_use(new_nick, id) {
        registry.queue_line(id, &Reply::ErrNicknameInUse { attempted: new_nick }.format());
        return;
    }

    let Some(client) = registry.client(id) else { return };
    if !client.pass_ok {
        let nick = registry.nick_of(id);
        registry.queue_line(id, &Reply::ErrNotRegistered { nick: &nick }.format());
        return;
    }
    if client.nickname == new_nick {
        return;
    }

    let was_logged_in = client.logged_in();
    let prefix = client.prefix();
    let new_nick = new_nick.to_string();
    let announce = Reply::Nick { prefix: &prefix, new_nick: &new_nick }.format();

    for chan_name in registry.channels_occupied_by(id) {
        if let Some(chan) = registry.channel(&chan_name) {
            let targets = chan.snapshot_except(id);
            registry.broadcast(&targets, &announce);
        }
    }

    registry.set_nickname(id, &new_nick);
    registry.queue_line(id, &announce);

    let now_logged_in = registry.client(id).map(|c| c.logged_in()).unwrap_or(false);
    if !was_logged_in && now_logged_in {
        let nick = registry.nick_of(id);
        info!("{id:?} completed registration as {nick}");
        registry.queue_line(id, &Reply::Welcome { nick: &nick }.format());
    }
}

pub fn handle_user(registry: &mut Registry, id: ClientId, msg: &Message) {
    if msg.args.len() < 4 {
        let nick = registry.nick_of(id);
        registry.queue_line(id, &Reply::ErrNeedMoreParams { nick: &nick, command: "USER" }.format());
        return;
    }

    let Some(client) = registry.client(id) else { return };
    if !client.pass_ok {
        let nick = registry.nick_of(id);
        registry.queue_line(id, &Reply::ErrNotRegistered { nick: &nick }.format());
        return;
    }
    if client.logged_in() || !client.username.is_empty() {
        let nick = registry.nick_of(id);
        registry.queue_line(id, &Reply::ErrAlreadyRegistered { nick: &nick }.format());
        return;
    }
    let was_logged_in = client.logged_in();

    let username = msg.args[0].clone();
    if let Some(client) = registry.client_mut(id) {
        client.username = username;
    }

    let now_logged_in = registry.client(id).map(|c| c.logged_in()).unwrap_or(false);
    if !was_logged_in && now_logged_in {
        let nick = registry.nick_of(id);
        info!("{id:?} completed registration as {nick}");
        registry.queue_line(id, &Reply::Welcome { nick: &nick }.format());
    }
}

/// Broadcasts the departure, cascades the client out of every channel it
/// occupies (destroying empties), and marks it quitting. The event loop
/// performs the actual socket close and final registry removal at the safe
/// point after the readiness sweep (§4.I).
pub fn handle_quit(registry: &mut Registry, id: ClientId, msg: &Message) {
    let reason = msg.arg(0).unwrap_or(DEFAULT_LEAVE_REASON).to_string();

    let Some(client) = registry.client(id) else { return };
    let prefix = client.prefix();
    let announce = Reply::Quit { prefix: &prefix, reason: &reason }.format();

    for (_, remaining) in registry.leave_all_channels(id) {
        registry.broadcast(&remaining, &announce);
    }

    if let Some(client) = registry.client_mut(id) {
        client.mark_quitting(reason);
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

    fn drain(registry: &mut Registry, id: ClientId) -> String {
        let client = registry.client_mut(id).unwrap();
        let out = String::from_utf8(client.out.iter().copied().collect()).unwrap();
        client.out.clear();
        out
    }

    #[test]
    fn full_registration_sends_welcome_once() {
        let mut reg = Registry::new("pw".to_string());
        reg.insert_client(fake_client(1));
        let id = mio::Token(1);

        handle_pass(&mut reg, id, &Message::parse("PASS pw").unwrap());
        assert!(drain(&mut reg, id).is_empty());

        handle_nick(&mut reg, id, &Message::parse("NICK alice").unwrap());
        assert!(drain(&mut reg, id).contains("NICK alice"));

        handle_user(&mut reg, id, &Message::parse("USER alice 0 * :Alice A.").unwrap());
        let out = drain(&mut reg, id);
        assert_eq!(out, ":ircd 001 alice :Connected to IRC network successfully!\r\n");
        assert!(reg.client(id).unwrap().logged_in());
    }

    #[test]
    fn wrong_password_yields_464() {
        let mut reg = Registry::new("pw".to_string());
        reg.insert_client(fake_client(1));
        let id = mio::Token(1);
        handle_pass(&mut reg, id, &Message::parse("PASS wrong").unwrap());
        assert!(drain(&mut reg, id).contains(" 464 "));
        assert!(!reg.client(id).unwrap().pass_ok);
    }

    #[test]
    fn nick_collision_yields_433_and_nickname_unchanged() {
        let mut reg = Registry::new("pw".to_string());
        reg.insert_client(fake_client(1));
        reg.insert_client(fake_client(2));
        reg.set_nickname(mio::Token(1), "alice");

        handle_nick(&mut reg, mio::Token(2), &Message::parse("NICK alice").unwrap());
        let out = drain(&mut reg, mio::Token(2));
        assert_eq!(out, ":ircd 433 alice :Nickname already taken\r\n");
        assert_eq!(reg.client(mio::Token(2)).unwrap().nickname, "");
    }

    #[test]
    fn nick_to_same_value_is_a_no_op() {
        let mut reg = Registry::new("pw".to_string());
        reg.insert_client(fake_client(1));
        let id = mio::Token(1);
        reg.set_nickname(id, "alice");
        handle_nick(&mut reg, id, &Message::parse("NICK alice").unwrap());
        assert!(drain(&mut reg, id).is_empty());
    }

    #[test]
    fn quit_broadcasts_to_remaining_members_and_empties_channel() {
        let mut reg = Registry::new("pw".to_string());
        reg.insert_client(fake_client(1));
        reg.insert_client(fake_client(2));
        reg.set_nickname(mio::Token(1), "alice");
        reg.set_nickname(mio::Token(2), "bob");
        reg.create_channel("#dev".to_string(), mio::Token(1), 0);
        reg.channel_mut("#dev").unwrap().add_member(mio::Token(2));

        handle_quit(&mut reg, mio::Token(1), &Message::parse("QUIT :bye").unwrap());
        let out = drain(&mut reg, mio::Token(2));
        assert!(out.contains("QUIT :bye"));
        assert!(reg.client(mio::Token(1)).unwrap().quitting);
        assert!(reg.channel("#dev").is_some());
    }
}
