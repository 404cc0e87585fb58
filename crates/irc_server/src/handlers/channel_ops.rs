//! JOIN, PART, PRIVMSG, TOPIC, INVITE, KICK, MODE — the channel-ops table
//! (§4.H), invoked only once a client is `logged_in` (enforced by the
//! dispatcher, step 3 of §4.G).

use crate::clock;
use crate::constants::{DEFAULT_LEAVE_REASON, MAX_CHANNELS_PER_CLIENT, MAX_TARGETS};
use crate::message::Message;
use crate::parsers::is_valid_channel_name;
use crate::registry::Registry;
use crate::replies::Reply;
use crate::types::ClientId;

pub fn handle_join(registry: &mut Registry, id: ClientId, msg: &Message) {
    let Some(chanlist) = msg.arg(0) else {
        let nick = registry.nick_of(id);
        registry.queue_line(id, &Reply::ErrNeedMoreParams { nick: &nick, command: "JOIN" }.format());
        return;
    };

    let channels: Vec<&str> = chanlist.split(',').collect();
    if channels.len() > MAX_TARGETS {
        let nick = registry.nick_of(id);
        registry.queue_line(id, &Reply::ErrTooManyTargets { nick: &nick, target: chanlist }.format());
        return;
    }

    let keys: Vec<&str> = msg.arg(1).map(|k| k.split(',').collect()).unwrap_or_default();

    for (i, chan_name) in channels.into_iter().enumerate() {
        let key = keys.get(i).copied();
        join_one(registry, id, chan_name, key);
    }
}

fn join_one(registry: &mut Registry, id: ClientId, chan_name: &str, key: Option<&str>) {
    if !is_valid_channel_name(chan_name) {
        let nick = registry.nick_of(id);
        registry.queue_line(id, &Reply::ErrNoSuchChannel { nick: &nick, channel: chan_name }.format());
        return;
    }

    if registry.channel(chan_name).is_none() {
        let now = clock::now_epoch_secs();
        registry.create_channel(chan_name.to_string(), id, now);
        announce_join(registry, id, chan_name);
        return;
    }

    if registry.channel(chan_name).unwrap().is_occupant(id) {
        return;
    }

    if registry.channel_count_for(id) >= MAX_CHANNELS_PER_CLIENT {
        let nick = registry.nick_of(id);
        registry.queue_line(id, &Reply::ErrTooManyChannels { nick: &nick, channel: chan_name }.format());
        return;
    }

    let required_key = registry.channel(chan_name).unwrap().modes.key.clone();
    if let Some(required_key) = required_key {
        if key != Some(required_key.as_str()) {
            let nick = registry.nick_of(id);
            registry.queue_line(id, &Reply::ErrBadChannelKey { nick: &nick, channel: chan_name }.format());
            return;
        }
    }

    let invite_only = registry.channel(chan_name).unwrap().modes.invite_only;
    let invited = registry.client(id).map(|c| c.invites.contains(chan_name)).unwrap_or(false);
    if invite_only && !invited {
        let nick = registry.nick_of(id);
        registry.queue_line(id, &Reply::ErrInviteOnlyChan { nick: &nick, channel: chan_name }.format());
        return;
    }

    let chan = registry.channel(chan_name).unwrap();
    if let Some(limit) = chan.modes.limit {
        if chan.occupant_count() as u32 >= limit {
            let nick = registry.nick_of(id);
            registry.queue_line(id, &Reply::ErrChannelIsFull { nick: &nick, channel: chan_name }.format());
            return;
        }
    }

    if let Some(chan) = registry.channel_mut(chan_name) {
        chan.add_member(id);
    }
    if let Some(client) = registry.client_mut(id) {
        client.invites.remove(chan_name);
    }
    announce_join(registry, id, chan_name);
}

/// Broadcasts the JOIN echo to the whole channel (caller included, S3), then
/// sends NAMES (353/366) and, if one is set, the topic (332) to the caller.
fn announce_join(registry: &mut Registry, id: ClientId, chan_name: &str) {
    let prefix = registry.client(id).map(|c| c.prefix()).unwrap_or_default();
    let join_line = Reply::Join { prefix: &prefix, channel: chan_name }.format();
    if let Some(chan) = registry.channel(chan_name) {
        let targets = chan.snapshot_all();
        registry.broadcast(&targets, &join_line);
    }

    let nick = registry.nick_of(id);
    let names = registry
        .channel(chan_name)
        .map(|chan| chan.member_list_string(|cid| registry.nick_of(cid)))
        .unwrap_or_default();
    registry.queue_line(id, &Reply::NamReply { nick: &nick, channel: chan_name, names: &names }.format());
    registry.queue_line(id, &Reply::EndOfNames { nick: &nick, channel: chan_name }.format());

    let topic = registry.channel(chan_name).map(|c| c.topic.clone()).unwrap_or_default();
    if !topic.is_empty() {
        registry.queue_line(id, &Reply::Topic { nick: &nick, channel: chan_name, topic: &topic }.format());
    }
}

pub fn handle_part(registry: &mut Registry, id: ClientId, msg: &Message) {
    let Some(chanlist) = msg.arg(0) else {
        let nick = registry.nick_of(id);
        registry.queue_line(id, &Reply::ErrNeedMoreParams { nick: &nick, command: "PART" }.format());
        return;
    };
    let reason = msg.arg(1).unwrap_or(DEFAULT_LEAVE_REASON).to_string();

    for chan_name in chanlist.split(',').map(str::to_string).collect::<Vec<_>>() {
        part_one(registry, id, &chan_name, &reason);
    }
}

fn part_one(registry: &mut Registry, id: ClientId, chan_name: &str, reason: &str) {
    let Some(chan) = registry.channel(chan_name) else {
        let nick = registry.nick_of(id);
        registry.queue_line(id, &Reply::ErrNoSuchChannel { nick: &nick, channel: chan_name }.format());
        return;
    };
    if !chan.is_occupant(id) {
        let nick = registry.nick_of(id);
        registry.queue_line(id, &Reply::ErrNotOnChannel { nick: &nick, channel: chan_name }.format());
        return;
    }

    let prefix = registry.client(id).map(|c| c.prefix()).unwrap_or_default();
    let announce = Reply::Part { prefix: &prefix, channel: chan_name, reason }.format();
    let targets = registry.channel(chan_name).unwrap().snapshot_all();
    registry.broadcast(&targets, &announce);

    if let Some(chan) = registry.channel_mut(chan_name) {
        chan.remove_occupant(id);
    }
    registry.remove_channel_if_empty(chan_name);
}

pub fn handle_privmsg(registry: &mut Registry, id: ClientId, msg: &Message) {
    let Some(targets_arg) = msg.arg(0) else {
        let nick = registry.nick_of(id);
        registry.queue_line(id, &Reply::ErrNoRecipient { nick: &nick, command: "PRIVMSG" }.format());
        return;
    };
    let text = match msg.arg(1) {
        Some(t) if !t.is_empty() => t,
        _ => {
            let nick = registry.nick_of(id);
            registry.queue_line(id, &Reply::ErrNoTextToSend { nick: &nick }.format());
            return;
        }
    };

    let targets: Vec<&str> = targets_arg.split(',').collect();
    if targets.len() > MAX_TARGETS {
        let nick = registry.nick_of(id);
        registry.queue_line(id, &Reply::ErrTooManyTargets { nick: &nick, target: targets_arg }.format());
        return;
    }

    let prefix = registry.client(id).map(|c| c.prefix()).unwrap_or_default();

    for target in targets {
        if target.starts_with('#') {
            let Some(chan) = registry.channel(target) else {
                let nick = registry.nick_of(id);
                registry.queue_line(id, &Reply::ErrNoSuchChannel { nick: &nick, channel: target }.format());
                continue;
            };
            if !chan.is_occupant(id) {
                let nick = registry.nick_of(id);
                registry.queue_line(id, &Reply::ErrNotOnChannel { nick: &nick, channel: target }.format());
                continue;
            }
            let recipients = chan.snapshot_except(id);
            let line = Reply::Privmsg { prefix: &prefix, target, text }.format();
            registry.broadcast(&recipients, &line);
        } else {
            match registry.client_by_nick(target) {
                Some(target_id) => {
                    let line = Reply::Privmsg { prefix: &prefix, target, text }.format();
                    registry.queue_line(target_id, &line);
                }
                None => {
                    let nick = registry.nick_of(id);
                    registry.queue_line(id, &Reply::ErrNoSuchNick { nick: &nick, target }.format());
                }
            }
        }
    }
}

pub fn handle_topic(registry: &mut Registry, id: ClientId, msg: &Message) {
    let Some(chan_name) = msg.arg(0) else {
        let nick = registry.nick_of(id);
        registry.queue_line(id, &Reply::ErrNeedMoreParams { nick: &nick, command: "TOPIC" }.format());
        return;
    };

    if !chan_name.starts_with('#') || registry.channel(chan_name).is_none() {
        let nick = registry.nick_of(id);
        registry.queue_line(id, &Reply::ErrNoSuchChannel { nick: &nick, channel: chan_name }.format());
        return;
    }
    if !registry.channel(chan_name).unwrap().is_occupant(id) {
        let nick = registry.nick_of(id);
        registry.queue_line(id, &Reply::ErrNotOnChannel { nick: &nick, channel: chan_name }.format());
        return;
    }

    match msg.arg(1) {
        Some(new_topic) => {
            let chan = registry.channel(chan_name).unwrap();
            if chan.modes.topic_locked && !chan.is_operator(id) {
                let nick = registry.nick_of(id);
                registry.queue_line(id, &Reply::ErrChanOpPrivsNeeded { nick: &nick, channel: chan_name }.format());
                return;
            }

            let setter = registry.nick_of(id);
            let ts = clock::now_hms();
            if let Some(chan) = registry.channel_mut(chan_name) {
                chan.topic = new_topic.to_string();
                chan.topic_author = setter.clone();
                chan.topic_ts = ts.clone();
            }

            let topic_line = Reply::Topic { nick: &setter, channel: chan_name, topic: new_topic }.format();
            let who_line = Reply::TopicWhoTime { nick: &setter, channel: chan_name, setter: &setter, ts: &ts }.format();
            let targets = registry.channel(chan_name).unwrap().snapshot_except(id);
            registry.broadcast(&targets, &topic_line);
            registry.broadcast(&targets, &who_line);
        }
        None => {
            let nick = registry.nick_of(id);
            let chan = registry.channel(chan_name).unwrap();
            if chan.topic.is_empty() {
                registry.queue_line(id, &Reply::NoTopic { nick: &nick, channel: chan_name }.format());
            } else {
                let topic = chan.topic.clone();
                let author = chan.topic_author.clone();
                let ts = chan.topic_ts.clone();
                registry.queue_line(id, &Reply::Topic { nick: &nick, channel: chan_name, topic: &topic }.format());
                registry.queue_line(
                    id,
                    &Reply::TopicWhoTime { nick: &nick, channel: chan_name, setter: &author, ts: &ts }.format(),
                );
            }
        }
    }
}

pub fn handle_invite(registry: &mut Registry, id: ClientId, msg: &Message) {
    if msg.args.len() != 2 {
        let nick = registry.nick_of(id);
        registry.queue_line(id, &Reply::ErrNeedMoreParams { nick: &nick, command: "INVITE" }.format());
        return;
    }
    let target_nick = msg.args[0].clone();
    let chan_name = msg.args[1].clone();

    let Some(chan) = registry.channel(&chan_name) else {
        let nick = registry.nick_of(id);
        registry.queue_line(id, &Reply::ErrNoSuchChannel { nick: &nick, channel: &chan_name }.format());
        return;
    };
    if !chan.is_occupant(id) {
        let nick = registry.nick_of(id);
        registry.queue_line(id, &Reply::ErrNotOnChannel { nick: &nick, channel: &chan_name }.format());
        return;
    }

    let Some(target_id) = registry.client_by_nick(&target_nick) else {
        let nick = registry.nick_of(id);
        registry.queue_line(id, &Reply::ErrNoSuchNick { nick: &nick, target: &target_nick }.format());
        return;
    };

    let chan = registry.channel(&chan_name).unwrap();
    if chan.is_occupant(target_id) {
        let nick = registry.nick_of(id);
        registry.queue_line(id, &Reply::ErrUserOnChannel { nick: &nick, target: &target_nick, channel: &chan_name }.format());
        return;
    }
    if chan.modes.invite_only && !chan.is_operator(id) {
        let nick = registry.nick_of(id);
        registry.queue_line(id, &Reply::ErrChanOpPrivsNeeded { nick: &nick, channel: &chan_name }.format());
        return;
    }
    if let Some(limit) = chan.modes.limit {
        if chan.occupant_count() as u32 >= limit {
            let nick = registry.nick_of(id);
            registry.queue_line(id, &Reply::ErrChannelIsFull { nick: &nick, channel: &chan_name }.format());
            return;
        }
    }

    if let Some(target) = registry.client_mut(target_id) {
        target.invites.insert(chan_name.clone());
    }
    let nick = registry.nick_of(id);
    registry.queue_line(id, &Reply::Inviting { nick: &nick, target: &target_nick, channel: &chan_name }.format());
    let prefix = registry.client(id).map(|c| c.prefix()).unwrap_or_default();
    registry.queue_line(target_id, &Reply::Invite { prefix: &prefix, target: &target_nick, channel: &chan_name }.format());
}

pub fn handle_kick(registry: &mut Registry, id: ClientId, msg: &Message) {
    if msg.args.len() < 2 {
        let nick = registry.nick_of(id);
        registry.queue_line(id, &Reply::ErrNeedMoreParams { nick: &nick, command: "KICK" }.format());
        return;
    }
    let target_nick = msg.args[1].clone();
    let reason = msg.arg(2).unwrap_or(DEFAULT_LEAVE_REASON).to_string();

    for chan_name in msg.args[0].clone().split(',').map(str::to_string).collect::<Vec<_>>() {
        kick_one(registry, id, &chan_name, &target_nick, &reason);
    }
}

fn kick_one(registry: &mut Registry, id: ClientId, chan_name: &str, target_nick: &str, reason: &str) {
    let Some(chan) = registry.channel(chan_name) else {
        let nick = registry.nick_of(id);
        registry.queue_line(id, &Reply::ErrNoSuchChannel { nick: &nick, channel: chan_name }.format());
        return;
    };
    if !chan.is_occupant(id) {
        let nick = registry.nick_of(id);
        registry.queue_line(id, &Reply::ErrNotOnChannel { nick: &nick, channel: chan_name }.format());
        return;
    }
    if !chan.is_operator(id) {
        let nick = registry.nick_of(id);
        registry.queue_line(id, &Reply::ErrChanOpPrivsNeeded { nick: &nick, channel: chan_name }.format());
        return;
    }
    let Some(target_id) = registry.client_by_nick(target_nick) else {
        let nick = registry.nick_of(id);
        registry.queue_line(id, &Reply::ErrNoSuchNick { nick: &nick, target: target_nick }.format());
        return;
    };
    if !registry.channel(chan_name).unwrap().is_occupant(target_id) {
        let nick = registry.nick_of(id);
        registry.queue_line(
            id,
            &Reply::ErrUserNotInChannel { nick: &nick, target: target_nick, channel: chan_name }.format(),
        );
        return;
    }

    let prefix = registry.client(id).map(|c| c.prefix()).unwrap_or_default();
    let announce = Reply::Kick { prefix: &prefix, channel: chan_name, target: target_nick, reason }.format();
    let targets = registry.channel(chan_name).unwrap().snapshot_except(id);
    registry.broadcast(&targets, &announce);

    if let Some(chan) = registry.channel_mut(chan_name) {
        chan.remove_occupant(target_id);
    }
    registry.remove_channel_if_empty(chan_name);
}

struct ModeOp {
    sign: char,
    letter: char,
    param: Option<String>,
}

/// A letter needs a parameter in the same cases the original's
/// `needsParameter` does: `k` and `o` always, `l` only on `+`.
fn needs_param(letter: char, sign: char) -> bool {
    letter == 'k' || letter == 'o' || (letter == 'l' && sign == '+')
}

/// Splits a mode string into `(sign, letter, param)` triples, consuming
/// `params` positionally. Returns `Err` the moment a letter that needs a
/// parameter finds none left, or `+l`'s parameter isn't a positive integer —
/// the whole string is rejected before any mode is applied, mirroring the
/// original's pre-pass. This is the function's entire validation pass:
/// `apply_mode_changes` must not reject or abort partway once it starts
/// mutating, only skip individual letters whose *precondition* (not syntax)
/// fails, e.g. `-o` on a non-operator.
fn parse_mode_ops(mode_string: &str, params: &[String]) -> Result<Vec<ModeOp>, ()> {
    let mut ops = Vec::new();
    let mut sign = '+';
    let mut param_idx = 0;

    for c in mode_string.chars() {
        if c == '+' || c == '-' {
            sign = c;
            continue;
        }
        let param = if needs_param(c, sign) {
            let p = params.get(param_idx).cloned().ok_or(())?;
            param_idx += 1;
            Some(p)
        } else {
            None
        };
        if c == 'l' && sign == '+' {
            let positive = param.as_deref().and_then(|p| p.parse::<u32>().ok()).filter(|&n| n > 0);
            if positive.is_none() {
                return Err(());
            }
        }
        ops.push(ModeOp { sign, letter: c, param });
    }
    Ok(ops)
}

pub fn handle_mode(registry: &mut Registry, id: ClientId, msg: &Message) {
    if msg.args.is_empty() {
        let nick = registry.nick_of(id);
        registry.queue_line(id, &Reply::ErrNeedMoreParams { nick: &nick, command: "MODE" }.format());
        return;
    }
    let chan_name = msg.args[0].clone();

    if registry.channel(&chan_name).is_none() {
        let nick = registry.nick_of(id);
        registry.queue_line(id, &Reply::ErrNoSuchChannel { nick: &nick, channel: &chan_name }.format());
        return;
    }
    if !registry.channel(&chan_name).unwrap().is_occupant(id) {
        let nick = registry.nick_of(id);
        registry.queue_line(id, &Reply::ErrNotOnChannel { nick: &nick, channel: &chan_name }.format());
        return;
    }

    if msg.args.len() == 1 {
        let nick = registry.nick_of(id);
        let chan = registry.channel(&chan_name).unwrap();
        let modes = chan.active_modes_string();
        let created_ts = chan.created_ts;
        registry.queue_line(id, &Reply::ChannelModeIs { nick: &nick, channel: &chan_name, modes: &modes }.format());
        registry.queue_line(id, &Reply::CreationTime { nick: &nick, channel: &chan_name, ts: created_ts }.format());
        return;
    }

    if !registry.channel(&chan_name).unwrap().is_operator(id) {
        let nick = registry.nick_of(id);
        registry.queue_line(id, &Reply::ErrChanOpPrivsNeeded { nick: &nick, channel: &chan_name }.format());
        return;
    }

    let mode_string = msg.args[1].clone();
    let params = msg.args[2..].to_vec();
    apply_mode_changes(registry, id, &chan_name, &mode_string, &params);
}

fn apply_mode_changes(registry: &mut Registry, id: ClientId, chan_name: &str, mode_string: &str, params: &[String]) {
    let ops = match parse_mode_ops(mode_string, params) {
        Ok(ops) => ops,
        Err(()) => {
            let nick = registry.nick_of(id);
            registry.queue_line(id, &Reply::ErrNeedMoreParams { nick: &nick, command: "MODE" }.format());
            return;
        }
    };

    let mut successful_letters = String::new();
    let mut successful_params: Vec<String> = Vec::new();

    for op in ops {
        let applied = match op.letter {
            'i' => {
                if let Some(chan) = registry.channel_mut(chan_name) {
                    chan.modes.invite_only = op.sign == '+';
                }
                true
            }
            't' => {
                if let Some(chan) = registry.channel_mut(chan_name) {
                    chan.modes.topic_locked = op.sign == '+';
                }
                true
            }
            'k' => {
                let param = op.param.clone().unwrap_or_default();
                if op.sign == '+' {
                    if let Some(chan) = registry.channel_mut(chan_name) {
                        chan.modes.key = Some(param.clone());
                    }
                    true
                } else {
                    let matches = registry
                        .channel(chan_name)
                        .map(|chan| chan.modes.key.as_deref() == Some(param.as_str()))
                        .unwrap_or(false);
                    if matches {
                        if let Some(chan) = registry.channel_mut(chan_name) {
                            chan.modes.key = None;
                        }
                    }
                    matches
                }
            }
            'o' => match registry.client_by_nick(op.param.as_deref().unwrap_or_default()) {
                Some(target_id) => registry
                    .channel_mut(chan_name)
                    .map(|chan| if op.sign == '+' { chan.promote(target_id) } else { chan.demote(target_id) })
                    .unwrap_or(false),
                None => false,
            },
            'l' => {
                if op.sign == '+' {
                    // `parse_mode_ops` already rejected a non-positive or non-numeric
                    // limit before any mutation started; this unwrap is that guarantee.
                    let limit: u32 = op.param.as_deref().and_then(|p| p.parse().ok()).unwrap();
                    if let Some(chan) = registry.channel_mut(chan_name) {
                        chan.modes.limit = Some(limit);
                    }
                    true
                } else {
                    if let Some(chan) = registry.channel_mut(chan_name) {
                        chan.modes.limit = None;
                    }
                    true
                }
            }
            other => {
                let nick = registry.nick_of(id);
                registry.queue_line(id, &Reply::ErrUnknownMode { nick: &nick, letter: other }.format());
                false
            }
        };

        if applied {
            successful_letters.push(op.sign);
            successful_letters.push(op.letter);
            if matches!(op.letter, 'k' | 'o') || (op.letter == 'l' && op.sign == '+') {
                if let Some(param) = &op.param {
                    successful_params.push(param.clone());
                }
            }
        }
    }

    if !successful_letters.is_empty() {
        let prefix = registry.client(id).map(|c| c.prefix()).unwrap_or_default();
        let change = if successful_params.is_empty() {
            successful_letters.clone()
        } else {
            format!("{successful_letters} {}", successful_params.join(" "))
        };
        let line = Reply::Mode { prefix: &prefix, channel: chan_name, change: &change }.format();
        if let Some(chan) = registry.channel(chan_name) {
            let targets = chan.snapshot_all();
            registry.broadcast(&targets, &line);
        }
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

    fn registered(reg: &mut Registry, id: ClientId, nick: &str) {
        reg.insert_client(fake_client(id.0));
        reg.set_nickname(id, nick);
        if let Some(c) = reg.client_mut(id) {
            c.pass_ok = true;
            c.username = nick.to_string();
        }
    }

    fn drain(registry: &mut Registry, id: ClientId) -> String {
        let client = registry.client_mut(id).unwrap();
        let out = String::from_utf8(client.out.iter().copied().collect()).unwrap();
        client.out.clear();
        out
    }

    #[test]
    fn join_creates_channel_and_sends_names_with_self_as_op() {
        let mut reg = Registry::new("pw".to_string());
        let alice = mio::Token(1);
        registered(&mut reg, alice, "alice");

        handle_join(&mut reg, alice, &Message::parse("JOIN #dev").unwrap());
        let out = drain(&mut reg, alice);
        assert!(out.contains("JOIN #dev"));
        assert!(out.contains("353"));
        assert!(out.contains("@alice"));
        assert!(out.contains("366"));
    }

    #[test]
    fn second_joiner_sees_both_names() {
        let mut reg = Registry::new("pw".to_string());
        let alice = mio::Token(1);
        let bob = mio::Token(2);
        registered(&mut reg, alice, "alice");
        registered(&mut reg, bob, "bob");

        handle_join(&mut reg, alice, &Message::parse("JOIN #dev").unwrap());
        drain(&mut reg, alice);
        handle_join(&mut reg, bob, &Message::parse("JOIN #dev").unwrap());
        let out = drain(&mut reg, bob);
        assert!(out.contains("@alice bob"));
    }

    #[test]
    fn privmsg_to_unjoined_channel_yields_442_and_no_broadcast() {
        let mut reg = Registry::new("pw".to_string());
        let alice = mio::Token(1);
        let bob = mio::Token(2);
        registered(&mut reg, alice, "alice");
        registered(&mut reg, bob, "bob");
        handle_join(&mut reg, bob, &Message::parse("JOIN #dev").unwrap());
        drain(&mut reg, bob);

        handle_privmsg(&mut reg, alice, &Message::parse("PRIVMSG #dev :hi").unwrap());
        let out = drain(&mut reg, alice);
        assert!(out.contains(" 442 "));
        assert!(drain(&mut reg, bob).is_empty());
    }

    #[test]
    fn invite_only_flow_then_uninvited_join_fails() {
        let mut reg = Registry::new("pw".to_string());
        let alice = mio::Token(1);
        let bob = mio::Token(2);
        let carol = mio::Token(3);
        registered(&mut reg, alice, "alice");
        registered(&mut reg, bob, "bob");
        registered(&mut reg, carol, "carol");

        handle_join(&mut reg, alice, &Message::parse("JOIN #secret").unwrap());
        drain(&mut reg, alice);
        handle_mode(&mut reg, alice, &Message::parse("MODE #secret +i").unwrap());
        drain(&mut reg, alice);

        handle_invite(&mut reg, alice, &Message::parse("INVITE bob #secret").unwrap());
        assert!(reg.client(bob).unwrap().invites.contains("#secret"));

        handle_join(&mut reg, bob, &Message::parse("JOIN #secret").unwrap());
        assert!(reg.channel("#secret").unwrap().is_occupant(bob));
        assert!(!reg.client(bob).unwrap().invites.contains("#secret"));

        handle_join(&mut reg, carol, &Message::parse("JOIN #secret").unwrap());
        let out = drain(&mut reg, carol);
        assert!(out.contains(" 473 "));
    }

    #[test]
    fn kick_with_reason_then_part_destroys_channel() {
        let mut reg = Registry::new("pw".to_string());
        let alice = mio::Token(1);
        let bob = mio::Token(2);
        registered(&mut reg, alice, "alice");
        registered(&mut reg, bob, "bob");
        handle_join(&mut reg, alice, &Message::parse("JOIN #t").unwrap());
        drain(&mut reg, alice);
        handle_join(&mut reg, bob, &Message::parse("JOIN #t").unwrap());
        drain(&mut reg, alice);
        drain(&mut reg, bob);

        handle_kick(&mut reg, alice, &Message::parse("KICK #t bob :bye").unwrap());
        let out = drain(&mut reg, bob);
        assert!(out.contains("KICK #t bob :bye"));
        assert!(reg.channel("#t").unwrap().is_operator(alice));

        handle_part(&mut reg, alice, &Message::parse("PART #t").unwrap());
        assert!(reg.channel("#t").is_none());
    }

    #[test]
    fn mode_plus_l_zero_is_rejected_and_aborts_string() {
        let mut reg = Registry::new("pw".to_string());
        let alice = mio::Token(1);
        registered(&mut reg, alice, "alice");
        handle_join(&mut reg, alice, &Message::parse("JOIN #dev").unwrap());
        drain(&mut reg, alice);

        handle_mode(&mut reg, alice, &Message::parse("MODE #dev +il 0").unwrap());
        let out = drain(&mut reg, alice);
        assert!(out.contains(" 461 "));
        assert!(!reg.channel("#dev").unwrap().modes.invite_only);
    }

    #[test]
    fn mode_key_round_trips_to_off() {
        let mut reg = Registry::new("pw".to_string());
        let alice = mio::Token(1);
        registered(&mut reg, alice, "alice");
        handle_join(&mut reg, alice, &Message::parse("JOIN #dev").unwrap());
        drain(&mut reg, alice);

        handle_mode(&mut reg, alice, &Message::parse("MODE #dev +k secret").unwrap());
        drain(&mut reg, alice);
        assert_eq!(reg.channel("#dev").unwrap().modes.key.as_deref(), Some("secret"));

        handle_mode(&mut reg, alice, &Message::parse("MODE #dev -k secret").unwrap());
        drain(&mut reg, alice);
        assert_eq!(reg.channel("#dev").unwrap().modes.key, None);
    }
}
