//! Reply formatter (component A): pure functions producing bit-exact IRC reply
//! strings. Every variant formats to one line, CR-LF excluded — `Client::queue`
//! appends the line terminator when a formatted reply is handed to it.

use crate::constants::*;

#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply<'a> {
    Welcome {
        nick: &'a str,
    },
    ChannelModeIs {
        nick: &'a str,
        channel: &'a str,
        modes: &'a str,
    },
    CreationTime {
        nick: &'a str,
        channel: &'a str,
        ts: u64,
    },
    NoTopic {
        nick: &'a str,
        channel: &'a str,
    },
    Topic {
        nick: &'a str,
        channel: &'a str,
        topic: &'a str,
    },
    TopicWhoTime {
        nick: &'a str,
        channel: &'a str,
        setter: &'a str,
        ts: &'a str,
    },
    Inviting {
        nick: &'a str,
        target: &'a str,
        channel: &'a str,
    },
    NamReply {
        nick: &'a str,
        channel: &'a str,
        names: &'a str,
    },
    EndOfNames {
        nick: &'a str,
        channel: &'a str,
    },

    ErrNeedMoreParams {
        nick: &'a str,
        command: &'a str,
    },
    ErrNotRegistered {
        nick: &'a str,
    },
    ErrAlreadyRegistered {
        nick: &'a str,
    },
    ErrPasswordMismatch {
        nick: &'a str,
    },
    ErrNoNicknameGiven {
        nick: &'a str,
    },
    ErrErroneousNickname {
        nick: &'a str,
        attempted: &'a str,
    },
    /// The 433 envelope names the *rejected* nickname, not the caller's current
    /// one (S2: an unregistered caller's display nick would be `*`, but the
    /// reply still carries the nickname they just tried).
    ErrNicknameInUse {
        attempted: &'a str,
    },
    ErrNoSuchChannel {
        nick: &'a str,
        channel: &'a str,
    },
    ErrTooManyChannels {
        nick: &'a str,
        channel: &'a str,
    },
    ErrTooManyTargets {
        nick: &'a str,
        target: &'a str,
    },
    ErrNoRecipient {
        nick: &'a str,
        command: &'a str,
    },
    ErrNoTextToSend {
        nick: &'a str,
    },
    ErrUnknownCommand {
        nick: &'a str,
        command: &'a str,
    },
    ErrUserNotInChannel {
        nick: &'a str,
        target: &'a str,
        channel: &'a str,
    },
    ErrNotOnChannel {
        nick: &'a str,
        channel: &'a str,
    },
    ErrUserOnChannel {
        nick: &'a str,
        target: &'a str,
        channel: &'a str,
    },
    ErrNoSuchNick {
        nick: &'a str,
        target: &'a str,
    },
    ErrKeySet {
        nick: &'a str,
        channel: &'a str,
    },
    ErrChannelIsFull {
        nick: &'a str,
        channel: &'a str,
    },
    ErrUnknownMode {
        nick: &'a str,
        letter: char,
    },
    ErrInviteOnlyChan {
        nick: &'a str,
        channel: &'a str,
    },
    ErrBadChannelKey {
        nick: &'a str,
        channel: &'a str,
    },
    ErrChanOpPrivsNeeded {
        nick: &'a str,
        channel: &'a str,
    },

    Join {
        prefix: &'a str,
        channel: &'a str,
    },
    Part {
        prefix: &'a str,
        channel: &'a str,
        reason: &'a str,
    },
    Privmsg {
        prefix: &'a str,
        target: &'a str,
        text: &'a str,
    },
    Nick {
        prefix: &'a str,
        new_nick: &'a str,
    },
    Invite {
        prefix: &'a str,
        target: &'a str,
        channel: &'a str,
    },
    Kick {
        prefix: &'a str,
        channel: &'a str,
        target: &'a str,
        reason: &'a str,
    },
    /// `change` is the already-assembled `+xy param1 param2` consolidated string.
    Mode {
        prefix: &'a str,
        channel: &'a str,
        change: &'a str,
    },
    Quit {
        prefix: &'a str,
        reason: &'a str,
    },
}

impl<'a> Reply<'a> {
    pub fn format(&self) -> String {
        match self {
            Reply::Welcome { nick } => {
                format!(":{SERVER_NAME} {RPL_WELCOME:03} {nick} :{WELCOME_TEXT}")
            }
            Reply::ChannelModeIs { nick, channel, modes } => {
                format!(":{SERVER_NAME} {RPL_CHANNELMODEIS:03} {nick} {channel} {modes}")
            }
            Reply::CreationTime { nick, channel, ts } => {
                format!(":{SERVER_NAME} {RPL_CREATIONTIME:03} {nick} {channel} {ts}")
            }
            Reply::NoTopic { nick, channel } => {
                format!(":{SERVER_NAME} {RPL_NOTOPIC:03} {nick} {channel} :{RPL_NOTOPIC_STR}")
            }
            Reply::Topic { nick, channel, topic } => {
                format!(":{SERVER_NAME} {RPL_TOPIC:03} {nick} {channel} :{topic}")
            }
            Reply::TopicWhoTime { nick, channel, setter, ts } => {
                format!(":{SERVER_NAME} {RPL_TOPICWHOTIME:03} {nick} {channel} {setter} {ts}")
            }
            Reply::Inviting { nick, target, channel } => {
                format!(":{SERVER_NAME} {RPL_INVITING:03} {nick} {target} {channel}")
            }
            Reply::NamReply { nick, channel, names } => {
                format!(":{SERVER_NAME} {RPL_NAMREPLY:03} {nick} = {channel} :{names}")
            }
            Reply::EndOfNames { nick, channel } => {
                format!(":{SERVER_NAME} {RPL_ENDOFNAMES:03} {nick} {channel} :{RPL_ENDOFNAMES_STR}")
            }

            Reply::ErrNeedMoreParams { nick, command } => {
                format!(":{SERVER_NAME} {ERR_NEEDMOREPARAMS:03} {nick} {command} :{ERR_NEEDMOREPARAMS_STR}")
            }
            Reply::ErrNotRegistered { nick } => {
                format!(":{SERVER_NAME} {ERR_NOTREGISTERED:03} {nick} :{ERR_NOTREGISTERED_STR}")
            }
            Reply::ErrAlreadyRegistered { nick } => {
                format!(":{SERVER_NAME} {ERR_ALREADYREGISTRED:03} {nick} :{ERR_ALREADYREGISTRED_STR}")
            }
            Reply::ErrPasswordMismatch { nick } => {
                format!(":{SERVER_NAME} {ERR_PASSWDMISMATCH:03} {nick} :{ERR_PASSWDMISMATCH_STR}")
            }
            Reply::ErrNoNicknameGiven { nick } => {
                format!(":{SERVER_NAME} {ERR_NONICKNAMEGIVEN:03} {nick} :{ERR_NONICKNAMEGIVEN_STR}")
            }
            Reply::ErrErroneousNickname { nick, attempted } => format!(
                ":{SERVER_NAME} {ERR_ERRONEUSNICKNAME:03} {nick} {attempted} :{ERR_ERRONEUSNICKNAME_STR}"
            ),
            Reply::ErrNicknameInUse { attempted } => {
                format!(":{SERVER_NAME} {ERR_NICKNAMEINUSE:03} {attempted} :{ERR_NICKNAMEINUSE_STR}")
            }
            Reply::ErrNoSuchChannel { nick, channel } => {
                format!(":{SERVER_NAME} {ERR_NOSUCHCHANNEL:03} {nick} {channel} :{ERR_NOSUCHCHANNEL_STR}")
            }
            Reply::ErrTooManyChannels { nick, channel } => {
                format!(":{SERVER_NAME} {ERR_TOOMANYCHANNELS:03} {nick} {channel} :{ERR_TOOMANYCHANNELS_STR}")
            }
            Reply::ErrTooManyTargets { nick, target } => {
                format!(":{SERVER_NAME} {ERR_TOOMANYTARGETS:03} {nick} {target} :{ERR_TOOMANYTARGETS_STR}")
            }
            Reply::ErrNoRecipient { nick, command } => format!(
                ":{SERVER_NAME} {ERR_NORECIPIENT:03} {nick} :{ERR_NORECIPIENT_STR} ({command})"
            ),
            Reply::ErrNoTextToSend { nick } => {
                format!(":{SERVER_NAME} {ERR_NOTEXTTOSEND:03} {nick} :{ERR_NOTEXTTOSEND_STR}")
            }
            Reply::ErrUnknownCommand { nick, command } => {
                format!(":{SERVER_NAME} {ERR_UNKNOWNCOMMAND:03} {nick} {command} :{ERR_UNKNOWNCOMMAND_STR}")
            }
            Reply::ErrUserNotInChannel { nick, target, channel } => format!(
                ":{SERVER_NAME} {ERR_USERNOTINCHANNEL:03} {nick} {target} {channel} :{ERR_USERNOTINCHANNEL_STR}"
            ),
            Reply::ErrNotOnChannel { nick, channel } => {
                format!(":{SERVER_NAME} {ERR_NOTONCHANNEL:03} {nick} {channel} :{ERR_NOTONCHANNEL_STR}")
            }
            Reply::ErrUserOnChannel { nick, target, channel } => format!(
                ":{SERVER_NAME} {ERR_USERONCHANNEL:03} {nick} {target} {channel} :{ERR_USERONCHANNEL_STR}"
            ),
            Reply::ErrNoSuchNick { nick, target } => {
                format!(":{SERVER_NAME} {ERR_NOSUCHNICK:03} {nick} {target} :{ERR_NOSUCHNICK_STR}")
            }
            Reply::ErrKeySet { nick, channel } => {
                format!(":{SERVER_NAME} {ERR_KEYSET:03} {nick} {channel} :{ERR_KEYSET_STR}")
            }
            Reply::ErrChannelIsFull { nick, channel } => {
                format!(":{SERVER_NAME} {ERR_CHANNELISFULL:03} {nick} {channel} :{ERR_CHANNELISFULL_STR}")
            }
            Reply::ErrUnknownMode { nick, letter } => {
                format!(":{SERVER_NAME} {ERR_UNKNOWNMODE:03} {nick} {letter} :{ERR_UNKNOWNMODE_STR}")
            }
            Reply::ErrInviteOnlyChan { nick, channel } => {
                format!(":{SERVER_NAME} {ERR_INVITEONLYCHAN:03} {nick} {channel} :{ERR_INVITEONLYCHAN_STR}")
            }
            Reply::ErrBadChannelKey { nick, channel } => {
                format!(":{SERVER_NAME} {ERR_BADCHANNELKEY:03} {nick} {channel} :{ERR_BADCHANNELKEY_STR}")
            }
            Reply::ErrChanOpPrivsNeeded { nick, channel } => format!(
                ":{SERVER_NAME} {ERR_CHANOPRIVSNEEDED:03} {nick} {channel} :{ERR_CHANOPRIVSNEEDED_STR}"
            ),

            Reply::Join { prefix, channel } => format!(":{prefix} JOIN {channel}"),
            Reply::Part { prefix, channel, reason } => format!(":{prefix} PART {channel} :{reason}"),
            Reply::Privmsg { prefix, target, text } => format!(":{prefix} PRIVMSG {target} :{text}"),
            Reply::Nick { prefix, new_nick } => format!(":{prefix} NICK {new_nick}"),
            Reply::Invite { prefix, target, channel } => format!(":{prefix} INVITE {target} {channel}"),
            Reply::Kick { prefix, channel, target, reason } => {
                format!(":{prefix} KICK {channel} {target} :{reason}")
            }
            Reply::Mode { prefix, channel, change } => format!(":{prefix} MODE {channel} {change}"),
            Reply::Quit { prefix, reason } => format!(":{prefix} QUIT :{reason}"),
        }
    }
}
