//! Numeric reply codes and their canonical text, grouped by RFC 2812 section.
//! Only the numerics this server actually emits (per the component design) are listed.

pub const SERVER_NAME: &str = "ircd";

pub const RPL_WELCOME: u16 = 1;
pub const RPL_CHANNELMODEIS: u16 = 324;
pub const RPL_CREATIONTIME: u16 = 329;
pub const RPL_NOTOPIC: u16 = 331;
pub const RPL_TOPIC: u16 = 332;
pub const RPL_TOPICWHOTIME: u16 = 333;
pub const RPL_INVITING: u16 = 341;
pub const RPL_NAMREPLY: u16 = 353;
pub const RPL_ENDOFNAMES: u16 = 366;

pub const ERR_NOSUCHNICK: u16 = 401;
pub const ERR_NOSUCHCHANNEL: u16 = 403;
pub const ERR_TOOMANYCHANNELS: u16 = 405;
pub const ERR_TOOMANYTARGETS: u16 = 407;
pub const ERR_NORECIPIENT: u16 = 411;
pub const ERR_NOTEXTTOSEND: u16 = 412;
pub const ERR_UNKNOWNCOMMAND: u16 = 421;
pub const ERR_NONICKNAMEGIVEN: u16 = 431;
pub const ERR_ERRONEUSNICKNAME: u16 = 432;
pub const ERR_NICKNAMEINUSE: u16 = 433;
pub const ERR_USERNOTINCHANNEL: u16 = 441;
pub const ERR_NOTONCHANNEL: u16 = 442;
pub const ERR_USERONCHANNEL: u16 = 443;
pub const ERR_NOTREGISTERED: u16 = 451;
pub const ERR_NEEDMOREPARAMS: u16 = 461;
pub const ERR_ALREADYREGISTRED: u16 = 462;
pub const ERR_PASSWDMISMATCH: u16 = 464;
pub const ERR_KEYSET: u16 = 467;
pub const ERR_CHANNELISFULL: u16 = 471;
pub const ERR_UNKNOWNMODE: u16 = 472;
pub const ERR_INVITEONLYCHAN: u16 = 473;
pub const ERR_BADCHANNELKEY: u16 = 475;
pub const ERR_CHANOPRIVSNEEDED: u16 = 482;

pub const ERR_NEEDMOREPARAMS_STR: &str = "Not enough parameters";
pub const ERR_UNKNOWNCOMMAND_STR: &str = "Unknown command";
pub const ERR_NOTREGISTERED_STR: &str = "You have not registered";
pub const ERR_NONICKNAMEGIVEN_STR: &str = "No nickname given";
pub const ERR_ERRONEUSNICKNAME_STR: &str = "Erroneous nickname";
pub const ERR_NICKNAMEINUSE_STR: &str = "Nickname already taken";
pub const ERR_ALREADYREGISTRED_STR: &str = "You may not reregister";
pub const ERR_PASSWDMISMATCH_STR: &str = "Password incorrect";
pub const ERR_NOSUCHCHANNEL_STR: &str = "No such channel";
pub const ERR_TOOMANYCHANNELS_STR: &str = "You have joined too many channels";
pub const ERR_TOOMANYTARGETS_STR: &str = "Too many targets";
pub const ERR_NOTONCHANNEL_STR: &str = "You're not on that channel";
pub const ERR_USERONCHANNEL_STR: &str = "is already on channel";
pub const ERR_INVITEONLYCHAN_STR: &str = "Cannot join channel (+i)";
pub const ERR_BADCHANNELKEY_STR: &str = "Cannot join channel (+k)";
pub const ERR_CHANNELISFULL_STR: &str = "Cannot join channel (+l)";
pub const ERR_NORECIPIENT_STR: &str = "No recipient given";
pub const ERR_NOTEXTTOSEND_STR: &str = "No text to send";
pub const ERR_NOSUCHNICK_STR: &str = "No such nick/channel";
pub const ERR_USERNOTINCHANNEL_STR: &str = "They aren't on that channel";
pub const ERR_CHANOPRIVSNEEDED_STR: &str = "You're not channel operator";
pub const ERR_KEYSET_STR: &str = "Channel key already set";
pub const ERR_UNKNOWNMODE_STR: &str = "is unknown mode char to me";
pub const RPL_NOTOPIC_STR: &str = "No topic is set";
pub const RPL_ENDOFNAMES_STR: &str = "End of /NAMES list.";

/// Default reason used by PART, KICK and QUIT when the client supplies none.
pub const DEFAULT_LEAVE_REASON: &str = "Leaving";

/// Welcome text sent with RPL_WELCOME (001), verbatim per the end-to-end scenarios.
pub const WELCOME_TEXT: &str = "Connected to IRC network successfully!";

/// JOIN/PRIVMSG target-list hard limit (§4.H).
pub const MAX_TARGETS: usize = 10;

/// Maximum number of channels a single client may occupy at once (§4.H JOIN).
pub const MAX_CHANNELS_PER_CLIENT: usize = 10;

/// Maximum bytes read from a socket per readiness event (§4.B).
pub const READ_CHUNK_SIZE: usize = 1024;
