//! Nickname and channel-name validators (§4.D), implemented as `nom` combinators
//! over the whole input so a caller gets a clean true/false without dealing with
//! leftover input — these are validators, not parsers embedded in a larger grammar.

use nom::{
    IResult, Parser,
    bytes::complete::take_while,
    character::complete::satisfy,
    combinator::{all_consuming, recognize, verify},
    sequence::pair,
};

const NICK_SPECIAL: &str = "-_[]\\^{}";

fn is_nick_first(c: char) -> bool {
    c.is_ascii_alphabetic()
}

fn is_nick_tail(c: char) -> bool {
    c.is_ascii_alphanumeric() || NICK_SPECIAL.contains(c)
}

fn nickname_grammar(input: &str) -> IResult<&str, &str> {
    recognize(pair(satisfy(is_nick_first), take_while(is_nick_tail))).parse(input)
}

/// Validates a nickname per §4.D: non-empty, first octet alphabetic, remaining
/// octets alphanumeric or one of `-_[]\^{}`.
pub fn is_valid_nickname(nick: &str) -> bool {
    if nick.is_empty() {
        return false;
    }
    all_consuming(nickname_grammar).parse(nick).is_ok()
}

fn is_channel_body_char(c: char) -> bool {
    c != ' ' && c != ',' && c != '\r' && c != '\n' && c != '\0'
}

fn channel_grammar(input: &str) -> IResult<&str, &str> {
    let mut parser = recognize(pair(
        nom::bytes::complete::tag("#"),
        verify(take_while(is_channel_body_char), |s: &str| !s.is_empty()),
    ));
    parser.parse(input)
}

/// Validates a channel name per §3: starts with `#`, contains no whitespace or
/// comma, and has at least one character after the `#`.
pub fn is_valid_channel_name(name: &str) -> bool {
    all_consuming(channel_grammar).parse(name).is_ok()
}
