//! Tokenizer (component C): splits one already-extracted line into a verb plus
//! positional arguments, applying the one IRC-specific rule — a token beginning
//! with `:` swallows the rest of the line, spaces included, as the trailing param.

/// A tokenized command line. `verb` is always uppercase; `args` holds every
/// parameter in order, with the trailing parameter (if any) as the last element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub verb: String,
    pub args: Vec<String>,
}

impl Message {
    /// Returns `None` for an empty or whitespace-only line (per §4.C, an empty line
    /// yields no verb).
    pub fn parse(line: &str) -> Option<Message> {
        let mut tokens = Vec::new();
        let mut rest = line;

        loop {
            rest = rest.trim_start_matches(' ');
            if rest.is_empty() {
                break;
            }
            if let Some(trailing) = rest.strip_prefix(':') {
                tokens.push(trailing.to_string());
                break;
            }
            match rest.find(' ') {
                Some(idx) => {
                    tokens.push(rest[..idx].to_string());
                    rest = &rest[idx..];
                }
                None => {
                    tokens.push(rest.to_string());
                    break;
                }
            }
        }

        let mut iter = tokens.into_iter();
        let verb = iter.next()?.to_ascii_uppercase();
        Some(Message {
            verb,
            args: iter.collect(),
        })
    }

    pub fn arg(&self, idx: usize) -> Option<&str> {
        self.args.get(idx).map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_line_yields_no_verb() {
        assert!(Message::parse("").is_none());
        assert!(Message::parse("   ").is_none());
    }

    #[test]
    fn lowercases_verb_is_uppercased() {
        let msg = Message::parse("nick alice").unwrap();
        assert_eq!(msg.verb, "NICK");
        assert_eq!(msg.args, vec!["alice"]);
    }

    #[test]
    fn trailing_rule_consumes_rest_of_line() {
        let msg = Message::parse("PRIVMSG #dev :hello there, world").unwrap();
        assert_eq!(msg.verb, "PRIVMSG");
        assert_eq!(msg.args, vec!["#dev", "hello there, world"]);
    }

    #[test]
    fn trailing_with_no_leading_space() {
        // JOIN 0 / similar shapes with no trailing arg at all
        let msg = Message::parse("QUIT").unwrap();
        assert_eq!(msg.verb, "QUIT");
        assert!(msg.args.is_empty());
    }

    #[test]
    fn trailing_colon_can_be_empty() {
        let msg = Message::parse("TOPIC #dev :").unwrap();
        assert_eq!(msg.args, vec!["#dev", ""]);
    }

    #[test]
    fn multiple_positional_args_before_trailing() {
        let msg = Message::parse("USER guest 0 * :Ronnie Reagan").unwrap();
        assert_eq!(msg.verb, "USER");
        assert_eq!(msg.args, vec!["guest", "0", "*", "Ronnie Reagan"]);
    }

    #[test]
    fn collapses_extra_internal_whitespace_between_positionals() {
        let msg = Message::parse("NICK   alice").unwrap();
        assert_eq!(msg.args, vec!["alice"]);
    }
}
