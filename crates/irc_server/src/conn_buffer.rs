//! Connection buffer (component B): turns arbitrary TCP chunks into whole
//! CR-LF (or bare-LF, for client leniency) terminated lines. Bytes are appended
//! on every readable event and a parse sweep extracts every complete line,
//! leaving any partial trailing bytes for the next read.

#[derive(Debug, Default)]
pub struct ConnBuffer {
    bytes: Vec<u8>,
}

impl ConnBuffer {
    pub fn new() -> Self {
        ConnBuffer::default()
    }

    pub fn append(&mut self, chunk: &[u8]) {
        self.bytes.extend_from_slice(chunk);
    }

    /// Extracts every complete line currently buffered, in arrival order.
    /// Whitespace-only lines are dropped (but still consumed). Bare CR never
    /// terminates a line on its own; bare LF does.
    pub fn take_lines(&mut self) -> Vec<String> {
        let mut lines = Vec::new();
        let mut start = 0usize;

        while let Some(nl_rel) = self.bytes[start..].iter().position(|&b| b == b'\n') {
            let nl = start + nl_rel;
            let mut end = nl;
            if end > start && self.bytes[end - 1] == b'\r' {
                end -= 1;
            }
            let raw = &self.bytes[start..end];
            if !raw.iter().all(|&b| b == b' ' || b == b'\t') {
                lines.push(String::from_utf8_lossy(raw).into_owned());
            }
            start = nl + 1;
        }

        self.bytes.drain(0..start);
        lines
    }

    #[cfg(test)]
    pub fn pending_len(&self) -> usize {
        self.bytes.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_single_crlf_line() {
        let mut buf = ConnBuffer::new();
        buf.append(b"NICK alice\r\n");
        assert_eq!(buf.take_lines(), vec!["NICK alice"]);
        assert_eq!(buf.pending_len(), 0);
    }

    #[test]
    fn accepts_bare_lf() {
        let mut buf = ConnBuffer::new();
        buf.append(b"NICK alice\n");
        assert_eq!(buf.take_lines(), vec!["NICK alice"]);
    }

    #[test]
    fn bare_cr_does_not_terminate() {
        let mut buf = ConnBuffer::new();
        buf.append(b"NICK al\rice\n");
        assert_eq!(buf.take_lines(), vec!["NICK al\rice"]);
    }

    #[test]
    fn partial_trailing_bytes_wait_for_next_read() {
        let mut buf = ConnBuffer::new();
        buf.append(b"NICK al");
        assert!(buf.take_lines().is_empty());
        buf.append(b"ice\r\nUSER alice 0 * :Alice A.\r\n");
        assert_eq!(
            buf.take_lines(),
            vec!["NICK alice", "USER alice 0 * :Alice A."]
        );
    }

    #[test]
    fn whitespace_only_lines_are_dropped() {
        let mut buf = ConnBuffer::new();
        buf.append(b"   \r\nNICK alice\r\n\r\n");
        assert_eq!(buf.take_lines(), vec!["NICK alice"]);
    }

    #[test]
    fn exactly_once_across_read_boundaries() {
        let mut buf = ConnBuffer::new();
        buf.append(b"JOIN #dev\r\nPART #");
        assert_eq!(buf.take_lines(), vec!["JOIN #dev"]);
        buf.append(b"dev\r\n");
        assert_eq!(buf.take_lines(), vec!["PART #dev"]);
    }
}
