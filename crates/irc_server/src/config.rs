use crate::errors::FatalError;

/// Validated startup configuration. The binary crate is responsible for turning
/// `argv` into this struct (via `clap`); the core engine never touches `std::env`
/// so it stays testable without a process boundary.
#[derive(Debug, Clone)]
pub struct Config {
    pub server_name: String,
    pub bind_address: String,
    pub port: u16,
    pub password: String,
    /// Intended listen backlog — "the system maximum" per the wire spec.
    /// `std`/`mio` bind with a fixed backlog and expose no way to raise it,
    /// so this is currently documentation of intent rather than a value
    /// threaded through to `listen(2)` (see DESIGN.md).
    pub backlog: u32,
}

impl Config {
    /// Builds a `Config` from the two CLI positionals, applying the same validation
    /// the binary's argument parser would, so embedding code (tests) gets identical
    /// behaviour without going through `std::env::args`.
    pub fn from_cli(port: &str, password: &str) -> Result<Self, FatalError> {
        let port = parse_port(port)?;
        let password = parse_password(password)?;
        Ok(Config {
            server_name: crate::constants::SERVER_NAME.to_string(),
            bind_address: "0.0.0.0".to_string(),
            port,
            password,
            backlog: u32::MAX,
        })
    }
}

fn parse_port(raw: &str) -> Result<u16, FatalError> {
    if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return Err(FatalError::Config(format!(
            "port must be all digits, got {raw:?}"
        )));
    }
    let port: u32 = raw
        .parse()
        .map_err(|_| FatalError::Config(format!("port out of range: {raw}")))?;
    if !(1024..=65535).contains(&port) {
        return Err(FatalError::Config(format!(
            "port must be in [1024, 65535], got {port}"
        )));
    }
    Ok(port as u16)
}

fn parse_password(raw: &str) -> Result<String, FatalError> {
    if raw.is_empty() {
        return Err(FatalError::Config("password must not be empty".to_string()));
    }
    Ok(raw.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_valid_port_and_password() {
        let config = Config::from_cli("6667", "hunter2").unwrap();
        assert_eq!(config.port, 6667);
        assert_eq!(config.password, "hunter2");
    }

    #[test]
    fn rejects_port_below_range() {
        assert!(Config::from_cli("80", "x").is_err());
    }

    #[test]
    fn rejects_non_numeric_port() {
        assert!(Config::from_cli("66a7", "x").is_err());
    }

    #[test]
    fn rejects_empty_password() {
        assert!(Config::from_cli("6667", "").is_err());
    }
}
