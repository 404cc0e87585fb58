use clap::Parser;
use flexi_logger::{Duplicate, Logger};
use log::error;

use irc_server::{Config, EventLoop};

/// A single-threaded IRC server.
#[derive(Parser, Debug)]
#[command(name = "ircd")]
struct Args {
    /// Port to listen on, in [1024, 65535]
    port: String,
    /// Connection password required of every client's PASS
    password: String,
}

fn main() {
    Logger::try_with_str("info")
        .and_then(|logger| logger.log_to_stderr().duplicate_to_stderr(Duplicate::All).start())
        .ok();

    let args = Args::parse();

    let config = match Config::from_cli(&args.port, &args.password) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{e}");
            std::process::exit(1);
        }
    };

    let mut event_loop = match EventLoop::new(&config) {
        Ok(event_loop) => event_loop,
        Err(e) => {
            error!("{e}");
            std::process::exit(1);
        }
    };

    event_loop.run();
    std::process::exit(0);
}
