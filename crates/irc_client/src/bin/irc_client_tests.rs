//! Manual smoke-test client: connects, registers, joins a channel, sends one
//! message, and prints whatever the server sends back for a few seconds.
//! Not part of the server core — a hand-run tool for poking a live `ircd`.

use std::env;
use std::io::{BufRead, BufReader, Write};
use std::net::TcpStream;
use std::thread;
use std::time::Duration;

fn main() -> std::io::Result<()> {
    let mut args = env::args().skip(1);
    let addr = args.next().unwrap_or_else(|| "127.0.0.1:6667".to_string());
    let password = args.next().unwrap_or_else(|| "hunter2".to_string());
    let nick = args.next().unwrap_or_else(|| "smoketest".to_string());

    let stream = TcpStream::connect(&addr)?;
    let mut reader = BufReader::new(stream.try_clone()?);
    let mut writer = stream;

    let reply_thread = thread::spawn(move || {
        let mut line = String::new();
        loop {
            line.clear();
            match reader.read_line(&mut line) {
                Ok(0) | Err(_) => break,
                Ok(_) => print!("<< {line}"),
            }
        }
    });

    let login = format!("PASS {password}\r\nNICK {nick}\r\nUSER {nick} 0 * :Smoke Test\r\n");
    writer.write_all(login.as_bytes())?;
    writer.write_all(b"JOIN #smoketest\r\n")?;
    writer.write_all(format!("PRIVMSG #smoketest :hello from {nick}\r\n").as_bytes())?;

    thread::sleep(Duration::from_secs(2));
    writer.write_all(b"QUIT :done\r\n")?;
    drop(writer);
    let _ = reply_thread.join();
    Ok(())
}
