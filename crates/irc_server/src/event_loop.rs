//! Event loop (component I): single-threaded, cooperative, one blocking
//! `Poll::poll` per cycle. The listener lives at `LISTENER`, the signal source
//! at `SIGNAL`, every accepted connection gets the next free token.

use std::io::{ErrorKind, Read, Write};
use std::net::SocketAddr;

use log::{error, info, warn};
use mio::net::TcpListener;
use mio::{Events, Interest, Poll, Token};

use crate::client::Client;
use crate::config::Config;
use crate::constants::READ_CHUNK_SIZE;
use crate::dispatcher;
use crate::errors::{FatalError, TransportError};
use crate::handlers::registration;
use crate::message::Message;
use crate::registry::Registry;
use crate::replies::Reply;
use crate::signals::SignalSource;
use crate::types::{ClientId, LISTENER};

const SIGNAL: Token = Token(1);
const FIRST_CLIENT_TOKEN: usize = 2;

pub struct EventLoop {
    poll: Poll,
    listener: TcpListener,
    signals: SignalSource,
    registry: Registry,
    next_token: usize,
}

impl EventLoop {
    pub fn new(config: &Config) -> Result<Self, FatalError> {
        let addr: SocketAddr = format!("{}:{}", config.bind_address, config.port)
            .parse()
            .map_err(|e| FatalError::Config(format!("invalid bind address: {e}")))?;

        let mut listener = TcpListener::bind(addr).map_err(FatalError::Listener)?;
        let mut poll = Poll::new().map_err(FatalError::Listener)?;

        poll.registry()
            .register(&mut listener, LISTENER, Interest::READABLE)
            .map_err(FatalError::Listener)?;

        let signals = SignalSource::new(&mut poll, SIGNAL)?;

        Ok(EventLoop {
            poll,
            listener,
            signals,
            registry: Registry::new(config.password.clone()),
            next_token: FIRST_CLIENT_TOKEN,
        })
    }

    /// Runs until a shutdown signal is observed. Returns once every socket has
    /// been closed and every collection cleared.
    pub fn run(&mut self) {
        let mut events = Events::with_capacity(1024);

        loop {
            if let Err(e) = self.poll.poll(&mut events, None) {
                if e.kind() == ErrorKind::Interrupted {
                    continue;
                }
                error!("poll failed: {e}");
                break;
            }

            let mut shutdown = false;
            let mut readable: Vec<Token> = Vec::new();
            let mut writable: Vec<Token> = Vec::new();

            for event in events.iter() {
                match event.token() {
                    LISTENER => self.accept_all(),
                    SIGNAL => {
                        if self.signals.poll_shutdown() {
                            shutdown = true;
                        }
                    }
                    token => {
                        if event.is_readable() {
                            readable.push(token);
                        }
                        if event.is_writable() {
                            writable.push(token);
                        }
                    }
                }
            }

            for token in writable {
                self.drain_writes(token);
            }
            for token in readable {
                self.read_and_dispatch(token);
            }

            self.sweep_quitting();

            if shutdown {
                info!("shutdown signal received, closing all connections");
                break;
            }
        }

        self.shutdown();
    }

    fn accept_all(&mut self) {
        loop {
            match self.listener.accept() {
                Ok((mut socket, addr)) => {
                    let token = Token(self.next_token);
                    self.next_token += 1;
                    if let Err(e) = self.poll.registry().register(
                        &mut socket,
                        token,
                        Interest::READABLE | Interest::WRITABLE,
                    ) {
                        error!("failed to register accepted socket: {e}");
                        continue;
                    }
                    info!("accepted connection {addr} as {token:?}");
                    let client = Client::new(token, socket, addr.ip().to_string());
                    self.registry.insert_client(client);
                }
                Err(e) if e.kind() == ErrorKind::WouldBlock => break,
                Err(e) => {
                    warn!("accept failed: {e}");
                    break;
                }
            }
        }
    }

    fn read_and_dispatch(&mut self, token: ClientId) {
        let mut buf = [0u8; READ_CHUNK_SIZE];
        loop {
            let read_result = match self.registry.client_mut(token) {
                Some(client) => client.socket.read(&mut buf),
                None => return,
            };

            match read_result {
                Ok(0) => {
                    self.close_client(token, TransportError::closed());
                    return;
                }
                Ok(n) => {
                    if let Some(client) = self.registry.client_mut(token) {
                        client.buffer.append(&buf[..n]);
                    }
                }
                Err(e) if e.kind() == ErrorKind::WouldBlock => break,
                Err(e) => {
                    error!("read from {token:?} failed: {e}");
                    self.close_client(token, TransportError::io(&e));
                    return;
                }
            }
        }

        let lines = match self.registry.client_mut(token) {
            Some(client) => client.buffer.take_lines(),
            None => return,
        };

        for line in lines {
            dispatcher::dispatch(&mut self.registry, token, &line);
        }

        self.drain_writes(token);
    }

    fn drain_writes(&mut self, token: ClientId) {
        loop {
            let Some(client) = self.registry.client_mut(token) else { return };
            if client.out.is_empty() {
                return;
            }
            let chunk = client.out.make_contiguous();
            match client.socket.write(chunk) {
                Ok(0) => return,
                Ok(n) => {
                    client.out.drain(0..n);
                }
                Err(e) if e.kind() == ErrorKind::WouldBlock => return,
                Err(e) => {
                    warn!("write to {token:?} failed: {e}");
                    return;
                }
            }
        }
    }

    /// Announces the disconnect exactly as QUIT would, then marks the client
    /// quitting so `sweep_quitting` performs the actual teardown.
    fn close_client(&mut self, token: ClientId, reason: TransportError) {
        info!("{token:?} disconnected: {}", reason.reason);
        let fake_quit = Message {
            verb: "QUIT".to_string(),
            args: vec![reason.reason.clone()],
        };
        registration::handle_quit(&mut self.registry, token, &fake_quit);
    }

    fn sweep_quitting(&mut self) {
        let quitting: Vec<ClientId> = self
            .registry
            .clients_iter()
            .filter(|(_, c)| c.quitting)
            .map(|(id, _)| id)
            .collect();

        for id in quitting {
            self.drain_writes(id);
            if let Some(mut client) = self.registry.remove_client(id) {
                let _ = self.poll.registry().deregister(&mut client.socket);
            }
        }
    }

    fn shutdown(&mut self) {
        let all: Vec<ClientId> = self.registry.clients_iter().map(|(id, _)| id).collect();
        for id in all {
            if let Some(client) = self.registry.client(id) {
                let prefix = client.prefix();
                let line = Reply::Quit { prefix: &prefix, reason: "Server shutting down" }.format();
                self.registry.queue_line(id, &line);
            }
            self.drain_writes(id);
            if let Some(mut client) = self.registry.remove_client(id) {
                let _ = self.poll.registry().deregister(&mut client.socket);
            }
        }
        let _ = self.poll.registry().deregister(&mut self.listener);
    }
}
