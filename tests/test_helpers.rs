//! Test helpers for integration tests
//!
//! Provides a mock Minecraft RCON server with an in-memory whitelist that
//! answers with vanilla server phrases, plus misbehaving variants.

#![allow(dead_code)]

use rcon_whitelist::command::CommandTemplates;
use rcon_whitelist::config::RconConfig;
use rcon_whitelist::protocol::{Packet, decode, write_packet};
use rcon_whitelist::types::{HostName, OperationTimeout, Password, Port, RconTimeout};
use rcon_whitelist::WhitelistClient;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::io::AsyncWriteExt;
use tokio::net::{TcpListener, TcpStream};
use tokio::task::JoinHandle;

/// Password the mock server accepts
pub const PASSWORD: &str = "secret";

/// How the mock server treats each session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Behavior {
    /// Vanilla server semantics
    Normal,
    /// Accept TCP, never answer anything
    Silent,
    /// Accept the login, never answer the command
    SilentAfterAuth,
    /// Answer the command with the wrong request id
    WrongCommandId,
    /// Accept the login, then send half a frame and hang up
    TruncateReply,
    /// Reply to every command with this fixed text
    Fixed(&'static str),
}

/// Handle to a running mock server
pub struct MockRcon {
    pub port: Port,
    /// Whitelist in insertion order
    pub whitelist: Arc<Mutex<Vec<String>>>,
    /// Every command body received, in order
    pub commands: Arc<Mutex<Vec<String>>>,
    /// TCP connections accepted (probes included)
    pub connections: Arc<AtomicUsize>,
    handle: JoinHandle<()>,
}

impl MockRcon {
    pub fn connection_count(&self) -> usize {
        self.connections.load(Ordering::SeqCst)
    }

    pub fn received_commands(&self) -> Vec<String> {
        self.commands.lock().unwrap().clone()
    }

    pub fn players(&self) -> Vec<String> {
        self.whitelist.lock().unwrap().clone()
    }
}

impl Drop for MockRcon {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

/// Spawn a mock RCON server on an ephemeral port
pub async fn spawn_mock_rcon(behavior: Behavior) -> MockRcon {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port = Port::try_from(listener.local_addr().unwrap().port()).unwrap();

    let whitelist = Arc::new(Mutex::new(Vec::new()));
    let commands = Arc::new(Mutex::new(Vec::new()));
    let connections = Arc::new(AtomicUsize::new(0));

    let handle = {
        let whitelist = whitelist.clone();
        let commands = commands.clone();
        let connections = connections.clone();
        tokio::spawn(async move {
            while let Ok((stream, _)) = listener.accept().await {
                connections.fetch_add(1, Ordering::SeqCst);
                let whitelist = whitelist.clone();
                let commands = commands.clone();
                tokio::spawn(async move {
                    serve(stream, behavior, whitelist, commands).await;
                });
            }
        })
    };

    MockRcon {
        port,
        whitelist,
        commands,
        connections,
        handle,
    }
}

async fn serve(
    mut stream: TcpStream,
    behavior: Behavior,
    whitelist: Arc<Mutex<Vec<String>>>,
    commands: Arc<Mutex<Vec<String>>>,
) {
    // Probes connect and hang up without sending anything
    let Ok(login) = decode(&mut stream).await else {
        return;
    };

    if behavior == Behavior::Silent {
        hold_open().await;
        return;
    }

    let auth_id = if login.body == PASSWORD { login.request_id } else { -1 };
    if write_packet(&mut stream, &Packet::new(auth_id, 2, "")).await.is_err() || auth_id == -1 {
        return;
    }

    let Ok(command) = decode(&mut stream).await else {
        return;
    };
    commands.lock().unwrap().push(command.body.clone());

    match behavior {
        Behavior::SilentAfterAuth => hold_open().await,
        Behavior::WrongCommandId => {
            let _ = write_packet(&mut stream, &Packet::new(command.request_id + 40, 0, "stale")).await;
        }
        Behavior::TruncateReply => {
            let frame = Packet::new(command.request_id, 0, "Added Steve123 to the whitelist").to_bytes();
            let _ = stream.write_all(&frame[..frame.len() / 2]).await;
            let _ = stream.shutdown().await;
        }
        Behavior::Fixed(text) => {
            let _ = write_packet(&mut stream, &Packet::new(command.request_id, 0, text)).await;
        }
        Behavior::Normal | Behavior::Silent => {
            let reply = vanilla_reply(&command.body, &whitelist);
            let _ = write_packet(&mut stream, &Packet::new(command.request_id, 0, reply)).await;
        }
    }
}

async fn hold_open() {
    tokio::time::sleep(Duration::from_secs(30)).await;
}

/// Reply the way a vanilla server does
fn vanilla_reply(command: &str, whitelist: &Mutex<Vec<String>>) -> String {
    let words: Vec<&str> = command.split_whitespace().collect();
    let mut list = whitelist.lock().unwrap();

    match words.as_slice() {
        ["whitelist", "add", name] => {
            if list.iter().any(|p| p.eq_ignore_ascii_case(name)) {
                "Player is already whitelisted".to_string()
            } else {
                list.push(name.to_string());
                format!("Added {} to the whitelist", name)
            }
        }
        ["whitelist", "remove", name] => {
            match list.iter().position(|p| p.eq_ignore_ascii_case(name)) {
                Some(index) => {
                    list.remove(index);
                    format!("Removed {} from the whitelist", name)
                }
                None => "Player is not whitelisted".to_string(),
            }
        }
        ["whitelist", "list"] if list.is_empty() => {
            "There are no whitelisted players".to_string()
        }
        ["whitelist", "list"] => format!(
            "There are {} whitelisted players: {}",
            list.len(),
            list.join(", ")
        ),
        ["lp", "user", name, "permission", "set", node] => format!(
            "§3LP §7» §aSet §b{}§a to §btrue§a for §b{}§a in context global.",
            node, name
        ),
        _ => "Unknown or incomplete command, see below for error".to_string(),
    }
}

/// Connection parameters pointing at a mock server
pub fn rcon_config(port: Port, password: &str) -> RconConfig {
    RconConfig::new(
        HostName::new("127.0.0.1".to_string()).unwrap(),
        Password::new(password.to_string()).unwrap(),
    )
    .with_port(port)
}

/// Client for a mock server with short timeouts
pub fn client_for(mock: &MockRcon) -> WhitelistClient {
    client_with(
        rcon_config(mock.port, PASSWORD)
            .with_timeout(RconTimeout::new(Duration::from_millis(500)))
            .with_operation_timeout(OperationTimeout::new(Duration::from_secs(3))),
    )
}

pub fn client_with(rcon: RconConfig) -> WhitelistClient {
    WhitelistClient::new(rcon, CommandTemplates::default())
}
