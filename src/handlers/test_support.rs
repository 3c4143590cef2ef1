//! In-process harness for driving the command layer in tests.

use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::Mutex;
use tinyirc_proto::{Message, MessageRef, Response};

use crate::config::ServerConfig;
use crate::error::HandlerResult;
use crate::handlers::{Context, Registry};
use crate::state::{Matrix, Responder, Uid};

pub const SERVER: &str = "irc.test";
pub const PASSWORD: &str = "secret";

/// Records every delivered message instead of writing it anywhere.
#[derive(Default)]
pub struct RecordingResponder {
    sent: Mutex<Vec<(Uid, Message)>>,
}

#[async_trait]
impl Responder for RecordingResponder {
    async fn send(&self, uid: &str, msg: Message) {
        self.sent.lock().push((uid.to_string(), msg));
    }
}

/// A server without sockets.
#[derive(Clone)]
pub struct Harness {
    pub matrix: Arc<Matrix>,
    pub registry: Arc<Registry>,
    responder: Arc<RecordingResponder>,
}

impl Harness {
    pub fn new() -> Self {
        let config = ServerConfig {
            name: SERVER.to_string(),
            network: "TestNet".to_string(),
            password: PASSWORD.to_string(),
            description: String::new(),
        };
        let responder = Arc::new(RecordingResponder::default());
        let matrix = Arc::new(Matrix::new(&config, responder.clone()));
        Self {
            matrix,
            registry: Arc::new(Registry::new()),
            responder,
        }
    }

    /// A fresh, unregistered connection.
    pub fn connect(&self) -> Uid {
        self.matrix.add_client("127.0.0.1".to_string())
    }

    /// Run one raw line as if `uid` had sent it.
    pub async fn send(&self, uid: &str, line: &str) -> HandlerResult {
        let msg = MessageRef::parse(line).expect("test line parses");
        let ctx = Context::new(uid, &self.matrix);
        self.registry.dispatch(&ctx, &msg).await
    }

    /// Connect and complete registration as `nick`; the welcome burst is
    /// discarded.
    pub async fn register(&self, nick: &str) -> Uid {
        let uid = self.connect();
        self.send(&uid, &format!("PASS {PASSWORD}")).await.unwrap();
        self.send(&uid, &format!("NICK {nick}")).await.unwrap();
        self.send(&uid, &format!("USER {nick} 0 * :{nick} Test"))
            .await
            .unwrap();
        let welcome = self.take(&uid);
        assert!(
            welcome.iter().any(|m| m.is_response(Response::RPL_WELCOME)),
            "{nick} did not register: {welcome:?}"
        );
        uid
    }

    /// Register `nick` and join it to `channel`, discarding the replies of
    /// everyone involved.
    pub async fn register_in(&self, nick: &str, channel: &str) -> Uid {
        let uid = self.register(nick).await;
        self.send(&uid, &format!("JOIN {channel}")).await.unwrap();
        self.clear();
        uid
    }

    /// Remove and return everything delivered to `uid` so far.
    pub fn take(&self, uid: &str) -> Vec<Message> {
        let mut sent = self.responder.sent.lock();
        let (mine, rest): (Vec<_>, Vec<_>) = sent.drain(..).partition(|(to, _)| to == uid);
        *sent = rest;
        mine.into_iter().map(|(_, msg)| msg).collect()
    }

    /// Messages delivered to `uid` with the given command or numeric.
    pub fn take_command(&self, uid: &str, command: &str) -> Vec<Message> {
        self.take(uid)
            .into_iter()
            .filter(|m| m.command == command)
            .collect()
    }

    pub fn clear(&self) {
        self.responder.sent.lock().clear();
    }

    /// Numeric codes delivered to `uid`, in order.
    pub fn numerics(&self, uid: &str) -> Vec<u16> {
        self.take(uid)
            .iter()
            .filter_map(|m| m.numeric().map(|r| r.code()))
            .collect()
    }
}
