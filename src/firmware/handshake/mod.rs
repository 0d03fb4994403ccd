mod client;
mod matcher;
mod session;
mod socket;

pub use client::HandshakeClient;
pub use matcher::token_matches;
pub use session::HandshakeStats;
pub use socket::{HandshakeSocket, SocketFactory};
