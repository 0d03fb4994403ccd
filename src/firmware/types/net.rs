use core::{fmt, net::Ipv4Addr};

/// Typed notifications posted by the radio driver and the DHCP watcher.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NetEvent {
    StationStarted,
    StationDisconnected { reason: u8 },
    AddressAcquired(Ipv4Addr),
}

impl NetEvent {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::StationStarted => "sta_start",
            Self::StationDisconnected { .. } => "sta_disconnected",
            Self::AddressAcquired(_) => "address_acquired",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum JoinState {
    Idle,
    Joining,
    Connected,
    Failed,
}

impl JoinState {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Idle => "Idle",
            Self::Joining => "Joining",
            Self::Connected => "Connected",
            Self::Failed => "Failed",
        }
    }

    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Connected | Self::Failed)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum JoinFailure {
    RetryLimitExceeded { attempts: u8 },
}

impl JoinFailure {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::RetryLimitExceeded { .. } => "retry_limit_exceeded",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum JoinOutcome {
    Success(Ipv4Addr),
    Failure(JoinFailure),
}

impl JoinOutcome {
    pub const fn address(self) -> Option<Ipv4Addr> {
        match self {
            Self::Success(address) => Some(address),
            Self::Failure(_) => None,
        }
    }
}

impl fmt::Display for JoinOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Success(address) => write!(f, "success ip={}", address),
            Self::Failure(failure) => write!(f, "failure reason={}", failure.as_str()),
        }
    }
}

/// Driver bring-up failures; never retried.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InitFailure {
    Configure,
    Start,
}

impl InitFailure {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Configure => "configure",
            Self::Start => "start",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum JoinError {
    FatalInit(InitFailure),
    TimedOut,
    Cancelled,
}

impl JoinError {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::FatalInit(_) => "fatal_init",
            Self::TimedOut => "timed_out",
            Self::Cancelled => "cancelled",
        }
    }
}

impl fmt::Display for JoinError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::FatalInit(failure) => write!(f, "fatal_init stage={}", failure.as_str()),
            other => f.write_str(other.as_str()),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TcpError {
    SocketCreationFailed,
    ConnectFailed,
    ReceiveFailed,
    ConnectionClosed,
}

impl TcpError {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::SocketCreationFailed => "socket_creation_failed",
            Self::ConnectFailed => "connect_failed",
            Self::ReceiveFailed => "receive_failed",
            Self::ConnectionClosed => "connection_closed",
        }
    }
}

impl fmt::Display for TcpError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
