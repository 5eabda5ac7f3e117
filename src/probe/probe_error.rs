use std::io;

/// Why a probe came back negative. Only ever logged: callers of the probe API
/// see a plain boolean.
#[derive(thiserror::Error, Debug)]
pub enum ProbeError {
    #[error("refusing to probe malformed address {0:?}")]
    InvalidAddress(String),
    #[error("failed to spawn {program}: {source}")]
    Spawn { program: String, source: io::Error },
    #[error("ping exited with status {0}")]
    NoReply(String),
    #[error("timed out after {0} ms")]
    Timeout(u128),
    #[error("name resolution failed: {0}")]
    Resolution(String),
    #[error("connection refused")]
    Refused,
    #[error("host or network unreachable")]
    Unreachable,
    #[error("i/o error: {0}")]
    Io(io::Error),
}

impl From<io::Error> for ProbeError {
    fn from(e: io::Error) -> Self {
        match e.kind() {
            io::ErrorKind::ConnectionRefused => ProbeError::Refused,
            io::ErrorKind::HostUnreachable | io::ErrorKind::NetworkUnreachable => {
                ProbeError::Unreachable
            }
            io::ErrorKind::TimedOut => ProbeError::Timeout(0),
            _ => ProbeError::Io(e),
        }
    }
}
