use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConnectivityError {
    InvalidArgument(String),
    Platform(String),
    Resolution(String),
    ConnectionFailed(String),
    Timeout,
    Io(String),
    Config(String),
}

impl fmt::Display for ConnectivityError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConnectivityError::InvalidArgument(msg) => write!(f, "Invalid argument: {}", msg),
            ConnectivityError::Platform(msg) => write!(f, "Platform query failed: {}", msg),
            ConnectivityError::Resolution(msg) => write!(f, "Name resolution failed: {}", msg),
            ConnectivityError::ConnectionFailed(msg) => write!(f, "Connection failed: {}", msg),
            ConnectivityError::Timeout => write!(f, "Operation timed out"),
            ConnectivityError::Io(msg) => write!(f, "IO error: {}", msg),
            ConnectivityError::Config(msg) => write!(f, "Configuration error: {}", msg),
        }
    }
}

impl std::error::Error for ConnectivityError {}

impl From<std::io::Error> for ConnectivityError {
    fn from(e: std::io::Error) -> Self {
        match e.kind() {
            std::io::ErrorKind::TimedOut => ConnectivityError::Timeout,
            _ => ConnectivityError::Io(e.to_string()),
        }
    }
}

pub type Result<T> = std::result::Result<T, ConnectivityError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_io_timeout_maps_to_timeout() {
        let err: ConnectivityError = std::io::Error::new(std::io::ErrorKind::TimedOut, "slow").into();
        assert_eq!(err, ConnectivityError::Timeout);
    }

    #[test]
    fn test_display_invalid_argument() {
        let err = ConnectivityError::InvalidArgument("host".to_string());
        assert_eq!(err.to_string(), "Invalid argument: host");
    }
}
