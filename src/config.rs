//! Host command-line configuration
//!
//! ```text
//! moisture_host [--port <PORT>] [--baud <RATE>]
//! moisture_host --replay <FILE>
//! ```

use std::path::PathBuf;

use thiserror::Error;

use crate::adapters::serial::DEFAULT_BAUD_RATE;

#[cfg(target_os = "windows")]
pub const DEFAULT_PORT: &str = "COM3";
#[cfg(not(target_os = "windows"))]
pub const DEFAULT_PORT: &str = "/dev/ttyACM0";

pub const USAGE: &str = "\
Usage: moisture_host [OPTIONS]

Options:
  --port <PORT>    Serial port of the sensor (default: /dev/ttyACM0, COM3 on Windows)
  --baud <RATE>    Baud rate (default: 115200)
  --replay <FILE>  Replay a captured log instead of opening a port
  --help           Show this help";

/// Where the monitor reads from
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Endpoint {
    Serial { port: String, baud: u32 },
    /// Captured log file
    Replay(PathBuf),
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ArgsError {
    #[error("help requested")]
    HelpRequested,

    #[error("missing value for {0}")]
    MissingValue(&'static str),

    #[error("invalid baud rate: {0}")]
    InvalidBaud(String),

    #[error("--replay cannot be combined with --port or --baud")]
    ConflictingEndpoints,

    #[error("unknown argument: {0}")]
    Unknown(String),
}

/// Parsed host arguments
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HostArgs {
    pub endpoint: Endpoint,
}

impl HostArgs {
    /// Parse arguments, excluding the program name
    pub fn parse<I, S>(args: I) -> Result<Self, ArgsError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut port = None;
        let mut baud = None;
        let mut replay = None;

        let mut args = args.into_iter().map(Into::into);
        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--help" | "-h" => return Err(ArgsError::HelpRequested),
                "--port" | "-p" => {
                    port = Some(args.next().ok_or(ArgsError::MissingValue("--port"))?);
                }
                "--baud" | "-b" => {
                    let value = args.next().ok_or(ArgsError::MissingValue("--baud"))?;
                    let rate = value
                        .parse::<u32>()
                        .ok()
                        .filter(|rate| *rate > 0)
                        .ok_or(ArgsError::InvalidBaud(value))?;
                    baud = Some(rate);
                }
                "--replay" | "-r" => {
                    let value = args.next().ok_or(ArgsError::MissingValue("--replay"))?;
                    replay = Some(PathBuf::from(value));
                }
                _ => return Err(ArgsError::Unknown(arg)),
            }
        }

        let endpoint = match replay {
            Some(_) if port.is_some() || baud.is_some() => {
                return Err(ArgsError::ConflictingEndpoints)
            }
            Some(path) => Endpoint::Replay(path),
            None => Endpoint::Serial {
                port: port.unwrap_or_else(|| DEFAULT_PORT.to_string()),
                baud: baud.unwrap_or(DEFAULT_BAUD_RATE),
            },
        };

        Ok(Self { endpoint })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Result<HostArgs, ArgsError> {
        HostArgs::parse(args.iter().copied())
    }

    #[test]
    fn test_defaults() {
        assert_eq!(
            parse(&[]).unwrap().endpoint,
            Endpoint::Serial {
                port: DEFAULT_PORT.to_string(),
                baud: DEFAULT_BAUD_RATE,
            }
        );
    }

    #[test]
    fn test_port_and_baud() {
        assert_eq!(
            parse(&["--port", "COM7", "--baud", "9600"]).unwrap().endpoint,
            Endpoint::Serial {
                port: "COM7".to_string(),
                baud: 9600,
            }
        );
    }

    #[test]
    fn test_replay() {
        assert_eq!(
            parse(&["-r", "capture.log"]).unwrap().endpoint,
            Endpoint::Replay(PathBuf::from("capture.log"))
        );
    }

    #[test]
    fn test_errors() {
        assert_eq!(parse(&["--help"]), Err(ArgsError::HelpRequested));
        assert_eq!(parse(&["--port"]), Err(ArgsError::MissingValue("--port")));
        assert_eq!(
            parse(&["--baud", "fast"]),
            Err(ArgsError::InvalidBaud("fast".to_string()))
        );
        assert_eq!(
            parse(&["--baud", "0"]),
            Err(ArgsError::InvalidBaud("0".to_string()))
        );
        assert_eq!(
            parse(&["--replay", "a.log", "--port", "COM3"]),
            Err(ArgsError::ConflictingEndpoints)
        );
        assert_eq!(
            parse(&["--list-ports"]),
            Err(ArgsError::Unknown("--list-ports".to_string()))
        );
    }
}
