//! The plain-text query wire format.
//!
//! This is a public, stable contract consumed by third-party status checkers;
//! the shape documented here never changes.
//!
//! # Protocol
//!
//! One request, one response, then the server closes the connection:
//!
//! * **Request**: a single line terminated by `\n`. The content of the line is
//!   not inspected - any complete line triggers exactly one response. The
//!   conventional trigger sent by client tooling is the line `QUERY`.
//! * **Response**: three base-10 decimal fields, one per line, each terminated
//!   by `\n`, in fixed order:
//!
//!   ```text
//!   <currentPlayers>
//!   <maxPlayers>
//!   <port>
//!   ```

use crate::snapshot::StatusSnapshot;
use std::str::FromStr;
use thiserror::Error;

/// The conventional request line sent by client tooling (without the
/// terminating newline).
pub const REQUEST_TRIGGER: &str = "QUERY";

/// Encodes a snapshot into the wire response, trailing newline included.
pub fn encode_status(snapshot: &StatusSnapshot) -> String {
    format!(
        "{}\n{}\n{}\n",
        snapshot.current_players, snapshot.max_players, snapshot.port
    )
}

/// Errors produced by the reference decoder on malformed responses.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum WireError {
    #[error("response is missing the {0} field")]
    MissingField(&'static str),

    #[error("invalid {field} field `{value}`")]
    InvalidField { field: &'static str, value: String },
}

/// Reference decoder for the response format.
///
/// Client tooling (and the integration tests) use this to turn a response
/// back into the `(currentPlayers, maxPlayers, port)` tuple.
pub fn decode_status(text: &str) -> Result<StatusSnapshot, WireError> {
    let mut lines = text.lines();
    let current_players = parse_field(lines.next(), "current players")?;
    let max_players = parse_field(lines.next(), "max players")?;
    let port = parse_field(lines.next(), "port")?;
    Ok(StatusSnapshot {
        current_players,
        max_players,
        port,
    })
}

fn parse_field<T: FromStr>(line: Option<&str>, field: &'static str) -> Result<T, WireError> {
    let value = line.ok_or(WireError::MissingField(field))?;
    value.trim().parse().map_err(|_| WireError::InvalidField {
        field,
        value: value.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_reference_example() {
        let snapshot = StatusSnapshot {
            current_players: 17,
            max_players: 32,
            port: 25566,
        };
        assert_eq!(encode_status(&snapshot), "17\n32\n25566\n");
    }

    #[test]
    fn test_round_trip() {
        let snapshot = StatusSnapshot {
            current_players: 0,
            max_players: 100,
            port: 4242,
        };
        assert_eq!(decode_status(&encode_status(&snapshot)), Ok(snapshot));
    }

    #[test]
    fn test_decode_rejects_truncated_response() {
        assert_eq!(
            decode_status("17\n32\n"),
            Err(WireError::MissingField("port"))
        );
        assert_eq!(
            decode_status(""),
            Err(WireError::MissingField("current players"))
        );
    }

    #[test]
    fn test_decode_rejects_non_numeric_fields() {
        assert_eq!(
            decode_status("seventeen\n32\n25566\n"),
            Err(WireError::InvalidField {
                field: "current players",
                value: "seventeen".to_string(),
            })
        );
        // Port must fit in u16.
        assert!(matches!(
            decode_status("17\n32\n99999\n"),
            Err(WireError::InvalidField { field: "port", .. })
        ));
    }
}
