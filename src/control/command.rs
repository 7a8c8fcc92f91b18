use crate::error::{Error, Result};
use crate::utils::consts::{MAX_FREQ_HZ, PROMPT, RETUNE_MARKER};
use crossbeam_channel::Sender;
use std::io::{BufRead, IsTerminal};
use tracing::{debug, warn};

/// Operator request for the control thread.
#[derive(Clone, Debug, PartialEq)]
pub enum Command {
    /// Send a line of text
    Transmit(String),
    /// Move the center frequency without transmitting
    Retune(u64),
    Quit,
}

impl Command {
    /// Parse one input line. Blank lines are ignored.
    pub fn parse(line: &str) -> Result<Option<Command>> {
        let line = line.trim_end_matches(['\r', '\n']);
        if line.trim().is_empty() {
            return Ok(None);
        }

        let Some(freq) = line.strip_prefix(RETUNE_MARKER) else {
            return Ok(Some(Command::Transmit(line.to_string())));
        };

        let invalid = |reason: &str| Error::Command {
            line: line.to_string(),
            reason: reason.to_string(),
        };
        let hz: f64 = freq
            .trim()
            .parse()
            .map_err(|_| invalid("frequency is not a number"))?;
        if !hz.is_finite() || hz < 1.0 || hz > MAX_FREQ_HZ as f64 {
            return Err(invalid("frequency out of range"));
        }
        Ok(Some(Command::Retune(hz.round() as u64)))
    }
}

/// Forward commands from `reader` until EOF, then send [`Command::Quit`].
pub fn read_commands(reader: impl BufRead, tx: &Sender<Command>) {
    for line in reader.lines() {
        let line = match line {
            Ok(line) => line,
            Err(e) => {
                warn!("Input error: {}", e);
                break;
            }
        };
        if !forward(&line, tx) {
            return;
        }
    }
    let _ = tx.send(Command::Quit);
}

/// Prompted input on a terminal, plain line reading otherwise.
pub fn read_operator_input(tx: Sender<Command>) {
    let stdin = std::io::stdin();
    if !stdin.is_terminal() {
        read_commands(stdin.lock(), &tx);
        return;
    }

    loop {
        let line = dialoguer::Input::<String>::new()
            .with_prompt(PROMPT)
            .allow_empty(true)
            .interact_text();
        match line {
            Ok(line) => {
                if !forward(&line, &tx) {
                    return;
                }
            }
            Err(e) => {
                debug!("Prompt closed: {}", e);
                break;
            }
        }
    }
    let _ = tx.send(Command::Quit);
}

/// Returns false once the control thread has gone away.
fn forward(line: &str, tx: &Sender<Command>) -> bool {
    match Command::parse(line) {
        Ok(Some(command)) => tx.send(command).is_ok(),
        Ok(None) => true,
        Err(e) => {
            warn!("{}", e);
            true
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_parse_text() {
        assert_eq!(
            Command::parse("CQ CQ DE N0CALL\n").unwrap(),
            Some(Command::Transmit("CQ CQ DE N0CALL".to_string()))
        );
        assert_eq!(Command::parse("   \r\n").unwrap(), None);
    }

    #[test]
    fn test_parse_retune() {
        assert_eq!(
            Command::parse("@433920000").unwrap(),
            Some(Command::Retune(433_920_000))
        );
        assert_eq!(
            Command::parse("@ 1.25e9").unwrap(),
            Some(Command::Retune(1_250_000_000))
        );
    }

    #[test]
    fn test_parse_bad_retune() {
        assert!(matches!(
            Command::parse("@abc"),
            Err(Error::Command { .. })
        ));
        assert!(Command::parse("@-5").is_err());
        assert!(Command::parse("@").is_err());
    }

    #[test]
    fn test_parse_huge_retune() {
        assert!(matches!(
            Command::parse("@18446744073709551000"),
            Err(Error::Command { .. })
        ));
        assert!(Command::parse("@1e12").is_err());
        assert_eq!(
            Command::parse(&format!("@{}", MAX_FREQ_HZ)).unwrap(),
            Some(Command::Retune(MAX_FREQ_HZ))
        );
    }

    #[test]
    fn test_read_commands() {
        let (tx, rx) = crossbeam_channel::unbounded();
        let input = Cursor::new("HELLO\n\n@1e6\n@oops\nBYE\n");
        read_commands(input, &tx);

        let commands: Vec<Command> = rx.try_iter().collect();
        assert_eq!(
            commands,
            vec![
                Command::Transmit("HELLO".to_string()),
                Command::Retune(1_000_000),
                Command::Transmit("BYE".to_string()),
                Command::Quit,
            ]
        );
    }
}
