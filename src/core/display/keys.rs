//! Key sources: the terminal, or a fixed script.

use super::traits::{KeyCode, KeySource};
use crate::error::DisplayError;
use console::{Key, Term};
use std::collections::VecDeque;
use std::io::{BufRead, IsTerminal};

/// Reads keys from the controlling terminal.
///
/// When stdin is a TTY each key press is read directly, even if stdout is
/// piped (`imgcompare a b | tee log`). Otherwise stdin is read line
/// by line and every non-whitespace character counts as one key press, so
/// `echo "++d" | imgcompare a.png b.png` replays three keys.
pub struct TerminalKeys {
    term: Term,
    single_key: bool,
    pending: VecDeque<char>,
}

impl TerminalKeys {
    pub fn new() -> Self {
        Self::with_single_key(std::io::stdin().is_terminal())
    }

    fn with_single_key(single_key: bool) -> Self {
        Self {
            term: Term::stderr(),
            single_key,
            pending: VecDeque::new(),
        }
    }

    /// True when keys are read one press at a time rather than by line
    pub fn reads_single_keys(&self) -> bool {
        self.single_key
    }

    fn next_buffered(&mut self) -> Result<KeyCode, DisplayError> {
        loop {
            if let Some(c) = self.pending.pop_front() {
                return Ok(KeyCode::from_char(c));
            }

            let mut line = String::new();
            let read = std::io::stdin()
                .lock()
                .read_line(&mut line)
                .map_err(DisplayError::Input)?;
            if read == 0 {
                return Ok(KeyCode::Quit);
            }
            self.pending
                .extend(line.chars().filter(|c| !c.is_whitespace()));
        }
    }
}

impl Default for TerminalKeys {
    fn default() -> Self {
        Self::new()
    }
}

impl KeySource for TerminalKeys {
    fn next_key(&mut self) -> Result<KeyCode, DisplayError> {
        if !self.single_key {
            return self.next_buffered();
        }

        let key = self.term.read_key().map_err(DisplayError::Input)?;
        Ok(match key {
            Key::Escape => KeyCode::Quit,
            Key::Char(c) => KeyCode::from_char(c),
            Key::Enter => KeyCode::Other('\n'),
            _ => KeyCode::Other('?'),
        })
    }
}

/// Replays a fixed sequence of keys, then quits
#[derive(Debug, Clone, Default)]
pub struct ScriptedKeys {
    keys: VecDeque<KeyCode>,
}

impl ScriptedKeys {
    pub fn new(keys: impl IntoIterator<Item = KeyCode>) -> Self {
        Self {
            keys: keys.into_iter().collect(),
        }
    }

    /// One key per non-whitespace character of `script`
    pub fn from_script(script: &str) -> Self {
        Self::new(
            script
                .chars()
                .filter(|c| !c.is_whitespace())
                .map(KeyCode::from_char),
        )
    }

    /// Keys not yet delivered
    pub fn remaining(&self) -> usize {
        self.keys.len()
    }
}

impl KeySource for ScriptedKeys {
    fn next_key(&mut self) -> Result<KeyCode, DisplayError> {
        Ok(self.keys.pop_front().unwrap_or(KeyCode::Quit))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_mode_follows_stdin() {
        let keys = TerminalKeys::new();
        assert_eq!(keys.reads_single_keys(), std::io::stdin().is_terminal());
    }

    #[test]
    fn buffered_mode_splits_lines_into_keys() {
        let mut keys = TerminalKeys::with_single_key(false);
        keys.pending.extend("+d".chars());

        assert!(!keys.reads_single_keys());
        assert_eq!(keys.next_key().unwrap(), KeyCode::Increase);
        assert_eq!(keys.next_key().unwrap(), KeyCode::ToggleOrientation);
    }

    #[test]
    fn script_replays_in_order_then_quits() {
        let mut keys = ScriptedKeys::from_script("+ -d");

        assert_eq!(keys.next_key().unwrap(), KeyCode::Increase);
        assert_eq!(keys.next_key().unwrap(), KeyCode::Decrease);
        assert_eq!(keys.next_key().unwrap(), KeyCode::ToggleOrientation);
        assert_eq!(keys.remaining(), 0);
        assert_eq!(keys.next_key().unwrap(), KeyCode::Quit);
        assert_eq!(keys.next_key().unwrap(), KeyCode::Quit);
    }
}
