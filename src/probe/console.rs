use std::io::{self, Write};

use super::{Console, ProbeError};

/// Erase the display and home the cursor.
const CLEAR_SCREEN: &str = "\x1B[2J\x1B[1;1H";

/// Console backed by the process's stdout.
#[derive(Debug, Default)]
pub struct StdoutConsole;

impl Console for StdoutConsole {
    fn clear(&mut self) -> Result<(), ProbeError> {
        let mut out = io::stdout().lock();
        out.write_all(CLEAR_SCREEN.as_bytes())
            .and_then(|_| out.flush())
            .map_err(ProbeError::Clear)
    }

    fn write_text(&mut self, text: &str) -> Result<(), ProbeError> {
        let mut out = io::stdout().lock();
        out.write_all(text.as_bytes())
            .and_then(|_| out.flush())
            .map_err(ProbeError::Write)
    }
}
