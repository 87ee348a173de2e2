//! The read-eval-print loop over scripts and the interactive console.

use crate::{
    commands::{parse_line, AppContext, Console, Outcome},
    LeagueError, Result,
};
use std::{
    fs::File,
    io::{BufRead, BufReader, ErrorKind, Write},
    path::Path,
};
use tracing::{info, warn};


/// Marker that starts a comment line in a script
const COMMENT_PREFIX: &str = "--";
const PROMPT: &str = "$ ";

/// One operator session: commands run one at a time against the context.
pub struct Session {
    ctx: AppContext,
}

impl Session {
    pub fn new(ctx: AppContext) -> Self {
        Self { ctx }
    }

    pub fn context(&self) -> &AppContext {
        &self.ctx
    }

    /// Run a startup script. A missing or unreadable file is reported and
    /// the session carries on.
    pub fn run_script(&mut self, path: &Path, out: &mut dyn Write) -> Result<Outcome> {
        let file = match File::open(path) {
            Ok(file) => file,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                warn!(script = %path.display(), "script file not found");
                writeln!(out, "Script file not found: {}", path.display())?;
                return Ok(Outcome::Continue);
            }
            Err(e) => {
                warn!(script = %path.display(), error = %e, "cannot open script");
                writeln!(out, "Cannot read script {}: {}", path.display(), e)?;
                return Ok(Outcome::Continue);
            }
        };

        info!(script = %path.display(), "running script");
        let outcome = self.run_script_from(BufReader::new(file), out)?;
        info!(script = %path.display(), ?outcome, "script finished");
        Ok(outcome)
    }

    /// Execute every line of `reader`. Comment lines are echoed without
    /// their marker; each command is echoed before it runs. A line that is
    /// not UTF-8 is reported and skipped; a read failure ends the script.
    pub fn run_script_from<R: BufRead>(&mut self, mut reader: R, out: &mut dyn Write) -> Result<Outcome> {
        loop {
            let line = match read_command_line(&mut reader) {
                Ok(Some(line)) => line,
                Ok(None) => return Ok(Outcome::Continue),
                Err(e @ LeagueError::Io(_)) => {
                    report_error(out, &e)?;
                    return Ok(Outcome::Continue);
                }
                Err(e) => {
                    report_error(out, &e)?;
                    continue;
                }
            };
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            if let Some(comment) = line.strip_prefix(COMMENT_PREFIX) {
                writeln!(out, "{}", comment.trim_start())?;
                continue;
            }

            writeln!(out, "{}{}", PROMPT, line)?;
            info!(command = line, "script command");
            let mut console = Console::new(&mut *out);
            if self.execute_line(line, &mut console)? == Outcome::Quit {
                return Ok(Outcome::Quit);
            }
        }
    }

    /// Prompt for commands until `quit` or end of input
    pub fn run_interactive<R: BufRead>(&mut self, mut input: R, out: &mut dyn Write) -> Result<Outcome> {
        loop {
            write!(out, "{}", PROMPT)?;
            out.flush()?;

            let line = match read_command_line(&mut input) {
                Ok(Some(line)) => line,
                Ok(None) => {
                    writeln!(out)?;
                    return Ok(Outcome::Continue);
                }
                Err(e @ LeagueError::Io(_)) => {
                    report_error(out, &e)?;
                    return Ok(Outcome::Continue);
                }
                Err(e) => {
                    report_error(out, &e)?;
                    continue;
                }
            };
            let line = line.trim();
            if let Some(comment) = line.strip_prefix(COMMENT_PREFIX) {
                writeln!(out, "{}", comment.trim_start())?;
                continue;
            }

            let mut console = Console::interactive(&mut *out, &mut input);
            if self.execute_line(line, &mut console)? == Outcome::Quit {
                return Ok(Outcome::Quit);
            }
        }
    }

    /// Parse and run one line. Command failures are reported on the
    /// console and do not end the session.
    pub fn execute_line(&mut self, line: &str, console: &mut Console<'_>) -> Result<Outcome> {
        let result = parse_line(line).and_then(|command| match command {
            Some(command) => self.ctx.execute(command, console),
            None => Ok(Outcome::Continue),
        });

        match result {
            Ok(outcome) => Ok(outcome),
            Err(e) => {
                report_error(console.out, &e)?;
                Ok(Outcome::Continue)
            }
        }
    }
}

/// Next line of input, `None` at end of input. Bytes that are not UTF-8
/// give a validation error so the caller can skip the line.
fn read_command_line<R: BufRead>(reader: &mut R) -> Result<Option<String>> {
    let mut bytes = Vec::new();
    if reader.read_until(b'\n', &mut bytes)? == 0 {
        return Ok(None);
    }
    String::from_utf8(bytes).map(Some).map_err(|e| {
        let text = String::from_utf8_lossy(e.as_bytes());
        LeagueError::invalid("line", text.trim_end(), "not valid UTF-8")
    })
}

fn report_error(out: &mut dyn Write, error: &LeagueError) -> Result<()> {
    warn!(category = %error.category(), error = %error, "command failed");
    writeln!(out, "Error[{}]: {}", error.category(), error)?;
    Ok(())
}
