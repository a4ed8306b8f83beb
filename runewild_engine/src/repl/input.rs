//! Terminal input handling for the Runewild REPL.
//!
//! Wraps rustyline configuration and completion for the game's command words,
//! with a plain stdin fallback when stdin is not a terminal. Everything that reads
//! player input goes through the [`LineReader`] trait so tests can script it.

use std::collections::VecDeque;
use std::fs;
use std::io::{self, IsTerminal, Write};
use std::path::{Path, PathBuf};

use log::{info, warn};
use rustyline::completion::{Completer, Pair};
use rustyline::error::ReadlineError;
use rustyline::highlight::Highlighter;
use rustyline::hint::Hinter;
use rustyline::history::DefaultHistory;
use rustyline::validate::Validator;
use rustyline::{Context, Editor, Helper};

/// Outcome of reading a line of player input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputEvent {
    Line(String),
    Eof,
    Interrupted,
}

/// Source of player input lines.
pub trait LineReader {
    /// Show `prompt` and block until a line, end of input, or an interrupt.
    ///
    /// # Errors
    /// - on an unrecoverable I/O failure
    fn read_line(&mut self, prompt: &str) -> io::Result<InputEvent>;
}

const COMMAND_TERMS: &[&str] = &[
    "go", "help", "inspect", "inventory", "look", "quests", "quit", "save", "take", "talk", "use",
];

/// Completes the first word of a line against [`COMMAND_TERMS`].
struct VerbCompleter;

impl Helper for VerbCompleter {}
impl Hinter for VerbCompleter {
    type Hint = String;
}
impl Highlighter for VerbCompleter {}
impl Validator for VerbCompleter {}

impl Completer for VerbCompleter {
    type Candidate = Pair;

    fn complete(&self, line: &str, pos: usize, _ctx: &Context<'_>) -> rustyline::Result<(usize, Vec<Pair>)> {
        let typed = &line[..pos];
        let verb = typed.trim_start();
        let offset = typed.len() - verb.len();
        if verb.is_empty() || verb.contains(char::is_whitespace) {
            return Ok((offset, Vec::new()));
        }
        let verb = verb.to_lowercase();
        let matches = COMMAND_TERMS
            .iter()
            .filter(|term| term.starts_with(&verb))
            .map(|term| Pair {
                display: (*term).to_string(),
                replacement: (*term).to_string(),
            })
            .collect();
        Ok((offset, matches))
    }
}

/// Interactive input: a line editor with history on a TTY, plain stdin otherwise.
pub enum InputManager {
    Terminal(Box<TerminalInput>),
    Piped,
}

impl Default for InputManager {
    fn default() -> Self {
        Self::new()
    }
}

impl InputManager {
    pub fn new() -> Self {
        if !io::stdin().is_terminal() {
            info!("stdin is not a terminal; reading plain lines");
            return Self::Piped;
        }
        match TerminalInput::open(history_file()) {
            Ok(terminal) => Self::Terminal(Box::new(terminal)),
            Err(err) => {
                warn!("line editor unavailable ({err}); reading plain lines");
                Self::Piped
            },
        }
    }
}

impl LineReader for InputManager {
    /// A failing line editor is dropped in favor of plain stdin for the rest of the session.
    fn read_line(&mut self, prompt: &str) -> io::Result<InputEvent> {
        let Self::Terminal(terminal) = self else {
            return read_stdin_line(prompt);
        };
        match terminal.read_line(prompt) {
            Err(err) => {
                warn!("line editor failed ({err}); switching to plain stdin");
                *self = Self::Piped;
                read_stdin_line(prompt)
            },
            event => event,
        }
    }
}

/// rustyline editor plus the file its history is kept in.
pub struct TerminalInput {
    editor: Editor<VerbCompleter, DefaultHistory>,
    history: Option<PathBuf>,
}

impl TerminalInput {
    fn open(history: Option<PathBuf>) -> io::Result<Self> {
        let mut editor = Editor::new().map_err(readline_to_io)?;
        editor.set_helper(Some(VerbCompleter));
        if let Some(path) = &history {
            if let Some(dir) = path.parent() {
                fs::create_dir_all(dir)?;
            }
            match editor.load_history(path) {
                Ok(()) => info!("loaded command history from {}", path.display()),
                Err(ReadlineError::Io(err)) if err.kind() == io::ErrorKind::NotFound => {},
                Err(err) => warn!("ignoring unreadable history {}: {err}", path.display()),
            }
        }
        Ok(Self { editor, history })
    }

    fn read_line(&mut self, prompt: &str) -> io::Result<InputEvent> {
        let line = match self.editor.readline(prompt) {
            Ok(line) => line,
            Err(err) => return readline_event(err),
        };
        if !line.trim().is_empty() {
            let _ = self.editor.add_history_entry(line.as_str());
            if let Some(path) = &self.history
                && let Err(err) = self.editor.save_history(path)
            {
                warn!("could not write history {}: {err}", path.display());
            }
        }
        Ok(InputEvent::Line(line))
    }
}

fn read_stdin_line(prompt: &str) -> io::Result<InputEvent> {
    let mut stdout = io::stdout();
    write!(stdout, "{prompt}")?;
    stdout.flush()?;
    let mut line = String::new();
    if io::stdin().read_line(&mut line)? == 0 {
        return Ok(InputEvent::Eof);
    }
    line.truncate(line.trim_end_matches(['\r', '\n']).len());
    Ok(InputEvent::Line(line))
}

/// Pre-recorded input, consumed one line per read. Reports end of input when exhausted.
#[derive(Debug, Default, Clone)]
pub struct ScriptedInput {
    lines: VecDeque<String>,
    /// Prompts shown so far, in order.
    pub prompts: Vec<String>,
}

impl ScriptedInput {
    pub fn new<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            lines: lines.into_iter().map(Into::into).collect(),
            prompts: Vec::new(),
        }
    }

    pub fn remaining(&self) -> usize {
        self.lines.len()
    }
}

impl LineReader for ScriptedInput {
    fn read_line(&mut self, prompt: &str) -> io::Result<InputEvent> {
        self.prompts.push(prompt.to_string());
        Ok(self.lines.pop_front().map_or(InputEvent::Eof, InputEvent::Line))
    }
}

/// Ctrl-C and Ctrl-D are events, not failures.
fn readline_event(err: ReadlineError) -> io::Result<InputEvent> {
    match err {
        ReadlineError::Interrupted => Ok(InputEvent::Interrupted),
        ReadlineError::Eof => Ok(InputEvent::Eof),
        other => Err(readline_to_io(other)),
    }
}

fn readline_to_io(err: ReadlineError) -> io::Error {
    match err {
        ReadlineError::Io(err) => err,
        other => io::Error::other(other),
    }
}

fn history_file() -> Option<PathBuf> {
    dirs::data_dir().map(|base| history_file_in(&base))
}

fn history_file_in(base: &Path) -> PathBuf {
    base.join("runewild").join("history.txt")
}

#[cfg(test)]
mod tests {
    use super::*;
    use rustyline::history::DefaultHistory;

    #[test]
    fn editor_keys_become_events() {
        assert_eq!(readline_event(ReadlineError::Eof).unwrap(), InputEvent::Eof);
        assert_eq!(readline_event(ReadlineError::Interrupted).unwrap(), InputEvent::Interrupted);
        let io_err = ReadlineError::Io(io::Error::new(io::ErrorKind::BrokenPipe, "gone"));
        assert_eq!(readline_event(io_err).unwrap_err().kind(), io::ErrorKind::BrokenPipe);
    }

    #[test]
    fn history_lives_in_runewild_subdir() {
        let path = history_file_in(Path::new("/tmp/data"));
        assert_eq!(path, PathBuf::from("/tmp/data/runewild/history.txt"));
    }

    #[test]
    fn completes_command_verbs_only() {
        let history = DefaultHistory::new();
        let ctx = Context::new(&history);
        let helper = VerbCompleter;
        let (start, pairs) = helper.complete("ta", 2, &ctx).unwrap();
        assert_eq!(start, 0);
        let words: Vec<_> = pairs.iter().map(|p| p.replacement.as_str()).collect();
        assert_eq!(words, vec!["take", "talk"]);

        let (_, pairs) = helper.complete("go no", 5, &ctx).unwrap();
        assert!(pairs.is_empty());
    }

    #[test]
    fn scripted_input_records_prompts_and_ends_with_eof() {
        let mut input = ScriptedInput::new(["look"]);
        assert_eq!(input.read_line("> ").unwrap(), InputEvent::Line("look".into()));
        assert_eq!(input.read_line("> ").unwrap(), InputEvent::Eof);
        assert_eq!(input.prompts, vec!["> ".to_string(), "> ".to_string()]);
        assert_eq!(input.remaining(), 0);
    }
}
