use std::io::{self, Write};

use thiserror::Error;

use crate::{options::MapOptionDescriptor, stats::MapStats};
pub mod reader;

#[derive(Error, Debug)]
pub enum ShellError {
    #[error("invalid command: {0}")]
    Invalid(String),
    #[error("quitting")]
    Quit,
    #[error(transparent)]
    Io(#[from] io::Error),
}

/// Commands understood by the line shell. `read_command_line` parses a line and calls one of
/// these. An `Err` ends the session, map failures are reported with [`error`] instead.
pub trait MapShell {
    // insert <key> <value>
    // Store a new entry. Fails if the key is present or the table is full.
    fn insert(&mut self, key: &str, value: &str) -> Result<(), ShellError>;

    // get <key>
    fn get(&mut self, key: &str) -> Result<(), ShellError>;

    // assign <key> <value>
    // Overwrite the value of a key that is already present.
    fn assign(&mut self, key: &str, value: &str) -> Result<(), ShellError>;

    // remove <key>
    // Replies with the removed value.
    fn remove(&mut self, key: &str) -> Result<(), ShellError>;

    // contains <key>
    fn contains(&mut self, key: &str) -> Result<(), ShellError>;

    // clear
    fn clear(&mut self) -> Result<(), ShellError>;

    // len
    fn len(&mut self) -> Result<(), ShellError>;

    // stats
    // Dump the running probe counters.
    fn stats(&mut self) -> Result<(), ShellError>;

    // options
    // List the settings `setoption` accepts.
    fn options(&mut self) -> Result<(), ShellError>;

    // setoption name <name> [value <v>]
    // Changing Capacity rebuilds the map, dropping every entry.
    fn set_option(&mut self, name: &str, value: Option<&str>) -> Result<(), ShellError>;

    // quit
    fn quit(&mut self) -> Result<(), ShellError>;
}

// The command succeeded and has nothing else to report.
pub fn ok(out: &mut impl Write) -> io::Result<()> {
    writeln!(out, "ok")
}

pub fn value(out: &mut impl Write, v: &str) -> io::Result<()> {
    writeln!(out, "value {v}")
}

pub fn boolean(out: &mut impl Write, b: bool) -> io::Result<()> {
    writeln!(out, "{b}")
}

pub fn len(out: &mut impl Write, n: usize) -> io::Result<()> {
    writeln!(out, "len {n}")
}

// The map rejected the command. The session keeps going.
pub fn error(out: &mut impl Write, e: &dyn std::error::Error) -> io::Result<()> {
    writeln!(out, "error {e}")
}

pub fn stats(out: &mut impl Write, stats: &MapStats, load_factor: f64) -> io::Result<()> {
    writeln!(out, "{stats}")?;
    writeln!(out, "Load Factor: {load_factor:.3}")
}

pub fn option(out: &mut impl Write, opt: &MapOptionDescriptor) -> io::Result<()> {
    writeln!(out, "{opt}")
}
