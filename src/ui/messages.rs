//! Coloured one-line status messages for the CLI.

use std::fmt;

const RESET: &str = "\x1b[0m";
const BOLD: &str = "\x1b[1m";

#[derive(Clone, Copy)]
enum Level {
    Info,
    Success,
    Warning,
    Error,
}

impl Level {
    fn colour(self) -> &'static str {
        match self {
            Level::Info => "\x1b[34m",
            Level::Success => "\x1b[32m",
            Level::Warning => "\x1b[33m",
            Level::Error => "\x1b[31m",
        }
    }

    fn icon(self) -> &'static str {
        match self {
            Level::Info => "ℹ️",
            Level::Success => "✅",
            Level::Warning => "⚠️",
            Level::Error => "❌",
        }
    }
}

fn line(level: Level, msg: impl fmt::Display) -> String {
    format!("{}{}{} {}{}", level.colour(), BOLD, level.icon(), RESET, msg)
}

pub fn info<T: fmt::Display>(msg: T) {
    println!("{}", line(Level::Info, msg));
}

pub fn success<T: fmt::Display>(msg: T) {
    println!("{}", line(Level::Success, msg));
}

pub fn warning<T: fmt::Display>(msg: T) {
    println!("{}", line(Level::Warning, msg));
}

/// Errors go to stderr so scripted callers can separate them.
pub fn error<T: fmt::Display>(msg: T) {
    eprintln!("{}", line(Level::Error, msg));
}

pub fn header<T: fmt::Display>(msg: T) {
    println!("{}{}== {} ==\n{}", Level::Info.colour(), BOLD, msg, RESET);
}
