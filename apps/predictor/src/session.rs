//! Line-driven form session: each input line is one user action.

use std::io::Write;

use client_core::{PredictionFormController, PredictionService};
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tracing::debug;

use crate::view;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionCommand {
    Pickup(String),
    Dropoff(String),
    Submit,
    Reset,
    Show,
    Help,
    Quit,
}

impl SessionCommand {
    pub fn parse(line: &str) -> Result<Self, String> {
        let line = line.trim();
        let (verb, rest) = match line.split_once(char::is_whitespace) {
            Some((verb, rest)) => (verb, rest.trim()),
            None => (line, ""),
        };

        match verb.to_ascii_lowercase().as_str() {
            "pickup" | "p" => Ok(Self::Pickup(rest.to_string())),
            "dropoff" | "d" => Ok(Self::Dropoff(rest.to_string())),
            "submit" | "s" => Ok(Self::Submit),
            "reset" | "r" => Ok(Self::Reset),
            "show" | "" => Ok(Self::Show),
            "help" | "?" => Ok(Self::Help),
            "quit" | "exit" | "q" => Ok(Self::Quit),
            other => Err(format!("unknown command '{other}'; type 'help'")),
        }
    }
}

pub const HELP: &str = "\
commands:
  pickup <id>    set the pickup zone id
  dropoff <id>   set the dropoff zone id
  submit         request a duration prediction
  reset          clear the form
  show           redraw the form
  quit           leave the session
";

pub async fn run<S, R, W>(
    controller: &mut PredictionFormController<S>,
    input: R,
    out: &mut W,
) -> anyhow::Result<()>
where
    S: PredictionService,
    R: AsyncBufRead + Unpin,
    W: Write,
{
    write!(out, "{}", view::render(controller))?;
    let mut lines = input.lines();

    while let Some(line) = lines.next_line().await? {
        let command = match SessionCommand::parse(&line) {
            Ok(command) => command,
            Err(message) => {
                writeln!(out, "{message}")?;
                continue;
            }
        };
        debug!(?command, "session command");

        match command {
            SessionCommand::Pickup(value) => controller.set_pickup_id(value),
            SessionCommand::Dropoff(value) => controller.set_dropoff_id(value),
            SessionCommand::Submit => {
                writeln!(out, "Predicting...")?;
                out.flush()?;
                controller.submit().await;
            }
            SessionCommand::Reset => controller.reset(),
            SessionCommand::Show => {}
            SessionCommand::Help => {
                write!(out, "{HELP}")?;
                continue;
            }
            SessionCommand::Quit => break,
        }

        write!(out, "{}", view::render(controller))?;
        out.flush()?;
    }

    Ok(())
}

#[cfg(test)]
#[path = "tests/session_tests.rs"]
mod tests;
