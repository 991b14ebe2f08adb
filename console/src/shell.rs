//! Interactive line-oriented session.

use std::str::FromStr;

use thiserror::Error;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};

use crate::session::{FlowOutcome, Session, SessionError};
use crate::transport::Transport;
use crate::ui::Ui;

pub const HELP: &str = "\
commands:
  list              reload and show the inventory
  new               open the create form
  edit <name>       open the update form for a listed medicine
  remove <name>     ask to delete a listed medicine
  name <value>      set the name field of the open form
  price <value>     set the price field of the open form
  submit            submit the open form
  confirm           confirm the pending delete
  cancel            close the open form or dialog
  help              show this text
  quit              leave";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    List,
    New,
    Edit(String),
    Remove(String),
    Name(String),
    Price(String),
    Submit,
    Confirm,
    Cancel,
    Help,
    Quit,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CommandError {
    #[error("unknown command '{0}' (try 'help')")]
    Unknown(String),
    #[error("'{0}' needs an argument")]
    MissingArgument(&'static str),
}

impl FromStr for Command {
    type Err = CommandError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim();
        let (word, rest) = match line.split_once(char::is_whitespace) {
            Some((word, rest)) => (word, rest.trim()),
            None => (line, ""),
        };
        let argument = |name: &'static str| {
            if rest.is_empty() {
                Err(CommandError::MissingArgument(name))
            } else {
                Ok(rest.to_string())
            }
        };

        match word {
            "list" | "reload" => Ok(Command::List),
            "new" => Ok(Command::New),
            "edit" => argument("edit").map(Command::Edit),
            "remove" => argument("remove").map(Command::Remove),
            // an empty name is left for the server to judge
            "name" => Ok(Command::Name(rest.to_string())),
            "price" => argument("price").map(Command::Price),
            "submit" => Ok(Command::Submit),
            "confirm" => Ok(Command::Confirm),
            "cancel" => Ok(Command::Cancel),
            "help" | "?" => Ok(Command::Help),
            "quit" | "exit" => Ok(Command::Quit),
            other => Err(CommandError::Unknown(other.to_string())),
        }
    }
}

/// Load the page, then apply commands until `quit` or end of input.
/// Nothing that goes wrong here ends the loop.
pub async fn run<T, U, R>(session: &mut Session<T, U>, input: R) -> std::io::Result<()>
where
    T: Transport,
    U: Ui,
    R: AsyncBufRead + Unpin,
{
    session.reload().await;
    let mut lines = input.lines();

    while let Some(line) = lines.next_line().await? {
        if line.trim().is_empty() {
            continue;
        }
        let command = match line.parse::<Command>() {
            Ok(command) => command,
            Err(err) => {
                eprintln!("{err}");
                continue;
            }
        };
        if command == Command::Quit {
            break;
        }
        if let Err(err) = apply(session, command).await {
            eprintln!("{err}");
        }
    }
    Ok(())
}

/// Apply one command. Server failures are already alerted through the UI;
/// only local misuse comes back as an error.
async fn apply<T: Transport, U: Ui>(session: &mut Session<T, U>, command: Command) -> Result<(), SessionError> {
    match command {
        Command::Quit => Ok(()),
        Command::Help => {
            println!("{HELP}");
            Ok(())
        }
        Command::List => {
            session.reload().await;
            Ok(())
        }
        Command::New => {
            session.open_create();
            Ok(())
        }
        Command::Edit(name) => session.open_update(&name),
        Command::Remove(name) => session.open_delete(&name),
        Command::Name(value) => session.set_name(&value),
        Command::Price(value) => session.set_price(&value),
        Command::Submit => idle_as_error(session.submit().await),
        Command::Confirm => idle_as_error(session.confirm_delete().await),
        Command::Cancel => {
            session.cancel();
            Ok(())
        }
    }
}

fn idle_as_error(outcome: FlowOutcome) -> Result<(), SessionError> {
    match outcome {
        FlowOutcome::Idle => Err(SessionError::NoFormOpen),
        _ => Ok(()),
    }
}
