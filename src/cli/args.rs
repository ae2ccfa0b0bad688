//! Command-line argument parsing.

use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CliCommand {
    Version,
    Help,
    /// Password is prompted for when omitted.
    Login {
        username: String,
        password: Option<String>,
    },
    Register {
        username: String,
        password: String,
        email: String,
    },
    Logout,
    Whoami,
    Live,
    /// Without a query, lists live streams.
    Search { query: Option<String> },
    /// Without a username, shows our own profile.
    Profile { username: Option<String> },
    Follow { username: String },
    Watch { username: String },
    Settings,
    Export { dir: PathBuf },
    /// Unusable arguments, with the reason.
    Invalid(String),
}

pub const USAGE: &str = "\
Usage: glitch <command>

Commands:
  login <user> [password]           Sign in
  register <user> <password> <email>
  logout                            Forget the stored session
  whoami                            Show the signed-in user
  live                              Followed channels that are live
  search [query]                    Search users, or list live streams
  profile [user]                    Show a profile (default: yours)
  follow <user>                     Follow or unfollow a user
  watch <user>                      Open a stream and its chat
  settings                          Show account settings
  export <dir>                      Download the VOD export CSV into <dir>

Options:
  -V, --version                     Print version
  -h, --help                        Print this help

While watching, lines typed are sent to the chat.
  /title <text>   change your stream title
  /follow         toggle following the streamer
  /quit           leave the stream";

/// Parse `std::env::args()`-style arguments (program name first).
///
/// ```
/// use glitch::cli::args::{parse_args, CliCommand};
///
/// let args = vec!["glitch".to_string(), "watch".to_string(), "alice".to_string()];
/// assert_eq!(
///     parse_args(args.into_iter()),
///     CliCommand::Watch { username: "alice".to_string() }
/// );
/// ```
pub fn parse_args<I>(args: I) -> CliCommand
where
    I: Iterator<Item = String>,
{
    let mut args = args.skip(1);
    let Some(command) = args.next() else {
        return CliCommand::Help;
    };
    let rest: Vec<String> = args.collect();

    match command.as_str() {
        "--version" | "-V" => CliCommand::Version,
        "--help" | "-h" | "help" => CliCommand::Help,
        "login" => match rest.as_slice() {
            [username] => CliCommand::Login {
                username: username.clone(),
                password: None,
            },
            [username, password] => CliCommand::Login {
                username: username.clone(),
                password: Some(password.clone()),
            },
            _ => invalid("login takes <user> [password]"),
        },
        "register" => match rest.as_slice() {
            [username, password, email] => CliCommand::Register {
                username: username.clone(),
                password: password.clone(),
                email: email.clone(),
            },
            _ => invalid("register takes <user> <password> <email>"),
        },
        "logout" => no_args(rest, CliCommand::Logout),
        "whoami" => no_args(rest, CliCommand::Whoami),
        "live" => no_args(rest, CliCommand::Live),
        "settings" => no_args(rest, CliCommand::Settings),
        "search" => {
            let query = rest.join(" ");
            CliCommand::Search {
                query: (!query.trim().is_empty()).then_some(query),
            }
        }
        "profile" => match rest.as_slice() {
            [] => CliCommand::Profile { username: None },
            [username] => CliCommand::Profile {
                username: Some(username.clone()),
            },
            _ => invalid("profile takes at most one user"),
        },
        "follow" => match rest.as_slice() {
            [username] => CliCommand::Follow {
                username: username.clone(),
            },
            _ => invalid("follow takes <user>"),
        },
        "watch" => match rest.as_slice() {
            [username] => CliCommand::Watch {
                username: username.clone(),
            },
            _ => invalid("watch takes <user>"),
        },
        "export" => match rest.as_slice() {
            [dir] => CliCommand::Export {
                dir: PathBuf::from(dir),
            },
            _ => invalid("export takes <dir>"),
        },
        other => invalid(&format!("unknown command '{}'", other)),
    }
}

fn invalid(reason: &str) -> CliCommand {
    CliCommand::Invalid(reason.to_string())
}

fn no_args(rest: Vec<String>, command: CliCommand) -> CliCommand {
    if rest.is_empty() {
        command
    } else {
        invalid(&format!("unexpected argument '{}'", rest[0]))
    }
}
