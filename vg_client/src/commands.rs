//! Command-line parsing for the client subcommands.

use pico_args::Arguments;
use std::fmt;
use village_gov::services::IssueStatus;

/// A parsed subcommand
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Login {
        mobile: Option<String>,
        password: Option<String>,
    },
    Logout,
    Signup {
        name: String,
        mobile: String,
        email: Option<String>,
        password: Option<String>,
    },
    ForgotPassword {
        email: String,
    },
    ResetPassword {
        code: String,
        new_password: Option<String>,
    },
    Refresh,
    Me,
    Status,
    Villages {
        id: Option<i64>,
    },
    Facilities {
        village_id: i64,
    },
    Issues {
        village_id: Option<i64>,
    },
    SetIssueStatus {
        id: i64,
        status: IssueStatus,
    },
    Schemes {
        active_only: bool,
    },
    Announcements,
    Dashboard {
        village_id: Option<i64>,
    },
    Watch,
}

impl Command {
    /// Subcommand name as typed on the command line
    pub fn name(&self) -> &'static str {
        match self {
            Command::Login { .. } => "login",
            Command::Logout => "logout",
            Command::Signup { .. } => "signup",
            Command::ForgotPassword { .. } => "forgot-password",
            Command::ResetPassword { .. } => "reset-password",
            Command::Refresh => "refresh",
            Command::Me => "me",
            Command::Status => "status",
            Command::Villages { .. } => "villages",
            Command::Facilities { .. } => "facilities",
            Command::Issues { .. } => "issues",
            Command::SetIssueStatus { .. } => "issue-status",
            Command::Schemes { .. } => "schemes",
            Command::Announcements => "announcements",
            Command::Dashboard { .. } => "dashboard",
            Command::Watch => "watch",
        }
    }
}

/// Errors that can occur during command parsing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// No subcommand given.
    MissingCommand,
    /// Unrecognized subcommand.
    UnrecognizedCommand(String),
    /// A required argument is missing or malformed.
    InvalidArgument(String),
    /// Extra arguments after a complete command.
    UnexpectedArguments(Vec<String>),
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingCommand => write!(f, "No command given. Use --help to see available commands"),
            Self::UnrecognizedCommand(cmd) => write!(
                f,
                "Unrecognized command '{}'. Use --help to see available commands",
                cmd
            ),
            Self::InvalidArgument(reason) => write!(f, "{}", reason),
            Self::UnexpectedArguments(args) => {
                write!(f, "Unexpected arguments: {}", args.join(" "))
            }
        }
    }
}

impl std::error::Error for ParseError {}

impl From<pico_args::Error> for ParseError {
    fn from(e: pico_args::Error) -> Self {
        Self::InvalidArgument(e.to_string())
    }
}

/// Parse the subcommand and its arguments.
///
/// Global options must already have been taken out of `pargs`.
///
/// # Examples
///
/// ```
/// use pico_args::Arguments;
/// use vg_client::commands::{parse_command, Command};
///
/// let args = Arguments::from_vec(vec!["villages".into(), "4".into()]);
/// assert_eq!(parse_command(args), Ok(Command::Villages { id: Some(4) }));
/// ```
pub fn parse_command(mut pargs: Arguments) -> Result<Command, ParseError> {
    let name = pargs.subcommand()?.ok_or(ParseError::MissingCommand)?;

    let command = match name.as_str() {
        "login" => Command::Login {
            mobile: pargs.opt_value_from_str("--mobile")?,
            password: pargs.opt_value_from_str("--password")?,
        },
        "logout" => Command::Logout,
        "signup" => Command::Signup {
            name: pargs.value_from_str("--name")?,
            mobile: pargs.value_from_str("--mobile")?,
            email: pargs.opt_value_from_str("--email")?,
            password: pargs.opt_value_from_str("--password")?,
        },
        "forgot-password" => Command::ForgotPassword {
            email: pargs.free_from_str()?,
        },
        "reset-password" => Command::ResetPassword {
            code: pargs.value_from_str("--code")?,
            new_password: pargs.opt_value_from_str("--new-password")?,
        },
        "refresh" => Command::Refresh,
        "me" => Command::Me,
        "status" => Command::Status,
        "villages" => Command::Villages {
            id: pargs.opt_free_from_str()?,
        },
        "facilities" => Command::Facilities {
            village_id: pargs.free_from_str()?,
        },
        "issues" => Command::Issues {
            village_id: pargs.opt_value_from_str("--village")?,
        },
        "issue-status" => Command::SetIssueStatus {
            id: pargs.free_from_str()?,
            status: pargs.free_from_str()?,
        },
        "schemes" => Command::Schemes {
            active_only: pargs.contains("--active"),
        },
        "announcements" => Command::Announcements,
        "dashboard" => Command::Dashboard {
            village_id: pargs.opt_value_from_str("--village")?,
        },
        "watch" => Command::Watch,
        other => return Err(ParseError::UnrecognizedCommand(other.to_string())),
    };

    let rest = pargs.finish();
    if !rest.is_empty() {
        return Err(ParseError::UnexpectedArguments(
            rest.iter().map(|a| a.to_string_lossy().into_owned()).collect(),
        ));
    }

    Ok(command)
}
