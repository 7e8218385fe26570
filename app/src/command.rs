//! One line of terminal input.

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Login(String),
    Logout,
    Add(String),
    Toggle(usize),
    Delete(usize),
    Refresh,
    Help,
    Quit,
}

impl Command {
    /// Parse a line such as `add Buy milk` or `toggle 2`. Rows are the
    /// 1-based numbers shown on screen.
    pub fn parse(line: &str) -> Result<Self, String> {
        let line = line.trim();
        let (verb, rest) = line.split_once(char::is_whitespace).unwrap_or((line, ""));
        let rest = rest.trim();
        match verb {
            "login" => Ok(Command::Login(rest.to_string())),
            "logout" => Ok(Command::Logout),
            // an empty description is passed through so the view can reject it
            "add" => Ok(Command::Add(rest.to_string())),
            "toggle" => row(rest).map(Command::Toggle),
            "delete" => row(rest).map(Command::Delete),
            "refresh" => Ok(Command::Refresh),
            "help" | "" => Ok(Command::Help),
            "quit" | "exit" => Ok(Command::Quit),
            other => Err(format!("unknown command: {other}")),
        }
    }
}

fn row(arg: &str) -> Result<usize, String> {
    arg.parse::<usize>()
        .ok()
        .filter(|n| *n > 0)
        .ok_or_else(|| format!("expected a row number, got {arg:?}"))
}

pub const HELP: &str = "commands: login <id> | add <text> | toggle <row> | delete <row> | refresh | logout | quit";
