use std::io::{self, BufRead, Write};

use anyhow::Context;
use todo_app::command::{Command, HELP};
use todo_app::{config, AppError, TodoApp, UreqTransport};
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(io::stderr)
        .init();

    let backend = config::from_env().context("could not locate the todo backend")?;
    tracing::info!(url = backend.data_url(), "using backend");
    let mut app = TodoApp::new(backend, UreqTransport::new());

    let stdin = io::stdin();
    let mut stdout = io::stdout();
    writeln!(stdout, "{}\n{HELP}", app.render())?;
    write!(stdout, "> ")?;
    stdout.flush()?;

    for line in stdin.lock().lines() {
        let line = line?;
        let command = match Command::parse(&line) {
            Ok(command) => command,
            Err(message) => {
                writeln!(stdout, "{message}\n{HELP}")?;
                write!(stdout, "> ")?;
                stdout.flush()?;
                continue;
            }
        };

        let result = match command {
            Command::Quit => break,
            Command::Help => {
                writeln!(stdout, "{HELP}")?;
                Ok(())
            }
            Command::Login(login_id) => app.sign_in(&login_id),
            Command::Logout => {
                app.sign_out();
                Ok(())
            }
            Command::Add(description) => app.add(&description),
            Command::Toggle(row) => app.toggle(row),
            Command::Delete(row) => app.delete(row),
            Command::Refresh => app.refresh(),
        };

        match result {
            // the alert is part of the rendered screen
            Ok(()) | Err(AppError::View(todo_core::ViewError::EmptyDescription)) => {}
            Err(err) => writeln!(stdout, "error: {err}")?,
        }
        writeln!(stdout, "{}", app.render())?;
        app.dismiss_alert();
        write!(stdout, "> ")?;
        stdout.flush()?;
    }
    Ok(())
}
