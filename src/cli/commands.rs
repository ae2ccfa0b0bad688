//! Command handlers. Each one drives a view state holder and prints what
//! it ends up showing.

use std::path::Path;

use color_eyre::eyre::{bail, eyre, Result};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::task::JoinHandle;
use tracing::debug;

use super::args::CliCommand;
use super::output;
use crate::app::App;
use crate::chat::ChatStatus;
use crate::view_state::{AuthState, StreamView, UpdateState};

pub async fn run_command(app: &App, command: CliCommand) -> Result<()> {
    match command {
        CliCommand::Login { username, password } => login(app, &username, password).await,
        CliCommand::Register {
            username,
            password,
            email,
        } => register(app, &username, &password, &email).await,
        CliCommand::Logout => logout(app).await,
        CliCommand::Whoami => whoami(app),
        CliCommand::Live => live(app).await,
        CliCommand::Search { query } => search(app, query.as_deref()).await,
        CliCommand::Profile { username } => profile(app, username.as_deref()).await,
        CliCommand::Follow { username } => follow(app, &username).await,
        CliCommand::Watch { username } => watch(app, &username).await,
        CliCommand::Settings => settings(app).await,
        CliCommand::Export { dir } => export(app, &dir).await,
        CliCommand::Version | CliCommand::Help | CliCommand::Invalid(_) => Ok(()),
    }
}

fn require_session(app: &App) -> Result<()> {
    if !app.session().is_signed_in() {
        bail!("Not signed in. Run `glitch login <user>` first.");
    }
    Ok(())
}

async fn login(app: &App, username: &str, password: Option<String>) -> Result<()> {
    let password = match password {
        Some(password) => password,
        None => rpassword::prompt_password("Password: ")?,
    };
    let view = app.auth_view();
    view.login(username, &password).await;
    finish_auth(view.state(), username)
}

async fn register(app: &App, username: &str, password: &str, email: &str) -> Result<()> {
    let view = app.auth_view();
    view.register(username, password, email).await;
    finish_auth(view.state(), username)
}

fn finish_auth(state: AuthState, username: &str) -> Result<()> {
    match state {
        AuthState::Success => {
            output::print_success(&format!("Signed in as {}", username));
            Ok(())
        }
        AuthState::Error(message) => Err(eyre!(message)),
        other => Err(eyre!("Unexpected sign-in state: {:?}", other)),
    }
}

async fn logout(app: &App) -> Result<()> {
    app.auth_view().logout().await;
    output::print_success("Signed out");
    Ok(())
}

fn whoami(app: &App) -> Result<()> {
    let session = app.session().current();
    match session.username {
        Some(username) if session.is_signed_in() => {
            output::print_field("User", &username);
            if let Some(id) = session.user_id {
                output::print_field("Id", &id.to_string());
            }
        }
        _ => output::print_info("Not signed in"),
    }
    Ok(())
}

async fn live(app: &App) -> Result<()> {
    require_session(app)?;
    let view = app.live_view();
    view.load().await;

    output::print_header("Live now");
    let follows = view.follows();
    if follows.is_empty() {
        output::print_info("Nobody you follow is live");
    }
    for follow in &follows {
        if let Some(stream) = &follow.to_stream {
            output::print_stream_row(stream);
        }
    }
    if let Some(message) = view.error() {
        output::print_error(&message);
    }
    Ok(())
}

async fn search(app: &App, query: Option<&str>) -> Result<()> {
    let view = app.search_view();
    match query {
        None => {
            view.load_live_streams().await;
            output::print_header("Live streams");
            for stream in view.streams() {
                output::print_stream_row(&stream);
            }
        }
        Some(query) => {
            view.search(query).await;
            output::print_header(&format!("Users matching '{}'", query));
            let results = view.results();
            if results.is_empty() {
                output::print_info("No users found");
            }
            for user in results {
                output::print_info(&format!("{} ({} followers)", user.username, user.followers_count));
            }
        }
    }
    match view.error() {
        Some(message) => Err(eyre!(message)),
        None => Ok(()),
    }
}

async fn profile(app: &App, username: Option<&str>) -> Result<()> {
    let view = app.profile_view();
    match username {
        Some(username) => view.load_by_username(username).await,
        None => {
            require_session(app)?;
            view.load_current().await;
        }
    }
    if let Some(message) = view.error() {
        return Err(eyre!(message));
    }
    if let Some(user) = view.user() {
        let following = (!view.is_own_profile() && app.session().is_signed_in())
            .then(|| view.is_following());
        output::print_user(&user, following);
    }
    Ok(())
}

async fn follow(app: &App, username: &str) -> Result<()> {
    require_session(app)?;
    let view = app.profile_view();
    view.load_by_username(username).await;
    if let Some(message) = view.error() {
        return Err(eyre!(message));
    }
    if view.is_own_profile() {
        bail!("You cannot follow yourself");
    }

    view.toggle_follow().await;
    if let Some(message) = view.error() {
        return Err(eyre!(message));
    }
    if view.is_following() {
        output::print_success(&format!("Following {}", username));
    } else {
        output::print_success(&format!("Unfollowed {}", username));
    }
    Ok(())
}

async fn settings(app: &App) -> Result<()> {
    require_session(app)?;
    let view = app.settings_view();
    view.load_auth_info().await;

    output::print_header("Settings");
    output::print_field("User", view.username().as_deref().unwrap_or("-"));
    output::print_field("Email", view.email().as_deref().unwrap_or("-"));
    output::print_field("Dark mode", if view.dark_mode() { "on" } else { "off" });
    if let UpdateState::Error(message) = view.state() {
        output::print_error(&message);
    }
    Ok(())
}

async fn export(app: &App, dir: &Path) -> Result<()> {
    require_session(app)?;
    let view = app.settings_view();
    let written = view.export_vods(dir).await;
    match (view.state(), written) {
        (UpdateState::Success(message), Some(path)) => {
            output::print_success(&format!("{}: {}", message, path.display()));
            Ok(())
        }
        (UpdateState::Error(message), _) => Err(eyre!(message)),
        (state, _) => Err(eyre!("Export did not finish: {:?}", state)),
    }
}

/// Show a stream, mirror its chat to stdout and send stdin lines to it.
async fn watch(app: &App, username: &str) -> Result<()> {
    let view = app.stream_view();
    view.enter(username).await;

    match view.stream() {
        Some(stream) => output::print_stream(&stream),
        None => {
            let message = view.error().unwrap_or_else(|| "Stream not found".to_string());
            view.leave();
            return Err(eyre!(message));
        }
    }
    if let Some(user) = view.user() {
        output::print_field("Followers", &user.followers_count.to_string());
        output::print_field("Following", if view.is_following() { "yes" } else { "no" });
    }
    output::print_separator();

    let printers = spawn_printers(&view);
    let result = chat_loop(&view).await;
    view.leave();
    for printer in printers {
        printer.abort();
    }
    result
}

fn spawn_printers(view: &StreamView) -> Vec<JoinHandle<()>> {
    let mut log_rx = view.chat().subscribe_log();
    let chat = tokio::spawn(async move {
        let mut seen = 0u64;
        loop {
            {
                let log = log_rx.borrow_and_update();
                if log.total_received() < seen {
                    seen = 0;
                }
                for message in log.since(seen) {
                    output::print_chat_message(message);
                }
                seen = log.total_received();
            }
            if log_rx.changed().await.is_err() {
                break;
            }
        }
    });

    let mut status_rx = view.chat().subscribe_status();
    let status = tokio::spawn(async move {
        while status_rx.changed().await.is_ok() {
            let status = status_rx.borrow_and_update().clone();
            match status {
                ChatStatus::Reconnecting { attempt } => {
                    output::print_info(&format!("Chat reconnecting (attempt {})", attempt))
                }
                ChatStatus::Open => output::print_info("Chat connected"),
                ChatStatus::Closed => output::print_info("Chat closed"),
                ChatStatus::Connecting => {}
            }
        }
    });

    let errors = view.errors().clone();
    let mut error_rx = errors.subscribe();
    let error = tokio::spawn(async move {
        while error_rx.changed().await.is_ok() {
            let message = error_rx.borrow_and_update().clone();
            if let Some(message) = message {
                output::print_error(&message);
                errors.clear();
            }
        }
    });

    vec![chat, status, error]
}

async fn chat_loop(view: &StreamView) -> Result<()> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let line = line.trim();
        if line == "/quit" {
            break;
        } else if line == "/follow" {
            view.toggle_follow().await;
            let state = if view.is_following() { "Following" } else { "Not following" };
            output::print_info(state);
        } else if let Some(title) = line.strip_prefix("/title ") {
            if !view.is_own_stream() {
                output::print_error("Only the streamer can change the title");
                continue;
            }
            view.update_title(title).await;
            if let Some(stream) = view.stream() {
                output::print_info(&format!("Title: {}", stream.display_title()));
            }
        } else if line.starts_with('/') {
            output::print_error(&format!("Unknown command {}", line));
        } else {
            debug!(len = line.len(), "Sending chat line");
            view.send_chat(line).await;
        }
    }
    Ok(())
}
