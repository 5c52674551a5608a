//! `frontdesk` - Guest mail tracking at the front desk
//!
//! Staff log arriving letters and packages and mark them picked up; guests
//! check whether anything is waiting for their room.

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![forbid(unsafe_code)]

mod render;
mod session;
mod settings;

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use clap::{Args, Parser, Subcommand, ValueEnum};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use frontdesk_core::{
    AccessGate, Action, GuestBoard, MailKind, MailStatus, Notice, RecordId, RecordPatch, Role,
    Route, SessionSource, SqliteRecordStore, StaffBoard, StaffDesk, StaffFilter, StatusFilter,
};

use session::FileSession;
use settings::Settings;

/// Front desk guest mail tracker
#[derive(Parser, Debug)]
#[command(name = "frontdesk", version)]
#[command(about = "Log guest mail at the front desk and check pickup status")]
struct Cli {
    /// Settings file (defaults to the user config directory)
    #[arg(long, global = true)]
    settings: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start a staff session
    Login {
        /// Staff session token
        #[arg(long)]
        token: String,
    },
    /// End the staff session
    Logout,
    /// Log a newly arrived item
    Add {
        /// Room number
        room: String,
        /// Guest initials
        initials: String,
        /// Item type
        #[arg(long, value_enum)]
        kind: Option<KindArg>,
    },
    /// List logged items, newest first
    List(FilterArgs),
    /// Mark an item picked up
    Receive {
        /// Record id
        id: i64,
    },
    /// Overwrite fields of an item
    Edit {
        /// Record id
        id: i64,
        /// New room number
        #[arg(long)]
        room: Option<String>,
        /// New initials
        #[arg(long)]
        initials: Option<String>,
        /// New item type
        #[arg(long, value_enum)]
        kind: Option<KindArg>,
        /// New status
        #[arg(long, value_enum)]
        status: Option<StatusArg>,
        /// New log time (RFC 3339)
        #[arg(long)]
        created_at: Option<DateTime<Utc>>,
    },
    /// Print the filtered listing
    Print(FilterArgs),
    /// Check for mail waiting for a room
    Check {
        /// Room number
        room: String,
        /// Guest initials
        initials: String,
    },
}

#[derive(Args, Debug, Default)]
struct FilterArgs {
    /// Substring of room number or initials
    #[arg(long, default_value = "")]
    search: String,
    /// Pickup status
    #[arg(long, value_enum, default_value_t = StatusFilterArg::All)]
    status: StatusFilterArg,
    /// Logged on this local date (YYYY-MM-DD)
    #[arg(long, default_value = "")]
    date: String,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum KindArg {
    Letter,
    Package,
    Unspecified,
}

impl From<KindArg> for MailKind {
    fn from(kind: KindArg) -> Self {
        match kind {
            KindArg::Letter => Self::Letter,
            KindArg::Package => Self::Package,
            KindArg::Unspecified => Self::Unspecified,
        }
    }
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum StatusArg {
    Pending,
    Received,
}

impl From<StatusArg> for MailStatus {
    fn from(status: StatusArg) -> Self {
        match status {
            StatusArg::Pending => Self::Pending,
            StatusArg::Received => Self::Received,
        }
    }
}

#[derive(ValueEnum, Clone, Copy, Debug, Default)]
enum StatusFilterArg {
    #[default]
    All,
    Pending,
    Received,
}

impl From<StatusFilterArg> for StatusFilter {
    fn from(status: StatusFilterArg) -> Self {
        match status {
            StatusFilterArg::All => Self::All,
            StatusFilterArg::Pending => Self::Pending,
            StatusFilterArg::Received => Self::Received,
        }
    }
}

impl Command {
    const fn route(&self) -> Route {
        match self {
            Self::Login { .. } | Self::Logout => Route::Login,
            Self::Check { .. } => Route::Check,
            Self::Add { .. }
            | Self::List(_)
            | Self::Receive { .. }
            | Self::Edit { .. }
            | Self::Print(_) => Route::Admin,
        }
    }
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    let settings_path = cli.settings.clone().unwrap_or_else(Settings::default_path);
    let settings = Settings::load(&settings_path).await?;

    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| settings.log_filter().into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let tz = settings.timezone()?;
    let mut session = FileSession::load(FileSession::default_path()).await;

    match cli.command {
        Command::Login { token } => {
            session.sign_in(&token).await?;
            println!("Signed in");
            Ok(ExitCode::SUCCESS)
        }
        Command::Logout => Ok(match session.sign_out() {
            Ok(()) => {
                println!("Signed out");
                ExitCode::SUCCESS
            }
            Err(e) => fail(Action::SignOut, &e),
        }),
        command => {
            let path = settings.database_path()?;
            info!("Opening record store at {:?}", path);
            let store = SqliteRecordStore::new(&path.to_string_lossy()).await?;
            let role = AccessGate::classify(&session);
            Ok(dispatch(command, role, &store, tz, &settings).await)
        }
    }
}

async fn dispatch(
    command: Command,
    role: Role,
    store: &SqliteRecordStore,
    tz: Tz,
    settings: &Settings,
) -> ExitCode {
    let requested = command.route();
    match AccessGate::resolve(role, requested) {
        Route::Login => {
            eprintln!("Staff sign-in required. Run `frontdesk login --token <TOKEN>`.");
            ExitCode::FAILURE
        }
        Route::Admin if requested == Route::Check => {
            println!("Signed in as staff; showing the admin listing instead.");
            match AccessGate::staff(role, store, tz) {
                Ok(desk) => list(&desk, FilterArgs::default(), tz, None).await,
                Err(e) => fail(Action::Fetch, &e),
            }
        }
        Route::Check | Route::Root => match command {
            Command::Check { room, initials } => check(role, store, tz, room, initials).await,
            other => misrouted(&other),
        },
        Route::Admin => match AccessGate::staff(role, store, tz) {
            Ok(desk) => staff(&desk, command, tz, settings).await,
            Err(e) => fail(Action::Fetch, &e),
        },
    }
}

async fn staff(
    desk: &StaffDesk<'_, SqliteRecordStore>,
    command: Command,
    tz: Tz,
    settings: &Settings,
) -> ExitCode {
    match command {
        Command::Add {
            room,
            initials,
            kind,
        } => {
            let kind = kind.map_or(MailKind::Unspecified, MailKind::from);
            match desk.create(&room, &initials, kind).await {
                Ok(record) => succeed(Action::Create, &format!("id {}", record.id)),
                Err(e) => fail(Action::Create, &e),
            }
        }
        Command::Receive { id } => match desk.mark_received(RecordId::new(id)).await {
            Ok(()) => succeed(Action::MarkReceived, ""),
            Err(e) => fail(Action::MarkReceived, &e),
        },
        Command::Edit {
            id,
            room,
            initials,
            kind,
            status,
            created_at,
        } => {
            let mut patch = RecordPatch::new();
            if let Some(room) = room {
                patch = patch.room_number(room);
            }
            if let Some(initials) = initials {
                patch = patch.initials(initials);
            }
            if let Some(kind) = kind {
                patch = patch.kind(kind.into());
            }
            if let Some(status) = status {
                patch = patch.status(status.into());
            }
            if let Some(created_at) = created_at {
                patch = patch.created_at(created_at);
            }
            match desk.edit(RecordId::new(id), patch).await {
                Ok(()) => succeed(Action::Edit, ""),
                Err(e) => fail(Action::Edit, &e),
            }
        }
        Command::List(filter) => list(desk, filter, tz, None).await,
        Command::Print(filter) => list(desk, filter, tz, Some(&settings.print_title)).await,
        other @ (Command::Login { .. } | Command::Logout | Command::Check { .. }) => {
            misrouted(&other)
        }
    }
}

/// Fetch the filtered listing; with a title, print it as a sheet instead.
async fn list(
    desk: &StaffDesk<'_, SqliteRecordStore>,
    args: FilterArgs,
    tz: Tz,
    print_title: Option<&str>,
) -> ExitCode {
    let filter = match StaffFilter::new()
        .search(args.search)
        .status(args.status.into())
        .with_date_str(&args.date)
    {
        Ok(filter) => filter,
        Err(e) => return fail(Action::Fetch, &frontdesk_core::Error::from(e)),
    };

    let mut board = StaffBoard::new();
    board.set_filter(filter);
    if let Some(notice) = board.refresh(desk).await {
        return report(&notice);
    }

    match print_title {
        Some(title) => print!("{}", desk.snapshot(title, board.records()).to_text()),
        None => print!("{}", render::staff_listing(&board, tz)),
    }
    ExitCode::SUCCESS
}

async fn check(
    role: Role,
    store: &SqliteRecordStore,
    tz: Tz,
    room: String,
    initials: String,
) -> ExitCode {
    let desk = match AccessGate::guest(role, store, tz) {
        Ok(desk) => desk,
        Err(e) => return fail(Action::Lookup, &e),
    };

    let mut board = GuestBoard::new();
    board.set_room_number(room);
    board.set_initials(initials);
    if let Some(notice) = board.search(&desk).await {
        return report(&notice);
    }

    print!("{}", render::guest_results(&board, tz));
    ExitCode::SUCCESS
}

/// Reached only if `Command::route` and the dispatch arms disagree.
fn misrouted(command: &Command) -> ExitCode {
    warn!(?command, "Command reached a desk it does not route to");
    eprintln!("This command is not available here.");
    ExitCode::FAILURE
}

fn succeed(action: Action, detail: &str) -> ExitCode {
    if let Some(notice) = Notice::success(action) {
        if detail.is_empty() {
            println!("{notice}");
        } else {
            println!("{notice} ({detail})");
        }
    }
    ExitCode::SUCCESS
}

fn fail(action: Action, error: &frontdesk_core::Error) -> ExitCode {
    warn!(error = %error, ?action, "Action failed");
    report(&Notice::from_error(action, error))
}

fn report(notice: &Notice) -> ExitCode {
    eprintln!("{notice}");
    ExitCode::FAILURE
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn route_of(args: &[&str]) -> Route {
        Cli::try_parse_from(args).unwrap().command.route()
    }

    #[test]
    fn test_guest_check_stays_on_check() {
        let requested = route_of(&["frontdesk", "check", "210", "kb"]);
        assert_eq!(AccessGate::resolve(Role::Guest, requested), Route::Check);
        assert_eq!(AccessGate::resolve(Role::Staff, requested), Route::Admin);
    }

    #[test]
    fn test_staff_commands_route_to_admin() {
        for args in [
            &["frontdesk", "add", "101", "AB", "--kind", "letter"][..],
            &["frontdesk", "list", "--status", "pending"],
            &["frontdesk", "receive", "3"],
            &["frontdesk", "edit", "3", "--created-at", "2024-05-01T09:00:00Z"],
            &["frontdesk", "print", "--date", "2024-05-01"],
        ] {
            let requested = route_of(args);
            assert_eq!(requested, Route::Admin);
            assert_eq!(AccessGate::resolve(Role::Guest, requested), Route::Login);
        }
    }

    #[test]
    fn test_session_commands_never_dispatch() {
        assert_eq!(route_of(&["frontdesk", "logout"]), Route::Login);
        assert_eq!(
            route_of(&["frontdesk", "login", "--token", "abc"]),
            Route::Login
        );
    }
}
