use crate::export::ExportFormat;
use clap::{Parser, Subcommand};

/// Command-line interface definition for rosterctl
/// CLI application to manage a department shift roster with SQLite
#[derive(Parser)]
#[command(
    name = "rosterctl",
    version = env!("CARGO_PKG_VERSION"),
    about = "Manage a department shift roster: assigned shifts, exchanges, and roster generation using SQLite",
    long_about = None
)]
pub struct Cli {
    /// Override database path (useful for tests or multiple rosters)
    #[arg(global = true, long = "db")]
    pub db: Option<String>,

    /// Run in test mode (no config file update)
    #[arg(global = true, long = "test", hide = true)]
    pub test: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize the database and configuration
    Init,

    /// Manage the configuration file
    Config {
        #[arg(long = "print", help = "Print the current configuration file")]
        print_config: bool,

        #[arg(long = "check", help = "Check configuration file for missing fields")]
        check: bool,
    },

    /// Manage the database (migrations, integrity checks, etc.)
    Db {
        #[arg(long = "migrate", help = "Run pending database migrations")]
        migrate: bool,

        #[arg(long = "check", help = "Check database integrity")]
        check: bool,

        #[arg(long = "vacuum", help = "Optimize the database using VACUUM")]
        vacuum: bool,

        #[arg(long = "info", help = "Show database information")]
        info: bool,
    },

    /// Print the internal audit log
    Log {
        #[arg(long = "print", help = "Print rows from the internal log table")]
        print: bool,
    },

    /// Log in as a staff member
    Login {
        /// Username
        username: String,

        /// Password
        #[arg(long = "password")]
        password: String,
    },

    /// End the current session
    Logout,

    /// Show the logged-in user
    Whoami,

    /// Manage staff accounts (admin)
    User {
        #[command(subcommand)]
        action: UserAction,
    },

    /// Change your own password
    Passwd {
        /// Current password
        #[arg(long = "current")]
        current: String,

        /// New password
        #[arg(long = "new")]
        new: String,
    },

    /// Your own shifts for a month
    Dashboard {
        /// Month to show (YYYY-MM, default: current month)
        #[arg(long)]
        month: Option<String>,
    },

    /// The department roster grid for a month
    Roster {
        /// Month to show (YYYY-MM, default: current month)
        #[arg(long)]
        month: Option<String>,

        /// Show full names instead of usernames
        #[arg(long = "full-names")]
        full_names: bool,

        /// Also write the grid to a CSV file
        #[arg(long, value_name = "FILE")]
        csv: Option<String>,
    },

    /// Edit individual shift assignments (admin)
    Shift {
        #[command(subcommand)]
        action: ShiftAction,
    },

    /// Generate the roster for a date range (admin)
    Generate {
        /// First day (YYYY-MM-DD)
        #[arg(long)]
        from: String,

        /// Last day (YYYY-MM-DD)
        #[arg(long)]
        to: String,

        /// Rotation pattern as comma-separated shift codes (default: built-in 15-day rotation)
        #[arg(long)]
        pattern: Option<String>,
    },

    /// Shift-exchange requests
    Exchange {
        #[command(subcommand)]
        action: ExchangeAction,
    },

    /// Calendar events shown alongside the roster
    Event {
        #[command(subcommand)]
        action: EventAction,
    },

    /// Per-month staff ordering used by roster generation
    Order {
        #[command(subcommand)]
        action: OrderAction,
    },

    /// Headline counts: users, shifts, pending exchanges (admin)
    Stats,

    /// Export shift data
    Export {
        #[arg(long, value_enum, default_value = "csv")]
        format: ExportFormat,

        #[arg(long, value_name = "FILE")]
        file: String,

        /// Month to export (YYYY-MM, default: current month)
        #[arg(long)]
        month: Option<String>,

        #[arg(long, short = 'f')]
        force: bool,
    },
}

#[derive(Subcommand)]
pub enum UserAction {
    /// Create a staff account
    Add {
        username: String,

        #[arg(long = "full-name")]
        full_name: String,

        #[arg(long)]
        grade: Option<String>,

        #[arg(long)]
        email: Option<String>,

        #[arg(long)]
        phone: Option<String>,

        /// Grant administrator rights
        #[arg(long)]
        admin: bool,

        /// Initial password
        #[arg(long = "password")]
        password: String,
    },

    /// List staff accounts
    List {
        /// Include deactivated accounts
        #[arg(long)]
        all: bool,
    },

    /// Deactivate an account (blocks login, keeps history)
    Deactivate { username: String },

    /// Reactivate an account
    Activate { username: String },

    /// Reset another user's password (admin)
    SetPassword {
        username: String,

        #[arg(long = "password")]
        password: String,
    },
}

#[derive(Subcommand)]
pub enum ShiftAction {
    /// Assign or overwrite the shift for (user, date)
    Set {
        username: String,

        /// Date (YYYY-MM-DD)
        date: String,

        /// Shift code (N, M, E, O, MOT, NOT, AL, CTR, CG, EL, TR, MT, MC)
        code: String,
    },

    /// Remove the shift for (user, date)
    Del {
        username: String,

        /// Date (YYYY-MM-DD)
        date: String,
    },

    /// List shifts in a date range
    List {
        /// First day (YYYY-MM-DD, default: first of current month)
        #[arg(long)]
        from: Option<String>,

        /// Last day (YYYY-MM-DD, default: last of current month)
        #[arg(long)]
        to: Option<String>,

        /// Only this user's shifts
        #[arg(long)]
        user: Option<String>,

        /// Maximum number of rows (0 = no limit)
        #[arg(long, default_value_t = 50)]
        limit: usize,
    },
}

#[derive(Subcommand)]
pub enum ExchangeAction {
    /// Request to swap one of your shifts with a colleague's
    New {
        /// Colleague to swap with
        #[arg(long = "with")]
        with: String,

        /// Date of your shift (YYYY-MM-DD)
        #[arg(long)]
        mine: String,

        /// Date of their shift (YYYY-MM-DD)
        #[arg(long)]
        theirs: String,

        /// Reason for the request
        #[arg(long)]
        reason: Option<String>,
    },

    /// List exchange requests you are part of (admins see all)
    List {
        /// Filter by status (pending, approved, rejected)
        #[arg(long)]
        status: Option<String>,
    },

    /// Approve a pending request (target user or admin); swaps the shifts
    Approve { id: i64 },

    /// Reject a pending request (target user or admin)
    Reject { id: i64 },
}

#[derive(Subcommand)]
pub enum EventAction {
    /// Add a calendar event
    Add {
        /// Date (YYYY-MM-DD)
        date: String,

        /// Event title
        title: String,

        /// Event type (meeting, holiday, training, ...)
        #[arg(long = "type", default_value = "general")]
        kind: String,
    },

    /// List calendar events
    List {
        /// Month to show (YYYY-MM, default: current month)
        #[arg(long)]
        month: Option<String>,
    },
}

#[derive(Subcommand)]
pub enum OrderAction {
    /// Show the staff ordering for a month
    Show {
        /// Month (YYYY-MM, default: current month)
        #[arg(long)]
        month: Option<String>,
    },

    /// Replace a month's ordering with the given username sequence (admin)
    Set {
        /// Month (YYYY-MM)
        #[arg(long)]
        month: String,

        /// Usernames in roster order
        #[arg(required = true)]
        usernames: Vec<String>,
    },

    /// Move one user up or down in a month's ordering (admin)
    Move {
        /// Month (YYYY-MM)
        #[arg(long)]
        month: String,

        username: String,

        #[arg(long, conflicts_with = "down")]
        up: bool,

        #[arg(long)]
        down: bool,
    },
}
