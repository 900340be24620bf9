use clap::{Parser, Subcommand};

/// Command-line interface definition for stechuhr
/// CLI application to track intern working hours with SQLite
#[derive(Parser)]
#[command(
    name = "stechuhr",
    version = env!("CARGO_PKG_VERSION"),
    about = "Track intern working time: timed segments, overnight auto cut-off, vacation reconciliation",
    long_about = None
)]
pub struct Cli {
    /// Override database path (useful for tests or custom DB)
    #[arg(global = true, long = "db")]
    pub db: Option<String>,

    /// Act as this user id (default taken from the configuration)
    #[arg(global = true, long = "user")]
    pub user: Option<i64>,

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

    /// Manage the configuration file (view or check)
    Config {
        #[arg(long = "print", help = "Print the current configuration")]
        print_config: bool,

        #[arg(long = "check", help = "Check configuration for invalid fields")]
        check: bool,
    },

    /// Manage the database (migrations, integrity checks, etc.)
    Db {
        #[arg(long = "migrate", help = "Run pending database migrations")]
        migrate: bool,

        #[arg(long = "check", help = "Check database integrity")]
        check: bool,

        #[arg(long = "info", help = "Show database information")]
        info: bool,
    },

    /// Start a new work segment
    Start,

    /// Pause: close the running work segment
    Pause {
        /// What was worked on during the segment
        #[arg(long, default_value = "")]
        note: String,
    },

    /// End the workday: close any running segment and check the quota
    End {
        #[arg(long, default_value = "")]
        note: String,
    },

    /// Show today's total, the running segment and cut-off notifications
    Status {
        #[arg(long, help = "Machine-readable JSON output")]
        json: bool,
    },

    /// Consolidated work/vacation report
    Report {
        /// Month to report (YYYY-MM); defaults to the current month
        #[arg(long)]
        month: Option<String>,

        /// Single day to report (YYYY-MM-DD)
        #[arg(long, conflicts_with = "month")]
        day: Option<String>,

        #[arg(long, help = "Machine-readable JSON output")]
        json: bool,
    },

    /// Remaining vacation allowance for a year
    Vacation {
        /// Year to inspect; defaults to the current year
        #[arg(long)]
        year: Option<i32>,
    },

    /// Manage absence records
    Absence {
        #[command(subcommand)]
        action: AbsenceAction,
    },

    /// Manage users
    User {
        #[command(subcommand)]
        action: UserAction,
    },

    /// Supervisor corrections on work segments
    Segment {
        #[command(subcommand)]
        action: SegmentAction,
    },

    /// Print the internal audit log
    Log {
        #[arg(long = "print", help = "Print rows from the internal log table")]
        print: bool,
    },
}

#[derive(Subcommand)]
pub enum AbsenceAction {
    /// Record an absence range (dates inclusive)
    Add {
        /// First day (YYYY-MM-DD)
        start: String,
        /// Last day (YYYY-MM-DD)
        end: String,
        #[arg(long, default_value = "vacation", help = "vacation or sick")]
        kind: String,
        #[arg(long, default_value = "")]
        description: String,
    },
    /// List the user's absences
    List,
    /// Delete an absence by id
    Del { id: i64 },
}

#[derive(Subcommand)]
pub enum UserAction {
    /// Create a user
    Add {
        name: String,
        #[arg(long = "vacation-days", default_value_t = 25)]
        vacation_days: i64,
    },
    /// List all users
    List,
    /// Set the annual vacation allowance in days
    Allowance { days: i64 },
}

#[derive(Subcommand)]
pub enum SegmentAction {
    /// Insert a segment with explicit times ("YYYY-MM-DD HH:MM")
    Add {
        start: String,
        #[arg(long, help = "End time; omit to insert an open segment")]
        end: Option<String>,
        #[arg(long, default_value = "")]
        note: String,
    },
    /// Correct a segment's times or note
    Edit {
        id: i64,
        #[arg(long)]
        start: Option<String>,
        #[arg(long)]
        end: Option<String>,
        #[arg(long)]
        note: Option<String>,
    },
    /// Delete a segment by id
    Del { id: i64 },
    /// List segments of one day (YYYY-MM-DD)
    List { date: String },
}
