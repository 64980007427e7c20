use crate::export::ExportFormat;
use clap::{Args, Parser, Subcommand};

/// Command-line interface definition for gymdesk
/// Front-desk membership engine for a gym, backed by SQLite
#[derive(Parser)]
#[command(
    name = "gymdesk",
    version = env!("CARGO_PKG_VERSION"),
    about = "Gym front desk: clients, memberships, check-ins and revenue on SQLite",
    long_about = None
)]
pub struct Cli {
    /// Override database path (useful for tests or custom DB)
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

    /// Manage the configuration file (view or edit)
    Config {
        #[arg(long = "print", help = "Print the current configuration file")]
        print_config: bool,

        #[arg(long = "check", help = "Check configuration file for missing fields")]
        check: bool,

        #[arg(long = "migrate", help = "Add missing configuration keys with defaults")]
        migrate: bool,

        #[arg(
            long = "edit",
            help = "Edit the configuration file (default editor: $EDITOR, or nano/notepad)"
        )]
        edit_config: bool,

        #[arg(
            long = "editor",
            help = "Specify the editor to use (vim, nano, or custom path)"
        )]
        editor: Option<String>,
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

    /// Print the internal log table
    Log {
        #[arg(long = "print", help = "Print rows from the internal log table")]
        print: bool,
    },

    /// Manage membership plans
    #[command(subcommand)]
    Plan(PlanCommand),

    /// Manage clients
    #[command(subcommand)]
    Client(ClientCommand),

    /// Check a client in at the front desk
    Checkin {
        /// National id of the client
        national_id: String,
    },

    /// Close today's open check-in of a client
    Checkout {
        /// National id of the client
        national_id: String,
    },

    /// Sell a new membership term starting today
    Renew {
        /// National id of the client
        national_id: String,

        #[arg(long = "plan", value_name = "CODE|ID", help = "Active plan to sell")]
        plan: String,

        #[arg(
            long = "pay",
            value_name = "METHOD",
            help = "Payment method: cash, card, transfer, sinpe (default from config)"
        )]
        pay: Option<String>,
    },

    /// Memberships expiring within 7 days and already expired
    Expirations {
        #[arg(long, help = "Max rows per list (default from config)")]
        limit: Option<usize>,
    },

    /// Revenue per payment method over a period
    Report {
        #[arg(
            long,
            value_name = "RANGE",
            help = "YYYY, YYYY-MM, YYYY-MM-DD or start:end (default: current month)"
        )]
        range: Option<String>,

        #[arg(long, value_name = "FILE", help = "Write the report to FILE")]
        export: Option<String>,

        #[arg(long, value_enum, default_value = "csv", requires = "export")]
        format: ExportFormat,

        #[arg(long, short = 'f', requires = "export", help = "Overwrite FILE without asking")]
        force: bool,
    },

    /// Front-desk dashboard
    Summary,
}

#[derive(Subcommand)]
pub enum PlanCommand {
    /// Add a plan
    Add(PlanAddArgs),
    /// Edit a plan by code or id
    Edit(PlanEditArgs),
    /// Delete a plan that was never sold
    Delete {
        /// Plan code or id
        plan: String,

        #[arg(long, short = 'y', help = "Do not ask for confirmation")]
        yes: bool,
    },
    /// List plans
    List {
        #[arg(long, help = "Include inactive plans")]
        all: bool,
    },
}

#[derive(Args)]
pub struct PlanAddArgs {
    /// Unique short code (e.g. MENS)
    pub code: String,

    #[arg(long)]
    pub name: String,

    #[arg(long, help = "Price, e.g. 20000 or 20000.50")]
    pub price: String,

    #[arg(long, default_value_t = 30, help = "Fallback duration in days")]
    pub days: i64,

    #[arg(
        long,
        help = "monthly, biweekly, weekly, session, custom or auto (default: inferred from the name)"
    )]
    pub family: Option<String>,

    #[arg(long)]
    pub description: Option<String>,

    #[arg(long, help = "Create the plan as inactive")]
    pub inactive: bool,
}

#[derive(Args)]
pub struct PlanEditArgs {
    /// Plan code or id
    pub plan: String,

    #[arg(long)]
    pub name: Option<String>,

    #[arg(long)]
    pub price: Option<String>,

    #[arg(long)]
    pub days: Option<i64>,

    #[arg(long, help = "monthly, biweekly, weekly, session, custom, or auto to infer from the name")]
    pub family: Option<String>,

    #[arg(long)]
    pub description: Option<String>,

    #[arg(long, conflicts_with = "deactivate")]
    pub activate: bool,

    #[arg(long)]
    pub deactivate: bool,
}

#[derive(Subcommand)]
pub enum ClientCommand {
    /// Register a client, optionally selling a first membership
    Register(RegisterArgs),
    /// Edit contact data
    Edit(ClientEditArgs),
    /// Delete a client with memberships and check-ins
    Delete {
        national_id: String,

        #[arg(long, short = 'y', help = "Do not ask for confirmation")]
        yes: bool,
    },
    /// List clients split into active and inactive
    List {
        #[arg(long, help = "Show only inactive clients")]
        inactive: bool,
    },
    /// Search clients by first or last name
    Search {
        /// One or more name fragments
        #[arg(num_args = 0..)]
        terms: Vec<String>,

        #[arg(long)]
        limit: Option<usize>,
    },
    /// Show a client with membership history
    Show { national_id: String },
}

#[derive(Args)]
pub struct RegisterArgs {
    pub national_id: String,

    #[arg(long = "first")]
    pub first_name: String,

    #[arg(long = "last")]
    pub last_name: String,

    #[arg(long)]
    pub phone: Option<String>,

    #[arg(long)]
    pub email: Option<String>,

    #[arg(long = "birth", value_name = "YYYY-MM-DD")]
    pub birth_date: Option<String>,

    #[arg(long = "emergency-contact")]
    pub emergency_contact: Option<String>,

    #[arg(long = "emergency-phone")]
    pub emergency_phone: Option<String>,

    #[arg(long)]
    pub notes: Option<String>,

    #[arg(long, value_name = "CODE|ID", help = "Sell this plan right away")]
    pub plan: Option<String>,

    #[arg(long, requires = "plan", help = "Payment method for the first membership")]
    pub pay: Option<String>,
}

#[derive(Args)]
pub struct ClientEditArgs {
    pub national_id: String,

    #[arg(long = "first")]
    pub first_name: Option<String>,

    #[arg(long = "last")]
    pub last_name: Option<String>,

    #[arg(long)]
    pub phone: Option<String>,

    #[arg(long)]
    pub email: Option<String>,

    #[arg(long = "birth", value_name = "YYYY-MM-DD")]
    pub birth_date: Option<String>,

    #[arg(long = "emergency-contact")]
    pub emergency_contact: Option<String>,

    #[arg(long = "emergency-phone")]
    pub emergency_phone: Option<String>,

    #[arg(long)]
    pub notes: Option<String>,
}
