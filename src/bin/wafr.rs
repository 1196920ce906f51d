use {
    chrono::NaiveDate,
    clap::{Args, Parser, Subcommand, ValueEnum},
    rust_decimal::Decimal,
    std::path::PathBuf,
    tracing::error,
    wafr_console::{
        Wafr,
        config::WafrConfig,
        logging::init_logging,
        metrics,
        models::{NewUser, User, UserId, UserPatch, UserStatus},
        report::text::render_text,
    },
};

#[derive(Parser)]
#[command(version, about = "WafR management console", long_about = None)]
struct Cli {
    #[arg(short, long, default_value = "config.toml")]
    config: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Dashboard totals
    Stats,
    /// Every user
    List,
    /// First user whose phone contains the fragment
    Search { phone: String },
    Show { id: UserId },
    /// Block or unblock a user
    Toggle { id: UserId },
    /// Add a user
    Create {
        #[command(flatten)]
        fields: UserFields,
    },
    /// Change the given fields of a user, leaving the rest untouched
    Update {
        id: UserId,
        #[command(flatten)]
        fields: UserFields,
        #[arg(long, conflicts_with = "address")]
        clear_address: bool,
        #[arg(long, conflicts_with = "birthday")]
        clear_birthday: bool,
    },
    /// Transaction history report for a user
    Report {
        id: UserId,
        #[arg(short, long, value_enum, default_value_t = ReportFormat::Text)]
        format: ReportFormat,
        /// Directory to write the report into; printed to stdout if omitted
        #[arg(short, long)]
        out: Option<PathBuf>,
    },
    Login { email: String, password: String },
    LoginFederated,
    Logout,
    Whoami,
    /// Prometheus metrics gathered during this run
    Metrics,
}

#[derive(Clone, Copy, ValueEnum)]
enum ReportFormat {
    Text,
    Json,
}

#[derive(Args)]
struct UserFields {
    /// JSON object with camelCase field names, instead of the flags below
    #[arg(
        long,
        conflicts_with_all = [
            "name", "phone", "email", "balance", "status",
            "registered_on", "address", "birthday",
        ]
    )]
    json: Option<String>,
    #[arg(long)]
    name: Option<String>,
    #[arg(long)]
    phone: Option<String>,
    #[arg(long)]
    email: Option<String>,
    #[arg(long)]
    balance: Option<Decimal>,
    /// active or blocked
    #[arg(long)]
    status: Option<UserStatus>,
    /// YYYY-MM-DD
    #[arg(long)]
    registered_on: Option<NaiveDate>,
    #[arg(long)]
    address: Option<String>,
    /// YYYY-MM-DD
    #[arg(long)]
    birthday: Option<NaiveDate>,
}

impl UserFields {
    fn into_new_user(self) -> NewUser {
        NewUser {
            name: self.name,
            phone: self.phone,
            email: self.email,
            balance: self.balance,
            status: self.status,
            registered_on: self.registered_on,
            address: self.address,
            birthday: self.birthday,
        }
    }

    fn into_patch(mut self) -> Result<UserPatch, serde_json::Error> {
        match self.json.take() {
            Some(json) => serde_json::from_str(&json),
            None => Ok(UserPatch::from(self.into_new_user())),
        }
    }
}

impl Command {
    /// Commands that read or change the directory need a signed-in session.
    fn requires_session(&self) -> bool {
        !matches!(
            self,
            Command::Login { .. }
                | Command::LoginFederated
                | Command::Logout
                | Command::Whoami
                | Command::Metrics
        )
    }
}

fn print_user(user: &User) -> Result<(), Box<dyn std::error::Error>> {
    println!("{}", serde_json::to_string_pretty(user)?);
    Ok(())
}

async fn run(app: &Wafr, command: Command) -> Result<(), Box<dyn std::error::Error>> {
    if command.requires_session() {
        app.auth.require_principal()?;
    }

    match command {
        Command::Stats => {
            let stats = app.directory.statistics().await;
            println!("{}", serde_json::to_string_pretty(&stats)?);
        }
        Command::List => {
            for user in app.directory.list_all().await {
                println!(
                    "{:>3}  {:<20} {:<12} {:<8} {:>10.2}",
                    user.id.0,
                    user.name,
                    user.phone,
                    user.status.as_str(),
                    user.balance
                );
            }
        }
        Command::Search { phone } => match app.directory.search_by_phone(&phone).await {
            Some(user) => print_user(&user)?,
            None => println!("No user found with phone number {phone}"),
        },
        Command::Show { id } => match app.directory.get_by_id(id).await {
            Some(user) => print_user(&user)?,
            None => println!("User {id} not found"),
        },
        Command::Toggle { id } => match app.directory.toggle_status(id).await {
            Some(user) => println!("User {} is now {}", user.id, user.status),
            None => println!("User {id} not found"),
        },
        Command::Create { mut fields } => {
            let new_user = match fields.json.take() {
                Some(json) => serde_json::from_str(&json)?,
                None => fields.into_new_user(),
            };
            let user = app.directory.create(new_user).await;
            println!("Created user {}", user.id);
            print_user(&user)?;
        }
        Command::Update {
            id,
            fields,
            clear_address,
            clear_birthday,
        } => {
            let mut patch = fields.into_patch()?;
            if clear_address {
                patch = patch.clearing_address();
            }
            if clear_birthday {
                patch = patch.clearing_birthday();
            }

            match app.directory.update(id, patch).await {
                Some(user) => print_user(&user)?,
                None => println!("User {id} not found"),
            }
        }
        Command::Report { id, format, out } => {
            let Some(user) = app.directory.get_by_id(id).await else {
                println!("User {id} not found");
                return Ok(());
            };

            let report = app.reports.render(&user);
            let (body, extension) = match format {
                ReportFormat::Text => (render_text(&report), "txt"),
                ReportFormat::Json => (serde_json::to_string_pretty(&report)?, "json"),
            };

            match out {
                Some(dir) => {
                    let path = dir.join(format!("{}.{}", report.file_stem, extension));
                    std::fs::write(&path, body)?;
                    println!("Report written to {}", path.display());
                }
                None => print!("{body}"),
            }
        }
        Command::Login { email, password } => {
            let principal = app.auth.sign_in_with_credentials(&email, &password).await?;
            println!("Signed in as {} <{}>", principal.display_name, principal.email);
        }
        Command::LoginFederated => {
            let principal = app.auth.sign_in_federated().await;
            println!("Signed in as {} <{}>", principal.display_name, principal.email);
        }
        Command::Logout => {
            app.auth.sign_out().await;
            println!("Signed out");
        }
        Command::Whoami => match app.auth.current_principal() {
            Some(principal) => println!("{}", serde_json::to_string_pretty(&principal)?),
            None => println!("Not signed in"),
        },
        Command::Metrics => print!("{}", metrics::gather_text()?),
    }

    Ok(())
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    let config = match WafrConfig::from_file(&cli.config) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: failed to load config file: {e}");
            std::process::exit(2);
        }
    };

    if let Err(e) = init_logging(&config.logging, config.debug) {
        eprintln!("Warning: file logging disabled: {e}");
    }

    let app = Wafr::new(config);

    if let Err(e) = run(&app, cli.command).await {
        error!("{e}");
        std::process::exit(1);
    }
}
