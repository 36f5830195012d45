//! KYC CLI binary
//!
//! Lists and renders templates, validates form schemas, summarizes the
//! compliance queue and manages the demo login session.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{bail, Result};
use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use kyc_cli::{commands, logging};
use kyc_cli::{parse_binding, Source};
use kyc_store::clients::DEFAULT_EXPIRY_DAYS;
use kyc_store::{AuditLog, AuthService, FileSessionStore, InvitationRequest, StoreConfig};
use shared_types::RiskLevel;

#[derive(Parser, Debug)]
#[command(name = "kyc")]
#[command(version, about = "KYC onboarding templates, forms and compliance")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List built-in contract and notification templates
    Templates,
    /// Print the variables a template uses
    Vars(SourceArgs),
    /// Render a template with bindings
    Render {
        #[command(flatten)]
        source: SourceArgs,
        /// Bind a variable, NAME=VALUE (repeatable)
        #[arg(short, long = "bind", value_parser = parse_bind)]
        bind: Vec<(String, String)>,
        /// JSON object of bindings
        #[arg(long)]
        bindings: Option<PathBuf>,
    },
    /// Form schema tools
    #[command(subcommand)]
    Form(FormCommand),
    /// Client search and onboarding invitations
    #[command(subcommand)]
    Clients(ClientsCommand),
    /// Summarize a JSON array of compliance items
    Compliance {
        path: PathBuf,
        /// Evaluate due dates against this date (YYYY-MM-DD) instead of today
        #[arg(long)]
        as_of: Option<NaiveDate>,
    },
    /// Sign in with the demo credentials
    Login { email: String, password: String },
    /// Sign out and clear the stored session
    Logout,
    /// Show the signed-in user
    Whoami,
    /// Show and verify the login/logout audit log
    Audit,
}

#[derive(Subcommand, Debug)]
enum FormCommand {
    /// Check a schema file for empty labels, empty dropdowns and duplicate ids
    Validate { path: PathBuf },
    /// Print a starter schema for a form template
    New { template_id: String },
}

#[derive(Subcommand, Debug)]
enum ClientsCommand {
    /// Find clients by company, contact name or email (case-insensitive)
    Search {
        /// JSON array of clients
        path: PathBuf,
        #[arg(default_value = "")]
        query: String,
    },
    /// Invite a client into the signed-in user's organisation
    Invite {
        company: String,
        contact_name: String,
        email: String,
        #[arg(long, default_value = "low", value_parser = parse_risk)]
        risk: RiskLevel,
        /// Form template id (see `kyc templates`)
        #[arg(long, default_value = "basic-kyc")]
        form_template: String,
        /// Days until the link expires (1-30)
        #[arg(long, default_value_t = DEFAULT_EXPIRY_DAYS)]
        expires: u32,
        #[arg(long)]
        message: Option<String>,
        /// JSON client list to append the new client to
        #[arg(long)]
        clients: Option<PathBuf>,
    },
}

#[derive(Args, Debug)]
#[group(required = true, multiple = false)]
struct SourceArgs {
    /// Built-in template id
    #[arg(short, long)]
    template: Option<String>,
    /// Template file on disk
    #[arg(short, long)]
    file: Option<PathBuf>,
}

impl SourceArgs {
    fn into_source(self) -> Result<Source> {
        match (self.template, self.file) {
            (Some(id), _) => Ok(Source::Builtin(id)),
            (None, Some(path)) => Ok(Source::File(path)),
            (None, None) => bail!("either --template or --file is required"),
        }
    }
}

fn parse_risk(raw: &str) -> Result<RiskLevel, String> {
    commands::parse_risk(raw).map_err(|e| e.to_string())
}

fn parse_bind(raw: &str) -> Result<(String, String), String> {
    parse_binding(raw).map_err(|e| e.to_string())
}

fn main() -> ExitCode {
    dotenvy::dotenv().ok();

    logging::init();

    match run(Cli::parse()) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<ExitCode> {
    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    match cli.command {
        Command::Templates => commands::templates(&mut out)?,
        Command::Vars(source) => commands::variables(&source.into_source()?, &mut out)?,
        Command::Render {
            source,
            bind,
            bindings,
        } => {
            let bindings = commands::collect_bindings(bindings.as_deref(), &bind)?;
            commands::render(&source.into_source()?, &bindings, &mut out)?;
        }
        Command::Form(FormCommand::Validate { path }) => {
            if commands::validate_form(&path, &mut out)? > 0 {
                return Ok(ExitCode::FAILURE);
            }
        }
        Command::Form(FormCommand::New { template_id }) => {
            commands::new_form(&template_id, &mut out)?
        }
        Command::Clients(ClientsCommand::Search { path, query }) => {
            commands::search_clients(&path, &query, &mut out)?;
        }
        Command::Clients(ClientsCommand::Invite {
            company,
            contact_name,
            email,
            risk,
            form_template,
            expires,
            message,
            clients,
        }) => {
            let mut request = InvitationRequest::new(company, contact_name, email)
                .with_risk(risk)
                .with_form_template(form_template)
                .expires_in(expires);
            request.custom_message = message;

            let base_url = StoreConfig::from_env().base_url;
            let (auth, _) = auth()?;
            commands::invite(&auth, clients.as_deref(), &base_url, &request, &mut out)?;
        }
        Command::Compliance { path, as_of } => commands::compliance(&path, as_of, &mut out)?,
        Command::Login { email, password } => {
            let (mut auth, log) = auth()?;
            commands::login(&mut auth, &email, &password, &mut out)?;
            log.save(auth.audit())?;
        }
        Command::Logout => {
            let (mut auth, log) = auth()?;
            commands::logout(&mut auth, &mut out)?;
            log.save(auth.audit())?;
        }
        Command::Whoami => commands::whoami(&auth()?.0, &mut out)?,
        Command::Audit => commands::audit(auth()?.0.audit(), &mut out)?,
    }

    Ok(ExitCode::SUCCESS)
}

fn auth() -> Result<(AuthService<FileSessionStore>, AuditLog)> {
    let config = StoreConfig::from_env();
    tracing::debug!(
        session = %config.session_path.display(),
        audit = %config.audit_path.display(),
        "using store files"
    );

    let log = AuditLog::new(config.audit_path);
    let mut auth = AuthService::new(FileSessionStore::new(config.session_path), config.credentials)
        .with_audit(log.load()?);
    auth.init()?;
    Ok((auth, log))
}
