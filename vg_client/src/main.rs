//! Command-line client for the village governance service.
//!
//! Logs in against the API, keeps the session in a local credentials file
//! and lists or updates villages, facilities, issues, schemes and
//! announcements. `watch` runs the session observer and reports whenever
//! the session starts or ends.

use anyhow::{Context, Result, anyhow};
use pico_args::Arguments;
use std::{
    io::{self, Write},
    path::PathBuf,
    time::Instant,
};
use tokio::{
    io::{AsyncBufReadExt, BufReader},
    sync::mpsc,
};
use vg_client::{
    account,
    commands::{Command, parse_command},
    logging,
};
use village_gov::{
    ApiError, ClientConfig, VillageClient,
    auth::{PasswordResetConfirm, SignupRequest},
    session::{AppState, FetchOutcome, NavigationRoot, UserProfile},
};

const HELP: &str = "\
Village governance command-line client

USAGE:
  vg_client [OPTIONS] <COMMAND>

OPTIONS:
  --server URL              API root  [default: env VILLAGE_API_URL]
  --credentials PATH        Credentials file  [default: env VILLAGE_CREDENTIALS_PATH or .village/credentials.json]

COMMANDS:
  login [--mobile N] [--password P]      Log in (prompts for missing values)
  logout                                  Forget the local session
  signup --name NAME --mobile N [--email E] [--password P]
  forgot-password EMAIL                   Request a password reset code
  reset-password --code CODE [--new-password P]
  refresh                                 Exchange the refresh token for a new pair
  me                                      Show the signed-in user
  status                                  Show whether a session is stored
  villages [ID]                           List villages or show one
  facilities VILLAGE_ID                   List facilities of a village
  issues [--village ID]                   List my issues or a village's issues
  issue-status ID STATUS                  Set PENDING, IN_PROGRESS or RESOLVED
  schemes [--active]                      List schemes
  announcements                           List announcements
  dashboard [--village ID]                Show statistics
  watch                                   Follow session changes; type 'bg'/'fg' to simulate app state

FLAGS:
  -h, --help                Print help information

ENVIRONMENT:
  VILLAGE_API_URL, VILLAGE_CREDENTIALS_PATH, VILLAGE_POLL_INTERVAL_MS,
  VILLAGE_REQUEST_TIMEOUT_SECS, RUST_LOG
";

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if it exists
    let _ = dotenvy::dotenv();

    let mut pargs = Arguments::from_env();

    if pargs.contains(["-h", "--help"]) {
        print!("{HELP}");
        std::process::exit(0);
    }

    let server: Option<String> = pargs.opt_value_from_str("--server")?;
    let credentials: Option<PathBuf> = pargs.opt_value_from_str("--credentials")?;
    let command = parse_command(pargs)?;

    logging::init();

    let config = ClientConfig::from_env(server, credentials)?;
    config.validate()?;
    let client = VillageClient::new(config).map_err(user_error)?;

    let name = command.name();
    let start = Instant::now();
    let result = run(&client, command).await;
    logging::log_command(name, start.elapsed().as_millis() as u64, result.is_ok());

    result
}

async fn run(client: &VillageClient, command: Command) -> Result<()> {
    match command {
        Command::Login { mobile, password } => {
            let mobile = match mobile {
                Some(m) => m,
                None => prompt("Mobile number")?,
            };
            let password = match password {
                Some(p) => p,
                None => prompt("Password")?,
            };
            println!("Logging in as {}...", mobile);
            client.auth().login(&mobile, &password).await.map_err(user_error)?;
            println!("Login successful!");
            if client.profile().fetch().await == FetchOutcome::Updated {
                if let Some(profile) = client.profile().profile() {
                    print_profile(&profile);
                }
            }
        }
        Command::Logout => {
            client.auth().logout().await.map_err(user_error)?;
            println!("Logged out.");
        }
        Command::Signup {
            name,
            mobile,
            email,
            password,
        } => {
            let password = match password {
                Some(p) => p,
                None => prompt("Password")?,
            };
            let request = SignupRequest {
                name,
                mobile_number: mobile,
                email,
                password,
            };
            let message = client.auth().signup(&request).await.map_err(user_error)?;
            println!("{}", message);
        }
        Command::ForgotPassword { email } => {
            let message = client
                .auth()
                .request_password_reset(&email)
                .await
                .map_err(user_error)?;
            println!("{}", message);
        }
        Command::ResetPassword { code, new_password } => {
            let new_password = match new_password {
                Some(p) => p,
                None => prompt("New password")?,
            };
            let request = PasswordResetConfirm {
                token: code,
                new_password,
            };
            let message = client.auth().reset_password(&request).await.map_err(user_error)?;
            println!("{}", message);
        }
        Command::Refresh => {
            client.auth().refresh().await.map_err(user_error)?;
            println!("Session refreshed.");
        }
        Command::Me => {
            let profile = account::current_profile(client)
                .await
                .map_err(user_error)?;
            print_profile(&profile);
        }
        Command::Status => {
            if client.store().is_authenticated().await {
                println!(
                    "Logged in (credentials at {})",
                    client.config().credentials_path.display()
                );
            } else {
                println!("Not logged in");
            }
        }
        Command::Villages { id: Some(id) } => {
            let village = client.villages().get(id).await.map_err(user_error)?;
            println!("{} - {}, {}", village.name, village.district, village.state);
            println!("  Population: {}", village.population);
            if !village.description.is_empty() {
                println!("  {}", village.description);
            }
        }
        Command::Villages { id: None } => {
            let villages = client.villages().list().await.map_err(user_error)?;
            if villages.is_empty() {
                println!("No villages found.");
            }
            for village in villages {
                println!(
                    "  {:>4}. {} ({}, {}) - population {}",
                    village.id, village.name, village.district, village.state, village.population
                );
            }
        }
        Command::Facilities { village_id } => {
            let facilities = client
                .facilities()
                .by_village(village_id)
                .await
                .map_err(user_error)?;
            if facilities.is_empty() {
                println!("No facilities recorded for village {}.", village_id);
            }
            for facility in facilities {
                println!(
                    "  {:>4}. {} [{}] {}",
                    facility.id, facility.name, facility.kind, facility.status
                );
            }
        }
        Command::Issues { village_id } => {
            let issues = match village_id {
                Some(id) => client.issues().by_village(id).await,
                None => client.issues().mine().await,
            }
            .map_err(user_error)?;
            if issues.is_empty() {
                println!("No issues found.");
            }
            for issue in issues {
                println!(
                    "  {:>4}. {} [{} / {:?}]",
                    issue.id, issue.title, issue.status, issue.priority
                );
            }
        }
        Command::SetIssueStatus { id, status } => {
            let issue = client
                .issues()
                .update_status(id, status)
                .await
                .map_err(user_error)?;
            println!("Issue {} is now {}", issue.id, issue.status);
        }
        Command::Schemes { active_only } => {
            let schemes = if active_only {
                client.schemes().active().await
            } else {
                client.schemes().list().await
            }
            .map_err(user_error)?;
            if schemes.is_empty() {
                println!("No schemes found.");
            }
            for scheme in schemes {
                println!(
                    "  {:>4}. {} ({}){}",
                    scheme.id,
                    scheme.title,
                    scheme.category,
                    if scheme.is_active { "" } else { " [inactive]" }
                );
            }
        }
        Command::Announcements => {
            let announcements = client.announcements().list().await.map_err(user_error)?;
            if announcements.is_empty() {
                println!("No announcements.");
            }
            for announcement in announcements {
                println!("  {:>4}. {}", announcement.id, announcement.title);
                println!("        {}", announcement.content);
            }
        }
        Command::Dashboard { village_id } => {
            let stats = match village_id {
                Some(id) => client.dashboard().village_stats(id).await,
                None => client.dashboard().admin_stats().await,
            }
            .map_err(user_error)?;
            println!("Villages:        {}", stats.total_villages);
            println!("Issues:          {}", stats.total_issues);
            println!("  resolved:      {}", stats.resolved_issues);
            println!("  pending:       {}", stats.pending_issues);
            println!("Active schemes:  {}", stats.active_schemes);
        }
        Command::Watch => watch(client).await?,
    }

    Ok(())
}

/// Follow the session until Ctrl-C
async fn watch(client: &VillageClient) -> Result<()> {
    let (stop_tx, mut stop_rx) = mpsc::unbounded_channel();
    ctrlc::set_handler(move || {
        let _ = stop_tx.send(());
    })?;

    let (lifecycle_tx, lifecycle_rx) = mpsc::channel(8);
    let handle = client.spawn_observer(lifecycle_rx);
    let mut root = handle.subscribe();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    println!("Watching session (Ctrl-C to stop)...");
    loop {
        tokio::select! {
            _ = stop_rx.recv() => break,
            changed = root.changed() => {
                if changed.is_err() {
                    break;
                }
                let now = chrono::Local::now().format("%H:%M:%S");
                match *root.borrow_and_update() {
                    NavigationRoot::Authenticated => println!("[{}] Signed in", now),
                    NavigationRoot::Unauthenticated => println!("[{}] Signed out", now),
                }
            }
            line = lines.next_line() => match line? {
                Some(input) => {
                    let state = match input.trim() {
                        "bg" | "background" => AppState::Background,
                        "fg" | "foreground" => AppState::Active,
                        "" => continue,
                        other => {
                            println!("Unknown input '{}', use 'bg' or 'fg'", other);
                            continue;
                        }
                    };
                    lifecycle_tx.send(state).await.context("Session observer stopped")?;
                }
                None => break,
            },
        }
    }

    handle.stop().await;
    Ok(())
}

fn print_profile(profile: &UserProfile) {
    println!("{} ({})", profile.name, profile.mobile_number);
    if let Some(email) = &profile.email {
        println!("  Email: {}", email);
    }
    println!("  Roles: {}", profile.roles);
    if profile.is_elevated() {
        println!("  Administrator access");
    }
}

fn prompt(label: &str) -> Result<String> {
    print!("{}: ", label);
    io::stdout().flush()?;
    let mut input = String::new();
    io::stdin().read_line(&mut input)?;
    Ok(input.trim().to_string())
}

fn user_error(e: ApiError) -> anyhow::Error {
    log::debug!("{:?}", e);
    anyhow!(e.client_message())
}
