use std::sync::Arc;

use anyhow::{anyhow, Result};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use dotenv::dotenv;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use booking_cell::models::{BookingError, SelectedChild};
use booking_cell::{BookingFlowCoordinator, SlotAvailabilityResolver};
use children_cell::ChildrenService;
use doctor_cell::DoctorDirectoryService;
use shared_config::AppConfig;
use shared_gateway::ApiGateway;
use shared_utils::i18n::{tr, Locale};
use shared_utils::session::{
    require_token, FileSessionStore, SessionStore, ACCESS_TOKEN_KEY, LOCALE_KEY,
};

/// Terminal front-end for the Wadi pediatric clinic booking API.
#[derive(Parser)]
#[command(name = "wadi-clinic")]
#[command(author, version, about = "Pediatric clinic appointment booking", long_about = None)]
struct Cli {
    /// UI language (en or ar); defaults to the stored preference
    #[arg(short, long, global = true)]
    locale: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Browse the clinic's doctors
    Doctors {
        #[command(subcommand)]
        command: DoctorCommands,
    },
    /// Show available slots for a doctor on a date
    Slots {
        doctor_id: i64,
        /// Calendar date, YYYY-MM-DD
        date: NaiveDate,
    },
    /// List the children registered under the signed-in guardian
    Children,
    /// Book a slot for one or more children
    Book {
        doctor_id: i64,
        /// Calendar date, YYYY-MM-DD
        date: NaiveDate,
        /// Child id to book for; repeat for several children
        #[arg(long = "child-id", required = true)]
        child_ids: Vec<i64>,
        /// Position of the slot in the availability listing (0-based)
        #[arg(long, default_value_t = 0)]
        slot_index: usize,
    },
    /// Manage the stored session
    Session {
        #[command(subcommand)]
        command: SessionCommands,
    },
}

#[derive(Subcommand)]
enum DoctorCommands {
    /// List all doctors
    List,
    /// Show one doctor's profile
    Show { doctor_id: i64 },
}

#[derive(Subcommand)]
enum SessionCommands {
    /// Store the bearer token obtained from the login flow
    SetToken { token: String },
    /// Persist the preferred UI language
    SetLocale { tag: String },
    /// Show whether a session is present
    Show,
    /// Forget the stored token
    Clear,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Loading Env Vars
    dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();
    let config = AppConfig::from_env();

    let gateway = Arc::new(ApiGateway::new(&config));
    let store: Arc<dyn SessionStore> = Arc::new(FileSessionStore::new(&config.session_file));

    let locale = resolve_locale(cli.locale.as_deref(), store.as_ref(), &config).await;

    match cli.command {
        Commands::Doctors { command } => match command {
            DoctorCommands::List => list_doctors(gateway, locale).await,
            DoctorCommands::Show { doctor_id } => show_doctor(gateway, doctor_id).await,
        },
        Commands::Slots { doctor_id, date } => show_slots(gateway, locale, doctor_id, date).await,
        Commands::Children => list_children(gateway, store, locale).await,
        Commands::Book {
            doctor_id,
            date,
            child_ids,
            slot_index,
        } => book(gateway, store, locale, doctor_id, date, child_ids, slot_index).await,
        Commands::Session { command } => run_session_command(store, command).await,
    }
}

/// Explicit flag wins, then the stored preference, then the environment.
async fn resolve_locale(
    flag: Option<&str>,
    store: &dyn SessionStore,
    config: &AppConfig,
) -> Locale {
    if let Some(tag) = flag {
        return Locale::from_tag(tag);
    }
    if let Ok(Some(tag)) = store.get(LOCALE_KEY).await {
        return Locale::from_tag(&tag);
    }
    Locale::from_tag(&config.locale)
}

async fn list_doctors(gateway: Arc<ApiGateway>, locale: Locale) -> Result<()> {
    let directory = DoctorDirectoryService::new(Arc::clone(&gateway));
    let doctors = directory.list_doctors().await?;

    println!("{}:", tr(locale, "doctors"));
    for doctor in &doctors {
        let window = doctor
            .day_window()
            .map(|(opens, closes)| format!(" ({} - {})", opens, closes))
            .unwrap_or_default();
        println!(
            "  [{}] {} - {}{}",
            doctor.id, doctor.name, doctor.specialty, window
        );
    }
    Ok(())
}

async fn show_doctor(gateway: Arc<ApiGateway>, doctor_id: i64) -> Result<()> {
    let directory = DoctorDirectoryService::new(Arc::clone(&gateway));
    let doctor = directory.get_doctor(doctor_id).await?;

    println!("{} - {}", doctor.name, doctor.specialty);
    if let Some(photo) = doctor.photo_url(gateway.get_base_url()) {
        println!("photo: {}", photo);
    }
    if let Some((opens, closes)) = doctor.day_window() {
        println!("hours: {} - {}", opens, closes);
    }
    Ok(())
}

async fn show_slots(
    gateway: Arc<ApiGateway>,
    locale: Locale,
    doctor_id: i64,
    date: NaiveDate,
) -> Result<()> {
    let resolver = SlotAvailabilityResolver::new(gateway);

    match resolver.available_slots(doctor_id, date).await {
        Ok(slots) if slots.is_empty() => {
            // A legitimately empty day, not a failure.
            println!("{}", tr(locale, "no_slots_available"));
        }
        Ok(slots) => {
            println!("{}:", tr(locale, "available_hours"));
            for (index, slot) in slots.iter().enumerate() {
                println!("  [{}] {}", index, slot.start);
            }
        }
        Err(e) => return Err(booking_error(locale, e)),
    }
    Ok(())
}

async fn list_children(
    gateway: Arc<ApiGateway>,
    store: Arc<dyn SessionStore>,
    locale: Locale,
) -> Result<()> {
    let token = require_token(store.as_ref())
        .await
        .map_err(|_| anyhow!("{}", tr(locale, "not_authenticated")))?;
    let service = ChildrenService::new(gateway);

    let children = service.fetch_children(Some(&token)).await?;

    for child in &children {
        let dob = child
            .date_of_birth
            .map(|d| d.to_string())
            .unwrap_or_else(|| "-".to_string());
        println!("  [{}] {} ({})", child.id, child.full_name, dob);
    }
    Ok(())
}

async fn book(
    gateway: Arc<ApiGateway>,
    store: Arc<dyn SessionStore>,
    locale: Locale,
    doctor_id: i64,
    date: NaiveDate,
    child_ids: Vec<i64>,
    slot_index: usize,
) -> Result<()> {
    let directory = DoctorDirectoryService::new(Arc::clone(&gateway));
    let children_service = ChildrenService::new(Arc::clone(&gateway));

    let doctor = directory.get_doctor(doctor_id).await?;

    let token = require_token(store.as_ref())
        .await
        .map_err(|_| anyhow!("{}", tr(locale, "not_authenticated")))?;
    let children = children_service.fetch_children(Some(&token)).await?;

    let mut flow = BookingFlowCoordinator::new(Arc::clone(&gateway), store, doctor);

    for id in child_ids {
        let child = children
            .iter()
            .find(|c| c.id == id)
            .ok_or_else(|| anyhow!("unknown child id {}", id))?;
        flow.add_child(SelectedChild::new(child.id, child.full_name.clone()))
            .map_err(|e| booking_error(locale, e))?;
    }

    flow.choose_date(date).map_err(|e| booking_error(locale, e))?;

    let slots = flow
        .load_slots()
        .await
        .map_err(|e| booking_error(locale, e))?;
    if slots.is_empty() {
        println!("{}", tr(locale, "no_slots_available"));
        return Ok(());
    }

    flow.select_slot(slot_index)
        .map_err(|e| booking_error(locale, e))?;

    let confirmation = flow.submit().await.map_err(|e| booking_error(locale, e))?;

    info!(
        "Booking confirmed for doctor {} on {}",
        confirmation.request.doctor, confirmation.request.date
    );

    println!("{}", tr(locale, "booking_success"));
    println!("== {} ==", tr(locale, "booking_confirmed"));
    println!(
        "{}: {}",
        tr(locale, "kid_name"),
        confirmation
            .display_child_names()
            .unwrap_or_else(|| tr(locale, "invalid_data").to_string())
    );
    println!("{}: {}", tr(locale, "date"), confirmation.request.date);
    println!("{}: {}", tr(locale, "time"), confirmation.display_time());
    println!("{}: {}", tr(locale, "doctor_name"), confirmation.doctor.name);
    Ok(())
}

async fn run_session_command(
    store: Arc<dyn SessionStore>,
    command: SessionCommands,
) -> Result<()> {
    match command {
        SessionCommands::SetToken { token } => {
            store.set(ACCESS_TOKEN_KEY, &token).await?;
            println!("token stored");
        }
        SessionCommands::SetLocale { tag } => {
            let locale = Locale::from_tag(&tag);
            store.set(LOCALE_KEY, locale.tag()).await?;
            println!("locale set to {}", locale.tag());
        }
        SessionCommands::Show => match store.get(ACCESS_TOKEN_KEY).await? {
            Some(_) => println!("session present"),
            None => println!("no session"),
        },
        SessionCommands::Clear => {
            store.remove(ACCESS_TOKEN_KEY).await?;
            println!("session cleared");
        }
    }
    Ok(())
}

fn booking_error(locale: Locale, err: BookingError) -> anyhow::Error {
    let message = tr(locale, err.message_id()).to_string();
    anyhow::Error::new(err).context(message)
}
