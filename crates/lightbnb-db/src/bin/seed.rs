//! # Seed Data Generator
//!
//! Populates a LightBnB database for development.
//!
//! ## Usage
//! ```bash
//! # Generate 50 properties (default) with owners, guests, stays and reviews
//! cargo run -p lightbnb-db --bin seed
//!
//! # Generate custom amount
//! cargo run -p lightbnb-db --bin seed -- --count 200
//!
//! # Specify database path (otherwise $LIGHTBNB_DB_PATH or ./lightbnb.db)
//! cargo run -p lightbnb-db --bin seed -- --db ./data/lightbnb.db
//!
//! # Import fixtures instead of generating
//! cargo run -p lightbnb-db --bin seed -- --users users.json --properties properties.json
//! ```
//!
//! ## Generated Data
//! - One owner per five properties, plus as many guests as owners
//! - Properties spread across a fixed list of Canadian cities
//! - Price: $45.00 - $344.00 per night
//! - Every property gets a past stay, two thirds of them a review (1-5)
//!
//! ## JSON Fixtures
//! `--users` expects an array of `{ "name", "email", "password" }`;
//! `--properties` an array of new-property objects whose `owner_id`
//! refers to a user that exists after the user import.

use chrono::{Duration, NaiveDate};
use lightbnb_core::{NewProperty, NewPropertyReview, NewReservation, NewUser, PropertyFilter};
use lightbnb_db::{Database, DbConfig};
use std::env;
use std::path::Path;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

/// Already hashed; the data layer never hashes passwords.
const SEED_PASSWORD_HASH: &str = "$2a$10$FB/BOAVhpuLvpOREQVmvmezD4ED/.JBIDRh70tGevYzYzQgFId2u.";

/// (city, province)
const CITIES: &[(&str, &str)] = &[
    ("Vancouver", "British Columbia"),
    ("North Vancouver", "British Columbia"),
    ("Kelowna", "British Columbia"),
    ("Calgary", "Alberta"),
    ("Edmonton", "Alberta"),
    ("Toronto", "Ontario"),
    ("Ottawa", "Ontario"),
    ("Montreal", "Quebec"),
    ("Halifax", "Nova Scotia"),
    ("Whitehorse", "Yukon"),
];

const ADJECTIVES: &[&str] = &[
    "Cozy", "Sunny", "Quiet", "Rustic", "Modern", "Bright", "Hidden", "Grand",
];

const KINDS: &[&str] = &["Loft", "Cabin", "Studio", "Cottage", "Suite", "Bungalow"];

const STREETS: &[&str] = &["Nami Road", "Jaebvap Way", "Sotboske Avenue", "Habit Lane"];

const REVIEW_MESSAGES: &[&str] = &[
    "Great stay, would book again.",
    "Clean and close to everything.",
    "Smaller than the photos suggest.",
    "Host was very responsive.",
];

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();

    let args: Vec<String> = env::args().collect();

    let mut count: usize = 50;
    let mut db_path: Option<String> = None;
    let mut users_file: Option<String> = None;
    let mut properties_file: Option<String> = None;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--count" | "-c" => {
                if i + 1 < args.len() {
                    count = args[i + 1].parse().unwrap_or(50);
                    i += 1;
                }
            }
            "--db" | "-d" => {
                if i + 1 < args.len() {
                    db_path = Some(args[i + 1].clone());
                    i += 1;
                }
            }
            "--users" => {
                if i + 1 < args.len() {
                    users_file = Some(args[i + 1].clone());
                    i += 1;
                }
            }
            "--properties" => {
                if i + 1 < args.len() {
                    properties_file = Some(args[i + 1].clone());
                    i += 1;
                }
            }
            "--help" | "-h" => {
                println!("LightBnB Seed Data Generator");
                println!();
                println!("Usage: seed [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -c, --count <N>          Number of properties to generate (default: 50)");
                println!("  -d, --db <PATH>          Database file path (default: $LIGHTBNB_DB_PATH or ./lightbnb.db)");
                println!("      --users <FILE>       Import users from a JSON array");
                println!("      --properties <FILE>  Import properties from a JSON array");
                println!("  -h, --help               Show this help message");
                return Ok(());
            }
            other => warn!(argument = %other, "Ignoring unknown argument"),
        }
        i += 1;
    }

    let mut config = DbConfig::from_env()?;
    if let Some(path) = db_path {
        config.database_path = path.into();
    }

    println!("🌱 LightBnB Seed Data Generator");
    println!("==============================");
    println!("Database: {}", config.database_path.display());
    println!();

    let db = Database::new(config).await?;

    println!("✓ Connected to database");
    println!("✓ Migrations applied");

    let existing = db.users().count().await?;
    if existing > 0 {
        println!("⚠ Database already has {} users", existing);
        println!("  Skipping seed to avoid duplicates.");
        println!("  Delete the database file to regenerate.");
        db.close().await;
        return Ok(());
    }

    let start = std::time::Instant::now();

    if users_file.is_some() || properties_file.is_some() {
        import_fixtures(&db, users_file.as_deref(), properties_file.as_deref()).await?;
    } else {
        println!();
        println!("Generating {} properties...", count);
        generate(&db, count).await?;
    }

    println!();
    println!("✓ Seeded in {:?}", start.elapsed());
    println!(
        "  Users: {}, active properties: {}",
        db.users().count().await?,
        db.properties().count().await?
    );

    println!();
    println!("Verifying search...");
    let all = db.properties().search(&PropertyFilter::default(), 10).await?;
    println!("  No filter: {} results", all.len());

    let rated = PropertyFilter {
        city: Some("Vancouver".to_string()),
        minimum_rating: Some(3.0),
        ..Default::default()
    };
    let results = db.properties().search(&rated, 10).await?;
    println!("  Vancouver, rated 3+: {} results", results.len());
    for listing in &results {
        println!(
            "    {} ({}) {}/night, rating {:.1}",
            listing.property.title,
            listing.property.city,
            listing.property.cost(),
            listing.average_rating.unwrap_or_default()
        );
    }

    println!();
    println!("✓ Seed complete!");

    db.close().await;
    Ok(())
}

/// Sets up the global tracing subscriber.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages (including generated SQL)
/// - `RUST_LOG=lightbnb=trace` - Show trace for lightbnb crates only
/// - Default: INFO level, DEBUG for lightbnb crates
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,lightbnb=debug,sqlx=warn"));

    tracing_subscriber::fmt().with_env_filter(filter).init();
}

/// Loads users and/or properties from JSON arrays.
async fn import_fixtures(
    db: &Database,
    users_file: Option<&str>,
    properties_file: Option<&str>,
) -> Result<(), Box<dyn std::error::Error>> {
    if let Some(path) = users_file {
        let users: Vec<NewUser> = read_json(path)?;
        let mut imported = 0;
        for user in &users {
            match db.users().insert(user).await {
                Ok(_) => imported += 1,
                Err(e) => eprintln!("Failed to import user {}: {}", user.email, e),
            }
        }
        println!("✓ Imported {}/{} users from {}", imported, users.len(), path);
    }

    if let Some(path) = properties_file {
        let properties: Vec<NewProperty> = read_json(path)?;
        let mut imported = 0;
        for property in &properties {
            match db.properties().insert(property).await {
                Ok(_) => imported += 1,
                Err(e) => eprintln!("Failed to import property {}: {}", property.title, e),
            }
        }
        println!(
            "✓ Imported {}/{} properties from {}",
            imported,
            properties.len(),
            path
        );
    }

    Ok(())
}

fn read_json<T: serde::de::DeserializeOwned>(
    path: impl AsRef<Path>,
) -> Result<T, Box<dyn std::error::Error>> {
    let raw = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&raw)?)
}

/// Generates owners, guests, properties, past stays and reviews.
///
/// Deterministic: the same `count` always yields the same data.
async fn generate(db: &Database, count: usize) -> Result<(), Box<dyn std::error::Error>> {
    let people = count.div_ceil(5).max(1);

    let mut owners = Vec::with_capacity(people);
    let mut guests = Vec::with_capacity(people);
    for n in 0..people {
        owners.push(db.users().insert(&seed_user("Owner", n)).await?.id);
        guests.push(db.users().insert(&seed_user("Guest", n)).await?.id);
    }
    println!("  Created {} owners and {} guests", owners.len(), guests.len());

    let mut created = 0;
    let mut reviewed = 0;
    for seed in 0..count {
        let owner_id = owners[seed % owners.len()];
        let property = match db.properties().insert(&seed_property(owner_id, seed)).await {
            Ok(property) => property,
            Err(e) => {
                eprintln!("Failed to insert property #{}: {}", seed, e);
                continue;
            }
        };
        created += 1;

        let guest_id = guests[(seed * 7) % guests.len()];
        let (start_date, end_date) = seed_stay(seed);
        let stay = db
            .reservations()
            .insert(&NewReservation {
                start_date,
                end_date,
                property_id: property.id,
                guest_id,
            })
            .await?;

        if seed % 3 != 2 {
            db.reviews()
                .insert(&NewPropertyReview {
                    guest_id,
                    property_id: property.id,
                    reservation_id: stay.id,
                    rating: (seed % 5) as i64 + 1,
                    message: Some(REVIEW_MESSAGES[seed % REVIEW_MESSAGES.len()].to_string()),
                })
                .await?;
            reviewed += 1;
        }

        if (seed + 1) % 25 == 0 {
            info!(generated = seed + 1, "Seeding progress");
        }
    }

    println!("  Created {}/{} properties, {} reviewed", created, count, reviewed);
    Ok(())
}

fn seed_user(role: &str, n: usize) -> NewUser {
    NewUser {
        name: format!("{} {}", role, n + 1),
        email: format!("{}{}@example.com", role.to_lowercase(), n + 1),
        password: SEED_PASSWORD_HASH.to_string(),
    }
}

fn seed_property(owner_id: i64, seed: usize) -> NewProperty {
    let (city, province) = CITIES[seed % CITIES.len()];
    let title = format!(
        "{} {}",
        ADJECTIVES[seed % ADJECTIVES.len()],
        KINDS[(seed / ADJECTIVES.len()) % KINDS.len()]
    );
    let photo = 2_086_676 + seed;

    NewProperty {
        owner_id,
        title,
        description: Some(format!("A place to stay in {}.", city)),
        thumbnail_photo_url: format!("https://images.pexels.com/photos/{0}/pexels-photo-{0}.jpeg?h=350", photo),
        cover_photo_url: format!("https://images.pexels.com/photos/{0}/pexels-photo-{0}.jpeg", photo),
        // $45.00 - $344.00
        cost_per_night: 4_500 + ((seed * 3_700) % 30_000) as i64,
        parking_spaces: (seed % 4) as i64,
        number_of_bathrooms: 1 + (seed % 3) as i64,
        number_of_bedrooms: 1 + (seed % 5) as i64,
        country: "Canada".to_string(),
        street: format!("{} {}", 100 + seed, STREETS[seed % STREETS.len()]),
        city: city.to_string(),
        province: province.to_string(),
        post_code: format!("{:05}", 10_000 + seed * 37),
    }
}

/// A stay of 2-8 nights spread over 2018-2020.
fn seed_stay(seed: usize) -> (NaiveDate, NaiveDate) {
    let epoch = NaiveDate::from_ymd_opt(2018, 1, 1).unwrap_or_default();
    let start = epoch + Duration::days(((seed * 23) % 1_000) as i64);
    let end = start + Duration::days(2 + (seed % 7) as i64);
    (start, end)
}
