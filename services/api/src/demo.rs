use crate::infra::{in_memory_services, MemoryRegistry, MemoryRewards};
use chrono::NaiveDate;
use clap::{ArgGroup, Args};
use lifeline::config::AppConfig;
use lifeline::error::AppError;
use lifeline::telemetry;
use lifeline::workflows::registry::{
    BloodType, DashboardStats, DonorId, DonorRegistration, InMemoryDonationLedger,
    NewBloodRequest, NewDonation, Urgency,
};
use lifeline::workflows::rewards::{
    count_donations, EligibilityResult, LedgerImporter, ProgressionEngine, RewardCatalog,
    RewardsServiceError,
};
use std::path::PathBuf;
use tracing::info;

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Ledger CSV export to seed donations from instead of the sample history.
    /// Sample donors are registered as donor-000001 through donor-000004.
    #[arg(long)]
    pub(crate) ledger_csv: Option<PathBuf>,
    /// Print every tier (earned and locked) for each donor.
    #[arg(long)]
    pub(crate) list_tiers: bool,
}

#[derive(Args, Debug)]
#[command(group(
    ArgGroup::new("source")
        .required(true)
        .args(["donations", "ledger_csv"])
))]
pub(crate) struct EvaluateArgs {
    /// Total completed donations for the donor
    #[arg(long, allow_negative_numbers = true)]
    pub(crate) donations: Option<i64>,
    /// Ledger CSV export to count donations from
    #[arg(long, requires = "donor")]
    pub(crate) ledger_csv: Option<PathBuf>,
    /// Donor id to count in the ledger export
    #[arg(long)]
    pub(crate) donor: Option<String>,
}

pub(crate) fn run_rewards_catalog() -> Result<(), AppError> {
    let config = AppConfig::load()?;
    let catalog = RewardCatalog::standard();

    println!("Reward catalog ({} tiers)", catalog.len());
    for tier in catalog.list_tiers() {
        println!(
            "- {} {} [{}] requires {} donation(s): {} ({})",
            tier.icon,
            tier.name,
            tier.category,
            tier.required_donations,
            tier.description,
            tier.value
        );
    }
    println!(
        "\nRewards can be redeemed from {} donations.",
        config.rewards.redemption_threshold
    );

    Ok(())
}

pub(crate) fn run_rewards_evaluate(args: EvaluateArgs) -> Result<(), AppError> {
    let EvaluateArgs {
        donations,
        ledger_csv,
        donor,
    } = args;

    let config = AppConfig::load()?;
    let engine = ProgressionEngine::new(config.rewards);
    let catalog = RewardCatalog::standard();

    let count = match (donations, ledger_csv, donor) {
        (Some(count), _, _) => count,
        (None, Some(path), Some(donor)) => {
            let ledger = LedgerImporter::from_path(path)?;
            i64::from(count_donations(&DonorId(donor), &ledger))
        }
        // clap enforces a count source; an absent donor id counts nothing.
        _ => 0,
    };

    let result = engine
        .evaluate(count, catalog.list_tiers())
        .map_err(RewardsServiceError::from)?;
    render_result(&result, catalog.len(), true);
    Ok(())
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let DemoArgs {
        ledger_csv,
        list_tiers,
    } = args;

    let config = AppConfig::load()?;
    telemetry::init_for_cli(&config.telemetry)?;

    let imported = ledger_csv.is_some();
    let ledger = match ledger_csv {
        Some(path) => InMemoryDonationLedger::with_entries(LedgerImporter::from_path(path)?),
        None => InMemoryDonationLedger::default(),
    };
    let (registry, rewards) = in_memory_services(config.rewards, ledger);

    seed_registry(&registry, !imported)?;
    info!(imported, "demo registry seeded");

    println!("Lifeline demo");
    if imported {
        println!("Donation source: ledger CSV import");
    } else {
        println!("Donation source: sample history");
    }

    render_dashboard(&registry.dashboard()?);
    render_progression(&rewards, list_tiers)?;

    Ok(())
}

fn sample_donors() -> Vec<(DonorRegistration, u32)> {
    let born = |year, month, day| {
        NaiveDate::from_ymd_opt(year, month, day).expect("valid sample birth date")
    };
    vec![
        (
            DonorRegistration {
                name: "Amara Okafor".to_string(),
                email: "amara.okafor@donors.test".to_string(),
                phone: "555-0101".to_string(),
                blood_type: BloodType::ONegative,
                date_of_birth: born(1987, 4, 12),
                gender: "female".to_string(),
                location: "Des Moines".to_string(),
            },
            11,
        ),
        (
            DonorRegistration {
                name: "Tomas Vidal".to_string(),
                email: "tomas.vidal@donors.test".to_string(),
                phone: "555-0102".to_string(),
                blood_type: BloodType::APositive,
                date_of_birth: born(1993, 9, 30),
                gender: "male".to_string(),
                location: "Ames".to_string(),
            },
            2,
        ),
        (
            DonorRegistration {
                name: "Priya Raman".to_string(),
                email: "priya.raman@donors.test".to_string(),
                phone: "555-0103".to_string(),
                blood_type: BloodType::OPositive,
                date_of_birth: born(1979, 1, 5),
                gender: "female".to_string(),
                location: "Iowa City".to_string(),
            },
            1,
        ),
        (
            DonorRegistration {
                name: "Desmond Hale".to_string(),
                email: "desmond.hale@donors.test".to_string(),
                phone: "555-0104".to_string(),
                blood_type: BloodType::OPositive,
                date_of_birth: born(2001, 6, 18),
                gender: "male".to_string(),
                location: "Cedar Rapids".to_string(),
            },
            0,
        ),
    ]
}

fn seed_registry(registry: &MemoryRegistry, with_history: bool) -> Result<(), AppError> {
    let first_drive = NaiveDate::from_ymd_opt(2024, 1, 8).expect("valid sample drive date");

    for (registration, history) in sample_donors() {
        let donor = registry.register_donor(registration)?;
        if !with_history {
            continue;
        }
        for visit in 0..history {
            let donation_date = first_drive + chrono::Duration::weeks(i64::from(visit) * 8);
            registry.record_donation(
                &donor.id,
                NewDonation {
                    request_id: None,
                    donation_date,
                    units_donated: 1,
                    location: "Central Iowa Blood Center".to_string(),
                    notes: None,
                },
            )?;
        }
    }

    registry.post_request(NewBloodRequest {
        patient_name: "R. Osei".to_string(),
        blood_type: BloodType::ONegative,
        units_needed: 3,
        urgency: Urgency::Critical,
        hospital_name: "Mercy Medical Center".to_string(),
        hospital_location: "Des Moines".to_string(),
        contact_name: "Trauma desk".to_string(),
        contact_phone: "555-0199".to_string(),
        contact_email: "trauma@mercy.test".to_string(),
        details: Some("Post-surgical transfusion".to_string()),
    })?;
    registry.post_request(NewBloodRequest {
        patient_name: "L. Chen".to_string(),
        blood_type: BloodType::APositive,
        units_needed: 1,
        urgency: Urgency::Normal,
        hospital_name: "UI Hospitals".to_string(),
        hospital_location: "Iowa City".to_string(),
        contact_name: "Oncology".to_string(),
        contact_phone: "555-0177".to_string(),
        contact_email: "oncology@uihc.test".to_string(),
        details: None,
    })?;

    Ok(())
}

fn render_dashboard(stats: &DashboardStats) {
    println!("\nDashboard");
    println!(
        "- Donors: {} registered, {} available ({}%)",
        stats.total_donors, stats.available_donors, stats.availability_rate
    );
    println!(
        "- Donations: {} (up to {} lives saved)",
        stats.total_donations, stats.lives_saved
    );
    println!("- Open requests: {}", stats.active_requests);

    if !stats.donors_by_blood_type.is_empty() {
        println!("\nDonors by blood type");
        for entry in &stats.donors_by_blood_type {
            println!("- {}: {}", entry.blood_type, entry.count);
        }
    }

    if stats.recent_requests.is_empty() {
        println!("\nRecent requests: none");
    } else {
        println!("\nRecent requests");
        for request in &stats.recent_requests {
            println!(
                "- [{}] {} needs {} unit(s) of {} at {}",
                request.urgency.label(),
                request.patient_name,
                request.units_needed,
                request.blood_type,
                request.hospital_name
            );
        }
    }
}

fn render_progression(rewards: &MemoryRewards, list_tiers: bool) -> Result<(), AppError> {
    let board = rewards.leaderboard(usize::MAX)?;

    println!("\nDonor progression");
    for entry in &board {
        println!(
            "\n{} ({}, {})",
            entry.donor.name, entry.donor.blood_type, entry.donor.id
        );
        render_result(&entry.result, entry.total_tiers, list_tiers);
    }

    Ok(())
}

fn render_result(result: &EligibilityResult, total_tiers: usize, list_tiers: bool) {
    println!(
        "- {} donation(s), up to {} lives saved",
        result.donation_count, result.lives_saved
    );
    println!(
        "- Rewards earned: {} of {}",
        result.earned_tiers.len(),
        total_tiers
    );

    match (&result.next_tier, result.remaining_to_next) {
        (Some(tier), Some(remaining)) => {
            println!("- Next reward: {} in {} donation(s)", tier.name, remaining)
        }
        _ => println!("- All rewards unlocked!"),
    }

    if result.is_eligible {
        println!("- Eligible for reward redemption");
    }

    if list_tiers {
        for tier in &result.earned_tiers {
            println!("  [earned] {} - {}", tier.name, tier.value);
        }
        for (tier, progress) in result.upcoming_tiers.iter().zip(&result.upcoming_progress) {
            println!(
                "  [locked] {} - {}/{} ({}%), {} more needed",
                tier.name,
                result.donation_count,
                tier.required_donations,
                progress.percent,
                progress.remaining
            );
        }
    }
}
