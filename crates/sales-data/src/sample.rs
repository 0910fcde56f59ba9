//! Random demo records for trying the dashboard without a file.

use chrono::NaiveDate;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use sales_core::models::{ContractType, SaleRecord};
use tracing::debug;

/// Number of records produced per call.
pub const SAMPLE_SIZE: usize = 150;

/// Year every sample sale falls in.
pub const SAMPLE_YEAR: i32 = 2025;

const CONSULTANTS: [&str; 4] = ["Ana Silva", "Carlos Souza", "Beatriz Lima", "João Mendes"];
const CARRIERS: [&str; 5] = ["Unimed", "Bradesco", "Amil", "SulAmérica", "Porto Seguro"];
const SOURCES: [&str; 4] = ["Google", "Meta (Facebook/Instagram)", "Indicação", "Site"];

/// Generate [`SAMPLE_SIZE`] records sorted by date.
///
/// Months run January to November, days 1–28. Roughly 40% of contracts are
/// PJ with 2–21 lives; PF contracts cover 1–3 lives.
pub fn generate_sample_data<R: Rng>(rng: &mut R) -> Vec<SaleRecord> {
    let mut records: Vec<SaleRecord> = (0..SAMPLE_SIZE)
        .map(|i| {
            let month = rng.gen_range(1..=11);
            let day = rng.gen_range(1..=28);
            let contract_type = if rng.gen::<f64>() > 0.6 {
                ContractType::PJ
            } else {
                ContractType::PF
            };
            let (lives, base) = match contract_type {
                ContractType::PJ => (rng.gen_range(2..=21), 400.0),
                ContractType::PF => (rng.gen_range(1..=3), 600.0),
            };

            SaleRecord {
                id: format!("sample-{}", i),
                date: NaiveDate::from_ymd_opt(SAMPLE_YEAR, month, day),
                client_name: format!("Cliente {}", i),
                source: pick(rng, &SOURCES),
                consultant: pick(rng, &CONSULTANTS),
                carrier: pick(rng, &CARRIERS),
                gender: if rng.gen::<f64>() > 0.5 { "M" } else { "F" }.to_string(),
                contract_type,
                lives_covered: lives,
                amount: f64::from(lives) * base + rng.gen::<f64>() * 200.0,
            }
        })
        .collect();

    records.sort_by_key(|r| r.date);
    debug!("Generated {} sample records", records.len());
    records
}

/// Sample records from a seeded generator, or from entropy when `seed` is
/// `None`.
pub fn sample_records(seed: Option<u64>) -> Vec<SaleRecord> {
    let mut rng = match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    generate_sample_data(&mut rng)
}

fn pick<R: Rng>(rng: &mut R, options: &[&str]) -> String {
    options.choose(rng).copied().unwrap_or_default().to_string()
}
