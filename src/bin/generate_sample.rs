use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use climate_story::data::loader::{ANNUAL_FILE, GAS_FILE, MONTHLY_FILE, SHARE_FILE};
use climate_story::data::model::SHARE_BLOCS;

const START_YEAR: i32 = 1961;
const END_YEAR: i32 = 2024;

/// (entity, ISO2, ISO3). The world aggregate is included so the
/// monthly and gas charts have their "All" fallback entity.
const COUNTRIES: [(&str, &str, &str); 17] = [
    ("United States", "US", "USA"),
    ("Canada", "CA", "CAN"),
    ("United Kingdom", "GB", "GBR"),
    ("Germany", "DE", "DEU"),
    ("France", "FR", "FRA"),
    ("Japan", "JP", "JPN"),
    ("Australia", "AU", "AUS"),
    ("New Zealand", "NZ", "NZL"),
    ("Norway", "NO", "NOR"),
    ("Sweden", "SE", "SWE"),
    ("Switzerland", "CH", "CHE"),
    ("Kenya", "KE", "KEN"),
    ("India", "IN", "IND"),
    ("Brazil", "BR", "BRA"),
    ("China", "CN", "CHN"),
    ("Indonesia", "ID", "IDN"),
    ("World", "", "OWID_WRL"),
];

const GAS_HEADERS: [&str; 6] = [
    "Change in global mean surface temperature caused by CO2 emissions from fossil fuels and industry",
    "Change in global mean surface temperature caused by CO2 emissions from agriculture and land use",
    "Change in global mean surface temperature caused by methane emissions from fossil fuels and industry",
    "Change in global mean surface temperature caused by methane emissions from agriculture and land use",
    "Change in global mean surface temperature caused by nitrous oxide emissions from fossil fuels and industry",
    "Change in global mean surface temperature caused by nitrous oxide emissions from agriculture and land use",
];

/// Minimal deterministic PRNG (xoshiro256**)
struct SimpleRng {
    state: [u64; 4],
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        let mut s = [0u64; 4];
        let mut x = seed;
        for slot in &mut s {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
            *slot = x;
        }
        SimpleRng { state: s }
    }

    fn next_u64(&mut self) -> u64 {
        let result = (self.state[1].wrapping_mul(5))
            .rotate_left(7)
            .wrapping_mul(9);
        let t = self.state[1] << 17;
        self.state[2] ^= self.state[0];
        self.state[3] ^= self.state[1];
        self.state[1] ^= self.state[2];
        self.state[0] ^= self.state[3];
        self.state[2] ^= t;
        self.state[3] = self.state[3].rotate_left(45);
        result
    }

    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    /// Box-Muller transform for normal distribution
    fn gauss(&mut self, mean: f64, std_dev: f64) -> f64 {
        let u1 = self.next_f64().max(1e-15);
        let u2 = self.next_f64();
        let z = (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos();
        mean + std_dev * z
    }
}

/// Fraction of the way from the start to the end of the year span.
fn progress(year: i32) -> f64 {
    (year - START_YEAR) as f64 / (END_YEAR - START_YEAR) as f64
}

/// Warming trend shared by all synthetic series.
fn trend(year: i32) -> f64 {
    let t = progress(year);
    -0.2 + 1.5 * t * t
}

fn main() -> Result<()> {
    let out_dir = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("data"));
    fs::create_dir_all(&out_dir)
        .with_context(|| format!("creating output directory {}", out_dir.display()))?;

    let mut rng = SimpleRng::new(42);
    write_annual(&out_dir, &mut rng)?;
    write_monthly(&out_dir, &mut rng)?;
    write_gas(&out_dir, &mut rng)?;
    write_share(&out_dir, &mut rng)?;

    println!(
        "Wrote sample data for {} entities, {}–{}, to {}",
        COUNTRIES.len(),
        START_YEAR,
        END_YEAR,
        out_dir.display()
    );
    Ok(())
}

fn write_annual(dir: &Path, rng: &mut SimpleRng) -> Result<()> {
    let path = dir.join(ANNUAL_FILE);
    let mut writer = csv::Writer::from_path(&path)
        .with_context(|| format!("creating {}", path.display()))?;

    let mut header = vec![
        "Country".to_string(),
        "ISO2".to_string(),
        "ISO3".to_string(),
        "Indicator".to_string(),
        "Unit".to_string(),
    ];
    header.extend((START_YEAR..=END_YEAR).map(|y| y.to_string()));
    writer.write_record(&header)?;

    for (idx, (entity, iso2, iso3)) in COUNTRIES.iter().enumerate() {
        let offset = (idx % 5) as f64 * 0.06;
        // A third of the entities calm down after 1993 so the
        // variability chart has content.
        let calming = idx % 3 == 0;

        let mut record = vec![
            entity.to_string(),
            iso2.to_string(),
            iso3.to_string(),
            "Surface Temperature Change".to_string(),
            "Degree Celsius".to_string(),
        ];
        for year in START_YEAR..=END_YEAR {
            // Sparse gaps exercise the missing-measurement handling.
            if rng.next_f64() < 0.02 {
                record.push(String::new());
                continue;
            }
            let sigma = if calming && year >= 1993 { 0.12 } else { 0.32 };
            let value = trend(year) + offset + rng.gauss(0.0, sigma);
            record.push(format!("{value:.3}"));
        }
        writer.write_record(&record)?;
    }
    writer.flush()?;
    Ok(())
}

fn write_monthly(dir: &Path, rng: &mut SimpleRng) -> Result<()> {
    let path = dir.join(MONTHLY_FILE);
    let mut writer = csv::Writer::from_path(&path)
        .with_context(|| format!("creating {}", path.display()))?;
    writer.write_record(["Entity", "Year", "Month", "Mean_Temp"])?;

    for (entity, _, _) in &COUNTRIES {
        for year in START_YEAR..=END_YEAR {
            for month in 1u32..=12 {
                let seasonal =
                    0.25 * (2.0 * std::f64::consts::PI * (month - 1) as f64 / 12.0).sin();
                let value = trend(year) + seasonal + rng.gauss(0.0, 0.15);
                writer.write_record([
                    entity.to_string(),
                    year.to_string(),
                    month.to_string(),
                    format!("{value:.3}"),
                ])?;
            }
        }
    }
    writer.flush()?;
    Ok(())
}

fn write_gas(dir: &Path, rng: &mut SimpleRng) -> Result<()> {
    let path = dir.join(GAS_FILE);
    let mut writer = csv::Writer::from_path(&path)
        .with_context(|| format!("creating {}", path.display()))?;

    let mut header = vec!["Entity".to_string(), "Code".to_string(), "Year".to_string()];
    header.extend(GAS_HEADERS.iter().map(|h| h.to_string()));
    writer.write_record(&header)?;

    // Relative weight of each gas/source series, same order as the headers.
    let weights = [0.52, 0.14, 0.10, 0.16, 0.02, 0.06];

    for (idx, (entity, _, iso3)) in COUNTRIES.iter().enumerate() {
        let scale = if *entity == "World" {
            1.0
        } else {
            0.01 + idx as f64 * 0.002
        };
        for year in START_YEAR..=END_YEAR {
            let total = progress(year).max(0.0) * scale;
            let mut record = vec![entity.to_string(), iso3.to_string(), year.to_string()];
            for weight in weights {
                let value = (total * weight * (1.0 + rng.gauss(0.0, 0.05))).max(0.0);
                record.push(format!("{value:.6}"));
            }
            writer.write_record(&record)?;
        }
    }
    writer.flush()?;
    Ok(())
}

fn write_share(dir: &Path, rng: &mut SimpleRng) -> Result<()> {
    let path = dir.join(SHARE_FILE);
    let mut writer = csv::Writer::from_path(&path)
        .with_context(|| format!("creating {}", path.display()))?;
    writer.write_record([
        "Entity",
        "Year",
        "Share of contribution to global warming",
    ])?;

    for year in START_YEAR..=END_YEAR {
        let t = progress(year);
        // The OECD share declines while the least-developed share creeps up.
        let shares = [55.0 - 18.0 * t, 2.0 + 5.0 * t];
        for (bloc, share) in SHARE_BLOCS.iter().zip(shares) {
            let value = (share + rng.gauss(0.0, 0.4)).max(0.0);
            writer.write_record([bloc.to_string(), year.to_string(), format!("{value:.3}")])?;
        }
    }
    writer.flush()?;
    Ok(())
}
