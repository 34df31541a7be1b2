use std::fs;
use std::path::Path;

use chrono::{Duration, NaiveDate};
use serde::Serialize;

/// One synthetic filing, in the same shape as the real daily feed dumps.
#[derive(Serialize)]
struct SampleFiling {
    issuer: String,
    symbol: String,
    owner: String,
    shares: f64,
    price: f64,
    is_purchased: bool,
    timestamp: String,
    title: String,
    transaction_code: String,
    source_url: String,
}

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

    fn below(&mut self, n: usize) -> usize {
        (self.next_u64() % n as u64) as usize
    }
}

fn main() {
    let mut rng = SimpleRng::new(42);

    let companies = [
        ("Apple Inc.", "AAPL"),
        ("Microsoft Corp", "MSFT"),
        ("NVIDIA Corp", "NVDA"),
        ("Tesla Inc", "TSLA"),
        ("JPMorgan Chase & Co", "JPM"),
    ];
    let owners = [
        "Alice Johnson",
        "Bob Smith",
        "Carol Vega",
        "Dan Wright",
        "Erin Castillo",
    ];
    let titles = [
        "Chief Executive Officer",
        "Chief Financial Officer",
        "Director",
        "10% Owner",
        "General Counsel",
    ];

    let out_dir = Path::new("data");
    fs::create_dir_all(out_dir).expect("Failed to create data directory");

    let first_day = NaiveDate::from_ymd_opt(2025, 8, 4).expect("valid date");
    let mut total = 0usize;

    for day_offset in 0..3 {
        let day = first_day + Duration::days(day_offset);
        let count = 20 + rng.below(15);

        let mut filings = Vec::with_capacity(count);
        for _ in 0..count {
            let (issuer, symbol) = companies[rng.below(companies.len())];
            let owner = owners[rng.below(owners.len())];
            let title = titles[rng.below(titles.len())];
            let is_purchased = rng.next_f64() < 0.5;
            let shares = (rng.next_f64() * 50_000.0 * 100.0).round() / 100.0;
            let price = (rng.next_f64() * 400.0 * 100.0).round() / 100.0;

            // The feed updates hourly from 06:00 to 23:00.
            let hour = 6 + rng.below(18);
            let minute = rng.below(60);
            let timestamp = format!("{}T{hour:02}:{minute:02}:00", day.format("%Y-%m-%d"));

            filings.push(SampleFiling {
                issuer: issuer.to_string(),
                symbol: symbol.to_string(),
                owner: owner.to_string(),
                shares,
                price,
                is_purchased,
                timestamp,
                title: title.to_string(),
                transaction_code: if is_purchased { "P" } else { "S" }.to_string(),
                source_url: format!(
                    "https://www.sec.gov/Archives/edgar/data/{}.txt",
                    rng.next_u64() % 10_000_000
                ),
            });
            total += 1;
        }

        let name = format!("daily_filings_{}.json", day.format("%Y_%m_%d"));
        let json = serde_json::to_string_pretty(&filings).expect("Failed to serialize filings");
        fs::write(out_dir.join(&name), json).expect("Failed to write sample file");
    }

    println!(
        "Wrote {total} filings across 3 daily files to {}",
        out_dir.display()
    );
}
