use std::env;
use std::fs::{create_dir_all, File};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use rand::seq::IndexedRandom;
use rand::Rng;
use rust_decimal::Decimal;

const HEADER: &str = "Txn Date,Description,Cheque No.,Debit,Credit,Balance";
const PROBABILITY_CREDIT: f64 = 0.3;
const PROBABILITY_BLANK_ROW: f64 = 0.05;
const PROBABILITY_GROUPED_AMOUNT: f64 = 0.5;

const DESCRIPTIONS: [&str; 8] = [
    "UPI GROCERY MART",
    "ATM WITHDRAWAL",
    "NEFT SALARY ACME LTD",
    "CARD PURCHASE FUEL",
    "RENT TRANSFER",
    "INTEREST CREDIT",
    "EMI HOME LOAN",
    "IMPS REFUND"
];

struct GeneratorConfig {
    num_transactions: usize,
    num_pages: usize,
    output_dir: PathBuf
}

impl GeneratorConfig {
    fn from_args() -> Self {
        let args: Vec<String> = env::args().collect();
        let num_transactions = args.get(1).and_then(|s| s.parse().ok()).unwrap_or(500);
        let num_pages = args.get(2).and_then(|s| s.parse().ok()).unwrap_or(5).max(1);

        Self {
            num_transactions,
            num_pages,
            output_dir: PathBuf::from("samples/noisy")
        }
    }
}

/// Writes a Canara-style multi-page statement with repeated headers, blank rows
/// and grouped amounts, then prints the totals the normalizer should report.
fn main() -> io::Result<()> {
    let config = GeneratorConfig::from_args();

    println!(
        "Generating {} transactions over {} pages in {}...",
        config.num_transactions, config.num_pages, config.output_dir.display()
    );

    create_dir_all(&config.output_dir)?;
    write_ocr_text(&config.output_dir)?;

    let mut rng = rand::rng();
    let mut balance = Decimal::new(rng.random_range(1_000_000..10_000_000), 2);
    let mut total_debit = Decimal::ZERO;
    let mut total_credit = Decimal::ZERO;
    let mut opening_balance = None;

    let per_page = config.num_transactions.div_ceil(config.num_pages).max(1);

    for page in 0..config.num_pages {
        let path = config.output_dir.join(format!("page_{:02}.csv", page + 1));
        let mut writer = BufWriter::new(File::create(path)?);

        if page == 0 {
            writeln!(writer, "CANARA BANK,,,,,")?;
            writeln!(writer, "Statement of Account,,,,,")?;
        }

        writeln!(writer, "{HEADER}")?;

        let first = page * per_page;
        let last = ((page + 1) * per_page).min(config.num_transactions);

        for index in first..last {
            if rng.random_bool(PROBABILITY_BLANK_ROW) {
                writeln!(writer, ",,,,,")?;
            }

            let amount = Decimal::new(rng.random_range(100..2_500_000), 2);
            let is_credit = rng.random_bool(PROBABILITY_CREDIT) || balance < amount;

            let (debit, credit) = if is_credit {
                balance += amount;
                total_credit += amount;
                (String::new(), format_amount(&mut rng, amount))
            } else {
                balance -= amount;
                total_debit += amount;
                (format_amount(&mut rng, amount), String::new())
            };

            opening_balance.get_or_insert(balance);

            let day = index % 28 + 1;
            let description = DESCRIPTIONS.choose(&mut rng).copied().unwrap_or("TRANSFER");

            writeln!(writer, "{day:02}-04-2024,{description},,{debit},{credit},{}", format_amount(&mut rng, balance))?;
        }

        writer.flush()?;
    }

    println!("Total Credit,{total_credit}");
    println!("Total Debit,{total_debit}");
    println!("Opening Balance,{}", opening_balance.unwrap_or(Decimal::ZERO));
    println!("Closing Balance,{balance}");

    Ok(())
}

fn write_ocr_text(directory: &Path) -> io::Result<()> {
    let mut writer = File::create(directory.join("ocr.txt"))?;

    writeln!(writer, "CANARA BANK")?;
    writeln!(writer, "Account Holder's Name: DEMO CUSTOMER")?;
    writeln!(writer, "Account Number: 9988776655")?;

    Ok(())
}

/// Renders `12345.60` either plainly or as the quoted `"12,345.60"` seen in exported statements.
fn format_amount<R: Rng>(rng: &mut R, amount: Decimal) -> String {
    let plain = format!("{amount:.2}");

    if !rng.random_bool(PROBABILITY_GROUPED_AMOUNT) {
        return plain;
    }

    let (whole, fraction) = plain.split_once('.').unwrap_or((plain.as_str(), "00"));
    let digits: Vec<char> = whole.chars().collect();
    let mut grouped = String::new();

    for (position, digit) in digits.iter().enumerate() {
        if position > 0 && (digits.len() - position) % 3 == 0 {
            grouped.push(',');
        }

        grouped.push(*digit);
    }

    format!("\"{grouped}.{fraction}\"")
}
