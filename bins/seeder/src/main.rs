//! Database seeder for Baitulmal development and testing.
//!
//! Seeds a handful of funds and a few months of transactions for local
//! development.
//!
//! Usage: cargo run --bin seeder

use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use baitulmal_core::finance::{
    Category, ExpenseCategory, IncomeCategory, NewTransaction, PaymentMethod,
};
use baitulmal_core::fund::{Fund, FundType, NewFund};
use baitulmal_db::repositories::{FundRepository, TransactionRepository};

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    let database_url =
        std::env::var("DATABASE_URL").expect("DATABASE_URL must be set in environment");

    println!("Connecting to database...");
    let db = baitulmal_db::connect(&database_url)
        .await
        .expect("Failed to connect to database");

    let funds = FundRepository::new(db.clone());
    let transactions = TransactionRepository::new(db);

    println!("Seeding funds...");
    let seeded_funds = seed_funds(&funds).await;

    println!("Seeding transactions...");
    seed_transactions(&transactions, &seeded_funds).await;

    println!("Done.");
}

async fn seed_funds(repo: &FundRepository) -> Vec<Fund> {
    let inputs = [
        ("Kas Operasional", FundType::Operasional, false),
        ("Dana Sosial", FundType::Sosial, false),
        ("Zakat", FundType::Zakat, true),
        ("Pembangunan Menara", FundType::Pembangunan, false),
    ];

    let mut seeded = Vec::with_capacity(inputs.len());
    for (name, fund_type, is_restricted) in inputs {
        let fund = repo
            .create_fund(NewFund {
                name: name.to_string(),
                fund_type,
                is_restricted,
                description: None,
            })
            .await
            .expect("Failed to seed fund");
        println!("  {} ({})", fund.name, fund.id);
        seeded.push(fund);
    }
    seeded
}

async fn seed_transactions(repo: &TransactionRepository, funds: &[Fund]) {
    let general: Option<Fund> = None;
    let zakat_fund = funds.iter().find(|f| f.fund_type == FundType::Zakat);
    let building_fund = funds
        .iter()
        .find(|f| f.fund_type == FundType::Pembangunan);

    let rows: [(Category, Decimal, NaiveDate, Option<&Fund>, &str); 6] = [
        (
            IncomeCategory::Infaq.into(),
            dec!(1_250_000),
            date(2026, 6, 5),
            general.as_ref(),
            "Kotak amal Jumat pekan pertama",
        ),
        (
            IncomeCategory::Zakat.into(),
            dec!(3_000_000),
            date(2026, 6, 12),
            zakat_fund,
            "Zakat maal",
        ),
        (
            IncomeCategory::Donasi.into(),
            dec!(5_000_000),
            date(2026, 6, 20),
            building_fund,
            "Donasi pembangunan menara",
        ),
        (
            ExpenseCategory::Operasional.into(),
            dec!(450_000),
            date(2026, 6, 25),
            general.as_ref(),
            "Tagihan listrik bulan Juni",
        ),
        (
            ExpenseCategory::Sosial.into(),
            dec!(1_500_000),
            date(2026, 7, 3),
            zakat_fund,
            "Santunan anak yatim",
        ),
        (
            ExpenseCategory::Pembangunan.into(),
            dec!(2_750_000),
            date(2026, 7, 15),
            building_fund,
            "Pembelian material tahap awal",
        ),
    ];

    for (category, amount, date, fund, description) in rows {
        repo.create_transaction(NewTransaction {
            transaction_type: category.transaction_type(),
            category,
            amount,
            date,
            fund_id: fund.map(|f| f.id),
            description: description.to_string(),
            donor_name: None,
            payment_method: PaymentMethod::Cash,
            is_anonymous: false,
        })
        .await
        .expect("Failed to seed transaction");
        println!("  {description}");
    }
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid seed date")
}
