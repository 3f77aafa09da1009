//! End-to-end sample: read a property CSV, query GPT per address, print the
//! result table.
//!
//! Run with:
//!
//! ```sh
//! OPENAI_API_KEY=sk-... cargo run --example estimate_sample --features openai -- property_list.csv
//! ```

use estimator::ai::OpenAI;
use estimator::{read_question_records, Estimator};

const PROMPT: &str = "How many bedrooms and bathrooms are at the property located at ";

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "property_list.csv".to_string());

    let records = read_question_records(&path, PROMPT)?;
    println!("Loaded {} records from {}", records.len(), path);

    let model = OpenAI::from_env()?.with_model("gpt-4.1");
    let mut estimator = Estimator::new(model);
    estimator.add_general_input("Please respond in format: 'Bedrooms: X, Bathrooms: Y'");

    let table = estimator.estimate(&records).await?;

    println!(
        "{:<12} {:>8} {:>9} {:>7} {:>12}",
        "qpid", "bedrooms", "bathrooms", "tokens", "time_seconds"
    );
    for row in &table {
        println!(
            "{:<12} {:>8} {:>9} {:>7} {:>12}",
            row.qpid,
            fmt_opt(row.bedrooms),
            fmt_opt(row.bathrooms),
            row.tokens_used.map_or("-".into(), |t| t.to_string()),
            row.time_seconds.map_or("-".into(), |t| format!("{t:.2}")),
        );
    }

    Ok(())
}

fn fmt_opt(value: Option<f64>) -> String {
    value.map_or("-".to_string(), |v| v.to_string())
}
