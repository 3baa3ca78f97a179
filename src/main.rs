use checkout::application::checkout::{Checkout, Receipt};
use checkout::demo;
use checkout::domain::pricing::RuleSet;
use checkout::infrastructure::in_memory::InMemoryCatalog;
use checkout::interfaces::csv::catalog_reader::CatalogReader;
use checkout::interfaces::csv::rule_reader::RuleReader;
use checkout::interfaces::format::format_money;
use checkout::logging;
use clap::{Parser, ValueEnum};
use miette::{IntoDiagnostic, Result};
use std::fs::File;
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Item codes to scan, in order. Without codes the sample baskets are priced.
    codes: Vec<String>,

    /// Catalog CSV file (code,name,price,currency). Defaults to the sample shop.
    #[arg(long)]
    catalog: Option<PathBuf>,

    /// Pricing rules CSV file (kind,item,threshold,rate).
    #[arg(long)]
    rules: Option<PathBuf>,

    /// Output format for the totals.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// Print the active promotions before the totals.
    #[arg(long)]
    show_rules: bool,

    /// Log pricing decisions to stderr.
    #[arg(short, long)]
    verbose: bool,
}

fn load_catalog(path: Option<&PathBuf>) -> Result<InMemoryCatalog> {
    let Some(path) = path else {
        return demo::sample_catalog().into_diagnostic();
    };

    let file = File::open(path).into_diagnostic()?;
    let mut catalog = InMemoryCatalog::new();
    for item_result in CatalogReader::new(file).items() {
        match item_result.and_then(|item| catalog.insert(item)) {
            Ok(item) => tracing::debug!(code = item.code(), "loaded catalog item"),
            Err(e) => eprintln!("Error reading catalog item: {}", e),
        }
    }
    Ok(catalog)
}

fn load_rules(
    path: Option<&PathBuf>,
    catalog: &InMemoryCatalog,
    custom_catalog: bool,
) -> Result<RuleSet> {
    let Some(path) = path else {
        if custom_catalog {
            return Ok(RuleSet::new());
        }
        return demo::sample_rules(catalog).into_diagnostic();
    };

    let file = File::open(path).into_diagnostic()?;
    let mut rules = RuleSet::new();
    for rule_result in RuleReader::new(file).rules(catalog) {
        match rule_result {
            Ok(rule) => rules.push(rule),
            Err(e) => eprintln!("Error reading pricing rule: {}", e),
        }
    }
    Ok(rules)
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init(if cli.verbose { "debug" } else { "warn" });

    let catalog = load_catalog(cli.catalog.as_ref())?;
    let rules = Arc::new(load_rules(
        cli.rules.as_ref(),
        &catalog,
        cli.catalog.is_some(),
    )?);
    tracing::info!(items = catalog.len(), rules = rules.len(), "checkout ready");

    if cli.show_rules {
        print!("{}", rules.description());
    }

    let baskets: Vec<Vec<String>> = if cli.codes.is_empty() {
        demo::sample_baskets()
            .into_iter()
            .map(|basket| basket.into_iter().map(str::to_string).collect())
            .collect()
    } else {
        vec![cli.codes]
    };

    let mut receipts: Vec<Receipt> = Vec::with_capacity(baskets.len());
    for basket in &baskets {
        let mut checkout = Checkout::with_rules(Arc::clone(&rules));
        for code in basket {
            let item = catalog.require(code).into_diagnostic()?;
            checkout.scan(&item);
        }
        receipts.push(checkout.receipt().into_diagnostic()?);
    }

    match cli.format {
        OutputFormat::Text => {
            for receipt in &receipts {
                println!("{}", format_money(&receipt.total));
            }
        }
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&receipts).into_diagnostic()?;
            println!("{}", json);
        }
    }

    Ok(())
}
