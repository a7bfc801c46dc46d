//! Command line front end for the quoting core
//!
//! ```text
//! pricequote prices.csv options series --size 2
//! pricequote --currency CAD prices.csv quote --size 2 --series A \
//!     --material SS --seat PTFE --cylinder 2 --tier TierB --adjust 5.25
//! ```

use clap::{Parser, Subcommand};
use pricequote::{Currency, DiscountTier, PriceListReader, QuoteSession, Selector};
use std::error::Error;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "pricequote", version, about = "Quote prices from a CSV price list")]
struct Cli {
    /// Price list (.csv, .csv.zst, .csv.gz, .csv.zip)
    file: PathBuf,

    /// Quoting currency
    #[arg(long, default_value = "USD")]
    currency: Currency,

    /// Field delimiter
    #[arg(long, default_value_t = ';')]
    delimiter: char,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List the values a selector offers, given the choices above it
    Options {
        selector: Selector,
        #[arg(long)]
        size: Option<String>,
        #[arg(long)]
        series: Option<String>,
        #[arg(long)]
        material: Option<String>,
    },
    /// Price a fully specified product
    Quote {
        #[arg(long)]
        size: String,
        #[arg(long)]
        series: String,
        #[arg(long)]
        material: String,
        #[arg(long)]
        seat: String,
        #[arg(long)]
        cylinder: Option<String>,
        #[arg(long)]
        tier: String,
        /// Manual adjustment in dollars, repeatable
        #[arg(long = "adjust", allow_hyphen_values = true)]
        adjustments: Vec<String>,
    },
    /// Show the discount tier table
    Tiers,
}

fn main() -> Result<(), Box<dyn Error>> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let delimiter = u8::try_from(cli.delimiter)
        .map_err(|_| format!("Delimiter must be a single-byte character: {}", cli.delimiter))?;

    let reader = PriceListReader::open(&cli.file)?.delimiter(delimiter);
    let mut session = QuoteSession::new(cli.currency);
    session.load_reader(&reader);

    match cli.command {
        Command::Options {
            selector,
            size,
            series,
            material,
        } => {
            let choices = [
                (Selector::Size, size),
                (Selector::Series, series),
                (Selector::Material, material),
            ];
            for (above, value) in choices {
                if above == selector || selector == Selector::Cylinder {
                    break;
                }
                session.select(above, value.as_deref().unwrap_or(""));
            }
            for value in session.domain(selector) {
                println!("{}", value);
            }
        }
        Command::Quote {
            size,
            series,
            material,
            seat,
            cylinder,
            tier,
            adjustments,
        } => {
            session.select_size(&size);
            session.select_series(&series);
            session.select_material(&material);
            session.select_seat(&seat);
            if let Some(cylinder) = cylinder {
                session.select_cylinder(&cylinder);
            }
            session.set_tier(&tier);
            for amount in &adjustments {
                let row = session.add_adjustment(None);
                session.set_adjustment(row, amount);
            }

            let quote = session.submit()?;
            println!("List price:     {}", session.list_price());
            if !session.cylinder_price().is_empty() {
                println!("Cylinder price: {}", session.cylinder_price());
            }
            if session.main_note().alert {
                println!("Note:           {}", session.main_note().text);
            }
            if session.cylinder_note().alert {
                println!("Cylinder note:  {}", session.cylinder_note().text);
            }
            println!("Subtotal:       {}", session.format(quote.subtotal()));
            println!("Rate:           {:.2}", quote.rate());
            if !adjustments.is_empty() {
                println!("{}", session.adjustments_label());
            }
            println!("Total:          {}", session.total_display());
        }
        Command::Tiers => {
            for tier in DiscountTier::ALL {
                println!(
                    "{:<6} {:>5} bp  ({}% off)",
                    tier.key(),
                    tier.basis_points(),
                    tier.discount_percent()
                );
            }
        }
    }

    Ok(())
}
