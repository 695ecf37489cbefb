use clap::Parser;

use qmp::convert::{cover_to_values, encode};
use qmp::cover::{minimize, Options, DEFAULT_MAX_CANDIDATES};

#[derive(Debug, Parser)]
#[command(author, version, about = "Quine-McCluskey-Petrick minimization algorithm.")]
struct Cli {
    /// Minterms (decimal).
    #[arg(value_name = "MINTERMS", required = true)]
    minterms: Vec<u64>,

    /// Don't-care terms (decimal).
    #[arg(long = "dont-cares", short = 'd', value_name = "DC", num_args = 1..)]
    dont_cares: Vec<u64>,

    /// Skip Petrick's method when more non-essential primes are left.
    #[arg(long, value_name = "INT", default_value_t = DEFAULT_MAX_CANDIDATES)]
    max_candidates: usize,

    /// Enable debug logging.
    #[arg(long, short)]
    verbose: bool,
}

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let args = Cli::parse();

    simplelog::TermLogger::init(
        if args.verbose {
            simplelog::LevelFilter::Debug
        } else {
            simplelog::LevelFilter::Warn
        },
        simplelog::Config::default(),
        simplelog::TerminalMode::Mixed,
        simplelog::ColorChoice::Auto,
    )?;

    let (minterms, dont_cares) = encode(&args.minterms, &args.dont_cares)?;
    let dont_cares = if dont_cares.is_empty() { None } else { Some(&dont_cares) };
    let options = Options::default().with_max_candidates(args.max_candidates);

    let time_total = std::time::Instant::now();
    let cover = minimize(&minterms, dont_cares, &options)?;
    let primes = cover.primes();

    for (prime, values) in primes.iter().zip(cover_to_values(&primes)) {
        let values: Vec<String> = values.iter().map(|v| v.to_string()).collect();
        println!("{}  ({})", prime, values.join(", "));
    }
    println!(
        "{} prime implicants, {}, in {:.3} s",
        cover.len(),
        cover.outcome(),
        time_total.elapsed().as_secs_f64()
    );

    Ok(())
}
