//! boundary-demo
//!
//! Drives the exported C ABI the way a native caller would, and inspects the
//! boundary contract table.

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use env_logger::Env;
use interop_boundary::boundary::{self, strings};
use interop_boundary::config::{BoundaryConfig, DemoConfig};
use interop_boundary::ffi::{parse_header, ContractRegistry};
use interop_boundary::{Side, Tuple};
use std::ffi::{CStr, CString};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "boundary-demo")]
#[command(version)]
#[command(about = "Exercise the C/Rust interop boundary", long_about = None)]
struct Cli {
    /// Config file (default: boundary.toml searched upward from the cwd)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Verbose output (debug logging)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Call every boundary function in turn (default)
    Run,

    /// Print the boundary contract table
    Contracts {
        /// Check ownership invariants and fail on a violation
        #[arg(long)]
        validate: bool,
    },

    /// Compare a C header against the contract table
    CheckHeader {
        /// Header file to read
        path: PathBuf,

        /// The header declares the native helper instead of the managed exports
        #[arg(long)]
        native: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => BoundaryConfig::load(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => BoundaryConfig::load_from_cwd().context("Failed to load boundary.toml")?,
    };

    let level = if cli.verbose {
        "debug"
    } else {
        config.logging.level.as_str()
    };
    env_logger::Builder::from_env(Env::default().default_filter_or(level)).init();

    match cli.command.unwrap_or(Commands::Run) {
        Commands::Run => cmd_run(&config.demo),
        Commands::Contracts { validate } => cmd_contracts(validate),
        Commands::CheckHeader { path, native } => cmd_check_header(&path, native),
    }
}

fn cmd_run(demo: &DemoConfig) -> Result<()> {
    println!("Hello, World from the driver!");
    boundary::println_hello_world();

    let greeting = boundary::return_hello_world();
    if greeting.is_null() {
        bail!("return_hello_world returned null");
    }
    // SAFETY: non-null pointer from return_hello_world, released exactly once below
    let text = unsafe { CStr::from_ptr(greeting) }.to_string_lossy().into_owned();
    unsafe { boundary::free_rust_allocated_string(greeting) };
    println!("{}\n", text);

    for sample in &demo.hotdog_samples {
        let c_sample = CString::new(sample.as_str()).context("sample contains a NUL byte")?;
        // SAFETY: c_sample outlives the call
        let found = unsafe { boundary::contains_hotdog(c_sample.as_ptr()) };
        let verb = if found { "contains" } else { "doesn't contain" };
        println!("\"{}\" {} \"{}\"", sample, verb, strings::FORBIDDEN_FOOD);
    }
    println!();

    let input = demo.double_input;
    println!("{} * 2 = {}", input, boundary::double_input(input));
    println!("{} * 2 = {} (via C)\n", input, boundary::double_input_via_c(input));

    let text = CString::new(demo.sample_text.as_str()).context("sample text contains a NUL byte")?;
    // SAFETY: text outlives every call
    let (count, len, c_len) = unsafe {
        (
            boundary::how_many_characters(text.as_ptr()),
            boundary::how_many_bytes(text.as_ptr()),
            libc::strlen(text.as_ptr()),
        )
    };
    println!("Characters count extended grapheme clusters, bytes count storage.");
    println!(
        "in \"{}\", characters = {}, bytes = {}, strlen = {}\n",
        demo.sample_text,
        count,
        len,
        c_len
    );

    // SAFETY: the vector outlives the call and its length is passed alongside
    let sum = unsafe { boundary::sum_of_even(demo.even_numbers.as_ptr(), demo.even_numbers.len()) };
    println!("sum_of_even of {:?}: {}", demo.even_numbers, sum);

    let initial = Tuple::from((demo.tuple[0], demo.tuple[1]));
    let result = boundary::flip_things_around(initial);
    println!(
        "Initial tuple (a,b): ({}, {}). (b+1, a-1): ({}, {})\n",
        initial.x, initial.y, result.x, result.y
    );

    run_zip_codes(&demo.zip_codes)?;

    let mut numbers = demo.increment.clone();
    println!("To increment: {:?}", numbers);
    // SAFETY: exclusive access to `numbers` for each call
    unsafe { boundary::increment_array(numbers.len(), numbers.as_mut_ptr()) };
    println!("Incremented via Rust: {:?}", numbers);
    unsafe { boundary::increment_array_via_c(numbers.len(), numbers.as_mut_ptr()) };
    println!("Incremented again, via Rust via C: {:?}", numbers);

    Ok(())
}

fn run_zip_codes(zip_codes: &[String]) -> Result<()> {
    let keys = zip_codes
        .iter()
        .map(|zip| CString::new(zip.as_str()))
        .collect::<Result<Vec<_>, _>>()
        .context("zip code contains a NUL byte")?;

    let database = boundary::zip_code_database_new();
    // SAFETY: `database` is live until the free below; keys outlive every call
    let populations: Vec<u32> = unsafe {
        boundary::zip_code_database_populate(database);
        let populations = keys
            .iter()
            .map(|key| boundary::zip_code_database_population_of(database, key.as_ptr()))
            .collect();
        boundary::zip_code_database_free(database);
        populations
    };

    for (zip, population) in zip_codes.iter().zip(&populations) {
        println!("population of {}: {}", zip, population);
    }
    if let [first, second, ..] = populations[..] {
        println!(
            "Object/method example {} - {} = {}\n",
            zip_codes[0],
            zip_codes[1],
            i64::from(first) - i64::from(second)
        );
    }

    Ok(())
}

fn cmd_contracts(validate: bool) -> Result<()> {
    let registry = ContractRegistry::builtin();

    for side in [Side::Managed, Side::Native] {
        println!("{} side:", side);
        for info in registry.on_side(side) {
            println!("  {}", info);
            println!("      {}", info.description);
        }
        println!();
    }

    if validate {
        registry.validate().context("Contract table is inconsistent")?;
        println!("Ownership invariants hold.");
    }

    Ok(())
}

fn cmd_check_header(path: &Path, native: bool) -> Result<()> {
    let source =
        fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))?;
    let declared =
        parse_header(&source).with_context(|| format!("Failed to parse {}", path.display()))?;

    let side = if native { Side::Native } else { Side::Managed };
    let mismatches = ContractRegistry::builtin().diff(side, &declared);

    if mismatches.is_empty() {
        println!(
            "{}: {} declarations match the {} contract table",
            path.display(),
            declared.len(),
            side
        );
        return Ok(());
    }

    for mismatch in &mismatches {
        eprintln!("{}: {}", path.display(), mismatch);
    }
    bail!("{} mismatch(es) in {}", mismatches.len(), path.display())
}
