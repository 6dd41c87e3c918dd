//! Command-line front end: load a JSON memory map and dump the parsed
//! catalog, as a plain listing or as JSON.

use std::path::Path;
use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use tlm_remap::map::parse;
use tlm_remap::{Catalog, Message};

#[derive(Parser, Debug)]
#[command(
    name = "tlm_remap",
    version,
    about = "Bit-granular telemetry/command packet translation between ABIs"
)]
struct Cli {
    /// Path to the JSON memory map
    #[arg(short = 'p', long = "path")]
    path: String,

    /// Dump the parsed catalog as JSON instead of a plain listing
    #[arg(long)]
    json: bool,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("tlm_remap: {err:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> anyhow::Result<()> {
    let path = Path::new(&cli.path);
    if !path.is_file() {
        anyhow::bail!("'{}' is not a readable file", cli.path);
    }

    let catalog: Catalog =
        parse::from_file(&cli.path).with_context(|| format!("loading memory map '{}'", cli.path))?;

    if cli.json {
        dump_json(&catalog)?;
    } else {
        dump_plain(&catalog);
    }

    Ok(())
}

fn dump_plain(catalog: &Catalog) {
    println!("Memory map: {} message(s)", catalog.len());
    for msg in catalog.iter_messages() {
        print_message(msg);
    }
}

fn print_message(msg: &Message) {
    println!(
        "message 0x{:04X} ops_name={} src_symbol={} dst_symbol={} src_endian={} dst_endian={} mapped_bits={}",
        msg.id,
        msg.ops_name,
        msg.src_symbol,
        msg.dst_symbol,
        msg.src_endian.tag(),
        msg.dst_endian.tag(),
        msg.mapped_bits()
    );
    for field in &msg.fields {
        println!(
            "  field {:<24} length={:<5} src_offset={:<6} dst_offset={}",
            field.op_name, field.bit_length, field.src_offset, field.dst_offset
        );
    }
}

fn dump_json(catalog: &Catalog) -> anyhow::Result<()> {
    let messages: Vec<&Message> = catalog.iter_messages().collect();
    let text = serde_json::to_string_pretty(&messages).context("serializing catalog")?;
    println!("{text}");
    Ok(())
}
