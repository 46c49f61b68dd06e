mod error;
mod script;

use std::fs;
use std::io::{self, Read};

use clap::{Parser, ValueEnum};
use transform::surface::VendorPrefix;

use crate::error::ReplayError;

#[derive(Parser, Debug)]
#[command(name = "transformer", about = "Replay pointer gestures against an in-memory surface")]
struct Cli {
    #[arg(long, env = "TRANSFORMER_SCRIPT", default_value = "-", help = "Script path, or - for stdin")]
    script: String,

    #[arg(long, env = "TRANSFORMER_VENDOR_PREFIX", value_enum, default_value_t = PrefixArg::None)]
    vendor_prefix: PrefixArg,

    #[arg(long, env = "TRANSFORMER_PRETTY", default_value_t = false)]
    pretty: bool,

    #[arg(short, long, help = "Log gesture details to stderr")]
    verbose: bool,
}

#[derive(ValueEnum, Debug, Clone, Copy)]
enum PrefixArg {
    None,
    Webkit,
    Moz,
    O,
}

impl From<PrefixArg> for VendorPrefix {
    fn from(arg: PrefixArg) -> Self {
        match arg {
            PrefixArg::None => Self::None,
            PrefixArg::Webkit => Self::Webkit,
            PrefixArg::Moz => Self::Moz,
            PrefixArg::O => Self::O,
        }
    }
}

fn main() -> Result<(), ReplayError> {
    let cli = Cli::parse();

    let level = if cli.verbose { tracing::Level::DEBUG } else { tracing::Level::INFO };
    tracing_subscriber::fmt().with_writer(io::stderr).with_max_level(level).init();

    let text = read_script(&cli.script)?;
    let script = script::parse(&text)?;
    tracing::info!(
        elements = script.elements.len(),
        gestures = script.gestures.len(),
        prefix = ?cli.vendor_prefix,
        "replaying script"
    );

    let report = script::replay(&script, cli.vendor_prefix.into())?;
    println!("{}", script::render(&report, cli.pretty)?);
    Ok(())
}

fn read_script(path: &str) -> Result<String, ReplayError> {
    let read_error = |source| ReplayError::Read { path: path.to_owned(), source };
    if path == "-" {
        let mut text = String::new();
        io::stdin().read_to_string(&mut text).map_err(read_error)?;
        return Ok(text);
    }
    fs::read_to_string(path).map_err(read_error)
}
