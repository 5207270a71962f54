use clap::{Arg, ArgAction, ArgGroup, Command};
use tracing::info;

use std::fs;
use std::io::{self, Read, Write};
use std::process;

use compressor::{CompressorError, Method, LZW};

struct Args {
    method: Option<Method>,
    source: Option<String>,
    output: Option<String>,
    verbose: bool,
}


fn init_tracing(verbose: bool) {
    let filter = if verbose {
        tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| "info".into())
    } else {
        tracing_subscriber::EnvFilter::new("warn")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .init();
}

fn get_args() -> Args {
    let matches = Command::new("mylzw")
        .about("LZW compression with variable-width codewords and a choice of codebook methods")
        .arg(Arg::new("compress")
            .short('c')
            .long("compress")
            .num_args(1)
            .value_name("METHOD")
            .value_parser(|s: &str| s.parse::<Method>())
            .help("Compress using a codebook method: n (fixed), r (reset) or m (monitor)"))
        .arg(Arg::new("expand")
            .short('x')
            .long("expand")
            .action(ArgAction::SetTrue)
            .help("Expand; the codebook method is read from the stream"))
        .group(ArgGroup::new("direction")
            .args(["compress", "expand"])
            .required(true))
        .arg(Arg::new("source")
            .short('s')
            .long("source")
            .num_args(1)
            .help("Input file. Default: stdin"))
        .arg(Arg::new("output")
            .short('o')
            .long("output")
            .num_args(1)
            .help("Output file. Default: stdout"))
        .arg(Arg::new("verbose")
            .short('v')
            .long("verbose")
            .action(ArgAction::SetTrue)
            .help("Log a run summary to stderr"))
        .get_matches();

    Args {
        method: matches.get_one::<Method>("compress").copied(),
        source: matches.get_one::<String>("source").cloned(),
        output: matches.get_one::<String>("output").cloned(),
        verbose: matches.get_flag("verbose"),
    }
}

fn read_source(source: Option<&str>) -> io::Result<Vec<u8>> {
    match source {
        Some(path) => fs::read(path),
        None => {
            let mut buffer = Vec::new();
            io::stdin().lock().read_to_end(&mut buffer)?;
            Ok(buffer)
        }
    }
}

fn write_output(output: Option<&str>, data: &[u8]) -> io::Result<()> {
    match output {
        Some(path) => fs::write(path, data),
        None => {
            let mut stdout = io::stdout().lock();
            stdout.write_all(data)?;
            stdout.flush()
        }
    }
}

fn run(args: &Args) -> Result<(), CompressorError> {
    let input = read_source(args.source.as_deref())?;

    let (output, stats) = match args.method {
        Some(method) => LZW::new(method).encode(&input)?,
        None => LZW::default().decode(&input)?,
    };

    info!(
        direction = if args.method.is_some() { "compress" } else { "expand" },
        input = input.len(),
        output = output.len(),
        codewords = stats.codewords,
        resets = stats.resets.len(),
        final_width = stats.final_width,
        "done"
    );

    write_output(args.output.as_deref(), &output)?;
    Ok(())
}

fn main() {
    let args = get_args();
    init_tracing(args.verbose);

    if let Err(e) = run(&args) {
        eprintln!("mylzw: {e}");
        process::exit(1);
    }
}
