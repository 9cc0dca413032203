mod args;

use args::Args;
use clap::Parser;
use log::{info, warn};
use params::declaration::total_values;
use params::{ArrayRenderer, LogParser, MissingValues};
use simplelog::{Config, WriteLogger};
use std::error::Error;
use std::fs::File;
use std::io::{self, BufReader, BufWriter, Write};

fn main() -> Result<(), Box<dyn Error>> {
    let args = init()?;

    info!("Reading {} up to iteration {}", args.log.display(), args.max_iteration);
    let reader = BufReader::new(File::open(&args.log)?);
    let outcome = LogParser::new(args.max_iteration).parse_reader(reader)?;

    match outcome.last_iteration {
        Some(iteration) => info!(
            "Read {} lines, {} parameters as of iteration {}",
            outcome.lines_read,
            outcome.vector.len(),
            iteration
        ),
        None => info!(
            "Read {} lines, {} parameters",
            outcome.lines_read,
            outcome.vector.len()
        ),
    }

    let mut out: Box<dyn Write> = match &args.output {
        Some(path) => Box::new(BufWriter::new(File::create(path)?)),
        None => Box::new(io::stdout().lock()),
    };

    writeln!(out, "{}", outcome.vector)?;

    if args.to_c {
        let missing = if args.zero_fill {
            MissingValues::ZeroFill
        } else {
            MissingValues::Fail
        };

        let declarations = args.declarations();
        match total_values(&declarations) {
            Some(total) => info!(
                "Rendering {} arrays ({} values)",
                declarations.len(),
                total
            ),
            None => warn!("Declared arrays hold more values than can be addressed"),
        }

        let mut renderer = ArrayRenderer::new(&outcome.vector).with_missing_values(missing);
        write!(out, "{}", renderer.render(&declarations)?)?;

        if renderer.remaining() > 0 {
            warn!(
                "{} parameter(s) not covered by any array",
                renderer.remaining()
            );
        }
    }

    out.flush()?;

    Ok(())
}

fn init() -> Result<Args, Box<dyn Error>> {
    let args = Args::parse();

    // stdout carries the parameters, so logs never go there
    match &args.log_file {
        Some(log_file) => {
            WriteLogger::init(args.log_level, Config::default(), File::create(log_file)?)?
        }
        None => WriteLogger::init(args.log_level, Config::default(), io::stderr())?,
    }

    Ok(args)
}
