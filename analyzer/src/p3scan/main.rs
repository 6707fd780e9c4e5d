use std::collections::BTreeMap;
use std::error::Error;
use std::fmt::{self, Display, Formatter};
use std::io::{self, Write};
use std::path::PathBuf;

use clap::ArgAction::{Set, SetTrue};
use clap::Parser;
use serde::Serialize;
use tracing::{event, span, Level};
use tracing_subscriber::prelude::*;

use analyzer::*;

/// A (zero-based) line and column in the input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Position {
    line: usize,
    column: usize,
}

fn parse_position(s: &str) -> Result<Position, String> {
    let Some((line, column)) = s.split_once(':') else {
        return Err(format!("'{s}' should have the form LINE:COLUMN"));
    };
    let number = |what: &str, text: &str| -> Result<usize, String> {
        text.trim()
            .parse()
            .map_err(|e| format!("{what} '{text}' is not valid: {e}"))
    };
    Ok(Position {
        line: number("line", line)?,
        column: number("column", column)?,
    })
}

/// Classifies the lines of a P3 assembly source file
#[derive(Parser, Debug)]
#[clap(version, about, long_about = None)]
struct Cli {
    /// File from which assembly source is read.
    #[clap(action = Set)]
    input: PathBuf,

    /// Directory containing instructions.csv and registers.csv.
    #[clap(action = Set, long)]
    docs: Option<PathBuf>,

    /// Write results as JSON.
    #[clap(action = SetTrue, long)]
    json: bool,

    /// List the labels and variables of the input.
    #[clap(action = SetTrue, long)]
    symbols: bool,

    /// Show the hover text for LINE:COLUMN.
    #[clap(action = Set, long, value_name = "LINE:COLUMN", value_parser = parse_position)]
    hover: Option<Position>,

    /// Show where the name at LINE:COLUMN is defined.
    #[clap(action = Set, long, value_name = "LINE:COLUMN", value_parser = parse_position)]
    definition: Option<Position>,
}

#[derive(Debug)]
enum Fail {
    ReadInput(PathBuf, io::Error),
    Knowledge(KnowledgeBaseError),
    Output(io::Error),
    Json(serde_json::Error),
    /// We were not able to correctly initialise the program.
    InitialisationFailure(String),
}

impl Display for Fail {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), fmt::Error> {
        match self {
            Fail::ReadInput(path, e) => write!(f, "failed to read {}: {e}", path.display()),
            Fail::Knowledge(e) => e.fmt(f),
            Fail::Output(e) => write!(f, "failed to write output: {e}"),
            Fail::Json(e) => write!(f, "failed to generate JSON: {e}"),
            Fail::InitialisationFailure(msg) => f.write_str(msg.as_str()),
        }
    }
}

impl Error for Fail {}

impl From<io::Error> for Fail {
    fn from(e: io::Error) -> Fail {
        Fail::Output(e)
    }
}

impl From<serde_json::Error> for Fail {
    fn from(e: serde_json::Error) -> Fail {
        Fail::Json(e)
    }
}

/// The JSON form of a whole index.
#[derive(Serialize)]
struct Report<'a> {
    lines: &'a [Line],
    labels: BTreeMap<&'a str, usize>,
    variables: BTreeMap<&'a str, usize>,
}

impl<'a> Report<'a> {
    fn new(index: &'a DocumentIndex) -> Report<'a> {
        Report {
            lines: index.lines(),
            labels: index
                .labels()
                .map(|(name, line)| (name, line.line_number()))
                .collect(),
            variables: index
                .variables()
                .map(|(name, line)| (name, line.line_number()))
                .collect(),
        }
    }
}

fn write_json<W: Write, T: Serialize + ?Sized>(out: &mut W, item: &T) -> Result<(), Fail> {
    serde_json::to_writer_pretty(&mut *out, item)?;
    writeln!(out)?;
    Ok(())
}

fn write_listing<W: Write>(out: &mut W, index: &DocumentIndex) -> Result<(), Fail> {
    for line in index.lines() {
        write!(out, "{:5} {:<11}", line.line_number(), format!("{:?}", line.line_type()))?;
        let fields = [
            ("label", line.label(), line.label_span()),
            ("instruction", line.instruction(), line.instruction_span()),
            ("data", line.data(), line.data_span()),
            ("variable", line.variable(), line.variable_span()),
            ("operator", line.operator(), line.operator_span()),
            ("value", line.value(), line.value_span()),
            ("comment", line.comment(), line.comment_span()),
        ];
        for (name, text, span) in fields {
            if !text.is_empty() {
                write!(out, " {name}[{span}]={text:?}")?;
            }
        }
        writeln!(out)?;
    }
    Ok(())
}

fn run(cli: &Cli, out: &mut impl Write) -> Result<(), Fail> {
    let source =
        std::fs::read_to_string(&cli.input).map_err(|e| Fail::ReadInput(cli.input.clone(), e))?;
    let index = DocumentIndex::from_text(&source, None);
    event!(
        Level::INFO,
        "indexed {} lines with {} labels and {} variables",
        index.len(),
        index.labels().count(),
        index.variables().count()
    );

    let kb = match &cli.docs {
        Some(dir) => KnowledgeBase::load(dir).map_err(Fail::Knowledge)?,
        None => KnowledgeBase::default(),
    };

    let mut queried = false;
    if cli.symbols {
        queried = true;
        let symbols = document_symbols(&index);
        if cli.json {
            write_json(out, &symbols)?;
        } else {
            for sym in &symbols {
                writeln!(
                    out,
                    "{:5} {:<9} {} [{}]",
                    sym.line_number,
                    format!("{:?}", sym.kind),
                    sym.name,
                    sym.selection
                )?;
            }
        }
    }
    if let Some(pos) = cli.hover {
        queried = true;
        let found = index.line(pos.line).and_then(|line| hover(line, pos.column, &kb));
        if cli.json {
            write_json(out, &found)?;
        } else if let Some(h) = found {
            for paragraph in &h.contents {
                writeln!(out, "{paragraph}")?;
            }
        } else {
            event!(Level::INFO, "nothing to show at {}:{}", pos.line, pos.column);
        }
    }
    if let Some(pos) = cli.definition {
        queried = true;
        let found = find_definition(&index, pos.line, pos.column);
        if cli.json {
            write_json(out, &found)?;
        } else if let Some(loc) = found {
            writeln!(out, "{}:{}", loc.line_number, loc.span)?;
        } else {
            event!(Level::INFO, "no definition found for {}:{}", pos.line, pos.column);
        }
    }

    if !queried {
        if cli.json {
            write_json(out, &Report::new(&index))?;
        } else {
            write_listing(out, &index)?;
        }
    }
    out.flush()?;
    Ok(())
}

fn run_scanner() -> Result<(), Fail> {
    let cli = Cli::parse();

    // Select which trace messages get printed with RUST_LOG; see
    // https://docs.rs/tracing-subscriber/0.3/tracing_subscriber/filter/struct.EnvFilter.html
    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_target(true)
        .with_writer(io::stderr);
    let filter_layer = match tracing_subscriber::EnvFilter::try_from_default_env()
        .or_else(|_| tracing_subscriber::EnvFilter::try_new("info"))
    {
        Err(e) => {
            return Err(Fail::InitialisationFailure(format!(
                "failed to initialise tracing filter (perhaps there is a problem with environment variables): {e}"
            )));
        }
        Ok(layer) => layer,
    };

    tracing_subscriber::registry()
        .with(filter_layer)
        .with(fmt_layer)
        .init();

    let span = span!(Level::ERROR, "scan", input=?cli.input, docs=?cli.docs);
    let _enter = span.enter();
    let stdout = io::stdout();
    let result = run(&cli, &mut stdout.lock());
    if let Err(e) = &result {
        event!(Level::ERROR, "scan failed: {:?}", e);
    }
    result
}

fn main() {
    match run_scanner() {
        Err(e) => {
            eprintln!("{e}");
            std::process::exit(1);
        }
        Ok(()) => {
            std::process::exit(0);
        }
    }
}

#[test]
fn test_parse_position() {
    assert_eq!(
        parse_position("3:14"),
        Ok(Position {
            line: 3,
            column: 14
        })
    );
    assert!(parse_position("3").is_err());
    assert!(parse_position("x:1").is_err());
    assert!(parse_position("1:-1").is_err());
}

#[test]
fn test_listing() {
    let index = DocumentIndex::from_text("Top: INC R1 ; up\n", None);
    let mut out: Vec<u8> = Vec::new();
    write_listing(&mut out, &index).expect("writing to a Vec succeeds");
    assert_eq!(
        String::from_utf8(out).expect("listing is UTF-8"),
        "    0 Label       label[0..3]=\"Top\" instruction[5..8]=\"INC\" \
         data[9..11]=\"R1\" comment[12..16]=\"; up\"\n"
    );
}
