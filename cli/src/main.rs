use std::error::Error;
use std::fs;
use std::io::{self, Read, Write};

use clap::{ArgAction, Parser, ValueEnum};
use serde::Serialize;
use tolerant_json::constants::DEFAULT_INDENT;
use tolerant_json::{
    Diagnostic, Indent, LineIndex, ParseOptions, ParseResult, PrintOptions, TextIndex,
};
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "tjson", version, about = "Error-tolerant JSON checker and formatter")]
struct Args {
    /// Input file paths. Omit or use '-' to read from stdin.
    inputs: Vec<String>,

    /// Output file path (prints to stdout if omitted).
    #[arg(short, long, value_name = "file")]
    output: Option<String>,

    /// Only report diagnostics, do not print the documents.
    #[arg(long)]
    check: bool,

    /// Print the token stream instead of the documents.
    #[arg(long, conflicts_with = "check")]
    tokens: bool,

    /// Diagnostic output format.
    #[arg(long, value_enum, value_name = "format", default_value_t = Format::Human)]
    format: Format,

    /// Indentation size (default: 2).
    #[arg(long, value_name = "number", default_value_t = DEFAULT_INDENT)]
    indent: usize,

    /// Print documents on a single line.
    #[arg(long, conflicts_with = "indent")]
    compact: bool,

    /// Report diagnostics in the order they were found instead of by position.
    #[arg(long = "no-sort", action = ArgAction::SetFalse, default_value_t = true)]
    sort: bool,

    /// Increase log verbosity (-v debug, -vv trace). `RUST_LOG` is honored otherwise.
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum Format {
    Human,
    Json,
}

#[derive(Debug)]
enum InputSource {
    Stdin,
    File(String),
}

impl InputSource {
    fn label(&self) -> &str {
        match self {
            InputSource::Stdin => "<stdin>",
            InputSource::File(path) => path,
        }
    }
}

struct Document {
    source: InputSource,
    text: String,
    result: ParseResult,
}

#[derive(Serialize)]
struct Report<'a> {
    path: &'a str,
    line: usize,
    column: usize,
    message: String,
    #[serde(flatten)]
    diagnostic: &'a Diagnostic,
}

fn main() {
    match run() {
        Ok(true) => {}
        Ok(false) => std::process::exit(1),
        Err(err) => {
            eprintln!("ERROR  {err}");
            std::process::exit(1);
        }
    }
}

/// Returns whether every input parsed without diagnostics.
fn run() -> Result<bool, Box<dyn Error>> {
    let args = Args::parse();
    init_tracing(args.verbose);

    let parse_options = ParseOptions::new().with_sort_diagnostics(args.sort);
    let print_options = print_options(&args);

    let mut documents = Vec::new();
    for input in input_args(&args.inputs) {
        let (text, source) = read_input(input)?;
        let result = tolerant_json::parse_with_options(&text, &parse_options);
        debug!(
            input = source.label(),
            diagnostics = result.diagnostics.len(),
            "checked input"
        );
        documents.push(Document {
            source,
            text,
            result,
        });
    }

    let output_target = OutputTarget::from_arg(args.output.as_deref());
    if !args.check {
        with_output_writer(output_target.path(), |writer| {
            for document in &documents {
                if args.tokens {
                    write_tokens(writer, &document.text)?;
                } else if let (Some(root), true) =
                    (&document.result.root, document.result.is_clean())
                {
                    tolerant_json::to_writer_with_options(&mut *writer, root, &print_options)?;
                }
            }
            Ok(())
        })?;
    }

    let clean = documents.iter().all(|document| document.result.is_clean());
    if !clean {
        report_diagnostics(&documents, args.format)?;
    }
    Ok(clean)
}

fn init_tracing(verbose: u8) {
    let filter = match verbose {
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        1 => EnvFilter::new("tolerant_json=debug,tjson=debug"),
        _ => EnvFilter::new("tolerant_json=trace,tjson=trace"),
    };
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .compact()
        .try_init();
}

fn print_options(args: &Args) -> PrintOptions {
    let indent = if args.compact {
        Indent::Compact
    } else {
        Indent::Spaces(args.indent)
    };
    PrintOptions::new()
        .with_indent(indent)
        .with_trailing_newline(true)
}

fn input_args(inputs: &[String]) -> Vec<Option<&str>> {
    if inputs.is_empty() {
        return vec![None];
    }
    inputs.iter().map(|input| Some(input.as_str())).collect()
}

fn read_input(input: Option<&str>) -> Result<(String, InputSource), Box<dyn Error>> {
    match input {
        None | Some("-") => {
            let mut buf = String::new();
            io::stdin().read_to_string(&mut buf)?;
            Ok((buf, InputSource::Stdin))
        }
        Some(path) => {
            let buf = fs::read_to_string(path).map_err(|err| format!("{path}: {err}"))?;
            Ok((buf, InputSource::File(path.to_string())))
        }
    }
}

fn write_tokens(writer: &mut dyn Write, text: &str) -> Result<(), Box<dyn Error>> {
    let index = TextIndex::build(text);
    for token in &index {
        writeln!(writer, "{token} {:?}", token.text(text))?;
    }
    Ok(())
}

fn report_diagnostics(documents: &[Document], format: Format) -> Result<(), Box<dyn Error>> {
    let stderr = io::stderr();
    let mut handle = stderr.lock();
    let mut reports = Vec::new();

    for document in documents {
        let lines = LineIndex::new(&document.text);
        let path = document.source.label();
        for diagnostic in &document.result.diagnostics {
            let location = lines.location(diagnostic.span.start);
            match format {
                Format::Human => writeln!(
                    handle,
                    "{path}:{}:{}: {}: {}",
                    location.line,
                    location.column,
                    diagnostic.code,
                    diagnostic.message()
                )?,
                Format::Json => reports.push(Report {
                    path,
                    line: location.line,
                    column: location.column,
                    message: diagnostic.message(),
                    diagnostic,
                }),
            }
        }
    }

    if format == Format::Json {
        serde_json::to_writer_pretty(&mut handle, &reports)?;
        writeln!(handle)?;
    }
    Ok(())
}

#[derive(Clone, Debug)]
enum OutputTarget {
    Stdout,
    File(String),
}

impl OutputTarget {
    fn from_arg(output: Option<&str>) -> Self {
        match output {
            Some(path) if path != "-" => OutputTarget::File(path.to_string()),
            _ => OutputTarget::Stdout,
        }
    }

    fn path(&self) -> Option<&str> {
        match self {
            OutputTarget::Stdout => None,
            OutputTarget::File(path) => Some(path.as_str()),
        }
    }
}

fn with_output_writer<F>(path: Option<&str>, f: F) -> Result<(), Box<dyn Error>>
where
    F: FnOnce(&mut dyn Write) -> Result<(), Box<dyn Error>>,
{
    match path {
        Some(path) => {
            let mut file = fs::File::create(path)?;
            f(&mut file)
        }
        None => {
            let stdout = io::stdout();
            let mut handle = stdout.lock();
            f(&mut handle)
        }
    }
}
