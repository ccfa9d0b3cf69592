use anyhow::Context;
use clap::Parser;
use log::info;
use rstruth::parser_io::SymbolicParseTree;
use rstruth::truth_table_io::{render_result, TruthTableWriter};
use rstruth::{
    Binding, ParsedFormula, TruthTable, TruthTableEntry, TruthTableOptions, DEFAULT_MAX_VARS,
};
use simplelog::{ColorChoice, Config, LevelFilter, TermLogger, TerminalMode};
use std::fs::File;
use std::io::{self, BufReader, BufWriter, Write};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[clap(author, version, about = "Evaluates propositional formulas and prints their truth tables", long_about = None)]
struct Args {
    #[clap(value_parser, value_name = "EXPRESSION")]
    /// The expression to evaluate (read from --input or stdin if not provided)
    expression: Option<String>,

    #[clap(value_parser, short, long, conflicts_with = "expression")]
    /// Read the expression from a file
    input: Option<PathBuf>,

    #[clap(value_parser, short, long)]
    /// The output filename (or stdout if not provided)
    output: Option<PathBuf>,

    #[clap(value_parser, short, long, value_name = "BINDINGS")]
    /// Evaluate the expression once for the given assignment, e.g. "a=1, b=false"
    eval: Option<Binding>,

    #[clap(value_parser, short, long, value_name = "VALUE")]
    /// Only print rows for which the expression evaluates to VALUE
    filter: Option<TruthTableEntry>,

    #[clap(long)]
    /// Print T and F instead of True and False
    compact: bool,

    #[clap(long)]
    /// Output the truth table as csv
    csv: bool,

    #[clap(long, value_parser, value_name = "FILE")]
    /// Write the parse tree in dot (GraphViz) format to FILE
    dot: Option<PathBuf>,

    #[clap(long)]
    /// Evaluate the rows of the truth table in parallel
    parallel: bool,

    #[clap(long, value_parser, env = "RSTRUTH_MAX_VARS", default_value_t = DEFAULT_MAX_VARS)]
    /// Reject expressions with more variables than this
    max_vars: usize,

    #[clap(short, long, action = clap::ArgAction::Count)]
    /// Increase logging verbosity (may be repeated)
    verbose: u8,

    #[clap(short, long, conflicts_with = "verbose")]
    /// Only log errors
    quiet: bool,
}

fn main() -> anyhow::Result<()> {
    let args = argfile::expand_args_from(
        wild::args_os(),
        argfile::parse_fromfile,
        argfile::PREFIX,
    )?;
    let args = Args::parse_from(args);

    init_logger(&args)?;

    let formula = read_formula(&args)?;
    info!("variables: {:?}", formula.vars);

    if let Some(dot_file) = &args.dot {
        let mut f = File::create(dot_file)
            .with_context(|| format!("could not create {}", dot_file.display()))?;
        SymbolicParseTree::new(&formula.tree).render_dot(&mut f)?;
    }

    let mut writer = if let Some(output_file) = &args.output {
        let file = File::create(output_file)?;
        Box::new(BufWriter::new(file)) as Box<dyn Write>
    } else {
        Box::new(BufWriter::new(io::stdout())) as Box<dyn Write>
    };

    if let Some(bindings) = &args.eval {
        let result = formula.eval(bindings)?;
        writeln!(writer, "{}", render_result(result, args.compact))?;
        return Ok(writer.flush()?);
    }

    let options = TruthTableOptions {
        max_vars: args.max_vars,
        parallel: args.parallel,
    };
    let table = TruthTable::from_formula(&formula, &options)?;

    let table_writer = TruthTableWriter::new(&table)
        .filter(args.filter.as_ref().and_then(TruthTableEntry::as_bool))
        .compact(args.compact);

    if args.csv {
        table_writer.render_csv(&mut writer)?;
    } else {
        table_writer.render_text(&mut writer)?;
    }

    Ok(writer.flush()?)
}

fn init_logger(args: &Args) -> anyhow::Result<()> {
    let level = if args.quiet {
        LevelFilter::Error
    } else {
        match args.verbose {
            0 => LevelFilter::Warn,
            1 => LevelFilter::Info,
            2 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        }
    };

    TermLogger::init(
        level,
        Config::default(),
        TerminalMode::Stderr,
        ColorChoice::Auto,
    )?;

    Ok(())
}

fn read_formula(args: &Args) -> anyhow::Result<ParsedFormula> {
    if let Some(expression) = &args.expression {
        Ok(ParsedFormula::parse(expression)?)
    } else if let Some(input_file) = &args.input {
        let file = File::open(input_file)
            .with_context(|| format!("could not open {}", input_file.display()))?;
        Ok(ParsedFormula::new(&mut BufReader::new(file))?)
    } else {
        Ok(ParsedFormula::new(&mut io::stdin().lock())?)
    }
}
