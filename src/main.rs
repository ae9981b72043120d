use std::fs;

use clap::Parser;
use formula::Formula;

/// formula compiles infix formulas into postfix programs and evaluates them
/// on a small stack machine.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Tells formula to look at a file instead of an inline expression.
    #[arg(short, long)]
    file: bool,

    /// Prints the compiled postfix program instead of evaluating it.
    #[arg(short, long)]
    postfix: bool,

    /// Binds a variable before evaluation, e.g. `--set x=0.5`. May be
    /// repeated.
    #[arg(short, long, value_name = "NAME=VALUE")]
    set: Vec<String>,

    contents: String,
}

fn main() {
    let args = Args::parse();

    let expression = if args.file {
        fs::read_to_string(&args.contents).unwrap_or_else(|_| {
            eprintln!("Failed to read the input file '{}'. Perhaps this file does not exist?",
                      &args.contents);
            std::process::exit(1);
        })
    } else {
        args.contents
    };

    let mut formula = match Formula::new(expression.trim()) {
        Ok(formula) => formula,
        Err(e) => {
            eprintln!("{e}");
            std::process::exit(1);
        },
    };

    if args.postfix {
        println!("{}", formula.program());
        return;
    }

    for binding in &args.set {
        match parse_binding(binding) {
            Some((name, value)) => formula.set_variable(&name, value),
            None => {
                eprintln!("Invalid variable binding '{binding}'. Expected NAME=VALUE, e.g. x=0.5.");
                std::process::exit(1);
            },
        }
    }

    match formula.evaluate() {
        Ok(value) => println!("{value}"),
        Err(e) => eprintln!("{e}"),
    }
}

/// Splits a `NAME=VALUE` binding into its parts.
fn parse_binding(binding: &str) -> Option<(String, f64)> {
    let (name, value) = binding.split_once('=')?;
    let value = value.trim().parse().ok()?;
    Some((name.trim().to_string(), value))
}
