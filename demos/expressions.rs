//! Evaluates an arithmetic expression, logging every grammar rule as it runs.
//!
//! ```text
//! cargo run --example expressions -- "1 + 2 * (3 - 4)"
//! RUST_LOG=chainparse=trace cargo run --example expressions
//! ```

use std::{env, rc::Rc};

use chainparse::{
    contrib::expression::Grammar,
    prelude::*,
    LOG_TARGET,
};
use env_logger::Env;
use log::debug;

const DEFAULT_INPUT: &str = "    (1*7 + 1 + (2*3+\t4/2))  ";

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(Env::default().default_filter_or("chainparse=debug")).init();

    let text = env::args().nth(1).unwrap_or_else(|| DEFAULT_INPUT.to_string());
    let input = chars::input(&text);

    let filter = TraceFilter::new().include_module("expression")?;
    let ctx: Context<char> = Context::new()
        .with_tracer(Rc::new(LogTracer::with_filter(filter)))
        .with_tracing();
    let grammar = Grammar::new();

    let (rest, expr) = grammar.expression(&ctx, Cursor::new(&input))?;
    match expr.evaluate() {
        Some(value) => println!("Expression {expr} = {value}"),
        None => println!("Expression {expr} has no value"),
    }
    if !rest.at_end() {
        println!("Remaining: {:?}", rest.remaining().iter().collect::<String>());
    }

    for (rule, stats) in grammar.memo_stats() {
        debug!(target: LOG_TARGET, "{rule:<30} hits {:>4} misses {:>4}", stats.hits, stats.misses);
    }
    Ok(())
}
