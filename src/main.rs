use std::process::ExitCode;

use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use breadcrumb::functions::{ApplyToAll, RegexFind};
use breadcrumb::{Circuit, Designator, Result, Settings, Tracer, Value};

// Where does the run of "b"s found in the second word come from?
fn run(settings: &Settings) -> Result<()> {
    let mut circuit = Circuit::new();
    let find = circuit.add(Box::new(ApplyToAll::new(Box::new(RegexFind::new("b+")?))?));
    circuit.feed(find, 0, Value::from(vec!["abba", "bob", "cab"]))?;
    let matches = circuit.evaluate(find)?;
    info!(matches = %matches[0], "found");

    let tracer = Tracer::from_settings(settings);
    let designator: Designator = "out0/#1".parse()?;
    let tree = tracer.get_tree(&circuit, settings.query, designator, find)?;
    let json = serde_json::to_string_pretty(&tree)?;
    println!("{json}");
    Ok(())
}

fn main() -> ExitCode {
    let settings = match Settings::load("breadcrumb") {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("{e}");
            return ExitCode::FAILURE;
        }
    };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(settings.log_filter.clone()));
    tracing_subscriber::fmt().with_env_filter(filter).init();
    match run(&settings) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, "trace failed");
            ExitCode::FAILURE
        }
    }
}
