use std::{env, path::PathBuf, process};

use billing_calendar::{
    calendar::{self, YearMonth},
    config::{Config, ConfigManager},
    expense::{self, record, RecurrenceRule},
    init_with_filter,
    request::CalendarQuery,
    time::SystemClock,
    utils::persistence,
    CalendarError, Expense,
};

fn main() {
    let config = match ConfigManager::new().and_then(|manager| manager.load()) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("Error: {err}");
            process::exit(1);
        }
    };
    init_with_filter(config.log_filter.as_deref());

    if let Err(err) = run(config) {
        eprintln!("Error: {err}");
        process::exit(1);
    }
}

struct Invocation {
    command: String,
    positional: Vec<String>,
    file: Option<PathBuf>,
}

fn parse_args() -> Invocation {
    let mut args = env::args().skip(1);
    let command = args.next().unwrap_or_else(|| {
        print_usage();
        process::exit(1);
    });
    let mut positional = Vec::new();
    let mut file = None;
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--file" | "-f" => {
                let path = args.next().unwrap_or_else(|| {
                    print_usage();
                    process::exit(1);
                });
                file = Some(PathBuf::from(path));
            }
            _ => positional.push(arg),
        }
    }
    Invocation {
        command,
        positional,
        file,
    }
}

fn run(config: Config) -> Result<(), Box<dyn std::error::Error>> {
    let invocation = parse_args();

    match invocation.command.as_str() {
        "month" => {
            let query = match invocation.positional.first() {
                Some(raw) => CalendarQuery::parse(raw)?,
                None => CalendarQuery::default(),
            };
            let target = query.resolve(&SystemClock)?;
            let expenses = load_active(&config, invocation.file)?;
            let grid = calendar::compute_month_occurrences(target, &expenses);
            println!("{}", serde_json::to_string_pretty(&grid)?);
        }
        "day" => {
            let raw = invocation.positional.first().unwrap_or_else(|| {
                print_usage();
                process::exit(1);
            });
            let date = record::parse_date(raw)?;
            let expenses = load_active(&config, invocation.file)?;
            let grid = calendar::compute_month_occurrences(YearMonth::of(date), &expenses);
            let occurrences = grid.get(date).unwrap_or_default();
            println!("{}", serde_json::to_string_pretty(occurrences)?);
        }
        "range" => {
            let (from, to) = match invocation.positional.as_slice() {
                [from, to, ..] => (record::parse_date(from)?, record::parse_date(to)?),
                _ => {
                    print_usage();
                    process::exit(1);
                }
            };
            let expenses = load_active(&config, invocation.file)?;
            let occurrences = calendar::occurrences_between(from, to, &expenses);
            println!("{}", serde_json::to_string_pretty(&occurrences)?);
        }
        "rules" => {
            for rule in RecurrenceRule::KNOWN.iter() {
                println!("{:<14} {}", rule.tag(), rule.label(0));
            }
        }
        "config" => {
            println!("{}", serde_json::to_string_pretty(&config)?);
        }
        _ => {
            print_usage();
            process::exit(1);
        }
    }

    Ok(())
}

fn load_active(config: &Config, file: Option<PathBuf>) -> Result<Vec<Expense>, CalendarError> {
    let path = file.or_else(|| config.expenses_file.clone()).ok_or_else(|| {
        CalendarError::InvalidArgument(
            "no expenses file given; pass --file or set `expenses_file` in the config".into(),
        )
    })?;
    let expenses = persistence::load_expenses_from_file(&path, &config.default_currency)?;
    Ok(expense::active_only(&expenses))
}

fn print_usage() {
    eprintln!(
        "Usage:\n  billing_calendar_cli month [YYYY-MM] [--file <expenses.json>]\n  billing_calendar_cli day <YYYY-MM-DD> [--file <expenses.json>]\n  billing_calendar_cli range <YYYY-MM-DD> <YYYY-MM-DD> [--file <expenses.json>]\n  billing_calendar_cli rules\n  billing_calendar_cli config"
    );
}
