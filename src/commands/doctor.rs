use colored::Colorize;
use serde_json::{Value, json};

use crate::build_info;
use crate::config::Config;
use crate::error::Result;
use crate::output::{self, Format};
use crate::store::TaskStore;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Level {
    Ok,
    Error,
}

#[derive(Debug)]
struct Check {
    category: &'static str,
    level: Level,
    label: &'static str,
    message: String,
}

impl Check {
    fn ok(category: &'static str, label: &'static str, msg: impl Into<String>) -> Self {
        Self {
            category,
            level: Level::Ok,
            label,
            message: msg.into(),
        }
    }

    fn error(category: &'static str, label: &'static str, msg: impl Into<String>) -> Self {
        Self {
            category,
            level: Level::Error,
            label,
            message: msg.into(),
        }
    }

    fn prefix(&self) -> String {
        match self.level {
            Level::Ok => " ok ".green().to_string(),
            Level::Error => " ERR".red().bold().to_string(),
        }
    }

    fn to_json(&self) -> Value {
        json!({
            "category": self.category,
            "level": match self.level {
                Level::Ok => "ok",
                Level::Error => "error",
            },
            "label": self.label,
            "message": self.message,
        })
    }
}

fn storage_checks(config: &Config) -> Vec<Check> {
    let mut checks = vec![Check::ok(
        "Storage",
        "db path",
        config.db_path.display().to_string(),
    )];
    match TaskStore::open(&config.db_path).and_then(|store| store.count()) {
        Ok(count) => checks.push(Check::ok(
            "Storage",
            "db",
            format!("reachable ({count} tasks)"),
        )),
        Err(err) => checks.push(Check::error("Storage", "db", format!("Err: {err}"))),
    }
    checks.push(Check::ok(
        "Storage",
        "log file",
        config.log_path.display().to_string(),
    ));
    checks
}

fn environment_checks() -> Vec<Check> {
    let binary = match std::env::current_exe() {
        Ok(path) => Check::ok("Environment", "binary path", path.display().to_string()),
        Err(_) => Check::error("Environment", "binary path", "<unknown>"),
    };
    vec![
        Check::ok("Environment", "os", std::env::consts::OS),
        binary,
        Check::ok("Environment", "version", build_info::version_string()),
    ]
}

/// Print diagnostics. Never fails because of the database; a broken database
/// shows up as an `ERR` line.
pub fn run(config: &Config, format: Format) -> Result<()> {
    let mut checks = storage_checks(config);
    checks.extend(environment_checks());

    let passed = checks.iter().filter(|c| c.level == Level::Ok).count();
    let errors = checks.len() - passed;

    match format {
        Format::Json => {
            let arr: Vec<Value> = checks.iter().map(Check::to_json).collect();
            let report = json!({
                "checks": arr,
                "summary": {
                    "passed": passed,
                    "errors": errors,
                }
            });
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        Format::Text => {
            output::print_banner();
            let mut current_cat = "";
            for check in &checks {
                if check.category != current_cat {
                    if !current_cat.is_empty() {
                        println!();
                    }
                    println!("{}", check.category.bold());
                    current_cat = check.category;
                }
                println!("  {}  {:<12} {}", check.prefix(), check.label, check.message);
            }
            println!();
            println!(
                "{} passed, {} errors",
                passed.to_string().green(),
                if errors > 0 {
                    errors.to_string().red().bold().to_string()
                } else {
                    errors.to_string()
                },
            );
        }
    }
    Ok(())
}
