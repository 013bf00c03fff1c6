// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

mod config;
mod logging;
mod runtime;

use anyhow::{Context, Result, anyhow};
use config::Config;
use csvtui_app::{GridStore, Session, TerminalSize};
use csvtui_store::CsvStore;
use csvtui_store::demo::TableFaker;
use csvtui_tui::{GridRuntime, Keymap, Theme};
use runtime::{DemoRuntime, StoreRuntime};
use std::env;
use std::path::PathBuf;

const DEMO_SEED: u64 = 42;
const DEMO_ROWS: usize = 200;

fn main() {
    if let Err(error) = run() {
        eprintln!("{error:#}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let options = parse_cli_args(env::args().skip(1), Config::default_path()?)?;
    if options.show_help {
        print_help();
        return Ok(());
    }

    if options.print_config_path {
        println!("{}", options.config_path.display());
        return Ok(());
    }

    if options.print_example {
        print!("{}", Config::example_config(&options.config_path));
        return Ok(());
    }

    let config = Config::load(&options.config_path).with_context(|| {
        format!(
            "load config {}; run `csvtui --print-example-config` to generate a template",
            options.config_path.display()
        )
    })?;
    let keymap = config.keymap(&options.config_path)?;
    let theme = config.theme(&options.config_path)?;

    let _log_guard = match logging::init(config.log_level()) {
        Ok(guard) => Some(guard),
        Err(error) => {
            eprintln!("warning: file logging disabled: {error:#}");
            None
        }
    };
    tracing::info!(config = %options.config_path.display(), "config resolved");

    if options.demo {
        let (headers, rows) = TableFaker::new(DEMO_SEED).employees(DEMO_ROWS).into_parts();
        if options.check_only {
            return Ok(());
        }
        return launch(GridStore::load(headers, rows), DemoRuntime::default(), &keymap, &theme);
    }

    let path = options
        .file
        .ok_or_else(|| anyhow!("missing CSV file; usage: csvtui [options] <file.csv>"))?;
    let store = CsvStore::open(&path)?;
    let (headers, rows) = store
        .load()
        .with_context(|| format!("load {}", path.display()))?
        .into_parts();
    if options.check_only {
        return Ok(());
    }

    launch(
        GridStore::load(headers, rows),
        StoreRuntime::new(store),
        &keymap,
        &theme,
    )
}

fn launch<R: GridRuntime>(
    grid: GridStore,
    mut runtime: R,
    keymap: &Keymap,
    theme: &Theme,
) -> Result<()> {
    let mut session = Session::new(grid, TerminalSize::default());
    let result = csvtui_tui::run_app(&mut session, &mut runtime, keymap, theme);
    if let Err(error) = &result {
        tracing::error!(error = %format!("{error:#}"), "session ended with an error");
    }
    result
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct CliOptions {
    file: Option<PathBuf>,
    config_path: PathBuf,
    print_config_path: bool,
    demo: bool,
    print_example: bool,
    check_only: bool,
    show_help: bool,
}

fn parse_cli_args<I, S>(args: I, default_config_path: PathBuf) -> Result<CliOptions>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut options = CliOptions {
        file: None,
        config_path: default_config_path,
        print_config_path: false,
        demo: false,
        print_example: false,
        check_only: false,
        show_help: false,
    };

    let mut iter = args.into_iter();
    while let Some(arg) = iter.next() {
        match arg.as_ref() {
            "--config" => {
                let value = iter
                    .next()
                    .ok_or_else(|| anyhow!("--config requires a file path"))?;
                options.config_path = PathBuf::from(value.as_ref());
            }
            "--print-config-path" => {
                options.print_config_path = true;
            }
            "--print-example-config" => {
                options.print_example = true;
            }
            "--demo" => {
                options.demo = true;
            }
            "--check" => {
                options.check_only = true;
            }
            "--help" | "-h" => {
                options.show_help = true;
            }
            flag if flag.starts_with('-') && flag != "-" => {
                return Err(anyhow!(
                    "unknown argument {flag:?}; run with --help to see supported options"
                ));
            }
            file => {
                if let Some(existing) = &options.file {
                    return Err(anyhow!(
                        "unexpected argument {file:?}; already opening {}",
                        existing.display()
                    ));
                }
                options.file = Some(PathBuf::from(file));
            }
        }
    }

    Ok(options)
}

fn print_help() {
    println!("csvtui [options] <file.csv>");
    println!("  --config <path>          Use a specific config path");
    println!("  --print-config-path      Print resolved config path");
    println!("  --print-example-config   Print a config template");
    println!("  --demo                   Browse a generated table instead of a file");
    println!("  --check                  Validate config and CSV file, then exit");
    println!("  --help                   Show this help");
}

#[cfg(test)]
mod tests {
    use super::{CliOptions, parse_cli_args};
    use anyhow::Result;
    use std::path::PathBuf;

    fn default_options_path() -> PathBuf {
        PathBuf::from("/tmp/csvtui-config.toml")
    }

    #[test]
    fn parse_cli_args_defaults_to_provided_config_path() -> Result<()> {
        let options = parse_cli_args(Vec::<String>::new(), default_options_path())?;
        assert_eq!(
            options,
            CliOptions {
                file: None,
                config_path: default_options_path(),
                print_config_path: false,
                demo: false,
                print_example: false,
                check_only: false,
                show_help: false,
            }
        );
        Ok(())
    }

    #[test]
    fn parse_cli_args_takes_file_and_config_override() -> Result<()> {
        let options = parse_cli_args(
            vec!["data.csv", "--config", "/custom/config.toml"],
            default_options_path(),
        )?;
        assert_eq!(options.file, Some(PathBuf::from("data.csv")));
        assert_eq!(options.config_path, PathBuf::from("/custom/config.toml"));
        Ok(())
    }

    #[test]
    fn parse_cli_args_errors_for_missing_config_value() {
        let error = parse_cli_args(vec!["--config"], default_options_path())
            .expect_err("missing config value should fail");
        assert!(error.to_string().contains("--config requires a file path"));
    }

    #[test]
    fn parse_cli_args_errors_for_unknown_argument() {
        let error = parse_cli_args(vec!["--wat"], default_options_path())
            .expect_err("unknown arg should fail");
        let message = error.to_string();
        assert!(message.contains("unknown argument"));
        assert!(message.contains("--help"));
    }

    #[test]
    fn parse_cli_args_rejects_second_file() {
        let error = parse_cli_args(vec!["a.csv", "b.csv"], default_options_path())
            .expect_err("two files should fail");
        assert!(error.to_string().contains("already opening a.csv"));
    }

    #[test]
    fn parse_cli_args_sets_print_and_check_flags() -> Result<()> {
        let options = parse_cli_args(
            vec!["--print-config-path", "--print-example-config", "--check", "-h"],
            default_options_path(),
        )?;
        assert!(options.print_config_path);
        assert!(options.print_example);
        assert!(options.check_only);
        assert!(options.show_help);
        assert!(!options.demo);
        Ok(())
    }

    #[test]
    fn parse_cli_args_sets_demo() -> Result<()> {
        let options = parse_cli_args(vec!["--demo"], default_options_path())?;
        assert!(options.demo);
        assert_eq!(options.file, None);
        Ok(())
    }
}
