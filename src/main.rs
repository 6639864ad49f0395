use ini_parser::IniData;
use ini_parser::IniFile;

use log::debug;
use std::env;
use std::path::PathBuf;
use std::process;

const INI_PARSER_VERSION: &str = env!("CARGO_PKG_VERSION");

#[derive(Debug, Default, PartialEq)]
struct Config {
    input_paths: Vec<PathBuf>,
    verbose: bool,
    version: bool,
}

fn help() {
    println!(
        "Usage:
ini-parser --version
ini-parser [-v|--verbose] FILE..."
    );
}

fn parse_args(args: Vec<String>) -> Result<Config, String> {
    let mut cfg = Config::default();

    for arg in args.into_iter().skip(1) {
        match &arg[..] {
            "--verbose" | "-v" => cfg.verbose = true,
            "--version" => cfg.version = true,
            _ if arg.starts_with('-') => return Err(format!("Unknown argument: {arg}")),
            _ => cfg.input_paths.push(arg.into()),
        }
    }

    if !cfg.version && cfg.input_paths.is_empty() {
        return Err("Missing input file argument".into());
    }

    Ok(cfg)
}

fn main() {
    let args: Vec<String> = env::args().collect();

    let cfg = match parse_args(args) {
        Ok(cfg) => cfg,
        Err(msg) => {
            eprintln!("Error: {}", msg);
            help();
            process::exit(1)
        }
    };

    let _ = simplelog::SimpleLogger::init(
        if cfg.verbose {
            log::LevelFilter::Trace
        } else {
            log::LevelFilter::Info
        },
        simplelog::Config::default(),
    );

    if cfg.version {
        println!("ini-parser {}", INI_PARSER_VERSION);
        process::exit(0);
    }

    let mut data = IniData::new();
    for path in &cfg.input_paths {
        debug!("Loading {path:?}");

        match IniFile::load_from_path(path) {
            Ok(ini_file) => data.merge_from(&ini_file),
            Err(e) => {
                eprintln!("Error: {e}");
                process::exit(1)
            }
        }
    }

    print!("{data}");
}
