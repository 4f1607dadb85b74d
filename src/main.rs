use std::path::PathBuf;
use std::process::ExitCode;

use partpick::{options::Options, Viewer};

const USAGE: &str = "usage: partpick [PARTS_JSON] [--options FILE]";
const DEFAULT_PARTS: &str = "assets/parts/assembly.json";

struct Args {
    parts: PathBuf,
    options: Option<PathBuf>,
}

fn parse_args(mut args: impl Iterator<Item = String>) -> Result<Args, String> {
    let mut parts = None;
    let mut options = None;
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--options" => {
                let path = args.next().ok_or("--options needs a file")?;
                options = Some(PathBuf::from(path));
            }
            "-h" | "--help" => return Err(USAGE.into()),
            flag if flag.starts_with('-') => {
                return Err(format!("unknown flag {flag}\n{USAGE}"));
            }
            path if parts.is_none() => parts = Some(PathBuf::from(path)),
            extra => return Err(format!("unexpected argument {extra}\n{USAGE}")),
        }
    }
    Ok(Args {
        parts: parts.unwrap_or_else(|| PathBuf::from(DEFAULT_PARTS)),
        options,
    })
}

fn main() -> ExitCode {
    env_logger::init();

    let args = match parse_args(std::env::args().skip(1)) {
        Ok(args) => args,
        Err(msg) => {
            log::error!("{msg}");
            return ExitCode::FAILURE;
        }
    };

    let options = match &args.options {
        Some(path) => match Options::load(path) {
            Ok(options) => options,
            Err(e) => {
                log::error!("{e}");
                return ExitCode::FAILURE;
            }
        },
        None => Options::default(),
    };

    let result = Viewer::builder()
        .with_parts_path(args.parts)
        .with_options(options)
        .build()
        .run();
    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{e}");
            ExitCode::FAILURE
        }
    }
}
