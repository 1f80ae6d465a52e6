//! Command-line options for the `plotview` binary.

use std::path::PathBuf;

/// Parsed command-line options.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CliOptions {
    /// Config file to load instead of the app directory default.
    pub config: Option<PathBuf>,
    /// Snapshot file that overrides the configured one.
    pub snapshot: Option<PathBuf>,
    /// Render a single snapshot and exit.
    pub once: bool,
}

/// Parse arguments (without the program name).
///
/// Returns `Ok(None)` when help was printed.
pub fn parse_args(args: Vec<String>) -> Result<Option<CliOptions>, String> {
    let mut options = CliOptions::default();
    let mut idx = 0usize;
    while idx < args.len() {
        let flag = args[idx].as_str();
        match flag {
            "-h" | "--help" => {
                println!("{}", help_text());
                return Ok(None);
            }
            "--once" => options.once = true,
            "--config" => options.config = Some(PathBuf::from(value_after(&args, &mut idx, flag)?)),
            "--snapshot" => {
                options.snapshot = Some(PathBuf::from(value_after(&args, &mut idx, flag)?));
            }
            _ => return Err(format!("Unknown argument: {flag}\n\n{}", help_text())),
        }
        idx += 1;
    }
    Ok(Some(options))
}

fn value_after<'a>(args: &'a [String], idx: &mut usize, flag: &str) -> Result<&'a str, String> {
    *idx += 1;
    let value = args.get(*idx).ok_or_else(|| format!("{flag} requires a value"))?;
    Ok(value)
}

fn help_text() -> &'static str {
    "Usage: plotview [options]\n\n\
Options:\n\
  --config <path>      Config file (default: config.toml in the .plotview folder)\n\
  --snapshot <path>    Manager snapshot JSON (default: from config, then snapshot.json)\n\
  --once               Render one snapshot and exit\n\
  -h, --help           Show this help\n"
}
