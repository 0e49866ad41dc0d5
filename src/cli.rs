use clap::{Parser, ValueEnum};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "cov-preview-filter")]
#[command(about = "Extracts new defects from a Coverity commit preview JSON report")]
#[command(version)]
pub struct Cli {
    /// Path to the commit preview report (plain or zstd-compressed JSON)
    #[arg(help = "Input json file")]
    pub input: PathBuf,

    /// File to write new CIDs to, one per line
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Format of the console notices
    #[arg(long, value_enum, default_value_t = LogFormat::Text)]
    pub log_format: LogFormat,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn input_is_required() {
        assert!(Cli::try_parse_from(["cov-preview-filter"]).is_err());
    }

    #[test]
    fn output_accepts_short_and_long_flags() {
        let cli = Cli::try_parse_from(["cov-preview-filter", "in.json", "-o", "new.txt"]).unwrap();
        assert_eq!(cli.input, PathBuf::from("in.json"));
        assert_eq!(cli.output, Some(PathBuf::from("new.txt")));

        let cli =
            Cli::try_parse_from(["cov-preview-filter", "in.json", "--output", "new.txt"]).unwrap();
        assert_eq!(cli.output, Some(PathBuf::from("new.txt")));
    }

    #[test]
    fn defaults() {
        let cli = Cli::try_parse_from(["cov-preview-filter", "in.json"]).unwrap();
        assert_eq!(cli.output, None);
        assert_eq!(cli.log_format, LogFormat::Text);
    }

    #[test]
    fn json_log_format() {
        let cli =
            Cli::try_parse_from(["cov-preview-filter", "in.json", "--log-format", "json"]).unwrap();
        assert_eq!(cli.log_format, LogFormat::Json);
    }
}
