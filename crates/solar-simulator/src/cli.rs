use std::path::PathBuf;

use clap::Parser;

/// Desktop simulator for the solar e-paper dashboard.
///
/// Keys: 1=Realtime  2=Today  3=Period  4=Refresh+Timeline  Q=Quit
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct CliOptions {
    /// Render every screen to PNG in this directory and exit.
    #[arg(long, value_name = "DIR")]
    pub export: Option<PathBuf>,

    /// Recorded chart-data dump to serve instead of the mock portal.
    #[arg(long, value_name = "PATH")]
    pub series: Option<PathBuf>,

    /// Window and PNG pixel scale.
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
    pub scale: Option<u32>,
}

#[cfg(test)]
mod tests {
    use super::CliOptions;
    use clap::Parser;
    use clap::error::ErrorKind;

    fn parse(args: &[&str]) -> Result<CliOptions, clap::Error> {
        CliOptions::try_parse_from(std::iter::once("solar-simulator").chain(args.iter().copied()))
    }

    #[test]
    fn test_no_arguments() {
        let opts = parse(&[]).expect("parse should succeed");
        assert!(opts.export.is_none());
        assert!(opts.series.is_none());
        assert!(opts.scale.is_none());
    }

    #[test]
    fn test_export_and_series() {
        let opts = parse(&["--series", "day.json", "--export", "out"]).expect("parse should succeed");
        assert_eq!(
            opts.series.as_deref().and_then(|p| p.to_str()),
            Some("day.json")
        );
        assert_eq!(opts.export.as_deref().and_then(|p| p.to_str()), Some("out"));
    }

    #[test]
    fn test_scale_validation() {
        let opts = parse(&["--scale", "3"]).expect("parse should succeed");
        assert_eq!(opts.scale, Some(3));

        assert!(parse(&["--scale", "0"]).is_err());
        assert!(parse(&["--scale", "big"]).is_err());
        assert!(parse(&["--scale"]).is_err());
    }

    #[test]
    fn test_rejects_duplicates_and_unknown() {
        assert!(parse(&["--export", "a", "--export", "b"]).is_err());
        assert_eq!(
            parse(&["--verbose"]).map(|_| ()).map_err(|err| err.kind()),
            Err(ErrorKind::UnknownArgument)
        );
    }

    #[test]
    fn test_help_is_reported_not_exited() {
        let err = parse(&["--help"]).expect_err("help stops parsing");
        assert_eq!(err.kind(), ErrorKind::DisplayHelp);
        assert!(err.to_string().contains("--export"));
    }
}
