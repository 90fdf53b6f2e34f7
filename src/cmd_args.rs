use std::ffi::OsString;
use std::path::PathBuf;

pub use clap::Parser;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct ClapArgs {
    /// Profile name
    /// Required. Profile name to use for the session. Default is 'default'.
    /// If the profile is not configured, the session runs against a blank profile.
    #[clap(short = 'p', long, default_value = "default", help = "profile name")]
    profile: String,

    /// Verbose mode
    /// Optional. Print verbose messages.
    #[clap(
        short = 'v',
        long,
        help = "Print verbose message",
        default_value = "false"
    )]
    verbose: bool,

    /// Download the raw data export for a form after the list loads
    #[clap(
        short = 'd',
        long,
        value_name = "PK",
        help = "download data for the form with this identifier"
    )]
    download: Option<String>,

    /// Build a zipped CSV export for a form after the list loads
    #[clap(
        short = 'e',
        long,
        value_name = "PK",
        help = "build a zipped CSV export for the form with this identifier"
    )]
    export: Option<String>,

    /// Directory for downloaded and exported files
    #[clap(
        short = 'o',
        long,
        value_name = "DIR",
        help = "directory for downloaded files"
    )]
    output: Option<PathBuf>,
}

#[derive(Debug, Clone)]
pub struct CommandLineArgs {
    profile: String,
    verbose: bool,
    download: Option<String>,
    export: Option<String>,
    output: Option<PathBuf>,
}

impl CommandLineArgs {
    pub fn parse() -> Self {
        Self::from_clap(ClapArgs::parse())
    }

    pub fn parse_from<I, T>(itr: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        Self::from_clap(ClapArgs::parse_from(itr))
    }

    fn from_clap(args: ClapArgs) -> Self {
        Self {
            profile: args.profile,
            verbose: args.verbose,
            download: args.download,
            export: args.export,
            output: args.output,
        }
    }

    pub fn profile(&self) -> &String {
        &self.profile
    }

    pub fn verbose(&self) -> bool {
        self.verbose
    }

    pub fn download(&self) -> Option<&String> {
        self.download.as_ref()
    }

    pub fn export(&self) -> Option<&String> {
        self.export.as_ref()
    }

    pub fn output(&self) -> Option<&PathBuf> {
        self.output.as_ref()
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_parse_args_profile_only() {
        let args = CommandLineArgs::parse_from(["program", "--profile", "test"]);
        assert_eq!(args.profile(), "test");
        assert!(!args.verbose());
        assert!(args.download().is_none());
    }

    #[test]
    fn test_parse_args_verbose() {
        let args = CommandLineArgs::parse_from(["program", "--verbose"]);
        assert_eq!(args.profile(), "default");
        assert!(args.verbose());
    }

    #[test]
    fn test_parse_args_short_flags() {
        let args = CommandLineArgs::parse_from(["program", "-p", "dev", "-v"]);
        assert_eq!(args.profile(), "dev");
        assert!(args.verbose());
    }

    #[test]
    fn test_parse_args_download_and_output() {
        let args =
            CommandLineArgs::parse_from(["program", "--download", "42", "-o", "/tmp/exports"]);
        assert_eq!(args.download(), Some(&"42".to_string()));
        assert_eq!(args.output(), Some(&PathBuf::from("/tmp/exports")));
    }

    #[test]
    fn test_parse_args_export() {
        let args = CommandLineArgs::parse_from(["program", "-e", "7"]);
        assert_eq!(args.export(), Some(&"7".to_string()));
        assert!(args.download().is_none());
    }

    #[test]
    fn test_default_values() {
        let args = CommandLineArgs::parse_from(["program"]);
        assert_eq!(args.profile(), "default");
        assert!(!args.verbose());
        assert!(args.output().is_none());
    }
}
