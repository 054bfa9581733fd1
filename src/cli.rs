use std::path::PathBuf;

use crate::config::ThemePreference;
use crate::error::{Error, Result};

pub const USAGE: &str = "\
Usage: photo-gallery [OPTIONS] [PATH]

Arguments:
  [PATH]            Gallery manifest (.json) or folder of images

Options:
  --theme <THEME>   Color theme: dark or light
  -h, --help        Print this help
";

/// Parsed command line
#[derive(Debug, Default, PartialEq)]
pub struct Args {
    pub help: bool,
    pub theme: Option<ThemePreference>,
    pub gallery: Option<PathBuf>,
}

impl Args {
    pub fn from_env() -> Result<Self> {
        Self::parse(pico_args::Arguments::from_env())
    }

    fn parse(mut args: pico_args::Arguments) -> Result<Self> {
        let help = args.contains(["-h", "--help"]);
        let theme = args.opt_value_from_str("--theme")?;
        let gallery = args.opt_free_from_os_str(|arg| Ok::<_, Error>(PathBuf::from(arg)))?;

        let remaining = args.finish();
        if !remaining.is_empty() {
            return Err(Error::Args(format!(
                "unexpected arguments: {}",
                remaining
                    .iter()
                    .map(|arg| arg.to_string_lossy())
                    .collect::<Vec<_>>()
                    .join(" ")
            )));
        }

        Ok(Args {
            help,
            theme,
            gallery,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::ffi::OsString;

    fn parse(args: &[&str]) -> Result<Args> {
        Args::parse(pico_args::Arguments::from_vec(
            args.iter().map(OsString::from).collect(),
        ))
    }

    #[test]
    fn test_no_arguments() {
        assert_eq!(parse(&[]).unwrap(), Args::default());
    }

    #[test]
    fn test_path_and_theme() {
        let args = parse(&["--theme", "light", "/photos/summer"]).unwrap();
        assert_eq!(args.theme, Some(ThemePreference::Light));
        assert_eq!(args.gallery, Some(PathBuf::from("/photos/summer")));
        assert!(!args.help);
    }

    #[test]
    fn test_help_flag() {
        assert!(parse(&["-h"]).unwrap().help);
        assert!(parse(&["--help"]).unwrap().help);
    }

    #[test]
    fn test_invalid_arguments() {
        assert!(matches!(parse(&["--theme", "neon"]), Err(Error::Args(_))));
        assert!(matches!(parse(&["a", "b"]), Err(Error::Args(_))));
    }
}
