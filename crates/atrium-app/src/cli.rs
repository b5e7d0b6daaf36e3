use clap::Parser;

/// Atrium: a single-window desktop shell for a suite of web apps.
#[derive(Parser, Debug)]
#[command(name = "atrium", version, about)]
pub struct Args {
    /// Config file path override.
    #[arg(long)]
    pub config: Option<String>,

    /// Log level override (debug, info, warn, error).
    #[arg(long)]
    pub log_level: Option<String>,

    /// Profile to activate before the window opens.
    #[arg(short = 'p', long)]
    pub profile: Option<String>,

    /// Surface to show first (e.g. `calendar`).
    #[arg(short = 's', long)]
    pub surface: Option<String>,
}

pub fn parse() -> Args {
    Args::parse()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_arguments_gives_defaults() {
        let args = Args::try_parse_from(["atrium"]).unwrap();
        assert!(args.config.is_none());
        assert!(args.log_level.is_none());
        assert!(args.profile.is_none());
        assert!(args.surface.is_none());
    }

    #[test]
    fn profile_and_surface_flags() {
        let args = Args::try_parse_from(["atrium", "-p", "work", "--surface", "calendar"]).unwrap();
        assert_eq!(args.profile.as_deref(), Some("work"));
        assert_eq!(args.surface.as_deref(), Some("calendar"));
    }

    #[test]
    fn unknown_flag_is_rejected() {
        assert!(Args::try_parse_from(["atrium", "--execute", "ls"]).is_err());
    }
}
