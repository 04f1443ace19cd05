#[cfg(test)]
mod tests {
    use crate::cli::{Cli, Command, Mode};
    use clap::Parser;
    use std::path::PathBuf;

    #[test]
    fn test_build_defaults_leave_everything_unset() {
        let cli = Cli::try_parse_from(["esdev", "build"]).unwrap();

        let Command::Build(args) = cli.command else {
            panic!("expected build command");
        };
        assert!(args.project.entry.is_empty());
        assert!(args.project.mode.is_none());
        assert!(args.project.title.is_none());
        assert!(!args.project.no_template);
    }

    #[test]
    fn test_build_with_options() {
        let cli = Cli::try_parse_from([
            "esdev",
            "build",
            "src/main.tsx",
            "--mode",
            "development",
            "--title",
            "Admin",
            "-d",
            "public/build",
        ])
        .unwrap();

        let Command::Build(args) = cli.command else {
            panic!("expected build command");
        };
        assert_eq!(args.project.entry, vec!["src/main.tsx"]);
        assert_eq!(args.project.mode, Some(Mode::Development));
        assert_eq!(args.project.title.as_deref(), Some("Admin"));
        assert_eq!(args.project.out_dir, Some(PathBuf::from("public/build")));
    }

    #[test]
    fn test_dev_port_and_host() {
        let cli =
            Cli::try_parse_from(["esdev", "dev", "--port", "4000", "--host", "0.0.0.0"]).unwrap();

        let Command::Dev(args) = cli.command else {
            panic!("expected dev command");
        };
        assert_eq!(args.port, Some(4000));
        assert_eq!(args.host.as_deref(), Some("0.0.0.0"));
        assert!(!args.open);
    }

    #[test]
    fn test_invalid_mode_rejected() {
        assert!(Cli::try_parse_from(["esdev", "build", "--mode", "staging"]).is_err());
    }

    #[test]
    fn test_template_conflicts_with_no_template() {
        assert!(
            Cli::try_parse_from([
                "esdev",
                "build",
                "--template",
                "public/index.html",
                "--no-template"
            ])
            .is_err()
        );
    }

    #[test]
    fn test_verbose_conflicts_with_quiet() {
        assert!(Cli::try_parse_from(["esdev", "--verbose", "--quiet", "build"]).is_err());
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from(["esdev", "dev", "--no-color", "-v"]).unwrap();
        assert!(cli.no_color);
        assert!(cli.verbose);
    }

    #[test]
    fn test_mode_entry_names() {
        assert_eq!(Mode::Development.entry_names(), "[dir]/bundle.[name]-[hash]");
        assert_eq!(Mode::Production.entry_names(), "bundle");
        assert_eq!(Mode::default(), Mode::Production);
        assert_eq!(Mode::Development.to_string(), "development");
    }
}
