//! Library integration tests.

use requirementz::ReqzError;

#[test]
fn error_types_are_public() {
    let err = ReqzError::PackageNotFound {
        package: "nothere".into(),
    };
    assert!(err.to_string().contains("nothere"));
    assert_eq!(err.exit_code(), 1);
}

#[test]
fn result_type_alias_is_public() {
    fn test_fn() -> requirementz::Result<()> {
        Ok(())
    }
    assert!(test_fn().is_ok());
}

#[test]
fn cli_types_are_public() {
    use clap::Parser;
    use requirementz::cli::{Cli, Commands};

    let cli = Cli::parse_from(["requirementz", "check", "--latest", "--location"]);

    if let Some(Commands::Check(args)) = cli.command {
        assert!(args.latest);
        assert!(args.location);
    } else {
        panic!("Expected Check command");
    }
}

#[test]
fn version_comparison_is_public() {
    use requirementz::requirements::compare_versions;

    assert!(compare_versions("1.0.01", ">", "1.0.0"));
    assert!(compare_versions("1.0.01", "<", "1.0.02"));
    assert!(compare_versions("1", "==", "1.0.0"));
    assert!(compare_versions("2", "UNKNOWN_OP", "1"));
    for op in ["==", ">=", "<="] {
        assert!(compare_versions("1.2.3", op, "1.2.3"));
    }
    for op in [">", "<"] {
        assert!(!compare_versions("1.2.3", op, "1.2.3"));
    }
}
