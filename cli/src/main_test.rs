use super::*;

#[test]
fn endpoint_trims_trailing_slash() {
    assert_eq!(endpoint("http://127.0.0.1:3000/", "/api/site"), "http://127.0.0.1:3000/api/site");
    assert_eq!(endpoint("http://site.test", "/healthz"), "http://site.test/healthz");
}

#[test]
fn session_cookie_uses_admin_cookie_name() {
    assert_eq!(session_cookie("abc123"), "admin_session=abc123");
}

#[test]
fn parses_import_from_stdin_marker() {
    let cli = Cli::try_parse_from(["site-cli", "import", "-"]).unwrap();
    assert!(matches!(cli.command, Command::Import { ref file } if file == "-"));
}

#[test]
fn parses_export_output_flag() {
    let cli = Cli::try_parse_from(["site-cli", "--base-url", "http://x.test", "export", "-o", "out.json"]).unwrap();
    assert_eq!(cli.base_url, "http://x.test");
    assert!(matches!(cli.command, Command::Export { output: Some(ref p) } if p == &PathBuf::from("out.json")));
}

#[test]
fn import_requires_a_file_argument() {
    assert!(Cli::try_parse_from(["site-cli", "import"]).is_err());
}

#[tokio::test]
async fn login_without_password_fails_before_any_request() {
    let ctx = CliContext { base_url: "http://127.0.0.1:9".into(), admin_password: None };
    let err = login(&ctx).await.unwrap_err();
    assert!(matches!(err, CliError::MissingAdminPassword));
}
