//! Integration tests for the tscat command line application.
//!
//! Commands run against a temporary catalog directory holding the
//! Hungarian sample.

use tempfile::TempDir;
use tscat_catalog::{parse_str, Catalog};
use tscat_cli::{App, CliError, Command, LookupArgs};
use tscat_common::test_utils::{catalog_fixtures, create_temp_dir, init_test_logging, write_fixture};
use tscat_config::Config;

fn sample_app() -> (TempDir, App) {
    init_test_logging();
    let dir = create_temp_dir();
    write_fixture(&dir, "VirtualBox_hu.ts", catalog_fixtures::hungarian_sample());

    let mut config = Config::default();
    config.catalogs.directory = dir.path().to_path_buf();
    (dir, App::new(config))
}

fn lookup_args(context: &str, source: &str, comment: Option<&str>) -> LookupArgs {
    LookupArgs {
        context: context.to_string(),
        source: source.to_string(),
        comment: comment.map(str::to_string),
        count: None,
        language: None,
        raw: false,
    }
}

fn lookup(app: &App, args: &LookupArgs) -> Result<String, CliError> {
    let mut out = Vec::new();
    app.lookup(args, &mut out)?;
    Ok(String::from_utf8(out).unwrap())
}

#[test]
fn test_lookup_translated() {
    let (_dir, app) = sample_app();
    let out = lookup(&app, &lookup_args("UIMessageCenter", "Yes", None)).unwrap();
    assert_eq!(out, "Igen\n");
}

#[test]
fn test_lookup_with_comment() {
    let (_dir, app) = sample_app();
    let args = lookup_args("UIGDetails", "Disabled", Some("details (network/adapter)"));
    assert_eq!(lookup(&app, &args).unwrap(), "Letiltva\n");
}

#[test]
fn test_lookup_ambiguous_fails() {
    let (_dir, app) = sample_app();
    let err = lookup(&app, &lookup_args("UIGDetails", "Disabled", None)).unwrap_err();
    assert!(matches!(err, CliError::Lookup(_)));
}

#[test]
fn test_lookup_unfinished_display_and_raw() {
    let (_dir, app) = sample_app();
    let mut args = lookup_args(
        "UIGlobalSettingsProxy",
        "No proxy host is currently specified.",
        None,
    );
    assert_eq!(
        lookup(&app, &args).unwrap(),
        "No proxy host is currently specified.\n"
    );

    args.raw = true;
    assert_eq!(lookup(&app, &args).unwrap(), "\n");
}

#[test]
fn test_lookup_falls_back_to_source() {
    let (_dir, app) = sample_app();
    let out = lookup(&app, &lookup_args("UIMessageCenter", "Ignore", None)).unwrap();
    assert_eq!(out, "Ignore\n");

    let out = lookup(&app, &lookup_args("NoSuchContext", "Cancel", None)).unwrap();
    assert_eq!(out, "Cancel\n");
}

#[test]
fn test_lookup_plural() {
    let (_dir, app) = sample_app();
    let mut args = lookup_args("UIMessageCenter", "Deleting %n machine(s)...", None);
    args.count = Some(3);
    assert_eq!(lookup(&app, &args).unwrap(), "%n gép törlése...\n");
}

#[test]
fn test_lookup_missing_language() {
    let (_dir, app) = sample_app();
    let mut args = lookup_args("UIMessageCenter", "Yes", None);
    args.language = Some("de".to_string());
    assert!(matches!(lookup(&app, &args), Err(CliError::Catalog(_))));

    args.language = Some("not a language".to_string());
    assert!(matches!(lookup(&app, &args), Err(CliError::Common(_))));
}

#[test]
fn test_check_reports_every_file() {
    let (dir, app) = sample_app();
    let broken = write_fixture(&dir, "broken.ts", catalog_fixtures::unclosed_context());
    let good = dir.path().join("VirtualBox_hu.ts");

    let mut out = Vec::new();
    let err = app.check(&[broken, good], &mut out).unwrap_err();
    assert!(matches!(err, CliError::CheckFailed { failed: 1, total: 2 }));

    let out = String::from_utf8(out).unwrap();
    let lines: Vec<_> = out.lines().collect();
    assert_eq!(lines.len(), 2);
    assert!(lines[0].contains("broken.ts: error:"));
    assert!(lines[1].contains("ok, hu: 3 contexts, 11 messages"));
}

#[test]
fn test_check_all_good() {
    let (dir, app) = sample_app();
    let mut out = Vec::new();
    app.check(&[dir.path().join("VirtualBox_hu.ts")], &mut out).unwrap();
    assert!(String::from_utf8(out).unwrap().contains(": ok, "));
}

#[test]
fn test_stats_text_and_json() {
    let (_dir, app) = sample_app();

    let mut out = Vec::new();
    app.stats(&[], false, &mut out).unwrap();
    assert_eq!(
        String::from_utf8(out).unwrap(),
        "hu: 3 contexts, 11 messages (9 final, 1 unfinished, 1 obsolete, 1 numerus)\n"
    );

    let mut out = Vec::new();
    app.stats(&["hu".to_string()], true, &mut out).unwrap();
    let value: serde_json::Value = serde_json::from_slice(&out).unwrap();
    assert_eq!(value["language"], "hu");
    assert_eq!(value["messages"], 11);
    assert_eq!(value["obsolete"], 1);
}

#[test]
fn test_export_to_stdout_reparses() {
    let (_dir, app) = sample_app();
    let mut out = Vec::new();
    app.export(None, None, &mut out).unwrap();

    let exported = parse_str(std::str::from_utf8(&out).unwrap()).unwrap();
    let original = parse_str(catalog_fixtures::hungarian_sample()).unwrap();
    assert_eq!(exported, original);
}

#[test]
fn test_export_to_file() {
    let (dir, app) = sample_app();
    let target = dir.path().join("export").with_extension("ts");

    let mut out = Vec::new();
    app.export(Some("hu"), Some(&target), &mut out).unwrap();
    assert!(out.is_empty());

    let catalog = Catalog::load(&target).unwrap();
    assert_eq!(catalog.stats().messages, 11);
}

#[tokio::test]
async fn test_watch_until_shutdown() {
    let (_dir, mut app) = sample_app();
    assert_eq!(app.watch(async {}).await.unwrap(), 0);

    let mut config = app.config().clone();
    config.catalogs.watch = true;
    app = App::new(config);
    assert_eq!(app.watch(async {}).await.unwrap(), 1);
    assert_eq!(app.manager().loaded_languages().len(), 1);
}

#[tokio::test]
async fn test_watch_without_catalogs() {
    init_test_logging();
    let dir = create_temp_dir();
    let mut config = Config::default();
    config.catalogs.directory = dir.path().to_path_buf();

    let err = App::new(config).watch(async {}).await.unwrap_err();
    assert!(matches!(err, CliError::NotLoaded(_)));
}

#[tokio::test]
async fn test_run_dispatches_commands() {
    let (_dir, app) = sample_app();
    let mut out = Vec::new();
    app.run(
        Command::Lookup(lookup_args("UIGlobalSettingsProxy", "&Host:", None)),
        &mut out,
    )
    .await
    .unwrap();
    app.run(
        Command::Check {
            files: vec![app.config().catalogs.directory.join("VirtualBox_hu.ts")],
        },
        &mut out,
    )
    .await
    .unwrap();

    let out = String::from_utf8(out).unwrap();
    assert!(out.starts_with("&Kiszolgáló:\n"));
}
