use buildmode::core::rules::Loader;
use buildmode::core::{Environment, InvocationFlags, PipelineService};
use buildmode::utils::{CliOverrides, ConfigLoader, DotenvSource, CONFIG_FILE};
use buildmode::ProcessEnv;
use std::path::{Path, PathBuf};

#[tokio::test]
async fn test_project_files_drive_the_plan() {
    let temp_dir = tempfile::tempdir().unwrap();
    let root = temp_dir.path();

    std::fs::write(root.join(".env"), "API_BASE=http://localhost\nAPP_NAME=shop\n").unwrap();
    std::fs::write(root.join(".env.production"), "API_BASE=https://api.example.com\n").unwrap();
    std::fs::write(
        root.join(CONFIG_FILE),
        r#"{
            "outdir": "dist",
            "transpileDependencies": ["query-string"],
            "proxy": [{"pathPrefix": "/api", "targetOrigin": "http://localhost:9000"}]
        }"#,
    )
    .unwrap();

    let settings = ConfigLoader::load(root, CliOverrides::default()).unwrap();
    let source = DotenvSource::load(root).await.unwrap();
    let service = PipelineService::new(settings);

    let production = service
        .plan(&InvocationFlags::new("production"), &ProcessEnv::default(), &source)
        .unwrap();
    assert_eq!(production.output.path, root.join("dist"));
    let json = production.to_json().unwrap();
    assert!(json.contains(r#""process.env.API_BASE": "\"https://api.example.com\"""#));
    assert!(json.contains(r#""process.env.APP_NAME": "\"shop\"""#));

    let development = service
        .plan(&InvocationFlags::new("development"), &ProcessEnv::default(), &source)
        .unwrap();
    let dev_server = development.dev_server.unwrap();
    assert_eq!(dev_server.proxy.len(), 1);
    assert_eq!(dev_server.proxy[0].path_prefix, "/api");

    let dispatch = service
        .dispatcher(Environment::Production)
        .unwrap()
        .dispatch(Path::new("node_modules/query-string/index.js"))
        .unwrap();
    assert_eq!(dispatch.rule, Some("script-allow-listed"));
}

#[tokio::test]
async fn test_invalid_template_key_is_skipped() {
    let temp_dir = tempfile::tempdir().unwrap();
    std::fs::write(temp_dir.path().join(".env"), "GOOD=1\nNOT-VALID=2\n").unwrap();

    let source = DotenvSource::load(temp_dir.path()).await.unwrap();
    let settings = ConfigLoader::load(temp_dir.path(), CliOverrides::default()).unwrap();
    let config = PipelineService::new(settings)
        .plan(&InvocationFlags::new("development"), &ProcessEnv::default(), &source)
        .unwrap();

    let json = config.to_json().unwrap();
    assert!(json.contains("process.env.GOOD"));
    assert!(!json.contains("NOT-VALID"));
}

#[test]
fn test_cli_outdir_wins_over_file() {
    let temp_dir = tempfile::tempdir().unwrap();
    std::fs::write(temp_dir.path().join(CONFIG_FILE), r#"{"outdir": "dist"}"#).unwrap();

    let settings = ConfigLoader::load(
        temp_dir.path(),
        CliOverrides {
            outdir: Some("out"),
            host: None,
        },
    )
    .unwrap();
    assert_eq!(settings.outdir, "out");
    assert_eq!(settings.root, PathBuf::from(temp_dir.path()));
}

#[test]
fn test_config_file_context_drives_source_rules() {
    let temp_dir = tempfile::tempdir().unwrap();
    let root = temp_dir.path();
    std::fs::write(root.join(CONFIG_FILE), r#"{"context": "app"}"#).unwrap();

    let settings = ConfigLoader::load(root, CliOverrides::default()).unwrap();
    let dispatcher = PipelineService::new(settings)
        .dispatcher(Environment::Development)
        .unwrap();

    let own = dispatcher.dispatch(Path::new("app/main.js")).unwrap();
    assert_eq!(own.loaders(), vec![Loader::Babel]);
    let absolute = dispatcher.dispatch(&root.join("app/main.js")).unwrap();
    assert_eq!(absolute.loaders(), vec![Loader::Babel]);

    let theme = dispatcher.dispatch(Path::new("app/style/theme.css")).unwrap();
    assert_eq!(theme.chain[1].options["modules"], serde_json::Value::Null);
    let card = dispatcher.dispatch(Path::new("app/components/card.css")).unwrap();
    assert_eq!(card.chain[1].options["modules"], serde_json::json!(true));
}
