use buildmode::core::output::contains_hash;
use buildmode::core::rules::Loader;
use buildmode::core::variables::StaticVariableSource;
use buildmode::core::{Environment, InvocationFlags, PipelineConfig, PipelineService};
use buildmode::{BuildModeError, ProcessEnv};
use std::path::Path;

fn source() -> StaticVariableSource {
    StaticVariableSource::new()
        .with(Environment::Development, "API_BASE", "http://localhost:8080")
        .with(Environment::Production, "API_BASE", "https://api.example.com")
        .with(Environment::Uat, "API_BASE", "https://uat.example.com")
}

fn plan(flags: InvocationFlags) -> Result<PipelineConfig, BuildModeError> {
    PipelineService::default().plan(&flags, &ProcessEnv::default(), &source())
}

#[test]
fn test_production_scenario() {
    let config = plan(InvocationFlags::new("production")).unwrap();

    assert_eq!(config.environment, Environment::Production);
    assert!(config.flags.is_pro && !config.flags.is_dev && !config.flags.is_uat);
    assert_eq!(config.mode, "production");
    assert!(config.output.naming.patterns().iter().all(|p| contains_hash(p)));
    assert_eq!(config.chunk_group_count(), 2);
    assert!(!config.has_plugin("bundle-analyzer"));
    assert!(config.dev_server.is_none());
}

#[test]
fn test_development_scenario() {
    let config = plan(InvocationFlags::new("development")).unwrap();

    assert_eq!(config.environment, Environment::Development);
    assert!(config.output.naming.patterns().iter().all(|p| !contains_hash(p)));
    assert!(config.optimization.split_chunks.is_none());
    let dev_server = config.dev_server.expect("dev server in development");
    let prefixes: Vec<_> = dev_server.proxy.iter().map(|r| r.path_prefix.as_str()).collect();
    assert_eq!(prefixes, vec!["/scrm", "/blessCodeActivity"]);
    assert!(dev_server.proxy.iter().all(|r| r.rewrite_origin));
}

#[test]
fn test_isuat_overrides_production() {
    let config = plan(InvocationFlags::new("production").uat()).unwrap();

    assert_eq!(config.environment, Environment::Uat);
    assert!(config.flags.is_uat);
    assert_eq!(config.mode, "production");
    assert!(config.output.naming.patterns().iter().all(|p| contains_hash(p)));
    assert!(config.dev_server.is_none());
}

#[test]
fn test_report_flag_adds_analyzer() {
    for mode in ["development", "production", "uat"] {
        assert!(!plan(InvocationFlags::new(mode)).unwrap().has_plugin("bundle-analyzer"));
        assert!(plan(InvocationFlags::new(mode).report()).unwrap().has_plugin("bundle-analyzer"));
    }
}

#[test]
fn test_invalid_mode_aborts() {
    let err = plan(InvocationFlags::new("staging")).unwrap_err();
    assert!(err.is_configuration_error());
    assert!(err.to_string().contains("staging"));

    assert!(matches!(
        plan(InvocationFlags::default()).unwrap_err(),
        BuildModeError::MissingMode
    ));
}

#[test]
fn test_allow_listed_dependency_in_compile_chain() {
    let service = PipelineService::default();
    let dispatcher = service.dispatcher(Environment::Production).unwrap();

    let dispatch = dispatcher
        .dispatch(Path::new("node_modules/lru-cache/dist/index.js"))
        .unwrap();
    assert!(dispatch.loaders().contains(&Loader::Babel));

    let other = dispatcher.dispatch(Path::new("node_modules/preact/dist/preact.js")).unwrap();
    assert!(!other.loaders().contains(&Loader::Babel));
}

#[test]
fn test_variables_reach_plugins_per_environment() {
    let config = plan(InvocationFlags::new("production").uat()).unwrap();
    let json: serde_json::Value = serde_json::from_str(&config.to_json().unwrap()).unwrap();

    let plugins = json["plugins"].as_array().unwrap();
    let define = plugins.iter().find(|p| p["plugin"] == "define").unwrap();
    assert_eq!(
        define["definitions"]["process.env.API_BASE"],
        "\"https://uat.example.com\""
    );
    assert_eq!(define["definitions"]["process.env.BUILD_ENV"], "\"uat\"");

    let html = plugins.iter().find(|p| p["plugin"] == "html-shell").unwrap();
    assert_eq!(html["variables"]["API_BASE"], "https://uat.example.com");
}

#[test]
fn test_plan_json_shape() {
    let config = plan(InvocationFlags::new("production")).unwrap();
    let json: serde_json::Value = serde_json::from_str(&config.to_json().unwrap()).unwrap();

    assert_eq!(json["environment"], "production");
    assert_eq!(json["devtool"], "source-map");
    assert_eq!(json["output"]["entryFilename"], "bundle.[hash:6].js");
    assert_eq!(json["entry"][0], "./core/polyfill.js");

    let groups = json["optimization"]["splitChunks"]["groups"].as_array().unwrap();
    assert_eq!(groups[0]["name"], "vendor");
    assert_eq!(groups[0]["forceEmit"], true);
    assert_eq!(groups[1]["maxInitialRequests"], 5);

    let rules = json["module"]["rules"].as_array().unwrap();
    assert_eq!(rules[0]["name"], "typed-script");
    assert_eq!(rules[1]["enforce"], "pre");
    assert!(json.get("devServer").is_none());
}

#[test]
fn test_plans_are_deterministic() {
    let a = plan(InvocationFlags::new("production")).unwrap().to_json().unwrap();
    let b = plan(InvocationFlags::new("production")).unwrap().to_json().unwrap();
    assert_eq!(a, b);
}
