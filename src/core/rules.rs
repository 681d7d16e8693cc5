//! Module rule table: which transform chain each file category goes through.
//!
//! Rules are an ordered list of (predicate, chain) pairs. Pre-rules
//! contribute leading steps; among normal rules the first applicable one
//! wins, so a path gets at most one top-level chain.

use crate::core::environment::Environment;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use serde_json::{json, Value};
use std::path::{Component, Path, PathBuf};

/// Default directory holding the project's own sources, relative to the root
pub const SOURCE_DIR: &str = "src";
/// Shared style library inside the source directory, resolved with global
/// class names
pub const STYLE_SUBDIR: &str = "style";
/// Third-party package directory
pub const DEPENDENCY_DIR: &str = "node_modules";
/// Inline raster images below this many bytes
pub const INLINE_LIMIT_BYTES: u64 = 10_000;

/// Third-party packages that ship untranspiled code and must still be compiled
pub const DEFAULT_TRANSPILE_ALLOW_LIST: [&str; 1] = [r"node_modules[/\\](lru-*)"];

static SCRIPT: Lazy<Regex> = Lazy::new(|| Regex::new(r"\.jsx?$").unwrap());
static TYPED_SCRIPT: Lazy<Regex> = Lazy::new(|| Regex::new(r"\.tsx?$").unwrap());
static STYLESHEET: Lazy<Regex> = Lazy::new(|| Regex::new(r"\.(css|scss|sass)$").unwrap());
static SASS: Lazy<Regex> = Lazy::new(|| Regex::new(r"\.(sass|scss)$").unwrap());
static JSON_FILE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\.json$").unwrap());
static TEXT: Lazy<Regex> = Lazy::new(|| Regex::new(r"\.(xml|html|txt|md)$").unwrap());
static FONT_VECTOR: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\.(svg|woff2?|ttf|eot)(\?.*)?$").unwrap());
static RASTER: Lazy<Regex> = Lazy::new(|| Regex::new(r"\.(jpe?g|png|gif)$").unwrap());
static DEPENDENCY: Lazy<Regex> = Lazy::new(|| Regex::new(DEPENDENCY_DIR).unwrap());

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum RuleCategory {
    TypedScript,
    Script,
    Stylesheet,
    Json,
    Text,
    FontVector,
    RasterImage,
}

/// External transformer a step hands the file to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Loader {
    #[serde(rename = "ts-loader")]
    TypeScript,
    #[serde(rename = "source-map-loader")]
    SourceMap,
    #[serde(rename = "babel-loader")]
    Babel,
    #[serde(rename = "style-loader")]
    StyleInline,
    #[serde(rename = "css-extract-loader")]
    CssExtract,
    #[serde(rename = "css-loader")]
    Css,
    #[serde(rename = "postcss-loader")]
    PostCss,
    #[serde(rename = "sass-loader")]
    Sass,
    #[serde(rename = "json-loader")]
    Json,
    #[serde(rename = "raw-loader")]
    Raw,
    #[serde(rename = "file-loader")]
    File,
    #[serde(rename = "url-loader")]
    Url,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TransformStep {
    pub loader: Loader,
    #[serde(skip_serializing_if = "Value::is_null")]
    pub options: Value,
}

impl TransformStep {
    pub fn new(loader: Loader) -> Self {
        Self {
            loader,
            options: Value::Null,
        }
    }

    pub fn with_options(loader: Loader, options: Value) -> Self {
        Self { loader, options }
    }
}

/// Predicate over an anchored, forward-slash path.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum PathPredicate {
    Matches {
        pattern: String,
        #[serde(skip)]
        regex: Regex,
    },
    Under {
        dir: String,
    },
}

impl PathPredicate {
    pub fn matches(regex: &Regex) -> Self {
        Self::Matches {
            pattern: regex.as_str().to_string(),
            regex: regex.clone(),
        }
    }

    pub fn pattern(pattern: &str) -> crate::utils::Result<Self> {
        let regex = Regex::new(pattern)?;
        Ok(Self::Matches {
            pattern: pattern.to_string(),
            regex,
        })
    }

    pub fn under(dir: &str) -> Self {
        Self::Under {
            dir: dir.trim_end_matches('/').to_string(),
        }
    }

    pub fn describe(&self) -> String {
        match self {
            Self::Matches { pattern, .. } => format!("/{}/", pattern),
            Self::Under { dir } => format!("{}/**", dir),
        }
    }

    pub fn test(&self, path: &str) -> bool {
        match self {
            Self::Matches { regex, .. } => regex.is_match(path),
            Self::Under { dir } => {
                dir.is_empty()
                    || path == dir
                    || path
                        .strip_prefix(dir.as_str())
                        .is_some_and(|rest| rest.starts_with('/'))
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Enforce {
    Pre,
}

/// Class-name resolution mode for stylesheets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ClassNames {
    Global,
    Local,
}

/// One alternative of the class-name resolution stage; first match wins.
#[derive(Debug, Clone, Serialize)]
pub struct StyleVariant {
    pub mode: ClassNames,
    /// Empty means "every remaining path"
    pub include: Vec<PathPredicate>,
    pub step: TransformStep,
}

#[derive(Debug, Clone, Serialize)]
pub struct PreprocessorStage {
    pub test: PathPredicate,
    pub step: TransformStep,
}

/// Fixed stylesheet sub-chain: extract-or-inline, class names, post-processing,
/// then the preprocessor for files with its extension.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StyleChain {
    pub delivery: TransformStep,
    pub class_names: Vec<StyleVariant>,
    pub post_process: TransformStep,
    pub preprocessor: PreprocessorStage,
}

impl StyleChain {
    pub fn class_names_for(&self, path: &str) -> Option<&StyleVariant> {
        self.class_names.iter().find(|variant| {
            variant.include.is_empty() || variant.include.iter().any(|p| p.test(path))
        })
    }

    pub fn steps_for(&self, path: &str) -> Vec<TransformStep> {
        let mut steps = vec![self.delivery.clone()];
        if let Some(variant) = self.class_names_for(path) {
            steps.push(variant.step.clone());
        }
        steps.push(self.post_process.clone());
        if self.preprocessor.test.test(path) {
            steps.push(self.preprocessor.step.clone());
        }
        steps
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum RuleChain {
    Steps { steps: Vec<TransformStep> },
    Style(StyleChain),
}

#[derive(Debug, Clone, Serialize)]
pub struct ModuleRule {
    pub name: &'static str,
    pub category: RuleCategory,
    pub test: PathPredicate,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub include: Vec<PathPredicate>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub exclude: Vec<PathPredicate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enforce: Option<Enforce>,
    pub chain: RuleChain,
}

impl ModuleRule {
    fn steps(
        name: &'static str,
        category: RuleCategory,
        test: &Regex,
        steps: Vec<TransformStep>,
    ) -> Self {
        Self {
            name,
            category,
            test: PathPredicate::matches(test),
            include: Vec::new(),
            exclude: Vec::new(),
            enforce: None,
            chain: RuleChain::Steps { steps },
        }
    }

    fn include(mut self, predicates: Vec<PathPredicate>) -> Self {
        self.include = predicates;
        self
    }

    fn exclude(mut self, predicate: PathPredicate) -> Self {
        self.exclude.push(predicate);
        self
    }

    fn pre(mut self) -> Self {
        self.enforce = Some(Enforce::Pre);
        self
    }

    /// Whether this rule applies to the path. A non-empty include list
    /// requires at least one match; any exclude match rejects.
    pub fn applies_to(&self, path: &str) -> bool {
        self.test.test(path)
            && (self.include.is_empty() || self.include.iter().any(|p| p.test(path)))
            && !self.exclude.iter().any(|p| p.test(path))
    }

    pub fn test_pattern(&self) -> String {
        self.test.describe()
    }

    pub fn steps_for(&self, path: &str) -> Vec<TransformStep> {
        match &self.chain {
            RuleChain::Steps { steps } => steps.clone(),
            RuleChain::Style(style) => style.steps_for(path),
        }
    }
}

/// Transform plan for one file
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Dispatch {
    /// Name of the chosen top-level rule, if any
    pub rule: Option<&'static str>,
    pub pre: Vec<TransformStep>,
    pub chain: Vec<TransformStep>,
}

impl Dispatch {
    pub fn loaders(&self) -> Vec<Loader> {
        self.pre.iter().chain(self.chain.iter()).map(|s| s.loader).collect()
    }
}

/// Where the project's own sources live. Directories are anchored at the
/// project root so they line up with the rest of the plan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceLayout {
    root: PathBuf,
    source_dir: String,
    style_dir: String,
}

impl SourceLayout {
    pub fn new(root: &Path, context: &str) -> Self {
        let source = root.join(context);
        Self {
            root: root.to_path_buf(),
            source_dir: normalize(&source),
            style_dir: normalize(&source.join(STYLE_SUBDIR)),
        }
    }

    pub fn source_dir(&self) -> &str {
        &self.source_dir
    }

    pub fn style_dir(&self) -> &str {
        &self.style_dir
    }

    /// Anchor a path at the root. Absolute paths are kept as given.
    pub fn anchor(&self, path: &Path) -> String {
        normalize(&self.root.join(path))
    }
}

impl Default for SourceLayout {
    fn default() -> Self {
        Self::new(Path::new("."), SOURCE_DIR)
    }
}

pub struct ModuleRuleDispatcher {
    layout: SourceLayout,
    rules: Vec<ModuleRule>,
}

impl ModuleRuleDispatcher {
    pub fn new(environment: Environment) -> Self {
        Self::with_allow_list(environment, default_allow_list())
    }

    /// Build the table with a custom transpile allow-list
    pub fn with_allow_list(environment: Environment, allow_list: Vec<PathPredicate>) -> Self {
        Self::with_layout(environment, SourceLayout::default(), allow_list)
    }

    pub fn with_layout(
        environment: Environment,
        layout: SourceLayout,
        allow_list: Vec<PathPredicate>,
    ) -> Self {
        let rules = rule_table(environment, &layout, allow_list);
        Self { layout, rules }
    }

    pub fn layout(&self) -> &SourceLayout {
        &self.layout
    }

    pub fn rules(&self) -> &[ModuleRule] {
        &self.rules
    }

    pub fn into_rules(self) -> Vec<ModuleRule> {
        self.rules
    }

    /// Resolve the transform plan for a root-relative or absolute path.
    /// `None` means no rule applies and the file passes through untouched.
    pub fn dispatch(&self, path: &Path) -> Option<Dispatch> {
        let path = self.layout.anchor(path);

        let pre: Vec<TransformStep> = self
            .rules
            .iter()
            .filter(|rule| rule.enforce == Some(Enforce::Pre) && rule.applies_to(&path))
            .flat_map(|rule| rule.steps_for(&path))
            .collect();

        let chosen = self
            .rules
            .iter()
            .filter(|rule| rule.enforce.is_none())
            .find(|rule| rule.applies_to(&path));

        if pre.is_empty() && chosen.is_none() {
            return None;
        }

        Some(Dispatch {
            rule: chosen.map(|rule| rule.name),
            pre,
            chain: chosen.map(|rule| rule.steps_for(&path)).unwrap_or_default(),
        })
    }
}

pub fn default_allow_list() -> Vec<PathPredicate> {
    DEFAULT_TRANSPILE_ALLOW_LIST
        .iter()
        .filter_map(|pattern| PathPredicate::pattern(pattern).ok())
        .collect()
}

/// Allow-list entry for a named package, including scoped names
pub fn package_pattern(package: &str) -> crate::utils::Result<PathPredicate> {
    PathPredicate::pattern(&format!(r"node_modules[/\\]{}([/\\]|$)", regex::escape(package)))
}

/// Forward-slash form of a path with `.` segments dropped
pub fn normalize(path: &Path) -> String {
    let path: PathBuf = path
        .components()
        .filter(|component| !matches!(component, Component::CurDir))
        .collect();
    path.to_string_lossy().replace('\\', "/")
}

fn source_maps(environment: Environment) -> bool {
    environment != Environment::Production
}

fn style_delivery(environment: Environment) -> TransformStep {
    match environment {
        Environment::Development => TransformStep::new(Loader::StyleInline),
        Environment::Production | Environment::Uat => TransformStep::new(Loader::CssExtract),
    }
}

fn font_vector_step(environment: Environment) -> TransformStep {
    match environment {
        Environment::Production => TransformStep::new(Loader::File),
        Environment::Development | Environment::Uat => TransformStep::new(Loader::Url),
    }
}

/// Identical for every environment.
fn raster_step(environment: Environment) -> TransformStep {
    match environment {
        Environment::Production => {
            TransformStep::with_options(Loader::Url, json!({ "limit": INLINE_LIMIT_BYTES }))
        }
        Environment::Development | Environment::Uat => {
            TransformStep::with_options(Loader::Url, json!({ "limit": INLINE_LIMIT_BYTES }))
        }
    }
}

fn style_chain(environment: Environment, layout: &SourceLayout) -> StyleChain {
    let source_map = source_maps(environment);

    StyleChain {
        delivery: style_delivery(environment),
        class_names: vec![
            StyleVariant {
                mode: ClassNames::Global,
                include: vec![
                    PathPredicate::matches(&DEPENDENCY),
                    PathPredicate::under(layout.style_dir()),
                ],
                step: TransformStep::with_options(Loader::Css, json!({ "sourceMap": source_map })),
            },
            StyleVariant {
                mode: ClassNames::Local,
                include: Vec::new(),
                step: TransformStep::with_options(
                    Loader::Css,
                    json!({
                        "modules": true,
                        "sourceMap": source_map,
                        "importLoaders": 1,
                        "minimize": true
                    }),
                ),
            },
        ],
        post_process: TransformStep::with_options(
            Loader::PostCss,
            json!({ "sourceMap": source_map }),
        ),
        preprocessor: PreprocessorStage {
            test: PathPredicate::matches(&SASS),
            step: TransformStep::with_options(
                Loader::Sass,
                json!({
                    "sourceMap": source_map,
                    "data": "@import \"variables.scss\";",
                    "includePaths": [layout.style_dir()]
                }),
            ),
        },
    }
}

fn rule_table(
    environment: Environment,
    layout: &SourceLayout,
    allow_list: Vec<PathPredicate>,
) -> Vec<ModuleRule> {
    let dependencies = || PathPredicate::matches(&DEPENDENCY);

    vec![
        ModuleRule::steps(
            "typed-script",
            RuleCategory::TypedScript,
            &TYPED_SCRIPT,
            vec![TransformStep::new(Loader::TypeScript)],
        )
        .exclude(dependencies()),
        ModuleRule::steps(
            "script-source-maps",
            RuleCategory::Script,
            &SCRIPT,
            vec![TransformStep::new(Loader::SourceMap)],
        )
        .exclude(PathPredicate::under(layout.source_dir()))
        .pre(),
        ModuleRule::steps(
            "script",
            RuleCategory::Script,
            &SCRIPT,
            vec![TransformStep::new(Loader::Babel)],
        )
        .exclude(dependencies()),
        ModuleRule::steps(
            "script-allow-listed",
            RuleCategory::Script,
            &SCRIPT,
            vec![TransformStep::new(Loader::Babel)],
        )
        .include(allow_list),
        ModuleRule {
            name: "stylesheet",
            category: RuleCategory::Stylesheet,
            test: PathPredicate::matches(&STYLESHEET),
            include: Vec::new(),
            exclude: Vec::new(),
            enforce: None,
            chain: RuleChain::Style(style_chain(environment, layout)),
        },
        ModuleRule::steps(
            "json",
            RuleCategory::Json,
            &JSON_FILE,
            vec![TransformStep::with_options(Loader::Json, json!({ "type": "javascript/auto" }))],
        ),
        ModuleRule::steps("text", RuleCategory::Text, &TEXT, vec![TransformStep::new(Loader::Raw)]),
        ModuleRule::steps(
            "font-vector",
            RuleCategory::FontVector,
            &FONT_VECTOR,
            vec![font_vector_step(environment)],
        ),
        ModuleRule::steps(
            "raster-image",
            RuleCategory::RasterImage,
            &RASTER,
            vec![raster_step(environment)],
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn loaders(env: Environment, path: &str) -> Vec<Loader> {
        ModuleRuleDispatcher::new(env)
            .dispatch(Path::new(path))
            .map(|d| d.loaders())
            .unwrap_or_default()
    }

    #[test]
    fn test_own_script_is_compiled() {
        let dispatch = ModuleRuleDispatcher::new(Environment::Production)
            .dispatch(Path::new("src/index.js"))
            .unwrap();
        assert_eq!(dispatch.rule, Some("script"));
        assert!(dispatch.pre.is_empty());
        assert_eq!(dispatch.loaders(), vec![Loader::Babel]);
    }

    #[test]
    fn test_third_party_script_is_not_compiled() {
        let dispatch = ModuleRuleDispatcher::new(Environment::Production)
            .dispatch(Path::new("node_modules/preact/dist/preact.js"))
            .unwrap();
        assert_eq!(dispatch.rule, None);
        assert_eq!(dispatch.loaders(), vec![Loader::SourceMap]);
    }

    #[test]
    fn test_allow_listed_dependency_is_compiled() {
        let dispatch = ModuleRuleDispatcher::new(Environment::Production)
            .dispatch(Path::new("node_modules/lru-cache/index.js"))
            .unwrap();
        assert_eq!(dispatch.rule, Some("script-allow-listed"));
        assert_eq!(dispatch.loaders(), vec![Loader::SourceMap, Loader::Babel]);
    }

    #[test]
    fn test_custom_allow_list_entry() {
        let allow = vec![package_pattern("@scope/modern").unwrap()];
        let dispatcher = ModuleRuleDispatcher::with_allow_list(Environment::Uat, allow);
        let hit = dispatcher.dispatch(Path::new("node_modules/@scope/modern/lib/a.js")).unwrap();
        assert_eq!(hit.rule, Some("script-allow-listed"));
        let miss = dispatcher.dispatch(Path::new("node_modules/@scope/modern-ish/a.js")).unwrap();
        assert_eq!(miss.rule, None);
    }

    #[test]
    fn test_typescript_outside_dependencies() {
        assert_eq!(loaders(Environment::Development, "src/app.tsx"), vec![Loader::TypeScript]);
        assert!(loaders(Environment::Development, "node_modules/x/index.ts").is_empty());
    }

    #[test]
    fn test_style_delivery_per_environment() {
        assert_eq!(loaders(Environment::Development, "src/app.css")[0], Loader::StyleInline);
        assert_eq!(loaders(Environment::Production, "src/app.css")[0], Loader::CssExtract);
        assert_eq!(loaders(Environment::Uat, "src/app.css")[0], Loader::CssExtract);
    }

    #[test]
    fn test_style_sub_chain_order() {
        assert_eq!(
            loaders(Environment::Production, "src/components/card.scss"),
            vec![Loader::CssExtract, Loader::Css, Loader::PostCss, Loader::Sass]
        );
        assert_eq!(
            loaders(Environment::Production, "src/components/card.css"),
            vec![Loader::CssExtract, Loader::Css, Loader::PostCss]
        );
    }

    #[test]
    fn test_class_name_mode_by_path() {
        let dispatcher = ModuleRuleDispatcher::new(Environment::Development);
        let rule = dispatcher.rules().iter().find(|r| r.name == "stylesheet").unwrap();
        let RuleChain::Style(style) = &rule.chain else {
            panic!("stylesheet rule should carry a style chain");
        };
        let mode = |path: &str| style.class_names_for(path).unwrap().mode;
        assert_eq!(mode("src/style/base.scss"), ClassNames::Global);
        assert_eq!(mode("node_modules/normalize.css/normalize.css"), ClassNames::Global);
        assert_eq!(mode("src/stylesheets/x.css"), ClassNames::Local);
        assert_eq!(mode("src/components/card.css"), ClassNames::Local);
    }

    #[test]
    fn test_source_maps_off_only_in_production() {
        for env in Environment::ALL {
            let dispatch = ModuleRuleDispatcher::new(env)
                .dispatch(Path::new("src/a.scss"))
                .unwrap();
            for step in &dispatch.chain[1..] {
                assert_eq!(step.options["sourceMap"], json!(env != Environment::Production));
            }
        }
    }

    #[test]
    fn test_font_handling() {
        assert_eq!(loaders(Environment::Production, "src/assets/icon.svg"), vec![Loader::File]);
        assert_eq!(loaders(Environment::Development, "src/fonts/a.woff2?v=3"), vec![Loader::Url]);
        assert_eq!(loaders(Environment::Uat, "src/fonts/A.TTF"), vec![Loader::Url]);
    }

    #[test]
    fn test_raster_policy_uniform() {
        let steps: Vec<_> = Environment::ALL
            .iter()
            .map(|env| {
                ModuleRuleDispatcher::new(*env)
                    .dispatch(Path::new("src/logo.png"))
                    .unwrap()
                    .chain
            })
            .collect();
        assert!(steps.windows(2).all(|w| w[0] == w[1]));
        assert_eq!(steps[0][0].options["limit"], json!(10_000));
    }

    #[test]
    fn test_json_and_text() {
        assert_eq!(loaders(Environment::Production, "src/data.json"), vec![Loader::Json]);
        assert_eq!(loaders(Environment::Production, "src/README.md"), vec![Loader::Raw]);
    }

    #[test]
    fn test_unmatched_file_passes_through() {
        let dispatcher = ModuleRuleDispatcher::new(Environment::Production);
        assert!(dispatcher.dispatch(Path::new("src/video.mp4")).is_none());
        assert!(dispatcher.dispatch(Path::new("src/Makefile")).is_none());
    }

    #[test]
    fn test_under_predicate_respects_segments() {
        let p = PathPredicate::under("src/style");
        assert!(p.test("src/style/a.css"));
        assert!(p.test("src/style"));
        assert!(!p.test("src/styles/a.css"));
    }

    #[test]
    fn test_normalize_windows_paths() {
        assert_eq!(normalize(Path::new("./src/a.js")), "src/a.js");
        assert_eq!(
            normalize(Path::new(r"node_modules\lru-cache\index.js")),
            "node_modules/lru-cache/index.js"
        );
        assert_eq!(normalize(Path::new("/work/proj/./src")), "/work/proj/src");
    }

    fn app_layout() -> ModuleRuleDispatcher {
        ModuleRuleDispatcher::with_layout(
            Environment::Production,
            SourceLayout::new(Path::new("/work/proj"), "app"),
            default_allow_list(),
        )
    }

    #[test]
    fn test_custom_context_counts_as_own_source() {
        let dispatcher = app_layout();
        for path in ["app/index.js", "/work/proj/app/index.js"] {
            let dispatch = dispatcher.dispatch(Path::new(path)).unwrap();
            assert_eq!(dispatch.loaders(), vec![Loader::Babel], "{}", path);
        }

        // The default source directory is just another folder here
        let dispatch = dispatcher.dispatch(Path::new("src/index.js")).unwrap();
        assert_eq!(dispatch.loaders(), vec![Loader::SourceMap, Loader::Babel]);

        let vendor = dispatcher
            .dispatch(Path::new("/work/proj/node_modules/preact/dist/preact.js"))
            .unwrap();
        assert_eq!(vendor.loaders(), vec![Loader::SourceMap]);
    }

    #[test]
    fn test_custom_context_moves_global_style_dir() {
        let dispatcher = app_layout();
        assert_eq!(dispatcher.layout().style_dir(), "/work/proj/app/style");

        let rule = dispatcher.rules().iter().find(|r| r.name == "stylesheet").unwrap();
        let RuleChain::Style(style) = &rule.chain else {
            panic!("stylesheet rule should carry a style chain");
        };
        let global = dispatcher.layout().anchor(Path::new("app/style/base.scss"));
        assert_eq!(style.class_names_for(&global).unwrap().mode, ClassNames::Global);
        let old = dispatcher.layout().anchor(Path::new("src/style/base.scss"));
        assert_eq!(style.class_names_for(&old).unwrap().mode, ClassNames::Local);
        assert_eq!(
            style.preprocessor.step.options["includePaths"],
            json!(["/work/proj/app/style"])
        );
    }

    #[test]
    fn test_absolute_own_source_skips_pre_step() {
        let dispatcher = ModuleRuleDispatcher::with_layout(
            Environment::Uat,
            SourceLayout::new(Path::new("/work/proj"), SOURCE_DIR),
            default_allow_list(),
        );
        let dispatch = dispatcher.dispatch(Path::new("/work/proj/src/index.js")).unwrap();
        assert!(dispatch.pre.is_empty());
        assert_eq!(dispatch.rule, Some("script"));
    }
}
