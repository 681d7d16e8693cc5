use crate::core::dev_server::DevServerRouter;
use crate::core::environment::{Environment, EnvironmentResolver};
use crate::core::interfaces::VariableSource;
use crate::core::models::*;
use crate::core::optimization::{OptimizationPolicy, SourceMapPolicy};
use crate::core::output::OutputNamingScheme;
use crate::core::resolve::ResolvePolicy;
use crate::core::rules::{default_allow_list, package_pattern, ModuleRuleDispatcher, SourceLayout};
use crate::core::variables::{VariableInjector, VariableSet};
use crate::plugins::PluginAssembler;
use crate::utils::{Logger, ProcessEnv, Result, Timer};

/// Derives the pipeline configuration in a single synchronous pass.
pub struct PipelineService {
    settings: ProjectSettings,
}

impl PipelineService {
    pub fn new(settings: ProjectSettings) -> Self {
        Self { settings }
    }

    pub fn settings(&self) -> &ProjectSettings {
        &self.settings
    }

    /// Resolve the environment from the invocation flags, then plan.
    pub fn plan(
        &self,
        flags: &InvocationFlags,
        process_env: &ProcessEnv,
        source: &dyn VariableSource,
    ) -> Result<PipelineConfig> {
        let resolved = EnvironmentResolver::resolve(flags.mode.as_deref(), flags.isuat)?;
        Logger::environment_resolved(
            resolved.environment.as_str(),
            flags.mode.as_deref(),
            resolved.forced_uat,
        );

        self.plan_for(resolved.environment, flags.report, process_env, source)
    }

    pub fn variables(
        &self,
        environment: Environment,
        source: &dyn VariableSource,
    ) -> Result<VariableSet> {
        VariableInjector::inject(environment, source)
    }

    /// Rule table for the configured source layout and allow-list
    pub fn dispatcher(&self, environment: Environment) -> Result<ModuleRuleDispatcher> {
        let mut allow_list = default_allow_list();
        for package in &self.settings.transpile_dependencies {
            allow_list.push(package_pattern(package)?);
        }
        let layout = SourceLayout::new(&self.settings.root, &self.settings.context);
        Ok(ModuleRuleDispatcher::with_layout(environment, layout, allow_list))
    }

    pub fn plan_for(
        &self,
        environment: Environment,
        report: bool,
        process_env: &ProcessEnv,
        source: &dyn VariableSource,
    ) -> Result<PipelineConfig> {
        let _timer = Timer::start("pipeline planning");
        let settings = &self.settings;

        let variables = self.variables(environment, source)?;
        let naming = OutputNamingScheme::for_environment(environment);
        let rules = self.dispatcher(environment)?.into_rules();
        let plugins = PluginAssembler::assemble(&naming, &variables, &settings.assets, report);

        let router = match &settings.proxy {
            Some(routes) => DevServerRouter::new(routes.clone()),
            None => DevServerRouter::default(),
        };

        let config = PipelineConfig {
            environment,
            flags: environment.flags(),
            mode: environment.engine_mode(),
            context: settings.root.join(&settings.context),
            entry: settings.entries.clone(),
            output: OutputSettings {
                path: settings.root.join(&settings.outdir),
                public_path: process_env.public_path.clone(),
                naming,
            },
            resolve: ResolvePolicy::new(&settings.root),
            module: ModuleSettings { rules },
            optimization: OptimizationPolicy::for_environment(environment),
            plugins,
            devtool: SourceMapPolicy::for_environment(environment),
            dev_server: router.config(environment, &settings.host, process_env.port),
        };

        Logger::plan_ready(
            config.module.rules.len(),
            config.chunk_group_count(),
            config.plugins.len(),
        );

        Ok(config)
    }
}

impl Default for PipelineService {
    fn default() -> Self {
        Self::new(ProjectSettings::default())
    }
}
