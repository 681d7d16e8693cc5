use crate::core::variables::VariableInjector;
use crate::core::{
    Environment, EnvironmentResolver, InvocationFlags, PipelineConfig, PipelineService,
};
use crate::utils::{
    BuildModeError, CliOverrides, ConfigLoader, DotenvSource, Logger, PlanUI, ProcessEnv, Result,
    CONFIG_FILE,
};
use anyhow::Context;
use clap::{ArgAction, Args, Parser, Subcommand};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "buildmode")]
#[command(about = "Derive the bundler configuration for a development, production or uat build")]
#[command(version)]
pub struct Cli {
    /// Verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Args, Debug, Clone)]
pub struct ModeArgs {
    /// Build mode: development, production or uat
    #[arg(long)]
    pub mode: Option<String>,
    /// Force the uat environment regardless of --mode
    #[arg(
        long,
        action = ArgAction::Set,
        num_args = 0..=1,
        default_value_t = false,
        default_missing_value = "true"
    )]
    pub isuat: bool,
    /// Project root directory
    #[arg(short, long, default_value = ".")]
    pub root: String,
}

#[derive(Args, Debug, Clone)]
pub struct PlanArgs {
    #[command(flatten)]
    pub mode: ModeArgs,
    /// Append the bundle analyzer plugin
    #[arg(
        long,
        action = ArgAction::Set,
        num_args = 0..=1,
        default_value_t = false,
        default_missing_value = "true"
    )]
    pub report: bool,
    /// Output directory, overriding the config file
    #[arg(long)]
    pub outdir: Option<String>,
    /// Write the plan JSON here instead of stdout
    #[arg(short, long)]
    pub out: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Emit the build configuration
    Build(PlanArgs),
    /// Emit the configuration for an interactive development session
    Serve {
        #[command(flatten)]
        plan: PlanArgs,
        /// Dev server host, overriding the config file
        #[arg(long)]
        host: Option<String>,
    },
    /// Show the raw and stringified variable sets
    Env(ModeArgs),
    /// Show the module rule table for a mode
    Info {
        #[arg(long, default_value = "production")]
        mode: String,
    },
    /// Write an example buildmode.config.json
    Init {
        #[arg(short, long, default_value = ".")]
        root: String,
    },
}

pub struct CliHandler;

impl CliHandler {
    pub fn new() -> Self {
        Self
    }

    pub async fn run(&self) -> anyhow::Result<()> {
        let cli = Cli::parse();

        Logger::init(cli.verbose);

        // Read ambient process state once; everything below takes it by parameter
        let process_env = ProcessEnv::capture().context("reading process environment")?;

        match cli.command {
            Commands::Build(args) => {
                let config = self.plan(&args, None, &process_env).await?;
                self.emit(&config, args.out.as_deref()).await
            }
            Commands::Serve { mut plan, host } => {
                if plan.mode.mode.is_none() {
                    plan.mode.mode = Some(Environment::Development.to_string());
                }
                let config = self.plan(&plan, host.as_deref(), &process_env).await?;
                if config.environment != Environment::Development {
                    return Err(BuildModeError::config(format!(
                        "the dev server only runs in development, resolved environment is {}",
                        config.environment
                    ))
                    .into());
                }
                self.emit(&config, plan.out.as_deref()).await
            }
            Commands::Env(args) => self.handle_env_command(&args).await,
            Commands::Info { mode } => Ok(self.handle_info_command(&mode)?),
            Commands::Init { root } => self.handle_init_command(Path::new(&root)).await,
        }
    }

    async fn plan(
        &self,
        args: &PlanArgs,
        host: Option<&str>,
        process_env: &ProcessEnv,
    ) -> anyhow::Result<PipelineConfig> {
        let root = PathBuf::from(&args.mode.root);
        let settings = ConfigLoader::load(
            &root,
            CliOverrides {
                outdir: args.outdir.as_deref(),
                host,
            },
        )
        .with_context(|| format!("loading project settings from {}", root.display()))?;
        let source = DotenvSource::load(&root)
            .await
            .with_context(|| format!("loading variables from {}", root.display()))?;

        let flags = InvocationFlags {
            mode: args.mode.mode.clone(),
            isuat: args.mode.isuat,
            report: args.report,
        };

        let ui = PlanUI::new();
        let config = PipelineService::new(settings).plan(&flags, process_env, &source)?;
        ui.show_plan(&config);

        Ok(config)
    }

    async fn emit(&self, config: &PipelineConfig, out: Option<&Path>) -> anyhow::Result<()> {
        let json = config.to_json()?;

        match out {
            Some(path) => {
                if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                    tokio::fs::create_dir_all(parent).await?;
                }
                tokio::fs::write(path, json)
                    .await
                    .with_context(|| format!("writing plan to {}", path.display()))?;
                Logger::info(&format!("📝 Plan written to {}", path.display()));
            }
            None => println!("{}", json),
        }

        Ok(())
    }

    async fn handle_env_command(&self, args: &ModeArgs) -> anyhow::Result<()> {
        let resolved = EnvironmentResolver::resolve(args.mode.as_deref(), args.isuat)?;
        Logger::environment_resolved(
            resolved.environment.as_str(),
            args.mode.as_deref(),
            resolved.forced_uat,
        );

        let source = DotenvSource::load(Path::new(&args.root))
            .await
            .with_context(|| format!("loading variables from {}", args.root))?;
        let variables = VariableInjector::inject(resolved.environment, &source)?;

        println!("{}", serde_json::to_string_pretty(&variables)?);
        Ok(())
    }

    fn handle_info_command(&self, mode: &str) -> Result<()> {
        let environment: Environment = mode.parse()?;
        let ui = PlanUI::new();
        ui.show_banner();

        let dispatcher = PipelineService::default().dispatcher(environment)?;
        ui.show_rules(dispatcher.rules());
        Ok(())
    }

    async fn handle_init_command(&self, root: &Path) -> anyhow::Result<()> {
        let path = root.join(CONFIG_FILE);
        if tokio::fs::try_exists(&path).await? {
            return Err(BuildModeError::config(format!("{} already exists", path.display())).into());
        }

        tokio::fs::write(&path, ConfigLoader::generate_example()?)
            .await
            .with_context(|| format!("writing {}", path.display()))?;
        Logger::info(&format!("📝 Wrote {}", path.display()));
        Ok(())
    }
}

impl Default for CliHandler {
    fn default() -> Self {
        Self::new()
    }
}
