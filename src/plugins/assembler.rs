use crate::core::interfaces::VariableMap;
use crate::core::output::OutputNamingScheme;
use crate::core::variables::VariableSet;
use crate::utils::Logger;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CopyPattern {
    pub from: String,
    pub to: String,
}

/// Plugin descriptor; the engine owns the implementation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "plugin", rename_all = "kebab-case")]
pub enum PluginDescriptor {
    /// Abort output when any transform step fails
    NoEmitOnErrors,
    #[serde(rename_all = "camelCase")]
    HtmlShell {
        template: String,
        collapse_whitespace: bool,
        variables: VariableMap,
    },
    #[serde(rename_all = "camelCase")]
    CssExtract {
        filename: String,
        chunk_filename: String,
    },
    Define {
        definitions: VariableMap,
    },
    CopyAssets {
        patterns: Vec<CopyPattern>,
    },
    BundleAnalyzer,
}

impl PluginDescriptor {
    pub fn name(&self) -> &'static str {
        match self {
            PluginDescriptor::NoEmitOnErrors => "no-emit-on-errors",
            PluginDescriptor::HtmlShell { .. } => "html-shell",
            PluginDescriptor::CssExtract { .. } => "css-extract",
            PluginDescriptor::Define { .. } => "define",
            PluginDescriptor::CopyAssets { .. } => "copy-assets",
            PluginDescriptor::BundleAnalyzer => "bundle-analyzer",
        }
    }
}

/// Project-level inputs for the HTML shell and asset copier
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetOptions {
    pub template: String,
    pub assets_dir: String,
}

impl Default for AssetOptions {
    fn default() -> Self {
        Self {
            template: "./index.ejs".to_string(),
            assets_dir: "./assets".to_string(),
        }
    }
}

pub struct PluginAssembler;

impl PluginAssembler {
    /// Ordered plugin list. The analyzer is appended only when `report`
    /// is explicitly true.
    pub fn assemble(
        naming: &OutputNamingScheme,
        variables: &VariableSet,
        assets: &AssetOptions,
        report: bool,
    ) -> Vec<PluginDescriptor> {
        let mut plugins = vec![
            PluginDescriptor::NoEmitOnErrors,
            PluginDescriptor::HtmlShell {
                template: assets.template.clone(),
                collapse_whitespace: true,
                variables: variables.raw.clone(),
            },
            PluginDescriptor::CssExtract {
                filename: naming.css_filename.clone(),
                chunk_filename: naming.css_chunk_filename.clone(),
            },
            PluginDescriptor::Define {
                definitions: variables.define_table(),
            },
            PluginDescriptor::CopyAssets {
                patterns: vec![CopyPattern {
                    from: assets.assets_dir.clone(),
                    to: assets.assets_dir.clone(),
                }],
            },
        ];

        if report {
            Logger::analyzer_enabled();
            plugins.push(PluginDescriptor::BundleAnalyzer);
        }

        plugins
    }
}
