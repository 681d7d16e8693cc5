// Build-lifecycle plugins handed to the engine

pub mod assembler;

pub use assembler::{AssetOptions, CopyPattern, PluginAssembler, PluginDescriptor};
