//! Generation context for the pipeline.
//!
//! Everything one run needs, assembled with [`GenerationContextBuilder`].

use std::fmt;
use std::path::PathBuf;

use codegen::GoSettings;
use config::Config;

use crate::formatter::{formatter_for, NoopFormatter, SourceFormatter};
use crate::PipelineError;

/// Context containing all settings of one generator run
pub struct GenerationContext {
    /// Schema root, one sub-directory per api
    pub schema_dir: PathBuf,
    /// Output root, one sub-directory per api
    pub output_dir: PathBuf,
    /// Emission settings
    pub settings: GoSettings,
    /// Layout of timestamps that do not name one
    pub default_layout: String,
    /// Post-processing applied to each file before it is committed
    pub formatter: Box<dyn SourceFormatter>,
    /// Render and report, write nothing
    pub dry_run: bool,
}

impl fmt::Debug for GenerationContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GenerationContext")
            .field("schema_dir", &self.schema_dir)
            .field("output_dir", &self.output_dir)
            .field("default_layout", &self.default_layout)
            .field("formatter", &self.formatter.name())
            .field("dry_run", &self.dry_run)
            .finish()
    }
}

impl GenerationContext {
    /// Create a new builder for GenerationContext
    pub fn builder() -> GenerationContextBuilder { GenerationContextBuilder::default() }

    /// A builder pre-filled from `config`; command-line overrides are applied on top.
    pub fn from_config(config: &Config) -> GenerationContextBuilder {
        GenerationContextBuilder::default()
            .schema_dir(config.schema.dir.clone())
            .output_dir(config.output.dir.clone())
            .settings(config.go_settings())
            .default_layout(config.go.default_layout.clone())
            .formatter(formatter_for(config.output.formatter))
    }
}

/// Builder for GenerationContext
#[derive(Default)]
pub struct GenerationContextBuilder {
    schema_dir: Option<PathBuf>,
    output_dir: Option<PathBuf>,
    settings: Option<GoSettings>,
    default_layout: Option<String>,
    formatter: Option<Box<dyn SourceFormatter>>,
    dry_run: bool,
}

impl GenerationContextBuilder {
    /// Set the schema root
    pub fn schema_dir(mut self, dir: PathBuf) -> Self {
        self.schema_dir = Some(dir);
        self
    }

    /// Set the output root
    pub fn output_dir(mut self, dir: PathBuf) -> Self {
        self.output_dir = Some(dir);
        self
    }

    /// Set the emission settings
    pub fn settings(mut self, settings: GoSettings) -> Self {
        self.settings = Some(settings);
        self
    }

    /// Set the default timestamp layout
    pub fn default_layout(mut self, layout: String) -> Self {
        self.default_layout = Some(layout);
        self
    }

    /// Set the formatter
    pub fn formatter(mut self, formatter: Box<dyn SourceFormatter>) -> Self {
        self.formatter = Some(formatter);
        self
    }

    /// Render without writing
    pub fn dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// Build the GenerationContext
    pub fn build(self) -> Result<GenerationContext, PipelineError> {
        Ok(GenerationContext {
            schema_dir: self
                .schema_dir
                .ok_or_else(|| PipelineError::Message("schema_dir is required".to_string()))?,
            output_dir: self
                .output_dir
                .ok_or_else(|| PipelineError::Message("output_dir is required".to_string()))?,
            settings: self.settings.unwrap_or_default(),
            default_layout: self
                .default_layout
                .unwrap_or_else(|| ir::DEFAULT_DATETIME_LAYOUT.to_string()),
            formatter: self.formatter.unwrap_or_else(|| Box::new(NoopFormatter)),
            dry_run: self.dry_run,
        })
    }
}
