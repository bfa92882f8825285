//! Render template use case

use std::path::PathBuf;

use stencil_domain::delimiter::DelimiterSpec;
use stencil_domain::lookup::{ChainLookup, PrefixLookup};
use stencil_domain::store::{LayeredStore, RecordStore, StoreLayer, StoreScope, VariableMap};
use tracing::{debug, warn};

use crate::error::{ApplicationError, ApplicationResult};
use crate::ports::StoreRepository;
use crate::substitutor::{SubstitutionReport, Substitutor};

/// A structured record whose fields are addressed under a key prefix.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordSource {
    /// Key prefix routed to this record (e.g. `.input`).
    pub scope: String,

    /// Path to the record document.
    pub path: PathBuf,
}

impl RecordSource {
    /// Creates a new record source.
    pub fn new(scope: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self {
            scope: scope.into(),
            path: path.into(),
        }
    }
}

/// Input for rendering one template.
#[derive(Debug, Clone, Default)]
pub struct RenderInput {
    /// Placeholder syntax.
    pub spec: DelimiterSpec,

    /// Store documents, lowest priority first.
    pub variable_files: Vec<PathBuf>,

    /// Records addressed by prefix; they are consulted before the variables.
    pub records: Vec<RecordSource>,

    /// Environment variables, already stripped of their prefix.
    pub environment: VariableMap,

    /// Explicit `KEY=VALUE` pairs (highest priority).
    pub overrides: Vec<(String, String)>,

    /// Fail when a placeholder has neither a value nor a default.
    pub strict: bool,
}

/// Output containing the rendered text and its report.
#[derive(Debug, Clone)]
pub struct RenderOutput {
    /// What happened to each placeholder.
    pub report: SubstitutionReport,
}

impl RenderOutput {
    /// The rendered text.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.report.output
    }
}

/// Loads the configured stores and substitutes a template against them.
pub struct RenderTemplate<R> {
    repository: R,
}

impl<R: StoreRepository> RenderTemplate<R> {
    /// Creates a new `RenderTemplate` use case.
    pub const fn new(repository: R) -> Self {
        Self { repository }
    }

    /// Builds the lookup described by `input`.
    ///
    /// Records come first, each behind its prefix, followed by one layered
    /// store holding files, environment and overrides.
    ///
    /// # Errors
    /// Returns an error if a store document cannot be loaded.
    pub async fn build_lookup(&self, input: &RenderInput) -> ApplicationResult<ChainLookup> {
        let mut store = LayeredStore::new();

        for path in &input.variable_files {
            let variables = self.repository.load_variables(path).await?;
            debug!(path = %path.display(), count = variables.len(), "loaded variables");
            store.push_layer(StoreLayer::new(
                path.display().to_string(),
                StoreScope::File,
                variables,
            ));
        }

        if !input.environment.is_empty() {
            store.push_layer(StoreLayer::new(
                "env",
                StoreScope::Environment,
                input.environment.clone(),
            ));
        }

        if !input.overrides.is_empty() {
            store.push_layer(StoreLayer::from_pairs(
                "overrides",
                StoreScope::Override,
                input.overrides.iter().cloned(),
            ));
        }

        let mut lookup = ChainLookup::new();
        for record in &input.records {
            let value = self.repository.load_record(&record.path).await?;
            debug!(scope = %record.scope, path = %record.path.display(), "loaded record");
            lookup.push(PrefixLookup::new(record.scope.clone(), RecordStore::new(value)));
        }
        lookup.push(store);

        Ok(lookup)
    }

    /// Executes the use case.
    ///
    /// # Arguments
    /// * `input` - Stores and options to render with
    /// * `text` - The template text
    ///
    /// # Errors
    /// Returns an error if a store cannot be loaded, or in strict mode if a
    /// placeholder stays unresolved.
    pub async fn execute(
        &self,
        input: &RenderInput,
        text: &str,
    ) -> ApplicationResult<RenderOutput> {
        let lookup = self.build_lookup(input).await?;
        let substitutor = Substitutor::new(input.spec.clone(), lookup);
        let report = substitutor.substitute(text);

        if input.strict && !report.is_complete() {
            warn!(keys = ?report.unresolved, "unresolved placeholders");
            return Err(ApplicationError::Unresolved(report.unresolved));
        }

        Ok(RenderOutput { report })
    }
}
