//! Name-recognizer seam
//!
//! Person names are not extracted by patterns: they come from an external
//! named-entity recognizer. The recognizer typically loads a language model,
//! which is expensive, so it sits behind [`RecognizerHandle`]: a factory is
//! registered once and the model is built on first use, exactly once per
//! process, even under concurrent first calls. The handle is constructed
//! explicitly and passed into the detection engine; there is no hidden
//! global.

use crate::config::ExclusionConfig;
use std::sync::{Arc, OnceLock};

/// External named-entity recognition service
///
/// Implementations must be safe for concurrent read-only use across
/// documents once constructed.
pub trait NameRecognizer: Send + Sync {
    /// Person-name spans found in `text`, in order of appearance
    fn person_names(&self, text: &str) -> anyhow::Result<Vec<String>>;
}

/// A recognizer that never yields candidates
///
/// Used when no language model is wired in: the rest of the pipeline runs
/// unchanged and the person-name bucket stays empty.
#[derive(Debug, Default)]
pub struct NoopRecognizer;

impl NameRecognizer for NoopRecognizer {
    fn person_names(&self, _text: &str) -> anyhow::Result<Vec<String>> {
        Ok(Vec::new())
    }
}

type RecognizerFactory =
    Box<dyn Fn() -> anyhow::Result<Arc<dyn NameRecognizer>> + Send + Sync>;

/// One-time-initialized handle to the recognizer service
///
/// The factory runs at most once per handle; concurrent first callers all
/// observe the same outcome. Initialization failure is remembered and
/// surfaced on every subsequent call instead of being retried.
pub struct RecognizerHandle {
    factory: RecognizerFactory,
    cell: OnceLock<Result<Arc<dyn NameRecognizer>, String>>,
}

impl RecognizerHandle {
    /// Create a handle from a factory invoked lazily on first use
    pub fn new<F>(factory: F) -> Self
    where
        F: Fn() -> anyhow::Result<Arc<dyn NameRecognizer>> + Send + Sync + 'static,
    {
        Self {
            factory: Box::new(factory),
            cell: OnceLock::new(),
        }
    }

    /// Create a handle around an already-constructed recognizer
    pub fn from_recognizer(recognizer: Arc<dyn NameRecognizer>) -> Self {
        let handle = Self::new(move || Ok(recognizer.clone()));
        let _ = handle.recognizer();
        handle
    }

    /// The recognizer, initializing it on first call
    pub fn recognizer(&self) -> Result<Arc<dyn NameRecognizer>, String> {
        self.cell
            .get_or_init(|| {
                tracing::debug!("Initializing name recognizer");
                (self.factory)().map_err(|e| e.to_string())
            })
            .clone()
    }
}

impl std::fmt::Debug for RecognizerHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RecognizerHandle")
            .field("initialized", &self.cell.get().is_some())
            .finish()
    }
}

/// Placeholder phrases that recognizers commonly mislabel as person names
const PLACEHOLDER_PHRASES: [&str; 8] = [
    "mr x",
    "monsieur x",
    "madame x",
    "mme x",
    "nom prénom",
    "prénom nom",
    "john doe",
    "jane doe",
];

/// Pre-filter applied to recognizer candidates before scoring
///
/// Known staff names, organizational units, and generic placeholder phrases
/// never enter the scoring pipeline.
pub(crate) struct IgnoreList {
    terms: Vec<String>,
}

impl IgnoreList {
    pub(crate) fn from_config(config: &ExclusionConfig) -> Self {
        let mut terms: Vec<String> = config
            .excluded_persons
            .iter()
            .chain(config.organization_units.iter())
            .map(|t| t.to_lowercase())
            .collect();
        terms.extend(PLACEHOLDER_PHRASES.iter().map(|p| p.to_string()));
        Self { terms }
    }

    pub(crate) fn is_ignored(&self, candidate: &str) -> bool {
        let candidate = candidate.trim().to_lowercase();
        self.terms.iter().any(|term| *term == candidate)
    }
}
