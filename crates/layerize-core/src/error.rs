//! Error and warning types for the conversion pipeline.
//!
//! Provides [`ConvertError`] for fatal errors that stop conversion,
//! [`ConvertWarning`] for non-fatal anomalies that allow best-effort
//! continuation, [`ConvertOutcome`] for pairing a value with collected
//! warnings, and [`ConvertOptions`] for configuring the pipeline.

use std::fmt;

/// Fatal error types for layer conversion.
///
/// Per-element extraction problems never surface here — a malformed style
/// simply contributes less data. Fatal errors indicate broken input
/// plumbing or a violated structural invariant.
#[derive(Debug, Clone, PartialEq)]
pub enum ConvertError {
    /// Hierarchy reconstruction did not converge within the pass ceiling.
    ///
    /// This signals a snapshot/layer correspondence bug, not bad input;
    /// the conversion aborts rather than emitting a half-nested tree.
    NestingDiverged {
        /// The configured pass ceiling that was exceeded.
        passes: usize,
    },
    /// The root selector matched no element in the snapshot.
    MissingRoot(String),
    /// The snapshot could not be read or decoded.
    Snapshot(String),
    /// I/O error reading input.
    Io(String),
    /// Any other error not covered by specific variants.
    Other(String),
}

impl fmt::Display for ConvertError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConvertError::NestingDiverged { passes } => write!(
                f,
                "hierarchy reconstruction did not converge within {passes} passes \
                 (internal invariant violation)"
            ),
            ConvertError::MissingRoot(selector) => {
                write!(f, "root selector matched no element: {selector:?}")
            }
            ConvertError::Snapshot(msg) => write!(f, "snapshot error: {msg}"),
            ConvertError::Io(msg) => write!(f, "I/O error: {msg}"),
            ConvertError::Other(msg) => write!(f, "{msg}"),
        }
    }
}

impl std::error::Error for ConvertError {}

impl From<std::io::Error> for ConvertError {
    fn from(err: std::io::Error) -> Self {
        ConvertError::Io(err.to_string())
    }
}

/// Machine-readable warning code for categorizing conversion anomalies.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(tag = "type", content = "detail")
)]
pub enum ConvertWarningCode {
    /// A layer mapped from a source ancestor could not be located in its
    /// claimed parent's children during reconstruction.
    MissingParent,
    /// A style value was present but failed to parse.
    MalformedStyle,
    /// An element or text run was skipped for being under 1×1 pixel.
    DegenerateBox,
    /// Any other warning not covered by specific variants.
    Other(String),
}

impl ConvertWarningCode {
    /// Returns the string tag for this warning code.
    pub fn as_str(&self) -> &str {
        match self {
            ConvertWarningCode::MissingParent => "MISSING_PARENT",
            ConvertWarningCode::MalformedStyle => "MALFORMED_STYLE",
            ConvertWarningCode::DegenerateBox => "DEGENERATE_BOX",
            ConvertWarningCode::Other(_) => "OTHER",
        }
    }
}

impl fmt::Display for ConvertWarningCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A non-fatal anomaly encountered during conversion.
///
/// Warnings allow best-effort continuation: the offending element simply
/// contributes less data, or the affected layer stays where it is for the
/// current reconstruction pass.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ConvertWarning {
    /// Machine-readable warning code.
    pub code: ConvertWarningCode,
    /// Human-readable description of the warning.
    pub description: String,
    /// Element context (e.g., a tag name), if applicable.
    pub element: Option<String>,
    /// Index of the source snapshot node, if applicable.
    pub node: Option<usize>,
}

impl ConvertWarning {
    /// Create a warning with just a description.
    ///
    /// Uses [`ConvertWarningCode::Other`] as the default code.
    pub fn new(description: impl Into<String>) -> Self {
        let desc = description.into();
        Self {
            code: ConvertWarningCode::Other(desc.clone()),
            description: desc,
            element: None,
            node: None,
        }
    }

    /// Create a warning with a specific code and description.
    pub fn with_code(code: ConvertWarningCode, description: impl Into<String>) -> Self {
        Self {
            code,
            description: description.into(),
            element: None,
            node: None,
        }
    }

    /// Attach element context (builder pattern).
    pub fn on_element(mut self, element: impl Into<String>) -> Self {
        self.element = Some(element.into());
        self
    }

    /// Attach the source node index (builder pattern).
    pub fn at_node(mut self, node: usize) -> Self {
        self.node = Some(node);
        self
    }
}

impl fmt::Display for ConvertWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.code, self.description)?;
        if let Some(ref element) = self.element {
            write!(f, " [{element}]")?;
        }
        if let Some(node) = self.node {
            write!(f, " (node #{node})")?;
        }
        Ok(())
    }
}

/// Result wrapper that pairs a value with collected warnings.
#[derive(Debug, Clone)]
pub struct ConvertOutcome<T> {
    /// The converted value.
    pub value: T,
    /// Warnings collected during conversion.
    pub warnings: Vec<ConvertWarning>,
}

impl<T> ConvertOutcome<T> {
    /// Create an outcome with no warnings.
    pub fn ok(value: T) -> Self {
        Self {
            value,
            warnings: Vec::new(),
        }
    }

    /// Create an outcome with warnings.
    pub fn with_warnings(value: T, warnings: Vec<ConvertWarning>) -> Self {
        Self { value, warnings }
    }

    /// Returns true if there are no warnings.
    pub fn is_clean(&self) -> bool {
        self.warnings.is_empty()
    }

    /// Transform the value while preserving warnings.
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> ConvertOutcome<U> {
        ConvertOutcome {
            value: f(self.value),
            warnings: self.warnings,
        }
    }
}

/// Output shape selection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "SCREAMING_SNAKE_CASE")
)]
pub enum OutputMode {
    /// Siblings at top level, in emission order, absolute coordinates.
    #[default]
    Flat,
    /// Root frame with the full reconstructed hierarchy, parent-relative
    /// coordinates.
    Nested,
}

/// Options controlling conversion behavior.
#[derive(Debug, Clone)]
pub struct ConvertOptions {
    /// Root selector (`"tag"`, `"#id"`, or `".class"`); `None` converts
    /// from the snapshot root.
    pub selector: Option<String>,
    /// Flat or nested output (default: flat).
    pub mode: OutputMode,
    /// Hierarchy reconstruction pass ceiling (default: 10 000). Exceeding
    /// it is a fatal [`ConvertError::NestingDiverged`].
    pub max_nesting_passes: usize,
    /// Whether to collect warnings during conversion (default: true).
    pub collect_warnings: bool,
}

impl Default for ConvertOptions {
    fn default() -> Self {
        Self {
            selector: None,
            mode: OutputMode::Flat,
            max_nesting_passes: 10_000,
            collect_warnings: true,
        }
    }
}

impl ConvertOptions {
    /// Options producing the nested tree output.
    pub fn nested() -> Self {
        Self {
            mode: OutputMode::Nested,
            ..Self::default()
        }
    }
}
