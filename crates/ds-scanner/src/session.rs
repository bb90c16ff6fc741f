//! Assembles a [`ScanSession`] from analyzed records and the registry.

use std::time::{SystemTime, UNIX_EPOCH};

use ds_core::{ColorStyles, ComponentRecord, DesignToken, ScanSession, TextStyleSummary};

use crate::registry::StyleRegistry;

/// Milliseconds since the Unix epoch; zero if the clock is before it.
#[must_use]
pub fn epoch_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |elapsed| elapsed.as_millis() as u64)
}

/// Builder for [`ScanSession`].
///
/// Catalogues left empty are serialized as `null`.
///
/// # Examples
///
/// ```
/// use ds_core::ComponentRecord;
/// use ds_scanner::ScanSessionBuilder;
///
/// let session = ScanSessionBuilder::new("2.1.0")
///     .with_scan_time(1_700_000_000_000)
///     .with_component(ComponentRecord::basic("1:1", "Button", "button", 0.95))
///     .build();
///
/// assert_eq!(session.components().len(), 1);
/// assert!(session.color_styles().is_none());
/// ```
#[derive(Debug, Clone, Default)]
pub struct ScanSessionBuilder {
    components: Vec<ComponentRecord>,
    color_styles: ColorStyles,
    text_styles: Vec<TextStyleSummary>,
    design_tokens: Vec<DesignToken>,
    scan_time: Option<u64>,
    version: String,
    file_key: Option<String>,
}

impl ScanSessionBuilder {
    /// Starts a session with the given schema version.
    #[must_use]
    pub fn new(version: impl Into<String>) -> Self {
        Self {
            version: version.into(),
            ..Self::default()
        }
    }

    /// Copies the style and token catalogues from `registry`.
    #[must_use]
    pub fn with_registry(mut self, registry: &StyleRegistry) -> Self {
        self.color_styles = registry.color_styles().clone();
        self.text_styles = registry.text_summaries().to_vec();
        self.design_tokens = registry.design_tokens().to_vec();
        self
    }

    /// Appends one component record.
    #[must_use]
    pub fn with_component(mut self, record: ComponentRecord) -> Self {
        self.components.push(record);
        self
    }

    /// Appends component records in order.
    #[must_use]
    pub fn with_components(mut self, records: impl IntoIterator<Item = ComponentRecord>) -> Self {
        self.components.extend(records);
        self
    }

    /// Sets the host file key.
    #[must_use]
    pub fn with_file_key(mut self, file_key: Option<String>) -> Self {
        self.file_key = file_key;
        self
    }

    /// Pins the scan time instead of reading the clock at build time.
    #[must_use]
    pub const fn with_scan_time(mut self, epoch_ms: u64) -> Self {
        self.scan_time = Some(epoch_ms);
        self
    }

    /// Builds the session.
    #[must_use]
    pub fn build(self) -> ScanSession {
        ScanSession::new(
            self.components,
            (!self.color_styles.is_empty()).then_some(self.color_styles),
            (!self.text_styles.is_empty()).then_some(self.text_styles),
            (!self.design_tokens.is_empty()).then_some(self.design_tokens),
            self.scan_time.unwrap_or_else(epoch_millis),
            self.version,
            self.file_key,
        )
    }
}
