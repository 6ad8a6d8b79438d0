// Response fidelity settings and their scoping rules
use crate::domain::error::{ClientError, ClientResult};
use serde::Deserialize;
use std::fmt;
use std::future::Future;
use std::str::FromStr;
use std::sync::{PoisonError, RwLock};

/// How much post-processing is applied to a response before it is returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize)]
#[serde(try_from = "String")]
pub enum FidelityLevel {
    /// The untouched transport response
    Raw,
    /// The decoded JSON body, no endpoint-specific shaping
    Body,
    /// The endpoint-specific normalized structure
    #[default]
    Best,
}

impl FidelityLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            FidelityLevel::Raw => "raw",
            FidelityLevel::Body => "body",
            FidelityLevel::Best => "best",
        }
    }
}

impl fmt::Display for FidelityLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FidelityLevel {
    type Err = ClientError;

    fn from_str(s: &str) -> ClientResult<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "raw" => Ok(FidelityLevel::Raw),
            "body" => Ok(FidelityLevel::Body),
            "best" => Ok(FidelityLevel::Best),
            other => Err(ClientError::configuration(format!(
                "unknown fidelity level '{}', expected one of raw, body, best",
                other
            ))),
        }
    }
}

impl TryFrom<String> for FidelityLevel {
    type Error = ClientError;

    fn try_from(value: String) -> ClientResult<Self> {
        value.parse()
    }
}

/// The two knobs that shape every response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Settings {
    pub fidelity: FidelityLevel,
    /// Convert query timestamps from epoch seconds into `DateTime<Utc>`.
    /// Ignored at `Raw` fidelity.
    pub convert: bool,
}

impl Settings {
    pub const DEFAULT: Settings = Settings {
        fidelity: FidelityLevel::Best,
        convert: true,
    };

    pub fn new(fidelity: FidelityLevel, convert: bool) -> Self {
        Self { fidelity, convert }
    }

    pub fn with_fidelity(self, fidelity: FidelityLevel) -> Self {
        Self { fidelity, ..self }
    }

    pub fn with_convert(self, convert: bool) -> Self {
        Self { convert, ..self }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self::DEFAULT
    }
}

static GLOBAL: RwLock<Settings> = RwLock::new(Settings::DEFAULT);

tokio::task_local! {
    static SCOPED: Settings;
}

/// Process-wide default, used when neither a scope nor the client pins settings
pub fn global() -> Settings {
    *GLOBAL.read().unwrap_or_else(PoisonError::into_inner)
}

pub fn set_global(settings: Settings) {
    *GLOBAL.write().unwrap_or_else(PoisonError::into_inner) = settings;
    tracing::debug!(
        "Global settings now fidelity={} convert={}",
        settings.fidelity,
        settings.convert
    );
}

/// Run `future` with `settings` in effect for every request it completes.
///
/// The override is bound to the future itself, so it ends when the future
/// finishes or is dropped and is never visible to other tasks.
pub async fn scoped<F: Future>(settings: Settings, future: F) -> F::Output {
    SCOPED.scope(settings, future).await
}

/// The innermost scoped override, if any
pub fn scoped_override() -> Option<Settings> {
    SCOPED.try_with(|settings| *settings).ok()
}

/// Settings in effect right now: scoped override, then `pinned`, then global.
pub fn resolve(pinned: Option<Settings>) -> Settings {
    scoped_override()
        .or(pinned)
        .unwrap_or_else(global)
}
