//! Rendering a resolved prompt into a stored scene asset.

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use tokio_retry2::{Retry, RetryError};
use tracing::{debug, error, info, instrument, warn};
use vignette_config::RetryConfig;
use vignette_core::{RenderRequest, SessionId};
use vignette_error::{ConfigError, RetryableError, VignetteError, VignetteResult};
use vignette_interface::ImageDriver;
use vignette_storage::{AssetReference, AssetStorage};

/// Attempt budget and timing for asset generation.
///
/// The wait after failed attempt `n` (zero based) is `2^n` time units. No
/// wait follows the last attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Attempts per scene before falling back
    pub max_attempts: u32,
    /// Length of one time unit
    pub time_unit: Duration,
    /// Delay between consecutive generation calls, in time units
    pub pacing_units: u32,
}

impl RetryPolicy {
    /// Wait after failed attempt `attempt`.
    ///
    /// ```
    /// use std::time::Duration;
    /// use vignette_engine::RetryPolicy;
    ///
    /// let policy = RetryPolicy::default();
    /// assert_eq!(policy.backoff(0), Duration::from_secs(1));
    /// assert_eq!(policy.backoff(2), Duration::from_secs(4));
    /// ```
    pub fn backoff(&self, attempt: u32) -> Duration {
        self.time_unit.saturating_mul(2u32.saturating_pow(attempt))
    }

    /// Delay before every generation call after the first in a pass.
    pub fn pacing(&self) -> Duration {
        self.time_unit.saturating_mul(self.pacing_units)
    }

    /// Waits between consecutive attempts, one fewer than the attempt budget.
    ///
    /// ```
    /// use std::time::Duration;
    /// use vignette_engine::RetryPolicy;
    ///
    /// let waits: Vec<Duration> = RetryPolicy::default().schedule().collect();
    /// assert_eq!(waits, [Duration::from_secs(1), Duration::from_secs(2)]);
    /// ```
    pub fn schedule(&self) -> impl Iterator<Item = Duration> + use<> {
        let policy = *self;
        (0..self.max_attempts.max(1) - 1).map(move |attempt| policy.backoff(attempt))
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::from(&RetryConfig::default())
    }
}

impl From<&RetryConfig> for RetryPolicy {
    fn from(config: &RetryConfig) -> Self {
        Self {
            max_attempts: config.max_attempts,
            time_unit: config.time_unit(),
            pacing_units: config.pacing_units,
        }
    }
}

/// Outcome of one generation request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedAsset {
    /// Where the asset lives
    pub reference: String,
    /// True when generation gave up and `reference` is the placeholder
    pub fallback: bool,
}

/// Why one render attempt produced no asset.
#[derive(Debug)]
enum AttemptFailure {
    NoImage,
    Failed(VignetteError),
}

impl std::fmt::Display for AttemptFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AttemptFailure::NoImage => write!(f, "provider returned no renderable image"),
            AttemptFailure::Failed(e) => write!(f, "{e}"),
        }
    }
}

/// Renders resolved prompts and stores the resulting images.
///
/// Transient failures are retried; once the budget is spent the fixed
/// fallback reference is returned instead of an error. Only configuration
/// errors reach the caller.
///
/// # Example
///
/// ```no_run
/// use std::sync::Arc;
/// use vignette_core::SessionId;
/// use vignette_engine::AssetGenerator;
/// use vignette_interface::ImageDriver;
/// use vignette_storage::FileSystemStorage;
///
/// # async fn example(driver: Arc<dyn ImageDriver>) -> Result<(), Box<dyn std::error::Error>> {
/// let generator = AssetGenerator::builder()
///     .driver(driver)
///     .storage(Arc::new(FileSystemStorage::new("assets")?))
///     .session(SessionId::new())
///     .fallback_reference("assets/fallback.png")
///     .build()?;
///
/// let asset = generator.generate(1, "A lighthouse at dusk").await?;
/// # Ok(())
/// # }
/// ```
#[derive(Clone, derive_builder::Builder)]
#[builder(pattern = "owned")]
pub struct AssetGenerator {
    /// Image backend
    driver: Arc<dyn ImageDriver>,
    /// Where rendered images are written
    storage: Arc<dyn AssetStorage>,
    /// Session qualifying every stored asset
    session: SessionId,
    /// Attempt budget and timing
    #[builder(default)]
    policy: RetryPolicy,
    /// Placeholder returned when generation gives up
    #[builder(setter(into))]
    fallback_reference: String,
    /// MIME type used when the provider omits one
    #[builder(setter(into), default = "\"image/png\".to_string()")]
    default_mime: String,
}

impl std::fmt::Debug for AssetGenerator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AssetGenerator")
            .field("provider", &self.driver.provider_name())
            .field("model", &self.driver.model_name())
            .field("session", &self.session)
            .field("policy", &self.policy)
            .field("fallback_reference", &self.fallback_reference)
            .finish_non_exhaustive()
    }
}

impl AssetGenerator {
    /// Creates a new builder for `AssetGenerator`.
    pub fn builder() -> AssetGeneratorBuilder {
        AssetGeneratorBuilder::default()
    }

    /// Session this generator stores assets under.
    pub fn session(&self) -> &SessionId {
        &self.session
    }

    /// Attempt budget and timing.
    pub fn policy(&self) -> &RetryPolicy {
        &self.policy
    }

    /// Check that the fallback placeholder is present in storage.
    ///
    /// # Errors
    ///
    /// Returns a configuration error when the placeholder is missing.
    #[instrument(skip(self), fields(fallback = %self.fallback_reference))]
    pub async fn verify_fallback(&self) -> VignetteResult<()> {
        if self.storage.exists(&self.fallback_reference).await? {
            debug!("Fallback placeholder present");
            return Ok(());
        }
        Err(ConfigError::missing_file(
            "fallback reference",
            Path::new(&self.fallback_reference),
        )
        .into())
    }

    /// True when a previously stored asset can still be served.
    ///
    /// Storage failures count as missing.
    pub async fn asset_exists(&self, reference: &str) -> bool {
        match self.storage.exists(reference).await {
            Ok(present) => present,
            Err(e) => {
                warn!(reference, error = %e, "Could not check stored asset");
                false
            }
        }
    }

    /// Render `resolved_prompt` for `scene_id` and store the image.
    ///
    /// Each attempt runs under [`Retry::spawn`] with the policy's schedule.
    /// Empty renders and retryable errors are transient; anything else ends
    /// the retries at once.
    ///
    /// # Errors
    ///
    /// Returns an error only for configuration failures such as missing or
    /// rejected credentials. Every other failure ends in the fallback
    /// reference.
    #[instrument(skip(self, resolved_prompt), fields(session = %self.session, prompt_len = resolved_prompt.len()))]
    pub async fn generate(
        &self,
        scene_id: u32,
        resolved_prompt: &str,
    ) -> VignetteResult<GeneratedAsset> {
        let mut attempt = 0u32;

        let outcome = Retry::spawn(self.policy.schedule(), || {
            let current = attempt;
            attempt += 1;
            async move {
                match self.attempt(scene_id, resolved_prompt).await {
                    Ok(Some(reference)) => Ok(reference),
                    Ok(None) => {
                        warn!(
                            scene_id,
                            attempt = current,
                            "Provider returned no renderable image"
                        );
                        Err(RetryError::Transient {
                            err: AttemptFailure::NoImage,
                            retry_after: None,
                        })
                    }
                    Err(e) if e.is_configuration() => {
                        Err(RetryError::Permanent(AttemptFailure::Failed(e)))
                    }
                    Err(e) if e.is_retryable() => {
                        warn!(
                            scene_id,
                            attempt = current,
                            error = %e,
                            "Transient generation failure, will retry"
                        );
                        Err(RetryError::Transient {
                            err: AttemptFailure::Failed(e),
                            retry_after: None,
                        })
                    }
                    Err(e) => {
                        warn!(
                            scene_id,
                            attempt = current,
                            error = %e,
                            "Permanent generation failure"
                        );
                        Err(RetryError::Permanent(AttemptFailure::Failed(e)))
                    }
                }
            }
        })
        .await;

        match outcome {
            Ok(reference) => {
                info!(
                    scene_id,
                    attempts = attempt,
                    hash = %reference.content_hash,
                    path = %reference.storage_path,
                    "Generated scene asset"
                );
                Ok(GeneratedAsset {
                    reference: reference.storage_path,
                    fallback: false,
                })
            }
            Err(AttemptFailure::Failed(e)) if e.is_configuration() => {
                error!(scene_id, error = %e, "Asset generation misconfigured");
                Err(e)
            }
            Err(last) => {
                warn!(
                    scene_id,
                    attempts = attempt,
                    error = %last,
                    "Generation gave up, using fallback"
                );
                Ok(self.fallback_asset())
            }
        }
    }

    /// One render plus store. `Ok(None)` means nothing usable came back.
    async fn attempt(
        &self,
        scene_id: u32,
        resolved_prompt: &str,
    ) -> VignetteResult<Option<AssetReference>> {
        let request = RenderRequest::new(resolved_prompt);
        let image = match self.driver.render(&request).await? {
            Some(image) if !image.is_empty() => image,
            _ => return Ok(None),
        };

        let mime_type = if image.mime_type.trim().is_empty() {
            self.default_mime.as_str()
        } else {
            image.mime_type.as_str()
        };

        let reference = self
            .storage
            .store(&self.session, scene_id, &image.data, mime_type)
            .await?;
        Ok(Some(reference))
    }

    fn fallback_asset(&self) -> GeneratedAsset {
        GeneratedAsset {
            reference: self.fallback_reference.clone(),
            fallback: true,
        }
    }
}
