//! Pipeline orchestration.
//!
//! The pipeline runs the three stages end to end: build (or accept) a world
//! bible, generate prose for each requested scene, and validate the joined
//! story. State is threaded explicitly; the pipeline itself is immutable
//! after construction, so one instance can serve many runs.

use crate::{
    BIBLE_PERSONA, ConsistencyValidator, SCENE_PERSONA, SourceWork, bible_prompt,
    parse_world_bible, scene_prompt,
};
use tintoretto_core::{GenerateRequest, Message};
use tintoretto_error::{BuilderError, TintorettoResult, TransposeError, TransposeErrorKind};
use tintoretto_interface::{
    PipelineResult, RunMetadata, SceneRef, SceneResult, TintorettoDriver, WorldBible,
};

/// Schema version stamped into run metadata.
pub const PIPELINE_VERSION: &str = "1.0.0";

/// How scene numbers in the generated prose are assigned.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SceneNumbering {
    /// Number scenes by their 1-based position in the run.
    #[default]
    Sequential,
    /// Number scenes by their scene number in the source work.
    Source,
}

/// Transposes a source work into a target domain through an LLM driver.
///
/// # Examples
///
/// ```rust,ignore
/// use tintoretto_models::GeminiClient;
/// use tintoretto_transpose::{SourceWork, TranspositionPipeline};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let driver = GeminiClient::new()?;
/// let pipeline = TranspositionPipeline::new(driver, SourceWork::macbeth())?;
///
/// let result = pipeline
///     .run("A 2030 High-Frequency Trading Firm in Manhattan", &[])
///     .await?;
/// println!("{}", result.full_story);
/// # Ok(())
/// # }
/// ```
pub struct TranspositionPipeline<D: TintorettoDriver> {
    driver: D,
    work: SourceWork,
    validator: ConsistencyValidator,
    bible: Option<WorldBible>,
    numbering: SceneNumbering,
    model: Option<String>,
    temperature: Option<f32>,
    max_tokens: Option<u32>,
}

impl<D: TintorettoDriver> TranspositionPipeline<D> {
    /// Create a pipeline for a source work, compiling its validator.
    ///
    /// # Errors
    ///
    /// Returns an error when the work's banned-term list cannot be
    /// compiled into match patterns.
    pub fn new(driver: D, work: SourceWork) -> TintorettoResult<Self> {
        let validator = ConsistencyValidator::new(work.banned_terms())?;
        Ok(Self {
            driver,
            work,
            validator,
            bible: None,
            numbering: SceneNumbering::default(),
            model: None,
            temperature: None,
            max_tokens: None,
        })
    }

    /// Override the model for every request this pipeline sends.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    /// Inject a pre-built bible, skipping the bible-building call on runs.
    ///
    /// Useful for reusing a saved `world_bible.json` across runs, or for
    /// running scenes against a hand-edited bible.
    pub fn with_bible(mut self, bible: WorldBible) -> Self {
        self.bible = Some(bible);
        self
    }

    /// Set how scene numbers are assigned in prompts.
    pub fn with_numbering(mut self, numbering: SceneNumbering) -> Self {
        self.numbering = numbering;
        self
    }

    /// Set the sampling temperature forwarded with every request.
    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }

    /// Set the max output tokens forwarded with every request.
    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = Some(max_tokens);
        self
    }

    /// Get a reference to the underlying driver.
    pub fn driver(&self) -> &D {
        &self.driver
    }

    /// Get the source-work profile this pipeline transposes.
    pub fn work(&self) -> &SourceWork {
        &self.work
    }

    /// Get the compiled banned-term validator.
    pub fn validator(&self) -> &ConsistencyValidator {
        &self.validator
    }

    /// Ask the provider for a world bible mapping the source work into
    /// `context`.
    ///
    /// Never fails: any provider or parse failure logs a warning and
    /// yields a clone of the profile's fallback bible. The result is
    /// always one or the other, never a partial merge.
    #[tracing::instrument(skip_all, fields(context = %context))]
    pub async fn build_bible(&self, context: &str) -> WorldBible {
        match self.request_bible(context).await {
            Ok(bible) => {
                tracing::debug!(
                    characters = bible.characters.len(),
                    objects = bible.objects.len(),
                    "World bible parsed from provider output"
                );
                bible
            }
            Err(e) => {
                tracing::warn!(error = %e, "Could not build world bible, using fallback");
                self.work.fallback_bible().clone()
            }
        }
    }

    async fn request_bible(&self, context: &str) -> TintorettoResult<WorldBible> {
        let request = self.request_for(BIBLE_PERSONA, bible_prompt(&self.work, context))?;
        let response = self.driver.generate(&request).await?;
        parse_world_bible(&response.text)
    }

    /// Generate prose for one scene using the bible injected at
    /// construction.
    ///
    /// # Errors
    ///
    /// Returns a `BibleNotInitialized` error when no bible was injected,
    /// and propagates provider errors.
    pub async fn generate_scene(
        &self,
        beats: &[String],
        scene_number: u32,
    ) -> TintorettoResult<String> {
        let bible = self.bible.as_ref().ok_or_else(|| {
            TransposeError::new(TransposeErrorKind::BibleNotInitialized)
        })?;
        self.generate_scene_with(beats, bible, scene_number).await
    }

    /// Generate prose for one scene against an explicit bible.
    ///
    /// The returned prose is verbatim provider output; nothing is edited
    /// after the fact, so validation findings always refer to real output.
    ///
    /// # Errors
    ///
    /// Propagates provider errors. There is no fallback at this stage.
    #[tracing::instrument(skip_all, fields(scene_number = scene_number, beat_count = beats.len()))]
    pub async fn generate_scene_with(
        &self,
        beats: &[String],
        bible: &WorldBible,
        scene_number: u32,
    ) -> TintorettoResult<String> {
        let body = scene_prompt(bible, beats, scene_number)?;
        let request = self.request_for(SCENE_PERSONA, body)?;
        let response = self.driver.generate(&request).await?;
        tracing::debug!(
            response_length = response.text.len(),
            "Scene prose generated"
        );
        Ok(response.text)
    }

    /// Execute the complete pipeline: bible, scenes, validation.
    ///
    /// An empty `selectors` slice runs the work's default plan. Selectors
    /// are processed in input order, duplicates included, and that order
    /// is mirrored in the result. Scene beats come from the catalog's
    /// total lookup, so unknown selectors transpose the default scene.
    ///
    /// # Errors
    ///
    /// A provider failure during scene generation aborts the run; partial
    /// work is discarded. Bible-building failures do not abort (see
    /// [`Self::build_bible`]).
    #[tracing::instrument(skip_all, fields(context = %context, requested = selectors.len()))]
    pub async fn run(
        &self,
        context: &str,
        selectors: &[SceneRef],
    ) -> TintorettoResult<PipelineResult> {
        let plan: Vec<SceneRef> = if selectors.is_empty() {
            self.work.default_plan().clone()
        } else {
            selectors.to_vec()
        };

        let bible = match &self.bible {
            Some(bible) => {
                tracing::debug!("Using world bible injected at construction");
                bible.clone()
            }
            None => self.build_bible(context).await,
        };

        let mut scenes = Vec::with_capacity(plan.len());
        let mut full_story = String::new();
        for (index, selector) in plan.iter().enumerate() {
            let position = (index + 1) as u32;
            tracing::info!(act = selector.act, scene = selector.scene, "Generating scene");

            let beats = self.work.catalog().lookup(*selector);
            let scene_number = match self.numbering {
                SceneNumbering::Sequential => position,
                SceneNumbering::Source => selector.scene,
            };
            let text = self
                .generate_scene_with(beats, &bible, scene_number)
                .await?;

            full_story.push_str(&format!("\n\n--- SCENE {position} ---\n\n{text}"));
            scenes.push(SceneResult {
                original_act: selector.act,
                original_scene: selector.scene,
                beats: beats.to_vec(),
                generated_text: text,
            });
        }
        let full_story = full_story.trim().to_string();

        let validation = self.validator.check(&full_story);
        if validation.passed {
            tracing::info!("Consistency validation passed");
        } else {
            tracing::warn!(
                violations = validation.violation_count,
                "Consistency validation found banned terms"
            );
        }

        let metadata = RunMetadata {
            pipeline_version: PIPELINE_VERSION.to_string(),
            provider: self.driver.provider_name().to_string(),
            model: self
                .model
                .clone()
                .unwrap_or_else(|| self.driver.model_name().to_string()),
            banned_terms_checked: self.validator.term_count(),
        };

        Ok(PipelineResult {
            context: context.to_string(),
            world_bible: bible,
            scenes,
            full_story,
            validation,
            metadata,
        })
    }

    /// Assemble a request with the persona as system message and the
    /// pipeline's model, temperature, and token settings applied.
    fn request_for(&self, persona: &str, body: String) -> TintorettoResult<GenerateRequest> {
        let mut builder = GenerateRequest::builder();
        builder.messages(vec![Message::system(persona), Message::user(body)]);
        if let Some(model) = &self.model {
            builder.model(model.clone());
        }
        if let Some(temperature) = self.temperature {
            builder.temperature(temperature);
        }
        if let Some(max_tokens) = self.max_tokens {
            builder.max_tokens(max_tokens);
        }
        builder
            .build()
            .map_err(|e| BuilderError::from(e.to_string()).into())
    }
}
