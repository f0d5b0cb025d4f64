//! Reading orchestration: draw, attach image paths, optionally narrate.

use arcana_engine::{DeckType, DrawEngine, DrawError, DrawRequest, DrawnCard, SeedInput};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::assets::{AssetResolver, ImageExt};
use crate::prompt::build_prompt;
use crate::{NarrationOptions, NarrationRequest, Narrator};

/// Shown when a narrator answers with blank text.
pub const EMPTY_NARRATION_FALLBACK: &str = "The reader offered no commentary on these cards...";

#[derive(Debug, Clone, PartialEq)]
pub struct ReadingRequest {
    pub num_cards: usize,
    pub spread: Option<String>,
    pub seed: SeedInput,
    pub orientation_prob: f64,
    /// Validated by the engine; only `rws` is accepted.
    pub deck_type: String,
    pub question: Option<String>,
    pub explain_with_llm: bool,
    pub narration: NarrationOptions,
    pub image_ext: ImageExt,
}

impl ReadingRequest {
    pub fn new(num_cards: usize) -> Self {
        Self {
            num_cards,
            spread: None,
            seed: SeedInput::Unseeded,
            orientation_prob: arcana_engine::draw::DEFAULT_ORIENTATION_PROB,
            deck_type: DeckType::default().as_str().to_string(),
            question: None,
            explain_with_llm: false,
            narration: NarrationOptions::default(),
            image_ext: ImageExt::default(),
        }
    }

    fn draw_request(&self) -> DrawRequest {
        DrawRequest {
            count: self.num_cards,
            spread: self.spread.clone(),
            seed: self.seed.clone(),
            orientation_prob: self.orientation_prob,
            deck_type: self.deck_type.clone(),
        }
    }

    fn question(&self) -> Option<&str> {
        self.question
            .as_deref()
            .map(str::trim)
            .filter(|q| !q.is_empty())
    }
}

/// A drawn card plus the conventional path of its image.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReadingCard {
    #[serde(flatten)]
    pub card: DrawnCard,
    pub image_path: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReadingMeta {
    pub seed: Option<u64>,
    pub spread: Option<String>,
    pub deck_type: DeckType,
    pub orientation_prob: f64,
    pub question: Option<String>,
    pub explain_with_llm: bool,
}

/// Narrative outcome, kept apart from the cards so a narrator failure never
/// touches the draw.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LlmOutcome {
    pub prompt: Option<String>,
    pub response_text: Option<String>,
    pub error: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reading {
    pub meta: ReadingMeta,
    pub cards: Vec<ReadingCard>,
    pub llm: LlmOutcome,
}

/// Ties the draw engine to asset paths and an optional narrator.
///
/// ```
/// use arcana_oracle::{Oracle, ReadingRequest};
///
/// let oracle = Oracle::standard();
/// let mut req = ReadingRequest::new(3);
/// req.spread = Some("three_card".into());
/// req.seed = "demo-seed".into();
///
/// let reading = oracle.perform_reading(&req).unwrap();
/// assert_eq!(reading.cards.len(), 3);
/// assert!(reading.cards[0].image_path.ends_with(".png"));
/// assert!(reading.llm.prompt.is_none());
/// ```
pub struct Oracle {
    engine: DrawEngine<'static>,
    assets: AssetResolver,
    narrator: Option<Box<dyn Narrator>>,
}

impl std::fmt::Debug for Oracle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Oracle")
            .field("assets", &self.assets)
            .field("narrator", &self.narrator.as_ref().map(|n| n.name()))
            .finish()
    }
}

impl Oracle {
    pub fn new(
        engine: DrawEngine<'static>,
        assets: AssetResolver,
        narrator: Option<Box<dyn Narrator>>,
    ) -> Self {
        Self {
            engine,
            assets,
            narrator,
        }
    }

    /// Standard registries, `assets/` root, no narrator.
    pub fn standard() -> Self {
        Self::new(DrawEngine::standard(), AssetResolver::default(), None)
    }

    pub fn with_narrator(mut self, narrator: Box<dyn Narrator>) -> Self {
        self.narrator = Some(narrator);
        self
    }

    pub fn with_assets(mut self, assets: AssetResolver) -> Self {
        self.assets = assets;
        self
    }

    pub fn engine(&self) -> DrawEngine<'static> {
        self.engine
    }

    pub fn assets(&self) -> &AssetResolver {
        &self.assets
    }

    pub fn narrator(&self) -> Option<&dyn Narrator> {
        self.narrator.as_deref()
    }

    /// Draws and, when asked, narrates. Only draw errors are returned; narrator
    /// errors land in [`LlmOutcome::error`].
    pub fn perform_reading(&self, req: &ReadingRequest) -> Result<Reading, DrawError> {
        let draw = self.engine.draw(&req.draw_request())?;

        let cards: Vec<ReadingCard> = draw
            .cards
            .into_iter()
            .map(|card| {
                let image_path = self
                    .assets
                    .card_image_path(&card.card_id, req.image_ext)
                    .to_string_lossy()
                    .into_owned();
                ReadingCard { card, image_path }
            })
            .collect();

        let question = req.question();
        let mut reading = Reading {
            meta: ReadingMeta {
                seed: draw.seed,
                spread: draw.spread,
                deck_type: draw.deck_type,
                orientation_prob: draw.meta.orientation_prob,
                question: question.map(str::to_string),
                explain_with_llm: req.explain_with_llm,
            },
            cards,
            llm: LlmOutcome::default(),
        };

        if req.explain_with_llm {
            reading.llm = self.narrate(question, &reading.cards, &req.narration);
        }

        info!(
            num_cards = reading.cards.len(),
            spread = reading.meta.spread.as_deref().unwrap_or("-"),
            narrated = reading.llm.response_text.is_some(),
            "reading performed"
        );
        Ok(reading)
    }

    fn narrate(
        &self,
        question: Option<&str>,
        cards: &[ReadingCard],
        options: &NarrationOptions,
    ) -> LlmOutcome {
        let prompt = build_prompt(question, cards);
        let mut outcome = LlmOutcome {
            prompt: Some(prompt.clone()),
            ..LlmOutcome::default()
        };

        let Some(narrator) = self.narrator.as_deref() else {
            outcome.error = Some("NarratorUnavailable: no narrator is configured".to_string());
            return outcome;
        };

        let request = NarrationRequest {
            prompt: &prompt,
            question,
            cards,
            options,
        };
        match narrator.narrate(&request) {
            Ok(text) if text.trim().is_empty() => {
                outcome.response_text = Some(EMPTY_NARRATION_FALLBACK.to_string());
            }
            Ok(text) => outcome.response_text = Some(text),
            Err(e) => {
                warn!(narrator = narrator.name(), error = %e, "narration failed");
                outcome.error = Some(e.report());
            }
        }
        outcome
    }
}

impl Default for Oracle {
    fn default() -> Self {
        Self::standard()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::NarrativeError;
    use crate::template::TemplateNarrator;

    struct Fixed(Result<&'static str, ()>);

    impl Narrator for Fixed {
        fn narrate(&self, _request: &NarrationRequest<'_>) -> Result<String, NarrativeError> {
            match self.0 {
                Ok(text) => Ok(text.to_string()),
                Err(()) => Err(NarrativeError::Api {
                    status: 500,
                    body: "boom".into(),
                }),
            }
        }

        fn name(&self) -> &str {
            "Fixed"
        }
    }

    fn seeded(n: usize, spread: &str) -> ReadingRequest {
        let mut req = ReadingRequest::new(n);
        req.spread = Some(spread.to_string());
        req.seed = SeedInput::from("demo-user-002");
        req
    }

    #[test]
    fn reading_without_narration_leaves_llm_empty() {
        let reading = Oracle::standard()
            .perform_reading(&seeded(3, "three_card"))
            .unwrap();
        assert_eq!(reading.llm, LlmOutcome::default());
        assert!(!reading.meta.explain_with_llm);
        assert_eq!(reading.meta.deck_type, DeckType::Rws);
        assert_eq!(reading.meta.seed, SeedInput::from("demo-user-002").normalize());
    }

    #[test]
    fn image_paths_follow_card_ids() {
        let oracle = Oracle::standard().with_assets(AssetResolver::new("/data"));
        let mut req = seeded(5, "five_card");
        req.image_ext = ImageExt::Webp;
        let reading = oracle.perform_reading(&req).unwrap();
        for c in &reading.cards {
            assert_eq!(
                c.image_path,
                format!("/data/cards/{}.webp", c.card.card_id)
            );
        }
    }

    #[test]
    fn narrator_failure_keeps_cards() {
        let mut req = seeded(3, "three_card");
        req.explain_with_llm = true;

        let plain = Oracle::standard().perform_reading(&req).unwrap();
        let failing = Oracle::standard()
            .with_narrator(Box::new(Fixed(Err(()))))
            .perform_reading(&req)
            .unwrap();

        assert_eq!(plain.cards, failing.cards);
        assert_eq!(failing.llm.error.as_deref(), Some("ApiError: API returned 500: boom"));
        assert!(failing.llm.response_text.is_none());
        assert!(failing.llm.prompt.as_deref().unwrap().contains("pos=past"));
    }

    #[test]
    fn blank_narration_gets_fallback() {
        let mut req = seeded(1, "single");
        req.explain_with_llm = true;
        let reading = Oracle::standard()
            .with_narrator(Box::new(Fixed(Ok("   \n"))))
            .perform_reading(&req)
            .unwrap();
        assert_eq!(
            reading.llm.response_text.as_deref(),
            Some(EMPTY_NARRATION_FALLBACK)
        );
        assert!(reading.llm.error.is_none());
    }

    #[test]
    fn missing_narrator_is_reported_not_raised() {
        let mut req = seeded(1, "single");
        req.explain_with_llm = true;
        let reading = Oracle::standard().perform_reading(&req).unwrap();
        assert!(reading.llm.prompt.is_some());
        assert!(reading.llm.error.unwrap().starts_with("NarratorUnavailable"));
    }

    #[test]
    fn template_narration_mentions_every_card() {
        let mut req = seeded(3, "three_card");
        req.explain_with_llm = true;
        req.question = Some("What next?".into());
        let reading = Oracle::standard()
            .with_narrator(Box::new(TemplateNarrator::new()))
            .perform_reading(&req)
            .unwrap();
        let text = reading.llm.response_text.unwrap();
        for c in &reading.cards {
            assert!(text.contains(&c.card.card_name));
        }
        assert_eq!(reading.meta.question.as_deref(), Some("What next?"));
    }

    #[test]
    fn blank_question_becomes_null() {
        let mut req = ReadingRequest::new(1);
        req.question = Some("  ".into());
        let reading = Oracle::standard().perform_reading(&req).unwrap();
        assert_eq!(reading.meta.question, None);
    }

    #[test]
    fn unsupported_deck_is_rejected() {
        let mut req = ReadingRequest::new(1);
        req.deck_type = "thoth".into();
        let err = Oracle::standard().perform_reading(&req).unwrap_err();
        assert!(matches!(err, DrawError::InvalidParameter(ref m) if m.contains("thoth")));
    }

    #[test]
    fn draw_errors_propagate() {
        let err = Oracle::standard()
            .perform_reading(&seeded(5, "three_card"))
            .unwrap_err();
        assert!(matches!(err, DrawError::SpreadCardCountMismatch { .. }));
    }

    #[test]
    fn reading_card_serializes_flat() {
        let reading = Oracle::standard()
            .perform_reading(&seeded(1, "single"))
            .unwrap();
        let json = serde_json::to_value(&reading).unwrap();
        let card = &json["cards"][0];
        assert!(card["card_id"].is_string());
        assert!(card["image_path"].is_string());
        assert_eq!(card["position"], "focus");
        assert!(json["llm"]["error"].is_null());
    }
}
