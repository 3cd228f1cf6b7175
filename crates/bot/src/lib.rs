//! The Eatba conversation engine.
//!
//! `Bot` turns one inbound event into at most one reply:
//!
//! 1. **Text** is dropped when it carries a reserved substring, otherwise
//!    classified by the [`router`] table
//! 2. **Meal hashtags** remember the user's meal time and offer districts
//! 3. **District hashtags** sample up to three restaurants into a carousel
//! 4. **Postbacks** echo the text encoded in the button data
//! 5. **Follows** get the welcome text
//!
//! The bot holds no global state: the catalog, session store and sampler
//! are injected.

pub mod demo;
pub mod menus;
pub mod postback;
pub mod recommend;
pub mod router;

use eatba_catalog::{ImageResolver, Sampler};
use eatba_core::catalog::{Catalog, MealTime};
use eatba_core::event::InboundEvent;
use eatba_core::reply::ReplyPayload;
use eatba_core::session::{SessionState, SessionStore};
use router::Intent;
use std::sync::Arc;
use tracing::{debug, info, warn};

pub use postback::handle_postback;
pub use router::classify;

/// The event dispatcher.
pub struct Bot {
    /// Read-only restaurant catalog
    catalog: Arc<Catalog>,

    /// Per-user meal-time selections
    sessions: Arc<dyn SessionStore>,

    /// Randomness for restaurant and image picks
    sampler: Arc<Sampler>,

    /// Card image lookup
    images: ImageResolver,

    /// Whether demo templates may be requested over the wire
    demo_replies: bool,
}

impl Bot {
    pub fn new(
        catalog: Arc<Catalog>,
        sessions: Arc<dyn SessionStore>,
        sampler: Arc<Sampler>,
        images: ImageResolver,
    ) -> Self {
        Self {
            catalog,
            sessions,
            sampler,
            images,
            demo_replies: false,
        }
    }

    /// Let `sample` messages reach the demo templates.
    pub fn with_demo_replies(mut self, enabled: bool) -> Self {
        self.demo_replies = enabled;
        self
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn sessions(&self) -> &Arc<dyn SessionStore> {
        &self.sessions
    }

    /// Produce the reply for one event, if any.
    pub async fn handle_event(&self, event: &InboundEvent) -> Option<ReplyPayload> {
        match event {
            InboundEvent::Text { user_id, text, .. } => {
                if router::is_reserved(text, self.demo_replies) {
                    debug!(user_id = %user_id, "Reserved text, not replying");
                    return None;
                }
                self.route(user_id, text).await
            }
            InboundEvent::Follow { .. } => {
                info!("New follower");
                Some(menus::welcome())
            }
            InboundEvent::Postback { data, .. } => Some(postback::handle_postback(data)),
            InboundEvent::Unsupported { kind } => {
                debug!(kind = %kind, "Ignoring unsupported event");
                None
            }
        }
    }

    /// Route one text message through the rule table.
    pub async fn route(&self, user_id: &str, text: &str) -> Option<ReplyPayload> {
        let rule = router::match_rule(text);
        debug!(user_id = %user_id, rule = rule.name, "Routing text message");

        match rule.intent {
            Intent::Demo => Some(demo::select_demo(text)),
            Intent::MealMenu => Some(menus::meal_menu()),
            Intent::ChooseMeal => self.choose_meal(user_id, text).await,
            Intent::ChooseDistrict => {
                let district = router::district_from_hashtag(text);
                Some(self.build_recommendation(user_id, district).await)
            }
            Intent::Ignore => None,
            Intent::Guidance => Some(menus::guidance()),
        }
    }

    /// Remember the meal time named by `hashtag` and offer its districts.
    async fn choose_meal(&self, user_id: &str, hashtag: &str) -> Option<ReplyPayload> {
        let Some(meal) = MealTime::from_hashtag(hashtag) else {
            debug!(hashtag = %hashtag, "Unknown meal hashtag");
            return None;
        };

        let districts = self.catalog.partition(meal);
        let menu = menus::district_menu(&districts);
        if let Err(e) = self
            .sessions
            .put(user_id, SessionState::new(meal, districts))
            .await
        {
            warn!(user_id = %user_id, "Failed to store session: {e}");
        }
        info!(user_id = %user_id, meal = %meal, "Meal time selected");
        Some(menu)
    }

    /// Up to three restaurants of `district` in the user's selected meal time.
    pub async fn build_recommendation(&self, user_id: &str, district: &str) -> ReplyPayload {
        let session = match self.sessions.get(user_id).await {
            Ok(Some(session)) => session,
            Ok(None) => {
                debug!(user_id = %user_id, "No meal time selected yet");
                return menus::no_data();
            }
            Err(e) => {
                warn!(user_id = %user_id, "Failed to read session: {e}");
                return menus::no_data();
            }
        };

        let Some(group) = session.districts.get(district) else {
            debug!(district = %district, meal = %session.meal, "District not in selection");
            return menus::no_data();
        };

        let picks = self.sampler.sample(group);
        if picks.is_empty() {
            return menus::no_data();
        }

        let mut columns = Vec::with_capacity(picks.len());
        for record in picks {
            columns.push(recommend::restaurant_card(record, &self.images, &self.sampler).await);
        }
        info!(
            user_id = %user_id,
            district = %district,
            count = columns.len(),
            "Recommending restaurants"
        );
        ReplyPayload::Carousel { columns }
    }
}
