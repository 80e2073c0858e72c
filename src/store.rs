//! In-memory demo data.

use std::sync::Arc;

use anyhow::Context;
use serde::Deserialize;
use tokio::sync::RwLock;

use crate::{
    filter::{FilterError, MessageFilter, WordFilterConfig},
    include_res,
    model::{
        Admin, AppSettings, ApprovalStatus, Booking, Conversation, Guide, Message, Review, Role,
        Traveler, User,
    },
};

pub type SharedStore = Arc<RwLock<Store>>;

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct Seed {
    travelers: Vec<Traveler>,
    guides: Vec<Guide>,
    admins: Vec<Admin>,
    bookings: Vec<Booking>,
    reviews: Vec<Review>,
    messages: Vec<Message>,
    conversations: Vec<Conversation>,
    settings: AppSettings,
}

#[derive(Debug)]
pub struct Store {
    pub travelers: Vec<Traveler>,
    pub guides: Vec<Guide>,
    pub admins: Vec<Admin>,
    pub bookings: Vec<Booking>,
    pub reviews: Vec<Review>,
    pub messages: Vec<Message>,
    pub conversations: Vec<Conversation>,
    settings: AppSettings,
    message_filter: MessageFilter,
}

impl Store {
    /// Loads the demo data bundled under `res/seed.json`.
    pub fn seed() -> anyhow::Result<Self> {
        Self::from_json(include_res!(str, "/seed.json"))
    }

    pub fn from_json(json: &str) -> anyhow::Result<Self> {
        let mut seed: Seed = serde_json::from_str(json).context("couldn't parse seed data")?;
        let word_filter = &seed.settings.word_filter;
        seed.settings.word_filter = WordFilterConfig::new(word_filter.enabled, &word_filter.banned_words)
            .context("invalid banned words in seed data")?;
        let message_filter = MessageFilter::new(&seed.settings.word_filter)?;

        Ok(Store {
            travelers: seed.travelers,
            guides: seed.guides,
            admins: seed.admins,
            bookings: seed.bookings,
            reviews: seed.reviews,
            messages: seed.messages,
            conversations: seed.conversations,
            settings: seed.settings,
            message_filter,
        })
    }

    pub fn shared(self) -> SharedStore {
        Arc::new(RwLock::new(self))
    }

    pub fn settings(&self) -> &AppSettings {
        &self.settings
    }

    pub fn message_filter(&self) -> &MessageFilter {
        &self.message_filter
    }

    /// Swaps in new settings, recompiling the word filter first so a bad
    /// word list leaves the old settings in place.
    pub fn replace_settings(&mut self, settings: AppSettings) -> Result<(), FilterError> {
        self.message_filter = MessageFilter::new(&settings.word_filter)?;
        self.settings = settings;
        Ok(())
    }

    /// The account a demo login for `role` signs in as.
    pub fn demo_user(&self, role: Role) -> Option<&User> {
        use Role::*;
        match role {
            Traveler => self.travelers.first().map(|t| &t.user),
            Guide => self.guides.first().map(|g| &g.user),
            Admin => self.admins.first().map(|a| &a.user),
        }
    }

    pub fn user(&self, id: &str) -> Option<&User> {
        self.travelers.iter().map(|t| &t.user)
            .chain(self.guides.iter().map(|g| &g.user))
            .chain(self.admins.iter().map(|a| &a.user))
            .find(|u| u.id == id)
    }

    pub fn traveler(&self, id: &str) -> Option<&Traveler> {
        self.travelers.iter().find(|t| t.user.id == id)
    }

    pub fn guide(&self, id: &str) -> Option<&Guide> {
        self.guides.iter().find(|g| g.user.id == id)
    }

    pub fn guide_mut(&mut self, id: &str) -> Option<&mut Guide> {
        self.guides.iter_mut().find(|g| g.user.id == id)
    }

    /// A guide visible on the marketplace.
    pub fn approved_guide(&self, id: &str) -> Option<&Guide> {
        self.guide(id).filter(|g| g.status == ApprovalStatus::Approved)
    }

    pub fn approved_guides(&self) -> Vec<Guide> {
        self.guides_with_status(ApprovalStatus::Approved)
    }

    pub fn guides_with_status(&self, status: ApprovalStatus) -> Vec<Guide> {
        self.guides.iter().filter(|g| g.status == status).cloned().collect()
    }

    pub fn reviews_for(&self, guide_id: &str) -> Vec<&Review> {
        self.reviews.iter().filter(|r| r.guide_id == guide_id).collect()
    }

    /// Messages between `a` and `b`, oldest first.
    pub fn thread(&self, a: &str, b: &str) -> Vec<&Message> {
        let mut thread: Vec<&Message> = self.messages.iter().filter(|m| m.between(a, b)).collect();
        thread.sort_by_key(|m| m.timestamp);
        thread
    }

    pub fn unread_for(&self, user_id: &str) -> usize {
        self.messages.iter().filter(|m| m.receiver_id == user_id && !m.read).count()
    }

    pub fn conversation_between(&self, a: &str, b: &str) -> Option<&Conversation> {
        self.conversations.iter().find(|c| c.includes(a) && c.includes(b))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seed_loads() {
        let store = Store::seed().unwrap();
        assert!(!store.approved_guides().is_empty());
        assert!(store.message_filter().is_enabled());
        for role in [Role::Traveler, Role::Guide, Role::Admin] {
            assert_eq!(store.demo_user(role).unwrap().role, role);
        }
    }

    #[test]
    fn seed_guides_respect_invariants() {
        let store = Store::seed().unwrap();
        for guide in &store.guides {
            assert!((0.0..=5.0).contains(&guide.rating), "{}", guide.user.id);
        }
    }

    #[test]
    fn thread_is_chronological() {
        let store = Store::seed().unwrap();
        let thread = store.thread("traveler-1", "guide-1");
        assert!(thread.len() >= 2);
        assert!(thread.windows(2).all(|w| w[0].timestamp <= w[1].timestamp));
    }

    #[test]
    fn seeded_word_list_is_normalized() {
        let mut seed: serde_json::Value = serde_json::from_str(include_res!(str, "/seed.json")).unwrap();
        seed["settings"]["wordFilter"]["bannedWords"] = serde_json::json!([" price", "price", "", "cash"]);

        let store = Store::from_json(&seed.to_string()).unwrap();
        assert_eq!(store.settings().word_filter.banned_words, vec!["price", "cash"]);

        seed["settings"]["wordFilter"]["bannedWords"] = serde_json::json!(["price", "*x"]);
        assert!(Store::from_json(&seed.to_string()).is_err());
    }

    #[test]
    fn pending_guides_are_not_public() {
        let store = Store::seed().unwrap();
        let pending = store.guides_with_status(ApprovalStatus::Pending);
        assert!(!pending.is_empty());
        assert!(store.approved_guide(&pending[0].user.id).is_none());
    }
}
