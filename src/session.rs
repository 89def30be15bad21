// Bot session - per-process state shared by the command router and the feed relay

use std::sync::atomic::{AtomicBool, Ordering};

use crate::util::Settings;

/// Owners, channels and the feed-following flag for one running bot
#[derive(Debug, Default)]
pub struct BotSession {
    pub owner_ids: Vec<u64>,
    pub news_channel_id: Option<u64>,
    pub followed_accounts: Vec<String>,
    following: AtomicBool,
}

impl BotSession {
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            owner_ids: settings.owner_ids.clone(),
            news_channel_id: settings.news_channel_id,
            followed_accounts: settings.followed_accounts.clone(),
            following: AtomicBool::new(false),
        }
    }

    pub fn is_owner(&self, user_id: u64) -> bool {
        self.owner_ids.contains(&user_id)
    }

    /// Claim the following flag. Returns false if a follower is already running.
    pub fn begin_following(&self) -> bool {
        self.following
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_ok()
    }

    pub fn end_following(&self) {
        self.following.store(false, Ordering::Release);
    }

    pub fn is_following(&self) -> bool {
        self.following.load(Ordering::Acquire)
    }
}
