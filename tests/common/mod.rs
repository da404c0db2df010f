//! Common Test Utilities
//!
//! Shared helpers, fixtures, and test infrastructure.

#![allow(dead_code)]

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use axum::{body::Body, http::Request, Router};
use tower::ServiceExt;

use cheapo_bot::application::dto::CommandReply;
use cheapo_bot::config::{
    DatabaseBackend, DatabaseSettings, DiscordSettings, EconomySettings, GamblingSettings,
    OpsSettings, PayoutRuleSettings, PresenceSettings, Settings,
};
use cheapo_bot::domain::services::OutcomeRoller;
use cheapo_bot::domain::BalanceRepository;
use cheapo_bot::infrastructure::memory::InMemoryStore;
use cheapo_bot::presentation::commands::CommandRouter;
use cheapo_bot::presentation::discord::GatewayState;
use cheapo_bot::presentation::events::{IncomingMessage, RewardEventHandler, RewardGrant};
use cheapo_bot::presentation::http::{create_router, OpsState};
use cheapo_bot::startup::{build_handlers, Repositories};

pub const ALICE: i64 = 100_000_000_000_000_001;
pub const BOB: i64 = 100_000_000_000_000_002;
pub const CAROL: i64 = 100_000_000_000_000_003;

/// Roller whose outcome the test decides.
#[derive(Debug, Default)]
pub struct ScriptedRoller {
    win: AtomicBool,
}

impl ScriptedRoller {
    pub fn set_win(&self, win: bool) {
        self.win.store(win, Ordering::SeqCst);
    }
}

impl OutcomeRoller for ScriptedRoller {
    fn roll(&self, _win_probability: f64) -> bool {
        self.win.load(Ordering::SeqCst)
    }
}

/// Settings matching config/default.toml, on the memory backend.
pub fn test_settings() -> Settings {
    let variants = BTreeMap::from([
        (
            "coinflip".to_string(),
            PayoutRuleSettings {
                win_probability: 0.5,
                payout_multiplier: 2,
            },
        ),
        (
            "dice".to_string(),
            PayoutRuleSettings {
                win_probability: 1.0 / 6.0,
                payout_multiplier: 6,
            },
        ),
        (
            "slots".to_string(),
            PayoutRuleSettings {
                win_probability: 0.1,
                payout_multiplier: 8,
            },
        ),
    ]);

    Settings {
        discord: DiscordSettings {
            token: "test-token".into(),
            command_prefix: "c!".into(),
        },
        database: DatabaseSettings {
            backend: DatabaseBackend::Memory,
            url: None,
            max_connections: 1,
            min_connections: 1,
            acquire_timeout: 1,
            run_migrations: false,
        },
        economy: EconomySettings {
            reward_amount: 10,
            reward_interval: 10,
            leaderboard_size: 10,
            history_size: 5,
        },
        gambling: GamblingSettings { variants },
        presence: PresenceSettings {
            statuses: vec!["Use c!help 🎲".into()],
            interval_secs: 5,
        },
        ops: OpsSettings {
            enabled: false,
            host: "127.0.0.1".into(),
            port: 0,
        },
        environment: "test".into(),
    }
}

/// The bot's message pipeline over an in-memory ledger.
pub struct TestApp {
    pub store: Arc<InMemoryStore>,
    pub roller: Arc<ScriptedRoller>,
    pub router: Arc<CommandRouter>,
    pub rewards: Arc<RewardEventHandler>,
}

impl TestApp {
    pub fn new() -> Self {
        let store = Arc::new(InMemoryStore::new());
        let roller = Arc::new(ScriptedRoller::default());
        let repos = Repositories::in_memory(store.clone());
        let handlers = build_handlers(&test_settings(), &repos, roller.clone());

        Self {
            store,
            roller,
            router: handlers.router,
            rewards: handlers.rewards,
        }
    }

    /// Deliver a message the way the Discord handler does: command first,
    /// then the reward counter.
    pub async fn send(&self, author_id: i64, content: &str) -> (Option<CommandReply>, Option<RewardGrant>) {
        let reply = self.router.dispatch(author_id, content).await;
        let grant = self
            .rewards
            .on_message(&IncomingMessage {
                author_id,
                author_is_bot: false,
                content: content.to_string(),
            })
            .await
            .unwrap();
        (reply, grant)
    }

    /// Send a command and return its reply.
    pub async fn command(&self, author_id: i64, content: &str) -> CommandReply {
        self.send(author_id, content)
            .await
            .0
            .unwrap_or_else(|| panic!("`{}` was not treated as a command", content))
    }

    pub async fn balance_of(&self, user_id: i64) -> i64 {
        self.store.get_or_create(user_id).await.unwrap().amount
    }

    pub fn seed(&self, user_id: i64, amount: i64) {
        self.store.seed_balance(user_id, amount);
    }
}

/// The ops router over the memory backend.
pub struct TestOps {
    pub router: Router,
    pub gateway: Arc<GatewayState>,
}

impl TestOps {
    pub fn new() -> Self {
        let gateway = Arc::new(GatewayState::new());
        let router = create_router(OpsState {
            pool: None,
            gateway: gateway.clone(),
        });
        Self { router, gateway }
    }

    /// Make a GET request to the ops router
    pub async fn get(&self, uri: &str) -> axum::response::Response {
        self.router
            .clone()
            .oneshot(
                Request::builder()
                    .method("GET")
                    .uri(uri)
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap()
    }

    /// GET and parse the body as JSON
    pub async fn get_json(&self, uri: &str) -> (axum::http::StatusCode, serde_json::Value) {
        let response = self.get(uri).await;
        let status = response.status();
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&body).unwrap())
    }
}
