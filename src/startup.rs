//! Application Startup
//!
//! Wires repositories, services, use cases and handlers together, then runs
//! the Discord client next to the ops HTTP server.

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context as _, Result};
use serenity::Client;
use sqlx::PgPool;
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

use crate::application::use_cases::{BalanceUseCase, GamblingUseCase, TransferCoinsUseCase};
use crate::config::{DatabaseBackend, Settings};
use crate::domain::services::{
    BalanceService, GamblingService, OutcomeRoller, PaymentService, RewardPolicy, ThreadRngRoller,
};
use crate::domain::{BalanceRepository, GamblingRepository, PayoutRule, PayoutTable, UserRepository};
use crate::infrastructure::database;
use crate::infrastructure::memory::InMemoryStore;
use crate::infrastructure::repositories::{
    PgBalanceRepository, PgGamblingRepository, PgUserRepository,
};
use crate::presentation::commands::CommandRouter;
use crate::presentation::discord::{gateway_intents, DiscordHandler, GatewayState, StatusRotator};
use crate::presentation::events::RewardEventHandler;
use crate::presentation::http::{self, OpsState};

/// Repository implementations selected by `database.backend`
#[derive(Clone)]
pub struct Repositories {
    pub users: Arc<dyn UserRepository>,
    pub balances: Arc<dyn BalanceRepository>,
    pub gambling: Arc<dyn GamblingRepository>,
    /// Present for the postgres backend only
    pub pool: Option<PgPool>,
}

impl Repositories {
    /// Postgres-backed repositories sharing one pool
    pub fn postgres(pool: PgPool) -> Self {
        Self {
            users: Arc::new(PgUserRepository::new(pool.clone())),
            balances: Arc::new(PgBalanceRepository::new(pool.clone())),
            gambling: Arc::new(PgGamblingRepository::new(pool.clone())),
            pool: Some(pool),
        }
    }

    /// All three repositories served by one in-memory store
    pub fn in_memory(store: Arc<InMemoryStore>) -> Self {
        Self {
            users: store.clone(),
            balances: store.clone(),
            gambling: store,
            pool: None,
        }
    }

    async fn connect(settings: &Settings) -> Result<Self> {
        match settings.database.backend {
            DatabaseBackend::Postgres => {
                let pool = database::create_pool(&settings.database)
                    .await
                    .context("Failed to create database pool")?;
                tracing::info!("Database connection pool created");

                if settings.database.run_migrations {
                    database::run_migrations(&pool)
                        .await
                        .context("Failed to run database migrations")?;
                    tracing::info!("Database migrations applied");
                }

                Ok(Self::postgres(pool))
            }
            DatabaseBackend::Memory => {
                tracing::warn!("Using the in-memory backend, balances are lost on restart");
                Ok(Self::in_memory(Arc::new(InMemoryStore::new())))
            }
        }
    }
}

/// Message-facing handlers built from the settings
pub struct Handlers {
    pub router: Arc<CommandRouter>,
    pub rewards: Arc<RewardEventHandler>,
}

/// Build the payout table from the configured variants
pub fn payout_table(settings: &Settings) -> PayoutTable {
    PayoutTable::new(settings.gambling.variants.iter().map(|(name, rule)| {
        (
            name.as_str(),
            PayoutRule::new(rule.win_probability, rule.payout_multiplier),
        )
    }))
}

/// Compose services, use cases and handlers over the given repositories
pub fn build_handlers(
    settings: &Settings,
    repos: &Repositories,
    roller: Arc<dyn OutcomeRoller>,
) -> Handlers {
    let policy = RewardPolicy {
        amount: settings.economy.reward_amount,
        interval: settings.economy.reward_interval,
    };

    let balance_service = Arc::new(BalanceService::new(
        repos.balances.clone(),
        repos.users.clone(),
        policy,
    ));
    let payment_service = Arc::new(PaymentService::new(repos.balances.clone()));
    let gambling_service = Arc::new(GamblingService::new(
        repos.balances.clone(),
        repos.gambling.clone(),
        payout_table(settings),
        roller,
    ));

    let router = CommandRouter::new(
        settings.discord.command_prefix.clone(),
        Arc::new(BalanceUseCase::new(
            balance_service.clone(),
            settings.economy.leaderboard_size,
        )),
        Arc::new(TransferCoinsUseCase::new(payment_service)),
        Arc::new(GamblingUseCase::new(
            gambling_service,
            settings.economy.history_size,
        )),
    );

    Handlers {
        router: Arc::new(router),
        rewards: Arc::new(RewardEventHandler::new(balance_service)),
    }
}

/// Application instance
pub struct Application {
    client: Client,
    presence: Arc<StatusRotator>,
    ops: Option<(TcpListener, axum::Router)>,
}

impl Application {
    /// Build the application from settings
    pub async fn build(settings: Settings) -> Result<Self> {
        let repos = Repositories::connect(&settings).await?;
        let handlers = build_handlers(&settings, &repos, Arc::new(ThreadRngRoller));

        let gateway = Arc::new(GatewayState::new());
        let presence = Arc::new(StatusRotator::new(
            settings.presence.statuses.clone(),
            Duration::from_secs(settings.presence.interval_secs),
        ));

        let handler = DiscordHandler::new(
            handlers.router,
            handlers.rewards,
            presence.clone(),
            gateway.clone(),
        );

        let client = Client::builder(&settings.discord.token, gateway_intents())
            .event_handler(handler)
            .await
            .context("Failed to create Discord client")?;

        let ops = if settings.ops.enabled {
            http::health::init_server_start();
            let router = http::create_router(OpsState {
                pool: repos.pool.clone(),
                gateway,
            });
            let addr = settings.ops.addr();
            let listener = TcpListener::bind(&addr)
                .await
                .with_context(|| format!("Failed to bind ops server to {}", addr))?;
            tracing::info!("Ops server listening on {}", addr);
            Some((listener, router))
        } else {
            None
        };

        Ok(Self {
            client,
            presence,
            ops,
        })
    }

    /// Run the bot until the gateway closes or Ctrl-C is received
    pub async fn run_until_stopped(mut self) -> Result<()> {
        let ops_task: Option<JoinHandle<()>> = self.ops.take().map(|(listener, router)| {
            tokio::spawn(async move {
                if let Err(e) = axum::serve(listener, router).await {
                    tracing::error!(error = %e, "Ops server stopped");
                }
            })
        });

        let shard_manager = self.client.shard_manager.clone();

        let result = tokio::select! {
            result = self.client.start() => result.context("Discord client stopped"),
            signal = tokio::signal::ctrl_c() => {
                if let Err(e) = signal {
                    tracing::error!(error = %e, "Failed to listen for shutdown signal");
                }
                tracing::info!("Shutdown signal received");
                shard_manager.shutdown_all().await;
                Ok(())
            }
        };

        self.presence.stop();
        if let Some(task) = ops_task {
            task.abort();
        }

        result
    }
}
