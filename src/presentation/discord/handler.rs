//! Discord Event Handler
//!
//! Bridges serenity gateway events to the command router, the reward
//! handler and the presence rotator.

use std::sync::Arc;

use serenity::async_trait;
use serenity::gateway::ActivityData;
use serenity::model::channel::Message;
use serenity::model::gateway::Ready;
use serenity::prelude::{Context, EventHandler};

use crate::presentation::commands::CommandRouter;
use crate::presentation::events::{IncomingMessage, RewardEventHandler};

use super::presence::{PresenceSink, StatusRotator};
use super::GatewayState;

/// Shows statuses as a custom activity on the shard that delivered `ready`.
struct ContextPresence(Context);

impl PresenceSink for ContextPresence {
    fn set_status(&self, status: &str) {
        self.0.set_activity(Some(ActivityData::custom(status)));
    }
}

/// serenity event handler for the bot.
pub struct DiscordHandler {
    router: Arc<CommandRouter>,
    rewards: Arc<RewardEventHandler>,
    presence: Arc<StatusRotator>,
    gateway: Arc<GatewayState>,
}

impl DiscordHandler {
    pub fn new(
        router: Arc<CommandRouter>,
        rewards: Arc<RewardEventHandler>,
        presence: Arc<StatusRotator>,
        gateway: Arc<GatewayState>,
    ) -> Self {
        Self {
            router,
            rewards,
            presence,
            gateway,
        }
    }

    async fn reply(&self, ctx: &Context, msg: &Message, content: &str) {
        if let Err(e) = msg.channel_id.say(&ctx.http, content).await {
            tracing::error!(
                channel_id = %msg.channel_id,
                error = %e,
                "Failed to send reply"
            );
        }
    }
}

#[async_trait]
impl EventHandler for DiscordHandler {
    async fn message(&self, ctx: Context, msg: Message) {
        let Ok(author_id) = i64::try_from(msg.author.id.get()) else {
            tracing::warn!(author = %msg.author.id, "Author id does not fit the ledger key");
            return;
        };

        let incoming = IncomingMessage {
            author_id,
            author_is_bot: msg.author.bot,
            content: msg.content.clone(),
        };

        if incoming.author_is_bot {
            return;
        }

        if let Some(reply) = self.router.dispatch(author_id, &incoming.content).await {
            self.reply(&ctx, &msg, &reply.message).await;
        }

        match self.rewards.on_message(&incoming).await {
            Ok(Some(grant)) => tracing::info!(
                user_id = grant.user_id,
                message_count = grant.message_count,
                amount = grant.amount,
                balance = grant.balance,
                "Message reward paid"
            ),
            Ok(None) => {}
            Err(e) => tracing::error!(user_id = author_id, error = %e, "Failed to count message"),
        }
    }

    async fn ready(&self, ctx: Context, ready: Ready) {
        tracing::info!(
            bot = %ready.user.name,
            guilds = ready.guilds.len(),
            prefix = self.router.prefix(),
            "Connected to Discord"
        );

        self.gateway.set_connected(true);
        self.presence.start(Arc::new(ContextPresence(ctx)));
    }
}
