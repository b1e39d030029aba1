//! serenity event handler

use std::sync::Arc;

use serenity::all::{Context, EventHandler, Reaction, Ready};
use serenity::async_trait;
use tracing::{debug, info};

use dragonkeep_core::{ReactionKind, RevenueRepository};
use dragonkeep_service::{RoleSyncService, RoleSyncSettings, ServiceContext};

use crate::convert;
use crate::gateway::SerenityGateway;

/// Routes gateway events to the role sync service
pub struct Handler {
    settings: RoleSyncSettings,
    revenue_repo: Arc<dyn RevenueRepository>,
}

impl Handler {
    pub fn new(settings: RoleSyncSettings, revenue_repo: Arc<dyn RevenueRepository>) -> Self {
        Self {
            settings,
            revenue_repo,
        }
    }

    /// Services bound to the connection that delivered the event
    fn service_context(&self, ctx: &Context) -> ServiceContext {
        let gateway = SerenityGateway::new(ctx.http.clone(), ctx.cache.clone());
        ServiceContext::new(
            Arc::new(gateway),
            self.revenue_repo.clone(),
            self.settings.clone(),
        )
    }

    async fn on_reaction(&self, ctx: Context, kind: ReactionKind, reaction: Reaction) {
        let Some(event) = convert::reaction_event(kind, &reaction) else {
            debug!(
                message_id = %reaction.message_id,
                "Reaction without a user id; skipping"
            );
            return;
        };

        let service_context = self.service_context(&ctx);
        RoleSyncService::new(&service_context).process(event).await;
    }
}

#[async_trait]
impl EventHandler for Handler {
    async fn ready(&self, _ctx: Context, ready: Ready) {
        info!(
            user = %ready.user.name,
            guilds = ready.guilds.len(),
            "Connected to Discord"
        );
    }

    async fn reaction_add(&self, ctx: Context, add_reaction: Reaction) {
        self.on_reaction(ctx, ReactionKind::Add, add_reaction).await;
    }

    async fn reaction_remove(&self, ctx: Context, removed_reaction: Reaction) {
        self.on_reaction(ctx, ReactionKind::Remove, removed_reaction)
            .await;
    }
}
