//! Rules-reaction role sync against the fake gateway
//!
//! Run with: cargo test -p integration-tests --test role_sync

use std::sync::Arc;

use dragonkeep_core::{Emoji, PlatformUser, ReactionKind, Snowflake};
use dragonkeep_db::InMemoryRevenueRepository;
use dragonkeep_service::{IgnoreReason, RoleSyncOutcome, RoleSyncService, ServiceContext};
use integration_tests::fixtures::*;

const ACTOR: u64 = 1_300_000_000_000_000_001;

fn context(gateway: &Arc<FakeGateway>, revoke_on_remove: bool) -> ServiceContext {
    ServiceContext::new(
        gateway.clone(),
        Arc::new(InMemoryRevenueRepository::new()),
        settings(revoke_on_remove),
    )
}

fn guild_with_actor(roles: &[Snowflake]) -> Arc<FakeGateway> {
    let gateway = FakeGateway::with_guild();
    gateway.add_member(member(ACTOR, "ember", 3, roles));
    Arc::new(gateway)
}

fn actor() -> PlatformUser {
    user(ACTOR, "ember")
}

// ============================================================================
// Grant
// ============================================================================

#[tokio::test]
async fn test_approval_grants_viewer_role_once() {
    let gateway = guild_with_actor(&[]);
    let ctx = context(&gateway, false);

    let outcome = RoleSyncService::new(&ctx)
        .handle_reaction(rules_reaction(ReactionKind::Add, actor()))
        .await
        .unwrap();

    assert_eq!(outcome, RoleSyncOutcome::Granted);
    assert_eq!(
        gateway.mutations(),
        vec![GatewayCall::Grant(GUILD_ID, Snowflake::new(ACTOR), VIEWER_ROLE_ID)]
    );
    assert_eq!(gateway.roles_of(Snowflake::new(ACTOR)), vec![VIEWER_ROLE_ID]);
}

#[tokio::test]
async fn test_member_already_holding_role_is_not_granted_again() {
    let gateway = guild_with_actor(&[VIEWER_ROLE_ID]);
    let ctx = context(&gateway, false);

    let outcome = RoleSyncService::new(&ctx)
        .handle_reaction(rules_reaction(ReactionKind::Add, actor()))
        .await
        .unwrap();

    assert_eq!(outcome, RoleSyncOutcome::AlreadySynced);
    assert!(gateway.mutations().is_empty());
    assert_eq!(
        gateway.count(|c| matches!(c, GatewayCall::FetchMember(..))),
        1
    );
}

#[tokio::test]
async fn test_repeated_reactions_grant_at_most_once() {
    let gateway = guild_with_actor(&[]);
    let ctx = context(&gateway, false);
    let service = RoleSyncService::new(&ctx);

    for _ in 0..3 {
        service
            .handle_reaction(rules_reaction(ReactionKind::Add, actor()))
            .await
            .unwrap();
    }

    assert_eq!(gateway.mutations().len(), 1);
}

// ============================================================================
// Guards
// ============================================================================

#[tokio::test]
async fn test_reaction_in_other_channel_is_ignored_without_platform_calls() {
    let gateway = guild_with_actor(&[]);
    let ctx = context(&gateway, false);

    let mut event = rules_reaction(ReactionKind::Add, actor());
    event.channel_id = OTHER_CHANNEL_ID;
    let outcome = RoleSyncService::new(&ctx).handle_reaction(event).await.unwrap();

    assert_eq!(outcome, RoleSyncOutcome::Ignored(IgnoreReason::WrongChannel));
    assert!(gateway.calls().is_empty());
}

#[tokio::test]
async fn test_reaction_on_other_message_is_ignored() {
    let gateway = guild_with_actor(&[]);
    let ctx = context(&gateway, false);

    let mut event = rules_reaction(ReactionKind::Add, actor());
    event.message_id = OTHER_MESSAGE_ID;
    let outcome = RoleSyncService::new(&ctx).handle_reaction(event).await.unwrap();

    assert_eq!(outcome, RoleSyncOutcome::Ignored(IgnoreReason::WrongMessage));
    assert!(gateway.mutations().is_empty());
}

#[tokio::test]
async fn test_bot_reaction_is_ignored() {
    let gateway = Arc::new(FakeGateway::with_guild());
    gateway.add_member(bot_member(ACTOR, "keeper", 0));
    let ctx = context(&gateway, false);

    let bot = PlatformUser::bot(Snowflake::new(ACTOR), "keeper");
    let outcome = RoleSyncService::new(&ctx)
        .handle_reaction(rules_reaction(ReactionKind::Add, bot))
        .await
        .unwrap();

    assert_eq!(outcome, RoleSyncOutcome::Ignored(IgnoreReason::BotActor));
    assert!(gateway.mutations().is_empty());
}

#[tokio::test]
async fn test_other_emoji_is_ignored() {
    let gateway = guild_with_actor(&[]);
    let ctx = context(&gateway, false);
    let service = RoleSyncService::new(&ctx);

    let mut unicode = rules_reaction(ReactionKind::Add, actor());
    unicode.emoji = Emoji::Unicode("👍".to_string());
    let mut custom = rules_reaction(ReactionKind::Add, actor());
    custom.emoji = Emoji::Custom {
        id: Snowflake::new(42),
        name: Some(APPROVAL_EMOJI.to_string()),
    };

    for event in [unicode, custom] {
        let outcome = service.handle_reaction(event).await.unwrap();
        assert_eq!(outcome, RoleSyncOutcome::Ignored(IgnoreReason::WrongEmoji));
    }
    assert!(gateway.mutations().is_empty());
}

#[tokio::test]
async fn test_reaction_outside_guild_is_ignored() {
    let gateway = Arc::new(FakeGateway::empty());
    gateway.add_member(member(ACTOR, "ember", 3, &[]));
    let ctx = context(&gateway, false);

    let mut event = rules_reaction(ReactionKind::Add, actor());
    event.guild_id = None;
    let outcome = RoleSyncService::new(&ctx).handle_reaction(event).await.unwrap();

    assert_eq!(outcome, RoleSyncOutcome::Ignored(IgnoreReason::OutsideGuild));
    assert_eq!(
        gateway.calls(),
        vec![GatewayCall::FetchChannelGuild(RULES_CHANNEL_ID)]
    );
}

#[tokio::test]
async fn test_missing_guild_is_resolved_from_channel() {
    let gateway = guild_with_actor(&[]);
    let ctx = context(&gateway, false);

    let mut event = rules_reaction(ReactionKind::Add, actor());
    event.guild_id = None;
    let outcome = RoleSyncService::new(&ctx).handle_reaction(event).await.unwrap();

    assert_eq!(outcome, RoleSyncOutcome::Granted);
    assert_eq!(
        gateway.count(|c| matches!(c, GatewayCall::FetchChannelGuild(_))),
        1
    );
}

// ============================================================================
// Partial payloads and failures
// ============================================================================

#[tokio::test]
async fn test_partial_actor_is_fetched_once() {
    let gateway = guild_with_actor(&[]);
    let ctx = context(&gateway, false);

    let outcome = RoleSyncService::new(&ctx)
        .handle_reaction(partial_rules_reaction(ReactionKind::Add, Snowflake::new(ACTOR)))
        .await
        .unwrap();

    assert_eq!(outcome, RoleSyncOutcome::Granted);
    assert_eq!(gateway.count(|c| matches!(c, GatewayCall::FetchUser(_))), 1);
}

#[tokio::test]
async fn test_partial_bot_is_ignored_after_fetch() {
    let gateway = Arc::new(FakeGateway::with_guild());
    gateway.add_member(bot_member(ACTOR, "keeper", 0));
    let ctx = context(&gateway, false);

    let outcome = RoleSyncService::new(&ctx)
        .handle_reaction(partial_rules_reaction(ReactionKind::Add, Snowflake::new(ACTOR)))
        .await
        .unwrap();

    assert_eq!(outcome, RoleSyncOutcome::Ignored(IgnoreReason::BotActor));
    assert!(gateway.mutations().is_empty());
}

#[tokio::test]
async fn test_failed_fetch_drops_event_without_mutation() {
    let gateway = guild_with_actor(&[]);
    gateway.fail_fetches();
    let ctx = context(&gateway, false);
    let service = RoleSyncService::new(&ctx);

    let partial = partial_rules_reaction(ReactionKind::Add, Snowflake::new(ACTOR));
    assert!(service.handle_reaction(partial.clone()).await.is_err());
    assert_eq!(service.process(partial).await, None);

    // resolved actor, but the member lookup fails
    assert_eq!(
        service
            .process(rules_reaction(ReactionKind::Add, actor()))
            .await,
        None
    );
    assert!(gateway.mutations().is_empty());
}

#[tokio::test]
async fn test_failed_grant_is_reported_once() {
    let gateway = guild_with_actor(&[]);
    gateway.fail_mutations();
    let ctx = context(&gateway, false);

    let outcome = RoleSyncService::new(&ctx)
        .process(rules_reaction(ReactionKind::Add, actor()))
        .await;

    assert_eq!(outcome, None);
    assert_eq!(gateway.mutations().len(), 1);
    assert!(gateway.roles_of(Snowflake::new(ACTOR)).is_empty());
}

// ============================================================================
// Remove
// ============================================================================

#[tokio::test]
async fn test_unreact_keeps_role_when_revocation_disabled() {
    let gateway = guild_with_actor(&[VIEWER_ROLE_ID]);
    let ctx = context(&gateway, false);

    let outcome = RoleSyncService::new(&ctx)
        .handle_reaction(rules_reaction(ReactionKind::Remove, actor()))
        .await
        .unwrap();

    assert_eq!(outcome, RoleSyncOutcome::RevocationDisabled);
    assert!(gateway.mutations().is_empty());
    assert_eq!(gateway.roles_of(Snowflake::new(ACTOR)), vec![VIEWER_ROLE_ID]);
}

#[tokio::test]
async fn test_unreact_revokes_role_when_enabled() {
    let gateway = guild_with_actor(&[VIEWER_ROLE_ID, SUB_ROLE_ID]);
    let ctx = context(&gateway, true);

    let outcome = RoleSyncService::new(&ctx)
        .handle_reaction(rules_reaction(ReactionKind::Remove, actor()))
        .await
        .unwrap();

    assert_eq!(outcome, RoleSyncOutcome::Revoked);
    assert_eq!(
        gateway.mutations(),
        vec![GatewayCall::Revoke(GUILD_ID, Snowflake::new(ACTOR), VIEWER_ROLE_ID)]
    );
    assert_eq!(gateway.roles_of(Snowflake::new(ACTOR)), vec![SUB_ROLE_ID]);
}

#[tokio::test]
async fn test_unreact_without_role_does_nothing() {
    let gateway = guild_with_actor(&[]);
    let ctx = context(&gateway, true);

    let outcome = RoleSyncService::new(&ctx)
        .handle_reaction(rules_reaction(ReactionKind::Remove, actor()))
        .await
        .unwrap();

    assert_eq!(outcome, RoleSyncOutcome::AlreadySynced);
    assert!(gateway.mutations().is_empty());
}

#[tokio::test]
async fn test_unreact_guards_block_revocation() {
    let gateway = guild_with_actor(&[VIEWER_ROLE_ID]);
    let ctx = context(&gateway, true);
    let service = RoleSyncService::new(&ctx);

    let mut wrong_channel = rules_reaction(ReactionKind::Remove, actor());
    wrong_channel.channel_id = OTHER_CHANNEL_ID;
    let mut wrong_message = rules_reaction(ReactionKind::Remove, actor());
    wrong_message.message_id = OTHER_MESSAGE_ID;
    let mut wrong_emoji = rules_reaction(ReactionKind::Remove, actor());
    wrong_emoji.emoji = Emoji::Unicode("❌".to_string());
    let bot = rules_reaction(
        ReactionKind::Remove,
        PlatformUser::bot(Snowflake::new(ACTOR), "keeper"),
    );

    let cases = [
        (wrong_channel, IgnoreReason::WrongChannel),
        (wrong_message, IgnoreReason::WrongMessage),
        (wrong_emoji, IgnoreReason::WrongEmoji),
        (bot, IgnoreReason::BotActor),
    ];
    for (event, reason) in cases {
        let outcome = service.handle_reaction(event).await.unwrap();
        assert_eq!(outcome, RoleSyncOutcome::Ignored(reason));
    }

    assert!(gateway.mutations().is_empty());
    assert_eq!(gateway.count(|c| matches!(c, GatewayCall::FetchMember(..))), 0);
    assert_eq!(gateway.roles_of(Snowflake::new(ACTOR)), vec![VIEWER_ROLE_ID]);
}

#[tokio::test]
async fn test_partial_actor_is_resolved_before_message_check() {
    let gateway = guild_with_actor(&[]);
    let ctx = context(&gateway, true);
    let service = RoleSyncService::new(&ctx);

    for kind in [ReactionKind::Add, ReactionKind::Remove] {
        let mut event = partial_rules_reaction(kind, Snowflake::new(ACTOR));
        event.message_id = OTHER_MESSAGE_ID;
        let outcome = service.handle_reaction(event).await.unwrap();
        assert_eq!(outcome, RoleSyncOutcome::Ignored(IgnoreReason::WrongMessage));
    }

    assert_eq!(
        gateway.calls(),
        vec![
            GatewayCall::FetchUser(Snowflake::new(ACTOR)),
            GatewayCall::FetchUser(Snowflake::new(ACTOR)),
        ]
    );
}
