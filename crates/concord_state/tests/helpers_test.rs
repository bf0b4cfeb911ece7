//! Tests for display helpers and permission resolution.

mod test_utils;

use concord_core::{
    Channel, Color, Guild, Member, Message, Overwrite, OverwriteKind, Permissions, Role, User,
};
use concord_store::Store;
use test_utils::{MockApi, MockGateway, id, state_with};

const GUILD: u64 = 1;
const OWNER: u64 = 999;
const MORPHEUS: u64 = 100;
const OPERATOR_ROLE: u64 = 2;
const CAPTAIN_ROLE: u64 = 3;

fn guild_message(author: User) -> Message {
    Message::new(5000u64, 10u64, author, "hello").with_guild_id(id(GUILD))
}

/// A guild where @everyone may view and send, operators may manage messages,
/// and the channel denies sending to @everyone.
fn populated_api() -> MockApi {
    let everyone = Role::new(GUILD, "@everyone")
        .with_permissions(Permissions::VIEW_CHANNEL | Permissions::SEND_MESSAGES);
    let operator = Role::new(OPERATOR_ROLE, "operator")
        .with_permissions(Permissions::MANAGE_MESSAGES)
        .with_color(Color::new(0x3498db))
        .with_position(1);
    let captain = Role::new(CAPTAIN_ROLE, "captain")
        .with_color(Color::new(0xe74c3c))
        .with_position(5);

    let channel = Channel::guild_text(10u64, GUILD, "general").with_permission_overwrites(vec![
        Overwrite {
            id: id(GUILD),
            kind: OverwriteKind::Role,
            allow: Permissions::NONE,
            deny: Permissions::SEND_MESSAGES,
        },
    ]);

    let mut morpheus = Member::new(User::new(MORPHEUS, "morpheus"))
        .with_role_ids(vec![id(OPERATOR_ROLE), id(CAPTAIN_ROLE)]);
    morpheus.nick = Some("Captain".to_string());

    MockApi::new()
        .with_guild(Guild::new(GUILD, "zion", OWNER))
        .with_channel(channel)
        .with_channel(Channel::direct(50u64, User::new(MORPHEUS, "morpheus")))
        .with_role(GUILD, everyone)
        .with_role(GUILD, operator)
        .with_role(GUILD, captain)
        .with_member(GUILD, morpheus)
        .with_member(GUILD, Member::new(User::new(OWNER, "oracle")))
}

#[tokio::test]
async fn test_author_display_name_prefers_nickname() {
    let api = populated_api();
    let (state, _store) = state_with(&api, &MockGateway::new());

    let message = guild_message(User::new(MORPHEUS, "morpheus"));
    assert_eq!(state.author_display_name(&message).await, "Captain");
}

#[tokio::test]
async fn test_author_display_name_outside_guild_skips_lookups() {
    let api = populated_api();
    let (state, _store) = state_with(&api, &MockGateway::new());

    let message = Message::new(5000u64, 50u64, User::new(MORPHEUS, "morpheus"), "hi");
    assert_eq!(state.author_display_name(&message).await, "morpheus");
    assert_eq!(state.author_color(&message).await, Color::DEFAULT_MEMBER);
    assert_eq!(api.call_count(), 0);
}

#[tokio::test]
async fn test_author_display_name_falls_back_to_username() {
    let api = populated_api();
    let (state, _store) = state_with(&api, &MockGateway::new());

    let message = guild_message(User::new(7u64, "neo"));
    assert_eq!(state.author_display_name(&message).await, "neo");
}

#[tokio::test]
async fn test_member_display_name_is_strict() {
    let api = populated_api();
    let (state, _store) = state_with(&api, &MockGateway::new());

    assert_eq!(
        state.member_display_name(id(GUILD), id(OWNER)).await.unwrap(),
        "oracle"
    );
    assert!(state.member_display_name(id(GUILD), id(7)).await.is_err());
}

#[tokio::test]
async fn test_colors_use_highest_colored_role() {
    let api = populated_api();
    let (state, _store) = state_with(&api, &MockGateway::new());

    let message = guild_message(User::new(MORPHEUS, "morpheus"));
    assert_eq!(state.author_color(&message).await, Color::new(0xe74c3c));
    assert_eq!(
        state.member_color(id(GUILD), id(OWNER)).await,
        Color::DEFAULT_MEMBER
    );
}

#[tokio::test]
async fn test_member_color_failure_is_default() {
    let api = populated_api();
    api.fail("roles");
    let (state, _store) = state_with(&api, &MockGateway::new());

    assert_eq!(
        state.member_color(id(GUILD), id(MORPHEUS)).await,
        Color::DEFAULT_MEMBER
    );
    assert_eq!(
        state.member_color(id(GUILD), id(7)).await,
        Color::DEFAULT_MEMBER
    );
}

#[tokio::test]
async fn test_permissions_apply_roles_and_overwrites() {
    let api = populated_api();
    let (state, _store) = state_with(&api, &MockGateway::new());

    let perms = state.permissions(id(10), id(MORPHEUS)).await.unwrap();

    assert!(perms.contains(Permissions::VIEW_CHANNEL));
    assert!(perms.contains(Permissions::MANAGE_MESSAGES));
    assert!(!perms.contains(Permissions::SEND_MESSAGES));

    let owner = state.permissions(id(10), id(OWNER)).await.unwrap();
    assert_eq!(owner, Permissions::ALL);
}

#[tokio::test]
async fn test_permissions_use_stored_entities() {
    let api = populated_api();
    let (state, store) = state_with(&api, &MockGateway::new());
    state.permissions(id(10), id(MORPHEUS)).await.unwrap();
    let calls = api.call_count();

    state.permissions(id(10), id(MORPHEUS)).await.unwrap();

    assert_eq!(api.call_count(), calls);
    assert!(store.roles(id(GUILD)).await.is_ok());
}

#[tokio::test]
async fn test_permission_failures_name_their_stage() {
    let api = populated_api();
    let (state, _store) = state_with(&api, &MockGateway::new());

    let err = state.permissions(id(404), id(MORPHEUS)).await.unwrap_err();
    assert_eq!(err.stage(), Some("channel"));
    assert!(err.to_string().contains("Failed to get channel"));

    let err = state.permissions(id(10), id(7)).await.unwrap_err();
    assert_eq!(err.stage(), Some("member"));

    api.fail("roles");
    let err = state.permissions(id(10), id(MORPHEUS)).await.unwrap_err();
    assert_eq!(err.stage(), Some("roles"));
}

#[tokio::test]
async fn test_permissions_in_private_channel_fail_at_guild() {
    let api = populated_api();
    let (state, _store) = state_with(&api, &MockGateway::new());

    let err = state.permissions(id(50), id(MORPHEUS)).await.unwrap_err();

    assert_eq!(err.stage(), Some("guild"));
    assert!(err.is_not_found());
}

#[tokio::test]
async fn test_permissions_guild_failure() {
    let api = MockApi::new().with_channel(Channel::guild_text(10u64, GUILD, "general"));
    let (state, _store) = state_with(&api, &MockGateway::new());

    let err = state.permissions(id(10), id(MORPHEUS)).await.unwrap_err();

    assert_eq!(err.stage(), Some("guild"));
    assert!(!err.is_not_found());
}
