//! Tests for the channel stage.

mod test_utils;

use cordshift_core::{ChannelDescriptor, ChannelKind, OverwriteTarget, PermissionOverwrite};
use cordshift_interface::PacedOperation;
use cordshift_migrate::{
    CONVERTED_FORUM_MARKER, ChannelMigrator, DEFAULT_VOICE_BITRATE, EntityKind, IdentityMap,
};
use test_utils::{Harness, category, channel, channel_with_overwrites};

#[tokio::test]
async fn test_categories_are_created_before_channels() {
    let harness = Harness::new();
    let source = vec![
        channel("c1", "general", ChannelKind::Text, Some("cat1"), 0),
        category("cat1", "Text Channels", 1),
        channel("c2", "lounge", ChannelKind::Voice, Some("cat1"), 1),
        category("cat0", "Info", 0),
    ];
    let mut ids = IdentityMap::new();

    let tally = ChannelMigrator::new(harness.context())
        .migrate(&source, "dest-guild", true, None, &mut ids)
        .await;

    let names: Vec<String> = harness
        .destination
        .created_channels()
        .iter()
        .map(|c| c.name().clone())
        .collect();
    assert_eq!(names, vec!["Info", "Text Channels", "general", "lounge"]);
    assert_eq!(tally.categories.created, 2);
    assert_eq!(tally.channels.created, 2);
    assert_eq!(harness.pacer.count(PacedOperation::ChannelCreate), 4);
}

#[tokio::test]
async fn test_parent_resolves_through_identity_map() {
    let harness = Harness::new();
    let source = vec![
        category("cat1", "Text Channels", 0),
        channel("c1", "general", ChannelKind::Text, Some("cat1"), 0),
        channel("c2", "orphan", ChannelKind::Text, Some("missing-cat"), 1),
        channel("c3", "top-level", ChannelKind::Text, None, 2),
    ];
    let mut ids = IdentityMap::new();

    ChannelMigrator::new(harness.context())
        .migrate(&source, "dest-guild", false, None, &mut ids)
        .await;

    let created = harness.destination.created_channels();
    let category_id = ids
        .get(EntityKind::Category, "cat1")
        .map(str::to_string);
    assert!(category_id.is_some());
    assert_eq!(*created[1].parent_id(), category_id);
    assert_eq!(*created[2].parent_id(), None);
    assert_eq!(*created[3].parent_id(), None);
}

#[tokio::test]
async fn test_channel_type_dispatch() {
    let harness = Harness::new();
    let forum = ChannelDescriptor::builder()
        .id("c5")
        .name("help")
        .kind(ChannelKind::Forum)
        .position(4)
        .topic(Some("Ask here".to_string()))
        .build()
        .expect("Valid forum");
    let source = vec![
        channel("c1", "general", ChannelKind::Text, None, 0),
        channel("c2", "news", ChannelKind::Announcement, None, 1),
        channel("c3", "lounge", ChannelKind::Voice, None, 2),
        channel("c4", "stage", ChannelKind::Stage, None, 3),
        forum,
        channel("c6", "a-thread", ChannelKind::PublicThread, None, 5),
        channel("c7", "gallery", ChannelKind::Media, None, 6),
    ];
    let mut ids = IdentityMap::new();

    let tally = ChannelMigrator::new(harness.context())
        .migrate(&source, "dest-guild", false, None, &mut ids)
        .await;

    let created = harness.destination.created_channels();
    let kinds: Vec<(String, ChannelKind)> = created
        .iter()
        .map(|c| (c.name().clone(), *c.kind()))
        .collect();
    assert_eq!(
        kinds,
        vec![
            ("general".to_string(), ChannelKind::Text),
            ("news".to_string(), ChannelKind::Text),
            ("lounge".to_string(), ChannelKind::Voice),
            ("help".to_string(), ChannelKind::Text),
        ]
    );
    assert_eq!(*created[2].bitrate(), Some(DEFAULT_VOICE_BITRATE));
    assert_eq!(*created[2].user_limit(), Some(0));
    assert_eq!(
        created[3].topic().as_deref(),
        Some(format!("{} Ask here", CONVERTED_FORUM_MARKER).as_str())
    );

    assert_eq!(tally.channels.created, 4);
    assert_eq!(tally.channels.skipped, 3);
    assert_eq!(
        harness.sink.notice_features(),
        vec!["Stage channel", "Forum channel", "Thread", "Channel type: 16"]
    );
    assert_eq!(ids.get(EntityKind::Channel, "c4"), None);
}

#[tokio::test]
async fn test_forum_without_topic_gets_bare_marker() {
    let harness = Harness::new();
    let source = vec![channel("c1", "help", ChannelKind::Forum, None, 0)];
    let mut ids = IdentityMap::new();

    ChannelMigrator::new(harness.context())
        .migrate(&source, "dest-guild", false, None, &mut ids)
        .await;

    let created = harness.destination.created_channels();
    assert_eq!(created[0].topic().as_deref(), Some(CONVERTED_FORUM_MARKER));
}

#[tokio::test]
async fn test_overwrites_follow_source_order_and_skip_unmapped() {
    let harness = Harness::new();
    let source = vec![channel_with_overwrites(
        "c1",
        "staff",
        vec![
            PermissionOverwrite::role("r1", 1024, 0),
            PermissionOverwrite::role("r-unknown", 1, 1),
            PermissionOverwrite::new("user-7", OverwriteTarget::Member, 8, 0),
            PermissionOverwrite::role("r2", 0, 2048),
        ],
    )];
    let mut ids = IdentityMap::new();
    ids.put(EntityKind::Role, "r1", "d-r1");
    ids.put(EntityKind::Role, "r2", "d-r2");

    let tally = ChannelMigrator::new(harness.context())
        .migrate(&source, "dest-guild", true, None, &mut ids)
        .await;

    let edits = harness.destination.permission_edits();
    let targets: Vec<&str> = edits.iter().map(|(_, target, _)| target.as_str()).collect();
    assert_eq!(targets, vec!["d-r1", "d-r2"]);
    assert_eq!(edits[0].2.allow, 1024);
    assert_eq!(edits[1].2.deny, 2048);
    assert!(edits.iter().all(|(_, _, e)| e.target == OverwriteTarget::Role));
    let channel_id = ids.get(EntityKind::Channel, "c1").expect("Mapped channel");
    assert!(edits.iter().all(|(c, _, _)| c == channel_id));
    assert_eq!(tally.overwrites_applied, 2);
}

#[tokio::test]
async fn test_permissions_disabled_applies_no_overwrites() {
    let harness = Harness::new();
    let source = vec![channel_with_overwrites(
        "c1",
        "staff",
        vec![PermissionOverwrite::role("r1", 1024, 0)],
    )];
    let mut ids = IdentityMap::new();
    ids.put(EntityKind::Role, "r1", "d-r1");

    ChannelMigrator::new(harness.context())
        .migrate(&source, "dest-guild", false, None, &mut ids)
        .await;

    assert!(harness.destination.permission_edits().is_empty());
}

#[tokio::test]
async fn test_rejected_overwrite_does_not_stop_the_rest() {
    let harness = Harness::new();
    harness.destination.fail_name("d-r1");
    let source = vec![channel_with_overwrites(
        "c1",
        "staff",
        vec![
            PermissionOverwrite::role("r1", 1024, 0),
            PermissionOverwrite::role("r2", 1024, 0),
        ],
    )];
    let mut ids = IdentityMap::new();
    ids.put(EntityKind::Role, "r1", "d-r1");
    ids.put(EntityKind::Role, "r2", "d-r2");

    let tally = ChannelMigrator::new(harness.context())
        .migrate(&source, "dest-guild", true, None, &mut ids)
        .await;

    assert_eq!(tally.overwrites_failed, 1);
    assert_eq!(tally.overwrites_applied, 1);
    assert_eq!(tally.channels.created, 1);
}

#[tokio::test]
async fn test_failed_category_leaves_children_unparented() {
    let harness = Harness::new();
    harness.destination.fail_name("Broken");
    let source = vec![
        category("cat1", "Broken", 0),
        channel("c1", "general", ChannelKind::Text, Some("cat1"), 0),
    ];
    let mut ids = IdentityMap::new();

    let tally = ChannelMigrator::new(harness.context())
        .migrate(&source, "dest-guild", false, None, &mut ids)
        .await;

    assert_eq!(tally.categories.failed, 1);
    assert_eq!(tally.channels.created, 1);
    let created = harness.destination.created_channels();
    assert_eq!(*created[1].parent_id(), None);
    assert_eq!(harness.pacer.count(PacedOperation::ChannelCreate), 1);
}

#[tokio::test]
async fn test_partial_sync_matches_by_name_within_kind() {
    let harness = Harness::new();
    let existing = vec![
        category("d-cat", "Text Channels", 0),
        channel("d-general", "general", ChannelKind::Text, Some("d-cat"), 0),
    ];
    let source = vec![
        category("cat1", "Text Channels", 0),
        channel("c1", "general", ChannelKind::Text, Some("cat1"), 0),
        channel("c2", "random", ChannelKind::Text, Some("cat1"), 1),
    ];
    let mut ids = IdentityMap::new();

    let tally = ChannelMigrator::new(harness.context())
        .migrate(&source, "dest-guild", true, Some(&existing), &mut ids)
        .await;

    assert_eq!(tally.categories.matched, 1);
    assert_eq!(tally.channels.matched, 1);
    assert_eq!(tally.channels.created, 1);
    assert_eq!(ids.get(EntityKind::Category, "cat1"), Some("d-cat"));
    assert_eq!(ids.get(EntityKind::Channel, "c1"), Some("d-general"));

    let created = harness.destination.created_channels();
    assert_eq!(created.len(), 1);
    assert_eq!(created[0].name(), "random");
    assert_eq!(created[0].parent_id().as_deref(), Some("d-cat"));
    assert_eq!(harness.pacer.count(PacedOperation::ChannelCreate), 1);
}

#[tokio::test]
async fn test_partial_sync_reapplies_overwrites_on_matched_items() {
    let harness = Harness::new();
    let existing = vec![
        category("d-cat", "Cat", 0),
        channel("d-general", "general", ChannelKind::Text, Some("d-cat"), 0),
    ];
    let source_category = ChannelDescriptor::builder()
        .id("cat1")
        .name("Cat")
        .kind(ChannelKind::Category)
        .position(0)
        .permission_overwrites(vec![PermissionOverwrite::role("r1", 1, 0)])
        .build()
        .expect("Valid category");
    let source = vec![
        source_category,
        channel_with_overwrites("c1", "general", vec![PermissionOverwrite::role("r1", 2, 0)]),
    ];
    let mut ids = IdentityMap::new();
    ids.put(EntityKind::Role, "r1", "d-r1");

    let tally = ChannelMigrator::new(harness.context())
        .migrate(&source, "dest-guild", true, Some(&existing), &mut ids)
        .await;

    assert_eq!(tally.categories.matched, 1);
    assert_eq!(tally.channels.matched, 1);
    assert!(harness.destination.created_channels().is_empty());

    let edits: Vec<(String, String, u64)> = harness
        .destination
        .permission_edits()
        .into_iter()
        .map(|(channel, target, edit)| (channel, target, edit.allow))
        .collect();
    assert_eq!(
        edits,
        vec![
            ("d-cat".to_string(), "d-r1".to_string(), 1),
            ("d-general".to_string(), "d-r1".to_string(), 2),
        ]
    );
    assert_eq!(tally.overwrites_applied, 2);
    // Matching issues no create call, so nothing is paced.
    assert_eq!(harness.pacer.count(PacedOperation::ChannelCreate), 0);
}

#[tokio::test]
async fn test_thread_and_stage_codes_are_skipped_with_notices() {
    let harness = Harness::new();
    let source = vec![
        channel("t10", "news-thread", ChannelKind::from(10u8), None, 0),
        channel("t12", "private-thread", ChannelKind::from(12u8), None, 1),
        channel("s13", "town-hall", ChannelKind::from(13u8), None, 2),
    ];
    let mut ids = IdentityMap::new();

    let tally = ChannelMigrator::new(harness.context())
        .migrate(&source, "dest-guild", false, None, &mut ids)
        .await;

    assert!(harness.destination.created_channels().is_empty());
    assert_eq!(tally.channels.created, 0);
    assert_eq!(tally.channels.skipped, 3);
    assert_eq!(
        harness.sink.notice_features(),
        vec!["Thread", "Thread", "Stage channel"]
    );
    assert_eq!(ids.len(EntityKind::Channel), 0);
}
