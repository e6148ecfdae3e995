use super::*;

fn doc_file(kind: DocKind, name: &str) -> DocFile {
    DocFile {
        handle: DocumentHandle::new(kind, name),
        path: PathBuf::from(format!("{name}.xml")),
        file: tempfile::tempfile().unwrap(),
    }
}

fn platform_doc(import_mode: ImportMode, remove_obsolete: bool) -> PlatformDoc {
    PlatformDoc::new(
        doc_file(DocKind::Platform, "Arcade"),
        UpdateOptions {
            import_mode,
            remove_obsolete,
        },
    )
}

fn playlist_doc(import_mode: ImportMode) -> PlaylistDoc {
    PlaylistDoc::new(
        doc_file(DocKind::Playlist, "Favorites"),
        UpdateOptions {
            import_mode,
            remove_obsolete: false,
        },
    )
}

fn id(n: u128) -> Uuid {
    Uuid::from_u128(n)
}

fn game(n: u128, title: &str) -> Game {
    GameBuilder::new(id(n)).title(title).platform("Arcade").build()
}

/// Arcade holding A and B, where B carries a LaunchBox-only field.
fn seed_arcade(doc: &mut PlatformDoc) {
    doc.games.load(game(1, "A"));
    doc.games.load(
        GameBuilder::new(id(2))
            .title("B")
            .platform("Arcade")
            .other_field("Favorite", "true")
            .build(),
    );
}

fn titles(doc: &PlatformDoc) -> Vec<(Uuid, String)> {
    doc.final_games()
        .values()
        .map(|g| (g.id(), g.title().to_string()))
        .collect()
}

#[test]
fn new_and_existing_with_remove_obsolete() {
    let mut doc = platform_doc(ImportMode::NewAndExisting, true);
    seed_arcade(&mut doc);

    assert_eq!(doc.add_game(game(2, "B prime")), MergeOutcome::Updated);
    assert_eq!(doc.add_game(game(3, "C")), MergeOutcome::Inserted);
    assert_eq!(doc.finalize(), 1);

    assert_eq!(
        titles(&doc),
        vec![(id(2), "B prime".to_string()), (id(3), "C".to_string())]
    );
    let b = &doc.final_games()[&id(2)];
    assert_eq!(b.other_fields().get("Favorite").map(String::as_str), Some("true"));
    assert!(doc.existing_games().is_empty());
}

#[test]
fn new_only_with_retain() {
    let mut doc = platform_doc(ImportMode::NewOnly, false);
    seed_arcade(&mut doc);

    assert_eq!(doc.add_game(game(2, "B prime")), MergeOutcome::Kept);
    assert_eq!(doc.add_game(game(3, "C")), MergeOutcome::Inserted);
    doc.finalize();

    assert_eq!(
        titles(&doc),
        vec![
            (id(1), "A".to_string()),
            (id(2), "B".to_string()),
            (id(3), "C".to_string()),
        ]
    );
}

#[test]
fn retain_keeps_every_untouched_record() {
    let mut doc = platform_doc(ImportMode::NewAndExisting, false);
    seed_arcade(&mut doc);
    doc.finalize();
    assert_eq!(doc.final_games().len(), 2);
    assert!(doc.existing_games().is_empty());
}

#[test]
fn remove_obsolete_without_merges_empties_document() {
    let mut doc = platform_doc(ImportMode::NewAndExisting, true);
    seed_arcade(&mut doc);
    assert_eq!(doc.finalize(), 2);
    assert!(doc.final_games().is_empty());
}

#[test]
fn merging_twice_is_idempotent() {
    let mut doc = platform_doc(ImportMode::NewAndExisting, true);
    seed_arcade(&mut doc);

    let incoming = [game(2, "B prime"), game(3, "C")];
    for g in incoming.iter().cloned() {
        doc.add_game(g);
    }
    let once = doc.final_games().clone();
    for g in incoming.iter().cloned() {
        doc.add_game(g);
    }
    assert_eq!(doc.final_games(), &once);
}

#[test]
fn key_is_never_in_both_buckets() {
    let mut doc = platform_doc(ImportMode::NewOnly, false);
    seed_arcade(&mut doc);
    doc.add_game(game(1, "A again"));
    for key in doc.final_games().keys() {
        assert!(!doc.existing_games().contains_key(key));
    }
    assert!(doc.contains_game(&id(1)));
    assert!(doc.contains_game(&id(2)));
    assert!(!doc.contains_game(&id(9)));
}

#[test]
fn add_apps_merge_like_games() {
    let mut doc = platform_doc(ImportMode::NewAndExisting, true);
    doc.add_apps.load(
        AddAppBuilder::new(id(10), id(1))
            .name("Old manual")
            .other_field("Priority", "2")
            .build(),
    );
    doc.add_add_app(AddAppBuilder::new(id(10), id(1)).name("Manual").build());
    doc.finalize();

    let app = &doc.final_add_apps()[&id(10)];
    assert_eq!(app.name(), "Manual");
    assert_eq!(app.other_fields().get("Priority").map(String::as_str), Some("2"));
}

#[test]
fn new_playlist_games_get_smallest_free_id() {
    let mut tracker = FreeIndexTracker::new();
    let mut doc = playlist_doc(ImportMode::NewAndExisting);
    doc.load_playlist_game(
        {
            let mut pg = PlaylistGameBuilder::new(id(1)).build();
            pg.lb_db_id = 0;
            pg
        },
        &mut tracker,
    );
    doc.load_playlist_game(
        {
            let mut pg = PlaylistGameBuilder::new(id(2)).build();
            pg.lb_db_id = 2;
            pg
        },
        &mut tracker,
    );

    doc.add_playlist_game(PlaylistGameBuilder::new(id(3)).build(), &mut tracker);
    doc.add_playlist_game(PlaylistGameBuilder::new(id(4)).build(), &mut tracker);

    let finals = doc.final_playlist_games();
    assert_eq!(finals[&id(3)].lb_db_id(), 1);
    assert_eq!(finals[&id(4)].lb_db_id(), 3);
}

#[test]
fn replaced_playlist_game_keeps_its_id() {
    let mut tracker = FreeIndexTracker::new();
    let mut doc = playlist_doc(ImportMode::NewAndExisting);
    let mut existing = PlaylistGameBuilder::new(id(1))
        .game_title("Old")
        .other_field("Note", "keep")
        .build();
    existing.lb_db_id = 5;
    doc.load_playlist_game(existing, &mut tracker);

    let outcome = doc.add_playlist_game(
        PlaylistGameBuilder::new(id(1)).game_title("New").build(),
        &mut tracker,
    );
    assert_eq!(outcome, MergeOutcome::Updated);
    let pg = &doc.final_playlist_games()[&id(1)];
    assert_eq!(pg.game_title(), "New");
    assert_eq!(pg.lb_db_id(), 5);
    assert_eq!(pg.other_fields().get("Note").map(String::as_str), Some("keep"));
    // Only the loaded id was ever reserved.
    assert_eq!(tracker.reserved_count(), 1);
}

#[test]
fn unusable_loaded_ids_are_reassigned() {
    let mut tracker = FreeIndexTracker::new();
    let mut doc = playlist_doc(ImportMode::NewAndExisting);
    for (n, db_id) in [(1, 0), (2, 0), (3, -4)] {
        let mut pg = PlaylistGameBuilder::new(id(n)).build();
        pg.lb_db_id = db_id;
        doc.load_playlist_game(pg, &mut tracker);
    }

    let mut ids: Vec<i64> = doc
        .existing_playlist_games()
        .values()
        .map(PlaylistGame::lb_db_id)
        .collect();
    ids.sort();
    assert_eq!(ids, vec![0, 1, 2]);
}

#[test]
fn playlist_header_keeps_current_other_fields() {
    let mut doc = playlist_doc(ImportMode::NewAndExisting);
    doc.set_playlist_header(
        PlaylistHeaderBuilder::new(id(7))
            .name("Favorites")
            .other_field("SortBy", "Title")
            .build(),
    );
    doc.set_playlist_header(PlaylistHeaderBuilder::new(id(7)).name("Faves").notes("n").build());

    let header = doc.header().unwrap();
    assert_eq!(header.name(), "Faves");
    assert_eq!(header.other_fields().get("SortBy").map(String::as_str), Some("Title"));
}

#[test]
fn playlist_games_are_written_in_playlist_order() {
    let mut tracker = FreeIndexTracker::new();
    let mut doc = playlist_doc(ImportMode::NewAndExisting);
    doc.add_playlist_game(
        PlaylistGameBuilder::new(id(1)).game_title("Second").manual_order(1).build(),
        &mut tracker,
    );
    doc.add_playlist_game(
        PlaylistGameBuilder::new(id(2)).game_title("First").manual_order(0).build(),
        &mut tracker,
    );

    let mut writer = DocWriter::new();
    sealed::DocumentImpl::write_body(&doc, &mut writer);
    let text = writer.finish();
    let first = text.find("First").unwrap();
    let second = text.find("Second").unwrap();
    assert!(first < second);
}

#[test]
fn platform_config_registers_platforms_once() {
    let mut doc = PlatformConfigDoc::new(doc_file(DocKind::PlatformConfig, PLATFORM_CONFIG_NAME));
    assert!(doc.add_platform(Platform::new("Flash")));
    assert!(!doc.add_platform(Platform::new("Flash")));
    assert!(doc.contains_platform("Flash"));
    assert!(!doc.contains_platform("HTML5"));

    doc.set_media_folder("Flash", "Box - Front", "Images/Flash/Box - Front");
    doc.set_media_folder("Flash", "Box - Front", "Images/Flash/Front");
    assert_eq!(
        doc.platform_folders()["Flash"]["Box - Front"],
        "Images/Flash/Front"
    );
}

#[test]
fn handle_display_names_kind_and_name() {
    let handle = DocumentHandle::new(DocKind::Playlist, "Puzzles");
    assert_eq!(handle.to_string(), "playlist document 'Puzzles'");
    assert_ne!(handle, DocumentHandle::new(DocKind::Platform, "Puzzles"));
}
