//! A whole batch against a LaunchBox tree: documents and images are written,
//! then rolled back, and the tree must match what it was before.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use fp_import_launchbox::{
    GameBuilder, ImageMode, ImportMode, Install, PlaylistGameBuilder, PlaylistHeaderBuilder,
    TransferOutcome, UpdateOptions,
};
use uuid::Uuid;

const ARCADE_XML: &str = "<?xml version=\"1.0\" standalone=\"yes\"?>
<LaunchBox>
  <Game>
    <ID>00000000-0000-0000-0000-00000000000a</ID>
    <Title>A</Title>
  </Game>
  <Game>
    <ID>00000000-0000-0000-0000-00000000000b</ID>
    <Title>B</Title>
    <MaxPlayers>2</MaxPlayers>
  </Game>
</LaunchBox>
";

/// Every regular file below `root` with its content.
fn snapshot(root: &Path) -> BTreeMap<PathBuf, Vec<u8>> {
    fn walk(dir: &Path, root: &Path, out: &mut BTreeMap<PathBuf, Vec<u8>>) {
        for entry in fs::read_dir(dir).unwrap() {
            let path = entry.unwrap().path();
            let meta = fs::symlink_metadata(&path).unwrap();
            if meta.is_dir() {
                walk(&path, root, out);
            } else {
                let content = if meta.file_type().is_symlink() {
                    fs::read_link(&path).unwrap().to_string_lossy().into_owned().into_bytes()
                } else {
                    fs::read(&path).unwrap()
                };
                out.insert(path.strip_prefix(root).unwrap().to_path_buf(), content);
            }
        }
    }
    let mut out = BTreeMap::new();
    walk(root, root, &mut out);
    out
}

fn setup() -> (tempfile::TempDir, Install, PathBuf) {
    let dir = tempfile::tempdir().unwrap();
    let lb = dir.path().join("LaunchBox");
    let fp = dir.path().join("Flashpoint");
    fs::create_dir_all(lb.join("Data/Platforms")).unwrap();
    fs::write(lb.join("Data/Platforms/Arcade.xml"), ARCADE_XML).unwrap();
    fs::create_dir_all(fp.join("Logos")).unwrap();
    fs::write(fp.join("Logos/c.png"), b"logo of c").unwrap();
    fs::write(fp.join("Logos/b.png"), b"logo of b").unwrap();
    (dir, Install::new(&lb), fp)
}

fn id(n: u128) -> Uuid {
    Uuid::from_u128(n)
}

fn run_batch(install: &mut Install, fp: &Path, mode: ImageMode) {
    let options = UpdateOptions {
        import_mode: ImportMode::NewAndExisting,
        remove_obsolete: true,
    };
    let mut doc = install.open_platform_doc("Arcade", options).unwrap();
    doc.add_game(GameBuilder::new(id(0xb)).title("B prime").build());
    doc.add_game(GameBuilder::new(id(0xc)).title("C").build());
    doc.finalize();
    install.save_document(doc).unwrap();

    let mut playlist = install.open_playlist_doc("Best", options).unwrap();
    playlist.set_playlist_header(PlaylistHeaderBuilder::new(id(0xf)).name("Best").build());
    playlist.add_playlist_game(
        PlaylistGameBuilder::new(id(0xc)).game_title("C").build(),
        install.id_tracker_mut(),
    );
    install.save_document(playlist).unwrap();

    let logo_dir = install.logo_dir("Arcade");
    for name in ["b", "c"] {
        let outcome = install
            .transfer_image(
                mode,
                &fp.join(format!("Logos/{name}.png")),
                &logo_dir.join(format!("{name}.png")),
            )
            .unwrap();
        assert_eq!(outcome, TransferOutcome::Transferred);
    }
}

#[test]
fn merge_result_is_written() {
    let (_dir, mut install, fp) = setup();
    run_batch(&mut install, &fp, ImageMode::Copy);
    install.confirm_all_changes();

    let text = fs::read_to_string(install.platform_doc_path("Arcade")).unwrap();
    assert!(!text.contains("<Title>A</Title>"));
    assert!(text.contains("<Title>B prime</Title>"));
    assert!(text.contains("<MaxPlayers>2</MaxPlayers>"));
    assert!(text.contains("<Title>C</Title>"));

    let playlist = fs::read_to_string(install.playlist_doc_path("Best")).unwrap();
    assert!(playlist.contains("<LaunchBoxDbId>0</LaunchBoxDbId>"));
    assert!(install.logo_dir("Arcade").join("c.png").exists());
}

#[test]
fn rollback_after_copy_restores_tree() {
    let (dir, mut install, fp) = setup();
    let before = snapshot(dir.path());

    run_batch(&mut install, &fp, ImageMode::Copy);
    assert_eq!(install.revert_queue_len(), 4);
    assert!(install.revert_all_changes().is_empty());

    assert_eq!(snapshot(dir.path()), before);
}

#[cfg(unix)]
#[test]
fn rollback_after_relocate_restores_tree() {
    let (dir, mut install, fp) = setup();
    let before = snapshot(dir.path());

    run_batch(&mut install, &fp, ImageMode::RelocateAndLinkBack);
    assert!(fp.join("Logos/c.png").is_symlink());

    let mut remaining = install.revert_queue_len();
    while remaining > 0 {
        let left = install.revert_next_change(false).unwrap();
        assert_eq!(left, remaining - 1);
        remaining = left;
    }

    assert_eq!(snapshot(dir.path()), before);
}
