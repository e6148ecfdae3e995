#![allow(dead_code)]

use fp_import_flashpoint::FlashpointDb;
use rusqlite::Connection;

pub const ALPHA: &str = "11111111-1111-4111-8111-111111111111";
pub const BETA: &str = "22222222-2222-4222-8222-222222222222";
pub const GAMMA: &str = "33333333-3333-4333-8333-333333333333";
pub const DELTA: &str = "44444444-4444-4444-8444-444444444444";
pub const FAVORITES: &str = "aaaaaaaa-aaaa-4aaa-8aaa-aaaaaaaaaaaa";
pub const PUZZLES: &str = "bbbbbbbb-bbbb-4bbb-8bbb-bbbbbbbbbbbb";

/// Tables as shipped by Flashpoint, including columns the importer ignores.
pub const SCHEMA_SQL: &str = r#"
CREATE TABLE game (
    id TEXT PRIMARY KEY, parentGameId TEXT, title TEXT, alternateTitles TEXT,
    series TEXT, developer TEXT, publisher TEXT, dateAdded TEXT, dateModified TEXT,
    platform TEXT, broken BOOLEAN, extreme BOOLEAN, playMode TEXT, status TEXT,
    notes TEXT, tagsStr TEXT, source TEXT, applicationPath TEXT, launchCommand TEXT,
    releaseDate TEXT, version TEXT, originalDescription TEXT, language TEXT,
    library TEXT, orderTitle TEXT
);
CREATE TABLE additional_app (
    id TEXT PRIMARY KEY, applicationPath TEXT, autoRunBefore BOOLEAN,
    launchCommand TEXT, name TEXT, waitForExit BOOLEAN, parentGameId TEXT
);
CREATE TABLE playlist (
    id TEXT PRIMARY KEY, title TEXT, description TEXT, author TEXT, icon TEXT, library TEXT
);
CREATE TABLE playlist_game (
    id INTEGER PRIMARY KEY AUTOINCREMENT, playlistId TEXT, "order" INTEGER,
    notes TEXT, gameId TEXT
);
"#;

pub const DATA_SQL: &str = r#"
INSERT INTO game (id, title, series, developer, publisher, dateAdded, dateModified,
                  platform, broken, extreme, playMode, status, notes, source,
                  applicationPath, launchCommand, releaseDate, version,
                  originalDescription, language, library, orderTitle)
VALUES
 ('11111111-1111-4111-8111-111111111111', 'Alpha', 'Letters', 'Dev A', 'Pub A',
  '2019-01-16T01:38:26.000Z', '2020-02-01T10:00:00.000Z', 'Flash', 0, 0,
  'Single Player', 'Playable', 'note a', 'example.com', 'Flash/flashplayer.exe',
  'http://example.com/a.swf', '2008-05-01', '1.0', 'The first game', 'en', 'arcade', 'alpha'),
 ('22222222-2222-4222-8222-222222222222', 'Beta', '', 'Dev B', 'Pub B',
  '2019-01-16T01:38:26.000Z', '2019-01-16T01:38:26.000Z', 'Flash', 1, 1,
  'Single Player', 'Partial', '', '', 'Flash/flashplayer.exe',
  'http://example.com/b.swf', '2009', '', '', 'en', 'arcade', 'beta'),
 ('33333333-3333-4333-8333-333333333333', 'Gamma', '', 'Dev C', 'Pub C',
  '2019-01-16T01:38:26.000Z', '2019-01-16T01:38:26.000Z', 'HTML5', 0, 0,
  'Multiplayer', 'Playable', NULL, '', 'Basilisk/basilisk.exe',
  'http://example.com/c.html', '', '', '', 'en', 'arcade', 'gamma'),
 ('44444444-4444-4444-8444-444444444444', 'Delta', '', '', '',
  '2019-01-16T01:38:26.000Z', '2019-01-16T01:38:26.000Z', 'Flash', 0, 0,
  '', 'Playable', '', '', 'Flash/flashplayer.exe',
  'http://example.com/d.swf', '', '', '', 'en', 'theatre', 'delta');

INSERT INTO additional_app (id, applicationPath, autoRunBefore, launchCommand, name, waitForExit, parentGameId)
VALUES
 ('a0000000-0000-4000-8000-000000000001', 'manual.pdf', 0, '', 'Manual', 0,
  '11111111-1111-4111-8111-111111111111'),
 ('a0000000-0000-4000-8000-000000000002', ':extras:', 0, 'Alpha Extras', 'Extras', 0,
  '11111111-1111-4111-8111-111111111111'),
 ('a0000000-0000-4000-8000-000000000003', ':message:', 1, 'Click the cat to begin', 'Message', 1,
  '33333333-3333-4333-8333-333333333333');

INSERT INTO playlist (id, title, description, author, icon, library)
VALUES
 ('aaaaaaaa-aaaa-4aaa-8aaa-aaaaaaaaaaaa', 'Favorites', 'Best of the best', 'curator', '', 'arcade'),
 ('bbbbbbbb-bbbb-4bbb-8bbb-bbbbbbbbbbbb', 'Puzzles', 'Brain teasers', 'curator', '', 'arcade');

INSERT INTO playlist_game (playlistId, "order", notes, gameId)
VALUES
 ('aaaaaaaa-aaaa-4aaa-8aaa-aaaaaaaaaaaa', 1, '', '11111111-1111-4111-8111-111111111111'),
 ('aaaaaaaa-aaaa-4aaa-8aaa-aaaaaaaaaaaa', 0, '', '33333333-3333-4333-8333-333333333333'),
 ('bbbbbbbb-bbbb-4bbb-8bbb-bbbbbbbbbbbb', 0, '', '22222222-2222-4222-8222-222222222222');
"#;

pub fn fixture_connection() -> Connection {
    let conn = Connection::open_in_memory().unwrap();
    conn.execute_batch(SCHEMA_SQL).unwrap();
    conn.execute_batch(DATA_SQL).unwrap();
    conn
}

pub fn fixture_db() -> FlashpointDb {
    FlashpointDb::from_connection(fixture_connection())
}
