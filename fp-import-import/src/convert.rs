//! Mapping Flashpoint rows to LaunchBox records.

use fp_import_flashpoint::{FpAddApp, FpGame, FpPlaylist, FpPlaylistGame};
use fp_import_launchbox::{
    AddApp, AddAppBuilder, Game, GameBuilder, PlaylistGame, PlaylistGameBuilder, PlaylistHeader,
    PlaylistHeaderBuilder, parse_date,
};

/// LaunchBox starts every imported game through the Flashpoint launcher;
/// this is the launcher argument that plays a game or add-app by id.
pub fn play_command(id: &uuid::Uuid) -> String {
    format!("play -i {id}")
}

/// Launcher argument that shows `message` in a dialog.
pub fn show_message_command(message: &str) -> String {
    format!("show -m \"{}\"", message.replace('"', "\\\""))
}

/// Flashpoint keeps the curation notes and the original game description
/// apart; LaunchBox has one notes field.
fn combined_notes(game: &FpGame) -> String {
    let notes = game.notes.trim();
    let description = game.original_description.trim();
    match (notes.is_empty(), description.is_empty()) {
        (_, true) => notes.to_string(),
        (true, false) => description.to_string(),
        (false, false) => format!("{notes}\n\n{description}"),
    }
}

pub fn game_from_flashpoint(game: &FpGame, launcher: &str) -> Game {
    GameBuilder::new(game.id)
        .title(&game.title)
        .series(&game.series)
        .developer(&game.developer)
        .publisher(&game.publisher)
        .platform(&game.platform)
        .sort_title(&game.order_title)
        .date_added(parse_date(&game.date_added))
        .date_modified(parse_date(&game.date_modified))
        .broken(game.broken)
        .play_mode(&game.play_mode)
        .status(&game.status)
        .region(&game.language)
        .notes(combined_notes(game))
        .source(&game.source)
        .app_path(launcher)
        .command_line(play_command(&game.id))
        .release_date(parse_date(&game.release_date))
        .version(&game.version)
        .build()
}

pub fn add_app_from_flashpoint(add_app: &FpAddApp, launcher: &str) -> AddApp {
    let command = if add_app.is_message() {
        show_message_command(&add_app.launch_command)
    } else {
        play_command(&add_app.id)
    };
    AddAppBuilder::new(add_app.id, add_app.parent_game_id)
        .app_path(launcher)
        .command_line(command)
        .autorun_before(add_app.auto_run_before)
        .name(&add_app.name)
        .wait_for_exit(add_app.wait_for_exit)
        .build()
}

pub fn playlist_header_from_flashpoint(playlist: &FpPlaylist) -> PlaylistHeader {
    let mut notes = playlist.description.trim().to_string();
    let author = playlist.author.trim();
    if !author.is_empty() {
        if !notes.is_empty() {
            notes.push_str("\n\n");
        }
        notes.push_str("Author: ");
        notes.push_str(author);
    }
    PlaylistHeaderBuilder::new(playlist.id)
        .name(&playlist.title)
        .nested_name(&playlist.title)
        .notes(notes)
        .build()
}

/// `game` supplies the title and platform LaunchBox shows for the entry.
pub fn playlist_game_from_flashpoint(entry: &FpPlaylistGame, game: &FpGame) -> PlaylistGame {
    PlaylistGameBuilder::new(entry.game_id)
        .game_title(&game.title)
        .game_platform(&game.platform)
        .manual_order(entry.order)
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn fp_game() -> FpGame {
        FpGame {
            id: Uuid::from_u128(1),
            title: "Alpha".into(),
            series: String::new(),
            developer: "Dev".into(),
            publisher: String::new(),
            date_added: "2019-01-16T01:38:26.000Z".into(),
            date_modified: "garbage".into(),
            platform: "Flash".into(),
            broken: true,
            extreme: false,
            play_mode: "Single Player".into(),
            status: "Playable".into(),
            notes: "curator note".into(),
            source: String::new(),
            app_path: "Flash/flashplayer.exe".into(),
            launch_command: "http://example.com/a.swf".into(),
            release_date: "2008".into(),
            version: String::new(),
            original_description: "A game about letters".into(),
            language: "en".into(),
            library: "arcade".into(),
            order_title: "alpha".into(),
        }
    }

    #[test]
    fn game_launches_through_launcher() {
        let game = game_from_flashpoint(&fp_game(), "C:\\FP\\CLIFp.exe");
        assert_eq!(game.app_path(), "C:\\FP\\CLIFp.exe");
        assert_eq!(
            game.command_line(),
            "play -i 00000000-0000-0000-0000-000000000001"
        );
        assert_eq!(game.sort_title(), "alpha");
        assert!(game.is_broken());
    }

    #[test]
    fn game_dates_parse_or_drop() {
        let game = game_from_flashpoint(&fp_game(), "CLIFp.exe");
        assert!(game.date_added().is_some());
        assert!(game.date_modified().is_none());
        assert_eq!(
            game.release_date().map(|d| d.format("%Y-%m-%d").to_string()),
            Some("2008-01-01".to_string())
        );
    }

    #[test]
    fn notes_join_description() {
        let game = game_from_flashpoint(&fp_game(), "CLIFp.exe");
        assert_eq!(game.notes(), "curator note\n\nA game about letters");

        let mut bare = fp_game();
        bare.notes.clear();
        assert_eq!(
            game_from_flashpoint(&bare, "CLIFp.exe").notes(),
            "A game about letters"
        );
    }

    #[test]
    fn message_add_app_shows_text() {
        let add_app = FpAddApp {
            id: Uuid::from_u128(10),
            app_path: fp_import_flashpoint::ADD_APP_MESSAGE.into(),
            auto_run_before: true,
            launch_command: "Press \"Start\"".into(),
            name: "Message".into(),
            wait_for_exit: true,
            parent_game_id: Uuid::from_u128(1),
        };
        let app = add_app_from_flashpoint(&add_app, "CLIFp.exe");
        assert_eq!(app.command_line(), "show -m \"Press \\\"Start\\\"\"");
        assert_eq!(app.game_id(), Uuid::from_u128(1));
        assert!(app.is_autorun_before());
        assert!(app.is_wait_for_exit());
    }

    #[test]
    fn playlist_header_credits_author() {
        let header = playlist_header_from_flashpoint(&FpPlaylist {
            id: Uuid::from_u128(7),
            title: "Favorites".into(),
            description: "Best of".into(),
            author: "curator".into(),
        });
        assert_eq!(header.name(), "Favorites");
        assert_eq!(header.nested_name(), "Favorites");
        assert_eq!(header.notes(), "Best of\n\nAuthor: curator");
    }

    #[test]
    fn playlist_game_copies_title_and_order() {
        let entry = FpPlaylistGame {
            id: 3,
            playlist_id: Uuid::from_u128(7),
            order: 4,
            game_id: Uuid::from_u128(1),
        };
        let pg = playlist_game_from_flashpoint(&entry, &fp_game());
        assert_eq!(pg.game_title(), "Alpha");
        assert_eq!(pg.game_platform(), "Flash");
        assert_eq!(pg.manual_order(), 4);
    }
}
