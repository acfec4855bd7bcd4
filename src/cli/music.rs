//! Interactive music player

use anyhow::{Context, Result};
use tokio::io::{AsyncBufReadExt, BufReader};

use cyberfolio::music::{MusicPlayer, PlaylistKind};

fn on_off(value: bool) -> &'static str {
    if value { "ON" } else { "OFF" }
}

fn print_tracks(player: &MusicPlayer) {
    println!("Playlist: {}", player.playlist().as_str().to_uppercase());
    for (index, track) in player.tracks().iter().enumerate() {
        let marker = if index == player.current_index() { ">" } else { " " };
        println!(
            "{} {}. {} - {} [{}]",
            marker, index, track.title, track.artist, track.duration
        );
    }
}

/// Run the player until the user quits
pub async fn music_command(player: &mut MusicPlayer) -> Result<()> {
    println!(
        "CYBER_AUDIO - play, next, prev, shuffle, repeat, volume <0-100>, playlist <name>, <track number>, list, q"
    );
    print_tracks(player);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await.context("Failed to read input")? {
        let mut words = line.split_whitespace();
        let Some(command) = words.next() else {
            continue;
        };
        let arg = words.next();

        match command {
            "q" | "quit" => break,
            "play" | "pause" => {
                if player.toggle_play() {
                    println!("♪ {}", player.now_playing().title);
                } else {
                    println!("Music paused");
                }
            }
            "next" => println!("► {}", player.next_track().title),
            "prev" => println!("◄ {}", player.previous_track().title),
            "shuffle" => println!("Shuffle: {}", on_off(player.toggle_shuffle())),
            "repeat" => println!("Repeat: {}", on_off(player.toggle_repeat())),
            "volume" => match arg.and_then(|v| v.parse::<f32>().ok()) {
                Some(percent) => {
                    player.set_volume(percent / 100.0);
                    println!("Volume: {}%", player.volume_percent());
                }
                None => println!("Volume: {}%", player.volume_percent()),
            },
            "playlist" => {
                let kind = PlaylistKind::parse(arg.unwrap_or_default());
                player.switch_playlist(kind);
                print_tracks(player);
            }
            "list" => print_tracks(player),
            other => match other.parse::<usize>() {
                Ok(index) if player.select_track(index) => {
                    println!("Selected: {}", player.now_playing().title)
                }
                _ => println!("Unknown command: {}", other),
            },
        }
    }

    Ok(())
}
