use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use editor::{
    Command, Editor, Event, FfmpegMediaBackend, seconds_from_ticks, ticks_from_seconds,
};

fn main() -> io::Result<()> {
    init_tracing();

    let mut editor = Editor::with_ffmpeg();
    let stdin = io::stdin();
    let mut stdout = io::stdout();

    if let Some(path) = std::env::args_os().nth(1) {
        match editor.handle_command(Command::Load {
            path: PathBuf::from(path),
        }) {
            Ok(events) => {
                for event in events {
                    print_event(&event);
                }
            }
            Err(error) => println!("error: {error}"),
        }
    }

    println!(
        "commands: load <path> | seek <seconds> | play | mute | split <seconds> | save | clips | quit"
    );
    loop {
        print!("> ");
        stdout.flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            return Ok(());
        }
        let Some(command) = parse_line(line.trim()) else {
            match line.trim() {
                "" => continue,
                "quit" | "exit" => return Ok(()),
                "clips" => {
                    print_clips(&editor);
                    continue;
                }
                other => {
                    println!("unknown command: {other}");
                    continue;
                }
            }
        };

        match editor.handle_command(command) {
            Ok(events) => {
                for event in events {
                    print_event(&event);
                }
            }
            Err(error) => println!("error: {error}"),
        }
    }
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt::try_init();
}

fn parse_line(line: &str) -> Option<Command> {
    let mut parts = line.split_whitespace();
    match parts.next()? {
        "load" => Some(Command::Load {
            path: PathBuf::from(parts.next()?),
        }),
        "seek" => {
            let seconds: f64 = parts.next()?.parse().ok()?;
            Some(Command::Scrub {
                t_tl: ticks_from_seconds(seconds),
            })
        }
        "play" => Some(Command::TogglePlayback),
        "mute" => Some(Command::ToggleMute),
        "split" => {
            let seconds: f64 = parts.next()?.parse().ok()?;
            Some(Command::Split {
                at_tl: ticks_from_seconds(seconds),
            })
        }
        "save" => Some(Command::Save),
        _ => None,
    }
}

fn print_event(event: &Event) {
    match event {
        Event::SourceChanged(snapshot) => {
            println!(
                "loaded {} ({}x{}, {:.2}s)",
                snapshot.source.path.display(),
                snapshot.source.width,
                snapshot.source.height,
                seconds_from_ticks(snapshot.duration_tl)
            );
        }
        Event::PositionChanged { t_tl } => {
            println!("position {:.2}s", seconds_from_ticks(*t_tl));
        }
        Event::PlaybackChanged { playing } => {
            println!("playing: {playing}");
        }
        Event::MuteChanged { muted } => {
            println!("muted: {muted}");
        }
        Event::ClipsChanged(snapshot) => {
            println!("{} clips:", snapshot.clips.len());
            for clip in &snapshot.clips {
                println!(
                    "  #{} {:.2}s - {:.2}s",
                    clip.id,
                    seconds_from_ticks(clip.start_tl),
                    seconds_from_ticks(clip.end_tl)
                );
            }
        }
        Event::SaveCompleted { clip_count } => {
            println!("saved edit plan with {clip_count} clips");
        }
        Event::Error(error) => {
            println!("error: {}", error.message);
        }
    }
}

fn print_clips(editor: &Editor<FfmpegMediaBackend>) {
    match editor.snapshot() {
        Some(snapshot) => {
            for clip in &snapshot.clips {
                println!(
                    "#{} {:.2}s - {:.2}s{}",
                    clip.id,
                    seconds_from_ticks(clip.start_tl),
                    seconds_from_ticks(clip.end_tl),
                    if clip.thumbnail.is_some() {
                        " [thumb]"
                    } else {
                        ""
                    }
                );
            }
        }
        None => println!("no source loaded"),
    }
}
