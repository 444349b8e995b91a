use anyhow::{bail, Result};
use clap::{Parser, Subcommand, ValueEnum};
use std::io;
use std::path::PathBuf;

use zinput::clock::SystemClock;
use zinput::display::{terminal_size, TextScreen};
use zinput::error::InputError;
use zinput::escape::sequence_for;
use zinput::filename::FilePurpose;
use zinput::header::{Config, StoryHeader};
use zinput::input::StdinConsole;
use zinput::session::{InputSession, SessionConfig};
use zinput::zchar::{self, ZChar};

#[derive(Parser)]
#[command(name = "zinput")]
#[command(about = "Line-at-a-time input for text adventures on dumb terminals")]
struct Cli {
    /// speed factor for timed input; 0 never times out
    #[arg(long, default_value_t = 1.0)]
    speed: f32,
    /// pause with ***MORE*** instead of scrolling straight on
    #[arg(long)]
    more_prompts: bool,
    /// keep every file in this directory
    #[arg(short = 'R', long)]
    restricted_path: Option<PathBuf>,
    /// a restore is under way; take file names as given
    #[arg(long)]
    restore: bool,
    #[arg(long)]
    rows: Option<u16>,
    #[arg(long)]
    columns: Option<u16>,
    /// version of the story being run
    #[arg(long, default_value_t = 5)]
    story_version: u8,
    /// runtime setting to apply at startup, e.g. -r lt0 -r sf2 (repeatable)
    #[arg(short = 'r', value_name = "SETTING")]
    settings: Vec<String>,
    #[command(subcommand)]
    mode: Option<Mode>,
}

#[derive(Subcommand)]
enum Mode {
    /// read single keys until \X (quit)
    Keys {
        /// tenths of a second
        #[arg(long, default_value_t = 0)]
        timeout: u32,
    },
    /// read lines until one ends with \X (quit)
    Lines {
        /// tenths of a second
        #[arg(long, default_value_t = 0)]
        timeout: u32,
    },
    /// ask for a file name once
    File {
        #[arg(long, default_value = "story.sav")]
        default: String,
        #[arg(value_enum, default_value = "save")]
        purpose: Purpose,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum Purpose {
    Save,
    Restore,
    Script,
    Record,
    Playback,
    SaveAux,
    LoadAux,
    NoPrompt,
}

impl From<Purpose> for FilePurpose {
    fn from(p: Purpose) -> Self {
        match p {
            Purpose::Save => FilePurpose::Save,
            Purpose::Restore => FilePurpose::Restore,
            Purpose::Script => FilePurpose::Script,
            Purpose::Record => FilePurpose::Record,
            Purpose::Playback => FilePurpose::Playback,
            Purpose::SaveAux => FilePurpose::SaveAux,
            Purpose::LoadAux => FilePurpose::LoadAux,
            Purpose::NoPrompt => FilePurpose::NoPrompt,
        }
    }
}

fn key_name(c: ZChar) -> String {
    match c {
        zchar::TIME_OUT => "(timed out)".to_string(),
        _ => sequence_for(c)
            .unwrap_or_else(|| char::from_u32(u32::from(c)).unwrap_or('?').to_string()),
    }
}

fn run(cli: Cli) -> Result<()> {
    if cli.speed < 0.0 {
        bail!("speed factor can't be negative: {}", cli.speed);
    }
    let (columns, rows) = terminal_size().unwrap_or((80, 24));
    let columns = cli.columns.unwrap_or(columns);
    let rows = cli.rows.unwrap_or(rows);

    let mut screen = TextScreen::new(io::stdout(), rows, columns);
    let mut console = StdinConsole::new();
    let clock = SystemClock::new();
    let config = SessionConfig {
        speed: cli.speed,
        more_prompts: cli.more_prompts,
        restricted_path: cli.restricted_path,
        restore_mode: cli.restore,
    };
    let mut session = InputSession::new(&mut console, &mut screen, &clock, config);

    for setting in &cli.settings {
        if !session.apply_setting(setting, false, true)? {
            bail!("unknown setting: {}", setting);
        }
    }

    let mut header = StoryHeader::new(cli.story_version);
    session.init_input(&mut header);
    let timed = header.config.contains(Config::TIMED_INPUT);
    log::info!("story version {}, timed input {}", header.version, timed);
    // a story that wasn't told it can time input never asks to
    let timeout_for = |t: u32| if timed { t } else { 0 };

    match cli.mode.unwrap_or(Mode::Lines { timeout: 0 }) {
        Mode::Keys { timeout } => loop {
            let c = session.read_key(timeout_for(timeout), true)?;
            session
                .screen()
                .put_str(&format!("key {}\n", key_name(c)))?;
            if c == zchar::HKEY_QUIT {
                break;
            }
        },
        Mode::Lines { timeout } => {
            let mut buf = Vec::new();
            let mut continued = false;
            loop {
                let term = session.read_line(0, &mut buf, timeout_for(timeout), columns, continued)?;
                if term == zchar::TIME_OUT {
                    // the story would do something here, then carry on
                    session.screen().put_str("\n[time passes]\n")?;
                    continued = true;
                    continue;
                }
                let text: String = buf
                    .iter()
                    .map(|c| char::from_u32(u32::from(*c)).unwrap_or('?'))
                    .collect();
                session
                    .screen()
                    .put_str(&format!("\n\"{}\" ended by {}\n", text, key_name(term)))?;
                if term == zchar::HKEY_QUIT {
                    break;
                }
                session.more_prompt()?;
                buf.clear();
                continued = false;
            }
        }
        Mode::File { default, purpose } => {
            match session.read_file_name(&default, purpose.into())? {
                Some(path) => session
                    .screen()
                    .put_str(&format!("\nfile: {}\n", path.display()))?,
                None => session.screen().put_str("\nno file\n")?,
            }
        }
    }
    session.screen().show_screen(false)?;
    Ok(())
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();
    match run(cli) {
        // input running out is how a dumb terminal session normally ends
        Err(e) if matches!(e.downcast_ref::<InputError>(), Some(InputError::EndOfInput)) => {
            eprintln!("\nEOT");
            Ok(())
        }
        other => other,
    }
}
