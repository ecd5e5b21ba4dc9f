use std::{
    io::ErrorKind,
    process::{Command, Stdio},
    thread::{self, JoinHandle},
};

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SoundSettings {
    pub enabled: bool,
    /// Program followed by its arguments; the sound file is appended last.
    pub command: Vec<String>,
    pub back_to_work_sound: String,
    pub break_sound: String,
}

impl Default for SoundSettings {
    fn default() -> Self {
        if cfg!(target_os = "macos") {
            Self {
                enabled: true,
                command: vec!["afplay".into(), "-v".into(), "5".into()],
                back_to_work_sound: "/System/Library/Sounds/Glass.aiff".into(),
                break_sound: "/System/Library/Sounds/Ping.aiff".into(),
            }
        } else {
            Self {
                enabled: true,
                command: vec!["paplay".into()],
                back_to_work_sound: "/usr/share/sounds/freedesktop/stereo/bell.oga".into(),
                break_sound: "/usr/share/sounds/freedesktop/stereo/complete.oga".into(),
            }
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PlaybackOutcome {
    Played,
    CommandMissing,
    Failed(String),
}

#[derive(Clone, Debug)]
pub struct SoundNotifier {
    settings: SoundSettings,
}

impl SoundNotifier {
    pub fn new(settings: SoundSettings) -> Self {
        Self { settings }
    }

    /// Fire and forget: playback runs on its own thread and only ever logs.
    /// The handle is returned so it can be joined in tests; dropping it detaches.
    pub fn play(&self, was_break: bool) -> Option<JoinHandle<PlaybackOutcome>> {
        if !self.settings.enabled {
            return None;
        }

        let Some((program, args)) = self.settings.command.split_first() else {
            warn!("sound enabled but no command configured");
            return None;
        };

        let sound_file = if was_break {
            self.settings.back_to_work_sound.clone()
        } else {
            self.settings.break_sound.clone()
        };
        let program = program.clone();
        let args = args.to_vec();

        let spawned = thread::Builder::new()
            .name("timy-sound".to_string())
            .spawn(move || run_player(&program, &args, &sound_file));

        match spawned {
            Ok(handle) => Some(handle),
            Err(error) => {
                warn!(error = %error, "could not start sound thread");
                None
            }
        }
    }
}

fn run_player(program: &str, args: &[String], sound_file: &str) -> PlaybackOutcome {
    let result = Command::new(program)
        .args(args)
        .arg(sound_file)
        .stdin(Stdio::null())
        .output();

    match result {
        Ok(output) if output.status.success() => {
            debug!(program, sound_file, "played notification sound");
            PlaybackOutcome::Played
        }
        Ok(output) => {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            warn!(program, sound_file, status = %output.status, stderr = %stderr, "sound command failed");
            PlaybackOutcome::Failed(output.status.to_string())
        }
        Err(error) if error.kind() == ErrorKind::NotFound => {
            warn!(program, "sound command not found");
            PlaybackOutcome::CommandMissing
        }
        Err(error) => {
            warn!(program, error = %error, "sound playback error");
            PlaybackOutcome::Failed(error.to_string())
        }
    }
}
