use kira::Tween;
use kira::sound::static_sound::{StaticSoundData, StaticSoundHandle};
use kira::{AudioManager, AudioManagerSettings, DefaultBackend};
use std::collections::HashMap;
use std::error::Error;

/// Sound cues fired on state-transition edges.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Cue {
    /// An enemy switched from idle to pursuit.
    Aggression,
    /// An enemy walked into a trap.
    Death,
    /// Player movement (looped while walking).
    Footstep,
    /// Player landed from a jump.
    JumpImpact,
}

impl Cue {
    const ALL: [Cue; 4] = [Cue::Aggression, Cue::Death, Cue::Footstep, Cue::JumpImpact];

    fn file_name(self) -> &'static str {
        match self {
            Cue::Aggression => "aggression.ogg",
            Cue::Death => "death.ogg",
            Cue::Footstep => "walking.mp3",
            Cue::JumpImpact => "jump_impact.ogg",
        }
    }
}

/// Fire-and-forget cue playback.
///
/// Playback problems never reach the simulation: a missing audio device or
/// missing sound files degrade to a silent player, and individual play
/// failures are discarded.
pub struct CuePlayer {
    audio_manager: Option<AudioManager<DefaultBackend>>,
    sounds: HashMap<Cue, StaticSoundData>,
    footstep_sound: Option<StaticSoundHandle>,
    is_walking: bool,
}

impl Default for CuePlayer {
    fn default() -> Self {
        Self::new()
    }
}

impl CuePlayer {
    pub fn new() -> Self {
        match Self::try_init() {
            Ok(player) => player,
            Err(e) => {
                log::warn!("audio unavailable, cues disabled: {e}");
                Self::silent()
            }
        }
    }

    /// A player that accepts every call and produces no sound.
    pub fn silent() -> Self {
        Self {
            audio_manager: None,
            sounds: HashMap::new(),
            footstep_sound: None,
            is_walking: false,
        }
    }

    fn try_init() -> Result<Self, Box<dyn Error>> {
        let audio_manager = AudioManager::<DefaultBackend>::new(AudioManagerSettings::default())?;

        let mut sounds = HashMap::new();
        for cue in Cue::ALL {
            // A missing file leaves that one cue silent
            if let Ok(data) = StaticSoundData::from_file(format!("assets/audio/{}", cue.file_name()))
            {
                sounds.insert(cue, data);
            }
        }

        Ok(CuePlayer {
            audio_manager: Some(audio_manager),
            sounds,
            footstep_sound: None,
            is_walking: false,
        })
    }

    /// Plays a one-shot cue, ignoring any failure.
    pub fn play(&mut self, cue: Cue) {
        let Some(manager) = self.audio_manager.as_mut() else {
            return;
        };
        let Some(data) = self.sounds.get(&cue) else {
            return;
        };
        let _ = manager.play(data.clone());
    }

    /// Starts or stops the footstep loop on movement edges.
    pub fn set_walking(&mut self, moving: bool) {
        if moving {
            self.start_walking();
        } else {
            self.stop_walking();
        }
    }

    fn start_walking(&mut self) {
        if self.is_walking {
            return;
        }
        self.is_walking = true;
        let Some(manager) = self.audio_manager.as_mut() else {
            return;
        };
        let Some(data) = self.sounds.get(&Cue::Footstep) else {
            return;
        };
        if let Ok(mut handle) = manager.play(data.clone()) {
            handle.set_loop_region(0.0..0.5);
            self.footstep_sound = Some(handle);
        }
    }

    fn stop_walking(&mut self) {
        if !self.is_walking {
            return;
        }
        self.is_walking = false;
        if let Some(mut handle) = self.footstep_sound.take() {
            handle.stop(Tween::default());
        }
    }

    pub fn is_walking(&self) -> bool {
        self.is_walking
    }
}
