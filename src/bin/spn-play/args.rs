//! Command line: options apply to the notation that follows them.
//!
//!   spn-play [--preset NAME] [--bpm N] [--wave NAME] NOTATION ...
//!
//! Each positional argument is one voice. Every voice starts from the editor
//! defaults; `--preset` replaces tempo, waveform and envelope, and `--bpm` /
//! `--wave` override single fields afterwards. With no notation at all the
//! demo melody plays on the piano preset.

use color_eyre::eyre::{bail, eyre, Result as EyreResult, WrapErr};

use spn_player::config::{Composition, Preset, VoiceSettings};
use spn_player::schedule::Waveform;

pub const DEMO_MELODY: &str = "E4/4 E4/4 E4/4 D#4/8. A#4/16 E4/4 D#4/8. A#4/16 E4/2 \
D5/4 D5/4 D5/4 D#5/8. A#4/16 F#4/4 D#4/8. A#4/16 E4/2";

pub const USAGE: &str = "\
usage: spn-play [--preset NAME] [--bpm N] [--wave NAME] NOTATION ...

Each NOTATION is one voice, e.g. \"C4/4 E4/4 G4/2 _/4 C5/4\".
Options apply to the voice that follows them.

  --preset NAME   piano | synthesizer | drums
  --bpm N         tempo, 10 to 300
  --wave NAME     sine | sawtooth | square | triangle
  -h, --help      print this message

Keys: Space suspend/resume, q or Esc stop";

/// What the command line asked for.
pub enum Command {
    Play(Composition),
    Help,
}

#[derive(Default)]
struct Pending {
    preset: Option<Preset>,
    bpm: Option<u32>,
    wave: Option<Waveform>,
}

impl Pending {
    fn is_empty(&self) -> bool {
        self.preset.is_none() && self.bpm.is_none() && self.wave.is_none()
    }

    fn voice(self, notation: String) -> VoiceSettings {
        let mut settings = match self.preset {
            Some(preset) => VoiceSettings::from_preset(preset, notation),
            None => VoiceSettings::new(notation),
        };
        if let Some(bpm) = self.bpm {
            settings.bpm = bpm;
        }
        if let Some(wave) = self.wave {
            settings.waveform = wave;
        }
        settings
    }
}

pub fn parse<I>(args: I) -> EyreResult<Command>
where
    I: IntoIterator<Item = String>,
{
    let mut composition = Composition::new();
    let mut pending = Pending::default();
    let mut args = args.into_iter();

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "-h" | "--help" => return Ok(Command::Help),
            "--preset" => {
                let name = value(&mut args, "--preset")?;
                pending.preset = Some(name.parse()?);
            }
            "--bpm" => {
                let raw = value(&mut args, "--bpm")?;
                let bpm = raw
                    .parse::<u32>()
                    .wrap_err_with(|| format!("--bpm expects a whole number, got `{raw}`"))?;
                pending.bpm = Some(bpm);
            }
            "--wave" => {
                let name = value(&mut args, "--wave")?;
                pending.wave = Some(name.parse()?);
            }
            flag if flag.starts_with("--") => bail!("unknown option `{flag}`\n\n{USAGE}"),
            _ => {
                composition.add_voice(std::mem::take(&mut pending).voice(arg));
            }
        }
    }

    if composition.voices.is_empty() {
        let demo = Pending {
            preset: pending.preset.or(Some(Preset::Piano)),
            ..pending
        };
        composition.add_voice(demo.voice(DEMO_MELODY.to_string()));
    } else if !pending.is_empty() {
        bail!("options after the last notation have no voice to apply to");
    }

    Ok(Command::Play(composition))
}

fn value(args: &mut impl Iterator<Item = String>, flag: &str) -> EyreResult<String> {
    args.next().ok_or_else(|| eyre!("{flag} needs a value"))
}
