//! Player - builds the session, opens the audio stream and runs the UI

use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use color_eyre::eyre::{eyre, Result as EyreResult, WrapErr};
use rtrb::{Consumer, Producer, RingBuffer};
use std::sync::{Arc, Mutex};

use spn_player::{
    config::Composition,
    playback::{Clock, ControlMessage, Renderer},
    schedule::Session,
    MAX_BLOCK_SIZE,
};

use crate::logger::UiLogger;
use crate::ui::{state::MAX_SHOWN_VOICES, ClockSnapshot, Exit, UiApp, UiStateInit};

const CONTROL_QUEUE: usize = 16;
const SNAPSHOT_QUEUE: usize = 64;

pub struct Player {
    composition: Composition,
    session: Session,
}

impl Player {
    /// Validate every voice up front; nothing plays unless all of them are valid.
    pub fn new(composition: Composition) -> EyreResult<Self> {
        let session = composition.session().map_err(|err| match err.offending_token() {
            Some(token) => eyre!("{err}\n  offending unit: {token}"),
            None => eyre!("{err}"),
        })?;
        Ok(Self {
            composition,
            session,
        })
    }

    pub fn run(self, logger: Option<&'static UiLogger>) -> EyreResult<Exit> {
        let host = cpal::default_host();
        let device = host
            .default_output_device()
            .ok_or_else(|| eyre!("no default output device available"))?;
        let config = device
            .default_output_config()
            .wrap_err("failed to fetch default output config")?;

        let sample_rate = config.sample_rate().0 as f64;
        let channels = config.channels() as usize;

        log::info!(
            "{} voices, {} notes, {:.2}s at {} Hz",
            self.session.voices.len(),
            self.session.entry_count(),
            self.session.finish_time,
            sample_rate
        );

        let (control_tx, control_rx) = RingBuffer::<ControlMessage>::new(CONTROL_QUEUE);
        let (snapshot_tx, snapshot_rx) = RingBuffer::<ClockSnapshot>::new(SNAPSHOT_QUEUE);

        let static_state = UiStateInit::new(&self.session, &self.composition.voices, sample_rate);

        let state = Arc::new(Mutex::new(AudioState {
            renderer: Renderer::new(&self.session, sample_rate),
            control_rx,
            snapshot_tx,
        }));

        let state_clone = state.clone();
        let mut render_buf = vec![0.0f32; MAX_BLOCK_SIZE];

        let stream = device.build_output_stream(
            &config.into(),
            move |data: &mut [f32], _| {
                let Ok(mut state) = state_clone.lock() else {
                    data.fill(0.0);
                    return;
                };
                let AudioState {
                    renderer,
                    control_rx,
                    snapshot_tx,
                } = &mut *state;

                renderer.process_messages(control_rx);

                let total_frames = data.len() / channels;
                let mut frames_written = 0;
                while frames_written < total_frames {
                    let frames_to_render = (total_frames - frames_written).min(MAX_BLOCK_SIZE);
                    let block = &mut render_buf[..frames_to_render];
                    renderer.render_block(block);

                    // Mono to all channels
                    let out_off = frames_written * channels;
                    for (i, &s) in block.iter().enumerate() {
                        for ch in 0..channels {
                            data[out_off + i * channels + ch] = s;
                        }
                    }
                    frames_written += frames_to_render;
                }

                // A full queue just means the UI is behind; it only wants the latest
                let _ = snapshot_tx.push(snapshot(renderer));
            },
            |err| log::error!("audio stream error: {err}"),
            None,
        )?;

        stream.play()?;

        let mut terminal = ratatui::init();
        let result = UiApp::new(control_tx, snapshot_rx, static_state, logger).run(&mut terminal);
        ratatui::restore();

        if let Ok(mut state) = state.lock() {
            state.renderer.stop();
        }
        drop(stream);

        result
    }
}

/// Shared audio state
struct AudioState {
    renderer: Renderer,
    control_rx: Consumer<ControlMessage>,
    snapshot_tx: Producer<ClockSnapshot>,
}

fn snapshot(renderer: &Renderer) -> ClockSnapshot {
    let mut active = [false; MAX_SHOWN_VOICES];
    for (voice, slot) in active.iter_mut().enumerate() {
        *slot = renderer.is_voice_active(voice);
    }
    ClockSnapshot {
        time: renderer.current_time(),
        state: renderer.state(),
        active,
    }
}
