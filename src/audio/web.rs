//! Audio system using Web Audio API
//!
//! Procedurally generated 8-bit cues and a looping chiptune melody - no
//! external files needed!

use web_sys::{AudioContext, GainNode, OscillatorNode, OscillatorType};

use super::AudioHooks;
use crate::settings::Settings;
use crate::sim::Direction;

/// Background melody (frequency Hz, duration s)
const MELODY: [(f32, f64); 10] = [
    (523.25, 0.3), // C5
    (659.25, 0.3), // E5
    (783.99, 0.3), // G5
    (659.25, 0.3), // E5
    (698.46, 0.3), // F5
    (783.99, 0.3), // G5
    (880.0, 0.6),  // A5
    (783.99, 0.3), // G5
    (659.25, 0.3), // E5
    (523.25, 0.6), // C5
];

/// Queue the next bar this far before the current one runs out
const MUSIC_LEAD: f64 = 0.5;

/// Audio manager for the game
pub struct WebAudio {
    ctx: Option<AudioContext>,
    master_volume: f32,
    sfx_volume: f32,
    music_volume: f32,
    muted: bool,
    music_on: bool,
    /// Context time the queued melody runs out
    music_until: f64,
    /// Scheduled melody notes with their stop time
    music_notes: Vec<(OscillatorNode, f64)>,
}

impl WebAudio {
    pub fn new(settings: &Settings) -> Self {
        // Try to create audio context (may fail if not in secure context)
        let ctx = AudioContext::new().ok();
        if ctx.is_none() {
            log::warn!("Failed to create AudioContext - audio disabled");
        }
        Self {
            ctx,
            master_volume: settings.master_volume.clamp(0.0, 1.0),
            sfx_volume: settings.sfx_volume.clamp(0.0, 1.0),
            music_volume: settings.music_volume.clamp(0.0, 1.0),
            muted: settings.muted,
            music_on: false,
            music_until: 0.0,
            music_notes: Vec::new(),
        }
    }

    fn sfx_gain(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            self.master_volume * self.sfx_volume
        }
    }

    fn music_gain(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            self.master_volume * self.music_volume
        }
    }

    /// Context ready to play, resumed if the browser suspended it
    fn live_ctx(&self) -> Option<&AudioContext> {
        let ctx = self.ctx.as_ref()?;
        // Browsers require a user gesture before audio starts
        if ctx.state() == web_sys::AudioContextState::Suspended {
            let _ = ctx.resume();
        }
        Some(ctx)
    }

    /// Create an oscillator with gain envelope
    fn create_osc(
        &self,
        ctx: &AudioContext,
        freq: f32,
        osc_type: OscillatorType,
    ) -> Option<(OscillatorNode, GainNode)> {
        let osc = ctx.create_oscillator().ok()?;
        let gain = ctx.create_gain().ok()?;

        osc.set_type(osc_type);
        osc.frequency().set_value(freq);
        osc.connect_with_audio_node(&gain).ok()?;
        gain.connect_with_audio_node(&ctx.destination()).ok()?;

        Some((osc, gain))
    }

    /// Queue one pass of the melody starting at `start`
    fn queue_melody(&mut self, start: f64) {
        let vol = self.music_gain();
        let Some(ctx) = self.ctx.clone() else { return };
        let mut t = start;
        for (freq, dur) in MELODY {
            if let Some((osc, gain)) = self.create_osc(&ctx, freq, OscillatorType::Square) {
                let g = gain.gain();
                g.set_value_at_time(0.0, t).ok();
                g.linear_ramp_to_value_at_time(vol * 0.2, t + 0.01).ok();
                g.linear_ramp_to_value_at_time(vol * 0.15, t + dur * 0.7).ok();
                g.linear_ramp_to_value_at_time(0.01, t + dur).ok();
                osc.start_with_when(t).ok();
                osc.stop_with_when(t + dur).ok();
                self.music_notes.push((osc, t + dur));
            }
            t += dur;
        }
        self.music_until = t;
    }

    fn silence_music(&mut self) {
        for (osc, _) in self.music_notes.drain(..) {
            // Already-finished notes throw; nothing to do about it
            osc.stop().ok();
        }
        self.music_until = 0.0;
    }
}

impl AudioHooks for WebAudio {
    /// Retro square beep, higher pitch to the right
    fn on_move(&mut self, direction: Direction) {
        let vol = self.sfx_gain();
        if vol <= 0.0 {
            return;
        }
        let Some(ctx) = self.live_ctx() else { return };
        let freq = match direction {
            Direction::Left => 400.0,
            Direction::Right => 500.0,
        };
        let Some((osc, gain)) = self.create_osc(ctx, freq, OscillatorType::Square) else {
            return;
        };
        let t = ctx.current_time();

        gain.gain().set_value_at_time(vol * 0.3, t).ok();
        gain.gain()
            .exponential_ramp_to_value_at_time(0.01, t + 0.08)
            .ok();

        osc.start().ok();
        osc.stop_with_when(t + 0.08).ok();
    }

    /// Jump - rising sawtooth sweep
    fn on_jump(&mut self) {
        let vol = self.sfx_gain();
        if vol <= 0.0 {
            return;
        }
        let Some(ctx) = self.live_ctx() else { return };
        let Some((osc, gain)) = self.create_osc(ctx, 200.0, OscillatorType::Sawtooth) else {
            return;
        };
        let t = ctx.current_time();

        gain.gain().set_value_at_time(vol * 0.4, t).ok();
        gain.gain()
            .exponential_ramp_to_value_at_time(0.01, t + 0.2)
            .ok();
        osc.frequency().set_value_at_time(200.0, t).ok();
        osc.frequency()
            .exponential_ramp_to_value_at_time(800.0, t + 0.15)
            .ok();

        osc.start().ok();
        osc.stop_with_when(t + 0.2).ok();
    }

    /// Crash - low rumble plus a metallic crack
    fn on_crash(&mut self) {
        let vol = self.sfx_gain();
        if vol <= 0.0 {
            return;
        }
        let Some(ctx) = self.live_ctx() else { return };
        let t = ctx.current_time();

        if let Some((osc, gain)) = self.create_osc(ctx, 120.0, OscillatorType::Sawtooth) {
            gain.gain().set_value_at_time(vol * 0.5, t).ok();
            gain.gain()
                .exponential_ramp_to_value_at_time(0.01, t + 0.3)
                .ok();
            osc.frequency().set_value_at_time(120.0, t).ok();
            osc.frequency()
                .exponential_ramp_to_value_at_time(30.0, t + 0.3)
                .ok();
            osc.start().ok();
            osc.stop_with_when(t + 0.35).ok();
        }

        if let Some((osc, gain)) = self.create_osc(ctx, 1000.0, OscillatorType::Square) {
            gain.gain().set_value_at_time(vol * 0.2, t).ok();
            gain.gain()
                .exponential_ramp_to_value_at_time(0.01, t + 0.1)
                .ok();
            osc.frequency().set_value_at_time(1000.0, t).ok();
            osc.frequency()
                .exponential_ramp_to_value_at_time(100.0, t + 0.1)
                .ok();
            osc.start().ok();
            osc.stop_with_when(t + 0.15).ok();
        }
    }

    /// High score - ascending C major arpeggio
    fn on_celebrate(&mut self) {
        let vol = self.sfx_gain();
        if vol <= 0.0 {
            return;
        }
        let Some(ctx) = self.live_ctx() else { return };
        for (i, freq) in [523.25, 659.25, 783.99, 1046.5].iter().enumerate() {
            let delay = i as f64 * 0.15;
            if let Some((osc, gain)) = self.create_osc(ctx, *freq, OscillatorType::Triangle) {
                let t = ctx.current_time() + delay;
                gain.gain().set_value_at_time(0.0, t).ok();
                gain.gain()
                    .linear_ramp_to_value_at_time(vol * 0.4, t + 0.05)
                    .ok();
                gain.gain()
                    .exponential_ramp_to_value_at_time(0.01, t + 0.3)
                    .ok();
                osc.start_with_when(t).ok();
                osc.stop_with_when(t + 0.3).ok();
            }
        }
    }

    fn start_music(&mut self) {
        if self.music_on {
            return;
        }
        self.music_on = true;
        let Some(now) = self.live_ctx().map(|c| c.current_time()) else {
            return;
        };
        self.queue_melody(now);
    }

    fn stop_music(&mut self) {
        if !self.music_on {
            return;
        }
        self.music_on = false;
        self.silence_music();
    }

    fn pump(&mut self) {
        if !self.music_on {
            return;
        }
        let Some(now) = self.ctx.as_ref().map(|c| c.current_time()) else {
            return;
        };
        // Forget notes that already ended
        self.music_notes.retain(|(_, end)| *end > now);
        if now + MUSIC_LEAD >= self.music_until {
            self.queue_melody(self.music_until.max(now));
        }
    }
}

impl Drop for WebAudio {
    fn drop(&mut self) {
        self.silence_music();
        if let Some(ctx) = self.ctx.take() {
            let _ = ctx.close();
        }
    }
}
