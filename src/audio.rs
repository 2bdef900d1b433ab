use anyhow::anyhow;
use rand::rngs::StdRng;
use rand::Rng;
use slowtide_core::activities::Cue;
use slowtide_core::noise::{self, NoiseColor};
use slowtide_core::sound::{
    retune, synth_voice, OneShot, SynthVoice, Waveform, SYNTH_GLIDE_TAU_SEC,
    SYNTH_RELEASE_TAU_SEC, SYNTH_STOP_AFTER_SEC,
};
use slowtide_core::{SoundType, ViewKind, ATMOSPHERE_VOLUME, WAVES_DEPTH, WAVES_LFO_HZ};
use web_sys as web;

fn js_err(e: wasm_bindgen::JsValue) -> anyhow::Error {
    anyhow!("{:?}", e)
}

fn oscillator_type(waveform: Waveform) -> web::OscillatorType {
    match waveform {
        Waveform::Sine => web::OscillatorType::Sine,
        Waveform::Triangle => web::OscillatorType::Triangle,
        Waveform::Saw => web::OscillatorType::Sawtooth,
    }
}

fn create_gain(ctx: &web::AudioContext, value: f32, label: &str) -> anyhow::Result<web::GainNode> {
    let g = web::GainNode::new(ctx).map_err(|e| anyhow!("{} GainNode error: {:?}", label, e))?;
    g.gain().set_value(value);
    Ok(g)
}

/// Looping noise source plus the optional "waves" LFO.
struct AmbientGraph {
    source: web::AudioBufferSourceNode,
    lfo: Option<web::OscillatorNode>,
}

impl AmbientGraph {
    fn stop(self) {
        _ = self.source.stop();
        _ = self.source.disconnect();
        if let Some(lfo) = self.lfo {
            _ = lfo.stop();
        }
    }
}

struct ActiveSynth {
    osc: web::OscillatorNode,
    gain: web::GainNode,
    voice: SynthVoice,
}

/// Owns the audio context and every live node. At most one ambient graph
/// and one continuous synth exist at a time.
pub struct AudioEngine {
    ctx: Option<web::AudioContext>,
    ambient_gain: Option<web::GainNode>,
    ambient: Option<AmbientGraph>,
    synth: Option<ActiveSynth>,
    rng: StdRng,
}

impl AudioEngine {
    pub fn new(rng: StdRng) -> Self {
        Self {
            ctx: None,
            ambient_gain: None,
            ambient: None,
            synth: None,
            rng,
        }
    }

    /// Create the context on first use. Browsers only allow this after a
    /// user gesture, so it is called from the begin buttons.
    fn ensure_context(&mut self) -> anyhow::Result<(web::AudioContext, web::GainNode)> {
        if let (Some(ctx), Some(gain)) = (&self.ctx, &self.ambient_gain) {
            return Ok((ctx.clone(), gain.clone()));
        }
        let ctx = web::AudioContext::new().map_err(js_err)?;
        let gain = create_gain(&ctx, 0.0, "Ambient")?;
        gain.connect_with_audio_node(&ctx.destination())
            .map_err(js_err)?;
        log::info!("[audio] context created at {} Hz", ctx.sample_rate());
        self.ctx = Some(ctx.clone());
        self.ambient_gain = Some(gain.clone());
        Ok((ctx, gain))
    }

    /// Context state for the admin overlay, `None` before first use.
    pub fn state_label(&self) -> Option<String> {
        let ctx = self.ctx.as_ref()?;
        let label = match ctx.state() {
            web::AudioContextState::Suspended => "suspended",
            web::AudioContextState::Running => "running",
            web::AudioContextState::Closed => "closed",
            _ => "unknown",
        };
        Some(label.to_string())
    }

    pub fn resume(&self) {
        if let Some(ctx) = &self.ctx {
            if ctx.state() == web::AudioContextState::Suspended {
                _ = ctx.resume();
            }
        }
    }

    pub fn suspend(&self) {
        if let Some(ctx) = &self.ctx {
            _ = ctx.suspend();
        }
    }

    /// Replace the ambient soundscape. `Off` keeps the graph silent.
    pub fn start_ambient(&mut self, sound: SoundType) {
        if let Err(e) = self.try_start_ambient(sound) {
            log::error!("[audio] ambient {} failed: {:?}", sound, e);
        }
    }

    fn try_start_ambient(&mut self, sound: SoundType) -> anyhow::Result<()> {
        let (ctx, gain) = self.ensure_context()?;
        self.resume();
        self.stop_ambient();
        let Some(color) = NoiseColor::for_sound(sound) else {
            gain.gain().set_value(0.0);
            log::info!("[audio] ambient off");
            return Ok(());
        };
        gain.gain().set_value(ATMOSPHERE_VOLUME);

        let sample_rate = ctx.sample_rate();
        let len = noise::buffer_len(sample_rate);
        let mut samples = noise::generate(color, len, &mut self.rng);
        let buffer = ctx
            .create_buffer(1, len as u32, sample_rate)
            .map_err(js_err)?;
        buffer.copy_to_channel(&mut samples, 0).map_err(js_err)?;

        let source = ctx.create_buffer_source().map_err(js_err)?;
        source.set_buffer(Some(&buffer));
        source.set_loop(true);

        let lfo = if sound == SoundType::Waves {
            let swell = create_gain(&ctx, WAVES_DEPTH, "Waves")?;
            source.connect_with_audio_node(&swell).map_err(js_err)?;
            swell.connect_with_audio_node(&gain).map_err(js_err)?;
            let lfo = web::OscillatorNode::new(&ctx).map_err(js_err)?;
            lfo.set_type(web::OscillatorType::Sine);
            lfo.frequency().set_value(WAVES_LFO_HZ);
            lfo.connect_with_audio_param(&swell.gain()).map_err(js_err)?;
            lfo.start().map_err(js_err)?;
            Some(lfo)
        } else {
            source.connect_with_audio_node(&gain).map_err(js_err)?;
            None
        };
        source.start().map_err(js_err)?;
        log::info!("[audio] ambient {} ({:?}, {} samples)", sound, color, len);
        self.ambient = Some(AmbientGraph { source, lfo });
        Ok(())
    }

    pub fn stop_ambient(&mut self) {
        if let Some(graph) = self.ambient.take() {
            graph.stop();
        }
    }

    /// Ambient volume from the sunset fade.
    pub fn set_ambient_gain(&self, value: f32) {
        if let Some(gain) = &self.ambient_gain {
            gain.gain().set_value(value);
        }
    }

    /// Play a queued cue from the mode manager.
    pub fn play(&mut self, cue: Cue) {
        match cue {
            Cue::SynthStart { view, y_ratio } => self.start_synth(view, y_ratio),
            Cue::SynthUpdate { y_ratio } => self.update_synth(y_ratio),
            Cue::SynthStop => self.stop_synth(),
            Cue::Sfx(sfx) => {
                let jitter: f32 = self.rng.gen();
                if let Err(e) = self.one_shot(sfx.one_shot(jitter)) {
                    log::debug!("[audio] {:?} skipped: {:?}", sfx, e);
                }
            }
            Cue::Haptic(ms) => {
                if let Some(w) = web::window() {
                    _ = w.navigator().vibrate_with_duration(ms);
                }
            }
        }
    }

    fn start_synth(&mut self, view: ViewKind, y_ratio: f32) {
        let Some(voice) = synth_voice(view, y_ratio) else {
            return;
        };
        self.stop_synth();
        let Some(ctx) = self.ctx.clone() else {
            return;
        };
        match build_synth(&ctx, voice) {
            Ok((osc, gain)) => self.synth = Some(ActiveSynth { osc, gain, voice }),
            Err(e) => log::error!("[audio] synth failed: {:?}", e),
        }
    }

    fn update_synth(&mut self, y_ratio: f32) {
        let (Some(ctx), Some(synth)) = (&self.ctx, &self.synth) else {
            return;
        };
        if let Some(freq) = retune(&synth.voice, y_ratio) {
            _ = synth
                .osc
                .frequency()
                .set_target_at_time(freq, ctx.current_time(), SYNTH_GLIDE_TAU_SEC);
        }
    }

    fn stop_synth(&mut self) {
        let (Some(ctx), Some(synth)) = (&self.ctx, self.synth.take()) else {
            return;
        };
        let t = ctx.current_time();
        _ = synth.gain.gain().cancel_scheduled_values(t);
        _ = synth.gain.gain().set_target_at_time(0.0, t, SYNTH_RELEASE_TAU_SEC);
        _ = synth.osc.stop_with_when(t + SYNTH_STOP_AFTER_SEC);
    }

    fn one_shot(&self, shot: OneShot) -> anyhow::Result<()> {
        let ctx = self.ctx.as_ref().ok_or_else(|| anyhow!("no audio context"))?;
        self.resume();
        let osc = web::OscillatorNode::new(ctx).map_err(js_err)?;
        let gain = create_gain(ctx, shot.start_gain, "Sfx")?;
        osc.set_type(oscillator_type(shot.waveform));
        osc.connect_with_audio_node(&gain).map_err(js_err)?;
        gain.connect_with_audio_node(&ctx.destination())
            .map_err(js_err)?;

        let t = ctx.current_time();
        let end = t + shot.duration_sec;
        let freq = osc.frequency();
        _ = freq.set_value_at_time(shot.start_hz, t);
        _ = freq.exponential_ramp_to_value_at_time(shot.end_hz, end);
        _ = gain.gain().set_value_at_time(shot.start_gain, t);
        _ = gain.gain().exponential_ramp_to_value_at_time(shot.end_gain, end);
        osc.start_with_when(t).map_err(js_err)?;
        osc.stop_with_when(end).map_err(js_err)?;
        Ok(())
    }

    /// Silence everything: session end or quit.
    pub fn stop_all(&mut self) {
        self.stop_synth();
        self.stop_ambient();
        self.suspend();
    }
}

fn build_synth(
    ctx: &web::AudioContext,
    voice: SynthVoice,
) -> anyhow::Result<(web::OscillatorNode, web::GainNode)> {
    let osc = web::OscillatorNode::new(ctx).map_err(js_err)?;
    let gain = create_gain(ctx, 0.0, "Synth")?;
    osc.set_type(oscillator_type(voice.waveform));
    osc.frequency().set_value(voice.frequency_hz);
    osc.connect_with_audio_node(&gain).map_err(js_err)?;
    gain.connect_with_audio_node(&ctx.destination())
        .map_err(js_err)?;

    let t = ctx.current_time();
    _ = gain.gain().set_value_at_time(0.0, t);
    _ = gain
        .gain()
        .linear_ramp_to_value_at_time(voice.peak_gain, t + voice.attack_sec);
    osc.start_with_when(t).map_err(js_err)?;
    Ok((osc, gain))
}
