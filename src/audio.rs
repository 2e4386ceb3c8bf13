//! Hit sound for the browser
//!
//! Plays the page's `<audio id="hit">` element when there is one, rewinding
//! it so rapid hits restart the clip. Without the element, a short thump is
//! synthesized with the Web Audio API instead.

use wasm_bindgen::JsCast;
use web_sys::{AudioContext, GainNode, HtmlAudioElement, OscillatorNode, OscillatorType};

use crate::platform::HitSound;
use crate::settings::Settings;

/// Id of the optional audio element
pub const HIT_ELEMENT_ID: &str = "hit";

enum Source {
    Element(HtmlAudioElement),
    Synth(AudioContext),
    Silent,
}

/// Browser hit cue
pub struct WebHitSound {
    source: Source,
    volume: f32,
}

impl WebHitSound {
    pub fn new(settings: &Settings) -> Self {
        let element = web_sys::window()
            .and_then(|w| w.document())
            .and_then(|d| d.get_element_by_id(HIT_ELEMENT_ID))
            .and_then(|el| el.dyn_into::<HtmlAudioElement>().ok());

        let source = match element {
            Some(audio) => Source::Element(audio),
            None => {
                log::warn!("No <audio id=\"{HIT_ELEMENT_ID}\"> element, synthesizing hit sound");
                // May fail outside a secure context
                match AudioContext::new() {
                    Ok(ctx) => Source::Synth(ctx),
                    Err(_) => {
                        log::warn!("Failed to create AudioContext - audio disabled");
                        Source::Silent
                    }
                }
            }
        };

        Self {
            source,
            volume: settings.effective_volume(),
        }
    }

    /// Paddle hit - solid thump
    fn play_thump(ctx: &AudioContext, vol: f32) {
        let Some((osc, gain)) = create_osc(ctx, 150.0, OscillatorType::Sine) else {
            return;
        };
        let t = ctx.current_time();

        gain.gain().set_value_at_time(vol * 0.6, t).ok();
        gain.gain()
            .exponential_ramp_to_value_at_time(0.01, t + 0.1)
            .ok();
        osc.frequency().set_value_at_time(150.0, t).ok();
        osc.frequency()
            .exponential_ramp_to_value_at_time(60.0, t + 0.1)
            .ok();

        osc.start().ok();
        osc.stop_with_when(t + 0.15).ok();
    }
}

impl HitSound for WebHitSound {
    fn play_from_start(&mut self) {
        if self.volume <= 0.0 {
            return;
        }
        match &self.source {
            Source::Element(audio) => {
                audio.set_volume(self.volume as f64);
                audio.set_current_time(0.0);
                // Rejected promises (autoplay policy) are not actionable
                let _ = audio.play();
            }
            Source::Synth(ctx) => {
                // Browsers suspend the context until a user gesture
                if ctx.state() == web_sys::AudioContextState::Suspended {
                    let _ = ctx.resume();
                }
                Self::play_thump(ctx, self.volume);
            }
            Source::Silent => {}
        }
    }
}

/// Create an oscillator with gain envelope
fn create_osc(
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
