//! Alarm tone playback.

/// Sample rate the alarm tone table is built for.
pub const TONE_SAMPLE_RATE_HZ: u32 = 8_000;

/// Pitch of the alarm tone.
pub const TONE_FREQUENCY_HZ: u32 = 440;

/// One period of a 440 Hz sine at 8 kHz, unsigned 16-bit centred on 32767.
///
/// `(1 + sin(2πi / 18)) * 32767` for `i` in `0..18`.
pub static ALARM_TONE: [u16; (TONE_SAMPLE_RATE_HZ / TONE_FREQUENCY_HZ) as usize] = [
    32767, 43973, 53829, 61144, 65036, 65036, 61144, 53829, 43973, 32767, 21560, 11704, 4389, 497,
    497, 4389, 11704, 21560,
];

/// Trait for abstracting the speaker.
pub trait TonePlayer {
    /// Starts looping `samples` until [`stop`](TonePlayer::stop) is called.
    ///
    /// Calling this while already playing should keep playing without a gap.
    fn start_loop(&mut self, samples: &'static [u16]);

    /// Silences the speaker.
    fn stop(&mut self);
}
