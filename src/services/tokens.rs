//! Usage profile resolver: representative token counts per call

use crate::config::SimulationParams;
use crate::types::Profile;

/// Fixed chars-to-tokens ratio (1 token ~= 4 characters)
pub const CHARS_PER_TOKEN: f64 = 4.0;

pub fn chars_to_tokens(chars: f64) -> f64 {
    chars / CHARS_PER_TOKEN
}

/// (tokens_in, tokens_out) for one representative call of `profile`.
///
/// Translation reads and rewrites a whole topic. Completion sees the topic
/// plus the prompt and emits the average output. Chatbot carries several
/// topics of context and the conversation's prompts.
pub fn tokens_per_call(profile: Profile, sim: &SimulationParams) -> (f64, f64) {
    match profile {
        Profile::Translation => {
            let tokens = chars_to_tokens(sim.topic_size_chars as f64);
            (tokens, tokens)
        }
        Profile::Completion => (
            chars_to_tokens((sim.topic_size_chars + sim.prompt_size_chars) as f64),
            sim.output_tokens_avg as f64,
        ),
        Profile::Chatbot => (
            chars_to_tokens(
                (sim.chatbot_avg_topics * sim.topic_size_chars
                    + sim.chatbot_avg_prompts * sim.prompt_size_chars) as f64,
            ),
            sim.output_tokens_avg as f64,
        ),
    }
}
