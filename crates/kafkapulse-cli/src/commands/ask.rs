use super::{AiArgs, FeedArgs};
use kafkapulse_core::Transcript;

pub fn run(question: &str, feed_args: &FeedArgs, ai_args: &AiArgs) {
    let mut transcript = Transcript::new();
    let Some(history) = transcript.submit(question) else {
        eprintln!("Nothing to ask: the question is blank");
        std::process::exit(2);
    };

    let window = super::initial_window(feed_args);
    let assistant = super::make_assistant(ai_args);
    let rt = super::runtime();
    let reply = rt.block_on(assistant.chat(&history, window.latest()));
    println!("{reply}");
}
