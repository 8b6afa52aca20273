//! `ask` and `chat` command handlers.

use std::io::{BufRead, Write};
use std::sync::Arc;
use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};

use crate::agent::{AgentEvent, AgentRunner, EventSink};
use crate::config::AbacusConfig;
use crate::error::Result;
use crate::provider::{create_provider, CompletionProvider};
use crate::session::ChatSession;
use crate::tools::default_registry;
use crate::types::GenerationSettings;

use super::{AskArgs, ChatArgs};

/// Example question used when the user submits nothing.
pub const DEFAULT_QUESTION: &str = "I had 12 bananas, 15 oranges, and 9 apples. I used 1/3 of \
the bananas to bake a cake and gave 5 oranges to a friend. Then I sold half of the remaining \
apples. Later, I bought 6 bananas, 3 apples, and twice as many oranges as I gave away. How many \
fruits do I have now in total?";

/// Answer a single question and print the result, streaming the agent trace
/// (thought / tool call / observation) above a spinner as it happens.
pub async fn handle_ask(args: AskArgs) -> Result<()> {
    let mut runner = build_runner(&args.model, args.api_key, args.max_steps, args.temperature)?;

    let spinner = new_spinner();
    if !args.quiet {
        runner = runner.with_event_sink(trace_sink(spinner.clone()));
    }

    let question = args
        .question
        .unwrap_or_else(|| DEFAULT_QUESTION.to_string());
    println!("Question: {question}\n");

    let answer = runner.answer(&question).await;
    spinner.finish_and_clear();

    println!("Response:\n{}", answer?);
    Ok(())
}

/// Run the interactive chat loop.
pub async fn handle_chat(args: ChatArgs) -> Result<()> {
    let runner = build_runner(&args.model, args.api_key, args.max_steps, args.temperature)?;

    let mut session = ChatSession::new(runner);
    for message in session.conversation().messages() {
        println!("{}: {}", message.role.as_str(), message.content);
    }
    println!("(type 'exit' to quit; press Enter on an empty line for an example question)\n");

    let stdin = std::io::stdin();
    loop {
        print!("you: ");
        std::io::stdout().flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break; // EOF
        }
        let question = match line.trim() {
            "exit" | "quit" => break,
            "" => DEFAULT_QUESTION,
            q => q,
        };

        let spinner = new_spinner();
        let result = session.submit(question).await;
        spinner.finish_and_clear();

        match result {
            Ok(answer) => println!("assistant: {answer}\n"),
            Err(e) => {
                // Only this question failed; the conversation is untouched.
                eprintln!("error: {e}\n");
                if e.is_configuration() {
                    return Err(e);
                }
            }
        }
    }

    Ok(())
}

/// Wire config, provider, tools, and settings into a runner.
///
/// Fails with a blocking configuration error when no credential is
/// available; nothing runs without one.
fn build_runner(
    model: &str,
    api_key: Option<String>,
    max_steps: u32,
    temperature: Option<f64>,
) -> Result<AgentRunner> {
    let config = AbacusConfig::from_env();
    if let Some(key) = api_key {
        config.set_api_key("groq", key);
    }

    let provider: Arc<dyn CompletionProvider> = Arc::from(create_provider(model, &config)?);
    let registry = default_registry(Arc::clone(&provider), &config)?;

    let settings = GenerationSettings {
        temperature,
        ..Default::default()
    };

    Ok(AgentRunner::new(provider, registry)
        .with_max_steps(max_steps)
        .with_settings(settings))
}

fn new_spinner() -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(ProgressStyle::with_template("{spinner} {msg}").expect("valid spinner template"));
    pb.set_message("Generating response...");
    pb.enable_steady_tick(Duration::from_millis(120));
    pb
}

/// Render agent trace events above the spinner as they happen.
fn trace_sink(pb: ProgressBar) -> EventSink {
    Arc::new(move |event: &AgentEvent| match event {
        AgentEvent::Thought { text } => pb.println(format!("  · {text}")),
        AgentEvent::ToolInvoked { tool, input } => pb.println(format!("  > {tool}({input})")),
        AgentEvent::Observation { text, is_error, .. } => {
            let mark = if *is_error { "x" } else { "=" };
            pb.println(format!("  {mark} {}", truncate(text, 200)));
        }
        AgentEvent::ParseRetry { reason } => {
            pb.println(format!("  ! retrying: {}", truncate(reason, 120)));
        }
        _ => {}
    })
}

fn truncate(text: &str, max: usize) -> String {
    if text.len() <= max {
        return text.to_string();
    }
    // Back off to a valid UTF-8 boundary.
    let mut end = max;
    while end > 0 && !text.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}...", &text[..end])
}
