//! Chat command - interactive question loop

use anyhow::{Context, Result};
use farm_assistant_adapters::transcript::JsonlTranscriptSink;
use farm_assistant_domain::usecases::{AnswerUseCase, ChatSession, TurnReport};
use farm_assistant_domain::{Role, TranscriptSink};
use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};

use crate::args::ChatArgs;
use crate::commands::ask::{answer_config, build_completion_client};
use crate::commands::classify::load_dataset;
use crate::config::AppConfig;

const QUIT_WORDS: &[&str] = &["quit", "exit", "종료", "끝"];
const RESET_WORDS: &[&str] = &["/reset", "초기화"];

/// One line of user input, interpreted
#[derive(Debug, PartialEq, Eq)]
enum ChatCommand<'a> {
    Quit,
    Reset,
    History,
    Empty,
    Question(&'a str),
}

impl<'a> ChatCommand<'a> {
    fn parse(line: &'a str) -> Self {
        let trimmed = line.trim();
        let lowered = trimmed.to_lowercase();

        if trimmed.is_empty() {
            ChatCommand::Empty
        } else if QUIT_WORDS.contains(&lowered.as_str()) {
            ChatCommand::Quit
        } else if RESET_WORDS.contains(&lowered.as_str()) {
            ChatCommand::Reset
        } else if lowered == "/history" {
            ChatCommand::History
        } else {
            ChatCommand::Question(trimmed)
        }
    }
}

pub async fn execute(args: ChatArgs, config_path: Option<PathBuf>) -> Result<()> {
    let config = AppConfig::load(config_path.as_deref())?;

    let client = build_completion_client(&config)?;
    let dataset = Arc::new(load_dataset(&config).await?);
    let usecase = AnswerUseCase::new(&*client, dataset, answer_config(&config));

    let transcript_path = args.transcript.or(config.general.transcript_path.clone());
    let sink = match transcript_path {
        Some(path) => Some(open_transcript(path).await?),
        None => None,
    };

    let mut session = ChatSession::new();
    tracing::info!(
        session_id = %session.id(),
        provider = client.provider(),
        transcript = ?sink.as_ref().map(|s| s.path().display().to_string()),
        "Chat session started"
    );

    print_welcome();

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        print!("💬 질문: ");
        std::io::stdout().flush().context("Failed to flush stdout")?;

        let Some(line) = lines.next_line().await.context("Failed to read input")? else {
            println!();
            break;
        };

        match ChatCommand::parse(&line) {
            ChatCommand::Quit => break,
            ChatCommand::Empty => println!("❓ 질문을 입력해주세요."),
            ChatCommand::Reset => {
                session.reset();
                println!("🧹 대화 기록을 초기화했어요.");
            }
            ChatCommand::History => print_history(&session),
            ChatCommand::Question(question) => {
                let report = usecase.respond(&mut session, question).await;
                println!("🤖 농장 도우미: {}", report.answer);
                println!();

                if let Some(sink) = &sink {
                    record_turns(sink, &session, &report).await;
                }
            }
        }
    }

    tracing::info!(
        session_id = %session.id(),
        turns = session.transcript().len(),
        "Chat session ended"
    );
    println!("👋 안녕히 가세요!");

    Ok(())
}

async fn open_transcript(path: PathBuf) -> Result<JsonlTranscriptSink> {
    JsonlTranscriptSink::open(path.clone())
        .await
        .with_context(|| format!("Failed to open transcript: {}", path.display()))
}

/// Transcript write failures never interrupt the conversation
async fn record_turns(sink: &impl TranscriptSink, session: &ChatSession, report: &TurnReport) {
    let session_id = session.id().to_string();
    for turn in &report.turns {
        if let Err(e) = sink.record(&session_id, turn).await {
            tracing::warn!(error = %e, "Failed to write transcript line");
        }
    }
}

fn print_welcome() {
    println!("🐷 농장 도우미");
    println!("================");
    println!("돼지 농장에 대해 무엇이든 물어보세요. (예: 모돈 분만율 어때?)");
    println!("종료: quit / exit / 종료 / 끝    초기화: /reset    기록: /history");
    println!();
}

fn print_history(session: &ChatSession) {
    let turns = session.transcript().turns();
    if turns.is_empty() {
        println!("(대화 기록이 없어요)");
        return;
    }

    for turn in turns {
        let speaker = match turn.role {
            Role::User => "🧑 농장주",
            Role::Assistant => "🤖 농장 도우미",
        };
        println!("{}: {}", speaker, turn.content);
    }
    println!();
}

#[cfg(test)]
mod tests {
    use super::*;
    use farm_assistant_adapters::llm::StubCompletion;
    use farm_assistant_domain::ConversationTurn;

    #[test]
    fn test_parse_quit_words() {
        for word in ["quit", "EXIT", " 종료 ", "끝"] {
            assert_eq!(ChatCommand::parse(word), ChatCommand::Quit, "{word}");
        }
    }

    #[test]
    fn test_parse_reset_and_history() {
        assert_eq!(ChatCommand::parse("/reset"), ChatCommand::Reset);
        assert_eq!(ChatCommand::parse("초기화"), ChatCommand::Reset);
        assert_eq!(ChatCommand::parse("/history"), ChatCommand::History);
    }

    #[test]
    fn test_parse_empty_and_question() {
        assert_eq!(ChatCommand::parse("   "), ChatCommand::Empty);
        assert_eq!(
            ChatCommand::parse("  모돈 분만율 어때? "),
            ChatCommand::Question("모돈 분만율 어때?")
        );
        // Quit words only count on their own
        assert_eq!(
            ChatCommand::parse("끝난 돼지 체중은?"),
            ChatCommand::Question("끝난 돼지 체중은?")
        );
    }

    #[tokio::test]
    async fn test_record_turns_writes_both_roles() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("chat.jsonl");
        let sink = JsonlTranscriptSink::open(path.clone()).await.unwrap();

        let config = AppConfig::default();
        let dataset = Arc::new(load_dataset(&config).await.unwrap());
        let client = StubCompletion::with_response("좋아요!");
        let usecase = AnswerUseCase::new(client, dataset, answer_config(&config));

        let mut session = ChatSession::new();
        let report = usecase.respond(&mut session, "포유자돈 상태는?").await;
        record_turns(&sink, &session, &report).await;

        let content = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<serde_json::Value> = content
            .lines()
            .map(|l| serde_json::from_str(l).unwrap())
            .collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0]["role"], "user");
        assert_eq!(lines[0]["content"], "포유자돈 상태는?");
        assert_eq!(lines[1]["role"], "assistant");
        assert_eq!(lines[1]["content"], "좋아요!");
        assert_eq!(lines[1]["session_id"], session.id().to_string());

        let turns: &[ConversationTurn] = session.transcript().turns();
        assert_eq!(turns.len(), 2);
    }
}
