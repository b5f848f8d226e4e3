//! Ask command - answer one question and exit

use anyhow::{Context, Result, bail};
use farm_assistant_adapters::llm::{
    AnthropicCompletion, LlmConfig as AdapterLlmConfig, OllamaCompletion, OpenAiCompletion,
    StubCompletion,
};
use farm_assistant_domain::CompletionClient;
use farm_assistant_domain::policy::AnswerPolicy;
use farm_assistant_domain::usecases::{
    AnswerConfig, AnswerUseCase, ChatSession, PromptConfig, TurnReport,
};
use secrecy::SecretString;
use std::path::PathBuf;
use std::sync::Arc;

use crate::args::AskArgs;
use crate::commands::classify::{load_dataset, lookup_json, read_question};
use crate::config::AppConfig;

pub async fn execute(args: AskArgs, config_path: Option<PathBuf>) -> Result<()> {
    let config = AppConfig::load(config_path.as_deref())?;

    let question = read_question(&args.input)?;
    let question = question.trim();
    if question.is_empty() {
        bail!("No question provided");
    }

    let client = build_completion_client(&config)?;
    let dataset = Arc::new(load_dataset(&config).await?);
    let usecase = AnswerUseCase::new(&*client, dataset, answer_config(&config));

    let mut session = ChatSession::new();
    let report = usecase.respond(&mut session, question).await;

    if args.json {
        let json = serde_json::to_string_pretty(&report_json(question, &report))
            .context("Failed to serialize output")?;
        println!("{}", json);
    } else {
        println!("{}", report.answer);
    }

    Ok(())
}

fn report_json(question: &str, report: &TurnReport) -> serde_json::Value {
    let mut value = lookup_json(question, &report.lookup);
    value["answer"] = serde_json::Value::String(report.answer.clone());
    value["outcome"] = serde_json::to_value(&report.outcome).unwrap_or_default();
    value
}

pub(crate) fn answer_config(config: &AppConfig) -> AnswerConfig {
    let max_answer_chars = match config.assistant.max_answer_chars {
        0 => None,
        n => Some(n),
    };

    AnswerConfig {
        prompt: PromptConfig {
            max_question_chars: config.assistant.max_question_chars,
            answer_length_hint: config.assistant.answer_length_hint,
        },
        policy: AnswerPolicy::new(max_answer_chars),
    }
}

pub(crate) fn build_completion_client(config: &AppConfig) -> Result<Box<dyn CompletionClient>> {
    let llm_config = adapter_llm_config(&config.llm);

    let client: Box<dyn CompletionClient> = match config.llm.provider.as_str() {
        "anthropic" => {
            let api_key = load_api_key(&config.llm.anthropic.api_key_env, "anthropic")?;
            Box::new(AnthropicCompletion::with_base_url(
                api_key,
                config.llm.anthropic.base_url.clone(),
                llm_config,
            )?)
        }
        "openai" => {
            let api_key = load_api_key(&config.llm.openai.api_key_env, "openai")?;
            Box::new(OpenAiCompletion::with_base_url(
                api_key,
                config.llm.openai.base_url.clone(),
                llm_config,
            )?)
        }
        "ollama" => {
            let base_url = config.llm.ollama.base_url.trim();
            if base_url.is_empty() {
                Box::new(OllamaCompletion::new(llm_config)?)
            } else {
                Box::new(OllamaCompletion::with_base_url(
                    base_url.to_string(),
                    llm_config,
                )?)
            }
        }
        "stub" => Box::new(StubCompletion::echo()),
        other => bail!("Unknown LLM provider: {}", other),
    };

    tracing::debug!(
        provider = client.provider(),
        model = %config.llm.model,
        "Completion client ready"
    );

    Ok(client)
}

fn adapter_llm_config(config: &crate::config::LlmConfig) -> AdapterLlmConfig {
    AdapterLlmConfig {
        model: config.model.clone(),
        max_output_tokens: config.max_output_tokens,
        temperature: config.temperature,
        timeout_secs: config.timeout_secs,
    }
}

pub(crate) fn load_api_key(env_var: &str, provider: &str) -> Result<SecretString> {
    if env_var.trim().is_empty() {
        bail!("No API key env var configured for provider {}", provider);
    }

    let key = std::env::var(env_var).with_context(|| {
        format!(
            "Missing API key env var {} for provider {}",
            env_var, provider
        )
    })?;

    if key.trim().is_empty() {
        bail!(
            "Missing API key: env var {} is empty for provider {}",
            env_var,
            provider
        );
    }

    Ok(SecretString::new(key.into()))
}
