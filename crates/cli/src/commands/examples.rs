//! Examples command - sample questions the assistant understands

use anyhow::Result;
use farm_assistant_domain::classify;

pub(crate) const EXAMPLE_QUESTIONS: &[&str] = &[
    "모돈 분만율 어때?",
    "이유자돈 폐사율 좀 알려줘",
    "비육돈 사료비 얼마나 나왔어?",
    "육성돈 체중은 어떻게 돼?",
    "포유자돈 상태는?",
    "전체 농장 현황 알려줘",
];

pub fn execute() -> Result<()> {
    println!("💡 이런 질문을 해보세요");
    println!();
    for question in EXAMPLE_QUESTIONS {
        let intent = classify(question);
        println!(
            "  - {}  ({} / {})",
            question, intent.category, intent.metric
        );
    }
    println!();
    println!(
        "Try: farm-assistant ask --text \"{}\"",
        EXAMPLE_QUESTIONS[0]
    );

    Ok(())
}
