use redsm5_core::llm::ChatMessage;

const RUBRIC: &str = "You are an expert clinical psychologist grading explanations of DSM-5 depression \
symptoms in social media posts. Compare the candidate explanation with the reference explanation and rate \
it from 1 (poor) to 5 (excellent) on three axes:\n\
- accuracy: the candidate identifies the same symptoms as the reference and makes no false claims\n\
- coverage: the candidate cites the evidence the reference relies on\n\
- clarity: the candidate is clear, concise and well organised\n\
Reply with a JSON object with integer fields `accuracy`, `coverage`, `clarity` and a short `explanation`.";

pub(super) fn judge_messages(reference: &str, candidate: &str) -> Vec<ChatMessage> {
    vec![
        ChatMessage::system(RUBRIC),
        ChatMessage::user(format!(
            "Reference explanation:\n{}\n\nCandidate explanation:\n{}",
            reference, candidate
        )),
    ]
}
