use crate::domain::model::{ChatMessage, Issue, RecapRequest};
use std::fmt::Write;

pub const SYSTEM_PROMPT: &str = "You are a comic book assistant that helps with making recaps of new issues of comics. \
Do not explain the issues, but respond directly with a recap of the stories. \
The output should not include: Here's a recap, <title>'s recap, <Issue #>, or any language other than English. \
Also make the output a short 2-3 paragraph response.";

pub fn recap_header(issue: &Issue) -> String {
    format!("Here's the recap leading up to {}:\n\n", issue.title)
}

/// Renders the user turn: series instruction, current description, then one
/// `Issue <n>: <description>` line per earlier issue.
///
/// There is no length budget. A series with very long descriptions yields a
/// correspondingly long prompt.
pub fn build_user_prompt(current: &Issue, previous: &[Issue]) -> String {
    let mut prompt = format!(
        "Based on the previous summaries from {}, write a compelling recap of recent events \
that could appear at the beginning of the next issue. Focus on the key developments, tone, \
and stakes, as if you're reminding a returning reader of what they need to know before diving in. \
Here is the description of the current issue to help make a recap: {}\n\
Here are the previous summaries:\n",
        current.title,
        current.description_text()
    );

    for issue in previous {
        // Writing into a String cannot fail.
        let _ = writeln!(
            prompt,
            "Issue {}: {}",
            issue.issue_number,
            issue.description_text()
        );
    }

    prompt
}

pub fn build_conversation(request: &RecapRequest) -> Vec<ChatMessage> {
    vec![
        ChatMessage::system(SYSTEM_PROMPT),
        ChatMessage::user(build_user_prompt(&request.current, &request.previous)),
    ]
}
