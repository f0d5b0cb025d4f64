use crate::reading::ReadingCard;

const BASE_PROMPT: &str = "### ROLE
You are a tarot master.

### TASK
Based on the user's question or life concern, and the cards drawn, you will provide a professional interpretation for each card to guide the user.

### OUTPUT
Give a short explanation for each card, followed by a final section with professional divination advice. The summary should be concise and highlight the key points. Respond in the same language the user used.
";

const STYLE: &str = "Be professional and specific, hitting the user's pain points first. Please write 2-4 sentences per card. Conclude with 3 actionable suggestions.";

/// Prompt for a narrative model: fixed preamble, the question, one line per card in
/// draw order, and style guidance.
///
/// ```
/// use arcana_oracle::prompt::build_prompt;
///
/// let prompt = build_prompt(None, &[]);
/// assert!(prompt.contains("User's Question: (NONE)"));
/// ```
pub fn build_prompt(question: Option<&str>, cards: &[ReadingCard]) -> String {
    let q = question.map(str::trim).unwrap_or("");
    let mut lines = Vec::with_capacity(cards.len() + 6);
    lines.push("### INPUT".to_string());
    lines.push(format!(
        "User's Question: {}",
        if q.is_empty() { "(NONE)" } else { q }
    ));
    lines.push("Cards drawn (in order):".to_string());
    for c in cards {
        lines.push(card_line(c));
    }
    lines.push(String::new());
    lines.push("### STYLE".to_string());
    lines.push(STYLE.to_string());
    format!("{}\n{}", BASE_PROMPT, lines.join("\n"))
}

/// e.g. `- 0. The Fool (major_00_the_fool) — upright — pos=past`
pub fn card_line(c: &ReadingCard) -> String {
    format!(
        "- {}. {} ({}) — {} — pos={}",
        c.card.index,
        c.card.card_name,
        c.card.card_id,
        c.card.orientation,
        c.card.position.as_deref().unwrap_or("-")
    )
}
