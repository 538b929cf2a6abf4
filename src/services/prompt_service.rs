use crate::models::SummaryMode;

pub const DISCLAIMER: &str = "Note: This summary is generated for educational and research purposes only.";

const PROMPT_HEADER: &str = "You are an intelligent NLP summarization model trained to handle complex **Legal** and **Financial** documents.
Your goal is to produce accurate, concise, and trustworthy summaries — without distorting any factual, legal, or financial details.


SELECT MODE:
";

const LEGAL_FOCUS: &str = "- Mode: [LEGAL]
  → Focus on legal case background, involved parties, legal issues, key rulings, court reasoning, and outcomes.
  → Maintain formal tone with legal accuracy and clarity.
  → Avoid opinions; stick to judicial logic.
";

const FINANCIAL_FOCUS: &str = "- Mode: [FINANCIAL]
  → Focus on financial performance, metrics, trends, decisions, obligations, and implications.
  → Maintain a professional analytical tone suitable for business summaries.
";

const DUAL_FOCUS: &str = "- Mode: [DUAL]
  → Combine both legal and financial relevance — highlight connections between legal rulings and financial implications.
";

const TASK_INSTRUCTIONS: &str = "

TASK INSTRUCTIONS:
Generate two separate summaries for the given text:

1. **Extractive Summary**
   - Directly uses sentences or phrases from the original text.
   - Keep it concise and factual (bullet or paragraph form).
   - Do NOT paraphrase.

2. **Abstractive Summary**
   - Rephrase and condense the document into clear, professional language.
   - Maintain the same factual and legal/financial meaning.
   - Should be easy to understand for non-experts.
   - Limit to 250–400 words.

3. **Main Points**
   - 5–8 bullet points summarizing the key takeaways.
   - **Each bullet point should be formatted in bold for emphasis.**

At the end, append this line:
";

const STYLE_AND_FORMAT: &str = "


STYLE GUIDELINES:
- Preserve all names, dates, amounts, judgments, and key terms exactly.
- Avoid bias, speculation, or omission of critical facts.
- Use neutral, professional, and formal language.
- Separate each section with clear headings.


OUTPUT FORMAT:
**Extractive Summary:**
<model output>

**Abstractive Summary:**
<model output>

**Main Points:**
**• point 1**
**• point 2**
**• ...**

";

pub const DOCUMENT_OPEN: &str = "**Document to Summarize:**\n---\n";
pub const DOCUMENT_CLOSE: &str = "\n---\n";

/// Mode-specific guidance. This is the only part of the prompt that varies by mode.
pub fn focus_block(mode: SummaryMode) -> &'static str {
    match mode {
        SummaryMode::Legal => LEGAL_FOCUS,
        SummaryMode::Financial => FINANCIAL_FOCUS,
        SummaryMode::Dual => DUAL_FOCUS,
    }
}

/// Assemble the summarization prompt. The source text is embedded verbatim.
pub fn build_prompt(combined_text: &str, mode: SummaryMode) -> String {
    let focus = focus_block(mode);
    let mut prompt = String::with_capacity(
        PROMPT_HEADER.len()
            + focus.len()
            + TASK_INSTRUCTIONS.len()
            + DISCLAIMER.len()
            + STYLE_AND_FORMAT.len()
            + DOCUMENT_OPEN.len()
            + combined_text.len()
            + DOCUMENT_CLOSE.len()
            + 4,
    );

    prompt.push_str(PROMPT_HEADER);
    prompt.push_str(focus);
    prompt.push_str(TASK_INSTRUCTIONS);
    prompt.push('“');
    prompt.push_str(DISCLAIMER);
    prompt.push('”');
    prompt.push_str(STYLE_AND_FORMAT);
    prompt.push_str(DOCUMENT_OPEN);
    prompt.push_str(combined_text);
    prompt.push_str(DOCUMENT_CLOSE);
    prompt
}
