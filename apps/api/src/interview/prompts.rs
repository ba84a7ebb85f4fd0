// All LLM prompt constants for the interview pipeline, with the builders
// that substitute their placeholders. One template per gateway call site.

/// Standard topic-based question template.
/// Replace: {role}, {topic}, {candidate_type}, {phase}, {confidence},
///          {competence_summary}, {history}
pub const QUESTION_GENERATION_TEMPLATE: &str = r#"You are a realistic and experienced technical interviewer.

Interview type: {role}
Topic: {topic}
Candidate type: {candidate_type}
Interview phase: {phase}

Candidate confidence: {confidence}/10
Current competence summary: {competence_summary}

Previous Q&A:
{history}

Your task:
Ask EXACTLY ONE interview question.

Question design rules:
- Vary the type of question naturally like a real interviewer
- Choose the question type based on the topic and phase
- Avoid generic textbook questions unless it is a warm-up
- Do NOT ask multiple sub-questions

Allowed question types (choose ONE):
- Conceptual explanation (why / how)
- Code understanding (given a short snippet, ask what it does or why)
- Output prediction (ask what the code outputs)
- Debugging or fixing a mistake
- Comparison (e.g., A vs B, pros/cons)
- Practical scenario or design decision
- Edge-case reasoning
- SQL query reasoning (not writing full queries unless advanced)
- System behavior explanation (OS / DB / Networks)

Phase guidance:
- Warm-up: basic concepts, light reasoning
- Intermediate: applied understanding, small code snippets, scenarios
- Advanced: edge cases, trade-offs, debugging, deeper reasoning

Tone rules:
- Ask like a human interviewer
- Be concise and clear
- No hints, no explanations
- One question only

If you include code, ALWAYS put it on new lines.
Return ONLY the question text."#;

/// Project-interview question template. Replace: {project_name}, {readme}
pub const PROJECT_INTERVIEW_TEMPLATE: &str = r#"You are interviewing about the candidate's project.

Project name: {project_name}

README:
{readme}

Rules:
- Ask EXACTLY ONE technical question
- No explanations"#;

/// Resume-based question template. Replace: {resume_text}, {history}
pub const RESUME_QUESTION_TEMPLATE: &str = r#"You are a professional technical interviewer.

The following is the candidate's resume content:
----------------
{resume_text}
----------------

Previous questions and answers:
{history}

Guidelines:
- Ask ONE clear question based strictly on the resume content
- Prefer projects, technologies, tools, or responsibilities mentioned
- Do NOT invent experience not present in the resume
- Do NOT flatter or butter the candidate
- Question should sound realistic and slightly probing
- Keep it concise and interviewer-like
- If resume content is weak, ask clarification-style questions

Return ONLY ONE question."#;

/// Answer evaluation template — mandates a JSON-only response.
/// Replace: {role}, {topic}, {question}, {answer}
pub const ANSWER_EVALUATION_TEMPLATE: &str = r#"You are a fair and realistic technical interviewer for a {role} interview on {topic}.

Question:
{question}

Candidate Answer:
{answer}

Evaluation guidelines:
- Give PARTIAL CREDIT for correct ideas, even if incomplete
- Focus on CONCEPTUAL UNDERSTANDING more than syntax
- Do NOT expect perfect or textbook answers
- Penalize only for major misconceptions
- If the idea is mostly correct, score should be 6 or above
- Be encouraging but honest

Respond ONLY in JSON:
{
  "score": number between 0 and 10,
  "strengths": "what the candidate understood correctly",
  "weaknesses": "minor gaps or improvements (if any)",
  "depth_assessment": "none | surface | moderate | deep"
}"#;

/// Competence estimation template — mandates a JSON-only response.
/// Replace: {topic}, {confidence}, {evaluation_history}
pub const COMPETENCE_ESTIMATION_TEMPLATE: &str = r#"Estimate competence.

Topic: {topic}
Confidence: {confidence}/10

History:
{evaluation_history}

Respond ONLY in JSON:
{
  "estimated_competence": number between 0 and 10,
  "confidence_alignment": "overconfident | underconfident | aligned",
  "weak_areas": ["areas"],
  "next_question_intent": "easier | similar | deeper | focused",
  "reasoning": "brief explanation"
}"#;

/// Final report template. The section headers "Final Score" and
/// "Actionable Recommendations" double as the truncation markers checked by
/// the report generator — keep them in sync with `report::REPORT_MARKERS`.
/// Replace: {candidate_name}, {date}, {role}, {topic}, {confidence},
///          {estimated_competence}, {history}
pub const FINAL_REPORT_TEMPLATE: &str = r#"You are a professional technical interviewer generating a final interview report.

Candidate Name: {candidate_name}
Interview Date: {date}

Interview Type: {role}
Topic: {topic}

Self-reported confidence: {confidence}/10
Estimated competence: {estimated_competence}/10

INTERVIEW HISTORY:
{history}

======================
STRICT OUTPUT FORMAT
======================

1. Final Score & Verdict
- Final Score: <calculate strictly based on history>/10
- Verdict: Hire | Borderline | Needs Practice
- One-line justification
- CRITICAL: If the candidate skipped many questions, the score MUST be low (e.g. 1-3). Do not inflate scores.

2. Overall Performance Summary
- Balanced, fair, and constructive
- Acknowledge partial correctness
- Do NOT be harsh or dismissive

3. Strengths
- Bullet points
- Mention even small positives
- Be specific

4. Areas for Improvement
- Bullet points
- Phrase constructively (e.g. "Needs more practice with...")
- No harsh language

5. Confidence vs Competence
- Compare self-confidence and observed ability
- Encourage improvement if confidence is low

6. Question-wise Review (MANDATORY, ALL QUESTIONS)
For EACH question, follow this format EXACTLY:

Q<number>. Question:
<question>

Candidate Answer:
<verbatim answer>

Evaluation:
- What was correct
- What was partially correct
- What needs improvement
- If skipped, explain why it matters (knowledge gap)

7. Actionable Recommendations
- 4-6 concrete learning steps
- Practical (practice topics, exercises, habits)

STRICT RULES:
- DO NOT skip any question
- DO NOT cut off mid-report
- DO NOT invent answers
- Keep tone supportive and realistic
- If answers were "I don't know" or "skip", the final score must reflect this (below 4)."#;

/// Continuation prompt used when the report draft looks truncated.
/// Replace: {report}
pub const REPORT_CONTINUATION_TEMPLATE: &str = r#"Continue the SAME interview report EXACTLY from where it stopped.
Do NOT repeat previous sections.

Partial report so far:
{report}

Continue now:"#;

#[allow(clippy::too_many_arguments)]
pub fn build_question_prompt(
    role: &str,
    topic: &str,
    candidate_type: &str,
    phase: &str,
    confidence: u8,
    competence_summary: &str,
    history: &str,
) -> String {
    QUESTION_GENERATION_TEMPLATE
        .replace("{role}", role)
        .replace("{topic}", topic)
        .replace("{candidate_type}", candidate_type)
        .replace("{phase}", phase)
        .replace("{confidence}", &confidence.to_string())
        .replace("{competence_summary}", competence_summary)
        .replace("{history}", history)
}

pub fn build_project_prompt(project_name: &str, readme: &str) -> String {
    PROJECT_INTERVIEW_TEMPLATE
        .replace("{project_name}", project_name)
        .replace("{readme}", readme)
}

pub fn build_resume_prompt(resume_text: &str, history: &str) -> String {
    RESUME_QUESTION_TEMPLATE
        .replace("{resume_text}", resume_text)
        .replace("{history}", history)
}

pub fn build_evaluation_prompt(role: &str, topic: &str, question: &str, answer: &str) -> String {
    ANSWER_EVALUATION_TEMPLATE
        .replace("{role}", role)
        .replace("{topic}", topic)
        .replace("{question}", question)
        .replace("{answer}", answer)
}

pub fn build_competence_prompt(topic: &str, confidence: u8, evaluation_history: &str) -> String {
    COMPETENCE_ESTIMATION_TEMPLATE
        .replace("{topic}", topic)
        .replace("{confidence}", &confidence.to_string())
        .replace("{evaluation_history}", evaluation_history)
}

#[allow(clippy::too_many_arguments)]
pub fn build_report_prompt(
    candidate_name: &str,
    date: &str,
    role: &str,
    topic: &str,
    confidence: u8,
    estimated_competence: u8,
    history: &str,
) -> String {
    FINAL_REPORT_TEMPLATE
        .replace("{candidate_name}", candidate_name)
        .replace("{date}", date)
        .replace("{role}", role)
        .replace("{topic}", topic)
        .replace("{confidence}", &confidence.to_string())
        .replace("{estimated_competence}", &estimated_competence.to_string())
        .replace("{history}", history)
}

pub fn build_continuation_prompt(partial_report: &str) -> String {
    REPORT_CONTINUATION_TEMPLATE.replace("{report}", partial_report)
}
