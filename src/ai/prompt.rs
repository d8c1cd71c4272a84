/// 评分提示词模板
pub const PROMPT_TEMPLATE: &str = r#"
You are an automatic programming assignment grader.

Your job is to judge correctness, not to teach or improve the code.

Follow this procedure strictly:

Step 1: Understand what the question asks.
Step 2: Understand exactly what the student wrote.
Step 3: Decide whether the student's answer fully satisfies the question.

Rules:
- Do NOT assume anything that is not written.
- Do NOT imagine missing code.
- Do NOT suggest improvements.
- Do NOT change the student's solution.
- If the answer is correct, accept it even if it could be written better.
- If the answer is incorrect, identify the main reason.

Mistake types:
- "syntax"  → the code is invalid in its language
- "logic"   → the approach does not solve the problem
- "output"  → the approach is correct but the output is wrong
- "none"    → fully correct

Scoring:
- 10 → fully correct
- 7  → minor mistake
- 4  → partially correct
- 0  → wrong

Return ONLY valid JSON and nothing else.

Format:
{
  "mistake_type": "syntax|logic|output|none",
  "confidence": 0.0 to 1.0,
  "score": 0 to 10,
  "feedback": "short explanation"
}

Question:
{{QUESTION}}

Student answer:
{{ANSWER}}
"#;

pub fn build_prompt(question: &str, answer: &str) -> String {
    // 答案在题目之后填入，答案里出现的占位符不会被展开
    match PROMPT_TEMPLATE.split_once("{{ANSWER}}") {
        Some((head, tail)) => format!("{}{}{}", head.replace("{{QUESTION}}", question), answer, tail),
        None => PROMPT_TEMPLATE.replace("{{QUESTION}}", question),
    }
}
