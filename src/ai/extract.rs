/// 从模型输出中取出第一个完整的 JSON 对象
///
/// 按括号配对扫描，字符串字面量内的花括号和转义字符不参与计数。
pub fn extract_json_object(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let mut depth: usize = 0;
    let mut in_string = false;
    let mut escaped = false;

    for (offset, ch) in text[start..].char_indices() {
        if in_string {
            match ch {
                _ if escaped => escaped = false,
                '\\' => escaped = true,
                '"' => in_string = false,
                _ => {}
            }
            continue;
        }

        match ch {
            '"' => in_string = true,
            '{' => depth += 1,
            '}' => {
                depth -= 1;
                if depth == 0 {
                    return Some(&text[start..start + offset + ch.len_utf8()]);
                }
            }
            _ => {}
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_object() {
        assert_eq!(
            extract_json_object(r#"{"score": 7}"#),
            Some(r#"{"score": 7}"#)
        );
    }

    #[test]
    fn test_object_surrounded_by_prose() {
        let text = "Here is my verdict:\n{\"score\": 10, \"nested\": {\"a\": 1}}\nThanks! {ignored}";
        assert_eq!(
            extract_json_object(text),
            Some("{\"score\": 10, \"nested\": {\"a\": 1}}")
        );
    }

    #[test]
    fn test_braces_inside_strings_are_ignored() {
        let text = r#"{"feedback": "use } and { carefully \" }", "score": 4} trailing"#;
        assert_eq!(
            extract_json_object(text),
            Some(r#"{"feedback": "use } and { carefully \" }", "score": 4}"#)
        );
    }

    #[test]
    fn test_missing_or_unbalanced() {
        assert_eq!(extract_json_object("no json here"), None);
        assert_eq!(extract_json_object(r#"{"score": 4"#), None);
    }

    #[test]
    fn test_multibyte_text() {
        let text = "结果：{\"feedback\": \"正确\"}。";
        assert_eq!(extract_json_object(text), Some("{\"feedback\": \"正确\"}"));
    }
}
