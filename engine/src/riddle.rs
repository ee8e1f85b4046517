use serde::{Deserialize, Serialize};

/// One matching rule: applies to any riddle whose text contains `keyword`
/// (case-insensitive); an answer is correct when it contains any entry of
/// `accepted` (case-insensitive, after trimming).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RiddleRule {
    pub keyword: String,
    pub accepted: Vec<String>,
}

/// Table of riddle rules. Matching is substring-based on both sides; a
/// riddle that matches no rule can never be answered correctly. In a maze
/// definition file the table is the bare rule array.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RiddleTable {
    rules: Vec<RiddleRule>,
}

impl RiddleTable {
    pub fn new(rules: Vec<RiddleRule>) -> Self {
        Self { rules }
    }

    pub fn check(&self, riddle: &str, answer: &str) -> bool {
        let riddle = riddle.to_lowercase();
        let answer = answer.trim().to_lowercase();
        self.rules.iter().any(|rule| {
            riddle.contains(&rule.keyword.to_lowercase())
                && rule
                    .accepted
                    .iter()
                    .any(|a| answer.contains(&a.to_lowercase()))
        })
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

impl Default for RiddleTable {
    fn default() -> Self {
        Self::new(vec![
            RiddleRule {
                keyword: "four legs in the morning".to_string(),
                accepted: vec!["human".to_string(), "man".to_string()],
            },
            RiddleRule {
                keyword: "speak without a mouth".to_string(),
                accepted: vec!["echo".to_string()],
            },
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SPHINX: &str =
        "What walks on four legs in the morning, two at noon and three in the evening?";
    const ECHO: &str = "I speak without a mouth and hear without ears. What am I?";

    #[test]
    fn test_sphinx_riddle_accepts_human_and_man() {
        let table = RiddleTable::default();
        assert!(table.check(SPHINX, "a human being"));
        assert!(table.check(SPHINX, "Man"));
        assert!(table.check(SPHINX, "  A HUMAN  "));
        assert!(!table.check(SPHINX, "dog"));
    }

    #[test]
    fn test_echo_riddle_accepts_echo() {
        let table = RiddleTable::default();
        assert!(table.check(ECHO, "an echo"));
        assert!(!table.check(ECHO, "the wind"));
    }

    #[test]
    fn test_unknown_riddle_is_unanswerable() {
        let table = RiddleTable::default();
        assert!(!table.check("What has keys but opens no locks?", "a piano"));
    }

    #[test]
    fn test_custom_rule_from_json() {
        let rules: Vec<RiddleRule> = serde_json::from_str(
            r#"[{"keyword": "keys but opens no locks", "accepted": ["piano"]}]"#,
        )
        .unwrap();
        let table = RiddleTable::new(rules);
        assert!(table.check("What has keys but opens no locks?", "A PIANO!"));
    }
}
