use serde::{Deserialize, Serialize};
use std::fmt;

/// One of the four DISC communication styles.
///
/// Declaration order is the tie-break order used when picking a dominant
/// trait, so do not reorder the variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Trait {
    D,
    I,
    S,
    C,
}

impl Trait {
    pub const ALL: [Trait; 4] = [Trait::D, Trait::I, Trait::S, Trait::C];

    pub fn letter(self) -> char {
        match self {
            Trait::D => 'D',
            Trait::I => 'I',
            Trait::S => 'S',
            Trait::C => 'C',
        }
    }

    /// Bilingual label, e.g. "主導 (Dominance)"
    pub fn label(self) -> &'static str {
        match self {
            Trait::D => "主導 (Dominance)",
            Trait::I => "影響 (Influence)",
            Trait::S => "穩定 (Steadiness)",
            Trait::C => "謹慎 (Conscientiousness)",
        }
    }

    /// Short label without the English name, e.g. "主導"
    pub fn short_label(self) -> &'static str {
        self.label().split(' ').next().unwrap_or_default()
    }

    /// How to talk to a client with this style.
    pub fn client_tip(self) -> &'static str {
        match self {
            Trait::D => "與 D 型客戶：直奔重點、比較方案與結果，提供明確下一步。",
            Trait::I => "與 I 型客戶：多用故事案例、互動提問，保持輕鬆氛圍。",
            Trait::S => "與 S 型客戶：給予時間思考，強調陪伴與後續服務。",
            Trait::C => "與 C 型客戶：準備數據、條款與風險說明，回答細節問題。",
        }
    }
}

impl fmt::Display for Trait {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.letter())
    }
}

/// A single questionnaire item and the trait its answer counts towards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Question {
    pub text: String,
    #[serde(rename = "trait")]
    pub trait_: Trait,
}

impl Question {
    pub fn new(text: impl Into<String>, trait_: Trait) -> Self {
        Self {
            text: text.into(),
            trait_,
        }
    }
}

const DEFAULT_QUESTIONS: [(&str, Trait); 12] = [
    ("面對緊急狀況時，我會主動掌握方向並快速做決定。", Trait::D),
    ("參與團隊討論時，我喜歡拋出新點子並帶動氣氛。", Trait::I),
    ("客戶提出疑問時，我會耐心傾聽並提供完整解釋。", Trait::S),
    ("處理保單細節時，我會反覆確認文件與數字。", Trait::C),
    ("遇到阻力時，我傾向直接挑戰並突破。", Trait::D),
    ("第一次見面我能很快與客戶建立輕鬆對話。", Trait::I),
    ("我喜歡維持穩定的合作關係而非激烈競爭。", Trait::S),
    ("我在意流程與合規，會確保每一步都符合規範。", Trait::C),
    ("設定目標時，我希望能主導節奏並看到成果。", Trait::D),
    ("在大型場合分享產品或故事時，我感到興奮。", Trait::I),
    ("面對變動，我會先觀察再慢慢採取行動。", Trait::S),
    ("收到客戶需求，我會整理表格或清單以便追蹤。", Trait::C),
];

/// The built-in twelve-question questionnaire.
pub fn default_questions() -> Vec<Question> {
    DEFAULT_QUESTIONS
        .iter()
        .map(|(text, t)| Question::new(*text, *t))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_questionnaire_shape() {
        let questions = default_questions();
        assert_eq!(questions.len(), 12);
        for t in Trait::ALL {
            assert_eq!(questions.iter().filter(|q| q.trait_ == t).count(), 3);
        }
        // Cycles D, I, S, C
        assert_eq!(questions[0].trait_, Trait::D);
        assert_eq!(questions[5].trait_, Trait::I);
        assert_eq!(questions[11].trait_, Trait::C);
    }

    #[test]
    fn test_trait_order_is_disc() {
        assert!(Trait::D < Trait::I);
        assert!(Trait::I < Trait::S);
        assert!(Trait::S < Trait::C);
    }

    #[test]
    fn test_short_label() {
        assert_eq!(Trait::S.short_label(), "穩定");
        assert_eq!(Trait::C.label(), "謹慎 (Conscientiousness)");
    }

    #[test]
    fn test_question_yaml_uses_trait_key() {
        let yaml = r#"
text: "I like checklists"
trait: C
"#;
        let question: Question = serde_saphyr::from_str(yaml).unwrap();
        assert_eq!(question, Question::new("I like checklists", Trait::C));
    }
}
