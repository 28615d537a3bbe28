//! Tone calibration — maps a writing style to the prose description given to the model.

use serde::{Deserialize, Serialize};

/// Narration style of the webinar script.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WritingStyle {
    #[default]
    Professional,
    Casual,
    Energetic,
    Storytelling,
    Academic,
}

impl WritingStyle {
    /// Prose description inserted into the prompt as `文体スタイル`.
    pub fn description(&self) -> &'static str {
        match self {
            WritingStyle::Professional => {
                "専門的で信頼感のある文体。業界用語を適切に使い、データに基づいた説明を重視します。"
            }
            WritingStyle::Casual => {
                "フレンドリーでカジュアルな文体。親しみやすく、読者との距離感を縮める表現を使います。"
            }
            WritingStyle::Energetic => {
                "熱量の高い、情熱的な文体。行動を促す力強い表現と、読者の感情に訴えかける表現を使います。"
            }
            WritingStyle::Storytelling => {
                "物語形式で伝える文体。具体的なストーリーを通して概念を説明し、読者の共感を得ます。"
            }
            WritingStyle::Academic => {
                "学術的で論理的な文体。根拠を明確に示し、客観的な説明を心がけます。"
            }
        }
    }
}
