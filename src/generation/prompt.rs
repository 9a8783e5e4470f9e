//! Prompt construction: topic quotas, history exclusion, output contract.

use serde::{Deserialize, Serialize};

/// Number of words to request for one topic
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopicQuota {
    pub topic: String,
    pub count: u32,
}

impl TopicQuota {
    pub fn new(topic: impl Into<String>, count: u32) -> Self {
        Self {
            topic: topic.into(),
            count,
        }
    }
}

pub fn default_topics() -> Vec<TopicQuota> {
    vec![
        TopicQuota::new("football industry (clubs, transfers, broadcasting, sponsorship)", 2),
        TopicQuota::new("AI technology (machine learning, data, software engineering)", 2),
        TopicQuota::new("business English used at work", 1),
    ]
}

/// Build the generation prompt.
///
/// Every word in `history` is listed as excluded; the model is told to answer
/// with a bare JSON array in the entry schema and nothing else.
pub fn build_prompt(topics: &[TopicQuota], history: &[String]) -> String {
    let total: u32 = topics.iter().map(|t| t.count).sum();

    let mut prompt = format!(
        "You are an English vocabulary tutor for Korean professionals.\n\
         Pick {} English words or short expressions, distributed exactly as follows:\n",
        total
    );
    for quota in topics {
        prompt.push_str(&format!("- {} from {}\n", quota.count, quota.topic));
    }

    if history.is_empty() {
        prompt.push_str("\nAny suitable words may be used.\n");
    } else {
        prompt.push_str(
            "\nThe following words have already been used. Do NOT include any of them:\n",
        );
        prompt.push_str(&history.join(", "));
        prompt.push('\n');
    }

    prompt.push_str(
        "\nOutput rules:\n\
         - Respond with a single JSON array and nothing else.\n\
         - Do not wrap the array in a code block or use markdown emphasis.\n\
         - Do not add any explanation before or after the array.\n\
         - Each element must be an object with exactly these string fields:\n  \
           \"word\": the English word,\n  \
           \"meaning\": its meaning in Korean,\n  \
           \"description\": a one-sentence explanation in Korean of how it is used,\n  \
           \"example_en\": an English example sentence,\n  \
           \"example_kr\": the Korean translation of the example sentence.\n",
    );

    prompt
}
