//! Ingestion of generated study content
//!
//! The content backend has shipped more than one response shape for the
//! same endpoint. Each shape is decoded into its own variant once, here,
//! and then folded into a single domain type, so nothing downstream ever
//! handles raw JSON.

#[cfg(feature = "python")]
use pyo3::prelude::*;

use crate::error::{PenmarkError, Result};
use crate::grading::{grade, GradingResult};
use serde::{Deserialize, Serialize};

// ============= Wire shapes =============

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct WordInfoV2 {
    original: String,
    #[serde(default)]
    part_of_speech: Option<String>,
    #[serde(default)]
    meaning: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ExampleV2 {
    english: String,
    #[serde(default)]
    korean: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RelatedWordV2 {
    word: String,
    #[serde(default)]
    part_of_speech: Option<String>,
    #[serde(default)]
    meaning: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct RelatedWordsV2 {
    #[serde(default)]
    synonym: Option<RelatedWordV2>,
    #[serde(default)]
    antonym: Option<RelatedWordV2>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ExamplesV2 {
    word: WordInfoV2,
    examples: Vec<ExampleV2>,
    #[serde(default)]
    related_words: RelatedWordsV2,
}

#[derive(Debug, Deserialize)]
struct ExamplesV1 {
    word: String,
    examples: Vec<String>,
    #[serde(default)]
    synonyms: Vec<String>,
    #[serde(default)]
    antonyms: Vec<String>,
}

/// Example-sentence responses, one variant per backend version
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ExamplesPayload {
    V2(ExamplesV2),
    V1(ExamplesV1),
}

#[derive(Debug, Deserialize)]
struct ProblemV2 {
    korean: String,
    answer: String,
}

#[derive(Debug, Deserialize)]
struct ProblemV1 {
    question: String,
    answer: String,
}

/// Writing-problem responses, one variant per backend version
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ProblemsPayload {
    V2 { problems: Vec<ProblemV2> },
    V1 { questions: Vec<ProblemV1> },
}

// ============= Domain types =============

/// Example sentence with an optional translation
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExampleSentence {
    pub english: String,
    pub translation: Option<String>,
}

/// Synonym or antonym suggested alongside a word
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RelatedWord {
    pub word: String,
    pub part_of_speech: Option<String>,
    pub meaning: Option<String>,
}

impl RelatedWord {
    fn bare(word: String) -> Self {
        Self {
            word,
            part_of_speech: None,
            meaning: None,
        }
    }
}

impl From<RelatedWordV2> for RelatedWord {
    fn from(raw: RelatedWordV2) -> Self {
        Self {
            word: raw.word,
            part_of_speech: raw.part_of_speech,
            meaning: raw.meaning,
        }
    }
}

/// Validated example-sentence content for one word
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WordExamples {
    pub word: String,
    pub part_of_speech: Option<String>,
    pub meaning: Option<String>,
    pub examples: Vec<ExampleSentence>,
    pub synonyms: Vec<RelatedWord>,
    pub antonyms: Vec<RelatedWord>,
}

/// Sentence to translate and the model answer it is graded against
#[cfg_attr(feature = "python", pyclass)]
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WritingProblem {
    #[cfg_attr(feature = "python", pyo3(get))]
    pub prompt: String,
    #[cfg_attr(feature = "python", pyo3(get))]
    pub model_answer: String,
}

impl WritingProblem {
    /// Grade a learner attempt against this problem's model answer
    pub fn grade(&self, learner_answer: &str) -> GradingResult {
        grade(learner_answer, &self.model_answer)
    }
}

#[cfg(feature = "python")]
#[pymethods]
impl WritingProblem {
    #[pyo3(name = "grade")]
    fn py_grade(&self, learner_answer: &str) -> GradingResult {
        self.grade(learner_answer)
    }

    fn __repr__(&self) -> String {
        format!(
            "WritingProblem(prompt='{}...')",
            self.prompt.chars().take(40).collect::<String>()
        )
    }
}

fn non_blank(s: Option<String>) -> Option<String> {
    s.map(|s| s.trim().to_string()).filter(|s| !s.is_empty())
}

fn decode<T: serde::de::DeserializeOwned>(json: &str, kind: &'static str) -> Result<T> {
    let value: serde_json::Value = serde_json::from_str(json)?;
    serde_json::from_value(value).map_err(|_| PenmarkError::UnrecognizedPayload(kind))
}

/// Decode and validate an example-sentence response
pub fn parse_word_examples(json: &str) -> Result<WordExamples> {
    let payload: ExamplesPayload = decode(json, "examples")?;

    let (word, part_of_speech, meaning, raw_examples, synonyms, antonyms) = match payload {
        ExamplesPayload::V2(v2) => (
            v2.word.original,
            v2.word.part_of_speech,
            v2.word.meaning,
            v2.examples
                .into_iter()
                .map(|e| (e.english, e.korean))
                .collect::<Vec<_>>(),
            v2.related_words.synonym.into_iter().map(RelatedWord::from).collect(),
            v2.related_words.antonym.into_iter().map(RelatedWord::from).collect(),
        ),
        ExamplesPayload::V1(v1) => (
            v1.word,
            None,
            None,
            v1.examples.into_iter().map(|e| (e, None)).collect(),
            v1.synonyms.into_iter().map(RelatedWord::bare).collect(),
            v1.antonyms.into_iter().map(RelatedWord::bare).collect(),
        ),
    };

    let word = word.trim().to_string();
    if word.is_empty() {
        return Err(PenmarkError::invalid_input("examples payload has an empty word"));
    }

    let examples: Vec<ExampleSentence> = raw_examples
        .into_iter()
        .filter_map(|(english, translation)| {
            let english = english.trim();
            if english.is_empty() {
                log::warn!("dropping blank example sentence for '{word}'");
                return None;
            }
            Some(ExampleSentence {
                english: english.to_string(),
                translation: non_blank(translation),
            })
        })
        .collect();

    if examples.is_empty() {
        return Err(PenmarkError::invalid_input(format!(
            "no usable example sentences for '{word}'"
        )));
    }

    Ok(WordExamples {
        word,
        part_of_speech: non_blank(part_of_speech),
        meaning: non_blank(meaning),
        examples,
        synonyms,
        antonyms,
    })
}

/// Decode and validate a writing-problem response
pub fn parse_writing_problems(json: &str) -> Result<Vec<WritingProblem>> {
    let payload: ProblemsPayload = decode(json, "writing problems")?;

    let raw: Vec<(String, String)> = match payload {
        ProblemsPayload::V2 { problems } => {
            problems.into_iter().map(|p| (p.korean, p.answer)).collect()
        }
        ProblemsPayload::V1 { questions } => {
            questions.into_iter().map(|q| (q.question, q.answer)).collect()
        }
    };

    let problems: Vec<WritingProblem> = raw
        .into_iter()
        .filter_map(|(prompt, answer)| {
            let model_answer = answer.trim();
            if model_answer.is_empty() {
                log::warn!("dropping writing problem without a model answer: '{prompt}'");
                return None;
            }
            Some(WritingProblem {
                prompt: prompt.trim().to_string(),
                model_answer: model_answer.to_string(),
            })
        })
        .collect();

    if problems.is_empty() {
        return Err(PenmarkError::invalid_input("no usable writing problems"));
    }
    Ok(problems)
}

// ============= Python Binding =============

#[cfg(feature = "python")]
#[pyfunction]
#[pyo3(name = "parse_writing_problems")]
pub fn py_parse_writing_problems(json: &str) -> PyResult<Vec<WritingProblem>> {
    Ok(parse_writing_problems(json)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::feedback::Band;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_examples_v2() {
        let json = r#"{
            "word": {"original": "travel", "partOfSpeech": "verb", "meaning": "여행하다"},
            "examples": [
                {"english": "I love to travel.", "korean": "나는 여행을 좋아한다."},
                {"english": "  ", "korean": "빈 문장"}
            ],
            "relatedWords": {
                "synonym": {"word": "journey", "partOfSpeech": "verb", "meaning": "여행하다"}
            }
        }"#;

        let parsed = parse_word_examples(json).unwrap();
        assert_eq!(parsed.word, "travel");
        assert_eq!(parsed.part_of_speech.as_deref(), Some("verb"));
        assert_eq!(
            parsed.examples,
            vec![ExampleSentence {
                english: "I love to travel.".to_string(),
                translation: Some("나는 여행을 좋아한다.".to_string()),
            }]
        );
        assert_eq!(parsed.synonyms.len(), 1);
        assert_eq!(parsed.synonyms[0].word, "journey");
        assert!(parsed.antonyms.is_empty());
    }

    #[test]
    fn test_examples_v1() {
        let json = r#"{
            "word": "happy",
            "examples": ["She looks happy today."],
            "antonyms": ["sad"]
        }"#;

        let parsed = parse_word_examples(json).unwrap();
        assert_eq!(parsed.word, "happy");
        assert_eq!(parsed.meaning, None);
        assert_eq!(parsed.examples[0].translation, None);
        assert!(parsed.synonyms.is_empty());
        assert_eq!(parsed.antonyms, vec![RelatedWord::bare("sad".to_string())]);
    }

    #[test]
    fn test_examples_rejections() {
        assert!(matches!(
            parse_word_examples("not json"),
            Err(PenmarkError::Decode(_))
        ));
        assert!(matches!(
            parse_word_examples(r#"{"unexpected": true}"#),
            Err(PenmarkError::UnrecognizedPayload("examples"))
        ));
        assert!(matches!(
            parse_word_examples(r#"{"word": "calm", "examples": [" "]}"#),
            Err(PenmarkError::InvalidInput(_))
        ));
        assert!(matches!(
            parse_word_examples(r#"{"word": " ", "examples": ["x"]}"#),
            Err(PenmarkError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_problems_v2() {
        let json = r#"{"problems": [
            {"korean": "나는 매일 학교에 간다.", "answer": "I go to school every day."},
            {"korean": "답이 없다", "answer": ""}
        ]}"#;

        let problems = parse_writing_problems(json).unwrap();
        assert_eq!(
            problems,
            vec![WritingProblem {
                prompt: "나는 매일 학교에 간다.".to_string(),
                model_answer: "I go to school every day.".to_string(),
            }]
        );
    }

    #[test]
    fn test_problems_v1() {
        let json = r#"{"questions": [{"question": "그녀는 책을 읽는다.", "answer": "She reads a book."}]}"#;
        let problems = parse_writing_problems(json).unwrap();
        assert_eq!(problems[0].model_answer, "She reads a book.");
    }

    #[test]
    fn test_problems_rejections() {
        assert!(matches!(
            parse_writing_problems(r#"{"items": []}"#),
            Err(PenmarkError::UnrecognizedPayload(_))
        ));
        assert!(matches!(
            parse_writing_problems(r#"{"problems": []}"#),
            Err(PenmarkError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_problem_grading() {
        let problem = WritingProblem {
            prompt: "나는 매일 학교에 간다.".to_string(),
            model_answer: "I go to school every day.".to_string(),
        };
        let result = problem.grade("i go to school every day.");
        assert_eq!(result.score, 100);
        assert_eq!(result.band, Band::Excellent);
        assert_eq!(problem.grade("").band, Band::Poor);
    }
}
