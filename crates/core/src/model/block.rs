use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One displayable unit inside a lesson.
///
/// On the wire a block is an object carrying one of `text`, `image`,
/// `imagePrompt` or `note` as a string. When several are present the first
/// non-empty one in that order wins. Anything else, including non-object
/// values, is `Unknown` and renders nothing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Value", into = "RawBlock")]
pub enum ContentBlock {
    Text(String),
    Image(String),
    ImagePrompt(String),
    Note(String),
    Unknown,
}

impl ContentBlock {
    #[must_use]
    pub fn text(value: impl Into<String>) -> Self {
        Self::Text(value.into())
    }

    #[must_use]
    pub fn image_prompt(value: impl Into<String>) -> Self {
        Self::ImagePrompt(value.into())
    }

    #[must_use]
    pub fn is_unknown(&self) -> bool {
        matches!(self, Self::Unknown)
    }

    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_image_prompt(&self) -> Option<&str> {
        match self {
            Self::ImagePrompt(prompt) => Some(prompt),
            _ => None,
        }
    }
}

#[derive(Debug, Default, Serialize)]
#[serde(rename_all = "camelCase")]
struct RawBlock {
    #[serde(skip_serializing_if = "Option::is_none")]
    text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    image: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    image_prompt: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    note: Option<String>,
}

const KINDS: [(&str, fn(String) -> ContentBlock); 4] = [
    ("text", ContentBlock::Text),
    ("image", ContentBlock::Image),
    ("imagePrompt", ContentBlock::ImagePrompt),
    ("note", ContentBlock::Note),
];

impl From<Value> for ContentBlock {
    fn from(value: Value) -> Self {
        let Value::Object(fields) = value else {
            return Self::Unknown;
        };
        KINDS
            .iter()
            .find_map(|(key, kind)| match fields.get(*key) {
                Some(Value::String(val)) if !val.is_empty() => Some(kind(val.clone())),
                _ => None,
            })
            .unwrap_or(Self::Unknown)
    }
}

impl From<ContentBlock> for RawBlock {
    fn from(block: ContentBlock) -> Self {
        match block {
            ContentBlock::Text(text) => Self {
                text: Some(text),
                ..Self::default()
            },
            ContentBlock::Image(image) => Self {
                image: Some(image),
                ..Self::default()
            },
            ContentBlock::ImagePrompt(prompt) => Self {
                image_prompt: Some(prompt),
                ..Self::default()
            },
            ContentBlock::Note(note) => Self {
                note: Some(note),
                ..Self::default()
            },
            ContentBlock::Unknown => Self::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(raw: &str) -> ContentBlock {
        serde_json::from_str(raw).unwrap()
    }

    #[test]
    fn classifies_each_kind() {
        assert_eq!(parse(r#"{"text":"hello"}"#), ContentBlock::text("hello"));
        assert_eq!(
            parse(r#"{"image":"/img/a.png"}"#),
            ContentBlock::Image("/img/a.png".into())
        );
        assert_eq!(
            parse(r#"{"imagePrompt":"a cat"}"#),
            ContentBlock::image_prompt("a cat")
        );
        assert_eq!(parse(r#"{"note":"careful"}"#), ContentBlock::Note("careful".into()));
    }

    #[test]
    fn empty_or_unrecognized_objects_are_unknown() {
        assert!(parse("{}").is_unknown());
        assert!(parse(r#"{"text":""}"#).is_unknown());
        assert!(parse(r#"{"video":"clip.mp4"}"#).is_unknown());
    }

    #[test]
    fn non_string_values_are_unknown() {
        assert!(parse(r#""texte brut""#).is_unknown());
        assert!(parse("42").is_unknown());
        assert!(parse("null").is_unknown());
        assert!(parse(r#"{"text":42}"#).is_unknown());
        assert_eq!(
            parse(r#"{"text":["a"],"note":"n"}"#),
            ContentBlock::Note("n".into())
        );
    }

    #[test]
    fn stray_blocks_do_not_reject_the_list() {
        let blocks: Vec<ContentBlock> =
            serde_json::from_str(r#"["texte brut", {"text":"ok"}, {"text":42}]"#).unwrap();
        assert_eq!(
            blocks,
            vec![ContentBlock::Unknown, ContentBlock::text("ok"), ContentBlock::Unknown]
        );
    }

    #[test]
    fn first_present_field_wins() {
        let block = parse(r#"{"note":"n","text":"t"}"#);
        assert_eq!(block, ContentBlock::text("t"));

        let block = parse(r#"{"text":"","imagePrompt":"p"}"#);
        assert_eq!(block, ContentBlock::image_prompt("p"));
    }

    #[test]
    fn serializes_as_single_key_object() {
        let json = serde_json::to_string(&ContentBlock::image_prompt("piano keys")).unwrap();
        assert_eq!(json, r#"{"imagePrompt":"piano keys"}"#);

        let json = serde_json::to_string(&ContentBlock::Unknown).unwrap();
        assert_eq!(json, "{}");
    }
}
